//! Pixel access functions
//!
//! Bounds-checked getters and setters for individual samples, plus
//! edge-replicating access used by the neighborhood filters.

use super::{Channels, Raster, RasterMut};
use crate::error::{Error, Result};

#[inline]
fn sample_index(width: u32, channels: Channels, x: u32, y: u32, c: u32) -> usize {
    (y as usize * width as usize + x as usize) * channels.count() as usize + c as usize
}

impl Raster {
    /// Get the sample of channel `c` at (x, y).
    ///
    /// Returns `None` if coordinates or channel are out of range.
    pub fn get_sample(&self, x: u32, y: u32, c: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() || c >= self.channels().count() {
            return None;
        }
        Some(self.data()[sample_index(self.width(), self.channels(), x, y, c)])
    }

    /// Get a grayscale value at (x, y).
    ///
    /// Only valid for single-channel rasters.
    pub fn get_gray(&self, x: u32, y: u32) -> Option<u8> {
        if !self.is_gray() {
            return None;
        }
        self.get_sample(x, y, 0)
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 3-channel rasters.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.channels() != Channels::Rgb || x >= self.width() || y >= self.height() {
            return None;
        }
        let i = sample_index(self.width(), Channels::Rgb, x, y, 0);
        let d = self.data();
        Some((d[i], d[i + 1], d[i + 2]))
    }

    /// Get a sample with coordinates clamped into the image.
    ///
    /// Out-of-range coordinates replicate the nearest edge pixel.
    ///
    /// # Panics
    ///
    /// Panics if `c >= channels`.
    #[inline]
    pub fn sample_clamped(&self, x: i64, y: i64, c: u32) -> u8 {
        assert!(c < self.channels().count(), "channel {c} out of range");
        let xc = x.clamp(0, self.width() as i64 - 1) as u32;
        let yc = y.clamp(0, self.height() as i64 - 1) as u32;
        self.data()[sample_index(self.width(), self.channels(), xc, yc, c)]
    }
}

impl RasterMut {
    /// Get the sample of channel `c` at (x, y).
    pub fn get_sample(&self, x: u32, y: u32, c: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() || c >= self.channels().count() {
            return None;
        }
        Some(self.data()[sample_index(self.width(), self.channels(), x, y, c)])
    }

    /// Set the sample of channel `c` at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds
    /// and [`Error::InvalidParameter`] for a channel past the layout.
    pub fn set_sample(&mut self, x: u32, y: u32, c: u32, val: u8) -> Result<()> {
        let (width, height, channels) = (self.width(), self.height(), self.channels());
        if x >= width || y >= height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        if c >= channels.count() {
            return Err(Error::InvalidParameter(format!(
                "channel {} out of range for {} channels",
                c,
                channels.count()
            )));
        }
        self.data_mut()[sample_index(width, channels, x, y, c)] = val;
        Ok(())
    }

    /// Set a grayscale value at (x, y).
    ///
    /// On RGB rasters all three channels receive the value.
    pub fn set_gray(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        for c in 0..self.channels().count() {
            self.set_sample(x, y, c, val)?;
        }
        Ok(())
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// Only valid for 3-channel rasters.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.channels() != Channels::Rgb {
            return Err(Error::UnsupportedChannels {
                expected: "3",
                actual: self.channels().count(),
            });
        }
        self.set_sample(x, y, 0, r)?;
        self.set_sample(x, y, 1, g)?;
        self.set_sample(x, y, 2, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_access() {
        let raster = Raster::new(4, 3, Channels::Gray).unwrap();
        let mut raster = raster.try_into_mut().unwrap();
        raster.set_gray(3, 2, 200).unwrap();
        assert!(raster.set_gray(4, 2, 1).is_err());
        let raster: Raster = raster.into();

        assert_eq!(raster.get_gray(3, 2), Some(200));
        assert_eq!(raster.get_gray(0, 0), Some(0));
        assert_eq!(raster.get_gray(4, 0), None);
        assert_eq!(raster.get_rgb(3, 2), None);
    }

    #[test]
    fn test_rgb_access() {
        let mut raster = Raster::new(2, 2, Channels::Rgb).unwrap().to_mut();
        raster.set_rgb(1, 0, 10, 20, 30).unwrap();
        let raster: Raster = raster.into();

        assert_eq!(raster.get_rgb(1, 0), Some((10, 20, 30)));
        assert_eq!(raster.get_sample(1, 0, 2), Some(30));
        assert_eq!(raster.get_sample(1, 0, 3), None);
        assert_eq!(raster.get_gray(1, 0), None);
    }

    #[test]
    fn test_sample_clamped_replicates_edges() {
        let raster = Raster::from_raw(3, 2, Channels::Gray, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(raster.sample_clamped(-5, -5, 0), 1);
        assert_eq!(raster.sample_clamped(10, 0, 0), 3);
        assert_eq!(raster.sample_clamped(1, 9, 0), 5);
        assert_eq!(raster.sample_clamped(2, 1, 0), 6);
    }
}
