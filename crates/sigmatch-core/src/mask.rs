//! BinaryMask - two-level ink/background image
//!
//! A mask stores one byte per pixel, and every byte is either the ink value
//! or the background value of the mask's [`Polarity`]. The polarity is fixed
//! when the mask is created; every stage that derives a new mask from an
//! existing one keeps it.

use crate::error::{Error, Result};
use crate::geometry::ImageBox;
use crate::raster::{Channels, Raster};
use serde::{Deserialize, Serialize};

/// Sample value of a dark pixel
pub const DARK: u8 = 0;
/// Sample value of a light pixel
pub const LIGHT: u8 = 255;

/// Which sample value denotes ink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Ink is 0 (black strokes on white paper)
    #[default]
    DarkInk,
    /// Ink is 255 (white strokes on black)
    LightInk,
}

impl Polarity {
    /// Sample value used for ink pixels.
    #[inline]
    pub fn ink_value(self) -> u8 {
        match self {
            Polarity::DarkInk => DARK,
            Polarity::LightInk => LIGHT,
        }
    }

    /// Sample value used for background pixels.
    #[inline]
    pub fn background_value(self) -> u8 {
        match self {
            Polarity::DarkInk => LIGHT,
            Polarity::LightInk => DARK,
        }
    }

    /// The opposite convention.
    #[inline]
    pub fn inverted(self) -> Polarity {
        match self {
            Polarity::DarkInk => Polarity::LightInk,
            Polarity::LightInk => Polarity::DarkInk,
        }
    }
}

/// Two-level mask with a fixed polarity
///
/// # Examples
///
/// ```
/// use sigmatch_core::{BinaryMask, Polarity};
///
/// let mut mask = BinaryMask::new(8, 4, Polarity::DarkInk).unwrap();
/// mask.set_ink(2, 1, true).unwrap();
/// assert!(mask.is_ink(2, 1));
/// assert_eq!(mask.count_ink(), 1);
/// assert_eq!(mask.sample(2, 1), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    polarity: Polarity,
    data: Vec<u8>,
}

impl BinaryMask {
    /// Create an all-background mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, polarity: Polarity) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            polarity,
            data: vec![polarity.background_value(); width as usize * height as usize],
        })
    }

    /// Build a mask from row-major ink flags.
    pub fn from_ink(width: u32, height: u32, polarity: Polarity, ink: &[bool]) -> Result<Self> {
        let expected = width as usize * height as usize;
        if ink.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: ink.len(),
            });
        }
        let mut mask = Self::new(width, height, polarity)?;
        let (fg, bg) = (polarity.ink_value(), polarity.background_value());
        for (dst, &is_ink) in mask.data.iter_mut().zip(ink) {
            *dst = if is_ink { fg } else { bg };
        }
        Ok(mask)
    }

    /// Read a mask back from a two-level grayscale raster.
    ///
    /// Samples equal to `polarity.ink_value()` become ink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] for RGB input and
    /// [`Error::NotBinary`] for any sample other than 0 or 255.
    pub fn from_raster(raster: &Raster, polarity: Polarity) -> Result<Self> {
        if raster.channels() != Channels::Gray {
            return Err(Error::UnsupportedChannels {
                expected: "1",
                actual: raster.channels().count(),
            });
        }
        if let Some(pos) = raster.data().iter().position(|&v| v != DARK && v != LIGHT) {
            let w = raster.width() as usize;
            return Err(Error::NotBinary {
                x: (pos % w) as u32,
                y: (pos / w) as u32,
                value: raster.data()[pos],
            });
        }
        Ok(Self {
            width: raster.width(),
            height: raster.height(),
            polarity,
            data: raster.data().to_vec(),
        })
    }

    /// Get the mask width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the mask height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the polarity convention.
    #[inline]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Raw row-major samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Sample value at (x, y), or `None` out of bounds.
    pub fn sample(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.index(x, y)])
    }

    /// Check whether (x, y) is ink. Out-of-bounds pixels are background.
    #[inline]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.data[self.index(x, y)] == self.polarity.ink_value()
    }

    /// Signed variant of [`is_ink`](Self::is_ink) for neighbor lookups.
    #[inline]
    pub fn is_ink_at(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && self.is_ink(x as u32, y as u32)
    }

    /// Mark (x, y) as ink or background.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_ink(&mut self, x: u32, y: u32, ink: bool) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let i = self.index(x, y);
        self.data[i] = if ink {
            self.polarity.ink_value()
        } else {
            self.polarity.background_value()
        };
        Ok(())
    }

    /// Count ink pixels.
    pub fn count_ink(&self) -> u64 {
        let fg = self.polarity.ink_value();
        self.data.iter().filter(|&&v| v == fg).count() as u64
    }

    /// Row-major ink flags.
    pub fn ink_flags(&self) -> Vec<bool> {
        let fg = self.polarity.ink_value();
        self.data.iter().map(|&v| v == fg).collect()
    }

    /// Render as a grayscale raster using the mask's own sample values.
    pub fn to_raster(&self) -> Result<Raster> {
        Raster::from_raw(self.width, self.height, Channels::Gray, self.data.clone())
    }

    /// Same ink set, rendered in another polarity.
    pub fn with_polarity(&self, polarity: Polarity) -> BinaryMask {
        if polarity == self.polarity {
            return self.clone();
        }
        BinaryMask {
            width: self.width,
            height: self.height,
            polarity,
            data: self.data.iter().map(|&v| 255 - v).collect(),
        }
    }

    /// Copy the pixels inside `region` into a new mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the box is empty or extends
    /// past the mask.
    pub fn crop(&self, region: &ImageBox) -> Result<BinaryMask> {
        if region.is_empty() || !region.fits_within(self.width, self.height) {
            return Err(Error::InvalidParameter(format!(
                "crop box {:?} outside {}x{} mask",
                region, self.width, self.height
            )));
        }
        let mut data = Vec::with_capacity(region.area() as usize);
        for y in region.y..region.bottom() {
            let start = self.index(region.x, y);
            data.extend_from_slice(&self.data[start..start + region.w as usize]);
        }
        Ok(BinaryMask {
            width: region.w,
            height: region.h,
            polarity: self.polarity,
            data,
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_values() {
        assert_eq!(Polarity::default(), Polarity::DarkInk);
        assert_eq!(Polarity::DarkInk.ink_value(), 0);
        assert_eq!(Polarity::DarkInk.background_value(), 255);
        assert_eq!(Polarity::LightInk.ink_value(), 255);
        assert_eq!(Polarity::DarkInk.inverted(), Polarity::LightInk);
    }

    #[test]
    fn test_new_is_background() {
        let mask = BinaryMask::new(5, 4, Polarity::LightInk).unwrap();
        assert_eq!(mask.count_ink(), 0);
        assert!(mask.data().iter().all(|&v| v == 0));
        assert!(BinaryMask::new(0, 4, Polarity::LightInk).is_err());
    }

    #[test]
    fn test_from_ink_and_flags() {
        let ink = [true, false, false, true];
        let mask = BinaryMask::from_ink(2, 2, Polarity::DarkInk, &ink).unwrap();
        assert_eq!(mask.data(), &[0, 255, 255, 0]);
        assert_eq!(mask.ink_flags(), ink);
        assert!(BinaryMask::from_ink(3, 2, Polarity::DarkInk, &ink).is_err());
    }

    #[test]
    fn test_out_of_bounds_is_background() {
        let mut mask = BinaryMask::new(3, 3, Polarity::DarkInk).unwrap();
        mask.set_ink(2, 2, true).unwrap();
        assert!(mask.is_ink_at(2, 2));
        assert!(!mask.is_ink_at(-1, 2));
        assert!(!mask.is_ink_at(3, 2));
        assert!(mask.set_ink(3, 0, true).is_err());
    }

    #[test]
    fn test_with_polarity_keeps_ink() {
        let mut mask = BinaryMask::new(4, 1, Polarity::DarkInk).unwrap();
        mask.set_ink(1, 0, true).unwrap();
        let light = mask.with_polarity(Polarity::LightInk);
        assert_eq!(light.data(), &[0, 255, 0, 0]);
        assert_eq!(light.ink_flags(), mask.ink_flags());
        assert_ne!(light, mask);
    }

    #[test]
    fn test_raster_roundtrip() {
        let mut mask = BinaryMask::new(3, 2, Polarity::DarkInk).unwrap();
        mask.set_ink(0, 1, true).unwrap();
        let raster = mask.to_raster().unwrap();
        let back = BinaryMask::from_raster(&raster, Polarity::DarkInk).unwrap();
        assert_eq!(back, mask);
    }

    #[test]
    fn test_from_raster_rejects_gray_levels() {
        let raster = Raster::from_raw(2, 1, Channels::Gray, vec![0, 128]).unwrap();
        let err = BinaryMask::from_raster(&raster, Polarity::DarkInk).unwrap_err();
        assert!(matches!(
            err,
            Error::NotBinary {
                x: 1,
                y: 0,
                value: 128
            }
        ));
    }

    #[test]
    fn test_crop() {
        let mut mask = BinaryMask::new(6, 5, Polarity::DarkInk).unwrap();
        mask.set_ink(1, 1, true).unwrap();
        mask.set_ink(4, 3, true).unwrap();
        let cropped = mask.crop(&ImageBox::new(1, 1, 4, 3)).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (4, 3));
        assert!(cropped.is_ink(0, 0));
        assert!(cropped.is_ink(3, 2));
        assert_eq!(cropped.count_ink(), 2);
        assert!(mask.crop(&ImageBox::new(4, 4, 3, 3)).is_err());
        assert!(mask.crop(&ImageBox::new(0, 0, 0, 3)).is_err());
    }
}
