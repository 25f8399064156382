//! Raster - the decoded image container
//!
//! A `Raster` holds 8-bit samples for a grayscale (1 channel) or RGB
//! (3 channels, interleaved) image.
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for cheap cloning (shared ownership) and is never
//! modified in place. To build or edit pixel data, obtain a `RasterMut`
//! via [`Raster::try_into_mut`] or [`Raster::to_mut`], then convert back
//! with `Into<Raster>`. Every pipeline stage yields a new `Raster`.

mod access;
pub mod convert;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Samples per pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Channels {
    /// Single-channel grayscale
    Gray = 1,
    /// Interleaved red, green, blue
    Rgb = 3,
}

impl Channels {
    /// Create `Channels` from a raw sample count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] for anything other than 1 or 3.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            _ => Err(Error::UnsupportedChannels {
                expected: "1 or 3",
                actual: count,
            }),
        }
    }

    /// Number of samples per pixel.
    #[inline]
    pub fn count(self) -> u32 {
        self as u32
    }
}

/// Internal raster data
#[derive(Debug, Clone, PartialEq, Eq)]
struct RasterData {
    width: u32,
    height: u32,
    channels: Channels,
    /// Row-major, channel-interleaved samples
    data: Vec<u8>,
}

impl RasterData {
    fn validate(width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(())
    }

    #[inline]
    fn sample_count(width: u32, height: u32, channels: Channels) -> usize {
        width as usize * height as usize * channels.count() as usize
    }
}

/// Immutable, shareable image
///
/// # Examples
///
/// ```
/// use sigmatch_core::{Channels, Raster};
///
/// let raster = Raster::new_filled(64, 32, Channels::Gray, 255).unwrap();
/// assert_eq!(raster.width(), 64);
/// assert_eq!(raster.get_gray(10, 10), Some(255));
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a zero-filled raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        Self::new_filled(width, height, channels, 0)
    }

    /// Create a raster with every sample set to `value`.
    pub fn new_filled(width: u32, height: u32, channels: Channels, value: u8) -> Result<Self> {
        RasterData::validate(width, height)?;
        let data = vec![value; RasterData::sample_count(width, height, channels)];
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                channels,
                data,
            }),
        })
    }

    /// Wrap an existing sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero-size geometry and
    /// [`Error::BufferLength`] if `data` does not hold exactly
    /// `width * height * channels` samples.
    pub fn from_raw(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        RasterData::validate(width, height)?;
        let expected = RasterData::sample_count(width, height, channels);
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                channels,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Check whether this is a single-channel image.
    #[inline]
    pub fn is_gray(&self) -> bool {
        self.inner.channels == Channels::Gray
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Samples per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.width as usize * self.inner.channels.count() as usize
    }

    /// Number of strong references to the shared data.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Convert into a mutable raster, avoiding a copy if uniquely owned.
    ///
    /// Returns `Err(self)` if the data is shared.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: (*self.inner).clone(),
        }
    }

    /// Check whether two rasters have identical geometry and samples.
    pub fn equals(&self, other: &Raster) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || *self.inner == *other.inner
    }
}

/// Mutable raster used while a stage builds its output
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Mutable raw interleaved samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Set every sample to `value`.
    pub fn fill(&mut self, value: u8) {
        self.inner.data.fill(value);
    }
}

impl From<RasterMut> for Raster {
    fn from(raster_mut: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let raster = Raster::new(100, 200, Channels::Rgb).unwrap();
        assert_eq!(raster.width(), 100);
        assert_eq!(raster.height(), 200);
        assert_eq!(raster.channels(), Channels::Rgb);
        assert_eq!(raster.data().len(), 100 * 200 * 3);
        assert_eq!(raster.stride(), 300);
    }

    #[test]
    fn test_raster_creation_invalid() {
        assert!(Raster::new(0, 100, Channels::Gray).is_err());
        assert!(Raster::new(100, 0, Channels::Gray).is_err());
        assert!(Raster::from_raw(0, 0, Channels::Gray, Vec::new()).is_err());
    }

    #[test]
    fn test_from_raw_length_check() {
        let err = Raster::from_raw(4, 4, Channels::Rgb, vec![0; 16]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferLength {
                expected: 48,
                actual: 16
            }
        ));
        assert!(Raster::from_raw(4, 4, Channels::Gray, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_clone_shares_data() {
        let r1 = Raster::new(10, 10, Channels::Gray).unwrap();
        let r2 = r1.clone();
        assert_eq!(r1.ref_count(), 2);
        assert_eq!(r1.data().as_ptr(), r2.data().as_ptr());

        // Shared data cannot be taken as mutable
        let r1 = r1.try_into_mut().unwrap_err();
        drop(r2);
        assert!(r1.try_into_mut().is_ok());
    }

    #[test]
    fn test_to_mut_copies() {
        let raster = Raster::new_filled(3, 2, Channels::Gray, 7).unwrap();
        let mut copy = raster.to_mut();
        copy.fill(9);
        let copy: Raster = copy.into();
        assert_eq!(raster.data(), &[7; 6]);
        assert_eq!(copy.data(), &[9; 6]);
        assert!(!raster.equals(&copy));
    }

    #[test]
    fn test_channels_from_count() {
        assert_eq!(Channels::from_count(1).unwrap(), Channels::Gray);
        assert_eq!(Channels::from_count(3).unwrap(), Channels::Rgb);
        assert!(Channels::from_count(4).is_err());
    }
}
