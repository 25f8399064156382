//! Channel conversion functions
//!
//! Grayscale conversion uses the BT.601 luma weights, the same weights
//! common camera and scanner pipelines apply when producing 8-bit gray.

use super::{Channels, Raster};
use crate::error::Result;

/// Red weight for RGB-to-gray conversion.
pub const RED_WEIGHT: f32 = 0.299;
/// Green weight for RGB-to-gray conversion.
pub const GREEN_WEIGHT: f32 = 0.587;
/// Blue weight for RGB-to-gray conversion.
pub const BLUE_WEIGHT: f32 = 0.114;

/// Luma of one RGB pixel, rounded to nearest.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let v = RED_WEIGHT * r as f32 + GREEN_WEIGHT * g as f32 + BLUE_WEIGHT * b as f32;
    (v + 0.5).min(255.0) as u8
}

impl Raster {
    /// Convert to a single-channel grayscale raster.
    ///
    /// Grayscale input is returned as a cheap clone.
    pub fn to_gray(&self) -> Result<Raster> {
        match self.channels() {
            Channels::Gray => Ok(self.clone()),
            Channels::Rgb => {
                let data = self
                    .data()
                    .chunks_exact(3)
                    .map(|px| luma(px[0], px[1], px[2]))
                    .collect();
                Raster::from_raw(self.width(), self.height(), Channels::Gray, data)
            }
        }
    }

    /// Convert to a 3-channel raster by replicating gray samples.
    ///
    /// RGB input is returned as a cheap clone.
    pub fn to_rgb(&self) -> Result<Raster> {
        match self.channels() {
            Channels::Rgb => Ok(self.clone()),
            Channels::Gray => {
                let data = self.data().iter().flat_map(|&v| [v, v, v]).collect();
                Raster::from_raw(self.width(), self.height(), Channels::Rgb, data)
            }
        }
    }
}
