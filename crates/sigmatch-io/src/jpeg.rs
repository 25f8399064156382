//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate.
//! Supports 8/16-bit grayscale and 24-bit RGB. JPEG writing is not
//! provided because `jpeg-decoder` is decode-only.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use sigmatch_core::{Channels, Raster};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
///
/// # Returns
/// A grayscale or RGB [`Raster`].
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    match info.pixel_format {
        PixelFormat::L8 => Ok(Raster::from_raw(width, height, Channels::Gray, pixels)?),
        PixelFormat::L16 => {
            // Keep the high byte of each big-endian sample
            let data = pixels.chunks_exact(2).map(|s| s[0]).collect();
            Ok(Raster::from_raw(width, height, Channels::Gray, data)?)
        }
        PixelFormat::RGB24 => Ok(Raster::from_raw(width, height, Channels::Rgb, pixels)?),
        PixelFormat::CMYK32 => Err(IoError::UnsupportedFormat(
            "CMYK JPEG images are not supported".to_string(),
        )),
    }
}
