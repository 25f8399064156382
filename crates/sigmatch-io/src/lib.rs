//! sigmatch-io - Image decode/encode for the signature pipeline
//!
//! Supported formats (enabled through cargo features):
//!
//! - PNG (`png-format`): read and write
//! - JPEG (`jpeg`): read only
//! - PNM (`pnm`): binary PGM/PPM read and write
//!
//! Formats are detected from the file header, never the file name.

pub mod error;
pub mod format;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use sigmatch_core::{BinaryMask, Raster};
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

/// Read an image from a file, detecting its format from the header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Decode an in-memory encoded image.
pub fn read_image_mem(data: &[u8]) -> IoResult<Raster> {
    let format = detect_format_from_bytes(data)?;
    let cursor = Cursor::new(data);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(cursor),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(cursor),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(cursor),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write a raster to a file in the given format.
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(raster, writer),
        other => Err(IoError::UnsupportedFormat(format!(
            "writing {:?} is not supported",
            other
        ))),
    }
}

/// Write a binary mask as a grayscale image.
pub fn write_mask<P: AsRef<Path>>(mask: &BinaryMask, path: P, format: ImageFormat) -> IoResult<()> {
    write_image(&mask.to_raster()?, path, format)
}
