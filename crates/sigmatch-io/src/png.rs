//! PNG image format support
//!
//! Every PNG is decoded to an 8-bit [`Raster`]. Low-bit grayscale is
//! stretched to the full 0..=255 range, 16-bit samples keep their high
//! byte, palettes are expanded to RGB, and alpha is composited over a
//! white page.

use crate::{IoError, IoResult};
use sigmatch_core::{BinaryMask, Channels, Raster};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;
    let palette: Option<Vec<u8>> = info.palette.as_ref().map(|p| p.to_vec());

    let channels = match color_type {
        ColorType::Grayscale | ColorType::GrayscaleAlpha => Channels::Gray,
        ColorType::Rgb | ColorType::Rgba | ColorType::Indexed => Channels::Rgb,
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let bits = bit_depth as u32;

    let mut out = Raster::new(width, height, channels)?.to_mut();
    let dst_stride = width as usize * channels.count() as usize;
    let dst = out.data_mut();

    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..(y + 1) * bytes_per_row];
        let dst_row = &mut dst[y * dst_stride..(y + 1) * dst_stride];
        for x in 0..width as usize {
            match color_type {
                ColorType::Grayscale => {
                    dst_row[x] = scale_to_8(unpack(row, x, bits), bits);
                }
                ColorType::GrayscaleAlpha => {
                    let g = wide_sample(row, x * 2, bit_depth);
                    let a = wide_sample(row, x * 2 + 1, bit_depth);
                    dst_row[x] = over_white(g, a);
                }
                ColorType::Rgb => {
                    for c in 0..3 {
                        dst_row[x * 3 + c] = wide_sample(row, x * 3 + c, bit_depth);
                    }
                }
                ColorType::Rgba => {
                    let a = wide_sample(row, x * 4 + 3, bit_depth);
                    for c in 0..3 {
                        dst_row[x * 3 + c] = over_white(wide_sample(row, x * 4 + c, bit_depth), a);
                    }
                }
                ColorType::Indexed => {
                    let idx = unpack(row, x, bits) as usize;
                    let entry = palette
                        .as_deref()
                        .and_then(|p| p.get(idx * 3..idx * 3 + 3))
                        .ok_or_else(|| {
                            IoError::InvalidData(format!("palette index {} out of range", idx))
                        })?;
                    dst_row[x * 3..x * 3 + 3].copy_from_slice(entry);
                }
            }
        }
    }

    Ok(out.into())
}

/// Sample `x` of a packed row with `bits` bits per sample (1..=16).
fn unpack(row: &[u8], x: usize, bits: u32) -> u16 {
    match bits {
        16 => ((row[x * 2] as u16) << 8) | row[x * 2 + 1] as u16,
        8 => row[x] as u16,
        _ => {
            let per_byte = 8 / bits as usize;
            let byte = row[x / per_byte];
            let shift = 8 - bits as usize * (x % per_byte + 1);
            ((byte >> shift) & ((1u8 << bits) - 1)) as u16
        }
    }
}

/// Stretch a `bits`-deep sample to 8 bits.
fn scale_to_8(v: u16, bits: u32) -> u8 {
    match bits {
        16 => (v >> 8) as u8,
        8 => v as u8,
        _ => (v as u32 * 255 / ((1u32 << bits) - 1)) as u8,
    }
}

/// High byte of sample number `i` of an 8- or 16-bit row.
fn wide_sample(row: &[u8], i: usize, depth: BitDepth) -> u8 {
    if depth == BitDepth::Sixteen {
        row[i * 2]
    } else {
        row[i]
    }
}

fn over_white(v: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((v as u32 * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Write a PNG image
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let color_type = match raster.channels() {
        Channels::Gray => ColorType::Grayscale,
        Channels::Rgb => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(raster.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

/// Write a binary mask as an 8-bit grayscale PNG
pub fn write_mask_png<W: Write>(mask: &BinaryMask, writer: W) -> IoResult<()> {
    write_png(&mask.to_raster()?, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigmatch_core::Polarity;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_gray() {
        let mut raster = Raster::new_filled(13, 7, Channels::Gray, 255)
            .unwrap()
            .to_mut();
        raster.set_gray(3, 2, 0).unwrap();
        raster.set_gray(12, 6, 77).unwrap();
        let raster: Raster = raster.into();

        let mut buf = Vec::new();
        write_png(&raster, &mut buf).unwrap();
        let back = read_png(Cursor::new(buf)).unwrap();
        assert!(back.is_gray());
        assert!(back.equals(&raster));
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut raster = Raster::new(4, 3, Channels::Rgb).unwrap().to_mut();
        raster.set_rgb(1, 1, 10, 200, 30).unwrap();
        let raster: Raster = raster.into();

        let mut buf = Vec::new();
        write_png(&raster, &mut buf).unwrap();
        let back = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(back.channels(), Channels::Rgb);
        assert_eq!(back.get_rgb(1, 1), Some((10, 200, 30)));
    }

    #[test]
    fn test_mask_png_levels() {
        let mut mask = BinaryMask::new(5, 5, Polarity::DarkInk).unwrap();
        mask.set_ink(2, 2, true).unwrap();

        let mut buf = Vec::new();
        write_mask_png(&mask, &mut buf).unwrap();
        let back = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(back.get_gray(2, 2), Some(0));
        assert_eq!(back.get_gray(0, 0), Some(255));
    }

    #[test]
    fn test_unpack_low_bit_samples() {
        let row = [0b1011_0001u8];
        assert_eq!(unpack(&row, 0, 1), 1);
        assert_eq!(unpack(&row, 1, 1), 0);
        assert_eq!(unpack(&row, 0, 2), 0b10);
        assert_eq!(unpack(&row, 3, 2), 0b01);
        assert_eq!(unpack(&row, 1, 4), 0b0001);
        assert_eq!(scale_to_8(1, 1), 255);
        assert_eq!(scale_to_8(0b10, 2), 170);
    }

    #[test]
    fn test_alpha_over_white() {
        assert_eq!(over_white(0, 255), 0);
        assert_eq!(over_white(0, 0), 255);
        assert_eq!(over_white(100, 255), 100);
    }

    #[test]
    fn test_invalid_png() {
        assert!(read_png(Cursor::new(vec![0u8; 16])).is_err());
    }
}
