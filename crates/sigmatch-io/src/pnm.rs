//! PNM (Portable Any Map) format support
//!
//! Reads and writes PGM (P5 binary) and PPM (P6 binary) with a maximum
//! sample value of at most 255. Samples are rescaled to 0..=255 when
//! the maximum is smaller.

use crate::{IoError, IoResult};
use sigmatch_core::{Channels, Raster};
use std::io::{BufRead, Write};

/// Read a PNM image (P5/P6) from a reader.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Raster> {
    let magic = read_token(&mut reader)?;
    let channels = match magic.as_str() {
        "P5" => Channels::Gray,
        "P6" => Channels::Rgb,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM type {:?}",
                other
            )));
        }
    };
    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = read_number(&mut reader, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM maxval {} not supported",
            maxval
        )));
    }

    let len = width as usize * height as usize * channels.count() as usize;
    let mut data = vec![0u8; len];
    reader
        .read_exact(&mut data)
        .map_err(|e| IoError::InvalidData(format!("PNM pixel data truncated: {}", e)))?;

    if maxval < 255 {
        for v in data.iter_mut() {
            *v = ((*v).min(maxval as u8) as u32 * 255 / maxval) as u8;
        }
    }

    Ok(Raster::from_raw(width, height, channels, data)?)
}

/// Write a raster as binary PNM (P5 for grayscale, P6 for RGB).
pub fn write_pnm<W: Write>(raster: &Raster, mut writer: W) -> IoResult<()> {
    let magic = match raster.channels() {
        Channels::Gray => "P5",
        Channels::Rgb => "P6",
    };
    write!(
        writer,
        "{}\n{} {}\n255\n",
        magic,
        raster.width(),
        raster.height()
    )?;
    writer.write_all(raster.data())?;
    Ok(())
}

/// Read one whitespace-delimited header token, skipping `#` comments.
///
/// Consumes exactly one whitespace byte after the token so that the
/// pixel data following `maxval` starts at the reader's position.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            if token.is_empty() {
                return Err(IoError::InvalidData("PNM header truncated".to_string()));
            }
            return Ok(token);
        }
        let b = byte[0];
        if b == b'#' && token.is_empty() {
            let mut comment = Vec::new();
            reader.read_until(b'\n', &mut comment)?;
        } else if b.is_ascii_whitespace() {
            if !token.is_empty() {
                return Ok(token);
            }
        } else {
            token.push(b as char);
        }
    }
}

fn read_number<R: BufRead>(reader: &mut R, field: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM {}: {:?}", field, token)))
}
