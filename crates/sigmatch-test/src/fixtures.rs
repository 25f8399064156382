//! Synthetic test images
//!
//! Signatures are drawn as thick polylines on a white page so that every
//! stage of the pipeline can be exercised without checked-in data files.

use crate::error::{TestError, TestResult};
use sigmatch_core::{BinaryMask, Channels, LIGHT, Polarity, Raster, RasterMut};

/// Ink level used by the drawing helpers
pub const INK: u8 = 0;

/// Stroke width of the drawn signatures
pub const STROKE: u32 = 3;

/// A grayscale drawing surface with clipped primitives
pub struct Canvas {
    raster: RasterMut,
}

impl Canvas {
    /// White canvas of the given size.
    pub fn new(width: u32, height: u32) -> TestResult<Self> {
        Self::with_background(width, height, LIGHT)
    }

    /// Canvas filled with `value`.
    pub fn with_background(width: u32, height: u32, value: u8) -> TestResult<Self> {
        let raster = Raster::new_filled(width, height, Channels::Gray, value)?.to_mut();
        Ok(Self { raster })
    }

    /// Set one pixel; coordinates outside the canvas are ignored.
    pub fn set(&mut self, x: i64, y: i64, value: u8) {
        if x >= 0 && y >= 0 && (x as u32) < self.raster.width() && (y as u32) < self.raster.height()
        {
            // in bounds, cannot fail
            let _ = self.raster.set_gray(x as u32, y as u32, value);
        }
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, value: u8) {
        for yy in y..y + h as i64 {
            for xx in x..x + w as i64 {
                self.set(xx, yy, value);
            }
        }
    }

    /// Draw a straight line with a square pen of `thickness` pixels.
    pub fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), thickness: u32, value: u8) {
        let lo = -((thickness as i64 - 1) / 2);
        let hi = thickness as i64 / 2;
        let (mut x, mut y) = from;
        let dx = (to.0 - from.0).abs();
        let dy = -(to.1 - from.1).abs();
        let sx = if from.0 < to.0 { 1 } else { -1 };
        let sy = if from.1 < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            for oy in lo..=hi {
                for ox in lo..=hi {
                    self.set(x + ox, y + oy, value);
                }
            }
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw connected line segments through `points`.
    pub fn draw_polyline(&mut self, points: &[(i64, i64)], thickness: u32, value: u8) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], thickness, value);
        }
    }

    /// Finish drawing.
    pub fn into_raster(self) -> Raster {
        self.raster.into()
    }
}

/// Pen path of the reference signature, inside a 160 x 110 box.
const SIGNATURE_PATH: &[(i64, i64)] = &[
    (10, 80),
    (30, 10),
    (45, 85),
    (65, 20),
    (80, 85),
    (100, 25),
    (120, 75),
    (150, 50),
];

/// Underline stroke of the reference signature.
const SIGNATURE_UNDERLINE: &[(i64, i64)] = &[(12, 100), (148, 100)];

/// Render the reference signature shifted by (`dx`, `dy`).
pub fn render_signature(width: u32, height: u32, dx: i64, dy: i64) -> TestResult<Raster> {
    if width < 160 || height < 110 {
        return Err(TestError::Fixture(format!(
            "signature needs at least 160x110, got {}x{}",
            width, height
        )));
    }
    let mut canvas = Canvas::new(width, height)?;
    let shift = |p: &(i64, i64)| (p.0 + dx, p.1 + dy);
    let path: Vec<_> = SIGNATURE_PATH.iter().map(shift).collect();
    let underline: Vec<_> = SIGNATURE_UNDERLINE.iter().map(shift).collect();
    canvas.draw_polyline(&path, STROKE, INK);
    canvas.draw_polyline(&underline, STROKE, INK);
    Ok(canvas.into_raster())
}

/// Render a dense scribble of horizontal strokes spanning the canvas.
///
/// Its skeleton is far longer than the reference signature's, so the
/// two never match under the default threshold.
pub fn render_scribble(width: u32, height: u32) -> TestResult<Raster> {
    let mut canvas = Canvas::new(width, height)?;
    let right = width as i64 - 11;
    let mut y = 10i64;
    while y < height as i64 - 10 {
        canvas.draw_line((10, y), (right, y), STROKE, INK);
        y += 12;
    }
    Ok(canvas.into_raster())
}

/// Whether (`x`, `y`) carries a noise speck.
///
/// Speck positions are never 8-adjacent to one another.
pub fn is_speck(x: u32, y: u32) -> bool {
    (x as u64 * 7 + y as u64 * 13) % 97 == 0
}

/// Add isolated dark specks on the white background of a gray raster.
pub fn add_pepper_noise(raster: &Raster) -> TestResult<Raster> {
    if !raster.is_gray() {
        return Err(TestError::Fixture("pepper noise needs a gray raster".into()));
    }
    let mut out = raster.to_mut();
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            if is_speck(x, y) && raster.get_gray(x, y) == Some(LIGHT) {
                out.set_gray(x, y, INK)?;
            }
        }
    }
    Ok(out.into())
}

/// Build a mask from text rows: `#` is ink, anything else background.
pub fn mask_from_rows(rows: &[&str], polarity: Polarity) -> TestResult<BinaryMask> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    if rows.iter().any(|r| r.len() as u32 != width) {
        return Err(TestError::Fixture("rows differ in length".into()));
    }
    let ink: Vec<bool> = rows
        .iter()
        .flat_map(|r| r.bytes().map(|b| b == b'#'))
        .collect();
    Ok(BinaryMask::from_ink(width, height, polarity, &ink)?)
}
