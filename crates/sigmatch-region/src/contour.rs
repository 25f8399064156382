//! Border tracing for connected components
//!
//! Outer borders are followed with Moore-neighbor tracing: from each border
//! pixel the 8 neighbors are scanned clockwise, starting just after the
//! pixel the trace arrived from, and the first ink pixel found is the next
//! border pixel. Tracing stops when the start pixel is about to be left
//! towards the second pixel again (Jacob's stopping criterion).
//!
//! Only external borders are traced here: the outer border of every
//! component that does not sit inside a hole of another component.

use crate::conncomp::label_components;
use crate::error::{RegionError, RegionResult};
use sigmatch_core::BinaryMask;
use std::f64::consts::SQRT_2;
use tracing::trace;

/// Direction for border traversal (8-connected, clockwise from West)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// West (-1, 0)
    West = 0,
    /// Northwest (-1, -1)
    NorthWest = 1,
    /// North (0, -1)
    North = 2,
    /// Northeast (1, -1)
    NorthEast = 3,
    /// East (1, 0)
    East = 4,
    /// Southeast (1, 1)
    SouthEast = 5,
    /// South (0, 1)
    South = 6,
    /// Southwest (-1, 1)
    SouthWest = 7,
}

impl Direction {
    /// Get the x offset for this direction
    #[inline]
    pub fn dx(self) -> i32 {
        XPOSTAB[self as usize]
    }

    /// Get the y offset for this direction
    #[inline]
    pub fn dy(self) -> i32 {
        YPOSTAB[self as usize]
    }

    /// Whether a step in this direction is diagonal
    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.dx() != 0 && self.dy() != 0
    }

    /// Direction pointing the opposite way
    #[inline]
    pub fn opposite(self) -> Self {
        Self::from_index(self as usize + 4)
    }

    /// The direction `steps` eighth-turns clockwise from this one
    #[inline]
    pub fn rotated(self, steps: usize) -> Self {
        Self::from_index(self as usize + steps)
    }

    /// Create direction from index (taken modulo 8)
    #[inline]
    fn from_index(idx: usize) -> Self {
        match idx % 8 {
            0 => Direction::West,
            1 => Direction::NorthWest,
            2 => Direction::North,
            3 => Direction::NorthEast,
            4 => Direction::East,
            5 => Direction::SouthEast,
            6 => Direction::South,
            _ => Direction::SouthWest,
        }
    }
}

/// X offset for each direction
const XPOSTAB: [i32; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];

/// Y offset for each direction
const YPOSTAB: [i32; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

/// A point on a border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderPoint {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl BorderPoint {
    /// Create a new border point
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move in the given direction
    #[inline]
    pub fn moved(self, dir: Direction) -> Self {
        Self {
            x: self.x + dir.dx(),
            y: self.y + dir.dy(),
        }
    }
}

/// A closed border: consecutive points are 8-neighbors, and the last
/// point is followed by the first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    points: Vec<BorderPoint>,
}

impl Border {
    /// Border points in tracing order
    pub fn points(&self) -> &[BorderPoint] {
        &self.points
    }

    /// Number of points on the border
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the border has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Arc length of the closed border.
    ///
    /// Axis-aligned steps count 1, diagonal steps count sqrt(2). A
    /// single-pixel border has length 0.
    pub fn length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                if a.x != b.x && a.y != b.y {
                    SQRT_2
                } else {
                    1.0
                }
            })
            .sum()
    }
}

/// Find the next border pixel clockwise around `p`.
///
/// `arrived` is the direction of the step that reached `p`; the scan
/// starts one position after the pixel it came from and ends on it.
fn next_border_pixel(
    mask: &BinaryMask,
    p: BorderPoint,
    arrived: Direction,
) -> Option<(BorderPoint, Direction)> {
    let back = arrived.opposite();
    (1..=8).map(|i| back.rotated(i)).find_map(|dir| {
        let q = p.moved(dir);
        mask.is_ink_at(q.x as i64, q.y as i64).then_some((q, dir))
    })
}

/// Trace the outer border of the component whose first pixel (top-most,
/// then left-most) is `start`.
///
/// # Errors
///
/// Returns [`RegionError::InvalidSeed`] if `start` is not an ink pixel.
pub fn trace_outer_border(mask: &BinaryMask, start: (u32, u32)) -> RegionResult<Border> {
    if !mask.is_ink(start.0, start.1) {
        return Err(RegionError::InvalidSeed {
            x: start.0,
            y: start.1,
        });
    }
    let start = BorderPoint::new(start.0 as i32, start.1 as i32);
    let mut points = vec![start];

    // W, NW, N and NE of the first pixel are background, so treat the
    // trace as having entered from the west.
    let Some((second, mut dir)) = next_border_pixel(mask, start, Direction::East) else {
        return Ok(Border { points });
    };

    let mut current = second;
    // The pixel we arrived from is always ink, so a next pixel exists.
    while let Some((next, next_dir)) = next_border_pixel(mask, current, dir) {
        if current == start && next == second {
            break;
        }
        points.push(current);
        current = next;
        dir = next_dir;
    }

    Ok(Border { points })
}

/// Background pixels 4-connected to the outside of the image.
///
/// Returns a padded grid of `(width + 2) * (height + 2)` flags.
fn outside_background(mask: &BinaryMask) -> Vec<bool> {
    let w = mask.width() as usize + 2;
    let h = mask.height() as usize + 2;
    let ink = |x: usize, y: usize| {
        x > 0 && y > 0 && x < w - 1 && y < h - 1 && mask.is_ink(x as u32 - 1, y as u32 - 1)
    };

    let mut reached = vec![false; w * h];
    let mut stack = vec![(0usize, 0usize)];
    reached[0] = true;
    while let Some((x, y)) = stack.pop() {
        let candidates = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in candidates {
            if nx >= w || ny >= h {
                continue;
            }
            let idx = ny * w + nx;
            if !reached[idx] && !ink(nx, ny) {
                reached[idx] = true;
                stack.push((nx, ny));
            }
        }
    }
    reached
}

/// Outer borders of all components not enclosed in a hole.
pub fn external_borders(mask: &BinaryMask) -> RegionResult<Vec<Border>> {
    let (_, components) = label_components(mask);
    let outside = outside_background(mask);
    let stride = mask.width() as usize + 2;

    let mut borders = Vec::new();
    for component in &components {
        let (x, y) = component.first_pixel;
        // The pixel above the first pixel is background (or off-image)
        let above = y as usize * stride + x as usize + 1;
        if !outside[above] {
            trace!(label = component.label, "component inside a hole");
            continue;
        }
        borders.push(trace_outer_border(mask, component.first_pixel)?);
    }
    Ok(borders)
}

/// Total arc length of all external borders.
pub fn stroke_length(mask: &BinaryMask) -> RegionResult<f64> {
    Ok(external_borders(mask)?.iter().map(Border::length).sum())
}
