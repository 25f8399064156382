//! Connectivity-preserving thinning operations
//!
//! Thinning reduces binary images to 1-pixel wide skeletons while preserving
//! 8-connectivity. Two classic parallel algorithms are provided:
//!
//! - Zhang & Suen, "A fast parallel algorithm for thinning digital
//!   patterns", CACM 27(3), 1984.
//! - Guo & Hall, "Parallel thinning with two-subiteration algorithms",
//!   CACM 32(3), 1989.
//!
//! # Algorithm
//!
//! Each iteration consists of two sub-passes:
//! 1. Every ink pixel is tested against the sub-pass deletion rule using
//!    the image as it was at the start of the sub-pass
//! 2. All marked pixels are removed at once
//!
//! Iterations repeat until one full iteration removes nothing. Pixels
//! outside the image count as background.
//!
//! The 8 neighbors of a pixel P1 are named clockwise from north:
//!
//! ```text
//!   P9 P2 P3
//!   P8 P1 P4
//!   P7 P6 P5
//! ```

use crate::MorphResult;
use serde::{Deserialize, Serialize};
use sigmatch_core::BinaryMask;
use tracing::debug;

/// Thinning algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThinAlgorithm {
    /// Zhang-Suen. Removes 2x2 blocks entirely.
    ZhangSuen,

    /// Guo-Hall. Keeps one pixel of a 2x2 block.
    #[default]
    GuoHall,
}

/// Work done by one thinning run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThinStats {
    /// Full iterations executed, including the final one that changed nothing
    pub iterations: u32,
    /// Ink pixels removed
    pub removed: u64,
}

/// Thin the ink of a mask to a 1-pixel wide skeleton
///
/// The result has the polarity and size of the input.
///
/// # Arguments
///
/// * `mask` - Ink/background mask
/// * `algorithm` - Deletion rule to apply
pub fn thin(mask: &BinaryMask, algorithm: ThinAlgorithm) -> MorphResult<BinaryMask> {
    thin_with_stats(mask, algorithm).map(|(skeleton, _)| skeleton)
}

/// Thin a mask and report how much work was done
pub fn thin_with_stats(
    mask: &BinaryMask,
    algorithm: ThinAlgorithm,
) -> MorphResult<(BinaryMask, ThinStats)> {
    let mut grid = Grid::from_mask(mask);
    let mut stats = ThinStats::default();
    let mut marked = Vec::new();

    loop {
        stats.iterations += 1;
        let mut changed = 0u64;
        for pass in 0..2 {
            marked.clear();
            for y in 1..=grid.height {
                for x in 1..=grid.width {
                    let idx = y * grid.stride + x;
                    if grid.cells[idx] == 0 {
                        continue;
                    }
                    let n = grid.neighbors(idx);
                    let delete = match algorithm {
                        ThinAlgorithm::ZhangSuen => zhang_suen_deletable(&n, pass),
                        ThinAlgorithm::GuoHall => guo_hall_deletable(&n, pass),
                    };
                    if delete {
                        marked.push(idx);
                    }
                }
            }
            for &idx in &marked {
                grid.cells[idx] = 0;
            }
            changed += marked.len() as u64;
        }
        stats.removed += changed;
        if changed == 0 {
            break;
        }
    }

    debug!(
        ?algorithm,
        iterations = stats.iterations,
        removed = stats.removed,
        "thinning converged"
    );

    let skeleton = BinaryMask::from_ink(
        mask.width(),
        mask.height(),
        mask.polarity(),
        &grid.ink_flags(),
    )?;
    Ok((skeleton, stats))
}

/// Ink grid with a one-pixel background border
struct Grid {
    width: usize,
    height: usize,
    stride: usize,
    cells: Vec<u8>,
}

impl Grid {
    fn from_mask(mask: &BinaryMask) -> Self {
        let width = mask.width() as usize;
        let height = mask.height() as usize;
        let stride = width + 2;
        let mut cells = vec![0u8; stride * (height + 2)];
        for y in 0..height {
            for x in 0..width {
                if mask.is_ink(x as u32, y as u32) {
                    cells[(y + 1) * stride + x + 1] = 1;
                }
            }
        }
        Self {
            width,
            height,
            stride,
            cells,
        }
    }

    /// Neighbors P2..P9 of the cell at `idx`
    #[inline]
    fn neighbors(&self, idx: usize) -> [u8; 8] {
        let s = self.stride;
        let c = &self.cells;
        [
            c[idx - s],     // P2 N
            c[idx - s + 1], // P3 NE
            c[idx + 1],     // P4 E
            c[idx + s + 1], // P5 SE
            c[idx + s],     // P6 S
            c[idx + s - 1], // P7 SW
            c[idx - 1],     // P8 W
            c[idx - s - 1], // P9 NW
        ]
    }

    fn ink_flags(&self) -> Vec<bool> {
        let mut flags = Vec::with_capacity(self.width * self.height);
        for y in 1..=self.height {
            let row = &self.cells[y * self.stride + 1..y * self.stride + 1 + self.width];
            flags.extend(row.iter().map(|&v| v != 0));
        }
        flags
    }
}

fn zhang_suen_deletable(n: &[u8; 8], pass: usize) -> bool {
    let [p2, _, p4, _, p6, _, p8, _] = *n;

    let b: u8 = n.iter().sum();
    if !(2..=6).contains(&b) {
        return false;
    }

    // 0 -> 1 transitions around P2, P3, ..., P9, P2
    let a = (0..8).filter(|&i| n[i] == 0 && n[(i + 1) % 8] == 1).count();
    if a != 1 {
        return false;
    }

    if pass == 0 {
        p2 * p4 * p6 == 0 && p4 * p6 * p8 == 0
    } else {
        p2 * p4 * p8 == 0 && p2 * p6 * p8 == 0
    }
}

fn guo_hall_deletable(n: &[u8; 8], pass: usize) -> bool {
    let [p2, p3, p4, p5, p6, p7, p8, p9] = n.map(|v| v != 0);

    let c = (!p2 && (p3 || p4)) as u8
        + (!p4 && (p5 || p6)) as u8
        + (!p6 && (p7 || p8)) as u8
        + (!p8 && (p9 || p2)) as u8;
    if c != 1 {
        return false;
    }

    let n1 = (p9 || p2) as u8 + (p3 || p4) as u8 + (p5 || p6) as u8 + (p7 || p8) as u8;
    let n2 = (p2 || p3) as u8 + (p4 || p5) as u8 + (p6 || p7) as u8 + (p8 || p9) as u8;
    let count = n1.min(n2);
    if !(2..=3).contains(&count) {
        return false;
    }

    let m = if pass == 0 {
        (p6 || p7 || !p9) && p8
    } else {
        (p2 || p3 || !p5) && p4
    };
    !m
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigmatch_core::Polarity;

    fn mask_from(rows: &[&str]) -> BinaryMask {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        let ink: Vec<bool> = rows
            .iter()
            .flat_map(|r| r.bytes().map(|b| b == b'#'))
            .collect();
        BinaryMask::from_ink(w, h, Polarity::DarkInk, &ink).unwrap()
    }

    #[test]
    fn test_two_by_two_block() {
        let block = mask_from(&["....", ".##.", ".##.", "...."]);
        let gh = thin(&block, ThinAlgorithm::GuoHall).unwrap();
        assert_eq!(gh.count_ink(), 1);
        let zs = thin(&block, ThinAlgorithm::ZhangSuen).unwrap();
        assert_eq!(zs.count_ink(), 0);
    }

    #[test]
    fn test_single_pixel_and_line_are_stable() {
        let dot = mask_from(&["...", ".#.", "..."]);
        for algorithm in [ThinAlgorithm::GuoHall, ThinAlgorithm::ZhangSuen] {
            let (out, stats) = thin_with_stats(&dot, algorithm).unwrap();
            assert_eq!(out, dot);
            assert_eq!(stats.iterations, 1);
            assert_eq!(stats.removed, 0);
        }

        let line = mask_from(&[".......", ".#####.", "......."]);
        for algorithm in [ThinAlgorithm::GuoHall, ThinAlgorithm::ZhangSuen] {
            assert_eq!(thin(&line, algorithm).unwrap(), line);
        }
    }

    #[test]
    fn test_three_pixel_bar() {
        let bar = mask_from(&[
            ".........",
            ".#######.",
            ".#######.",
            ".#######.",
            ".........",
        ]);
        for algorithm in [ThinAlgorithm::GuoHall, ThinAlgorithm::ZhangSuen] {
            let (out, stats) = thin_with_stats(&bar, algorithm).unwrap();
            assert!(out.count_ink() < bar.count_ink());
            assert_eq!(stats.removed, bar.count_ink() - out.count_ink());
            // middle column keeps a single pixel
            let col: Vec<bool> = (0..5).map(|y| out.is_ink(4, y)).collect();
            assert_eq!(col.iter().filter(|&&b| b).count(), 1);
        }
    }

    #[test]
    fn test_border_pixels_see_background() {
        // Bar touching the image edge thins like one in the interior
        let bar = mask_from(&["#######", "#######", "#######"]);
        let out = thin(&bar, ThinAlgorithm::GuoHall).unwrap();
        let col: Vec<bool> = (0..3).map(|y| out.is_ink(3, y)).collect();
        assert_eq!(col, vec![false, true, false]);
    }

    #[test]
    fn test_polarity_preserved() {
        let bar = mask_from(&["....", ".##.", ".##.", "...."]).with_polarity(Polarity::LightInk);
        let out = thin(&bar, ThinAlgorithm::GuoHall).unwrap();
        assert_eq!(out.polarity(), Polarity::LightInk);
        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 4);
    }
}
