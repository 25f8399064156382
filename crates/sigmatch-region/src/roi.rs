//! Region of interest extraction
//!
//! The region of interest of a mask is the smallest axis-aligned box that
//! contains every ink pixel. Cropping to it removes the blank margin that
//! surrounds a signature so that size features do not depend on where the
//! signature sits on the page.

use crate::RegionResult;
use sigmatch_core::{BinaryMask, ImageBox};

/// A cropped ink region and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionOfInterest {
    bounds: ImageBox,
    mask: BinaryMask,
}

impl RegionOfInterest {
    /// Bounding box in source mask coordinates.
    pub fn bounds(&self) -> ImageBox {
        self.bounds
    }

    /// The cropped mask.
    pub fn mask(&self) -> &BinaryMask {
        &self.mask
    }

    /// Width of the region, always > 0.
    #[inline]
    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    /// Height of the region, always > 0.
    #[inline]
    pub fn height(&self) -> u32 {
        self.mask.height()
    }

    /// Take the cropped mask.
    pub fn into_mask(self) -> BinaryMask {
        self.mask
    }
}

/// Inclusive bounding box of all ink pixels.
///
/// Returns `None` if the mask contains no ink.
pub fn ink_bounds(mask: &BinaryMask) -> Option<ImageBox> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.is_ink(x, y) {
                found = true;
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
    }

    if !found {
        return None;
    }
    Some(ImageBox::new(
        min_x,
        min_y,
        max_x - min_x + 1,
        max_y - min_y + 1,
    ))
}

/// Crop a mask to the bounding box of its ink.
///
/// Returns `Ok(None)` when the mask has no ink pixels.
pub fn extract_roi(mask: &BinaryMask) -> RegionResult<Option<RegionOfInterest>> {
    let Some(bounds) = ink_bounds(mask) else {
        return Ok(None);
    };
    let cropped = mask.crop(&bounds)?;
    Ok(Some(RegionOfInterest {
        bounds,
        mask: cropped,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigmatch_core::Polarity;

    #[test]
    fn test_empty_mask() {
        let mask = BinaryMask::new(10, 10, Polarity::DarkInk).unwrap();
        assert_eq!(ink_bounds(&mask), None);
        assert!(extract_roi(&mask).unwrap().is_none());
    }

    #[test]
    fn test_single_pixel_roi() {
        let mut mask = BinaryMask::new(10, 10, Polarity::LightInk).unwrap();
        mask.set_ink(7, 2, true).unwrap();
        let roi = extract_roi(&mask).unwrap().unwrap();
        assert_eq!(roi.bounds(), ImageBox::new(7, 2, 1, 1));
        assert_eq!(roi.width(), 1);
        assert_eq!(roi.height(), 1);
        assert!(roi.mask().is_ink(0, 0));
        assert_eq!(roi.mask().polarity(), Polarity::LightInk);
    }

    #[test]
    fn test_inclusive_bounds() {
        let mut mask = BinaryMask::new(12, 8, Polarity::DarkInk).unwrap();
        mask.set_ink(2, 1, true).unwrap();
        mask.set_ink(9, 6, true).unwrap();
        let b = ink_bounds(&mask).unwrap();
        assert_eq!((b.x, b.y, b.w, b.h), (2, 1, 8, 6));

        let roi = extract_roi(&mask).unwrap().unwrap();
        assert_eq!(roi.mask().count_ink(), 2);
        assert!(roi.mask().is_ink(0, 0));
        assert!(roi.mask().is_ink(7, 5));
    }

    #[test]
    fn test_full_mask_roi() {
        let ink = vec![true; 6];
        let mask = BinaryMask::from_ink(3, 2, Polarity::DarkInk, &ink).unwrap();
        let roi = extract_roi(&mask).unwrap().unwrap();
        assert_eq!(roi.into_mask(), mask);
    }
}
