//! Binarization regression test
//!
//! Tests adaptive thresholding on synthetic signatures:
//!   (1) a clean render binarizes to exactly its ink pixels
//!   (2) re-binarizing a mask rendered as dark ink reproduces it
//!   (3) polarity only changes the sample values, not the ink set
//!   (4) uneven illumination does not leak into the background

use sigmatch_color::{AdaptiveMethod, AdaptiveThresholdOptions, binarize};
use sigmatch_core::{Channels, Polarity, Raster};
use sigmatch_test::{INK, RegParams, render_signature};

#[test]
fn binarize_reg_clean_render() {
    let mut rp = RegParams::new("binarize_clean");

    let page = render_signature(220, 140, 30, 15).expect("render");
    let drawn = page.data().iter().filter(|&&v| v == INK).count();

    for method in [AdaptiveMethod::Gaussian, AdaptiveMethod::Mean] {
        let opts = AdaptiveThresholdOptions {
            method,
            ..Default::default()
        };
        let mask = binarize(&page, &opts, Polarity::DarkInk).expect("binarize");
        rp.compare_values(drawn as f64, mask.count_ink() as f64, 0.0);
        rp.write_mask(&mask, "binary").expect("write");
    }

    assert!(rp.cleanup(), "binarize_clean regression test failed");
}

#[test]
fn binarize_reg_idempotent() {
    let mut rp = RegParams::new("binarize_idempotent");

    let page = render_signature(200, 140, 10, 20).expect("render");
    let opts = AdaptiveThresholdOptions::default();
    for polarity in [Polarity::DarkInk, Polarity::LightInk] {
        let first = binarize(&page, &opts, polarity).expect("first pass");
        // The binarizer reads dark strokes on a light page
        let rendered = first
            .with_polarity(Polarity::DarkInk)
            .to_raster()
            .expect("render mask");
        let second = binarize(&rendered, &opts, polarity).expect("second pass");
        rp.compare_masks(&first, &second);
        rp.check(first == second, "identical samples");
    }

    assert!(rp.cleanup(), "binarize_idempotent regression test failed");
}

#[test]
fn binarize_reg_polarity() {
    let mut rp = RegParams::new("binarize_polarity");

    let page = render_signature(180, 120, 5, 5).expect("render");
    let opts = AdaptiveThresholdOptions::default();
    let dark = binarize(&page, &opts, Polarity::DarkInk).expect("dark");
    let light = binarize(&page, &opts, Polarity::LightInk).expect("light");

    rp.compare_masks(&dark, &light);
    rp.check(dark.polarity() == Polarity::DarkInk, "dark polarity kept");
    rp.check(light.polarity() == Polarity::LightInk, "light polarity kept");
    rp.check(dark.data().iter().all(|&v| v == 0 || v == 255), "two levels");
    rp.compare_values(
        light.count_ink() as f64,
        light.data().iter().filter(|&&v| v == 255).count() as f64,
        0.0,
    );

    assert!(rp.cleanup(), "binarize_polarity regression test failed");
}

#[test]
fn binarize_reg_gradient_background() {
    let mut rp = RegParams::new("binarize_gradient");

    // Left-to-right illumination falloff from 250 to 130 with a dark stroke
    let (w, h) = (120u32, 40u32);
    let mut page = Raster::new(w, h, Channels::Gray).unwrap().to_mut();
    for y in 0..h {
        for x in 0..w {
            let level = 250 - (x * 120 / (w - 1)) as u8;
            let v = if (18..21).contains(&y) { level / 4 } else { level };
            page.set_gray(x, y, v).unwrap();
        }
    }
    let page: Raster = page.into();

    let mask = binarize(&page, &AdaptiveThresholdOptions::default(), Polarity::DarkInk)
        .expect("binarize");
    rp.compare_values(3.0 * w as f64, mask.count_ink() as f64, 0.0);
    rp.check(!mask.is_ink(w - 1, 0), "dim corner stays background");

    assert!(rp.cleanup(), "binarize_gradient regression test failed");
}
