//! Rank filter regression test
//!
//! Tests the median denoise stage on synthetic pages:
//!   (1) isolated specks on a blank page are removed
//!   (2) strokes at least 3 pixels thick survive unchanged
//!   (3) rank 0.0 / 1.0 bracket every source pixel
//!   (4) RGB pages are filtered channel by channel

use sigmatch_core::{Channels, LIGHT, Raster};
use sigmatch_filter::{denoise, median_filter, rank_filter};
use sigmatch_test::{Canvas, INK, RegParams, add_pepper_noise};

#[test]
fn rank_reg_removes_specks() {
    let mut rp = RegParams::new("rank_specks");

    let blank = Canvas::new(150, 80).unwrap().into_raster();
    let noisy = add_pepper_noise(&blank).unwrap();
    let specks = noisy.data().iter().filter(|&&v| v == INK).count();
    rp.check(specks > 50, "fixture has specks");

    let cleaned = denoise(&noisy).expect("denoise");
    rp.compare_values(150.0, cleaned.width() as f64, 0.0);
    rp.compare_values(80.0, cleaned.height() as f64, 0.0);
    rp.check(cleaned.equals(&blank), "all specks removed");

    assert!(rp.cleanup(), "rank_specks regression test failed");
}

#[test]
fn rank_reg_keeps_strokes() {
    let mut rp = RegParams::new("rank_strokes");

    let mut canvas = Canvas::new(40, 30).unwrap();
    canvas.fill_rect(0, 10, 40, 3, INK);
    canvas.fill_rect(20, 0, 4, 30, INK);
    let page = canvas.into_raster();

    let cleaned = denoise(&page).expect("denoise");
    let before = page.data().iter().filter(|&&v| v == INK).count();
    let after = cleaned.data().iter().filter(|&&v| v == INK).count();
    rp.check(after > before * 9 / 10, "stroke pixels mostly kept");
    rp.compare_values(INK as f64, cleaned.get_gray(5, 11).unwrap() as f64, 0.0);
    rp.compare_values(INK as f64, cleaned.get_gray(21, 25).unwrap() as f64, 0.0);
    rp.compare_values(LIGHT as f64, cleaned.get_gray(5, 5).unwrap() as f64, 0.0);

    assert!(rp.cleanup(), "rank_strokes regression test failed");
}

#[test]
fn rank_reg_extremes() {
    let mut rp = RegParams::new("rank_extremes");

    let mut canvas = Canvas::with_background(60, 40, 180).unwrap();
    canvas.fill_rect(10, 10, 5, 5, 20);
    canvas.set(40, 20, 250);
    let page = canvas.into_raster();
    let noisy = add_pepper_noise(&Canvas::new(60, 40).unwrap().into_raster()).unwrap();

    for src in [&page, &noisy] {
        let rmin = rank_filter(src, 5, 3, 0.0).expect("rank 0.0");
        let rmax = rank_filter(src, 5, 3, 1.0).expect("rank 1.0");
        let bracketed = src
            .data()
            .iter()
            .zip(rmin.data().iter().zip(rmax.data()))
            .all(|(&v, (&lo, &hi))| lo <= v && v <= hi);
        rp.check(bracketed, "rank 0 <= source <= rank 1");
    }

    let rmax = rank_filter(&page, 5, 3, 1.0).unwrap();
    rp.compare_values(250.0, rmax.get_gray(40, 20).unwrap() as f64, 0.0);
    let rmin = rank_filter(&page, 5, 3, 0.0).unwrap();
    rp.compare_values(20.0, rmin.get_gray(12, 12).unwrap() as f64, 0.0);

    let rmed = median_filter(&page, 3, 3).unwrap();
    rp.compare_values(180.0, rmed.get_gray(40, 20).unwrap() as f64, 0.0);
    rp.compare_values(20.0, rmed.get_gray(12, 12).unwrap() as f64, 0.0);

    assert!(rp.cleanup(), "rank_extremes regression test failed");
}

#[test]
fn rank_reg_rgb() {
    let mut rp = RegParams::new("rank_rgb");

    let mut page = Raster::new_filled(20, 20, Channels::Rgb, 255)
        .unwrap()
        .to_mut();
    page.set_rgb(7, 7, 0, 0, 0).unwrap();
    page.set_rgb(12, 3, 255, 0, 255).unwrap();
    let page: Raster = page.into();

    let cleaned = denoise(&page).expect("denoise rgb");
    rp.check(cleaned.channels() == Channels::Rgb, "channels preserved");
    rp.check(cleaned.data().iter().all(|&v| v == 255), "color specks removed");

    assert!(rp.cleanup(), "rank_rgb regression test failed");
}
