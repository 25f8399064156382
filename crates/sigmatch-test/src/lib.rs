//! sigmatch-test - Regression test framework for sigmatch
//!
//! Provides [`RegParams`], which numbers and records every check made
//! by a regression test, plus synthetic signature fixtures.
//!
//! # Usage
//!
//! ```ignore
//! use sigmatch_test::RegParams;
//!
//! let mut rp = RegParams::new("thin");
//! rp.compare_values(1.0, components as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display". Display
//!   mode writes intermediate masks under `tests/regout`.

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{
    Canvas, INK, STROKE, add_pepper_noise, mask_from_rows, render_scribble, render_signature,
};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // sigmatch-test is at crates/sigmatch-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
