//! Shared test utilities for the climate-axis workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Axis generators (regular, uneven, polar stereographic)
//! - Fixtures for well-known grids
//! - Approximate float comparison macros
//! - Scratch directories for file round-trips
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_allclose, fixtures, polar_stereo_y_axis};
//! ```

pub mod fixtures;
pub mod generators;
pub mod scratch;

pub use generators::*;
pub use scratch::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Element-wise closeness with `numpy.allclose` semantics:
/// `|actual - expected| <= atol + rtol * |expected|`.
///
/// Defaults to `rtol = 1e-5`, `atol = 1e-8`.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_allclose;
///
/// assert_allclose!(&[5849972.0, 5825028.0], &[5849972.01, 5825028.0]);
/// assert_allclose!(&[1.0], &[1.1], rtol = 0.2, atol = 0.0);
/// ```
#[macro_export]
macro_rules! assert_allclose {
    ($actual:expr, $expected:expr) => {
        $crate::assert_allclose!($actual, $expected, rtol = 1e-5, atol = 1e-8)
    };
    ($actual:expr, $expected:expr, rtol = $rtol:expr, atol = $atol:expr) => {{
        let actual: &[f64] = &$actual[..];
        let expected: &[f64] = &$expected[..];
        if let Some(index) = $crate::first_not_close(actual, expected, $rtol, $atol) {
            panic!(
                "assertion failed: `allclose(actual, expected)` at index {:?}\n  actual: `{:?}`,\n expected: `{:?}`",
                index, actual, expected
            );
        }
    }};
}

/// Index of the first element where `actual` and `expected` are not close
/// (or the shorter length when the slices differ in length).
pub fn first_not_close(actual: &[f64], expected: &[f64], rtol: f64, atol: f64) -> Option<usize> {
    if actual.len() != expected.len() {
        return Some(actual.len().min(expected.len()));
    }
    actual
        .iter()
        .zip(expected)
        .position(|(a, e)| (a - e).abs() > atol + rtol * e.abs())
}
