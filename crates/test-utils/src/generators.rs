//! Axis generators for creating synthetic coordinate sequences.
//!
//! These produce plain `Vec<f64>`. Regular and `arange` sequences come from
//! the same generators `AxisValues` uses.

use axis_bounds::{arange_values, regular_values};

/// Creates `count` evenly spaced values starting at `start`.
///
/// # Example
///
/// ```
/// use test_utils::create_regular_axis;
///
/// let axis = create_regular_axis(0.0, 2.5, 4);
/// assert_eq!(axis, vec![0.0, 2.5, 5.0, 7.5]);
/// ```
pub fn create_regular_axis(start: f64, step: f64, count: usize) -> Vec<f64> {
    regular_values(start, step, count).expect("valid regular axis arguments")
}

/// Same sequence as `numpy.arange(start, stop, step)`.
///
/// Returns an empty vector when `step` is zero or points away from `stop`.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    arange_values(start, stop, step).unwrap_or_default()
}

/// The projected `y` axis of the NSIDC 25 km polar stereographic grid:
/// `arange(5837500, -5350000, -24944)`, 449 values in meters, decreasing.
pub fn polar_stereo_y_axis() -> Vec<f64> {
    arange(5837500.0, -5350000.0, -24944.0)
}

/// The matching projected `x` axis: `arange(-3850000, 3750000, 25000)`,
/// 304 values in meters, increasing.
pub fn polar_stereo_x_axis() -> Vec<f64> {
    arange(-3850000.0, 3750000.0, 25000.0)
}

/// Cell-centred latitudes for a global grid with `count` rows,
/// south to north (e.g. 180 rows -> -89.5 .. 89.5).
pub fn create_latitude_axis(count: usize) -> Vec<f64> {
    let step = 180.0 / count as f64;
    create_regular_axis(-90.0 + step / 2.0, step, count)
}

/// Cell-centred longitudes for a global grid with `count` columns,
/// starting at 0 (e.g. 360 columns -> 0.5 .. 359.5).
pub fn create_longitude_axis(count: usize) -> Vec<f64> {
    let step = 360.0 / count as f64;
    create_regular_axis(step / 2.0, step, count)
}

/// Pressure levels in hPa, surface first (decreasing).
pub fn create_pressure_levels() -> Vec<f64> {
    vec![
        1000.0, 925.0, 850.0, 700.0, 600.0, 500.0, 400.0, 300.0, 250.0, 200.0, 150.0, 100.0,
        70.0, 50.0, 30.0, 20.0, 10.0,
    ]
}

/// Unevenly spaced increasing axis whose spacing grows geometrically,
/// like ocean depth levels.
pub fn create_stretched_axis(first: f64, first_step: f64, ratio: f64, count: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(count);
    let mut value = first;
    let mut step = first_step;
    for _ in 0..count {
        values.push(value);
        value += step;
        step *= ratio;
    }
    values
}
