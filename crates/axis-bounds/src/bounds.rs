//! Cell bounds computation.
//!
//! Each axis value is the centre of a cell. Interior boundaries sit halfway
//! between neighbouring values; the two outer boundaries mirror the nearest
//! interior boundary about the end value:
//!
//! ```text
//! values      v0        v1        v2        v3
//!        |----x----|----x----|----x----|----x----|
//! edges  e0        m01       m12       m23       e3
//!
//! m(i-1,i) = (v[i-1] + v[i]) / 2
//! e0       = 2*v0 - m01
//! e3       = 2*v3 - m23
//! ```
//!
//! Bounds keep the axis ordering: on a decreasing axis every pair has the
//! larger value first.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AxisResult, InvalidAxisError};

/// Ordering of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Direction {
    pub fn is_increasing(&self) -> bool {
        matches!(self, Self::Increasing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lower and upper edge of one cell, in axis order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub lower: f64,
    pub upper: f64,
}

impl CellBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Signed width (`upper - lower`); negative on a decreasing axis.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the two edges.
    pub fn center(&self) -> f64 {
        midpoint(self.lower, self.upper)
    }

    /// Inclusive containment test, independent of axis direction.
    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = if self.lower <= self.upper {
            (self.lower, self.upper)
        } else {
            (self.upper, self.lower)
        };
        value >= lo && value <= hi
    }

    pub fn as_pair(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }
}

impl From<(f64, f64)> for CellBounds {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self::new(lower, upper)
    }
}

/// Per-cell bounds of an axis, one entry per axis value.
///
/// Adjacent cells share an edge exactly: `bounds[i].upper == bounds[i + 1].lower`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundsArray {
    cells: Vec<CellBounds>,
}

impl BoundsArray {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CellBounds> {
        self.cells.get(index)
    }

    pub fn first(&self) -> Option<&CellBounds> {
        self.cells.first()
    }

    pub fn last(&self) -> Option<&CellBounds> {
        self.cells.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CellBounds> {
        self.cells.iter()
    }

    pub fn as_slice(&self) -> &[CellBounds] {
        &self.cells
    }

    /// Direction of the axis the bounds were computed from.
    pub fn direction(&self) -> Direction {
        match self.cells.first() {
            Some(cell) if cell.lower > cell.upper => Direction::Decreasing,
            _ => Direction::Increasing,
        }
    }

    /// Row-major `n x 2` buffer, the layout of a `*_bnds` variable.
    pub fn to_flat(&self) -> Vec<f64> {
        self.cells.iter().flat_map(|c| c.as_pair()).collect()
    }

    /// The `n + 1` distinct cell edges in axis order.
    pub fn edges(&self) -> Vec<f64> {
        let mut edges = Vec::with_capacity(self.cells.len() + 1);
        if let Some(first) = self.cells.first() {
            edges.push(first.lower);
        }
        edges.extend(self.cells.iter().map(|c| c.upper));
        edges
    }

    /// Outermost edges `(first lower, last upper)` in axis order.
    pub fn extent(&self) -> Option<(f64, f64)> {
        match (self.cells.first(), self.cells.last()) {
            (Some(first), Some(last)) => Some((first.lower, last.upper)),
            _ => None,
        }
    }

    /// Index of the cell containing `value`.
    ///
    /// A value on a shared edge belongs to the lower-index cell.
    pub fn locate(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        let index = match self.direction() {
            Direction::Increasing => self.cells.partition_point(|c| c.upper < value),
            Direction::Decreasing => self.cells.partition_point(|c| c.upper > value),
        };
        self.cells
            .get(index)
            .filter(|c| c.contains(value))
            .map(|_| index)
    }

    /// Apply `f` to every edge. Shared edges stay shared because each one
    /// goes through the same function.
    pub fn map_edges(&self, f: impl Fn(f64) -> f64) -> BoundsArray {
        BoundsArray {
            cells: self
                .cells
                .iter()
                .map(|c| CellBounds::new(f(c.lower), f(c.upper)))
                .collect(),
        }
    }

    pub fn into_inner(self) -> Vec<CellBounds> {
        self.cells
    }
}

impl<'a> IntoIterator for &'a BoundsArray {
    type Item = &'a CellBounds;
    type IntoIter = std::slice::Iter<'a, CellBounds>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl std::ops::Index<usize> for BoundsArray {
    type Output = CellBounds;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

/// Check that `values` can describe an axis and return its direction.
///
/// Besides length, finiteness and monotonicity this rejects axes whose
/// extrapolated outer edges fall outside the `f64` range.
pub fn validate_values(values: &[f64]) -> AxisResult<Direction> {
    if values.len() < 2 {
        return Err(InvalidAxisError::TooShort { len: values.len() });
    }

    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(InvalidAxisError::NonFinite { index });
    }

    let direction = if values[1] > values[0] {
        Direction::Increasing
    } else if values[1] < values[0] {
        Direction::Decreasing
    } else {
        return Err(InvalidAxisError::NonMonotonic { index: 1 });
    };

    let broken = values.windows(2).position(|w| match direction {
        Direction::Increasing => w[1] <= w[0],
        Direction::Decreasing => w[1] >= w[0],
    });

    if let Some(i) = broken {
        return Err(InvalidAxisError::NonMonotonic { index: i + 1 });
    }

    let n = values.len();
    if !outer_edge(values[0], values[1]).is_finite() {
        return Err(InvalidAxisError::EdgeOverflow { index: 0 });
    }
    if !outer_edge(values[n - 1], values[n - 2]).is_finite() {
        return Err(InvalidAxisError::EdgeOverflow { index: n - 1 });
    }

    Ok(direction)
}

/// Compute per-cell bounds for a monotonic axis.
///
/// Fails with [`InvalidAxisError`] when the axis has fewer than two values,
/// contains a non-finite value, is not strictly monotonic, or sits so close
/// to the `f64` limits that an outer edge would overflow.
///
/// # Example
///
/// ```
/// use axis_bounds::compute_bounds;
///
/// let bounds = compute_bounds(&[0.0, 10.0, 30.0]).unwrap();
/// assert_eq!(bounds[0].as_pair(), [-5.0, 5.0]);
/// assert_eq!(bounds[1].as_pair(), [5.0, 20.0]);
/// assert_eq!(bounds[2].as_pair(), [20.0, 40.0]);
/// ```
pub fn compute_bounds(values: &[f64]) -> AxisResult<BoundsArray> {
    let direction = validate_values(values)?;
    let bounds = bounds_from_validated(values);

    debug!(
        len = values.len(),
        direction = %direction,
        extent = ?bounds.extent(),
        "Computed axis bounds"
    );

    Ok(bounds)
}

/// Bounds for values already known to be valid (length >= 2, finite, monotonic).
pub(crate) fn bounds_from_validated(values: &[f64]) -> BoundsArray {
    let n = values.len();
    let midpoints: Vec<f64> = values.windows(2).map(|w| midpoint(w[0], w[1])).collect();

    let mut cells = Vec::with_capacity(n);
    cells.push(CellBounds::new(
        extrapolate(values[0], midpoints[0]),
        midpoints[0],
    ));
    for i in 1..n - 1 {
        cells.push(CellBounds::new(midpoints[i - 1], midpoints[i]));
    }
    cells.push(CellBounds::new(
        midpoints[n - 2],
        extrapolate(values[n - 1], midpoints[n - 2]),
    ));

    BoundsArray { cells }
}

/// `(a + b) / 2` without overflowing near `f64::MAX`. Halving is exact for
/// normal numbers, so the result equals the plain formula wherever that one
/// is finite.
fn midpoint(a: f64, b: f64) -> f64 {
    a * 0.5 + b * 0.5
}

/// `2 * v - m`, falling back to `v + (v - m)` when `2 * v` alone overflows.
fn extrapolate(value: f64, midpoint: f64) -> f64 {
    let edge = 2.0 * value - midpoint;
    if edge.is_finite() {
        edge
    } else {
        value + (value - midpoint)
    }
}

/// Outer edge of the end cell at `end`, whose neighbour is `next`.
fn outer_edge(end: f64, next: f64) -> f64 {
    extrapolate(end, midpoint(end, next))
}
