//! Axis value sequences and their descriptive metadata.
//!
//! Values and metadata are kept apart: bounds depend only on the numbers,
//! while units and identity travel alongside untouched.

use serde::{Deserialize, Serialize};

use crate::bounds::{bounds_from_validated, validate_values, BoundsArray, Direction};
use crate::error::{AxisResult, InvalidAxisError};
use crate::identity::AxisIdentity;

/// Longest sequence [`regular_values`] and [`arange_values`] will generate.
pub const MAX_GENERATED_LEN: usize = 1 << 24;

/// `count` raw values starting at `start`, spaced by `step`.
///
/// The result is not checked as an axis; a zero step yields repeated values
/// that [`AxisValues::new`] or [`compute_bounds`](crate::compute_bounds) will
/// reject.
pub fn regular_values(start: f64, step: f64, count: usize) -> AxisResult<Vec<f64>> {
    if !step.is_finite() {
        return Err(InvalidAxisError::InvalidStep { step });
    }
    if count > MAX_GENERATED_LEN {
        return Err(InvalidAxisError::TooLong {
            len: count,
            max: MAX_GENERATED_LEN,
        });
    }
    Ok((0..count).map(|i| start + step * i as f64).collect())
}

/// Raw values of `numpy.arange(start, stop, step)`.
///
/// Empty when `step` points away from `stop`.
pub fn arange_values(start: f64, stop: f64, step: f64) -> AxisResult<Vec<f64>> {
    if step == 0.0 || !step.is_finite() {
        return Err(InvalidAxisError::InvalidStep { step });
    }
    let count = ((stop - start) / step).ceil();
    if count > MAX_GENERATED_LEN as f64 {
        return Err(InvalidAxisError::TooLong {
            // saturates for counts beyond usize
            len: count as usize,
            max: MAX_GENERATED_LEN,
        });
    }
    if count.is_nan() || count <= 0.0 {
        return Ok(Vec::new());
    }
    regular_values(start, step, count as usize)
}

/// Validated coordinate values of a 1-D axis.
///
/// Always holds at least two finite, strictly monotonic values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AxisValues {
    values: Vec<f64>,
    #[serde(skip)]
    direction: Direction,
}

impl AxisValues {
    /// Validate and wrap a sequence of coordinate values.
    pub fn new(values: Vec<f64>) -> AxisResult<Self> {
        let direction = validate_values(&values)?;
        Ok(Self { values, direction })
    }

    /// `count` values starting at `start`, spaced by `step`.
    pub fn regular(start: f64, step: f64, count: usize) -> AxisResult<Self> {
        Self::new(regular_values(start, step, count)?)
    }

    /// Values from `start` towards `stop` (exclusive) spaced by `step`,
    /// the same sequence `numpy.arange` produces.
    pub fn arange(start: f64, stop: f64, step: f64) -> AxisResult<Self> {
        Self::new(arange_values(start, stop, step)?)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Never true; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> f64 {
        self.values[0]
    }

    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }

    /// Per-cell bounds. Infallible: the values were validated on construction.
    pub fn bounds(&self) -> BoundsArray {
        bounds_from_validated(&self.values)
    }
}

impl<'de> Deserialize<'de> for AxisValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<f64>::deserialize(deserializer)?;
        AxisValues::new(values).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Vec<f64>> for AxisValues {
    type Error = InvalidAxisError;

    fn try_from(values: Vec<f64>) -> AxisResult<Self> {
        Self::new(values)
    }
}

impl AsRef<[f64]> for AxisValues {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Descriptive metadata of an axis. Passed through unchanged by bounds
/// computation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisMetadata {
    /// Variable / dimension name (e.g. "lat", "y").
    pub name: String,
    /// Units string as found in the file (e.g. "degrees_north", "m").
    #[serde(default)]
    pub units: String,
    /// What the axis represents.
    #[serde(default)]
    pub identity: AxisIdentity,
}

impl AxisMetadata {
    pub fn new(name: impl Into<String>, units: impl Into<String>, identity: AxisIdentity) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            identity,
        }
    }

    /// Build metadata with the identity inferred from the name and units.
    pub fn inferred(name: impl Into<String>, units: impl Into<String>) -> Self {
        let name = name.into();
        let units = units.into();
        let identity = AxisIdentity::infer(&name, &units, None, None);
        Self {
            name,
            units,
            identity,
        }
    }
}

/// A coordinate axis: validated values plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub metadata: AxisMetadata,
    pub values: AxisValues,
}

impl Axis {
    pub fn new(metadata: AxisMetadata, values: AxisValues) -> Self {
        Self { metadata, values }
    }

    /// Validate `values` and pair them with `metadata`.
    pub fn from_values(metadata: AxisMetadata, values: Vec<f64>) -> AxisResult<Self> {
        Ok(Self::new(metadata, AxisValues::new(values)?))
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn units(&self) -> &str {
        &self.metadata.units
    }

    pub fn identity(&self) -> AxisIdentity {
        self.metadata.identity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn bounds(&self) -> BoundsArray {
        self.values.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_axis() {
        let values = AxisValues::regular(-90.0, 30.0, 7).unwrap();
        assert_eq!(values.len(), 7);
        assert_eq!(values.first(), -90.0);
        assert_eq!(values.last(), 90.0);
        assert_eq!(values.direction(), Direction::Increasing);
    }

    #[test]
    fn test_arange_matches_numpy() {
        let values = AxisValues::arange(10.0, 0.0, -3.0).unwrap();
        assert_eq!(values.as_slice(), &[10.0, 7.0, 4.0, 1.0]);
        assert_eq!(values.direction(), Direction::Decreasing);

        assert_eq!(
            AxisValues::arange(0.0, 1.0, 0.0),
            Err(InvalidAxisError::InvalidStep { step: 0.0 })
        );
        assert_eq!(
            AxisValues::arange(0.0, 1.0, -1.0),
            Err(InvalidAxisError::TooShort { len: 0 })
        );
    }

    #[test]
    fn test_generators_cap_length() {
        assert_eq!(
            regular_values(0.0, 1.0, MAX_GENERATED_LEN + 1),
            Err(InvalidAxisError::TooLong {
                len: MAX_GENERATED_LEN + 1,
                max: MAX_GENERATED_LEN,
            })
        );
        assert!(matches!(
            arange_values(0.0, 1.0e300, 1.0),
            Err(InvalidAxisError::TooLong { .. })
        ));
        assert!(matches!(
            arange_values(0.0, f64::INFINITY, 1.0),
            Err(InvalidAxisError::TooLong { .. })
        ));
        assert!(matches!(
            AxisValues::regular(0.0, 1.0, usize::MAX),
            Err(InvalidAxisError::TooLong { .. })
        ));
    }

    #[test]
    fn test_generators_reject_bad_step() {
        assert!(matches!(
            regular_values(0.0, f64::NAN, 3),
            Err(InvalidAxisError::InvalidStep { .. })
        ));
        assert!(matches!(
            arange_values(0.0, 1.0, f64::NAN),
            Err(InvalidAxisError::InvalidStep { .. })
        ));
        // a zero step is a valid request for a degenerate sequence
        assert_eq!(regular_values(1.0, 0.0, 2).unwrap(), vec![1.0, 1.0]);
        assert_eq!(arange_values(0.0, f64::NAN, 1.0).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_new_rejects_invalid() {
        assert!(AxisValues::new(vec![1.0]).is_err());
        assert!(AxisValues::new(vec![1.0, 1.0, 2.0]).is_err());
        assert!(AxisValues::try_from(vec![3.0, 2.0, 1.0]).is_ok());
    }

    #[test]
    fn test_axis_bounds_pass_through_metadata() {
        let axis = Axis::from_values(
            AxisMetadata::inferred("lat", "degrees_north"),
            vec![-45.0, 0.0, 45.0],
        )
        .unwrap();
        assert_eq!(axis.identity(), AxisIdentity::Latitude);
        assert_eq!(axis.units(), "degrees_north");

        let bounds = axis.bounds();
        assert_eq!(bounds.len(), 3);
        assert_eq!(bounds[0].as_pair(), [-67.5, -22.5]);
        assert_eq!(bounds[2].as_pair(), [22.5, 67.5]);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: AxisValues = serde_json::from_str("[1.0, 2.0, 4.0]").unwrap();
        assert_eq!(ok.len(), 3);

        let err = serde_json::from_str::<AxisValues>("[1.0, 1.0]").unwrap_err();
        assert!(err.to_string().contains("non-monotonic at index 1"));
    }
}
