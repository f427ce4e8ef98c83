//! Axis description files.
//!
//! ```yaml
//! name: y
//! units: m
//! axis: Y                      # optional CF hints
//! standard_name: projection_y_coordinate
//! arange: { start: 5837500, stop: -5350000, step: -24944 }
//! ```
//!
//! Values come from exactly one of `values: [...]`,
//! `regular: { start, step, count }` or `arange: { start, stop, step }`.
//! JSON files work too, since YAML parses them.

use std::path::Path;

use anyhow::{Context, Result};
use axis_bounds::{arange_values, regular_values, AxisIdentity, AxisMetadata, AxisResult};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AxisFile {
    pub name: String,
    #[serde(default)]
    pub units: String,
    /// Explicit identity; inferred from the other attributes when absent.
    #[serde(default)]
    pub identity: Option<AxisIdentity>,
    #[serde(default)]
    pub axis: Option<String>,
    #[serde(default)]
    pub standard_name: Option<String>,
    #[serde(flatten)]
    pub source: ValueSource,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    Values(Vec<f64>),
    Regular { start: f64, step: f64, count: usize },
    Arange { start: f64, stop: f64, step: f64 },
}

impl ValueSource {
    /// Expand into raw values.
    ///
    /// Only generator arguments are checked here (step, length cap). Whether
    /// the values form a usable axis is up to the writer.
    pub fn expand(&self) -> AxisResult<Vec<f64>> {
        match self {
            Self::Values(values) => Ok(values.clone()),
            Self::Regular { start, step, count } => regular_values(*start, *step, *count),
            Self::Arange { start, stop, step } => arange_values(*start, *stop, *step),
        }
    }
}

impl AxisFile {
    pub fn from_str(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).context("Failed to parse axis description")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read axis file {}", path.display()))?;
        Self::from_str(&contents).with_context(|| format!("In {}", path.display()))
    }

    pub fn metadata(&self) -> AxisMetadata {
        let identity = self.identity.unwrap_or_else(|| {
            AxisIdentity::infer(
                &self.name,
                &self.units,
                self.axis.as_deref(),
                self.standard_name.as_deref(),
            )
        });
        AxisMetadata::new(self.name.clone(), self.units.clone(), identity)
    }

    pub fn values(&self) -> Result<Vec<f64>> {
        self.source
            .expand()
            .with_context(|| format!("Cannot generate values for axis '{}'", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axis_bounds::InvalidAxisError;
    use test_utils::ScratchDir;

    #[test]
    fn test_parse_explicit_values() {
        let file = AxisFile::from_str("name: lat\nunits: degrees_north\nvalues: [-45, 0, 45]\n")
            .unwrap();
        assert_eq!(file.values().unwrap(), vec![-45.0, 0.0, 45.0]);
        assert_eq!(file.metadata().identity, AxisIdentity::Latitude);
    }

    #[test]
    fn test_parse_arange_projected() {
        let yaml = "name: y\nunits: m\naxis: Y\n\
                    arange: { start: 5837500, stop: -5350000, step: -24944 }\n";
        let file = AxisFile::from_str(yaml).unwrap();
        let values = file.values().unwrap();
        assert_eq!(values.len(), 449);
        assert_eq!(values[448], -5337412.0);
        assert_eq!(file.metadata().identity, AxisIdentity::Generic);
    }

    #[test]
    fn test_parse_regular_with_explicit_identity() {
        let json = r#"{"name": "x", "units": "km", "identity": "longitude",
                       "regular": {"start": 0, "step": 10, "count": 3}}"#;
        let file = AxisFile::from_str(json).unwrap();
        assert_eq!(file.values().unwrap(), vec![0.0, 10.0, 20.0]);
        assert_eq!(file.metadata().identity, AxisIdentity::Longitude);
    }

    #[test]
    fn test_arange_zero_step_is_rejected() {
        let source = ValueSource::Arange {
            start: 0.0,
            stop: 1.0,
            step: 0.0,
        };
        assert_eq!(
            source.expand(),
            Err(InvalidAxisError::InvalidStep { step: 0.0 })
        );
    }

    #[test]
    fn test_oversized_count_is_error() {
        let file =
            AxisFile::from_str("name: x\nregular: { start: 0, step: 1, count: 10000000000000000000 }")
                .unwrap();
        let err = file.values().unwrap_err();
        assert!(err.to_string().contains("Cannot generate values for axis 'x'"));
        assert!(matches!(
            err.downcast_ref::<InvalidAxisError>(),
            Some(InvalidAxisError::TooLong { .. })
        ));

        let file = AxisFile::from_str("name: x\narange: { start: 0, stop: 1.0e300, step: 1 }").unwrap();
        assert!(file.values().is_err());
    }

    #[test]
    fn test_regular_nan_step_matches_axis_values() {
        let source = ValueSource::Regular {
            start: 0.0,
            step: f64::NAN,
            count: 3,
        };
        assert!(matches!(
            source.expand(),
            Err(InvalidAxisError::InvalidStep { .. })
        ));
    }

    #[test]
    fn test_missing_source_is_error() {
        assert!(AxisFile::from_str("name: lat\nunits: degrees_north\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let scratch = ScratchDir::new();
        let path = scratch.write("lev.yaml", "name: plev\nunits: hPa\nvalues: [1000, 850, 500]\n");
        let file = AxisFile::load(&path).unwrap();
        assert_eq!(file.metadata().identity, AxisIdentity::Level);

        let missing = AxisFile::load(&scratch.file("nope.yaml")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read axis file"));
    }
}
