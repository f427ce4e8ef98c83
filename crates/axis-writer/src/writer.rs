//! Axis records with attached bounds variables.
//!
//! The writer turns axes into the records a dataset writer serializes: the
//! coordinate variable, its CF attributes and, when wanted, a companion
//! `<name>_bnds(<name>, bound)` variable referenced by a `bounds` attribute.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

use axis_bounds::{compute_bounds, Axis, AxisIdentity, AxisMetadata, BoundsArray};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{CompressionSettings, WriterConfig};
use crate::error::{Result, WriterError};

const LATITUDE_LIMIT: f64 = 90.0;

/// A `*_bnds` variable ready to be written next to its axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundsVariable {
    /// Variable name (axis name + suffix).
    pub name: String,
    /// `[axis dimension, bounds dimension]`.
    pub dimensions: Vec<String>,
    /// `(axis length, 2)`.
    pub shape: (usize, usize),
    /// Row-major edges, `shape.0 * 2` values.
    pub data: Vec<f64>,
    /// Same units as the axis.
    pub units: String,
    /// Compression applied when stored.
    pub compression: CompressionSettings,
}

impl BoundsVariable {
    /// Bounds pair of cell `index`.
    pub fn cell(&self, index: usize) -> Option<[f64; 2]> {
        let start = index.checked_mul(2)?;
        match self.data.get(start..start.checked_add(2)?) {
            Some(&[lower, upper]) => Some([lower, upper]),
            _ => None,
        }
    }
}

/// An axis as a dataset writer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisRecord {
    pub name: String,
    pub units: String,
    pub identity: AxisIdentity,
    /// Coordinate values as received. Non-finite entries (only possible on a
    /// record without bounds) are stored as `"NaN"`, `"Infinity"` or
    /// `"-Infinity"` in JSON.
    #[serde(with = "float_values")]
    pub values: Vec<f64>,
    /// CF attributes of the coordinate variable.
    pub attributes: BTreeMap<String, String>,
    /// Companion bounds variable, absent when not generated or not computable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsVariable>,
}

impl AxisRecord {
    pub fn has_bounds(&self) -> bool {
        self.bounds.is_some()
    }

    /// Name of the bounds variable this axis points at, if any.
    pub fn bounds_attribute(&self) -> Option<&str> {
        self.attributes.get("bounds").map(String::as_str)
    }
}

/// Description of a set of axes plus the dimensions they define.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    /// Dimension name to length, including the bounds dimension when used.
    pub dimensions: BTreeMap<String, usize>,
    pub axes: Vec<AxisRecord>,
    pub classic_format: bool,
    pub compression: CompressionSettings,
}

impl DatasetSchema {
    /// Serialize to JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Deserialize from JSON.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Write the schema as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let mut out = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, self)?;
        out.flush()?;
        Ok(())
    }

    /// Read a schema written by [`DatasetSchema::write_json`].
    pub fn read_json(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    pub fn axis(&self, name: &str) -> Option<&AxisRecord> {
        self.axes.iter().find(|a| a.name == name)
    }
}

/// Builds axis records according to a fixed [`WriterConfig`].
#[derive(Debug, Clone)]
pub struct AxisWriter {
    config: WriterConfig,
}

impl AxisWriter {
    /// Create a new AxisWriter with the given configuration.
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Create a writer after validating the configuration.
    pub fn validated(config: WriterConfig) -> Result<Self> {
        config.validate().map_err(WriterError::Config)?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Record for a validated axis.
    pub fn describe(&self, axis: &Axis) -> AxisRecord {
        let bounds = self
            .config
            .auto_bounds
            .applies_to(axis.identity())
            .then(|| axis.bounds());
        self.record(&axis.metadata, axis.values.as_slice(), bounds)
    }

    /// Record for raw values straight from a reader.
    ///
    /// If bounds are wanted but the values cannot produce them, the record is
    /// returned without bounds and a warning is logged.
    pub fn describe_values(&self, metadata: &AxisMetadata, values: &[f64]) -> AxisRecord {
        match self.try_describe_values(metadata, values) {
            Ok(record) => record,
            Err(e) => {
                warn!(axis = %metadata.name, error = %e, "Skipping bounds generation");
                self.record(metadata, values, None)
            }
        }
    }

    /// Like [`AxisWriter::describe_values`] but surfaces invalid axes.
    pub fn try_describe_values(
        &self,
        metadata: &AxisMetadata,
        values: &[f64],
    ) -> Result<AxisRecord> {
        let bounds = if self.config.auto_bounds.applies_to(metadata.identity) {
            let bounds = compute_bounds(values)
                .map_err(|e| WriterError::invalid_axis(&metadata.name, e))?;
            Some(bounds)
        } else {
            None
        };
        Ok(self.record(metadata, values, bounds))
    }

    /// Schema for a set of validated axes.
    pub fn describe_all(&self, axes: &[Axis]) -> Result<DatasetSchema> {
        self.schema(axes.iter().map(|axis| self.describe(axis)).collect())
    }

    /// Assemble a schema from already built records.
    ///
    /// Fails when two records share a name, or when an axis name collides
    /// with the bounds dimension of a schema that needs it.
    pub fn schema(&self, axes: Vec<AxisRecord>) -> Result<DatasetSchema> {
        let mut dimensions = BTreeMap::new();
        for axis in &axes {
            if dimensions.insert(axis.name.clone(), axis.values.len()).is_some() {
                return Err(WriterError::schema(format!(
                    "duplicate axis name '{}'",
                    axis.name
                )));
            }
        }

        if axes.iter().any(AxisRecord::has_bounds) {
            let bounds_dimension = &self.config.bounds_dimension;
            if dimensions.contains_key(bounds_dimension) {
                return Err(WriterError::schema(format!(
                    "axis '{}' collides with the bounds dimension",
                    bounds_dimension
                )));
            }
            dimensions.insert(bounds_dimension.clone(), 2);
        }

        let variables: BTreeSet<&str> = axes
            .iter()
            .filter_map(|a| a.bounds.as_ref())
            .map(|b| b.name.as_str())
            .collect();
        if let Some(axis) = axes.iter().find(|a| variables.contains(a.name.as_str())) {
            return Err(WriterError::schema(format!(
                "axis '{}' collides with a bounds variable",
                axis.name
            )));
        }

        debug!(
            axes = axes.len(),
            with_bounds = variables.len(),
            "Built dataset schema"
        );

        Ok(DatasetSchema {
            dimensions,
            axes,
            classic_format: self.config.classic_format,
            compression: self.config.compression(),
        })
    }

    /// Bounds variable for `bounds` belonging to the axis described by `metadata`.
    pub fn bounds_variable(&self, metadata: &AxisMetadata, bounds: &BoundsArray) -> BoundsVariable {
        let bounds = if self.config.clamp_latitude && metadata.identity == AxisIdentity::Latitude {
            bounds.map_edges(|e| e.clamp(-LATITUDE_LIMIT, LATITUDE_LIMIT))
        } else {
            bounds.clone()
        };

        BoundsVariable {
            name: format!("{}{}", metadata.name, self.config.bounds_suffix),
            dimensions: vec![
                metadata.name.clone(),
                self.config.bounds_dimension.clone(),
            ],
            shape: (bounds.len(), 2),
            data: bounds.to_flat(),
            units: metadata.units.clone(),
            compression: self.config.compression(),
        }
    }

    fn record(
        &self,
        metadata: &AxisMetadata,
        values: &[f64],
        bounds: Option<BoundsArray>,
    ) -> AxisRecord {
        let mut attributes = BTreeMap::new();
        if !metadata.units.is_empty() {
            attributes.insert("units".to_string(), metadata.units.clone());
        }
        if let Some(axis) = metadata.identity.cf_axis() {
            attributes.insert("axis".to_string(), axis.to_string());
        }
        if let Some(standard_name) = metadata.identity.standard_name() {
            attributes.insert("standard_name".to_string(), standard_name.to_string());
        }

        let bounds = bounds.map(|b| self.bounds_variable(metadata, &b));
        if let Some(variable) = &bounds {
            attributes.insert("bounds".to_string(), variable.name.clone());
            debug!(
                axis = %metadata.name,
                bounds = %variable.name,
                cells = variable.shape.0,
                "Attached bounds variable"
            );
        }

        AxisRecord {
            name: metadata.name.clone(),
            units: metadata.units.clone(),
            identity: metadata.identity,
            values: values.to_vec(),
            attributes,
            bounds,
        }
    }
}

impl Default for AxisWriter {
    fn default() -> Self {
        Self::new(WriterConfig::default())
    }
}

/// Serde adapter for coordinate values that may hold NaN or infinities,
/// which plain JSON numbers cannot represent.
mod float_values {
    use serde::de::Error as _;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Value {
        Number(f64),
        Special(String),
    }

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            if value.is_nan() {
                seq.serialize_element("NaN")?;
            } else if *value == f64::INFINITY {
                seq.serialize_element("Infinity")?;
            } else if *value == f64::NEG_INFINITY {
                seq.serialize_element("-Infinity")?;
            } else {
                seq.serialize_element(value)?;
            }
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        Vec::<Value>::deserialize(deserializer)?
            .into_iter()
            .map(|value| match value {
                Value::Number(v) => Ok(v),
                Value::Special(s) => match s.as_str() {
                    "NaN" => Ok(f64::NAN),
                    "Infinity" => Ok(f64::INFINITY),
                    "-Infinity" => Ok(f64::NEG_INFINITY),
                    other => Err(D::Error::custom(format!("invalid coordinate value '{}'", other))),
                },
            })
            .collect()
    }
}
