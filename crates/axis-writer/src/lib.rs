//! Attach computed cell bounds to axes on their way into a dataset.
//!
//! Readers hand over axes; this crate decides, per [`WriterConfig`], which of
//! them get a generated `<name>_bnds` variable and produces the records and
//! schema a file writer serializes.
//!
//! ```text
//! reader (values + metadata)
//!      │
//!      ▼
//! AxisWriter::describe_values
//!      │
//!      ├─► auto_bounds mode says no  ──► record without bounds
//!      │
//!      ├─► compute_bounds fails      ──► warn!, record without bounds
//!      │
//!      └─► bounds variable (+ latitude clamp) and `bounds` attribute
//!               │
//!               ▼
//!          DatasetSchema ──► JSON / file writer
//! ```
//!
//! # Example
//!
//! ```
//! use axis_bounds::{AxisIdentity, AxisMetadata};
//! use axis_writer::{AxisWriter, WriterConfig};
//!
//! let writer = AxisWriter::new(WriterConfig::default());
//! let lat = AxisMetadata::new("lat", "degrees_north", AxisIdentity::Latitude);
//! let record = writer.describe_values(&lat, &[-60.0, 0.0, 60.0]);
//!
//! assert_eq!(record.bounds_attribute(), Some("lat_bnds"));
//! assert_eq!(record.bounds.unwrap().cell(0), Some([-90.0, -30.0]));
//! ```

pub mod config;
pub mod error;
pub mod writer;

pub use config::{AutoBoundsMode, CompressionSettings, WriterConfig};
pub use error::{Result, WriterError};
pub use writer::{AxisRecord, AxisWriter, BoundsVariable, DatasetSchema};
