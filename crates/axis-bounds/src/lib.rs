//! Cell bounds for monotonic coordinate axes.
//!
//! Gridded climate data stores one coordinate per cell centre. Tools that
//! regrid, average or subset need the cell edges as well, and files often
//! don't carry them. This crate derives them from the centres alone:
//!
//! - interior edges are midpoints between neighbouring values
//! - the two outer edges mirror the nearest interior edge about the end value
//! - edges keep the axis ordering (a decreasing axis gets `(larger, smaller)` pairs)
//!
//! Works for unevenly spaced and decreasing axes, e.g. the projected `y` axis
//! of a polar stereographic grid in meters.
//!
//! # Example
//!
//! ```
//! use axis_bounds::{compute_bounds, Axis, AxisMetadata, AxisValues};
//!
//! let bounds = compute_bounds(&[5837500.0, 5812556.0, 5787612.0]).unwrap();
//! assert_eq!(bounds[0].as_pair(), [5849972.0, 5825028.0]);
//!
//! let axis = Axis::new(
//!     AxisMetadata::inferred("lat", "degrees_north"),
//!     AxisValues::regular(-60.0, 30.0, 5).unwrap(),
//! );
//! assert_eq!(axis.bounds().extent(), Some((-75.0, 75.0)));
//! ```

pub mod axis;
pub mod bounds;
pub mod error;
pub mod identity;

pub use axis::{
    arange_values, regular_values, Axis, AxisMetadata, AxisValues, MAX_GENERATED_LEN,
};
pub use bounds::{compute_bounds, validate_values, BoundsArray, CellBounds, Direction};
pub use error::{AxisResult, InvalidAxisError};
pub use identity::AxisIdentity;
