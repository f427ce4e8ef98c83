//! Common test fixtures for climate-axis tests.
//!
//! Axis descriptions that show up repeatedly in real datasets.

/// Metadata of well-known axes as `(name, units)`.
pub mod axes {
    /// Geographic latitude
    pub const LATITUDE: (&str, &str) = ("lat", "degrees_north");

    /// Geographic longitude
    pub const LONGITUDE: (&str, &str) = ("lon", "degrees_east");

    /// Isobaric levels
    pub const PRESSURE: (&str, &str) = ("plev", "hPa");

    /// CF time axis
    pub const TIME: (&str, &str) = ("time", "days since 1850-01-01 00:00:00");

    /// Projected polar stereographic y coordinate
    pub const POLAR_Y: (&str, &str) = ("y", "m");

    /// Projected polar stereographic x coordinate
    pub const POLAR_X: (&str, &str) = ("x", "m");
}

/// Expected bounds for the polar stereographic `y` axis
/// (see [`crate::polar_stereo_y_axis`]).
pub mod polar_stereo {
    /// Bounds of the first cell, larger edge first.
    pub const FIRST_CELL: [f64; 2] = [5849972.0, 5825028.0];

    /// Bounds of the last cell, larger edge first.
    pub const LAST_CELL: [f64; 2] = [-5324940.0, -5349884.0];

    /// Grid spacing in meters.
    pub const SPACING: f64 = 24944.0;
}

/// Inputs that must be rejected.
pub mod invalid {
    /// Consecutive duplicate at index 1
    pub const DUPLICATE: [f64; 3] = [1.0, 1.0, 2.0];

    /// Changes direction at index 3
    pub const ZIGZAG: [f64; 4] = [0.0, 1.0, 2.0, 1.5];

    /// Single value
    pub const SINGLE: [f64; 1] = [42.0];
}
