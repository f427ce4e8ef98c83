//! Axis identity and CF attribute based detection.
//!
//! Readers hand over whatever attributes the file carries; the rules below
//! follow the usual CF metadata conventions, checked in order:
//!
//! 1. `axis` attribute (`X`, `Y`, `Z`, `T`)
//! 2. `units` (`degrees_north`, `degrees_east`, `<unit> since <date>`, pressure units)
//! 3. `standard_name`
//! 4. variable name (`lat`, `lon`, `lev`, `time`, ...)

use serde::{Deserialize, Serialize};

/// What physical dimension an axis represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisIdentity {
    Latitude,
    Longitude,
    Level,
    Time,
    #[default]
    Generic,
}

const LATITUDE_UNITS: &[&str] = &[
    "degrees_north",
    "degree_north",
    "degree_n",
    "degrees_n",
    "degreen",
    "degreesn",
];

const LONGITUDE_UNITS: &[&str] = &[
    "degrees_east",
    "degree_east",
    "degree_e",
    "degrees_e",
    "degreee",
    "degreese",
];

const LEVEL_UNITS: &[&str] = &[
    "pa",
    "hpa",
    "mb",
    "mbar",
    "millibar",
    "bar",
    "atm",
    "level",
    "layer",
    "sigma_level",
];

const LATITUDE_NAMES: &[&str] = &["lat", "latitude", "y_lat", "nav_lat"];
const LONGITUDE_NAMES: &[&str] = &["lon", "longitude", "x_lon", "nav_lon"];
const LEVEL_NAMES: &[&str] = &["lev", "level", "plev", "depth", "height", "isobaric", "z"];
const TIME_NAMES: &[&str] = &["time", "t", "forecast_time", "valid_time"];

impl AxisIdentity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Level => "level",
            Self::Time => "time",
            Self::Generic => "generic",
        }
    }

    /// Parse from string (case-insensitive). Unknown values map to `Generic`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "latitude" | "lat" => Self::Latitude,
            "longitude" | "lon" => Self::Longitude,
            "level" | "lev" | "vertical" => Self::Level,
            "time" => Self::Time,
            _ => Self::Generic,
        }
    }

    /// CF `axis` attribute value for this identity.
    pub fn cf_axis(&self) -> Option<&'static str> {
        match self {
            Self::Latitude => Some("Y"),
            Self::Longitude => Some("X"),
            Self::Level => Some("Z"),
            Self::Time => Some("T"),
            Self::Generic => None,
        }
    }

    /// CF `standard_name` for this identity, where one exists.
    pub fn standard_name(&self) -> Option<&'static str> {
        match self {
            Self::Latitude => Some("latitude"),
            Self::Longitude => Some("longitude"),
            Self::Time => Some("time"),
            Self::Level | Self::Generic => None,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Latitude | Self::Longitude)
    }

    /// Guess the identity from CF-style attributes.
    ///
    /// A projected `X`/`Y` axis (units in meters, as on a polar stereographic
    /// grid) is not geographic and comes back as `Generic`.
    pub fn infer(
        name: &str,
        units: &str,
        axis_attr: Option<&str>,
        standard_name: Option<&str>,
    ) -> Self {
        let units = units.trim().to_lowercase();
        let name = name.trim().to_lowercase();

        if let Some(axis) = axis_attr.map(|a| a.trim().to_uppercase()) {
            match axis.as_str() {
                "T" => return Self::Time,
                "Z" => return Self::Level,
                "Y" if is_latitude_units(&units) || !is_linear_units(&units) => {
                    return Self::Latitude
                }
                "X" if is_longitude_units(&units) || !is_linear_units(&units) => {
                    return Self::Longitude
                }
                _ => {}
            }
        }

        if is_latitude_units(&units) {
            return Self::Latitude;
        }
        if is_longitude_units(&units) {
            return Self::Longitude;
        }
        if is_time_units(&units) {
            return Self::Time;
        }
        if LEVEL_UNITS.contains(&units.as_str()) {
            return Self::Level;
        }

        if let Some(standard) = standard_name.map(|s| s.trim().to_lowercase()) {
            match standard.as_str() {
                "latitude" | "grid_latitude" => return Self::Latitude,
                "longitude" | "grid_longitude" => return Self::Longitude,
                "time" | "forecast_reference_time" => return Self::Time,
                "air_pressure" | "height" | "depth" | "altitude"
                | "atmosphere_sigma_coordinate"
                | "atmosphere_hybrid_sigma_pressure_coordinate" => return Self::Level,
                _ => {}
            }
        }

        // Names only count when the units don't contradict them.
        if is_linear_units(&units) {
            if LEVEL_NAMES.contains(&name.as_str()) {
                return Self::Level;
            }
            return Self::Generic;
        }
        if LATITUDE_NAMES.contains(&name.as_str()) {
            Self::Latitude
        } else if LONGITUDE_NAMES.contains(&name.as_str()) {
            Self::Longitude
        } else if LEVEL_NAMES.contains(&name.as_str()) {
            Self::Level
        } else if TIME_NAMES.contains(&name.as_str()) {
            Self::Time
        } else {
            Self::Generic
        }
    }
}

impl std::fmt::Display for AxisIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn is_latitude_units(units: &str) -> bool {
    LATITUDE_UNITS.contains(&units)
}

fn is_longitude_units(units: &str) -> bool {
    LONGITUDE_UNITS.contains(&units)
}

fn is_time_units(units: &str) -> bool {
    units.contains(" since ")
}

fn is_linear_units(units: &str) -> bool {
    matches!(units, "m" | "meter" | "meters" | "metre" | "metres" | "km")
}
