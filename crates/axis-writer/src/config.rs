//! Configuration for the axis writer.
//!
//! Compression and format flags are fixed when the writer is built and never
//! change afterwards; two writers with different settings can coexist.

use std::path::Path;

use axis_bounds::AxisIdentity;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WriterError};

/// Configuration for the axis writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Which axes get generated bounds when the source has none.
    pub auto_bounds: AutoBoundsMode,

    /// Enable deflate compression for written variables.
    pub deflate: bool,

    /// Deflate level (0-9).
    pub deflate_level: u8,

    /// Enable the byte shuffle filter.
    pub shuffle: bool,

    /// Target the classic (NetCDF-3) format, which cannot compress.
    pub classic_format: bool,

    /// Clip latitude bounds to [-90, 90].
    pub clamp_latitude: bool,

    /// Suffix appended to the axis name to name its bounds variable.
    pub bounds_suffix: String,

    /// Name of the length-2 dimension of bounds variables.
    pub bounds_dimension: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            auto_bounds: AutoBoundsMode::Grid,
            deflate: true,
            deflate_level: 1,
            shuffle: true,
            classic_format: false,
            clamp_latitude: true,
            bounds_suffix: "_bnds".to_string(),
            bounds_dimension: "bound".to_string(),
        }
    }
}

impl WriterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup, starting from defaults.
    ///
    /// Unparseable values are ignored and leave the default in place.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("AXIS_AUTO_BOUNDS") {
            config.auto_bounds = AutoBoundsMode::from_str(&val);
        }

        if let Some(val) = lookup("AXIS_DEFLATE") {
            config.deflate = parse_flag(&val);
        }

        if let Some(val) = lookup("AXIS_DEFLATE_LEVEL") {
            if let Ok(level) = val.trim().parse() {
                config.deflate_level = level;
            }
        }

        if let Some(val) = lookup("AXIS_SHUFFLE") {
            config.shuffle = parse_flag(&val);
        }

        if let Some(val) = lookup("AXIS_CLASSIC_FORMAT") {
            config.classic_format = parse_flag(&val);
        }

        if let Some(val) = lookup("AXIS_CLAMP_LATITUDE") {
            config.clamp_latitude = parse_flag(&val);
        }

        if let Some(val) = lookup("AXIS_BOUNDS_SUFFIX") {
            config.bounds_suffix = val;
        }

        if let Some(val) = lookup("AXIS_BOUNDS_DIMENSION") {
            config.bounds_dimension = val;
        }

        config
    }

    /// Parse a YAML document. Missing keys take their default value.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate().map_err(WriterError::Config)?;
        Ok(config)
    }

    /// Read and parse a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.deflate_level > 9 {
            return Err("deflate_level must be 0-9".to_string());
        }

        if self.bounds_suffix.is_empty() {
            return Err("bounds_suffix must not be empty".to_string());
        }

        if self.bounds_dimension.trim().is_empty() {
            return Err("bounds_dimension must not be empty".to_string());
        }

        Ok(())
    }

    /// Compression actually applied, after format restrictions.
    pub fn compression(&self) -> CompressionSettings {
        if self.classic_format {
            return CompressionSettings::none();
        }

        let deflate = self.deflate && self.deflate_level > 0;
        CompressionSettings {
            deflate,
            deflate_level: if deflate { self.deflate_level } else { 0 },
            shuffle: self.shuffle,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    let val = val.trim().to_lowercase();
    val == "true" || val == "1" || val == "yes" || val == "on"
}

/// When bounds are generated for an axis that has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoBoundsMode {
    /// Never generate bounds.
    Off,
    /// Generate bounds for every axis.
    On,
    /// Generate bounds for latitude and longitude axes only.
    #[default]
    Grid,
}

impl AutoBoundsMode {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "off" | "false" | "0" => Self::Off,
            "on" | "true" | "1" | "all" => Self::On,
            _ => Self::Grid,
        }
    }

    /// Get the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Grid => "grid",
        }
    }

    /// Whether an axis with this identity gets generated bounds.
    pub fn applies_to(&self, identity: AxisIdentity) -> bool {
        match self {
            Self::Off => false,
            Self::On => true,
            Self::Grid => identity.is_horizontal(),
        }
    }
}

impl std::fmt::Display for AutoBoundsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Effective compression parameters for written variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionSettings {
    pub deflate: bool,
    pub deflate_level: u8,
    pub shuffle: bool,
}

impl CompressionSettings {
    /// No compression at all.
    pub fn none() -> Self {
        Self {
            deflate: false,
            deflate_level: 0,
            shuffle: false,
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.deflate || self.shuffle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = WriterConfig::default();
        assert_eq!(config.auto_bounds, AutoBoundsMode::Grid);
        assert!(config.deflate);
        assert_eq!(config.deflate_level, 1);
        assert!(config.shuffle);
        assert!(!config.classic_format);
        assert!(config.clamp_latitude);
        assert_eq!(config.bounds_suffix, "_bnds");
        assert_eq!(config.bounds_dimension, "bound");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = WriterConfig::default();
        config.deflate_level = 10;
        assert!(config.validate().is_err());

        config = WriterConfig::default();
        config.bounds_suffix = String::new();
        assert!(config.validate().is_err());

        config = WriterConfig::default();
        config.bounds_dimension = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("AXIS_AUTO_BOUNDS", "on"),
            ("AXIS_DEFLATE_LEVEL", "5"),
            ("AXIS_SHUFFLE", "0"),
            ("AXIS_CLASSIC_FORMAT", "TRUE"),
            ("AXIS_BOUNDS_SUFFIX", "_bounds"),
            ("AXIS_BOUNDS_DIMENSION", "nv"),
        ]
        .into_iter()
        .collect();

        let config = WriterConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.auto_bounds, AutoBoundsMode::On);
        assert_eq!(config.deflate_level, 5);
        assert!(!config.shuffle);
        assert!(config.classic_format);
        assert_eq!(config.bounds_suffix, "_bounds");
        assert_eq!(config.bounds_dimension, "nv");
        // untouched keys keep defaults
        assert!(config.deflate);
        assert!(config.clamp_latitude);
    }

    #[test]
    fn test_from_lookup_ignores_bad_level() {
        let config = WriterConfig::from_lookup(|key| {
            (key == "AXIS_DEFLATE_LEVEL").then(|| "high".to_string())
        });
        assert_eq!(config.deflate_level, 1);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = WriterConfig::from_yaml_str("auto_bounds: off\ndeflate_level: 4\n").unwrap();
        assert_eq!(config.auto_bounds, AutoBoundsMode::Off);
        assert_eq!(config.deflate_level, 4);
        assert!(config.shuffle);
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = WriterConfig::from_yaml_str("deflate_level: 12\n").unwrap_err();
        assert!(matches!(err, WriterError::Config(_)));

        let err = WriterConfig::from_yaml_str("auto_bounds: [1, 2]\n").unwrap_err();
        assert!(matches!(err, WriterError::Yaml(_)));
    }

    #[test]
    fn test_classic_format_disables_compression() {
        let config = WriterConfig {
            classic_format: true,
            ..Default::default()
        };
        assert_eq!(config.compression(), CompressionSettings::none());
        assert!(!config.compression().is_compressed());
    }

    #[test]
    fn test_deflate_level_zero_means_off() {
        let config = WriterConfig {
            deflate_level: 0,
            shuffle: false,
            ..Default::default()
        };
        let compression = config.compression();
        assert!(!compression.deflate);
        assert_eq!(compression.deflate_level, 0);
    }

    #[test]
    fn test_auto_bounds_mode() {
        assert_eq!(AutoBoundsMode::from_str("OFF"), AutoBoundsMode::Off);
        assert_eq!(AutoBoundsMode::from_str("all"), AutoBoundsMode::On);
        assert_eq!(AutoBoundsMode::from_str("unknown"), AutoBoundsMode::Grid);

        assert!(AutoBoundsMode::Grid.applies_to(AxisIdentity::Latitude));
        assert!(AutoBoundsMode::Grid.applies_to(AxisIdentity::Longitude));
        assert!(!AutoBoundsMode::Grid.applies_to(AxisIdentity::Time));
        assert!(AutoBoundsMode::On.applies_to(AxisIdentity::Generic));
        assert!(!AutoBoundsMode::Off.applies_to(AxisIdentity::Latitude));
    }
}
