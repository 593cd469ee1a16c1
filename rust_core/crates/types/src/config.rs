use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Numeric representation for loaded series
    #[serde(default)]
    pub representation: NumRepresentation,
    /// Memoization settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Fixture locations
    #[serde(default)]
    pub fixtures: FixtureConfig,
}

impl EngineConfig {
    /// Parses a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] on malformed input.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Json`] on malformed input.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Numeric representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumRepresentation {
    /// `f64`
    #[default]
    Double,
    /// `rust_decimal::Decimal`
    Decimal,
}

/// Memoization settings
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CacheConfig {
    /// Gap (in bars) above which recursive indicators fill their cache
    /// iteratively before computing the requested index
    #[serde(default = "default_recursion_threshold")]
    pub recursion_threshold: usize,
}

fn default_recursion_threshold() -> usize {
    100
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            recursion_threshold: default_recursion_threshold(),
        }
    }
}

/// Fixture locations
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FixtureConfig {
    /// Root directory of Parquet fixtures
    #[serde(default = "default_fixture_root")]
    pub root: PathBuf,
}

fn default_fixture_root() -> PathBuf {
    PathBuf::from("tests/fixtures")
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            root: default_fixture_root(),
        }
    }
}
