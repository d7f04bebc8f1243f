//! Point budget and storage constants

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable planner constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConstants {
    /// Attribute points a level 1 character is expected to spend
    #[serde(default = "default_base_points")]
    pub base_points: i64,
    /// Extra points granted per level above 1
    #[serde(default = "default_points_per_level")]
    pub points_per_level: i64,
    #[serde(default = "default_level")]
    pub default_level: u32,
    #[serde(default = "default_attribute")]
    pub default_attribute: u32,
    /// Store key holding the stats snapshot
    #[serde(default = "default_stats_key")]
    pub stats_key: String,
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
}

impl Default for BuildConstants {
    fn default() -> Self {
        BuildConstants {
            base_points: default_base_points(),
            points_per_level: default_points_per_level(),
            default_level: default_level(),
            default_attribute: default_attribute(),
            stats_key: default_stats_key(),
            favorites_key: default_favorites_key(),
        }
    }
}

impl BuildConstants {
    /// Parse constants from TOML and validate them
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let constants: BuildConstants = toml::from_str(content)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_points < 0 {
            return Err(ConfigError::ValidationError(format!(
                "base_points must not be negative, got {}",
                self.base_points
            )));
        }
        if self.points_per_level < 0 {
            return Err(ConfigError::ValidationError(format!(
                "points_per_level must not be negative, got {}",
                self.points_per_level
            )));
        }
        // Stats are clamped to 1, so defaults below that could never be restored by an update
        if self.default_level < 1 || self.default_attribute < 1 {
            return Err(ConfigError::ValidationError(
                "default level and attribute values must be at least 1".to_string(),
            ));
        }
        if self.stats_key.is_empty() || self.favorites_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "storage keys must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Constants bundled with the crate
pub fn default_constants() -> BuildConstants {
    let toml = include_str!("../../config/build.toml");
    BuildConstants::from_toml_str(toml).unwrap_or_default()
}

fn default_base_points() -> i64 {
    80
}
fn default_points_per_level() -> i64 {
    1
}
fn default_level() -> u32 {
    1
}
fn default_attribute() -> u32 {
    10
}
fn default_stats_key() -> String {
    "elden_ring_character_stats".to_string()
}
fn default_favorites_key() -> String {
    "favorites".to_string()
}
