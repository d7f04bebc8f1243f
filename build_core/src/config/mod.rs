//! Planner configuration
//!
//! Constants are plain TOML. Front ends that keep their own settings file
//! can embed [`BuildConstants`] and read the whole file with [`load_toml`].

mod constants;

pub use constants::{default_constants, BuildConstants};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid build constants: {0}")]
    ValidationError(String),
}

/// Read the TOML file at `path` into `T`
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_toml_reads_constants() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "points_per_level = 2").unwrap();

        let constants: BuildConstants = load_toml(file.path()).unwrap();
        assert_eq!(constants.points_per_level, 2);
        assert_eq!(constants.base_points, 80);
    }

    #[test]
    fn test_load_toml_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<BuildConstants, _> = load_toml(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
