//! Front-end configuration

use build_core::config::{load_toml, ConfigError};
use build_core::{default_constants, BuildConstants};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an optional TOML config file
pub const CONFIG_ENV: &str = "BUILD_PLANNER_CONFIG";

/// Catalog locations tried when none is configured
const CATALOG_DIRS: [&str; 3] = ["build_tui/data", "data", "../build_tui/data"];

#[derive(Debug, Clone, Deserialize)]
pub struct TuiConfig {
    /// Directory for the stats and favorites store
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Directory holding `<category>.json` files
    #[serde(default)]
    pub catalog_dir: Option<PathBuf>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default = "default_constants")]
    pub constants: BuildConstants,
}

impl Default for TuiConfig {
    fn default() -> Self {
        TuiConfig {
            data_dir: None,
            catalog_dir: None,
            log_dir: None,
            constants: default_constants(),
        }
    }
}

impl TuiConfig {
    /// Load from the file named by [`CONFIG_ENV`], or use defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: TuiConfig = load_toml(path)?;
        config.constants.validate()?;
        Ok(config)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| match project_dirs() {
            Some(dirs) => dirs.data_dir().to_path_buf(),
            None => PathBuf::from(".build_planner"),
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| match project_dirs() {
            Some(dirs) => dirs.cache_dir().join("logs"),
            None => PathBuf::from(".build_planner/logs"),
        })
    }

    pub fn catalog_dir(&self) -> PathBuf {
        if let Some(dir) = &self.catalog_dir {
            return dir.clone();
        }
        CATALOG_DIRS
            .iter()
            .map(PathBuf::from)
            .find(|dir| dir.is_dir())
            .unwrap_or_else(|| PathBuf::from(CATALOG_DIRS[0]))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "build_planner")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
data_dir = "/tmp/planner"
catalog_dir = "/srv/catalog"

[constants]
base_points = 88
"#
        )
        .unwrap();

        let config = TuiConfig::load(file.path()).unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/planner"));
        assert_eq!(config.catalog_dir(), PathBuf::from("/srv/catalog"));
        assert_eq!(config.constants.base_points, 88);
        assert_eq!(config.constants.default_attribute, 10);
    }

    #[test]
    fn test_invalid_constants_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[constants]\nstats_key = \"\"\n").unwrap();
        assert!(matches!(
            TuiConfig::load(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let config = TuiConfig::default();
        assert_eq!(config.constants, BuildConstants::default());
        assert!(config.data_dir.is_none());
    }
}
