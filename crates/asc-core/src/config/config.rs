//! Configuration management for asc
//!
//! Handles loading the TOML configuration file and resolving the effective
//! profile/region from command-line values, the file, and the environment.

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};
use crate::render::{Overflow, TableStyle};

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// AWS shared-config profile used when `--profile` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// AWS region used when `--region` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Table rendering defaults
    #[serde(default)]
    pub table: TableConfig,
}

/// Table rendering defaults
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct TableConfig {
    /// Style for list tables that do not pick their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TableStyle>,
    /// Upper bound on any column's width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_column_width: Option<usize>,
    /// Whether content past `max_column_width` wraps or is cut short
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overflow: Option<Overflow>,
    /// Columns per row in grid detail layouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
}

impl Config {
    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    ///
    /// A missing file yields the default configuration.
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        let expanded_content = Self::expand_env_vars(&content);
        let config: Config = toml::from_str(&expanded_content)?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values that parse but cannot be used
    pub fn validate(&self) -> Result<()> {
        if self.table.max_column_width == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "table.max_column_width".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.table.columns == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "table.columns".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Effective profile: the explicit value wins over the file
    pub fn resolve_profile(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.profile.clone())
            .filter(|p| !p.is_empty())
    }

    /// Effective region: the explicit value wins over the file
    pub fn resolve_region(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.region.clone())
            .filter(|r| !r.is_empty())
    }

    /// Get the path to the configuration file
    ///
    /// On macOS, `~/.config/asc/config.toml` is preferred when it (or its
    /// directory) exists; otherwise the platform standard location is used.
    ///
    /// On Linux: ~/.config/asc/config.toml
    /// On Windows: %APPDATA%\asc\asc\config.toml
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style_path = base_dirs
                    .home_dir()
                    .join(".config")
                    .join("asc")
                    .join("config.toml");

                if linux_style_path.exists()
                    || linux_style_path
                        .parent()
                        .map(|p| p.exists())
                        .unwrap_or(false)
                {
                    return Ok(linux_style_path);
                }
            }
        }

        let proj_dirs = ProjectDirs::from("io", "asc", "asc").ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand `${VAR}` and `${VAR:-default}` references
    ///
    /// Unset variables without a default are left as written.
    fn expand_env_vars(content: &str) -> String {
        shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config {
            profile: Some("prod".to_string()),
            region: Some("eu-west-2".to_string()),
            table: TableConfig {
                style: Some(TableStyle::Plain),
                max_column_width: Some(80),
                overflow: Some(Overflow::Truncate),
                columns: None,
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        assert!(serialized.contains("profile = \"prod\""));
        assert!(serialized.contains("style = \"plain\""));
        assert!(serialized.contains("overflow = \"truncate\""));

        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_explicit_values_win() {
        let config = Config {
            profile: Some("file-profile".to_string()),
            region: Some("us-east-1".to_string()),
            ..Default::default()
        };

        assert_eq!(
            config.resolve_profile(Some("flag-profile")).as_deref(),
            Some("flag-profile")
        );
        assert_eq!(config.resolve_profile(None).as_deref(), Some("file-profile"));
        assert_eq!(config.resolve_region(None).as_deref(), Some("us-east-1"));
        assert_eq!(
            config.resolve_region(Some("ap-south-1")).as_deref(),
            Some("ap-south-1")
        );
    }

    #[test]
    fn test_empty_values_resolve_to_none() {
        let config = Config {
            profile: Some(String::new()),
            ..Default::default()
        };
        assert!(config.resolve_profile(None).is_none());
        assert!(config.resolve_region(Some("")).is_none());
    }

    #[test]
    fn test_zero_width_rejected() {
        let config: Config = toml::from_str("[table]\nmax_column_width = 0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("table.max_column_width"));
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_expansion() {
        unsafe {
            std::env::set_var("ASC_TEST_REGION", "eu-central-1");
            std::env::remove_var("ASC_TEST_UNSET_PROFILE");
        }

        let content = r#"
profile = "${ASC_TEST_UNSET_PROFILE:-default}"
region = "${ASC_TEST_REGION}"
"#;

        let expanded = Config::expand_env_vars(content);
        assert!(expanded.contains("profile = \"default\""));
        assert!(expanded.contains("region = \"eu-central-1\""));

        unsafe {
            std::env::remove_var("ASC_TEST_REGION");
        }
    }
}
