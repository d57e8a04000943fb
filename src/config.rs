use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Listing presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Heading prefix shown before the directory path
    #[serde(default = "default_title")]
    pub title: String,

    /// URL prefix under which listing icons are looked up
    #[serde(default = "default_icon_prefix")]
    pub icon_prefix: String,

    /// strftime pattern for modification times
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_title() -> String {
    "Index of".to_string()
}

fn default_icon_prefix() -> String {
    "/static/icons".to_string()
}

fn default_time_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: default_title(),
            icon_prefix: default_icon_prefix(),
            time_format: default_time_format(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail once a listing is rendered.
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(format!("Invalid time_format: {:?}", self.time_format).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dirserve.toml");
        std::fs::write(&path, "time_format = \"%d/%m/%Y\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.time_format, "%d/%m/%Y");
        assert_eq!(config.title, "Index of");
        assert_eq!(config.icon_prefix, "/static/icons");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dirserve.toml");
        std::fs::write(&path, "title = [").unwrap();

        assert!(Config::from_file(&path).is_err());
        assert!(Config::from_file(&temp.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_invalid_time_format_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dirserve.toml");
        std::fs::write(&path, "time_format = \"%Q\"\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("time_format"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }
}
