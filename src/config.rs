//! Calendar presentation settings loaded from TOML.
//!
//! ```toml
//! locale = "es"
//! week_start = "monday"
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Locale, WeekStart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    pub locale:     Locale,
    pub week_start: WeekStart,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid calendar config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl CalendarConfig {
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or parsed.
    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(
            locale = %config.locale,
            week_start = %config.week_start,
            "loaded calendar config"
        );
        Ok(config)
    }

    #[must_use]
    pub const fn with_overrides(mut self, locale: Option<Locale>, week_start: Option<WeekStart>) -> Self {
        if let Some(locale) = locale {
            self.locale = locale;
        }
        if let Some(week_start) = week_start {
            self.week_start = week_start;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CalendarConfig::from_toml_str("").unwrap();
        assert_eq!(config.locale, Locale::Spanish);
        assert_eq!(config.week_start, WeekStart::Sunday);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = CalendarConfig::from_toml_str("locale = \"en\"\nweek_start = \"monday\"\n").unwrap();
        assert_eq!(
            config,
            CalendarConfig {
                locale:     Locale::English,
                week_start: WeekStart::Monday,
            }
        );
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(matches!(
            CalendarConfig::from_toml_str("locale = \"fr\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(CalendarConfig::from_toml_str("week_start = \"friday\"").is_err());
        assert!(CalendarConfig::from_toml_str("weekstart = \"monday\"").is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "week_start = \"monday\"").unwrap();
        let config = CalendarConfig::load(file.path()).unwrap();
        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.locale, Locale::Spanish);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CalendarConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_overrides() {
        let config = CalendarConfig::default().with_overrides(Some(Locale::English), None);
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.week_start, WeekStart::Sunday);
    }
}
