//! Keyboard settings
//!
//! Versioned JSON document with the tunables a host may want to persist.
//! Entered text is never part of it.

use keyboard_core::{Duration, VALIDATION_MESSAGE_TTL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Settings error
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to deserialize settings: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),

    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings result
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Persisted keyboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardSettings {
    /// Format version
    pub version: u32,
    #[serde(default)]
    pub header: String,
    #[serde(default = "default_minimum_length")]
    pub minimum_length: usize,
    /// Validation overlay lifetime; 0 keeps it until the next input
    #[serde(default = "default_overlay_timeout_ms")]
    pub overlay_timeout_ms: u64,
}

fn default_minimum_length() -> usize {
    keyboard_core::DEFAULT_MINIMUM_LENGTH
}

fn default_overlay_timeout_ms() -> u64 {
    VALIDATION_MESSAGE_TTL.as_millis()
}

impl KeyboardSettings {
    /// Current version of the settings format
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            header: String::new(),
            minimum_length: default_minimum_length(),
            overlay_timeout_ms: default_overlay_timeout_ms(),
        }
    }

    pub fn overlay_timeout(&self) -> Duration {
        Duration::from_millis(self.overlay_timeout_ms)
    }

    pub fn to_json(&self) -> SettingsResult<String> {
        serde_json::to_string_pretty(self).map_err(SettingsError::Serialize)
    }

    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let settings: Self = serde_json::from_str(json).map_err(SettingsError::Deserialize)?;

        if settings.version != Self::CURRENT_VERSION {
            return Err(SettingsError::UnsupportedVersion(settings.version));
        }

        Ok(settings)
    }

    /// Parses settings, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_default()
    }

    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> SettingsResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = KeyboardSettings::new();
        assert_eq!(settings.version, KeyboardSettings::CURRENT_VERSION);
        assert_eq!(settings.minimum_length, 1);
        assert_eq!(settings.overlay_timeout_ms, 4000);
        assert_eq!(settings.overlay_timeout(), VALIDATION_MESSAGE_TTL);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = KeyboardSettings {
            header: "Wi-Fi password".to_string(),
            minimum_length: 8,
            ..KeyboardSettings::new()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(KeyboardSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = KeyboardSettings::from_json(r#"{"version":1,"header":"Name"}"#).unwrap();
        assert_eq!(settings.header, "Name");
        assert_eq!(settings.minimum_length, 1);
        assert_eq!(settings.overlay_timeout_ms, 4000);
    }

    #[test]
    fn test_version_mismatch() {
        let err = KeyboardSettings::from_json(r#"{"version":2}"#).unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_corrupt_input_falls_back() {
        assert!(matches!(
            KeyboardSettings::from_json("{not json"),
            Err(SettingsError::Deserialize(_))
        ));
        assert_eq!(
            KeyboardSettings::from_json_or_default("{not json"),
            KeyboardSettings::new()
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keyboard.json");
        let settings = KeyboardSettings {
            overlay_timeout_ms: 0,
            ..KeyboardSettings::new()
        };
        settings.save(&path).unwrap();
        let loaded = KeyboardSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }
}
