//! User settings for ledger-lock
//!
//! Defaults used when sealing a new ledger. None of these are needed to open
//! an envelope: the method always has to be supplied again by the user.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::crypto::DerivationMethod;
use crate::error::LedgerError;
use crate::storage::{read_json_required, write_json_atomic};

/// How the user double-checks words after generating them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VerifyWords {
    /// No verification step
    #[default]
    Off,
    /// Retype every word
    Retype,
    /// Confirm each word
    Confirm,
}

/// User settings for ledger-lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Method used by `encrypt` when none is given
    #[serde(default)]
    pub default_method: DerivationMethod,

    /// Number of words a generated ledger holds
    #[serde(default = "default_number_of_words")]
    pub number_of_words: usize,

    /// Verification mode recorded for front-ends
    #[serde(default)]
    pub verify_words: VerifyWords,

    /// Envelope name used by `encrypt` when none is given
    #[serde(default = "default_name")]
    pub default_name: String,

    /// Where `encrypt` writes envelopes when no output path is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_number_of_words() -> usize {
    12
}

fn default_name() -> String {
    "ledger".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_method: DerivationMethod::default(),
            number_of_words: default_number_of_words(),
            verify_words: VerifyWords::default(),
            default_name: default_name(),
            output_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let settings: Settings = read_json_required(&settings_path).map_err(|e| {
            LedgerError::Config(format!("Failed to load settings file: {}", e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        self.validate()?;
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Check values are usable
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.number_of_words == 0 {
            return Err(LedgerError::Config(
                "number_of_words must be at least 1".to_string(),
            ));
        }
        if self.default_name.trim().is_empty() {
            return Err(LedgerError::Config("default_name cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Output path for an envelope named `name`
    pub fn envelope_path(&self, paths: &LedgerPaths, name: &str) -> PathBuf {
        let dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| paths.envelopes_dir());
        dir.join(format!("{}.json", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_method, DerivationMethod::Simple);
        assert_eq!(settings.number_of_words, 12);
        assert_eq!(settings.verify_words, VerifyWords::Off);
        assert_eq!(settings.default_name, "ledger");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            default_method: DerivationMethod::Complex,
            number_of_words: 3,
            verify_words: VerifyWords::Retype,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"default_method":"complex"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_method, DerivationMethod::Complex);
        assert_eq!(loaded.number_of_words, 12);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"number_of_words":0}"#).unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(LedgerError::Config(_))
        ));
    }

    #[test]
    fn test_envelope_path() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        assert_eq!(
            settings.envelope_path(&paths, "ledger"),
            paths.envelopes_dir().join("ledger.json")
        );

        settings.output_dir = Some(temp_dir.path().join("out"));
        assert_eq!(
            settings.envelope_path(&paths, "vault"),
            temp_dir.path().join("out").join("vault.json")
        );
    }
}
