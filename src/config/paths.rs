//! Path management for ledger-lock
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGER_LOCK_HOME` environment variable (if set)
//! 2. Linux: `$XDG_CONFIG_HOME/ledger-lock` or `~/.config/ledger-lock`
//! 3. macOS: `~/Library/Application Support/ledger-lock`
//! 4. Windows: `%APPDATA%\ledger-lock`

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::LedgerError;

/// Environment variable overriding the base directory
pub const HOME_ENV: &str = "LEDGER_LOCK_HOME";

/// Directory name under the platform config directory
const APP_DIR: &str = "ledger-lock";

/// Manages all paths used by ledger-lock
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = match std::env::var_os(HOME_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default directory for sealed envelopes
    pub fn envelopes_dir(&self) -> PathBuf {
        self.base_dir.join("envelopes")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default base directory based on platform
fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| LedgerError::Config("Could not determine home directory".into()))?;

    Ok(dirs.config_dir().join(APP_DIR))
}
