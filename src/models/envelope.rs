//! Envelope model
//!
//! The transportable container for one sealed ledger: an optional name, the
//! creation timestamp and the cipher output. This is what gets written to
//! disk, embedded into a standalone decryptor or shared.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::iso_date;
use crate::error::{LedgerError, LedgerResult};

/// A sealed ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Short identifier such as "ledger"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// When the envelope was sealed
    #[serde(with = "iso_date")]
    pub date: DateTime<Utc>,

    /// Cipher output; opaque outside the cipher
    pub value: String,
}

impl Envelope {
    /// Wrap freshly produced ciphertext, stamped with the current time
    pub fn new(name: Option<String>, value: impl Into<String>) -> Self {
        Self::with_date(name, iso_date::now(), value)
    }

    /// Wrap ciphertext with an explicit timestamp
    pub fn with_date(name: Option<String>, date: DateTime<Utc>, value: impl Into<String>) -> Self {
        Self {
            name,
            date,
            value: value.into(),
        }
    }

    /// Display name, falling back to "ledger"
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("ledger")
    }

    /// Compact JSON form, suitable for embedding
    pub fn to_json(&self) -> LedgerResult<String> {
        serde_json::to_string(self)
            .map_err(|e| LedgerError::Format(format!("Failed to serialize envelope: {}", e)))
    }

    /// Pretty JSON form, suitable for files
    pub fn to_json_pretty(&self) -> LedgerResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Format(format!("Failed to serialize envelope: {}", e)))
    }

    /// Parse an envelope from its JSON form
    pub fn from_json(text: &str) -> LedgerResult<Self> {
        let envelope: Envelope = serde_json::from_str(text)
            .map_err(|e| LedgerError::Format(format!("Invalid envelope: {}", e)))?;

        if envelope.value.trim().is_empty() {
            return Err(LedgerError::Format(
                "Invalid envelope: empty value".to_string(),
            ));
        }

        Ok(envelope)
    }

    /// Read an envelope from a JSON file
    pub fn load(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            LedgerError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Write the envelope to a JSON file atomically
    pub fn save(&self, path: impl AsRef<Path>) -> LedgerResult<()> {
        crate::storage::write_json_atomic(path, self)
    }
}
