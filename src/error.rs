//! Custom error types for ledger-lock
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The only message shown to users of the decrypt path, whatever went wrong
pub const DECRYPT_FAILURE_MESSAGE: &str = "Cannot decrypt data using the provided password!";

/// The main error type for ledger-lock operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Method or password missing or unusable; raised before any crypto work
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Wrong password, wrong method, corrupted ciphertext or unparseable plaintext
    #[error("{}", DECRYPT_FAILURE_MESSAGE)]
    DecryptionFailure,

    /// Envelope fields missing or malformed
    #[error("Format error: {0}")]
    Format(String),

    /// Cipher-level errors
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Validation errors for payloads
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Artifact export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create an invalid-arguments error for a missing value
    pub fn missing(what: &str) -> Self {
        Self::InvalidArguments(format!("missing {}", what))
    }

    /// Check if this is an invalid-arguments error
    pub fn is_invalid_arguments(&self) -> bool {
        matches!(self, Self::InvalidArguments(_))
    }

    /// Check if this is the generic decryption failure
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, Self::DecryptionFailure)
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger-lock operations
pub type LedgerResult<T> = Result<T, LedgerError>;
