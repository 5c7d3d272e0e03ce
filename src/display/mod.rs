//! Display formatting for terminal output
//!
//! Provides utilities for formatting decrypted ledgers and envelope
//! metadata for the terminal.

pub mod payload;

pub use payload::{
    format_decrypted, format_display_date, format_envelope_details, format_payload,
    format_words_table,
};
