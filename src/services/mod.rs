//! Business logic layer
//!
//! Sealing payloads into envelopes and opening them again.

pub mod ledger;

pub use ledger::{open, open_json, seal, seal_json};
