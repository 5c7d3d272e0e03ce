//! Core data models for ledger-lock
//!
//! The sealed [`Envelope`] and the [`Payload`] it decrypts to.

pub mod envelope;
pub mod iso_date;
pub mod payload;

pub use envelope::Envelope;
pub use payload::{parse_word_pairs, Decrypted, Payload, PayloadSettings};
