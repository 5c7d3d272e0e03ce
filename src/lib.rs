//! ledger-lock - password-locked word ledgers
//!
//! A ledger is a small JSON document of labelled secret words. This crate
//! seals one into an [`Envelope`](models::Envelope) under a password and
//! opens it again, either through the sealing service or through the
//! standalone [`Decryptor`](decryptor::Decryptor) that needs nothing but the
//! envelope, the password and the derivation method.
//!
//! # Architecture
//!
//! - `crypto`: MD5 hasher, simple/complex key derivation, passphrase AES
//! - `models`: envelope and payload types and their JSON forms
//! - `services`: seal and open, the contract front-ends call
//! - `decryptor`: the standalone decrypt state machine
//! - `display`: terminal rendering of decrypted ledgers
//! - `export`: embedding envelopes into decryptor artifacts
//! - `config`: paths, settings, logging
//! - `storage`: atomic file writes
//! - `cli`: command handlers for the `ledger-lock` binary
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use ledger_lock::crypto::DerivationMethod;
//! use ledger_lock::decryptor::Decryptor;
//! use ledger_lock::models::Payload;
//! use ledger_lock::services::seal;
//!
//! let words = BTreeMap::from([("a".to_string(), "apple".to_string())]);
//! let payload = Payload::new(words, DerivationMethod::Complex);
//! let envelope = seal(&payload, "hunter2", DerivationMethod::Complex)?;
//!
//! let mut decryptor = Decryptor::new(envelope);
//! let opened = decryptor.run_batch(Some("complex"), Some("hunter2"))?;
//! let words = opened.payload().map(|p| p.words["a"].as_str());
//! assert_eq!(words, Some("apple"));
//! # Ok::<(), ledger_lock::LedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod decryptor;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
