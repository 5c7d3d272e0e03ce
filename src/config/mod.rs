//! Configuration module for ledger-lock
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Logging setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{Settings, VerifyWords};
