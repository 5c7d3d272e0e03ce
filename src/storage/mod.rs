//! Storage layer for ledger-lock
//!
//! JSON and text files with atomic writes and automatic directory creation.

pub mod file_io;

pub use file_io::{read_json, read_json_required, write_json_atomic, write_text_atomic};
