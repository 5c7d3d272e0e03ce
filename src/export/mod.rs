//! Export functionality
//!
//! Embeds envelopes into standalone decryptor artifacts.

pub mod artifact;

pub use artifact::{
    embed_envelope, extract_envelope, inject_envelope, to_template, write_artifact,
    INJECTION_MARKER, PLACEHOLDER,
};
