//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod decrypt;
pub mod encrypt;
pub mod envelope;

pub use decrypt::{decrypt_error_line, handle_decrypt_command, DecryptArgs, DECRYPT_USAGE};
pub use encrypt::{handle_encrypt_command, EncryptArgs};
pub use envelope::{
    handle_config_command, handle_embed_command, handle_inspect_command, ConfigArgs, EmbedArgs,
};
