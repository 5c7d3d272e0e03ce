//! Cryptographic functions for ledger-lock
//!
//! MD5 hashing, password-to-key derivation (simple or complex) and an
//! OpenSSL-compatible passphrase AES-256-CBC cipher.

pub mod cipher;
pub mod hasher;
pub mod key_derivation;
pub mod secure_memory;

pub use cipher::{decrypt, decrypt_string, encrypt, encrypt_string};
pub use hasher::{md5_hex, HASH_HEX_LEN};
pub use key_derivation::{
    complex_key_len, derive_default, derive_key, DerivationMethod, DerivedKey, COMPLEX_KEY,
};
pub use secure_memory::SecureString;
