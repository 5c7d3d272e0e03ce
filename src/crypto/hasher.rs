//! MD5 hex digests
//!
//! Used only as a stretching primitive for complex key derivation and inside
//! the cipher's passphrase KDF. Not relied on for collision resistance.

use md5::{Digest, Md5};

/// Length of a hex digest produced by [`md5_hex`]
pub const HASH_HEX_LEN: usize = 32;

/// Lowercase hex MD5 of the UTF-8 bytes of `input`
pub fn md5_hex(input: impl AsRef<[u8]>) -> String {
    format!("{:x}", Md5::digest(input.as_ref()))
}

/// Raw MD5 of the concatenation of `parts`
pub(crate) fn md5_concat(parts: &[&[u8]]) -> [u8; 16] {
    let mut hasher = Md5::new();
    for part in parts {
        hasher.update(part);
    }
    let mut digest = [0u8; 16];
    digest.copy_from_slice(&hasher.finalize());
    digest
}
