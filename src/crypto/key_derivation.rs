//! Password to key-material derivation
//!
//! Two methods exist. `simple` hands the password to the cipher unchanged,
//! which leaves all stretching to the cipher's own passphrase KDF and is the
//! weakest option. `complex` expands the password into one MD5 digest per
//! character, each digest taken over the password followed by its own prefix,
//! and glues the digests together with [`COMPLEX_KEY`] repeated once per
//! character. The result is much longer than the password and grows
//! quadratically with it.
//!
//! The derived string is passphrase material for
//! [`encrypt_string`](super::cipher::encrypt_string), not a raw AES key.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::hasher::{md5_hex, HASH_HEX_LEN};
use crate::error::LedgerError;

/// Separator constant for complex derivation.
///
/// Public and versioned: changing it makes every complex envelope produced
/// so far undecryptable.
pub const COMPLEX_KEY: &str = "|!@#$%^&*(MPPE)|";

/// How a password is turned into cipher key material
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DerivationMethod {
    /// Password used verbatim
    #[default]
    Simple,
    /// Stretched per-prefix MD5 expansion of the password
    Complex,
}

impl DerivationMethod {
    /// The method's wire and CLI name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for DerivationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DerivationMethod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "complex" => Ok(Self::Complex),
            "" => Err(LedgerError::missing("method")),
            other => Err(LedgerError::InvalidArguments(format!(
                "unknown method '{}', expected 'simple' or 'complex'",
                other
            ))),
        }
    }
}

/// Key material handed to the cipher
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    material: String,
}

impl DerivedKey {
    fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
        }
    }

    /// Get the key material
    pub fn as_str(&self) -> &str {
        &self.material
    }

    /// Get the key material bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.material.as_bytes()
    }

    /// Length of the key material in bytes
    pub fn len(&self) -> usize {
        self.material.len()
    }

    /// Check if the key material is empty
    pub fn is_empty(&self) -> bool {
        self.material.is_empty()
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("len", &self.material.len())
            .finish()
    }
}

/// Derive cipher key material from a password
pub fn derive_key(password: &str, method: DerivationMethod, complex_key: &str) -> DerivedKey {
    match method {
        DerivationMethod::Simple => DerivedKey::new(password),
        DerivationMethod::Complex => DerivedKey::new(complex_material(password, complex_key)),
    }
}

/// Derive cipher key material using the built-in [`COMPLEX_KEY`]
pub fn derive_default(password: &str, method: DerivationMethod) -> DerivedKey {
    derive_key(password, method, COMPLEX_KEY)
}

/// Expected byte length of complex key material.
///
/// `password_len` counts UTF-16 code units, `complex_key_len` counts bytes.
pub fn complex_key_len(password_len: usize, complex_key_len: usize) -> usize {
    if password_len == 0 {
        return 0;
    }
    password_len * HASH_HEX_LEN + (password_len - 1) * password_len * complex_key_len
}

// Prefixes are cut on UTF-16 code units so that passwords containing
// non-ASCII characters hash the same prefixes as the browser front-end.
fn complex_material(password: &str, complex_key: &str) -> String {
    let units: Zeroizing<Vec<u16>> = Zeroizing::new(password.encode_utf16().collect());
    let glue = complex_key.repeat(units.len());

    let digests: Vec<String> = (0..units.len())
        .map(|i| {
            let mut input = Zeroizing::new(String::with_capacity(password.len() * 2));
            input.push_str(password);
            input.push_str(&String::from_utf16_lossy(&units[..i]));
            md5_hex(input.as_bytes())
        })
        .collect();

    digests.join(&glue)
}
