//! Passphrase-based AES-256-CBC
//!
//! Produces the same format as `openssl enc -aes-256-cbc -md md5 -base64`
//! and CryptoJS `AES.encrypt(text, passphrase)`:
//!
//! ```text
//! base64( "Salted__" || salt[8] || AES-256-CBC-PKCS7(key, iv, plaintext) )
//! ```
//!
//! `key || iv` is the first 48 bytes of OpenSSL's `EVP_BytesToKey` with MD5
//! and a single iteration over `passphrase || salt`. A fresh salt is drawn for
//! every call. This format must not change: envelopes written by earlier
//! versions have to stay decryptable.
//!
//! There is no authentication tag. A wrong key is usually caught by the
//! padding check, but not always; callers treat plaintext that fails to parse
//! the same as a wrong key.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD, Engine};
use zeroize::Zeroizing;

use super::hasher::md5_concat;
use super::DerivedKey;
use crate::error::{LedgerError, LedgerResult};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Magic prefix of the salted format
const SALT_MAGIC: &[u8; 8] = b"Salted__";

/// Salt size in bytes
pub const SALT_SIZE: usize = 8;

/// AES-256 key size in bytes
const KEY_SIZE: usize = 32;

/// CBC IV size in bytes (one AES block)
const IV_SIZE: usize = 16;

/// Header length: magic plus salt
const HEADER_SIZE: usize = SALT_MAGIC.len() + SALT_SIZE;

/// Key and IV derived from a passphrase and salt
struct KeyIv {
    key: Zeroizing<[u8; KEY_SIZE]>,
    iv: Zeroizing<[u8; IV_SIZE]>,
}

/// OpenSSL `EVP_BytesToKey` with MD5, one round
fn evp_bytes_to_key(passphrase: &[u8], salt: &[u8; SALT_SIZE]) -> KeyIv {
    let mut material = Zeroizing::new([0u8; KEY_SIZE + IV_SIZE]);
    let mut block: Zeroizing<[u8; 16]> = Zeroizing::new([0u8; 16]);
    let mut filled = 0;

    while filled < material.len() {
        *block = if filled == 0 {
            md5_concat(&[passphrase, &salt[..]])
        } else {
            md5_concat(&[&block[..], passphrase, &salt[..]])
        };
        let take = (material.len() - filled).min(block.len());
        material[filled..filled + take].copy_from_slice(&block[..take]);
        filled += take;
    }

    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    let mut iv = Zeroizing::new([0u8; IV_SIZE]);
    key.copy_from_slice(&material[..KEY_SIZE]);
    iv.copy_from_slice(&material[KEY_SIZE..]);
    KeyIv { key, iv }
}

fn random_salt() -> LedgerResult<[u8; SALT_SIZE]> {
    let mut salt = [0u8; SALT_SIZE];
    getrandom::getrandom(&mut salt)
        .map_err(|e| LedgerError::Encryption(format!("Failed to generate salt: {}", e)))?;
    Ok(salt)
}

/// Encrypt with an explicit salt
fn encrypt_with_salt(plaintext: &[u8], key: &DerivedKey, salt: [u8; SALT_SIZE]) -> String {
    let KeyIv { key: aes_key, iv } = evp_bytes_to_key(key.as_bytes(), &salt);

    let ciphertext = Aes256CbcEnc::new(&(*aes_key).into(), &(*iv).into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut out = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
    out.extend_from_slice(SALT_MAGIC);
    out.extend_from_slice(&salt);
    out.extend_from_slice(&ciphertext);
    STANDARD.encode(out)
}

/// Encrypt raw bytes under passphrase key material
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> LedgerResult<String> {
    let salt = random_salt()?;
    Ok(encrypt_with_salt(plaintext, key, salt))
}

/// Decrypt a salted base64 string back to raw bytes
pub fn decrypt(ciphertext: &str, key: &DerivedKey) -> LedgerResult<Vec<u8>> {
    let raw = STANDARD
        .decode(ciphertext.trim())
        .map_err(|e| LedgerError::Encryption(format!("Invalid ciphertext encoding: {}", e)))?;

    if raw.len() < HEADER_SIZE || &raw[..SALT_MAGIC.len()] != SALT_MAGIC {
        return Err(LedgerError::Encryption(
            "Ciphertext is missing the salt header".to_string(),
        ));
    }

    let body = &raw[HEADER_SIZE..];
    if body.is_empty() || body.len() % IV_SIZE != 0 {
        return Err(LedgerError::Encryption(format!(
            "Invalid ciphertext length: {} bytes",
            body.len()
        )));
    }

    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(&raw[SALT_MAGIC.len()..HEADER_SIZE]);
    let KeyIv { key: aes_key, iv } = evp_bytes_to_key(key.as_bytes(), &salt);

    Aes256CbcDec::new(&(*aes_key).into(), &(*iv).into())
        .decrypt_padded_vec_mut::<Pkcs7>(body)
        .map_err(|_| {
            LedgerError::Encryption("Decryption failed: invalid key or corrupted data".to_string())
        })
}

/// Encrypt a string
pub fn encrypt_string(plaintext: &str, key: &DerivedKey) -> LedgerResult<String> {
    encrypt(plaintext.as_bytes(), key)
}

/// Decrypt to a string
pub fn decrypt_string(ciphertext: &str, key: &DerivedKey) -> LedgerResult<String> {
    let plaintext = decrypt(ciphertext, key)?;
    String::from_utf8(plaintext)
        .map_err(|e| LedgerError::Encryption(format!("Invalid UTF-8 in decrypted data: {}", e)))
}
