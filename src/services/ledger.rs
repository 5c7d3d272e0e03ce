//! Sealing and opening ledgers
//!
//! The encrypt-side contract used by front-ends: plaintext payload plus
//! password and method in, envelope out; envelope plus password and method
//! in, payload out. Errors here are detailed because the caller is the
//! ledger's owner, not an untrusted party probing for an oracle.

use tracing::{debug, info};

use crate::crypto::{decrypt_string, derive_default, encrypt_string, DerivationMethod};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{iso_date, Envelope, Payload};

/// Seal a payload into a new envelope.
///
/// The payload's missing `name` and `date` are filled in from the envelope so
/// the decrypted content is self-describing.
pub fn seal(payload: &Payload, password: &str, method: DerivationMethod) -> LedgerResult<Envelope> {
    payload.validate()?;

    let sealed_at = iso_date::now();
    let mut content = payload.clone();
    if content.date.is_none() {
        content.date = Some(sealed_at);
    }

    let plaintext = content.to_json()?;
    let key = derive_default(password, method);
    let value = encrypt_string(&plaintext, &key)?;

    info!(
        method = %method,
        words = content.words.len(),
        "sealed ledger"
    );

    Ok(Envelope::with_date(content.name, sealed_at, value))
}

/// Seal a ledger given as JSON text.
///
/// The text must parse as a [`Payload`] and pass the same validation as
/// [`seal`], so everything sealed here can be read back by [`open`]. It is
/// then encrypted exactly as given.
pub fn seal_json(
    plaintext: &str,
    name: Option<String>,
    password: &str,
    method: DerivationMethod,
) -> LedgerResult<Envelope> {
    let payload = Payload::from_json(plaintext)
        .map_err(|e| LedgerError::Validation(format!("not a ledger payload: {}", e)))?;
    payload.validate()?;

    let key = derive_default(password, method);
    let ciphertext = encrypt_string(plaintext, &key)?;
    debug!(method = %method, bytes = plaintext.len(), "sealed raw JSON");

    Ok(Envelope::new(name, ciphertext))
}

/// Open an envelope, returning the payload.
///
/// Fails with `Encryption` when the cipher rejects the key or data and with
/// `Json` when the plaintext is not a ledger payload.
pub fn open(envelope: &Envelope, password: &str, method: DerivationMethod) -> LedgerResult<Payload> {
    let key = derive_default(password, method);
    let plaintext = decrypt_string(&envelope.value, &key)?;
    let payload = Payload::from_json(&plaintext)?;

    debug!(method = %method, words = payload.words.len(), "opened ledger");
    Ok(payload)
}

/// Parse a serialized envelope and open it
pub fn open_json(text: &str, password: &str, method: DerivationMethod) -> LedgerResult<Payload> {
    let envelope = Envelope::from_json(text)?;
    open(&envelope, password, method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn apple_payload(method: DerivationMethod) -> Payload {
        let words = BTreeMap::from([("a".to_string(), "apple".to_string())]);
        Payload::new(words, method).with_name("ledger")
    }

    #[test]
    fn test_round_trip_both_methods() {
        for method in [DerivationMethod::Simple, DerivationMethod::Complex] {
            let payload = apple_payload(method);
            let envelope = seal(&payload, "hunter2", method).unwrap();
            let opened = open(&envelope, "hunter2", method).unwrap();

            assert_eq!(opened.words, payload.words);
            assert_eq!(opened.settings, payload.settings);
            assert_eq!(opened.name.as_deref(), Some("ledger"));
            assert_eq!(opened.date, Some(envelope.date));
        }
    }

    #[test]
    fn test_wrong_password_fails() {
        let envelope = seal(&apple_payload(DerivationMethod::Simple), "hunter2", DerivationMethod::Simple)
            .unwrap();
        match open(&envelope, "hunter3", DerivationMethod::Simple) {
            Err(_) => {}
            Ok(payload) => assert_ne!(payload.words, apple_payload(DerivationMethod::Simple).words),
        }
    }

    #[test]
    fn test_wrong_method_fails() {
        let envelope = seal(
            &apple_payload(DerivationMethod::Complex),
            "hunter2",
            DerivationMethod::Complex,
        )
        .unwrap();
        assert!(open(&envelope, "hunter2", DerivationMethod::Simple)
            .map(|p| p.words != apple_payload(DerivationMethod::Complex).words)
            .unwrap_or(true));
    }

    #[test]
    fn test_seal_rejects_invalid_payload() {
        let payload = Payload::new(BTreeMap::new(), DerivationMethod::Simple);
        assert!(matches!(
            seal(&payload, "hunter2", DerivationMethod::Simple),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn test_seal_json_contract() {
        let plaintext = r#"{"words":{"a":"apple"}}"#;
        let envelope = seal_json(plaintext, Some("ledger".into()), "hunter2", DerivationMethod::Simple)
            .unwrap();

        let serialized = envelope.to_json().unwrap();
        let payload = open_json(&serialized, "hunter2", DerivationMethod::Simple).unwrap();
        assert_eq!(payload.words.get("a").map(String::as_str), Some("apple"));
        assert!(payload.settings.is_none());
    }

    #[test]
    fn test_seal_json_rejects_non_objects() {
        assert!(seal_json("[1,2,3]", None, "pw", DerivationMethod::Simple).is_err());
        assert!(seal_json("not json", None, "pw", DerivationMethod::Simple).is_err());
    }

    #[test]
    fn test_seal_json_rejects_what_open_cannot_read() {
        for plaintext in [
            r#"{"words":{"pin":1234}}"#,
            r#"{"words":{"a":"apple"},"date":"not a date"}"#,
            r#"{"words":{"a":"apple"},"settings":{"numberOfWords":"1","encryptionMethod":"simple"}}"#,
            r#"{"words":{}}"#,
            r#"{"note":"no words at all"}"#,
        ] {
            let result = seal_json(plaintext, None, "hunter2", DerivationMethod::Simple);
            assert!(
                matches!(result, Err(LedgerError::Validation(_))),
                "{} should be rejected",
                plaintext
            );
        }
    }

    #[test]
    fn test_seal_json_keeps_extra_fields() {
        let plaintext = r#"{"words":{"a":"apple"},"note":"keep offline"}"#;
        let envelope = seal_json(plaintext, None, "hunter2", DerivationMethod::Complex).unwrap();

        let payload = open(&envelope, "hunter2", DerivationMethod::Complex).unwrap();
        assert_eq!(payload.extra.get("note"), Some(&serde_json::json!("keep offline")));
    }

    #[test]
    fn test_open_json_reports_format_errors() {
        let result = open_json(r#"{"value":"abc"}"#, "hunter2", DerivationMethod::Simple);
        assert!(matches!(result, Err(LedgerError::Format(_))));
    }
}
