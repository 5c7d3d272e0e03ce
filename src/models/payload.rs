//! Payload model
//!
//! The plaintext sealed inside an envelope: a map of labelled secret words
//! plus a snapshot of the settings that produced them. Opening an envelope
//! yields [`Decrypted`], which keeps the plaintext JSON even when it is not
//! shaped like a [`Payload`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::iso_date;
use crate::crypto::DerivationMethod;
use crate::error::{LedgerError, LedgerResult};

/// Generation settings recorded alongside the words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadSettings {
    /// How many words were generated
    pub number_of_words: usize,

    /// Derivation method the payload was sealed with
    pub encryption_method: DerivationMethod,
}

/// Decrypted ledger content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Payload {
    /// Copy of the envelope name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Copy of the envelope date
    #[serde(
        default,
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,

    /// Settings snapshot; informational only, never used to derive a key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<PayloadSettings>,

    /// Label to word
    #[serde(default)]
    pub words: BTreeMap<String, String>,

    /// Any other fields present in the plaintext
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Payload {
    /// Create a payload from words, recording the method it will be sealed with
    pub fn new(words: BTreeMap<String, String>, method: DerivationMethod) -> Self {
        let settings = PayloadSettings {
            number_of_words: words.len(),
            encryption_method: method,
        };
        Self {
            settings: Some(settings),
            words,
            ..Default::default()
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Add or replace a word
    pub fn insert_word(&mut self, label: impl Into<String>, word: impl Into<String>) {
        self.words.insert(label.into(), word.into());
        if let Some(settings) = self.settings.as_mut() {
            settings.number_of_words = self.words.len();
        }
    }

    /// Check the payload is fit to be sealed
    pub fn validate(&self) -> LedgerResult<()> {
        if self.words.is_empty() {
            return Err(LedgerError::Validation(
                "a ledger needs at least one word".to_string(),
            ));
        }

        for (label, word) in &self.words {
            if label.trim().is_empty() {
                return Err(LedgerError::Validation("word labels cannot be empty".to_string()));
            }
            if word.trim().is_empty() {
                return Err(LedgerError::Validation(format!(
                    "word for '{}' cannot be empty",
                    label
                )));
            }
        }

        if let Some(settings) = &self.settings {
            if settings.number_of_words != self.words.len() {
                return Err(LedgerError::Validation(format!(
                    "settings record {} words but the ledger has {}",
                    settings.number_of_words,
                    self.words.len()
                )));
            }
        }

        Ok(())
    }

    /// Parse a payload from decrypted plaintext
    pub fn from_json(text: &str) -> LedgerResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to the plaintext form that gets encrypted
    pub fn to_json(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Plaintext recovered from an envelope
#[derive(Debug, Clone, PartialEq)]
pub struct Decrypted {
    raw: serde_json::Value,
    payload: Option<Payload>,
}

impl Decrypted {
    /// Parse decrypted plaintext. Any valid JSON is accepted; the typed
    /// payload is only present when the JSON has the ledger shape.
    pub fn from_json(text: &str) -> LedgerResult<Self> {
        let raw: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::from_value(raw))
    }

    /// Wrap an already parsed JSON value
    pub fn from_value(raw: serde_json::Value) -> Self {
        let payload = if raw.is_object() {
            serde_json::from_value(raw.clone()).ok()
        } else {
            None
        };
        Self { raw, payload }
    }

    /// The plaintext exactly as it was sealed
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// The ledger view, if the plaintext has that shape
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<Payload> {
        self.payload
    }
}

/// Parse `label=word` pairs, as given on the command line
pub fn parse_word_pairs<I, S>(pairs: I) -> LedgerResult<BTreeMap<String, String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut words = BTreeMap::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (label, word) = pair.split_once('=').ok_or_else(|| {
            LedgerError::Validation(format!("expected label=word, got '{}'", pair))
        })?;
        let label = label.trim();
        if words.insert(label.to_string(), word.trim().to_string()).is_some() {
            return Err(LedgerError::Validation(format!("duplicate label '{}'", label)));
        }
    }
    Ok(words)
}
