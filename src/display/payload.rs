//! Payload display formatting
//!
//! Renders a decrypted ledger for the terminal: metadata first, then the
//! words as a labelled table, then anything else the plaintext carried.

use chrono::{DateTime, Local, TimeZone, Utc};
use tabled::{settings::Style, Table, Tabled};

use crate::models::{Decrypted, Envelope, Payload};

/// One row of the words table
#[derive(Tabled)]
struct WordRow<'a> {
    #[tabled(rename = "Label")]
    label: &'a str,
    #[tabled(rename = "Word")]
    word: &'a str,
}

/// Human-friendly date in the given timezone, e.g. `Fri Aug 12 2022 - 10:34:31 PM`
pub fn format_display_date_in<Tz>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz)
        .format("%a %b %d %Y - %-I:%M:%S %p")
        .to_string()
}

/// Human-friendly date in the local timezone
pub fn format_display_date(date: &DateTime<Utc>) -> String {
    format_display_date_in(date, &Local)
}

/// Format the words as a table
pub fn format_words_table(payload: &Payload) -> String {
    if payload.words.is_empty() {
        return "No words found.".to_string();
    }

    let rows = payload.words.iter().map(|(label, word)| WordRow {
        label: label.as_str(),
        word: word.as_str(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a decrypted payload
pub fn format_payload(payload: &Payload) -> String {
    let mut output = String::new();

    if let Some(name) = &payload.name {
        output.push_str(&format!("Name:    {}\n", name));
    }
    if let Some(date) = &payload.date {
        output.push_str(&format!("Date:    {}\n", format_display_date(date)));
    }
    if let Some(settings) = &payload.settings {
        output.push_str(&format!("Method:  {}\n", settings.encryption_method));
        output.push_str(&format!("Words:   {}\n", settings.number_of_words));
    }

    for (key, value) in &payload.extra {
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        output.push_str(&format!("{}: {}\n", key, rendered));
    }

    if !output.is_empty() {
        output.push('\n');
    }
    output.push_str(&format_words_table(payload));
    output
}

/// Format whatever an envelope decrypted to. Plaintext without the ledger
/// shape is shown as indented JSON.
pub fn format_decrypted(decrypted: &Decrypted) -> String {
    match decrypted.payload() {
        Some(payload) => format_payload(payload),
        None => format!("{:#}", decrypted.raw()),
    }
}

/// Format envelope metadata without decrypting it
pub fn format_envelope_details(envelope: &Envelope) -> String {
    let mut output = String::new();
    output.push_str(&format!("Name:       {}\n", envelope.display_name()));
    output.push_str(&format!("Sealed:     {}\n", format_display_date(&envelope.date)));
    output.push_str(&format!("Ciphertext: {} chars\n", envelope.value.len()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DerivationMethod;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn sample_payload() -> Payload {
        let words = BTreeMap::from([
            ("first".to_string(), "correct".to_string()),
            ("second".to_string(), "horse".to_string()),
        ]);
        Payload::new(words, DerivationMethod::Complex).with_name("ledger")
    }

    #[test]
    fn test_display_date_format() {
        let date = Utc.with_ymd_and_hms(2022, 8, 12, 22, 34, 31).unwrap();
        assert_eq!(
            format_display_date_in(&date, &Utc),
            "Fri Aug 12 2022 - 10:34:31 PM"
        );
    }

    #[test]
    fn test_display_date_morning() {
        let date = Utc.with_ymd_and_hms(2023, 1, 2, 9, 5, 7).unwrap();
        assert_eq!(
            format_display_date_in(&date, &Utc),
            "Mon Jan 02 2023 - 9:05:07 AM"
        );
    }

    #[test]
    fn test_words_table() {
        let table = format_words_table(&sample_payload());
        assert!(table.contains("Label"));
        assert!(table.contains("Word"));
        assert!(table.contains("correct"));
        assert!(table.contains("horse"));
    }

    #[test]
    fn test_empty_words() {
        let payload = Payload::default();
        assert_eq!(format_words_table(&payload), "No words found.");
    }

    #[test]
    fn test_format_payload_sections() {
        let mut payload = sample_payload();
        payload
            .extra
            .insert("note".to_string(), serde_json::json!("keep offline"));

        let output = format_payload(&payload);
        assert!(output.starts_with("Name:    ledger\n"));
        assert!(output.contains("Method:  complex"));
        assert!(output.contains("Words:   2"));
        assert!(output.contains("note: keep offline"));
        assert!(output.contains("horse"));
    }

    #[test]
    fn test_format_decrypted_falls_back_to_json() {
        let decrypted = Decrypted::from_json(r#"{"words":{"pin":1234}}"#).unwrap();
        let output = format_decrypted(&decrypted);
        assert!(output.contains("\"pin\": 1234"));

        let ledger = Decrypted::from_json(r#"{"words":{"a":"apple"}}"#).unwrap();
        assert!(format_decrypted(&ledger).contains("apple"));
        assert!(format_decrypted(&ledger).contains("Label"));
    }

    #[test]
    fn test_envelope_details_do_not_leak_value() {
        let envelope = Envelope::new(None, "U2FsdGVkX1secret");
        let details = format_envelope_details(&envelope);
        assert!(details.contains("Name:       ledger"));
        assert!(!details.contains("U2FsdGVkX1secret"));
    }
}
