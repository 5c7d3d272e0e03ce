//! Standalone decryptor artifacts
//!
//! A decryptor artifact is a text file (typically a script) that carries its
//! own envelope. Two layouts are understood:
//!
//! - a template with the quoted placeholder `"{{encryptedData}}"`, which
//!   [`embed_envelope`] replaces with the envelope's compact JSON;
//! - a source file with an injection block between two
//!   `// ===== injection =====` marker lines holding
//!   `const encryptedData = {...};`, which [`inject_envelope`] rewrites.
//!
//! [`extract_envelope`] reads the envelope back out of either layout.

use std::path::Path;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Envelope;
use crate::storage::write_text_atomic;

/// Placeholder replaced by the envelope JSON, quotes included
pub const PLACEHOLDER: &str = "\"{{encryptedData}}\"";

/// Line delimiting the injection block
pub const INJECTION_MARKER: &str = "// ===== injection =====";

/// Variable holding the envelope inside an artifact
const BINDING: &str = "const encryptedData =";

/// Replace the placeholder in `template` with the envelope.
///
/// The placeholder must appear exactly once.
pub fn embed_envelope(template: &str, envelope: &Envelope) -> LedgerResult<String> {
    match template.matches(PLACEHOLDER).count() {
        1 => Ok(template.replacen(PLACEHOLDER, &envelope.to_json()?, 1)),
        0 => Err(LedgerError::Export(format!(
            "template has no {} placeholder",
            PLACEHOLDER
        ))),
        n => Err(LedgerError::Export(format!(
            "template has {} {} placeholders, expected one",
            n, PLACEHOLDER
        ))),
    }
}

/// Rewrite the injection block of `source` to hold the envelope
pub fn inject_envelope(source: &str, envelope: &Envelope) -> LedgerResult<String> {
    let (before, _, after) = split_injection(source)?;
    let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };

    Ok(format!(
        "{before}{marker}{nl}{binding} {json};{nl}{marker}{after}",
        before = before,
        marker = INJECTION_MARKER,
        nl = newline,
        binding = BINDING,
        json = envelope.to_json()?,
        after = after,
    ))
}

/// Turn an injectable source into a template with a single placeholder
pub fn to_template(source: &str) -> LedgerResult<String> {
    let (before, _, after) = split_injection(source)?;
    Ok(format!("{}{} {};{}", before, BINDING, PLACEHOLDER, after))
}

/// Find the envelope embedded in an artifact
pub fn extract_envelope(artifact: &str) -> LedgerResult<Envelope> {
    let region = match split_injection(artifact) {
        Ok((_, block, _)) => block,
        Err(_) => artifact,
    };

    let start = region
        .find(BINDING)
        .ok_or_else(|| LedgerError::Format("artifact has no embedded envelope".to_string()))?
        + BINDING.len();

    let mut stream =
        serde_json::Deserializer::from_str(region[start..].trim_start()).into_iter::<serde_json::Value>();
    let value = stream
        .next()
        .ok_or_else(|| LedgerError::Format("artifact has no embedded envelope".to_string()))?
        .map_err(|e| LedgerError::Format(format!("Invalid embedded envelope: {}", e)))?;

    Envelope::from_json(&value.to_string())
}

/// Read a template, embed the envelope and write the artifact
pub fn write_artifact(
    template_path: impl AsRef<Path>,
    envelope: &Envelope,
    out_path: impl AsRef<Path>,
) -> LedgerResult<()> {
    let template_path = template_path.as_ref();
    let out_path = out_path.as_ref();

    let template = std::fs::read_to_string(template_path).map_err(|e| {
        LedgerError::Io(format!("Failed to read {}: {}", template_path.display(), e))
    })?;

    let artifact = if template.contains(PLACEHOLDER) {
        embed_envelope(&template, envelope)?
    } else {
        inject_envelope(&template, envelope)?
    };

    write_text_atomic(out_path, &artifact)?;
    info!(path = %out_path.display(), "wrote decryptor artifact");
    Ok(())
}

/// Split at the injection markers: text before the first marker, the block
/// between them, text after the second marker.
fn split_injection(source: &str) -> LedgerResult<(&str, &str, &str)> {
    let first = source
        .find(INJECTION_MARKER)
        .ok_or_else(|| LedgerError::Export("source has no injection markers".to_string()))?;
    let block_start = first + INJECTION_MARKER.len();
    let second = source[block_start..]
        .find(INJECTION_MARKER)
        .map(|offset| block_start + offset)
        .ok_or_else(|| LedgerError::Export("source has only one injection marker".to_string()))?;

    Ok((
        &source[..first],
        &source[block_start..second],
        &source[second + INJECTION_MARKER.len()..],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::iso_date;
    use tempfile::TempDir;

    const SOURCE: &str = "const { AES } = require(\"crypto-js\");\n\
// ===== injection =====\n\
const encryptedData = {\n  name: \"old\",\n  value: \"stale\"\n};\n\
// ===== injection =====\n\
console.log(encryptedData.value);\n";

    fn envelope() -> Envelope {
        Envelope::with_date(
            Some("ledger".into()),
            iso_date::parse("2022-08-12T22:34:31.081Z").unwrap(),
            "U2FsdGVkX18BAgMEBQYHCD6/5JgfPmaOMJrITHdMx2xQYDhefjvTfrIR6WiUutGF",
        )
    }

    #[test]
    fn test_embed_into_template() {
        let template = "const encryptedData = \"{{encryptedData}}\";\nrun(encryptedData);\n";
        let artifact = embed_envelope(template, &envelope()).unwrap();

        assert!(!artifact.contains("{{encryptedData}}"));
        assert!(artifact.starts_with("const encryptedData = {\"name\":\"ledger\""));
        assert_eq!(extract_envelope(&artifact).unwrap(), envelope());
    }

    #[test]
    fn test_embed_requires_single_placeholder() {
        assert!(embed_envelope("nothing here", &envelope()).is_err());
        let twice = format!("{p} {p}", p = PLACEHOLDER);
        assert!(embed_envelope(&twice, &envelope()).is_err());
    }

    #[test]
    fn test_inject_replaces_block() {
        let artifact = inject_envelope(SOURCE, &envelope()).unwrap();

        assert!(!artifact.contains("stale"));
        assert!(artifact.starts_with("const { AES }"));
        assert!(artifact.ends_with("console.log(encryptedData.value);\n"));
        assert_eq!(artifact.matches(INJECTION_MARKER).count(), 2);
        assert_eq!(extract_envelope(&artifact).unwrap(), envelope());
    }

    #[test]
    fn test_to_template_then_embed() {
        let template = to_template(SOURCE).unwrap();
        assert_eq!(template.matches(PLACEHOLDER).count(), 1);
        assert!(!template.contains(INJECTION_MARKER));

        let artifact = embed_envelope(&template, &envelope()).unwrap();
        assert_eq!(extract_envelope(&artifact).unwrap(), envelope());
    }

    #[test]
    fn test_missing_markers() {
        assert!(inject_envelope("no markers", &envelope()).is_err());
        let one = format!("{}\nconst x = 1;", INJECTION_MARKER);
        assert!(inject_envelope(&one, &envelope()).is_err());
    }

    #[test]
    fn test_extract_from_unfilled_artifact_fails() {
        assert!(matches!(
            extract_envelope("console.log('hi')"),
            Err(LedgerError::Format(_))
        ));
        // Source-style object literal is not JSON
        assert!(extract_envelope(SOURCE).is_err());
    }

    #[test]
    fn test_write_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let template_path = temp_dir.path().join("decrypt.template.js");
        let out_path = temp_dir.path().join("dist").join("decrypt.js");
        std::fs::write(&template_path, SOURCE).unwrap();

        write_artifact(&template_path, &envelope(), &out_path).unwrap();

        let written = std::fs::read_to_string(&out_path).unwrap();
        assert_eq!(extract_envelope(&written).unwrap(), envelope());
    }
}
