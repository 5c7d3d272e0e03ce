//! Encrypt CLI command
//!
//! Seals a set of labelled words into an envelope file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::config::{LedgerPaths, Settings};
use crate::crypto::{DerivationMethod, SecureString};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_word_pairs, Payload};
use crate::services::seal;
use crate::storage::read_json_required;

/// Passwords shorter than this get a warning
const SHORT_PASSWORD: usize = 8;

/// Arguments for `encrypt`
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// JSON file mapping labels to words
    #[arg(short, long, conflicts_with = "word")]
    pub words: Option<PathBuf>,

    /// A single word as label=word; repeatable
    #[arg(long = "word", value_name = "LABEL=WORD")]
    pub word: Vec<String>,

    /// Envelope name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Derivation method (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub method: Option<DerivationMethod>,

    /// Output file (defaults to <output_dir>/<name>.json)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the envelope JSON instead of writing a file
    #[arg(long, conflicts_with = "out")]
    pub stdout: bool,

    /// Password; prompted for when not given
    #[arg(long, env = "LEDGER_LOCK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Handle the encrypt command
pub fn handle_encrypt_command(
    paths: &LedgerPaths,
    settings: &Settings,
    args: EncryptArgs,
) -> LedgerResult<()> {
    let words = collect_words(&args)?;
    if words.len() != settings.number_of_words {
        warn!(
            expected = settings.number_of_words,
            actual = words.len(),
            "word count differs from settings"
        );
    }

    let method = args.method.unwrap_or(settings.default_method);
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| settings.default_name.clone());
    let payload = Payload::new(words, method).with_name(name.clone());
    payload.validate()?;

    let password = match args.password {
        Some(password) => SecureString::from(password),
        None => prompt_new_password()?,
    };
    if password.is_empty() {
        return Err(LedgerError::missing("password"));
    }
    if password.chars().count() < SHORT_PASSWORD {
        warn!("password is shorter than {} characters", SHORT_PASSWORD);
    }
    if method == DerivationMethod::Simple {
        warn!("simple method passes the password to the cipher unchanged");
    }

    let envelope = seal(&payload, &password, method)?;

    if args.stdout {
        println!("{}", envelope.to_json_pretty()?);
        return Ok(());
    }

    let out = args
        .out
        .unwrap_or_else(|| settings.envelope_path(paths, &name));
    envelope.save(&out)?;

    println!(
        "Sealed '{}' ({} words, {} method)",
        name,
        payload.words.len(),
        method
    );
    println!("Envelope: {}", out.display());
    println!();
    println!("Keep the method and password: neither can be recovered from the envelope.");

    Ok(())
}

fn collect_words(args: &EncryptArgs) -> LedgerResult<BTreeMap<String, String>> {
    match &args.words {
        Some(path) => read_json_required(path),
        None if !args.word.is_empty() => parse_word_pairs(&args.word),
        None => Err(LedgerError::InvalidArguments(
            "give words with --words <FILE> or --word label=word".to_string(),
        )),
    }
}

/// Prompt for a new password with confirmation
fn prompt_new_password() -> LedgerResult<SecureString> {
    loop {
        let pass1 = prompt_password("Enter password: ")?;

        if pass1.is_empty() {
            println!("Password cannot be empty. Please try again.");
            continue;
        }

        let pass2 = prompt_password("Confirm password: ")?;

        if pass1 != pass2 {
            println!("Passwords do not match. Please try again.");
            continue;
        }

        return Ok(pass1);
    }
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> LedgerResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| LedgerError::Io(format!("Failed to read password: {}", e)))
}
