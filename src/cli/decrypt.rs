//! Decrypt CLI command
//!
//! The standalone decryptor's command-line surface:
//! `ledger-lock decrypt <method> <password> --envelope <FILE>`, or
//! `--interactive` to be asked for both. The envelope file can be a bare
//! envelope JSON or a decryptor artifact with the envelope embedded.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{info, warn};

use crate::decryptor::{Decryptor, StreamPrompter, TerminalPrompter};
use crate::display::format_decrypted;
use crate::error::{LedgerError, LedgerResult, DECRYPT_FAILURE_MESSAGE};
use crate::export::extract_envelope;
use crate::models::{Decrypted, Envelope};

/// Usage line printed when method or password is missing
pub const DECRYPT_USAGE: &str = "Usage: ledger-lock decrypt <method> <password> [--envelope <FILE>]";

/// Arguments for `decrypt`
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Derivation method used at encryption time: simple or complex
    pub method: Option<String>,

    /// Password used at encryption time
    pub password: Option<String>,

    /// Envelope JSON or decryptor artifact holding the envelope
    #[arg(short, long, env = "LEDGER_LOCK_ENVELOPE")]
    pub envelope: PathBuf,

    /// Prompt for method and password instead of taking them as arguments
    #[arg(short, long, conflicts_with_all = ["method", "password"])]
    pub interactive: bool,

    /// Print the decrypted payload as JSON
    #[arg(long)]
    pub json: bool,
}

/// Read the envelope from a JSON file or an artifact.
///
/// Anything unreadable as an envelope is reported as a decryption failure.
pub fn load_embedded_envelope(path: &Path) -> LedgerResult<Envelope> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| LedgerError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    Envelope::from_json(&text)
        .or_else(|_| extract_envelope(&text))
        .map_err(|e| {
            warn!(path = %path.display(), "no usable envelope: {}", e);
            LedgerError::DecryptionFailure
        })
}

/// Run the decryptor and print the result
pub fn handle_decrypt_command(args: DecryptArgs) -> LedgerResult<()> {
    // Argument guard runs before the envelope is even read
    if !args.interactive {
        if args.method.as_deref().map_or(true, |m| m.trim().is_empty()) {
            return Err(LedgerError::missing("method"));
        }
        if args.password.as_deref().map_or(true, str::is_empty) {
            return Err(LedgerError::missing("password"));
        }
    }

    let envelope = load_embedded_envelope(&args.envelope)?;
    info!(name = envelope.display_name(), "decrypting");
    let mut decryptor = Decryptor::new(envelope);

    let decrypted = if args.interactive {
        if std::io::stdin().is_terminal() {
            decryptor.run_interactive(&mut TerminalPrompter)?
        } else {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            let mut prompter = StreamPrompter::new(stdin.lock(), &mut stdout);
            let decrypted = decryptor.run_interactive(&mut prompter)?;
            println!();
            decrypted
        }
    } else {
        decryptor.run_batch(args.method.as_deref(), args.password.as_deref())?
    };

    print_decrypted(&decrypted, args.json)
}

fn print_decrypted(decrypted: &Decrypted, as_json: bool) -> LedgerResult<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(decrypted.raw())?);
    } else {
        println!("{}", format_decrypted(decrypted));
    }
    Ok(())
}

/// The one line shown to the user for a failed decrypt
pub fn decrypt_error_line(err: &LedgerError) -> &'static str {
    match err {
        LedgerError::InvalidArguments(_) => DECRYPT_USAGE,
        _ => DECRYPT_FAILURE_MESSAGE,
    }
}
