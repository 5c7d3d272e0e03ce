//! Envelope CLI commands
//!
//! Inspecting envelopes without decrypting them, and embedding them into
//! standalone decryptor artifacts.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{LedgerPaths, Settings, VerifyWords};
use crate::crypto::DerivationMethod;
use crate::display::format_envelope_details;
use crate::error::LedgerResult;
use crate::export::write_artifact;
use crate::models::Envelope;

/// Arguments for `embed`
#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Envelope JSON file
    #[arg(short, long, env = "LEDGER_LOCK_ENVELOPE")]
    pub envelope: PathBuf,

    /// Template with a "{{encryptedData}}" placeholder or injection markers
    #[arg(short, long)]
    pub template: PathBuf,

    /// Where to write the artifact
    #[arg(short, long)]
    pub out: PathBuf,
}

/// Arguments for `config`
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Default derivation method for `encrypt`
    #[arg(long, value_enum)]
    pub method: Option<DerivationMethod>,

    /// Expected number of words per ledger
    #[arg(long)]
    pub words: Option<usize>,

    /// Word verification mode recorded for front-ends
    #[arg(long, value_enum)]
    pub verify_words: Option<VerifyWords>,

    /// Default envelope name
    #[arg(long)]
    pub name: Option<String>,

    /// Write the settings file even when nothing changed
    #[arg(long)]
    pub save: bool,
}

impl ConfigArgs {
    fn changes_anything(&self) -> bool {
        self.method.is_some()
            || self.words.is_some()
            || self.verify_words.is_some()
            || self.name.is_some()
    }
}

/// Show envelope metadata
pub fn handle_inspect_command(path: &Path) -> LedgerResult<()> {
    let envelope = Envelope::load(path)?;
    print!("{}", format_envelope_details(&envelope));
    Ok(())
}

/// Embed an envelope into a decryptor artifact
pub fn handle_embed_command(args: EmbedArgs) -> LedgerResult<()> {
    let envelope = Envelope::load(&args.envelope)?;
    write_artifact(&args.template, &envelope, &args.out)?;
    println!("Artifact written: {}", args.out.display());
    Ok(())
}

/// Show paths and settings, applying and saving any changes first
pub fn handle_config_command(
    paths: &LedgerPaths,
    mut settings: Settings,
    args: ConfigArgs,
) -> LedgerResult<()> {
    if args.changes_anything() || args.save {
        if let Some(method) = args.method {
            settings.default_method = method;
        }
        if let Some(words) = args.words {
            settings.number_of_words = words;
        }
        if let Some(verify_words) = args.verify_words {
            settings.verify_words = verify_words;
        }
        if let Some(name) = args.name {
            settings.default_name = name;
        }
        settings.save(paths)?;
        println!("Settings saved to {}", paths.settings_file().display());
        println!();
    }

    println!("ledger-lock Configuration");
    println!("=========================");
    println!("Config directory:   {}", paths.base_dir().display());
    println!("Settings file:      {}", paths.settings_file().display());
    let output_dir = settings
        .output_dir
        .clone()
        .unwrap_or_else(|| paths.envelopes_dir());
    println!("Envelope directory: {}", output_dir.display());
    println!();
    println!("Settings:");
    println!("  Default method:  {}", settings.default_method);
    println!("  Default name:    {}", settings.default_name);
    println!("  Number of words: {}", settings.number_of_words);
    println!("  Verify words:    {:?}", settings.verify_words);
    Ok(())
}
