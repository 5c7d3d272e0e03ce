use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger_lock::cli::{
    decrypt_error_line, handle_config_command, handle_decrypt_command, handle_embed_command,
    handle_encrypt_command, handle_inspect_command, ConfigArgs, DecryptArgs, EmbedArgs, EncryptArgs,
};
use ledger_lock::config::logging::init_logging;
use ledger_lock::config::{LedgerPaths, Settings};

#[derive(Parser)]
#[command(
    name = "ledger-lock",
    version,
    about = "Password-locked word ledgers with a portable offline decryptor",
    long_about = "ledger-lock seals a ledger of secret words into a JSON envelope \
                  under a password, and opens it again offline given only the \
                  envelope, the password and the derivation method."
)]
struct Cli {
    /// Increase log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seal words into a new envelope
    Encrypt(EncryptArgs),

    /// Decrypt an envelope and show its words
    Decrypt(DecryptArgs),

    /// Show envelope metadata without decrypting
    Inspect {
        /// Envelope JSON file
        file: PathBuf,
    },

    /// Embed an envelope into a standalone decryptor artifact
    Embed(EmbedArgs),

    /// Show configuration and paths, optionally changing settings
    Config(ConfigArgs),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Decrypt(args) => {
            // Single line on stdout, no details, whatever went wrong
            if let Err(err) = handle_decrypt_command(args) {
                println!("{}", decrypt_error_line(&err));
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Encrypt(args) => {
            let paths = LedgerPaths::new()?;
            let settings = Settings::load_or_create(&paths)?;
            handle_encrypt_command(&paths, &settings, args)?;
        }
        Commands::Inspect { file } => handle_inspect_command(&file)?,
        Commands::Embed(args) => handle_embed_command(args)?,
        Commands::Config(args) => {
            let paths = LedgerPaths::new()?;
            let settings = Settings::load_or_create(&paths)?;
            handle_config_command(&paths, settings, args)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
