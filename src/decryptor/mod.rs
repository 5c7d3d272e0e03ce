//! Standalone decryptor
//!
//! Holds one embedded envelope and walks it through
//! `AwaitingMethod -> AwaitingPassword -> Decrypting -> Success | Failure`.
//! Input comes either as arguments ([`Decryptor::run_batch`]) or from a
//! [`Prompter`] ([`Decryptor::run_interactive`]); both feed the same
//! transitions, so they agree on every outcome.
//!
//! Every cipher or parse problem ends in the same [`DecryptorState::Failure`]
//! and surfaces as [`LedgerError::DecryptionFailure`]. Whoever runs the
//! decryptor learns only that the attempt failed, not which input was wrong.
//! Plaintext that is valid JSON always succeeds, whatever its shape.

pub mod prompt;

pub use prompt::{Prompter, StreamPrompter, TerminalPrompter};

use tracing::{debug, info};

use crate::crypto::{decrypt_string, derive_key, DerivationMethod, COMPLEX_KEY};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Decrypted, Envelope};

/// Prompt shown for the method in interactive mode
pub const METHOD_PROMPT: &str = "Decryption method (simple/complex): ";

/// Prompt shown for the password in interactive mode
pub const PASSWORD_PROMPT: &str = "Password: ";

/// Where the decryptor is in its run
#[derive(Debug, Clone, PartialEq)]
pub enum DecryptorState {
    /// Nothing supplied yet
    AwaitingMethod,
    /// Method accepted
    AwaitingPassword { method: DerivationMethod },
    /// Running key derivation, cipher and JSON parse
    Decrypting { method: DerivationMethod },
    /// Terminal: plaintext recovered
    Success(Decrypted),
    /// Terminal: nothing recovered
    Failure,
}

impl DecryptorState {
    /// Whether no further input is accepted
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::AwaitingMethod => "awaiting-method",
            Self::AwaitingPassword { .. } => "awaiting-password",
            Self::Decrypting { .. } => "decrypting",
            Self::Success(_) => "success",
            Self::Failure => "failure",
        }
    }
}

/// Decryptor over one embedded envelope
#[derive(Debug, Clone)]
pub struct Decryptor {
    envelope: Envelope,
    complex_key: String,
    state: DecryptorState,
    history: Vec<&'static str>,
}

impl Decryptor {
    /// Create a decryptor for `envelope` using the built-in complex constant
    pub fn new(envelope: Envelope) -> Self {
        Self::with_complex_key(envelope, COMPLEX_KEY)
    }

    /// Create a decryptor with a different complex constant
    pub fn with_complex_key(envelope: Envelope, complex_key: impl Into<String>) -> Self {
        let state = DecryptorState::AwaitingMethod;
        Self {
            history: vec![state.name()],
            envelope,
            complex_key: complex_key.into(),
            state,
        }
    }

    /// The embedded envelope
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Current state
    pub fn state(&self) -> &DecryptorState {
        &self.state
    }

    /// Names of every state entered so far, in order
    pub fn history(&self) -> &[&'static str] {
        &self.history
    }

    fn transition(&mut self, next: DecryptorState) {
        debug!(from = self.state.name(), to = next.name(), "decryptor transition");
        self.history.push(next.name());
        self.state = next;
    }

    /// Accept the derivation method by name
    pub fn supply_method(&mut self, method: &str) -> LedgerResult<()> {
        if !matches!(self.state, DecryptorState::AwaitingMethod) {
            return Err(LedgerError::InvalidArguments(format!(
                "method not expected while {}",
                self.state.name()
            )));
        }

        let method: DerivationMethod = method.trim().parse()?;
        self.transition(DecryptorState::AwaitingPassword { method });
        Ok(())
    }

    /// Accept the password and run the decryption to a terminal state
    pub fn supply_password(&mut self, password: &str) -> LedgerResult<&DecryptorState> {
        let method = match self.state {
            DecryptorState::AwaitingPassword { method } => method,
            _ => {
                return Err(LedgerError::InvalidArguments(format!(
                    "password not expected while {}",
                    self.state.name()
                )))
            }
        };

        if password.is_empty() {
            return Err(LedgerError::missing("password"));
        }

        self.transition(DecryptorState::Decrypting { method });
        let next = match self.attempt(method, password) {
            Some(decrypted) => DecryptorState::Success(decrypted),
            None => DecryptorState::Failure,
        };
        self.transition(next);

        info!(outcome = self.state.name(), "decryption finished");
        Ok(&self.state)
    }

    fn attempt(&self, method: DerivationMethod, password: &str) -> Option<Decrypted> {
        let key = derive_key(password, method, &self.complex_key);
        let plaintext = decrypt_string(&self.envelope.value, &key).ok()?;
        Decrypted::from_json(&plaintext).ok()
    }

    /// Run with method and password given up front.
    ///
    /// Both must be present and non-empty before anything else happens.
    pub fn run_batch(&mut self, method: Option<&str>, password: Option<&str>) -> LedgerResult<Decrypted> {
        let method = method
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| LedgerError::missing("method"))?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| LedgerError::missing("password"))?;

        self.supply_method(method)?;
        self.supply_password(password)?;
        self.outcome()
    }

    /// Run by asking `prompter` for the method, then the password.
    ///
    /// Answers go through the same guard and transitions as [`run_batch`](Self::run_batch).
    pub fn run_interactive<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> LedgerResult<Decrypted> {
        let method = prompter.prompt_line(METHOD_PROMPT)?;
        if method.trim().is_empty() {
            return Err(LedgerError::missing("method"));
        }

        let password = prompter.prompt_secret(PASSWORD_PROMPT)?;
        self.run_batch(Some(&method), Some(password.as_str()))
    }

    /// The result of a finished run
    pub fn outcome(&self) -> LedgerResult<Decrypted> {
        match &self.state {
            DecryptorState::Success(decrypted) => Ok(decrypted.clone()),
            DecryptorState::Failure => Err(LedgerError::DecryptionFailure),
            other => Err(LedgerError::InvalidArguments(format!(
                "decryption has not finished ({})",
                other.name()
            ))),
        }
    }
}
