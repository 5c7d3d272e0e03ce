//! Interactive input for the decryptor
//!
//! The decryptor asks for two things in order: the method, then the
//! password. [`TerminalPrompter`] hides the password on a real terminal;
//! [`StreamPrompter`] reads both from any line source, which is what piped
//! stdin and tests use.

use std::io::{BufRead, Write};

use crate::crypto::SecureString;
use crate::error::{LedgerError, LedgerResult};

/// Source of interactive answers
pub trait Prompter {
    /// Ask a question whose answer may be echoed
    fn prompt_line(&mut self, prompt: &str) -> LedgerResult<String>;

    /// Ask for a secret
    fn prompt_secret(&mut self, prompt: &str) -> LedgerResult<SecureString>;
}

/// Prompts on the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt_line(&mut self, prompt: &str) -> LedgerResult<String> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        StreamPrompter::new(stdin.lock(), &mut stdout).prompt_line(prompt)
    }

    fn prompt_secret(&mut self, prompt: &str) -> LedgerResult<SecureString> {
        rpassword::prompt_password(prompt)
            .map(SecureString::from)
            .map_err(|e| LedgerError::Io(format!("Failed to read password: {}", e)))
    }
}

/// Prompts written to `writer`, answers read line by line from `reader`
pub struct StreamPrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StreamPrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn read_answer(&mut self, prompt: &str) -> LedgerResult<SecureString> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(SecureString::from(line).trim_line_ending())
    }
}

impl<R: BufRead, W: Write> Prompter for StreamPrompter<R, W> {
    fn prompt_line(&mut self, prompt: &str) -> LedgerResult<String> {
        let answer = self.read_answer(prompt)?;
        Ok(answer.trim().to_string())
    }

    fn prompt_secret(&mut self, prompt: &str) -> LedgerResult<SecureString> {
        self.read_answer(prompt)
    }
}

/// Fixed answers, handed out in order
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub(crate) fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub(crate) fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next_answer(&mut self, prompt: &str) -> String {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn prompt_line(&mut self, prompt: &str) -> LedgerResult<String> {
        Ok(self.next_answer(prompt))
    }

    fn prompt_secret(&mut self, prompt: &str) -> LedgerResult<SecureString> {
        Ok(SecureString::from(self.next_answer(prompt)))
    }
}
