use std::io::{self, BufRead, IsTerminal, Write};

use crate::types::SecretStoreError;

/// Interactive source of the user secret.
pub trait SecretPrompt {
    fn prompt(&mut self, message: &str) -> Result<String, SecretStoreError>;
}

/// Prints the message on stderr and reads one line from `reader`.
///
/// Refuses to read when the input is not interactive: a piped stdin carries
/// advertisement records, and its first line must not become the secret.
#[derive(Debug)]
pub struct LinePrompt<R> {
    reader: R,
    interactive: bool,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R, interactive: bool) -> Self {
        Self { reader, interactive }
    }
}

pub type StdinPrompt = LinePrompt<io::StdinLock<'static>>;

impl StdinPrompt {
    pub fn stdin() -> Self {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        Self::new(stdin.lock(), interactive)
    }
}

impl<R: BufRead> SecretPrompt for LinePrompt<R> {
    fn prompt(&mut self, message: &str) -> Result<String, SecretStoreError> {
        if !self.interactive {
            return Err(SecretStoreError::NotInteractive);
        }

        let mut stderr = io::stderr();
        stderr
            .write_all(message.as_bytes())
            .and_then(|_| stderr.flush())
            .map_err(SecretStoreError::FailToPrompt)?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(SecretStoreError::FailToPrompt)?;
        if read == 0 {
            return Err(SecretStoreError::PromptAborted);
        }

        Ok(line)
    }
}

impl<F> SecretPrompt for F
where
    F: FnMut(&str) -> Result<String, SecretStoreError>,
{
    fn prompt(&mut self, message: &str) -> Result<String, SecretStoreError> {
        self(message)
    }
}
