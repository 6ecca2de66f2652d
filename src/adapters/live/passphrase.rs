//! Live passphrase adapter reading from the environment or the terminal.

use std::env;
use std::io::{BufRead, Write};

use crate::ports::passphrase::PassphraseSource;

/// Environment variable consulted before falling back to an interactive prompt.
pub const PASSPHRASE_ENV: &str = "PICPUSH_PASSPHRASE";

/// Live passphrase source.
///
/// Uses `PICPUSH_PASSPHRASE` when set (non-interactive runs), otherwise
/// prints the prompt to stderr and reads one line from stdin.
pub struct LivePassphraseSource;

impl PassphraseSource for LivePassphraseSource {
    fn read_passphrase(
        &self,
        prompt: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        if let Ok(passphrase) = env::var(PASSPHRASE_ENV) {
            return Ok(passphrase);
        }

        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        write!(handle, "{prompt} ")?;
        handle.flush()?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        let passphrase = line.trim_end_matches(['\r', '\n']).to_string();
        if passphrase.is_empty() {
            return Err("no passphrase provided".into());
        }
        Ok(passphrase)
    }
}
