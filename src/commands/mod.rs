//! Command dispatch and handlers.

pub mod push;
pub mod unlock;

use std::env;

use crate::cli::Command;
use crate::credential::{SealedCredential, SEALED_TOKEN};

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Push { image, path, message, branch } => {
            push::run(image, path.as_deref(), message.as_deref(), branch.as_deref())
        }
        Command::Unlock => unlock::run(),
    }
}

/// Loads the sealed credential descriptor.
///
/// `PICPUSH_CREDENTIAL` overrides the embedded production descriptor, which
/// keeps the binary usable against another repository without rebuilding.
pub(crate) fn load_credential() -> Result<SealedCredential, String> {
    let descriptor =
        env::var("PICPUSH_CREDENTIAL").map_or_else(|_| SEALED_TOKEN.to_string(), |value| value);
    SealedCredential::from_json(&descriptor)
        .map_err(|e| format!("Failed to load sealed credential: {e}"))
}
