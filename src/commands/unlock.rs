//! `picpush unlock` command.
//!
//! Checks that a passphrase opens the sealed credential without touching
//! the network.

use crate::adapters::live::passphrase::LivePassphraseSource;
use crate::credential::SealedCredential;
use crate::ports::passphrase::PassphraseSource;

/// Execute the `unlock` command with the live passphrase prompt.
///
/// # Errors
///
/// Returns an error string if the credential cannot be loaded or the
/// passphrase does not open it.
pub fn run() -> Result<(), String> {
    let credential = super::load_credential()?;
    run_with_prompt(&credential, &LivePassphraseSource)
}

fn run_with_prompt(
    credential: &SealedCredential,
    prompt: &dyn PassphraseSource,
) -> Result<(), String> {
    let passphrase = prompt
        .read_passphrase("Upload passphrase:")
        .map_err(|e| format!("Failed to read passphrase: {e}"))?;
    credential.unseal(&passphrase).map_err(|e| format!("Passphrase rejected: {e}"))?;
    println!("Credential unlocked.");
    Ok(())
}
