//! Passphrase input port.

/// Supplies the passphrase that unseals the stored access credential.
///
/// Abstracting the prompt keeps the push flow testable without a terminal.
pub trait PassphraseSource: Send + Sync {
    /// Reads a passphrase from the user.
    ///
    /// # Errors
    ///
    /// Returns an error if no passphrase can be obtained.
    fn read_passphrase(
        &self,
        prompt: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
