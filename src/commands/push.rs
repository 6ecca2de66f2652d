//! `picpush push` command.
//!
//! Order matters here and mirrors the upload flow end to end: the image is
//! validated first, then the passphrase is taken and the credential
//! unsealed, and only then is the hosting client built and the network
//! touched.

use std::path::Path;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::github::GitHubClient;
use crate::adapters::live::passphrase::LivePassphraseSource;
use crate::config::SiteConfig;
use crate::credential::SealedCredential;
use crate::payload;
use crate::pipeline::{self, CommitFile};
use crate::ports::filesystem::FileSystem;
use crate::ports::hosting::BlobPayload;
use crate::ports::passphrase::PassphraseSource;

/// Execute the `push` command with live adapters.
///
/// # Errors
///
/// Returns an error string if validation, unsealing, or any remote
/// operation fails.
pub fn run(
    image: &Path,
    dest: Option<&str>,
    message: Option<&str>,
    branch: Option<&str>,
) -> Result<(), String> {
    let mut config = SiteConfig::from_env();
    if let Some(branch) = branch {
        config.branch = branch.to_string();
    }
    let credential = super::load_credential()?;
    run_with_ports(&config, &credential, &LiveFileSystem, &LivePassphraseSource, image, dest, message)
}

/// Execute the `push` command against explicit ports.
fn run_with_ports(
    config: &SiteConfig,
    credential: &SealedCredential,
    fs: &dyn FileSystem,
    prompt: &dyn PassphraseSource,
    image: &Path,
    dest_override: Option<&str>,
    message_override: Option<&str>,
) -> Result<(), String> {
    config.validate()?;
    let dest = dest_override.unwrap_or(&config.dest_path);

    let image_payload = payload::load_image(fs, image, config.max_upload_bytes)?;
    println!("Loaded {} ({} bytes)", image_payload.file_name, image_payload.byte_len);

    let passphrase = prompt
        .read_passphrase("Upload passphrase:")
        .map_err(|e| format!("Failed to read passphrase: {e}"))?;
    let token =
        credential.unseal(&passphrase).map_err(|e| format!("Passphrase rejected: {e}"))?;
    println!("Passphrase accepted.");

    let message = message_override.map_or_else(
        || payload::commit_message(&image_payload.file_name, dest),
        ToString::to_string,
    );
    let files = vec![CommitFile {
        path: dest.to_string(),
        payload: BlobPayload::Base64(image_payload.content_b64.clone()),
    }];

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    runtime.block_on(async {
        let host = GitHubClient::new(config, &token)
            .map_err(|e| format!("Failed to build hosting client: {e}"))?;

        let created = pipeline::ensure_branch(&host, &config.base_branch, &config.branch)
            .await
            .map_err(|e| format!("Failed to prepare branch {}: {e}", config.branch))?;
        if created {
            println!("Created branch {} from {}", config.branch, config.base_branch);
        }

        println!("Pushing {dest} to {}/{} on {}...", config.owner, config.repo, config.branch);
        let outcome = pipeline::push_files(&host, &config.branch, &message, &files)
            .await
            .map_err(|e| format!("Failed to push {}: {e}", image_payload.file_name))?;
        println!("Branch {} advanced to commit {}", outcome.branch, outcome.commit_sha);
        Ok(())
    })
}
