//! Site and repository configuration.
//!
//! Defaults target the static site repository this tool publishes to; every
//! field can be overridden with a `PICPUSH_*` environment variable. A `.env`
//! file in the working directory is honored.

use std::env;

/// Default repository owner.
pub const DEFAULT_OWNER: &str = "joxon";
/// Default repository name.
pub const DEFAULT_REPO: &str = "multimedia-web-design";
/// Default target branch.
pub const DEFAULT_BRANCH: &str = "gh-pages";
/// Default base branch used when the target branch has to be created.
pub const DEFAULT_BASE_BRANCH: &str = "master";
/// Default destination path for an uploaded image.
pub const DEFAULT_DEST_PATH: &str = "exp4/upload.jpg";
/// Default hosting API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Default upload size ceiling in bytes (1 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1_048_576;

/// Target repository and upload settings for one push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Owner of the target repository.
    pub owner: String,
    /// Name of the target repository.
    pub repo: String,
    /// Branch the push lands on.
    pub branch: String,
    /// Branch the target branch is created from when absent.
    pub base_branch: String,
    /// Repository path an uploaded image is written to.
    pub dest_path: String,
    /// Root URL of the hosting REST API.
    pub api_url: String,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: usize,
}

impl SiteConfig {
    /// Loads the configuration from the environment, falling back to the
    /// built-in defaults field by field.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        Self {
            owner: text("PICPUSH_OWNER", DEFAULT_OWNER),
            repo: text("PICPUSH_REPO", DEFAULT_REPO),
            branch: text("PICPUSH_BRANCH", DEFAULT_BRANCH),
            base_branch: text("PICPUSH_BASE_BRANCH", DEFAULT_BASE_BRANCH),
            dest_path: text("PICPUSH_DEST_PATH", DEFAULT_DEST_PATH),
            api_url: text("PICPUSH_API_URL", DEFAULT_API_URL),
            max_upload_bytes: lookup("PICPUSH_MAX_UPLOAD_BYTES")
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    /// Checks that the configuration names a repository and a branch.
    ///
    /// # Errors
    ///
    /// Returns an error string if the owner, repository, or branch is empty.
    pub fn validate(&self) -> Result<(), String> {
        if self.owner.is_empty() || self.repo.is_empty() {
            return Err(
                "Repository is not initialized: set PICPUSH_OWNER and PICPUSH_REPO".to_string()
            );
        }
        if self.branch.is_empty() {
            return Err("Branch is not set: set PICPUSH_BRANCH".to_string());
        }
        Ok(())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
