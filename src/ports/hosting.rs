//! Hosting repository port for the remote Git Data API.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// File mode recorded for every uploaded blob (regular non-executable file).
pub const BLOB_FILE_MODE: &str = "100644";

/// Boxed future type alias used by [`HostingRepo`] to keep the trait dyn-compatible.
pub type HostingFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// A branch in the remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// The branch name (e.g. `"gh-pages"`).
    pub name: String,
}

/// Content body for a blob upload, tagged with its wire encoding.
///
/// Serializes directly into the hosting API's blob-creation request body
/// (`{"content": ..., "encoding": ...}`), so binary payloads are passed
/// pre-encoded instead of being re-encoded by the client layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "encoding", content = "content", rename_all = "lowercase")]
pub enum BlobPayload {
    /// Plain UTF-8 text content.
    #[serde(rename = "utf-8")]
    Utf8(String),
    /// Base64-encoded binary content.
    Base64(String),
}

/// One entry of a tree under construction: a content hash bound to a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Content hash of the blob.
    pub sha: String,
    /// Path of the entry relative to the repository root.
    pub path: String,
    /// File mode (always [`BLOB_FILE_MODE`] for uploads).
    pub mode: String,
    /// Object type of the entry.
    #[serde(rename = "type")]
    pub entry_type: String,
}

impl TreeEntry {
    /// Creates a regular-file blob entry for the given hash and path.
    #[must_use]
    pub fn blob(sha: String, path: String) -> Self {
        Self { sha, path, mode: BLOB_FILE_MODE.to_string(), entry_type: "blob".to_string() }
    }
}

/// Remote repository exposing the hosting provider's Git Data operations.
///
/// The eight methods are exactly the remote operations the push pipeline
/// consumes: branch listing/creation, ref and commit reads, and blob, tree,
/// commit and ref writes. Abstracting them allows the pipeline to run against
/// an in-memory repository in tests.
pub trait HostingRepo: Send + Sync {
    /// Lists the branches of the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch list cannot be fetched.
    fn list_branches(&self) -> HostingFuture<'_, Vec<Branch>>;

    /// Creates `branch` pointing at the current head of `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base ref cannot be resolved or the ref
    /// cannot be created.
    fn create_branch(&self, base: &str, branch: &str) -> HostingFuture<'_, ()>;

    /// Resolves the commit hash the branch ref currently points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the ref does not exist or cannot be read.
    fn head_commit(&self, branch: &str) -> HostingFuture<'_, String>;

    /// Resolves the tree hash of the given commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit cannot be read.
    fn commit_tree(&self, commit_sha: &str) -> HostingFuture<'_, String>;

    /// Uploads content as a blob and returns its content hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be created.
    fn create_blob(&self, payload: &BlobPayload) -> HostingFuture<'_, String>;

    /// Creates a tree from the entries, layered over the base tree.
    ///
    /// Paths absent from `entries` keep their content from the base tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be created.
    fn create_tree(&self, base_tree_sha: &str, entries: &[TreeEntry]) -> HostingFuture<'_, String>;

    /// Creates a commit pointing at the tree with the given parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit cannot be created.
    fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parent_sha: &str,
    ) -> HostingFuture<'_, String>;

    /// Moves the branch ref to the given commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the ref cannot be updated.
    fn update_head(&self, branch: &str, commit_sha: &str) -> HostingFuture<'_, ()>;
}
