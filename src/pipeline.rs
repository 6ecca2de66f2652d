//! Commit construction pipeline against the hosting API.
//!
//! The step order is dictated by the remote Git Data model: resolve the
//! branch head commit, resolve its tree, upload blobs, create a tree layered
//! over the parent tree, create a commit, then move the branch ref. Blob
//! uploads are independent of each other and run fan-out/join; every other
//! step depends on the previous result.
//!
//! There is no retry and no rollback. A failure aborts the chain with one
//! error; blobs uploaded before the failure stay unreferenced, which the
//! hosting side garbage-collects, and the branch ref is not moved.

use futures::future::try_join_all;

use crate::ports::hosting::{BlobPayload, HostingRepo, TreeEntry};

/// One (path, content) pair to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFile {
    /// Destination path relative to the repository root.
    pub path: String,
    /// Content to upload.
    pub payload: BlobPayload,
}

/// Result of a completed push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
    /// Branch whose head advanced.
    pub branch: String,
    /// The newly created commit.
    pub commit_sha: String,
    /// Tree of the new commit.
    pub tree_sha: String,
    /// Commit the branch pointed at before the push.
    pub parent_sha: String,
}

/// Makes sure the target branch exists, creating it from `base` if absent.
///
/// Returns `true` if the branch was created.
///
/// # Errors
///
/// Returns an error if the branch list cannot be fetched or the branch
/// cannot be created.
pub async fn ensure_branch(
    host: &dyn HostingRepo,
    base: &str,
    branch: &str,
) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
    let branches = host.list_branches().await?;
    if branches.iter().any(|b| b.name == branch) {
        return Ok(false);
    }
    host.create_branch(base, branch).await?;
    Ok(true)
}

/// Pushes the files as one new commit on the branch.
///
/// The head is re-read on every invocation, so repeated pushes produce a
/// strictly advancing history. Paths not named in `files` keep their content
/// from the parent tree.
///
/// # Errors
///
/// Returns an error if `files` is empty or any remote operation fails.
pub async fn push_files(
    host: &dyn HostingRepo,
    branch: &str,
    message: &str,
    files: &[CommitFile],
) -> Result<PushOutcome, Box<dyn std::error::Error + Send + Sync>> {
    if files.is_empty() {
        return Err("no files to push".into());
    }

    let parent_sha = host.head_commit(branch).await?;
    let base_tree_sha = host.commit_tree(&parent_sha).await?;

    let uploads = files.iter().map(|file| async move {
        let sha = host.create_blob(&file.payload).await?;
        Ok::<TreeEntry, Box<dyn std::error::Error + Send + Sync>>(TreeEntry::blob(
            sha,
            file.path.clone(),
        ))
    });
    let entries = try_join_all(uploads).await?;

    let tree_sha = host.create_tree(&base_tree_sha, &entries).await?;
    let commit_sha = host.create_commit(message, &tree_sha, &parent_sha).await?;
    host.update_head(branch, &commit_sha).await?;

    Ok(PushOutcome { branch: branch.to_string(), commit_sha, tree_sha, parent_sha })
}
