//! Live adapter for the `HostingRepo` port using the GitHub REST API.
//!
//! Each port method maps onto one Git Data endpoint (plus the branch list).
//! Objects are content-addressed; branch refs are mutable pointers moved by
//! the final `PATCH`.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::ports::hosting::{BlobPayload, Branch, HostingFuture, HostingRepo, TreeEntry};

const ACCEPT_HEADER: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("picpush/", env!("CARGO_PKG_VERSION"));

/// Live hosting client that calls the GitHub Git Data API.
pub struct GitHubClient {
    client: Client,
    api_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl GitHubClient {
    /// Creates a client for the configured repository using a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(
        config: &SiteConfig,
        token: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            token: token.to_string(),
        })
    }

    fn repo_url(&self, tail: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_url, self.owner, self.repo, tail)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
        let response = request
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", ACCEPT_HEADER)
            .send()
            .await
            .map_err(|e| format!("GitHub API request failed: {e}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read GitHub API response: {e}"))?;

        if !status.is_success() {
            return Err(api_error_message(status.as_u16(), &body).into());
        }

        serde_json::from_str(&body)
            .map_err(|e| format!("Failed to parse GitHub API response: {e}").into())
    }
}

/// Extracts the `message` field from a GitHub error body, falling back to the
/// raw body when it is not the documented JSON shape.
fn api_error_message(status: u16, body: &str) -> String {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string());
    format!("GitHub API error ({status}): {message}")
}

/// Error body returned by the GitHub API on non-2xx responses.
#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Response for ref reads (`GET git/ref/heads/{branch}`).
#[derive(Deserialize)]
struct RefResponse {
    object: RefObject,
}

/// The object a ref points at.
#[derive(Deserialize)]
struct RefObject {
    sha: String,
}

/// Response for commit reads (`GET git/commits/{sha}`).
#[derive(Deserialize)]
struct CommitResponse {
    tree: TreeRef,
}

/// Tree pointer inside a commit object.
#[derive(Deserialize)]
struct TreeRef {
    sha: String,
}

/// Response for object writes that return a content hash.
#[derive(Deserialize)]
struct ShaResponse {
    sha: String,
}

/// Request body for `POST git/refs`.
#[derive(Serialize)]
struct CreateRefRequest {
    #[serde(rename = "ref")]
    reference: String,
    sha: String,
}

/// Request body for `POST git/trees`.
#[derive(Serialize)]
struct CreateTreeRequest {
    base_tree: String,
    tree: Vec<TreeEntry>,
}

/// Request body for `POST git/commits`.
#[derive(Serialize)]
struct CreateCommitRequest {
    message: String,
    tree: String,
    parents: Vec<String>,
}

/// Request body for `PATCH git/refs/heads/{branch}`.
#[derive(Serialize)]
struct UpdateRefRequest {
    sha: String,
}

impl HostingRepo for GitHubClient {
    fn list_branches(&self) -> HostingFuture<'_, Vec<Branch>> {
        let url = self.repo_url("branches");
        Box::pin(async move { self.send_json(self.client.get(url)).await })
    }

    fn create_branch(&self, base: &str, branch: &str) -> HostingFuture<'_, ()> {
        let base_url = self.repo_url(&format!("git/ref/heads/{base}"));
        let refs_url = self.repo_url("git/refs");
        let reference = format!("refs/heads/{branch}");
        Box::pin(async move {
            let base_ref: RefResponse = self.send_json(self.client.get(base_url)).await?;
            let body = CreateRefRequest { reference, sha: base_ref.object.sha };
            let _: serde_json::Value =
                self.send_json(self.client.post(refs_url).json(&body)).await?;
            Ok(())
        })
    }

    fn head_commit(&self, branch: &str) -> HostingFuture<'_, String> {
        let url = self.repo_url(&format!("git/ref/heads/{branch}"));
        Box::pin(async move {
            let reference: RefResponse = self.send_json(self.client.get(url)).await?;
            Ok(reference.object.sha)
        })
    }

    fn commit_tree(&self, commit_sha: &str) -> HostingFuture<'_, String> {
        let url = self.repo_url(&format!("git/commits/{commit_sha}"));
        Box::pin(async move {
            let commit: CommitResponse = self.send_json(self.client.get(url)).await?;
            Ok(commit.tree.sha)
        })
    }

    fn create_blob(&self, payload: &BlobPayload) -> HostingFuture<'_, String> {
        let url = self.repo_url("git/blobs");
        let body = payload.clone();
        Box::pin(async move {
            let blob: ShaResponse = self.send_json(self.client.post(url).json(&body)).await?;
            Ok(blob.sha)
        })
    }

    fn create_tree(&self, base_tree_sha: &str, entries: &[TreeEntry]) -> HostingFuture<'_, String> {
        let url = self.repo_url("git/trees");
        let body =
            CreateTreeRequest { base_tree: base_tree_sha.to_string(), tree: entries.to_vec() };
        Box::pin(async move {
            let tree: ShaResponse = self.send_json(self.client.post(url).json(&body)).await?;
            Ok(tree.sha)
        })
    }

    fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parent_sha: &str,
    ) -> HostingFuture<'_, String> {
        let url = self.repo_url("git/commits");
        let body = CreateCommitRequest {
            message: message.to_string(),
            tree: tree_sha.to_string(),
            parents: vec![parent_sha.to_string()],
        };
        Box::pin(async move {
            let commit: ShaResponse = self.send_json(self.client.post(url).json(&body)).await?;
            Ok(commit.sha)
        })
    }

    fn update_head(&self, branch: &str, commit_sha: &str) -> HostingFuture<'_, ()> {
        let url = self.repo_url(&format!("git/refs/heads/{branch}"));
        let body = UpdateRefRequest { sha: commit_sha.to_string() };
        Box::pin(async move {
            let _: serde_json::Value =
                self.send_json(self.client.patch(url).json(&body)).await?;
            Ok(())
        })
    }
}
