//! Collaborator surface for the post source.
//!
//! The export pipeline only ever talks to the hosted service through the
//! [`PostSource`] trait, so tests can swap in a deterministic mock exactly
//! like production code swaps in the real [`crate::client::ApiClient`].
//! The trait is annotated for `mockall` behind the `test-export-mocks`
//! feature so integration tests outside the crate can use the generated
//! `MockPostSource`.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// A team visible to the configured credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub name: String,
}

/// A single post: slash-separated `category/title` path plus body text.
///
/// Wire names follow the service API (`full_name`, `body_md`).
#[derive(Debug, Clone, Deserialize)]
pub struct PostRecord {
    #[serde(rename = "full_name")]
    pub full_path: String,
    #[serde(rename = "body_md")]
    pub body: String,
}

/// One page of posts plus the cursor for the following page, if any.
#[derive(Debug, Clone, Deserialize)]
pub struct PostPage {
    pub posts: Vec<PostRecord>,
    pub next_page: Option<u32>,
}

/// Failure of a post-source call. Every variant aborts the whole run.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Read-only, paginated view of the hosted documentation service.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait PostSource: Send + Sync {
    /// List every team visible to the configured credentials.
    async fn list_teams(&self) -> Result<Vec<Team>, SourceError>;

    /// Fetch one page of posts for `team`, 1-based.
    async fn list_posts(&self, team: &str, page: u32) -> Result<PostPage, SourceError>;
}
