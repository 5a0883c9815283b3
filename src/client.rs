//! Reqwest-backed implementation of [`PostSource`] against the service's
//! REST API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::contract::{PostPage, PostSource, SourceError, Team};

/// Default API endpoint of the hosted documentation service.
pub const DEFAULT_BASE_URL: &str = "https://api.esa.io";

/// Page size requested from the posts endpoint.
pub const POSTS_PER_PAGE: u32 = 100;

/// HTTP client holding the base URL and the pre-issued access token.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Point the client at a non-default endpoint (self-hosted or a test
    /// server).
    pub fn with_base_url(base_url: &str, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, SourceError> {
        debug!(url = %url, "fetching from post source");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| SourceError::Http {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { url, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::Decode { url, source: e })
    }
}

#[derive(Deserialize)]
struct TeamsResponse {
    teams: Vec<Team>,
}

#[async_trait]
impl PostSource for ApiClient {
    async fn list_teams(&self) -> Result<Vec<Team>, SourceError> {
        let url = format!("{}/v1/teams", self.base_url);
        let response: TeamsResponse = self.get_json(url).await?;
        Ok(response.teams)
    }

    async fn list_posts(&self, team: &str, page: u32) -> Result<PostPage, SourceError> {
        let url = format!(
            "{}/v1/teams/{}/posts?per_page={}&page={}",
            self.base_url, team, POSTS_PER_PAGE, page
        );
        self.get_json(url).await
    }
}
