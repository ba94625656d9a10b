//! GitHub REST implementation of ContentStore.
//!
//! Blocking calls through a shared `ureq::Agent`. Status codes are not turned into transport
//! errors by the agent so that the API's own `message` can be surfaced.

use super::{Account, Branch, ContentStore, PublishError, PutFileRequest, RemoteFile, RepoRef, Repository};
use serde::de::DeserializeOwned;
use ureq::http::Response;
use ureq::{Agent, Body};

pub const GITHUB_API_URL: &str = "https://api.github.com";
const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("tokenpress/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    agent: Agent,
    token: String,
    api_base: String,
}

impl GitHubClient {
    /// Create a client for the given personal access token.
    pub fn new(token: &str) -> Result<Self, PublishError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(PublishError::MissingToken);
        }

        let config = Agent::config_builder().http_status_as_error(false).build();
        Ok(Self {
            agent: Agent::new_with_config(config),
            token: token.to_string(),
            api_base: GITHUB_API_URL.to_string(),
        })
    }

    /// Point the client at a different API root (GitHub Enterprise)
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    fn get(&self, path: &str, query: Option<(&str, &str)>) -> Result<Response<Body>, PublishError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth())
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT);
        if let Some((key, value)) = query {
            request = request.query(key, value);
        }
        request
            .call()
            .map_err(|e| PublishError::Transport(e.to_string()))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PublishError> {
        let response = self.get(path, None)?;
        read_json(check_status(response)?)
    }
}

/// Turn a non-2xx response into `PublishError::Api`, using the API's message when present.
fn check_status(mut response: Response<Body>) -> Result<Response<Body>, PublishError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.body_mut().read_to_string().unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    Err(PublishError::Api {
        status: status.as_u16(),
        message,
    })
}

fn read_json<T: DeserializeOwned>(mut response: Response<Body>) -> Result<T, PublishError> {
    response
        .body_mut()
        .read_json::<T>()
        .map_err(|e| PublishError::Decode(e.to_string()))
}

impl ContentStore for GitHubClient {
    fn current_user(&self) -> Result<Account, PublishError> {
        self.get_json("/user")
    }

    fn repository(&self, repo: &RepoRef) -> Result<Repository, PublishError> {
        self.get_json(&format!("/repos/{}", repo.full_name()))
    }

    fn branches(&self, repo: &RepoRef) -> Result<Vec<Branch>, PublishError> {
        self.get_json(&format!("/repos/{}/branches", repo.full_name()))
    }

    fn get_file(
        &self,
        full_name: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<RemoteFile>, PublishError> {
        let response = self.get(
            &format!("/repos/{}/contents/{}", full_name, path),
            Some(("ref", branch)),
        )?;
        if response.status().as_u16() == 404 {
            return Ok(None);
        }
        read_json(check_status(response)?).map(Some)
    }

    fn put_file(
        &self,
        full_name: &str,
        path: &str,
        request: &PutFileRequest,
    ) -> Result<(), PublishError> {
        let url = self.url(&format!("/repos/{}/contents/{}", full_name, path));
        tracing::debug!(url = %url, update = request.sha.is_some(), "PUT");

        let response = self
            .agent
            .put(&url)
            .header("Authorization", &self.auth())
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .send_json(request)
            .map_err(|e| PublishError::Transport(e.to_string()))?;
        check_status(response)?;
        Ok(())
    }
}
