//! Client for the portfolio API.

mod error;

pub use error::ApiError;

use portfolio_core::domain::{PROFILE_PATH, REPOS_PATH, TRACKER_PATH};
use portfolio_core::{repos_from_value, Profile, Repo, RepoOverride};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AppConfig;

pub const ADMIN_REPO_PATH: &str = "/api/admin/repo/";
pub const ADMIN_REFRESH_PATH: &str = "/api/admin/refresh";

/// Result of one concurrent load. Each section fails independently.
#[derive(Debug)]
pub struct LoadOutcome {
    pub profile: Result<Profile, ApiError>,
    pub repos: Result<Vec<Repo>, ApiError>,
    pub tracker: Result<Value, ApiError>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    bases: Vec<String>,
}

impl ApiClient {
    pub fn new(bases: Vec<String>, timeout: std::time::Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, bases })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(config.api_bases.clone(), config.timeout)
    }

    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        let value = self.fetch_json(PROFILE_PATH).await?;
        Ok(Profile::deserialize(&value).unwrap_or_else(|error| {
            warn!(%error, "profile document has an unexpected shape, using defaults");
            Profile::default()
        }))
    }

    pub async fn fetch_repos(&self) -> Result<Vec<Repo>, ApiError> {
        let value = self.fetch_json(REPOS_PATH).await?;
        Ok(repos_from_value(&value))
    }

    /// Raw tracker payload; shape is left to the normalizer.
    pub async fn fetch_tracker(&self) -> Result<Value, ApiError> {
        self.fetch_json(TRACKER_PATH).await
    }

    pub async fn load_all(&self) -> LoadOutcome {
        let (profile, repos, tracker) = tokio::join!(
            self.fetch_profile(),
            self.fetch_repos(),
            self.fetch_tracker()
        );

        LoadOutcome {
            profile,
            repos,
            tracker,
        }
    }

    /// `PUT /api/admin/repo/{name}`. The body replaces any earlier override.
    pub async fn update_repo(&self, name: &str, body: &RepoOverride) -> Result<Value, ApiError> {
        let name = name.trim();
        if name.is_empty() || name.contains('/') || name.contains(char::is_whitespace) {
            return Err(ApiError::InvalidName(name.to_string()));
        }

        let path = format!("{ADMIN_REPO_PATH}{name}");
        self.send(Method::PUT, &path, Some(body)).await
    }

    pub async fn refresh_repos(&self) -> Result<Value, ApiError> {
        self.send(Method::POST, ADMIN_REFRESH_PATH, None::<&()>).await
    }

    pub async fn fetch_json(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::GET, path, None::<&()>).await
    }

    /// Tries each base in order. Reads move on after any failure; writes only
    /// when the server could not be reached (see [`ApiError::allows_fallback`]).
    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        let mut last_error = ApiError::NoCandidates;

        for base in &self.bases {
            let url = join_url(base, path);
            let mut request = self
                .client
                .request(method.clone(), &url)
                .header(ACCEPT, "application/json");
            if let Some(body) = body {
                request = request.json(body);
            }

            let result = match request.send().await {
                Ok(response) => read_json(&url, response).await,
                Err(source) => Err(ApiError::Http {
                    url: url.clone(),
                    source,
                }),
            };

            match result {
                Ok(value) => {
                    debug!(%method, %url, "API request succeeded");
                    return Ok(value);
                }
                Err(error) if !error.allows_fallback(&method) => return Err(error),
                Err(error) => {
                    warn!(%method, %url, %error, "API base candidate failed");
                    last_error = error;
                }
            }
        }

        Err(last_error)
    }
}

async fn read_json(url: &str, response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.bytes().await.map_err(|source| ApiError::Http {
        url: url.to_string(),
        source,
    })?;
    serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}
