use reqwest::{Method, StatusCode};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("{url} answered with a body that is not JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no API base URL configured")]
    NoCandidates,

    #[error("repository name {0:?} is not a single path segment")]
    InvalidName(String),
}

impl ApiError {
    /// Whether the next base URL may be tried after this error.
    ///
    /// Reads always move on. A write moves on only when the request never
    /// reached a server, since a timeout or a bad answer may follow a write
    /// that was already applied.
    pub fn allows_fallback(&self, method: &Method) -> bool {
        if *method == Method::GET {
            return true;
        }
        match self {
            Self::Http { source, .. } => source.is_connect() || source.is_builder(),
            Self::Status { .. } | Self::Decode { .. } => false,
            Self::Client(_) | Self::NoCandidates | Self::InvalidName(_) => true,
        }
    }
}
