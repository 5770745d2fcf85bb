use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URLs tried in order until one answers.
    pub api_bases: Vec<String>,
    pub timeout: Duration,
}

/// Initializes the application configuration
/// `api_base_override` comes from the command line and wins over the environment
pub fn init_app_config(api_base_override: Option<&str>) -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let from_env = env::var("PORTFOLIO_API_BASE").ok();
    let explicit = api_base_override.map(str::to_string).or(from_env);

    let timeout_secs = match env::var("PORTFOLIO_API_TIMEOUT_SECS") {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| eyre!("Invalid PORTFOLIO_API_TIMEOUT_SECS {raw:?}: {e}"))?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };

    Ok(AppConfig {
        api_bases: api_base_candidates(explicit.as_deref()),
        timeout: Duration::from_secs(timeout_secs),
    })
}

/// Explicit base first, then the local default; trailing slashes trimmed and
/// duplicates dropped
pub fn api_base_candidates(explicit: Option<&str>) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    for base in [explicit.unwrap_or_default(), DEFAULT_API_BASE] {
        let base = base.trim().trim_end_matches('/');
        if base.is_empty() || candidates.iter().any(|known| known == base) {
            continue;
        }
        candidates.push(base.to_string());
    }

    candidates
}
