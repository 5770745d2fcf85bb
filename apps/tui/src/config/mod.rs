#[allow(clippy::module_inception)]
mod config;

pub use config::{api_base_candidates, init_app_config, AppConfig, DEFAULT_API_BASE};
