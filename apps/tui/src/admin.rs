use color_eyre::Result;
use tracing::info;

use crate::api::ApiClient;
use crate::cli::AdminAction;

/// Runs one admin mutation and prints the backend's answer.
pub async fn run_admin(client: &ApiClient, action: &AdminAction) -> Result<()> {
    let response = match action {
        AdminAction::UpdateRepo { name, .. } => {
            let body = action.repo_override().unwrap_or_default();
            info!(repo = %name, pinned = body.pinned, "updating repository override");
            client.update_repo(name, &body).await?
        }
        AdminAction::Refresh => {
            info!("requesting repository refresh");
            client.refresh_repos().await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
