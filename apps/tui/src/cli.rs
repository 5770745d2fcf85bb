use clap::{Parser, Subcommand};
use portfolio_core::RepoOverride;

#[derive(Debug, Parser)]
#[command(name = "portfolio", version, about = "Portfolio dashboard")]
pub struct CliArgs {
    /// Print the dashboard once and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Portfolio API base URL, tried before the local default
    #[arg(long = "api-base", value_name = "URL")]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Repository administration against the backend
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// Replace the override for one repository
    UpdateRepo {
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        readme: String,

        #[arg(long)]
        pinned: bool,

        #[arg(long = "pin-order", default_value_t = 0)]
        pin_order: i64,
    },
    /// Ask the backend to re-fetch repositories now
    Refresh,
}

impl AdminAction {
    pub fn repo_override(&self) -> Option<RepoOverride> {
        match self {
            Self::UpdateRepo {
                description,
                readme,
                pinned,
                pin_order,
                ..
            } => Some(RepoOverride {
                description: description.clone(),
                readme: readme.clone(),
                pinned: *pinned,
                pin_order: *pin_order,
            }),
            Self::Refresh => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn update_repo_builds_an_override() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "portfolio",
            "--api-base",
            "https://api.example.com",
            "admin",
            "update-repo",
            "radar",
            "--pinned",
            "--pin-order",
            "2",
        ])?;

        assert_eq!(args.api_base.as_deref(), Some("https://api.example.com"));
        let Some(Command::Admin { action }) = args.command else {
            panic!("expected admin subcommand");
        };
        let body = action.repo_override();
        assert_eq!(
            body,
            Some(RepoOverride {
                pinned: true,
                pin_order: 2,
                ..RepoOverride::default()
            })
        );
        Ok(())
    }

    #[test]
    fn refresh_has_no_body() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from(["portfolio", "admin", "refresh"])?;
        assert!(matches!(
            args.command,
            Some(Command::Admin {
                action: AdminAction::Refresh
            })
        ));
        Ok(())
    }
}
