use clap::Parser;
use color_eyre::Result;
use portfolio_tui::admin::run_admin;
use portfolio_tui::api::ApiClient;
use portfolio_tui::app::App;
use portfolio_tui::cli::{CliArgs, Command};
use portfolio_tui::config::init_app_config;
use portfolio_tui::{event, terminal};
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEBUG_LOG_FILE: &str = "portfolio-debug.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = init_app_config(args.api_base.as_deref())?;
    let client = ApiClient::from_config(&config)?;

    if let Some(Command::Admin { action }) = &args.command {
        init_stderr_logging(args.debug);
        return run_admin(&client, action).await;
    }

    if args.headless || !is_terminal() {
        init_stderr_logging(args.debug);
        return event::run_headless(&client, args.json).await;
    }

    // Anything on stderr would tear the alternate screen
    if args.debug {
        init_file_logging()?;
    }

    let mut app = App::new(client);
    app.start_loading();

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }))
}

fn init_stderr_logging(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_writer(std::io::stderr)
        .init();
}

fn init_file_logging() -> Result<()> {
    let file = File::create(DEBUG_LOG_FILE)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(true))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
