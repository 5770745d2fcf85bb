use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;

use crate::api::ApiClient;
use crate::app::{handle_input, App};
use crate::dashboard::Dashboard;
use crate::ui;

// Configure event poll timeout (ms)
const EVENT_POLL_TIMEOUT: u64 = 50;

/// Run the application in headless mode (no UI)
pub async fn run_headless(client: &ApiClient, json: bool) -> Result<()> {
    let dashboard = Dashboard::from_outcome(client.load_all().await);

    if json {
        let json = serde_json::to_string_pretty(&dashboard.report())?;
        println!("{json}");
    } else {
        print!("{}", dashboard.text_report());
    }

    Ok(())
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        app.update();
        app.poll_loading().await?;

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if !matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                handle_input(app, key.code);
            }
            Ok(Event::Resize(_, _)) => {
                // Redraw happens on the next pass
            }
            Ok(_) | Err(_) => {}
        }
    }

    Ok(())
}
