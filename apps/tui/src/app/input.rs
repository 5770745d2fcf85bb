use crossterm::event::KeyCode;

use crate::app::state::{App, Tab};

pub fn handle_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => app.tab = app.tab.next(),
        KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => app.tab = app.tab.previous(),
        KeyCode::Char(digit @ '1'..='3') => {
            let index = (digit as usize) - ('1' as usize);
            if let Some(tab) = Tab::from_index(index) {
                app.tab = tab;
            }
        }
        KeyCode::Down | KeyCode::Char('j') if app.tab == Tab::Missions => {
            app.select_next_project();
        }
        KeyCode::Up | KeyCode::Char('k') if app.tab == Tab::Missions => {
            app.select_previous_project();
        }
        KeyCode::Char('r') => app.start_loading(),
        _ => {}
    }
}
