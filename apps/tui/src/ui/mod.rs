// Rendering for the dashboard tabs

pub mod screens;
pub mod widgets;

use crate::app::{App, LoadState, Tab};
use crate::ui::widgets::popup::centered_box;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title area
            Constraint::Length(1), // Tabs
            Constraint::Min(8),    // Content area
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title(app, f, layout[0]);
    render_tabs(app, f, layout[1]);

    if let Some(dashboard) = &app.dashboard {
        match app.tab {
            Tab::Missions => {
                screens::missions::render_missions(dashboard, app.selected_project, f, layout[2]);
            }
            Tab::Intel => screens::intel::render_intel(dashboard, f, layout[2]),
            Tab::Profile => screens::profile::render_profile(dashboard, f, layout[2]),
        }
    } else {
        render_loading(app, f, layout[2]);
    }

    render_status(app, f, layout[3]);
    render_shortcuts(f, layout[4]);
}

fn render_title(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (name, headline) = app.dashboard.as_ref().map_or(
        (
            crate::dashboard::FALLBACK_NAME,
            crate::dashboard::FALLBACK_HEADLINE,
        ),
        |dashboard| (dashboard.display_name(), dashboard.headline()),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let title = Paragraph::new(vec![
        TextLine::from(Span::styled(
            name.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            headline.to_string(),
            Style::default().fg(Color::White),
        )),
    ])
    .block(block)
    .alignment(Alignment::Left);

    f.render_widget(title, area);
}

fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = Tab::ALL
        .iter()
        .map(|tab| TextLine::from(format!(" {} {} ", tab.index() + 1, tab.title())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn render_loading(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let throbber = Throbber::default()
        .label("Loading portfolio data...")
        .style(Style::default().fg(Color::Cyan))
        .throbber_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);

    f.render_stateful_widget(throbber, centered_box(30, 1, area), &mut app.throbber);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let color = if app.load_state == LoadState::Loading {
        Color::Yellow
    } else {
        Color::Green
    };

    f.render_widget(
        Paragraph::new(Span::styled(
            app.status_message.clone(),
            Style::default().fg(color),
        )),
        area,
    );
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let hint = Paragraph::new(Span::styled(
        "←/→ or 1-3: tabs | ↑/↓: select mission | r: reload | q/Esc: quit",
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(hint, area);
}
