use crate::dashboard::Dashboard;
use crate::ui::widgets::radar::render_skill_radar;
use crate::ui::widgets::skill_bars::skill_bar_lines;
use portfolio_core::normalize::ROOM_DISPLAY_LIMIT;
use portfolio_core::NormalizedStats;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_intel(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let stats = match &dashboard.intel {
        Err(error) => {
            render_notice(f, area, &format!("Tracker unavailable: {error}"), Color::Red);
            return;
        }
        Ok(stats) if stats.disabled => {
            let message = stats.message.as_deref().unwrap_or_default();
            render_notice(f, area, message, Color::Gray);
            return;
        }
        Ok(stats) => stats,
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_skill_radar(&dashboard.radar, f, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(columns[1]);

    render_summary(stats, f, right[0]);
    render_details(stats, f, right[1]);
}

fn render_notice(f: &mut Frame<'_>, area: Rect, message: &str, color: Color) {
    let block = Block::default()
        .title(" Intel ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    f.render_widget(
        Paragraph::new(message.to_string())
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_summary(stats: &NormalizedStats, f: &mut Frame<'_>, area: Rect) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        TextLine::from(vec![
            Span::styled("Global rank:     ", label),
            Span::styled(stats.rank.to_string(), value),
        ]),
        TextLine::from(vec![
            Span::styled("Rooms completed: ", label),
            Span::styled(stats.rooms_completed_display(), value),
        ]),
        TextLine::from(vec![
            Span::styled("Skills tracked:  ", label),
            Span::styled(stats.skills.len().to_string(), value),
        ]),
    ];

    let block = Block::default()
        .title(" TryHackMe ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_details(stats: &NormalizedStats, f: &mut Frame<'_>, area: Rect) {
    let mut lines = if stats.skills.is_empty() {
        vec![TextLine::from(Span::styled(
            "No skill data reported.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        skill_bar_lines(&stats.skills, stats.max_skill_value())
    };

    if let Some(note) = &stats.sync_note {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled(
            note.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let (rooms, hidden) = stats.visible_rooms(ROOM_DISPLAY_LIMIT);
    if !rooms.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled(
            "Completed rooms",
            Style::default().fg(Color::Cyan),
        )));
        lines.extend(rooms.iter().map(|room| TextLine::from(format!("  {room}"))));
        if hidden > 0 {
            lines.push(TextLine::from(Span::styled(
                format!("  +{hidden} more rooms"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let block = Block::default()
        .title(" Skills ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
