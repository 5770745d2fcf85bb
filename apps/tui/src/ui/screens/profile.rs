use crate::dashboard::Dashboard;
use portfolio_core::Profile;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const MISSING_BIO: &str = "No bio published yet.";

pub fn render_profile(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let profile = match &dashboard.profile {
        Ok(profile) => profile,
        Err(error) => {
            let block = Block::default()
                .title(" Profile ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red));
            f.render_widget(
                Paragraph::new(format!("Profile unavailable: {error}"))
                    .block(block)
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true }),
                area,
            );
            return;
        }
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_about(profile, f, columns[0]);
    render_experience(profile, f, columns[1]);
}

fn heading(text: &str) -> TextLine<'static> {
    TextLine::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_about(profile: &Profile, f: &mut Frame<'_>, area: Rect) {
    let mut lines = vec![TextLine::from(profile.bio_or(MISSING_BIO).to_string())];

    if !profile.languages.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(heading("Languages"));
        lines.push(TextLine::from(profile.languages.join(" · ")));
    }

    if !profile.certifications.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(heading("Certifications"));
        for cert in &profile.certifications {
            lines.push(TextLine::from(vec![
                Span::raw(format!("• {}", cert.name)),
                Span::styled(
                    format!("  {} {}", cert.issuer, cert.date),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }
    }

    if !profile.cv_url.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(vec![
            Span::styled("CV: ", Style::default().fg(Color::Gray)),
            Span::styled(profile.cv_url.clone(), Style::default().fg(Color::Blue)),
        ]));
    }

    let block = Block::default()
        .title(" About ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_experience(profile: &Profile, f: &mut Frame<'_>, area: Rect) {
    let mut lines = Vec::new();

    for entry in &profile.experience {
        if !lines.is_empty() {
            lines.push(TextLine::from(""));
        }
        lines.push(TextLine::from(vec![
            Span::styled(
                entry.role.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" @ {}", entry.company)),
        ]));
        lines.push(TextLine::from(Span::styled(
            entry.date_range.clone(),
            Style::default().fg(Color::Gray),
        )));
        lines.extend(
            entry
                .description
                .iter()
                .map(|item| TextLine::from(format!("  - {item}"))),
        );
    }

    if lines.is_empty() {
        lines.push(TextLine::from(Span::styled(
            "No experience listed.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .title(" Experience ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
