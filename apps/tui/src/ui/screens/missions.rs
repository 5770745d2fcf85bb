use crate::dashboard::Dashboard;
use crate::ui::widgets::tables::visible_window;
use portfolio_core::{format_date, Project};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

pub fn render_missions(dashboard: &Dashboard, selected: usize, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_project_table(dashboard, selected, f, columns[0]);

    if let Some(project) = dashboard.projects.get(selected) {
        render_project_focus(project, f, columns[1]);
    }
}

fn render_project_table(dashboard: &Dashboard, selected: usize, f: &mut Frame<'_>, area: Rect) {
    let mut block = Block::default()
        .title(format!(" Missions ({}) ", dashboard.projects.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    if let Some(error) = &dashboard.repos_error {
        block = block.title_bottom(Span::styled(
            format!(" repositories unavailable: {error} "),
            Style::default().fg(Color::Red),
        ));
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Language"),
        Cell::from("Updated"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    // Borders and header
    let capacity = area.height.saturating_sub(3) as usize;
    let window = visible_window(dashboard.projects.len(), capacity, selected);
    let first = window.start;

    let rows = dashboard.projects[window]
        .iter()
        .enumerate()
        .map(|(offset, project)| {
            let style = if first + offset == selected {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(project.name.clone()),
                Cell::from(project.language.clone()),
                Cell::from(format_date(project.pushed_at.as_deref())),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(13),
    ];

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn render_project_focus(project: &Project, f: &mut Frame<'_>, area: Rect) {
    let label = Style::default().fg(Color::Gray);

    let lines = vec![
        TextLine::from(Span::styled(
            project.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(project.description.clone()),
        TextLine::from(""),
        TextLine::from(vec![
            Span::styled("Language: ", label),
            Span::raw(project.language.clone()),
        ]),
        TextLine::from(vec![
            Span::styled("Updated:  ", label),
            Span::raw(format_date(project.pushed_at.as_deref())),
        ]),
        TextLine::from(vec![
            Span::styled("Link:     ", label),
            Span::styled(project.url.clone(), Style::default().fg(Color::Blue)),
        ]),
    ];

    let block = Block::default()
        .title(" Mission Focus ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
