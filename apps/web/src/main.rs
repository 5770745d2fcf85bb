use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use portfolio_core::domain::{PROFILE_PATH, REPOS_PATH, TRACKER_PATH};
use portfolio_core::normalize::ROOM_DISPLAY_LIMIT;
use portfolio_core::radar::{CANVAS_SIZE, DEFAULT_AXIS_COUNT};
use portfolio_core::{
    featured_projects, format_date, merge_projects, normalize, repos_from_value,
    skill_bar_percent, NormalizedStats, Point, Profile, Project, RadarLayout,
};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span, Text},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Paragraph, Tabs, Wrap,
    },
    Frame, Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Request, RequestInit, RequestMode, Response};

const LOCAL_API_BASE: &str = "http://localhost:8080";
const TAB_TITLES: [&str; 3] = ["Missions", "Intel", "Profile"];

/// Per-section fetch state; sections load and fail independently.
enum Section<T> {
    Loading,
    Failed(String),
    Ready(T),
}

type Slot<T> = Rc<RefCell<Section<T>>>;

fn slot<T>() -> Slot<T> {
    Rc::new(RefCell::new(Section::Loading))
}

struct Intel {
    stats: NormalizedStats,
    radar: RadarLayout,
}

impl Intel {
    fn from_payload(raw: &Value) -> Self {
        let stats = normalize(raw);
        let radar = RadarLayout::new(stats.top_skills(DEFAULT_AXIS_COUNT));
        Self { stats, radar }
    }
}

fn main() -> io::Result<()> {
    let profile: Slot<Profile> = slot();
    let projects: Slot<Vec<Project>> = slot();
    let intel: Slot<Intel> = slot();
    let tab_index = Rc::new(RefCell::new(0_usize));
    let selected = Rc::new(RefCell::new(0_usize));

    let bases = api_base_candidates(configured_api_base(), page_origin());

    spawn_local(load(bases.clone(), PROFILE_PATH, profile.clone(), |value| {
        Profile::deserialize(&value).map_err(|error| format!("unexpected profile shape: {error}"))
    }));
    spawn_local(load(bases.clone(), REPOS_PATH, projects.clone(), |value| {
        Ok(merge_projects(featured_projects(), &repos_from_value(&value)))
    }));
    spawn_local(load(bases, TRACKER_PATH, intel.clone(), |value| {
        Ok(Intel::from_payload(&value))
    }));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let tab_index = tab_index.clone();
        let selected = selected.clone();
        move |event| match event.code {
            ratzilla::event::KeyCode::Left => {
                let mut index = tab_index.borrow_mut();
                *index = (*index + TAB_TITLES.len() - 1) % TAB_TITLES.len();
            }
            ratzilla::event::KeyCode::Right => {
                let mut index = tab_index.borrow_mut();
                *index = (*index + 1) % TAB_TITLES.len();
            }
            ratzilla::event::KeyCode::Up => {
                let mut row = selected.borrow_mut();
                *row = row.saturating_sub(1);
            }
            ratzilla::event::KeyCode::Down => {
                *selected.borrow_mut() += 1;
            }
            ratzilla::event::KeyCode::Char(digit @ '1'..='3') => {
                *tab_index.borrow_mut() = digit as usize - '1' as usize;
            }
            _ => {}
        }
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let block = Block::default()
            .title(header_title(&profile.borrow()))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area).inner(Margin::new(1, 1));
        f.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(8)])
            .split(inner);

        let index = *tab_index.borrow();
        render_tabs(index, f, layout[0]);

        match index {
            0 => {
                let projects = projects.borrow();
                // Clamp here since the key handler cannot see the list
                if let Section::Ready(list) = &*projects {
                    let mut row = selected.borrow_mut();
                    *row = (*row).min(list.len().saturating_sub(1));
                }
                render_missions(&projects, *selected.borrow(), f, layout[1]);
            }
            1 => render_intel(&intel.borrow(), f, layout[1]),
            _ => render_profile(&profile.borrow(), f, layout[1]),
        }
    });

    Ok(())
}

fn header_title(profile: &Section<Profile>) -> String {
    match profile {
        Section::Ready(profile) => format!(
            " {} | {} ",
            profile.display_name_or("Portfolio"),
            profile.headline_or("Security-minded software engineer")
        ),
        Section::Loading | Section::Failed(_) => " Portfolio ".to_string(),
    }
}

fn render_tabs(index: usize, f: &mut Frame<'_>, area: Rect) {
    let titles = TAB_TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| TextLine::from(format!(" {} {title} ", i + 1)))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(index)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

/// The section's data, or `None` after drawing its loading or failure placeholder.
fn ready_or_placeholder<'a, T>(
    section: &'a Section<T>,
    what: &str,
    f: &mut Frame<'_>,
    area: Rect,
) -> Option<&'a T> {
    let (text, color) = match section {
        Section::Loading => (format!("Loading {what}..."), Color::Gray),
        Section::Failed(error) => (format!("{what} unavailable: {error}"), Color::Red),
        Section::Ready(data) => return Some(data),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    f.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true }),
        area,
    );
    None
}

fn render_missions(section: &Section<Vec<Project>>, selected: usize, f: &mut Frame<'_>, area: Rect) {
    let Some(projects) = ready_or_placeholder(section, "Repositories", f, area) else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let lines = projects
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let style = if i == selected {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            TextLine::from(Span::styled(
                format!("{:<28} {}", project.name, project.language),
                style,
            ))
        })
        .collect::<Vec<_>>();

    // Keep the selection on screen
    let visible = usize::from(columns[0].height.saturating_sub(2));
    let scroll = selected.saturating_sub(visible.saturating_sub(1));

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .title(format!(" Missions ({}) ", projects.len()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0)),
        columns[0],
    );

    if let Some(project) = projects.get(selected) {
        let focus = vec![
            TextLine::from(Span::styled(
                project.name.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            TextLine::from(""),
            TextLine::from(project.description.clone()),
            TextLine::from(""),
            TextLine::from(format!("Language: {}", project.language)),
            TextLine::from(format!(
                "Updated:  {}",
                format_date(project.pushed_at.as_deref())
            )),
            TextLine::from(Span::styled(
                project.url.clone(),
                Style::default().fg(Color::Blue),
            )),
        ];
        f.render_widget(
            Paragraph::new(Text::from(focus))
                .block(
                    Block::default()
                        .title(" Mission Focus ")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .wrap(Wrap { trim: true }),
            columns[1],
        );
    }
}

fn render_intel(section: &Section<Intel>, f: &mut Frame<'_>, area: Rect) {
    let Some(intel) = ready_or_placeholder(section, "Tracker", f, area) else {
        return;
    };
    let stats = &intel.stats;

    if stats.disabled {
        let message = stats.message.as_deref().unwrap_or_default();
        f.render_widget(
            Paragraph::new(message.to_string())
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            area,
        );
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_radar(&intel.radar, f, columns[0]);

    let mut lines = vec![
        TextLine::from(format!("Global rank:     {}", stats.rank)),
        TextLine::from(format!(
            "Rooms completed: {}",
            stats.rooms_completed_display()
        )),
        TextLine::from(format!("Skills tracked:  {}", stats.skills.len())),
        TextLine::from(""),
    ];

    let max_value = stats.max_skill_value();
    for skill in &stats.skills {
        let percent = skill_bar_percent(skill.value, max_value);
        let filled = (0..20).filter(|cell| f64::from(*cell) * 5.0 < percent).count();
        lines.push(TextLine::from(vec![
            Span::raw(format!("{:<16} ", skill.name)),
            Span::styled("█".repeat(filled), Style::default().fg(Color::Yellow)),
            Span::styled("░".repeat(20 - filled), Style::default().fg(Color::DarkGray)),
            Span::raw(format!(" {:>5.1}", skill.value)),
        ]));
    }

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
            lines.push(TextLine::from(format!("  +{hidden} more rooms")));
        }
    }

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .title(" TryHackMe ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .wrap(Wrap { trim: false }),
        columns[1],
    );
}

fn render_radar(layout: &RadarLayout, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Skill Radar ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 8 || inner.height < 6 {
        return;
    }

    let height = inner.height.min(inner.width / 2).max(1);
    let width = (height * 2).min(inner.width);
    let square = Rect {
        x: inner.x + (inner.width - width) / 2,
        y: inner.y + (inner.height - height) / 2,
        width,
        height,
    };
    let char_width = CANVAS_SIZE / f64::from(square.width);

    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .paint(|ctx| {
                // Canvas y grows upwards
                let mut polygon = |points: &[Point], color: Color| {
                    for (i, from) in points.iter().enumerate() {
                        let to = points[(i + 1) % points.len()];
                        ctx.draw(&CanvasLine {
                            x1: from.x,
                            y1: CANVAS_SIZE - from.y,
                            x2: to.x,
                            y2: CANVAS_SIZE - to.y,
                            color,
                        });
                    }
                };

                for ring in &layout.rings {
                    polygon(ring, Color::DarkGray);
                }
                polygon(&layout.data_polygon(), Color::Yellow);
                polygon(&layout.inner_star, Color::Yellow);

                for point in &layout.points {
                    let offset = char_width * point.name.chars().count() as f64 / 2.0;
                    ctx.print(
                        point.label_x - offset,
                        CANVAS_SIZE - point.label_y,
                        Span::styled(point.name.clone(), Style::default().fg(Color::Gray)),
                    );
                }
            })
            .x_bounds([0.0, CANVAS_SIZE])
            .y_bounds([0.0, CANVAS_SIZE]),
        square,
    );
}

fn render_profile(section: &Section<Profile>, f: &mut Frame<'_>, area: Rect) {
    let Some(profile) = ready_or_placeholder(section, "Profile", f, area) else {
        return;
    };

    let heading = |text: &str| {
        TextLine::from(Span::styled(
            text.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let mut lines = vec![TextLine::from(
        profile.bio_or("No bio published yet.").to_string(),
    )];

    if !profile.languages.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(heading("Languages"));
        lines.push(TextLine::from(profile.languages.join(" · ")));
    }

    if !profile.experience.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(heading("Experience"));
        for entry in &profile.experience {
            lines.push(TextLine::from(format!(
                "{} @ {} ({})",
                entry.role, entry.company, entry.date_range
            )));
            lines.extend(
                entry
                    .description
                    .iter()
                    .map(|item| TextLine::from(format!("  - {item}"))),
            );
        }
    }

    if !profile.certifications.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(heading("Certifications"));
        for cert in &profile.certifications {
            lines.push(TextLine::from(format!(
                "• {}  {} {}",
                cert.name, cert.issuer, cert.date
            )));
        }
    }

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .title(" Profile ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// `window.PORTFOLIO_API_BASE`, set by the hosting page.
fn configured_api_base() -> Option<String> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str("PORTFOLIO_API_BASE"))
        .ok()?
        .as_string()
}

fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

/// Configured base, then the page origin, then the local backend. Blank and
/// repeated entries are dropped.
fn api_base_candidates(configured: Option<String>, origin: Option<String>) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    for base in [configured, origin, Some(LOCAL_API_BASE.to_string())]
        .into_iter()
        .flatten()
    {
        let base = base.trim().trim_end_matches('/');
        if base.is_empty() || base == "null" || candidates.iter().any(|known| known == base) {
            continue;
        }
        candidates.push(base.to_string());
    }

    candidates
}

async fn load<T, F>(bases: Vec<String>, path: &'static str, store: Slot<T>, build: F)
where
    F: FnOnce(Value) -> Result<T, String>,
{
    let result = fetch_json(&bases, path).await.and_then(build);

    *store.borrow_mut() = match result {
        Ok(value) => Section::Ready(value),
        Err(error) => {
            web_sys::console::error_1(&format!("{path}: {error}").into());
            Section::Failed(error)
        }
    };
}

async fn fetch_json(bases: &[String], path: &str) -> Result<Value, String> {
    let mut last_error = "no API base URL configured".to_string();

    for base in bases {
        let url = format!("{base}{path}");
        match fetch_url(&url).await {
            Ok(value) => return Ok(value),
            Err(error) => {
                web_sys::console::warn_1(&format!("{url}: {error}").into());
                last_error = error;
            }
        }
    }

    Err(last_error)
}

async fn fetch_url(url: &str) -> Result<Value, String> {
    let window = web_sys::window().ok_or("no window")?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?
        .dyn_into::<Response>()
        .map_err(js_error)?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let body = JsFuture::from(response.json().map_err(js_error)?)
        .await
        .map_err(js_error)?;

    serde_wasm_bindgen::from_value::<Value>(body).map_err(|error| error.to_string())
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
