use portfolio_core::radar::{CANVAS_SIZE, CENTER};
use portfolio_core::{Point, RadarLayout};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

const GRID: Color = Color::DarkGray;
const STAR: Color = Color::Yellow;

/// Draws the skill star chart. Layout coordinates grow downwards, canvas
/// coordinates upwards, so every y is flipped.
pub fn render_skill_radar(layout: &RadarLayout, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Skill Radar ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 8 || inner.height < 6 {
        return;
    }

    // Terminal cells are about twice as tall as wide
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
                for ring in &layout.rings {
                    draw_closed(ctx, ring, GRID);
                }
                for vertex in &layout.outline {
                    draw_segment(ctx, center(), *vertex, GRID);
                }

                draw_closed(ctx, &layout.data_polygon(), STAR);
                draw_closed(ctx, &layout.inner_star, STAR);

                for point in &layout.points {
                    let offset = char_width * point.name.chars().count() as f64 / 2.0;
                    ctx.print(
                        point.label_x - offset,
                        flip(point.label_y),
                        Span::styled(point.name.clone(), Style::default().fg(Color::Gray)),
                    );
                }
            })
            .x_bounds([0.0, CANVAS_SIZE])
            .y_bounds([0.0, CANVAS_SIZE]),
        square,
    );
}

const fn center() -> Point {
    Point {
        x: CENTER,
        y: CENTER,
    }
}

fn flip(y: f64) -> f64 {
    CANVAS_SIZE - y
}

fn draw_segment(ctx: &mut Context<'_>, from: Point, to: Point, color: Color) {
    ctx.draw(&CanvasLine {
        x1: from.x,
        y1: flip(from.y),
        x2: to.x,
        y2: flip(to.y),
        color,
    });
}

fn draw_closed(ctx: &mut Context<'_>, polygon: &[Point], color: Color) {
    for (index, from) in polygon.iter().enumerate() {
        let to = polygon[(index + 1) % polygon.len()];
        draw_segment(ctx, *from, to, color);
    }
}
