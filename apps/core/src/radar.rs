//! Five-axis skills star chart layout.
//!
//! Coordinates live on a fixed 400x400 logical canvas with y growing
//! downwards, so axis 0 points straight up and the rest follow clockwise.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write as _;

use serde::Serialize;

use crate::normalize::Skill;

pub const CANVAS_SIZE: f64 = 400.0;
pub const CENTER: f64 = 200.0;
pub const RADIUS: f64 = 145.0;
pub const RING_LEVELS: usize = 4;
pub const LABEL_OFFSET: f64 = 30.0;
/// Smallest radius fraction a data vertex is drawn at, so zero scores stay visible.
pub const MIN_RADIUS_FRACTION: f64 = 0.15;
pub const INNER_STAR_FRACTION: f64 = 0.18;
pub const DEFAULT_AXIS_COUNT: usize = 5;
pub const DEFAULT_LABELS: [&str; 5] = ["Offense", "Defense", "Web", "Crypto", "Forensics"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn polar(angle: f64, distance: f64) -> Self {
        Self {
            x: angle.cos().mul_add(distance, CENTER),
            y: angle.sin().mul_add(distance, CENTER),
        }
    }
}

/// One plotted axis: the data vertex and where its label sits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPoint {
    pub x: f64,
    pub y: f64,
    pub label_x: f64,
    pub label_y: f64,
    pub name: String,
    pub value: f64,
    /// Share of the outer radius, after the floor is applied.
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarLayout {
    pub axis_count: usize,
    pub max_value: f64,
    pub points: Vec<SkillPoint>,
    /// Grid rings from innermost to the outer edge.
    pub rings: Vec<Vec<Point>>,
    /// Full-radius backdrop polygon.
    pub outline: Vec<Point>,
    pub inner_star: Vec<Point>,
}

impl RadarLayout {
    pub fn new(skills: &[Skill]) -> Self {
        Self::with_axes(skills, DEFAULT_AXIS_COUNT)
    }

    pub fn with_axes(skills: &[Skill], axis_count: usize) -> Self {
        let plotted = pad_skills(skills, axis_count);
        let max_value = plotted
            .iter()
            .map(|skill| skill.value)
            .fold(1.0_f64, f64::max);

        let points = plotted
            .into_iter()
            .enumerate()
            .map(|(index, skill)| {
                let angle = axis_angle(index, axis_count);
                let fraction = radius_fraction(skill.value, max_value);
                let vertex = Point::polar(angle, RADIUS * fraction);
                let label = Point::polar(angle, RADIUS + LABEL_OFFSET);
                SkillPoint {
                    x: vertex.x,
                    y: vertex.y,
                    label_x: label.x,
                    label_y: label.y,
                    name: skill.name,
                    value: skill.value,
                    fraction,
                }
            })
            .collect();

        let rings = (1..=RING_LEVELS)
            .map(|level| regular_polygon(level as f64 / RING_LEVELS as f64, axis_count))
            .collect();

        Self {
            axis_count,
            max_value,
            points,
            rings,
            outline: regular_polygon(1.0, axis_count),
            inner_star: regular_polygon(INNER_STAR_FRACTION, axis_count),
        }
    }

    pub fn data_polygon(&self) -> Vec<Point> {
        self.points
            .iter()
            .map(|point| Point {
                x: point.x,
                y: point.y,
            })
            .collect()
    }
}

/// Angle of axis `index`, starting at -90 degrees and turning clockwise.
pub fn axis_angle(index: usize, axis_count: usize) -> f64 {
    (index as f64).mul_add(TAU / axis_count as f64, -FRAC_PI_2)
}

/// `scale` is a fraction of the full chart radius.
pub fn regular_polygon(scale: f64, axis_count: usize) -> Vec<Point> {
    (0..axis_count)
        .map(|index| Point::polar(axis_angle(index, axis_count), RADIUS * scale))
        .collect()
}

/// Renders points as an SVG `points` attribute: `"x,y x,y ..."`.
pub fn polygon_points(points: &[Point]) -> String {
    let mut out = String::new();
    for (index, point) in points.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", point.x, point.y);
    }
    out
}

fn radius_fraction(value: f64, max_value: f64) -> f64 {
    let ratio = value / max_value;
    if ratio.is_nan() {
        return MIN_RADIUS_FRACTION;
    }
    ratio.clamp(MIN_RADIUS_FRACTION, 1.0)
}

fn pad_skills(skills: &[Skill], axis_count: usize) -> Vec<Skill> {
    let mut plotted: Vec<Skill> = skills.iter().take(axis_count).cloned().collect();
    while plotted.len() < axis_count {
        let index = plotted.len();
        plotted.push(Skill::new(default_label(index), 0.0));
    }
    plotted
}

fn default_label(index: usize) -> String {
    DEFAULT_LABELS
        .get(index)
        .map_or_else(|| format!("Skill {}", index + 1), |label| (*label).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    fn distance_from_center(x: f64, y: f64) -> f64 {
        (x - CENTER).hypot(y - CENTER)
    }

    #[test]
    fn single_skill_pads_to_five_axes() {
        let layout = RadarLayout::new(&[Skill::new("Web", 90.0)]);

        assert_eq!(layout.points.len(), 5);
        assert_eq!(layout.points[0].name, "Web");
        assert_close(layout.points[0].value, 90.0);
        assert_close(layout.points[0].fraction, 1.0);

        let padded: Vec<&str> = layout.points[1..].iter().map(|p| p.name.as_str()).collect();
        assert_eq!(padded, ["Defense", "Web", "Crypto", "Forensics"]);
        for point in &layout.points[1..] {
            assert_close(point.value, 0.0);
            assert_close(point.fraction, MIN_RADIUS_FRACTION);
        }
    }

    #[test]
    fn empty_input_uses_every_default_label() {
        let layout = RadarLayout::new(&[]);
        let labels: Vec<&str> = layout.points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(labels, DEFAULT_LABELS);
        assert_close(layout.max_value, 1.0);
    }

    #[test]
    fn extra_skills_are_not_plotted() {
        let skills: Vec<Skill> = (0..8).map(|i| Skill::new(format!("s{i}"), 10.0)).collect();
        let layout = RadarLayout::new(&skills);
        assert_eq!(layout.points.len(), 5);
        assert_eq!(layout.points[4].name, "s4");
    }

    #[test]
    fn first_axis_points_up_and_axes_turn_clockwise() {
        let layout = RadarLayout::new(&[Skill::new("Top", 100.0)]);
        let top = &layout.points[0];
        assert_close(top.x, CENTER);
        assert_close(top.y, CENTER - RADIUS);

        // second axis sits to the right of center (clockwise on a y-down canvas)
        assert!(layout.points[1].x > CENTER);
        assert_close(axis_angle(1, 5), -FRAC_PI_2 + TAU / 5.0);
    }

    #[test]
    fn vertices_scale_against_the_largest_value() {
        let layout = RadarLayout::new(&[
            Skill::new("a", 80.0),
            Skill::new("b", 40.0),
            Skill::new("c", 4.0),
        ]);

        assert_close(layout.max_value, 80.0);
        assert_close(layout.points[1].fraction, 0.5);
        assert_close(layout.points[2].fraction, MIN_RADIUS_FRACTION);
        assert_close(
            distance_from_center(layout.points[1].x, layout.points[1].y),
            RADIUS * 0.5,
        );
    }

    #[test]
    fn labels_sit_outside_the_outer_ring_regardless_of_value() {
        let layout = RadarLayout::new(&[Skill::new("a", 100.0), Skill::new("b", 1.0)]);
        for point in &layout.points {
            assert_close(
                distance_from_center(point.label_x, point.label_y),
                RADIUS + LABEL_OFFSET,
            );
        }
    }

    #[test]
    fn rings_and_inner_star_are_static() {
        let layout = RadarLayout::new(&[Skill::new("a", 3.0)]);
        assert_eq!(layout.rings.len(), RING_LEVELS);
        for (index, ring) in layout.rings.iter().enumerate() {
            assert_eq!(ring.len(), 5);
            let expected = RADIUS * (index + 1) as f64 / RING_LEVELS as f64;
            assert_close(distance_from_center(ring[0].x, ring[0].y), expected);
        }
        assert_eq!(layout.outline, layout.rings[RING_LEVELS - 1]);
        assert_close(
            distance_from_center(layout.inner_star[2].x, layout.inner_star[2].y),
            RADIUS * INNER_STAR_FRACTION,
        );

        let other = RadarLayout::new(&[Skill::new("z", 99.0)]);
        assert_eq!(layout.rings, other.rings);
    }

    #[test]
    fn zero_axes_produce_an_empty_layout() {
        let layout = RadarLayout::with_axes(&[Skill::new("a", 1.0)], 0);
        assert!(layout.points.is_empty());
        assert!(layout.outline.is_empty());
        assert!(layout.rings.iter().all(Vec::is_empty));
    }

    #[test]
    fn custom_axis_count_labels_past_defaults() {
        let layout = RadarLayout::with_axes(&[], 7);
        assert_eq!(layout.points[5].name, "Skill 6");
        assert_eq!(layout.points[6].name, "Skill 7");
    }

    #[test]
    fn polygon_points_formats_pairs() {
        let text = polygon_points(&[Point { x: 1.5, y: 2.0 }, Point { x: 3.0, y: 4.25 }]);
        assert_eq!(text, "1.5,2 3,4.25");
    }
}
