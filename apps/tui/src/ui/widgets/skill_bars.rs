use portfolio_core::{skill_bar_percent, Skill};
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};

const BAR_WIDTH: usize = 20;

/// One line per skill: name, a proportional bar and the raw value.
pub fn skill_bar_lines(skills: &[Skill], max_value: f64) -> Vec<TextLine<'static>> {
    skills
        .iter()
        .map(|skill| {
            let percent = skill_bar_percent(skill.value, max_value);
            let filled = filled_cells(percent);

            TextLine::from(vec![
                Span::raw(format!("{:<16} ", truncate(&skill.name, 16))),
                Span::styled("█".repeat(filled), Style::default().fg(Color::Yellow)),
                Span::styled(
                    "░".repeat(BAR_WIDTH - filled),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(format!(" {:>5.1}", skill.value)),
            ])
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn filled_cells(percent: f64) -> usize {
    let cells = (percent / 100.0 * BAR_WIDTH as f64).round();
    (cells.clamp(0.0, BAR_WIDTH as f64)) as usize
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_against_the_maximum() {
        assert_eq!(filled_cells(100.0), BAR_WIDTH);
        assert_eq!(filled_cells(50.0), BAR_WIDTH / 2);
        assert_eq!(filled_cells(0.0), 0);
        assert_eq!(filled_cells(250.0), BAR_WIDTH);
    }

    #[test]
    fn one_line_per_skill() {
        let skills = [Skill::new("Web", 80.0), Skill::new("Cryptography and Ciphers", 20.0)];
        let lines = skill_bar_lines(&skills, 80.0);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[0].content, "Cryptography an… ");
    }
}
