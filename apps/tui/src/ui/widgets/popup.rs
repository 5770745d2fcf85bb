use ratatui::layout::Rect;

/// A `width` x `height` box centred in `area`, shrunk to fit.
pub const fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let width = if width < area.width { width } else { area.width };
    let height = if height < area.height { height } else { area.height };

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_is_centred_and_clamped() {
        let area = Rect::new(10, 5, 40, 20);
        assert_eq!(centered_box(20, 4, area), Rect::new(20, 13, 20, 4));
        assert_eq!(centered_box(100, 100, area), area);
    }
}
