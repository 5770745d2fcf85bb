use std::ops::Range;

/// Rows to draw so that `selected` stays inside a window of `capacity` rows.
pub fn visible_window(total: usize, capacity: usize, selected: usize) -> Range<usize> {
    if total <= capacity {
        return 0..total;
    }

    let start = selected.saturating_sub(capacity.saturating_sub(1));
    start..(start + capacity).min(total)
}
