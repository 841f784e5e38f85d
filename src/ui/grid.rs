use std::ops::Range;

/// Questions per row in the jump list
pub const GRID_COLUMNS: usize = 4;

/// Width of one numbered cell, padding included
pub fn cell_width(question_count: usize) -> u16 {
    let digits = question_count.max(1).ilog10() as u16 + 1;
    digits + 2
}

pub fn row_count(question_count: usize) -> usize {
    question_count.div_ceil(GRID_COLUMNS)
}

/// Rows to draw so that the active question's row is on screen
pub fn visible_rows(question_count: usize, active_index: usize, height: usize) -> Range<usize> {
    window(row_count(question_count), active_index / GRID_COLUMNS, height)
}

/// A `height`-line slice of `total` lines that keeps line `focus` in view
pub fn window(total: usize, focus: usize, height: usize) -> Range<usize> {
    if height == 0 || total == 0 {
        return 0..0;
    }
    let first = (focus + 1).saturating_sub(height).min(total.saturating_sub(height));
    first..(first + height).min(total)
}

/// Question indices on one grid row
pub fn row_members(question_count: usize, row: usize) -> Range<usize> {
    let start = (row * GRID_COLUMNS).min(question_count);
    start..(start + GRID_COLUMNS).min(question_count)
}
