//! Scoring module - line-clear points, level curve and drop interval
//!
//! - Line clears: `LINE_SCORES[min(lines, 4)] * level`
//! - Level: `lines / 10 + 1` (starts at 1)
//! - Drop interval: `max(100, 1000 - (level - 1) * 100)` milliseconds
//! - Drops: soft drop +1 per row, hard drop +2 per row

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, HARD_DROP_POINTS, LINES_PER_LEVEL,
    LINE_SCORES, SOFT_DROP_POINTS,
};

/// Points for clearing `lines` rows in one lock at `level` (1-based).
///
/// More than four rows score as four.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES[lines.min(4)].saturating_mul(level)
}

/// Level reached after `total_lines` cleared lines.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Drop interval (ms) for a level, clamped at the 100ms floor.
pub fn drop_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(reduction)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells * HARD_DROP_POINTS
    } else {
        cells * SOFT_DROP_POINTS
    }
}
