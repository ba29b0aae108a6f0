//! Scoring module - line clear points, soft drop points, leveling and gravity
//!
//! Leveling is lazy: a lock raises the level by one when the cumulative line
//! count crosses a multiple of ten, and never by more than one per lock.

use crate::types::{LEVEL_SPEEDS_MS, LINES_PER_LEVEL, SCORE_TABLE, SOFT_DROP_POINTS};

/// Points for clearing `lines` rows in one lock at `level`.
///
/// Clears beyond four rows (impossible with four-cell pieces) score as four.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    let base = SCORE_TABLE[lines.min(SCORE_TABLE.len() - 1)];
    base.saturating_mul(level.saturating_add(1))
}

/// Points for `cells` successful soft drop steps.
pub fn soft_drop_score(cells: u32) -> u32 {
    cells.saturating_mul(SOFT_DROP_POINTS)
}

/// Level after a lock moved the line counter from `previous_lines` to `total_lines`.
pub fn next_level(level: u32, previous_lines: u32, total_lines: u32) -> u32 {
    if total_lines / LINES_PER_LEVEL > previous_lines / LINES_PER_LEVEL {
        level + 1
    } else {
        level
    }
}

/// Get gravity interval for a level (in milliseconds)
/// Levels past the table use its last entry
pub fn gravity_interval_ms(level: u32) -> u32 {
    let idx = (level as usize).min(LEVEL_SPEEDS_MS.len() - 1);
    LEVEL_SPEEDS_MS[idx]
}
