//! Scoring module - line clear points, levels and gravity speed
//!
//! Classic rules with a 1-based level:
//! - Clearing n rows at once awards `LINE_SCORES[n] * level`.
//! - The level is `lines / 10 + 1` and never goes down.
//! - Each level shaves 50 ms off the drop interval, down to a 50 ms floor.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
    SOFT_DROP_POINTS,
};

/// Outcome of applying the scoring policy to one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points earned by the clear
    pub points: u32,
    /// Level after the clear
    pub level: u32,
    /// Whether the level rose
    pub level_up: bool,
    /// Gravity interval to use from now on
    pub drop_interval_ms: u32,
}

/// Points for clearing `lines` rows at `level`.
///
/// More than four rows cannot happen with tetrominoes; the table saturates at a tetris.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    let base = LINE_SCORES[lines.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level)
}

/// Level reached after `total_lines` cleared lines
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level (in milliseconds)
pub fn drop_interval_for_level(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Apply the policy for a lock that cleared `cleared` rows.
///
/// `level` and `total_lines` are the values before the lock. The interval only changes when
/// the level rises, so callers can keep whatever interval they had otherwise.
pub fn calculate_score(cleared: usize, level: u32, total_lines: u32) -> ScoreResult {
    let points = calculate_line_score(cleared, level);
    let new_level = level_for_lines(total_lines.saturating_add(cleared as u32));
    let level_up = new_level > level;
    let level = level.max(new_level);

    ScoreResult {
        points,
        level,
        level_up,
        drop_interval_ms: drop_interval_for_level(level),
    }
}

/// Soft drop: +1 per cell
pub fn calculate_drop_score(cells: u32) -> u32 {
    cells.saturating_mul(SOFT_DROP_POINTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 1
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 40);
        assert_eq!(calculate_line_score(2, 1), 100);
        assert_eq!(calculate_line_score(3, 1), 300);
        assert_eq!(calculate_line_score(4, 1), 1200);

        // Level 5
        assert_eq!(calculate_line_score(1, 5), 40 * 5);
        assert_eq!(calculate_line_score(4, 5), 1200 * 5);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(29), 3);
        assert_eq!(level_for_lines(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_for_level(1), 1000);
        assert_eq!(drop_interval_for_level(2), 950);
        assert_eq!(drop_interval_for_level(10), 550);
        assert_eq!(drop_interval_for_level(19), 100);
        assert_eq!(drop_interval_for_level(20), 50);
        assert_eq!(drop_interval_for_level(500), 50); // Floor at 50
    }

    #[test]
    fn test_score_without_level_change() {
        let result = calculate_score(2, 1, 3);
        assert_eq!(
            result,
            ScoreResult {
                points: 100,
                level: 1,
                level_up: false,
                drop_interval_ms: 1000,
            }
        );
    }

    #[test]
    fn test_reaching_ten_lines_levels_up() {
        // Points use the level before the clear.
        let result = calculate_score(1, 1, 9);
        assert_eq!(result.points, 40);
        assert_eq!(result.level, 2);
        assert!(result.level_up);
        assert_eq!(result.drop_interval_ms, 950);
    }

    #[test]
    fn test_empty_lock_scores_nothing() {
        let result = calculate_score(0, 3, 25);
        assert_eq!(result.points, 0);
        assert!(!result.level_up);
        assert_eq!(result.level, 3);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(1), 1);
        assert_eq!(calculate_drop_score(10), 10);
    }
}
