//! Scoring module - classic Nintendo line-clear scoring and level progression
//!
//! Points for a clear use the level *before* the clear is counted. Every ten
//! lines the level goes up and the gravity threshold shrinks.

use crate::types::{
    FAST_SPEEDUP_LEVELS, FAST_SPEEDUP_TICKS, INITIAL_TICKS_PER_DROP, LINES_PER_LEVEL, LINE_SCORES,
    MAX_LINES_PER_LOCK, MIN_TICKS_PER_DROP,
};

/// Result of scoring one line clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearSummary {
    pub lines: u32,
    pub points: u32,
    /// Whether this clear advanced the level
    pub level_up: bool,
}

/// Calculate line clear score (Classic rules)
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > MAX_LINES_PER_LOCK {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.saturating_add(1))
}

/// Drop threshold after reaching `new_level`
pub fn next_ticks_per_drop(new_level: u32, ticks_per_drop: u32) -> u32 {
    if new_level < FAST_SPEEDUP_LEVELS && ticks_per_drop > FAST_SPEEDUP_TICKS {
        ticks_per_drop - FAST_SPEEDUP_TICKS
    } else if ticks_per_drop > MIN_TICKS_PER_DROP {
        ticks_per_drop - 1
    } else {
        ticks_per_drop
    }
}

/// Score, lines, level and the gravity threshold they drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    pub score: u32,
    /// Total lines cleared
    pub lines: u32,
    pub level: u32,
    /// Lines accumulated toward the next level (always below 10)
    pub lines_toward_level: u32,
    /// Ticks between automatic drops
    pub ticks_per_drop: u32,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 0,
            lines_toward_level: 0,
            ticks_per_drop: INITIAL_TICKS_PER_DROP,
        }
    }

    /// Account for `lines` cleared by a single lock
    pub fn record_clear(&mut self, lines: usize) -> ClearSummary {
        debug_assert!(lines <= MAX_LINES_PER_LOCK, "{lines} lines in one lock");

        let points = line_clear_points(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.lines += lines as u32;

        self.lines_toward_level += lines as u32;
        let level_up = self.lines_toward_level >= LINES_PER_LEVEL;
        if level_up {
            self.level += 1;
            self.lines_toward_level -= LINES_PER_LEVEL;
            self.ticks_per_drop = next_ticks_per_drop(self.level, self.ticks_per_drop);
        }

        ClearSummary {
            lines: lines as u32,
            points,
            level_up,
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 0
        assert_eq!(line_clear_points(1, 0), 40);
        assert_eq!(line_clear_points(2, 0), 100);
        assert_eq!(line_clear_points(3, 0), 300);
        assert_eq!(line_clear_points(4, 0), 1200);

        // Level 3
        assert_eq!(line_clear_points(1, 3), 160);
        assert_eq!(line_clear_points(4, 5), 1200 * 6);

        assert_eq!(line_clear_points(0, 2), 0);
        assert_eq!(line_clear_points(5, 2), 0);
    }

    #[test]
    fn test_speed_schedule() {
        let mut ticks = INITIAL_TICKS_PER_DROP;
        let mut seen = Vec::new();
        for level in 1..=12 {
            ticks = next_ticks_per_drop(level, ticks);
            seen.push(ticks);
        }
        assert_eq!(seen, vec![43, 38, 33, 28, 23, 18, 13, 12, 11, 10, 9, 8]);
    }

    #[test]
    fn test_speed_schedule_floor() {
        assert_eq!(next_ticks_per_drop(3, 5), 4);
        assert_eq!(next_ticks_per_drop(3, 6), 1);
        assert_eq!(next_ticks_per_drop(40, 2), 1);
        assert_eq!(next_ticks_per_drop(40, 1), 1);
    }

    #[test]
    fn test_tetris_at_level_zero() {
        let mut p = Progression::new();
        let summary = p.record_clear(4);
        assert_eq!(summary.points, 1200);
        assert_eq!(p.score, 1200);
        assert_eq!(p.lines, 4);
        assert!(!summary.level_up);
    }

    #[test]
    fn test_level_up_carries_overflow() {
        let mut p = Progression::new();
        p.record_clear(4);
        p.record_clear(4);
        let summary = p.record_clear(3);

        assert!(summary.level_up);
        assert_eq!(p.level, 1);
        assert_eq!(p.lines, 11);
        assert_eq!(p.lines_toward_level, 1);
        assert_eq!(p.ticks_per_drop, 43);
        // Scored with the level before the clear.
        assert_eq!(summary.points, 300);
    }

    #[test]
    fn test_points_scale_after_level_up() {
        let mut p = Progression {
            level: 3,
            ..Progression::new()
        };
        assert_eq!(p.record_clear(1).points, 160);
    }
}
