//! Scoring module - line-clear points, levels and level-scaled speeds
//!
//! All speeds are monotonically non-increasing in level: gravity gets faster
//! and lock delay tightens until each reaches its configured floor.

use crate::config::{Config, ScoreMultiplier};

/// Points for clearing `lines` rows in one event at `level`
pub fn line_score(config: &Config, lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let table = &config.line_scores;
    let base = table
        .get(lines)
        .or_else(|| table.last())
        .copied()
        .unwrap_or(0);
    match config.score_multiplier {
        ScoreMultiplier::Flat => base,
        ScoreMultiplier::LevelPlusOne => base.saturating_mul(level + 1),
    }
}

/// Level reached after clearing `total_lines`
pub fn level_for_lines(config: &Config, total_lines: u32) -> u32 {
    total_lines / config.level_lines.max(1)
}

/// Gravity interval for a level, clamped to the configured floor
pub fn gravity_interval_ms(config: &Config, level: u32) -> u32 {
    let table = &config.gravity_levels_ms;
    let from_table = table
        .get(level as usize)
        .or_else(|| table.last())
        .copied()
        .unwrap_or(config.min_gravity_interval_ms);
    from_table.max(config.min_gravity_interval_ms)
}

/// How long an untouched grounded piece waits before locking
pub fn settle_time_ms(config: &Config, level: u32) -> u32 {
    config
        .base_settle_ms
        .saturating_sub(config.settle_step_ms.saturating_mul(level))
        .max(config.min_settle_ms)
}

/// Total ground time after which a piece locks even while being moved
pub fn max_ground_time_ms(config: &Config, level: u32) -> u32 {
    config
        .base_max_ground_ms
        .saturating_sub(config.max_ground_step_ms.saturating_mul(level))
        .max(config.min_max_ground_ms)
}

/// Speed parameters derived from a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTuning {
    pub gravity_interval_ms: u32,
    pub settle_ms: u32,
    pub max_ground_ms: u32,
}

impl LevelTuning {
    pub fn for_level(config: &Config, level: u32) -> Self {
        Self {
            gravity_interval_ms: gravity_interval_ms(config, level),
            settle_ms: settle_time_ms(config, level),
            max_ground_ms: max_ground_time_ms(config, level),
        }
    }
}
