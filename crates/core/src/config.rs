//! Config module - injected tuning for a game
//!
//! A [`Config`] is immutable for the lifetime of a [`Game`](crate::Game). Every
//! field has a default, so a JSON file only needs the values it changes:
//!
//! ```
//! use blockfall_core::{Config, WallMode};
//!
//! let config = Config::from_json(r#"{ "walls": "cells", "clock_tick_ms": 16 }"#).unwrap();
//! assert_eq!(config.walls, WallMode::Cells);
//! assert_eq!(config.clock_tick_ms, 16);
//! assert_eq!(config.board_width, 10);
//! ```

use std::fmt;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "BLOCKFALL_CONFIG";

/// How side walls and the floor are represented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallMode {
    /// No walls; the board edges bound pieces
    #[default]
    Off,
    /// Wall cells in the first and last column plus an extra floor row
    Cells,
    /// First and last column answer "occupied" without holding wall cells
    Logical,
}

/// How the line-clear table is scaled by level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMultiplier {
    Flat,
    #[default]
    LevelPlusOne,
}

/// Poll-rate hints for an input layer (milliseconds between repeats)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollRates {
    pub base: u32,
    pub drop: u32,
    pub rotate: u32,
    pub shift: u32,
    pub hold: u32,
}

impl PollRates {
    pub fn get(&self, category: InputCategory) -> u32 {
        match category {
            InputCategory::Rotate => self.rotate,
            InputCategory::Shift => self.shift,
            InputCategory::Drop => self.drop,
            InputCategory::Hold => self.hold,
        }
    }
}

impl Default for PollRates {
    fn default() -> Self {
        Self {
            base: 10,
            drop: 250,
            rotate: 150,
            shift: 70,
            // Hold allowance is re-armed by spawns, not by polling.
            hold: 1_000_000,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playable columns (wall columns excluded)
    pub board_width: u16,
    /// Visible rows (wall floor excluded)
    pub board_height: u16,
    pub walls: WallMode,
    pub wall_color: Rgb,
    /// Origin of newly spawned pieces, in grid coordinates
    pub spawn_point: Coord,
    pub shapes: PerShape<[Coord; 4]>,
    pub colors: PerShape<Rgb>,
    /// Logical time added by one clock tick
    pub clock_tick_ms: u32,
    pub gravity_levels_ms: Vec<u32>,
    pub min_gravity_interval_ms: u32,
    pub level_lines: u32,
    pub line_scores: Vec<u32>,
    pub score_multiplier: ScoreMultiplier,
    pub base_settle_ms: u32,
    pub settle_step_ms: u32,
    pub min_settle_ms: u32,
    pub base_max_ground_ms: u32,
    pub max_ground_step_ms: u32,
    pub min_max_ground_ms: u32,
    /// Translations tried, in order, when a rotation collides
    pub kick_offsets: Vec<Coord>,
    pub queue_watermark: usize,
    pub poll_rates: PollRates,
    pub shift_debounce_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        let c = Coord::new;
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            walls: WallMode::Off,
            wall_color: WALL_COLOR,
            spawn_point: c(0, 5),
            shapes: PerShape {
                i: [c(0, -2), c(0, -1), c(0, 0), c(0, 1)],
                t: [c(0, 0), c(0, 1), c(0, -1), c(-1, 0)],
                o: [c(0, 0), c(-1, 0), c(0, -1), c(-1, -1)],
                s: [c(0, 0), c(-1, 0), c(0, -1), c(-1, 1)],
                z: [c(0, 0), c(-1, 0), c(-1, -1), c(0, 1)],
                l: [c(0, 0), c(0, -1), c(0, 1), c(-1, 1)],
                j: [c(0, 0), c(0, 1), c(0, -1), c(-1, -1)],
            },
            colors: PerShape {
                i: [0, 255, 255],
                t: [128, 0, 128],
                o: [255, 255, 0],
                s: [255, 0, 0],
                z: [0, 255, 0],
                l: [255, 127, 0],
                j: [0, 0, 255],
            },
            clock_tick_ms: CLOCK_TICK_MS,
            gravity_levels_ms: GRAVITY_LEVELS_MS.to_vec(),
            min_gravity_interval_ms: MIN_GRAVITY_INTERVAL_MS,
            level_lines: LEVEL_LINES,
            line_scores: LINE_SCORES.to_vec(),
            score_multiplier: ScoreMultiplier::LevelPlusOne,
            base_settle_ms: BASE_SETTLE_MS,
            settle_step_ms: SETTLE_STEP_MS,
            min_settle_ms: MIN_SETTLE_MS,
            base_max_ground_ms: BASE_MAX_GROUND_MS,
            max_ground_step_ms: MAX_GROUND_STEP_MS,
            min_max_ground_ms: MIN_MAX_GROUND_MS,
            // Right, left, down, up; distance 1 before 2 in each direction.
            kick_offsets: vec![
                c(0, 1),
                c(0, 2),
                c(0, -1),
                c(0, -2),
                c(1, 0),
                c(2, 0),
                c(-1, 0),
                c(-2, 0),
            ],
            queue_watermark: QUEUE_WATERMARK,
            poll_rates: PollRates::default(),
            shift_debounce_ms: SHIFT_DEBOUNCE_MS,
        }
    }
}

impl Config {
    /// Parse a JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&text)
    }

    /// Create from environment variables
    ///
    /// Reads the file named by `BLOCKFALL_CONFIG` when set and non-empty,
    /// otherwise returns the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Columns in the grid, including wall columns
    pub fn grid_width(&self) -> usize {
        match self.walls {
            WallMode::Off => self.board_width as usize,
            WallMode::Cells | WallMode::Logical => self.board_width as usize + 2,
        }
    }

    /// Rows in the grid, including a materialized floor
    pub fn grid_height(&self) -> usize {
        match self.walls {
            WallMode::Cells => self.board_height as usize + 1,
            WallMode::Off | WallMode::Logical => self.board_height as usize,
        }
    }

    /// Grid columns a piece may occupy
    pub fn playable_cols(&self) -> Range<i32> {
        match self.walls {
            WallMode::Off => 0..self.board_width as i32,
            WallMode::Cells | WallMode::Logical => 1..self.board_width as i32 + 1,
        }
    }

    pub fn body(&self, shape: Shape) -> [Coord; 4] {
        *self.shapes.get(shape)
    }

    pub fn color(&self, shape: Shape) -> Rgb {
        *self.colors.get(shape)
    }

    /// Check the preconditions the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::Invalid("board dimensions must be non-zero".into()));
        }
        if self.clock_tick_ms == 0 {
            return Err(ConfigError::Invalid("clock_tick_ms must be non-zero".into()));
        }
        if self.gravity_levels_ms.is_empty() {
            return Err(ConfigError::Invalid("gravity_levels_ms must not be empty".into()));
        }
        if self.min_gravity_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "min_gravity_interval_ms must be non-zero".into(),
            ));
        }
        if self.level_lines == 0 {
            return Err(ConfigError::Invalid("level_lines must be non-zero".into()));
        }
        if self.line_scores.len() < 5 {
            return Err(ConfigError::Invalid(
                "line_scores needs entries for 0 through 4 lines".into(),
            ));
        }

        let cols = self.playable_cols();
        for (shape, body) in self.shapes.iter() {
            let (min_row, max_row) = span(body.iter().map(|c| c.row));
            let (min_col, max_col) = span(body.iter().map(|c| c.col));
            if max_col - min_col + 1 > self.board_width as i32
                || max_row - min_row + 1 > self.board_height as i32
            {
                return Err(ConfigError::Invalid(format!(
                    "shape {} does not fit on the board",
                    shape.as_str()
                )));
            }
            for offset in body {
                let col = self.spawn_point.col + offset.col;
                let row = self.spawn_point.row + offset.row;
                if !cols.contains(&col) || row >= self.board_height as i32 {
                    return Err(ConfigError::Invalid(format!(
                        "shape {} spawns outside the playable area",
                        shape.as_str()
                    )));
                }
            }
        }

        Ok(())
    }
}

fn span(values: impl Iterator<Item = i32>) -> (i32, i32) {
    values.fold((i32::MAX, i32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Why a config could not be loaded
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io(_) => "config_io",
            ConfigError::Parse(_) => "config_parse",
            ConfigError::Invalid(_) => "config_invalid",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read config: {}", e),
            ConfigError::Parse(e) => write!(f, "could not parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn empty_json_yields_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = Config::from_json(r#"{ "line_scores": [0, 40, 100, 300, 1200] }"#).unwrap();
        assert_eq!(config.line_scores, vec![0, 40, 100, 300, 1200]);
        assert_eq!(config.board_height, 20);
    }

    #[test]
    fn narrow_board_is_rejected() {
        let err = Config::from_json(r#"{ "board_width": 3 }"#).unwrap_err();
        assert_eq!(err.code(), "config_invalid");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Config::from_json("{ board_width: ").unwrap_err();
        assert_eq!(err.code(), "config_parse");
    }

    #[test]
    fn short_score_table_is_rejected() {
        let err = Config::from_json(r#"{ "line_scores": [0, 1] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn poll_rates_cover_every_category() {
        let rates = PollRates::default();
        let categories = [
            InputCategory::Rotate,
            InputCategory::Shift,
            InputCategory::Drop,
            InputCategory::Hold,
        ];
        for category in categories {
            assert!(rates.get(category) >= rates.base);
        }
        let config = Config::from_json(r#"{ "poll_rates": { "shift": 40 } }"#).unwrap();
        assert_eq!(config.poll_rates.get(InputCategory::Shift), 40);
        assert_eq!(config.poll_rates.drop, 250);
    }

    #[test]
    fn wall_modes_change_grid_dimensions() {
        let mut config = Config::default();
        assert_eq!((config.grid_width(), config.grid_height()), (10, 20));
        config.walls = WallMode::Cells;
        assert_eq!((config.grid_width(), config.grid_height()), (12, 21));
        assert_eq!(config.playable_cols(), 1..11);
        config.walls = WallMode::Logical;
        assert_eq!((config.grid_width(), config.grid_height()), (12, 20));
    }
}
