//! Game module - the game-state reducer
//!
//! This module ties together all core components: board, pieces, queue,
//! gravity and scoring. Every public operation takes `&self` and returns a new
//! [`Game`]; a returned game never changes after the fact. Operations whose
//! preconditions do not hold return an unchanged copy instead of failing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::Board;
use crate::config::Config;
use crate::gravity::{gravity_steps, LockDelay};
use crate::pieces::Piece;
use crate::placement::{intersects, is_grounded, landing_origin, try_rotate};
use crate::rng::ShapeQueue;
use crate::scoring::{level_for_lines, line_score, LevelTuning};
use crate::types::*;

/// The active falling piece plus its landing preview and lock delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingBlock {
    piece: Piece,
    drop_location: Coord,
    lock: LockDelay,
}

impl FallingBlock {
    fn new(board: &Board, piece: Piece, tuning: &LevelTuning) -> Self {
        let mut lock = LockDelay::new();
        lock.on_move(is_grounded(board, &piece), tuning);
        Self {
            piece,
            drop_location: landing_origin(board, &piece),
            lock,
        }
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn shape(&self) -> Shape {
        self.piece.shape
    }

    /// Origin the piece would reach by a hard drop
    pub fn drop_location(&self) -> Coord {
        self.drop_location
    }

    pub fn lock_delay(&self) -> &LockDelay {
        &self.lock
    }

    pub fn ground_timer_ms(&self) -> Option<i64> {
        self.lock.ground_timer_ms()
    }

    pub fn total_ground_time_ms(&self) -> u64 {
        self.lock.total_ground_ms()
    }

    /// The piece as it would sit at its landing location
    pub fn shadow(&self) -> Piece {
        self.piece.at(self.drop_location)
    }
}

/// Per-category flags an input layer uses for auto-repeat and debounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllowedInputs {
    pub rotate: bool,
    pub shift: bool,
    pub drop: bool,
    pub hold: bool,
}

impl AllowedInputs {
    pub fn all() -> Self {
        Self {
            rotate: true,
            shift: true,
            drop: true,
            hold: true,
        }
    }

    pub fn get(&self, category: InputCategory) -> bool {
        match category {
            InputCategory::Rotate => self.rotate,
            InputCategory::Shift => self.shift,
            InputCategory::Drop => self.drop,
            InputCategory::Hold => self.hold,
        }
    }

    pub fn set(&mut self, category: InputCategory, allowed: bool) {
        match category {
            InputCategory::Rotate => self.rotate = allowed,
            InputCategory::Shift => self.shift = allowed,
            InputCategory::Drop => self.drop = allowed,
            InputCategory::Hold => self.hold = allowed,
        }
    }
}

impl Default for AllowedInputs {
    fn default() -> Self {
        Self::all()
    }
}

/// Identity of one played game, for de-duplicating high scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StartId {
    pub seed: u32,
    /// Monotonic episode id (increments on restart)
    pub episode: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    config: Arc<Config>,
    board: Board,
    falling: Option<FallingBlock>,
    queue: ShapeQueue,
    held: Option<Shape>,
    score: u32,
    lines_cleared: u32,
    level: u32,
    tuning: LevelTuning,
    allowed: AllowedInputs,
    paused: bool,
    started: bool,
    clock_ms: u64,
    last_gravity_ms: u64,
    /// Monotonic id for spawned pieces (increments only on successful spawn)
    blocks_spawned: u32,
    start_id: StartId,
    over: bool,
}

impl Game {
    /// Create an unstarted game: empty board, no falling block, fresh queue
    pub fn new(config: Config, seed: u32) -> Self {
        Self::with_episode(Arc::new(config), seed, 0)
    }

    fn with_episode(config: Arc<Config>, seed: u32, episode: u32) -> Self {
        let board = Board::new(&config);
        let queue = ShapeQueue::new(seed, config.queue_watermark);
        let tuning = LevelTuning::for_level(&config, 0);

        Self {
            config,
            board,
            falling: None,
            queue,
            held: None,
            score: 0,
            lines_cleared: 0,
            level: 0,
            tuning,
            allowed: AllowedInputs::all(),
            paused: false,
            started: false,
            clock_ms: 0,
            last_gravity_ms: 0,
            blocks_spawned: 0,
            start_id: StartId { seed, episode },
            over: false,
        }
    }

    // ---- accessors -------------------------------------------------------

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn falling(&self) -> Option<&FallingBlock> {
        self.falling.as_ref()
    }

    pub fn held_shape(&self) -> Option<Shape> {
        self.held
    }

    /// The next `n` shapes in spawn order
    pub fn next_shapes(&self, n: usize) -> Vec<Shape> {
        self.queue.iter().take(n).collect()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        self.tuning.gravity_interval_ms
    }

    pub fn settle_time_ms(&self) -> u32 {
        self.tuning.settle_ms
    }

    pub fn max_ground_time_ms(&self) -> u32 {
        self.tuning.max_ground_ms
    }

    pub fn allowed_input(&self, category: InputCategory) -> bool {
        self.allowed.get(category)
    }

    pub fn allowed_inputs(&self) -> AllowedInputs {
        self.allowed
    }

    /// Whether the allowance flags let an input layer send `action` now
    pub fn accepts(&self, action: GameAction) -> bool {
        action.category().map_or(true, |category| self.allowed.get(category))
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn over(&self) -> bool {
        self.over
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn last_gravity_ms(&self) -> u64 {
        self.last_gravity_ms
    }

    pub fn blocks_spawned(&self) -> u32 {
        self.blocks_spawned
    }

    pub fn start_id(&self) -> StartId {
        self.start_id
    }

    fn is_running(&self) -> bool {
        self.started && !self.over && !self.paused
    }

    // ---- setup -----------------------------------------------------------

    /// Replace the settled board (scripted setups, replays)
    pub fn with_board(&self, board: Board) -> Game {
        let mut next = self.clone();
        next.board = board;
        next.refresh_drop_location();
        next
    }

    /// Put a shape at the head of the queue so it spawns next
    pub fn with_upcoming(&self, shape: Shape) -> Game {
        let mut next = self.clone();
        next.queue.push_front(shape);
        next
    }

    /// Set an input allowance flag
    pub fn set_allowed_input(&self, category: InputCategory, allowed: bool) -> Game {
        let mut next = self.clone();
        next.allowed.set(category, allowed);
        next
    }

    // ---- lifecycle -------------------------------------------------------

    /// Spawn the first block; after game over, rebuild from config first
    pub fn start(&self) -> Game {
        if self.over {
            let seed = self.queue.seed();
            let episode = self.start_id.episode.wrapping_add(1);
            let mut next = Self::with_episode(Arc::clone(&self.config), seed, episode);
            next.clock_ms = self.clock_ms;
            next.begin();
            return next;
        }
        if self.started {
            return self.clone();
        }

        let mut next = self.clone();
        next.begin();
        next
    }

    fn begin(&mut self) {
        self.started = true;
        self.last_gravity_ms = self.clock_ms;
        debug!(seed = self.start_id.seed, episode = self.start_id.episode, "game started");
        self.spawn();
    }

    pub fn pause(&self) -> Game {
        let mut next = self.clone();
        if next.started && !next.over && !next.paused {
            next.paused = true;
            debug!(clock_ms = next.clock_ms, "paused");
        }
        next
    }

    /// Resume; gravity restarts from now so no burst of catch-up steps
    pub fn unpause(&self) -> Game {
        let mut next = self.clone();
        if next.paused {
            next.paused = false;
            next.last_gravity_ms = next.clock_ms;
            debug!(clock_ms = next.clock_ms, "unpaused");
        }
        next
    }

    pub fn toggle_pause(&self) -> Game {
        if self.paused {
            self.unpause()
        } else {
            self.pause()
        }
    }

    // ---- clock -----------------------------------------------------------

    /// Advance the logical clock by one configured tick
    pub fn tick_clock(&self) -> Game {
        self.tick_clock_to(self.clock_ms.saturating_add(self.config.clock_tick_ms as u64))
    }

    /// Advance the logical clock to `now_ms` (earlier values are ignored)
    pub fn tick_clock_to(&self, now_ms: u64) -> Game {
        let mut next = self.clone();
        next.advance(now_ms);
        next
    }

    fn advance(&mut self, now_ms: u64) {
        let now_ms = now_ms.max(self.clock_ms);
        let mut from_ms = self.clock_ms;
        self.clock_ms = now_ms;

        if !self.is_running() {
            return;
        }

        // A lock may have left full rows behind, or the board was replaced.
        if self.clear_rows() > 0 {
            self.refresh_drop_location();
        }

        // A lock inside the window hands the rest of it to the next block.
        while let Some(lock_ms) = self.settle_falling(from_ms, now_ms) {
            self.lock_at(lock_ms);
            if self.over || lock_ms >= now_ms {
                break;
            }
            from_ms = lock_ms;
        }
    }

    /// Apply gravity and lock delay to the falling block over
    /// `from_ms..now_ms`, returning the moment it must lock
    fn settle_falling(&mut self, from_ms: u64, now_ms: u64) -> Option<u64> {
        let tuning = self.tuning;
        let mut block = self.falling?;

        let mut landed_ms = None;
        let steps = gravity_steps(now_ms, self.last_gravity_ms, tuning.gravity_interval_ms);
        if steps > 0 {
            let interval = tuning.gravity_interval_ms as u64;
            let first_step_base = self.last_gravity_ms;
            self.last_gravity_ms += steps * interval;

            let distance = (block.drop_location.row - block.piece.origin.row).max(0) as u64;
            let fall = steps.min(distance);
            if fall > 0 {
                block.piece = block.piece.shifted(Coord::new(fall as i32, 0));
                trace!(rows = fall, row = block.piece.origin.row, "gravity");
                if fall == distance {
                    landed_ms = Some(first_step_base + fall * interval);
                }
            }
        }

        // Ground time counts from the landing step when it happened in this window.
        let rest_from_ms = landed_ms.unwrap_or(from_ms);
        let grounded = is_grounded(&self.board, &block.piece);
        let due = block
            .lock
            .evaluate(grounded, now_ms - rest_from_ms, &tuning);
        self.falling = Some(block);

        due.map(|offset| self.on_tick_grid(rest_from_ms + offset).min(now_ms))
    }

    /// Round a moment up to the next clock tick boundary
    fn on_tick_grid(&self, at_ms: u64) -> u64 {
        let tick = (self.config.clock_tick_ms as u64).max(1);
        at_ms.saturating_add(tick - 1) / tick * tick
    }

    // ---- inputs ----------------------------------------------------------

    /// Move one cell; a blocked soft drop locks the piece in place
    pub fn shift(&self, direction: ShiftDirection) -> Game {
        let mut next = self.clone();
        if !next.is_running() {
            return next;
        }
        let Some(mut block) = next.falling else {
            return next;
        };

        let moved = block.piece.shifted(direction.offset());
        if intersects(&next.board, &moved) {
            if direction == ShiftDirection::Down {
                next.lock();
            }
            return next;
        }

        block.piece = moved;
        block.drop_location = landing_origin(&next.board, &moved);
        block.lock.on_move(is_grounded(&next.board, &moved), &next.tuning);
        next.falling = Some(block);
        next
    }

    /// Rotate a quarter turn, kicking to the first free offset
    pub fn rotate(&self, direction: RotateDirection) -> Game {
        let mut next = self.clone();
        if !next.is_running() {
            return next;
        }
        let Some(mut block) = next.falling else {
            return next;
        };

        if let Some(rotated) =
            try_rotate(&next.board, &block.piece, direction, &next.config.kick_offsets)
        {
            block.piece = rotated;
            block.drop_location = landing_origin(&next.board, &rotated);
            block.lock.on_move(is_grounded(&next.board, &rotated), &next.tuning);
            next.falling = Some(block);
        }
        next
    }

    /// Teleport to the landing location and lock, skipping lock delay
    pub fn hard_drop(&self) -> Game {
        let mut next = self.clone();
        if !next.is_running() {
            return next;
        }
        let Some(mut block) = next.falling else {
            return next;
        };

        block.piece = block.shadow();
        next.falling = Some(block);
        next.lock();
        next
    }

    /// Set the falling shape aside, swapping with any held shape.
    ///
    /// Hold is disabled until the next spawn that is not caused by a hold.
    pub fn hold(&self) -> Game {
        let mut next = self.clone();
        if !next.is_running() || !next.allowed.hold {
            return next;
        }
        let Some(block) = next.falling.take() else {
            return next;
        };

        if let Some(previous) = next.held {
            next.queue.push_front(previous);
        }
        next.held = Some(block.shape());
        debug!(held = block.shape().as_str(), "hold");

        next.spawn();
        next.allowed.hold = false;
        next
    }

    /// Apply a game action
    pub fn apply(&self, action: GameAction) -> Game {
        match action {
            GameAction::MoveLeft => self.shift(ShiftDirection::Left),
            GameAction::MoveRight => self.shift(ShiftDirection::Right),
            GameAction::SoftDrop => self.shift(ShiftDirection::Down),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(RotateDirection::Cw),
            GameAction::RotateCcw => self.rotate(RotateDirection::Ccw),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Start => self.start(),
        }
    }

    // ---- internal transitions -------------------------------------------

    /// Pop the next shape; an obstructed spawn ends the game
    fn spawn(&mut self) -> bool {
        self.spawn_at(self.clock_ms)
    }

    /// Spawn with gravity measured from `at_ms`
    fn spawn_at(&mut self, at_ms: u64) -> bool {
        let shape = self.queue.pop();
        let piece = Piece::spawn(&self.config, shape);

        if intersects(&self.board, &piece) {
            self.falling = None;
            self.over = true;
            debug!(
                score = self.score,
                lines = self.lines_cleared,
                episode = self.start_id.episode,
                "game over"
            );
            return false;
        }

        self.falling = Some(FallingBlock::new(&self.board, piece, &self.tuning));
        self.blocks_spawned = self.blocks_spawned.wrapping_add(1);
        self.last_gravity_ms = at_ms;
        self.allowed.hold = true;
        trace!(shape = shape.as_str(), spawned = self.blocks_spawned, "spawn");
        true
    }

    /// Write the falling piece into the board, clear rows, spawn the next
    fn lock(&mut self) {
        self.lock_at(self.clock_ms);
    }

    fn lock_at(&mut self, at_ms: u64) {
        let Some(block) = self.falling.take() else {
            return;
        };

        let color = block.piece.color(&self.config);
        self.board.place(&block.piece.cells(), color);
        debug!(
            shape = block.shape().as_str(),
            row = block.piece.origin.row,
            col = block.piece.origin.col,
            at_ms,
            "locked"
        );

        self.clear_rows();
        self.spawn_at(at_ms);
    }

    /// Clear and collapse full rows, updating score, level and speeds
    fn clear_rows(&mut self) -> usize {
        let cleared = self.board.clear_and_collapse();
        if cleared == 0 {
            return 0;
        }

        let points = line_score(&self.config, cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines_cleared += cleared as u32;
        self.level = level_for_lines(&self.config, self.lines_cleared);
        self.tuning = LevelTuning::for_level(&self.config, self.level);
        debug!(
            rows = cleared,
            points,
            level = self.level,
            lines = self.lines_cleared,
            "rows cleared"
        );
        cleared
    }

    fn refresh_drop_location(&mut self) {
        if let Some(block) = self.falling.as_mut() {
            block.drop_location = landing_origin(&self.board, &block.piece);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Config::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(shape: Shape) -> Game {
        Game::default().with_upcoming(shape).start()
    }

    #[test]
    fn test_new_game_is_unstarted() {
        let game = Game::default();
        assert!(!game.started());
        assert!(!game.over());
        assert!(!game.paused());
        assert!(game.falling().is_none());
        assert!(game.held_shape().is_none());
        assert_eq!(game.score(), 0);
        assert_eq!(game.blocks_spawned(), 0);
        assert!(game.queue_len() >= 8);
    }

    #[test]
    fn test_start_spawns_once() {
        let game = started(Shape::T);
        assert!(game.started());
        assert_eq!(game.falling().unwrap().shape(), Shape::T);
        assert_eq!(game.blocks_spawned(), 1);

        let again = game.start();
        assert_eq!(again.blocks_spawned(), 1);
    }

    #[test]
    fn test_operations_do_not_mutate_input() {
        let game = started(Shape::T);
        let before = game.falling().copied();
        let _ = game.shift(ShiftDirection::Left).hard_drop().tick_clock();
        assert_eq!(game.falling().copied(), before);
        assert_eq!(game.board().block_count(), 0);
    }

    #[test]
    fn test_shift_left_and_right() {
        let game = started(Shape::T);
        let origin = game.falling().unwrap().piece().origin;
        let left = game.shift(ShiftDirection::Left);
        assert_eq!(left.falling().unwrap().piece().origin, origin + Coord::new(0, -1));
        let right = game.shift(ShiftDirection::Right);
        assert_eq!(right.falling().unwrap().piece().origin, origin + Coord::new(0, 1));
    }

    #[test]
    fn test_shift_into_wall_is_rejected() {
        let mut game = started(Shape::O);
        for _ in 0..20 {
            game = game.shift(ShiftDirection::Left);
        }
        let piece = *game.falling().unwrap().piece();
        assert!(piece.cells().iter().any(|c| c.col == 0));
        let blocked = game.shift(ShiftDirection::Left);
        assert_eq!(*blocked.falling().unwrap().piece(), piece);
    }

    #[test]
    fn test_soft_drop_into_floor_locks() {
        let mut game = started(Shape::O);
        for _ in 0..19 {
            game = game.shift(ShiftDirection::Down);
        }
        assert_eq!(game.blocks_spawned(), 1);
        let locked = game.shift(ShiftDirection::Down);
        assert_eq!(locked.blocks_spawned(), 2);
        assert_eq!(locked.board().block_count(), 4);
    }

    #[test]
    fn test_hard_drop_locks_at_landing() {
        let game = started(Shape::I);
        let dropped = game.hard_drop();
        assert_eq!(dropped.board().block_count(), 4);
        for col in 3..=6 {
            assert!(dropped.board().is_occupied(Coord::new(19, col)));
        }
        assert_eq!(dropped.blocks_spawned(), 2);
    }

    #[test]
    fn test_drop_location_tracks_moves() {
        let game = started(Shape::I).with_board(Board::from_ascii(
            &Config::default(),
            &["XXXX......"],
        ));
        assert_eq!(game.falling().unwrap().drop_location().row, 18);
        let moved = game.shift(ShiftDirection::Right).shift(ShiftDirection::Right);
        assert_eq!(moved.falling().unwrap().drop_location().row, 19);
    }

    #[test]
    fn test_gravity_steps_on_interval() {
        let game = started(Shape::O);
        let row = game.falling().unwrap().piece().origin.row;
        let early = game.tick_clock_to(999);
        assert_eq!(early.falling().unwrap().piece().origin.row, row);
        let later = game.tick_clock_to(1000);
        assert_eq!(later.falling().unwrap().piece().origin.row, row + 1);
    }

    #[test]
    fn test_coalesced_ticks_apply_multiple_steps() {
        let game = started(Shape::O);
        let next = game.tick_clock_to(5_500);
        assert_eq!(next.falling().unwrap().piece().origin.row, 5);
        assert_eq!(next.last_gravity_ms(), 5_000);
    }

    #[test]
    fn test_coalesced_ticks_never_overshoot_landing() {
        let game = started(Shape::O);
        let next = game.tick_clock_to(19_300);
        let block = next.falling().unwrap();
        assert_eq!(block.piece().origin, block.drop_location());
        // Landed at 19000, so 300ms of the settle time are already spent.
        assert_eq!(block.ground_timer_ms(), Some(300));
        assert_eq!(block.total_ground_time_ms(), 300);
    }

    #[test]
    fn test_coalesced_ticks_lock_and_spawn_within_one_call() {
        let game = started(Shape::O).tick_clock_to(20_000);
        assert_eq!(game.blocks_spawned(), 2);
        assert_eq!(game.board().block_count(), 4);
        // The next block spawned at the lock moment, 19600.
        assert_eq!(game.last_gravity_ms(), 19_600);
        assert_eq!(game.falling().unwrap().piece().origin.row, 0);
    }

    #[test]
    fn test_tick_clock_saturates_at_end_of_time() {
        let game = started(Shape::T).tick_clock_to(u64::MAX).tick_clock();
        assert_eq!(game.clock_ms(), u64::MAX);
    }

    #[test]
    fn test_moves_on_and_off_a_ledge_rearm_lock_delay() {
        let config = Config::default();
        let board = Board::from_ascii(&config, &["XXXXXX....", "XXXXXX...."]);
        let game = started(Shape::O)
            .with_board(board)
            .shift(ShiftDirection::Right)
            .tick_clock_to(17_000)
            .tick_clock_to(17_200);
        let block = game.falling().unwrap();
        assert_eq!(block.piece().origin.row, 17);
        assert_eq!(block.ground_timer_ms(), Some(400));

        // Off the ledge: airborne, ground time so far is kept.
        let off = game.shift(ShiftDirection::Right);
        assert!(!off.falling().unwrap().lock_delay().is_grounded());
        assert_eq!(off.falling().unwrap().total_ground_time_ms(), 200);

        // Back onto it: grounded again with a full timer.
        let back = off.shift(ShiftDirection::Left);
        assert_eq!(
            back.falling().unwrap().ground_timer_ms(),
            Some(back.settle_time_ms() as i64)
        );
        assert_eq!(back.falling().unwrap().total_ground_time_ms(), 200);
    }

    #[test]
    fn test_pause_freezes_gravity_and_unpause_does_not_burst() {
        let game = started(Shape::O).pause();
        let paused = game.tick_clock_to(10_000);
        assert_eq!(paused.falling().unwrap().piece().origin.row, 0);
        let resumed = paused.unpause();
        assert_eq!(resumed.last_gravity_ms(), 10_000);
        let next = resumed.tick_clock();
        assert_eq!(next.falling().unwrap().piece().origin.row, 0);
    }

    #[test]
    fn test_inputs_ignored_while_paused() {
        let game = started(Shape::T).pause();
        let shifted = game.shift(ShiftDirection::Left);
        assert_eq!(shifted.falling(), game.falling());
        assert_eq!(game.hard_drop().board().block_count(), 0);
    }

    #[test]
    fn test_hold_swaps_back_previous_shape() {
        let game = started(Shape::T).hold();
        assert_eq!(game.held_shape(), Some(Shape::T));
        assert!(!game.allowed_input(InputCategory::Hold));

        // Lock the replacement, then hold the next piece to get T back.
        let game = game.hard_drop();
        assert!(game.allowed_input(InputCategory::Hold));
        let third = game.falling().unwrap().shape();
        let swapped = game.hold();
        assert_eq!(swapped.falling().unwrap().shape(), Shape::T);
        assert_eq!(swapped.held_shape(), Some(third));
    }

    #[test]
    fn test_restart_after_game_over() {
        let config = Config::default();
        let rows = vec!["XXXXXXXXX."; 20];
        let game = Game::default()
            .with_board(Board::from_ascii(&config, &rows))
            .start();
        assert!(game.over());
        assert!(game.falling().is_none());

        let restarted = game.start();
        assert!(!restarted.over());
        assert_eq!(restarted.start_id().episode, 1);
        assert_eq!(restarted.board().block_count(), 0);
        assert_eq!(restarted.blocks_spawned(), 1);
    }

    #[test]
    fn test_allowance_flags_are_plain_state() {
        let game = started(Shape::T).set_allowed_input(InputCategory::Shift, false);
        assert!(!game.allowed_input(InputCategory::Shift));
        assert!(!game.accepts(GameAction::MoveLeft));
        assert!(game.accepts(GameAction::RotateCw));
        assert!(game.accepts(GameAction::Pause));
        // Shift is not enforced by the engine.
        let moved = game.shift(ShiftDirection::Left);
        assert_ne!(moved.falling(), game.falling());
    }
}
