//! Display module - read-only board projections for a renderer
//!
//! Nothing here touches game state: the overlay is built on a copy of the
//! settled board, and previews are standalone miniature boards.

use crate::board::Board;
use crate::config::{Config, WallMode};
use crate::game::Game;
use crate::pieces::Piece;
use crate::types::{Cell, Coord, Shape};

/// Side length of a preview board
pub const PREVIEW_SIZE: u16 = 4;

/// Settled cells plus the landing shadow and the falling piece on top
pub fn board_with_overlay(game: &Game) -> Board {
    let mut board = game.board().clone();
    let Some(block) = game.falling() else {
        return board;
    };

    let color = block.piece().color(game.config());
    for at in block.shadow().cells() {
        if board.get(at).is_some_and(|cell| !cell.is_solid()) {
            board.set(at, Cell::shadow(color));
        }
    }
    for at in block.piece().cells() {
        board.set(at, Cell::block(color));
    }
    board
}

/// A 4x4 board with a single shape centered, or empty for `None`
pub fn preview_board(config: &Config, shape: Option<Shape>) -> Board {
    let mini = Config {
        board_width: PREVIEW_SIZE,
        board_height: PREVIEW_SIZE,
        walls: WallMode::Off,
        ..config.clone()
    };
    let mut board = Board::new(&mini);
    let Some(shape) = shape else {
        return board;
    };

    let body = config.body(shape);
    let min_row = body.iter().map(|c| c.row).min().unwrap_or(0);
    let max_row = body.iter().map(|c| c.row).max().unwrap_or(0);
    let min_col = body.iter().map(|c| c.col).min().unwrap_or(0);
    let max_col = body.iter().map(|c| c.col).max().unwrap_or(0);

    let size = PREVIEW_SIZE as i32;
    let top = (size - (max_row - min_row + 1)) / 2;
    let left = (size - (max_col - min_col + 1)) / 2;
    let piece = Piece::new(shape, Coord::new(top - min_row, left - min_col), body);

    board.place(&piece.cells(), config.color(shape));
    board
}

impl Game {
    /// See [`board_with_overlay`]
    pub fn board_with_overlay(&self) -> Board {
        board_with_overlay(self)
    }

    /// Preview of the next shape to spawn
    pub fn next_preview(&self) -> Board {
        preview_board(self.config(), self.next_shapes(1).first().copied())
    }

    /// Preview of the held shape (empty when nothing is held)
    pub fn held_preview(&self) -> Board {
        preview_board(self.config(), self.held_shape())
    }
}
