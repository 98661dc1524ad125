//! Placement module - collision testing, rotation kicks and landing projection

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{Coord, RotateDirection};

/// Whether a single absolute cell is blocked for a piece.
///
/// Cells above the top row are allowed (pieces poke above the board while
/// spawning) as long as their column is on the board and not a wall column.
pub fn cell_blocked(board: &Board, at: Coord) -> bool {
    if at.row < 0 {
        return at.col < 0 || at.col >= board.width() as i32 || board.is_wall_column(at.col);
    }
    board.is_off_board(at) || board.is_occupied(at)
}

/// Check if any cell of the piece collides with the board edges or settled cells
pub fn intersects(board: &Board, piece: &Piece) -> bool {
    piece.cells().iter().any(|&at| cell_blocked(board, at))
}

/// Whether the piece cannot move down one row
pub fn is_grounded(board: &Board, piece: &Piece) -> bool {
    intersects(board, &piece.shifted(Coord::new(1, 0)))
}

/// Rotate with kick search.
///
/// The naive rotation is tried first, then each kick offset in order. Returns
/// the first candidate that fits, or `None` if all of them collide.
pub fn try_rotate(
    board: &Board,
    piece: &Piece,
    direction: RotateDirection,
    kicks: &[Coord],
) -> Option<Piece> {
    let rotated = piece.rotated(direction);
    if !intersects(board, &rotated) {
        return Some(rotated);
    }

    kicks
        .iter()
        .map(|&kick| rotated.shifted(kick))
        .find(|candidate| !intersects(board, candidate))
}

/// Rows the piece can fall before it would collide
pub fn drop_distance(board: &Board, piece: &Piece) -> i32 {
    piece
        .cells()
        .iter()
        .map(|&at| {
            let mut free = 0;
            while !cell_blocked(board, Coord::new(at.row + free + 1, at.col)) {
                free += 1;
            }
            free
        })
        .min()
        .unwrap_or(0)
}

/// The origin the piece reaches by an instantaneous hard drop
pub fn landing_origin(board: &Board, piece: &Piece) -> Coord {
    piece.origin + Coord::new(drop_distance(board, piece), 0)
}
