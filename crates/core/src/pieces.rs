//! Pieces module - piece geometry and quarter-turn rotation
//!
//! A piece is an origin plus four body offsets. Rotation turns every offset
//! about the origin; the O shape is exempt because its body is already
//! symmetric about its own center.

use crate::config::Config;
use crate::types::{Coord, RotateDirection, Rgb, Shape};

/// Offsets of a piece's four cells from its origin
pub type PieceBody = [Coord; 4];

/// A positioned piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub origin: Coord,
    pub body: PieceBody,
    pub shape: Shape,
}

impl Piece {
    pub fn new(shape: Shape, origin: Coord, body: PieceBody) -> Self {
        Self {
            origin,
            body,
            shape,
        }
    }

    /// Create a piece at the configured spawn point
    pub fn spawn(config: &Config, shape: Shape) -> Self {
        Self::new(shape, config.spawn_point, config.body(shape))
    }

    /// Absolute board cells of the piece
    pub fn cells(&self) -> [Coord; 4] {
        self.body.map(|offset| self.origin + offset)
    }

    pub fn color(&self, config: &Config) -> Rgb {
        config.color(self.shape)
    }

    /// Translate the origin
    pub fn shifted(&self, delta: Coord) -> Self {
        Self {
            origin: self.origin + delta,
            ..*self
        }
    }

    /// Move the origin to an absolute position
    pub fn at(&self, origin: Coord) -> Self {
        Self { origin, ..*self }
    }

    /// Rotate every body offset a quarter turn about the origin
    pub fn rotated(&self, direction: RotateDirection) -> Self {
        if self.shape == Shape::O {
            return *self;
        }
        Self {
            body: self.body.map(|offset| rotate_offset(offset, direction)),
            ..*self
        }
    }

    /// Absolute cells sorted, for comparing occupied sets
    pub fn sorted_cells(&self) -> [Coord; 4] {
        let mut cells = self.cells();
        cells.sort_by_key(|c| (c.row, c.col));
        cells
    }
}

/// Quarter-turn rotation of a single offset.
///
/// With rows growing downwards, clockwise maps `(r, c)` to `(c, -r)` and
/// counter-clockwise maps `(r, c)` to `(-c, r)`.
pub fn rotate_offset(offset: Coord, direction: RotateDirection) -> Coord {
    match direction {
        RotateDirection::Cw => Coord::new(offset.col, -offset.row),
        RotateDirection::Ccw => Coord::new(-offset.col, offset.row),
    }
}
