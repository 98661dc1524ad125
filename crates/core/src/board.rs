//! Board module - manages the game grid
//!
//! The board is a row-major grid of [`Cell`]s sized by the [`Config`]. Row 0 is
//! the top. Depending on [`WallMode`] the grid carries wall columns on both
//! sides and a wall floor row, or treats the outer columns as walls without
//! storing them.
//!
//! Besides occupancy queries this module owns the row mechanics: detecting
//! full rows, blanking them, and collapsing the gaps they leave behind.

use crate::config::{Config, WallMode};
use crate::types::{Cell, CellKind, Coord, Rgb, Shape};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    walls: WallMode,
    wall_color: Rgb,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board (walls materialized when configured)
    pub fn new(config: &Config) -> Self {
        let width = config.grid_width();
        let height = config.grid_height();
        let mut board = Self {
            width,
            height,
            walls: config.walls,
            wall_color: config.wall_color,
            cells: vec![Cell::EMPTY; width * height],
        };
        for row in 0..height {
            board.reset_row(row);
        }
        if board.walls == WallMode::Cells {
            let floor = height - 1;
            for cell in board.row_mut(floor) {
                *cell = Cell::wall(config.wall_color);
            }
        }
        board
    }

    /// Build a board from text rows, aligned to the bottom of the grid.
    ///
    /// `.` is empty, `#` is a wall cell, a shape letter is a block of that
    /// shape's color and any other character is a gray block. Rows not given
    /// keep the fresh-board contents (walls included).
    pub fn from_ascii(config: &Config, rows: &[&str]) -> Self {
        let mut board = Self::new(config);
        let first = board.height.saturating_sub(rows.len());
        for (i, text) in rows.iter().enumerate() {
            let row = first + i;
            for (col, ch) in text.chars().enumerate().take(board.width) {
                let cell = match ch {
                    '.' => Cell::EMPTY,
                    '#' => Cell::wall(config.wall_color),
                    other => match Shape::from_str(&other.to_string()) {
                        Some(shape) => Cell::block(config.color(shape)),
                        None => Cell::block([128, 128, 128]),
                    },
                };
                board.cells[row * board.width + col] = cell;
            }
        }
        board
    }

    /// Render as text rows (`.` empty, `#` wall, `X` block, `:` shadow)
    pub fn to_ascii(&self) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                self.row(row)
                    .iter()
                    .map(|cell| match cell.kind {
                        CellKind::Empty => '.',
                        CellKind::Wall => '#',
                        CellKind::Block => 'X',
                        CellKind::Shadow => ':',
                    })
                    .collect()
            })
            .collect()
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, at: Coord) -> Option<usize> {
        if self.is_off_board(at) {
            return None;
        }
        Some(at.row as usize * self.width + at.col as usize)
    }

    /// Grid width, wall columns included
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height, wall floor included
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn walls(&self) -> WallMode {
        self.walls
    }

    /// Columns a piece can occupy
    pub fn playable_width(&self) -> usize {
        match self.walls {
            WallMode::Off => self.width,
            WallMode::Cells | WallMode::Logical => self.width - 2,
        }
    }

    /// Get cell at a coordinate, `None` when off the board
    pub fn get(&self, at: Coord) -> Option<Cell> {
        self.index(at).map(|idx| self.cells[idx])
    }

    /// Set cell at a coordinate. Returns false if off the board
    pub fn set(&mut self, at: Coord, cell: Cell) -> bool {
        match self.index(at) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Above the top row, below the bottom row, or outside the columns
    pub fn is_off_board(&self, at: Coord) -> bool {
        at.row < 0 || at.row >= self.height as i32 || at.col < 0 || at.col >= self.width as i32
    }

    /// Whether the column is a wall column (materialized or logical)
    pub fn is_wall_column(&self, col: i32) -> bool {
        match self.walls {
            WallMode::Off => false,
            WallMode::Cells | WallMode::Logical => col == 0 || col == self.width as i32 - 1,
        }
    }

    /// Whether an on-board coordinate holds a block or wall
    pub fn is_occupied(&self, at: Coord) -> bool {
        if self.walls == WallMode::Logical && !self.is_off_board(at) && self.is_wall_column(at.col)
        {
            return true;
        }
        self.get(at).map_or(false, |cell| cell.is_solid())
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        let start = row * self.width;
        &mut self.cells[start..start + self.width]
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Reset a row to its fresh contents (side walls kept, blocks removed)
    fn reset_row(&mut self, row: usize) {
        let walls = self.walls;
        let wall_color = self.wall_color;
        let last = self.width - 1;
        for (col, cell) in self.row_mut(row).iter_mut().enumerate() {
            *cell = if walls == WallMode::Cells && (col == 0 || col == last) {
                Cell::wall(wall_color)
            } else {
                Cell::EMPTY
            };
        }
    }

    fn row_is_all_wall(&self, row: usize) -> bool {
        self.row(row).iter().all(Cell::is_wall)
    }

    /// Every column occupied, and not a floor made purely of walls
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height || self.row_is_all_wall(row) {
            return false;
        }
        (0..self.width as i32).all(|col| self.is_occupied(Coord::new(row as i32, col)))
    }

    /// No blocks in the row (walls do not count), and not the wall floor
    pub fn is_row_empty(&self, row: usize) -> bool {
        if row >= self.height || self.row_is_all_wall(row) {
            return false;
        }
        self.row(row).iter().all(|cell| cell.kind != CellKind::Block)
    }

    /// Indices of all full rows, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height).filter(|&row| self.is_row_full(row)).collect()
    }

    /// Blank every full row in place and return how many were blanked
    pub fn clear_full_rows(&mut self) -> usize {
        let rows = self.full_rows();
        for &row in &rows {
            self.reset_row(row);
        }
        rows.len()
    }

    /// Splice out every empty row below the topmost non-empty row and push a
    /// fresh row in at the top for each, so the stack settles over the gaps
    pub fn collapse_gap_rows(&mut self) {
        let Some(top) = (0..self.height).find(|&row| {
            !self.row_is_all_wall(row) && self.row(row).iter().any(|c| c.kind == CellKind::Block)
        }) else {
            return;
        };

        let gaps: Vec<usize> = (top + 1..self.height)
            .filter(|&row| self.is_row_empty(row))
            .collect();

        // Ascending order keeps the remaining indices valid: removing row r
        // only moves the rows above it.
        for row in gaps {
            let end = (row + 1) * self.width;
            self.cells[..end].rotate_right(self.width);
            self.reset_row(0);
        }
    }

    /// Clear then collapse in one step, returning rows cleared
    pub fn clear_and_collapse(&mut self) -> usize {
        let cleared = self.clear_full_rows();
        if cleared > 0 {
            self.collapse_gap_rows();
        }
        cleared
    }

    /// Write block cells, skipping any that fall off the board
    pub fn place(&mut self, cells: &[Coord], color: Rgb) {
        for &at in cells {
            self.set(at, Cell::block(color));
        }
    }

    /// Number of block cells (walls excluded)
    pub fn block_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.kind == CellKind::Block)
            .count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(&config());
        assert_eq!(board.index(Coord::new(0, 0)), Some(0));
        assert_eq!(board.index(Coord::new(0, 9)), Some(9));
        assert_eq!(board.index(Coord::new(1, 0)), Some(10));
        assert_eq!(board.index(Coord::new(19, 9)), Some(199));
        assert_eq!(board.index(Coord::new(0, -1)), None);
        assert_eq!(board.index(Coord::new(0, 10)), None);
        assert_eq!(board.index(Coord::new(20, 0)), None);
        assert_eq!(board.index(Coord::new(-1, 0)), None);
    }

    #[test]
    fn test_cells_walls_are_materialized() {
        let mut config = config();
        config.walls = WallMode::Cells;
        let board = Board::new(&config);

        assert_eq!(board.width(), 12);
        assert_eq!(board.height(), 21);
        assert_eq!(board.playable_width(), 10);
        assert!(board.get(Coord::new(5, 0)).unwrap().is_wall());
        assert!(board.get(Coord::new(5, 11)).unwrap().is_wall());
        assert!(board.get(Coord::new(20, 5)).unwrap().is_wall());
        assert!(!board.is_occupied(Coord::new(5, 5)));
        assert!(!board.is_row_full(20));
        assert!(!board.is_row_empty(20));
    }

    #[test]
    fn test_logical_walls_are_occupied_without_cells() {
        let mut config = config();
        config.walls = WallMode::Logical;
        let board = Board::new(&config);

        assert_eq!(board.get(Coord::new(3, 0)), Some(Cell::EMPTY));
        assert!(board.is_occupied(Coord::new(3, 0)));
        assert!(board.is_occupied(Coord::new(3, 11)));
        assert!(!board.is_occupied(Coord::new(3, 1)));
    }

    #[test]
    fn test_clear_blanks_without_removing() {
        let cfg = config();
        let mut board = Board::from_ascii(&cfg, &["X.........", "XXXXXXXXXX"]);
        assert_eq!(board.clear_full_rows(), 1);
        assert!(board.is_row_empty(19));
        assert_eq!(board.get(Coord::new(18, 0)).unwrap().kind, CellKind::Block);
    }

    #[test]
    fn test_collapse_settles_over_gap() {
        let cfg = config();
        let mut board = Board::from_ascii(&cfg, &["X.........", "..........", ".X........"]);
        board.collapse_gap_rows();
        assert_eq!(board.get(Coord::new(18, 0)).unwrap().kind, CellKind::Block);
        assert_eq!(board.get(Coord::new(19, 1)).unwrap().kind, CellKind::Block);
        assert!(board.is_row_empty(17));
    }

    #[test]
    fn test_clear_and_collapse_keeps_wall_floor() {
        let mut cfg = config();
        cfg.walls = WallMode::Cells;
        let mut board = Board::from_ascii(&cfg, &["#X.........#", "#XXXXXXXXXX#", "############"]);
        assert_eq!(board.clear_and_collapse(), 1);
        assert!(board.row_is_all_wall(20));
        assert_eq!(board.get(Coord::new(19, 1)).unwrap().kind, CellKind::Block);
        assert_eq!(board.block_count(), 1);
        assert!(board.get(Coord::new(0, 0)).unwrap().is_wall());
    }

    #[test]
    fn test_ascii_roundtrip() {
        let cfg = config();
        let board = Board::from_ascii(&cfg, &["X........X"]);
        let text = board.to_ascii();
        assert_eq!(text.len(), 20);
        assert_eq!(text[19], "X........X");
        assert_eq!(text[0], "..........");
    }
}
