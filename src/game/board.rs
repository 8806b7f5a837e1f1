use std::fmt;

use serde::Serialize;

use super::piece::{Piece, Symbol};
use crate::error::{BoardError, MoveError};

/// Number of same-owner pieces in a line needed to win.
pub const CONNECT: usize = 4;

/// Horizontal, vertical, diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Cell coordinates. Row 0 is the top; gravity pulls toward the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    Empty,
    Occupied(Piece),
}

impl Cell {
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(piece) => Some(piece),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A piece moved from one cell to another, either by gravity or by a Teleport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relocation {
    pub from: Position,
    pub to: Position,
}

/// A `rows x cols` grid whose dimensions are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Boards smaller than 4 in both directions are
    /// allowed but can never produce a winner, see [`Board::can_connect_four`].
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::ZeroDimension { rows, cols });
        }
        Ok(Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether a line of [`CONNECT`] pieces fits anywhere on this board.
    pub fn can_connect_four(&self) -> bool {
        self.rows >= CONNECT || self.cols >= CONNECT
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "({row}, {col}) is off a {}x{} board",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.idx(row, col)]
    }

    pub fn at(&self, pos: Position) -> Cell {
        self.get(pos.row, pos.col)
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        let idx = self.idx(pos.row, pos.col);
        self.cells[idx] = cell;
    }

    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        !self.get(0, col).is_empty()
    }

    /// Lowest empty row in `col`, if any.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).rev().find(|&row| self.get(row, col).is_empty())
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Validate a drop without touching the board.
    pub fn check_drop(&self, col: usize) -> Result<Position, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn {
                column: col,
                cols: self.cols,
            });
        }
        self.landing_row(col)
            .map(|row| Position::new(row, col))
            .ok_or(MoveError::ColumnFull(col))
    }

    /// Drop a piece in a column, returns the cell where it landed
    pub fn drop_piece(&mut self, col: usize, piece: Piece) -> Result<Position, MoveError> {
        let landing = self.check_drop(col)?;
        self.set(landing, Cell::Occupied(piece));
        Ok(landing)
    }

    /// Empty a cell, returning what was there.
    pub fn clear(&mut self, pos: Position) -> Option<Piece> {
        let previous = self.at(pos).piece();
        self.set(pos, Cell::Empty);
        previous
    }

    pub fn swap(&mut self, a: Position, b: Position) {
        let (ia, ib) = (self.idx(a.row, a.col), self.idx(b.row, b.col));
        self.cells.swap(ia, ib);
    }

    /// Compact every column downward, keeping the relative order of its
    /// pieces. Returns the moves made; an already settled board yields none.
    pub fn settle(&mut self) -> Vec<Relocation> {
        let mut moved = Vec::new();
        for col in 0..self.cols {
            let mut target = self.rows;
            for row in (0..self.rows).rev() {
                let cell = self.get(row, col);
                if cell.is_empty() {
                    continue;
                }
                target -= 1;
                if target != row {
                    let from = Position::new(row, col);
                    let to = Position::new(target, col);
                    self.set(to, cell);
                    self.set(from, Cell::Empty);
                    moved.push(Relocation { from, to });
                }
            }
        }
        moved
    }

    /// Whether no occupied cell sits above an empty one.
    pub fn is_settled(&self) -> bool {
        (0..self.cols).all(|col| {
            (1..self.rows).all(|row| {
                self.get(row - 1, col).is_empty() || !self.get(row, col).is_empty()
            })
        })
    }

    /// First owner found with four in a row, scanning from the top-left.
    pub fn check_winner(&self) -> Option<Symbol> {
        self.winning_owners().into_iter().next()
    }

    /// Every owner that currently has four in a row, in scan order.
    pub fn winning_owners(&self) -> Vec<Symbol> {
        let mut owners = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let Some(piece) = self.get(row, col).piece() else {
                    continue;
                };
                if owners.contains(&piece.owner) {
                    continue;
                }
                let wins = DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| self.line_from(row, col, dr, dc, piece.owner));
                if wins {
                    owners.push(piece.owner);
                }
            }
        }
        owners
    }

    /// Check for `CONNECT` pieces of `owner` starting at (row, col).
    fn line_from(&self, row: usize, col: usize, dr: isize, dc: isize, owner: Symbol) -> bool {
        (1..CONNECT as isize).all(|step| {
            let r = row as isize + dr * step;
            let c = col as isize + dc * step;
            self.contains(r, c)
                && self
                    .get(r as usize, c as usize)
                    .piece()
                    .is_some_and(|p| p.owner == owner)
        })
    }

    /// Rows top to bottom, each an ordered list of cells.
    pub fn snapshot(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols).map(<[Cell]>::to_vec).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = (1..=self.cols).map(|n| format!("{n:^3}")).collect();
        writeln!(f, "{}", format!(" {}", header.join(" ")).trim_end())?;

        let border = format!("+{}", "---+".repeat(self.cols));
        for row in 0..self.rows {
            writeln!(f, "{border}")?;
            write!(f, "|")?;
            for col in 0..self.cols {
                let glyph = self.get(row, col).piece().map_or(' ', Piece::glyph);
                write!(f, " {glyph} |")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{border}")
    }
}
