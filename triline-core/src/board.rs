//! Triangular board geometry and occupancy
//!
//! Row `i` (counted from the top) holds `n - i` cells, so a cell `(row, col)`
//! lies on the board iff `row + col < n`. Cells are stored row-major in one
//! flat vector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Directions used to detect a completed line from its first cell:
/// left, down, up-left, down-left (as `(drow, dcol)`).
pub const WIN_DIRECTIONS: [(isize, isize); 4] = [(0, -1), (1, 0), (-1, -1), (1, -1)];

/// Directions along which runs of k cells are enumerated by the evaluator:
/// right, up, up-right, up-left.
pub const RUN_DIRECTIONS: [(isize, isize); 4] = [(0, 1), (-1, 0), (-1, 1), (-1, -1)];

/// Player mark
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    O,
    X,
}

impl Mark {
    pub const ALL: [Mark; 2] = [Mark::O, Mark::X];

    pub fn opponent(self) -> Self {
        match self {
            Mark::O => Mark::X,
            Mark::X => Mark::O,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::O => 'o',
            Mark::X => 'x',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            'o' | 'O' => Some(Mark::O),
            'x' | 'X' => Some(Mark::X),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Board coordinates; also the move type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Triangular board of size `n`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Mark>>,
}

impl Board {
    /// Create an empty board of size `n`
    pub fn new(n: usize) -> Result<Self> {
        if n < 1 {
            return Err(Error::InvalidSize(n));
        }
        Ok(Self {
            size: n,
            cells: vec![None; n * (n + 1) / 2],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells, `n(n+1)/2`
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells in `row`
    pub fn row_len(&self, row: usize) -> usize {
        self.size.saturating_sub(row)
    }

    /// Check if a signed coordinate is on the board
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && ((row + col) as usize) < self.size
    }

    fn index(&self, pos: Pos) -> usize {
        debug_assert!(pos.row + pos.col < self.size, "{pos} is off the board");
        pos.row * self.size - pos.row * pos.row.saturating_sub(1) / 2 + pos.col
    }

    pub fn get(&self, pos: Pos) -> Option<Mark> {
        self.cells[self.index(pos)]
    }

    /// Write a cell without any legality check.
    ///
    /// Used by the search to apply a mark to a known-empty cell and to undo
    /// it again by writing `None`.
    pub fn set(&mut self, pos: Pos, cell: Option<Mark>) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    /// Place `mark` on `pos`, failing if the cell is off the board or taken
    pub fn place(&mut self, pos: Pos, mark: Mark) -> Result<()> {
        let invalid = Error::InvalidMove {
            row: pos.row,
            col: pos.col,
        };
        if pos.row + pos.col >= self.size {
            return Err(invalid);
        }
        if self.get(pos).is_some() {
            return Err(invalid);
        }
        self.set(pos, Some(mark));
        Ok(())
    }

    /// All positions holding `cell`, row-major with ascending columns
    pub fn cells_with(&self, cell: Option<Mark>) -> Vec<Pos> {
        self.positions().filter(|&pos| self.get(pos) == cell).collect()
    }

    /// All empty positions, i.e. the legal moves
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.cells_with(None)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterate over every position in enumeration order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.size).flat_map(move |row| (0..self.row_len(row)).map(move |col| Pos::new(row, col)))
    }

    /// Rows of the board, top to bottom
    pub fn rows(&self) -> Vec<&[Option<Mark>]> {
        (0..self.size)
            .map(|row| {
                let start = self.index(Pos::new(row, 0));
                &self.cells[start..start + self.row_len(row)]
            })
            .collect()
    }

    /// Fill every empty cell with `mark`
    pub fn fill_empty(&mut self, mark: Mark) {
        for cell in self.cells.iter_mut().filter(|c| c.is_none()) {
            *cell = Some(mark);
        }
    }

    /// Count consecutive `mark` cells strictly after `(row, col)` in
    /// direction `(drow, dcol)`, stopping at the board edge.
    pub fn count_in_direction(
        &self,
        mark: Mark,
        row: usize,
        col: usize,
        drow: isize,
        dcol: isize,
    ) -> usize {
        debug_assert!((-1..=1).contains(&drow) && (-1..=1).contains(&dcol));
        let mut r = row as isize;
        let mut c = col as isize;
        let mut count = 0;
        loop {
            r += drow;
            c += dcol;
            if !self.contains(r, c) || self.get(Pos::new(r as usize, c as usize)) != Some(mark) {
                return count;
            }
            count += 1;
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.map_or('.', Mark::symbol))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parse the printed form: one row per line (or `/`-separated),
    /// `.` for empty cells and `o`/`x` for marks.
    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<Vec<char>> = s
            .split(['\n', '/'])
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let mut board = Board::new(rows.len())?;
        for (row, symbols) in rows.iter().enumerate() {
            if symbols.len() != board.row_len(row) {
                return Err(Error::Parse(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    symbols.len(),
                    board.row_len(row)
                )));
            }
            for (col, &c) in symbols.iter().enumerate() {
                let cell = match c {
                    '.' => None,
                    _ => Some(
                        Mark::from_symbol(c)
                            .ok_or_else(|| Error::Parse(format!("unexpected symbol '{c}'")))?,
                    ),
                };
                board.set(Pos::new(row, col), cell);
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_shape() {
        for n in 1..=9 {
            let board = Board::new(n).unwrap();
            assert_eq!(board.cell_count(), n * (n + 1) / 2);
            let rows = board.rows();
            assert_eq!(rows.len(), n);
            for (i, row) in rows.iter().enumerate() {
                assert_eq!(row.len(), n - i);
            }
        }
    }

    #[test]
    fn test_invalid_size() {
        assert_eq!(Board::new(0), Err(Error::InvalidSize(0)));
    }

    #[test]
    fn test_empty_cells_order() {
        let board = Board::new(3).unwrap();
        let expected = vec![
            Pos::new(0, 0),
            Pos::new(0, 1),
            Pos::new(0, 2),
            Pos::new(1, 0),
            Pos::new(1, 1),
            Pos::new(2, 0),
        ];
        assert_eq!(board.empty_cells(), expected);
    }

    #[test]
    fn test_set_and_undo() {
        let mut board: Board = "o . . / . . / x".parse().unwrap();
        let before = board.clone();
        board.set(Pos::new(1, 1), Some(Mark::X));
        assert_ne!(board, before);
        board.set(Pos::new(1, 1), None);
        assert_eq!(board, before);

        board.set(Pos::new(0, 0), None);
        assert_eq!(board, ". . . / . . / x".parse().unwrap());
    }

    #[test]
    fn test_place_rejects_invalid() {
        let mut board = Board::new(3).unwrap();
        assert!(board.place(Pos::new(1, 1), Mark::O).is_ok());
        assert_eq!(
            board.place(Pos::new(1, 1), Mark::X),
            Err(Error::InvalidMove { row: 1, col: 1 })
        );
        assert_eq!(
            board.place(Pos::new(1, 2), Mark::X),
            Err(Error::InvalidMove { row: 1, col: 2 })
        );
    }

    #[test]
    fn test_place_fills_expected_cells() {
        let mut board = Board::new(5).unwrap();
        for (r, c) in [(1, 1), (1, 2), (1, 3), (2, 2), (3, 1)] {
            board.place(Pos::new(r, c), Mark::X).unwrap();
        }
        assert_eq!(board.to_string(), ". . . . .\n. x x x\n. . x\n. x\n.");
        assert_eq!(board.cells_with(Some(Mark::X)).len(), 5);
    }

    #[test]
    fn test_count_in_direction() {
        let board: Board = ". . . . . / . x x x / . . x / . x / .".parse().unwrap();
        // Right along row 1
        assert_eq!(board.count_in_direction(Mark::X, 1, 1, 0, 1), 2);
        // Down-left along the anti-diagonal row + col == 4
        assert_eq!(board.count_in_direction(Mark::X, 1, 3, 1, -1), 2);
        // Start cell itself is never counted
        assert_eq!(board.count_in_direction(Mark::X, 0, 0, 0, 1), 0);
        // Stops at the triangle edge
        assert_eq!(board.count_in_direction(Mark::O, 4, 0, 1, 0), 0);
    }

    #[test]
    fn test_parse_and_display() {
        let board: Board = "x . .\n. o\n.".parse().unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.get(Pos::new(0, 0)), Some(Mark::X));
        assert_eq!(board.get(Pos::new(1, 1)), Some(Mark::O));
        assert_eq!(board.to_string(), "x . .\n. o\n.");

        assert!(matches!("x . / .".parse::<Board>(), Ok(_)));
        assert!(matches!("x . . / . / .".parse::<Board>(), Err(Error::Parse(_))));
        assert!(matches!("x q / .".parse::<Board>(), Err(Error::Parse(_))));
        assert!(matches!("".parse::<Board>(), Err(Error::InvalidSize(0))));
    }

    #[test]
    fn test_mark_opponent_involution() {
        for mark in Mark::ALL {
            assert_ne!(mark.opponent(), mark);
            assert_eq!(mark.opponent().opponent(), mark);
        }
    }
}
