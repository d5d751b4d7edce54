//! Static position evaluation

use crate::board::{Board, Mark, Pos, RUN_DIRECTIONS};
use crate::error::Result;
use crate::score::Score;

/// State of one run of k cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Run {
    /// No marks at all
    Empty,
    /// Both marks present, can never be completed
    Blocked,
    /// Only `owner` present, with `count` of the k cells taken
    Live { owner: Mark, count: usize },
}

/// Evaluate a position from `mark`'s point of view.
///
/// Every run of exactly `k` consecutive cells that still fits on the board
/// is examined. A run holding only one mark is worth its number of marks,
/// positive for `mark` and negative for the opponent. A run completely
/// filled by one mark decides the game and yields [`Score::Win`] or
/// [`Score::Loss`] immediately.
///
/// # Example
///
/// ```
/// use triline_core::{eval::heuristic, Board, Mark, Score};
///
/// let board: Board = "x . . / . o / .".parse().unwrap();
/// // one horizontal and one vertical run for x, one diagonal run for o
/// assert_eq!(heuristic(&board, 3, Mark::X), Score::Value(1));
/// ```
pub fn heuristic(board: &Board, k: usize, mark: Mark) -> Score {
    let span = k as isize - 1;
    let mut total: i64 = 0;

    for pos in board.positions() {
        for &(dr, dc) in RUN_DIRECTIONS.iter() {
            let (row, col) = (pos.row as isize, pos.col as isize);
            if !board.contains(row + span * dr, col + span * dc) {
                continue;
            }

            match scan_run(board, pos, dr, dc, k) {
                Run::Live { owner, count } if count == k => {
                    return if owner == mark { Score::Win } else { Score::Loss };
                }
                Run::Live { owner, count } => {
                    if owner == mark {
                        total += count as i64;
                    } else {
                        total -= count as i64;
                    }
                }
                Run::Empty | Run::Blocked => {}
            }
        }
    }

    Score::Value(total.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
}

/// Walk the `k` cells starting at `start`; the run must fit on the board.
fn scan_run(board: &Board, start: Pos, dr: isize, dc: isize, k: usize) -> Run {
    let mut run = Run::Empty;
    for m in 0..k as isize {
        let pos = Pos::new(
            (start.row as isize + m * dr) as usize,
            (start.col as isize + m * dc) as usize,
        );
        let Some(cell) = board.get(pos) else {
            continue;
        };
        run = match run {
            Run::Empty => Run::Live { owner: cell, count: 1 },
            Run::Live { owner, count } if owner == cell => Run::Live { owner, count: count + 1 },
            _ => return Run::Blocked,
        };
    }
    run
}

/// Opening value of every cell: the heuristic for O after placing a single
/// O on that cell of an empty board.
pub fn cell_values(n: usize, k: usize) -> Result<Vec<Vec<Score>>> {
    let mut board = Board::new(n)?;
    let mut values: Vec<Vec<Score>> = (0..n).map(|row| Vec::with_capacity(n - row)).collect();

    for pos in board.positions().collect::<Vec<_>>() {
        board.set(pos, Some(Mark::O));
        values[pos.row].push(heuristic(&board, k, Mark::O));
        board.set(pos, None);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        let board: Board = "x . . / . o / .".parse().unwrap();
        assert_eq!(heuristic(&board, 3, Mark::X), Score::Value(1));

        let board: Board = "x x . / . . / .".parse().unwrap();
        assert_eq!(heuristic(&board, 3, Mark::X), Score::Value(3));
    }

    #[test]
    fn test_heuristic_progression() {
        let mut board = Board::new(5).unwrap();
        board.set(Pos::new(0, 0), Some(Mark::O));
        assert_eq!(heuristic(&board, 3, Mark::O), Score::Value(3));
        assert_eq!(heuristic(&board, 3, Mark::X), Score::Value(-3));

        board.set(Pos::new(1, 0), Some(Mark::O));
        assert_eq!(heuristic(&board, 3, Mark::O), Score::Value(6));
        assert_eq!(heuristic(&board, 3, Mark::X), Score::Value(-6));

        board.set(Pos::new(0, 4), Some(Mark::X));
        assert_eq!(heuristic(&board, 3, Mark::O), Score::Value(4));

        board.set(Pos::new(2, 0), Some(Mark::X));
        assert_eq!(heuristic(&board, 3, Mark::O), Score::Value(-2));
        assert_eq!(heuristic(&board, 3, Mark::X), Score::Value(2));

        // o already holds two in a column
        assert_eq!(heuristic(&board, 2, Mark::O), Score::Win);
        assert_eq!(heuristic(&board, 2, Mark::X), Score::Loss);
    }

    #[test]
    fn test_empty_board_is_zero() {
        let board = Board::new(6).unwrap();
        assert_eq!(heuristic(&board, 4, Mark::O), Score::ZERO);
    }

    #[test]
    fn test_run_longer_than_board() {
        let board: Board = "x x / .".parse().unwrap();
        assert_eq!(heuristic(&board, 3, Mark::X), Score::ZERO);
    }

    #[test]
    fn test_antisymmetric_in_perspective() {
        let boards = [
            "x . . / . o / .",
            "o . . . . / x o . . / . x . / . . / .",
            "x o . . / . . x / o . / .",
            ". . . . . . / . x . . o / . . o . / x . x / . . / .",
        ];
        for text in boards {
            let board: Board = text.parse().unwrap();
            for k in 2..=4 {
                assert_eq!(
                    heuristic(&board, k, Mark::O),
                    -heuristic(&board, k, Mark::X),
                    "board {text}, k={k}"
                );
            }
        }
    }

    #[test]
    fn test_cell_values_shape_and_symmetry() {
        let values = cell_values(4, 3).unwrap();
        assert_eq!(values.len(), 4);
        for (row, cells) in values.iter().enumerate() {
            assert_eq!(cells.len(), 4 - row);
        }
        // The three corners of the triangle are equivalent
        assert_eq!(values[0][0], values[0][3]);
        assert_eq!(values[0][0], values[3][0]);
        assert!(cell_values(0, 3).is_err());
    }
}
