//! Terminal-state detection: completed lines, draws and forced draws

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark, Pos, WIN_DIRECTIONS};

/// Verdict on a position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Mark),
    Draw,
    Undetermined,
}

impl Outcome {
    pub fn is_decided(self) -> bool {
        self != Outcome::Undetermined
    }

    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(mark),
            _ => None,
        }
    }
}

/// Check whether some mark has `k` in a line.
///
/// Every line is found from one of its end cells by scanning the four
/// directions in [`WIN_DIRECTIONS`]. If both marks hold a line (impossible
/// under alternating play) the one met first in row-major order is reported.
pub fn winner(board: &Board, k: usize) -> Outcome {
    let mut any_free = false;

    for pos in board.positions() {
        let Some(mark) = board.get(pos) else {
            any_free = true;
            continue;
        };
        if completes_line(board, pos, mark, k) {
            return Outcome::Winner(mark);
        }
    }

    if any_free {
        Outcome::Undetermined
    } else {
        Outcome::Draw
    }
}

fn completes_line(board: &Board, pos: Pos, mark: Mark, k: usize) -> bool {
    WIN_DIRECTIONS
        .iter()
        .any(|&(dr, dc)| board.count_in_direction(mark, pos.row, pos.col, dr, dc) + 1 >= k)
}

/// Check if the game is already drawn even though cells may still be free.
///
/// Filling every free cell with a single mark is the most favourable
/// continuation that mark could hope for; if neither mark wins even then,
/// no line of `k` can ever appear.
pub fn is_forced_draw(board: &Board, k: usize) -> bool {
    Mark::ALL.iter().all(|&mark| {
        let mut filled = board.clone();
        filled.fill_empty(mark);
        winner(&filled, k) == Outcome::Draw
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap_marks(board: &Board) -> Board {
        let mut swapped = board.clone();
        for pos in board.positions() {
            swapped.set(pos, board.get(pos).map(Mark::opponent));
        }
        swapped
    }

    #[test]
    fn test_winner_lines() {
        let board: Board = ". . . . . / . x x x / . . x / . x / .".parse().unwrap();
        assert_eq!(winner(&board, 2), Outcome::Winner(Mark::X));
        assert_eq!(winner(&board, 3), Outcome::Winner(Mark::X));
        assert_eq!(winner(&board, 4), Outcome::Undetermined);

        let board: Board = "o o o o o / . x x x / . . x / . x / .".parse().unwrap();
        assert_eq!(winner(&board, 5), Outcome::Winner(Mark::O));
        assert_eq!(winner(&board, 6), Outcome::Undetermined);
    }

    #[test]
    fn test_winner_vertical_and_diagonal() {
        let vertical: Board = ". x . . / . x . / . x / .".parse().unwrap();
        assert_eq!(winner(&vertical, 3), Outcome::Winner(Mark::X));

        let diagonal: Board = "o . . . / . o . / . . / .".parse().unwrap();
        assert_eq!(winner(&diagonal, 2), Outcome::Winner(Mark::O));
        assert_eq!(winner(&diagonal, 3), Outcome::Undetermined);
    }

    #[test]
    fn test_winner_draw() {
        let board: Board = "o o x / x x / o".parse().unwrap();
        assert_eq!(winner(&board, 3), Outcome::Draw);
        assert!(winner(&board, 3).is_decided());
    }

    #[test]
    fn test_k_one_any_mark_wins() {
        let board: Board = ". . / x".parse().unwrap();
        assert_eq!(winner(&board, 1), Outcome::Winner(Mark::X));
        assert_eq!(winner(&Board::new(2).unwrap(), 1), Outcome::Undetermined);
    }

    #[test]
    fn test_winner_symmetric_under_swap() {
        let boards = [
            ". . . . . / . x x x / . . x / . x / .",
            "o o x / x x / o",
            "o . x / x . / o",
            ". x . . / . x . / . x / .",
        ];
        for text in boards {
            let board: Board = text.parse().unwrap();
            let swapped = swap_marks(&board);
            for k in 1..=5 {
                let expected = match winner(&board, k) {
                    Outcome::Winner(mark) => Outcome::Winner(mark.opponent()),
                    other => other,
                };
                assert_eq!(winner(&swapped, k), expected, "board {text}, k={k}");
            }
        }
    }

    #[test]
    fn test_is_forced_draw() {
        assert!(!is_forced_draw(&Board::new(3).unwrap(), 3));
        // More symbols needed than the board is wide
        assert!(is_forced_draw(&Board::new(3).unwrap(), 4));

        let mut board: Board = "o . x / x x / o".parse().unwrap();
        assert!(is_forced_draw(&board, 3));
        assert!(!is_forced_draw(&board, 2));
        board.set(Pos::new(0, 2), None);
        assert!(!is_forced_draw(&board, 3));
    }

    #[test]
    fn test_is_forced_draw_does_not_touch_board() {
        let board: Board = "o . x / . x / .".parse().unwrap();
        let before = board.clone();
        let _ = is_forced_draw(&board, 3);
        assert_eq!(board, before);
    }
}
