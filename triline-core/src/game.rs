//! Game driver: alternates two strategies on one board

use crate::board::{Board, Mark, Pos};
use crate::error::{Error, Result};
use crate::player::Strategy;
use crate::rules::{is_forced_draw, winner, Outcome};

/// Result of a finished game
#[derive(Clone, Debug)]
pub struct GameRecord {
    /// Final position
    pub board: Board,
    /// Winner, or draw
    pub outcome: Outcome,
    /// Moves in the order they were played
    pub history: Vec<(Mark, Pos)>,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Mark> {
        self.outcome.winner()
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == Outcome::Draw
    }
}

/// Play a game on a size-`n` board where `k` in a line wins. O moves first.
///
/// The game ends as soon as a line is completed, the board is full, or no
/// continuation can produce a line any more (forced draw).
pub fn play_game(
    o: &mut dyn Strategy,
    x: &mut dyn Strategy,
    n: usize,
    k: usize,
) -> Result<GameRecord> {
    let mut board = Board::new(n)?;
    let mut history = Vec::new();

    loop {
        for mark in Mark::ALL {
            let strategy: &mut dyn Strategy = match mark {
                Mark::O => &mut *o,
                Mark::X => &mut *x,
            };

            let pos = strategy.choose_move(&board, k, mark).ok_or(Error::NoMove)?;
            board.place(pos, mark)?;
            history.push((mark, pos));
            tracing::trace!("{} ({}) -> {}", mark, strategy.name(), pos);

            let outcome = winner(&board, k);
            if outcome.is_decided() {
                return Ok(GameRecord {
                    board,
                    outcome,
                    history,
                });
            }
            if board.is_full() || is_forced_draw(&board, k) {
                return Ok(GameRecord {
                    board,
                    outcome: Outcome::Draw,
                    history,
                });
            }
        }
    }
}

/// Re-apply `history` on an empty board, returning the position after each
/// move.
pub fn replay(history: &[(Mark, Pos)], n: usize) -> Result<Vec<Board>> {
    let mut board = Board::new(n)?;
    history
        .iter()
        .map(|&(mark, pos)| {
            board.place(pos, mark)?;
            Ok(board.clone())
        })
        .collect()
}
