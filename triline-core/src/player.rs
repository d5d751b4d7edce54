//! Move-producing strategies the game driver can alternate

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::ai::NegamaxAI;
use crate::board::{Board, Mark, Pos};

/// Anything that can pick a move for `mark` on `board`.
///
/// Returns `None` only when no move is available.
pub trait Strategy {
    fn choose_move(&mut self, board: &Board, k: usize, mark: Mark) -> Option<Pos>;

    /// Short label for logs and reports
    fn name(&self) -> &str;
}

impl Strategy for NegamaxAI {
    fn choose_move(&mut self, board: &Board, k: usize, mark: Mark) -> Option<Pos> {
        let report = self.search(board, k, mark)?;
        tracing::debug!(
            "{} plays {} (depth {}, score {:?}, {:?})",
            mark,
            report.best,
            report.depth,
            report.score,
            report.stop
        );
        Some(report.best)
    }

    fn name(&self) -> &str {
        "negamax"
    }
}

/// Picks uniformly among the free cells
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomPlayer {
    fn choose_move(&mut self, board: &Board, _k: usize, _mark: Mark) -> Option<Pos> {
        board.empty_cells().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_random_player_picks_free_cell() {
        let board: Board = "o x . / . x / o".parse().unwrap();
        let mut player = RandomPlayer::with_seed(1);
        for _ in 0..20 {
            let pos = player.choose_move(&board, 3, Mark::O).unwrap();
            assert!(board.get(pos).is_none());
        }
    }

    #[test]
    fn test_random_player_full_board() {
        let board: Board = "o o x / x x / o".parse().unwrap();
        assert_eq!(RandomPlayer::with_seed(1).choose_move(&board, 3, Mark::X), None);
    }

    #[test]
    fn test_strategies_are_interchangeable() {
        let board: Board = "x . o / x o / .".parse().unwrap();
        let mut strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(RandomPlayer::with_seed(5)),
            Box::new(NegamaxAI::with_seed(Duration::from_secs(1), 5)),
        ];
        for strategy in strategies.iter_mut() {
            let pos = strategy.choose_move(&board, 3, Mark::X).unwrap();
            assert!(board.get(pos).is_none(), "{} chose a taken cell", strategy.name());
        }
    }
}
