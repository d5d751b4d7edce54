//! Time-bounded negamax AI with alpha-beta pruning and iterative deepening

use std::time::{Duration, Instant};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Mark, Pos};
use crate::config::GameConfig;
use crate::eval::heuristic;
use crate::rules::winner;
use crate::score::Score;

// ============================================================================
// TIMEOUT
// ============================================================================

/// The search deadline passed; the working board has been restored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("search deadline exceeded")]
pub struct TimeOut;

// ============================================================================
// NEGAMAX AI
// ============================================================================

/// Negamax AI player with a wall-clock budget per move
#[derive(Clone, Debug)]
pub struct NegamaxAI {
    pub time_limit: Duration,
    rng: ChaCha8Rng,
}

impl NegamaxAI {
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(time_limit: Duration, seed: u64) -> Self {
        Self {
            time_limit,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(config.time_limit(), seed),
            None => Self::new(config.time_limit()),
        }
    }

    /// Get best move for `mark`, or `None` on a full board
    pub fn best_move(&mut self, board: &Board, k: usize, mark: Mark) -> Option<Pos> {
        self.search(board, k, mark).map(|report| report.best)
    }

    /// Run a full decision and report how it ended
    pub fn search(&mut self, board: &Board, k: usize, mark: Mark) -> Option<SearchReport> {
        search(board, k, mark, self.time_limit, &mut self.rng)
    }
}

/// Why iterative deepening stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// A move with a proven win was found
    ForcedWin,
    /// Every move loses against best play
    AllLosing,
    /// All other moves were proven losing
    SingleCandidate,
    /// The depth reached the number of free cells
    Solved,
    /// The deadline passed mid-iteration
    TimeOut,
}

/// Outcome of one move decision
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub best: Pos,
    /// Deepest fully completed iteration (0 if none)
    pub depth: usize,
    /// Score of `best` at that depth
    pub score: Option<Score>,
    pub stop: StopReason,
}

// ============================================================================
// NEGAMAX WITH ALPHA-BETA
// ============================================================================

/// Value of the position for `mark` to move, searched `depth` plies deep.
///
/// `board` is mutated while searching but always restored before
/// returning, including when the deadline passes. A `None` deadline never
/// expires.
pub fn negamax(
    board: &mut Board,
    k: usize,
    mark: Mark,
    depth: usize,
    mut alpha: Score,
    beta: Score,
    deadline: Option<Instant>,
) -> Result<Score, TimeOut> {
    if matches!(deadline, Some(deadline) if Instant::now() > deadline) {
        return Err(TimeOut);
    }

    if depth == 0 || winner(board, k).is_decided() {
        return Ok(heuristic(board, k, mark));
    }

    let opponent = mark.opponent();
    let mut best = Score::Loss;

    for pos in board.empty_cells() {
        board.set(pos, Some(mark));
        let child = negamax(board, k, opponent, depth - 1, -beta, -alpha, deadline);
        board.set(pos, None);

        let value = -child?;
        best = best.max(value);
        alpha = alpha.max(best);

        if alpha > beta {
            return Ok(alpha);
        }
    }

    Ok(best)
}

// ============================================================================
// ITERATIVE DEEPENING
// ============================================================================

/// Choose a move for `mark` within `time_limit`.
///
/// Returns `None` only when the board has no free cell.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    k: usize,
    mark: Mark,
    time_limit: Duration,
    rng: &mut R,
) -> Option<Pos> {
    search(board, k, mark, time_limit, rng).map(|report| report.best)
}

/// Iterative deepening over the free cells of `board`.
///
/// Candidates are shuffled once, then re-sorted by score after every
/// completed depth. Proven losing moves are dropped between iterations.
/// The caller's board is never modified.
pub fn search<R: Rng + ?Sized>(
    board: &Board,
    k: usize,
    mark: Mark,
    time_limit: Duration,
    rng: &mut R,
) -> Option<SearchReport> {
    // Budgets past the end of the clock mean no deadline at all
    let deadline = Instant::now().checked_add(time_limit);
    let mut work = board.clone();

    let mut candidates: Vec<(Pos, Score)> = work
        .empty_cells()
        .into_iter()
        .map(|pos| (pos, Score::ZERO))
        .collect();
    candidates.shuffle(rng);

    let free = candidates.len();
    let mut report = SearchReport {
        best: candidates.first()?.0,
        depth: 0,
        score: None,
        stop: StopReason::Solved,
    };

    for depth in 1..=free {
        match score_candidates(&mut work, k, mark, depth, &mut candidates, deadline) {
            Err(TimeOut) => {
                tracing::debug!(
                    "Timed out at depth {}, keeping {} from depth {}",
                    depth,
                    report.best,
                    report.depth
                );
                report.stop = StopReason::TimeOut;
                return Some(report);
            }
            Ok(Some(winning)) => {
                tracing::debug!("Forced win {} found at depth {}", winning, depth);
                return Some(SearchReport {
                    best: winning,
                    depth,
                    score: Some(Score::Win),
                    stop: StopReason::ForcedWin,
                });
            }
            Ok(None) => {}
        }

        // Stable sort keeps the shuffled order among equal scores
        candidates.sort_by(|a, b| b.1.cmp(&a.1));
        let (best, best_score) = candidates[0];
        report.best = best;
        report.depth = depth;
        report.score = Some(best_score);

        if best_score == Score::Loss {
            report.stop = StopReason::AllLosing;
            return Some(report);
        }

        candidates.retain(|&(_, score)| score > Score::Loss);
        tracing::debug!(
            "Depth {} done: best {} ({}), {} candidates left",
            depth,
            best,
            best_score,
            candidates.len()
        );

        if candidates.len() == 1 {
            report.stop = StopReason::SingleCandidate;
            return Some(report);
        }
    }

    Some(report)
}

/// Score every candidate at `depth`, returning early with a winning move.
///
/// Scores are written in place. After a timeout they are partial and the
/// caller falls back to the order of the previous depth.
fn score_candidates(
    work: &mut Board,
    k: usize,
    mark: Mark,
    depth: usize,
    candidates: &mut [(Pos, Score)],
    deadline: Option<Instant>,
) -> Result<Option<Pos>, TimeOut> {
    let opponent = mark.opponent();
    let mut local_best = Score::Loss;

    for (pos, score) in candidates.iter_mut() {
        work.set(*pos, Some(mark));
        let child = negamax(work, k, opponent, depth - 1, Score::Loss, -local_best, deadline);
        work.set(*pos, None);

        let value = -child?;
        if value == Score::Win {
            return Ok(Some(*pos));
        }
        *score = value;
        local_best = local_best.max(value);
    }

    Ok(None)
}

// ============================================================================
// TESTS
// ============================================================================
