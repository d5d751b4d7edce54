//! Extended-integer score with exact win/loss sentinels

use std::fmt;
use std::ops::Neg;

use serde::{Deserialize, Serialize};

/// Position value from the mover's point of view.
///
/// `Loss` and `Win` stand for proven outcomes and order below and above
/// every finite heuristic value. Variant order drives the derived `Ord`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Score {
    Loss,
    Value(i32),
    Win,
}

impl Score {
    pub const ZERO: Score = Score::Value(0);
}

impl Default for Score {
    fn default() -> Self {
        Score::ZERO
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        match self {
            Score::Loss => Score::Win,
            Score::Win => Score::Loss,
            Score::Value(v) => Score::Value(-v),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Loss => write!(f, "-inf"),
            Score::Win => write!(f, "inf"),
            Score::Value(v) => write!(f, "{v}"),
        }
    }
}
