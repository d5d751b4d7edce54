//! TRILINE Core - Game engine and AI
//!
//! This crate provides the engine for k-in-a-row games on a triangular board:
//! - Board geometry (row `i` holds `n - i` cells)
//! - Win, draw and forced-draw detection
//! - Position evaluation by counting partially built lines
//! - Time-bounded negamax AI with alpha-beta pruning
//! - A game driver alternating two strategies

pub mod board;
pub mod error;
pub mod score;
pub mod rules;
pub mod eval;
pub mod ai;
pub mod player;
pub mod game;
pub mod config;

// Re-exports for convenient access
pub use board::{Board, Mark, Pos};
pub use error::{Error, Result};
pub use score::Score;
pub use rules::{is_forced_draw, winner, Outcome};
pub use eval::{cell_values, heuristic};
pub use ai::{choose_move, NegamaxAI, SearchReport, StopReason, TimeOut};
pub use player::{RandomPlayer, Strategy};
pub use game::{play_game, replay, GameRecord};
pub use config::GameConfig;
