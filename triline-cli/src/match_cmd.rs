//! Match command - play automated games between two strategies
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: strategy construction, formatting utilities

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use triline_core::{
    play_game, replay, GameConfig, Mark, NegamaxAI, Outcome, Pos, RandomPlayer, Strategy,
};

use crate::GameArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Kind of automated player
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// Negamax search within the time limit
    Ai,
    /// Uniformly random free cell
    Random,
}

#[derive(Args)]
pub struct MatchArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Player taking O (moves first)
    #[arg(long, value_enum, default_value = "ai")]
    pub o: PlayerKind,

    /// Player taking X
    #[arg(long, value_enum, default_value = "random")]
    pub x: PlayerKind,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Print every position of every game
    #[arg(long)]
    pub replay: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameSummary {
    game_number: usize,
    outcome: Outcome,
    history: Vec<(Mark, Pos)>,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameSummary>,
    o_wins: usize,
    x_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Play the match (multiple games)
/// 2. Report results
pub fn run(args: MatchArgs, config: GameConfig) -> Result<()> {
    tracing::info!(
        "Starting match: {:?} vs {:?} ({} games, size={}, k={}, time={}s)",
        args.o,
        args.x,
        args.games,
        config.size,
        config.k,
        config.time_limit_secs
    );

    let results = play_match(&args, &config)?;

    report_results(&results, &args, config.size)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(args: &MatchArgs, config: &GameConfig) -> Result<MatchResults> {
    let mut rng = create_rng(config.seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        let summary = play_single_game(game_num + 1, args, config, &mut rng)?;

        tracing::info!(
            "Game {}: {:?} ({} moves)",
            summary.game_number,
            summary.outcome,
            summary.history.len()
        );

        games.push(summary);
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs, size: usize) -> Result<()> {
    if args.json {
        print_json_results(results)?;
    } else {
        print_text_results(results);
    }

    if args.replay {
        for game in &results.games {
            println!("\nGame {}:", game.game_number);
            print_history(&game.history, size)?;
        }
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play a single game with freshly seeded players
fn play_single_game(
    game_number: usize,
    args: &MatchArgs,
    config: &GameConfig,
    rng: &mut ChaCha8Rng,
) -> Result<GameSummary> {
    let mut o = create_strategy(args.o, config, rng.gen());
    let mut x = create_strategy(args.x, config, rng.gen());

    let record = play_game(o.as_mut(), x.as_mut(), config.size, config.k)
        .with_context(|| format!("Game {} failed", game_number))?;

    Ok(GameSummary {
        game_number,
        outcome: record.outcome,
        history: record.history,
    })
}

/// Compute aggregate statistics from game summaries
fn compute_match_statistics(games: Vec<GameSummary>) -> MatchResults {
    let o_wins = games
        .iter()
        .filter(|g| g.outcome == Outcome::Winner(Mark::O))
        .count();
    let x_wins = games
        .iter()
        .filter(|g| g.outcome == Outcome::Winner(Mark::X))
        .count();
    let draws = games.iter().filter(|g| g.outcome == Outcome::Draw).count();

    let total_moves: usize = games.iter().map(|g| g.history.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        o_wins,
        x_wins,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn create_strategy(kind: PlayerKind, config: &GameConfig, seed: u64) -> Box<dyn Strategy> {
    match kind {
        PlayerKind::Ai => Box::new(NegamaxAI::with_seed(config.time_limit(), seed)),
        PlayerKind::Random => Box::new(RandomPlayer::with_seed(seed)),
    }
}

/// Print the position after every move of a game
pub fn print_history(history: &[(Mark, Pos)], size: usize) -> Result<()> {
    let boards = replay(history, size).context("Failed to replay game")?;
    for board in boards {
        println!("{}", board);
        println!("{}", "--".repeat(size));
    }
    Ok(())
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame<'a> {
        game_number: usize,
        outcome: Outcome,
        moves: &'a [(Mark, Pos)],
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        total_games: usize,
        o_wins: usize,
        x_wins: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame<'a>>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        o_wins: results.o_wins,
        x_wins: results.x_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                outcome: g.outcome,
                moves: &g.history,
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!("O wins:      {} ({:.1}%)", results.o_wins, percent(results.o_wins, total));
    println!("X wins:      {} ({:.1}%)", results.x_wins, percent(results.x_wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} moves",
            game.game_number,
            game.outcome,
            game.history.len()
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
