//! Play command - human vs AI on the console

use anyhow::{Context, Result};
use clap::Args;

use triline_core::{play_game, GameConfig, NegamaxAI, Outcome, Strategy};

use crate::human::HumanPlayer;
use crate::match_cmd::print_history;
use crate::GameArgs;

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Take O and move first (by default the AI opens)
    #[arg(long)]
    pub human_first: bool,

    /// Print every position of the finished game
    #[arg(long)]
    pub history: bool,
}

/// Run play command
pub fn run(args: PlayArgs, config: GameConfig) -> Result<()> {
    println!(
        "AI vs human, board size = {}, number of symbols to win = {}. AI time limit = {} s.",
        config.size, config.k, config.time_limit_secs
    );

    let mut ai = NegamaxAI::from_config(&config);
    let mut human = HumanPlayer::stdio();

    let (o, x): (&mut dyn Strategy, &mut dyn Strategy) = if args.human_first {
        (&mut human, &mut ai)
    } else {
        (&mut ai, &mut human)
    };

    let record = play_game(o, x, config.size, config.k).context("Game aborted")?;

    println!("{}", record.board);
    if args.history {
        print_history(&record.history, config.size)?;
    }
    match record.outcome {
        Outcome::Winner(mark) => println!("Result: {mark}"),
        _ => println!("Result: ."),
    }

    Ok(())
}
