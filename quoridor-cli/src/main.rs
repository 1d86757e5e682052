// --- File: quoridor-project/quoridor-cli/src/main.rs ---

mod options;

use anyhow::{bail, Result};
use clap::Parser;
use options::CliOptions;
use quoridor_core::strategy::{GreedyStrategy, SearchStrategy, WallChoice};
use quoridor_core::{Color, Config, Referee, Strategy};
use rand::Rng;
use std::time::Duration;

/// Builds the strategy named on the command line. Centralises the
/// name-to-implementation mapping the way the library's own strategy
/// module centralises trait dispatch.
fn create_strategy(name: &str, per_move_budget: Duration) -> Result<Box<dyn Strategy>> {
    match name {
        "greedy-good" => Ok(Box::new(GreedyStrategy::new(WallChoice::Good))),
        "greedy-better" => Ok(Box::new(GreedyStrategy::new(WallChoice::Better))),
        "search" => Ok(Box::new(
            SearchStrategy::new().with_per_move_budget(per_move_budget),
        )),
        other => bail!(
            "unknown strategy '{}': expected one of greedy-good, greedy-better, search",
            other
        ),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let options = CliOptions::parse();
    if options.size < 3 {
        bail!("board size must be at least 3, got {}", options.size);
    }

    let per_move_budget = Duration::from_secs_f64(options.time_budget_secs);
    let mut strategy1 = create_strategy(&options.strategy1, per_move_budget)?;
    let mut strategy2 = create_strategy(&options.strategy2, per_move_budget)?;

    let config = Config::new(options.size);
    log::info!(
        "{} vs {} on a {}x{} board, {} walls each",
        strategy1.name(),
        strategy2.name(),
        options.size,
        options.size,
        config.wall_allotment()
    );

    let first = if options.random_start {
        if rand::thread_rng().gen_bool(0.5) {
            Color::Black
        } else {
            Color::White
        }
    } else {
        Color::Black
    };

    let referee = Referee::new(config, strategy1.as_mut(), strategy2.as_mut())
        .with_max_turns(options.max_turns);
    let outcome = referee.run(first);

    match outcome.winner {
        Some(winner) => println!(
            "{} wins after {} turns ({:?})",
            match winner {
                Color::Black => &options.strategy1,
                Color::White => &options.strategy2,
            },
            outcome.turns,
            outcome.reason
        ),
        None => println!("no winner after {} turns ({:?})", outcome.turns, outcome.reason),
    }

    Ok(())
}
