// --- File: quoridor-project/quoridor-cli/src/options.rs ---

use clap::Parser;

/// `program [-m N] [-t c] STRAT1 STRAT2`
#[derive(Clone, Debug, Parser)]
#[command(name = "quoridor-cli", about = "Referee two Quoridor strategies against each other")]
pub struct CliOptions {
    /// Board side length.
    #[arg(short = 'm', long = "size", default_value_t = 15)]
    pub size: usize,

    /// Per-move time budget in seconds, for strategies that honour one.
    /// Defaults to the 15s-total/100-turn split (15000/100 = 150ms).
    #[arg(short = 't', long = "time-budget", default_value_t = 0.15)]
    pub time_budget_secs: f64,

    /// Safety valve: end the game with no winner after this many turns.
    #[arg(long = "max-turns", default_value_t = 2000)]
    pub max_turns: u32,

    /// First strategy, playing Black unless --random-start is set.
    pub strategy1: String,

    /// Second strategy, playing White unless --random-start is set.
    pub strategy2: String,

    /// Pick the first-to-move colour randomly instead of always Black.
    #[arg(long, default_value_t = false)]
    pub random_start: bool,
}
