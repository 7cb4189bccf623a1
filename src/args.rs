use std::path::PathBuf;

use clap::Parser;

use crate::model::constants::{DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_TAU};

#[derive(Parser, Clone)]
#[command(
    display_name = "Tactics Rating Processor",
    author = "tactics-rating",
    long_about = "Replays a recorded puzzle-attempt log and maintains a Glicko-2 rating for every player in it"
)]
pub struct Args {
    /// The attempt log: a JSON array of puzzle attempts, oldest first.
    /// Each row carries playerId, puzzleRating, solved and timestamp
    #[arg(short, long, env = "ATTEMPTS_FILE", help = "Path to the JSON attempt log")]
    pub attempts_file: PathBuf,

    /// System constant bounding how fast volatility may change.
    /// Reasonable values sit between 0.3 and 1.2
    #[arg(short, long, env = "RATING_TAU", default_value_t = DEFAULT_TAU)]
    pub tau: f64,

    /// Stopping tolerance of the volatility search
    #[arg(long, env = "RATING_CONVERGENCE_TOLERANCE", default_value_t = DEFAULT_CONVERGENCE_TOLERANCE)]
    pub convergence_tolerance: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}
