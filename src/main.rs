use std::{error::Error, fs, path::Path};

use clap::Parser;
use tracing::{error, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tactics_rating::{
    args::Args,
    model::{
        rating_tracker::RatingTracker,
        rating_utils::attempt_result,
        structures::{player_rating::PuzzleAttempt, rating_adjustment_type::RatingAdjustmentType},
        SystemParams
    },
    utils::progress_utils::progress_bar
};

fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();

    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();

    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let attempts = load_attempts(&args.attempts_file)?;
    info!(
        "Loaded {} attempts from {}",
        attempts.len(),
        args.attempts_file.display()
    );

    let mut tracker = RatingTracker::new(SystemParams {
        tau: args.tau,
        convergence_tolerance: args.convergence_tolerance
    });

    let bar = progress_bar(attempts.len() as u64, "Replaying attempt log".to_string());
    for attempt in &attempts {
        let result = attempt_result(attempt.puzzle_rating, attempt.solved);
        tracker.apply_attempt(attempt.player_id, &result, attempt.timestamp)?;
        bar.inc(1);
    }
    bar.finish();

    report_standings(&tracker);

    Ok(())
}

fn load_attempts(path: &Path) -> Result<Vec<PuzzleAttempt>, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    let attempts: Vec<PuzzleAttempt> = serde_json::from_str(&raw)?;

    Ok(attempts)
}

fn report_standings(tracker: &RatingTracker) {
    for player in tracker.standings() {
        let attempts = player
            .adjustments
            .iter()
            .filter(|a| a.adjustment_type == RatingAdjustmentType::Attempt)
            .count();

        info!(
            "player {:>6}  rating {:>7.1}  deviation {:>6.1}  volatility {:.5}  attempts {}",
            player.player_id, player.rating.rating, player.rating.deviation, player.rating.volatility, attempts
        );
    }
}
