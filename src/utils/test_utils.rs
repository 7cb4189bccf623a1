use chrono::{DateTime, Duration, FixedOffset};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::structures::{
    player_rating::{PlayerRating, PuzzleAttempt, RatingAdjustment},
    rating::Rating,
    rating_adjustment_type::RatingAdjustmentType
};

fn base_time() -> DateTime<FixedOffset> {
    "2024-01-01T00:00:00+00:00".parse().unwrap()
}

/// Generates a player with a plausible adjustment trail ending at `rating`.
/// The RNG is seeded so generated fixtures are reproducible.
pub fn generate_player_rating(player_id: i32, rating: f64, deviation: f64, n_adjustments: i32) -> PlayerRating {
    if n_adjustments < 1 {
        panic!("Number of adjustments must be at least 1");
    }

    let mut rng = ChaCha8Rng::seed_from_u64(42);

    // The trail starts within ±300 of the target and walks toward it
    let initial_rating = rating + rng.random_range(-300.0..=300.0);
    let mut adjustments = Vec::with_capacity(n_adjustments as usize);

    for i in 0..n_adjustments {
        let adjustment_type = if i == 0 {
            RatingAdjustmentType::Initial
        } else {
            RatingAdjustmentType::Attempt
        };

        let (current, next) = if n_adjustments == 1 {
            (rating, rating)
        } else {
            let step = (rating - initial_rating) / (n_adjustments - 1) as f64;
            (
                initial_rating + step * i as f64,
                initial_rating + step * (i + 1).min(n_adjustments - 1) as f64
            )
        };

        adjustments.push(RatingAdjustment {
            player_id,
            rating_before: current,
            rating_after: next,
            deviation_before: deviation,
            deviation_after: deviation,
            volatility_before: 0.06,
            volatility_after: 0.06,
            timestamp: base_time() + Duration::days(i as i64),
            adjustment_type
        });
    }

    PlayerRating {
        player_id,
        rating: Rating::new(rating, deviation, 0.06),
        adjustments
    }
}

/// Generates a chronological attempt log for `n_players` players, each with
/// `n_attempts` puzzle attempts near their own strength. Deterministic for
/// a fixed seed.
pub fn generate_attempt_log(n_players: i32, n_attempts: i32) -> Vec<PuzzleAttempt> {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut attempts = Vec::with_capacity((n_players * n_attempts) as usize);

    for round in 0..n_attempts {
        for player_id in 1..=n_players {
            let puzzle_rating = 1500.0 + rng.random_range(-250.0..=250.0);
            let solved = rng.random_bool(0.5);

            attempts.push(PuzzleAttempt {
                player_id,
                puzzle_rating,
                solved,
                timestamp: base_time() + Duration::hours((round * n_players + player_id) as i64)
            });
        }
    }

    attempts
}
