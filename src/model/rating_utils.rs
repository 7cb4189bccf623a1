use chrono::{DateTime, FixedOffset};

use crate::model::structures::{
    game_result::{GameResult, Opponent, Score},
    player_rating::{PlayerRating, RatingAdjustment},
    rating::Rating,
    rating_adjustment_type::RatingAdjustmentType
};

/// The state a player starts from when no prior rating exists.
pub fn initial_rating() -> Rating {
    Rating::default()
}

/// Creates a fresh player with the default state and an `Initial`
/// adjustment marking when tracking began.
pub fn create_player_rating(player_id: i32, timestamp: DateTime<FixedOffset>) -> PlayerRating {
    let rating = initial_rating();

    PlayerRating {
        player_id,
        rating,
        adjustments: vec![RatingAdjustment::from_transition(
            player_id,
            &rating,
            &rating,
            timestamp,
            RatingAdjustmentType::Initial
        )]
    }
}

/// Maps a resolved puzzle attempt to the game result the updater consumes:
/// the puzzle is the opponent, surviving its defense is a win, failing is
/// a loss.
pub fn attempt_result(puzzle_rating: f64, solved: bool) -> GameResult {
    let score = if solved { Score::Win } else { Score::Loss };

    GameResult::new(Opponent::puzzle(puzzle_rating), score)
}
