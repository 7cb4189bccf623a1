use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::model::structures::{rating::Rating, rating_adjustment_type::RatingAdjustmentType};

/// A tracked player: current state plus the full history of how it got there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRating {
    pub player_id: i32,
    pub rating: Rating,
    /// The adjustments that led to this rating object
    pub adjustments: Vec<RatingAdjustment>
}

impl PlayerRating {
    /// Timestamp of the most recent adjustment, used as the player's
    /// last-activity probe by decay scheduling.
    pub fn last_activity(&self) -> Option<DateTime<FixedOffset>> {
        self.adjustments.last().map(|a| a.timestamp)
    }
}

/// One recorded change of a player's stored state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingAdjustment {
    pub player_id: i32,
    pub rating_before: f64,
    pub rating_after: f64,
    pub deviation_before: f64,
    pub deviation_after: f64,
    pub volatility_before: f64,
    pub volatility_after: f64,
    pub timestamp: DateTime<FixedOffset>,
    pub adjustment_type: RatingAdjustmentType
}

impl RatingAdjustment {
    /// Bridges a transition between two rating states into a ledger row.
    pub fn from_transition(
        player_id: i32,
        before: &Rating,
        after: &Rating,
        timestamp: DateTime<FixedOffset>,
        adjustment_type: RatingAdjustmentType
    ) -> RatingAdjustment {
        RatingAdjustment {
            player_id,
            rating_before: before.rating,
            rating_after: after.rating,
            deviation_before: before.deviation,
            deviation_after: after.deviation,
            volatility_before: before.volatility,
            volatility_after: after.volatility,
            timestamp,
            adjustment_type
        }
    }
}

/// One row of the trainer's attempt log: a player met a puzzle and either
/// survived the defense or failed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleAttempt {
    pub player_id: i32,
    pub puzzle_rating: f64,
    pub solved: bool,
    pub timestamp: DateTime<FixedOffset>
}

#[cfg(test)]
mod tests {
    use crate::model::structures::{
        player_rating::{PlayerRating, RatingAdjustment},
        rating::Rating,
        rating_adjustment_type::RatingAdjustmentType
    };

    #[test]
    fn test_last_activity_empty() {
        let player = PlayerRating {
            player_id: 1,
            rating: Rating::default(),
            adjustments: vec![]
        };

        assert_eq!(player.last_activity(), None);
    }

    #[test]
    fn test_from_transition_records_both_sides() {
        let before = Rating::default();
        let after = Rating::new(1563.0, 175.0, 0.06);
        let timestamp = "2024-03-01T12:00:00+00:00".parse().unwrap();

        let adjustment = RatingAdjustment::from_transition(
            7,
            &before,
            &after,
            timestamp,
            RatingAdjustmentType::Attempt
        );

        assert_eq!(adjustment.player_id, 7);
        assert_eq!(adjustment.rating_before, 1500.0);
        assert_eq!(adjustment.rating_after, 1563.0);
        assert_eq!(adjustment.deviation_before, 200.0);
        assert_eq!(adjustment.deviation_after, 175.0);
        assert_eq!(adjustment.adjustment_type, RatingAdjustmentType::Attempt);
    }
}
