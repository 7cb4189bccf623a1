use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::debug;

use crate::model::{
    decay, rate,
    rating_utils::create_player_rating,
    structures::{
        game_result::GameResult,
        player_rating::{PlayerRating, RatingAdjustment},
        rating_adjustment_type::RatingAdjustmentType
    },
    RatingError, SystemParams
};

/// Keyed store of every tracked player's rating state and history.
///
/// All mutation goes through `apply_attempt` and `apply_decay`, which
/// commit only after the underlying update has succeeded; a failed update
/// leaves the stored state exactly as it was. The tracker owns nothing
/// shared and expects its caller to serialize access by ownership.
pub struct RatingTracker {
    ratings: IndexMap<i32, PlayerRating>,
    params: SystemParams
}

impl Default for RatingTracker {
    fn default() -> Self {
        Self::new(SystemParams::default())
    }
}

impl RatingTracker {
    pub fn new(params: SystemParams) -> RatingTracker {
        RatingTracker {
            ratings: IndexMap::new(),
            params
        }
    }

    pub fn params(&self) -> &SystemParams {
        &self.params
    }

    pub fn insert_or_update(&mut self, rating: PlayerRating) {
        self.ratings.insert(rating.player_id, rating);
    }

    pub fn get_rating(&self, player_id: i32) -> Option<&PlayerRating> {
        self.ratings.get(&player_id)
    }

    pub fn get_rating_adjustments(&self, player_id: i32) -> Option<&[RatingAdjustment]> {
        self.ratings.get(&player_id).map(|p| p.adjustments.as_slice())
    }

    /// Registers a player with the default state, if not yet tracked.
    pub fn create_player(&mut self, player_id: i32, timestamp: DateTime<FixedOffset>) -> &PlayerRating {
        self.ratings
            .entry(player_id)
            .or_insert_with(|| create_player_rating(player_id, timestamp))
    }

    /// Rates one completed attempt for `player_id`.
    ///
    /// Unknown players enter with the default state first, matching the
    /// trainer's behavior when no stored rating exists. The rating runs
    /// against the current state; only on success is the new state
    /// committed and an `Attempt` adjustment appended.
    pub fn apply_attempt(
        &mut self,
        player_id: i32,
        result: &GameResult,
        timestamp: DateTime<FixedOffset>
    ) -> Result<&PlayerRating, RatingError> {
        let before = self
            .ratings
            .get(&player_id)
            .map(|p| p.rating)
            .unwrap_or_default();

        let after = rate(&before, std::slice::from_ref(result), &self.params)?;

        let player = self
            .ratings
            .entry(player_id)
            .or_insert_with(|| create_player_rating(player_id, timestamp));

        player.adjustments.push(RatingAdjustment::from_transition(
            player_id,
            &before,
            &after,
            timestamp,
            RatingAdjustmentType::Attempt
        ));
        player.rating = after;

        debug!(
            player_id,
            rating = after.rating,
            deviation = after.deviation,
            "applied attempt"
        );

        Ok(player)
    }

    /// Applies any due inactivity decay for `player_id`. Returns whether a
    /// decay was actually applied.
    pub fn apply_decay(
        &mut self,
        player_id: i32,
        current_time: DateTime<FixedOffset>
    ) -> Result<bool, RatingError> {
        let player = self
            .ratings
            .get_mut(&player_id)
            .ok_or(RatingError::InvalidInput("unknown player id"))?;

        Ok(decay::decay(player, current_time)?.is_some())
    }

    /// Every tracked player, ordered best-first.
    pub fn standings(&self) -> Vec<&PlayerRating> {
        self.ratings
            .values()
            .sorted_by(|a, b| b.rating.rating.partial_cmp(&a.rating.rating).unwrap())
            .collect()
    }
}
