use chrono::{DateTime, Duration, FixedOffset};

use crate::model::{
    constants::{DECAY_DAYS, DECAY_INTERVAL_DAYS},
    decay_deviation,
    structures::{
        player_rating::{PlayerRating, RatingAdjustment},
        rating_adjustment_type::RatingAdjustmentType::{Decay, Initial}
    },
    RatingError
};

/// Applies inactivity decay to a player, if any is due.
///
/// # Rules
/// - A player must be inactive for at least `DECAY_DAYS` before decay
///   begins, then receives one tick per `DECAY_INTERVAL_DAYS`.
/// - Each tick inflates deviation via the idle-period update; rating and
///   volatility are untouched, so the estimate itself survives a long
///   absence, only the confidence in it erodes.
/// - A player whose latest adjustment is `Initial` never decays: the
///   default state already carries maximum uncertainty.
///
/// Returns `Ok(None)` when no decay was applicable, otherwise the player
/// with the new state and one `Decay` adjustment per tick appended.
pub fn decay(
    player_rating: &mut PlayerRating,
    current_time: DateTime<FixedOffset>
) -> Result<Option<&PlayerRating>, RatingError> {
    if decay_impossible(player_rating, current_time) {
        return Ok(None);
    }

    let timestamps = decay_timestamps(last_play_time(player_rating), current_time);
    let mut decay_adjustments = Vec::with_capacity(timestamps.len());

    let mut rating = player_rating.rating;
    for timestamp in timestamps {
        let decayed = decay_deviation(&rating)?;

        decay_adjustments.push(RatingAdjustment::from_transition(
            player_rating.player_id,
            &rating,
            &decayed,
            timestamp,
            Decay
        ));

        rating = decayed;
    }

    player_rating.adjustments.extend(decay_adjustments);
    player_rating.rating = rating;

    Ok(Some(player_rating))
}

/// One timestamp per due tick, starting `DECAY_DAYS` after the last
/// activity and repeating every `DECAY_INTERVAL_DAYS` up to `current_time`.
fn decay_timestamps(
    last_play_time: DateTime<FixedOffset>,
    current_time: DateTime<FixedOffset>
) -> Vec<DateTime<FixedOffset>> {
    let decay_start = last_play_time + Duration::days(DECAY_DAYS as i64);
    let ticks = (current_time - decay_start).num_days() / DECAY_INTERVAL_DAYS as i64 + 1;

    (0..ticks)
        .map(|i| decay_start + Duration::days(i * DECAY_INTERVAL_DAYS as i64))
        .collect()
}

fn last_play_time(player_rating: &PlayerRating) -> DateTime<FixedOffset> {
    player_rating.adjustments.last().unwrap().timestamp
}

/// Returns true if the player has been active in the last `DECAY_DAYS` days.
fn is_active(player_rating: &PlayerRating, current_time: DateTime<FixedOffset>) -> bool {
    let delta = current_time - last_play_time(player_rating);

    delta < Duration::days(DECAY_DAYS as i64)
}

fn previous_adjustment_is_initial(player_rating: &PlayerRating) -> bool {
    player_rating.adjustments.last().unwrap().adjustment_type == Initial
}

fn decay_impossible(player_rating: &PlayerRating, current_time: DateTime<FixedOffset>) -> bool {
    player_rating.adjustments.is_empty()
        || is_active(player_rating, current_time)
        || previous_adjustment_is_initial(player_rating)
}
