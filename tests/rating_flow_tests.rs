use approx::assert_abs_diff_eq;
use chrono::{DateTime, Duration, FixedOffset};

use tactics_rating::{
    model::{
        constants::{DECAY_DAYS, DECAY_INTERVAL_DAYS},
        rating_tracker::RatingTracker,
        rating_utils::attempt_result,
        structures::{
            game_result::{GameResult, Opponent, Score},
            rating_adjustment_type::RatingAdjustmentType
        },
        SystemParams
    },
    utils::test_utils::generate_attempt_log
};

fn start_time() -> DateTime<FixedOffset> {
    "2024-01-01T00:00:00+00:00".parse().unwrap()
}

/// Replays a generated attempt log end to end and checks the store's
/// bookkeeping stays coherent throughout.
#[test]
fn test_replay_generated_attempt_log() {
    let attempts = generate_attempt_log(5, 20);
    let mut tracker = RatingTracker::new(SystemParams::new(0.5));

    for attempt in &attempts {
        let result = attempt_result(attempt.puzzle_rating, attempt.solved);
        tracker
            .apply_attempt(attempt.player_id, &result, attempt.timestamp)
            .expect("generated attempts always rate cleanly");
    }

    let standings = tracker.standings();
    assert_eq!(standings.len(), 5);

    // Best-first ordering
    assert!(standings
        .windows(2)
        .all(|w| w[0].rating.rating >= w[1].rating.rating));

    for player in standings {
        // Initial plus one adjustment per attempt
        assert_eq!(player.adjustments.len(), 21);
        assert_eq!(player.adjustments[0].adjustment_type, RatingAdjustmentType::Initial);

        // The chain of transitions is gapless and lands on the current state
        assert!(player
            .adjustments
            .windows(2)
            .all(|w| w[0].rating_after == w[1].rating_before));
        assert_eq!(player.adjustments.last().unwrap().rating_after, player.rating.rating);

        // Invariants hold at every step
        assert!(player.rating.deviation > 0.0);
        assert!(player.rating.volatility > 0.0);
        assert!(player.rating.rating.is_finite());
    }
}

/// Twenty attempts against similarly-rated puzzles should tighten the
/// deviation well below the default.
#[test]
fn test_deviation_tightens_with_play() {
    let mut tracker = RatingTracker::default();
    let mut timestamp = start_time();

    for i in 0..20 {
        let result = attempt_result(1500.0 + (i % 5) as f64 * 20.0, i % 2 == 0);
        tracker.apply_attempt(1, &result, timestamp).unwrap();
        timestamp += Duration::hours(1);
    }

    let player = tracker.get_rating(1).unwrap();
    assert!(player.rating.deviation < 100.0);
    // Alternating wins and losses near 1500 keep the estimate close to home
    assert_abs_diff_eq!(player.rating.rating, 1500.0, epsilon = 120.0);
}

/// A long absence inflates deviation through scheduled decay ticks, and a
/// second decay pass right after is a no-op.
#[test]
fn test_inactivity_decay_flow() {
    let mut tracker = RatingTracker::default();
    tracker
        .apply_attempt(1, &attempt_result(1500.0, true), start_time())
        .unwrap();

    let before = tracker.get_rating(1).unwrap().rating;
    let comeback = start_time() + Duration::days(DECAY_DAYS as i64 + 2 * DECAY_INTERVAL_DAYS as i64);

    assert!(tracker.apply_decay(1, comeback).unwrap());

    let after = tracker.get_rating(1).unwrap();
    assert!(after.rating.deviation > before.deviation);
    assert_eq!(after.rating.rating, before.rating);
    assert_eq!(after.rating.volatility, before.volatility);

    let decays = after
        .adjustments
        .iter()
        .filter(|a| a.adjustment_type == RatingAdjustmentType::Decay)
        .count();
    assert_eq!(decays, 3);

    // Everything due has been applied already
    assert!(!tracker.apply_decay(1, comeback).unwrap());
}

/// A player who has never attempted anything keeps the default state and
/// does not decay, no matter how long they stay away.
#[test]
fn test_fresh_player_survives_decay_pass() {
    let mut tracker = RatingTracker::default();

    let fresh = tracker.create_player(1, start_time());
    assert_eq!(fresh.rating.rating, 1500.0);
    assert_eq!(fresh.rating.deviation, 200.0);

    let much_later = start_time() + Duration::days(365);
    assert!(!tracker.apply_decay(1, much_later).unwrap());

    // Decaying an untracked player id is an error
    assert!(tracker.apply_decay(2, much_later).is_err());

    // An attempt then an immediate decay pass changes nothing either
    tracker
        .apply_attempt(1, &attempt_result(1500.0, true), much_later)
        .unwrap();
    assert!(!tracker.apply_decay(1, much_later).unwrap());
}

/// Errors surface without corrupting any stored state, per the
/// commit-on-success contract.
#[test]
fn test_error_paths_do_not_corrupt_store() {
    let mut tracker = RatingTracker::new(SystemParams::new(0.5));
    tracker
        .apply_attempt(1, &attempt_result(1480.0, true), start_time())
        .unwrap();

    let snapshot = tracker.get_rating(1).unwrap().clone();

    // Invalid opponent deviation
    let invalid = GameResult::new(Opponent::new(1480.0, 0.0), Score::Win);
    assert!(tracker.apply_attempt(1, &invalid, start_time()).is_err());

    // Saturated expectation
    let degenerate = GameResult::new(Opponent::new(-50000.0, 10.0), Score::Win);
    assert!(tracker.apply_attempt(1, &degenerate, start_time()).is_err());

    let current = tracker.get_rating(1).unwrap();
    assert_eq!(current.rating, snapshot.rating);
    assert_eq!(current.adjustments.len(), snapshot.adjustments.len());
}
