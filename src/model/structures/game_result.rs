use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::model::{constants::PUZZLE_DEVIATION, RatingError};

/// An opponent as the rating update sees it. Glicko-2 never reads the
/// opponent's volatility, so none is carried.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub rating: f64,
    pub deviation: f64
}

impl Opponent {
    pub fn new(rating: f64, deviation: f64) -> Opponent {
        Opponent {
            rating,
            deviation
        }
    }

    /// A puzzle plays as a fixed-uncertainty opponent at its difficulty rating.
    pub fn puzzle(difficulty: f64) -> Opponent {
        Opponent {
            rating: difficulty,
            deviation: PUZZLE_DEVIATION
        }
    }

    pub(crate) fn validate(&self) -> Result<(), RatingError> {
        if !self.rating.is_finite() {
            return Err(RatingError::InvalidInput("opponent rating must be finite"));
        }
        if !self.deviation.is_finite() || self.deviation <= 0.0 {
            return Err(RatingError::InvalidInput(
                "opponent rating deviation must be finite and positive"
            ));
        }

        Ok(())
    }
}

/// Outcome of a game from the subject player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Score {
    Loss,
    Draw,
    Win
}

impl Score {
    pub fn value(&self) -> f64 {
        match self {
            Score::Loss => 0.0,
            Score::Draw => 0.5,
            Score::Win => 1.0
        }
    }
}

/// One rated game: an opponent snapshot paired with the score against them.
/// A score cannot exist without an opponent; the no-game case is the
/// deviation decay tick, which is a separate operation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub opponent: Opponent,
    pub score: Score
}

impl GameResult {
    pub fn new(opponent: Opponent, score: Score) -> GameResult {
        GameResult {
            opponent,
            score
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use crate::model::structures::game_result::{Opponent, Score};

    #[test]
    fn test_score_values() {
        let values = Score::iter().map(|s| s.value()).collect::<Vec<_>>();

        assert_eq!(values, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_puzzle_opponent_deviation() {
        let opponent = Opponent::puzzle(1450.0);

        assert_eq!(opponent.rating, 1450.0);
        assert_eq!(opponent.deviation, 200.0);
    }

    #[test]
    fn test_opponent_validation() {
        assert!(Opponent::new(1400.0, 30.0).validate().is_ok());
        assert!(Opponent::new(1400.0, 0.0).validate().is_err());
        assert!(Opponent::new(f64::INFINITY, 30.0).validate().is_err());
    }
}
