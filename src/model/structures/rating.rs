use serde::{Deserialize, Serialize};

use crate::model::{
    constants::{DEFAULT_DEVIATION, DEFAULT_RATING, DEFAULT_VOLATILITY},
    RatingError
};

/// A player's Glicko-2 state on the display scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Skill estimate on the conventional 1500-centered scale
    pub rating: f64,
    /// Rating deviation: uncertainty of the estimate, same units as `rating`
    pub deviation: f64,
    /// Expected fluctuation of the underlying skill over time
    pub volatility: f64
}

impl Default for Rating {
    fn default() -> Self {
        Rating {
            rating: DEFAULT_RATING,
            deviation: DEFAULT_DEVIATION,
            volatility: DEFAULT_VOLATILITY
        }
    }
}

impl Rating {
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Rating {
        Rating {
            rating,
            deviation,
            volatility
        }
    }

    /// Checks the state invariant: every field finite, deviation and
    /// volatility strictly positive.
    pub fn validate(&self) -> Result<(), RatingError> {
        if !self.rating.is_finite() {
            return Err(RatingError::InvalidInput("rating must be finite"));
        }
        if !self.deviation.is_finite() || self.deviation <= 0.0 {
            return Err(RatingError::InvalidInput("rating deviation must be finite and positive"));
        }
        if !self.volatility.is_finite() || self.volatility <= 0.0 {
            return Err(RatingError::InvalidInput("volatility must be finite and positive"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{structures::rating::Rating, RatingError};

    #[test]
    fn test_default_state() {
        let rating = Rating::default();

        assert_eq!(rating.rating, 1500.0);
        assert_eq!(rating.deviation, 200.0);
        assert_eq!(rating.volatility, 0.06);
        assert!(rating.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_deviation() {
        let rating = Rating::new(1500.0, 0.0, 0.06);

        assert!(matches!(rating.validate(), Err(RatingError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_negative_volatility() {
        let rating = Rating::new(1500.0, 200.0, -0.06);

        assert!(matches!(rating.validate(), Err(RatingError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_non_finite_rating() {
        let rating = Rating::new(f64::NAN, 200.0, 0.06);

        assert!(matches!(rating.validate(), Err(RatingError::InvalidInput(_))));
    }
}
