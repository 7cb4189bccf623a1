use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    constants::{
        BRACKET_MAX_STEPS, DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_RATING, DEFAULT_TAU, GLICKO_SCALE,
        SOLVER_MAX_ITERATIONS
    },
    structures::{game_result::GameResult, rating::Rating}
};

pub mod constants;
pub mod decay;
pub mod rating_tracker;
pub mod rating_utils;
pub mod structures;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RatingError {
    #[error("invalid rating input: {0}")]
    InvalidInput(&'static str),

    #[error("volatility search did not converge within {0} iterations")]
    ConvergenceFailure(u32),

    #[error("expected score saturated, the result carries no rating information")]
    DegenerateOutcome
}

/// System-wide update parameters, fixed for a rating pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemParams {
    /// Constrains how much volatility can change per rating period.
    /// Reasonable values sit in 0.3..=1.2; smaller is more conservative.
    pub tau: f64,
    /// Stopping tolerance of the volatility search
    pub convergence_tolerance: f64
}

impl Default for SystemParams {
    fn default() -> Self {
        SystemParams {
            tau: DEFAULT_TAU,
            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE
        }
    }
}

impl SystemParams {
    pub fn new(tau: f64) -> SystemParams {
        SystemParams {
            tau,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), RatingError> {
        if !self.tau.is_finite() || self.tau <= 0.0 {
            return Err(RatingError::InvalidInput("tau must be finite and positive"));
        }
        if !self.convergence_tolerance.is_finite() || self.convergence_tolerance <= 0.0 {
            return Err(RatingError::InvalidInput(
                "convergence tolerance must be finite and positive"
            ));
        }

        Ok(())
    }
}

/// Rates one Glicko-2 rating period for `subject`.
///
/// `results` holds every rated game of the period; for the puzzle trainer
/// each attempt is its own period, so the slice is a singleton. Variance
/// and the improvement estimate accumulate across the slice, then the
/// volatility, deviation and rating updates are applied once.
///
/// Returns a fresh state; `subject` is never mutated, and any error leaves
/// the caller's state untouched.
pub fn rate(subject: &Rating, results: &[GameResult], params: &SystemParams) -> Result<Rating, RatingError> {
    subject.validate()?;
    params.validate()?;
    if results.is_empty() {
        return Err(RatingError::InvalidInput(
            "a rating period must contain at least one result"
        ));
    }
    for result in results {
        result.opponent.validate()?;
    }

    let mu = to_internal_rating(subject.rating);
    let phi = subject.deviation / GLICKO_SCALE;

    let mut variance_inv = 0.0;
    let mut improvement_sum = 0.0;
    for result in results {
        let mu_j = to_internal_rating(result.opponent.rating);
        let phi_j = result.opponent.deviation / GLICKO_SCALE;

        let g = opponent_discount(phi_j);
        let e = expected_score(mu, mu_j, g);
        // Saturated expectations carry no information and would divide by zero
        if e * (1.0 - e) == 0.0 {
            return Err(RatingError::DegenerateOutcome);
        }

        variance_inv += g * g * e * (1.0 - e);
        improvement_sum += g * (result.score.value() - e);
    }

    // Estimated variance of the period outcome, and the rating improvement
    // suggested by the scores alone. Large rating gaps make `v` very large
    // but finite; that is tolerated, not clamped.
    let v = 1.0 / variance_inv;
    let delta = v * improvement_sum;

    let sigma = solve_volatility(phi, v, delta, subject.volatility, params)?;

    let phi_star = (phi * phi + sigma * sigma).sqrt();
    let phi_new = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / v).sqrt();
    let mu_new = mu + phi_new * phi_new * improvement_sum;

    Ok(Rating {
        rating: from_internal_rating(mu_new),
        deviation: phi_new * GLICKO_SCALE,
        volatility: sigma
    })
}

/// Applies one idle rating period: deviation grows quadratically with
/// volatility, rating and volatility stay put. Models the loss of
/// confidence in an estimate nobody has tested lately.
pub fn decay_deviation(subject: &Rating) -> Result<Rating, RatingError> {
    subject.validate()?;

    let phi = subject.deviation / GLICKO_SCALE;
    let phi_star = (phi * phi + subject.volatility * subject.volatility).sqrt();

    Ok(Rating {
        rating: subject.rating,
        deviation: phi_star * GLICKO_SCALE,
        volatility: subject.volatility
    })
}

/// Finds the new volatility by root-finding `f` on the log-variance scale
/// with the Illinois variant of regula falsi.
///
/// `f` balances how well a candidate volatility explains the observed
/// surprise `delta` against how far it drifts from the prior value, with
/// tau as the brake. Bracket per the reference procedure: the upper end is
/// `ln(delta^2 - phi^2 - v)` when the surprise dominates, otherwise a
/// downward step search from `a` in tau-sized steps. Both the step search
/// and the main iteration are capped.
fn solve_volatility(phi: f64, v: f64, delta: f64, volatility: f64, params: &SystemParams) -> Result<f64, RatingError> {
    let a = (volatility * volatility).ln();
    let tau = params.tau;
    let delta_sq = delta * delta;
    let phi_sq = phi * phi;

    let f = |x: f64| {
        let e_x = x.exp();
        e_x * (delta_sq - phi_sq - v - e_x) / (2.0 * (phi_sq + v + e_x).powi(2)) - (x - a) / (tau * tau)
    };

    let mut lhs = a;
    let mut rhs = if delta_sq > phi_sq + v {
        (delta_sq - phi_sq - v).ln()
    } else {
        let mut candidate = a - tau;
        let mut steps = 0;
        while f(candidate) < 0.0 {
            steps += 1;
            if steps > BRACKET_MAX_STEPS {
                return Err(RatingError::ConvergenceFailure(BRACKET_MAX_STEPS));
            }
            candidate -= tau;
        }
        candidate
    };

    let mut f_lhs = f(lhs);
    let mut f_rhs = f(rhs);
    let mut iterations = 0;

    while (rhs - lhs).abs() > params.convergence_tolerance {
        iterations += 1;
        if iterations > SOLVER_MAX_ITERATIONS {
            return Err(RatingError::ConvergenceFailure(SOLVER_MAX_ITERATIONS));
        }

        let probe = lhs + (lhs - rhs) * f_lhs / (f_rhs - f_lhs);
        let f_probe = f(probe);

        if f_probe * f_rhs < 0.0 {
            lhs = rhs;
            f_lhs = f_rhs;
        } else {
            // Illinois step: halve the retained endpoint on a stall so the
            // secant cannot pin itself to one side
            f_lhs /= 2.0;
        }

        rhs = probe;
        f_rhs = f_probe;
    }

    Ok((lhs / 2.0).exp())
}

fn to_internal_rating(rating: f64) -> f64 {
    (rating - DEFAULT_RATING) / GLICKO_SCALE
}

fn from_internal_rating(mu: f64) -> f64 {
    DEFAULT_RATING + GLICKO_SCALE * mu
}

/// Discounts a result by the opponent's own uncertainty: the fuzzier the
/// opponent's rating, the less their result says about the subject.
fn opponent_discount(phi_j: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi_j * phi_j / (PI * PI)).sqrt()
}

/// Modeled win probability of the subject against one opponent.
fn expected_score(mu: f64, mu_j: f64, g: f64) -> f64 {
    1.0 / (1.0 + (-g * (mu - mu_j)).exp())
}
