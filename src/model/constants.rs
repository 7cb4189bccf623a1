// Model constants
pub const DEFAULT_RATING: f64 = 1500.0;
pub const DEFAULT_DEVIATION: f64 = 200.0;
pub const DEFAULT_VOLATILITY: f64 = 0.06;
// Conversion factor between the display scale and the internal mu/phi scale
pub const GLICKO_SCALE: f64 = 173.7178;
pub const DEFAULT_TAU: f64 = 0.5;
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 1e-6;
// Puzzles play as fixed-uncertainty opponents
pub const PUZZLE_DEVIATION: f64 = 200.0;
// Iteration caps for the volatility search; exceeding either is an error,
// never an unbounded loop
pub const BRACKET_MAX_STEPS: u32 = 100;
pub const SOLVER_MAX_ITERATIONS: u32 = 1000;
// Inactivity decay: deviation starts growing after DECAY_DAYS without an
// attempt, one tick per DECAY_INTERVAL_DAYS thereafter
pub const DECAY_DAYS: u64 = 30;
pub const DECAY_INTERVAL_DAYS: u64 = 7;
