// Starting ratings
pub const START_RATING_PROFESSIONAL: f64 = 1500.0;
pub const START_RATING_AMATEUR: f64 = 1450.0;

// Logistic scale of the expected score
pub const ELO_SCALE: f64 = 400.0;

// Experience tiers: (minimum rated contests, K-factor), highest first
pub const K_FACTOR_TIERS: [(u32, f64); 4] = [(10, 14.0), (5, 18.0), (2, 28.0), (0, 38.0)];

// Method multipliers
pub const DOMINANT_FINISH_MULTIPLIER: f64 = 1.18;
pub const UNANIMOUS_DECISION_MULTIPLIER: f64 = 1.08;
pub const MAJORITY_DECISION_MULTIPLIER: f64 = 1.03;
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

// Bonuses added to a winner's change
pub const TITLE_BOUT_BONUS: f64 = 5.0;
pub const OPPONENT_QUALITY_BONUSES: [(f64, f64); 3] = [(1700.0, 8.0), (1650.0, 6.0), (1600.0, 3.0)];

// Inactivity penalties: (days inactive strictly greater than, penalty), highest first
pub const DECAY_PENALTIES: [(i64, f64); 3] = [(365, 20.0), (270, 10.0), (180, 5.0)];

// Ranking
pub const MIN_RATED_CONTESTS: u32 = 2;
pub const MAX_RANKED_PER_DIVISION: i32 = 50;
