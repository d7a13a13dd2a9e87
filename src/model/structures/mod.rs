pub mod competitor_state;
pub mod competitor_tier;
pub mod contest_method;
pub mod contest_outcome;
pub mod division;
pub mod gender;
pub mod rank_movement;
pub mod sport;
