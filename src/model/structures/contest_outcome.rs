use serde::{Deserialize, Serialize};

use super::contest_method::ContestMethod;

/// The result of a contest.
///
/// Stored as `winner_id` + `method` columns; this is the single interpretation of
/// those columns used by both the rating replay and competitor records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContestOutcome {
    Decisive { winner: i32 },
    Draw,
    NoContest
}

impl ContestOutcome {
    /// A no-contest method wins over any recorded winner. A missing winner on any
    /// other contest is a draw.
    pub fn from_result(winner_id: Option<i32>, method: Option<ContestMethod>) -> ContestOutcome {
        match (method, winner_id) {
            (Some(ContestMethod::NoContest), _) => ContestOutcome::NoContest,
            (_, Some(winner)) => ContestOutcome::Decisive { winner },
            (_, None) => ContestOutcome::Draw
        }
    }

    pub fn winner(&self) -> Option<i32> {
        match self {
            ContestOutcome::Decisive { winner } => Some(*winner),
            _ => None
        }
    }

    pub fn is_no_contest(&self) -> bool {
        matches!(self, ContestOutcome::NoContest)
    }

    /// Actual score of corner A: 1 if A won, 0 if B won, 0.5 otherwise.
    ///
    /// A decisive result naming neither corner scores as a draw.
    pub fn score_for_corner_a(&self, corner_a_id: i32, corner_b_id: i32) -> f64 {
        match self.winner() {
            Some(w) if w == corner_a_id => 1.0,
            Some(w) if w == corner_b_id => 0.0,
            _ => 0.5
        }
    }
}
