use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;
use strum_macros::{Display, EnumIter};

use crate::model::constants::{
    DOMINANT_FINISH_MULTIPLIER, MAJORITY_DECISION_MULTIPLIER, NEUTRAL_MULTIPLIER, UNANIMOUS_DECISION_MULTIPLIER
};

/// How a contest was resolved, as recorded on the card
#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[repr(u8)]
pub enum ContestMethod {
    #[strum(to_string = "KO/TKO")]
    KoTko = 0,
    Submission = 1,
    #[strum(to_string = "UD")]
    UnanimousDecision = 2,
    #[strum(to_string = "MD/TD")]
    MajorityOrTechnicalDecision = 3,
    #[strum(to_string = "SD")]
    SplitDecision = 4,
    #[strum(to_string = "DQ/Doctor")]
    DisqualificationOrDoctor = 5,
    Draw = 6,
    #[strum(to_string = "NC")]
    NoContest = 7
}

impl ContestMethod {
    /// Scales the base rating change of a rated contest.
    ///
    /// No-contests never reach the rating model, their multiplier is zero.
    pub fn multiplier(&self) -> f64 {
        match self {
            ContestMethod::KoTko | ContestMethod::Submission => DOMINANT_FINISH_MULTIPLIER,
            ContestMethod::UnanimousDecision => UNANIMOUS_DECISION_MULTIPLIER,
            ContestMethod::MajorityOrTechnicalDecision => MAJORITY_DECISION_MULTIPLIER,
            ContestMethod::SplitDecision | ContestMethod::DisqualificationOrDoctor | ContestMethod::Draw => {
                NEUTRAL_MULTIPLIER
            }
            ContestMethod::NoContest => 0.0
        }
    }
}

/// Multiplier for an optional method. Contests without a declared method count as neutral.
pub fn method_multiplier(method: Option<ContestMethod>) -> f64 {
    method.map_or(NEUTRAL_MULTIPLIER, |m| m.multiplier())
}

impl TryFrom<i32> for ContestMethod {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(ContestMethod::KoTko),
            1 => Ok(ContestMethod::Submission),
            2 => Ok(ContestMethod::UnanimousDecision),
            3 => Ok(ContestMethod::MajorityOrTechnicalDecision),
            4 => Ok(ContestMethod::SplitDecision),
            5 => Ok(ContestMethod::DisqualificationOrDoctor),
            6 => Ok(ContestMethod::Draw),
            7 => Ok(ContestMethod::NoContest),
            _ => Err(())
        }
    }
}
