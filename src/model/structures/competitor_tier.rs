use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;

use crate::model::constants::{START_RATING_AMATEUR, START_RATING_PROFESSIONAL};

#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CompetitorTier {
    #[default]
    Professional = 0,
    Amateur = 1
}

impl CompetitorTier {
    /// The rating every competitor of this tier enters a recomputation pass with
    pub fn starting_rating(&self) -> f64 {
        match self {
            CompetitorTier::Professional => START_RATING_PROFESSIONAL,
            CompetitorTier::Amateur => START_RATING_AMATEUR
        }
    }
}

impl TryFrom<i32> for CompetitorTier {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(CompetitorTier::Professional),
            1 => Ok(CompetitorTier::Amateur),
            _ => Err(())
        }
    }
}
