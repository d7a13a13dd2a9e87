use std::{cmp::Ordering, fmt};

use serde::Serialize;

/// Movement of a ranking entry relative to the previous snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "places", rename_all = "camelCase")]
pub enum RankMovement {
    /// Not ranked in this division in the previous snapshot
    New,
    Up(i32),
    Down(i32),
    Unchanged
}

impl RankMovement {
    pub fn between(previous_rank: Option<i32>, current_rank: i32) -> RankMovement {
        match previous_rank {
            None => RankMovement::New,
            Some(previous) => {
                let diff = previous - current_rank;
                match diff.cmp(&0) {
                    Ordering::Greater => RankMovement::Up(diff),
                    Ordering::Less => RankMovement::Down(-diff),
                    Ordering::Equal => RankMovement::Unchanged
                }
            }
        }
    }
}

impl fmt::Display for RankMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankMovement::New => write!(f, "NEW"),
            RankMovement::Up(n) => write!(f, "+{}", n),
            RankMovement::Down(n) => write!(f, "-{}", n),
            RankMovement::Unchanged => write!(f, "=")
        }
    }
}
