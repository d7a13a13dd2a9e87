use serde::Serialize;

use crate::{database::db_structs::Contest, model::structures::contest_outcome::ContestOutcome};

/// Win / loss / draw / no-contest tally over published contests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub no_contests: u32
}

impl CompetitorRecord {
    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws + self.no_contests
    }
}

impl std::fmt::Display for CompetitorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.draws)?;
        if self.no_contests > 0 {
            write!(f, " ({} NC)", self.no_contests)?;
        }

        Ok(())
    }
}

pub fn competitor_record(competitor_id: i32, contests: &[Contest]) -> CompetitorRecord {
    contests
        .iter()
        .filter(|c| c.is_published && c.involves(competitor_id))
        .fold(CompetitorRecord::default(), |mut record, contest| {
            match contest.outcome {
                ContestOutcome::NoContest => record.no_contests += 1,
                ContestOutcome::Draw => record.draws += 1,
                ContestOutcome::Decisive { winner } if winner == competitor_id => record.wins += 1,
                ContestOutcome::Decisive { .. } => record.losses += 1
            }
            record
        })
}
