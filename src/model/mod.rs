use chrono::{DateTime, FixedOffset};
use itertools::Itertools;
use tracing::{info, warn};

use crate::database::db_structs::{RankingInput, RankingSnapshot};

pub mod constants;
pub mod decay;
pub mod leaderboard;
pub mod rating_model;
pub mod rating_utils;
pub mod record;
pub mod replay;
pub mod snapshot;
pub mod structures;
pub mod title_custody;

/// # Ranking recomputation
///
/// Rebuilds every rating from scratch and produces the snapshot that replaces
/// the stored ranking table.
///
/// Steps:
/// 1. Replay all rated contests in chronological order.
/// 2. Apply inactivity decay once, relative to `now`.
/// 3. Rank per division, comparing against the previous snapshot for movement.
///
/// The snapshot is dated with the calendar date of `now`.
pub fn recompute(input: &RankingInput, now: DateTime<FixedOffset>) -> RankingSnapshot {
    warn_unrecognized_divisions(input);

    let mut states = replay::replay(&input.competitors, &input.contests, &input.events);
    decay::decay_all(&mut states, now);

    let snapshot = snapshot::build_snapshot(&states, &input.previous_rankings, now.date_naive());
    info!("Recomputation produced {} ranking entries", snapshot.entries.len());

    snapshot
}

fn warn_unrecognized_divisions(input: &RankingInput) {
    let unrecognized = input
        .competitors
        .iter()
        .map(|c| c.division())
        .filter(|d| !d.is_recognized())
        .unique()
        .collect_vec();

    for division in unrecognized {
        warn!("Ranking competitors in unrecognized division '{}'", division);
    }
}
