use std::collections::HashMap;

use chrono::NaiveDate;
use itertools::Itertools;
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use tracing::info;

use crate::{
    database::db_structs::{RankingEntry, RankingSnapshot},
    model::{
        constants::{MAX_RANKED_PER_DIVISION, MIN_RATED_CONTESTS},
        structures::{competitor_state::CompetitorState, division::Division}
    }
};

/// Rank of each (competitor, division) pair in the previous snapshot
pub fn previous_ranks(previous: &[RankingEntry]) -> HashMap<(i32, Division), i32> {
    previous
        .iter()
        .map(|e| ((e.competitor_id, e.division.clone()), e.rank))
        .collect()
}

/// # Snapshot building
///
/// 1. Competitors with fewer than [`MIN_RATED_CONTESTS`] rated contests are dropped.
/// 2. The rest are sorted by rating, highest first. Equal ratings are ordered by
///     competitor id so the ranking is deterministic.
/// 3. Walking that order, each competitor takes the next rank of its own
///     division. Ranks past [`MAX_RANKED_PER_DIVISION`] are not emitted.
/// 4. Each entry carries its rank from the previous snapshot for the same
///     division, if it had one.
///
/// The result replaces the previous snapshot wholesale.
pub fn build_snapshot(
    states: &HashMap<i32, CompetitorState>,
    previous: &[RankingEntry],
    as_of: NaiveDate
) -> RankingSnapshot {
    let previous = previous_ranks(previous);
    let mut rank_counters: HashMap<&Division, i32> = HashMap::new();
    let mut entries = Vec::new();

    let ranked = states
        .values()
        .filter(|s| s.rated_contests >= MIN_RATED_CONTESTS)
        .sorted_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| a.competitor_id.cmp(&b.competitor_id))
        });

    for state in ranked {
        let counter = rank_counters.entry(&state.division).or_insert(0);
        *counter += 1;

        let rank = *counter;
        if rank > MAX_RANKED_PER_DIVISION {
            continue;
        }

        entries.push(RankingEntry {
            competitor_id: state.competitor_id,
            division: state.division.clone(),
            as_of,
            rank,
            score: round_score(state.rating),
            previous_rank: previous.get(&(state.competitor_id, state.division.clone())).copied()
        });
    }

    info!(
        "Built snapshot for {}: {} entries across {} divisions",
        as_of,
        entries.len(),
        rank_counters.len()
    );

    RankingSnapshot { as_of, entries }
}

/// Rounds the exact value of `rating` to one decimal place, halves away from zero.
/// `1400.05` is stored as `1400.0499...` and therefore rounds down.
fn round_score(rating: f64) -> f64 {
    Decimal::from_f64_retain(rating)
        .map(|d| d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(rating)
}
