use std::collections::HashMap;

use crate::{
    database::db_structs::Competitor,
    model::{constants::K_FACTOR_TIERS, structures::competitor_state::CompetitorState}
};

/// Volatility coefficient for a competitor with `rated_contests` prior rated contests.
/// Tiers are checked from the most experienced down.
pub fn k_factor(rated_contests: u32) -> f64 {
    K_FACTOR_TIERS
        .iter()
        .find(|(min_contests, _)| rated_contests >= *min_contests)
        .map_or(K_FACTOR_TIERS[K_FACTOR_TIERS.len() - 1].1, |(_, k)| *k)
}

/// Starting state for every competitor, keyed by competitor id
pub fn initial_states(competitors: &[Competitor]) -> HashMap<i32, CompetitorState> {
    competitors
        .iter()
        .map(|c| (c.id, initial_state(c)))
        .collect()
}

fn initial_state(competitor: &Competitor) -> CompetitorState {
    CompetitorState {
        competitor_id: competitor.id,
        division: competitor.division(),
        rating: competitor.tier.starting_rating(),
        rated_contests: 0,
        last_contest: None
    }
}
