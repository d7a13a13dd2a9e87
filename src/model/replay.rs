use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use itertools::Itertools;
use tracing::{debug, info};

use crate::{
    database::db_structs::{Competitor, Contest, Event},
    model::{
        rating_model::{rate_contest, ContestRating},
        rating_utils::{initial_states, k_factor},
        structures::{competitor_state::CompetitorState, contest_method::method_multiplier}
    },
    utils::progress_utils::progress_bar
};

/// A rating-eligible contest paired with the date it is replayed at
#[derive(Debug, Clone, Copy)]
pub struct DatedContest<'a> {
    pub contest: &'a Contest,
    pub date: DateTime<FixedOffset>
}

/// Contests whose event cannot be found replay as if held at the epoch
pub fn effective_date(contest: &Contest, events: &HashMap<i32, &Event>) -> DateTime<FixedOffset> {
    events
        .get(&contest.event_id)
        .map_or(DateTime::<Utc>::UNIX_EPOCH.fixed_offset(), |e| e.event_date)
}

/// Published, non no-contest contests in replay order.
///
/// Ratings are path dependent, so the order is total: event date, then card
/// order, then contest id.
pub fn rated_contests<'a>(contests: &'a [Contest], events: &[Event]) -> Vec<DatedContest<'a>> {
    let events_by_id: HashMap<i32, &Event> = events.iter().map(|e| (e.id, e)).collect();

    contests
        .iter()
        .filter(|c| c.is_rated())
        .map(|contest| DatedContest {
            contest,
            date: effective_date(contest, &events_by_id)
        })
        .sorted_by_key(|dc| (dc.date, dc.contest.bout_order, dc.contest.id))
        .collect()
}

/// Applies one rated contest to the competitor states.
///
/// Contests referencing an unknown competitor leave every state untouched.
pub fn apply_contest(
    mut states: HashMap<i32, CompetitorState>,
    dated: &DatedContest
) -> HashMap<i32, CompetitorState> {
    let contest = dated.contest;
    debug_assert!(!contest.outcome.is_no_contest(), "no-contests are never rated");

    let (a, b) = match (states.get(&contest.corner_a_id), states.get(&contest.corner_b_id)) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            debug!(
                contest_id = contest.id,
                corner_a_id = contest.corner_a_id,
                corner_b_id = contest.corner_b_id,
                "Skipping contest with an unknown competitor"
            );
            return states;
        }
    };

    let (rating_a, rating_b) = rate_contest(&ContestRating {
        rating_a: a.rating,
        rating_b: b.rating,
        score_a: contest
            .outcome
            .score_for_corner_a(contest.corner_a_id, contest.corner_b_id),
        k_a: k_factor(a.rated_contests),
        k_b: k_factor(b.rated_contests),
        method_multiplier: method_multiplier(contest.method),
        is_title_bout: contest.is_title_bout
    });

    for (id, rating) in [(contest.corner_a_id, rating_a), (contest.corner_b_id, rating_b)] {
        if let Some(state) = states.get_mut(&id) {
            state.rating = rating;
            state.rated_contests += 1;
            state.last_contest = Some(dated.date);
        }
    }

    states
}

/// Terminal rating state of every competitor after folding the full rated history
pub fn replay(competitors: &[Competitor], contests: &[Contest], events: &[Event]) -> HashMap<i32, CompetitorState> {
    let rated = rated_contests(contests, events);
    info!("Replaying {} rated contests for {} competitors", rated.len(), competitors.len());

    let bar = progress_bar(rated.len() as u64, "Replaying contest history".to_string());
    let states = rated.iter().fold(initial_states(competitors), |states, dated| {
        bar.inc(1);
        apply_contest(states, dated)
    });
    bar.finish_and_clear();

    states
}
