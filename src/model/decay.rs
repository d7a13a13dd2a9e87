use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::model::{constants::DECAY_PENALTIES, structures::competitor_state::CompetitorState};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// # How this works
/// - This gets called once per recomputation pass at time D (`current_time`),
///     after the full contest history has been replayed.
/// - The competitor's last rated contest was held at T.
/// - Inactivity is the whole number of days between D and T, rounded up.
/// - A single flat penalty is subtracted from the rating depending on how long
///     the competitor has been inactive.
///
/// # Rules
/// - Competitors without a rated contest are never decayed.
/// - The penalty is applied once per pass, never per elapsed period.
pub fn decay(state: &mut CompetitorState, current_time: DateTime<FixedOffset>) -> Option<f64> {
    let last_contest = state.last_contest?;
    let penalty = decay_penalty(days_inactive(last_contest, current_time));

    if penalty > 0.0 {
        debug!(
            competitor_id = state.competitor_id,
            penalty, "Applying inactivity decay"
        );
    }

    state.rating -= penalty;
    Some(penalty)
}

/// Applies [`decay`] to every state
pub fn decay_all(states: &mut HashMap<i32, CompetitorState>, current_time: DateTime<FixedOffset>) {
    for state in states.values_mut() {
        decay(state, current_time);
    }
}

/// Ceiling of the absolute difference in days
fn days_inactive(last_contest: DateTime<FixedOffset>, current_time: DateTime<FixedOffset>) -> i64 {
    let millis = (current_time - last_contest).num_milliseconds().abs();

    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

fn decay_penalty(days: i64) -> f64 {
    DECAY_PENALTIES
        .iter()
        .find(|(threshold, _)| days > *threshold)
        .map_or(0.0, |(_, penalty)| *penalty)
}
