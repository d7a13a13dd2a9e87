use crate::model::constants::{ELO_SCALE, OPPONENT_QUALITY_BONUSES, TITLE_BOUT_BONUS};

/// Inputs of a single rated contest, seen from corner A
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContestRating {
    pub rating_a: f64,
    pub rating_b: f64,
    /// 1 for a corner A win, 0.5 for a draw, 0 for a corner B win
    pub score_a: f64,
    pub k_a: f64,
    pub k_b: f64,
    pub method_multiplier: f64,
    pub is_title_bout: bool
}

/// Logistic expected score of a competitor rated `rating` against `opponent_rating`
pub fn expected_score(rating: f64, opponent_rating: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent_rating - rating) / ELO_SCALE))
}

/// Bonus for beating an opponent, based on the opponent's pre-contest rating
pub fn opponent_quality_bonus(opponent_rating: f64) -> f64 {
    OPPONENT_QUALITY_BONUSES
        .iter()
        .find(|(threshold, _)| opponent_rating >= *threshold)
        .map_or(0.0, |(_, bonus)| *bonus)
}

/// # Contest rating
///
/// Returns the post-contest ratings `(a, b)`.
///
/// Each side's change is `k * (score - expected) * method_multiplier`, computed
/// independently, so the changes need not cancel out. A clear winner then
/// gains the title bonus (title bouts only) and the opponent quality bonus,
/// both evaluated on pre-contest ratings. Draws receive neither. Ratings are
/// not clamped.
pub fn rate_contest(input: &ContestRating) -> (f64, f64) {
    let expected_a = expected_score(input.rating_a, input.rating_b);
    let expected_b = expected_score(input.rating_b, input.rating_a);
    let score_b = 1.0 - input.score_a;

    let mut change_a = input.k_a * (input.score_a - expected_a) * input.method_multiplier;
    let mut change_b = input.k_b * (score_b - expected_b) * input.method_multiplier;

    if input.score_a == 1.0 {
        change_a += winner_bonus(input.rating_b, input.is_title_bout);
    } else if input.score_a == 0.0 {
        change_b += winner_bonus(input.rating_a, input.is_title_bout);
    }

    (input.rating_a + change_a, input.rating_b + change_b)
}

fn winner_bonus(opponent_rating: f64, is_title_bout: bool) -> f64 {
    let title_bonus = if is_title_bout { TITLE_BOUT_BONUS } else { 0.0 };

    title_bonus + opponent_quality_bonus(opponent_rating)
}
