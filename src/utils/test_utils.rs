use crate::{
    database::db_structs::{Competitor, Contest, Event, RankingInput, Title},
    model::structures::{
        competitor_tier::CompetitorTier, contest_method::ContestMethod, contest_outcome::ContestOutcome,
        division::Division, gender::Gender, sport::Sport
    }
};
use chrono::{DateTime, Duration, FixedOffset};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strum::IntoEnumIterator;

pub const LIGHTWEIGHT: &str = "Lightweight (155)";

pub fn generate_competitor(id: i32, tier: CompetitorTier) -> Competitor {
    generate_competitor_in(id, tier, Division::new(Sport::Mma, Gender::Men, LIGHTWEIGHT))
}

pub fn generate_competitor_in(id: i32, tier: CompetitorTier, division: Division) -> Competitor {
    Competitor {
        id,
        first_name: format!("Competitor {}", id),
        last_name: "Test".to_string(),
        sport: division.sport,
        gender: division.gender,
        weight_class: division.weight_class,
        tier,
        is_active: true
    }
}

/// `date` must be RFC 3339, e.g. `2024-01-01T00:00:00+00:00`
pub fn generate_event(id: i32, date: &str, is_published: bool) -> Event {
    Event {
        id,
        promotion_id: 1,
        name: format!("Event {}", id),
        event_date: date.parse().expect("Expected an RFC 3339 event date"),
        is_published
    }
}

/// A published MMA lightweight contest
pub fn generate_contest(
    id: i32,
    event_id: i32,
    bout_order: i32,
    corner_a_id: i32,
    corner_b_id: i32,
    winner_id: Option<i32>,
    method: Option<ContestMethod>
) -> Contest {
    Contest {
        id,
        event_id,
        bout_order,
        sport: Sport::Mma,
        gender: Gender::Men,
        weight_class: LIGHTWEIGHT.to_string(),
        corner_a_id,
        corner_b_id,
        outcome: ContestOutcome::from_result(winner_id, method),
        method,
        is_title_bout: false,
        title_id: None,
        is_published: true
    }
}

/// An unpublished unanimous-decision title bout for `title_id`
pub fn generate_title_bout(
    id: i32,
    event_id: i32,
    bout_order: i32,
    corner_a_id: i32,
    corner_b_id: i32,
    winner_id: Option<i32>,
    title_id: i32
) -> Contest {
    Contest {
        is_title_bout: true,
        title_id: Some(title_id),
        is_published: false,
        ..generate_contest(
            id,
            event_id,
            bout_order,
            corner_a_id,
            corner_b_id,
            winner_id,
            Some(ContestMethod::UnanimousDecision)
        )
    }
}

pub fn generate_title(id: i32, holder_id: Option<i32>) -> Title {
    Title {
        id,
        promotion_id: 1,
        name: format!("Title {}", id),
        sport: Sport::Mma,
        gender: Gender::Men,
        weight_class: LIGHTWEIGHT.to_string(),
        holder_id,
        is_active: true
    }
}

/// A seeded, reproducible contest history.
///
/// Competitors are spread over two divisions so that crowded divisions hit
/// the ranking cap. Roughly one in ten contests is unpublished, some are
/// draws or no-contests, and a few reference a competitor that does not exist.
pub fn generate_random_history(n_competitors: i32, n_contests: i32, seed: u64) -> RankingInput {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let divisions = [
        Division::new(Sport::Mma, Gender::Men, LIGHTWEIGHT),
        Division::new(Sport::Kickboxing, Gender::Women, "125 lbs")
    ];
    let methods: Vec<ContestMethod> = ContestMethod::iter().collect();

    let competitors: Vec<Competitor> = (1..=n_competitors)
        .map(|id| {
            let tier = if rng.random_bool(0.7) {
                CompetitorTier::Professional
            } else {
                CompetitorTier::Amateur
            };
            let division = divisions[rng.random_range(0..divisions.len())].clone();

            generate_competitor_in(id, tier, division)
        })
        .collect();

    let start: DateTime<FixedOffset> = "2022-01-01T00:00:00+00:00".parse().expect("valid date");
    let n_events = (n_contests / 4).max(1);
    let events: Vec<Event> = (1..=n_events)
        .map(|id| Event {
            event_date: start + Duration::days(rng.random_range(0..1200)),
            ..generate_event(id, "2022-01-01T00:00:00+00:00", true)
        })
        .collect();

    let contests: Vec<Contest> = (1..=n_contests)
        .map(|id| {
            let corner_a_id = rng.random_range(1..=n_competitors);
            let mut corner_b_id = rng.random_range(1..=n_competitors + 1);
            if corner_b_id == corner_a_id {
                corner_b_id = corner_a_id % n_competitors + 1;
            }

            let method = if rng.random_bool(0.1) {
                None
            } else {
                Some(methods[rng.random_range(0..methods.len())])
            };
            let winner_id = match (method, rng.random_range(0..5)) {
                (Some(ContestMethod::Draw), _) | (_, 0) => None,
                (_, 1 | 2) => Some(corner_a_id),
                _ => Some(corner_b_id)
            };

            Contest {
                is_published: rng.random_bool(0.9),
                ..generate_contest(
                    id,
                    rng.random_range(1..=n_events),
                    rng.random_range(1..=12),
                    corner_a_id,
                    corner_b_id,
                    winner_id,
                    method
                )
            }
        })
        .collect();

    RankingInput {
        competitors,
        contests,
        events,
        titles: Vec::new(),
        previous_rankings: Vec::new()
    }
}

/// Two cards between four professional lightweights; competitor 4 wins title 1 on the second card
pub fn demo_card() -> RankingInput {
    let competitors = (1..=4)
        .map(|id| generate_competitor(id, CompetitorTier::Professional))
        .collect();
    let events = vec![
        generate_event(1, "2023-06-01T00:00:00+00:00", true),
        generate_event(2, "2023-09-01T00:00:00+00:00", true)
    ];

    let mut title_bout = generate_title_bout(3, 2, 1, 1, 4, Some(4), 1);
    title_bout.is_published = true;

    let contests = vec![
        generate_contest(1, 1, 1, 1, 2, Some(1), Some(ContestMethod::KoTko)),
        generate_contest(2, 1, 2, 3, 4, Some(4), Some(ContestMethod::Submission)),
        title_bout,
        generate_contest(4, 2, 2, 2, 3, Some(3), Some(ContestMethod::Submission))
    ];

    RankingInput {
        competitors,
        contests,
        events,
        titles: vec![generate_title(1, Some(4))],
        previous_rankings: Vec::new()
    }
}
