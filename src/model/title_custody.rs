use std::collections::HashMap;

use itertools::Itertools;
use tracing::{info, warn};

use crate::database::db_structs::{Contest, Event, PublicationPlan, Title, TitleTransfer};

/// Title transfers caused by publishing the card of `event_id`.
///
/// A contest transfers its title when it is a title bout, references a known
/// title and has a declared winner. Bouts are taken in card order, so when one
/// card decides the same title twice the later bout holds it.
pub fn title_transfers(event_id: i32, contests: &[Contest], titles: &[Title]) -> Vec<TitleTransfer> {
    let mut holders: HashMap<i32, Option<i32>> = titles.iter().map(|t| (t.id, t.holder_id)).collect();
    let mut transfers = Vec::new();

    let card = contests
        .iter()
        .filter(|c| c.event_id == event_id)
        .sorted_by_key(|c| (c.bout_order, c.id));

    for contest in card {
        if !contest.is_title_bout {
            continue;
        }

        let (Some(title_id), Some(winner)) = (contest.title_id, contest.outcome.winner()) else {
            continue;
        };

        let Some(holder) = holders.get_mut(&title_id) else {
            warn!(contest_id = contest.id, title_id, "Title bout references an unknown title");
            continue;
        };

        transfers.push(TitleTransfer {
            title_id,
            contest_id: contest.id,
            previous_holder_id: *holder,
            new_holder_id: winner
        });
        *holder = Some(winner);
    }

    transfers
}

/// Publishing flips the event and every contest on its card to published and
/// hands titles to the winners of its title bouts.
pub fn publish(event: &Event, contests: &[Contest], titles: &[Title]) -> PublicationPlan {
    let transfers = title_transfers(event.id, contests, titles);
    for t in &transfers {
        info!(
            "Event {} transfers title {} from {:?} to {}",
            event.id, t.title_id, t.previous_holder_id, t.new_holder_id
        );
    }

    PublicationPlan {
        event_id: event.id,
        published: true,
        contest_ids: card_ids(event.id, contests),
        title_transfers: transfers
    }
}

/// Unpublishing flips the flags back. Title custody is left as it is.
pub fn unpublish(event: &Event, contests: &[Contest]) -> PublicationPlan {
    PublicationPlan {
        event_id: event.id,
        published: false,
        contest_ids: card_ids(event.id, contests),
        title_transfers: Vec::new()
    }
}

/// Applies the plan to in-memory records, mirroring what the store persists
pub fn apply_plan(plan: &PublicationPlan, events: &mut [Event], contests: &mut [Contest], titles: &mut [Title]) {
    for event in events.iter_mut().filter(|e| e.id == plan.event_id) {
        event.is_published = plan.published;
    }

    for contest in contests.iter_mut().filter(|c| plan.contest_ids.contains(&c.id)) {
        contest.is_published = plan.published;
    }

    for transfer in &plan.title_transfers {
        if let Some(title) = titles.iter_mut().find(|t| t.id == transfer.title_id) {
            title.holder_id = Some(transfer.new_holder_id);
        }
    }
}

fn card_ids(event_id: i32, contests: &[Contest]) -> Vec<i32> {
    contests
        .iter()
        .filter(|c| c.event_id == event_id)
        .map(|c| c.id)
        .sorted()
        .collect()
}
