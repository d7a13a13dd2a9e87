use std::collections::HashMap;

use itertools::Itertools;

use crate::{
    database::db_structs::{Competitor, Contest, RankingSnapshot},
    model::{
        record::{competitor_record, CompetitorRecord},
        structures::{division::Division, rank_movement::RankMovement}
    }
};

/// One printable line of a division's leaderboard
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub rank: i32,
    pub competitor_id: i32,
    pub name: String,
    pub score: f64,
    pub record: CompetitorRecord,
    pub movement: RankMovement
}

/// Rows of one division ordered by rank. Empty for an unranked division.
pub fn leaderboard(
    snapshot: &RankingSnapshot,
    division: &Division,
    competitors: &[Competitor],
    contests: &[Contest]
) -> Vec<LeaderboardRow> {
    let names: HashMap<i32, String> = competitors.iter().map(|c| (c.id, c.display_name())).collect();

    snapshot
        .division(division)
        .into_iter()
        .map(|entry| LeaderboardRow {
            rank: entry.rank,
            competitor_id: entry.competitor_id,
            name: names
                .get(&entry.competitor_id)
                .cloned()
                .unwrap_or_else(|| format!("#{}", entry.competitor_id)),
            score: entry.score,
            record: competitor_record(entry.competitor_id, contests),
            movement: entry.movement()
        })
        .collect()
}

pub fn render_division(
    snapshot: &RankingSnapshot,
    division: &Division,
    competitors: &[Competitor],
    contests: &[Contest]
) -> String {
    let rows = leaderboard(snapshot, division, competitors, contests);
    if rows.is_empty() {
        return format!("{}: unranked division\n", division);
    }

    let header = format!("{} (as of {})", division, snapshot.as_of);
    let lines = rows.iter().map(|row| {
        format!(
            "{:>4}. {:<32} {:>7.1}  {:<16} {}",
            row.rank,
            row.name,
            row.score,
            row.record.to_string(),
            row.movement
        )
    });

    std::iter::once(header).chain(lines).map(|line| line + "\n").collect()
}

/// Every recognized division plus any other ranked one, in division order
pub fn render(snapshot: &RankingSnapshot, competitors: &[Competitor], contests: &[Contest]) -> String {
    Division::recognized()
        .into_iter()
        .chain(snapshot.entries.iter().map(|e| e.division.clone()))
        .sorted()
        .dedup()
        .map(|division| render_division(snapshot, &division, competitors, contests))
        .join("\n")
}
