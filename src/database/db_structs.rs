use crate::model::structures::{
    competitor_tier::CompetitorTier, contest_method::ContestMethod, contest_outcome::ContestOutcome,
    division::Division, gender::Gender, rank_movement::RankMovement, sport::Sport
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub sport: Sport,
    pub gender: Gender,
    pub weight_class: String,
    pub tier: CompetitorTier,
    pub is_active: bool
}

impl Competitor {
    /// The division this competitor is ranked in
    pub fn division(&self) -> Division {
        Division::new(self.sport, self.gender, self.weight_class.clone())
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i32,
    pub promotion_id: i32,
    pub name: String,
    pub event_date: DateTime<FixedOffset>,
    pub is_published: bool
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: i32,
    pub event_id: i32,
    /// Position within the event's card
    pub bout_order: i32,
    pub sport: Sport,
    pub gender: Gender,
    pub weight_class: String,
    pub corner_a_id: i32,
    pub corner_b_id: i32,
    pub outcome: ContestOutcome,
    pub method: Option<ContestMethod>,
    pub is_title_bout: bool,
    pub title_id: Option<i32>,
    /// Mirrors the parent event's publication flag
    pub is_published: bool
}

impl Contest {
    /// Published and not a no-contest
    pub fn is_rated(&self) -> bool {
        self.is_published && !self.outcome.is_no_contest() && self.method != Some(ContestMethod::NoContest)
    }

    pub fn involves(&self, competitor_id: i32) -> bool {
        self.corner_a_id == competitor_id || self.corner_b_id == competitor_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub id: i32,
    pub promotion_id: i32,
    pub name: String,
    pub sport: Sport,
    pub gender: Gender,
    pub weight_class: String,
    /// `None` when vacant
    pub holder_id: Option<i32>,
    pub is_active: bool
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub competitor_id: i32,
    #[serde(flatten)]
    pub division: Division,
    pub as_of: NaiveDate,
    /// Dense, 1-based, per division
    pub rank: i32,
    pub score: f64,
    /// Rank in the same division in the previous snapshot
    pub previous_rank: Option<i32>
}

impl RankingEntry {
    pub fn movement(&self) -> RankMovement {
        RankMovement::between(self.previous_rank, self.rank)
    }
}

/// The full ranking table produced by one recomputation pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankingSnapshot {
    pub as_of: NaiveDate,
    pub entries: Vec<RankingEntry>
}

impl RankingSnapshot {
    /// Entries of one division ordered by rank. Empty for an unranked division.
    pub fn division(&self, division: &Division) -> Vec<&RankingEntry> {
        let mut entries: Vec<&RankingEntry> = self.entries.iter().filter(|e| &e.division == division).collect();
        entries.sort_by_key(|e| e.rank);

        entries
    }

    /// Entries grouped by division, divisions in sorted order and entries by rank
    pub fn by_division(&self) -> IndexMap<Division, Vec<&RankingEntry>> {
        let mut map: IndexMap<Division, Vec<&RankingEntry>> = IndexMap::new();
        for entry in &self.entries {
            map.entry(entry.division.clone()).or_default().push(entry);
        }

        map.sort_keys();
        for entries in map.values_mut() {
            entries.sort_by_key(|e| e.rank);
        }

        map
    }
}

/// Everything a recomputation pass or a publication reads from the store
#[derive(Debug, Clone, Default)]
pub struct RankingInput {
    pub competitors: Vec<Competitor>,
    pub contests: Vec<Contest>,
    pub events: Vec<Event>,
    pub titles: Vec<Title>,
    pub previous_rankings: Vec<RankingEntry>
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TitleTransfer {
    pub title_id: i32,
    pub contest_id: i32,
    pub previous_holder_id: Option<i32>,
    pub new_holder_id: i32
}

/// Flag changes and title reassignments that publishing or unpublishing an
/// event applies as one unit
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicationPlan {
    pub event_id: i32,
    pub published: bool,
    pub contest_ids: Vec<i32>,
    pub title_transfers: Vec<TitleTransfer>
}
