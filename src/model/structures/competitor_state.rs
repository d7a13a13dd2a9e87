use chrono::{DateTime, FixedOffset};

use super::division::Division;

/// Rating state of a single competitor within one recomputation pass.
///
/// Never persisted; rebuilt from contest history on every pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorState {
    pub competitor_id: i32,
    /// The competitor's declared division, used only when ranking
    pub division: Division,
    pub rating: f64,
    pub rated_contests: u32,
    pub last_contest: Option<DateTime<FixedOffset>>
}
