use approx::assert_abs_diff_eq;
use chrono::{DateTime, FixedOffset};
use fightrank_processor::{
    database::{db::DbClient, DbError},
    model::structures::{contest_method::ContestMethod, contest_outcome::ContestOutcome}
};
use serial_test::serial;

use super::test_helpers::{TestDatabase, PENDING_EVENT_ID};
use crate::common::init_test_env;

fn now() -> DateTime<FixedOffset> {
    "2024-02-01T00:00:00+00:00".parse().unwrap()
}

async fn seeded() -> (TestDatabase, DbClient) {
    init_test_env();
    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db.seed_test_data().await.expect("Failed to seed test data");

    let db_client = DbClient::connect(&test_db.connection_string)
        .await
        .expect("Failed to connect");

    (test_db, db_client)
}

#[tokio::test]
#[serial]
async fn test_load_ranking_input() {
    let (_test_db, mut db_client) = seeded().await;

    let input = db_client.load_ranking_input().await.expect("Failed to load input");

    assert_eq!(input.competitors.len(), 4);
    assert_eq!(input.events.len(), 3);
    assert_eq!(input.contests.len(), 6);
    assert_eq!(input.titles.len(), 1);
    assert!(input.previous_rankings.is_empty());

    let rematch = input.contests.iter().find(|c| c.id == 5).unwrap();
    assert_eq!(rematch.outcome, ContestOutcome::Decisive { winner: 1 });
    assert_eq!(rematch.method, Some(ContestMethod::UnanimousDecision));
    assert!(rematch.is_title_bout);
    assert!(!rematch.is_published);
    assert_eq!(input.titles[0].holder_id, Some(4));
}

#[tokio::test]
#[serial]
async fn test_recompute_replaces_ranking_table() {
    let (_test_db, mut db_client) = seeded().await;

    let first = db_client.recompute_rankings(now()).await.expect("Failed to recompute");
    let stored = db_client.get_rankings().await.expect("Failed to read rankings");

    let ids: Vec<i32> = stored.iter().map(|e| e.competitor_id).collect();
    assert_eq!(ids, vec![4, 1, 3, 2]);
    assert_eq!(stored, first.entries);
    assert_abs_diff_eq!(stored[0].score, 1547.9, epsilon = 1e-9);

    let second = db_client.recompute_rankings(now()).await.expect("Failed to recompute");
    let stored = db_client.get_rankings().await.expect("Failed to read rankings");

    assert_eq!(stored.len(), 4);
    assert_eq!(stored, second.entries);
    for entry in &stored {
        assert_eq!(entry.previous_rank, Some(entry.rank));
    }
}

#[tokio::test]
#[serial]
async fn test_publish_then_unpublish_keeps_title_custody() {
    let (_test_db, mut db_client) = seeded().await;

    let plan = db_client
        .publish_event(PENDING_EVENT_ID)
        .await
        .expect("Failed to publish");

    assert!(plan.published);
    assert_eq!(plan.contest_ids, vec![5, 6]);
    assert_eq!(plan.title_transfers.len(), 1);
    assert_eq!(plan.title_transfers[0].previous_holder_id, Some(4));
    assert_eq!(plan.title_transfers[0].new_holder_id, 1);

    let titles = db_client.get_titles().await.unwrap();
    assert_eq!(titles[0].holder_id, Some(1));
    let contests = db_client.get_contests().await.unwrap();
    assert!(contests.iter().all(|c| c.is_published));

    db_client
        .unpublish_event(PENDING_EVENT_ID)
        .await
        .expect("Failed to unpublish");

    let titles = db_client.get_titles().await.unwrap();
    assert_eq!(titles[0].holder_id, Some(1));
    let events = db_client.get_events().await.unwrap();
    let pending = events.iter().find(|e| e.id == PENDING_EVENT_ID).unwrap();
    assert!(!pending.is_published);
    let contests = db_client.get_contests().await.unwrap();
    assert!(contests
        .iter()
        .filter(|c| c.event_id == PENDING_EVENT_ID)
        .all(|c| !c.is_published));
}

#[tokio::test]
#[serial]
async fn test_published_event_feeds_next_recompute() {
    let (_test_db, mut db_client) = seeded().await;

    let before = db_client.recompute_rankings(now()).await.unwrap();
    db_client.publish_event(PENDING_EVENT_ID).await.unwrap();
    let after = db_client.recompute_rankings(now()).await.unwrap();

    let score = |entries: &[fightrank_processor::database::db_structs::RankingEntry], id: i32| {
        entries.iter().find(|e| e.competitor_id == id).map(|e| e.score).unwrap()
    };

    assert!(score(&after.entries, 1) > score(&before.entries, 1));
    assert!(score(&after.entries, 4) < score(&before.entries, 4));
}

#[tokio::test]
#[serial]
async fn test_publish_unknown_event() {
    let (_test_db, mut db_client) = seeded().await;

    let result = db_client.publish_event(404).await;

    assert!(matches!(result, Err(DbError::EventNotFound(404))));
}

#[tokio::test]
#[serial]
async fn test_unknown_enum_code_is_reported() {
    let (test_db, db_client) = seeded().await;

    let client = test_db.get_client().await.unwrap();
    client
        .execute("UPDATE competitors SET sport = 42 WHERE id = 1", &[])
        .await
        .unwrap();

    let result = db_client.get_competitors().await;

    assert!(matches!(
        result,
        Err(DbError::InvalidColumn {
            column: "sport",
            value: 42
        })
    ));
}
