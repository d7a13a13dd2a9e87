use chrono::{DateTime, FixedOffset};
use fightrank_processor::database::{
    db::{DbClient, RECOMPUTE_LOCK_KEY},
    db_structs::{RankingEntry, RankingSnapshot},
    DbError
};
use serial_test::serial;
use std::time::Duration;

use super::test_helpers::{TestDatabase, PENDING_EVENT_ID};
use crate::common::init_test_env;

fn now() -> DateTime<FixedOffset> {
    "2024-02-01T00:00:00+00:00".parse().unwrap()
}

#[tokio::test]
#[serial]
async fn test_failed_save_keeps_previous_snapshot() {
    init_test_env();
    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db.seed_test_data().await.expect("Failed to seed test data");

    let mut client = DbClient::connect(&test_db.connection_string)
        .await
        .expect("Failed to connect");

    let committed = client.recompute_rankings(now()).await.expect("Failed to recompute");

    // The last row references a competitor that does not exist
    let mut entries = committed.entries.clone();
    entries.push(RankingEntry {
        competitor_id: 999,
        rank: 5,
        previous_rank: None,
        ..committed.entries[0].clone()
    });
    let broken = RankingSnapshot {
        as_of: committed.as_of,
        entries
    };

    let result = client.save_rankings(&broken).await;
    assert!(matches!(result, Err(DbError::Postgres(_))));

    let stored = client.get_rankings().await.expect("Failed to read rankings");
    assert_eq!(stored, committed.entries);
}

#[tokio::test]
#[serial]
async fn test_save_rankings_replaces_wholesale() {
    init_test_env();
    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db.seed_test_data().await.expect("Failed to seed test data");

    let mut client = DbClient::connect(&test_db.connection_string)
        .await
        .expect("Failed to connect");

    let committed = client.recompute_rankings(now()).await.unwrap();
    let smaller = RankingSnapshot {
        as_of: committed.as_of,
        entries: committed.entries[..1].to_vec()
    };

    client.save_rankings(&smaller).await.expect("Failed to save rankings");

    let stored = client.get_rankings().await.unwrap();
    assert_eq!(stored, smaller.entries);
}

#[tokio::test]
#[serial]
async fn test_concurrent_recomputations_serialize() {
    init_test_env();
    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db.seed_test_data().await.expect("Failed to seed test data");

    let mut first = DbClient::connect(&test_db.connection_string).await.unwrap();
    let mut second = DbClient::connect(&test_db.connection_string).await.unwrap();

    let (a, b) = tokio::join!(first.recompute_rankings(now()), second.recompute_rankings(now()));
    let a = a.expect("First recomputation failed");
    let b = b.expect("Second recomputation failed");

    assert_eq!(a.entries.len(), 4);
    assert_eq!(b.entries.len(), 4);

    // Whichever ran second saw the other's snapshot as its previous one
    let stored = first.get_rankings().await.unwrap();
    assert_eq!(stored.len(), 4);
    assert!(stored.iter().all(|e| e.previous_rank.is_some()));
}

#[tokio::test]
#[serial]
async fn test_queued_recompute_reads_after_lock_release() {
    init_test_env();
    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db.seed_test_data().await.expect("Failed to seed test data");

    let mut client = DbClient::connect(&test_db.connection_string).await.unwrap();
    let holder = test_db.get_client().await.unwrap();
    holder
        .execute("SELECT pg_advisory_lock($1)", &[&RECOMPUTE_LOCK_KEY])
        .await
        .unwrap();

    // Publish the pending card while the pass is queued on the lock
    let publish_then_release = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        holder
            .batch_execute(&format!(
                "BEGIN;
                 UPDATE events SET is_published = TRUE WHERE id = {id};
                 UPDATE contests SET is_published = TRUE WHERE event_id = {id};
                 COMMIT;",
                id = PENDING_EVENT_ID
            ))
            .await
            .unwrap();
        holder
            .execute("SELECT pg_advisory_unlock($1)", &[&RECOMPUTE_LOCK_KEY])
            .await
            .unwrap();
    };

    let (snapshot, _) = tokio::join!(client.recompute_rankings(now()), publish_then_release);
    let snapshot = snapshot.expect("Recomputation failed");

    // Competitor 4 lost the rematch, so it can no longer hold its demo card score
    let score = snapshot
        .entries
        .iter()
        .find(|e| e.competitor_id == 4)
        .map(|e| e.score)
        .unwrap();
    assert!(score < 1547.9);
}

#[tokio::test]
#[serial]
async fn test_failed_recompute_releases_lock() {
    init_test_env();
    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db.seed_test_data().await.expect("Failed to seed test data");

    let check_client = test_db.get_client().await.unwrap();
    check_client
        .execute("UPDATE competitors SET tier = 9 WHERE id = 2", &[])
        .await
        .unwrap();

    let mut client = DbClient::connect(&test_db.connection_string).await.unwrap();
    let result = client.recompute_rankings(now()).await;
    assert!(matches!(
        result,
        Err(DbError::InvalidColumn {
            column: "tier",
            value: 9
        })
    ));

    let acquired: bool = check_client
        .query_one("SELECT pg_try_advisory_lock($1)", &[&RECOMPUTE_LOCK_KEY])
        .await
        .unwrap()
        .get(0);
    assert!(acquired, "Recompute lock should be free after a failed pass");

    let count: i64 = check_client
        .query_one("SELECT COUNT(*) FROM ranking_entries", &[])
        .await
        .unwrap()
        .get(0);
    assert_eq!(count, 0);
}
