use super::{
    db_structs::{
        Competitor, Contest, Event, PublicationPlan, RankingEntry, RankingInput, RankingSnapshot, Title
    },
    DbError
};
use crate::{
    model::{
        self,
        structures::{contest_outcome::ContestOutcome, division::Division},
        title_custody
    },
    utils::progress_utils::progress_bar
};
use chrono::{DateTime, FixedOffset};
use postgres_types::ToSql;
use tokio_postgres::{Client, GenericClient, IsolationLevel, NoTls, Row};
use tracing::{error, info};

/// Key of the session-level advisory lock held while rankings are recomputed.
/// Concurrent recomputations queue on it instead of racing on the ranking table.
pub const RECOMPUTE_LOCK_KEY: i64 = 0x5241_4e4b;

const COMPETITOR_COLUMNS: &str = "id, first_name, last_name, sport, gender, weight_class, tier, is_active";
const EVENT_COLUMNS: &str = "id, promotion_id, name, event_date, is_published";
const CONTEST_COLUMNS: &str = "id, event_id, bout_order, sport, gender, weight_class, corner_a_id, corner_b_id, \
    winner_id, method, is_title_bout, title_id, is_published";
const TITLE_COLUMNS: &str = "id, promotion_id, name, sport, gender, weight_class, holder_id, is_active";
const RANKING_COLUMNS: &str = "competitor_id, sport, gender, weight_class, as_of, rank, score, previous_rank";

pub struct DbClient {
    client: Client
}

impl DbClient {
    // Connect to the database and return a DbClient instance
    pub async fn connect(connection_str: &str) -> Result<Self, DbError> {
        let (client, connection) = tokio_postgres::connect(connection_str, NoTls).await?;

        // Spawn the connection object to run in the background
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("connection error: {}", e);
            }
        });

        Ok(DbClient { client })
    }

    pub async fn get_competitors(&self) -> Result<Vec<Competitor>, DbError> {
        fetch_competitors(&self.client).await
    }

    pub async fn get_events(&self) -> Result<Vec<Event>, DbError> {
        fetch_events(&self.client).await
    }

    pub async fn get_contests(&self) -> Result<Vec<Contest>, DbError> {
        fetch_contests(&self.client, None).await
    }

    pub async fn get_titles(&self) -> Result<Vec<Title>, DbError> {
        fetch_titles(&self.client).await
    }

    /// The current ranking table, ordered by division then rank
    pub async fn get_rankings(&self) -> Result<Vec<RankingEntry>, DbError> {
        fetch_rankings(&self.client).await
    }

    /// Reads everything a recomputation pass needs from one consistent snapshot,
    /// without taking the recompute lock
    pub async fn load_ranking_input(&mut self) -> Result<RankingInput, DbError> {
        let transaction = self
            .client
            .build_transaction()
            .isolation_level(IsolationLevel::RepeatableRead)
            .read_only(true)
            .start()
            .await?;

        let input = fetch_ranking_input(&transaction).await?;
        transaction.commit().await?;

        Ok(input)
    }

    /// # Recomputation pass
    ///
    /// Reads the store, runs [`model::recompute`] relative to `now` and replaces
    /// the ranking table with its result.
    ///
    /// - The session-level lock on [`RECOMPUTE_LOCK_KEY`] is taken before the
    ///     transaction starts, so a queued pass reads what the previous one committed.
    /// - The transaction is `REPEATABLE READ`: every read shares one snapshot, and
    ///     writes committed by publications mid-pass are not half seen.
    /// - On any failure the transaction is rolled back and the previous snapshot
    ///     stays in place. The lock is released either way.
    pub async fn recompute_rankings(&mut self, now: DateTime<FixedOffset>) -> Result<RankingSnapshot, DbError> {
        self.client
            .execute("SELECT pg_advisory_lock($1)", &[&RECOMPUTE_LOCK_KEY])
            .await?;
        info!("Acquired recompute lock");

        let result = self.recompute_locked(now).await;

        let unlocked = self
            .client
            .execute("SELECT pg_advisory_unlock($1)", &[&RECOMPUTE_LOCK_KEY])
            .await;

        let snapshot = result?;
        unlocked?;

        Ok(snapshot)
    }

    async fn recompute_locked(&mut self, now: DateTime<FixedOffset>) -> Result<RankingSnapshot, DbError> {
        let transaction = self
            .client
            .build_transaction()
            .isolation_level(IsolationLevel::RepeatableRead)
            .start()
            .await?;

        let input = fetch_ranking_input(&transaction).await?;

        let snapshot = model::recompute(&input, now);
        replace_rankings(&transaction, &snapshot).await?;

        transaction.commit().await?;
        info!("Committed ranking snapshot for {}", snapshot.as_of);

        Ok(snapshot)
    }

    /// Replaces the ranking table with `snapshot` in a single transaction
    pub async fn save_rankings(&mut self, snapshot: &RankingSnapshot) -> Result<(), DbError> {
        let transaction = self.client.transaction().await?;
        replace_rankings(&transaction, snapshot).await?;
        transaction.commit().await?;

        Ok(())
    }

    /// Publishes the event and its card, transferring titles decided on it.
    pub async fn publish_event(&mut self, event_id: i32) -> Result<PublicationPlan, DbError> {
        self.change_publication(event_id, true).await
    }

    /// Unpublishes the event and its card. Title holders are left untouched.
    pub async fn unpublish_event(&mut self, event_id: i32) -> Result<PublicationPlan, DbError> {
        self.change_publication(event_id, false).await
    }

    async fn change_publication(&mut self, event_id: i32, publish: bool) -> Result<PublicationPlan, DbError> {
        let transaction = self.client.transaction().await?;

        let query = format!("SELECT {} FROM events WHERE id = $1 FOR UPDATE", EVENT_COLUMNS);
        let event = match transaction.query_opt(query.as_str(), &[&event_id]).await? {
            Some(row) => event_from_row(&row)?,
            None => return Err(DbError::EventNotFound(event_id))
        };

        let contests = fetch_contests(&transaction, Some(event_id)).await?;
        let plan = if publish {
            let titles = fetch_titles(&transaction).await?;
            title_custody::publish(&event, &contests, &titles)
        } else {
            title_custody::unpublish(&event, &contests)
        };

        apply_publication(&transaction, &plan).await?;
        transaction.commit().await?;

        info!(
            "Event {} {} with {} contests and {} title transfers",
            event_id,
            if publish { "published" } else { "unpublished" },
            plan.contest_ids.len(),
            plan.title_transfers.len()
        );

        Ok(plan)
    }
}

async fn fetch_ranking_input<C: GenericClient>(client: &C) -> Result<RankingInput, DbError> {
    let (competitors, contests, events, titles, previous_rankings) = futures::try_join!(
        fetch_competitors(client),
        fetch_contests(client, None),
        fetch_events(client),
        fetch_titles(client),
        fetch_rankings(client)
    )?;

    info!(
        "Loaded {} competitors, {} contests, {} events, {} titles and {} ranking entries",
        competitors.len(),
        contests.len(),
        events.len(),
        titles.len(),
        previous_rankings.len()
    );

    Ok(RankingInput {
        competitors,
        contests,
        events,
        titles,
        previous_rankings
    })
}

async fn fetch_competitors<C: GenericClient>(client: &C) -> Result<Vec<Competitor>, DbError> {
    let query = format!("SELECT {} FROM competitors ORDER BY id", COMPETITOR_COLUMNS);
    let rows = client.query(query.as_str(), &[]).await?;

    rows.iter().map(competitor_from_row).collect()
}

async fn fetch_events<C: GenericClient>(client: &C) -> Result<Vec<Event>, DbError> {
    let query = format!("SELECT {} FROM events ORDER BY id", EVENT_COLUMNS);
    let rows = client.query(query.as_str(), &[]).await?;

    rows.iter().map(event_from_row).collect()
}

/// All contests, or only the card of `event_id`
async fn fetch_contests<C: GenericClient>(client: &C, event_id: Option<i32>) -> Result<Vec<Contest>, DbError> {
    let query = format!(
        "SELECT {} FROM contests WHERE ($1::INTEGER IS NULL OR event_id = $1) ORDER BY event_id, bout_order, id",
        CONTEST_COLUMNS
    );
    let rows = client.query(query.as_str(), &[&event_id]).await?;

    rows.iter().map(contest_from_row).collect()
}

async fn fetch_titles<C: GenericClient>(client: &C) -> Result<Vec<Title>, DbError> {
    let query = format!("SELECT {} FROM titles ORDER BY id", TITLE_COLUMNS);
    let rows = client.query(query.as_str(), &[]).await?;

    rows.iter().map(title_from_row).collect()
}

async fn fetch_rankings<C: GenericClient>(client: &C) -> Result<Vec<RankingEntry>, DbError> {
    let query = format!(
        "SELECT {} FROM ranking_entries ORDER BY sport, gender, weight_class, rank",
        RANKING_COLUMNS
    );
    let rows = client.query(query.as_str(), &[]).await?;

    rows.iter().map(ranking_entry_from_row).collect()
}

/// Deletes every ranking row and inserts the snapshot. Callers own the transaction.
async fn replace_rankings<C: GenericClient>(client: &C, snapshot: &RankingSnapshot) -> Result<(), DbError> {
    let deleted = client.execute("DELETE FROM ranking_entries", &[]).await?;
    info!("Retired {} ranking entries", deleted);

    let statement = client
        .prepare(
            "INSERT INTO ranking_entries (competitor_id, sport, gender, weight_class, as_of, rank, score, \
            previous_rank) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
        )
        .await?;

    let bar = progress_bar(snapshot.entries.len() as u64, "Saving ranking entries".to_string());
    for entry in &snapshot.entries {
        let values: &[&(dyn ToSql + Sync)] = &[
            &entry.competitor_id,
            &(entry.division.sport as i32),
            &(entry.division.gender as i32),
            &entry.division.weight_class,
            &entry.as_of,
            &entry.rank,
            &entry.score,
            &entry.previous_rank
        ];
        client.execute(&statement, values).await?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    info!("Saved {} ranking entries", snapshot.entries.len());
    Ok(())
}

async fn apply_publication<C: GenericClient>(client: &C, plan: &PublicationPlan) -> Result<(), DbError> {
    client
        .execute(
            "UPDATE events SET is_published = $1 WHERE id = $2",
            &[&plan.published, &plan.event_id]
        )
        .await?;

    client
        .execute(
            "UPDATE contests SET is_published = $1 WHERE event_id = $2",
            &[&plan.published, &plan.event_id]
        )
        .await?;

    for transfer in &plan.title_transfers {
        client
            .execute(
                "UPDATE titles SET holder_id = $1 WHERE id = $2",
                &[&transfer.new_holder_id, &transfer.title_id]
            )
            .await?;
    }

    Ok(())
}

fn decode<T: TryFrom<i32, Error = ()>>(row: &Row, column: &'static str) -> Result<T, DbError> {
    let value: i32 = row.try_get(column)?;

    T::try_from(value).map_err(|_| DbError::InvalidColumn { column, value })
}

fn decode_opt<T: TryFrom<i32, Error = ()>>(row: &Row, column: &'static str) -> Result<Option<T>, DbError> {
    match row.try_get::<_, Option<i32>>(column)? {
        Some(value) => T::try_from(value)
            .map(Some)
            .map_err(|_| DbError::InvalidColumn { column, value }),
        None => Ok(None)
    }
}

fn competitor_from_row(row: &Row) -> Result<Competitor, DbError> {
    Ok(Competitor {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        sport: decode(row, "sport")?,
        gender: decode(row, "gender")?,
        weight_class: row.try_get("weight_class")?,
        tier: decode(row, "tier")?,
        is_active: row.try_get("is_active")?
    })
}

fn event_from_row(row: &Row) -> Result<Event, DbError> {
    Ok(Event {
        id: row.try_get("id")?,
        promotion_id: row.try_get("promotion_id")?,
        name: row.try_get("name")?,
        event_date: row.try_get("event_date")?,
        is_published: row.try_get("is_published")?
    })
}

fn contest_from_row(row: &Row) -> Result<Contest, DbError> {
    let method = decode_opt(row, "method")?;
    let winner_id: Option<i32> = row.try_get("winner_id")?;

    Ok(Contest {
        id: row.try_get("id")?,
        event_id: row.try_get("event_id")?,
        bout_order: row.try_get("bout_order")?,
        sport: decode(row, "sport")?,
        gender: decode(row, "gender")?,
        weight_class: row.try_get("weight_class")?,
        corner_a_id: row.try_get("corner_a_id")?,
        corner_b_id: row.try_get("corner_b_id")?,
        outcome: ContestOutcome::from_result(winner_id, method),
        method,
        is_title_bout: row.try_get("is_title_bout")?,
        title_id: row.try_get("title_id")?,
        is_published: row.try_get("is_published")?
    })
}

fn title_from_row(row: &Row) -> Result<Title, DbError> {
    Ok(Title {
        id: row.try_get("id")?,
        promotion_id: row.try_get("promotion_id")?,
        name: row.try_get("name")?,
        sport: decode(row, "sport")?,
        gender: decode(row, "gender")?,
        weight_class: row.try_get("weight_class")?,
        holder_id: row.try_get("holder_id")?,
        is_active: row.try_get("is_active")?
    })
}

fn ranking_entry_from_row(row: &Row) -> Result<RankingEntry, DbError> {
    Ok(RankingEntry {
        competitor_id: row.try_get("competitor_id")?,
        division: Division::new(decode(row, "sport")?, decode(row, "gender")?, row.try_get::<_, String>("weight_class")?),
        as_of: row.try_get("as_of")?,
        rank: row.try_get("rank")?,
        score: row.try_get("score")?,
        previous_rank: row.try_get("previous_rank")?
    })
}
