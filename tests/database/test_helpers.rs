use fightrank_processor::{
    database::db_structs::{Contest, RankingInput},
    model::structures::contest_method::ContestMethod,
    utils::test_utils::{demo_card, generate_contest, generate_event, generate_title_bout}
};
use lazy_static::lazy_static;
use std::sync::Arc;
use testcontainers::{clients::Cli, Container};
use testcontainers_modules::postgres::Postgres;
use tokio_postgres::{Client, NoTls};

/// Event seeded unpublished, carrying a rematch for title 1 that competitor 1 wins
pub const PENDING_EVENT_ID: i32 = 3;

pub struct TestDatabase {
    pub connection_string: String,
    _container: Container<'static, Postgres>
}

impl TestDatabase {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        lazy_static! {
            static ref DOCKER: Arc<Cli> = Arc::new(Cli::default());
        }

        let container = DOCKER.run(Postgres::default());
        let port = container.get_host_port_ipv4(5432);

        let connection_string = format!(
            "host=localhost port={} user=postgres password=postgres dbname=postgres",
            port
        );

        let (client, connection) = tokio_postgres::connect(&connection_string, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("Database connection error: {}", e);
            }
        });

        let schema = include_str!("schema.sql");
        client.batch_execute(schema).await?;

        Ok(TestDatabase {
            connection_string,
            _container: container
        })
    }

    pub async fn get_client(&self) -> Result<Client, Box<dyn std::error::Error>> {
        let (client, connection) = tokio_postgres::connect(&self.connection_string, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("Database connection error: {}", e);
            }
        });

        Ok(client)
    }

    /// The demo card plus one pending event:
    /// - events 1 and 2 are published, competitor 4 holds title 1
    /// - event 3 is unpublished: 4 vs 1 for title 1 (1 wins), then 2 vs 3 (2 wins)
    pub async fn seed_test_data(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut input = demo_card();

        input
            .events
            .push(generate_event(PENDING_EVENT_ID, "2024-01-15T00:00:00+00:00", false));
        input
            .contests
            .push(generate_title_bout(5, PENDING_EVENT_ID, 1, 4, 1, Some(1), 1));
        input.contests.push(Contest {
            is_published: false,
            ..generate_contest(6, PENDING_EVENT_ID, 2, 2, 3, Some(2), Some(ContestMethod::SplitDecision))
        });

        self.insert(&input).await
    }

    pub async fn insert(&self, input: &RankingInput) -> Result<(), Box<dyn std::error::Error>> {
        let client = self.get_client().await?;

        for c in &input.competitors {
            client
                .execute(
                    "INSERT INTO competitors (id, first_name, last_name, sport, gender, weight_class, tier, is_active)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
                    &[
                        &c.id,
                        &c.first_name,
                        &c.last_name,
                        &(c.sport as i32),
                        &(c.gender as i32),
                        &c.weight_class,
                        &(c.tier as i32),
                        &c.is_active
                    ]
                )
                .await?;
        }

        for e in &input.events {
            client
                .execute(
                    "INSERT INTO events (id, promotion_id, name, event_date, is_published) VALUES ($1, $2, $3, $4, $5)",
                    &[&e.id, &e.promotion_id, &e.name, &e.event_date, &e.is_published]
                )
                .await?;
        }

        for t in &input.titles {
            client
                .execute(
                    "INSERT INTO titles (id, promotion_id, name, sport, gender, weight_class, holder_id, is_active)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
                    &[
                        &t.id,
                        &t.promotion_id,
                        &t.name,
                        &(t.sport as i32),
                        &(t.gender as i32),
                        &t.weight_class,
                        &t.holder_id,
                        &t.is_active
                    ]
                )
                .await?;
        }

        for c in &input.contests {
            client
                .execute(
                    "INSERT INTO contests (id, event_id, bout_order, sport, gender, weight_class, corner_a_id,
                 corner_b_id, winner_id, method, is_title_bout, title_id, is_published)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
                    &[
                        &c.id,
                        &c.event_id,
                        &c.bout_order,
                        &(c.sport as i32),
                        &(c.gender as i32),
                        &c.weight_class,
                        &c.corner_a_id,
                        &c.corner_b_id,
                        &c.outcome.winner(),
                        &c.method.map(|m| m as i32),
                        &c.is_title_bout,
                        &c.title_id,
                        &c.is_published
                    ]
                )
                .await?;
        }

        Ok(())
    }
}
