use chrono::{DateTime, FixedOffset, Local, Utc};
use clap::Parser;
use fightrank_processor::{
    args::{Args, Command},
    database::{db::DbClient, db_structs::RankingSnapshot, DbError},
    model::{self, leaderboard}
};
use std::process::exit;
use thiserror::Error;
use tracing::{error, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
enum ProcessorError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Failed to serialize snapshot: {0}")]
    Serialization(#[from] serde_json::Error)
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level);

    let Some(connection_string) = args.connection_string.as_deref() else {
        error!("CONNECTION_STRING environment variable must be set");
        exit(1);
    };

    let mut client = match DbClient::connect(connection_string).await {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            error!("Application cannot start without a valid database connection");
            exit(1);
        }
    };

    if let Err(e) = run(&mut client, args.command.unwrap_or_default()).await {
        error!("{}", e);
        exit(1);
    }
}

fn init_tracing(log_level: &str) {
    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();
}

async fn run(client: &mut DbClient, command: Command) -> Result<(), ProcessorError> {
    match command {
        Command::Recompute { dry_run: true, as_of } => {
            let input = client.load_ranking_input().await?;
            let snapshot = model::recompute(&input, as_of.unwrap_or_else(now));

            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Recompute { dry_run: false, as_of } => {
            let snapshot = client.recompute_rankings(as_of.unwrap_or_else(now)).await?;

            info!(
                "Rankings as of {}: {} entries across {} divisions",
                snapshot.as_of,
                snapshot.entries.len(),
                snapshot.by_division().len()
            );
        }
        Command::Publish { event_id } => {
            let plan = client.publish_event(event_id).await?;

            info!("Published event {} ({} title changes)", plan.event_id, plan.title_transfers.len());
        }
        Command::Unpublish { event_id } => {
            let plan = client.unpublish_event(event_id).await?;

            info!("Unpublished event {}", plan.event_id);
        }
        Command::Leaderboard => {
            let (entries, competitors, contests) =
                futures::try_join!(client.get_rankings(), client.get_competitors(), client.get_contests())?;

            let snapshot = RankingSnapshot {
                as_of: entries
                    .first()
                    .map_or_else(|| Local::now().date_naive(), |e| e.as_of),
                entries
            };

            print!("{}", leaderboard::render(&snapshot, &competitors, &contests));
        }
    }

    Ok(())
}

fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}
