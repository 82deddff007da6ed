//! Suggestion-catalog seeding tool.
//!
//! `menta-seed seed` upserts the static catalog into the suggestion table
//! (idempotent; append mode unions variants), `purge` empties it, `list`
//! prints what is stored.

use anyhow::Context;
use clap::{Parser, Subcommand};
use menta_core::suggestion::seed;
use menta_core::suggestion::store::{PgSuggestionStore, SuggestionStore};

#[derive(Parser)]
#[command(name = "menta-seed", about = "Seed the suggestion store")]
struct Args {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Upsert the static catalog into the store.
    Seed {
        /// Replace existing suggestions instead of appending.
        #[arg(long)]
        replace: bool,
        /// Also seed alias spellings (angry -> anger etc.).
        #[arg(long)]
        aliases: bool,
    },
    /// Delete every suggestion record.
    Purge,
    /// List stored records.
    List {
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .context("connecting to database")?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let store = PgSuggestionStore::new(pool);
    match args.action {
        Action::Seed { replace, aliases } => {
            let stats = seed::seed(&store, !replace, aliases).await?;
            println!("Seed done. Inserted={} Updated={}", stats.inserted, stats.updated);
        }
        Action::Purge => {
            let purged = store.purge().await?;
            println!("Purged {purged} suggestion records");
        }
        Action::List { limit } => {
            for summary in store.list(limit).await? {
                println!(
                    "{:<16} variants={:<3} category={:<9} language={}",
                    summary.emotion, summary.variants, summary.category, summary.language
                );
            }
        }
    }
    Ok(())
}
