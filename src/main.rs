//! Frequency Backfill CLI
//!
//! Fills the `info` column of pending dictionary words from the lexical
//! frequency service. Supports a continuous run, a single batch, a one-off
//! lookup and a pending-count status check.

use anyhow::Result;
use clap::{Parser, Subcommand};
use frequency_backfill::db::{create_pool_from_env, ping, words, DbPool, PgWordStore};
use frequency_backfill::lookup::{FrequencyLookup, FrequencyLookupClient, LookupConfig};
use frequency_backfill::worker::{BatchProcessor, ContinuousRunner, RunnerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "frequency-backfill")]
#[command(about = "Backfill word frequency metadata from a lexical frequency service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Process batches until no pending words remain
    Run {
        /// Words per batch (default: 1000)
        #[arg(short, long, default_value = "1000")]
        batch_size: usize,

        /// Delay between lookups in milliseconds (default: 200)
        #[arg(short, long, default_value = "200")]
        delay_ms: u64,

        /// Delay between batches in milliseconds (default: 5000)
        #[arg(long, default_value = "5000")]
        batch_delay_ms: u64,

        /// Give up after this many consecutive selection failures (default: retry forever)
        #[arg(long)]
        max_retries: Option<u32>,
    },

    /// Process a single batch and exit
    Once {
        /// Words in the batch (default: 1000)
        #[arg(short, long, default_value = "1000")]
        batch_size: usize,

        /// Delay between lookups in milliseconds (default: 200)
        #[arg(short, long, default_value = "200")]
        delay_ms: u64,
    },

    /// Look up a single word without touching the database
    Lookup {
        /// Word to look up
        #[arg(short, long)]
        word: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how many words are still pending
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run {
            batch_size,
            delay_ms,
            batch_delay_ms,
            max_retries,
        } => {
            let config = RunnerConfig::builder()
                .batch_size(batch_size)
                .per_call_delay_ms(delay_ms)
                .inter_batch_delay_ms(batch_delay_ms)
                .max_selection_retries(max_retries)
                .build();

            with_pool(|pool| async move {
                let runner = connect_runner(pool, config).await?;
                let summary = runner.run().await?;

                println!("\nBackfill complete!");
                println!("  Batches:    {}", summary.batches);
                println!("  Processed:  {}", summary.processed);
                println!("  Success:    {}", summary.success);
                println!("  Errors:     {}", summary.error);
                println!("  Unresolved: {}", summary.unresolved);
                anyhow::Ok(())
            })
            .await?;
        }

        Commands::Once {
            batch_size,
            delay_ms,
        } => {
            let config = RunnerConfig::builder()
                .batch_size(batch_size)
                .per_call_delay_ms(delay_ms)
                .build();

            with_pool(|pool| async move {
                let runner = connect_runner(pool, config).await?;
                let batch = runner.run_once().await?;

                if batch.is_empty() {
                    println!("No pending words found");
                } else {
                    println!(
                        "Batch processed: {} words ({} success, {} error, {} unresolved)",
                        batch.processed, batch.success, batch.error, batch.unresolved
                    );
                }
                anyhow::Ok(())
            })
            .await?;
        }

        Commands::Lookup { word, json } => {
            let client = FrequencyLookupClient::with_config(LookupConfig::from_env())?;
            let info = client.lookup(&word).await.to_info();

            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Word:       {}", word);
                println!("Frequency:  {}", info.frequency.as_deref().unwrap_or("N/A"));
                println!(
                    "Score:      {}",
                    info.score.map(|s| s.to_string()).unwrap_or_else(|| "N/A".to_string())
                );
                println!("Fetched at: {}", info.fetched_at.to_rfc3339());
                if let Some(error) = &info.error {
                    println!("Error:      {}", error);
                }
            }
        }

        Commands::Status => {
            with_pool(|pool| async move {
                let pending = words::count_pending_words(&pool).await?;
                println!("Pending words: {}", pending);
                anyhow::Ok(())
            })
            .await?;
        }
    }

    Ok(())
}

/// Run `f` with a fresh pool, closing the pool on every exit path
async fn with_pool<F, Fut>(f: F) -> Result<()>
where
    F: FnOnce(DbPool) -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    let pool = create_pool_from_env().await?;
    info!("Database connection established");

    let outcome = f(pool.clone()).await;

    pool.close().await;
    info!("Database pool closed");
    outcome
}

/// Check both dependencies and assemble the runner
async fn connect_runner(
    pool: DbPool,
    config: RunnerConfig,
) -> Result<ContinuousRunner<PgWordStore, FrequencyLookupClient>> {
    ping(&pool).await?;

    let client = FrequencyLookupClient::with_config(LookupConfig::from_env())?;
    client.check_connection().await?;
    info!("Lexical service reachable");

    let pending = words::count_pending_words(&pool).await?;
    info!("{} words pending", pending);

    let processor = BatchProcessor::new(PgWordStore::new(pool), client);
    Ok(ContinuousRunner::new(processor, config))
}
