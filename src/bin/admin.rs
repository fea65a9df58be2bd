//! CLI administration tool for link-registry.
//!
//! Works directly against the configured PostgreSQL database, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com
//!
//! # Show visit analytics for a short link
//! cargo run --bin admin -- analytics Xk3_p9aQ
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (`DATABASE_URL` or `DB_*`, `SHORT_ID_LENGTH`,
//! `SHORTEN_MAX_ATTEMPTS`). The in-memory backend is rejected since it would
//! not share state with a running server.

use link_registry::application::services::RegistryService;
use link_registry::config::{self, Config, StorageBackend};
use link_registry::domain::repositories::LinkRepository;
use link_registry::infrastructure::persistence::PgLinkRepository;
use link_registry::server::connect_database;
use link_registry::utils::id_generator::RandomIdGenerator;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// Target URL
        url: String,
    },

    /// Show visit analytics for a short link
    Analytics {
        /// Short identifier
        short_id: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage_backend == StorageBackend::Memory {
        anyhow::bail!("The admin tool requires STORAGE_BACKEND=postgres");
    }

    let pool = connect_database(&config).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply database migrations")?;

    let result = match cli.command {
        Commands::Shorten { url } => handle_shorten(&config, &pool, &url).await,
        Commands::Analytics { short_id } => handle_analytics(&config, &pool, &short_id).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    result
}

fn registry(config: &Config, pool: &PgPool) -> RegistryService<dyn LinkRepository> {
    let repository: Arc<dyn LinkRepository> =
        Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));

    RegistryService::new(
        repository,
        Arc::new(RandomIdGenerator::new(config.short_id_length)),
        config.shorten_max_attempts,
    )
}

/// Creates a short link and prints its identifier.
async fn handle_shorten(config: &Config, pool: &PgPool, url: &str) -> Result<()> {
    let short_id = registry(config, pool)
        .shorten(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "✅ Short link created".green().bold());
    println!("  Target:   {}", url.cyan());
    println!("  Short ID: {}", short_id.bright_yellow().bold());

    Ok(())
}

/// Prints the visit count and every visit timestamp.
///
/// # Output Format
///
/// ```text
/// 📊 Analytics for Xk3_p9aQ
///
///   Total clicks: 2
///
///   #    Visited at
///   1    2026-01-15T10:30:12.345+00:00
///   2    2026-01-15T10:31:40.001+00:00
/// ```
async fn handle_analytics(config: &Config, pool: &PgPool, short_id: &str) -> Result<()> {
    let analytics = registry(config, pool)
        .get_analytics(short_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!(
        "{}",
        format!("📊 Analytics for {}", short_id).bright_blue().bold()
    );
    println!();
    println!(
        "  Total clicks: {}",
        analytics.total_clicks.to_string().bright_green().bold()
    );

    if analytics.events.is_empty() {
        return Ok(());
    }

    println!();
    println!(
        "  {:<4} {}",
        "#".bright_white().bold(),
        "Visited at".bright_white().bold()
    );

    for (index, visit) in analytics.events.iter().enumerate() {
        let visited_at = Utc
            .timestamp_millis_opt(visit.timestamp)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| visit.timestamp.to_string());

        println!(
            "  {:<4} {}",
            (index + 1).to_string().bright_black(),
            visited_at
        );
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Links:      {}", links.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
