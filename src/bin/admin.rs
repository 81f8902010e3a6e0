//! CLI administration tool for link-context.
//!
//! Creates, inspects and searches links directly in the configured Postgres
//! store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a link
//! cargo run --bin link-admin -- link new --redirect http://example.com --context demo
//!
//! # Show a link with its visits
//! cargo run --bin link-admin -- link show http://localhost:8000/Xk3_9aQ0bLmZ
//!
//! # Search by context
//! cargo run --bin link-admin -- search '^news'
//!
//! # Check database connection
//! cargo run --bin link-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (`DATABASE_URL` or `DB_*`,
//! `CONTEXT_DOMAIN`, `CONTEXT_PORT`, `APP_ENV`). A database is required.

use link_context::application::services::LinkService;
use link_context::config::{self, Config};
use link_context::domain::entities::Link;
use link_context::infrastructure::persistence::PgLinkRepository;
use link_context::utils::id_generator::IdGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-context.
#[derive(Parser)]
#[command(name = "link-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Search links whose context matches a regular expression
    Search {
        /// Unanchored regular expression
        pattern: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Create a new short link
    New {
        /// Destination URL
        #[arg(short, long)]
        redirect: String,

        /// Context tag
        #[arg(short, long)]
        context: String,

        /// Token generator seed (random if not provided)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show a link and its visits
    Show {
        /// Full short link, e.g. http://localhost:8000/Xk3_9aQ0bLmZ
        link: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL (or DB_USER, DB_PASSWORD, DB_NAME) must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config, pool).await?,
        Commands::Search { pattern } => search(&config, pool, &pattern).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Builds a link service over the Postgres store.
///
/// The server owns the configured seed, so the CLI draws from its own sequence
/// to avoid replaying tokens the server has issued.
fn link_service(config: &Config, pool: PgPool, seed: Option<u64>) -> LinkService<PgLinkRepository> {
    let seed = seed.unwrap_or_else(rand::random);

    LinkService::new(
        Arc::new(PgLinkRepository::new(Arc::new(pool))),
        Arc::new(IdGenerator::new(seed)),
        config.link_base(),
    )
}

async fn handle_link_action(action: LinkAction, config: &Config, pool: PgPool) -> Result<()> {
    match action {
        LinkAction::New {
            redirect,
            context,
            seed,
        } => {
            println!("{}", "🔗 Create Link".bright_blue().bold());
            println!();

            let link = link_service(config, pool, seed)
                .create_link(&redirect, &context)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

            println!("{}", "✅ Link created".green().bold());
            println!("  Link:     {}", link.link.bright_yellow().bold());
            println!("  Redirect: {}", redirect.cyan());
            println!("  Context:  {}", context.cyan());
            println!();
        }
        LinkAction::Show { link } => {
            let found = link_service(config, pool, None)
                .find_by_link(&link)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Link not found")?;

            print_link(&found);

            if !found.visits.is_empty() {
                println!(
                    "  {:<16} {:<10} {}",
                    "IP".bright_white().bold(),
                    "Type".bright_white().bold(),
                    "User-Agent".bright_white().bold()
                );
                println!("  {}", "─".repeat(75).bright_black());

                for visit in &found.visits {
                    println!(
                        "  {:<16} {:<10} {}",
                        visit.ip.as_deref().unwrap_or("-").bright_black(),
                        visit.device_type.as_str().cyan(),
                        visit.user_agent.as_deref().unwrap_or("-")
                    );
                }
                println!();
            }
        }
    }

    Ok(())
}

async fn search(config: &Config, pool: PgPool, pattern: &str) -> Result<()> {
    println!(
        "{} {}",
        "🔍 Links matching".bright_blue().bold(),
        pattern.bright_white()
    );
    println!();

    let links = link_service(config, pool, None)
        .search_by_context(pattern)
        .await
        .map_err(|e| anyhow::anyhow!("Search failed: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    for link in &links {
        print_link(link);
    }

    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

fn print_link(link: &Link) {
    let redirect = match link.redirect {
        Some(ref redirect) => redirect.cyan(),
        None => "(none)".red(),
    };

    println!("  {}", link.link.bright_yellow().bold());
    println!("    Redirect: {}", redirect);
    println!("    Context:  {}", link.context);
    println!(
        "    Clicks:   {}",
        link.clicks.unwrap_or(0).to_string().bright_green()
    );
    println!(
        "    Created:  {}",
        link.created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await
                .context("Connected, but the links table is missing. Start the server once to migrate")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Links: {}", links.to_string().bright_green().bold());
        }
    }

    Ok(())
}
