//! CLI administration tool for the dealership backend.
//!
//! Provides commands for managing admin accounts and sessions, viewing
//! statistics, and performing database operations without HTTP access.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin account (prints its one-time recovery code)
//! cargo run --bin admin -- credentials create --username manager
//!
//! # List accounts
//! cargo run --bin admin -- credentials list
//!
//! # Deactivate an account and end its sessions
//! cargo run --bin admin -- credentials deactivate manager
//!
//! # Remove expired sessions
//! cargo run --bin admin -- sessions purge
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_HOST`/`DB_USER`/...): PostgreSQL connection
//! - `SESSION_SIGNING_SECRET`: required by `credentials create`; must match
//!   the server's value or the new password will never verify

use dealership::application::services::AuthService;
use dealership::config::{Config, mask_connection_string};
use dealership::domain::repositories::{
    AdminRepository, BookingRepository, CarRepository, ContactRepository,
};
use dealership::infrastructure::persistence::{
    MIGRATOR, PgAdminRepository, PgBookingRepository, PgCarRepository, PgContactRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the dealership backend.
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
    /// Manage admin accounts
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },

    /// Manage admin sessions
    Sessions {
        #[command(subcommand)]
        action: SessionsAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum CredentialsAction {
    /// Create an admin account
    Create {
        /// Login name
        #[arg(short, long)]
        username: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all admin accounts
    List,

    /// Deactivate an account and end all of its sessions
    Deactivate {
        username: String,
    },
}

#[derive(Subcommand)]
enum SessionsAction {
    /// Delete expired sessions
    Purge,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Credentials { action } => handle_credentials_action(action, &pool).await?,
        Commands::Sessions { action } => handle_sessions_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_credentials_action(action: CredentialsAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgAdminRepository::new(Arc::new(pool.clone())));

    match action {
        CredentialsAction::Create { username, yes } => create_admin(repo, username, yes).await?,
        CredentialsAction::List => list_admins(repo).await?,
        CredentialsAction::Deactivate { username } => deactivate_admin(repo, username).await?,
    }

    Ok(())
}

/// Creates an admin account with interactive prompts.
///
/// The password is read twice without echo. The recovery code is printed
/// once; only its keyed hash is stored.
async fn create_admin(
    repo: Arc<PgAdminRepository>,
    username: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create Admin Account".bright_blue().bold());
    println!();

    let secret = std::env::var("SESSION_SIGNING_SECRET")
        .context("SESSION_SIGNING_SECRET must be set to hash credentials")?;

    let username = match username {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Username")
            .with_initial_text("admin")
            .interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create admin account '{username}'?"))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    // Session TTL is irrelevant here; nothing is issued.
    let auth = AuthService::new(repo, secret, chrono::Duration::hours(1));
    let (admin, recovery_code) = auth
        .create_admin(username.trim(), &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!("{}", "✅ Account created successfully!".green().bold());
    println!();
    println!("  Username:      {}", admin.username.cyan());
    println!("  Recovery code: {}", recovery_code.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Store the recovery code now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    Ok(())
}

/// Lists all admin accounts with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Admin Accounts
///
///   ID  Username             Created              Status
///   ───────────────────────────────────────────────────────
///   1   admin                2026-01-15 10:30     ACTIVE
///   2   former-manager       2026-02-03 09:12     INACTIVE
/// ```
async fn list_admins(repo: Arc<PgAdminRepository>) -> Result<()> {
    println!("{}", "📋 Admin Accounts".bright_blue().bold());
    println!();

    let admins = repo
        .list_credentials()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if admins.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin -- credentials create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(57).bright_black());

    for admin in &admins {
        let status = if admin.is_active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };

        println!(
            "  {:<3} {:<20} {:<20} {}",
            admin.id.to_string().bright_black(),
            admin.username.cyan(),
            admin
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", admins.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deactivates an account after confirmation (default: No).
async fn deactivate_admin(repo: Arc<PgAdminRepository>, username: String) -> Result<()> {
    println!("{}", "🔒 Deactivate Admin Account".bright_blue().bold());
    println!();

    let admin = repo
        .find_by_username(&username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Account not found")?;

    if !admin.is_active {
        println!("{}", "⚠️  This account is already inactive".yellow());
        return Ok(());
    }

    println!("  Account: {}", admin.username.cyan());
    println!("  ID:      {}", admin.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Deactivate this account and end its sessions?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.deactivate(&username)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to deactivate account: {}", e))?;

    println!();
    println!("{}", "✅ Account deactivated".green().bold());
    println!();

    Ok(())
}

async fn handle_sessions_action(action: SessionsAction, pool: &PgPool) -> Result<()> {
    let repo = PgAdminRepository::new(Arc::new(pool.clone()));

    match action {
        SessionsAction::Purge => {
            let removed = repo
                .purge_expired_sessions()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to purge sessions: {}", e))?;

            println!(
                "{} {}",
                "✅ Expired sessions removed:".green().bold(),
                removed.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

/// Displays inventory and inbox statistics.
///
/// Shows:
/// - Number of listings
/// - Bookings per status
/// - Contact messages per status
/// - Testimonials awaiting moderation
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let pool_arc = Arc::new(pool.clone());
    let cars = PgCarRepository::new(pool_arc.clone());
    let bookings = PgBookingRepository::new(pool_arc.clone());
    let messages = PgContactRepository::new(pool_arc);

    let (car_count, booking_counts, message_counts) =
        tokio::try_join!(cars.count(), bookings.count_by_status(), messages.count_by_status())
            .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    let pending_testimonials: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM testimonials WHERE is_approved = FALSE")
            .fetch_one(pool)
            .await?;

    println!(
        "  Listings:              {}",
        car_count.to_string().bright_green().bold()
    );
    println!(
        "  Pending testimonials:  {}",
        pending_testimonials.to_string().bright_green().bold()
    );

    println!();
    println!("  {}", "Bookings".bright_white().bold());
    for (status, count) in &booking_counts {
        println!(
            "    {:<12} {}",
            status.as_str(),
            count.to_string().bright_green().bold()
        );
    }

    println!();
    println!("  {}", "Contact messages".bright_white().bold());
    for (status, count) in &message_counts {
        println!(
            "    {:<12} {}",
            status.as_str(),
            count.to_string().bright_green().bold()
        );
    }
    println!();

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

            let applied: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success = TRUE",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Migrations: {} applied, {} embedded",
                applied.to_string().bright_white(),
                MIGRATOR.iter().count().to_string().bright_white()
            );
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            MIGRATOR
                .run(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "✅ Database schema is up to date".green().bold());
        }
    }

    Ok(())
}
