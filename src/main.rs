//! Terminal front end for the TinyLink dashboard.
//!
//! Drives the same stores a graphical dashboard would: the link collection,
//! per-code statistics and the health poller. Notifications raised by the
//! stores are printed once the command finishes.
//!
//! # Usage
//!
//! ```bash
//! # List links, most recently clicked first
//! tinylink list
//!
//! # Search and sort
//! tinylink list --search rust --sort clicks --desc
//!
//! # Create a link with a custom code
//! tinylink create https://www.rust-lang.org --code rustlg
//!
//! # Delete a link without the confirmation prompt
//! tinylink delete rustlg --yes
//!
//! # Per-code statistics
//! tinylink stats rustlg
//!
//! # Poll backend health until Ctrl-C
//! tinylink health --watch
//! ```
//!
//! # Environment Variables
//!
//! See [`tinylink_dashboard::config`]; a `.env` file is honored.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::process::ExitCode;

use tinylink_dashboard::application::{
    EmptyState, NotificationKind, ResourceStatus, SortDirection, SortKey, SortSpec, derive_view,
};
use tinylink_dashboard::application::health_poller::HealthResource;
use tinylink_dashboard::config;
use tinylink_dashboard::domain::entities::NewLink;
use tinylink_dashboard::state::AppState;
use tinylink_dashboard::telemetry;
use tinylink_dashboard::utils::format::format_timestamp;

/// Client for a TinyLink backend.
#[derive(Parser)]
#[command(name = "tinylink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log the loaded configuration before running
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List links
    List {
        /// Case-insensitive filter on code or target URL
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort column: code, clicks or last-clicked
        #[arg(long)]
        sort: Option<SortKey>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Create a short link
    Create {
        /// Target URL (http or https)
        url: String,

        /// Custom code, 6-8 alphanumeric characters
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a link
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics for one code
    Stats { code: String },

    /// Show backend health
    Health {
        /// Keep polling until interrupted
        #[arg(short, long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    telemetry::init(&config);
    if cli.verbose {
        config.print_summary();
    }

    let state = AppState::from_config(&config)?;

    let ok = match cli.command {
        Commands::List { search, sort, desc } => {
            let spec = match sort {
                Some(key) if desc => SortSpec::new(key, SortDirection::Descending),
                Some(key) => SortSpec::ascending(key),
                None => SortSpec::default(),
            };
            list_links(&state, &search, spec).await
        }
        Commands::Create { url, code } => create_link(&state, url, code).await,
        Commands::Delete { code, yes } => delete_link(&state, &code, yes).await?,
        Commands::Stats { code } => show_stats(&state, &code).await,
        Commands::Health { watch } => show_health(&state, watch).await?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Prints the pending notification, if any.
fn print_notification(state: &AppState) {
    if let Some(notification) = state.notifications.current() {
        match notification.kind {
            NotificationKind::Success => println!("{}", notification.message.green().bold()),
            NotificationKind::Error => println!("{}", notification.message.red().bold()),
        }
    }
}

/// Loads the collection and prints the filtered, sorted table.
///
/// # Output Format
///
/// ```text
/// Links (sorted by totalClicks, descending)
///
///   Code      Clicks  Last clicked             Short URL / Target
///   ─────────────────────────────────────────────────────────────────────
///   rustlg        12  2024-01-15 10:30:00 UTC  http://localhost:3000/rustlg
///                                              https://www.rust-lang.org
/// ```
async fn list_links(state: &AppState, search: &str, sort: SortSpec) -> bool {
    state.links.load().await;
    let snapshot = state.links.snapshot();

    if snapshot.status == ResourceStatus::Failed {
        let message = snapshot.error.unwrap_or_default();
        println!("{}", message.red().bold());
        return false;
    }

    let direction = match sort.direction {
        SortDirection::Ascending => "ascending",
        SortDirection::Descending => "descending",
    };
    println!(
        "{}",
        format!("Links (sorted by {}, {direction})", sort.key)
            .bright_blue()
            .bold()
    );
    println!();

    let view = derive_view(&snapshot.links, search, sort);
    if let Some(empty) = EmptyState::classify(snapshot.links.len(), view.len()) {
        println!("  {}", empty.message().yellow());
        return true;
    }

    println!(
        "  {:<9} {:>6}  {:<23}  {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Last clicked".bright_white().bold(),
        "Short URL / Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &view {
        println!(
            "  {:<9} {:>6}  {:<23}  {}",
            link.code.cyan(),
            link.total_clicks,
            format_timestamp(link.last_clicked_time.as_ref()).bright_black(),
            link.short_url(&state.public_base_url).bright_white()
        );
        println!("  {:<42}{}", "", link.target_url.bright_black());
    }

    println!();
    println!(
        "  Showing {} of {}",
        view.len().to_string().bright_white().bold(),
        snapshot.links.len()
    );

    true
}

async fn create_link(state: &AppState, url: String, code: Option<String>) -> bool {
    let result = state.links.create(NewLink::new(url, code)).await;
    print_notification(state);

    match result {
        Ok(link) => {
            println!();
            println!("  Short URL: {}", state.short_url(&link.code).bright_yellow().bold());
            println!("  Target:    {}", link.target_url.cyan());
            true
        }
        Err(_) => false,
    }
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(state: &AppState, code: &str, skip_confirm: bool) -> Result<bool> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete link {code}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(true);
        }
    }

    let result = state.links.delete(code).await;
    print_notification(state);
    Ok(result.is_ok())
}

async fn show_stats(state: &AppState, code: &str) -> bool {
    state.stats.load(code).await;
    let resource = state.stats.snapshot();

    let Some(stats) = resource.data() else {
        let message = resource.error().unwrap_or("Failed to load link statistics.");
        println!("{}", message.red().bold());
        return false;
    };

    let link = &stats.link;
    println!("{}", format!("Statistics for {}", link.code).bright_blue().bold());
    println!();
    println!("  Short URL:    {}", state.short_url(&link.code).bright_yellow());
    println!("  Target:       {}", link.target_url.cyan());
    println!(
        "  Total clicks: {}",
        link.total_clicks.to_string().bright_green().bold()
    );
    println!(
        "  Last clicked: {}",
        format_timestamp(link.last_clicked_time.as_ref())
    );
    println!("  Created:      {}", format_timestamp(Some(&link.created_at)));

    for (key, value) in &stats.analytics {
        println!("  {key}: {value}");
    }
    println!();

    true
}

/// Renders one health resource.
fn render_health(resource: &HealthResource) -> bool {
    match (resource.status(), resource.data()) {
        (ResourceStatus::Succeeded, Some(health)) => {
            let status = if health.ok {
                "HEALTHY".green().bold()
            } else {
                "UNHEALTHY".red().bold()
            };
            let database = if health.database_connected() {
                health.database_status.green()
            } else {
                health.database_status.red()
            };

            println!("{}", "Backend health".bright_blue().bold());
            println!("  Status:      {status}");
            println!("  Database:    {database}");
            println!("  Uptime:      {}", health.uptime_display());
            println!("  Version:     {}", health.version.bright_white());
            println!("  Environment: {}", health.environment.bright_white());
            println!();
            health.ok
        }
        _ => {
            let message = resource.error().unwrap_or("Health status unavailable.");
            println!("{}", message.red().bold());
            false
        }
    }
}

/// Shows the first health result, or every result until Ctrl-C with `watch`.
async fn show_health(state: &AppState, watch: bool) -> Result<bool> {
    let poller = state.mount_health_poller();
    let mut updates = poller.subscribe();
    let mut healthy = false;

    let current = updates.borrow_and_update().clone();
    if current.status().is_terminal() {
        healthy = render_health(&current);
        if !watch {
            poller.teardown();
            return Ok(healthy);
        }
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                changed?;
                let resource = updates.borrow_and_update().clone();
                if !resource.status().is_terminal() {
                    continue;
                }
                healthy = render_health(&resource);
                if !watch {
                    break;
                }
            }
        }
    }

    poller.teardown();
    Ok(healthy)
}
