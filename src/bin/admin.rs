//! CLI administration tool for affiliate-linker.
//!
//! Converts messages by hand, inspects the mapping file, and lists the
//! registered platforms without running the main binary.
//!
//! # Usage
//!
//! ```bash
//! # Convert a message (prompts if TEXT is omitted)
//! cargo run --bin admin -- convert "Deal: https://amzn.to/abc123"
//!
//! # Try a conversion without touching the mapping file
//! cargo run --bin admin -- convert --dry-run "https://www.flipkart.com/item/p/xyz"
//!
//! # Mapping counts per network
//! cargo run --bin admin -- stats
//!
//! # Inspect mappings
//! cargo run --bin admin -- mappings list --network earnpe --limit 10
//! cargo run --bin admin -- mappings show Ab12Cd34
//! cargo run --bin admin -- mappings clear
//!
//! # Registered platforms
//! cargo run --bin admin -- platforms
//! ```
//!
//! # Environment Variables
//!
//! - `AMAZON_TAG`, `EARNPE_ID`, `EARNKARO_ID`: required by `convert` (at least one)
//! - `MAPPINGS_PATH`: mapping file location (default: `url_mappings.json`)

use affiliate_linker::application::services::{LinkConverter, MappingStore};
use affiliate_linker::config::{self, Config};
use affiliate_linker::domain::entities::{ConversionRecord, Network};
use affiliate_linker::domain::registry::PlatformRegistry;
use affiliate_linker::domain::repositories::MappingRepository;
use affiliate_linker::infrastructure::persistence::{
    JsonFileMappingRepository, NullMappingRepository,
};
use affiliate_linker::telemetry::init_tracing;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;

/// CLI tool for managing affiliate-linker.
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
    /// Convert the links in a message
    Convert {
        /// Message text (prompted for if omitted)
        text: Option<String>,

        /// Do not load or save the mapping file
        #[arg(long)]
        dry_run: bool,
    },

    /// Show stored mapping counts
    Stats,

    /// Inspect or clear stored mappings
    Mappings {
        #[command(subcommand)]
        action: MappingsAction,
    },

    /// List registered platforms
    Platforms,
}

/// Mapping file subcommands.
#[derive(Subcommand)]
enum MappingsAction {
    /// List stored mappings, newest first
    List {
        /// Only show one network (amazon, earnpe, earnkaro)
        #[arg(short, long, value_parser = parse_network)]
        network: Option<Network>,

        /// Maximum number of rows
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show one mapping in full
    Show {
        /// Short code
        code: String,
    },

    /// Delete every stored mapping
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { text, dry_run } => handle_convert(text, dry_run).await?,
        Commands::Stats => handle_stats().await?,
        Commands::Mappings { action } => handle_mappings_action(action).await?,
        Commands::Platforms => handle_platforms(),
    }

    Ok(())
}

fn parse_network(s: &str) -> Result<Network, String> {
    Network::parse(s).ok_or_else(|| format!("unknown network '{s}'"))
}

/// Opens the mapping file named by the environment.
fn mapping_repository() -> Result<Arc<JsonFileMappingRepository>> {
    let config = Config::from_env().context("Failed to read configuration")?;
    Ok(Arc::new(JsonFileMappingRepository::new(config.mappings_path)))
}

/// Converts one message and prints the result.
async fn handle_convert(text: Option<String>, dry_run: bool) -> Result<()> {
    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config);

    let text = match text {
        Some(t) => t,
        None => Input::new().with_prompt("Message").interact_text()?,
    };

    println!("{}", "🔗 Convert Links".bright_blue().bold());
    println!();

    let (output, delta) = if dry_run {
        println!("{}", "⚠️  Dry run: mapping file is not touched".yellow());
        println!();
        let repo = Arc::new(NullMappingRepository::new());
        let mut converter = LinkConverter::initialize(config.ids.clone(), repo).await;
        let report = converter.convert_all(&text).await;
        (report.text, report.delta)
    } else {
        let repo = Arc::new(JsonFileMappingRepository::new(&config.mappings_path));
        let mut converter = LinkConverter::initialize(config.ids.clone(), repo).await;
        let report = converter.convert_all(&text).await;
        (report.text, report.delta)
    };

    println!("{}", "Result:".bright_white().bold());
    println!("  {}", output.cyan());
    println!();
    println!(
        "  Converted: {} (amazon {}, earnpe {}, earnkaro {})",
        delta.total.to_string().bright_green().bold(),
        delta.amazon,
        delta.earnpe,
        delta.earnkaro
    );
    println!();

    Ok(())
}

/// Displays stored mapping counts and registry size.
async fn handle_stats() -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = mapping_repository()?;
    let store = load_store(repo.as_ref()).await?;
    let counts = store.count_by_network();
    let platforms = PlatformRegistry::new().platform_counts();

    for network in Network::ALL {
        println!(
            "  {:<10} {}",
            format!("{network}:"),
            counts
                .get(&network)
                .copied()
                .unwrap_or(0)
                .to_string()
                .bright_green()
                .bold()
        );
    }
    println!(
        "  {:<10} {}",
        "Total:",
        store.len().to_string().bright_white().bold()
    );
    println!();
    println!(
        "  Platforms: {} earnpe, {} earnkaro",
        platforms.earnpe.to_string().cyan(),
        platforms.earnkaro.to_string().cyan()
    );
    println!();

    Ok(())
}

/// Loads the mapping store, failing loudly on an unreadable file.
///
/// The converter treats a corrupt file as empty; the admin tool reports it
/// instead so that `clear` is never run on a file nobody has looked at.
async fn load_store(repo: &JsonFileMappingRepository) -> Result<MappingStore> {
    repo.load().await.with_context(|| {
        format!("Failed to read mapping file {}", repo.path().display())
    })?;
    Ok(MappingStore::load(repo).await)
}

/// Dispatches mapping file commands.
async fn handle_mappings_action(action: MappingsAction) -> Result<()> {
    let repo = mapping_repository()?;

    match action {
        MappingsAction::List { network, limit } => list_mappings(&repo, network, limit).await?,
        MappingsAction::Show { code } => show_mapping(&repo, &code).await?,
        MappingsAction::Clear { yes } => clear_mappings(&repo, yes).await?,
    }

    Ok(())
}

/// Lists stored mappings, newest first.
///
/// # Output Format
///
/// ```text
/// 📋 Mappings
///
///   Code      Network   Platform    Created           Original URL
///   ───────────────────────────────────────────────────────────────────
///   Ab12Cd34  earnpe    nykaa       2025-01-15 10:30  https://www.nykaa.com/...
/// ```
async fn list_mappings(
    repo: &JsonFileMappingRepository,
    network: Option<Network>,
    limit: usize,
) -> Result<()> {
    println!("{}", "📋 Mappings".bright_blue().bold());
    println!();

    let store = load_store(repo).await?;
    let mut records: Vec<&ConversionRecord> = store
        .records()
        .filter(|r| network.is_none_or(|n| r.network == n))
        .collect();

    if records.is_empty() {
        println!("{}", "  No mappings found".yellow());
        return Ok(());
    }

    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    println!(
        "  {:<9} {:<9} {:<11} {:<17} {}",
        "Code".bright_white().bold(),
        "Network".bright_white().bold(),
        "Platform".bright_white().bold(),
        "Created".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for record in records.iter().take(limit) {
        println!(
            "  {:<9} {:<9} {:<11} {:<17} {}",
            record.short_code.cyan(),
            record.network.to_string(),
            record.platform,
            format_timestamp(record.created_at).bright_black(),
            truncate(&record.original_url, 60)
        );
    }

    println!();
    println!(
        "  Showing {} of {}",
        records.len().min(limit).to_string().bright_white().bold(),
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Shows every field of one mapping.
async fn show_mapping(repo: &JsonFileMappingRepository, code: &str) -> Result<()> {
    let store = load_store(repo).await?;
    let record = store.get(code).context("Mapping not found")?;

    println!("{}", "🔎 Mapping".bright_blue().bold());
    println!();
    println!("  Code:      {}", record.short_code.cyan());
    println!("  Network:   {}", record.network);
    println!("  Platform:  {}", record.platform);
    println!("  Id:        {}", record.affiliate_id);
    if let Some(region) = record.region {
        println!("  Region:    {}", region.as_str());
    }
    println!("  Created:   {}", format_timestamp(record.created_at));
    println!("  Original:  {}", record.original_url);
    if let Some(url) = &record.affiliate_url {
        println!("  Affiliate: {}", url.bright_yellow());
    }
    println!();

    Ok(())
}

/// Deletes every mapping after confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Short links already shared stop resolving once their mapping is gone
async fn clear_mappings(repo: &JsonFileMappingRepository, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Clear Mappings".bright_blue().bold());
    println!();

    let mut store = load_store(repo).await?;
    if store.is_empty() {
        println!("{}", "  Nothing to clear".yellow());
        return Ok(());
    }

    println!(
        "  {} mappings in {}",
        store.len().to_string().bright_white().bold(),
        repo.path().display()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all mappings?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    store.clear();
    store
        .save(repo)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to save mapping file: {}", e))?;

    println!();
    println!("{}", "✅ Mappings cleared".green().bold());
    println!();

    Ok(())
}

/// Prints the registered platforms grouped by network.
fn handle_platforms() {
    println!("{}", "🏬 Platforms".bright_blue().bold());

    let registry = PlatformRegistry::new();
    for network in Network::ALL {
        println!();
        println!("  {}", network.to_string().bright_white().bold());
        for rule in registry.rules().filter(|r| r.network == network) {
            println!(
                "    {:<20} {:<11} {:<19} {}",
                rule.domain.cyan(),
                rule.platform,
                rule.kind.to_string().bright_black(),
                rule.alias
            );
        }
    }
    println!();
}

fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{head}...")
}
