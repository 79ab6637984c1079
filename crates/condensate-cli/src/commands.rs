//! Command implementations for the condensate CLI.
//!
//! Handles:
//! - settings: load config layers and apply CLI overrides
//! - ingest / learnings / recall / memories / stats: one client call each
//! - status: print the configured endpoint and probe the store

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::{debug, info};

use condensate_client::{filter_assertions, ClientConfig, CondensateClient};
use condensate_types::{Assertion, EpisodicItem, MemoryRecord, Settings, StoreStats};

use crate::cli::{Cli, Commands};

/// Load settings and apply CLI overrides (highest precedence).
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    Ok(apply_overrides(cli, settings))
}

/// Apply global CLI flags on top of already loaded settings.
pub fn apply_overrides(cli: &Cli, mut settings: Settings) -> Settings {
    if let Some(url) = &cli.url {
        settings.url = url.clone();
    }
    if let Some(api_key) = &cli.api_key {
        settings.api_key = api_key.clone();
    }
    if let Some(log_level) = &cli.log_level {
        settings.log_level = log_level.clone();
    }

    settings
}

/// Initialize logging to stderr.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(log_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}

/// Build a client from settings.
pub fn build_client(settings: &Settings) -> Result<CondensateClient> {
    CondensateClient::new(ClientConfig::from_settings(settings))
        .with_context(|| format!("Failed to create client for {}", settings.url))
}

/// Run a parsed command against the configured store.
pub async fn run(cli: Cli, settings: &Settings) -> Result<()> {
    let client = build_client(settings)?;

    match cli.command {
        Commands::Ingest {
            text,
            project,
            source,
            occurred_at,
            meta,
        } => {
            let project_id = resolve_project(project, settings)?;
            let mut item = EpisodicItem::new(project_id, source, text.join(" "));
            if let Some(occurred_at) = occurred_at {
                item = item.with_occurred_at(occurred_at);
            }
            if !meta.is_empty() {
                item = item.with_metadata(metadata_from_pairs(meta));
            }

            println!("Ingesting memory...");
            client
                .add_item(&item)
                .await
                .context("Failed to ingest item")?;
            println!("Success: memory queued for project {}", item.project_id);
        }
        Commands::Learnings { query, limit, json } => {
            let query = query.join(" ");
            let assertions = match limit {
                // The server cap applies before filtering
                Some(limit) => {
                    let all = client.list_assertions(Some(limit)).await?;
                    filter_assertions(all, &query)
                }
                None => client.query_assertions(&query).await?,
            };
            debug!(count = assertions.len(), "Fetched learnings");

            if json {
                println!("{}", serde_json::to_string_pretty(&assertions)?);
            } else {
                print!("{}", format_assertions(&assertions));
            }
        }
        Commands::Recall { query, project } => {
            let project_id = resolve_project(project, settings)?;
            let query = query.join(" ");
            println!("Recalling: {}", query);

            let response = client
                .recall(&project_id, &query)
                .await
                .context("Failed to retrieve")?;

            let answer = if response.answer.is_empty() {
                "No response"
            } else {
                response.answer.as_str()
            };
            println!("\nAnswer: {}", answer);
            if !response.strategy.is_empty() {
                println!("Strategy: {}", response.strategy);
            }
            for source in &response.sources {
                println!("  - {}", source);
            }
        }
        Commands::Memories { limit, json } => {
            let memories = client.list_memories(Some(limit)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&memories)?);
            } else {
                print!("{}", format_memories(&memories));
            }
        }
        Commands::Stats => {
            let stats = client.stats().await?;
            print!("{}", format_stats(&stats));
        }
        Commands::Status => {
            println!("API Endpoint: {}", settings.url);
            println!(
                "API Key: {}",
                if settings.api_key.is_empty() {
                    "(not set)"
                } else {
                    "***"
                }
            );
            let stats = client.stats().await.context("Status: Unreachable")?;
            info!(memories = stats.total_memories, "Store reachable");
            println!("Status: Operational");
            println!(
                "Memories: {}  Learnings: {}",
                stats.total_memories, stats.total_learnings
            );
        }
    }

    Ok(())
}

/// Pick the project from the flag, falling back to settings.
fn resolve_project(flag: Option<String>, settings: &Settings) -> Result<String> {
    flag.or_else(|| settings.project_id.clone())
        .filter(|p| !p.trim().is_empty())
        .context("No project id: pass --project or set CONDENSATE_PROJECT_ID")
}

/// Metadata values that parse as JSON keep their type; everything else is a string.
fn metadata_from_pairs(pairs: Vec<(String, String)>) -> HashMap<String, serde_json::Value> {
    pairs
        .into_iter()
        .map(|(key, raw)| {
            let value = serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw));
            (key, value)
        })
        .collect()
}

fn format_assertions(assertions: &[Assertion]) -> String {
    if assertions.is_empty() {
        return "No learnings found.\n".to_string();
    }
    let mut out = format!("{} learning(s):\n", assertions.len());
    for a in assertions {
        out.push_str(&format!(
            "  {:<12} {:>5.2}  {:<11} {}\n",
            a.id,
            a.confidence,
            a.status,
            a.display_text()
        ));
    }
    out
}

fn format_memories(memories: &[MemoryRecord]) -> String {
    if memories.is_empty() {
        return "No memories found.\n".to_string();
    }
    let mut out = format!("{} memory record(s):\n", memories.len());
    for m in memories {
        let preview: String = m.content.chars().take(80).collect();
        out.push_str(&format!(
            "  {}  [{}] {} {}\n",
            m.id, m.source, m.created_at, preview
        ));
    }
    out
}

fn format_stats(stats: &StoreStats) -> String {
    format!(
        "Projects:       {}\n\
         Memories:       {}\n\
         Learnings:      {}\n\
         Pending review: {}\n\
         Entities:       {}\n\
         Relations:      {}\n\
         API keys:       {}\n",
        stats.total_projects,
        stats.total_memories,
        stats.total_learnings,
        stats.pending_review,
        stats.total_entities,
        stats.total_relations,
        stats.total_keys
    )
}
