//! Queue Router CLI
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────────┐
//!                      │                     QUEUE ROUTER                      │
//!                      │                                                       │
//!    Message batch     │  ┌─────────┐    ┌──────────────┐    ┌─────────────┐  │
//!    ──────────────────┼─▶│ message │───▶│   routing    │───▶│  handlers   │  │
//!                      │  │  batch  │    │ action+path  │    │ (first hit) │  │
//!                      │  └─────────┘    └──────┬───────┘    └──────┬──────┘  │
//!                      │                        │                   │         │
//!    ack / unacked     │                        ▼                   ▼         │
//!    ◀─────────────────┼──────────────── per-message outcome ◀──────┘         │
//!                      │                                                       │
//!                      │  ┌──────────────────────────────────────────────────┐ │
//!                      │  │  config │ observability │ resilience (backoff)   │ │
//!                      │  └──────────────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Commands
//! - `check`: validate a config file and list its routes
//! - `match`: test a path against a pattern
//! - `run`: replay a JSON batch file through the configured routes

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use queue_router::config::{load_config, ObservabilityConfig};
use queue_router::message::{InMemoryMessage, MessageBatch};
use queue_router::observability::{logging, metrics};
use queue_router::routing::{PathPattern, Router};
use queue_router::QueueMessage;

#[derive(Parser)]
#[command(name = "queue-router")]
#[command(about = "Route queue event messages to handlers by action and path pattern", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file and list its routes
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Match a path against a pattern
    Match {
        #[arg(short, long)]
        pattern: String,
        path: String,
    },
    /// Process a JSON batch file through the configured routes
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        batch: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let config = load_config(&config)?;
            logging::init_logging(&config.observability)?;

            let router = Router::from_config(&config.routes, &config.retry)?;
            let routes: Vec<_> = config
                .routes
                .iter()
                .zip(router.routes())
                .map(|(declared, route)| {
                    json!({
                        "name": declared.name,
                        "action": route.action(),
                        "pattern": route.matcher().as_str(),
                        "handler": declared.handler,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "routes": routes }))?);
        }
        Commands::Match { pattern, path } => {
            logging::init_logging(&ObservabilityConfig::default())?;

            let pattern = PathPattern::parse(&pattern)?;
            let result = match pattern.match_path(&path) {
                Some(params) => json!({ "matched": true, "params": params }),
                None => json!({ "matched": false, "params": {} }),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Run { config, batch } => {
            let config = load_config(&config)?;
            logging::init_logging(&config.observability)?;

            tracing::info!(routes = config.routes.len(), "Configuration loaded");

            if config.observability.metrics_enabled {
                let addr: SocketAddr = config.observability.metrics_address.parse()?;
                metrics::init_metrics(addr)?;
            }

            let router = Router::from_config(&config.routes, &config.retry)?;
            let batch = MessageBatch::from_json(&fs::read_to_string(&batch)?)?;
            let summary = router.process_batch(&batch, &(), &()).await;

            println!("{}", serde_json::to_string_pretty(&report(&batch, summary))?);
        }
    }

    Ok(())
}

fn report(batch: &MessageBatch<InMemoryMessage>, summary: queue_router::BatchSummary) -> serde_json::Value {
    let messages: Vec<_> = batch
        .messages()
        .iter()
        .map(|message| {
            json!({
                "id": message.id(),
                "attempts": message.attempts(),
                "settlement": message.state(),
            })
        })
        .collect();

    json!({
        "queue": batch.queue(),
        "summary": summary,
        "messages": messages,
    })
}
