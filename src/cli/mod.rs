//! CLI module for the guideline RAG service
//!
//! Subcommands:
//! - `serve`: web form and JSON API (default)
//! - `index`: build the document store cache without serving

pub mod index;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Summaries of clinical guideline recommendations, grounded in a CSV corpus
#[derive(Parser)]
#[command(name = "guideline-rag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the web form and JSON API (default mode)
    Serve,

    /// Embed the corpus and write the document store cache
    Index(index::IndexArgs),
}

/// `.env`, layered configuration and logging; shared by every subcommand
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}
