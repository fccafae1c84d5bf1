//! CLI interface and argument parsing
//!
//! This module provides the local runner for Stratus using clap. Every
//! deployed function can be driven from the command line against real
//! AWS and database endpoints, which keeps ad-hoc operation and
//! debugging out of the Lambda console.

pub mod commands;

use clap::{Parser, Subcommand};

/// Stratus - serverless weather data pipeline
#[derive(Parser, Debug)]
#[command(name = "stratus")]
#[command(version, about, long_about = None)]
#[command(author = "Stratus Contributors")]
pub struct Cli {
    /// Path to configuration file; missing file falls back to defaults
    /// plus STRATUS_* environment overrides
    #[arg(short, long, default_value = "stratus.toml", env = "STRATUS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "STRATUS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the configuration
    ValidateConfig(commands::validate::ValidateArgs),

    /// Apply the relational schema
    Migrate(commands::migrate::MigrateArgs),

    /// Fetch one city's current observation and stage it
    Fetch(commands::fetch::FetchArgs),

    /// Normalize one staged observation into the relational store
    Load(commands::load::LoadArgs),

    /// Run a column-selected CSV export and print the download link
    Export(commands::export::ExportArgs),

    /// Dispatch one fetch per tracked city
    Invoke(commands::invoke::InvokeArgs),

    /// Stage historical observations for one city, day by day
    Backfill(commands::backfill::BackfillArgs),
}
