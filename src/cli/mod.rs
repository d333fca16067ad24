// CLI module for operations that run without the HTTP server

pub mod export_report;
pub mod migrate;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::app_data::AppData;
use crate::config::AppSettings;

/// Contract Monthly Claim System backend
#[derive(Parser)]
#[command(name = "cmcs")]
#[command(about = "Contract Monthly Claim System backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Run database migrations for the database storage backend
    Migrate,

    /// Write a claims report to a JSON file
    ExportReport {
        /// Only claims owned by this user
        #[arg(long)]
        user_id: Option<i32>,

        /// Only claims with this status (case-insensitive)
        #[arg(long)]
        status: Option<String>,

        /// Earliest submission date (inclusive), YYYY-MM-DD
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Latest submission date (inclusive), YYYY-MM-DD
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Output file, or a directory that receives ClaimsReport_<timestamp>.json
        #[arg(long, short, default_value = ".")]
        output: PathBuf,
    },
}

/// Execute a non-server CLI command
///
/// `Serve` is handled by main and is a no-op here.
pub async fn execute_command(
    command: Commands,
    settings: AppSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve => {}
        Commands::Migrate => {
            migrate::run_migrations(&settings).await?;
        }
        Commands::ExportReport {
            user_id,
            status,
            start_date,
            end_date,
            output,
        } => {
            let app_data = AppData::init(settings).await?;
            let filter = crate::services::ReportFilter {
                user_id,
                status,
                start_date,
                end_date,
            };
            export_report::export_report(app_data, filter, &output).await?;
        }
    }

    Ok(())
}
