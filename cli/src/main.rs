mod dashboard;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use maintlog_core::{
    AnalyticsConfig, AnalyticsService, FileRecordSource, MonthSummary, ReportResponse,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maintlog")]
#[command(about = "Monthly maintenance analytics", long_about = None)]
struct Cli {
    /// Maintenance data file (defaults to $MAINTLOG_DATA_FILE or ~/.maintlog/maintenance.json)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Trailing window in months (defaults to $MAINTLOG_WINDOW_MONTHS or 12)
    #[arg(long, global = true)]
    months: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the monthly summary report
    Report {
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
        /// Include every record, ignoring the trailing window
        #[arg(long, conflicts_with = "since")]
        all: bool,
        /// Only include records on or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<NaiveDate>,
    },
    /// Browse the report month by month
    Dashboard,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Table,
}

enum Window {
    Trailing,
    Since(NaiveDate),
    All,
}

fn load_report(service: &AnalyticsService<FileRecordSource>, window: Window) -> Result<Vec<MonthSummary>> {
    match window {
        Window::Trailing => service.monthly_report(Utc::now()),
        Window::Since(date) => {
            let cutoff = date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| anyhow!("Invalid --since date: {}", date))?
                .and_utc();
            service.monthly_report_since(cutoff)
        }
        Window::All => service.full_report(),
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = AnalyticsConfig::from_env()?;
    if let Some(file) = cli.file {
        config.data_file = file;
    }
    if let Some(months) = cli.months {
        config.window_months = months;
    }
    tracing::debug!(?config, "configuration resolved");

    let source = FileRecordSource::new(&config.data_file);
    let service = AnalyticsService::with_window(source, config.window_months);

    match cli.command {
        Commands::Report { format, all, since } => {
            let window = match (all, since) {
                (true, _) => Window::All,
                (false, Some(date)) => Window::Since(date),
                (false, None) => Window::Trailing,
            };
            let result = load_report(&service, window);
            match format {
                Format::Json => {
                    let failed = result.is_err();
                    let response = ReportResponse::from(result);
                    println!("{}", serde_json::to_string_pretty(&response)?);
                    if failed {
                        return Ok(ExitCode::FAILURE);
                    }
                }
                Format::Table => report::show_report(&result?),
            }
        }
        Commands::Dashboard => {
            let summaries = load_report(&service, Window::Trailing)?;
            dashboard::run(summaries)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maintlog=info,maintlog_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
