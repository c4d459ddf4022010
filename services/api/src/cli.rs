use crate::infra::{parse_date, DataSource};
use crate::report::{run_dashboard, run_export};
use crate::server;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use recruitment_map::error::AppError;
use recruitment_map::workflows::recruitment::{
    DateRange, FilterOptions, PositionLevel, PositionStatus, RecruitmentType,
};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Recruitment Map",
    about = "Serve the recruitment dashboard API or inspect and export hiring data from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print dashboard KPIs for the loaded dataset
    Dashboard(DashboardArgs),
    /// Write a positions, candidates, or metrics report to the output directory
    Export(ExportArgs),
}

/// Dataset sources. Without either flag the bundled sample data is loaded.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct DataArgs {
    /// CSV file with one position per row
    #[arg(long)]
    pub(crate) positions_csv: Option<PathBuf>,
    /// CSV file with one candidate per row
    #[arg(long)]
    pub(crate) candidates_csv: Option<PathBuf>,
}

impl DataArgs {
    pub(crate) fn source(&self) -> DataSource {
        DataSource {
            positions_csv: self.positions_csv.clone(),
            candidates_csv: self.candidates_csv.clone(),
        }
    }
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct FilterArgs {
    /// Free-text search over title, code, and department
    #[arg(long, default_value = "")]
    pub(crate) search: String,
    /// Department names (repeat the flag or separate with commas)
    #[arg(long = "department", value_delimiter = ',')]
    pub(crate) departments: Vec<String>,
    /// Position status codes, e.g. open,in_progress
    #[arg(long, value_delimiter = ',', value_parser = parse_code::<PositionStatus>)]
    pub(crate) status: Vec<PositionStatus>,
    /// Recruitment type codes: internal, external
    #[arg(long, value_delimiter = ',', value_parser = parse_code::<RecruitmentType>)]
    pub(crate) recruitment_type: Vec<RecruitmentType>,
    /// Position level codes: strategic, tactical, operational
    #[arg(long, value_delimiter = ',', value_parser = parse_code::<PositionLevel>)]
    pub(crate) position_level: Vec<PositionLevel>,
    /// Earliest opening date (YYYY-MM-DD), inclusive
    #[arg(long, value_parser = parse_date)]
    pub(crate) from: Option<NaiveDate>,
    /// Latest opening date (YYYY-MM-DD), inclusive
    #[arg(long, value_parser = parse_date)]
    pub(crate) to: Option<NaiveDate>,
    /// Reference date for the six-month timeline (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

impl FilterArgs {
    /// `--today`, or the current UTC date like the HTTP routes.
    pub(crate) fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    pub(crate) fn options(&self) -> FilterOptions {
        FilterOptions {
            departments: self.departments.clone(),
            status: self.status.clone(),
            recruitment_type: self.recruitment_type.clone(),
            position_level: self.position_level.clone(),
            date_range: DateRange {
                start: self.from,
                end: self.to,
            },
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the directory exported reports are written to
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    #[command(flatten)]
    pub(crate) data: DataArgs,
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    /// Print the dashboard as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Report kind: positions, candidates, or metrics
    pub(crate) kind: String,
    /// Output format: printable (HTML document) or flat (XLSX workbook)
    #[arg(long, default_value = "printable")]
    pub(crate) format: String,
    /// Override the directory the report is written to
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
}

fn parse_code<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string()))
        .map_err(|_| format!("unrecognized value '{raw}'"))
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Dashboard(args) => run_dashboard(args),
        Command::Export(args) => run_export(args).await,
    }
}
