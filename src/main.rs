use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value};
use sheet_ingest::dataset::{Dataset, resolve_dataset};
use sheet_ingest::extract::{DEFAULT_MAX_ROW, ScanLimits};
use sheet_ingest::io::store::JsonStore;
use sheet_ingest::service::{self, DEFAULT_MAX_BYTES, IngestOptions};
use sheet_ingest::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let store = JsonStore::open(&cli.store)?;
    match cli.command {
        Command::Ingest(args) => {
            if !args.input.exists() {
                return Err(ToolError::MissingInput(args.input));
            }
            let dataset = args.target.resolve()?;
            let bytes = std::fs::read(&args.input)?;
            let options = IngestOptions {
                max_bytes: args.max_bytes,
                limits: ScanLimits {
                    max_row: args.max_rows,
                },
            };
            let summary = service::ingest(&store, &dataset, &bytes, options, Utc::now())?;
            print_json(&summary)
        }
        Command::List(target) => {
            let listing = service::list(&store, &target.resolve()?)?;
            print_json(&listing)
        }
        Command::Edit(args) => {
            let dataset = args.target.resolve()?;
            let update: Map<String, Value> = args
                .set
                .into_iter()
                .map(|(field, value)| (field, Value::String(value)))
                .collect();
            let updated = service::edit(&store, &dataset, &args.code, &update, Utc::now())?;
            print_json(&serde_json::json!({ "updated": updated }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_assignment(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(field, value)| (field.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Load stock and price spreadsheets into a local record store."
)]
struct Cli {
    /// Directory holding one JSON file per dataset.
    #[arg(long, global = true, default_value = "data")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace a dataset with the records read from a spreadsheet.
    Ingest(IngestArgs),
    /// Print the records of a dataset as JSON.
    List(TargetArgs),
    /// Change fields of one record, looked up by code.
    Edit(EditArgs),
}

#[derive(clap::Args)]
struct TargetArgs {
    /// Dataset name: a known depot, "prices", or "personalizado".
    #[arg(long)]
    dataset: String,

    /// Collection name used with the "personalizado" dataset.
    #[arg(long)]
    custom_name: Option<String>,
}

impl TargetArgs {
    fn resolve(&self) -> Result<Dataset> {
        resolve_dataset(&self.dataset, self.custom_name.as_deref())
    }
}

#[derive(clap::Args)]
struct IngestArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Spreadsheet document to read (.xlsx, .xls or .ods).
    #[arg(long)]
    input: PathBuf,

    /// Largest document accepted, in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
    max_bytes: usize,

    /// Last row inspected before a scan is stopped.
    #[arg(long, default_value_t = DEFAULT_MAX_ROW)]
    max_rows: u32,
}

#[derive(clap::Args)]
struct EditArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Current code of the record to edit.
    #[arg(long)]
    code: String,

    /// Field assignment such as `price=1.234,50`; repeatable.
    #[arg(
        long = "set",
        value_name = "FIELD=VALUE",
        value_parser = parse_assignment,
        required = true
    )]
    set: Vec<(String, String)>,
}
