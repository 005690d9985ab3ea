//! CLI entry point for the transit equity tool.
//!
//! Provides subcommands for computing stop-level metrics, redistributing
//! service changes onto census tracts, summarizing the network catchment,
//! and exporting tract outlines for plotting.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use transit_equity::{
    config::AnalysisConfig,
    departures::PeakHours,
    loader::{load_departures, load_stops, load_tracts},
    model::{CensusTract, Stop},
    output::{print_json, write_json, write_records},
    pipeline::{catchment_summary, stop_metrics, tract_metrics, tract_outlines},
};

#[derive(Parser)]
#[command(name = "transit_equity")]
#[command(about = "Stop and census-tract level transit equity metrics", long_about = None)]
struct Cli {
    /// JSON analysis config; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Peak window as `start,end` hours, overriding the config
    #[arg(long, global = true)]
    peak_hours: Option<PeakHours>,

    /// Significance threshold for impact classification, overriding the config
    #[arg(long, global = true)]
    threshold: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct StopInputs {
    /// Stops CSV with `stop_id,x,y,impact`
    #[arg(long, default_value = "stops.csv")]
    stops: String,

    /// Census tracts JSON
    #[arg(long, default_value = "tracts.json")]
    tracts: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute departures, demographics and impact class per stop
    Stops {
        #[command(flatten)]
        inputs: StopInputs,

        /// GTFS stop_times file with `stop_id` and `departure_time`
        #[arg(long, default_value = "stop_times.txt")]
        departures: String,

        /// CSV file to write results to
        #[arg(short, long, default_value = "stop_metrics.csv")]
        output: String,
    },
    /// Redistribute stop impacts onto census tracts
    Tracts {
        #[command(flatten)]
        inputs: StopInputs,

        /// CSV file to write results to
        #[arg(short, long, default_value = "tract_metrics.csv")]
        output: String,
    },
    /// Summarize demographics over the union of all stop buffers
    Catchment {
        #[command(flatten)]
        inputs: StopInputs,

        /// Optional: JSON file to write the summary to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Export tract outlines as x/y coordinate lists for plotting
    Outline {
        /// Census tracts JSON
        #[arg(long, default_value = "tracts.json")]
        tracts: String,

        /// JSON file to write outlines to
        #[arg(short, long, default_value = "tract_outlines.json")]
        output: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/transit_equity.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("transit_equity.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = AnalysisConfig::load_or_default(cli.config.as_deref())?
        .with_overrides(cli.peak_hours, cli.threshold);
    info!(?config, "Analysis config loaded");

    match cli.command {
        Commands::Stops {
            inputs,
            departures,
            output,
        } => {
            let (stops, tracts) = load_inputs(&inputs, &config)?;
            let departures = load_departures(&departures)?;

            let rows = stop_metrics(&stops, &departures, &tracts, &config)?;
            write_records(&output, &rows)?;
            info!(output = %output, rows = rows.len(), "Stop metrics written");
        }
        Commands::Tracts { inputs, output } => {
            let (stops, tracts) = load_inputs(&inputs, &config)?;

            let rows = tract_metrics(&tracts, &stops);
            write_records(&output, &rows)?;
            info!(output = %output, rows = rows.len(), "Tract metrics written");
        }
        Commands::Catchment { inputs, output } => {
            let (stops, tracts) = load_inputs(&inputs, &config)?;

            let summary = catchment_summary(&stops, &tracts, &config)?;
            match output {
                Some(path) => {
                    write_json(&path, &summary)?;
                    info!(output = %path, "Catchment summary written");
                }
                None => print_json(&summary)?,
            }
        }
        Commands::Outline { tracts, output } => {
            let tracts = load_tracts(&tracts)?;

            let outlines = tract_outlines(&tracts)?;
            write_json(&output, &outlines)?;
            info!(output = %output, tracts = outlines.len(), "Tract outlines written");
        }
    }

    Ok(())
}

/// Loads stops (buffered per the config) and census tracts.
#[tracing::instrument(skip_all, fields(stops = %inputs.stops, tracts = %inputs.tracts))]
fn load_inputs(
    inputs: &StopInputs,
    config: &AnalysisConfig,
) -> Result<(Vec<Stop>, Vec<CensusTract>)> {
    let stops = load_stops(&inputs.stops, config.buffer_radius, config.buffer_segments)?;
    let tracts = load_tracts(&inputs.tracts)?;
    info!(stops = stops.len(), tracts = tracts.len(), "Inputs loaded");
    Ok((stops, tracts))
}
