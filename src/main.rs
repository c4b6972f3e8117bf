//! CLI entry point for the attainment map renderer.
//!
//! Provides subcommands for rendering the county choropleth to SVG, printing
//! its legend, and previewing the hover display for a single county.

use anyhow::{Context, Result};
use attainment_map::{
    choropleth::{InteractionHandler, PointerEvent},
    config::MapConfig,
    data::{DatasetLoader, Datasets},
    fetch::BasicClient,
    map::{ChoroplethMap, SvgTarget, render_to_file},
    output::{print_json, print_pretty, write_attributes_csv},
};
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "attainment_map")]
#[command(about = "Render U.S. county educational attainment as a choropleth map", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Data sources and classification, overriding the environment.
#[derive(Args)]
struct SourceArgs {
    /// Education dataset: URL or local path
    #[arg(long, value_name = "FILE_OR_URL")]
    education: Option<String>,

    /// County topology: URL or local path
    #[arg(long, value_name = "FILE_OR_URL")]
    topology: Option<String>,

    /// Number of color classes (3 to 9)
    #[arg(long)]
    buckets: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch both datasets and write the map as SVG
    Render {
        #[command(flatten)]
        sources: SourceArgs,

        /// SVG file to write
        #[arg(short, long, default_value = "map.svg")]
        output: PathBuf,

        /// Optional: CSV file to write per-county render attributes to
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Log a JSON summary of the render
        #[arg(long, default_value_t = false)]
        summary: bool,

        /// Gzip compress the SVG output
        #[arg(long, default_value_t = false)]
        gzip: bool,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<f64>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<f64>,
    },
    /// Print the legend classes and axis labels
    Legend {
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Show what hovering over a county would display
    Tooltip {
        /// County FIPS code
        fips: u32,

        /// Pointer x position
        #[arg(long, default_value_t = 0.0)]
        x: f64,

        /// Pointer y position
        #[arg(long, default_value_t = 0.0)]
        y: f64,

        #[command(flatten)]
        sources: SourceArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/attainment_map.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("attainment_map.log"));

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
    let mut config = MapConfig::from_env()?;

    match cli.command {
        Commands::Render {
            sources,
            output,
            csv,
            summary,
            gzip,
            width,
            height,
        } => {
            sources.apply(&mut config);
            if let Some(width) = width {
                config.width = width;
            }
            if let Some(height) = height {
                config.height = height;
            }
            render(&config, &output, csv.as_deref(), summary, gzip).await?;
        }
        Commands::Legend { sources } => {
            sources.apply(&mut config);
            let map = ChoroplethMap::build(load(&config).await?, config.bucket_count)?;

            for (bucket, swatch) in map.legend.swatches.iter().enumerate() {
                info!(
                    bucket,
                    color = %swatch.color,
                    lower = swatch.lower_bound,
                    upper = swatch.upper_bound,
                    "Legend class"
                );
            }
            let labels: Vec<&str> = map.legend.ticks.iter().map(|t| t.label.as_str()).collect();
            info!(ticks = ?labels, "Legend axis");
        }
        Commands::Tooltip { fips, x, y, sources } => {
            sources.apply(&mut config);
            let map = ChoroplethMap::build(load(&config).await?, config.bucket_count)?;

            let mut handler = InteractionHandler::new(&map.index);
            let update = handler.handle(PointerEvent::Move { region_id: fips, x, y });
            match &update.tooltip {
                Some(tooltip) => info!(
                    text = %tooltip.text,
                    left = tooltip.left,
                    top = tooltip.top,
                    "Tooltip"
                ),
                None => warn!(fips, "No attainment data for county"),
            }
            info!("{}", serde_json::to_string_pretty(&update)?);
        }
    }

    Ok(())
}

impl SourceArgs {
    fn apply(self, config: &mut MapConfig) {
        if let Some(education) = self.education {
            config.education_url = education;
        }
        if let Some(topology) = self.topology {
            config.topology_url = topology;
        }
        if let Some(buckets) = self.buckets {
            config.bucket_count = buckets;
        }
    }
}

/// Builds a loader for the configured sources with the configured timeouts.
fn loader(config: &MapConfig) -> Result<DatasetLoader<BasicClient>> {
    let client = BasicClient::new(
        Duration::from_secs(config.timeout_secs),
        Duration::from_secs(config.connect_timeout_secs),
    )?;
    Ok(DatasetLoader::new(
        client,
        &config.education_url,
        &config.topology_url,
    ))
}

/// Fetches both datasets.
async fn load(config: &MapConfig) -> Result<Datasets> {
    loader(config)?.load().await
}

/// Runs the full pipeline. If anything before the map is drawn fails, the
/// error document is written to `output` instead and the error is returned.
#[tracing::instrument(skip(config, csv), fields(output = %output.display()))]
async fn render(
    config: &MapConfig,
    output: &Path,
    csv: Option<&Path>,
    summary: bool,
    gzip: bool,
) -> Result<()> {
    let target = SvgTarget {
        path: output,
        width: config.width,
        height: config.height,
        gzip,
    };
    let map = render_to_file(&loader(config)?, config.bucket_count, target).await?;

    if let Some(csv_path) = csv {
        write_attributes_csv(csv_path, &map.regions, &map.index)
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
    }

    let stats = map.stats();
    print_pretty(&stats);
    if summary {
        print_json(&stats)?;
    }
    info!(
        matched = stats.matched_regions,
        join_misses = stats.join_misses,
        match_pct = stats.match_pct(),
        "Render complete"
    );

    Ok(())
}
