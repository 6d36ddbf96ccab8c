//! Channel Tier Chart - Lightning channel-size tier breakdown
//!
//! Loads a tier CSV, normalizes the Channel and Capacity percentages across
//! the Myway/Highway/Freeway tiers and shows them as a horizontal stacked bar
//! chart.
//!
//! ```bash
//! tier-chart                                        # open the chart window
//! tier-chart https://example.com/ChannelES.csv      # load from a URL
//! tier-chart --headless --png tiers.png --chartjs tiers.json
//! ```

mod charts;
mod data;
mod gui;
mod logging;

use anyhow::{Context, Result};
use charts::{format::format_data_label, ChartJsConfig, StaticChartRenderer};
use clap::Parser;
use data::{DataLoader, DataProcessor, DataSource, Metric, Tier, TierBreakdown};
use eframe::egui;
use gui::{ExportSettings, TierChartApp};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tier-chart")]
#[command(about = "Stacked bar chart of Lightning channel-size tiers", long_about = None)]
struct Cli {
    /// CSV path or http(s) URL
    #[arg(env = "TIER_CHART_SOURCE", default_value = "data/ChannelES.csv")]
    source: String,

    /// Write the chart as a PNG (headless mode)
    #[arg(long)]
    png: Option<PathBuf>,

    /// Write the Chart.js configuration as JSON (headless mode)
    #[arg(long)]
    chartjs: Option<PathBuf>,

    /// PNG width in pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// PNG height in pixels
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Skip the window: load, export, print a summary and exit
    #[arg(long)]
    headless: bool,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(&cli.log_level);

    let source = DataSource::parse(&cli.source);
    info!(%source, headless = cli.headless, "startup");

    if cli.headless {
        run_headless(&cli, &source)
    } else {
        run_gui(&cli, source)
    }
}

fn run_headless(cli: &Cli, source: &DataSource) -> Result<()> {
    let rows = DataLoader::load_rows(source).with_context(|| format!("loading {}", source))?;
    let breakdown = DataProcessor::process(&rows);

    if let Some(path) = &cli.png {
        StaticChartRenderer::render_png(&breakdown, path, cli.width, cli.height)
            .with_context(|| format!("rendering {}", path.display()))?;
    }
    if let Some(path) = &cli.chartjs {
        ChartJsConfig::write(&breakdown, path)?;
    }

    print!("{}", summary_table(&breakdown));
    Ok(())
}

fn run_gui(cli: &Cli, source: DataSource) -> Result<()> {
    let export = ExportSettings {
        png_width: cli.width,
        png_height: cli.height,
        ..Default::default()
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 600.0])
            .with_min_inner_size([900.0, 450.0])
            .with_title("Channel Tiers"),
        ..Default::default()
    };

    eframe::run_native(
        "Channel Tiers",
        options,
        Box::new(move |cc| Ok(Box::new(TierChartApp::new(cc, source, export)))),
    )
    .map_err(|e| anyhow::anyhow!("window closed with error: {e}"))
}

/// Plain-text table of the normalized values, one row per tier.
fn summary_table(breakdown: &TierBreakdown) -> String {
    let mut out = format!("{:<10}", "Tier");
    for metric in Metric::ALL {
        out.push_str(&format!("{:>10}", metric.name()));
    }
    out.push('\n');

    for tier in Tier::ALL {
        out.push_str(&format!("{:<10}", tier.id()));
        for metric in Metric::ALL {
            let label = format_data_label(breakdown.normalized.get(metric, tier));
            out.push_str(&format!("{:>10}", label));
        }
        out.push('\n');
    }
    out
}
