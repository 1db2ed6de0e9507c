mod app;
mod color;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use app::StreamscopeApp;
use clap::Parser;
use eframe::egui;
use streamscope::data::Dataset;

#[derive(Parser)]
#[command(name = "streamscope")]
#[command(about = "Interactive content strategy dashboard")]
#[command(version)]
struct Args {
    /// Dataset file (.csv, .json or .parquet)
    #[arg(short, long, env = "STREAMSCOPE_DATA", default_value = "netflix_content_data.csv")]
    data: PathBuf,
}

/// Load the startup dataset. The load error itself says what went wrong.
fn load_dataset(path: &Path) -> Result<Dataset> {
    let dataset = streamscope::data::load_file(path)
        .with_context(|| format!("loading {}", path.display()))?;
    if dataset.is_empty() {
        log::warn!("{} contains no valid records", path.display());
    }
    Ok(dataset)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // No dataset, no dashboard: fail before opening a window.
    let dataset = load_dataset(&args.data)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Streamscope – Content Strategy Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(StreamscopeApp::new(dataset, args.data)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard failed: {e}"))
}
