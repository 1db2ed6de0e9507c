use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use streamscope::analysis::Report;
use streamscope::data::{load_file, ContentType, FilterSpec};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "streamscope-report")]
#[command(about = "Print content statistics and strategic recommendations")]
#[command(version)]
struct Args {
    /// Dataset file (.csv, .json or .parquet)
    #[arg(short, long, env = "STREAMSCOPE_DATA", default_value = "netflix_content_data.csv")]
    data: PathBuf,

    /// Earliest release year to include
    #[arg(long)]
    from: Option<i32>,

    /// Latest release year to include
    #[arg(long)]
    to: Option<i32>,

    /// Content type to include ("Movie" or "TV Show"); repeatable
    #[arg(long = "type")]
    types: Vec<String>,

    /// Genre to include; repeatable
    #[arg(long = "genre")]
    genres: Vec<String>,

    /// Country to include; repeatable
    #[arg(long = "country")]
    countries: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

impl Args {
    /// Start from "everything" and narrow by whichever flags were given.
    fn filter(&self, all: FilterSpec) -> Result<FilterSpec> {
        let mut spec = all;
        if let Some(from) = self.from {
            spec.year_min = from;
        }
        if let Some(to) = self.to {
            spec.year_max = to;
        }
        if !self.types.is_empty() {
            spec.types = self
                .types
                .iter()
                .map(|t| {
                    ContentType::from_label(t).with_context(|| {
                        format!("unknown content type '{t}' (expected Movie or TV Show)")
                    })
                })
                .collect::<Result<_>>()?;
        }
        if !self.genres.is_empty() {
            spec.genres = self.genres.iter().cloned().collect();
        }
        if !self.countries.is_empty() {
            spec.countries = self.countries.iter().cloned().collect();
        }
        Ok(spec)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !args.data.exists() {
        bail!(
            "Data file '{}' not found. Place it next to the binary or pass --data.",
            args.data.display()
        );
    }
    let dataset = load_file(&args.data)
        .with_context(|| format!("loading {}", args.data.display()))?;
    if dataset.is_empty() {
        log::warn!("{} contains no valid records", args.data.display());
    }

    let spec = args.filter(FilterSpec::select_all(&dataset))?;
    log::debug!("Report filter: {spec:?}");
    let report = Report::build(&dataset, &spec);

    match args.format {
        Format::Text => print!("{report}"),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing report")?
        ),
    }
    Ok(())
}
