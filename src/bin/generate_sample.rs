use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use streamscope::data::{ContentRecord, ContentType};

const GENRES: [(&str, f64); 10] = [
    ("Drama", 74.0),
    ("Comedy", 68.0),
    ("Action", 71.0),
    ("Documentary", 63.0),
    ("Thriller", 76.0),
    ("Romance", 61.0),
    ("Sci-Fi", 72.0),
    ("Horror", 58.0),
    ("Animation", 70.0),
    ("Crime", 75.0),
];

const COUNTRIES: [&str; 10] = [
    "United States",
    "United Kingdom",
    "India",
    "South Korea",
    "Japan",
    "Spain",
    "France",
    "Canada",
    "Germany",
    "Brazil",
];

const TITLE_WORDS: [&str; 16] = [
    "Shadow", "River", "Last", "Night", "City", "Broken", "Golden", "Silent", "Echo", "Winter",
    "Hidden", "Crown", "Signal", "Harbor", "Wild", "Glass",
];

#[derive(Parser)]
#[command(name = "generate_sample")]
#[command(about = "Write a synthetic streaming content dataset (.csv, .json or .parquet)")]
struct Args {
    /// Number of titles to generate
    #[arg(short, long, default_value_t = 1000)]
    rows: usize,

    /// RNG seed; the same seed always produces the same file
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Output path; the format follows the extension
    #[arg(short, long, default_value = "netflix_content_data.csv")]
    output: PathBuf,
}

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-15);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn generate(rows: usize, seed: u64) -> Vec<ContentRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..rows)
        .map(|i| {
            let &(genre, base_engagement) = GENRES.choose(&mut rng).unwrap_or(&GENRES[0]);
            let country = *COUNTRIES.choose(&mut rng).unwrap_or(&COUNTRIES[0]);
            let content_type = if rng.gen_bool(0.65) {
                ContentType::Movie
            } else {
                ContentType::TvShow
            };
            let imdb_score = gauss(&mut rng, 6.8, 1.0).clamp(1.0, 9.8);
            // Engagement loosely tracks IMDB so the correlation is visible.
            let noise = gauss(&mut rng, 0.0, 8.0);
            let engagement_score =
                (base_engagement + (imdb_score - 6.8) * 6.0 + noise).clamp(5.0, 99.0);
            let completion_rate =
                (engagement_score / 100.0 + gauss(&mut rng, 0.0, 0.08)).clamp(0.05, 0.99);
            let viewership_hours = (engagement_score * rng.gen_range(5_000.0..60_000.0)).round();
            let title = format!(
                "{} {} {}",
                TITLE_WORDS.choose(&mut rng).unwrap_or(&TITLE_WORDS[0]),
                TITLE_WORDS.choose(&mut rng).unwrap_or(&TITLE_WORDS[1]),
                i + 1
            );

            ContentRecord {
                title,
                content_type,
                genre: genre.to_string(),
                country: country.to_string(),
                release_year: rng.gen_range(2015..=2024),
                release_month: rng.gen_range(1..=12),
                engagement_score: (engagement_score * 10.0).round() / 10.0,
                viewership_hours,
                completion_rate: (completion_rate * 1000.0).round() / 1000.0,
                imdb_score: (imdb_score * 10.0).round() / 10.0,
            }
        })
        .collect()
}

fn write_csv(path: &Path, records: &[ContentRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for rec in records {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_json(path: &Path, records: &[ContentRecord]) -> Result<()> {
    let file = File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(file, records).context("writing JSON")?;
    Ok(())
}

fn write_parquet(path: &Path, records: &[ContentRecord]) -> Result<()> {
    let text = |get: fn(&ContentRecord) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(records.iter().map(get).collect::<Vec<_>>()))
    };
    let float = |get: fn(&ContentRecord) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(records.iter().map(get).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("genre", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, false),
        Field::new("release_year", DataType::Int32, false),
        Field::new("release_month", DataType::Int32, false),
        Field::new("engagement_score", DataType::Float64, false),
        Field::new("viewership_hours", DataType::Float64, false),
        Field::new("completion_rate", DataType::Float64, false),
        Field::new("imdb_score", DataType::Float64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        text(|r| r.title.as_str()),
        text(|r| r.content_type.label()),
        text(|r| r.genre.as_str()),
        text(|r| r.country.as_str()),
        Arc::new(Int32Array::from(
            records.iter().map(|r| r.release_year).collect::<Vec<_>>(),
        )),
        Arc::new(Int32Array::from(
            records.iter().map(|r| i32::from(r.release_month)).collect::<Vec<_>>(),
        )),
        float(|r| r.engagement_score),
        float(|r| r.viewership_hours),
        float(|r| r.completion_rate),
        float(|r| r.imdb_score),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let records = generate(args.rows, args.seed);
    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => write_csv(&args.output, &records)?,
        "json" => write_json(&args.output, &records)?,
        "parquet" | "pq" => write_parquet(&args.output, &records)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    println!("Wrote {} titles to {}", records.len(), args.output.display());
    Ok(())
}
