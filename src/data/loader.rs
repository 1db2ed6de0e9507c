use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::errors::ParquetError;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{ContentRecord, ContentType, Dataset, RejectedRow, RowError, REQUIRED_COLUMNS};

/// Fatal load failures. Per-row problems never surface here; those rows are
/// quarantined in [`Dataset::rejected`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("expected a top-level JSON array of records")]
    NotAnArray,
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parquet: {0}")]
    Parquet(#[from] ParquetError),
    #[error("Arrow: {0}")]
    Arrow(#[from] ArrowError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a content dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the columns in [`REQUIRED_COLUMNS`]
/// * `.json`    – `[{ "title": ..., "type": "Movie", ... }, ...]`
/// * `.parquet` – one column per field; numeric columns of any int/float width
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let dataset = match ext.as_str() {
        "csv" => read_csv(open()?)?,
        "json" => read_json(BufReader::new(open()?))?,
        "parquet" | "pq" => read_parquet(open()?)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    log::info!(
        "Loaded {} records from {} ({} rejected)",
        dataset.len(),
        path.display(),
        dataset.rejected().len()
    );
    Ok(dataset)
}

fn check_columns<'h>(headers: impl IntoIterator<Item = &'h str>) -> Result<(), LoadError> {
    let present: Vec<&str> = headers.into_iter().map(str::trim).collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.contains(*col))
        .map(|col| col.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}

/// Collects parsed rows, validating each and quarantining failures.
#[derive(Default)]
struct RowSink {
    records: Vec<ContentRecord>,
    rejected: Vec<RejectedRow>,
}

impl RowSink {
    fn push(&mut self, row: usize, parsed: Result<ContentRecord, RowError>) {
        match parsed.and_then(|rec| rec.validate().map(|()| rec)) {
            Ok(rec) => self.records.push(rec),
            Err(err) => {
                log::warn!("Skipping row {row}: {err}");
                self.rejected.push(RejectedRow {
                    row,
                    reason: err.to_string(),
                });
            }
        }
    }

    fn finish(self) -> Dataset {
        Dataset::from_records(self.records, self.rejected)
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read CSV with a header row. Fields are trimmed; unknown columns ignored.
pub fn read_csv<R: Read>(input: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers()?.clone();
    check_columns(headers.iter())?;

    let mut sink = RowSink::default();
    for (row, result) in reader.records().enumerate() {
        let parsed = match result {
            Ok(raw) => raw
                .deserialize::<ContentRecord>(Some(&headers))
                .map_err(|e| RowError::Parse(e.to_string())),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => Err(RowError::Parse(e.to_string())),
        };
        sink.push(row, parsed);
    }
    Ok(sink.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "title": "Night Train", "type": "Movie", "genre": "Drama", ... },
///   ...
/// ]
/// ```
pub fn read_json<R: Read>(input: R) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_reader(input)?;
    let JsonValue::Array(rows) = root else {
        return Err(LoadError::NotAnArray);
    };

    if let Some(JsonValue::Object(first)) = rows.first() {
        check_columns(first.keys().map(String::as_str))?;
    }

    let mut sink = RowSink::default();
    for (row, mut value) in rows.into_iter().enumerate() {
        trim_strings(&mut value);
        let parsed = serde_json::from_value::<ContentRecord>(value)
            .map_err(|e| RowError::Parse(e.to_string()));
        sink.push(row, parsed);
    }
    Ok(sink.finish())
}

/// Trim text fields the way the CSV reader does.
fn trim_strings(value: &mut JsonValue) {
    if let JsonValue::Object(fields) = value {
        for field in fields.values_mut() {
            if let JsonValue::String(text) = field {
                let trimmed = text.trim();
                if trimmed.len() != text.len() {
                    *text = trimmed.to_string();
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`), Polars, or
/// `generate_sample`. Numeric columns are cast, so int32/int64/float32 all work.
pub fn read_parquet(file: File) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    check_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build()?;

    let mut sink = RowSink::default();
    let mut offset = 0;
    for batch in reader {
        let batch = batch?;
        let columns = BatchColumns::new(&batch)?;
        for i in 0..batch.num_rows() {
            sink.push(offset + i, columns.record(i));
        }
        offset += batch.num_rows();
    }
    Ok(sink.finish())
}

/// The ten input columns of one record batch, cast to uniform Arrow types.
struct BatchColumns {
    title: StringArray,
    content_type: StringArray,
    genre: StringArray,
    country: StringArray,
    release_year: Float64Array,
    release_month: Float64Array,
    engagement_score: Float64Array,
    viewership_hours: Float64Array,
    completion_rate: Float64Array,
    imdb_score: Float64Array,
}

impl BatchColumns {
    fn new(batch: &RecordBatch) -> Result<Self, LoadError> {
        let column = |name: &str, to: &DataType| -> Result<ArrayRef, LoadError> {
            let col = batch
                .column_by_name(name)
                .ok_or_else(|| LoadError::MissingColumns(vec![name.to_string()]))?;
            Ok(cast(col.as_ref(), to)?)
        };
        let text = |name: &str| -> Result<StringArray, LoadError> {
            Ok(column(name, &DataType::Utf8)?.as_string::<i32>().clone())
        };
        let float = |name: &str| -> Result<Float64Array, LoadError> {
            Ok(column(name, &DataType::Float64)?.as_primitive::<Float64Type>().clone())
        };

        Ok(BatchColumns {
            title: text("title")?,
            content_type: text("type")?,
            genre: text("genre")?,
            country: text("country")?,
            release_year: float("release_year")?,
            release_month: float("release_month")?,
            engagement_score: float("engagement_score")?,
            viewership_hours: float("viewership_hours")?,
            completion_rate: float("completion_rate")?,
            imdb_score: float("imdb_score")?,
        })
    }

    fn record(&self, i: usize) -> Result<ContentRecord, RowError> {
        let type_label = text_at(&self.content_type, "type", i)?;
        let content_type = ContentType::from_label(&type_label)
            .ok_or_else(|| RowError::Parse(format!("unknown content type '{type_label}'")))?;
        let release_year = i32::try_from(int_at(&self.release_year, "release_year", i)?)
            .map_err(|e| RowError::Parse(format!("release_year: {e}")))?;
        let release_month = u8::try_from(int_at(&self.release_month, "release_month", i)?)
            .map_err(|e| RowError::Parse(format!("release_month: {e}")))?;

        Ok(ContentRecord {
            title: text_at(&self.title, "title", i)?,
            content_type,
            genre: text_at(&self.genre, "genre", i)?,
            country: text_at(&self.country, "country", i)?,
            release_year,
            release_month,
            engagement_score: float_at(&self.engagement_score, "engagement_score", i)?,
            viewership_hours: float_at(&self.viewership_hours, "viewership_hours", i)?,
            completion_rate: float_at(&self.completion_rate, "completion_rate", i)?,
            imdb_score: float_at(&self.imdb_score, "imdb_score", i)?,
        })
    }
}

// -- Arrow cell helpers --

fn null_cell(column: &str) -> RowError {
    RowError::Parse(format!("{column} is null"))
}

fn text_at(arr: &StringArray, column: &str, i: usize) -> Result<String, RowError> {
    if arr.is_null(i) {
        return Err(null_cell(column));
    }
    Ok(arr.value(i).trim().to_string())
}

/// Integer columns are read as floats so a fractional value is rejected
/// rather than truncated by the cast.
fn int_at(arr: &Float64Array, column: &str, i: usize) -> Result<i64, RowError> {
    let value = float_at(arr, column, i)?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(RowError::Parse(format!("{column}: {value} is not a whole number")));
    }
    Ok(value as i64)
}

fn float_at(arr: &Float64Array, column: &str, i: usize) -> Result<f64, RowError> {
    if arr.is_null(i) {
        return Err(null_cell(column));
    }
    Ok(arr.value(i))
}
