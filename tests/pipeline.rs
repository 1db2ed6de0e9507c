use std::fs;
use std::fs::File;
use std::sync::Arc;

use approx::assert_relative_eq;
use arrow::array::{ArrayRef, Float32Array, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use streamscope::analysis::{DashboardView, Report};
use streamscope::data::{load_file, ContentType, DatasetView, FilterSpec, LoadError};

const CSV: &str = "\
title,type,genre,country,release_year,release_month,engagement_score,viewership_hours,completion_rate,imdb_score
Night Train,Movie,Drama,United States,2019,1,80,1500000,0.80,7.9
Paper Moon,Movie,Drama,United States,2020,1,60,900000,0.60,6.5
Laugh Track,TV Show,Comedy,United Kingdom,2021,3,90,2100000,0.85,8.2
Broken Row,Movie,Drama,United States,2021,14,70,100,0.5,7.0
Cold Harbor,TV Show,Crime,India,2022,7,55,400000,0.45,6.1
";

fn write_csv(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("netflix_content_data.csv");
    fs::write(&path, CSV).unwrap();
    path
}

#[test]
fn csv_file_to_report() {
    let dir = TempDir::new().unwrap();
    let ds = load_file(&write_csv(&dir)).unwrap();

    assert_eq!(ds.len(), 4);
    assert_eq!(ds.rejected().len(), 1);
    assert_eq!(ds.rejected()[0].row, 3);

    let report = Report::build(&ds, &FilterSpec::select_all(&ds));
    assert_eq!(report.summary.count, 4);
    assert_relative_eq!(report.summary.mean_engagement.unwrap(), 71.25);
    assert_eq!(report.summary.year_range, Some((2019, 2022)));
    assert!(report.summary.imdb_engagement_correlation.unwrap() > 0.9);

    let recs = &report.recommendations;
    assert_eq!(recs.top_genre.as_ref().unwrap().key, "Comedy");
    assert_eq!(recs.best_market.as_ref().unwrap().key, "United Kingdom");
    assert_eq!(recs.peak_release_month.as_ref().unwrap().key.name(), "Jan");
    assert_eq!(recs.best_content_type.as_ref().unwrap().key, ContentType::TvShow);
    assert_eq!(recs.expansion_opportunity.as_ref().unwrap().key, "United Kingdom");

    let text = report.to_string();
    assert!(text.contains("Rejected Rows: 1"));
    assert!(text.contains("  United States: 2 titles\n"));
}

#[test]
fn dashboard_default_then_narrowing() {
    let dir = TempDir::new().unwrap();
    let ds = load_file(&write_csv(&dir)).unwrap();

    let mut spec = FilterSpec::dashboard_default(&ds);
    let all = DashboardView::render(&ds, &spec);
    assert_eq!(all.summary.count, 4);

    spec.types.remove(&ContentType::TvShow);
    let movies = DashboardView::render(&ds, &spec);
    assert_eq!(movies.summary.count, 2);
    assert_eq!(movies.summary.by_month.len(), 1);

    spec.year_min = 2030;
    let none = DashboardView::render(&ds, &spec);
    assert!(none.summary.is_empty());
    assert_eq!(none.summary.mean_engagement, None);
    assert_eq!(none.recommendations.peak_release_month, None);
}

#[test]
fn filtered_view_is_a_subset() {
    let dir = TempDir::new().unwrap();
    let ds = load_file(&write_csv(&dir)).unwrap();
    let full = DatasetView::full(&ds);

    let mut spec = FilterSpec::select_all(&ds);
    spec.countries.remove("India");
    spec.year_max = 2020;
    let view = spec.apply(&full);

    assert_eq!(view.indices(), [0, 1]);
    assert!(view.records().all(|r| spec.matches(r)));
    assert_eq!(spec.apply(&view).indices(), view.indices());
}

#[test]
fn missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = load_file(&dir.path().join("netflix_content_data.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("netflix_content_data.csv"));
}

#[test]
fn json_file_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("content.json");
    fs::write(
        &path,
        r#"[{"title": "Solo", "type": "TV Show", "genre": "Anime", "country": "Japan",
             "release_year": 2023, "release_month": 4, "engagement_score": 88.5,
             "viewership_hours": 250000, "completion_rate": 0.9, "imdb_score": 8.4}]"#,
    )
    .unwrap();

    let ds = load_file(&path).unwrap();
    let report = Report::build(&ds, &FilterSpec::select_all(&ds));
    assert_eq!(report.recommendations.top_genre.unwrap().key, "Anime");
    assert_eq!(report.recommendations.peak_release_month.unwrap().key.number(), 4);
}

#[test]
fn parquet_file_with_narrow_numeric_columns_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("content.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("genre", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, false),
        Field::new("release_year", DataType::Int32, false),
        Field::new("release_month", DataType::Int32, false),
        Field::new("engagement_score", DataType::Float32, false),
        Field::new("viewership_hours", DataType::Float32, false),
        Field::new("completion_rate", DataType::Float32, false),
        Field::new("imdb_score", DataType::Float32, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["A", "B", "C"])),
        Arc::new(StringArray::from(vec!["Movie", "TV Show", "Podcast"])),
        Arc::new(StringArray::from(vec!["Drama", "Drama", "Talk"])),
        Arc::new(StringArray::from(vec!["Spain", "Spain", "Spain"])),
        Arc::new(Int32Array::from(vec![2020, 2021, 2022])),
        Arc::new(Int32Array::from(vec![5, 6, 7])),
        Arc::new(Float32Array::from(vec![50.0, 70.0, 60.0])),
        Arc::new(Float32Array::from(vec![1000.0, 3000.0, 10.0])),
        Arc::new(Float32Array::from(vec![0.5, 0.75, 0.5])),
        Arc::new(Float32Array::from(vec![6.0, 8.0, 7.0])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.rejected().len(), 1);
    assert_eq!(ds.records()[1].content_type, ContentType::TvShow);

    let report = Report::build(&ds, &FilterSpec::select_all(&ds));
    assert_relative_eq!(report.summary.mean_engagement.unwrap(), 60.0);
    assert_relative_eq!(report.summary.total_viewership_hours.unwrap(), 4000.0);
}

#[test]
fn parquet_fractional_year_or_month_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("floats.parquet");

    let mut fields = vec![
        Field::new("title", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("genre", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, false),
    ];
    fields.extend(
        [
            "release_year",
            "release_month",
            "engagement_score",
            "viewership_hours",
            "completion_rate",
            "imdb_score",
        ]
        .map(|name| Field::new(name, DataType::Float64, false)),
    );
    let schema = Arc::new(Schema::new(fields));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["Whole", "Late", "Shifted"])),
        Arc::new(StringArray::from(vec!["Movie", "Movie", "Movie"])),
        Arc::new(StringArray::from(vec!["Drama", "Drama", "Drama"])),
        Arc::new(StringArray::from(vec!["Spain", "Spain", "Spain"])),
        Arc::new(Float64Array::from(vec![2020.0, 2020.9, 2021.0])),
        Arc::new(Float64Array::from(vec![3.0, 3.0, 3.7])),
        Arc::new(Float64Array::from(vec![50.0, 60.0, 70.0])),
        Arc::new(Float64Array::from(vec![100.0, 100.0, 100.0])),
        Arc::new(Float64Array::from(vec![0.5, 0.5, 0.5])),
        Arc::new(Float64Array::from(vec![6.0, 6.0, 6.0])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 1);
    assert_eq!(ds.records()[0].title, "Whole");
    assert_eq!(ds.records()[0].release_year, 2020);
    let rejected: Vec<usize> = ds.rejected().iter().map(|r| r.row).collect();
    assert_eq!(rejected, [1, 2]);
    assert!(ds.rejected()[0].reason.contains("release_year"));
    assert!(ds.rejected()[1].reason.contains("release_month"));

    // The same malformed month is rejected from CSV too.
    let csv = dir.path().join("floats.csv");
    fs::write(
        &csv,
        "title,type,genre,country,release_year,release_month,engagement_score,\
         viewership_hours,completion_rate,imdb_score\n\
         Shifted,Movie,Drama,Spain,2021,3.7,70,100,0.5,6\n",
    )
    .unwrap();
    let ds = load_file(&csv).unwrap();
    assert!(ds.is_empty());
    assert_eq!(ds.rejected().len(), 1);
}
