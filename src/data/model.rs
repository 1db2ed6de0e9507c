use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Columns every input file must provide, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "title",
    "type",
    "genre",
    "country",
    "release_year",
    "release_month",
    "engagement_score",
    "viewership_hours",
    "completion_rate",
    "imdb_score",
];

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Movie, ContentType::TvShow];

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }

    /// Parse the on-disk label (`Movie`, `TV Show`).
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == s.trim())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Month
// ---------------------------------------------------------------------------

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, always within 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Month(u8);

impl Month {
    pub fn new(number: u8) -> Option<Self> {
        (1..=12).contains(&number).then_some(Month(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Three-letter English abbreviation.
    pub fn name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.0 - 1)]
    }
}

impl From<Month> for u8 {
    fn from(m: Month) -> u8 {
        m.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ContentRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single title with its engagement metrics.
///
/// Field names match the column headers of the input files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub genre: String,
    pub country: String,
    pub release_year: i32,
    /// 1..=12, checked by [`ContentRecord::validate`].
    pub release_month: u8,
    /// Percentage, 0..=100.
    pub engagement_score: f64,
    pub viewership_hours: f64,
    /// Fraction, 0..=1.
    pub completion_rate: f64,
    pub imdb_score: f64,
}

/// Why a parsed row was refused at load time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("column '{0}' is empty")]
    EmptyField(&'static str),
    #[error("release_month {0} is outside 1..=12")]
    MonthOutOfRange(u8),
    #[error("{column} = {value} is outside {min}..={max}")]
    OutOfRange {
        column: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{0} is not a finite number")]
    NotFinite(&'static str),
    #[error("{0}")]
    Parse(String),
}

impl ContentRecord {
    /// Check value ranges that the aggregates rely on.
    pub fn validate(&self) -> Result<(), RowError> {
        for (column, text) in [
            ("title", &self.title),
            ("genre", &self.genre),
            ("country", &self.country),
        ] {
            if text.trim().is_empty() {
                return Err(RowError::EmptyField(column));
            }
        }
        if Month::new(self.release_month).is_none() {
            return Err(RowError::MonthOutOfRange(self.release_month));
        }
        check_range("engagement_score", self.engagement_score, 0.0, 100.0)?;
        check_range("viewership_hours", self.viewership_hours, 0.0, f64::MAX)?;
        check_range("completion_rate", self.completion_rate, 0.0, 1.0)?;
        check_range("imdb_score", self.imdb_score, 0.0, 10.0)?;
        Ok(())
    }

    /// Release month; only meaningful on validated records.
    pub fn month(&self) -> Option<Month> {
        Month::new(self.release_month)
    }
}

fn check_range(column: &'static str, value: f64, min: f64, max: f64) -> Result<(), RowError> {
    if !value.is_finite() {
        return Err(RowError::NotFinite(column));
    }
    if value < min || value > max {
        return Err(RowError::OutOfRange {
            column,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// A row that failed to parse or validate, kept out of every aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// Zero-based data row index (header excluded).
    pub row: usize,
    pub reason: String,
}

/// The validated dataset with pre-computed column indices.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<ContentRecord>,
    rejected: Vec<RejectedRow>,
    /// Unique values in first-occurrence order.
    types: Vec<ContentType>,
    genres: Vec<String>,
    countries: Vec<String>,
    year_bounds: Option<(i32, i32)>,
}

impl Dataset {
    /// Build column indices from already validated records.
    pub fn from_records(records: Vec<ContentRecord>, rejected: Vec<RejectedRow>) -> Self {
        let mut types = Vec::new();
        let mut genres = Vec::new();
        let mut countries = Vec::new();
        let mut year_bounds: Option<(i32, i32)> = None;
        {
            let mut seen_genres = HashSet::new();
            let mut seen_countries = HashSet::new();
            for rec in &records {
                if !types.contains(&rec.content_type) {
                    types.push(rec.content_type);
                }
                if seen_genres.insert(rec.genre.as_str()) {
                    genres.push(rec.genre.clone());
                }
                if seen_countries.insert(rec.country.as_str()) {
                    countries.push(rec.country.clone());
                }
                year_bounds = Some(match year_bounds {
                    None => (rec.release_year, rec.release_year),
                    Some((lo, hi)) => (lo.min(rec.release_year), hi.max(rec.release_year)),
                });
            }
        }

        Dataset {
            records,
            rejected,
            types,
            genres,
            countries,
            year_bounds,
        }
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    /// Rows quarantined at load time.
    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }

    pub fn types(&self) -> &[ContentType] {
        &self.types
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// `(min, max)` release year, `None` for an empty dataset.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.year_bounds
    }

    /// Number of valid records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Test helper: a valid record with the given grouping keys.
    pub(crate) fn record(
        genre: &str,
        country: &str,
        year: i32,
        month: u8,
        engagement: f64,
    ) -> ContentRecord {
        ContentRecord {
            title: format!("{genre} {country} {year}"),
            content_type: ContentType::Movie,
            genre: genre.to_string(),
            country: country.to_string(),
            release_year: year,
            release_month: month,
            engagement_score: engagement,
            viewership_hours: 1_000.0,
            completion_rate: 0.5,
            imdb_score: 7.0,
        }
    }

    #[test]
    fn month_names_and_bounds() {
        assert_eq!(Month::new(1).map(Month::name), Some("Jan"));
        assert_eq!(Month::new(12).map(|m| m.to_string()), Some("Dec".to_string()));
        assert!(Month::new(0).is_none());
        assert!(Month::new(13).is_none());
    }

    #[test]
    fn content_type_labels() {
        assert_eq!(ContentType::from_label("TV Show"), Some(ContentType::TvShow));
        assert_eq!(ContentType::from_label(" Movie "), Some(ContentType::Movie));
        assert_eq!(ContentType::from_label("Podcast"), None);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut rec = record("Drama", "US", 2020, 5, 80.0);
        assert!(rec.validate().is_ok());

        rec.release_month = 13;
        assert_eq!(rec.validate(), Err(RowError::MonthOutOfRange(13)));

        rec.release_month = 5;
        rec.completion_rate = 1.5;
        assert!(matches!(
            rec.validate(),
            Err(RowError::OutOfRange { column: "completion_rate", .. })
        ));

        rec.completion_rate = 0.5;
        rec.engagement_score = f64::NAN;
        assert_eq!(rec.validate(), Err(RowError::NotFinite("engagement_score")));

        rec.engagement_score = 50.0;
        rec.genre = "  ".into();
        assert_eq!(rec.validate(), Err(RowError::EmptyField("genre")));
    }

    #[test]
    fn dataset_indexes_in_first_occurrence_order() {
        let ds = Dataset::from_records(
            vec![
                record("Drama", "US", 2019, 1, 60.0),
                record("Comedy", "UK", 2021, 2, 70.0),
                record("Drama", "India", 2018, 3, 80.0),
            ],
            Vec::new(),
        );
        assert_eq!(ds.genres(), ["Drama", "Comedy"]);
        assert_eq!(ds.countries(), ["US", "UK", "India"]);
        assert_eq!(ds.types(), [ContentType::Movie]);
        assert_eq!(ds.year_bounds(), Some((2018, 2021)));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_has_no_year_bounds() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.year_bounds(), None);
    }
}
