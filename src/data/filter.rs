use std::collections::BTreeSet;

use serde::Serialize;

use super::model::{ContentRecord, ContentType, Dataset};
use super::view::DatasetView;

/// How many genres / countries the dashboard selects on first load.
pub const DASHBOARD_DEFAULT_SELECTION: usize = 5;

// ---------------------------------------------------------------------------
// FilterSpec: the user's inclusion predicates
// ---------------------------------------------------------------------------

/// Selected year range plus the allowed values of each categorical column.
///
/// A record passes when *all* predicates hold. An empty set selects nothing,
/// and so does `year_min > year_max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub year_min: i32,
    pub year_max: i32,
    pub types: BTreeSet<ContentType>,
    pub genres: BTreeSet<String>,
    pub countries: BTreeSet<String>,
}

impl FilterSpec {
    /// Every value selected, full year range (i.e., show everything).
    pub fn select_all(dataset: &Dataset) -> Self {
        let (year_min, year_max) = dataset.year_bounds().unwrap_or((i32::MIN, i32::MAX));
        FilterSpec {
            year_min,
            year_max,
            types: dataset.types().iter().copied().collect(),
            genres: dataset.genres().iter().cloned().collect(),
            countries: dataset.countries().iter().cloned().collect(),
        }
    }

    /// Initial dashboard selection: all types and years, but only the first
    /// few genres and countries in the order they appear in the file.
    pub fn dashboard_default(dataset: &Dataset) -> Self {
        FilterSpec {
            genres: dataset
                .genres()
                .iter()
                .take(DASHBOARD_DEFAULT_SELECTION)
                .cloned()
                .collect(),
            countries: dataset
                .countries()
                .iter()
                .take(DASHBOARD_DEFAULT_SELECTION)
                .cloned()
                .collect(),
            ..Self::select_all(dataset)
        }
    }

    /// Whether a single record passes every predicate.
    pub fn matches(&self, record: &ContentRecord) -> bool {
        (self.year_min..=self.year_max).contains(&record.release_year)
            && self.types.contains(&record.content_type)
            && self.genres.contains(&record.genre)
            && self.countries.contains(&record.country)
    }

    /// Apply the predicates to a view, keeping input order.
    pub fn apply<'a>(&self, view: &DatasetView<'a>) -> DatasetView<'a> {
        view.retain(|rec| self.matches(rec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn sample() -> Dataset {
        let mut show = record("Comedy", "UK", 2020, 6, 75.0);
        show.content_type = ContentType::TvShow;
        Dataset::from_records(
            vec![
                record("Drama", "US", 2018, 1, 60.0),
                show,
                record("Drama", "India", 2021, 3, 80.0),
                record("Horror", "US", 2022, 10, 40.0),
                record("Action", "Japan", 2019, 7, 55.0),
                record("Romance", "France", 2017, 2, 65.0),
                record("Sci-Fi", "Korea", 2023, 12, 88.0),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn select_all_keeps_everything() {
        let ds = sample();
        let spec = FilterSpec::select_all(&ds);
        let view = spec.apply(&DatasetView::full(&ds));
        assert_eq!(view.len(), ds.len());
    }

    #[test]
    fn every_returned_record_satisfies_all_predicates() {
        let ds = sample();
        let mut spec = FilterSpec::select_all(&ds);
        spec.year_min = 2019;
        spec.year_max = 2022;
        spec.genres.remove("Horror");
        spec.countries.remove("India");

        let full = DatasetView::full(&ds);
        let view = spec.apply(&full);
        assert!(view.indices().iter().all(|i| full.indices().contains(i)));
        assert!(view.records().all(|r| spec.matches(r)));
        let titles: Vec<&str> = view.column(|r| r.genre.as_str()).collect();
        assert_eq!(titles, ["Comedy", "Action"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample();
        let mut spec = FilterSpec::select_all(&ds);
        spec.types = BTreeSet::from([ContentType::Movie]);
        spec.year_min = 2018;

        let once = spec.apply(&DatasetView::full(&ds));
        let twice = spec.apply(&once);
        assert_eq!(once.indices(), twice.indices());
    }

    #[test]
    fn inverted_year_range_returns_empty() {
        let ds = sample();
        let mut spec = FilterSpec::select_all(&ds);
        spec.year_min = 2020;
        spec.year_max = 2019;
        assert!(spec.apply(&DatasetView::full(&ds)).is_empty());
    }

    #[test]
    fn empty_selection_returns_empty() {
        let ds = sample();
        let mut spec = FilterSpec::select_all(&ds);
        spec.countries.clear();
        assert!(spec.apply(&DatasetView::full(&ds)).is_empty());
    }

    #[test]
    fn dashboard_default_takes_first_five_genres_and_countries() {
        let ds = sample();
        let spec = FilterSpec::dashboard_default(&ds);
        assert_eq!(spec.genres.len(), 5);
        assert!(!spec.genres.contains("Sci-Fi"));
        assert_eq!(spec.countries.len(), 5);
        assert!(!spec.countries.contains("Korea"));
        assert_eq!(spec.types.len(), 2);
        assert_eq!((spec.year_min, spec.year_max), (2017, 2023));
    }
}
