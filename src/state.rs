use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use streamscope::analysis::DashboardView;
use streamscope::data::{ContentType, Dataset, FilterSpec};

use crate::color::ColorMap;

/// A multi-select filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Type,
    Genre,
    Country,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once per file, never mutated.
    pub dataset: Arc<Dataset>,

    /// File the dataset came from.
    pub source: PathBuf,

    /// Current filter selection.
    pub filter: FilterSpec,

    /// Everything drawn for `filter`; rebuilt on every filter change.
    pub view: DashboardView,

    /// Genre → colour, shared by the sidebar and the genre chart.
    pub genre_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, source: PathBuf) -> Self {
        let filter = FilterSpec::dashboard_default(&dataset);
        let view = DashboardView::render(&dataset, &filter);
        let genre_colors = ColorMap::new(dataset.genres());
        AppState {
            dataset: Arc::new(dataset),
            source,
            filter,
            view,
            genre_colors,
            status_message: None,
        }
    }

    /// Swap in a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: Dataset, source: PathBuf) {
        *self = AppState::new(dataset, source);
    }

    /// Recompute the view after a filter change.
    pub fn refilter(&mut self) {
        self.view = DashboardView::render(&self.dataset, &self.filter);
    }

    pub fn set_year_range(&mut self, year_min: i32, year_max: i32) {
        if (year_min, year_max) != (self.filter.year_min, self.filter.year_max) {
            self.filter.year_min = year_min;
            self.filter.year_max = year_max;
            self.refilter();
        }
    }

    pub fn toggle_type(&mut self, value: ContentType) {
        toggle(&mut self.filter.types, &value);
        self.refilter();
    }

    pub fn toggle_genre(&mut self, value: &str) {
        toggle(&mut self.filter.genres, &value.to_string());
        self.refilter();
    }

    pub fn toggle_country(&mut self, value: &str) {
        toggle(&mut self.filter.countries, &value.to_string());
        self.refilter();
    }

    /// Select every value of a facet.
    pub fn select_all(&mut self, facet: Facet) {
        let ds = &self.dataset;
        match facet {
            Facet::Type => self.filter.types = ds.types().iter().copied().collect(),
            Facet::Genre => self.filter.genres = ds.genres().iter().cloned().collect(),
            Facet::Country => self.filter.countries = ds.countries().iter().cloned().collect(),
        }
        self.refilter();
    }

    /// Deselect every value of a facet.
    pub fn select_none(&mut self, facet: Facet) {
        match facet {
            Facet::Type => self.filter.types.clear(),
            Facet::Genre => self.filter.genres.clear(),
            Facet::Country => self.filter.countries.clear(),
        }
        self.refilter();
    }
}

fn toggle<T: Ord + Clone>(set: &mut BTreeSet<T>, value: &T) {
    if !set.remove(value) {
        set.insert(value.clone());
    }
}
