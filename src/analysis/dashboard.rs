use serde::Serialize;

use super::aggregate::{aggregate, Summary, SummaryOptions};
use super::recommend::{Recommendations, Variant};
use crate::data::filter::FilterSpec;
use crate::data::model::{ContentType, Dataset};
use crate::data::view::DatasetView;

/// One dot on the IMDB-vs-engagement scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub imdb_score: f64,
    pub engagement_score: f64,
    pub viewership_hours: f64,
    pub content_type: ContentType,
    pub title: String,
    pub genre: String,
}

/// Everything the dashboard draws for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub filter: FilterSpec,
    pub summary: Summary,
    pub recommendations: Recommendations,
    pub scatter: Vec<ScatterPoint>,
    /// Size of the unfiltered dataset.
    pub dataset_total: usize,
}

impl DashboardView {
    /// Pure pipeline: filter, aggregate, recommend. Called again from scratch
    /// whenever a control changes.
    pub fn render(dataset: &Dataset, filter: &FilterSpec) -> Self {
        let view = filter.apply(&DatasetView::full(dataset));
        let summary = aggregate(&view, SummaryOptions::DASHBOARD);
        let recommendations = Recommendations::derive(&summary, Variant::Dashboard);
        let scatter = view
            .records()
            .map(|r| ScatterPoint {
                imdb_score: r.imdb_score,
                engagement_score: r.engagement_score,
                viewership_hours: r.viewership_hours,
                content_type: r.content_type,
                title: r.title.clone(),
                genre: r.genre.clone(),
            })
            .collect();

        DashboardView {
            filter: filter.clone(),
            summary,
            recommendations,
            scatter,
            dataset_total: dataset.len(),
        }
    }

    /// Filtered count relative to half the dataset ("vs baseline").
    pub fn baseline_delta(&self) -> i64 {
        self.summary.count as i64 - (self.dataset_total / 2) as i64
    }

    /// The scatter point closest to a plot position, for hover labels.
    /// Engagement runs 0..=100 and IMDB 0..=10, so engagement is scaled down
    /// to weigh both axes equally.
    pub fn nearest_point(
        &self,
        imdb_score: f64,
        engagement_score: f64,
    ) -> Option<&ScatterPoint> {
        let distance = |p: &ScatterPoint| {
            let dx = p.imdb_score - imdb_score;
            let dy = (p.engagement_score - engagement_score) / 10.0;
            dx * dx + dy * dy
        };
        self.scatter.iter().min_by(|a, b| distance(a).total_cmp(&distance(b)))
    }

    /// Smallest and largest viewership among the scatter points.
    pub fn viewership_bounds(&self) -> Option<(f64, f64)> {
        self.scatter.iter().map(|p| p.viewership_hours).fold(None, |bounds, v| {
            Some(bounds.map_or((v, v), |(lo, hi): (f64, f64)| (lo.min(v), hi.max(v))))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn render_reflects_the_filter() {
        let ds = Dataset::from_records(
            vec![
                record("Drama", "US", 2019, 1, 60.0),
                record("Comedy", "UK", 2020, 2, 70.0),
                record("Drama", "UK", 2021, 3, 80.0),
                record("Horror", "US", 2022, 4, 40.0),
            ],
            Vec::new(),
        );
        let mut spec = FilterSpec::select_all(&ds);
        spec.countries.remove("US");

        let view = DashboardView::render(&ds, &spec);
        assert_eq!(view.summary.count, 2);
        assert_eq!(view.scatter.len(), 2);
        assert_eq!(view.dataset_total, 4);
        assert_eq!(view.baseline_delta(), 0);
        assert_eq!(
            view.recommendations.top_genre.as_ref().map(|p| p.key.as_str()),
            Some("Drama")
        );
        assert_eq!(view.recommendations.expansion_opportunity, None);
    }

    #[test]
    fn empty_selection_renders_no_data() {
        let ds = Dataset::from_records(vec![record("Drama", "US", 2019, 1, 60.0)], Vec::new());
        let mut spec = FilterSpec::select_all(&ds);
        spec.genres.clear();

        let view = DashboardView::render(&ds, &spec);
        assert!(view.summary.is_empty());
        assert!(view.scatter.is_empty());
        assert_eq!(view.baseline_delta(), 0);
        assert_eq!(view.recommendations.top_genre, None);
    }

    #[test]
    fn hover_lookup_and_viewership_bounds() {
        let mut a = record("Drama", "US", 2019, 1, 60.0);
        a.imdb_score = 6.0;
        a.viewership_hours = 200.0;
        let mut b = record("Comedy", "UK", 2020, 2, 90.0);
        b.imdb_score = 8.5;
        b.viewership_hours = 5_000.0;
        let ds = Dataset::from_records(vec![a, b], Vec::new());
        let view = DashboardView::render(&ds, &FilterSpec::select_all(&ds));

        let hit = view.nearest_point(8.3, 88.0).map(|p| p.genre.as_str());
        assert_eq!(hit, Some("Comedy"));
        let title = view.nearest_point(5.0, 55.0).map(|p| p.title.as_str());
        assert_eq!(title, Some("Drama US 2019"));
        assert_eq!(view.viewership_bounds(), Some((200.0, 5_000.0)));

        let mut none = FilterSpec::select_all(&ds);
        none.genres.clear();
        let empty = DashboardView::render(&ds, &none);
        assert_eq!(empty.nearest_point(8.0, 80.0), None);
        assert_eq!(empty.viewership_bounds(), None);
    }
}
