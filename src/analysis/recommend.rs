use serde::Serialize;

use super::aggregate::Summary;
use crate::data::model::{ContentType, Month};

/// Which consumer the recommendations are for. The report adds three picks
/// the dashboard does not show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Variant {
    Dashboard,
    Report,
}

/// The winning key of a ranking and the value it won with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pick<K, V = f64> {
    pub key: K,
    pub value: V,
}

/// Fixed-shape strategic picks. Each field is `None` when the summary has no
/// data; report-only fields are also `None` for [`Variant::Dashboard`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    /// Highest mean engagement.
    pub top_genre: Option<Pick<String>>,
    /// Highest mean engagement.
    pub best_market: Option<Pick<String>>,
    /// Most releases.
    pub peak_release_month: Option<Pick<Month, usize>>,
    /// Highest mean engagement (report only).
    pub best_content_type: Option<Pick<ContentType>>,
    /// Highest mean engagement (report only).
    pub best_engagement_month: Option<Pick<Month>>,
    /// Highest mean engagement per title (report only).
    pub expansion_opportunity: Option<Pick<String>>,
}

/// Largest score wins; on equal scores the earlier item is kept.
fn argmax<T, V: PartialOrd + Copy>(
    items: impl IntoIterator<Item = T>,
    score: impl Fn(&T) -> V,
) -> Option<(T, V)> {
    let mut best: Option<(T, V)> = None;
    for item in items {
        let s = score(&item);
        if best.as_ref().map_or(true, |(_, b)| s > *b) {
            best = Some((item, s));
        }
    }
    best
}

/// Engagement per title in a market; favours small, well-received markets.
pub fn opportunity_score(mean_engagement: f64, count: usize) -> f64 {
    mean_engagement / count as f64
}

impl Recommendations {
    /// Derive picks from `summary`. Groups are scanned in first-occurrence
    /// order so ties go to whichever key appeared first in the view.
    pub fn derive(summary: &Summary, variant: Variant) -> Self {
        let top_genre = argmax(&summary.genres, |g| g.mean_engagement).map(|(g, v)| Pick {
            key: g.genre.clone(),
            value: v,
        });
        let best_market = argmax(&summary.countries, |c| c.mean_engagement).map(|(c, v)| Pick {
            key: c.country.clone(),
            value: v,
        });

        let mut months: Vec<_> = summary.by_month.iter().collect();
        months.sort_by_key(|m| m.first_seen);
        let peak_release_month = argmax(months.iter().copied(), |m| m.count).map(|(m, n)| Pick {
            key: m.month,
            value: n,
        });

        let mut recs = Recommendations {
            top_genre,
            best_market,
            peak_release_month,
            best_content_type: None,
            best_engagement_month: None,
            expansion_opportunity: None,
        };

        if variant == Variant::Report {
            recs.best_content_type = argmax(&summary.by_type, |t| t.mean_engagement).map(|(t, v)| {
                Pick {
                    key: t.content_type,
                    value: v,
                }
            });
            recs.best_engagement_month = argmax(months.iter().copied(), |m| m.mean_engagement)
                .map(|(m, v)| Pick {
                    key: m.month,
                    value: v,
                });
            recs.expansion_opportunity = argmax(&summary.countries, |c| {
                opportunity_score(c.mean_engagement, c.count)
            })
            .map(|(c, v)| Pick {
                key: c.country.clone(),
                value: v,
            });
        }

        recs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::{aggregate, SummaryOptions};
    use crate::data::model::tests::record;
    use crate::data::model::Dataset;
    use crate::data::view::DatasetView;

    fn derive(ds: &Dataset, variant: Variant) -> Recommendations {
        let summary = aggregate(&DatasetView::full(ds), SummaryOptions::DASHBOARD);
        Recommendations::derive(&summary, variant)
    }

    #[test]
    fn single_record_is_every_top_choice() {
        let ds = Dataset::from_records(vec![record("Anime", "Japan", 2021, 9, 77.0)], Vec::new());
        let recs = derive(&ds, Variant::Report);
        assert_eq!(recs.top_genre.map(|p| p.key), Some("Anime".to_string()));
        assert_eq!(recs.best_market.map(|p| p.key), Some("Japan".to_string()));
        assert_eq!(recs.peak_release_month.map(|p| p.key.number()), Some(9));
        assert_eq!(recs.best_content_type.map(|p| p.key), Some(ContentType::Movie));
        assert_eq!(recs.best_engagement_month.map(|p| p.key.number()), Some(9));
        assert_eq!(recs.expansion_opportunity.map(|p| p.key), Some("Japan".to_string()));
    }

    #[test]
    fn empty_summary_has_no_picks() {
        let recs = derive(&Dataset::default(), Variant::Report);
        assert_eq!(recs.top_genre, None);
        assert_eq!(recs.best_market, None);
        assert_eq!(recs.peak_release_month, None);
        assert_eq!(recs.best_content_type, None);
        assert_eq!(recs.expansion_opportunity, None);
    }

    #[test]
    fn dashboard_variant_skips_report_picks() {
        let ds = Dataset::from_records(vec![record("Drama", "US", 2020, 1, 50.0)], Vec::new());
        let recs = derive(&ds, Variant::Dashboard);
        assert!(recs.top_genre.is_some());
        assert_eq!(recs.best_content_type, None);
        assert_eq!(recs.best_engagement_month, None);
        assert_eq!(recs.expansion_opportunity, None);
    }

    #[test]
    fn picks_maxima_and_breaks_ties_by_first_occurrence() {
        let ds = Dataset::from_records(
            vec![
                record("Drama", "US", 2020, 5, 60.0),
                record("Comedy", "UK", 2020, 2, 90.0),
                record("Drama", "US", 2020, 2, 80.0),
                record("Action", "India", 2020, 5, 90.0),
            ],
            Vec::new(),
        );
        let recs = derive(&ds, Variant::Report);
        // Comedy and Action tie at 90; Comedy appears first.
        assert_eq!(recs.top_genre.as_ref().map(|p| p.key.as_str()), Some("Comedy"));
        assert_eq!(recs.best_market.as_ref().map(|p| p.key.as_str()), Some("UK"));
        // May and Feb both have two releases; May appears first.
        let peak = recs.peak_release_month.as_ref().map(|p| (p.key.name(), p.value));
        assert_eq!(peak, Some(("May", 2)));
        // Feb averages 85, May 75.
        assert_eq!(recs.best_engagement_month.map(|p| p.key.name()), Some("Feb"));
        // US: 70 / 2 = 35, UK: 90, India: 90; UK first.
        assert_eq!(recs.expansion_opportunity.map(|p| p.key), Some("UK".to_string()));
    }

    #[test]
    fn opportunity_divides_by_count() {
        assert_eq!(opportunity_score(80.0, 4), 20.0);
    }
}
