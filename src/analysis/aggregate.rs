use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::data::model::{ContentRecord, ContentType, Month};
use crate::data::view::DatasetView;

/// Printed wherever a statistic has no underlying rows.
pub const NO_DATA: &str = "no data";

/// Format an optional statistic, or [`NO_DATA`] when absent.
pub fn format_stat(value: Option<f64>, precision: usize, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v:.precision$}{suffix}"),
        None => NO_DATA.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How many entries each ranking keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryOptions {
    pub top_genres: usize,
    pub top_countries: usize,
}

impl SummaryOptions {
    pub const DASHBOARD: SummaryOptions = SummaryOptions {
        top_genres: 8,
        top_countries: 10,
    };
    pub const REPORT: SummaryOptions = SummaryOptions {
        top_genres: 3,
        top_countries: 3,
    };
}

// ---------------------------------------------------------------------------
// Per-group statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeStat {
    pub content_type: ContentType,
    pub count: usize,
    pub mean_engagement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreStat {
    pub genre: String,
    pub count: usize,
    pub mean_engagement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryStat {
    pub country: String,
    pub count: usize,
    pub mean_engagement: f64,
    pub mean_completion_rate: f64,
    pub total_viewership_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearStat {
    pub year: i32,
    pub count: usize,
    pub mean_engagement: f64,
    pub total_viewership_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthStat {
    pub month: Month,
    pub count: usize,
    pub mean_engagement: f64,
    /// Position of the month's first record in the view, for tie-breaking.
    #[serde(skip)]
    pub(crate) first_seen: usize,
}

// ---------------------------------------------------------------------------
// Summary – every aggregate the dashboard and report draw from
// ---------------------------------------------------------------------------

/// Descriptive statistics over one filtered view.
///
/// Scalars are `None` when the view is empty. Grouped vectors only contain
/// keys that occur in the view; rankings are sorted descending with ties kept
/// in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean_engagement: Option<f64>,
    pub mean_completion_rate: Option<f64>,
    pub total_viewership_hours: Option<f64>,
    pub year_range: Option<(i32, i32)>,
    /// First-occurrence order.
    pub by_type: Vec<TypeStat>,
    /// First-occurrence order, untruncated.
    pub genres: Vec<GenreStat>,
    /// First-occurrence order, untruncated.
    pub countries: Vec<CountryStat>,
    /// By mean engagement, top `options.top_genres`.
    pub genre_ranking: Vec<GenreStat>,
    /// By mean engagement, top `options.top_countries`.
    pub country_ranking: Vec<CountryStat>,
    /// By title count, top `options.top_countries`.
    pub country_volume: Vec<CountryStat>,
    /// Ascending year.
    pub by_year: Vec<YearStat>,
    /// Ascending month; months without releases are omitted.
    pub by_month: Vec<MonthStat>,
    pub imdb_engagement_correlation: Option<f64>,
    pub options: SummaryOptions,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn type_count(&self, content_type: ContentType) -> usize {
        self.by_type
            .iter()
            .find(|t| t.content_type == content_type)
            .map_or(0, |t| t.count)
    }
}

/// Running sums for one group.
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    count: usize,
    engagement: f64,
    completion: f64,
    viewership: f64,
    first_seen: usize,
}

impl Totals {
    fn add(&mut self, rec: &ContentRecord) {
        self.count += 1;
        self.engagement += rec.engagement_score;
        self.completion += rec.completion_rate;
        self.viewership += rec.viewership_hours;
    }
}

/// Arithmetic mean, `None` for an empty column.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (n, sum) = values.fold((0usize, 0.0), |(n, sum), v| (n + 1, sum + v));
    (n > 0).then(|| sum / n as f64)
}

/// Group records by `key`, keeping groups in first-occurrence order.
fn group_by<'a, K, I>(records: I, key: impl Fn(&ContentRecord) -> K) -> Vec<(K, Totals)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a ContentRecord>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Totals)> = Vec::new();
    for (pos, rec) in records.into_iter().enumerate() {
        let k = key(rec);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((
                k,
                Totals {
                    first_seen: pos,
                    ..Totals::default()
                },
            ));
            groups.len() - 1
        });
        groups[slot].1.add(rec);
    }
    groups
}

/// Pearson correlation coefficient. `None` for fewer than two pairs or when
/// either side has zero variance.
pub fn pearson(pairs: impl IntoIterator<Item = (f64, f64)>) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = pairs.into_iter().collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in &pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// Compute every statistic in [`Summary`] over `view`.
pub fn aggregate(view: &DatasetView<'_>, options: SummaryOptions) -> Summary {
    let year_range = view
        .release_years()
        .fold(None, |range: Option<(i32, i32)>, y| {
            Some(range.map_or((y, y), |(lo, hi)| (lo.min(y), hi.max(y))))
        });

    // Groups always hold at least one record, so their means are defined.
    let group_mean = |t: &Totals, sum: f64| sum / t.count as f64;

    let by_type: Vec<TypeStat> = group_by(view.records(), |r| r.content_type)
        .into_iter()
        .map(|(content_type, t)| TypeStat {
            content_type,
            count: t.count,
            mean_engagement: group_mean(&t, t.engagement),
        })
        .collect();

    let genres: Vec<GenreStat> = group_by(view.records(), |r| r.genre.clone())
        .into_iter()
        .map(|(genre, t)| GenreStat {
            genre,
            count: t.count,
            mean_engagement: group_mean(&t, t.engagement),
        })
        .collect();

    let countries: Vec<CountryStat> = group_by(view.records(), |r| r.country.clone())
        .into_iter()
        .map(|(country, t)| CountryStat {
            country,
            count: t.count,
            mean_engagement: group_mean(&t, t.engagement),
            mean_completion_rate: group_mean(&t, t.completion),
            total_viewership_hours: t.viewership,
        })
        .collect();

    let mut by_year: Vec<YearStat> = group_by(view.records(), |r| r.release_year)
        .into_iter()
        .map(|(year, t)| YearStat {
            year,
            count: t.count,
            mean_engagement: group_mean(&t, t.engagement),
            total_viewership_hours: t.viewership,
        })
        .collect();
    by_year.sort_by_key(|y| y.year);

    let mut by_month: Vec<MonthStat> = group_by(view.records(), ContentRecord::month)
        .into_iter()
        .filter_map(|(month, t)| {
            Some(MonthStat {
                month: month?,
                count: t.count,
                mean_engagement: group_mean(&t, t.engagement),
                first_seen: t.first_seen,
            })
        })
        .collect();
    by_month.sort_by_key(|m| m.month);

    // Stable sorts over first-occurrence order keep ties deterministic.
    let mut genre_ranking = genres.clone();
    genre_ranking.sort_by(|a, b| b.mean_engagement.total_cmp(&a.mean_engagement));
    genre_ranking.truncate(options.top_genres);

    let mut country_ranking = countries.clone();
    country_ranking.sort_by(|a, b| b.mean_engagement.total_cmp(&a.mean_engagement));
    country_ranking.truncate(options.top_countries);

    let mut country_volume = countries.clone();
    country_volume.sort_by(|a, b| b.count.cmp(&a.count));
    country_volume.truncate(options.top_countries);

    Summary {
        count: view.len(),
        mean_engagement: mean(view.engagement_scores()),
        mean_completion_rate: mean(view.completion_rates()),
        total_viewership_hours: (!view.is_empty()).then(|| view.viewership_hours().sum()),
        year_range,
        by_type,
        genres,
        countries,
        genre_ranking,
        country_ranking,
        country_volume,
        by_year,
        by_month,
        imdb_engagement_correlation: pearson(view.imdb_scores().zip(view.engagement_scores())),
        options,
    }
}
