use std::fmt;

use serde::Serialize;

use super::aggregate::{aggregate, format_stat, Summary, SummaryOptions, NO_DATA};
use super::recommend::{Recommendations, Variant};
use crate::data::filter::FilterSpec;
use crate::data::model::{ContentType, Dataset};
use crate::data::view::DatasetView;

/// The console report: summary statistics plus the four strategic picks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub filter: FilterSpec,
    pub summary: Summary,
    pub recommendations: Recommendations,
    /// Rows quarantined while loading the dataset.
    pub rejected_rows: usize,
}

impl Report {
    pub fn build(dataset: &Dataset, filter: &FilterSpec) -> Self {
        let view = filter.apply(&DatasetView::full(dataset));
        let summary = aggregate(&view, SummaryOptions::REPORT);
        let recommendations = Recommendations::derive(&summary, Variant::Report);
        Report {
            filter: filter.clone(),
            summary,
            recommendations,
            rejected_rows: dataset.rejected().len(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        let recs = &self.recommendations;

        writeln!(f, "=== CONTENT ANALYSIS REPORT ===")?;
        writeln!(f)?;
        writeln!(f, "Total Content Pieces: {}", s.count)?;
        writeln!(f, "Movies: {}", s.type_count(ContentType::Movie))?;
        writeln!(f, "TV Shows: {}", s.type_count(ContentType::TvShow))?;
        match s.year_range {
            Some((lo, hi)) => writeln!(f, "Date Range: {lo} - {hi}")?,
            None => writeln!(f, "Date Range: {NO_DATA}")?,
        }
        if self.rejected_rows > 0 {
            writeln!(f, "Rejected Rows: {}", self.rejected_rows)?;
        }

        writeln!(f)?;
        writeln!(f, "=== ENGAGEMENT INSIGHTS ===")?;
        writeln!(
            f,
            "Average Engagement Score: {}",
            format_stat(s.mean_engagement, 1, "%")
        )?;
        writeln!(f)?;
        writeln!(f, "Top {} Genres by Engagement:", s.options.top_genres)?;
        if s.genre_ranking.is_empty() {
            writeln!(f, "  {NO_DATA}")?;
        }
        for g in &s.genre_ranking {
            writeln!(f, "  {}: {:.1}%", g.genre, g.mean_engagement)?;
        }

        writeln!(f)?;
        writeln!(f, "=== GEOGRAPHIC INSIGHTS ===")?;
        writeln!(f, "Top {} Content Producing Countries:", s.options.top_countries)?;
        if s.country_volume.is_empty() {
            writeln!(f, "  {NO_DATA}")?;
        }
        for c in &s.country_volume {
            writeln!(f, "  {}: {} titles", c.country, c.count)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "IMDB-Engagement Correlation: {}",
            format_stat(s.imdb_engagement_correlation, 3, "")
        )?;

        writeln!(f)?;
        writeln!(f, "=== STRATEGIC RECOMMENDATIONS ===")?;
        match &recs.best_content_type {
            Some(p) => writeln!(
                f,
                "1. Focus on {} - {:.1}% avg engagement",
                plural(p.key),
                p.value
            )?,
            None => writeln!(f, "1. Focus on: {NO_DATA}")?,
        }
        match &recs.top_genre {
            Some(p) => writeln!(
                f,
                "2. Invest in {} content - highest engagement potential",
                p.key
            )?,
            None => writeln!(f, "2. Invest in: {NO_DATA}")?,
        }
        match &recs.best_engagement_month {
            Some(p) => writeln!(
                f,
                "3. Optimal release month: {} - {:.1}% avg engagement",
                p.key, p.value
            )?,
            None => writeln!(f, "3. Optimal release month: {NO_DATA}")?,
        }
        match &recs.expansion_opportunity {
            Some(p) => writeln!(f, "4. Market expansion opportunity: {}", p.key)?,
            None => writeln!(f, "4. Market expansion opportunity: {NO_DATA}")?,
        }
        Ok(())
    }
}

fn plural(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Movie => "Movies",
        ContentType::TvShow => "TV Shows",
    }
}
