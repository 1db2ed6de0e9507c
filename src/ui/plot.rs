use eframe::egui::{self, Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points};

use streamscope::analysis::{format_stat, DashboardView};
use streamscope::data::{ContentType, Month};

use crate::color;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;

/// Scatter dot radius range, smallest to largest viewership.
const MIN_RADIUS: f32 = 2.0;
const MAX_RADIUS: f32 = 9.0;

/// Placeholder drawn instead of a chart when the filters match nothing.
fn no_data(ui: &mut Ui) {
    ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.weak("No data for the current filters");
        });
    });
}

// ---------------------------------------------------------------------------
// Content type distribution
// ---------------------------------------------------------------------------

pub fn type_distribution(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Content Type Distribution");
    let s = &view.summary;
    if s.is_empty() {
        no_data(ui);
        return;
    }

    let shares: Vec<String> = s
        .by_type
        .iter()
        .map(|t| {
            let pct = 100.0 * t.count as f64 / s.count as f64;
            format!("{}: {} ({pct:.1}%)", t.content_type, t.count)
        })
        .collect();
    ui.label(shares.join("   "));

    Plot::new("type_distribution")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_scroll(false)
        .y_axis_label("Titles")
        .show_x(false)
        .show(ui, |plot_ui| {
            for (i, t) in s.by_type.iter().enumerate() {
                let c = color::type_color(t.content_type);
                let bar = Bar::new(i as f64, t.count as f64)
                    .name(t.content_type.label())
                    .fill(c)
                    .width(0.6);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(t.content_type.label()).color(c));
            }
        });
}

// ---------------------------------------------------------------------------
// Genre engagement ranking
// ---------------------------------------------------------------------------

pub fn genre_engagement(ui: &mut Ui, state: &AppState) {
    ui.strong("Top Genres by Engagement");
    let ranking = &state.view.summary.genre_ranking;
    if ranking.is_empty() {
        no_data(ui);
        return;
    }

    Plot::new("genre_engagement")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Average Engagement Score")
        .show_y(false)
        .show(ui, |plot_ui| {
            // Highest score at the top.
            let n = ranking.len();
            for (i, g) in ranking.iter().enumerate() {
                let c = state.genre_colors.color_for(&g.genre);
                let bar = Bar::new((n - i) as f64, g.mean_engagement)
                    .name(&g.genre)
                    .fill(c)
                    .width(0.7);
                plot_ui.bar_chart(BarChart::new(vec![bar]).horizontal().name(&g.genre).color(c));
            }
        });
}

// ---------------------------------------------------------------------------
// IMDB score vs engagement
// ---------------------------------------------------------------------------

pub fn imdb_scatter(ui: &mut Ui, view: &DashboardView) {
    ui.strong("IMDB Score vs Engagement");
    if view.scatter.is_empty() {
        no_data(ui);
        return;
    }
    ui.label(format!(
        "Correlation: {}   (dot size: viewership hours)",
        format_stat(view.summary.imdb_engagement_correlation, 3, "")
    ));
    let (lo, hi) = view.viewership_bounds().unwrap_or((0.0, 0.0));

    Plot::new("imdb_scatter")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("IMDB Score")
        .y_axis_label("Engagement Score")
        .label_formatter(|name, pos: &PlotPoint| {
            if name.is_empty() {
                return String::new();
            }
            match view.nearest_point(pos.x, pos.y) {
                Some(p) => format!(
                    "{}\n{}, {}\nIMDB {:.1}, engagement {:.1}\n{:.0} hours",
                    p.title,
                    p.genre,
                    p.content_type,
                    p.imdb_score,
                    p.engagement_score,
                    p.viewership_hours
                ),
                None => String::new(),
            }
        })
        .show(ui, |plot_ui| {
            // One item per title so each dot carries its own size; items of
            // the same type share a legend entry.
            for p in &view.scatter {
                let size = color::scale(p.viewership_hours, lo, hi) as f32;
                plot_ui.points(
                    Points::new(vec![[p.imdb_score, p.engagement_score]])
                        .name(p.content_type.label())
                        .color(color::type_color(p.content_type))
                        .radius(MIN_RADIUS + size * (MAX_RADIUS - MIN_RADIUS)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Release year trend
// ---------------------------------------------------------------------------

pub fn year_trend(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Release Year Trends");
    let years = &view.summary.by_year;
    if years.is_empty() {
        no_data(ui);
        return;
    }

    // Viewership is drawn in millions of hours so both series share one axis.
    let engagement: PlotPoints = years
        .iter()
        .map(|y| [f64::from(y.year), y.mean_engagement])
        .collect();
    let viewership: Vec<Bar> = years
        .iter()
        .map(|y| {
            Bar::new(f64::from(y.year), y.total_viewership_hours / 1_000_000.0)
                .name(y.year.to_string())
                .width(0.6)
        })
        .collect();

    Plot::new("year_trend")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Release Year")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(viewership)
                    .name("Total Viewership (M hours)")
                    .color(color::type_color(ContentType::TvShow).gamma_multiply(0.6)),
            );
            plot_ui.line(
                Line::new(engagement)
                    .name("Avg Engagement Score")
                    .color(color::type_color(ContentType::Movie))
                    .width(3.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Country volume
// ---------------------------------------------------------------------------

pub fn country_volume(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Top Countries by Content Volume");
    let volume = &view.summary.country_volume;
    let Some(max) = volume.iter().map(|c| c.count).max() else {
        no_data(ui);
        return;
    };
    let min = volume.iter().map(|c| c.count).min().unwrap_or(max);

    Plot::new("country_volume")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_scroll(false)
        .y_axis_label("Titles")
        .show_x(false)
        .show(ui, |plot_ui| {
            for (i, c) in volume.iter().enumerate() {
                let fill = color::reds(color::scale(c.count as f64, min as f64, max as f64));
                let bar = Bar::new(i as f64, c.count as f64)
                    .name(&c.country)
                    .fill(fill)
                    .width(0.7);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(&c.country).color(fill));
            }
        });
}

// ---------------------------------------------------------------------------
// Monthly release pattern
// ---------------------------------------------------------------------------

pub fn monthly_releases(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Content Releases by Month");
    let months = &view.summary.by_month;
    let Some(max) = months.iter().map(|m| m.count).max() else {
        no_data(ui);
        return;
    };
    let min = months.iter().map(|m| m.count).min().unwrap_or(max);

    let bars: Vec<Bar> = months
        .iter()
        .map(|m| {
            Bar::new(f64::from(m.month.number()), m.count as f64)
                .name(m.month.name())
                .fill(color::reds(color::scale(m.count as f64, min as f64, max as f64)))
                .width(0.7)
        })
        .collect();

    Plot::new("monthly_releases")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Month")
        .y_axis_label("Releases")
        .x_axis_formatter(|mark: GridMark, _range| month_tick(mark.value))
        .show(ui, |plot_ui| {
            let red = Color32::from_rgb(0xE5, 0x09, 0x14);
            plot_ui.bar_chart(BarChart::new(bars).name("Releases").color(red));
        });
}

/// Month name for whole-number ticks in 1..=12, blank elsewhere.
fn month_tick(value: f64) -> String {
    if value.fract() != 0.0 || !(1.0..=12.0).contains(&value) {
        return String::new();
    }
    Month::new(value as u8).map_or_else(String::new, |m| m.name().to_string())
}
