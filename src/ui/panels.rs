use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use streamscope::analysis::{format_stat, DashboardView, NO_DATA};
use streamscope::data::ContentType;

use crate::color;
use crate::state::{AppState, Facet};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dashboard Filters");
    ui.separator();

    let Some((first_year, last_year)) = state.dataset.year_bounds() else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the closures.
    let dataset = state.dataset.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            ui.strong("Release Year");
            let (mut from, mut to) = (state.filter.year_min, state.filter.year_max);
            ui.add(egui::Slider::new(&mut from, first_year..=last_year).text("from"));
            ui.add(egui::Slider::new(&mut to, first_year..=last_year).text("to"));
            state.set_year_range(from, to);
            if from > to {
                ui.label(RichText::new("Empty range").color(Color32::RED));
            }
            ui.separator();

            // ---- Content type ----
            let n_types = dataset.types().len();
            facet_header(ui, state, Facet::Type, "Content Type", n_types, |ui, state| {
                for &t in dataset.types() {
                    let mut checked = state.filter.types.contains(&t);
                    let text = RichText::new(t.label()).color(color::type_color(t));
                    if ui.checkbox(&mut checked, text).changed() {
                        state.toggle_type(t);
                    }
                }
            });

            // ---- Genres ----
            let n_genres = dataset.genres().len();
            facet_header(ui, state, Facet::Genre, "Genres", n_genres, |ui, state| {
                for genre in dataset.genres() {
                    let mut checked = state.filter.genres.contains(genre);
                    let text = RichText::new(genre).color(state.genre_colors.color_for(genre));
                    if ui.checkbox(&mut checked, text).changed() {
                        state.toggle_genre(genre);
                    }
                }
            });

            // ---- Countries ----
            let n_countries = dataset.countries().len();
            facet_header(ui, state, Facet::Country, "Countries", n_countries, |ui, state| {
                for country in dataset.countries() {
                    let mut checked = state.filter.countries.contains(country);
                    if ui.checkbox(&mut checked, country.as_str()).changed() {
                        state.toggle_country(country);
                    }
                }
            });
        });
}

/// Collapsible multi-select with All / None buttons and a selected count.
fn facet_header(
    ui: &mut Ui,
    state: &mut AppState,
    facet: Facet,
    title: &str,
    n_total: usize,
    add_values: impl FnOnce(&mut Ui, &mut AppState),
) {
    let n_selected = match facet {
        Facet::Type => state.filter.types.len(),
        Facet::Genre => state.filter.genres.len(),
        Facet::Country => state.filter.countries.len(),
    };
    let header_text = format!("{title}  ({n_selected}/{n_total})");

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(facet == Facet::Type)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(facet);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(facet);
                }
            });
            add_values(ui, state);
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} titles loaded, {} visible",
            state.source.display(),
            state.dataset.len(),
            state.view.summary.count
        ));

        let rejected = state.dataset.rejected().len();
        if rejected > 0 {
            ui.separator();
            let text = RichText::new(format!("{rejected} malformed rows skipped"));
            ui.label(text.color(Color32::YELLOW))
                .on_hover_text(
                    state
                        .dataset
                        .rejected()
                        .iter()
                        .take(20)
                        .map(|r| format!("row {}: {}", r.row, r.reason))
                        .collect::<Vec<_>>()
                        .join("\n"),
                );
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open content data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match streamscope::data::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} titles ({} genres, {} countries)",
                    dataset.len(),
                    dataset.genres().len(),
                    dataset.countries().len()
                );
                state.set_dataset(dataset, path);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Key metrics row
// ---------------------------------------------------------------------------

fn metric(ui: &mut Ui, label: &str, value: String, note: Option<String>) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.heading(RichText::new(value).strong());
        if let Some(note) = note {
            ui.label(RichText::new(note).small().weak());
        }
    });
}

/// The four headline numbers.
pub fn metrics_row(ui: &mut Ui, view: &DashboardView) {
    let s = &view.summary;
    let delta = view.baseline_delta();
    ui.columns(4, |cols: &mut [Ui]| {
        metric(
            &mut cols[0],
            "Total Content",
            s.count.to_string(),
            Some(format!("{delta:+} vs baseline")),
        );
        metric(
            &mut cols[1],
            "Avg Engagement Score",
            format_stat(s.mean_engagement, 1, "%"),
            None,
        );
        metric(
            &mut cols[2],
            "Total Viewership",
            format_stat(s.total_viewership_hours.map(|h| h / 1_000_000.0), 1, "M hours"),
            None,
        );
        metric(
            &mut cols[3],
            "Avg Completion Rate",
            format_stat(s.mean_completion_rate.map(|r| r * 100.0), 1, "%"),
            None,
        );
    });
}

// ---------------------------------------------------------------------------
// Country performance table
// ---------------------------------------------------------------------------

pub fn country_table(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Country Performance Metrics");
    let rows = &view.summary.country_ranking;
    if rows.is_empty() {
        ui.weak(NO_DATA);
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .columns(Column::remainder().at_least(80.0), 3)
        .header(20.0, |mut header| {
            for title in ["Country", "Engagement Score", "Completion Rate", "Total Hours"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for c in rows {
                body.row(22.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(c.country.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.add(
                            egui::ProgressBar::new((c.mean_engagement / 100.0) as f32)
                                .text(format!("{:.2}", c.mean_engagement)),
                        );
                    });
                    row.col(|ui: &mut Ui| {
                        ui.add(
                            egui::ProgressBar::new(c.mean_completion_rate as f32)
                                .text(format!("{:.2}", c.mean_completion_rate)),
                        );
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.0}", c.total_viewership_hours));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

pub fn recommendations(ui: &mut Ui, view: &DashboardView) {
    let recs = &view.recommendations;
    let s = &view.summary;

    ui.strong("Strategic Insights");
    ui.add_space(4.0);

    let genre = recs.top_genre.as_ref().map_or(NO_DATA.to_string(), |p| p.key.clone());
    ui.label(RichText::new(format!("Top Performing Genre: {genre}")).strong());
    ui.label("Highest average engagement score; recommend increased investment.");
    ui.add_space(4.0);

    let market = recs.best_market.as_ref().map_or(NO_DATA.to_string(), |p| p.key.clone());
    ui.label(RichText::new(format!("Best Market: {market}")).strong());
    ui.label("Highest content performance; expansion opportunity.");
    ui.add_space(4.0);

    let month = recs
        .peak_release_month
        .as_ref()
        .map_or(NO_DATA.to_string(), |p| p.key.to_string());
    ui.label(RichText::new(format!("Optimal Release Month: {month}")).strong());
    ui.label("Peak release activity; strategic timing advantage.");
    ui.add_space(4.0);

    ui.label(RichText::new("Key Metrics").strong());
    ui.label(format!("{} total content pieces analyzed", s.count));
    ui.label(format!(
        "{} average engagement score",
        format_stat(s.mean_engagement, 1, "%")
    ));
    ui.label(format!(
        "{} average completion rate",
        format_stat(s.mean_completion_rate.map(|r| r * 100.0), 1, "%")
    ));
    ui.label(format!(
        "{} movies, {} TV shows",
        s.type_count(ContentType::Movie),
        s.type_count(ContentType::TvShow)
    ));
}
