use std::path::PathBuf;

use eframe::egui::{self, RichText, ScrollArea, Ui};

use streamscope::data::Dataset;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StreamscopeApp {
    pub state: AppState,
}

impl StreamscopeApp {
    pub fn new(dataset: Dataset, source: PathBuf) -> Self {
        Self {
            state: AppState::new(dataset, source),
        }
    }
}

impl eframe::App for StreamscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, recommendations ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let view = &state.view;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Content Strategy Dashboard").size(28.0).strong());
    });
    ui.separator();

    ui.strong("Key Performance Indicators");
    panels::metrics_row(ui, view);
    ui.separator();

    ui.columns(2, |cols: &mut [Ui]| {
        plot::type_distribution(&mut cols[0], view);
        plot::genre_engagement(&mut cols[1], state);
    });
    ui.separator();

    ui.heading("Performance Analysis");
    ui.columns(2, |cols: &mut [Ui]| {
        plot::imdb_scatter(&mut cols[0], view);
        plot::year_trend(&mut cols[1], view);
    });
    ui.separator();

    ui.heading("Geographic Content Analysis");
    ui.columns(2, |cols: &mut [Ui]| {
        plot::country_volume(&mut cols[0], view);
        panels::country_table(&mut cols[1], view);
    });
    ui.separator();

    ui.heading("Release Strategy Analysis");
    ui.columns(2, |cols: &mut [Ui]| {
        plot::monthly_releases(&mut cols[0], view);
        panels::recommendations(&mut cols[1], view);
    });
}
