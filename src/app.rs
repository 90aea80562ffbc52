use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

const CHART_HEIGHT: f32 = 400.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LeagueTableApp {
    pub state: AppState,
}

impl LeagueTableApp {
    /// Build the app and read the configured data folder once.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.load_data();
        Self { state }
    }
}

impl eframe::App for LeagueTableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: prediction, chart, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!(
                "Premier League Table ({}-{})",
                self.state.config.min_year, self.state.config.max_year
            ));
            ui.label(
                "Visualizes the Premier League table and predicts the likely winner. \
                 Point deductions for punishments are included in the totals.",
            );
            ui.separator();

            panels::prediction_banner(ui, &self.state);
            ui.add_space(4.0);
            panels::view_controls(ui, &mut self.state);
            ui.separator();

            plot::standings_chart(ui, &self.state, CHART_HEIGHT);
            ui.separator();

            table::data_table(ui, &self.state);
        });
    }
}
