use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate::Metric;
use crate::state::{AppState, Prediction, TableView};

const SUCCESS: Color32 = Color32::from_rgb(46, 160, 67);
const WARNING: Color32 = Color32::from_rgb(219, 154, 4);

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Year range ----
    ui.strong("Select Years");
    let (min, max) = (state.config.min_year, state.config.max_year);
    let mut lo = state.range.lo;
    let mut hi = state.range.hi;
    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, min..=max).text("From"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, min..=max).text("To"))
        .changed();
    if lo_changed || hi_changed {
        state.set_range(lo, hi);
    }
    ui.separator();

    // ---- Team multi-select ----
    let n_selected = state.selected_teams.len();
    let n_total = state.available_teams.len();
    ui.strong(format!("Select Teams  ({n_selected}/{n_total})"));

    if state.available_teams.is_empty() {
        ui.label("No teams in the selected years.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    // Clone so we can mutate state inside the loop.
    let teams = state.available_teams.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for team in &teams {
                let mut checked = state.selected_teams.contains(team);
                let text = RichText::new(team).color(state.colors.color_for(team));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_team(team);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records from {} files, {} visible in {}",
            state.dataset.len(),
            state.dataset.source_files.len(),
            state.view.visible_indices.len(),
            state.range
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel header: prediction + view switches
// ---------------------------------------------------------------------------

/// Predicted winner, or a warning when nothing matches the filters.
pub fn prediction_banner(ui: &mut Ui, state: &AppState) {
    ui.heading("Prediction");
    match &state.view.prediction {
        Prediction::Winner(team) => {
            ui.label(
                RichText::new(format!(
                    "Based on recent trends, the predicted winner is {team}!"
                ))
                .color(SUCCESS)
                .strong(),
            );
        }
        Prediction::NoData => {
            ui.label(
                RichText::new(
                    "No data available for the selected filters. \
                     Please check if data for the selected years exists.",
                )
                .color(WARNING),
            );
        }
    }
}

/// Chart metric and table view selectors.
pub fn view_controls(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Chart:");
        for metric in [Metric::Weighted, Metric::Total] {
            if ui
                .selectable_label(state.metric == metric, metric.label())
                .clicked()
            {
                state.set_metric(metric);
            }
        }

        ui.separator();

        ui.label("Table:");
        for (view, label) in [
            (TableView::Records, "Seasons"),
            (TableView::Standings, "Standings"),
        ] {
            if ui
                .selectable_label(state.table_view == view, label)
                .clicked()
            {
                state.table_view = view;
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open season data folder")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("Switching data folder to {}", dir.display());
        state.set_data_dir(dir);
    }
}
