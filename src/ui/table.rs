use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{AppState, TableView};

const ROW_HEIGHT: f32 = 18.0;

/// Render the filtered seasons or the aggregated standings.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    match state.table_view {
        TableView::Records => {
            ui.push_id("records_table", |ui: &mut Ui| records_table(ui, state));
        }
        TableView::Standings => {
            ui.push_id("standings_table", |ui: &mut Ui| standings_table(ui, state));
        }
    }
}

fn records_table(ui: &mut Ui, state: &AppState) {
    let dataset = &state.dataset;
    let rows = &state.view.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(60.0))
        .column(Column::remainder().at_least(160.0))
        .column(Column::exact(70.0))
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in ["year", "team", "points"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let r = &dataset.records[rows[row.index()]];
                row.col(|ui| {
                    ui.label(r.year.to_string());
                });
                row.col(|ui| {
                    let color = state.colors.color_for(&r.team);
                    ui.label(RichText::new(&r.team).color(color));
                });
                row.col(|ui| {
                    ui.label(r.points.to_string());
                });
            });
        });
}

fn standings_table(ui: &mut Ui, state: &AppState) {
    let standings = &state.view.standings;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(40.0))
        .column(Column::remainder().at_least(160.0))
        .column(Column::exact(90.0))
        .column(Column::exact(120.0))
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in ["#", "team", "total_points", "weighted_points"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, standings.len(), |mut row| {
                let i = row.index();
                let s = &standings[i];
                row.col(|ui| {
                    ui.label((i + 1).to_string());
                });
                row.col(|ui| {
                    let color = state.colors.color_for(&s.team);
                    ui.label(RichText::new(&s.team).color(color));
                });
                row.col(|ui| {
                    ui.label(s.total_points.to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", s.weighted_points));
                });
            });
        });
}
