use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot, PlotPoint, Text};

use crate::data::model::TeamStanding;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Standings bar chart (central panel)
// ---------------------------------------------------------------------------

const BAR_WIDTH: f64 = 0.7;

/// Hover text for a team's bar. Both aggregates are shown whichever one the
/// chart is plotting.
pub fn bar_tooltip(standing: &TeamStanding) -> String {
    format!(
        "team: {}\ntotal_points: {:.1}\nweighted_points: {:.2}",
        standing.team, standing.total_points, standing.weighted_points
    )
}

/// One bar per team, tallest first, with the value printed above each bar.
pub fn standings_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let standings = &state.view.standings;
    if standings.is_empty() {
        return;
    }

    let metric = state.metric;
    let names: Vec<String> = standings.iter().map(|s| s.team.clone()).collect();
    let tooltips: Vec<String> = standings.iter().map(bar_tooltip).collect();

    let bars: Vec<Bar> = standings
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Bar::new(i as f64, metric.value(s))
                .name(&s.team)
                .fill(state.colors.color_for(&s.team))
                .width(BAR_WIDTH)
        })
        .collect();

    Plot::new("standings_chart")
        .height(height)
        .x_axis_label("Team")
        .y_axis_label(metric.label())
        .x_axis_formatter(move |mark: GridMark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > f64::EPSILON || i < 0.0 {
                return String::new();
            }
            names.get(i as usize).cloned().unwrap_or_default()
        })
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let chart = BarChart::new(bars)
                .name(metric.label())
                .element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
                    let i = bar.argument.round();
                    if i < 0.0 {
                        return String::new();
                    }
                    tooltips.get(i as usize).cloned().unwrap_or_default()
                }));
            plot_ui.bar_chart(chart);

            for (i, s) in standings.iter().enumerate() {
                let value = metric.value(s);
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(i as f64, value),
                        RichText::new(format!("{value:.1}")).small(),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}
