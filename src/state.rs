use std::path::PathBuf;
use std::sync::Arc;

use crate::color::TeamColors;
use crate::config::DashboardConfig;
use crate::data::aggregate::{predicted_winner, standings, Metric, WeightModel};
use crate::data::cache::DatasetCache;
use crate::data::filter::{filtered_indices, teams_in_range, TeamSelection};
use crate::data::loader::LoadError;
use crate::data::model::{SeasonDataset, TeamStanding, YearRange};

// ---------------------------------------------------------------------------
// Derived view: everything the panels draw
// ---------------------------------------------------------------------------

/// Message shown above the chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Winner(String),
    NoData,
}

/// What the table below the chart lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableView {
    #[default]
    Records,
    Standings,
}

/// Result of one filter/aggregate pass over the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Indices of records passing the current filters.
    pub visible_indices: Vec<usize>,
    /// One entry per team, sorted descending by the chart metric.
    pub standings: Vec<TeamStanding>,
    pub prediction: Prediction,
}

impl DashboardView {
    pub fn compute(
        dataset: &SeasonDataset,
        range: YearRange,
        teams: &TeamSelection,
        weighting: &WeightModel,
        metric: Metric,
    ) -> Self {
        let visible_indices = filtered_indices(dataset, range, teams);
        let standings = standings(
            visible_indices.iter().map(|&i| &dataset.records[i]),
            weighting,
            metric,
        );
        let prediction = match predicted_winner(&standings) {
            Some(s) => Prediction::Winner(s.team.clone()),
            None => Prediction::NoData,
        };
        DashboardView {
            visible_indices,
            standings,
            prediction,
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        DashboardView {
            visible_indices: Vec::new(),
            standings: Vec::new(),
            prediction: Prediction::NoData,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Memoised ingestion of `config.data_dir`.
    cache: DatasetCache,

    /// Current dataset (empty until a folder loads).
    pub dataset: Arc<SeasonDataset>,

    /// Selected year window.
    pub range: YearRange,

    /// Teams with data inside `range`: the multi-select options.
    pub available_teams: TeamSelection,

    /// Teams ticked in the multi-select.
    pub selected_teams: TeamSelection,

    /// Aggregate shown on the chart.
    pub metric: Metric,

    pub table_view: TableView,

    pub colors: TeamColors,

    /// Cached result of the last refilter.
    pub view: DashboardView,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let range = YearRange::new(config.min_year, config.max_year);
        Self {
            config,
            cache: DatasetCache::new(),
            dataset: Arc::new(SeasonDataset::default()),
            range,
            available_teams: TeamSelection::new(),
            selected_teams: TeamSelection::new(),
            metric: Metric::default(),
            table_view: TableView::default(),
            colors: TeamColors::default(),
            view: DashboardView::default(),
            status_message: None,
        }
    }

    /// Load (or re-use) the configured data folder.
    pub fn load_data(&mut self) {
        let dir = self.config.data_dir.clone();
        match self.cache.load(&dir, &self.config.files, &self.config.schema) {
            Ok(dataset) => {
                self.status_message = if dataset.is_empty() {
                    Some(format!("No season files found in {}", dir.display()))
                } else {
                    None
                };
                self.set_dataset(dataset);
            }
            Err(e) => {
                match &e {
                    LoadError::MissingDirectory(_) => log::warn!("{e}"),
                    _ => log::error!("Failed to load season files: {e}"),
                }
                self.status_message = Some(e.to_string());
                self.set_dataset(Arc::new(SeasonDataset::default()));
            }
        }
    }

    /// Point at another folder and load it.
    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.config.data_dir = dir;
        self.load_data();
    }

    /// Forget the cache and read the folder again.
    pub fn reload(&mut self) {
        self.cache.invalidate();
        self.load_data();
    }

    /// Swap in a dataset; colours and team options are rebuilt.
    pub fn set_dataset(&mut self, dataset: Arc<SeasonDataset>) {
        self.colors = TeamColors::new(&dataset.teams);
        self.dataset = dataset;
        self.reset_team_selection();
    }

    /// Change the year window. Moving the lower bound past the upper one
    /// drags the upper along, and the other way round.
    pub fn set_range(&mut self, lo: i32, hi: i32) {
        let lo = lo.clamp(self.config.min_year, self.config.max_year);
        let hi = hi.clamp(self.config.min_year, self.config.max_year);
        let range = if lo > hi && lo != self.range.lo {
            YearRange { lo, hi: lo }
        } else if lo > hi {
            YearRange { lo: hi, hi }
        } else {
            YearRange { lo, hi }
        };
        if range != self.range {
            self.range = range;
            self.reset_team_selection();
        }
    }

    /// Offer the teams present in the current window, all ticked.
    fn reset_team_selection(&mut self) {
        self.available_teams = teams_in_range(&self.dataset, self.range);
        self.selected_teams = self.available_teams.clone();
        self.refilter();
    }

    /// Recompute the view after a filter change.
    pub fn refilter(&mut self) {
        self.view = DashboardView::compute(
            &self.dataset,
            self.range,
            &self.selected_teams,
            &self.config.weighting,
            self.metric,
        );
    }

    pub fn set_metric(&mut self, metric: Metric) {
        if self.metric != metric {
            self.metric = metric;
            self.refilter();
        }
    }

    /// Toggle a single team in the multi-select.
    pub fn toggle_team(&mut self, team: &str) {
        if !self.selected_teams.remove(team) {
            self.selected_teams.insert(team.to_string());
        }
        self.refilter();
    }

    pub fn select_all(&mut self) {
        self.selected_teams = self.available_teams.clone();
        self.refilter();
    }

    pub fn select_none(&mut self) {
        self.selected_teams.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SeasonRecord;

    fn dataset() -> Arc<SeasonDataset> {
        let rows = [
            ("Liverpool", 99.0, 2020),
            ("Man City", 81.0, 2020),
            ("Man City", 93.0, 2022),
            ("Liverpool", 92.0, 2022),
            ("Leeds", 38.0, 2022),
            ("Arsenal", 89.0, 2024),
        ];
        Arc::new(SeasonDataset::from_records(
            rows.iter()
                .map(|&(team, points, year)| SeasonRecord {
                    team: team.to_string(),
                    points,
                    year,
                })
                .collect(),
            Vec::new(),
        ))
    }

    fn state() -> AppState {
        let mut s = AppState::new(DashboardConfig::default());
        s.set_dataset(dataset());
        s
    }

    #[test]
    fn defaults_select_every_team() {
        let s = state();
        assert_eq!(s.range, YearRange::new(2017, 2025));
        assert_eq!(s.selected_teams.len(), 4);
        assert_eq!(s.view.visible_indices.len(), 6);
        assert_eq!(s.view.standings.len(), 4);
    }

    #[test]
    fn winner_uses_weighted_points() {
        // Liverpool: 99×1.45 + 92×1.75 = 304.55; Man City: 81×1.45 + 93×1.75 = 280.2
        let s = state();
        assert_eq!(s.view.prediction, Prediction::Winner("Liverpool".into()));
    }

    #[test]
    fn empty_selection_gives_no_data() {
        let mut s = state();
        s.select_none();
        assert!(s.view.visible_indices.is_empty());
        assert!(s.view.standings.is_empty());
        assert_eq!(s.view.prediction, Prediction::NoData);
    }

    #[test]
    fn range_change_resets_selection_to_teams_in_window() {
        let mut s = state();
        s.toggle_team("Leeds");
        assert!(!s.selected_teams.contains("Leeds"));

        s.set_range(2022, 2022);
        let names: Vec<&str> = s.selected_teams.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["Leeds", "Liverpool", "Man City"]);
        assert_eq!(s.view.visible_indices, vec![2, 3, 4]);
    }

    #[test]
    fn crossing_bounds_drags_the_other_one() {
        let mut s = state();
        s.set_range(2020, 2021);
        s.set_range(2023, 2021);
        assert_eq!(s.range, YearRange { lo: 2023, hi: 2023 });
        s.set_range(2023, 2019);
        assert_eq!(s.range, YearRange { lo: 2019, hi: 2019 });
    }

    #[test]
    fn window_without_data_warns() {
        let mut s = state();
        s.set_range(2017, 2018);
        assert!(s.available_teams.is_empty());
        assert_eq!(s.view.prediction, Prediction::NoData);
    }

    #[test]
    fn metric_switch_reorders_standings() {
        let mut s = state();
        s.set_range(2020, 2024);
        s.set_metric(Metric::Total);
        let first = &s.view.standings[0];
        assert_eq!(first.team, "Liverpool");
        assert_eq!(first.total_points, 191.0);
        // The prediction is always the weighted leader.
        assert_eq!(s.view.prediction, Prediction::Winner("Liverpool".into()));
    }

    #[test]
    fn missing_folder_leaves_an_empty_dataset_and_a_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = state();
        s.set_data_dir(dir.path().join("absent"));
        assert!(s.dataset.is_empty());
        let status = s.status_message.as_deref().unwrap_or("");
        assert!(status.contains("does not exist"));
        assert_eq!(s.view.prediction, Prediction::NoData);
    }
}
