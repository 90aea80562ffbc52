use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{SeasonRecord, TeamStanding, TeamYearTotal};

// ---------------------------------------------------------------------------
// Recency weighting
// ---------------------------------------------------------------------------

/// Linear recency bias: `1 + step × (year − base_year)`, never below zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightModel {
    pub base_year: i32,
    pub step: f64,
}

impl Default for WeightModel {
    fn default() -> Self {
        WeightModel {
            base_year: 2017,
            step: 0.15,
        }
    }
}

impl WeightModel {
    pub fn weight_for(&self, year: i32) -> f64 {
        let offset = f64::from(year) - f64::from(self.base_year);
        (1.0 + self.step * offset).max(0.0)
    }
}

/// Which aggregate drives the chart and the standings order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    Weighted,
    Total,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Weighted => "Weighted Total Points",
            Metric::Total => "Total Points",
        }
    }

    pub fn value(self, standing: &TeamStanding) -> f64 {
        match self {
            Metric::Weighted => standing.weighted_points,
            Metric::Total => standing.total_points,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation stages
// ---------------------------------------------------------------------------

/// Plain points sum per team.
pub fn total_by_team<'a, I>(records: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a SeasonRecord>,
{
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.team.clone()).or_default() += r.points;
    }
    totals
}

/// Group by (team, year), then attach the weight for that year.
pub fn team_year_totals<'a, I>(records: I, model: &WeightModel) -> Vec<TeamYearTotal>
where
    I: IntoIterator<Item = &'a SeasonRecord>,
{
    let mut grouped: BTreeMap<(String, i32), f64> = BTreeMap::new();
    for r in records {
        *grouped.entry((r.team.clone(), r.year)).or_default() += r.points;
    }
    grouped
        .into_iter()
        .map(|((team, year), points)| {
            let weight = model.weight_for(year);
            TeamYearTotal {
                team,
                year,
                points,
                weight,
                weighted_points: points * weight,
            }
        })
        .collect()
}

/// Per-team totals and weighted totals, sorted by `metric` descending.
pub fn standings<'a, I>(records: I, model: &WeightModel, metric: Metric) -> Vec<TeamStanding>
where
    I: IntoIterator<Item = &'a SeasonRecord>,
{
    let mut by_team: BTreeMap<String, TeamStanding> = BTreeMap::new();
    for ty in team_year_totals(records, model) {
        let entry = by_team
            .entry(ty.team.clone())
            .or_insert_with(|| TeamStanding {
                team: ty.team,
                total_points: 0.0,
                weighted_points: 0.0,
            });
        entry.total_points += ty.points;
        entry.weighted_points += ty.weighted_points;
    }

    let mut out: Vec<TeamStanding> = by_team.into_values().collect();
    out.sort_by(|a, b| by_metric_desc(a, b, metric));
    out
}

/// Team with the highest weighted points; equal scores go to the
/// alphabetically first team.
pub fn predicted_winner(standings: &[TeamStanding]) -> Option<&TeamStanding> {
    standings
        .iter()
        .min_by(|a, b| by_metric_desc(a, b, Metric::Weighted))
}

fn by_metric_desc(a: &TeamStanding, b: &TeamStanding, metric: Metric) -> Ordering {
    metric
        .value(b)
        .total_cmp(&metric.value(a))
        .then_with(|| a.team.cmp(&b.team))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(team: &str, points: f64, year: i32) -> SeasonRecord {
        SeasonRecord {
            team: team.to_string(),
            points,
            year,
        }
    }

    #[test]
    fn weights_grow_linearly_from_base_year() {
        let m = WeightModel::default();
        assert_eq!(m.weight_for(2017), 1.0);
        assert!((m.weight_for(2018) - 1.15).abs() < 1e-12);
        assert!((m.weight_for(2025) - 2.2).abs() < 1e-12);
    }

    #[test]
    fn weights_are_clamped_at_zero_for_old_seasons() {
        let m = WeightModel::default();
        assert!((m.weight_for(2016) - 0.85).abs() < 1e-12);
        assert_eq!(m.weight_for(2000), 0.0);
        assert_eq!(m.weight_for(0), 0.0);
    }

    #[test]
    fn extreme_base_year_does_not_overflow() {
        let m = WeightModel {
            base_year: i32::MIN,
            step: 0.15,
        };
        assert!(m.weight_for(i32::MAX).is_finite());
        assert!(m.weight_for(i32::MAX) > 1.0);

        let m = WeightModel {
            base_year: i32::MAX,
            step: 0.15,
        };
        assert_eq!(m.weight_for(i32::MIN), 0.0);
    }

    #[test]
    fn weighted_total_over_two_seasons() {
        let records = [rec("Arsenal", 10.0, 2017), rec("Arsenal", 20.0, 2018)];
        let table = standings(&records, &WeightModel::default(), Metric::Weighted);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].total_points, 30.0);
        assert!((table[0].weighted_points - 33.0).abs() < 1e-9);
    }

    #[test]
    fn team_year_stage_sums_duplicate_rows_first() {
        let records = [
            rec("Spurs", 30.0, 2019),
            rec("Spurs", 5.0, 2019),
            rec("Spurs", 40.0, 2020),
        ];
        let ty = team_year_totals(&records, &WeightModel::default());
        assert_eq!(ty.len(), 2);
        assert_eq!(ty[0].year, 2019);
        assert_eq!(ty[0].points, 35.0);
        assert!((ty[0].weight - 1.3).abs() < 1e-12);
        assert!((ty[0].weighted_points - 45.5).abs() < 1e-9);
    }

    #[test]
    fn totals_do_not_depend_on_row_order() {
        let mut records = vec![
            rec("Chelsea", 72.0, 2019),
            rec("Leeds", 59.0, 2020),
            rec("Chelsea", 67.0, 2020),
            rec("Leeds", 38.0, 2022),
        ];
        let forward = total_by_team(&records);
        records.reverse();
        let backward = total_by_team(&records);
        assert_eq!(forward, backward);
        assert_eq!(forward["Chelsea"], 139.0);
        assert_eq!(forward["Leeds"], 97.0);
    }

    #[test]
    fn standings_sorted_descending_by_chosen_metric() {
        // Brighton scores more in total, Villa more once weighted.
        let records = [rec("Brighton", 60.0, 2017), rec("Villa", 50.0, 2023)];
        let m = WeightModel::default();

        let weighted = standings(&records, &m, Metric::Weighted);
        assert_eq!(weighted[0].team, "Villa");

        let total = standings(&records, &m, Metric::Total);
        assert_eq!(total[0].team, "Brighton");
    }

    #[test]
    fn winner_ties_break_alphabetically() {
        let records = [
            rec("Wolves", 40.0, 2017),
            rec("Burnley", 40.0, 2017),
            rec("Fulham", 20.0, 2017),
        ];
        let table = standings(&records, &WeightModel::default(), Metric::Total);
        let winner = predicted_winner(&table).map(|s| s.team.as_str());
        assert_eq!(winner, Some("Burnley"));
    }

    #[test]
    fn no_records_means_no_winner() {
        let records: Vec<SeasonRecord> = Vec::new();
        let table = standings(&records, &WeightModel::default(), Metric::Weighted);
        assert!(table.is_empty());
        assert!(predicted_winner(&table).is_none());
    }
}
