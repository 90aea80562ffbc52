use std::collections::BTreeSet;

use super::model::{SeasonDataset, YearRange};

// ---------------------------------------------------------------------------
// Filter predicate: year window + selected teams
// ---------------------------------------------------------------------------

/// Team selection from the multi-select: the set of team names to keep.
pub type TeamSelection = BTreeSet<String>;

/// Distinct teams with at least one record inside `range`.
///
/// These are the options offered by the team multi-select, and the default
/// selection.
pub fn teams_in_range(dataset: &SeasonDataset, range: YearRange) -> TeamSelection {
    dataset
        .records
        .iter()
        .filter(|r| range.contains(r.year))
        .map(|r| r.team.clone())
        .collect()
}

/// Return indices of records that pass the year and team filters.
///
/// A record passes when:
/// * its year lies inside `range` (inclusive), and
/// * its team is in `teams`. An empty selection therefore hides everything.
pub fn filtered_indices(
    dataset: &SeasonDataset,
    range: YearRange,
    teams: &TeamSelection,
) -> Vec<usize> {
    if teams.is_empty() {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| range.contains(r.year) && teams.contains(&r.team))
        .map(|(i, _)| i)
        .collect()
}
