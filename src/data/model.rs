use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// SeasonRecord – one row of a season table
// ---------------------------------------------------------------------------

/// One team's point total for one league season.
///
/// `year` comes from the source file name (0 when the name carries none) and
/// `team` has already had its point-deduction annotation stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRecord {
    pub team: String,
    pub points: f64,
    pub year: i32,
}

// ---------------------------------------------------------------------------
// YearRange – inclusive season window
// ---------------------------------------------------------------------------

/// Inclusive year window `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub lo: i32,
    pub hi: i32,
}

impl YearRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(a: i32, b: i32) -> Self {
        YearRange {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.lo <= year && year <= self.hi
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.lo, self.hi)
    }
}

// ---------------------------------------------------------------------------
// Aggregated records
// ---------------------------------------------------------------------------

/// Points for one team in one season, with its recency weight applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamYearTotal {
    pub team: String,
    pub year: i32,
    pub points: f64,
    pub weight: f64,
    pub weighted_points: f64,
}

/// Final per-team aggregate over the selected seasons.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamStanding {
    pub team: String,
    pub total_points: f64,
    pub weighted_points: f64,
}

// ---------------------------------------------------------------------------
// SeasonDataset – everything ingested from the data folder
// ---------------------------------------------------------------------------

/// The full ingested record set with pre-computed team and year indices.
#[derive(Debug, Clone, Default)]
pub struct SeasonDataset {
    /// All records, in file discovery order.
    pub records: Vec<SeasonRecord>,
    /// Sorted set of distinct team names.
    pub teams: BTreeSet<String>,
    /// Sorted set of distinct years.
    pub years: BTreeSet<i32>,
    /// Season files the records were read from.
    pub source_files: Vec<PathBuf>,
}

impl SeasonDataset {
    /// Build the team/year indices from the loaded records.
    pub fn from_records(records: Vec<SeasonRecord>, source_files: Vec<PathBuf>) -> Self {
        let teams = records.iter().map(|r| r.team.clone()).collect();
        let years = records.iter().map(|r| r.year).collect();
        SeasonDataset {
            records,
            teams,
            years,
            source_files,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
