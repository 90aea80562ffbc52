use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{SeasonDataset, SeasonRecord};
use super::normalize::{clean_team_name, coerce_points};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data folder {0} does not exist")]
    MissingDirectory(PathBuf),

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: expected at least {required} columns, header has {found}")]
    Schema {
        path: PathBuf,
        required: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// File naming and column layout
// ---------------------------------------------------------------------------

/// Which files in the data folder are season exports:
/// `<prefix>*.<extension>`, e.g. `premier_league_2021.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePattern {
    pub prefix: String,
    pub extension: String,
}

impl Default for FilePattern {
    fn default() -> Self {
        FilePattern {
            prefix: "premier_league_".to_string(),
            extension: "csv".to_string(),
        }
    }
}

impl FilePattern {
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.prefix)
            && Path::new(file_name)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}

/// Zero-based positions of the two meaningful columns in a wide
/// scoreboard export. Every other column is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonSchema {
    pub team_column: usize,
    pub points_column: usize,
}

impl Default for SeasonSchema {
    fn default() -> Self {
        SeasonSchema {
            team_column: 1,
            points_column: 17,
        }
    }
}

impl SeasonSchema {
    /// Minimum number of header columns a file needs.
    pub fn required_columns(&self) -> usize {
        self.team_column.max(self.points_column) + 1
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// List season files in `dir`, sorted by path.
///
/// A folder without matching files is not an error; a missing folder is.
pub fn discover_season_files(dir: &Path, pattern: &FilePattern) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()));
    }
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| pattern.matches(n));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\D)(\d{4})(?:\D|$)").unwrap());

/// First run of exactly four digits in `file_name`, or 0 when there is none.
pub fn parse_year(file_name: &str) -> i32 {
    YEAR.captures(file_name)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Load one season file. The year is taken from its file name.
pub fn load_season_file(
    path: &Path,
    schema: &SeasonSchema,
) -> Result<Vec<SeasonRecord>, LoadError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let year = parse_year(&file_name);
    if year == 0 {
        log::warn!("No 4-digit year in {file_name:?}; its rows get year 0");
    }

    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let found = reader.headers().map_err(csv_err)?.len();
    let required = schema.required_columns();
    if found < required {
        return Err(LoadError::Schema {
            path: path.to_path_buf(),
            required,
            found,
        });
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_err)?;

        let team = clean_team_name(row.get(schema.team_column).unwrap_or(""));
        if team.is_empty() {
            continue;
        }
        let points = row
            .get(schema.points_column)
            .map(coerce_points)
            .unwrap_or(0.0);

        records.push(SeasonRecord { team, points, year });
    }

    Ok(records)
}

/// Discover and load every season file in `dir` into one dataset.
pub fn load_directory(
    dir: &Path,
    pattern: &FilePattern,
    schema: &SeasonSchema,
) -> Result<SeasonDataset, LoadError> {
    let files = discover_season_files(dir, pattern)?;

    let mut records = Vec::new();
    for path in &files {
        let rows = load_season_file(path, schema)?;
        log::debug!("{}: {} rows", path.display(), rows.len());
        records.extend(rows);
    }

    Ok(SeasonDataset::from_records(records, files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// A row in the wide export layout: rank, team, 15 unused cells, points.
    fn wide_row(rank: u32, team: &str, points: &str) -> String {
        let mut cells = vec![rank.to_string(), format!("\"{team}\"")];
        cells.extend((2..17).map(|_| String::new()));
        cells.push(points.to_string());
        cells.join(",")
    }

    fn wide_header() -> String {
        let mut cells: Vec<String> = (0..18).map(|i| format!("Unnamed: {i}")).collect();
        cells[0] = "Pos".to_string();
        cells.join(",")
    }

    fn write_season(dir: &Path, name: &str, rows: &[String]) {
        let mut text = wide_header();
        for r in rows {
            text.push('\n');
            text.push_str(r);
        }
        text.push('\n');
        fs::write(dir.join(name), text).unwrap();
    }

    /// Load with the default file pattern and wide schema.
    fn load_default(dir: &Path) -> Result<SeasonDataset, LoadError> {
        load_directory(dir, &FilePattern::default(), &SeasonSchema::default())
    }

    fn record(team: &str, points: f64, year: i32) -> SeasonRecord {
        SeasonRecord {
            team: team.to_string(),
            points,
            year,
        }
    }

    #[test]
    fn year_is_first_four_digit_run() {
        assert_eq!(parse_year("premier_league_2021.csv"), 2021);
        assert_eq!(parse_year("2019_premier_league_2020.csv"), 2019);
        assert_eq!(parse_year("premier_league_20210.csv"), 0);
        assert_eq!(parse_year("premier_league_latest.csv"), 0);
    }

    #[test]
    fn pattern_matches_prefix_and_extension() {
        let p = FilePattern::default();
        assert!(p.matches("premier_league_2020.csv"));
        assert!(p.matches("premier_league_2020.CSV"));
        assert!(!p.matches("premier_league_2020.xlsx"));
        assert!(!p.matches("championship_2020.csv"));
    }

    #[test]
    fn same_row_in_two_seasons_yields_two_records() {
        let dir = tempfile::tempdir().unwrap();
        let row = wide_row(1, "Everton (-8)", "45");
        write_season(dir.path(), "premier_league_2020.csv", &[row.clone()]);
        write_season(dir.path(), "premier_league_2021.csv", &[row]);

        let ds = load_default(dir.path()).unwrap();

        assert_eq!(
            ds.records,
            vec![record("Everton", 45.0, 2020), record("Everton", 45.0, 2021)]
        );
        assert_eq!(ds.source_files.len(), 2);
    }

    #[test]
    fn bad_points_and_blank_rows_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        write_season(
            dir.path(),
            "premier_league_2019.csv",
            &[
                wide_row(1, "Man City", "98"),
                wide_row(2, "Liverpool", "n/a"),
                wide_row(3, "", "12"),
                "4,Chelsea".to_string(),
            ],
        );

        let records = load_season_file(
            &dir.path().join("premier_league_2019.csv"),
            &SeasonSchema::default(),
        )
        .unwrap();

        assert_eq!(
            records,
            vec![
                record("Man City", 98.0, 2019),
                record("Liverpool", 0.0, 2019),
                record("Chelsea", 0.0, 2019),
            ]
        );
    }

    #[test]
    fn negative_points_after_deduction_load_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("premier_league_2020.csv");
        fs::write(&path, "Pos,Team,Pts\n1,Derby (-21),-3\n2,Wigan,12\n").unwrap();
        let schema = SeasonSchema {
            team_column: 1,
            points_column: 2,
        };

        let records = load_season_file(&path, &schema).unwrap();

        assert_eq!(
            records,
            vec![record("Derby", 0.0, 2020), record("Wigan", 12.0, 2020)]
        );
        assert!(records.iter().all(|r| r.points >= 0.0));
    }

    #[test]
    fn other_files_in_folder_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let spurs = [wide_row(1, "Spurs", "77")];
        let barca = [wide_row(1, "Barcelona", "93")];
        write_season(dir.path(), "premier_league_2018.csv", &spurs);
        write_season(dir.path(), "la_liga_2018.csv", &barca);
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        let files = discover_season_files(dir.path(), &FilePattern::default()).unwrap();
        assert_eq!(files, vec![dir.path().join("premier_league_2018.csv")]);
    }

    #[test]
    fn empty_folder_gives_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let ds = load_default(dir.path()).unwrap();
        assert!(ds.is_empty());
        assert!(ds.teams.is_empty());
    }

    #[test]
    fn missing_folder_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        let err = load_default(&gone).unwrap_err();
        assert!(matches!(err, LoadError::MissingDirectory(p) if p == gone));
    }

    #[test]
    fn narrow_file_fails_schema_check() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("premier_league_2022.csv"),
            "Pos,Team,Pts\n1,Man City,89\n",
        )
        .unwrap();

        let err = load_default(dir.path()).unwrap_err();
        match err {
            LoadError::Schema {
                required, found, ..
            } => {
                assert_eq!(required, 18);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn custom_schema_reads_other_positions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("premier_league_2023.csv"),
            "Pos,Team,Pts\n1,Man City,89\n2,Arsenal (-0),84\n",
        )
        .unwrap();
        let schema = SeasonSchema {
            team_column: 1,
            points_column: 2,
        };

        let ds = load_directory(dir.path(), &FilePattern::default(), &schema).unwrap();
        let teams: Vec<&str> = ds.teams.iter().map(String::as_str).collect();
        assert_eq!(teams, vec!["Arsenal", "Man City"]);
        assert_eq!(ds.years.iter().copied().collect::<Vec<_>>(), vec![2023]);
    }
}
