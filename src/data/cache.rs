use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::{
    discover_season_files, load_directory, FilePattern, LoadError, SeasonSchema,
};
use super::model::SeasonDataset;

// ---------------------------------------------------------------------------
// Memoised dataset load
// ---------------------------------------------------------------------------

/// What a season file looked like when it was last read.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileStamp {
    path: PathBuf,
    len: u64,
    modified: Option<SystemTime>,
}

/// Keeps the last loaded dataset and reloads only when the set of season
/// files, their sizes or their modification times change.
#[derive(Debug, Default)]
pub struct DatasetCache {
    dir: Option<PathBuf>,
    stamps: Vec<FileStamp>,
    dataset: Option<Arc<SeasonDataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the dataset for `dir`, re-reading files only if they changed.
    pub fn load(
        &mut self,
        dir: &Path,
        pattern: &FilePattern,
        schema: &SeasonSchema,
    ) -> Result<Arc<SeasonDataset>, LoadError> {
        let stamps = fingerprint(dir, pattern)?;

        if let Some(ds) = &self.dataset {
            if self.dir.as_deref() == Some(dir) && self.stamps == stamps {
                log::debug!(
                    "Season files in {} unchanged; using cached data",
                    dir.display()
                );
                return Ok(Arc::clone(ds));
            }
        }

        let dataset = Arc::new(load_directory(dir, pattern, schema)?);
        log::info!(
            "Loaded {} records for {} teams from {} files in {}",
            dataset.len(),
            dataset.teams.len(),
            dataset.source_files.len(),
            dir.display()
        );

        self.dir = Some(dir.to_path_buf());
        self.stamps = stamps;
        self.dataset = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the cached dataset so the next `load` reads from disk.
    pub fn invalidate(&mut self) {
        self.dir = None;
        self.stamps.clear();
        self.dataset = None;
    }
}

fn fingerprint(dir: &Path, pattern: &FilePattern) -> Result<Vec<FileStamp>, LoadError> {
    discover_season_files(dir, pattern)?
        .into_iter()
        .map(|path| -> Result<FileStamp, LoadError> {
            let meta = std::fs::metadata(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            Ok(FileStamp {
                len: meta.len(),
                modified: meta.modified().ok(),
                path,
            })
        })
        .collect()
}
