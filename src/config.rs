use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::aggregate::WeightModel;
use crate::data::loader::{FilePattern, SeasonSchema};

/// Looked up in the working directory at start-up.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Folder holding the season CSV exports.
    pub data_dir: PathBuf,
    pub files: FilePattern,
    pub schema: SeasonSchema,
    pub weighting: WeightModel,
    /// Bounds of the year-range slider.
    pub min_year: i32,
    pub max_year: i32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_dir: PathBuf::from("data"),
            files: FilePattern::default(),
            schema: SeasonSchema::default(),
            weighting: WeightModel::default(),
            min_year: 2017,
            max_year: 2025,
        }
    }
}

impl DashboardConfig {
    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// `./dashboard.json` if it exists, otherwise the defaults.
    pub fn load_default() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            log::info!("Using configuration from {CONFIG_FILE}");
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.min_year > self.max_year {
            bail!(
                "min_year ({}) is after max_year ({})",
                self.min_year,
                self.max_year
            );
        }
        if self.files.prefix.is_empty() {
            bail!("files.prefix must not be empty");
        }
        let step = self.weighting.step;
        if !step.is_finite() || step < 0.0 {
            bail!("weighting.step must be a non-negative number, got {step}");
        }
        Ok(())
    }
}
