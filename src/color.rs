use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.70, 0.50);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Team → colour
// ---------------------------------------------------------------------------

/// Stable team colours. Built once per dataset from every known team so a
/// team keeps its colour whatever the current selection.
#[derive(Debug, Clone, Default)]
pub struct TeamColors {
    mapping: BTreeMap<String, Color32>,
}

impl TeamColors {
    pub fn new(teams: &BTreeSet<String>) -> Self {
        let palette = generate_palette(teams.len());
        let mapping = teams.iter().cloned().zip(palette).collect();
        TeamColors { mapping }
    }

    pub fn color_for(&self, team: &str) -> Color32 {
        self.mapping.get(team).copied().unwrap_or(Color32::GRAY)
    }
}
