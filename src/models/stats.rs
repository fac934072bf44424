//! Aggregate statistics over a barillet.

use serde::{Deserialize, Serialize};

/// Number of themes of each type. Raw counts, not fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeProportions {
    /// Mixte themes.
    pub mixte: usize,
    /// Comparée themes.
    pub comparee: usize,
}

/// Summary shown next to the editor and used by the CLI `show` command.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarilletStats {
    /// Total playing time as `M:SS`.
    pub total_duration: String,
    /// Total playing time in minutes, unrounded.
    pub total_minutes: f64,
    /// Theme count per type.
    pub type_proportions: TypeProportions,
    /// Number of themes whose category is Libre.
    pub libre_count: usize,
    /// Share of Libre themes, in percent with one decimal.
    pub libre_percentage: f64,
    /// Number of themes counted.
    pub theme_count: usize,
}
