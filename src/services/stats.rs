//! Statistics over a barillet's themes.

use crate::models::{
    Barillet, BarilletStats, ThemeType, TypeProportions, format_duration,
    parse_duration_to_minutes,
};

/// Computes the aggregate statistics of `barillet`.
///
/// Works for any number of themes. `libre_percentage` is rounded to one
/// decimal, half away from zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn calculate_barillet_stats(barillet: &Barillet) -> BarilletStats {
    let themes = &barillet.themes;
    if themes.is_empty() {
        return BarilletStats {
            total_duration: format_duration(0.0),
            ..BarilletStats::default()
        };
    }

    let total_minutes: f64 = themes
        .iter()
        .map(|t| parse_duration_to_minutes(&t.duration))
        .sum();

    let type_proportions = themes
        .iter()
        .fold(TypeProportions::default(), |mut acc, t| {
            match t.theme_type {
                ThemeType::Mixte => acc.mixte += 1,
                ThemeType::Comparee => acc.comparee += 1,
            }
            acc
        });

    let libre_count = themes.iter().filter(|t| t.is_libre()).count();
    let libre_percentage = (libre_count as f64 / themes.len() as f64 * 1000.0).round() / 10.0;

    BarilletStats {
        total_duration: format_duration(total_minutes),
        total_minutes,
        type_proportions,
        libre_count,
        libre_percentage,
        theme_count: themes.len(),
    }
}
