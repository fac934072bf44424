//! Property-based tests for durations, statistics and export naming.
//!
//! - Clock values built from minutes and seconds parse back to the same time
//! - Totals are the sum of the theme durations
//! - Type counts always add up to the theme count
//! - Sanitized file names only hold safe characters

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use barillet::io::sanitize_filename;
use barillet::models::{
    Barillet, Theme, ThemeDuration, ThemeType, format_duration, parse_duration_to_minutes,
};
use barillet::calculate_barillet_stats;
use proptest::prelude::*;

fn theme_strategy() -> impl Strategy<Value = Theme> {
    (any::<bool>(), 0u32..10, 0u32..60, any::<bool>()).prop_map(
        |(compared, minutes, seconds, libre)| {
            let theme = Theme::new().with_duration(ThemeDuration::from_clock(minutes, seconds));
            let theme = if compared {
                theme.with_type(ThemeType::Comparee)
            } else {
                theme
            };
            if libre { theme } else { theme.with_category("Rimée") }
        },
    )
}

proptest! {
    /// Property: `from_clock` values parse back to the same number of seconds.
    #[test]
    fn prop_clock_round_trip(minutes in 0u32..600, seconds in 0u32..60) {
        let duration = ThemeDuration::from_clock(minutes, seconds);
        prop_assert_eq!(duration.split_clock(), Some((minutes, seconds)));
        let parsed = parse_duration_to_minutes(&duration);
        let expected = f64::from(minutes) + f64::from(seconds) / 60.0;
        prop_assert!((parsed - expected).abs() < 1e-9);
    }

    /// Property: formatting a whole number of seconds matches `from_clock`.
    #[test]
    fn prop_format_matches_clock(minutes in 0u32..600, seconds in 0u32..60) {
        prop_assume!(minutes > 0 || seconds > 0);
        let total = f64::from(minutes) + f64::from(seconds) / 60.0;
        prop_assert_eq!(
            format_duration(total),
            ThemeDuration::from_clock(minutes, seconds).value
        );
    }

    /// Property: special durations never count towards the total.
    #[test]
    fn prop_special_is_zero(text in "\\PC{0,30}") {
        prop_assert_eq!(parse_duration_to_minutes(&ThemeDuration::special(text)), 0.0);
    }

    /// Property: stats add up over the themes.
    #[test]
    fn prop_stats_add_up(themes in prop::collection::vec(theme_strategy(), 18)) {
        let mut barillet = Barillet::new_empty("u1");
        barillet.themes = themes;
        let stats = calculate_barillet_stats(&barillet);

        prop_assert_eq!(
            stats.type_proportions.mixte + stats.type_proportions.comparee,
            18
        );
        let total: f64 = barillet.themes.iter().map(|t| parse_duration_to_minutes(&t.duration)).sum();
        prop_assert!((stats.total_minutes - total).abs() < 1e-9);
        prop_assert!(stats.libre_percentage >= 0.0 && stats.libre_percentage <= 100.0);
    }

    /// Property: sanitized names are non-empty, lowercase and path-safe.
    #[test]
    fn prop_sanitize_is_safe(title in "\\PC{0,60}") {
        let name = sanitize_filename(&title);
        prop_assert!(!name.is_empty());
        prop_assert!(!name.contains("--"));
        prop_assert!(!name.contains('/'));
        prop_assert!(!name.contains(char::is_whitespace));
        prop_assert_eq!(name.to_lowercase(), name.clone());
    }

    /// Property: sanitizing is idempotent.
    #[test]
    fn prop_sanitize_idempotent(title in "[a-zA-Z0-9 _-]{1,40}") {
        let once = sanitize_filename(&title);
        prop_assert_eq!(sanitize_filename(&once), once.clone());
    }
}
