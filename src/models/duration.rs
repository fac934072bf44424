//! Theme durations.
//!
//! A duration is entered either as a clock value (`"3:00"`), as a number of
//! repeated rounds (`"2 fois 3:30"`), or as free text when its type is
//! [`DurationType::Special`] (`"jusqu'à la fin du spectacle"`).
//!
//! Parsing is lenient: anything that is not a recognizable clock value counts
//! as zero minutes, so statistics never fail on half-typed input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value given to new themes and used when a special duration is turned
/// back into a fixed one.
pub const DEFAULT_DURATION: &str = "3:00";

static REPEATED_ROUNDS: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\s*fois\s*([0-9]+):([0-9]+)$").ok());

static CLOCK: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^([0-9]+):([0-9]+)$").ok());

fn captures<'a>(pattern: &Lazy<Option<Regex>>, value: &'a str) -> Option<regex::Captures<'a>> {
    pattern.as_ref().and_then(|re| re.captures(value))
}

/// Whether a duration is a clock value or free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationType {
    /// `M:SS` or `N fois M:SS`.
    #[default]
    Fixed,
    /// Free text with no defined length.
    Special,
}

impl DurationType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Special => "special",
        }
    }

    /// Parses the wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fixed" => Some(Self::Fixed),
            "special" => Some(Self::Special),
            _ => None,
        }
    }
}

impl fmt::Display for DurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Duration of a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDuration {
    /// Raw value as typed by the user.
    pub value: String,
    /// Clock value or free text.
    #[serde(rename = "type")]
    pub kind: DurationType,
    /// Whether the value is a ceiling rather than an exact length.
    #[serde(default)]
    pub maximum: bool,
}

impl Default for ThemeDuration {
    fn default() -> Self {
        Self::fixed(DEFAULT_DURATION)
    }
}

impl ThemeDuration {
    /// Creates a fixed duration.
    #[must_use]
    pub fn fixed(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: DurationType::Fixed,
            maximum: false,
        }
    }

    /// Creates a special (free text) duration.
    #[must_use]
    pub fn special(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: DurationType::Special,
            maximum: false,
        }
    }

    /// Creates a fixed duration from separate minute and second inputs.
    ///
    /// Seconds above 59 are clamped to 59.
    #[must_use]
    pub fn from_clock(minutes: u32, seconds: u32) -> Self {
        Self::fixed(clock_value(minutes, seconds.min(59)))
    }

    /// Marks the duration as a ceiling.
    #[must_use]
    pub const fn with_maximum(mut self, maximum: bool) -> Self {
        self.maximum = maximum;
        self
    }

    /// Splits an `M:SS` value into its minutes and seconds.
    ///
    /// Returns `None` for repeated rounds and free text.
    #[must_use]
    pub fn split_clock(&self) -> Option<(u32, u32)> {
        let caps = captures(&CLOCK, &self.value)?;
        let minutes = caps[1].parse().ok()?;
        let seconds = caps[2].parse().ok()?;
        Some((minutes, seconds))
    }

    /// Switches between fixed and special.
    ///
    /// Going back to fixed keeps the value only if it is an `M:SS` clock
    /// value; anything else is reset to [`DEFAULT_DURATION`].
    pub fn toggle_type(&mut self) {
        match self.kind {
            DurationType::Fixed => self.kind = DurationType::Special,
            DurationType::Special => {
                self.kind = DurationType::Fixed;
                if !self.value.is_empty() && self.split_clock().is_none() {
                    self.value = DEFAULT_DURATION.to_string();
                }
            },
        }
    }

    /// Returns the length in minutes. See [`parse_duration_to_minutes`].
    #[must_use]
    pub fn minutes(&self) -> f64 {
        parse_duration_to_minutes(self)
    }
}

fn clock_value(minutes: u32, seconds: u32) -> String {
    format!("{minutes}:{seconds:02}")
}

/// Parses a duration to minutes.
///
/// - special durations count as `0`
/// - `N fois M:SS` is `N * (M + SS/60)`
/// - `M:SS` is `M + SS/60`
/// - anything else is `0`
#[must_use]
pub fn parse_duration_to_minutes(duration: &ThemeDuration) -> f64 {
    if duration.kind == DurationType::Special {
        return 0.0;
    }

    let value = duration.value.as_str();

    if let Some(caps) = captures(&REPEATED_ROUNDS, value) {
        let times = parse_number(&caps[1]);
        let minutes = parse_number(&caps[2]);
        let seconds = parse_number(&caps[3]);
        return times * (minutes + seconds / 60.0);
    }

    if let Some(caps) = captures(&CLOCK, value) {
        let minutes = parse_number(&caps[1]);
        let seconds = parse_number(&caps[2]);
        return minutes + seconds / 60.0;
    }

    0.0
}

// Digit runs too long for u64 still parse as f64.
fn parse_number(digits: &str) -> f64 {
    digits.parse::<f64>().unwrap_or(0.0)
}

/// Formats a number of minutes as `M:SS`.
///
/// Minutes are floored and seconds rounded; a rounding that reaches 60
/// seconds carries into the minutes. Negative and non-finite inputs format
/// as `0:00`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(total_minutes: f64) -> String {
    if !total_minutes.is_finite() || total_minutes <= 0.0 {
        return "0:00".to_string();
    }

    let mut minutes = total_minutes.floor() as u64;
    let mut seconds = ((total_minutes - minutes as f64) * 60.0).round() as u64;
    if seconds >= 60 {
        minutes += 1;
        seconds -= 60;
    }
    format!("{minutes}:{seconds:02}")
}
