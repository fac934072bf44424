//! Theme types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ThemeDuration;

/// Category value meaning "no fixed category constraint".
pub const LIBRE: &str = "Libre";

/// Participation values accepted by the theme validator.
pub const PARTICIPATIONS: [&str; 5] = [
    "2",
    "2 par équipe",
    "illimitée",
    "équivalente",
    "tout le monde",
];

/// Participation given to new themes.
pub const DEFAULT_PARTICIPATION: &str = "illimitée";

/// Format of a theme: both teams mixed on stage, or one team after the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThemeType {
    /// Mixed improvisation: both teams play together.
    #[default]
    Mixte,
    /// Compared improvisation: each team plays the theme in turn.
    #[serde(rename = "Comparée")]
    Comparee,
}

impl ThemeType {
    /// Returns all theme types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Mixte, Self::Comparee]
    }

    /// Returns the display and wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mixte => "Mixte",
            Self::Comparee => "Comparée",
        }
    }

    /// Parses the wire representation.
    ///
    /// Matching is exact, except that `"Comparee"` without the accent is also
    /// accepted since it is what people type on a terminal.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Mixte" => Some(Self::Mixte),
            "Comparée" | "Comparee" => Some(Self::Comparee),
            _ => None,
        }
    }
}

impl fmt::Display for ThemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One improvisation prompt within a barillet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Mixte or Comparée.
    #[serde(rename = "type")]
    pub theme_type: ThemeType,
    /// Title announced by the referee. May be absent or empty.
    pub title: Option<String>,
    /// Number of players per team, as free text from the fixed vocabulary.
    pub participation: String,
    /// Category name, or [`LIBRE`].
    pub category: String,
    /// How long the improvisation lasts.
    pub duration: ThemeDuration,
    /// Free-form notes printed on the card.
    #[serde(default)]
    pub notes: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            theme_type: ThemeType::Mixte,
            title: Some(String::new()),
            participation: DEFAULT_PARTICIPATION.to_string(),
            category: LIBRE.to_string(),
            duration: ThemeDuration::default(),
            notes: String::new(),
        }
    }
}

impl Theme {
    /// Creates the default theme used to fill a new barillet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the theme type.
    #[must_use]
    pub const fn with_type(mut self, theme_type: ThemeType) -> Self {
        self.theme_type = theme_type;
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the participation.
    #[must_use]
    pub fn with_participation(mut self, participation: impl Into<String>) -> Self {
        self.participation = participation.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the duration.
    #[must_use]
    pub fn with_duration(mut self, duration: ThemeDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Returns the title, or an empty string when absent.
    #[must_use]
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Returns `true` when the category is the [`LIBRE`] sentinel.
    #[must_use]
    pub fn is_libre(&self) -> bool {
        self.category == LIBRE
    }

    /// Returns `true` when the participation is one of [`PARTICIPATIONS`].
    #[must_use]
    pub fn has_known_participation(&self) -> bool {
        PARTICIPATIONS.contains(&self.participation.as_str())
    }
}
