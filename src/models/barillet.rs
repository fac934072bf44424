//! Barillet aggregate and identifiers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Theme;

/// Number of themes in a complete barillet.
pub const THEME_COUNT: usize = 18;

/// Title given to barillets created without one.
pub const DEFAULT_TITLE: &str = "Nouveau barillet";

/// Suffix appended to the title of a duplicated barillet.
pub const COPY_SUFFIX: &str = " (copie)";

/// Unique identifier assigned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BarilletId(String);

impl BarilletId {
    /// Creates a new barillet ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BarilletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BarilletId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BarilletId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A themed set of improvisation prompts used to run a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barillet {
    /// Identifier, absent until the first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BarilletId>,
    /// Owning identity. Set at creation and never changed.
    pub user_id: String,
    /// Display title.
    pub title: String,
    /// Date of the match.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Venue.
    #[serde(default)]
    pub location: String,
    /// Set by the persistence layer on insert.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Set by the persistence layer on every write.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Folder the barillet is filed under.
    #[serde(default)]
    pub folder_id: Option<String>,
    /// Ordered themes; position maps to the printed card slot.
    pub themes: Vec<Theme>,
}

impl Barillet {
    /// Creates an unsaved barillet filled with [`THEME_COUNT`] default themes.
    #[must_use]
    pub fn new_empty(user_id: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            title: DEFAULT_TITLE.to_string(),
            date: None,
            location: String::new(),
            created_at: None,
            updated_at: None,
            folder_id: None,
            themes: vec![Theme::default(); THEME_COUNT],
        }
    }

    /// Returns a mutable reference to the theme at `index` (0-based).
    pub fn theme_mut(&mut self, index: usize) -> Option<&mut Theme> {
        self.themes.get_mut(index)
    }

    /// Returns `true` when `user_id` owns this barillet.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        !user_id.is_empty() && self.user_id == user_id
    }

    /// Returns the draft used to create a copy of this barillet.
    ///
    /// Identity and timestamps are left out and the title is suffixed with
    /// [`COPY_SUFFIX`].
    #[must_use]
    pub fn duplicate_draft(&self) -> BarilletDraft {
        BarilletDraft {
            title: Some(format!("{}{COPY_SUFFIX}", self.title)),
            date: self.date,
            location: Some(self.location.clone()),
            folder_id: self.folder_id.clone(),
            themes: Some(self.themes.clone()),
        }
    }
}

/// Partial data merged over the defaults when creating a barillet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarilletDraft {
    /// Title; defaults to [`DEFAULT_TITLE`].
    pub title: Option<String>,
    /// Match date.
    pub date: Option<NaiveDate>,
    /// Venue; defaults to empty.
    pub location: Option<String>,
    /// Folder reference.
    pub folder_id: Option<String>,
    /// Themes; defaults to [`THEME_COUNT`] default themes.
    pub themes: Option<Vec<Theme>>,
}

impl BarilletDraft {
    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the date.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the themes.
    #[must_use]
    pub fn with_themes(mut self, themes: Vec<Theme>) -> Self {
        self.themes = Some(themes);
        self
    }

    /// Merges the draft over [`Barillet::new_empty`] for `user_id`.
    #[must_use]
    pub fn into_barillet(self, user_id: impl Into<String>) -> Barillet {
        let mut barillet = Barillet::new_empty(user_id);
        if let Some(title) = self.title {
            barillet.title = title;
        }
        barillet.date = self.date;
        if let Some(location) = self.location {
            barillet.location = location;
        }
        barillet.folder_id = self.folder_id;
        if let Some(themes) = self.themes {
            barillet.themes = themes;
        }
        barillet
    }
}

/// Fields replaced by an explicit save.
///
/// `None` leaves a field untouched. Nullable fields use a nested option so
/// that they can be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarilletUpdate {
    /// New title.
    pub title: Option<String>,
    /// New date, or `Some(None)` to clear it.
    pub date: Option<Option<NaiveDate>>,
    /// New venue.
    pub location: Option<String>,
    /// New folder, or `Some(None)` to unfile.
    pub folder_id: Option<Option<String>>,
    /// Full replacement of the theme list.
    pub themes: Option<Vec<Theme>>,
}

impl BarilletUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets or clears the date.
    #[must_use]
    pub const fn date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets or clears the folder.
    #[must_use]
    pub fn folder(mut self, folder_id: Option<String>) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    /// Replaces the themes.
    #[must_use]
    pub fn themes(mut self, themes: Vec<Theme>) -> Self {
        self.themes = Some(themes);
        self
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.location.is_none()
            && self.folder_id.is_none()
            && self.themes.is_none()
    }

    /// Names of the fields this update touches, in declaration order.
    #[must_use]
    pub fn modified_fields(&self) -> Vec<String> {
        [
            ("title", self.title.is_some()),
            ("date", self.date.is_some()),
            ("location", self.location.is_some()),
            ("folderId", self.folder_id.is_some()),
            ("themes", self.themes.is_some()),
        ]
        .into_iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| name.to_string())
        .collect()
    }

    /// Applies the update to `barillet`. Timestamps are not touched.
    pub fn apply_to(&self, barillet: &mut Barillet) {
        if let Some(title) = &self.title {
            barillet.title.clone_from(title);
        }
        if let Some(date) = self.date {
            barillet.date = date;
        }
        if let Some(location) = &self.location {
            barillet.location.clone_from(location);
        }
        if let Some(folder_id) = &self.folder_id {
            barillet.folder_id.clone_from(folder_id);
        }
        if let Some(themes) = &self.themes {
            barillet.themes.clone_from(themes);
        }
    }
}

/// Folder for organizing barillets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Identifier, absent until saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning identity.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Set by the persistence layer.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThemeType;

    #[test]
    fn test_new_empty_has_eighteen_default_themes() {
        let barillet = Barillet::new_empty("user-1");
        assert_eq!(barillet.themes.len(), THEME_COUNT);
        assert_eq!(barillet.title, DEFAULT_TITLE);
        assert!(barillet.id.is_none());
        assert!(barillet.created_at.is_none());
        assert!(barillet.themes.iter().all(|t| *t == Theme::default()));
    }

    #[test]
    fn test_duplicate_draft_drops_identity() {
        let mut original = Barillet::new_empty("user-1");
        original.id = Some(BarilletId::new("abc"));
        original.title = "Finale".to_string();
        original.created_at = Some(Utc::now());
        original.themes[3] = Theme::new().with_type(ThemeType::Comparee);

        let copy = original.duplicate_draft().into_barillet("user-1");
        assert!(copy.id.is_none());
        assert!(copy.created_at.is_none());
        assert_eq!(copy.title, "Finale (copie)");
        assert_eq!(copy.themes, original.themes);
    }

    #[test]
    fn test_update_apply_and_modified_fields() {
        let mut barillet = Barillet::new_empty("user-1");
        barillet.date = NaiveDate::from_ymd_opt(2024, 3, 1);

        let update = BarilletUpdate::new().title("Demi-finale").date(None);
        update.apply_to(&mut barillet);

        assert_eq!(barillet.title, "Demi-finale");
        assert!(barillet.date.is_none());
        assert_eq!(update.modified_fields(), vec!["title", "date"]);
        assert!(!update.is_empty());
        assert!(BarilletUpdate::new().is_empty());
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let mut barillet = Barillet::new_empty("user-1");
        barillet.date = NaiveDate::from_ymd_opt(2024, 5, 17);
        let value = serde_json::to_value(&barillet).unwrap();
        assert_eq!(value["userId"], "user-1");
        assert_eq!(value["date"], "2024-05-17");
        assert!(value.get("id").is_none());

        let back: Barillet = serde_json::from_value(value).unwrap();
        assert_eq!(back, barillet);
    }

    #[test]
    fn test_is_owned_by() {
        let barillet = Barillet::new_empty("user-1");
        assert!(barillet.is_owned_by("user-1"));
        assert!(!barillet.is_owned_by("user-2"));
        assert!(!Barillet::new_empty("").is_owned_by(""));
    }
}
