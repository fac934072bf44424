//! Theme categories.
//!
//! Categories are free text on a theme. The preset catalogue offers
//! suggestions for the editor's autocomplete; custom names stay valid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::theme::LIBRE;

/// A stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Identifier, absent until saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Category name as shown on theme cards.
    pub name: String,
    /// Owning identity; `None` for global categories.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Whether this is a built-in category.
    #[serde(default)]
    pub is_default: bool,
    /// Set by the persistence layer.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A preset category with a short explanation for players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetCategory {
    /// Category name.
    pub name: &'static str,
    /// What the constraint asks of the players.
    pub description: &'static str,
}

const PRESETS: &[PresetCategory] = &[
    PresetCategory {
        name: LIBRE,
        description: "Aucune contrainte de style",
    },
    PresetCategory {
        name: "Chantée",
        description: "L'improvisation est entièrement chantée",
    },
    PresetCategory {
        name: "Rimée",
        description: "Les répliques doivent rimer",
    },
    PresetCategory {
        name: "Sans paroles",
        description: "Aucun mot ne doit être prononcé",
    },
    PresetCategory {
        name: "À la manière de",
        description: "Jouée dans le style d'un auteur, d'un genre ou d'une époque",
    },
    PresetCategory {
        name: "Abécédaire",
        description: "Chaque réplique commence par la lettre suivante de l'alphabet",
    },
];

/// Read-only catalogue of preset categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryCatalog;

impl CategoryCatalog {
    /// Creates the catalogue.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns every preset category.
    #[must_use]
    pub const fn categories(&self) -> &'static [PresetCategory] {
        PRESETS
    }

    /// Returns the preset names, in catalogue order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        PRESETS.iter().map(|c| c.name).collect()
    }

    /// Looks up a preset by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static PresetCategory> {
        PRESETS.iter().find(|c| c.name == name)
    }

    /// Returns `true` when `name` is a preset.
    #[must_use]
    pub fn is_preset(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
