//! Import failures.
//!
//! Each variant renders as the French message shown to the user, so callers
//! can display `error.to_string()` as-is and still match on the kind.

use thiserror::Error;

use crate::models::THEME_COUNT;

/// Why a JSON import was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The file name does not end in `.json`.
    #[error("Le fichier doit avoir l'extension .json")]
    WrongExtension,

    /// The file could not be read.
    #[error("Erreur lors de la lecture du fichier")]
    Unreadable(String),

    /// The content is not valid JSON.
    #[error("Le fichier JSON est invalide ou mal formaté")]
    Malformed(String),

    /// The document is valid JSON but not an object.
    #[error("Le format du fichier est invalide")]
    NotAnObject,

    /// `title` is missing, not text, or blank.
    #[error("Le fichier JSON doit contenir un titre de barillet valide")]
    MissingTitle,

    /// `themes` is missing or not an array.
    #[error("Le fichier JSON doit contenir un tableau de thèmes")]
    MissingThemes,

    /// `themes` does not hold exactly [`THEME_COUNT`] entries.
    #[error("Le fichier doit contenir exactement {expected} thèmes (trouvé: {found})", expected = THEME_COUNT)]
    WrongThemeCount {
        /// Number of themes in the file.
        found: usize,
    },

    /// A theme fails the structural check.
    #[error("Le thème #{number} a une structure invalide ou des champs manquants")]
    InvalidTheme {
        /// 1-based position of the theme.
        number: usize,
    },

    /// `date` is present but neither null nor text.
    #[error("La date doit être au format ISO (YYYY-MM-DD)")]
    InvalidDate,

    /// `location` is present but not text.
    #[error("Le lieu doit être une chaîne de caractères")]
    InvalidLocation,

    /// Storing the imported barillet failed.
    #[error("Erreur lors de la création du barillet : {0}")]
    Creation(String),
}
