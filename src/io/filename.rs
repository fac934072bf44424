//! Export file naming.

use once_cell::sync::Lazy;
use regex::Regex;

use super::formats::Format;

/// Name used when a title sanitizes to nothing.
pub const FALLBACK_NAME: &str = "barillet";

static DISALLOWED: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\-\s]").ok());
static WHITESPACE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\s+").ok());
static HYPHENS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"-+").ok());

fn replace_all(pattern: &Lazy<Option<Regex>>, text: &str, with: &str) -> String {
    match pattern.as_ref() {
        Some(re) => re.replace_all(text, with).into_owned(),
        None => text.to_string(),
    }
}

/// Turns a title into a safe file stem.
///
/// Accented letters and punctuation are dropped, whitespace runs become a
/// single hyphen, hyphen runs collapse and the result is lowercased.
///
/// # Examples
///
/// ```
/// use barillet::io::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Match du 12/05 : Finale"), "match-du-1205-finale");
/// assert_eq!(sanitize_filename("!!!"), "barillet");
/// ```
#[must_use]
pub fn sanitize_filename(title: &str) -> String {
    let kept = replace_all(&DISALLOWED, title, "");
    let hyphenated = replace_all(&WHITESPACE, &kept, "-");
    let collapsed = replace_all(&HYPHENS, &hyphenated, "-").to_lowercase();
    if collapsed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        collapsed
    }
}

/// Full export file name for `title` in `format`.
#[must_use]
pub fn export_filename(title: &str, format: Format) -> String {
    format!("{}.{}", sanitize_filename(title), format.extension())
}
