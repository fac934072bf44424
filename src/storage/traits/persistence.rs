//! Persistence backend trait.

use std::cmp::Ordering;

use crate::Result;
use crate::models::{Barillet, BarilletId, BarilletUpdate};

/// Trait for persistence layer backends.
///
/// Backends are the source of truth for barillets. They assign ids and
/// timestamps; callers never set `created_at` or `updated_at` themselves.
pub trait PersistenceBackend: Send + Sync {
    /// Stores a new barillet.
    ///
    /// Assigns a fresh id and sets both timestamps to the write time. Any id
    /// already on `barillet` is ignored.
    fn insert(&self, barillet: Barillet) -> Result<Barillet>;

    /// Retrieves a barillet by ID.
    fn get(&self, id: &BarilletId) -> Result<Option<Barillet>>;

    /// Applies a partial update and refreshes `updated_at`.
    ///
    /// Returns `None` when no barillet has this id.
    fn update(&self, id: &BarilletId, update: &BarilletUpdate) -> Result<Option<Barillet>>;

    /// Deletes a barillet by ID.
    fn delete(&self, id: &BarilletId) -> Result<bool>;

    /// Lists the barillets owned by `user_id`, newest match date first.
    fn list_by_owner(&self, user_id: &str) -> Result<Vec<Barillet>>;

    /// Checks if a barillet exists.
    fn exists(&self, id: &BarilletId) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }
}

/// Orders barillets by match date descending, undated last, then by
/// creation time descending.
pub fn sort_for_listing(barillets: &mut [Barillet]) {
    barillets.sort_by(|a, b| match (a.date, b.date) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| b.created_at.cmp(&a.created_at)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.created_at.cmp(&a.created_at),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dated(title: &str, date: Option<(i32, u32, u32)>) -> Barillet {
        let mut b = Barillet::new_empty("u");
        b.title = title.to_string();
        b.date = date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        b
    }

    #[test]
    fn test_sort_for_listing() {
        let mut list = vec![
            dated("old", Some((2023, 1, 10))),
            dated("undated", None),
            dated("new", Some((2024, 6, 1))),
        ];
        sort_for_listing(&mut list);
        let titles: Vec<_> = list.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old", "undated"]);
    }
}
