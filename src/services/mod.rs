//! Business logic services.
//!
//! Validation and statistics are pure functions over the model. The
//! [`BarilletService`] orchestrates the persistence backend and the change
//! event bus.

mod barillet;
mod stats;
mod validation;
mod watch;

pub use barillet::BarilletService;
pub use stats::calculate_barillet_stats;
pub use validation::{
    ValidationResult, is_valid_theme, is_valid_theme_value, validate_barillet,
    validate_barillet_value,
};
pub use watch::{DocumentSnapshot, DocumentWatch, OwnerWatch};
