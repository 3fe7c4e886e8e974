//! Shared primitive types used across the dashboard core.

/// A stable, unique identifier for any record (user, company, investment).
pub type EntityId = String;

/// Monetary amount in the display currency.
/// Stored as f64; rounded to cents only at output boundaries.
pub type Money = f64;

/// A percentage value, e.g. `12.5` means 12.5%.
pub type Percent = f64;
