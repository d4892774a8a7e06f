//! Shared primitive types used across the entire simulation.

/// Currency amount. May go negative; there is no overdraft floor.
pub type Money = f64;

/// A stable menu item identifier ("burger", "soda", ...).
pub type ItemId = String;

/// One in-game trading day, 1-indexed.
pub type DayNumber = u32;

/// The canonical run identifier.
pub type RunId = String;

/// Clamp a popularity value into the valid [0, 100] band.
pub fn clamp_popularity(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// A single hit to popularity at least this large is logged as a warning.
pub const LARGE_POPULARITY_DROP: f64 = 3.0;

pub fn is_large_popularity_drop(before: f64, after: f64) -> bool {
    before - after >= LARGE_POPULARITY_DROP
}
