//! In-memory authoritative store and grouping helpers.

/// First-seen ordered grouping map.
pub mod indices;
/// Authoritative contact store and undo/redo journal.
pub mod store;
