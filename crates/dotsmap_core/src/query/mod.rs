//! Normalization and query layer.
//!
//! # Responsibility
//! - Derive countries, organizations, project types and filtered project
//!   lists from the dataset store.
//! - Own the memo caches for per-country and per-region lookups.
//! - Derive the highlighted countries of the current selection.
//!
//! # Invariants
//! - Identifiers are compared only in trimmed lowercase form.
//! - Every returned project list is sorted by `project_name`.

pub mod memo;
pub mod project_query;
