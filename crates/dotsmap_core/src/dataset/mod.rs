//! Immutable project dataset.
//!
//! # Responsibility
//! - Decode and validate the static project list once at startup.
//! - Reject malformed rows at load time so queries never see partial records.
//!
//! # See also
//! - `query` for derived views over the store.

pub mod store;
