//! Region aggregation.
//!
//! # Responsibility
//! - Count matching projects per country or per region.
//! - Normalize counts against the maximum to drive circle size and color.
//!
//! # Invariants
//! - Every produced `relative_magnitude` lies in `(0, 1]`.
//! - Entries with zero projects are dropped before the maximum is taken.

pub mod region_aggregator;
