//! Domain model for projects, map geometry and selection state.
//!
//! # Responsibility
//! - Define the plain data shapes shared by query, aggregation and projection.
//!
//! # Invariants
//! - Model values are immutable inputs; derived views live in other modules.

pub mod geometry;
pub mod project;
pub mod selection;
