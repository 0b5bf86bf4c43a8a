//! Map geometry catalog.
//!
//! # Responsibility
//! - Load per-country dot clouds and the region catalog.
//! - Answer membership and lookup questions with normalized keys.
//!
//! # Invariants
//! - Geometry is loaded once and never mutated.
//! - Unknown keys are absent lookups, never errors.

pub mod map;
