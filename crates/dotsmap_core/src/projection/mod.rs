//! Geometric projection and render ordering.
//!
//! # Responsibility
//! - Place count circles in pixel space from dot clouds or region anchors.
//! - Size and color circles from their relative magnitude and UI state.
//! - Order circles so the interacted-with one paints last.
//! - Style base-map dots per country.
//!
//! # Invariants
//! - Missing geometry or an unmeasured surface yields the off-screen
//!   sentinel, never an error.

pub mod ordering;
pub mod projector;
pub mod styler;
