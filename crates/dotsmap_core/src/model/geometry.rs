//! Map geometry model.
//!
//! # Responsibility
//! - Describe per-country dot clouds and the region catalog.
//!
//! # Invariants
//! - Dot and anchor coordinates are relative to the rendering surface and lie
//!   in `[0, 1]`.
//! - Country and region ids are stored normalized.

use crate::model::project::{CountryId, RegionId};
use serde::{Deserialize, Serialize};

/// One dot of a country's shape, relative to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    /// Overrides the configured dot radius for this dot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Dot {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, radius: None }
    }
}

/// Screen-relative point in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativePoint {
    pub x: f64,
    pub y: f64,
}

/// Dot cloud of one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryGeometry {
    pub id: CountryId,
    #[serde(default)]
    pub region: RegionId,
    pub dots: Vec<Dot>,
}

/// Region catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDef {
    pub id: RegionId,
    /// Explicit members. Countries whose geometry names this region are
    /// members too.
    #[serde(default)]
    pub countries: Vec<CountryId>,
    /// Fixed placement that replaces centroid computation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<RelativePoint>,
}
