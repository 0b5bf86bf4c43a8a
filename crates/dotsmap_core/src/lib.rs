//! Query and geometric aggregation engine for the projects dots map.
//! This crate is the single source of truth for query, aggregation,
//! projection and render-order semantics.

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod geometry;
pub mod logging;
pub mod model;
pub mod projection;
pub mod query;
pub mod text;

pub use aggregate::region_aggregator::{AggregateEntry, EntryKey, Granularity, RegionAggregator};
pub use config::{ConfigError, ConfigResult, MapConfig};
pub use dataset::store::{DatasetError, DatasetResult, DatasetStore};
pub use geometry::map::{GeometryError, GeometryResult, MapGeometry};
pub use logging::{
    default_log_level, init_logging, logging_status, LogSettings, LoggingError, LoggingResult,
};
pub use model::geometry::{CountryGeometry, Dot, RegionDef, RelativePoint};
pub use model::project::{CountryId, ProjectRecord, RegionId};
pub use model::selection::Selection;
pub use projection::ordering::{order_for_render, RenderKey};
pub use projection::projector::{
    centroid, GeometricProjector, Interaction, ScreenCircle, ScreenPoint, Surface, OFFSCREEN,
};
pub use projection::styler::{DotStyler, StyledCountry, StyledDot};
pub use query::memo::MemoCache;
pub use query::project_query::{country_display_name, ProjectQuery};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
