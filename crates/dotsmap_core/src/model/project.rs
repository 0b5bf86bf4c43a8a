//! Project record model.
//!
//! # Responsibility
//! - Define the immutable row shape supplied by the dataset file.
//! - Provide the per-record normalized country view.
//!
//! # Invariants
//! - `project_name` is unique and compared case-sensitively.
//! - Records are never mutated after the dataset is loaded.

use crate::text::{locale_cmp, split_tokens};
use serde::{Deserialize, Serialize};

/// Lowercase, trimmed country token (e.g. `us`).
///
/// Kept as a type alias so signatures carry the normalization contract.
pub type CountryId = String;

/// Region token grouping countries (e.g. `europe`, `global`).
pub type RegionId = String;

/// One project row from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Unique display name, also the record identity.
    pub project_name: String,
    /// Comma-separated organization names.
    pub organization: String,
    /// Comma-separated country identifiers or region tokens.
    pub location: String,
    /// Free-form type label. Blank when the dataset omits it.
    #[serde(default)]
    pub project_type: String,
}

impl ProjectRecord {
    pub fn new(
        project_name: impl Into<String>,
        organization: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            organization: organization.into(),
            location: location.into(),
            project_type: String::new(),
        }
    }

    /// Builder-style setter for `project_type`.
    pub fn with_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_type = project_type.into();
        self
    }

    /// Returns the record's country tokens, normalized and sorted.
    ///
    /// Blank tokens are preserved so callers see the raw field shape.
    pub fn countries(&self) -> Vec<CountryId> {
        let mut countries: Vec<CountryId> = split_tokens(&self.location).collect();
        countries.sort_by(|a, b| locale_cmp(a, b));
        countries
    }
}

/// Orders records by `project_name`.
pub fn compare_by_name(a: &ProjectRecord, b: &ProjectRecord) -> std::cmp::Ordering {
    locale_cmp(&a.project_name, &b.project_name)
}
