//! Current UI selection.
//!
//! The presentation layer picks which card or dropdown to show by matching on
//! [`Selection`]; the core only derives the highlighted countries from it.

use crate::model::project::{CountryId, ProjectRecord};

/// What the user has selected on the map or in the filters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Country(CountryId),
    Project(ProjectRecord),
    /// Organization query text as picked from the organization filter.
    Organization(String),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
