//! Aggregate entries for country and region circles.

use crate::model::project::{CountryId, RegionId};
use crate::query::project_query::ProjectQuery;
use crate::text::normalize_token;
use log::debug;
use std::collections::HashSet;

/// Identity of one count circle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Country(CountryId),
    Region(RegionId),
}

impl EntryKey {
    /// Raw key text used for ordering and selection matching.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Country(id) | Self::Region(id) => id,
        }
    }

    pub fn is_region(&self) -> bool {
        matches!(self, Self::Region(_))
    }
}

/// Project count of one country or region, scaled against the largest count.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateEntry {
    pub key: EntryKey,
    pub project_count: usize,
    /// `project_count / max_project_count`, in `(0, 1]`.
    pub relative_magnitude: f64,
}

/// How countries are grouped into circles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Granularity {
    /// One circle per dataset country with known geometry.
    Country,
    /// One circle per declared region.
    Region,
    /// Countries outside `regions` get their own circle; each listed region
    /// gets one circle for all of its members.
    Collapsed { regions: Vec<RegionId> },
}

/// Builds aggregate entries from the query layer.
pub struct RegionAggregator<'a> {
    query: &'a ProjectQuery,
}

impl<'a> RegionAggregator<'a> {
    pub fn new(query: &'a ProjectQuery) -> Self {
        Self { query }
    }

    /// Produces non-empty entries with relative magnitudes attached.
    ///
    /// Returns an empty list when no entity has matching projects.
    pub fn aggregate(&self, granularity: &Granularity) -> Vec<AggregateEntry> {
        let counts = match granularity {
            Granularity::Country => self.country_counts(&HashSet::new()),
            Granularity::Region => self.region_counts(&self.query.geometry().region_ids()),
            Granularity::Collapsed { regions } => {
                let regions: Vec<RegionId> =
                    regions.iter().map(|region| normalize_token(region)).collect();
                let collapsed: HashSet<CountryId> = regions
                    .iter()
                    .flat_map(|region| self.query.geometry().countries_by_region(region))
                    .collect();
                let mut counts = self.country_counts(&collapsed);
                counts.extend(self.region_counts(&regions));
                counts
            }
        };

        let entries = with_magnitudes(counts);
        debug!(
            "event=aggregate module=aggregate status=ok entries={}",
            entries.len()
        );
        entries
    }

    fn country_counts(&self, excluded: &HashSet<CountryId>) -> Vec<(EntryKey, usize)> {
        let geometry = self.query.geometry();
        self.query
            .list_countries()
            .into_iter()
            .filter(|id| geometry.country(id).is_some() && !excluded.contains(id))
            .map(|id| {
                let count = self.query.projects_by_country(&id).len();
                (EntryKey::Country(id), count)
            })
            .collect()
    }

    fn region_counts(&self, regions: &[RegionId]) -> Vec<(EntryKey, usize)> {
        regions
            .iter()
            .map(|region| {
                let count = self.query.projects_by_region(region).len();
                (EntryKey::Region(region.clone()), count)
            })
            .collect()
    }
}

/// Drops zero counts and scales the rest against the maximum.
fn with_magnitudes(counts: Vec<(EntryKey, usize)>) -> Vec<AggregateEntry> {
    let counts: Vec<(EntryKey, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect();
    let Some(max) = counts.iter().map(|(_, count)| *count).max() else {
        return Vec::new();
    };

    counts
        .into_iter()
        .map(|(key, project_count)| AggregateEntry {
            key,
            project_count,
            relative_magnitude: project_count as f64 / max as f64,
        })
        .collect()
}
