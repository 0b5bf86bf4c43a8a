//! Project queries over an immutable dataset and map geometry.

use crate::dataset::store::DatasetStore;
use crate::geometry::map::MapGeometry;
use crate::model::project::{compare_by_name, CountryId, ProjectRecord};
use crate::model::selection::Selection;
use crate::query::memo::MemoCache;
use crate::text::{locale_cmp, normalize_country_key, normalize_token, split_tokens};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Query facade owning the memo caches for one dataset/geometry pair.
pub struct ProjectQuery {
    dataset: Arc<DatasetStore>,
    geometry: Arc<MapGeometry>,
    by_country: MemoCache<Vec<ProjectRecord>>,
    by_region: MemoCache<Vec<ProjectRecord>>,
}

impl ProjectQuery {
    pub fn new(dataset: Arc<DatasetStore>, geometry: Arc<MapGeometry>) -> Self {
        Self {
            dataset,
            geometry,
            by_country: MemoCache::new("projects_by_country"),
            by_region: MemoCache::new("projects_by_region"),
        }
    }

    pub fn dataset(&self) -> &DatasetStore {
        &self.dataset
    }

    pub fn geometry(&self) -> &MapGeometry {
        &self.geometry
    }

    /// Distinct non-empty country tokens across all records, sorted.
    pub fn list_countries(&self) -> Vec<CountryId> {
        sorted_unique_tokens(
            self.dataset
                .records()
                .iter()
                .flat_map(|record| split_tokens(&record.location)),
        )
    }

    /// Distinct non-empty organization tokens across all records, sorted.
    pub fn list_organizations(&self) -> Vec<String> {
        sorted_unique_tokens(
            self.dataset
                .records()
                .iter()
                .flat_map(|record| split_tokens(&record.organization)),
        )
    }

    /// All records sorted by `project_name`.
    pub fn list_projects(&self) -> Vec<ProjectRecord> {
        let mut projects = self.dataset.records().to_vec();
        projects.sort_by(compare_by_name);
        projects
    }

    /// Normalized, sorted country tokens of one record.
    pub fn project_countries_of(&self, project: &ProjectRecord) -> Vec<CountryId> {
        project.countries()
    }

    /// Records located in `country`, memoized per normalized key.
    ///
    /// The key is trimmed, lowercased and has `_` read as a space.
    pub fn projects_by_country(&self, country: &str) -> Arc<Vec<ProjectRecord>> {
        let key = normalize_country_key(country);
        self.by_country.get_or_compute(&key, || {
            let mut projects: Vec<ProjectRecord> = self
                .dataset
                .records()
                .iter()
                .filter(|record| record.countries().contains(&key))
                .cloned()
                .collect();
            projects.sort_by(compare_by_name);
            projects
        })
    }

    /// Records whose raw organization text contains `organization`,
    /// case-insensitively. A blank query matches nothing.
    pub fn projects_by_organization(&self, organization: &str) -> Vec<ProjectRecord> {
        let needle = normalize_token(organization);
        if needle.is_empty() {
            return Vec::new();
        }
        let mut projects: Vec<ProjectRecord> = self
            .dataset
            .records()
            .iter()
            .filter(|record| record.organization.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        projects.sort_by(compare_by_name);
        projects
    }

    /// Country tokens of every project of `organization`, in project order.
    ///
    /// Not deduplicated: a country appears once per matching project.
    pub fn organization_countries(&self, organization: &str) -> Vec<CountryId> {
        self.projects_by_organization(organization)
            .iter()
            .flat_map(|project| split_tokens(&project.location))
            .collect()
    }

    /// Records in any member country of `region`, plus records whose location
    /// names the region token itself. Memoized per normalized key.
    ///
    /// Each project appears once even when it matches several members or
    /// both a member and the region token.
    pub fn projects_by_region(&self, region: &str) -> Arc<Vec<ProjectRecord>> {
        let key = normalize_token(region);
        self.by_region.get_or_compute(&key, || {
            let mut candidates: Vec<ProjectRecord> = Vec::new();
            for country in self.geometry.countries_by_region(&key) {
                candidates.extend(self.projects_by_country(&country).iter().cloned());
            }
            candidates.extend(
                self.dataset
                    .records()
                    .iter()
                    .filter(|record| {
                        !key.is_empty() && split_tokens(&record.location).any(|token| token == key)
                    })
                    .cloned(),
            );

            let mut seen = HashSet::new();
            let mut projects: Vec<ProjectRecord> = candidates
                .into_iter()
                .filter(|project| seen.insert(project.project_name.clone()))
                .collect();
            projects.sort_by(compare_by_name);
            projects
        })
    }

    pub fn is_country_represented(&self, country: &str) -> bool {
        !self.projects_by_country(country).is_empty()
    }

    /// Exact, case-sensitive lookup by `project_name`.
    pub fn find_project_by_name(&self, name: &str) -> Option<ProjectRecord> {
        self.dataset
            .records()
            .iter()
            .find(|record| record.project_name == name)
            .cloned()
    }

    /// Distinct non-blank project types in dataset order.
    pub fn list_project_types(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.dataset
            .records()
            .iter()
            .map(|record| record.project_type.trim())
            .filter(|project_type| !project_type.is_empty())
            .filter(|project_type| seen.insert(*project_type))
            .map(str::to_string)
            .collect()
    }

    /// Countries to highlight for the current selection.
    pub fn countries_for_selection(&self, selection: &Selection) -> Vec<CountryId> {
        match selection {
            Selection::None => Vec::new(),
            Selection::Country(country) => vec![normalize_country_key(country)],
            Selection::Project(project) => self.project_countries_of(project),
            Selection::Organization(organization) => self.organization_countries(organization),
        }
    }

    /// Number of `projects_by_country` computations so far.
    pub fn country_cache_computations(&self) -> usize {
        self.by_country.computations()
    }

    /// Number of `projects_by_region` computations so far.
    pub fn region_cache_computations(&self) -> usize {
        self.by_region.computations()
    }
}

/// Display name of a country id. Only a fixed override table is applied.
pub fn country_display_name(country: &str) -> String {
    match normalize_token(country).as_str() {
        "us" => "united states".to_string(),
        _ => country.to_string(),
    }
}

fn sorted_unique_tokens(tokens: impl Iterator<Item = String>) -> Vec<String> {
    let unique: BTreeSet<String> = tokens.filter(|token| !token.is_empty()).collect();
    let mut tokens: Vec<String> = unique.into_iter().collect();
    tokens.sort_by(|a, b| locale_cmp(a, b));
    tokens
}
