//! Country dot clouds and region catalog.

use crate::model::geometry::{CountryGeometry, Dot, RegionDef, RelativePoint};
use crate::model::project::{CountryId, RegionId};
use crate::text::{locale_cmp, normalize_country_key, normalize_token};
use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type GeometryResult<T> = Result<T, GeometryError>;

/// Geometry load and validation error.
#[derive(Debug)]
pub enum GeometryError {
    Io(std::io::Error),
    Json(serde_json::Error),
    EmptyId(&'static str),
    DuplicateCountry(CountryId),
    DuplicateRegion(RegionId),
    DotOutOfRange {
        country: CountryId,
        index: usize,
    },
    InvalidDotRadius {
        country: CountryId,
        index: usize,
    },
    AnchorOutOfRange(RegionId),
}

impl Display for GeometryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read map geometry: {err}"),
            Self::Json(err) => write!(f, "failed to decode map geometry: {err}"),
            Self::EmptyId(kind) => write!(f, "{kind} id cannot be empty"),
            Self::DuplicateCountry(id) => write!(f, "duplicate country geometry: `{id}`"),
            Self::DuplicateRegion(id) => write!(f, "duplicate region: `{id}`"),
            Self::DotOutOfRange { country, index } => {
                write!(f, "dot #{index} of `{country}` is outside [0, 1]")
            }
            Self::InvalidDotRadius { country, index } => {
                write!(f, "dot #{index} of `{country}` needs a finite radius > 0")
            }
            Self::AnchorOutOfRange(id) => write!(f, "anchor of region `{id}` is outside [0, 1]"),
        }
    }
}

impl Error for GeometryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GeometryError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for GeometryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Deserialize)]
struct MapGeometryFile {
    countries: Vec<CountryGeometry>,
    #[serde(default)]
    regions: Vec<RegionDef>,
}

/// Read-only map geometry: country dot clouds keyed by id plus regions.
#[derive(Debug, Clone, Default)]
pub struct MapGeometry {
    countries: BTreeMap<CountryId, CountryGeometry>,
    regions: BTreeMap<RegionId, RegionDef>,
}

impl MapGeometry {
    /// Validates and indexes countries and regions.
    ///
    /// Country ids and explicit members use the same key as dataset
    /// locations (`united_kingdom` == `United Kingdom`); region ids are
    /// trimmed and lowercased.
    pub fn from_parts(
        countries: Vec<CountryGeometry>,
        regions: Vec<RegionDef>,
    ) -> GeometryResult<Self> {
        let mut country_map = BTreeMap::new();
        for mut country in countries {
            country.id = normalize_country_key(&country.id);
            country.region = normalize_token(&country.region);
            if country.id.is_empty() {
                return Err(GeometryError::EmptyId("country"));
            }
            if let Some(index) = country.dots.iter().position(|dot| !dot_in_range(dot)) {
                return Err(GeometryError::DotOutOfRange {
                    country: country.id,
                    index,
                });
            }
            if let Some(index) = country.dots.iter().position(|dot| !radius_valid(dot)) {
                return Err(GeometryError::InvalidDotRadius {
                    country: country.id,
                    index,
                });
            }
            if country_map.contains_key(&country.id) {
                return Err(GeometryError::DuplicateCountry(country.id));
            }
            country_map.insert(country.id.clone(), country);
        }

        let mut region_map = BTreeMap::new();
        for mut region in regions {
            region.id = normalize_token(&region.id);
            if region.id.is_empty() {
                return Err(GeometryError::EmptyId("region"));
            }
            if region.anchor.is_some_and(|anchor| !point_in_range(&anchor)) {
                return Err(GeometryError::AnchorOutOfRange(region.id));
            }
            region.countries = region
                .countries
                .iter()
                .map(|id| normalize_country_key(id))
                .filter(|id| !id.is_empty())
                .collect();
            if region_map.contains_key(&region.id) {
                return Err(GeometryError::DuplicateRegion(region.id));
            }
            region_map.insert(region.id.clone(), region);
        }

        info!(
            "event=geometry_load module=geometry status=ok countries={} regions={}",
            country_map.len(),
            region_map.len()
        );
        Ok(Self {
            countries: country_map,
            regions: region_map,
        })
    }

    /// Decodes `{ "countries": [...], "regions": [...] }`.
    pub fn from_json_str(json: &str) -> GeometryResult<Self> {
        let file: MapGeometryFile = serde_json::from_str(json)?;
        Self::from_parts(file.countries, file.regions)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> GeometryResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Looks up a country by any casing, whitespace or `_`/space variant of
    /// its id.
    pub fn country(&self, id: &str) -> Option<&CountryGeometry> {
        self.countries.get(&normalize_country_key(id))
    }

    /// Looks up a declared region.
    pub fn region(&self, id: &str) -> Option<&RegionDef> {
        self.regions.get(&normalize_token(id))
    }

    /// All country geometries ordered by id.
    pub fn countries(&self) -> impl Iterator<Item = &CountryGeometry> {
        self.countries.values()
    }

    /// Declared region ids, sorted.
    pub fn region_ids(&self) -> Vec<RegionId> {
        self.regions.keys().cloned().collect()
    }

    /// Members of `region`: explicit members plus countries whose geometry
    /// names the region. Sorted and deduplicated.
    pub fn countries_by_region(&self, region: &str) -> Vec<CountryId> {
        let region = normalize_token(region);
        let mut members: Vec<CountryId> = self
            .countries
            .values()
            .filter(|country| !region.is_empty() && country.region == region)
            .map(|country| country.id.clone())
            .collect();
        if let Some(def) = self.regions.get(&region) {
            members.extend(def.countries.iter().cloned());
        }
        members.sort_by(|a, b| locale_cmp(a, b));
        members.dedup();
        members
    }

    /// Fixed anchor of a declared region, if any.
    pub fn region_anchor(&self, region: &str) -> Option<RelativePoint> {
        self.region(region).and_then(|def| def.anchor)
    }

    /// Every dot of every member country with known geometry.
    pub fn region_dots(&self, region: &str) -> Vec<Dot> {
        self.countries_by_region(region)
            .iter()
            .filter_map(|id| self.countries.get(id))
            .flat_map(|country| country.dots.iter().copied())
            .collect()
    }
}

fn unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn dot_in_range(dot: &Dot) -> bool {
    unit_range(dot.x) && unit_range(dot.y)
}

fn radius_valid(dot: &Dot) -> bool {
    dot.radius
        .map_or(true, |radius| radius.is_finite() && radius > 0.0)
}

fn point_in_range(point: &RelativePoint) -> bool {
    unit_range(point.x) && unit_range(point.y)
}
