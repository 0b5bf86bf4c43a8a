//! Base-map dot styling.

use crate::config::MapConfig;
use crate::model::project::CountryId;
use crate::query::project_query::ProjectQuery;
use crate::text::normalize_country_key;
use std::collections::HashSet;

/// One dot ready to draw, relative to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyledDot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Dots of one country sharing a single fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledCountry {
    pub id: CountryId,
    pub color: String,
    pub dots: Vec<StyledDot>,
}

/// Colors base-map countries by selection and project presence.
pub struct DotStyler<'a> {
    query: &'a ProjectQuery,
    config: &'a MapConfig,
}

impl<'a> DotStyler<'a> {
    pub fn new(query: &'a ProjectQuery, config: &'a MapConfig) -> Self {
        Self { query, config }
    }

    /// Styles every country of the map geometry.
    ///
    /// Selected countries use the selection color; countries with projects
    /// get a stable pick from the random color set; the rest use the plain
    /// dot color.
    pub fn style(&self, selected: &[CountryId]) -> Vec<StyledCountry> {
        let selected: HashSet<String> = selected
            .iter()
            .map(|id| normalize_country_key(id))
            .collect();

        self.query
            .geometry()
            .countries()
            .map(|country| {
                let color = if selected.contains(&country.id) {
                    self.config.selected_color.clone()
                } else if self.query.is_country_represented(&country.id) {
                    pick_color(&country.id, &self.config.random_color_set)
                        .unwrap_or(&self.config.dot_color)
                        .to_string()
                } else {
                    self.config.dot_color.clone()
                };
                let dots = country
                    .dots
                    .iter()
                    .map(|dot| StyledDot {
                        x: dot.x,
                        y: dot.y,
                        radius: dot.radius.unwrap_or(self.config.dot_radius),
                    })
                    .collect();
                StyledCountry {
                    id: country.id.clone(),
                    color,
                    dots,
                }
            })
            .collect()
    }
}

/// Picks a palette color from a FNV-1a hash of `seed`, so a country keeps its
/// color across re-renders.
fn pick_color<'c>(seed: &str, colors: &'c [String]) -> Option<&'c str> {
    if colors.is_empty() {
        return None;
    }
    let hash = seed.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    });
    colors
        .get((hash % colors.len() as u64) as usize)
        .map(String::as_str)
}
