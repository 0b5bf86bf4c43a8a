//! Count-circle placement, sizing and coloring.

use crate::aggregate::region_aggregator::{AggregateEntry, EntryKey};
use crate::config::MapConfig;
use crate::geometry::map::MapGeometry;
use crate::model::geometry::{Dot, RelativePoint};
use crate::projection::ordering::order_for_render;
use crate::query::project_query::country_display_name;
use crate::text::normalize_token;

/// Position used when no surface has been measured or no geometry exists.
pub const OFFSCREEN: ScreenPoint = ScreenPoint { x: -100.0, y: -100.0 };

/// Measured size of the rendering surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn scale(&self, point: RelativePoint) -> ScreenPoint {
        ScreenPoint {
            x: point.x * self.width,
            y: point.y * self.height,
        }
    }
}

/// Pixel-space point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Current hover/selection keys, as circle keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interaction {
    pub selected: Option<String>,
    pub hovered: Option<String>,
}

impl Interaction {
    pub fn new(selected: Option<&str>, hovered: Option<&str>) -> Self {
        Self {
            selected: selected.map(normalize_token),
            hovered: hovered.map(normalize_token),
        }
    }
}

/// Everything a presentation layer needs to draw one count circle.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenCircle {
    pub key: EntryKey,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill_color: String,
    pub text_color: String,
    /// Text drawn inside the circle: the project count.
    pub display_label: String,
    /// Human-readable name for info pills.
    pub display_name: String,
    pub project_count: usize,
}

/// Unweighted mean of all dots, or `None` for an empty cloud.
pub fn centroid(dots: &[Dot]) -> Option<RelativePoint> {
    if dots.is_empty() {
        return None;
    }
    let count = dots.len() as f64;
    let (sum_x, sum_y) = dots
        .iter()
        .fold((0.0, 0.0), |(x, y), dot| (x + dot.x, y + dot.y));
    Some(RelativePoint {
        x: sum_x / count,
        y: sum_y / count,
    })
}

/// Maps aggregate entries to screen circles.
pub struct GeometricProjector<'a> {
    geometry: &'a MapGeometry,
    config: &'a MapConfig,
}

impl<'a> GeometricProjector<'a> {
    pub fn new(geometry: &'a MapGeometry, config: &'a MapConfig) -> Self {
        Self { geometry, config }
    }

    /// Pixel position of a circle.
    ///
    /// Regions with a fixed anchor use it directly; everything else sits at
    /// the centroid of its dots. Returns [`OFFSCREEN`] when `surface` is not
    /// measured yet or the key has no dots.
    pub fn position(&self, key: &EntryKey, surface: Option<Surface>) -> ScreenPoint {
        let Some(surface) = surface else {
            return OFFSCREEN;
        };
        self.relative_position(key)
            .map(|point| surface.scale(point))
            .unwrap_or(OFFSCREEN)
    }

    fn relative_position(&self, key: &EntryKey) -> Option<RelativePoint> {
        match key {
            EntryKey::Region(region) => self
                .geometry
                .region_anchor(region)
                .or_else(|| centroid(&self.geometry.region_dots(region))),
            EntryKey::Country(country) => self
                .geometry
                .country(country)
                .and_then(|geometry| centroid(&geometry.dots)),
        }
    }

    /// Linear radius between the configured bounds, floored to whole pixels.
    pub fn radius(&self, relative_magnitude: f64) -> f64 {
        let min = self.config.circle_min_radius;
        let max = self.config.circle_max_radius;
        ((max - min) * relative_magnitude + min).floor()
    }

    /// Fill color: selection, then hover, then the magnitude bucket.
    pub fn fill_color(
        &self,
        relative_magnitude: f64,
        is_selected: bool,
        is_hovered: bool,
    ) -> &str {
        if is_selected {
            return &self.config.selected_color;
        }
        if is_hovered {
            return &self.config.hover_color;
        }
        let palette = &self.config.magnitude_palette;
        palette
            .get(palette_index(relative_magnitude, palette.len()))
            .map(String::as_str)
            .unwrap_or(&self.config.dot_color)
    }

    pub fn text_color(&self, is_selected: bool, is_hovered: bool) -> &str {
        if is_selected || is_hovered {
            &self.config.highlight_text_color
        } else {
            &self.config.text_color
        }
    }

    /// Builds the ordered render list for the current surface and UI state.
    pub fn render_list(
        &self,
        entries: &[AggregateEntry],
        surface: Option<Surface>,
        interaction: &Interaction,
    ) -> Vec<ScreenCircle> {
        let selected = interaction.selected.as_deref();
        let hovered = interaction.hovered.as_deref();

        let circles = entries
            .iter()
            .map(|entry| {
                let key = entry.key.as_str();
                let is_selected = selected == Some(key);
                let is_hovered = hovered == Some(key);
                let point = self.position(&entry.key, surface);
                ScreenCircle {
                    key: entry.key.clone(),
                    x: point.x,
                    y: point.y,
                    radius: self.radius(entry.relative_magnitude),
                    fill_color: self
                        .fill_color(entry.relative_magnitude, is_selected, is_hovered)
                        .to_string(),
                    text_color: self.text_color(is_selected, is_hovered).to_string(),
                    display_label: entry.project_count.to_string(),
                    display_name: display_name(&entry.key),
                    project_count: entry.project_count,
                }
            })
            .collect();

        order_for_render(circles, selected, hovered)
    }
}

fn display_name(key: &EntryKey) -> String {
    match key {
        EntryKey::Country(country) => country_display_name(country),
        EntryKey::Region(region) => region.clone(),
    }
}

/// Bucket `ceil(m * n) - 1`, clamped into `0..n`.
fn palette_index(relative_magnitude: f64, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    let bucket = (relative_magnitude * palette_len as f64).ceil() - 1.0;
    if bucket.is_nan() || bucket < 0.0 {
        return 0;
    }
    (bucket as usize).min(palette_len - 1)
}
