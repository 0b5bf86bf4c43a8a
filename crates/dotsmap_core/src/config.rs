//! Map rendering configuration.
//!
//! # Responsibility
//! - Hold color and radius defaults for dots and count circles.
//! - Apply overrides from JSON or environment variables.
//!
//! # Invariants
//! - A config handed to the projector or styler has passed `validate()`.
//! - Unset overrides keep the documented default.

use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Color of dots belonging to countries without projects.
pub const DEFAULT_DOT_COLOR: &str = "#C8C8CA";
/// Base-map dot radius in pixels.
pub const DEFAULT_DOT_RADIUS: f64 = 2.5;
/// Highlight color for the selected circle and selected countries.
pub const DEFAULT_SELECTED_COLOR: &str = "#DB4437";
/// Highlight color for a hovered, unselected circle.
pub const DEFAULT_HOVER_COLOR: &str = "#F4B400";
pub const DEFAULT_RANDOM_COLOR: &str = "#9963f7";
pub const DEFAULT_MAGNITUDE_PALETTE: [&str; 4] = ["#F6AAAA", "#9EFAFB", "#BF93FF", "#F3D882"];
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_HIGHLIGHT_TEXT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_CIRCLE_MIN_RADIUS: f64 = 18.0;
pub const DEFAULT_CIRCLE_MAX_RADIUS: f64 = 40.0;

pub const ENV_DOT_COLOR: &str = "DOTSMAP_DOT_COLOR";
pub const ENV_DOT_RADIUS: &str = "DOTSMAP_DOT_RADIUS";
pub const ENV_SELECTED_COLOR: &str = "DOTSMAP_SELECTED_COLOR";
pub const ENV_HOVER_COLOR: &str = "DOTSMAP_HOVER_COLOR";
pub const ENV_RANDOM_COLOR_SET: &str = "DOTSMAP_RANDOM_COLOR_SET";

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex")
});

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration validation or decoding error.
#[derive(Debug)]
pub enum ConfigError {
    InvalidColor { field: &'static str, value: String },
    InvalidRadius { field: &'static str, value: String },
    EmptyPalette(&'static str),
    InvalidCircleBounds { min: f64, max: f64 },
    Json(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColor { field, value } => {
                write!(f, "invalid color `{value}` for {field}; expected #RGB or #RRGGBB")
            }
            Self::InvalidRadius { field, value } => {
                write!(f, "invalid radius `{value}` for {field}; expected a positive number")
            }
            Self::EmptyPalette(field) => write!(f, "{field} cannot be empty"),
            Self::InvalidCircleBounds { min, max } => write!(
                f,
                "circle radius bounds must satisfy 0 < min <= max, got min={min} max={max}"
            ),
            Self::Json(err) => write!(f, "failed to decode map config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Colors and radii used by the dot styler and the count-circle projector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub dot_color: String,
    pub dot_radius: f64,
    pub selected_color: String,
    pub hover_color: String,
    /// Candidate colors for countries that have projects.
    pub random_color_set: Vec<String>,
    /// Count-circle fill colors, lowest magnitude bucket first.
    pub magnitude_palette: Vec<String>,
    pub text_color: String,
    pub highlight_text_color: String,
    pub circle_min_radius: f64,
    pub circle_max_radius: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            dot_color: DEFAULT_DOT_COLOR.to_string(),
            dot_radius: DEFAULT_DOT_RADIUS,
            selected_color: DEFAULT_SELECTED_COLOR.to_string(),
            hover_color: DEFAULT_HOVER_COLOR.to_string(),
            random_color_set: vec![DEFAULT_RANDOM_COLOR.to_string()],
            magnitude_palette: DEFAULT_MAGNITUDE_PALETTE
                .iter()
                .map(|color| color.to_string())
                .collect(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            highlight_text_color: DEFAULT_HIGHLIGHT_TEXT_COLOR.to_string(),
            circle_min_radius: DEFAULT_CIRCLE_MIN_RADIUS,
            circle_max_radius: DEFAULT_CIRCLE_MAX_RADIUS,
        }
    }
}

impl MapConfig {
    /// Decodes a JSON object; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads overrides from process environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup` over the defaults.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        let mut applied = 0usize;

        if let Some(value) = read(ENV_DOT_COLOR) {
            config.dot_color = value;
            applied += 1;
        }
        if let Some(value) = read(ENV_DOT_RADIUS) {
            config.dot_radius = value.parse().map_err(|_| ConfigError::InvalidRadius {
                field: "dot_radius",
                value: value.clone(),
            })?;
            applied += 1;
        }
        if let Some(value) = read(ENV_SELECTED_COLOR) {
            config.selected_color = value;
            applied += 1;
        }
        if let Some(value) = read(ENV_HOVER_COLOR) {
            config.hover_color = value;
            applied += 1;
        }
        if let Some(value) = read(ENV_RANDOM_COLOR_SET) {
            config.random_color_set = value
                .split(',')
                .map(str::trim)
                .filter(|color| !color.is_empty())
                .map(str::to_string)
                .collect();
            applied += 1;
        }

        config.validate()?;
        if applied > 0 {
            info!("event=config_load module=config status=ok overrides={applied}");
        }
        Ok(config)
    }

    /// Checks colors, radii and palettes.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_color("dot_color", &self.dot_color)?;
        validate_color("selected_color", &self.selected_color)?;
        validate_color("hover_color", &self.hover_color)?;
        validate_color("text_color", &self.text_color)?;
        validate_color("highlight_text_color", &self.highlight_text_color)?;

        if !(self.dot_radius.is_finite() && self.dot_radius > 0.0) {
            return Err(ConfigError::InvalidRadius {
                field: "dot_radius",
                value: self.dot_radius.to_string(),
            });
        }

        validate_palette("random_color_set", &self.random_color_set)?;
        validate_palette("magnitude_palette", &self.magnitude_palette)?;

        let (min, max) = (self.circle_min_radius, self.circle_max_radius);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidCircleBounds { min, max });
        }
        Ok(())
    }
}

/// Returns whether `value` is a `#RGB` or `#RRGGBB` literal.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}

fn validate_color(field: &'static str, value: &str) -> ConfigResult<()> {
    if is_hex_color(value) {
        return Ok(());
    }
    Err(ConfigError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

fn validate_palette(field: &'static str, colors: &[String]) -> ConfigResult<()> {
    if colors.is_empty() {
        return Err(ConfigError::EmptyPalette(field));
    }
    colors
        .iter()
        .try_for_each(|color| validate_color(field, color))
}
