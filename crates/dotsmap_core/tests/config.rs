use dotsmap_core::config::{
    ENV_DOT_COLOR, ENV_DOT_RADIUS, ENV_RANDOM_COLOR_SET, ENV_SELECTED_COLOR,
};
use dotsmap_core::{ConfigError, MapConfig};
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let values: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |name: &str| values.get(name).cloned()
}

#[test]
fn unset_variables_keep_defaults() {
    let config = MapConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, MapConfig::default());
    assert_eq!(config.dot_color, "#C8C8CA");
    assert_eq!(config.dot_radius, 2.5);
    assert_eq!(config.selected_color, "#DB4437");
    assert_eq!(config.random_color_set, vec!["#9963f7"]);
    assert_eq!(config.circle_min_radius, 18.0);
    assert_eq!(config.circle_max_radius, 40.0);
}

#[test]
fn environment_overrides_are_applied() {
    let config = MapConfig::from_lookup(lookup(&[
        (ENV_DOT_COLOR, "#101010"),
        (ENV_DOT_RADIUS, " 4 "),
        (ENV_SELECTED_COLOR, "#f00"),
        (ENV_RANDOM_COLOR_SET, "#111111, #222222,"),
    ]))
    .unwrap();

    assert_eq!(config.dot_color, "#101010");
    assert_eq!(config.dot_radius, 4.0);
    assert_eq!(config.selected_color, "#f00");
    assert_eq!(config.random_color_set, vec!["#111111", "#222222"]);
}

#[test]
fn blank_variable_is_treated_as_unset() {
    let config = MapConfig::from_lookup(lookup(&[(ENV_DOT_COLOR, "  ")])).unwrap();
    assert_eq!(config.dot_color, "#C8C8CA");
}

#[test]
fn invalid_overrides_are_rejected() {
    let err = MapConfig::from_lookup(lookup(&[(ENV_DOT_COLOR, "grey")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidColor { field: "dot_color", .. }));

    let err = MapConfig::from_lookup(lookup(&[(ENV_DOT_RADIUS, "-1")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRadius { .. }));

    let err = MapConfig::from_lookup(lookup(&[(ENV_RANDOM_COLOR_SET, ", ,")])).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyPalette("random_color_set")));
}

#[test]
fn json_config_fills_missing_fields_with_defaults() {
    let config = MapConfig::from_json_str(r##"{"hoverColor": "#00ff00", "circleMaxRadius": 50}"##)
        .unwrap();

    assert_eq!(config.hover_color, "#00ff00");
    assert_eq!(config.circle_max_radius, 50.0);
    assert_eq!(config.magnitude_palette.len(), 4);
}

#[test]
fn json_config_rejects_inverted_circle_bounds() {
    let err = MapConfig::from_json_str(r#"{"circleMinRadius": 30, "circleMaxRadius": 20}"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidCircleBounds { .. }));
}
