use dotsmap_core::{
    centroid, order_for_render, AggregateEntry, CountryGeometry, DatasetStore, Dot, DotStyler,
    EntryKey, GeometricProjector, Interaction, MapConfig, MapGeometry, ProjectQuery,
    ProjectRecord, RegionDef, RelativePoint, ScreenPoint, Selection, Surface, OFFSCREEN,
};
use std::sync::Arc;

fn country(id: &str, region: &str, dots: Vec<Dot>) -> CountryGeometry {
    CountryGeometry {
        id: id.to_string(),
        region: region.to_string(),
        dots,
    }
}

fn geometry() -> MapGeometry {
    MapGeometry::from_parts(
        vec![
            country("a", "", vec![Dot::new(0.5, 0.5)]),
            country("b", "", vec![Dot::new(0.2, 0.4)]),
            country("c", "", vec![Dot::new(0.8, 0.6)]),
            country("west", "pair", vec![Dot::new(0.0, 0.0)]),
            country("east", "pair", vec![Dot::new(1.0, 1.0)]),
            country(
                "heavy",
                "skewed",
                vec![Dot::new(0.0, 0.0), Dot::new(0.0, 0.0), Dot::new(0.0, 0.0)],
            ),
            country("light", "skewed", vec![Dot::new(1.0, 1.0)]),
        ],
        vec![
            RegionDef {
                id: "pair".to_string(),
                countries: Vec::new(),
                anchor: None,
            },
            RegionDef {
                id: "global".to_string(),
                countries: Vec::new(),
                anchor: Some(RelativePoint { x: 0.35, y: 0.5 }),
            },
            RegionDef {
                id: "empty".to_string(),
                countries: Vec::new(),
                anchor: None,
            },
        ],
    )
    .unwrap()
}

fn entry(key: EntryKey, project_count: usize, relative_magnitude: f64) -> AggregateEntry {
    AggregateEntry {
        key,
        project_count,
        relative_magnitude,
    }
}

fn country_key(id: &str) -> EntryKey {
    EntryKey::Country(id.to_string())
}

fn region_key(id: &str) -> EntryKey {
    EntryKey::Region(id.to_string())
}

fn keys<T: dotsmap_core::RenderKey>(items: &[T]) -> Vec<&str> {
    items.iter().map(|item| item.render_key()).collect()
}

const SURFACE: Option<Surface> = Some(Surface {
    width: 1000.0,
    height: 500.0,
});

#[test]
fn single_dot_country_projects_to_scaled_point() {
    let geometry = geometry();
    let config = MapConfig::default();
    let projector = GeometricProjector::new(&geometry, &config);

    assert_eq!(
        projector.position(&country_key("a"), SURFACE),
        ScreenPoint { x: 500.0, y: 250.0 }
    );
}

#[test]
fn region_centroid_averages_member_dots() {
    let geometry = geometry();
    let config = MapConfig::default();
    let projector = GeometricProjector::new(&geometry, &config);

    assert_eq!(
        centroid(&geometry.region_dots("pair")),
        Some(RelativePoint { x: 0.5, y: 0.5 })
    );
    assert_eq!(
        projector.position(&region_key("pair"), SURFACE),
        ScreenPoint { x: 500.0, y: 250.0 }
    );
}

#[test]
fn region_centroid_weights_countries_by_dot_count() {
    let geometry = geometry();

    assert_eq!(
        centroid(&geometry.region_dots("skewed")),
        Some(RelativePoint { x: 0.25, y: 0.25 })
    );
}

#[test]
fn region_anchor_overrides_centroid() {
    let geometry = geometry();
    let config = MapConfig::default();
    let projector = GeometricProjector::new(&geometry, &config);

    assert_eq!(
        projector.position(&region_key("global"), SURFACE),
        ScreenPoint { x: 350.0, y: 250.0 }
    );
}

#[test]
fn missing_surface_or_geometry_falls_back_offscreen() {
    let geometry = geometry();
    let config = MapConfig::default();
    let projector = GeometricProjector::new(&geometry, &config);

    assert_eq!(projector.position(&country_key("a"), None), OFFSCREEN);
    assert_eq!(projector.position(&country_key("zz"), SURFACE), OFFSCREEN);
    assert_eq!(projector.position(&region_key("empty"), SURFACE), OFFSCREEN);
    assert_eq!(OFFSCREEN, ScreenPoint { x: -100.0, y: -100.0 });
}

#[test]
fn radius_interpolates_and_floors() {
    let geometry = geometry();
    let config = MapConfig::default();
    let projector = GeometricProjector::new(&geometry, &config);

    assert_eq!(projector.radius(0.0), 18.0);
    assert_eq!(projector.radius(0.3), 24.0);
    assert_eq!(projector.radius(0.5), 29.0);
    assert_eq!(projector.radius(1.0), 40.0);
}

#[test]
fn fill_color_prefers_selection_then_hover_then_palette() {
    let geometry = geometry();
    let config = MapConfig::default();
    let projector = GeometricProjector::new(&geometry, &config);

    assert_eq!(projector.fill_color(0.2, true, true), "#DB4437");
    assert_eq!(projector.fill_color(0.2, false, true), "#F4B400");
    assert_eq!(projector.fill_color(0.2, false, false), "#F6AAAA");
    assert_eq!(projector.fill_color(0.5, false, false), "#9EFAFB");
    assert_eq!(projector.fill_color(1.0, false, false), "#F3D882");
    assert_eq!(projector.text_color(false, true), "#FFFFFF");
    assert_eq!(projector.text_color(false, false), "#000000");
}

#[test]
fn hovered_entry_renders_last_regardless_of_selection() {
    let entries = vec![
        entry(country_key("c"), 1, 1.0),
        entry(country_key("a"), 1, 1.0),
        entry(country_key("b"), 1, 1.0),
    ];

    assert_eq!(
        keys(&order_for_render(entries.clone(), None, Some("b"))),
        vec!["a", "c", "b"]
    );
    assert_eq!(
        keys(&order_for_render(entries.clone(), Some("a"), Some("b"))),
        vec!["c", "a", "b"]
    );
    assert_eq!(
        keys(&order_for_render(entries.clone(), Some("b"), Some("b"))),
        vec!["a", "c", "b"]
    );
    assert_eq!(
        keys(&order_for_render(entries.clone(), Some("a"), None)),
        vec!["b", "c", "a"]
    );
    assert_eq!(
        keys(&order_for_render(entries, None, None)),
        vec!["a", "b", "c"]
    );
}

#[test]
fn render_list_combines_position_size_color_and_order() {
    let geometry = geometry();
    let config = MapConfig::default();
    let projector = GeometricProjector::new(&geometry, &config);
    let entries = vec![
        entry(country_key("a"), 4, 1.0),
        entry(country_key("b"), 1, 0.25),
        entry(region_key("global"), 2, 0.5),
    ];

    let circles = projector.render_list(&entries, SURFACE, &Interaction::new(Some(" A "), None));

    assert_eq!(keys(&circles), vec!["b", "global", "a"]);
    let selected = &circles[2];
    assert_eq!((selected.x, selected.y), (500.0, 250.0));
    assert_eq!(selected.radius, 40.0);
    assert_eq!(selected.fill_color, "#DB4437");
    assert_eq!(selected.text_color, "#FFFFFF");
    assert_eq!(selected.display_label, "4");

    let global = &circles[1];
    assert_eq!((global.x, global.y), (350.0, 250.0));
    assert_eq!(global.display_name, "global");
    assert_eq!(global.fill_color, "#9EFAFB");
}

#[test]
fn render_list_before_layout_places_everything_offscreen() {
    let geometry = geometry();
    let config = MapConfig::default();
    let projector = GeometricProjector::new(&geometry, &config);
    let entries = vec![entry(country_key("a"), 1, 1.0)];

    let circles = projector.render_list(&entries, None, &Interaction::default());
    assert_eq!((circles[0].x, circles[0].y), (OFFSCREEN.x, OFFSCREEN.y));
}

#[test]
fn dot_styler_colors_selected_represented_and_plain_countries() {
    let geometry = MapGeometry::from_parts(
        vec![
            country("fr", "europe", vec![Dot::new(0.5, 0.3)]),
            country(
                "us",
                "americas",
                vec![Dot {
                    x: 0.2,
                    y: 0.35,
                    radius: Some(4.0),
                }],
            ),
            country("jp", "asia", vec![Dot::new(0.85, 0.4)]),
        ],
        Vec::new(),
    )
    .unwrap();
    let dataset = DatasetStore::from_records(vec![
        ProjectRecord::new("Alpha", "Acme", "us"),
        ProjectRecord::new("Beta", "Acme", "fr"),
    ])
    .unwrap();
    let query = ProjectQuery::new(Arc::new(dataset), Arc::new(geometry));
    let config = MapConfig::default();

    let selected = query.countries_for_selection(&Selection::Country("FR".to_string()));
    let styled = DotStyler::new(&query, &config).style(&selected);

    let color_of = |id: &str| {
        styled
            .iter()
            .find(|country| country.id == id)
            .map(|country| country.color.clone())
            .unwrap()
    };
    assert_eq!(color_of("fr"), "#DB4437");
    assert_eq!(color_of("us"), "#9963f7");
    assert_eq!(color_of("jp"), "#C8C8CA");

    let us = styled.iter().find(|country| country.id == "us").unwrap();
    assert_eq!(us.dots[0].radius, 4.0);
    let jp = styled.iter().find(|country| country.id == "jp").unwrap();
    assert_eq!(jp.dots[0].radius, 2.5);
}
