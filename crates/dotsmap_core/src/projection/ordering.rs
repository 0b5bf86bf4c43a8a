//! Stable paint order for interactive circles.

use crate::aggregate::region_aggregator::AggregateEntry;
use crate::projection::projector::ScreenCircle;
use crate::text::locale_cmp;
use std::cmp::Ordering;

/// Anything that can be ordered for painting by its key.
pub trait RenderKey {
    fn render_key(&self) -> &str;
}

impl RenderKey for AggregateEntry {
    fn render_key(&self) -> &str {
        self.key.as_str()
    }
}

impl RenderKey for ScreenCircle {
    fn render_key(&self) -> &str {
        self.key.as_str()
    }
}

/// Sorts `items` for painting.
///
/// The hovered item paints last, the selected item right before it, and
/// everything else in ascending key order.
pub fn order_for_render<T: RenderKey>(
    mut items: Vec<T>,
    selected: Option<&str>,
    hovered: Option<&str>,
) -> Vec<T> {
    items.sort_by(|a, b| {
        compare_for_render(a.render_key(), b.render_key(), selected, hovered)
    });
    items
}

fn compare_for_render(
    a: &str,
    b: &str,
    selected: Option<&str>,
    hovered: Option<&str>,
) -> Ordering {
    interaction_rank(a, selected, hovered)
        .cmp(&interaction_rank(b, selected, hovered))
        .then_with(|| locale_cmp(a, b))
}

fn interaction_rank(key: &str, selected: Option<&str>, hovered: Option<&str>) -> u8 {
    if hovered == Some(key) {
        2
    } else if selected == Some(key) {
        1
    } else {
        0
    }
}
