// Task cloud layouter.
//
// Goals:
// - Deterministic: same items in the same order + same container => same coordinates
// - No overlap: margin-expanded boxes of any two placements are disjoint
// - Priority-driven: most urgent tasks sit closest to the centre
// - Pure: no state survives a call; the container size is re-read every time
//
// Pipeline:
// - metrics: measure each title with the priority's bold font size
// - box_model: text width -> padded placement box
// - algorithms: ring (default) or spiral strategy turns boxes into centres
// - collision / spatial_grid: overlap queries used by settling and the spiral
//
// Output:
// - LayoutResult with one centre-anchored Placement per input item, in input
//   order, plus any tolerated-collision warnings.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::task::{Priority, Task, TaskNode};

mod algorithms;
mod box_model;
#[cfg(target_arch = "wasm32")]
mod canvas;
mod collision;
mod metrics;
mod spatial_grid;

pub use algorithms::{RingLayout, SpiralLayout, group_by_priority, ring_radius, strategy_for};
pub use box_model::{ItemBox, box_for};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasMeasurer;
pub use collision::{CollisionIndex, LinearIndex, overlaps};
pub use metrics::{FontMeasurer, TextMeasurer, TextMetrics};
pub use spatial_grid::SpatialGrid;

/// Anything the layouter can place.
pub trait LayoutItem {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn priority(&self) -> Priority;
}

impl LayoutItem for Task {
    fn id(&self) -> &str { &self.id }
    fn title(&self) -> &str { &self.title }
    fn priority(&self) -> Priority { self.priority }
}

impl LayoutItem for TaskNode {
    fn id(&self) -> &str { &self.id }
    fn title(&self) -> &str { &self.title }
    fn priority(&self) -> Priority { self.priority }
}

impl<T: LayoutItem + ?Sized> LayoutItem for &T {
    fn id(&self) -> &str { (**self).id() }
    fn title(&self) -> &str { (**self).title() }
    fn priority(&self) -> Priority { (**self).priority() }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeF {
    pub w: f64,
    pub h: f64,
}

/// Axis-aligned rectangle, top-left anchored.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl RectF {
    pub fn centered(cx: f64, cy: f64, size: SizeF) -> RectF {
        RectF { x: cx - size.w / 2.0, y: cy - size.h / 2.0, w: size.w, h: size.h }
    }

    pub fn right(&self) -> f64 { self.x + self.w }
    pub fn bottom(&self) -> f64 { self.y + self.h }

    pub fn expand(&self, margin: f64) -> RectF {
        RectF {
            x: self.x - margin,
            y: self.y - margin,
            w: self.w + 2.0 * margin,
            h: self.h + 2.0 * margin,
        }
    }

    /// Disjoint only when one lies strictly to one side of the other;
    /// touching edges count as overlap.
    pub fn overlaps(&self, other: &RectF) -> bool {
        let apart = self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom();
        !apart
    }
}

/// Available drawing area in pixels. Negative or non-finite sizes clamp to 0.
/// Only constructible through `new`, so the clamp always holds.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Container {
    width: f64,
    height: f64,
}

impl Container {
    pub fn new(width: f64, height: f64) -> Self {
        fn clamp(v: f64) -> f64 {
            if v.is_finite() { v.max(0.0) } else { 0.0 }
        }
        Self { width: clamp(width), height: clamp(height) }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Where one task goes: centre point plus the box used to compute it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    pub fn rect(&self) -> RectF {
        RectF::centered(self.x, self.y, SizeF { w: self.width, h: self.height })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// Retry budget ran out; the task sits at its last candidate and may overlap.
    UnresolvedCollision { id: String, attempts: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    pub placements: Vec<Placement>,
    pub warnings: Vec<LayoutWarning>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Bold font size per priority, index 0 = priority 1. Must strictly increase.
    pub font_px: [f64; 4],
    /// Horizontal padding inside a label (both sides together).
    pub text_padding: f64,
    /// Extra width reserved around each label.
    pub box_margin: f64,
    /// Box height, shared by every priority.
    pub box_height: f64,
    /// Added on each side of both boxes before overlap tests.
    pub collision_margin: f64,
    /// Gap between a centred task and the first ring.
    pub center_gap: f64,
    /// Arc length reserved between neighbours on a ring.
    pub item_spacing: f64,
    /// Smallest radius of a ring that is not preceded by a centred task.
    pub first_ring_min_radius: f64,
    /// Clearance between consecutive rings.
    pub ring_gap: f64,
    /// Running-radius advance after each ring.
    pub ring_advance: f64,
    /// Grow a ring's radius until its boxes clear everything placed so far.
    pub settle_rings: bool,
    /// "ring" or "spiral".
    pub strategy: String,
    /// Spiral: candidates tried per task before accepting a collision.
    pub max_attempts: usize,
    /// Spiral: radial growth factor of the golden-angle spiral.
    pub spiral_step: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            // 1.4 / 1.8 / 2.4 / 3 rem at 16px
            font_px: [22.4, 28.8, 38.4, 48.0],
            text_padding: 16.0,
            box_margin: 50.0,
            box_height: 90.0,
            collision_margin: 15.0,
            center_gap: 80.0,
            item_spacing: 40.0,
            first_ring_min_radius: 120.0,
            ring_gap: 60.0,
            ring_advance: 40.0,
            settle_rings: true,
            strategy: "ring".to_string(),
            max_attempts: 300,
            spiral_step: 40.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        if self.font_px.iter().any(|px| !px.is_finite() || *px <= 0.0) {
            return Err(Error::InvalidConfig("font sizes must be positive".to_string()));
        }
        if self.font_px.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidConfig(
                "font sizes must strictly increase with priority".to_string(),
            ));
        }
        let lengths = [
            ("text_padding", self.text_padding),
            ("box_margin", self.box_margin),
            ("collision_margin", self.collision_margin),
            ("center_gap", self.center_gap),
            ("item_spacing", self.item_spacing),
            ("first_ring_min_radius", self.first_ring_min_radius),
            ("ring_gap", self.ring_gap),
            ("ring_advance", self.ring_advance),
        ];
        for (name, v) in lengths {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be a non-negative number")));
            }
        }
        if self.text_padding + self.box_margin <= 0.0 {
            return Err(Error::InvalidConfig(
                "text_padding and box_margin cannot both be zero".to_string(),
            ));
        }
        if !self.box_height.is_finite() || self.box_height <= 0.0 {
            return Err(Error::InvalidConfig("box_height must be positive".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be at least 1".to_string()));
        }
        if !self.spiral_step.is_finite() || self.spiral_step <= 0.0 {
            return Err(Error::InvalidConfig("spiral_step must be positive".to_string()));
        }
        strategy_for(&self.strategy).map(|_| ())
    }
}

/// A placement algorithm. Boxes are already measured, so strategies cannot fail.
pub trait LayoutStrategy {
    fn name(&self) -> &'static str;
    /// One placement per box, in the order of `boxes`.
    fn layout(&self, boxes: &[ItemBox], container: Container, cfg: &LayoutConfig) -> LayoutResult;
}

/// Lay out one visible tier.
pub fn layout_tasks<T: LayoutItem>(
    items: &[T],
    container: Container,
    measurer: &dyn TextMeasurer,
    cfg: &LayoutConfig,
) -> Result<LayoutResult> {
    cfg.validate()?;
    if items.is_empty() {
        return Ok(LayoutResult::default());
    }

    let metrics = TextMetrics::new(measurer, cfg.font_px);
    let boxes = items
        .iter()
        .map(|item| box_for(item, &metrics, cfg))
        .collect::<Result<Vec<_>>>()?;

    let strategy = strategy_for(&cfg.strategy)?;
    let result = strategy.layout(&boxes, container, cfg);
    log::debug!(
        "{} layout: {} tasks in {}x{}, {} warnings",
        strategy.name(),
        result.placements.len(),
        container.width(),
        container.height(),
        result.warnings.len()
    );
    Ok(result)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_empty_input_gives_empty_layout() {
        let items: Vec<Task> = Vec::new();
        let result = layout_tasks(&items, Container::new(800.0, 600.0), &StubMeasurer, &LayoutConfig::default())
            .unwrap();
        assert!(result.placements.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_measurement_failure_fails_the_call() {
        let items = vec![task("a", "Alpha", 4)];
        let err = layout_tasks(&items, Container::new(800.0, 600.0), &BrokenMeasurer, &LayoutConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::MeasurementUnavailable(_)));
    }

    #[test]
    fn test_single_task_is_centred() {
        let items = vec![task("a", "Only one", 4)];
        let result = layout_tasks(&items, Container::new(800.0, 600.0), &StubMeasurer, &LayoutConfig::default())
            .unwrap();
        assert_eq!(result.placements.len(), 1);
        assert_eq!((result.placements[0].x, result.placements[0].y), (400.0, 300.0));
    }

    #[test]
    fn test_order_preserved_across_groups() {
        let items = vec![
            task("low", "Later", 1),
            task("top", "Now", 4),
            task("mid", "Soon", 3),
            task("mid2", "Soonish", 3),
            task("low2", "Much later", 1),
        ];
        let result = layout_tasks(&items, Container::new(1000.0, 800.0), &StubMeasurer, &LayoutConfig::default())
            .unwrap();
        let ids: Vec<&str> = result.placements.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["low", "top", "mid", "mid2", "low2"]);
    }

    #[test]
    fn test_tree_nodes_are_layout_items() {
        let doc = crate::task::sample_document();
        let tree = crate::task::TaskTree::from_document(&doc).unwrap();
        let visible = tree.children(None).unwrap();
        let result = layout_tasks(&visible, Container::new(1600.0, 1200.0), &StubMeasurer, &LayoutConfig::default())
            .unwrap();
        assert_eq!(result.placements.len(), 16);
        assert_eq!(result.placements[0].id, "task1");
        assert_no_overlap(&result.placements, LayoutConfig::default().collision_margin);
    }

    #[test]
    fn test_spiral_selected_by_name() {
        let cfg = LayoutConfig { strategy: "spiral".to_string(), ..LayoutConfig::default() };
        let items = vec![task("a", "A", 4), task("b", "B", 4)];
        let result = layout_tasks(&items, Container::new(800.0, 800.0), &StubMeasurer, &cfg).unwrap();
        // The spiral always starts at the centre.
        assert_eq!((result.placements[0].x, result.placements[0].y), (400.0, 400.0));
    }

    #[test]
    fn test_config_validation() {
        assert!(LayoutConfig::default().validate().is_ok());
        assert_eq!(LayoutConfig::default().max_attempts, 300);

        let flat_fonts = LayoutConfig { font_px: [20.0, 20.0, 30.0, 40.0], ..LayoutConfig::default() };
        assert!(matches!(flat_fonts.validate(), Err(Error::InvalidConfig(_))));

        let bad_height = LayoutConfig { box_height: 0.0, ..LayoutConfig::default() };
        assert!(bad_height.validate().is_err());

        let unknown = LayoutConfig { strategy: "force".to_string(), ..LayoutConfig::default() };
        assert!(matches!(unknown.validate(), Err(Error::UnknownStrategy(_))));
    }

    #[test]
    fn test_partial_config_json_uses_defaults() {
        let cfg: LayoutConfig = serde_json::from_str(r#"{"strategy":"spiral","max_attempts":120}"#).unwrap();
        assert_eq!(cfg.strategy, "spiral");
        assert_eq!(cfg.max_attempts, 120);
        assert_eq!(cfg.box_height, 90.0);
    }

    #[test]
    fn test_degenerate_container_clamps() {
        let c = Container::new(-5.0, f64::NAN);
        assert_eq!((c.width(), c.height()), (0.0, 0.0));
        assert_eq!(c.center(), (0.0, 0.0));
        assert_eq!(Container::new(f64::INFINITY, 300.0).center(), (0.0, 150.0));
        let items = vec![task("a", "A", 2), task("b", "B", 2)];
        let result = layout_tasks(&items, c, &StubMeasurer, &LayoutConfig::default()).unwrap();
        assert!(result.placements.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_rect_touching_counts_as_overlap() {
        let a = RectF { x: 0.0, y: 0.0, w: 10.0, h: 10.0 };
        let b = RectF { x: 10.0, y: 0.0, w: 10.0, h: 10.0 };
        let c = RectF { x: 10.5, y: 0.0, w: 10.0, h: 10.0 };
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
