// Greedy spiral placement.
//
// Tasks are placed one at a time, most urgent first. Each one walks a
// golden-angle spiral out from the centre and takes the first candidate that
// is clear of everything placed so far. After `max_attempts` candidates the
// task stays at the last one and the collision is tolerated with a warning,
// so a pass always terminates with one placement per task.

use super::group_by_priority;
use crate::layout::collision::{CollisionIndex, LinearIndex};
use crate::layout::spatial_grid::SpatialGrid;
use crate::layout::{Container, ItemBox, LayoutConfig, LayoutResult, LayoutStrategy, LayoutWarning, Placement, RectF};

/// ~137.5°, spreads consecutive candidates evenly over the disc.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Above this many tasks the grid answers overlap queries.
const GRID_THRESHOLD: usize = 64;

pub struct SpiralLayout;

impl LayoutStrategy for SpiralLayout {
    fn name(&self) -> &'static str {
        "spiral"
    }

    fn layout(&self, boxes: &[ItemBox], container: Container, cfg: &LayoutConfig) -> LayoutResult {
        let mut index: Box<dyn CollisionIndex> = if boxes.len() > GRID_THRESHOLD {
            let cell = boxes.iter().map(|b| b.size.w.max(b.size.h)).fold(1.0, f64::max);
            Box::new(SpatialGrid::new(cell))
        } else {
            Box::new(LinearIndex::new())
        };
        layout_spiral(boxes, container, cfg, index.as_mut())
    }
}

/// Candidate `k` of the spiral; candidate 0 is the centre itself.
fn spiral_point(center: (f64, f64), k: usize, step: f64) -> (f64, f64) {
    let r = step * (k as f64).sqrt();
    let a = k as f64 * GOLDEN_ANGLE - std::f64::consts::FRAC_PI_2;
    (center.0 + r * a.cos(), center.1 + r * a.sin())
}

fn layout_spiral(
    boxes: &[ItemBox],
    container: Container,
    cfg: &LayoutConfig,
    index: &mut dyn CollisionIndex,
) -> LayoutResult {
    let center = container.center();
    let mut slots: Vec<Option<Placement>> = vec![None; boxes.len()];
    let mut warnings = Vec::new();

    for (_, members) in group_by_priority(boxes) {
        for i in members {
            let b = &boxes[i];
            let mut rect = RectF::centered(center.0, center.1, b.size);
            let mut found = false;

            for k in 0..cfg.max_attempts {
                let (x, y) = spiral_point(center, k, cfg.spiral_step);
                rect = RectF::centered(x, y, b.size);
                if !index.overlaps_any(&rect, cfg.collision_margin) {
                    found = true;
                    break;
                }
            }

            if !found {
                log::warn!(
                    "task '{}' still overlaps after {} attempts; placing anyway",
                    b.id,
                    cfg.max_attempts
                );
                warnings.push(LayoutWarning::UnresolvedCollision {
                    id: b.id.clone(),
                    attempts: cfg.max_attempts,
                });
            }

            index.insert(rect);
            slots[i] = Some(Placement {
                id: b.id.clone(),
                x: rect.x + rect.w / 2.0,
                y: rect.y + rect.h / 2.0,
                width: b.size.w,
                height: b.size.h,
            });
        }
    }

    LayoutResult { placements: slots.into_iter().flatten().collect(), warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SizeF;
    use crate::layout::test_support::{assert_no_overlap, distance_from};
    use crate::task::Priority;

    fn sized(id: &str, priority: i64, w: f64) -> ItemBox {
        ItemBox { id: id.to_string(), priority: Priority::new(priority).unwrap(), size: SizeF { w, h: 90.0 } }
    }

    fn spiral_cfg() -> LayoutConfig {
        LayoutConfig { strategy: "spiral".to_string(), ..LayoutConfig::default() }
    }

    #[test]
    fn test_first_urgent_task_takes_centre() {
        let boxes = vec![sized("low", 1, 120.0), sized("top", 4, 120.0)];
        let out = SpiralLayout.layout(&boxes, Container::new(600.0, 600.0), &spiral_cfg());
        let top = &out.placements[1];
        assert_eq!(top.id, "top");
        assert_eq!((top.x, top.y), (300.0, 300.0));
        assert!(distance_from(&out.placements[0], (300.0, 300.0)) > 0.0);
    }

    #[test]
    fn test_spiral_avoids_overlap_when_budget_allows() {
        let boxes: Vec<ItemBox> = (0..10).map(|i| sized(&format!("t{i}"), 1 + (i % 4) as i64, 150.0)).collect();
        let cfg = spiral_cfg();
        let out = SpiralLayout.layout(&boxes, Container::new(1200.0, 1200.0), &cfg);
        assert!(out.warnings.is_empty());
        assert_eq!(out.placements.len(), 10);
        assert_no_overlap(&out.placements, cfg.collision_margin);
    }

    #[test]
    fn test_exhausted_budget_places_anyway_and_warns() {
        let cfg = LayoutConfig { max_attempts: 3, ..spiral_cfg() };
        let boxes = vec![sized("a", 4, 400.0), sized("b", 4, 400.0)];
        let out = SpiralLayout.layout(&boxes, Container::new(100.0, 100.0), &cfg);
        assert_eq!(out.placements.len(), 2);
        assert_eq!(
            out.warnings,
            vec![LayoutWarning::UnresolvedCollision { id: "b".to_string(), attempts: 3 }]
        );
    }

    #[test]
    fn test_fifty_tasks_in_tiny_container_terminates() {
        let boxes: Vec<ItemBox> = (0..50).map(|i| sized(&format!("t{i}"), 3, 200.0)).collect();
        let out = SpiralLayout.layout(&boxes, Container::new(100.0, 100.0), &spiral_cfg());
        assert_eq!(out.placements.len(), 50);
        for (i, p) in out.placements.iter().enumerate() {
            assert_eq!(p.id, format!("t{i}"));
        }
    }

    #[test]
    fn test_grid_index_used_for_large_tiers() {
        let boxes: Vec<ItemBox> = (0..80).map(|i| sized(&format!("t{i}"), 2, 60.0)).collect();
        let cfg = LayoutConfig { max_attempts: 500, ..spiral_cfg() };
        let grid = SpiralLayout.layout(&boxes, Container::new(800.0, 800.0), &cfg);

        let mut linear = LinearIndex::new();
        let reference = layout_spiral(&boxes, Container::new(800.0, 800.0), &cfg, &mut linear);
        assert_eq!(grid, reference);
    }
}
