// AABB collision queries.
//
// Both the candidate and every placed box are grown by `margin` on all four
// sides before testing, so two labels end up at least 2 * margin apart.
// The linear index is an O(n) scan per query (O(n^2) per layout pass), fine
// for the tens of tasks a tier holds; `SpatialGrid` answers the same queries
// for large fan-outs.

use super::{Placement, RectF};

pub trait CollisionIndex {
    fn insert(&mut self, rect: RectF);
    /// Does `rect` overlap any inserted rectangle once both are grown by `margin`?
    fn overlaps_any(&self, rect: &RectF, margin: f64) -> bool;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Does `candidate` collide with any of `placed` under `margin`?
pub fn overlaps(candidate: &Placement, placed: &[Placement], margin: f64) -> bool {
    let c = candidate.rect().expand(margin);
    placed.iter().any(|p| c.overlaps(&p.rect().expand(margin)))
}

#[derive(Debug, Clone, Default)]
pub struct LinearIndex {
    rects: Vec<RectF>,
}

impl LinearIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CollisionIndex for LinearIndex {
    fn insert(&mut self, rect: RectF) {
        self.rects.push(rect);
    }

    fn overlaps_any(&self, rect: &RectF, margin: f64) -> bool {
        let r = rect.expand(margin);
        self.rects.iter().any(|p| r.overlaps(&p.expand(margin)))
    }

    fn len(&self) -> usize {
        self.rects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(id: &str, x: f64, y: f64, w: f64, h: f64) -> Placement {
        Placement { id: id.to_string(), x, y, width: w, height: h }
    }

    #[test]
    fn test_disjoint_boxes_collide_within_margin() {
        // Gap of 20px between edges; margin 15 grows each side by 15 => collide.
        let a = placement("a", 50.0, 50.0, 100.0, 40.0);
        let b = placement("b", 170.0, 50.0, 100.0, 40.0);
        assert!(!a.rect().overlaps(&b.rect()));
        assert!(overlaps(&b, &[a.clone()], 15.0));
        assert!(!overlaps(&b, &[a], 5.0));
    }

    #[test]
    fn test_vertical_separation_is_enough() {
        let a = placement("a", 0.0, 0.0, 500.0, 90.0);
        let b = placement("b", 0.0, 200.0, 500.0, 90.0);
        assert!(!overlaps(&b, &[a], 15.0));
    }

    #[test]
    fn test_empty_placed_never_overlaps() {
        let a = placement("a", 0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &[], 100.0));
    }

    #[test]
    fn test_linear_index_matches_free_function() {
        let placed = vec![
            placement("a", 0.0, 0.0, 100.0, 90.0),
            placement("b", 300.0, 0.0, 100.0, 90.0),
        ];
        let mut index = LinearIndex::new();
        for p in &placed {
            index.insert(p.rect());
        }
        assert_eq!(index.len(), 2);

        for (x, y) in [(150.0, 0.0), (130.0, 0.0), (150.0, 120.0), (-200.0, -200.0)] {
            let c = placement("c", x, y, 100.0, 90.0);
            assert_eq!(index.overlaps_any(&c.rect(), 15.0), overlaps(&c, &placed, 15.0), "at ({x}, {y})");
        }
    }
}
