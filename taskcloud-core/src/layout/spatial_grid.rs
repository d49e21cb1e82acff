// Spatial hash grid for overlap queries.
//
// Same contract as the linear index, but a query only visits the cells its
// margin-grown rectangle covers instead of every placed box.

use std::collections::{HashMap, HashSet};

use super::RectF;
use super::collision::CollisionIndex;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f64,
    rects: Vec<RectF>,
    /// Cell coordinates -> indices into `rects`.
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    /// Cell size should be roughly the size of the largest expected box.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size >= 1.0 { cell_size } else { 1.0 };
        Self { cell_size, rects: Vec::new(), cells: HashMap::new() }
    }

    fn cell_range(&self, rect: &RectF) -> Vec<(i64, i64)> {
        let min_x = (rect.x / self.cell_size).floor() as i64;
        let max_x = (rect.right() / self.cell_size).floor() as i64;
        let min_y = (rect.y / self.cell_size).floor() as i64;
        let max_y = (rect.bottom() / self.cell_size).floor() as i64;

        let mut cells = Vec::new();
        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                cells.push((cx, cy));
            }
        }
        cells
    }

    /// Rectangles sharing a cell with `rect`. May include false positives.
    pub fn query(&self, rect: &RectF) -> Vec<RectF> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for cell in self.cell_range(rect) {
            if let Some(indices) = self.cells.get(&cell) {
                for &i in indices {
                    if seen.insert(i) {
                        result.push(self.rects[i]);
                    }
                }
            }
        }
        result
    }
}

impl CollisionIndex for SpatialGrid {
    fn insert(&mut self, rect: RectF) {
        let index = self.rects.len();
        self.rects.push(rect);
        for cell in self.cell_range(&rect) {
            self.cells.entry(cell).or_default().push(index);
        }
    }

    fn overlaps_any(&self, rect: &RectF, margin: f64) -> bool {
        // Stored boxes are raw, so the query box carries both margins.
        let grown = rect.expand(margin);
        self.query(&grown.expand(margin))
            .iter()
            .any(|r| grown.overlaps(&r.expand(margin)))
    }

    fn len(&self) -> usize {
        self.rects.len()
    }
}
