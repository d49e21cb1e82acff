// Concentric ring layout.
//
// One ring per priority, most urgent innermost:
// 1. A lone task in the most urgent group sits exactly at the centre
// 2. Each ring's radius fits its labels' arc length: n * (maxW + spacing) / 2π,
//    and clears the previous ring's footprint
// 3. Tasks are spread evenly by angle, starting at the top (-90°)
// 4. Settling (optional) pushes a ring outward just far enough that its
//    margin-grown boxes clear each other and everything placed before
//
// Properties:
// - Deterministic, no retries: every radius is computed, not searched
// - Radius is non-decreasing in every label width

use std::f64::consts::{FRAC_PI_2, TAU};

use super::group_by_priority;
use crate::layout::{Container, ItemBox, LayoutConfig, LayoutResult, LayoutStrategy, Placement, RectF, SizeF};

/// Pushes a computed radius strictly past the touching point.
const SETTLE_SLACK: f64 = 0.5;
/// Direction components below this are treated as zero.
const AXIS_EPS: f64 = 1e-9;

pub struct RingLayout;

impl LayoutStrategy for RingLayout {
    fn name(&self) -> &'static str {
        "ring"
    }

    fn layout(&self, boxes: &[ItemBox], container: Container, cfg: &LayoutConfig) -> LayoutResult {
        LayoutResult { placements: layout_rings(boxes, container, cfg), warnings: Vec::new() }
    }
}

/// Smallest radius whose circumference holds `count` boxes of width `max_w`
/// with `spacing` between them.
pub fn ring_radius(count: usize, max_w: f64, spacing: f64) -> f64 {
    (count as f64 * (max_w + spacing) / TAU).max(0.0)
}

fn ring_angles(count: usize) -> Vec<f64> {
    let step = TAU / count as f64;
    (0..count).map(|i| -FRAC_PI_2 + i as f64 * step).collect()
}

fn layout_rings(boxes: &[ItemBox], container: Container, cfg: &LayoutConfig) -> Vec<Placement> {
    let center = container.center();
    let mut slots: Vec<Option<Placement>> = vec![None; boxes.len()];
    let mut placed: Vec<RectF> = Vec::with_capacity(boxes.len());

    // Running radius: where the next ring may start.
    let mut running = 0.0f64;
    let mut first = true;

    for (_, members) in group_by_priority(boxes) {
        let max_w = members.iter().map(|&i| boxes[i].size.w).fold(0.0, f64::max);
        let max_h = members.iter().map(|&i| boxes[i].size.h).fold(0.0, f64::max);

        if first && members.len() == 1 {
            let i = members[0];
            let p = place(&boxes[i], center.0, center.1);
            placed.push(p.rect());
            slots[i] = Some(p);
            running = max_w.max(max_h) / 2.0 + cfg.center_gap;
            first = false;
            continue;
        }

        let min_radius = ring_radius(members.len(), max_w, cfg.item_spacing);
        let base = if first {
            min_radius.max(cfg.first_ring_min_radius)
        } else {
            (running + max_h + cfg.ring_gap).max(min_radius)
        };
        first = false;

        let angles = ring_angles(members.len());
        let sizes: Vec<SizeF> = members.iter().map(|&i| boxes[i].size).collect();
        let radius = if cfg.settle_rings {
            settle_radius(base, &angles, &sizes, &placed, center, cfg.collision_margin)
        } else {
            base
        };

        for (k, &i) in members.iter().enumerate() {
            let x = center.0 + radius * angles[k].cos();
            let y = center.1 + radius * angles[k].sin();
            let p = place(&boxes[i], x, y);
            placed.push(p.rect());
            slots[i] = Some(p);
        }

        running = radius + max_h / 2.0 + cfg.ring_advance;
    }

    slots.into_iter().flatten().collect()
}

fn place(item: &ItemBox, x: f64, y: f64) -> Placement {
    Placement { id: item.id.clone(), x, y, width: item.size.w, height: item.size.h }
}

/// Smallest radius `>= base` at which a ring of boxes at `angles` collides with
/// neither itself nor `placed`, both sides grown by `margin`.
///
/// Two centre-anchored boxes overlap iff |dx| <= need_x and |dy| <= need_y.
/// On one ring every centre distance scales with r, so each pair gives a lower
/// bound. Against a fixed box, the colliding radii form one closed interval.
fn settle_radius(
    base: f64,
    angles: &[f64],
    sizes: &[SizeF],
    placed: &[RectF],
    center: (f64, f64),
    margin: f64,
) -> f64 {
    let dirs: Vec<(f64, f64)> = angles.iter().map(|a| (a.cos(), a.sin())).collect();
    let mut r = base;

    for i in 0..dirs.len() {
        for j in i + 1..dirs.len() {
            let need_x = (sizes[i].w + sizes[j].w) / 2.0 + 2.0 * margin;
            let need_y = (sizes[i].h + sizes[j].h) / 2.0 + 2.0 * margin;
            let rx = separating_radius(need_x, (dirs[i].0 - dirs[j].0).abs());
            let ry = separating_radius(need_y, (dirs[i].1 - dirs[j].1).abs());
            let pair = rx.min(ry);
            if pair.is_finite() {
                r = r.max(pair + SETTLE_SLACK);
            }
        }
    }

    let mut forbidden: Vec<(f64, f64)> = Vec::new();
    for (k, &(c, s)) in dirs.iter().enumerate() {
        for p in placed {
            let px = p.x + p.w / 2.0 - center.0;
            let py = p.y + p.h / 2.0 - center.1;
            let need_x = (sizes[k].w + p.w) / 2.0 + 2.0 * margin;
            let need_y = (sizes[k].h + p.h) / 2.0 + 2.0 * margin;
            let (Some(ix), Some(iy)) = (axis_interval(c, px, need_x), axis_interval(s, py, need_y)) else {
                continue;
            };
            let lo = ix.0.max(iy.0).max(0.0);
            let hi = ix.1.min(iy.1);
            if lo <= hi {
                forbidden.push((lo, hi));
            }
        }
    }

    forbidden.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (lo, hi) in forbidden {
        if lo > r {
            break;
        }
        if hi >= r {
            r = hi + SETTLE_SLACK;
        }
    }
    r
}

fn separating_radius(need: f64, delta: f64) -> f64 {
    if delta > AXIS_EPS { need / delta } else { f64::INFINITY }
}

/// Radii r with |r * dir - offset| <= need; None if there are none.
fn axis_interval(dir: f64, offset: f64, need: f64) -> Option<(f64, f64)> {
    if dir.abs() <= AXIS_EPS {
        return (offset.abs() <= need).then_some((f64::NEG_INFINITY, f64::INFINITY));
    }
    let a = (offset - need) / dir;
    let b = (offset + need) / dir;
    Some((a.min(b), a.max(b)))
}
