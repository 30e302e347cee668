// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout post-processing.
//!
//! Snaps solved rectangles to the configured grid, optionally reduces the
//! model to its lowest storey, and re-origins every storey so downstream
//! geometry works in storey-local coordinates.

use graph2ifc_core::{LayoutRect, Storey, COORD_EPS};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-storey bounding box after re-origin.
///
/// `origin` is the world offset that was subtracted from the storey's
/// rectangles; consumers placing the storey in a world context apply it once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreyExtent {
    pub storey_id: String,
    pub origin: [f64; 2],
    pub width: f64,
    pub height: f64,
}

fn floor_grid(value: f64, grid: f64) -> f64 {
    ((value + 1e-9) / grid).floor() * grid
}

fn ceil_grid(value: f64, grid: f64) -> f64 {
    ((value - 1e-9) / grid).ceil() * grid
}

/// Snaps all rectangles to the grid, preserving non-overlap.
///
/// Lower-left corners round down, upper-right corners round up, so every
/// rectangle can only grow. Growth can re-introduce contact overlaps; those
/// are repaired by shifting the later rectangle (sorted space-id order) by
/// whole grid units along the axis of least penetration.
pub fn snap_to_grid(rects: &mut Vec<LayoutRect>, grid: f64) {
    for r in rects.iter_mut() {
        let right = ceil_grid(r.right(), grid);
        let top = ceil_grid(r.top(), grid);
        r.x = floor_grid(r.x, grid);
        r.y = floor_grid(r.y, grid);
        r.w = right - r.x;
        r.h = top - r.y;
    }

    rects.sort_by(|a, b| {
        a.storey_id
            .cmp(&b.storey_id)
            .then_with(|| a.space_id.cmp(&b.space_id))
    });

    // Repair sweeps run to a fixpoint; every shift moves a rectangle in +x
    // or +y, so the process terminates.
    let mut sweeps = 0;
    loop {
        let mut conflicts = 0;
        for i in 0..rects.len() {
            for j in (i + 1)..rects.len() {
                if rects[i].storey_id != rects[j].storey_id {
                    continue;
                }
                let overlap_w = rects[i].right().min(rects[j].right())
                    - rects[i].x.max(rects[j].x);
                let overlap_h = rects[i].top().min(rects[j].top())
                    - rects[i].y.max(rects[j].y);
                if overlap_w > COORD_EPS && overlap_h > COORD_EPS {
                    conflicts += 1;
                    if overlap_w <= overlap_h {
                        rects[j].x += ceil_grid(overlap_w, grid).max(grid);
                    } else {
                        rects[j].y += ceil_grid(overlap_h, grid).max(grid);
                    }
                }
            }
        }
        sweeps += 1;
        if conflicts == 0 || sweeps > rects.len() + 8 {
            break;
        }
    }
}

/// Keeps only the lowest storey and normalizes its elevation to 0.
///
/// The retained storey keeps its identifier and name; rectangles on all
/// other storeys are dropped.
pub fn single_storey_filter(
    storeys: Vec<Storey>,
    rects: Vec<LayoutRect>,
) -> (Vec<Storey>, Vec<LayoutRect>) {
    let Some(min_elevation) = storeys
        .iter()
        .map(|s| s.elevation)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    else {
        return (storeys, rects);
    };

    let kept: Vec<Storey> = storeys
        .into_iter()
        .filter(|s| (s.elevation - min_elevation).abs() <= COORD_EPS)
        .enumerate()
        .map(|(index, storey)| Storey {
            elevation: 0.0,
            index,
            ..storey
        })
        .collect();

    let kept_ids: FxHashSet<&str> = kept.iter().map(|s| s.id.as_str()).collect();
    let rects: Vec<LayoutRect> = rects
        .into_iter()
        .filter(|r| kept_ids.contains(r.storey_id.as_str()))
        .collect();

    debug!(storeys = kept.len(), rects = rects.len(), "single-storey filter applied");
    (kept, rects)
}

/// Translates every storey so its rectangle bounding box starts at (0, 0).
///
/// Returns the per-storey extents (origin and size), sorted by storey id.
pub fn reorigin_storeys(rects: &mut [LayoutRect]) -> Vec<StoreyExtent> {
    let mut bounds: FxHashMap<String, (f64, f64, f64, f64)> = FxHashMap::default();
    for r in rects.iter() {
        let entry = bounds
            .entry(r.storey_id.clone())
            .or_insert((f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY));
        entry.0 = entry.0.min(r.x);
        entry.1 = entry.1.min(r.y);
        entry.2 = entry.2.max(r.right());
        entry.3 = entry.3.max(r.top());
    }

    for r in rects.iter_mut() {
        let (min_x, min_y, _, _) = bounds[&r.storey_id];
        r.x -= min_x;
        r.y -= min_y;
    }

    let mut extents: Vec<StoreyExtent> = bounds
        .into_iter()
        .map(|(storey_id, (min_x, min_y, max_x, max_y))| StoreyExtent {
            storey_id,
            origin: [min_x, min_y],
            width: max_x - min_x,
            height: max_y - min_y,
        })
        .collect();
    extents.sort_by(|a, b| a.storey_id.cmp(&b.storey_id));
    extents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(space_id: &str, storey_id: &str, x: f64, y: f64, w: f64, h: f64) -> LayoutRect {
        LayoutRect {
            space_id: space_id.to_string(),
            storey_id: storey_id.to_string(),
            x,
            y,
            w,
            h,
        }
    }

    fn storey(id: &str, elevation: f64, index: usize) -> Storey {
        Storey {
            id: id.to_string(),
            name: Some(id.to_string()),
            elevation,
            index,
        }
    }

    #[test]
    fn snapping_rounds_outward() {
        let mut rects = vec![rect("A", "L1", 0.02, 0.04, 3.91, 3.87)];
        snap_to_grid(&mut rects, 0.05);
        let r = &rects[0];
        assert!((r.x - 0.0).abs() < 1e-9);
        assert!((r.y - 0.0).abs() < 1e-9);
        assert!((r.right() - 3.95).abs() < 1e-9);
        assert!((r.top() - 3.95).abs() < 1e-9);
    }

    #[test]
    fn snapping_keeps_exact_coordinates() {
        let mut rects = vec![rect("A", "L1", 1.0, 2.0, 4.0, 3.0)];
        snap_to_grid(&mut rects, 0.05);
        assert_eq!(rects[0], rect("A", "L1", 1.0, 2.0, 4.0, 3.0));
    }

    #[test]
    fn snapping_repairs_introduced_overlap() {
        // B starts 1 mm right of A's edge; outward rounding makes them
        // overlap until the repair shifts B one grid unit.
        let mut rects = vec![
            rect("A", "L1", 0.0, 0.0, 4.02, 4.0),
            rect("B", "L1", 4.03, 0.0, 4.0, 4.0),
        ];
        snap_to_grid(&mut rects, 0.05);
        assert!(!rects[0].overlaps(&rects[1]));
        for r in &rects {
            for v in [r.x, r.y, r.w, r.h] {
                let cells = v / 0.05;
                assert!((cells - cells.round()).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn single_storey_keeps_lowest_and_zeroes_elevation() {
        let storeys = vec![storey("L1", 0.0, 0), storey("L2", 3.0, 1)];
        let rects = vec![
            rect("A", "L1", 0.0, 0.0, 4.0, 4.0),
            rect("B", "L2", 0.0, 0.0, 4.0, 4.0),
        ];
        let (kept, rects) = single_storey_filter(storeys, rects);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "L1");
        assert_eq!(kept[0].name.as_deref(), Some("L1"));
        assert_eq!(kept[0].elevation, 0.0);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].space_id, "A");
    }

    #[test]
    fn single_storey_normalizes_nonzero_base() {
        let storeys = vec![storey("P1", -3.0, 0), storey("L1", 0.0, 1)];
        let rects = vec![rect("A", "P1", 0.0, 0.0, 4.0, 4.0)];
        let (kept, rects) = single_storey_filter(storeys, rects);
        assert_eq!(kept[0].id, "P1");
        assert_eq!(kept[0].elevation, 0.0);
        assert_eq!(rects.len(), 1);
    }

    #[test]
    fn reorigin_translates_per_storey() {
        let mut rects = vec![
            rect("A", "L1", 2.0, 3.0, 4.0, 4.0),
            rect("B", "L1", 6.0, 3.0, 2.0, 4.0),
            rect("C", "L2", -1.0, -1.0, 3.0, 3.0),
        ];
        let extents = reorigin_storeys(&mut rects);

        assert_eq!(rects[0].x, 0.0);
        assert_eq!(rects[0].y, 0.0);
        assert_eq!(rects[1].x, 4.0);
        assert_eq!(rects[2].x, 0.0);

        assert_eq!(extents.len(), 2);
        assert_eq!(extents[0].storey_id, "L1");
        assert_eq!(extents[0].origin, [2.0, 3.0]);
        assert!((extents[0].width - 6.0).abs() < 1e-9);
        assert_eq!(extents[1].origin, [-1.0, -1.0]);
    }
}
