// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-storey footprint union.
//!
//! Merges a storey's layout rectangles into polygons using the i_overlay
//! boolean engine. Touching rectangles fuse into one component; disconnected
//! groups come back as separate components. Outer rings are returned
//! counter-clockwise with collinear vertices removed.

use graph2ifc_core::LayoutRect;
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;
use tracing::warn;

use crate::error::{Error, Result};

/// Cross-product threshold below which a vertex counts as collinear.
const COLLINEAR_EPS: f64 = 1e-6;

/// Polygons smaller than this are discarded as degenerate.
const MIN_AREA_THRESHOLD: f64 = 1e-9;

/// Unions a storey's rectangles into outer rings, one per connected
/// component.
///
/// Rings are counter-clockwise, collinear-simplified, and sorted by their
/// minimum corner so the output order is stable. Interior holes (rectangles
/// arranged around a courtyard) are dropped with a warning — slabs and roofs
/// only carry outer boundaries.
pub fn storey_footprint(rects: &[&LayoutRect]) -> Result<Vec<Vec<Point2<f64>>>> {
    if rects.is_empty() {
        return Ok(Vec::new());
    }

    let paths: Vec<Vec<[f64; 2]>> = rects.iter().map(|&r| rect_path(r)).collect();
    let subject = vec![paths[0].clone()];
    let clip: Vec<Vec<[f64; 2]>> = paths.into_iter().skip(1).collect();

    let shapes = if clip.is_empty() {
        vec![vec![subject[0].clone()]]
    } else {
        subject.overlay(&clip, OverlayRule::Union, FillRule::EvenOdd)
    };

    let mut rings = Vec::new();
    for shape in shapes {
        if shape.is_empty() {
            continue;
        }
        if shape.len() > 1 {
            warn!(holes = shape.len() - 1, "footprint component has interior holes; keeping outer ring only");
        }
        let outer: Vec<Point2<f64>> = shape[0].iter().map(|p| Point2::new(p[0], p[1])).collect();
        let ring = simplify_ring(&ensure_ccw(&outer));
        if ring.len() < 3 {
            return Err(Error::DegenerateRing(
                "footprint outer ring collapsed below 3 vertices".to_string(),
            ));
        }
        if ring_area(&ring) > MIN_AREA_THRESHOLD {
            rings.push(ring);
        }
    }

    rings.sort_by(|a, b| {
        let ka = ring_min_corner(a);
        let kb = ring_min_corner(b);
        ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(rings)
}

/// Signed area of a ring; positive means counter-clockwise.
pub fn ring_area(ring: &[Point2<f64>]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..ring.len() {
        let j = (i + 1) % ring.len();
        area += ring[i].x * ring[j].y - ring[j].x * ring[i].y;
    }
    area * 0.5
}

/// Returns the ring with counter-clockwise winding.
pub fn ensure_ccw(ring: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if ring_area(ring) < 0.0 {
        ring.iter().rev().cloned().collect()
    } else {
        ring.to_vec()
    }
}

/// Removes collinear and duplicate vertices.
pub fn simplify_ring(ring: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if ring.len() <= 3 {
        return ring.to_vec();
    }
    let n = ring.len();
    let mut result = Vec::with_capacity(n);
    for i in 0..n {
        let prev = &ring[(i + n - 1) % n];
        let curr = &ring[i];
        let next = &ring[(i + 1) % n];
        let cross = (curr.x - prev.x) * (next.y - prev.y) - (curr.y - prev.y) * (next.x - prev.x);
        if cross.abs() > COLLINEAR_EPS {
            result.push(*curr);
        }
    }
    if result.len() < 3 {
        return ring.to_vec();
    }
    result
}

fn rect_path(rect: &LayoutRect) -> Vec<[f64; 2]> {
    vec![
        [rect.x, rect.y],
        [rect.right(), rect.y],
        [rect.right(), rect.top()],
        [rect.x, rect.top()],
    ]
}

fn ring_min_corner(ring: &[Point2<f64>]) -> (f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for p in ring {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
    }
    (min_x, min_y)
}
