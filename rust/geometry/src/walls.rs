// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall synthesis for one storey.
//!
//! Exterior walls follow the footprint boundary: each maximal axis-aligned
//! segment of the union outline becomes one wall. Interior walls come from
//! the shared boundaries of rectangle pairs; collinear abutting partitions
//! fuse into single segments. Segments under 5 cm are dropped and reported.

use graph2ifc_core::{
    Config, Diagnostic, Diagnostics, LayoutRect, Orientation, WallKind, WallSegment, COORD_EPS,
    LEN_EPS,
};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::Result;
use crate::footprint::storey_footprint;

/// Walls of one storey plus the warnings produced while deriving them.
#[derive(Debug, Clone)]
pub struct WallExtraction {
    pub walls: Vec<WallSegment>,
    pub diagnostics: Diagnostics,
}

/// Derives exterior and interior walls from a storey's rectangles.
///
/// Rectangles are processed in sorted space-id order, so the result is
/// stable for a fixed layout.
pub fn extract_walls(
    storey_id: &str,
    rects: &[&LayoutRect],
    config: &Config,
) -> Result<WallExtraction> {
    let mut diagnostics = Diagnostics::new();
    let mut walls = Vec::new();

    let mut sorted: Vec<&LayoutRect> = rects.to_vec();
    sorted.sort_by(|a, b| a.space_id.cmp(&b.space_id));

    // Exterior: decompose the union outline into maximal segments.
    for ring in storey_footprint(&sorted)? {
        let n = ring.len();
        for i in 0..n {
            let start = ring[i];
            let end = ring[(i + 1) % n];
            let length = (end - start).norm();
            if length < LEN_EPS {
                // Collinear merging already happened during ring
                // simplification; whatever is left short gets dropped.
                diagnostics.push(Diagnostic::warning(
                    "degenerate-wall",
                    format!("dropping exterior segment of {length:.3} m on storey {storey_id}"),
                    &[storey_id],
                ));
                continue;
            }
            walls.push(WallSegment {
                storey_id: storey_id.to_string(),
                start: [start.x, start.y],
                end: [end.x, end.y],
                thickness: config.wall_thickness,
                height: config.ceiling_height,
                kind: WallKind::Exterior,
            });
        }
    }

    // Interior: shared boundaries of every rectangle pair, fused per line.
    let mut lines: FxHashMap<(u8, i64), Vec<(f64, f64)>> = FxHashMap::default();
    for i in 0..sorted.len() {
        for j in (i + 1)..sorted.len() {
            if let Some(boundary) = sorted[i].shared_boundary(sorted[j]) {
                let axis = match boundary.orientation {
                    Orientation::Horizontal => 0u8,
                    Orientation::Vertical => 1u8,
                };
                // Key the carrier line by its fixed coordinate in millimetres.
                let fixed_key = (boundary.fixed / COORD_EPS).round() as i64;
                lines
                    .entry((axis, fixed_key))
                    .or_default()
                    .push((boundary.start, boundary.end));
            }
        }
    }

    let mut keys: Vec<(u8, i64)> = lines.keys().copied().collect();
    keys.sort_unstable();
    for key in keys {
        let mut intervals = lines.remove(&key).unwrap_or_default();
        intervals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        // Fuse abutting or overlapping intervals on the same carrier line.
        let mut fused: Vec<(f64, f64)> = Vec::new();
        for (start, end) in intervals {
            match fused.last_mut() {
                Some(last) if start <= last.1 + COORD_EPS => last.1 = last.1.max(end),
                _ => fused.push((start, end)),
            }
        }

        let fixed = key.1 as f64 * COORD_EPS;
        for (start, end) in fused {
            if end - start < LEN_EPS {
                diagnostics.push(Diagnostic::warning(
                    "degenerate-wall",
                    format!("dropping interior segment of {:.3} m on storey {storey_id}", end - start),
                    &[storey_id],
                ));
                continue;
            }
            let (p0, p1) = match key.0 {
                0 => ([start, fixed], [end, fixed]),
                _ => ([fixed, start], [fixed, end]),
            };
            walls.push(WallSegment {
                storey_id: storey_id.to_string(),
                start: p0,
                end: p1,
                thickness: config.wall_thickness,
                height: config.ceiling_height,
                kind: WallKind::Interior,
            });
        }
    }

    debug!(
        storey = storey_id,
        exterior = walls.iter().filter(|w| w.kind == WallKind::Exterior).count(),
        interior = walls.iter().filter(|w| w.kind == WallKind::Interior).count(),
        "walls extracted"
    );
    Ok(WallExtraction { walls, diagnostics })
}
