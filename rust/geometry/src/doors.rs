// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door placement on shared boundaries.
//!
//! Every door-connection pair whose rectangles share enough boundary gets
//! one opening at the boundary midpoint. Pairs on different storeys, pairs
//! without a shared boundary (corner-touching included), and boundaries
//! shorter than the door width are dropped with a warning.

use graph2ifc_core::{Config, Diagnostic, Diagnostics, DoorOpening, LayoutRect, LEN_EPS};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Jamb clearance kept on each side of a clipped door, in metres.
const MIN_JAMB: f64 = LEN_EPS;

/// Doors of the model plus the warnings produced while placing them.
#[derive(Debug, Clone)]
pub struct DoorExtraction {
    pub doors: Vec<DoorOpening>,
    pub diagnostics: Diagnostics,
}

/// Places doors for the connected space pairs.
///
/// `connected` holds unordered space-id pairs; `rects` the full placement.
/// Pairs are processed in sorted order for stable output.
pub fn extract_doors(
    connected: &[(String, String)],
    rects: &[LayoutRect],
    config: &Config,
) -> DoorExtraction {
    let by_id: FxHashMap<&str, &LayoutRect> =
        rects.iter().map(|r| (r.space_id.as_str(), r)).collect();

    let mut pairs: Vec<(&str, &str)> = connected
        .iter()
        .map(|(a, b)| (a.as_str(), b.as_str()))
        .collect();
    pairs.sort_unstable();
    pairs.dedup();

    let mut doors = Vec::new();
    let mut diagnostics = Diagnostics::new();

    for (a, b) in pairs {
        let (Some(&ra), Some(&rb)) = (by_id.get(a), by_id.get(b)) else {
            diagnostics.push(Diagnostic::warning(
                "door-unplaced-space",
                format!("connection {a}–{b} references a space without a rectangle"),
                &[a, b],
            ));
            continue;
        };
        if ra.storey_id != rb.storey_id {
            diagnostics.push(Diagnostic::warning(
                "door-cross-storey",
                format!("connection {a}–{b} spans two storeys"),
                &[a, b],
            ));
            continue;
        }
        let Some(boundary) = ra.shared_boundary(rb) else {
            diagnostics.push(Diagnostic::warning(
                "door-insufficient-boundary",
                format!("connection {a}–{b} has no shared boundary"),
                &[a, b],
            ));
            continue;
        };
        let shared = boundary.length();
        if shared < config.door_width {
            diagnostics.push(Diagnostic::warning(
                "door-insufficient-boundary",
                format!(
                    "shared boundary of {shared:.2} m between {a} and {b} is narrower than the door"
                ),
                &[a, b],
            ));
            continue;
        }

        let width = config.door_width.min(shared - 2.0 * MIN_JAMB);
        doors.push(DoorOpening {
            space_a: a.to_string(),
            space_b: b.to_string(),
            storey_id: ra.storey_id.clone(),
            position: boundary.midpoint(),
            orientation: boundary.orientation,
            width,
            height: config.door_height,
        });
    }

    debug!(doors = doors.len(), dropped = diagnostics.len(), "doors placed");
    DoorExtraction { doors, diagnostics }
}
