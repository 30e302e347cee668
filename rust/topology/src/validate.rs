// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural validation of an extracted topology.
//!
//! Produces ERROR diagnostics for defects the layout solver cannot work
//! around (duplicate ids, dangling references, storey-inside-space cycles)
//! and WARNING diagnostics for gaps that only degrade the result (missing
//! names or area targets). The pipeline aborts on ERROR severity only.

use graph2ifc_core::{Diagnostic, Diagnostics};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::Topology;

/// Checks a topology for structural defects.
pub fn validate(topology: &Topology) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    // Duplicate ids keep their first occurrence in the entity lists; every
    // further occurrence is an error.
    let mut seen_spaces: FxHashMap<&str, usize> = FxHashMap::default();
    for space in topology.spaces() {
        *seen_spaces.entry(space.id.as_str()).or_insert(0) += 1;
    }
    let mut duplicate_spaces: Vec<&str> = seen_spaces
        .iter()
        .filter(|(_, &count)| count > 1)
        .map(|(&id, _)| id)
        .collect();
    duplicate_spaces.sort_unstable();
    for id in duplicate_spaces {
        diagnostics.push(Diagnostic::error(
            "duplicate-space-id",
            format!("space id {id} is declared more than once"),
            &[id],
        ));
    }

    let mut seen_storeys: FxHashMap<&str, usize> = FxHashMap::default();
    for storey in topology.storeys() {
        *seen_storeys.entry(storey.id.as_str()).or_insert(0) += 1;
    }
    let mut duplicate_storeys: Vec<&str> = seen_storeys
        .iter()
        .filter(|(_, &count)| count > 1)
        .map(|(&id, _)| id)
        .collect();
    duplicate_storeys.sort_unstable();
    for id in duplicate_storeys {
        diagnostics.push(Diagnostic::error(
            "duplicate-storey-id",
            format!("storey id {id} is declared more than once"),
            &[id],
        ));
    }

    // Dangling references.
    let space_ids: FxHashSet<&str> = topology.spaces().iter().map(|s| s.id.as_str()).collect();
    let storey_ids: FxHashSet<&str> = topology.storeys().iter().map(|s| s.id.as_str()).collect();

    for edge in topology.edges() {
        for endpoint in [edge.a.as_str(), edge.b.as_str()] {
            if !space_ids.contains(endpoint) {
                diagnostics.push(Diagnostic::error(
                    "unknown-edge-endpoint",
                    format!("edge endpoint {endpoint} is not a known space"),
                    &[edge.a.as_str(), edge.b.as_str()],
                ));
            }
        }
    }

    for space in topology.spaces() {
        if !storey_ids.contains(space.storey_id.as_str()) {
            diagnostics.push(Diagnostic::error(
                "unknown-storey",
                format!("space {} references unknown storey {}", space.id, space.storey_id),
                &[space.id.as_str(), space.storey_id.as_str()],
            ));
        }
        if space.name.is_none() {
            diagnostics.push(Diagnostic::warning(
                "missing-name",
                format!("space {} has no name", space.id),
                &[space.id.as_str()],
            ));
        }
        if space.target_area.is_none() {
            diagnostics.push(Diagnostic::warning(
                "missing-area-target",
                format!("space {} has no area target; the configured default applies", space.id),
                &[space.id.as_str()],
            ));
        }
    }

    for (storey_id, space_id) in topology.containment_cycles() {
        diagnostics.push(Diagnostic::error(
            "cyclic-containment",
            format!("storey {storey_id} is asserted to lie inside space {space_id}"),
            &[storey_id.as_str(), space_id.as_str()],
        ));
    }

    diagnostics
}
