// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline orchestration.
//!
//! Runs extraction, validation, solving, post-processing and geometry in
//! order, accumulating warnings along the way. Stages never see each other;
//! everything flows through the neutral core records.

use graph2ifc_core::{
    Config, Diagnostic, Diagnostics, DoorOpening, LayoutRect, Roof, SlabPolygon, Space, Storey,
    WallSegment,
};
use graph2ifc_geometry::{extract_doors, extract_slabs, extract_walls};
use graph2ifc_layout::{
    reorigin_storeys, single_storey_filter, snap_to_grid, validate_layout, LayoutReport,
    StoreyExtent,
};
use graph2ifc_topology::{extract, validate, Error as TopologyError, TripleStore, Vocabulary};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::error::Result;

/// The complete geometry batch handed to the export adapter.
///
/// All coordinates are storey-local; the per-storey [`StoreyExtent`] carries
/// the world offset exactly once.
#[derive(Debug, Clone, Default)]
pub struct BuildingModel {
    /// Storeys sorted by elevation.
    pub storeys: Vec<Storey>,
    /// Per-storey origin and bounding box, sorted by storey id.
    pub extents: Vec<StoreyExtent>,
    /// Placed spaces, sorted by id.
    pub spaces: Vec<Space>,
    /// One rectangle per placed space, in storey-local coordinates.
    pub rects: Vec<LayoutRect>,
    pub slabs: Vec<SlabPolygon>,
    pub roofs: Vec<Roof>,
    pub walls: Vec<WallSegment>,
    pub doors: Vec<DoorOpening>,
}

impl BuildingModel {
    /// True when the model contains no placed space.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn rect_of(&self, space_id: &str) -> Option<&LayoutRect> {
        self.rects.iter().find(|r| r.space_id == space_id)
    }

    pub fn extent_of(&self, storey_id: &str) -> Option<&StoreyExtent> {
        self.extents.iter().find(|e| e.storey_id == storey_id)
    }
}

/// Result of a pipeline run: the model, its quality report, and every
/// diagnostic produced along the way.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub model: BuildingModel,
    pub report: LayoutReport,
    pub diagnostics: Diagnostics,
}

/// Runs the full pipeline on a parsed triple store.
///
/// Fails fast on invalid input, inconsistent topology, and geometry that
/// cannot be synthesized; every other problem is recovered and lands in the
/// report warnings.
pub fn run(store: &TripleStore, config: &Config) -> Result<PipelineOutput> {
    let vocabulary = Vocabulary::standard();
    let (topology, mut diagnostics) = extract(store, &vocabulary)?;

    let structural = validate(&topology);
    let fatal = structural.has_errors();
    diagnostics.extend(structural);
    if fatal {
        return Err(TopologyError::Inconsistent { diagnostics }.into());
    }

    let (mut rects, solver_diagnostics) = graph2ifc_layout::solve(&topology, config);
    diagnostics.extend(solver_diagnostics);

    snap_to_grid(&mut rects, config.grid_unit);

    let mut storeys: Vec<Storey> = topology.storeys().to_vec();
    if config.single_storey_mode {
        let (kept_storeys, kept_rects) = single_storey_filter(storeys, rects);
        storeys = kept_storeys;
        rects = kept_rects;
    }
    storeys.sort_by(|a, b| {
        a.elevation
            .partial_cmp(&b.elevation)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    let extents = reorigin_storeys(&mut rects);

    let mut walls = Vec::new();
    let mut slabs = Vec::new();
    let mut roofs = Vec::new();
    for storey in &storeys {
        let storey_rects: Vec<&LayoutRect> =
            rects.iter().filter(|r| r.storey_id == storey.id).collect();
        if storey_rects.is_empty() {
            continue;
        }
        let extraction = extract_walls(&storey.id, &storey_rects, config)?;
        diagnostics.extend(extraction.diagnostics);
        walls.extend(extraction.walls);

        let (storey_slabs, storey_roofs) = extract_slabs(storey, &storey_rects, config)?;
        slabs.extend(storey_slabs);
        roofs.extend(storey_roofs);
    }

    let connected: Vec<(String, String)> = topology
        .connected_pairs()
        .into_iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();
    let door_extraction = extract_doors(&connected, &rects, config);
    diagnostics.extend(door_extraction.diagnostics);

    let carried: Vec<Diagnostic> = diagnostics.warnings().into_iter().cloned().collect();
    let report = validate_layout(&topology, &rects, config, &carried);

    let placed: FxHashSet<&str> = rects.iter().map(|r| r.space_id.as_str()).collect();
    let mut spaces: Vec<Space> = topology
        .spaces()
        .iter()
        .filter(|s| placed.contains(s.id.as_str()))
        .cloned()
        .collect();
    spaces.sort_by(|a, b| a.id.cmp(&b.id));

    info!(
        storeys = storeys.len(),
        spaces = spaces.len(),
        walls = walls.len(),
        slabs = slabs.len(),
        doors = door_extraction.doors.len(),
        adjacency = report.adjacency_satisfied,
        "pipeline finished"
    );
    debug!(warnings = diagnostics.len(), "diagnostics collected");

    Ok(PipelineOutput {
        model: BuildingModel {
            storeys,
            extents,
            spaces,
            rects,
            slabs,
            roofs,
            walls,
            doors: door_extraction.doors,
        },
        report,
        diagnostics,
    })
}
