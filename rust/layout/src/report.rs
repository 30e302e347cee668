// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Post-hoc layout validation and the constraints report.
//!
//! The report carries numbers, not strings: overlap pairs, per-space area
//! deviation, and the fraction of satisfied adjacency edges. Violations are
//! recorded, never thrown. The same types serialize to the debug-artifact
//! schemas.

use graph2ifc_core::{Config, Diagnostic, LayoutRect, Storey};
use graph2ifc_topology::Topology;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Area deviation summary over all placed spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaDeviation {
    /// Mean absolute relative deviation.
    pub mean: f64,
    /// Maximum absolute relative deviation.
    pub max: f64,
    /// Signed relative deviation per space id.
    pub per_space: BTreeMap<String, f64>,
}

/// A warning entry in the serialized report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportWarning {
    pub code: String,
    pub message: String,
    pub refs: Vec<String>,
}

impl From<&Diagnostic> for ReportWarning {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            code: diagnostic.code.clone(),
            message: diagnostic.message.clone(),
            refs: diagnostic.refs.clone(),
        }
    }
}

/// The structured layout quality report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    /// Space-id pairs whose rectangles overlap with positive area.
    pub overlap_pairs: Vec<(String, String)>,
    pub area_deviation: AreaDeviation,
    /// Fraction of adjacency edges realized as shared boundaries, in [0, 1].
    pub adjacency_satisfied: f64,
    pub warnings: Vec<ReportWarning>,
}

impl LayoutReport {
    /// True when the layout satisfies non-overlap and full adjacency.
    pub fn is_clean(&self) -> bool {
        self.overlap_pairs.is_empty() && self.adjacency_satisfied >= 1.0
    }
}

/// Scores a solved layout against its topology.
///
/// `carried` are warnings accumulated by earlier stages; they are included
/// in the report verbatim.
pub fn validate_layout(
    topology: &Topology,
    rects: &[LayoutRect],
    config: &Config,
    carried: &[Diagnostic],
) -> LayoutReport {
    let by_id: FxHashMap<&str, &LayoutRect> =
        rects.iter().map(|r| (r.space_id.as_str(), r)).collect();

    // Pairwise overlap within each storey, in sorted space-id order.
    let mut sorted: Vec<&LayoutRect> = rects.iter().collect();
    sorted.sort_by(|a, b| a.space_id.cmp(&b.space_id));
    let mut overlap_pairs = Vec::new();
    for i in 0..sorted.len() {
        for j in (i + 1)..sorted.len() {
            if sorted[i].storey_id == sorted[j].storey_id && sorted[i].overlaps(sorted[j]) {
                warn!(
                    a = %sorted[i].space_id,
                    b = %sorted[j].space_id,
                    "layout rectangles overlap"
                );
                overlap_pairs.push((sorted[i].space_id.clone(), sorted[j].space_id.clone()));
            }
        }
    }

    // Relative area deviation per space.
    let mut per_space = BTreeMap::new();
    for rect in &sorted {
        let Some(space) = topology.space(&rect.space_id) else {
            continue;
        };
        let target = config.effective_target_area(space.target_area);
        per_space.insert(rect.space_id.clone(), (rect.area() - target) / target);
    }
    let (mean, max) = if per_space.is_empty() {
        (0.0, 0.0)
    } else {
        let abs: Vec<f64> = per_space.values().map(|d| d.abs()).collect();
        (
            abs.iter().sum::<f64>() / abs.len() as f64,
            abs.iter().cloned().fold(0.0, f64::max),
        )
    };

    // Adjacency satisfaction over every edge (connections imply adjacency).
    let pairs = topology.adjacent_pairs();
    let satisfied = pairs
        .iter()
        .filter(|(a, b)| match (by_id.get(*a), by_id.get(*b)) {
            (Some(&ra), Some(&rb)) => ra.shared_boundary(rb).is_some(),
            _ => false,
        })
        .count();
    let adjacency_satisfied = if pairs.is_empty() {
        1.0
    } else {
        satisfied as f64 / pairs.len() as f64
    };

    LayoutReport {
        overlap_pairs,
        area_deviation: AreaDeviation {
            mean,
            max,
            per_space,
        },
        adjacency_satisfied,
        warnings: carried.iter().map(ReportWarning::from).collect(),
    }
}

/// The layout debug-artifact shape: rectangles grouped per storey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub storeys: Vec<StoreySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreySnapshot {
    pub id: String,
    pub elevation: f64,
    pub rects: Vec<RectSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectSnapshot {
    pub space_id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl LayoutSnapshot {
    /// Groups rectangles under their storeys, elevation order, sorted ids.
    pub fn new(storeys: &[Storey], rects: &[LayoutRect]) -> Self {
        let mut ordered: Vec<&Storey> = storeys.iter().collect();
        ordered.sort_by(|a, b| {
            a.elevation
                .partial_cmp(&b.elevation)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        let storeys = ordered
            .into_iter()
            .map(|storey| {
                let mut entries: Vec<RectSnapshot> = rects
                    .iter()
                    .filter(|r| r.storey_id == storey.id)
                    .map(|r| RectSnapshot {
                        space_id: r.space_id.clone(),
                        x: r.x,
                        y: r.y,
                        w: r.w,
                        h: r.h,
                    })
                    .collect();
                entries.sort_by(|a, b| a.space_id.cmp(&b.space_id));
                StoreySnapshot {
                    id: storey.id.clone(),
                    elevation: storey.elevation,
                    rects: entries,
                }
            })
            .collect();

        Self { storeys }
    }
}
