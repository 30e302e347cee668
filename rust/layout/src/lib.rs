// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # graph2ifc Layout
//!
//! Places an axis-aligned rectangle for every space of a topology.
//!
//! Two solvers share one contract: a [`heuristic`] shelf packer with
//! hill-climb adjacency refinement, and a [`cp`] integer
//! constraint-optimization model with a wall-clock deadline. The CP solver
//! falls back to the heuristic when it cannot produce a placement in time.
//!
//! Downstream of the solvers, [`postprocess`] snaps coordinates to the grid
//! and re-origins each storey, and [`report`] scores the result (overlaps,
//! area deviation, adjacency satisfaction) without ever throwing — layout
//! violations are data, not failures.

pub mod cp;
pub mod error;
pub mod heuristic;
pub mod plan;
pub mod postprocess;
pub mod report;

pub use error::{Error, Result};
pub use postprocess::{reorigin_storeys, single_storey_filter, snap_to_grid, StoreyExtent};
pub use report::{validate_layout, AreaDeviation, LayoutReport, LayoutSnapshot, ReportWarning};

use graph2ifc_core::{Config, Diagnostic, Diagnostics, LayoutRect, SolverKind};
use graph2ifc_topology::Topology;
use tracing::warn;

/// Runs the configured solver.
///
/// Both solvers guarantee exactly one rectangle per space and per-storey
/// non-overlap. When the CP solver is selected but cannot produce any
/// placement within its time limit, the heuristic solver takes over and a
/// warning diagnostic records the fallback.
pub fn solve(topology: &Topology, config: &Config) -> (Vec<LayoutRect>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let rects = match config.solver {
        SolverKind::Heuristic => heuristic::solve(topology, config),
        SolverKind::Cp => match cp::solve(topology, config) {
            Ok(rects) => rects,
            Err(err) => {
                warn!(error = %err, "CP solver failed; falling back to heuristic solver");
                diagnostics.push(Diagnostic::warning(
                    "layout-infeasible-fallback",
                    format!("CP solver produced no placement ({err}); heuristic fallback used"),
                    &[],
                ));
                heuristic::solve(topology, config)
            }
        },
    };
    (rects, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph2ifc_core::{Edge, EdgeKind, Space, Storey};

    fn small_topology() -> Topology {
        let storeys = vec![Storey {
            id: "L1".to_string(),
            name: None,
            elevation: 0.0,
            index: 0,
        }];
        let spaces = vec![
            Space {
                id: "A".to_string(),
                name: Some("A".to_string()),
                category: None,
                target_area: Some(16.0),
                storey_id: "L1".to_string(),
            },
            Space {
                id: "B".to_string(),
                name: Some("B".to_string()),
                category: None,
                target_area: Some(16.0),
                storey_id: "L1".to_string(),
            },
        ];
        let edges = vec![Edge::new(EdgeKind::Adjacency, "A", "B")];
        Topology::new(storeys, spaces, edges)
    }

    #[test]
    fn solve_dispatches_heuristic() {
        let config = Config::default();
        let (rects, diags) = solve(&small_topology(), &config);
        assert_eq!(rects.len(), 2);
        assert!(diags.is_empty());
    }

    #[test]
    fn solve_dispatches_cp() {
        let config = Config {
            solver: SolverKind::Cp,
            ..Config::default()
        };
        let (rects, _) = solve(&small_topology(), &config);
        assert_eq!(rects.len(), 2);
        assert!(!rects[0].overlaps(&rects[1]));
    }
}
