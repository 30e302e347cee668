// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration.
//!
//! A single plain record covering geometry parameters, solver selection and
//! determinism knobs. Upstream configuration loading (files, CLI flags) is out
//! of scope; this crate only defines the recognized options and defaults.

use serde::{Deserialize, Serialize};

/// Which layout solver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverKind {
    /// BFS-ordered shelf packer with hill-climb refinement.
    Heuristic,
    /// Integer constraint-optimization model with heuristic fallback.
    Cp,
}

/// Recognized pipeline options with their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Room ceiling height in metres.
    pub ceiling_height: f64,
    /// Wall thickness in metres.
    pub wall_thickness: f64,
    /// Slab thickness in metres.
    pub slab_thickness: f64,
    /// Door opening width in metres.
    pub door_width: f64,
    /// Door opening height in metres.
    pub door_height: f64,
    /// Target floor area for spaces without one, in m².
    pub default_target_area: f64,
    /// Minimum rectangle side length in metres.
    pub min_side_length: f64,
    /// Snapping grid in metres.
    pub grid_unit: f64,
    /// Keep only the lowest storey and normalize its elevation to 0.
    pub single_storey_mode: bool,
    /// Solver selection.
    pub solver: SolverKind,
    /// Wall-clock limit for the CP solver, in seconds.
    pub solver_time_limit_sec: u64,
    /// PRNG seed for both solvers.
    pub seed: u64,
    /// Envelope slack multiplier over the summed target areas.
    pub area_slack_factor: f64,
    /// Weight of the area-deviation term in the CP objective.
    pub objective_area_weight: f64,
    /// Weight of the compactness (perimeter slack) term in the CP objective.
    pub objective_compactness_weight: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ceiling_height: 2.8,
            wall_thickness: 0.15,
            slab_thickness: 0.20,
            door_width: 0.90,
            door_height: 2.00,
            default_target_area: 15.0,
            min_side_length: 1.5,
            grid_unit: 0.05,
            single_storey_mode: false,
            solver: SolverKind::Heuristic,
            solver_time_limit_sec: 30,
            seed: 42,
            area_slack_factor: 1.15,
            objective_area_weight: 10.0,
            objective_compactness_weight: 1.0,
        }
    }
}

impl Config {
    /// Minimum floor area implied by the minimum side length.
    ///
    /// A target area below this is raised to it: the minimum side always wins.
    pub fn min_area(&self) -> f64 {
        self.min_side_length * self.min_side_length
    }

    /// Effective target area for a space, clamped to [`Config::min_area`].
    pub fn effective_target_area(&self, target: Option<f64>) -> f64 {
        target.unwrap_or(self.default_target_area).max(self.min_area())
    }
}
