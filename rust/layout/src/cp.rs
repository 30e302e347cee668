// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Constraint-optimization layout solver.
//!
//! Models each storey as an integer program in millimetres: per space the
//! decision variables are (x, y, w, h) on the snapping grid, constrained by
//! side bounds, the `w·h ≥ min_area` floor, and pairwise 2-D non-overlap.
//! The objective combines area deviation from the target with envelope
//! perimeter slack.
//!
//! The search is a deterministic best-first branch-and-bound over candidate
//! sizes and bottom-left placement points, bounded by a wall-clock deadline.
//! If the deadline expires without an incumbent the caller falls back to the
//! heuristic solver.

use graph2ifc_core::{Config, LayoutRect};
use graph2ifc_topology::Topology;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{Error, Result};
use crate::plan::{plan_storeys, PlannedSpace, StoreyPlan, MAX_SIDE};

/// Millimetres per metre: the integer length unit of the model.
const SCALE: f64 = 1000.0;

/// Aspect ratios (w/h) used to enumerate candidate sizes.
const ASPECTS: &[f64] = &[1.0, 1.25, 0.8, 1.5, 2.0 / 3.0];

/// Search envelope bound multiplier; placements beyond it are cut off.
const ENVELOPE_BOUND: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IntRect {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

impl IntRect {
    fn overlaps(&self, other: &IntRect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

#[derive(Debug, Clone)]
struct SpaceModel {
    id: String,
    /// Target area in mm².
    target: i64,
    /// Candidate (w, h) pairs in mm, deduplicated.
    sizes: Vec<(i64, i64)>,
}

/// Solves every storey with the integer model.
///
/// One shared deadline covers all storeys. Errors when any storey has no
/// feasible placement or the deadline expires before a first incumbent.
pub fn solve(topology: &Topology, config: &Config) -> Result<Vec<LayoutRect>> {
    let deadline = Instant::now() + Duration::from_secs(config.solver_time_limit_sec);
    let grid = ((config.grid_unit * SCALE).round() as i64).max(1);
    let mut rects = Vec::new();

    for plan in plan_storeys(topology, config) {
        let storey_rects = solve_storey(config, &plan, grid, deadline)?;
        rects.extend(storey_rects);
    }
    Ok(rects)
}

fn solve_storey(
    config: &Config,
    plan: &StoreyPlan,
    grid: i64,
    deadline: Instant,
) -> Result<Vec<LayoutRect>> {
    let models: Vec<SpaceModel> = plan
        .spaces
        .iter()
        .map(|space| space_model(space, config, grid))
        .collect();

    let envelope = round_up(((plan.envelope) * SCALE).round() as i64, grid);
    let bound = (envelope as f64 * ENVELOPE_BOUND) as i64;

    let mut search = Search {
        models: &models,
        envelope,
        bound,
        area_weight: config.objective_area_weight,
        compactness_weight: config.objective_compactness_weight,
        deadline,
        best_cost: f64::INFINITY,
        best: None,
        placed: Vec::with_capacity(models.len()),
        expired: false,
    };
    search.descend(0, 0.0);

    match search.best {
        Some(best) => {
            debug!(
                storey = %plan.storey_id,
                cost = search.best_cost,
                "storey solved by constraint model"
            );
            Ok(best
                .into_iter()
                .zip(&models)
                .map(|(r, m)| LayoutRect {
                    space_id: m.id.clone(),
                    storey_id: plan.storey_id.clone(),
                    x: r.x as f64 / SCALE,
                    y: r.y as f64 / SCALE,
                    w: r.w as f64 / SCALE,
                    h: r.h as f64 / SCALE,
                })
                .collect())
        }
        None if search.expired => Err(Error::Deadline(config.solver_time_limit_sec)),
        None => Err(Error::Infeasible(format!(
            "no placement for storey {}",
            plan.storey_id
        ))),
    }
}

/// Candidate sizes for one space: near-square plus a few aspect ratios, all
/// on the grid, all satisfying the side bounds and the minimum-area floor.
fn space_model(space: &PlannedSpace, config: &Config, grid: i64) -> SpaceModel {
    let target = (space.target * SCALE * SCALE).round() as i64;
    let min_side = round_up((config.min_side_length * SCALE).round() as i64, grid);
    let max_side = round_up((MAX_SIDE * SCALE).round() as i64, grid);
    let min_area = min_side * min_side;

    let mut sizes: Vec<(i64, i64)> = Vec::new();
    for &aspect in ASPECTS {
        let w_f = (space.target * aspect).sqrt().clamp(config.min_side_length, MAX_SIDE);
        let w = round_up((w_f * SCALE).round() as i64, grid).clamp(min_side, max_side);
        // Height chosen so the area reaches the target, within bounds.
        let h = round_up((target + w - 1) / w, grid).clamp(min_side, max_side);
        if w * h >= min_area && !sizes.contains(&(w, h)) {
            sizes.push((w, h));
        }
    }

    SpaceModel {
        id: space.id.clone(),
        target,
        sizes,
    }
}

fn round_up(value: i64, grid: i64) -> i64 {
    ((value + grid - 1) / grid) * grid
}

struct Search<'a> {
    models: &'a [SpaceModel],
    envelope: i64,
    bound: i64,
    area_weight: f64,
    compactness_weight: f64,
    deadline: Instant,
    best_cost: f64,
    best: Option<Vec<IntRect>>,
    placed: Vec<IntRect>,
    expired: bool,
}

impl Search<'_> {
    fn descend(&mut self, depth: usize, cost_so_far: f64) {
        if Instant::now() >= self.deadline {
            self.expired = true;
            return;
        }
        if cost_so_far >= self.best_cost {
            return;
        }
        if depth == self.models.len() {
            self.best_cost = cost_so_far;
            self.best = Some(self.placed.clone());
            return;
        }

        let model = &self.models[depth];
        let mut moves: Vec<(f64, IntRect)> = Vec::new();
        for &(w, h) in &model.sizes {
            let area_dev = (w * h - model.target).abs() as f64 / (SCALE * SCALE);
            for (x, y) in self.placement_points(w, h) {
                let rect = IntRect { x, y, w, h };
                if self.placed.iter().any(|p| p.overlaps(&rect)) {
                    continue;
                }
                let step = self.area_weight * area_dev + self.slack_increase(&rect);
                moves.push((step, rect));
            }
        }

        // Deterministic branch order: cheapest first, ties bottom-left.
        moves.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| (a.1.y, a.1.x, a.1.w).cmp(&(b.1.y, b.1.x, b.1.w)))
        });

        for (step, rect) in moves {
            if self.expired {
                return;
            }
            self.placed.push(rect);
            self.descend(depth + 1, cost_so_far + step);
            self.placed.pop();
        }
    }

    /// Bottom-left placement candidates derived from the placed rectangles.
    fn placement_points(&self, w: i64, h: i64) -> Vec<(i64, i64)> {
        let mut points = vec![(0, 0)];
        for p in &self.placed {
            points.push((p.x + p.w, p.y));
            points.push((p.x, p.y + p.h));
        }
        points.sort_unstable();
        points.dedup();
        points.retain(|&(x, y)| x + w <= self.bound && y + h <= self.bound);
        points
    }

    /// Objective increase from envelope perimeter slack caused by `rect`.
    fn slack_increase(&self, rect: &IntRect) -> f64 {
        let mut max_x = rect.x + rect.w;
        let mut max_y = rect.y + rect.h;
        for p in &self.placed {
            max_x = max_x.max(p.x + p.w);
            max_y = max_y.max(p.y + p.h);
        }
        let slack_x = (max_x - self.envelope).max(0);
        let slack_y = (max_y - self.envelope).max(0);
        self.compactness_weight * 2.0 * (slack_x + slack_y) as f64 / SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph2ifc_core::{Edge, EdgeKind, Space, Storey};

    fn storey(id: &str, elevation: f64, index: usize) -> Storey {
        Storey {
            id: id.to_string(),
            name: None,
            elevation,
            index,
        }
    }

    fn space(id: &str, storey: &str, target: Option<f64>) -> Space {
        Space {
            id: id.to_string(),
            name: Some(id.to_string()),
            category: None,
            target_area: target,
            storey_id: storey.to_string(),
        }
    }

    #[test]
    fn single_space_lands_at_origin_with_target_area() {
        let topology = Topology::new(
            vec![storey("L1", 0.0, 0)],
            vec![space("R1", "L1", Some(16.0))],
            vec![],
        );
        let rects = solve(&topology, &Config::default()).unwrap();
        assert_eq!(rects.len(), 1);
        let r = &rects[0];
        assert_eq!((r.x, r.y), (0.0, 0.0));
        assert!((r.area() - 16.0).abs() < 0.5);
    }

    #[test]
    fn no_overlap_and_area_floor_hold() {
        let config = Config::default();
        let topology = Topology::new(
            vec![storey("L1", 0.0, 0)],
            vec![
                space("A", "L1", Some(12.0)),
                space("B", "L1", Some(18.0)),
                space("C", "L1", Some(9.0)),
                space("D", "L1", None),
            ],
            vec![
                Edge::new(EdgeKind::Adjacency, "A", "B"),
                Edge::new(EdgeKind::Adjacency, "B", "C"),
            ],
        );
        let rects = solve(&topology, &config).unwrap();
        assert_eq!(rects.len(), 4);
        for i in 0..rects.len() {
            assert!(rects[i].area() >= config.min_area() - 1e-9);
            for j in (i + 1)..rects.len() {
                assert!(!rects[i].overlaps(&rects[j]));
            }
        }
    }

    #[test]
    fn deterministic_across_runs() {
        let config = Config::default();
        let topology = Topology::new(
            vec![storey("L1", 0.0, 0)],
            vec![
                space("A", "L1", Some(10.0)),
                space("B", "L1", Some(20.0)),
                space("C", "L1", Some(15.0)),
            ],
            vec![Edge::new(EdgeKind::Adjacency, "A", "B")],
        );
        let first = solve(&topology, &config).unwrap();
        let second = solve(&topology, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn coordinates_are_on_the_grid() {
        let config = Config::default();
        let topology = Topology::new(
            vec![storey("L1", 0.0, 0)],
            vec![space("A", "L1", Some(13.0)), space("B", "L1", Some(17.0))],
            vec![],
        );
        let rects = solve(&topology, &config).unwrap();
        for r in &rects {
            for v in [r.x, r.y, r.w, r.h] {
                let cells = v / config.grid_unit;
                assert!((cells - cells.round()).abs() < 1e-6, "{v} off grid");
            }
        }
    }

    #[test]
    fn zero_second_deadline_reports_failure() {
        let config = Config {
            solver_time_limit_sec: 0,
            ..Config::default()
        };
        let topology = Topology::new(
            vec![storey("L1", 0.0, 0)],
            vec![space("A", "L1", Some(12.0))],
            vec![],
        );
        assert!(solve(&topology, &config).is_err());
    }
}
