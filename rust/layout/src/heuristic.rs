// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heuristic layout solver.
//!
//! Shelf packing in BFS order inside the estimated envelope, followed by a
//! bounded hill climb over packing-order swaps. Packing never produces
//! overlaps, so the refinement can only trade adjacency satisfaction against
//! envelope compactness. Disconnected adjacency components are packed with a
//! small separation so their footprints stay distinct.
//!
//! Deterministic under a fixed seed: the only randomness is the swap
//! proposal sequence of a [`StdRng`] seeded from the configuration.

use graph2ifc_core::{Config, LayoutRect, COORD_EPS};
use graph2ifc_topology::Topology;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::plan::{plan_storeys, PlannedSpace, StoreyPlan};

/// Hill-climb iterations per space on a storey.
const CLIMB_ITERATIONS_PER_SPACE: usize = 200;

/// Weight of the envelope perimeter in the refinement objective.
const PERIMETER_WEIGHT: f64 = 0.1;

/// Packs every space of the topology into per-storey rectangles.
///
/// Guarantees one rectangle per space and per-storey non-overlap by
/// construction.
pub fn solve(topology: &Topology, config: &Config) -> Vec<LayoutRect> {
    let component_of = component_index(topology);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut rects = Vec::new();

    for plan in plan_storeys(topology, config) {
        rects.extend(solve_storey(topology, config, &plan, &component_of, &mut rng));
    }
    rects
}

fn solve_storey(
    topology: &Topology,
    config: &Config,
    plan: &StoreyPlan,
    component_of: &FxHashMap<String, usize>,
    rng: &mut StdRng,
) -> Vec<LayoutRect> {
    let gap = 2.0 * config.wall_thickness;
    let n = plan.spaces.len();
    let mut order: Vec<usize> = (0..n).collect();

    let mut best = pack(&plan.spaces, &order, plan.envelope, &plan.storey_id, component_of, gap);
    let mut best_score = objective(topology, &best);

    if n >= 2 {
        let iterations = CLIMB_ITERATIONS_PER_SPACE * n;
        for _ in 0..iterations {
            let i = rng.gen_range(0..n);
            let j = rng.gen_range(0..n);
            if i == j {
                continue;
            }
            order.swap(i, j);
            let candidate = pack(
                &plan.spaces,
                &order,
                plan.envelope,
                &plan.storey_id,
                component_of,
                gap,
            );
            let score = objective(topology, &candidate);
            if score > best_score + 1e-12 {
                best = candidate;
                best_score = score;
            } else {
                order.swap(i, j);
            }
        }
    }

    debug!(
        storey = %plan.storey_id,
        spaces = n,
        score = best_score,
        "storey packed"
    );
    best
}

/// Shelf packer: fill rows left to right, wrap when the envelope width is
/// exceeded, grow the envelope for a space wider than the envelope itself.
/// A space starting a new adjacency component is separated by `gap` from the
/// previous one, on both axes at a wrap.
fn pack(
    spaces: &[PlannedSpace],
    order: &[usize],
    envelope: f64,
    storey_id: &str,
    component_of: &FxHashMap<String, usize>,
    gap: f64,
) -> Vec<LayoutRect> {
    let mut env_w = envelope;
    for &idx in order {
        env_w = env_w.max(spaces[idx].w);
    }

    let mut rects = Vec::with_capacity(order.len());
    let mut x = 0.0_f64;
    let mut shelf_y = 0.0_f64;
    let mut shelf_h = 0.0_f64;
    let mut previous_component: Option<usize> = None;

    for &idx in order {
        let space = &spaces[idx];
        let component = component_of.get(&space.id).copied().unwrap_or(usize::MAX);
        let separation = match previous_component {
            Some(prev) if prev != component => gap,
            _ => 0.0,
        };

        if x > 0.0 && x + separation + space.w > env_w + COORD_EPS {
            shelf_y += shelf_h + separation;
            x = 0.0;
            shelf_h = 0.0;
        } else {
            x += separation;
        }

        rects.push(LayoutRect {
            space_id: space.id.clone(),
            storey_id: storey_id.to_string(),
            x,
            y: shelf_y,
            w: space.w,
            h: space.h,
        });
        x += space.w;
        shelf_h = shelf_h.max(space.h);
        previous_component = Some(component);
    }

    rects
}

/// Refinement objective: satisfied adjacency edges minus a perimeter penalty.
fn objective(topology: &Topology, rects: &[LayoutRect]) -> f64 {
    let by_id: FxHashMap<&str, &LayoutRect> =
        rects.iter().map(|r| (r.space_id.as_str(), r)).collect();

    let mut satisfied = 0usize;
    for (a, b) in topology.adjacent_pairs() {
        if let (Some(&ra), Some(&rb)) = (by_id.get(a), by_id.get(b)) {
            if ra.shared_boundary(rb).is_some() {
                satisfied += 1;
            }
        }
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for r in rects {
        min_x = min_x.min(r.x);
        min_y = min_y.min(r.y);
        max_x = max_x.max(r.right());
        max_y = max_y.max(r.top());
    }
    let perimeter = if rects.is_empty() {
        0.0
    } else {
        2.0 * ((max_x - min_x) + (max_y - min_y))
    };

    satisfied as f64 - PERIMETER_WEIGHT * perimeter
}

/// Global adjacency component index per space id.
fn component_index(topology: &Topology) -> FxHashMap<String, usize> {
    let mut map = FxHashMap::default();
    for (i, component) in topology.components().into_iter().enumerate() {
        for id in component {
            map.insert(id, i);
        }
    }
    map
}
