// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared solver preparation: sizing, ordering, envelopes.
//!
//! Both solvers start from the same per-storey plan: spaces with an initial
//! near-square size derived from the target area, arranged in a BFS order
//! that keeps adjacent spaces close, inside an estimated square envelope.

use graph2ifc_core::{Config, Space};
use graph2ifc_topology::Topology;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Upper clip for the initial square side, in metres.
pub const MAX_SIDE: f64 = 12.0;

/// A space with its effective target and initial size.
#[derive(Debug, Clone)]
pub struct PlannedSpace {
    pub id: String,
    /// Effective target area: declared or default, never below `min_side²`.
    pub target: f64,
    pub w: f64,
    pub h: f64,
}

/// One storey's worth of solver input.
#[derive(Debug, Clone)]
pub struct StoreyPlan {
    pub storey_id: String,
    /// Spaces in packing order (BFS, components by descending size).
    pub spaces: Vec<PlannedSpace>,
    /// Estimated square envelope side, in metres.
    pub envelope: f64,
}

/// Builds one plan per non-empty storey, in elevation order.
pub fn plan_storeys(topology: &Topology, config: &Config) -> Vec<StoreyPlan> {
    topology
        .storeys_by_elevation()
        .iter()
        .filter_map(|storey| {
            let members = topology.spaces_of_storey(&storey.id);
            if members.is_empty() {
                return None;
            }
            Some(plan_storey(topology, config, &storey.id, &members))
        })
        .collect()
}

fn plan_storey(
    topology: &Topology,
    config: &Config,
    storey_id: &str,
    members: &[&Space],
) -> StoreyPlan {
    let by_id: FxHashMap<&str, &Space> = members.iter().map(|s| (s.id.as_str(), *s)).collect();
    let order = bfs_order(topology, members);
    let spaces: Vec<PlannedSpace> = order
        .iter()
        .filter_map(|id| by_id.get(id.as_str()))
        .map(|space| {
            let target = config.effective_target_area(space.target_area);
            let side = target.sqrt().clamp(config.min_side_length, MAX_SIDE);
            PlannedSpace {
                id: space.id.clone(),
                target,
                w: side,
                h: side,
            }
        })
        .collect();

    let total: f64 = spaces.iter().map(|s| s.target).sum();
    let envelope = (total * config.area_slack_factor).sqrt();

    StoreyPlan {
        storey_id: storey_id.to_string(),
        spaces,
        envelope,
    }
}

/// BFS packing order over the storey's members.
///
/// Starts at the member with the most adjacency edges (ties by id); remaining
/// components follow in descending size order, each BFS-ordered from its own
/// highest-degree member. Neighbor visitation is in sorted id order.
pub fn bfs_order(topology: &Topology, members: &[&Space]) -> Vec<String> {
    let member_ids: FxHashSet<&str> = members.iter().map(|s| s.id.as_str()).collect();
    let degree_of = |id: &str| -> usize {
        topology
            .neighbors(id)
            .iter()
            .filter(|n| member_ids.contains(*n))
            .count()
    };

    let mut unvisited: Vec<&str> = members.iter().map(|s| s.id.as_str()).collect();
    unvisited.sort_unstable();

    let mut components: Vec<Vec<String>> = Vec::new();
    let mut visited: FxHashSet<&str> = FxHashSet::default();

    while visited.len() < unvisited.len() {
        // Seed: highest in-storey degree among unvisited members, ties by id.
        let mut seed: Option<&str> = None;
        let mut best_degree = 0;
        for &id in &unvisited {
            if visited.contains(id) {
                continue;
            }
            let d = degree_of(id);
            let better = match seed {
                None => true,
                Some(current) => d > best_degree || (d == best_degree && id < current),
            };
            if better {
                seed = Some(id);
                best_degree = d;
            }
        }
        let Some(seed) = seed else {
            break;
        };

        let mut component = Vec::new();
        let mut queue = VecDeque::new();
        visited.insert(seed);
        queue.push_back(seed);
        while let Some(id) = queue.pop_front() {
            component.push(id.to_string());
            for neighbor in topology.neighbors(id) {
                if member_ids.contains(neighbor) && !visited.contains(neighbor) {
                    visited.insert(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }
        components.push(component);
    }

    // First component (the one holding the best seed) stays first; the rest
    // follow by descending size, ties by first id.
    let head = components.remove(0);
    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));

    let mut order = head;
    for component in components {
        order.extend(component);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph2ifc_core::{Edge, EdgeKind, Storey};

    fn space(id: &str, target: Option<f64>) -> Space {
        Space {
            id: id.to_string(),
            name: Some(id.to_string()),
            category: None,
            target_area: target,
            storey_id: "L1".to_string(),
        }
    }

    fn storey() -> Storey {
        Storey {
            id: "L1".to_string(),
            name: None,
            elevation: 0.0,
            index: 0,
        }
    }

    #[test]
    fn initial_size_is_clamped_square() {
        let topology = Topology::new(
            vec![storey()],
            vec![space("A", Some(16.0)), space("B", Some(1.0))],
            vec![],
        );
        let plans = plan_storeys(&topology, &Config::default());
        assert_eq!(plans.len(), 1);

        let a = plans[0].spaces.iter().find(|s| s.id == "A").unwrap();
        assert!((a.w - 4.0).abs() < 1e-9);
        assert!((a.h - 4.0).abs() < 1e-9);

        // 1 m² target is below min_side²; the minimum side wins.
        let b = plans[0].spaces.iter().find(|s| s.id == "B").unwrap();
        assert!((b.w - 1.5).abs() < 1e-9);
        assert!((b.target - 2.25).abs() < 1e-9);
    }

    #[test]
    fn envelope_covers_slacked_total() {
        let topology = Topology::new(vec![storey()], vec![space("A", Some(16.0))], vec![]);
        let plans = plan_storeys(&topology, &Config::default());
        assert!((plans[0].envelope - (16.0_f64 * 1.15).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn bfs_starts_at_highest_degree() {
        // B is the hub of A-B, B-C; BFS must start at B.
        let topology = Topology::new(
            vec![storey()],
            vec![space("A", None), space("B", None), space("C", None)],
            vec![
                Edge::new(EdgeKind::Adjacency, "A", "B"),
                Edge::new(EdgeKind::Adjacency, "B", "C"),
            ],
        );
        let members = topology.spaces_of_storey("L1");
        assert_eq!(bfs_order(&topology, &members), vec!["B", "A", "C"]);
    }

    #[test]
    fn disconnected_components_by_descending_size() {
        // Pair D-E and isolated Z: the seeded pair first, then the singleton.
        let topology = Topology::new(
            vec![storey()],
            vec![space("Z", None), space("D", None), space("E", None)],
            vec![Edge::new(EdgeKind::Adjacency, "D", "E")],
        );
        let members = topology.spaces_of_storey("L1");
        assert_eq!(bfs_order(&topology, &members), vec!["D", "E", "Z"]);
    }

    #[test]
    fn empty_storeys_are_skipped() {
        let topology = Topology::new(
            vec![
                storey(),
                Storey {
                    id: "L2".to_string(),
                    name: None,
                    elevation: 3.0,
                    index: 1,
                },
            ],
            vec![space("A", None)],
            vec![],
        );
        let plans = plan_storeys(&topology, &Config::default());
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].storey_id, "L1");
    }
}
