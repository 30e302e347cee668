// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The extracted building topology and its graph queries.
//!
//! Spaces are nodes; adjacency and connection edges are undirected. A
//! connection implies adjacency, so neighbor and component queries consider
//! both edge kinds. All query results come back in sorted id order so the
//! downstream solver output is stable.

use graph2ifc_core::{Edge, EdgeKind, Space, Storey};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Storeys, spaces and edges extracted from the source graph.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    storeys: Vec<Storey>,
    spaces: Vec<Space>,
    edges: Vec<Edge>,
    /// Space id → index of first occurrence.
    space_index: FxHashMap<String, usize>,
    /// Storey id → index of first occurrence.
    storey_index: FxHashMap<String, usize>,
    /// Per space index: neighbor space indices over both edge kinds.
    adjacency: Vec<Vec<usize>>,
    /// Containment claims that put a storey inside a space, kept for the
    /// validator. Pairs are `(storey_id, space_id)`.
    containment_cycles: Vec<(String, String)>,
}

impl Topology {
    /// Builds the topology and its adjacency index.
    ///
    /// Duplicate ids are kept in the entity lists (the validator reports
    /// them); the id indexes point at the first occurrence. Edges referring
    /// to unknown space ids are kept in `edges` but excluded from the
    /// adjacency index.
    pub fn new(storeys: Vec<Storey>, spaces: Vec<Space>, edges: Vec<Edge>) -> Self {
        let mut space_index = FxHashMap::default();
        for (i, space) in spaces.iter().enumerate() {
            space_index.entry(space.id.clone()).or_insert(i);
        }
        let mut storey_index = FxHashMap::default();
        for (i, storey) in storeys.iter().enumerate() {
            storey_index.entry(storey.id.clone()).or_insert(i);
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); spaces.len()];
        for edge in &edges {
            if let (Some(&a), Some(&b)) = (space_index.get(&edge.a), space_index.get(&edge.b)) {
                if !adjacency[a].contains(&b) {
                    adjacency[a].push(b);
                    adjacency[b].push(a);
                }
            }
        }

        Self {
            storeys,
            spaces,
            edges,
            space_index,
            storey_index,
            adjacency,
            containment_cycles: Vec::new(),
        }
    }

    /// Attaches storey-inside-space containment claims found at extraction.
    pub fn with_containment_cycles(mut self, cycles: Vec<(String, String)>) -> Self {
        self.containment_cycles = cycles;
        self
    }

    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    pub fn storeys(&self) -> &[Storey] {
        &self.storeys
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn containment_cycles(&self) -> &[(String, String)] {
        &self.containment_cycles
    }

    pub fn space(&self, id: &str) -> Option<&Space> {
        self.space_index.get(id).map(|&i| &self.spaces[i])
    }

    pub fn storey(&self, id: &str) -> Option<&Storey> {
        self.storey_index.get(id).map(|&i| &self.storeys[i])
    }

    pub fn space_count(&self) -> usize {
        self.spaces.len()
    }

    /// Neighbor space ids (adjacency and connection edges), sorted.
    pub fn neighbors(&self, space_id: &str) -> Vec<&str> {
        let Some(&idx) = self.space_index.get(space_id) else {
            return Vec::new();
        };
        let mut ids: Vec<&str> = self.adjacency[idx]
            .iter()
            .map(|&n| self.spaces[n].id.as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Number of distinct neighbors of a space.
    pub fn degree(&self, space_id: &str) -> usize {
        self.neighbors(space_id).len()
    }

    /// Unordered space-id pairs joined by a door-connection edge.
    pub fn connected_pairs(&self) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Connection)
            .map(|e| (e.a.as_str(), e.b.as_str()))
            .collect()
    }

    /// Unordered space-id pairs joined by an adjacency edge of either kind.
    pub fn adjacent_pairs(&self) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .map(|e| (e.a.as_str(), e.b.as_str()))
            .collect()
    }

    /// Connected components over the adjacency index.
    ///
    /// Components are discovered from the smallest unvisited space id; ids
    /// within a component come back sorted.
    pub fn components(&self) -> Vec<Vec<String>> {
        let mut order: Vec<usize> = (0..self.spaces.len()).collect();
        order.sort_by(|&a, &b| self.spaces[a].id.cmp(&self.spaces[b].id));

        let mut visited = vec![false; self.spaces.len()];
        let mut components = Vec::new();

        for &start in &order {
            if visited[start] {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::new();
            visited[start] = true;
            queue.push_back(start);

            while let Some(node) = queue.pop_front() {
                component.push(self.spaces[node].id.clone());
                for &neighbor in &self.adjacency[node] {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        queue.push_back(neighbor);
                    }
                }
            }

            component.sort_unstable();
            components.push(component);
        }

        components
    }

    /// Spaces on a storey, in sorted id order.
    pub fn spaces_of_storey(&self, storey_id: &str) -> Vec<&Space> {
        let mut spaces: Vec<&Space> = self
            .spaces
            .iter()
            .filter(|s| s.storey_id == storey_id)
            .collect();
        spaces.sort_by(|a, b| a.id.cmp(&b.id));
        spaces
    }

    /// Storeys sorted by elevation, then id.
    pub fn storeys_by_elevation(&self) -> Vec<&Storey> {
        let mut storeys: Vec<&Storey> = self.storeys.iter().collect();
        storeys.sort_by(|a, b| {
            a.elevation
                .partial_cmp(&b.elevation)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        storeys
    }

}
