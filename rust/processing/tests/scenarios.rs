// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end pipeline scenarios driven from hand-built triple stores.

use graph2ifc_core::{Config, LayoutRect, Orientation, WallKind};
use graph2ifc_processing::{run, PipelineOutput};
use graph2ifc_topology::{TripleStore, RDF_TYPE};

const SPACE: &str = "https://graph2ifc.dev/ns#Space";
const STOREY: &str = "https://graph2ifc.dev/ns#Storey";
const ON_STOREY: &str = "https://graph2ifc.dev/ns#onStorey";
const ADJACENT: &str = "https://graph2ifc.dev/ns#adjacentTo";
const CONNECTED: &str = "https://graph2ifc.dev/ns#connectedTo";
const TARGET_AREA: &str = "https://graph2ifc.dev/ns#targetArea";
const ELEVATION: &str = "https://graph2ifc.dev/ns#elevation";
const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

fn iri(local: &str) -> String {
    format!("urn:ex:{local}")
}

struct StoreBuilder(TripleStore);

impl StoreBuilder {
    fn new() -> Self {
        Self(TripleStore::new())
    }

    fn storey(mut self, id: &str, elevation: f64) -> Self {
        self.0.insert_iri(iri(id), RDF_TYPE, STOREY);
        self.0
            .insert_literal(iri(id), ELEVATION, elevation.to_string());
        self
    }

    fn space(mut self, id: &str, storey: &str, area: f64) -> Self {
        self.0.insert_iri(iri(id), RDF_TYPE, SPACE);
        self.0.insert_literal(iri(id), LABEL, id);
        self.0.insert_literal(iri(id), TARGET_AREA, area.to_string());
        self.0.insert_iri(iri(id), ON_STOREY, iri(storey));
        self
    }

    fn adjacent(mut self, a: &str, b: &str) -> Self {
        self.0.insert_iri(iri(a), ADJACENT, iri(b));
        self
    }

    fn connected(mut self, a: &str, b: &str) -> Self {
        self.0.insert_iri(iri(a), CONNECTED, iri(b));
        self
    }

    fn run(self) -> PipelineOutput {
        run(&self.0, &Config::default()).expect("pipeline run")
    }

    fn run_with(self, config: &Config) -> PipelineOutput {
        run(&self.0, config).expect("pipeline run")
    }
}

fn rect<'a>(output: &'a PipelineOutput, space_id: &str) -> &'a LayoutRect {
    output.model.rect_of(space_id).expect("placed space")
}

fn wall_count(output: &PipelineOutput, kind: WallKind) -> usize {
    output.model.walls.iter().filter(|w| w.kind == kind).count()
}

fn assert_invariants(output: &PipelineOutput) {
    let config = Config::default();
    let model = &output.model;

    // One rectangle per space, matching storeys, area floor.
    assert_eq!(model.rects.len(), model.spaces.len());
    for space in &model.spaces {
        let r = rect(output, &space.id);
        assert_eq!(r.storey_id, space.storey_id, "storey mismatch for {}", space.id);
        assert!(r.area() >= config.min_area() - 1e-9, "area floor violated for {}", space.id);
    }

    // Non-overlap within each storey.
    assert!(output.report.overlap_pairs.is_empty());

    // No degenerate walls.
    for wall in &model.walls {
        assert!(wall.length() >= 0.05 - 1e-9);
    }

    // Doors sit on the shared boundary of their two rectangles.
    for door in &model.doors {
        let a = rect(output, &door.space_a);
        let b = rect(output, &door.space_b);
        let boundary = a.shared_boundary(b).expect("door without shared boundary");
        let [px, py] = door.position;
        match boundary.orientation {
            Orientation::Vertical => {
                assert!((px - boundary.fixed).abs() < 1e-6);
                assert!(py >= boundary.start - 1e-6 && py <= boundary.end + 1e-6);
            }
            Orientation::Horizontal => {
                assert!((py - boundary.fixed).abs() < 1e-6);
                assert!(px >= boundary.start - 1e-6 && px <= boundary.end + 1e-6);
            }
        }
    }

    // One slab per footprint component, mirrored by a roof.
    assert_eq!(model.slabs.len(), model.roofs.len());
}

#[test]
fn s1_single_space() {
    let output = StoreBuilder::new().space("R1", "L1", 16.0).storey("L1", 0.0).run();
    assert_invariants(&output);

    let r = rect(&output, "R1");
    assert!((r.w - 4.0).abs() < 1e-9);
    assert!((r.h - 4.0).abs() < 1e-9);

    assert_eq!(wall_count(&output, WallKind::Exterior), 4);
    assert_eq!(wall_count(&output, WallKind::Interior), 0);
    for wall in &output.model.walls {
        assert!((wall.length() - 4.0).abs() < 1e-9);
    }

    assert_eq!(output.model.slabs.len(), 1);
    assert_eq!(output.model.roofs.len(), 1);
    assert!(output.model.doors.is_empty());
    assert!((output.report.area_deviation.max).abs() < 1e-9);
}

#[test]
fn s2_two_adjacent_connected_spaces() {
    let output = StoreBuilder::new()
        .storey("L1", 0.0)
        .space("A", "L1", 16.0)
        .space("B", "L1", 16.0)
        .adjacent("A", "B")
        .connected("A", "B")
        .run();
    assert_invariants(&output);

    let interior: Vec<_> = output
        .model
        .walls
        .iter()
        .filter(|w| w.kind == WallKind::Interior)
        .collect();
    assert_eq!(interior.len(), 1);
    assert!((interior[0].length() - 4.0).abs() < 1e-9);
    assert!(interior[0].length() >= 0.9);

    assert_eq!(output.model.slabs.len(), 1);
    let slab_area = polygon_area(&output.model.slabs[0].ring);
    assert!((slab_area - 32.0).abs() < 1e-6);

    assert_eq!(output.model.doors.len(), 1);
    let door = &output.model.doors[0];
    assert!((door.width - 0.9).abs() < 1e-9);
    // Midpoint of the shared edge.
    let boundary = rect(&output, "A")
        .shared_boundary(rect(&output, "B"))
        .unwrap();
    assert_eq!(door.position, boundary.midpoint());

    assert_eq!(output.report.adjacency_satisfied, 1.0);
}

#[test]
fn s3_three_space_chain() {
    let output = StoreBuilder::new()
        .storey("L1", 0.0)
        .space("A", "L1", 16.0)
        .space("B", "L1", 16.0)
        .space("C", "L1", 16.0)
        .adjacent("A", "B")
        .adjacent("B", "C")
        .run();
    assert_invariants(&output);

    assert_eq!(wall_count(&output, WallKind::Interior), 2);
    assert_eq!(output.report.adjacency_satisfied, 1.0);
    assert!(output.model.doors.is_empty());
    assert_eq!(output.model.slabs.len(), 1);

    // The chain packs into one rectangular block: four fused exterior walls.
    assert_eq!(wall_count(&output, WallKind::Exterior), 4);
}

#[test]
fn s4_disconnected_components_share_a_storey() {
    let output = StoreBuilder::new()
        .storey("L1", 0.0)
        .space("A", "L1", 15.0)
        .space("B", "L1", 15.0)
        .space("C", "L1", 15.0)
        .space("D", "L1", 15.0)
        .adjacent("A", "B")
        .adjacent("C", "D")
        .run();
    assert_invariants(&output);

    // Two footprint components: one slab and roof each.
    assert_eq!(output.model.slabs.len(), 2);
    assert_eq!(output.model.roofs.len(), 2);
    assert_eq!(output.report.adjacency_satisfied, 1.0);

    // Compact packing: the pairs sit side by side, not in one long row.
    let (mut max_x, mut max_y) = (0.0_f64, 0.0_f64);
    for r in &output.model.rects {
        max_x = max_x.max(r.right());
        max_y = max_y.max(r.top());
    }
    assert!(max_x < 10.0, "row too wide: {max_x}");
    assert!(max_y < 10.0, "column too tall: {max_y}");
}

#[test]
fn s5_two_storeys() {
    let output = StoreBuilder::new()
        .storey("L1", 0.0)
        .storey("L2", 3.0)
        .space("A1", "L1", 16.0)
        .space("A2", "L1", 16.0)
        .space("B1", "L2", 16.0)
        .space("B2", "L2", 16.0)
        .adjacent("A1", "A2")
        .adjacent("B1", "B2")
        .run();
    assert_invariants(&output);

    assert_eq!(output.model.storeys.len(), 2);
    assert_eq!(output.model.slabs.len(), 2);
    assert_eq!(output.model.roofs.len(), 2);

    // Walls partition per storey.
    for storey_id in ["L1", "L2"] {
        assert!(output.model.walls.iter().any(|w| w.storey_id == storey_id));
    }

    // Slab elevations follow the storeys, roofs sit a ceiling above.
    let slab_l2 = output
        .model
        .slabs
        .iter()
        .find(|s| s.storey_id == "L2")
        .unwrap();
    assert_eq!(slab_l2.elevation, 3.0);
    let roof_l2 = output
        .model
        .roofs
        .iter()
        .find(|r| r.storey_id == "L2")
        .unwrap();
    assert!((roof_l2.elevation - 5.8).abs() < 1e-9);
}

#[test]
fn s6_single_storey_mode() {
    let config = Config {
        single_storey_mode: true,
        ..Config::default()
    };
    let mut builder = StoreBuilder::new()
        .storey("L1", 0.0)
        .storey("L2", 3.0)
        .space("A1", "L1", 16.0)
        .space("A2", "L1", 16.0)
        .space("B1", "L2", 16.0)
        .space("B2", "L2", 16.0)
        .adjacent("A1", "A2")
        .adjacent("B1", "B2");
    builder.0.insert_literal(iri("L1"), LABEL, "Ground Floor");
    let output = builder.run_with(&config);

    assert_eq!(output.model.storeys.len(), 1);
    let kept = &output.model.storeys[0];
    assert_eq!(kept.id, "L1");
    assert_eq!(kept.name.as_deref(), Some("Ground Floor"));
    assert_eq!(kept.elevation, 0.0);

    let ids: Vec<&str> = output.model.spaces.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["A1", "A2"]);
    assert_eq!(output.model.slabs.len(), 1);
}

#[test]
fn heuristic_runs_are_reproducible() {
    let build = || {
        StoreBuilder::new()
            .storey("L1", 0.0)
            .space("A", "L1", 12.0)
            .space("B", "L1", 18.0)
            .space("C", "L1", 9.0)
            .space("D", "L1", 24.0)
            .adjacent("A", "B")
            .adjacent("B", "C")
            .adjacent("C", "D")
            .connected("A", "B")
            .run()
    };
    assert_eq!(build().model.rects, build().model.rects);
}

#[test]
fn larger_topology_holds_all_invariants() {
    let mut builder = StoreBuilder::new().storey("L1", 0.0).storey("L2", 3.0);
    for i in 0..5 {
        builder = builder.space(&format!("R{i}"), "L1", 10.0 + i as f64 * 3.0);
    }
    for i in 0..4 {
        builder = builder.space(&format!("S{i}"), "L2", 12.0 + i as f64 * 2.0);
    }
    let output = builder
        .adjacent("R0", "R1")
        .adjacent("R1", "R2")
        .adjacent("R2", "R3")
        .adjacent("R3", "R4")
        .adjacent("R0", "R2")
        .connected("R0", "R1")
        .connected("R2", "R3")
        .adjacent("S0", "S1")
        .adjacent("S1", "S2")
        .adjacent("S2", "S3")
        .connected("S0", "S1")
        .run();
    assert_invariants(&output);
    assert_eq!(output.model.rects.len(), 9);
}

fn polygon_area(ring: &[[f64; 2]]) -> f64 {
    let mut area = 0.0;
    for i in 0..ring.len() {
        let j = (i + 1) % ring.len();
        area += ring[i][0] * ring[j][1] - ring[j][0] * ring[i][1];
    }
    (area * 0.5).abs()
}
