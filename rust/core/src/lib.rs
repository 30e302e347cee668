// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # graph2ifc Core
//!
//! Neutral building data model shared by every stage of the
//! RDF-topology → layout → geometry → IFC pipeline.
//!
//! This crate holds the typed records that flow between stages — storeys,
//! spaces, topology edges, solved layout rectangles, wall segments, slabs,
//! roofs and door openings — together with the pipeline configuration and
//! the structured diagnostics type used for warnings and validation errors.
//!
//! Nothing in here knows about RDF vocabularies, solvers or the IFC writer;
//! those live in the downstream crates.

pub mod config;
pub mod diagnostics;
pub mod model;

pub use config::{Config, SolverKind};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use model::{
    BoundarySegment, DoorOpening, Edge, EdgeKind, LayoutRect, Orientation, Roof, SlabPolygon,
    Space, Storey, WallKind, WallSegment,
};

/// Tolerance for coordinate equality tests (metres).
pub const COORD_EPS: f64 = 1e-3;

/// Minimum meaningful length for walls and shared boundaries (metres).
pub const LEN_EPS: f64 = 0.05;

/// Storey id assigned to spaces with no containment triple.
pub const DEFAULT_STOREY_ID: &str = "__default__";
