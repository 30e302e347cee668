// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # graph2ifc Processing
//!
//! The end-to-end pipeline: RDF topology → layout → geometry → IFC hand-off.
//!
//! [`run`] wires the stages together with the propagation policy: invalid
//! input and inconsistent topology abort, an infeasible constraint solve
//! falls back to the heuristic solver, and every recoverable problem ends up
//! as a warning in the [`LayoutReport`](graph2ifc_layout::LayoutReport).
//!
//! The [`export`] module is the only place that touches the external IFC
//! writer, through the narrow [`IfcSink`](export::IfcSink) seam. The
//! [`debug`] module serializes the optional layout and report artifacts.

pub mod debug;
pub mod error;
pub mod export;
pub mod pipeline;

pub use error::{Error, Result};
pub use export::{export_model, IfcSink, SinkError};
pub use pipeline::{run, BuildingModel, PipelineOutput};
