// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # graph2ifc Topology
//!
//! Extraction of building topology from an RDF triple store.
//!
//! The input is a parsed triple store (parsing itself happens upstream); the
//! output is a [`Topology`]: storeys, spaces, and undirected adjacency /
//! door-connection edges, ready for the layout solver.
//!
//! - [`vocabulary`] — the single registry of recognized RDF class and
//!   property URIs across BOT, Brick, SBCO and the internal namespace.
//! - [`store`] — the neutral, indexed triple-store value type.
//! - [`extract`] — walks the store with the registry and emits the topology.
//! - [`graph`] — neighbor, connected-pair and component queries.
//! - [`validate`] — structural diagnostics (duplicate ids, unknown
//!   endpoints, cyclic containment).

pub mod error;
pub mod extract;
pub mod graph;
pub mod store;
pub mod validate;
pub mod vocabulary;

pub use error::{Error, Result};
pub use extract::extract;
pub use graph::Topology;
pub use store::{Term, Triple, TripleStore, RDF_TYPE};
pub use validate::validate;
pub use vocabulary::Vocabulary;
