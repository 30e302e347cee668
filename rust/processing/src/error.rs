// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal pipeline errors; everything recoverable is a report warning instead
#[derive(Error, Debug)]
pub enum Error {
    #[error("Topology stage failed: {0}")]
    Topology(#[from] graph2ifc_topology::Error),

    #[error("Geometry stage failed: {0}")]
    Geometry(#[from] graph2ifc_geometry::Error),

    #[error("IFC export failed: {0}")]
    Export(#[source] crate::export::SinkError),

    #[error("Debug artifact I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Debug artifact serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
