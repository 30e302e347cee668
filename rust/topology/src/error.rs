// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use graph2ifc_core::Diagnostics;
use thiserror::Error;

/// Result type for topology operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during topology extraction and validation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input graph: {0}")]
    InputInvalid(String),

    #[error("Topology inconsistent: {} error diagnostic(s)", .diagnostics.errors().len())]
    Inconsistent { diagnostics: Diagnostics },
}
