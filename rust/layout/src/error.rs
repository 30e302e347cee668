// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while solving a layout
#[derive(Error, Debug)]
pub enum Error {
    #[error("Layout infeasible: {0}")]
    Infeasible(String),

    #[error("Solver deadline of {0} s expired with no incumbent")]
    Deadline(u64),
}
