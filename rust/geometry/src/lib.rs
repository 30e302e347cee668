// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # graph2ifc Geometry
//!
//! Turns solved layout rectangles into parametric building geometry:
//!
//! - **Footprints**: per-storey polygon union of the rectangles via
//!   [i_overlay](https://docs.rs/i_overlay), one outer ring per connected
//!   component.
//! - **Walls**: exterior segments decomposed from the footprint boundary,
//!   interior partitions from pairwise shared rectangle boundaries, with
//!   collinear fusion and a no-degenerate-segment guarantee.
//! - **Slabs & roofs**: one slab per footprint component at storey
//!   elevation, one mirrored roof at ceiling height.
//! - **Doors**: openings placed at the midpoint of the shared boundary of
//!   connected space pairs.
//!
//! Degenerate artifacts (walls under 5 cm, doors without enough shared
//! boundary) are dropped and reported as warnings, never as failures.

pub mod doors;
pub mod error;
pub mod footprint;
pub mod slabs;
pub mod walls;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};

pub use doors::extract_doors;
pub use error::{Error, Result};
pub use footprint::{ring_area, storey_footprint};
pub use slabs::extract_slabs;
pub use walls::extract_walls;
