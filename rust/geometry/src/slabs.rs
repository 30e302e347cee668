// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Slab and roof synthesis.
//!
//! Each footprint component of a storey becomes one slab at the storey
//! elevation and one roof with the same ring at ceiling height. A storey
//! whose rectangles form several disconnected groups gets one slab/roof
//! pair per group.

use graph2ifc_core::{Config, LayoutRect, Roof, SlabPolygon, Storey};

use crate::error::Result;
use crate::footprint::storey_footprint;

/// Builds the slab/roof pairs for one storey.
pub fn extract_slabs(
    storey: &Storey,
    rects: &[&LayoutRect],
    config: &Config,
) -> Result<(Vec<SlabPolygon>, Vec<Roof>)> {
    let mut slabs = Vec::new();
    let mut roofs = Vec::new();

    for ring in storey_footprint(rects)? {
        let ring: Vec<[f64; 2]> = ring.iter().map(|p| [p.x, p.y]).collect();
        slabs.push(SlabPolygon {
            storey_id: storey.id.clone(),
            ring: ring.clone(),
            thickness: config.slab_thickness,
            elevation: storey.elevation,
        });
        roofs.push(Roof {
            storey_id: storey.id.clone(),
            ring,
            elevation: storey.elevation + config.ceiling_height,
        });
    }

    Ok((slabs, roofs))
}
