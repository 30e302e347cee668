// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export adapter: the seam to the external IFC writer.
//!
//! The writer library is not a dependency of this workspace; it implements
//! [`IfcSink`] and receives the model in a fixed order — storeys by
//! elevation, then per storey its spaces, slabs, roofs, walls and doors.
//! Coordinates are storey-local; the storey extent carries the world offset,
//! so the sink translates exactly once.

use graph2ifc_core::{DoorOpening, Roof, SlabPolygon, Space, Storey, WallSegment};
use graph2ifc_layout::StoreyExtent;
use tracing::info;

use crate::error::{Error, Result};
use crate::pipeline::BuildingModel;

/// Error type sinks may return; wrapped into [`Error::Export`].
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// The narrow capability the external IFC writer implements.
///
/// Every element belongs to the storey announced by the preceding
/// [`IfcSink::begin_storey`] call.
pub trait IfcSink {
    fn begin_storey(
        &mut self,
        storey: &Storey,
        extent: Option<&StoreyExtent>,
    ) -> std::result::Result<(), SinkError>;

    fn add_space(
        &mut self,
        space: &Space,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> std::result::Result<(), SinkError>;

    fn add_slab(&mut self, slab: &SlabPolygon) -> std::result::Result<(), SinkError>;

    fn add_roof(&mut self, roof: &Roof) -> std::result::Result<(), SinkError>;

    fn add_wall(&mut self, wall: &WallSegment) -> std::result::Result<(), SinkError>;

    fn add_door(&mut self, door: &DoorOpening) -> std::result::Result<(), SinkError>;

    /// Called once after the last element; the sink serializes here.
    fn finish(&mut self) -> std::result::Result<(), SinkError>;
}

/// Walks the model in deterministic order and feeds the sink.
///
/// Any sink error aborts the export and propagates as [`Error::Export`].
pub fn export_model<S: IfcSink>(model: &BuildingModel, sink: &mut S) -> Result<()> {
    for storey in &model.storeys {
        sink.begin_storey(storey, model.extent_of(&storey.id))
            .map_err(Error::Export)?;

        for space in &model.spaces {
            if space.storey_id != storey.id {
                continue;
            }
            // Spaces without a rectangle were filtered out upstream.
            if let Some(rect) = model.rect_of(&space.id) {
                sink.add_space(space, rect.x, rect.y, rect.w, rect.h)
                    .map_err(Error::Export)?;
            }
        }
        for slab in model.slabs.iter().filter(|s| s.storey_id == storey.id) {
            sink.add_slab(slab).map_err(Error::Export)?;
        }
        for roof in model.roofs.iter().filter(|r| r.storey_id == storey.id) {
            sink.add_roof(roof).map_err(Error::Export)?;
        }
        for wall in model.walls.iter().filter(|w| w.storey_id == storey.id) {
            sink.add_wall(wall).map_err(Error::Export)?;
        }
        for door in model.doors.iter().filter(|d| d.storey_id == storey.id) {
            sink.add_door(door).map_err(Error::Export)?;
        }
    }
    sink.finish().map_err(Error::Export)?;

    info!(storeys = model.storeys.len(), "model exported");
    Ok(())
}
