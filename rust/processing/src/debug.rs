// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optional debug artifacts.
//!
//! When enabled by the caller, a run can be dumped as two JSON files: the
//! solved layout (rectangles grouped per storey) and the constraints report.
//! Both reuse the serde shapes of the layout crate, so parsing a dump and
//! re-emitting it is stable.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use graph2ifc_layout::LayoutSnapshot;
use tracing::info;

use crate::error::Result;
use crate::pipeline::PipelineOutput;

/// Writes `layout.json` and `report.json` into `dir`.
///
/// Returns the two file paths. The directory must exist.
pub fn write_debug_artifacts(dir: &Path, output: &PipelineOutput) -> Result<(PathBuf, PathBuf)> {
    let layout_path = dir.join("layout.json");
    let report_path = dir.join("report.json");

    let snapshot = LayoutSnapshot::new(&output.model.storeys, &output.model.rects);
    write_json(&layout_path, &snapshot)?;
    write_json(&report_path, &output.report)?;

    info!(layout = %layout_path.display(), report = %report_path.display(), "debug artifacts written");
    Ok((layout_path, report_path))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    Ok(())
}
