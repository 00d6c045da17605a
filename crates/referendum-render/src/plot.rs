//! Map stage entry point.

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::info_span;

use crate::attach::attach_results;
use crate::error::Result;
use crate::geometry::load_geometries;
use crate::svg::ChoroplethRenderer;

/// Loads region geometries, attaches per-region results and draws the map.
///
/// Returns the attached frame (one row per geometry, with `ratio`) so callers
/// can inspect what was drawn.
pub fn plot_referendum_map(
    geometry_path: &Path,
    results: &DataFrame,
    renderer: &dyn ChoroplethRenderer,
) -> Result<DataFrame> {
    let _span = info_span!("render", path = %geometry_path.display()).entered();

    let geometries = load_geometries(geometry_path)?;
    let map = attach_results(&geometries, results)?;
    renderer.render(&geometries, &map)?;
    Ok(map)
}
