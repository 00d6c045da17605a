//! Referendum processing pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: Read the referendum, regions and departments sources
//! 2. **Join**: Build the area lookup and attach it to referendum rows
//! 3. **Aggregate**: Sum vote counts per region
//! 4. **Render**: Draw the per-region ratio on a map (optional)
//!
//! Each stage reports failures with the stage name as context.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use referendum_ingest::{SourcePaths, SourceTables, load_data};
use referendum_merge::{
    compute_referendum_result_by_regions, merge_referendum_and_areas,
    merge_regions_and_departments, region_results,
};
use referendum_model::{JoinMode, NAME_REG, RegionResult};
use referendum_render::{SvgRenderer, plot_referendum_map};

/// Default file name of the region geometries.
pub const GEOMETRY_FILE: &str = "regions.geojson";

/// Where the map is read from and written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapOutput {
    /// GeoJSON feature collection of region outlines.
    pub geometry: PathBuf,
    /// SVG file to write.
    pub output: PathBuf,
}

/// Everything a run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub sources: SourcePaths,
    #[serde(default)]
    pub join_mode: JoinMode,
    /// `None` skips the render stage.
    pub map: Option<MapOutput>,
}

impl PipelineConfig {
    /// Default source names inside `data_dir`, map written to `output`.
    #[must_use]
    pub fn in_dir(data_dir: &Path, output: impl Into<PathBuf>) -> Self {
        Self {
            sources: SourcePaths::in_dir(data_dir),
            join_mode: JoinMode::default(),
            map: Some(MapOutput {
                geometry: data_dir.join(GEOMETRY_FILE),
                output: output.into(),
            }),
        }
    }

    #[must_use]
    pub fn with_join_mode(mut self, join_mode: JoinMode) -> Self {
        self.join_mode = join_mode;
        self
    }

    #[must_use]
    pub fn without_map(mut self) -> Self {
        self.map = None;
        self
    }
}

/// What the render stage produced.
#[derive(Debug, Clone)]
pub struct RenderedMap {
    pub path: PathBuf,
    /// Geometries drawn.
    pub shapes: usize,
    /// Geometries whose name matched no region result.
    pub without_results: usize,
}

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Per-region sums, one row per region name, sorted by name.
    pub results: DataFrame,
    /// The same rows, typed.
    pub regions: Vec<RegionResult>,
    pub map: Option<RenderedMap>,
}

// ============================================================================
// Stage 1: Load
// ============================================================================

/// Read the three tabular sources.
pub fn load(sources: &SourcePaths) -> Result<SourceTables> {
    load_data(sources).context("load")
}

// ============================================================================
// Stage 2: Join
// ============================================================================

/// Build the area lookup and attach it to every referendum row.
pub fn join(tables: &SourceTables, mode: JoinMode) -> Result<DataFrame> {
    let areas = merge_regions_and_departments(&tables.regions, &tables.departments)
        .context("join")?;
    merge_referendum_and_areas(&tables.referendum, &areas, mode).context("join")
}

// ============================================================================
// Stage 3: Aggregate
// ============================================================================

/// Sum vote counts per region.
pub fn aggregate(joined: &DataFrame) -> Result<(DataFrame, Vec<RegionResult>)> {
    let results = compute_referendum_result_by_regions(joined).context("aggregate")?;
    let regions = region_results(&results).context("aggregate")?;
    Ok((results, regions))
}

// ============================================================================
// Stage 4: Render
// ============================================================================

/// Draw the ratio map as SVG.
pub fn render(map: &MapOutput, results: &DataFrame) -> Result<RenderedMap> {
    let renderer = SvgRenderer::new(&map.output);
    let attached = plot_referendum_map(&map.geometry, results, &renderer).context("render")?;
    let without_results = attached
        .column(NAME_REG)
        .map(|column| column.null_count())
        .context("render")?;
    Ok(RenderedMap {
        path: map.output.clone(),
        shapes: attached.height(),
        without_results,
    })
}

/// Run every stage in order; the first failure aborts the run.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineResult> {
    let _span = info_span!("pipeline", join_mode = %config.join_mode).entered();
    let start = Instant::now();

    let tables = load(&config.sources)?;
    let joined = join(&tables, config.join_mode)?;
    debug!(rows = joined.height(), "referendum rows joined");
    let (results, regions) = aggregate(&joined)?;

    let map = match &config.map {
        Some(map) => Some(render(map, &results)?),
        None => None,
    };

    info!(
        regions = regions.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "pipeline complete"
    );

    Ok(PipelineResult {
        results,
        regions,
        map,
    })
}
