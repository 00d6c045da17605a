//! Results attached to region geometries, with the derived ratio.

use polars::prelude::{
    DataFrame, DataType, IntoLazy, JoinArgs, JoinCoalesce, JoinType, SortMultipleOptions, col,
};
use tracing::{debug, warn};

use referendum_common::{any_to_f64, any_to_i64};
use referendum_model::{CHOICE_A, CHOICE_B, GEOMETRY_NAME, NAME_REG, RATIO, VOTE_COLUMNS};

use crate::error::{RenderError, Result};
use crate::geometry::{FEATURE_INDEX, RegionGeometries};

fn require_column(df: &DataFrame, column: &str) -> Result<()> {
    if df.column(column).is_err() {
        return Err(RenderError::MissingColumn {
            column: column.to_string(),
        });
    }
    Ok(())
}

/// Left-joins region results onto the geometries and computes `ratio`.
///
/// Geometries are authoritative: every shape yields one row, with null vote
/// fields when no result carries its name. `ratio` is
/// `Choice A / (Choice A + Choice B)` as `Float64`; it is NaN when both
/// choices are zero and null when the region has no results.
///
/// Output columns: `nom`, `feature`, `name_reg`, the five vote columns, `ratio`.
pub fn attach_results(geometries: &RegionGeometries, results: &DataFrame) -> Result<DataFrame> {
    require_column(results, NAME_REG)?;
    for column in VOTE_COLUMNS {
        require_column(results, column)?;
    }

    let mut result_columns = vec![col(NAME_REG)];
    result_columns.extend(VOTE_COLUMNS.iter().map(|column| col(*column)));

    let choice_a = col(CHOICE_A).cast(DataType::Float64);
    let choice_b = col(CHOICE_B).cast(DataType::Float64);

    let map = geometries
        .names_frame()?
        .lazy()
        .join(
            results.clone().lazy().select(result_columns),
            [col(GEOMETRY_NAME)],
            [col(NAME_REG)],
            JoinArgs::new(JoinType::Left).with_coalesce(JoinCoalesce::KeepColumns),
        )
        .with_column((choice_a.clone() / (choice_a + choice_b)).alias(RATIO))
        .sort_by_exprs([col(FEATURE_INDEX)], SortMultipleOptions::default())
        .collect()?;

    let unmatched = map.column(NAME_REG)?.null_count();
    if unmatched > 0 {
        warn!(unmatched, "regions without referendum results");
    }
    debug!(shapes = map.height(), "results attached to geometries");

    Ok(map)
}

/// Ratio per shape, indexed like [`RegionGeometries::shapes`].
///
/// `None` marks a shape without results; non-finite ratios are kept as-is.
pub fn feature_ratios(map: &DataFrame, shape_count: usize) -> Result<Vec<Option<f64>>> {
    require_column(map, FEATURE_INDEX)?;
    require_column(map, RATIO)?;

    let features = map.column(FEATURE_INDEX)?;
    let ratios = map.column(RATIO)?;

    let mut out = vec![None; shape_count];
    for idx in 0..map.height() {
        let Some(feature) = any_to_i64(features.get(idx)?) else {
            continue;
        };
        let Some(slot) = usize::try_from(feature).ok().and_then(|i| out.get_mut(i)) else {
            continue;
        };
        *slot = any_to_f64(ratios.get(idx)?);
    }
    Ok(out)
}
