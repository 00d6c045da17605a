//! Referendum rows joined onto the area lookup.

use polars::prelude::{DataFrame, IntoLazy, JoinArgs, JoinCoalesce, JoinType, col};
use tracing::{debug, info_span};

use referendum_model::{AREA_COLUMNS, CODE_DEP, ColumnMapping, DEPARTMENT_CODE, JoinMode};

use crate::error::{MergeError, Result, Stage, StageContext};
use crate::frame::{apply_mapping, column_names, ensure_unique, pad_code_column, require_columns};

fn join_type(mode: JoinMode) -> JoinType {
    match mode {
        JoinMode::Inner => JoinType::Inner,
        JoinMode::Left => JoinType::Left,
    }
}

/// Attaches `{code_reg, name_reg, code_dep, name_dep}` to every referendum row.
///
/// Both `Department code` and `code_dep` are normalized with
/// [`referendum_common::pad_department_code`] before comparison, so `"1"`
/// matches `"01"`. The output carries every referendum column (with the
/// normalized department code) followed by the four area columns.
///
/// With [`JoinMode::Inner`] rows whose department does not resolve are
/// dropped; with [`JoinMode::Left`] they are kept with null area fields.
pub fn merge_referendum_and_areas(
    referendum: &DataFrame,
    areas: &DataFrame,
    mode: JoinMode,
) -> Result<DataFrame> {
    let stage = Stage::ResultJoin;
    let _span = info_span!("join_results", mode = %mode).entered();

    require_columns(referendum, &[DEPARTMENT_CODE], stage)?;
    require_columns(areas, &AREA_COLUMNS, stage)?;

    let referendum_columns = column_names(referendum);
    if let Some(column) = referendum_columns
        .iter()
        .find(|name| AREA_COLUMNS.contains(&name.as_str()))
    {
        return Err(MergeError::ColumnCollision {
            stage,
            column: column.clone(),
        });
    }

    let referendum = pad_code_column(referendum, DEPARTMENT_CODE, stage)?;
    let areas = apply_mapping(areas.clone(), &ColumnMapping::identity(AREA_COLUMNS), stage)?;
    let areas = pad_code_column(&areas, CODE_DEP, stage)?;
    ensure_unique(&areas, CODE_DEP, stage)?;

    let input_rows = referendum.height();
    let joined = referendum
        .lazy()
        .join(
            areas.lazy(),
            [col(DEPARTMENT_CODE)],
            [col(CODE_DEP)],
            JoinArgs::new(join_type(mode)).with_coalesce(JoinCoalesce::KeepColumns),
        )
        .collect()
        .in_stage(stage)?;

    let mapping = ColumnMapping::identity(&referendum_columns).then(ColumnMapping::identity(AREA_COLUMNS));
    let joined = apply_mapping(joined, &mapping, stage)?;

    debug!(
        input_rows,
        joined_rows = joined.height(),
        dropped = input_rows.saturating_sub(joined.height()),
        "referendum rows attached to areas"
    );

    Ok(joined)
}
