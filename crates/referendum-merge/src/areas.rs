//! Department to region lookup.

use polars::prelude::{DataFrame, IntoLazy, JoinArgs, JoinCoalesce, JoinType, col};
use tracing::{debug, info_span, warn};

use referendum_model::{
    CODE_DEP, CODE_REG, ColumnMapping, DEPARTMENT_COLUMNS, NAME_DEP, NAME_REG, REGION_COLUMNS,
    SOURCE_CODE, SOURCE_NAME, SOURCE_REGION_CODE,
};

use crate::error::{Result, Stage, StageContext};
use crate::frame::{apply_mapping, require_columns};

/// Suffix the join appends to region columns that collide with department columns.
pub(crate) const REGION_SUFFIX: &str = "_reg";

// Both tables carry `code` and `name`; the departments side keeps the bare
// names and the regions side gets REGION_SUFFIX.
const JOINED_REGION_CODE: &str = "code_reg";
const JOINED_REGION_NAME: &str = "name_reg";

/// Canonical schema of the area lookup, read off the joined frame.
pub(crate) fn area_mapping() -> ColumnMapping {
    ColumnMapping::new(&[
        (JOINED_REGION_CODE, CODE_REG),
        (JOINED_REGION_NAME, NAME_REG),
        (SOURCE_CODE, CODE_DEP),
        (SOURCE_NAME, NAME_DEP),
    ])
}

/// Builds the area lookup `{code_reg, name_reg, code_dep, name_dep}`.
///
/// Departments are authoritative: this is a left join of departments onto
/// regions on `departments.region_code = regions.code`, so the output has
/// one row per department and unresolved regions leave `code_reg` and
/// `name_reg` null. No matching region at all is not an error.
pub fn merge_regions_and_departments(regions: &DataFrame, departments: &DataFrame) -> Result<DataFrame> {
    let stage = Stage::AreaJoin;
    let _span = info_span!("join_areas").entered();

    require_columns(regions, &REGION_COLUMNS, stage)?;
    require_columns(departments, &DEPARTMENT_COLUMNS, stage)?;

    let joined = departments
        .clone()
        .lazy()
        .join(
            regions.clone().lazy(),
            [col(SOURCE_REGION_CODE)],
            [col(SOURCE_CODE)],
            JoinArgs::new(JoinType::Left)
                .with_coalesce(JoinCoalesce::KeepColumns)
                .with_suffix(Some(REGION_SUFFIX.into())),
        )
        .collect()
        .in_stage(stage)?;

    let areas = apply_mapping(joined, &area_mapping(), stage)?;

    let unresolved = areas.column(NAME_REG).in_stage(stage)?.null_count();
    if unresolved > 0 {
        warn!(unresolved, "departments without a matching region");
    }
    debug!(
        departments = departments.height(),
        areas = areas.height(),
        "area lookup built"
    );

    Ok(areas)
}
