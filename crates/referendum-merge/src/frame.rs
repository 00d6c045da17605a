//! DataFrame helpers shared by the join stages.

use std::borrow::Cow;
use std::collections::HashSet;

use polars::prelude::{ChunkApply, DataFrame, DataType, Expr, IntoLazy, IntoSeries, col};

use referendum_common::pad_department_code;
use referendum_model::ColumnMapping;

use crate::error::{MergeError, Result, Stage, StageContext};

/// Column names of `df` as owned strings.
pub(crate) fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Fails with a schema mismatch on the first of `columns` absent from `df`.
pub(crate) fn require_columns(df: &DataFrame, columns: &[&str], stage: Stage) -> Result<()> {
    for column in columns {
        if df.column(column).is_err() {
            return Err(MergeError::SchemaMismatch {
                stage,
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

/// Projects a joined frame onto its canonical schema.
///
/// Every source column of `mapping` must be present; the output holds exactly
/// the mapping's target columns, in mapping order.
pub(crate) fn apply_mapping(df: DataFrame, mapping: &ColumnMapping, stage: Stage) -> Result<DataFrame> {
    let names = column_names(&df);
    if let Some(missing) = mapping.first_missing(names.iter().map(String::as_str)) {
        return Err(MergeError::SchemaMismatch {
            stage,
            column: missing.to_string(),
        });
    }

    let exprs: Vec<Expr> = mapping
        .renames()
        .iter()
        .map(|rename| col(rename.source.as_str()).alias(rename.target.as_str()))
        .collect();

    df.lazy().select(exprs).collect().in_stage(stage)
}

/// Returns a copy of `df` with `column` normalized to padded department codes.
///
/// Non-text columns are cast to text first, so integer codes such as `1`
/// also become `"01"`. Nulls stay null.
pub(crate) fn pad_code_column(df: &DataFrame, column: &str, stage: Stage) -> Result<DataFrame> {
    require_columns(df, &[column], stage)?;

    let text = df
        .column(column)
        .in_stage(stage)?
        .cast(&DataType::String)
        .in_stage(stage)?;
    let padded = text
        .str()
        .in_stage(stage)?
        .apply_values(|code| Cow::Owned(pad_department_code(code)));

    let mut out = df.clone();
    out.with_column(padded.into_series()).in_stage(stage)?;
    Ok(out)
}

/// Fails if a non-null value of the text column `column` repeats.
pub(crate) fn ensure_unique(df: &DataFrame, column: &str, stage: Stage) -> Result<()> {
    let values = df.column(column).in_stage(stage)?.str().in_stage(stage)?;
    let mut seen = HashSet::new();
    for value in values.into_iter().flatten() {
        if !seen.insert(value) {
            return Err(MergeError::DuplicateKey {
                stage,
                column: column.to_string(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}
