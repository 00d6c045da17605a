//! Per-region sums of the vote-count columns.

use polars::prelude::{DataFrame, Expr, IntoLazy, SortMultipleOptions, col};
use tracing::{debug, info_span};

use referendum_common::{any_to_i64, any_to_string};
use referendum_model::{
    ABSTENTIONS, CHOICE_A, CHOICE_B, NAME_REG, NULL_BALLOTS, REGISTERED, RegionResult,
    VOTE_COLUMNS, VoteTotals,
};

use crate::error::{Result, Stage, StageContext};
use crate::frame::require_columns;

/// Sums `Registered`, `Abstentions`, `Null`, `Choice A` and `Choice B` per `name_reg`.
///
/// Rows without a region name (only produced by a left result join) are
/// skipped. Output is one row per region name present in the input, sorted
/// by name; an empty input yields an empty frame with the same columns.
pub fn compute_referendum_result_by_regions(joined: &DataFrame) -> Result<DataFrame> {
    let stage = Stage::Aggregate;
    let _span = info_span!("aggregate").entered();

    require_columns(joined, &[NAME_REG], stage)?;
    require_columns(joined, &VOTE_COLUMNS, stage)?;

    let sums: Vec<Expr> = VOTE_COLUMNS.iter().map(|column| col(*column).sum()).collect();

    let results = joined
        .clone()
        .lazy()
        .filter(col(NAME_REG).is_not_null())
        .group_by([col(NAME_REG)])
        .agg(sums)
        .sort_by_exprs([col(NAME_REG)], SortMultipleOptions::default())
        .collect()
        .in_stage(stage)?;

    debug!(
        input_rows = joined.height(),
        regions = results.height(),
        "vote counts aggregated"
    );

    Ok(results)
}

/// Reads the aggregated frame back into typed rows, in frame order.
///
/// Null counts read as zero.
pub fn region_results(results: &DataFrame) -> Result<Vec<RegionResult>> {
    let stage = Stage::Aggregate;
    require_columns(results, &[NAME_REG], stage)?;
    require_columns(results, &VOTE_COLUMNS, stage)?;

    let count = |column: &str, idx: usize| -> Result<i64> {
        let value = results.column(column).in_stage(stage)?.get(idx).in_stage(stage)?;
        Ok(any_to_i64(value).unwrap_or(0))
    };

    let mut rows = Vec::with_capacity(results.height());
    for idx in 0..results.height() {
        let name = results.column(NAME_REG).in_stage(stage)?.get(idx).in_stage(stage)?;
        rows.push(RegionResult {
            name_reg: any_to_string(name),
            totals: VoteTotals {
                registered: count(REGISTERED, idx)?,
                abstentions: count(ABSTENTIONS, idx)?,
                null: count(NULL_BALLOTS, idx)?,
                choice_a: count(CHOICE_A, idx)?,
                choice_b: count(CHOICE_B, idx)?,
            },
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    fn joined() -> DataFrame {
        df!(
            "name_reg" => [Some("Corse"), Some("Bretagne"), Some("Corse"), None],
            "Registered" => [100i64, 50, 40, 7],
            "Abstentions" => [10i64, 5, 4, 1],
            "Null" => [2i64, 1, 0, 0],
            "Choice A" => [50i64, 20, 30, 3],
            "Choice B" => [38i64, 24, 6, 3],
        )
        .unwrap()
    }

    #[test]
    fn test_groups_sorted_by_name() {
        let results = compute_referendum_result_by_regions(&joined()).unwrap();
        let rows = region_results(&results).unwrap();

        let names: Vec<&str> = rows.iter().map(|row| row.name_reg.as_str()).collect();
        assert_eq!(names, vec!["Bretagne", "Corse"]);
        assert_eq!(
            rows[1].totals,
            VoteTotals {
                registered: 140,
                abstentions: 14,
                null: 2,
                choice_a: 80,
                choice_b: 44,
            }
        );
    }

    #[test]
    fn test_rows_without_region_are_skipped() {
        let results = compute_referendum_result_by_regions(&joined()).unwrap();
        assert_eq!(results.height(), 2);
    }

    #[test]
    fn test_empty_input() {
        let empty = joined().head(Some(0));
        let results = compute_referendum_result_by_regions(&empty).unwrap();

        assert_eq!(results.height(), 0);
        assert!(results.column("Choice B").is_ok());
        assert!(region_results(&results).unwrap().is_empty());
    }

    #[test]
    fn test_missing_vote_column() {
        let frame = df!("name_reg" => ["Corse"], "Registered" => [1i64]).unwrap();

        let err = compute_referendum_result_by_regions(&frame).unwrap_err();

        assert!(err.to_string().contains("Abstentions"));
        assert!(err.to_string().starts_with("aggregate"));
    }
}
