//! Integration tests for the join and aggregation stages.

use polars::prelude::{Column, DataFrame, NamedFrom, Series, df};
use proptest::prelude::*;

use referendum_common::pad_department_code;
use referendum_merge::{
    compute_referendum_result_by_regions, merge_referendum_and_areas,
    merge_regions_and_departments, region_results,
};
use referendum_model::{JoinMode, VOTE_COLUMNS, VoteTotals};

fn regions() -> DataFrame {
    df!(
        "code" => ["84", "94", "11"],
        "name" => ["Auvergne-Rhône-Alpes", "Corse", "Île-de-France"],
    )
    .unwrap()
}

fn departments() -> DataFrame {
    df!(
        "code" => ["01", "02", "2A", "75"],
        "name" => ["Ain", "Aisne", "Corse-du-Sud", "Paris"],
        "region_code" => ["84", "32", "94", "11"],
    )
    .unwrap()
}

fn referendum(codes: &[&str], counts: &[[i64; 5]]) -> DataFrame {
    let mut columns: Vec<Column> =
        vec![Series::new("Department code".into(), codes.to_vec()).into()];
    for (idx, name) in VOTE_COLUMNS.iter().enumerate() {
        let values: Vec<i64> = counts.iter().map(|row| row[idx]).collect();
        columns.push(Series::new((*name).into(), values).into());
    }
    DataFrame::new(columns).unwrap()
}

fn column_sum(df: &DataFrame, column: &str) -> i64 {
    df.column(column)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .sum()
}

#[test]
fn test_end_to_end_single_department() {
    let referendum = referendum(&["1"], &[[100, 10, 2, 50, 38]]);
    let departments = df!(
        "code" => ["01"],
        "name" => ["Ain"],
        "region_code" => ["84"],
    )
    .unwrap();
    let regions = df!("code" => ["84"], "name" => ["Auvergne-Rhône-Alpes"]).unwrap();

    let areas = merge_regions_and_departments(&regions, &departments).unwrap();
    let joined = merge_referendum_and_areas(&referendum, &areas, JoinMode::Inner).unwrap();
    let results = compute_referendum_result_by_regions(&joined).unwrap();
    let rows = region_results(&results).unwrap();

    insta::assert_debug_snapshot!("end_to_end_region_results", rows);
}

#[test]
fn test_area_join_keeps_every_department() {
    let areas = merge_regions_and_departments(&regions(), &departments()).unwrap();

    assert_eq!(areas.height(), departments().height());
    // "02" points at region "32", absent from the regions table
    let unresolved: Vec<Option<&str>> = areas
        .column("code_dep")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .zip(areas.column("name_reg").unwrap().str().unwrap())
        .filter(|(_, region)| region.is_none())
        .map(|(dep, _)| dep)
        .collect();
    assert_eq!(unresolved, vec![Some("02")]);
}

#[test]
fn test_area_join_with_no_matching_region() {
    let regions = df!("code" => ["99"], "name" => ["Nowhere"]).unwrap();

    let areas = merge_regions_and_departments(&regions, &departments()).unwrap();

    assert_eq!(areas.height(), 4);
    assert_eq!(areas.column("name_reg").unwrap().null_count(), 4);
}

#[test]
fn test_area_join_with_empty_departments() {
    let empty = departments().head(Some(0));

    let areas = merge_regions_and_departments(&regions(), &empty).unwrap();

    assert_eq!(areas.height(), 0);
    assert_eq!(areas.width(), 4);
}

#[test]
fn test_unmatched_department_excluded_in_inner_mode() {
    let referendum = referendum(&["1", "99"], &[[100, 10, 2, 50, 38], [70, 7, 0, 30, 33]]);
    let areas = merge_regions_and_departments(&regions(), &departments()).unwrap();

    let joined = merge_referendum_and_areas(&referendum, &areas, JoinMode::Inner).unwrap();
    let rows = region_results(&compute_referendum_result_by_regions(&joined).unwrap()).unwrap();

    assert_eq!(joined.height(), 1);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name_reg, "Auvergne-Rhône-Alpes");
    assert_eq!(rows[0].totals.registered, 100);
}

#[test]
fn test_left_mode_aggregates_only_resolved_rows() {
    let referendum = referendum(&["1", "99", "2A"], &[
        [100, 10, 2, 50, 38],
        [70, 7, 0, 30, 33],
        [40, 4, 1, 20, 15],
    ]);
    let areas = merge_regions_and_departments(&regions(), &departments()).unwrap();

    let joined = merge_referendum_and_areas(&referendum, &areas, JoinMode::Left).unwrap();
    let rows = region_results(&compute_referendum_result_by_regions(&joined).unwrap()).unwrap();

    assert_eq!(joined.height(), 3);
    let names: Vec<&str> = rows.iter().map(|row| row.name_reg.as_str()).collect();
    assert_eq!(names, vec!["Auvergne-Rhône-Alpes", "Corse"]);
}

#[test]
fn test_department_in_unknown_region_is_dropped_by_aggregation() {
    // "2" pads to "02", which resolves to a department but not to a region
    let referendum = referendum(&["2"], &[[10, 1, 0, 5, 4]]);
    let areas = merge_regions_and_departments(&regions(), &departments()).unwrap();

    let joined = merge_referendum_and_areas(&referendum, &areas, JoinMode::Inner).unwrap();
    let results = compute_referendum_result_by_regions(&joined).unwrap();

    assert_eq!(joined.height(), 1);
    assert_eq!(results.height(), 0);
}

const CODES: [&str; 7] = ["1", "01", "2", "2A", "75", "99", "ZZ"];

fn rows_strategy() -> impl Strategy<Value = Vec<(usize, [i64; 5])>> {
    prop::collection::vec((0..CODES.len(), prop::array::uniform5(0i64..10_000)), 0..40)
}

proptest! {
    #[test]
    fn inner_join_never_adds_rows(rows in rows_strategy()) {
        let codes: Vec<&str> = rows.iter().map(|(idx, _)| CODES[*idx]).collect();
        let counts: Vec<[i64; 5]> = rows.iter().map(|(_, c)| *c).collect();
        let referendum = referendum(&codes, &counts);
        let areas = merge_regions_and_departments(&regions(), &departments()).unwrap();

        let joined = merge_referendum_and_areas(&referendum, &areas, JoinMode::Inner).unwrap();

        let known = ["01", "02", "2A", "75"];
        let all_match = codes.iter().all(|code| known.contains(&pad_department_code(code).as_str()));
        prop_assert!(joined.height() <= referendum.height());
        prop_assert_eq!(joined.height() == referendum.height(), all_match);
    }

    #[test]
    fn aggregation_preserves_sums(rows in rows_strategy()) {
        let codes: Vec<&str> = rows.iter().map(|(idx, _)| CODES[*idx]).collect();
        let counts: Vec<[i64; 5]> = rows.iter().map(|(_, c)| *c).collect();
        let referendum = referendum(&codes, &counts);
        let areas = merge_regions_and_departments(&regions(), &departments()).unwrap();
        let joined = merge_referendum_and_areas(&referendum, &areas, JoinMode::Inner).unwrap();

        let results = compute_referendum_result_by_regions(&joined).unwrap();
        let rows = region_results(&results).unwrap();

        // only rows whose department resolved to a region feed the sums
        let resolved = joined
            .filter(&joined.column("name_reg").unwrap().is_not_null())
            .unwrap();
        for column in VOTE_COLUMNS {
            prop_assert_eq!(column_sum(&results, column), column_sum(&resolved, column));
        }
        let mut total = VoteTotals::default();
        for row in &rows {
            total.accumulate(&row.totals);
        }
        prop_assert_eq!(total.registered, column_sum(&resolved, "Registered"));
    }
}

#[test]
fn test_codes_padded_on_both_sides_before_join() {
    let regions = df!("code" => ["84"], "name" => ["Auvergne-Rhône-Alpes"]).unwrap();
    let departments = df!(
        "code" => ["1", "75"],
        "name" => ["Ain", "Paris"],
        "region_code" => ["84", "11"],
    )
    .unwrap();
    let referendum = referendum(&[" 01", "1", "75", "99"], &[
        [2, 0, 0, 1, 1],
        [3, 1, 0, 1, 1],
        [4, 0, 0, 2, 2],
        [5, 0, 0, 3, 2],
    ]);

    let areas = merge_regions_and_departments(&regions, &departments).unwrap();
    let joined = merge_referendum_and_areas(&referendum, &areas, JoinMode::Inner).unwrap();

    let codes: Vec<Option<&str>> = joined
        .column("code_dep")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(codes.len(), 3);
    assert_eq!(codes.iter().filter(|code| **code == Some("01")).count(), 2);
    assert_eq!(joined.column("name_reg").unwrap().null_count(), 1);

    let rows = region_results(&compute_referendum_result_by_regions(&joined).unwrap()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].totals.registered, 5);
}
