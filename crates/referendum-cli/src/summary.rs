use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use referendum_cli::pipeline::PipelineResult;
use referendum_model::{RegionResult, VoteTotals};

pub fn print_summary(result: &PipelineResult) {
    println!("{}", summary_table(&result.regions));
    if let Some(map) = &result.map {
        println!("Map: {}", map.path.display());
        if map.without_results > 0 {
            println!(
                "{} of {} regions have no results",
                map.without_results, map.shapes
            );
        }
    }
}

fn summary_table(regions: &[RegionResult]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Region"),
        header_cell("Registered"),
        header_cell("Abstentions"),
        header_cell("Null"),
        header_cell("Choice A"),
        header_cell("Choice B"),
        header_cell("Choice A %"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total = VoteTotals::default();
    for region in regions {
        total.accumulate(&region.totals);
        let mut row = vec![Cell::new(&region.name_reg).fg(Color::Blue)];
        row.extend(total_cells(&region.totals));
        table.add_row(row);
    }

    let mut row = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    row.extend(
        total_cells(&total)
            .into_iter()
            .map(|cell| cell.add_attribute(Attribute::Bold)),
    );
    table.add_row(row);
    table
}

fn total_cells(totals: &VoteTotals) -> Vec<Cell> {
    vec![
        Cell::new(totals.registered),
        Cell::new(totals.abstentions),
        Cell::new(totals.null),
        Cell::new(totals.choice_a),
        Cell::new(totals.choice_b),
        ratio_cell(totals.ratio()),
    ]
}

fn ratio_cell(ratio: f64) -> Cell {
    if ratio.is_finite() {
        let color = if ratio > 0.5 { Color::Green } else { Color::Red };
        Cell::new(format!("{:.2}", ratio * 100.0)).fg(color)
    } else {
        dim_cell("-")
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(name: &str, choice_a: i64, choice_b: i64) -> RegionResult {
        RegionResult {
            name_reg: name.to_string(),
            totals: VoteTotals {
                registered: 1000,
                abstentions: 100,
                null: 10,
                choice_a,
                choice_b,
            },
        }
    }

    fn render(regions: &[RegionResult]) -> String {
        let mut table = summary_table(regions);
        table.force_no_tty();
        table.to_string()
    }

    #[test]
    fn test_rows_and_total() {
        let output = render(&[region("Bretagne", 600, 290), region("Corse", 300, 590)]);

        assert!(output.contains("Bretagne"));
        assert!(output.contains("Corse"));
        let total = output.lines().find(|line| line.contains("TOTAL")).unwrap();
        assert!(total.contains("2000"));
        assert!(total.contains("900"));
        assert!(total.contains("880"));
        assert!(total.contains("50.56"));
    }

    #[test]
    fn test_ratio_without_choices() {
        let output = render(&[region("Corse", 0, 0)]);
        let row = output.lines().find(|line| line.contains("Corse")).unwrap();

        assert!(row.trim_end().trim_end_matches('│').trim_end().ends_with('-'));
    }

    #[test]
    fn test_empty_results_still_have_total() {
        let output = render(&[]);
        let total = output.lines().find(|line| line.contains("TOTAL")).unwrap();

        assert!(total.contains('-'));
    }
}
