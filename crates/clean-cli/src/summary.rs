use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::CleaningResult;

pub fn print_summary(result: &CleaningResult) {
    println!("Run: {}", result.run_id);
    println!("Input: {}", result.input_artifact);
    println!("Output: {}", result.output_path.display());
    let published = if result.new_version {
        format!("{} (new version)", result.published.reference())
    } else {
        format!("{} (unchanged)", result.published.reference())
    };
    println!("Artifact: {published}");
    println!("SHA-256: {}", result.published.sha256);
    println!("{}", stage_table(result));
}

/// Row counts per cleaning stage.
pub fn stage_table(result: &CleaningResult) -> Table {
    let stats = &result.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_table_style(&mut table);
    let rows = [
        ("Input", stats.input_rows),
        ("After price filter", stats.after_price_filter),
        ("After location filter", stats.after_geo_filter),
        ("Missing last_review", stats.missing_last_review),
    ];
    for (stage, count) in rows {
        table.add_row(vec![Cell::new(stage), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("Dropped").add_attribute(Attribute::Dim),
        Cell::new(stats.dropped_rows()).add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![
        Cell::new("OUTPUT")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.output_rows()).add_attribute(Attribute::Bold),
    ]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}
