use azureipranges::{ChangeReport, SummaryRecord, WriteSummary};
use comfy_table::presets::NOTHING;
use comfy_table::*;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Run Summary
--------------------------------------------------------------------------------------*/

pub fn run_summary(
    summary: &SummaryRecord<'_>,
    report: Option<&ChangeReport>,
    write_summary: &WriteSummary,
    output_dir: &Path,
) {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new(summary.change_number),
        Cell::new("Change Number"),
    ]);
    table.add_row(vec![Cell::new(summary.cloud), Cell::new("Cloud")]);
    table.add_row(vec![Cell::new(summary.service_count), Cell::new("Services")]);

    if let Some(report) = report.filter(|report| !report.is_new) {
        table.add_row(vec![
            Cell::new(report.added_ids.len()),
            Cell::new("Services Added"),
        ]);
        table.add_row(vec![
            Cell::new(report.removed_ids.len()),
            Cell::new("Services Removed"),
        ]);
        table.add_row(vec![
            Cell::new(report.modified_ids.len()),
            Cell::new("Services Modified"),
        ]);
    }

    table.add_row(vec![
        Cell::new(write_summary.written)
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Files Written"),
    ]);
    if write_summary.failed > 0 {
        table.add_row(vec![
            Cell::new(write_summary.failed)
                .add_attribute(Attribute::Bold)
                .fg(Color::Red),
            Cell::new("Files Failed"),
        ]);
    }
    table.add_row(vec![
        Cell::new(output_dir.display()),
        Cell::new("Output Directory"),
    ]);

    // Right-align the numbers column
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{table}");
}
