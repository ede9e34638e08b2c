use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use stylus_metrics::aggregate::StudyData;
use stylus_metrics::export;

/// Print the summary table to stdout, rendered from the same rows the CSV
/// export serializes.
pub fn print_summary_table(data: &StudyData, digits: u32) {
    let mut rows = export::csv_rows(data, digits).into_iter();

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    if let Some(header) = rows.next() {
        table.add_row(
            header
                .iter()
                .map(|cell| Cell::new(cell).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
        for i in 1..header.len() {
            if let Some(col) = table.column_mut(i) {
                col.set_cell_alignment(CellAlignment::Right);
            }
        }
    }

    for row in rows {
        let cells: Vec<Cell> = row
            .iter()
            .enumerate()
            .map(|(i, value)| {
                if i == 0 {
                    Cell::new(value).add_attribute(Attribute::Bold)
                } else {
                    Cell::new(value)
                }
            })
            .collect();
        table.add_row(cells);
    }

    println!("\n{}", table);
}
