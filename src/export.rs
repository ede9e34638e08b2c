//! Delimited-file serialization of the summary table.

use crate::aggregate::StudyData;
use crate::error::SmResult;
use crate::stats::Stat;
use std::path::Path;

/// Truncate toward zero at `digits` decimal places.
pub fn truncate_to(x: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (scale * x).trunc() / scale
}

fn fmt_cell(x: f64, digits: u32) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    truncate_to(x, digits).to_string()
}

fn push_stat(cells: &mut Vec<String>, stat: Stat, digits: u32) {
    cells.push(fmt_cell(stat.mean, digits));
    cells.push(fmt_cell(stat.std, digits));
}

/// Header plus one row of scalar cells per layout. Layouts without a travel
/// model emit empty travel/PIT cells.
pub fn csv_rows(data: &StudyData, digits: u32) -> Vec<Vec<String>> {
    let mut rows = vec![data.header.clone()];
    for row in &data.rows {
        let mut cells = vec![row.layout.to_string()];
        for axis in row.pos {
            push_stat(&mut cells, axis, digits);
        }
        push_stat(&mut cells, row.wpm, digits);
        push_stat(&mut cells, row.awpm, digits);
        match row.travel {
            Some(stat) => push_stat(&mut cells, stat, digits),
            None => cells.extend([String::new(), String::new()]),
        }
        match row.pit {
            Some(stat) => push_stat(&mut cells, stat, digits),
            None => cells.extend([String::new(), String::new()]),
        }
        rows.push(cells);
    }
    rows
}

pub fn write_csv<P: AsRef<Path>>(data: &StudyData, path: P, digits: u32) -> SmResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in csv_rows(data, digits) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}
