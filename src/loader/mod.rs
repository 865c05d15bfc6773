//! スプレッドシート読み込み
//!
//! calamineで先頭シートを読み、1行目をヘッダーとして Table に変換する。
//! xlsx / xlsm / xls / ods に対応。

use crate::error::{MatcherError, Result};
use boq_matcher_common::{CellValue, Table};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

pub fn read_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(MatcherError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| MatcherError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            MatcherError::SpreadsheetRead(format!("{}: workbook has no worksheets", path.display()))
        })?
        .map_err(|e| MatcherError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    let table = table_from_range(&range);
    tracing::debug!(
        "read {} rows x {} columns from {}",
        table.len(),
        table.width(),
        path.display()
    );
    Ok(table)
}

/// シート範囲を Table に変換（1行目はヘッダー）
pub fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows_iter = range.rows();

    let Some(header_row) = rows_iter.next() else {
        return Table::default();
    };

    let headers = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell_value(cell) {
            CellValue::Empty => format!("Unnamed: {}", idx),
            value => value.to_text().trim().to_string(),
        })
        .collect();

    let rows = rows_iter
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Table::new(headers, rows)
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
