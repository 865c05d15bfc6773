//! Excel生成（共通ライブラリ）
//!
//! Table をそのまま1シートのワークブックに書き出す

use crate::table::{CellValue, Table};
use rust_xlsxwriter::*;

/// 既定のシート名
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Excelをバッファに生成
///
/// # Arguments
/// * `table` - 出力する表（1行目にヘッダー）
/// * `sheet_name` - シート名
pub fn generate_table_buffer(table: &Table, sheet_name: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    let date_format = Format::new().set_num_format(DATE_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, header) in table.headers.iter().enumerate() {
        let col = column_number(col)?;
        worksheet
            .write_string_with_format(0, col, header, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        // 1行目はヘッダー
        let row_num = u32::try_from(row_idx + 1)
            .map_err(|_| format!("行数が上限を超えています: {}", row_idx + 1))?;

        for (col, cell) in row.iter().enumerate() {
            let col = column_number(col)?;
            let written = match cell {
                CellValue::Empty => continue,
                CellValue::Text(s) if s.is_empty() => continue,
                CellValue::Text(s) => worksheet.write_string(row_num, col, s),
                CellValue::Number(n) => worksheet.write_number(row_num, col, *n),
                CellValue::Bool(b) => worksheet.write_boolean(row_num, col, *b),
                CellValue::DateTime(serial) => {
                    worksheet.write_number_with_format(row_num, col, *serial, &date_format)
                }
            };
            written.map_err(|e| format!("セル書き込みエラー ({}, {}): {}", row_num, col, e))?;
        }
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

fn column_number(index: usize) -> Result<u16, String> {
    u16::try_from(index).map_err(|_| format!("列数が上限を超えています: {}", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_table_buffer() {
        let table = Table::new(
            vec!["Description".to_string(), "Qty".to_string(), "Done".to_string()],
            vec![
                vec![CellValue::text("Brick work"), CellValue::Number(12.5), CellValue::Bool(true)],
                vec![CellValue::Empty, CellValue::DateTime(45292.5), CellValue::Empty],
            ],
        );

        let buffer = generate_table_buffer(&table, DEFAULT_SHEET_NAME).unwrap();

        // xlsxはZIPコンテナ
        assert!(buffer.len() > 4);
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_generate_empty_table() {
        let buffer = generate_table_buffer(&Table::default(), DEFAULT_SHEET_NAME).unwrap();
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_invalid_sheet_name() {
        let result = generate_table_buffer(&Table::default(), "bad/name");
        assert!(result.is_err());
    }
}
