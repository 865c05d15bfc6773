//! Excel出力（CLI版）
//!
//! 共通ライブラリでバッファを生成し、ファイルに書き出す（既存ファイルは上書き）

use crate::error::{MatcherError, Result};
use boq_matcher_common::export::excel_core::{generate_table_buffer, DEFAULT_SHEET_NAME};
use boq_matcher_common::Table;
use std::path::Path;

pub fn write_table(table: &Table, output_path: &Path) -> Result<()> {
    let buffer =
        generate_table_buffer(table, DEFAULT_SHEET_NAME).map_err(MatcherError::ExcelGeneration)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
