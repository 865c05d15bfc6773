//! 照合結果の書き込み
//!
//! 入力表の末尾に「Matched」「Matched Description」の2列を追加する。
//! 除外行・未一致行は常に "No" / "" になる。

use crate::prompts::input_label;
use crate::table::{CellValue, InputRow, Table};
use crate::types::MatchResult;

pub const MATCHED_COLUMN: &str = "Matched";
pub const MATCHED_DESCRIPTION_COLUMN: &str = "Matched Description";

pub const FLAG_YES: &str = "Yes";
pub const FLAG_NO: &str = "No";

/// 注釈付きの表と一致件数
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub table: Table,
    pub matched: usize,
}

/// 照合結果を入力表に反映
///
/// `rows[i]` は `INPUT_<i+1>` に対応する（抽出時の並び順を保つこと）
pub fn annotate_matches(table: &Table, rows: &[InputRow], matches: &MatchResult) -> Annotation {
    let mut flags = vec![CellValue::text(FLAG_NO); table.len()];
    let mut descriptions = vec![CellValue::text(""); table.len()];
    let mut matched = 0;

    for (i, row) in rows.iter().enumerate() {
        let Some(record) = matches.get(&input_label(i)) else {
            continue;
        };
        if !record.matched || row.position >= table.len() {
            continue;
        }

        flags[row.position] = CellValue::text(FLAG_YES);
        descriptions[row.position] = CellValue::text(record.reference_text.clone());
        matched += 1;
    }

    let table = table
        .with_column(MATCHED_COLUMN, flags)
        .with_column(MATCHED_DESCRIPTION_COLUMN, descriptions);

    Annotation { table, matched }
}

/// 全行を未一致として2列を追加（照合失敗時の出力用）
pub fn annotate_unmatched(table: &Table) -> Table {
    annotate_matches(table, &[], &MatchResult::default()).table
}
