//! 表データモジュール
//!
//! スプレッドシートの1シート分を行指向で保持する:
//! - CellValue: セル値（型付き）
//! - Table: ヘッダー行 + データ行
//! - InputRow: 照合対象となる入力明細（元の行位置を保持）

use crate::error::{Error, Result};
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

/// 欠損値として扱うテキスト表現
pub const MISSING_PLACEHOLDER: &str = "nan";

/// セル値
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excelシリアル値（日付書式で書き戻す）
    DateTime(f64),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// セル値のテキスト表現
    ///
    /// 空セルは欠損値プレースホルダ（"nan"）、日時は "YYYY-MM-DD HH:MM:SS" になる
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => MISSING_PLACEHOLDER.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::DateTime(serial) => {
                serial_to_datetime_text(*serial).unwrap_or_else(|| serial.to_string())
            }
            CellValue::Bool(b) => String::from(if *b { "True" } else { "False" }),
        }
    }
}

/// Excelシリアル値（1900年基準）を日時文字列に変換
///
/// 範囲外・負値は `None`
fn serial_to_datetime_text(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    let datetime = epoch.checked_add_signed(TimeDelta::try_seconds(seconds)?)?;

    Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// 1シート分の表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// ヘッダーと行から表を作成（各行をヘッダー幅に揃える）
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut table = Self { headers, rows };
        table.align_rows();
        table
    }

    fn align_rows(&mut self) {
        let width = self
            .rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len());

        while self.headers.len() < width {
            let index = self.headers.len();
            self.headers.push(format!("Unnamed: {}", index));
        }
        for row in &mut self.rows {
            row.resize(width, CellValue::Empty);
        }
    }

    /// データ行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列数
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// 列名から列番号を取得（完全一致・先頭優先）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// 末尾に1列追加した新しい表を返す
    ///
    /// `values` が行数より短い場合は空セルで埋める
    pub fn with_column(&self, header: &str, values: Vec<CellValue>) -> Table {
        let mut headers = self.headers.clone();
        headers.push(header.to_string());

        let mut values = values.into_iter();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.push(values.next().unwrap_or_default());
                row
            })
            .collect();

        Table { headers, rows }
    }
}

/// 照合対象の入力明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRow {
    /// 元の表での行位置（0始まり、ヘッダー除く）
    pub position: usize,
    /// 前後空白を除去した明細テキスト
    pub description: String,
}

/// 入力表から照合対象の明細を抽出
///
/// 空文字・"nan" の行は除外するが、元の行位置は保持する。
/// 戻り値の並び順がそのまま `INPUT_<n>` の採番順になる。
pub fn extract_input_rows(table: &Table, column: &str) -> Result<Vec<InputRow>> {
    let col = table
        .column_index(column)
        .ok_or_else(|| Error::MissingColumn(column.to_string()))?;

    let rows = table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(position, row)| {
            let text = row.get(col).map(CellValue::to_text).unwrap_or_default();
            let description = text.trim();
            if description.is_empty() || description == MISSING_PLACEHOLDER {
                None
            } else {
                Some(InputRow {
                    position,
                    description: description.to_string(),
                })
            }
        })
        .collect();

    Ok(rows)
}

/// 参照表から明細テキストを抽出
///
/// 空セルのみ除外し、重複・順序はそのまま保持する
pub fn extract_reference_descriptions(table: &Table, column: &str) -> Result<Vec<String>> {
    let col = table
        .column_index(column)
        .ok_or_else(|| Error::MissingColumn(column.to_string()))?;

    Ok(table
        .rows
        .iter()
        .filter_map(|row| row.get(col))
        .filter(|cell| !cell.is_empty())
        .map(CellValue::to_text)
        .collect())
}
