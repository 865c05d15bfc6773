//! 統合テスト用の共通ヘルパー

#![allow(dead_code)]

use boq_matcher::error::{MatcherError, Result};
use boq_matcher::export::write_table;
use boq_matcher::matcher::{ChatBackend, ChatRequest};
use boq_matcher_common::{CellValue, Table};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

/// モデル名ごとに決まった応答を返すモック
#[derive(Default)]
pub struct CannedBackend {
    replies: HashMap<String, std::result::Result<String, String>>,
    pub requests: RefCell<Vec<ChatRequest>>,
}

impl CannedBackend {
    pub fn reply(mut self, model: &str, text: &str) -> Self {
        self.replies.insert(model.to_string(), Ok(text.to_string()));
        self
    }

    pub fn fail(mut self, model: &str, error: &str) -> Self {
        self.replies.insert(model.to_string(), Err(error.to_string()));
        self
    }
}

impl ChatBackend for CannedBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        self.requests.borrow_mut().push(request.clone());
        match self.replies.get(&request.model) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(error)) => Err(MatcherError::ApiCall(error.clone())),
            None => Err(MatcherError::ApiCall(format!("unknown model {}", request.model))),
        }
    }
}

pub fn text(s: &str) -> CellValue {
    CellValue::text(s)
}

/// 3件の有効明細と1件の "nan" 行を含む入力表
pub fn input_table() -> Table {
    Table::new(
        vec!["S.No".into(), "Description".into(), "Unit".into()],
        vec![
            vec![CellValue::Number(1.0), text("Brick work in CM 1:6, 230mm thick"), text("cum")],
            vec![CellValue::Number(2.0), text("nan"), text("sqm")],
            vec![CellValue::Number(3.0), text("Plaster 12 mm thick CM 1:4"), text("sqm")],
            vec![CellValue::Number(4.0), text("  Two coats of acrylic emulsion paint "), text("sqm")],
        ],
    )
}

/// 5件の参照明細
pub fn reference_table() -> Table {
    Table::new(
        vec!["Item".into(), "Description".into()],
        vec![
            vec![text("1.1"), text("Excavation in ordinary soil")],
            vec![text("1.2"), text("PCC 1:4:8, 100 mm thick")],
            vec![text("2.1"), text("Brickwork 230 mm in cement mortar 1:6")],
            vec![text("2.2"), text("Plaster 15 mm thick CM 1:6")],
            vec![text("3.1"), text("Acrylic emulsion paint, two coats")],
        ],
    )
}

pub fn write_fixture(table: &Table, path: &Path) {
    write_table(table, path).expect("fixture write failed");
}

/// 列名で列の値を取り出す（最後に一致した列）
pub fn column(table: &Table, name: &str) -> Vec<CellValue> {
    let col = table
        .headers
        .iter()
        .rposition(|h| h == name)
        .unwrap_or_else(|| panic!("column {} not found in {:?}", name, table.headers));
    table.rows.iter().map(|r| r[col].clone()).collect()
}
