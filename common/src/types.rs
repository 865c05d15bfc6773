//! 照合結果の型定義
//!
//! - MatchRecord: 入力明細1件分の照合結果
//! - MatchResult: `INPUT_<n>` をキーとする照合結果一式

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// 入力明細1件分の照合結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRecord {
    pub matched: bool,
    pub reference_id: String,
    pub reference_text: String,
}

impl MatchRecord {
    /// JSON値から寛容に読み取る
    ///
    /// `matched` は真偽値のほか、文字列 "true"（大小文字問わず）と0以外の数値も一致とみなす。
    /// 型が合わないフィールドは既定値（未一致・空文字）になる
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            matched: value.get("matched").map(is_truthy).unwrap_or(false),
            reference_id: text("reference_id"),
            reference_text: text("reference_text"),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

/// AI応答から得た照合結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    records: HashMap<String, MatchRecord>,
}

impl MatchResult {
    pub fn new(records: HashMap<String, MatchRecord>) -> Self {
        Self { records }
    }

    /// ラベル（`INPUT_<n>`）で直接引く
    pub fn get(&self, label: &str) -> Option<&MatchRecord> {
        self.records.get(label)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 一致とされた件数
    pub fn matched_count(&self) -> usize {
        self.records.values().filter(|r| r.matched).count()
    }
}

impl FromIterator<(String, MatchRecord)> for MatchResult {
    fn from_iter<I: IntoIterator<Item = (String, MatchRecord)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
