//! APIレスポンスパーサー
//!
//! 応答テキストからコードフェンスを除去し、
//! `INPUT_<n>` をキーとするJSONオブジェクトとして照合結果をパースする

use crate::error::{Error, Result};
use crate::types::{MatchRecord, MatchResult};
use serde_json::Value;

const FENCE: &str = "```";

/// 応答テキストからコードフェンスを除去
///
/// 先頭が ``` で始まる場合のみ対象とする:
/// 1. 言語タグ（`json` など英数字のみ、省略可）を読み飛ばす
/// 2. 最初の閉じフェンスまでを本文とする（2つ目以降のブロックは無視）
/// 3. 閉じフェンスがなければフェンスなしとして扱う
///
/// # Examples
/// ```
/// use boq_matcher_common::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
/// assert_eq!(strip_code_fence("  {}  "), "{}");
/// ```
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(after_open) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let body = after_open.trim_start_matches(|c: char| c.is_ascii_alphanumeric());

    match body.find(FENCE) {
        Some(end) => body[..end].trim(),
        None => trimmed,
    }
}

/// 照合応答をパース
///
/// # Arguments
/// * `response` - AIの応答テキスト（フェンス付きでも可）
///
/// # Returns
/// * `Ok(MatchResult)` - パース成功
/// * `Err(Error::Json)` - JSONとして不正
/// * `Err(Error::Parse)` - トップレベルがオブジェクトでない
pub fn parse_match_response(response: &str) -> Result<MatchResult> {
    let json_str = strip_code_fence(response);
    let value: Value = serde_json::from_str(json_str)?;

    let Value::Object(map) = value else {
        return Err(Error::Parse(
            "応答のトップレベルがJSONオブジェクトではありません".into(),
        ));
    };

    Ok(map
        .iter()
        .map(|(label, entry)| (label.clone(), MatchRecord::from_value(entry)))
        .collect())
}
