//! プロンプト生成モジュール
//!
//! 入力明細と参照BOQ明細を1つの照合指示テキストにまとめる:
//! - SYSTEM_PROMPT: 役割設定（JSONのみで応答させる）
//! - build_match_prompt: 一括照合用プロンプト
//!
//! 分割（チャンク化）は行わない。明細数が多い場合はプロンプトがそのまま長くなる。

use crate::table::InputRow;

/// システムロール用の役割設定
pub const SYSTEM_PROMPT: &str =
    "You are a construction bill-of-quantities expert. Respond only in valid JSON format.";

/// 入力明細のラベル（0始まりのインデックスから `INPUT_<n>`）
pub fn input_label(index: usize) -> String {
    format!("INPUT_{}", index + 1)
}

/// 参照明細のラベル（0始まりのインデックスから `REF_<n>`）
pub fn reference_label(index: usize) -> String {
    format!("REF_{}", index + 1)
}

/// 一括照合プロンプト生成
///
/// # Arguments
/// * `inputs` - 照合対象の入力明細（並び順が `INPUT_<n>` の採番順）
/// * `references` - 参照BOQの明細テキスト
///
/// # Returns
/// ユーザーロールに渡すプロンプト文字列
pub fn build_match_prompt(inputs: &[InputRow], references: &[String]) -> String {
    let input_list = inputs
        .iter()
        .enumerate()
        .map(|(i, row)| format!("{}: {}", input_label(i), row.description))
        .collect::<Vec<_>>()
        .join("\n");

    let ref_list = references
        .iter()
        .enumerate()
        .map(|(i, desc)| format!("{}: {}", reference_label(i), desc))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a construction BOQ activity matching expert. Compare each INPUT description with ALL REFERENCE descriptions and find semantic matches.

## Matching rules
- Match only if both describe the SAME construction activity. Similar is not enough.
- Numeric qualifiers (mix ratios, thicknesses, sizes, grades and similar values) must be identical. If they differ, it is a different activity.
- Different wording, synonyms, abbreviations and typos are allowed.
- Analyze both sides before deciding.

INPUT DESCRIPTIONS TO MATCH:
{input_list}

REFERENCE DESCRIPTIONS:
{ref_list}

TASK: For each INPUT, find the best matching REFERENCE (if any).

RESPOND IN THIS EXACT JSON FORMAT:
{{
  "INPUT_1": {{"matched": true, "reference_id": "REF_5", "reference_text": "exact reference description here"}},
  "INPUT_2": {{"matched": false, "reference_id": "", "reference_text": ""}},
  "INPUT_3": {{"matched": true, "reference_id": "REF_2", "reference_text": "exact reference description here"}}
}}

Be precise. Only semantic matches for identical construction activities."#
    )
}
