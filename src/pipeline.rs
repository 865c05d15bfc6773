//! 照合パイプライン
//!
//! 読み込み → プロンプト生成 → API呼び出し → 結果反映・書き出し の一本道。
//! 入力表を読めた後は、途中で何が失敗しても全行「未一致」の出力ファイルを必ず書く。

use crate::config::Config;
use crate::error::Result;
use crate::export;
use crate::loader;
use crate::matcher::{
    complete_with_fallback, AttemptEvent, ChatBackend, ChatMessage, CompletionSettings,
};
use boq_matcher_common::{
    annotate_matches, annotate_unmatched, build_match_prompt, extract_input_rows,
    extract_reference_descriptions, parse_match_response, Table, SYSTEM_PROMPT,
};
use std::path::PathBuf;

/// 1回の照合処理の入力一式
#[derive(Debug, Clone, PartialEq)]
pub struct MatchJob {
    pub input_path: PathBuf,
    pub reference_path: PathBuf,
    pub output_path: PathBuf,
    pub input_column: String,
    pub reference_column: String,
    pub models: Vec<String>,
    pub settings: CompletionSettings,
}

impl MatchJob {
    pub fn from_config(config: &Config) -> Self {
        Self {
            input_path: config.input_path.clone(),
            reference_path: config.reference_path.clone(),
            output_path: config.output_path.clone(),
            input_column: config.input_column.clone(),
            reference_column: config.reference_column.clone(),
            models: config.models.clone(),
            settings: CompletionSettings {
                max_tokens: config.max_tokens,
                temperature: config.temperature,
            },
        }
    }
}

/// 処理結果
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub output_path: PathBuf,
    /// 照合対象になった明細数
    pub considered: usize,
    pub matched: usize,
    /// 応答を返したモデル
    pub model: Option<String>,
    /// 照合に失敗して全行未一致で出力した場合、その理由
    pub degraded: Option<String>,
}

/// パイプラインを実行
///
/// 入力表の読み込み失敗と、未一致版の書き出し失敗だけが `Err` になる
pub async fn run<B: ChatBackend>(job: &MatchJob, backend: &B) -> Result<RunReport> {
    let input = loader::read_table(&job.input_path)?;
    println!("✓ Loaded {} input rows from {}", input.len(), job.input_path.display());

    match match_and_write(job, backend, &input).await {
        Ok(report) => Ok(report),
        Err(e) => {
            if e.is_decode_error() {
                println!("❌ Error parsing JSON response: {}", e);
            } else {
                println!("❌ Error: {}", e);
            }
            println!("Creating output file with no matches...");

            export::write_table(&annotate_unmatched(&input), &job.output_path)?;
            println!("💾 Output saved to: {}", job.output_path.display());

            Ok(RunReport {
                output_path: job.output_path.clone(),
                considered: 0,
                matched: 0,
                model: None,
                degraded: Some(e.to_string()),
            })
        }
    }
}

async fn match_and_write<B: ChatBackend>(
    job: &MatchJob,
    backend: &B,
    input: &Table,
) -> Result<RunReport> {
    let rows = extract_input_rows(input, &job.input_column)?;

    let reference = loader::read_table(&job.reference_path)?;
    let references = extract_reference_descriptions(&reference, &job.reference_column)?;
    println!(
        "✓ Prepared {} input descriptions and {} reference descriptions",
        rows.len(),
        references.len()
    );

    let prompt = build_match_prompt(&rows, &references);
    tracing::debug!("prompt length: {} chars", prompt.chars().count());

    let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];

    println!("🔄 Sending batch request...");
    let completion =
        complete_with_fallback(backend, &job.models, &messages, job.settings, report_attempt)
            .await?;
    println!("✓ Received response");

    let preview: String = completion.text.chars().take(500).collect();
    tracing::debug!("response preview: {}", preview);

    let matches = parse_match_response(&completion.text)?;
    println!("✓ Parsed matching results");

    let annotation = annotate_matches(input, &rows, &matches);
    export::write_table(&annotation.table, &job.output_path)?;

    println!("✅ COMPLETE!");
    println!(
        "📊 Results: {}/{} descriptions matched",
        annotation.matched,
        rows.len()
    );
    println!("💾 Output saved to: {}", job.output_path.display());

    Ok(RunReport {
        output_path: job.output_path.clone(),
        considered: rows.len(),
        matched: annotation.matched,
        model: Some(completion.model),
        degraded: None,
    })
}

/// モデル試行の経過を1行で表す
pub fn attempt_line(event: &AttemptEvent) -> String {
    match event {
        AttemptEvent::Trying { model } => format!("Trying model: {}", model),
        AttemptEvent::Failed { model, error } => format!("✗ Failed with {}: {}...", model, error),
        AttemptEvent::Succeeded { model } => format!("✓ Success with {}", model),
    }
}

fn report_attempt(event: &AttemptEvent) {
    println!("{}", attempt_line(event));
}
