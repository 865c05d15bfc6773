//! 照合API呼び出し
//!
//! 候補モデルを先頭から順に試し、最初に成功した応答を返す。
//! リトライ・バックオフはなく、失敗したモデルは次の候補に置き換わるだけ。

mod openai;
mod types;

pub use openai::OpenAiCompatibleBackend;
pub use types::{AttemptEvent, ChatMessage, ChatRequest, Completion, CompletionSettings};

use crate::error::{MatcherError, Result};

/// ログに出すエラーメッセージの最大文字数
pub const ERROR_PREVIEW_CHARS: usize = 100;

/// チャット補完のバックエンド
#[allow(async_fn_in_trait)]
pub trait ChatBackend {
    /// 1回のリクエストを送り、応答テキストを返す
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// 候補モデルを順に試行
///
/// `on_event` には Trying → (Failed | Succeeded) の順で経過が渡される
pub async fn complete_with_fallback<B, F>(
    backend: &B,
    models: &[String],
    messages: &[ChatMessage],
    settings: CompletionSettings,
    mut on_event: F,
) -> Result<Completion>
where
    B: ChatBackend,
    F: FnMut(&AttemptEvent),
{
    for model in models {
        on_event(&AttemptEvent::Trying { model: model.clone() });

        let request = ChatRequest {
            model: model.clone(),
            messages: messages.to_vec(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        };

        match backend.complete(&request).await {
            Ok(text) => {
                on_event(&AttemptEvent::Succeeded { model: model.clone() });
                return Ok(Completion {
                    model: model.clone(),
                    text,
                });
            }
            Err(e) => {
                tracing::debug!("model {} failed: {}", model, e);
                on_event(&AttemptEvent::Failed {
                    model: model.clone(),
                    error: truncate_chars(&e.to_string(), ERROR_PREVIEW_CHARS),
                });
            }
        }
    }

    Err(MatcherError::AllModelsFailed)
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
