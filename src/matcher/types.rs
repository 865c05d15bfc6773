use serde::{Deserialize, Serialize};

/// チャットメッセージ（OpenAI互換）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".into(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into() }
    }
}

/// chat/completions リクエスト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// 応答長上限と温度
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            max_tokens: 8000,
            temperature: 0.1,
        }
    }
}

/// chat/completions レスポンス
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// APIエラーレスポンス
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

/// 成功した候補モデルと応答テキスト
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub model: String,
    pub text: String,
}

/// モデル試行の経過
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptEvent {
    Trying { model: String },
    Failed { model: String, error: String },
    Succeeded { model: String },
}
