//! OpenAI互換 chat/completions API連携
//!
//! DeepSeekなど同じ形式のエンドポイントに対して1回のリクエストを送る

use super::types::{ChatRequest, ChatResponse, ErrorResponse};
use super::ChatBackend;
use crate::error::{MatcherError, Result};
use std::time::Duration;

pub struct OpenAiCompatibleBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiCompatibleBackend {
    pub fn new(base_url: &str, api_key: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| MatcherError::ApiCall(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl ChatBackend for OpenAiCompatibleBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let url = self.endpoint();
        tracing::debug!("POST {} (model: {})", url, request.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| MatcherError::ApiCall(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MatcherError::ApiCall(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(MatcherError::ApiCall(format!("{}: {}", status, message)));
        }

        extract_reply(&body)
    }
}

/// レスポンス本文から最初の選択肢のテキストを取り出す
fn extract_reply(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| MatcherError::ApiParse(format!("unexpected response body: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| MatcherError::ApiParse("empty response".into()))
}
