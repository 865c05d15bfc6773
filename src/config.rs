use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// APIキーを読む環境変数
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    /// 候補モデル（先頭から順に試行）
    pub models: Vec<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
    pub input_path: PathBuf,
    pub reference_path: PathBuf,
    pub output_path: PathBuf,
    pub input_column: String,
    pub reference_column: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MatcherError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("boq-matcher").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.deepseek.com".into(),
            models: vec!["deepseek-chat".into()],
            max_tokens: 8000,
            temperature: 0.1,
            timeout_seconds: 300,
            input_path: PathBuf::from("SUBWAY TEST.xlsx"),
            reference_path: PathBuf::from("detailed BoQ .xls"),
            output_path: PathBuf::from("output_matched_gpt4.xlsx"),
            input_column: "Description".into(),
            reference_column: "Description".into(),
        }
    }

    /// APIキーを取得（環境変数 → 設定ファイルの順）
    ///
    /// 空文字は未設定として扱う
    pub fn get_api_key(&self) -> Result<String> {
        resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    pub fn set_models(&mut self, models: Vec<String>) -> Result<()> {
        let models: Vec<String> = models
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        if models.is_empty() {
            return Err(MatcherError::Config("at least one model is required".into()));
        }
        self.models = models;
        self.save()
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        self.base_url = url;
        self.save()
    }
}

/// カレントディレクトリの .env を読み込む（存在しなければ何もしない）
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("failed to load .env: {}", e),
    }
}

fn resolve_api_key(env_value: Option<String>, configured: Option<&str>) -> Result<String> {
    env_value
        .filter(|k| !k.trim().is_empty())
        .or_else(|| {
            configured
                .filter(|k| !k.trim().is_empty())
                .map(str::to_string)
        })
        .ok_or(MatcherError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://api.deepseek.com");
        assert_eq!(config.models, vec!["deepseek-chat"]);
        assert_eq!(config.max_tokens, 8000);
        assert!((config.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.input_column, "Description");
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"models": ["a", "b"]}"#).unwrap();
        assert_eq!(config.models, vec!["a", "b"]);
        assert_eq!(config.max_tokens, 8000);
        assert_eq!(config.output_path, PathBuf::from("output_matched_gpt4.xlsx"));
    }

    #[test]
    fn test_resolve_api_key_env_first() {
        let key = resolve_api_key(Some("env-key".into()), Some("file-key")).unwrap();
        assert_eq!(key, "env-key");
    }

    #[test]
    fn test_resolve_api_key_falls_back_to_config() {
        let key = resolve_api_key(Some("  ".into()), Some("file-key")).unwrap();
        assert_eq!(key, "file-key");
    }

    #[test]
    fn test_resolve_api_key_missing() {
        let result = resolve_api_key(None, Some(""));
        assert!(matches!(result, Err(MatcherError::MissingApiKey)));
    }
}
