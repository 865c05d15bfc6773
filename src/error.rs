use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("OPENAI_API_KEY not found. Add it to .env or run `boq-match config --set-api-key YOUR_KEY`")]
    MissingApiKey,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read spreadsheet: {0}")]
    SpreadsheetRead(String),

    #[error("API call failed: {0}")]
    ApiCall(String),

    #[error("Failed to parse API response: {0}")]
    ApiParse(String),

    #[error("All models failed - check your account quota and billing")]
    AllModelsFailed,

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel generation error: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] boq_matcher_common::Error),
}

impl MatcherError {
    /// AI応答のデコード失敗かどうか
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            MatcherError::JsonParse(_)
                | MatcherError::Common(boq_matcher_common::Error::Json(_))
                | MatcherError::Common(boq_matcher_common::Error::Parse(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, MatcherError>;
