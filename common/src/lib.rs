//! BOQ Matcher Common Library
//!
//! CLIから使われる入出力を伴わない処理:
//! 表データ、プロンプト生成、応答パース、照合結果の反映

pub mod annotate;
pub mod error;
pub mod export;
pub mod parser;
pub mod prompts;
pub mod table;
pub mod types;

pub use annotate::{
    annotate_matches, annotate_unmatched, Annotation, MATCHED_COLUMN, MATCHED_DESCRIPTION_COLUMN,
};
pub use error::{Error, Result};
pub use parser::{parse_match_response, strip_code_fence};
pub use prompts::{build_match_prompt, input_label, reference_label, SYSTEM_PROMPT};
pub use table::{extract_input_rows, extract_reference_descriptions, CellValue, InputRow, Table};
pub use types::{MatchRecord, MatchResult};
