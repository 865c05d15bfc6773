use crate::config::Config;
use crate::pipeline::MatchJob;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boq-match")]
#[command(about = "工事BOQ明細のAI照合ツール", long_about = None)]
pub struct Cli {
    /// 省略時は match を設定値で実行
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 入力明細を参照BOQと照合してExcelを出力
    Match(MatchArgs),

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 候補モデルを設定（カンマ区切り、先頭から試行）
        #[arg(long, value_delimiter = ',')]
        set_models: Option<Vec<String>>,

        /// APIのベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Match(MatchArgs::default())
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct MatchArgs {
    /// 入力明細のExcelファイル
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// 参照BOQのExcelファイル
    #[arg(short, long)]
    pub reference: Option<PathBuf>,

    /// 出力Excelファイル（既存ファイルは上書き）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 候補モデル（複数指定可、指定順に試行）
    #[arg(short, long = "model")]
    pub models: Vec<String>,

    /// 入力ファイルの明細列名
    #[arg(long)]
    pub column: Option<String>,

    /// 参照ファイルの明細列名
    #[arg(long)]
    pub reference_column: Option<String>,
}

impl MatchArgs {
    /// 設定値に引数を上書きしてジョブを作る
    pub fn resolve(self, config: &Config) -> MatchJob {
        let mut job = MatchJob::from_config(config);

        if let Some(input) = self.input {
            job.input_path = input;
        }
        if let Some(reference) = self.reference {
            job.reference_path = reference;
        }
        if let Some(output) = self.output {
            job.output_path = output;
        }
        if !self.models.is_empty() {
            job.models = self.models;
        }
        if let Some(column) = self.column {
            job.input_column = column;
        }
        if let Some(column) = self.reference_column {
            job.reference_column = column;
        }

        job
    }
}
