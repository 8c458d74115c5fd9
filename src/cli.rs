use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "poetry-archive")]
#[command(about = "詩の原稿アーカイブ静的サイト生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// poems.json と原稿画像からサイトを生成
    Build {
        /// 入力JSONファイル
        #[arg(short, long, default_value = "poems.json")]
        input: PathBuf,

        /// 公開ディレクトリ（images/ と graphics/ を含む、出力先も兼ねる）
        #[arg(short, long, default_value = "public")]
        public: PathBuf,

        /// 出力形式 (html/json/both)
        #[arg(short, long, default_value = "html")]
        format: ExportFormat,

        /// カスタムトピック表（JSON）
        #[arg(long)]
        topics: Option<PathBuf>,
    },

    /// タグ・年の集計を表示
    Stats {
        /// 入力JSONファイル
        #[arg(short, long, default_value = "poems.json")]
        input: PathBuf,

        /// カスタムトピック表（JSON）
        #[arg(long)]
        topics: Option<PathBuf>,
    },

    /// テキストをタグ付けして表示
    Tag {
        /// 本文
        #[arg(required = true)]
        text: String,

        /// タイトル
        #[arg(short, long, default_value = "")]
        title: String,

        /// カスタムトピック表（JSON）
        #[arg(long)]
        topics: Option<PathBuf>,
    },

    /// 年表記を正規化して表示
    Year {
        /// 年表記（例: 1978, 3-78, 5/12）
        #[arg(required = true)]
        raw: String,
    },

    /// 有効なトピック表を表示
    Topics {
        /// カスタムトピック表（JSON）
        #[arg(long)]
        topics: Option<PathBuf>,

        /// JSON形式で出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// サイトタイトルを設定
        #[arg(long)]
        set_title: Option<String>,

        /// 著者表記を設定
        #[arg(long)]
        set_author: Option<String>,

        /// トピック表ファイルを設定
        #[arg(long)]
        set_topics: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Html,
    Json,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use html, json, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
