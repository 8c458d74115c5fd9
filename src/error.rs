use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTML生成エラー: {0}")]
    HtmlGeneration(String),

    #[error("詩が見つかりません: {0}")]
    NoPoemsFound(String),

    #[error(transparent)]
    Common(#[from] poetry_archive_common::Error),
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
