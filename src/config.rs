use crate::error::{ArchiveError, Result};
use poetry_archive_common::preview::DEFAULT_PREVIEW_LENGTH;
use poetry_archive_common::TopicTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// トピック表ファイルの環境変数
pub const TOPICS_ENV: &str = "POETRY_ARCHIVE_TOPICS";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ページ見出し・<title>
    pub site_title: String,
    /// 見出し下の著者表記
    pub author_line: String,
    /// フッターの一文
    pub footer_line: String,
    pub preview_length: usize,
    /// カスタムトピック表（JSON）
    pub topics_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定パスから読み込み（存在しなければ既定値）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ArchiveError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("poetry-archive").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            site_title: "A Melody of Thought".into(),
            author_line: "J. Leland Hall · 1942–1995".into(),
            footer_line: "The poetry of J. Leland Hall".into(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
            topics_file: None,
        }
    }

    /// 使用するトピック表ファイル
    ///
    /// 優先順位: 引数 > 環境変数 > 設定ファイル
    pub fn topics_path(&self, override_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = override_path {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(TOPICS_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        self.topics_file.clone()
    }

    /// トピック表を読み込む（指定がなければ組み込み表）
    pub fn load_topics(&self, override_path: Option<&Path>) -> Result<TopicTable> {
        match self.topics_path(override_path) {
            Some(path) => {
                if !path.exists() {
                    return Err(ArchiveError::FileNotFound(path.display().to_string()));
                }
                tracing::debug!(path = %path.display(), "loading topic table");
                Ok(TopicTable::from_file(&path)?)
            }
            None => Ok(TopicTable::builtin()),
        }
    }

    pub fn set_site_title(&mut self, title: String) -> Result<()> {
        self.site_title = title;
        self.save()
    }

    pub fn set_author_line(&mut self, author: String) -> Result<()> {
        self.author_line = author;
        self.save()
    }

    pub fn set_topics_file(&mut self, path: PathBuf) -> Result<()> {
        // 保存前に検証
        TopicTable::from_file(&path)?;
        self.topics_file = Some(path);
        self.save()
    }
}
