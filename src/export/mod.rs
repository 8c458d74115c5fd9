pub mod html;
pub mod json;

use crate::cli::ExportFormat;
use crate::config::Config;
use crate::error::Result;
use crate::scanner::ImageAssets;
use poetry_archive_common::ArchiveData;
use std::path::{Path, PathBuf};

/// ページに埋め込むサイト情報
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub title: String,
    pub author_line: String,
    pub footer_line: String,
}

impl From<&Config> for SiteInfo {
    fn from(config: &Config) -> Self {
        Self {
            title: config.site_title.clone(),
            author_line: config.author_line.clone(),
            footer_line: config.footer_line.clone(),
        }
    }
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

pub fn export_archive(
    data: &ArchiveData,
    assets: &ImageAssets,
    site: &SiteInfo,
    format: &ExportFormat,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();

    if matches!(format, ExportFormat::Html | ExportFormat::Both) {
        println!("- HTMLを生成中...");
        let path = html::generate_html(data, assets, site, output_dir)?;
        println!("✔ HTML出力: {}", path.display());
        written.push(path);
    }

    if matches!(format, ExportFormat::Json | ExportFormat::Both) {
        println!("- JSONを生成中...");
        let path = json::generate_json(data, output_dir)?;
        println!("✔ JSON出力: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
