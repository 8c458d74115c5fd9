//! サイト生成の一括処理
//!
//! 読み込み → メタデータ付与・ソート → 画像スキャン → 出力

use crate::cli::ExportFormat;
use crate::error::{ArchiveError, Result};
use crate::export::{self, SiteInfo};
use crate::loader;
use crate::scanner::{self, ImageAssets};
use poetry_archive_common::{build_archive, ArchiveData, Classifier, PipelineOptions, TopicTable};
use std::path::{Path, PathBuf};

/// 生成オプション
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub input: PathBuf,
    /// images/・graphics/ を含む公開ディレクトリ（出力先）
    pub public_dir: PathBuf,
    pub format: ExportFormat,
    pub site: SiteInfo,
    pub pipeline: PipelineOptions,
}

/// 生成結果
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub data: ArchiveData,
    pub assets: ImageAssets,
    pub written: Vec<PathBuf>,
}

impl BuildSummary {
    /// 年の範囲（最古, 最新）
    pub fn year_range(&self) -> Option<(u32, u32)> {
        Some((*self.data.years.first()?, *self.data.years.last()?))
    }
}

/// poems.json を読み込みアーカイブを構築する
pub fn load_archive(input: &Path, table: &TopicTable, options: &PipelineOptions) -> Result<ArchiveData> {
    let collection = loader::load_poems(input)?;
    let classifier = Classifier::new(table);
    Ok(build_archive(&collection, &classifier, options))
}

pub fn build_site(options: &BuildOptions, table: &TopicTable) -> Result<BuildSummary> {
    println!("[1/3] 詩を読み込み中...");
    let data = load_archive(&options.input, table, &options.pipeline)?;
    if data.poems.is_empty() {
        return Err(ArchiveError::NoPoemsFound(options.input.display().to_string()));
    }
    println!("✔ {}篇の詩を検出\n", data.poems.len());

    println!("[2/3] 画像をスキャン中...");
    let assets = scanner::scan_public(&options.public_dir)?;
    println!(
        "✔ 原稿{}ページ・装飾画像{}点を検出\n",
        assets.pages.len(),
        assets.graphics.len()
    );

    println!("[3/3] エクスポート中...");
    let written = export::export_archive(
        &data,
        &assets,
        &options.site,
        &options.format,
        &options.public_dir,
    )?;

    Ok(BuildSummary { data, assets, written })
}
