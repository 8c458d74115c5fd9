//! 詩データ（JSON）出力

use crate::error::Result;
use poetry_archive_common::ArchiveData;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const JSON_FILE_NAME: &str = "archive.json";

pub fn json_path(output_dir: &Path) -> PathBuf {
    output_dir.join(JSON_FILE_NAME)
}

/// ソート済みの詩一覧と `allTags`・`years` を書き出す
pub fn generate_json(data: &ArchiveData, output_dir: &Path) -> Result<PathBuf> {
    let path = json_path(output_dir);
    let writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(writer, data)?;
    Ok(path)
}
