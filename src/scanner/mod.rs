//! 公開ディレクトリの画像スキャン
//!
//! - `graphics/*.jpg`: 装飾画像（表紙・透かし・飾り罫）
//! - `images/book-*/*.jpg`: 原稿スキャン（冊子ごと）

use crate::error::{ArchiveError, Result};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "JPG", "JPEG"];

const BOOK_DIR_PREFIX: &str = "book-";

/// 原稿スキャン1ページ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageImage {
    /// 冊子ディレクトリ名（例: `book-1`）
    pub book: String,
    pub file_name: String,
    /// `images/` からの相対参照（例: `book-1/page-003.jpg`）
    #[serde(rename = "ref")]
    pub reference: String,
    /// 表示用ラベル（例: `Book 1 · Page 003`）
    pub label: String,
}

impl PageImage {
    fn new(book: &str, file_name: &str) -> Self {
        let reference = format!("{}/{}", book, file_name);
        let label = page_label(&reference);
        Self {
            book: book.to_string(),
            file_name: file_name.to_string(),
            reference,
            label,
        }
    }
}

/// スキャン結果
#[derive(Debug, Clone, Default)]
pub struct ImageAssets {
    /// `graphics/<file>` 形式（ファイル名順）
    pub graphics: Vec<String>,
    /// 冊子名→ファイル名順
    pub pages: Vec<PageImage>,
}

impl ImageAssets {
    /// 装飾画像をインデックスで取得（なければ None）
    pub fn graphic(&self, index: usize) -> Option<&str> {
        self.graphics.get(index).map(String::as_str)
    }

    /// 冊子ごとのページ数（冊子名順）
    pub fn book_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for page in &self.pages {
            match counts.last_mut() {
                Some((book, count)) if *book == page.book => *count += 1,
                _ => counts.push((page.book.as_str(), 1)),
            }
        }
        counts
    }
}

/// 公開ディレクトリをスキャンする
pub fn scan_public(public_dir: &Path) -> Result<ImageAssets> {
    if !public_dir.exists() {
        return Err(ArchiveError::FolderNotFound(public_dir.display().to_string()));
    }

    let graphics = scan_graphics(&public_dir.join("graphics"));
    let pages = scan_pages(&public_dir.join("images"))?;

    Ok(ImageAssets { graphics, pages })
}

/// 装飾画像一覧（ディレクトリがなければ空）
pub fn scan_graphics(graphics_dir: &Path) -> Vec<String> {
    if !graphics_dir.is_dir() {
        tracing::warn!(path = %graphics_dir.display(), "graphics directory not found; decorations omitted");
        return Vec::new();
    }

    let mut files = list_images(graphics_dir);
    files.sort();
    files.into_iter().map(|f| format!("graphics/{}", f)).collect()
}

/// 原稿スキャン一覧
pub fn scan_pages(images_dir: &Path) -> Result<Vec<PageImage>> {
    if !images_dir.is_dir() {
        return Err(ArchiveError::FolderNotFound(images_dir.display().to_string()));
    }

    let mut books: Vec<String> = WalkDir::new(images_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with(BOOK_DIR_PREFIX))
        .collect();
    books.sort();

    let mut pages = Vec::new();
    for book in &books {
        let mut files = list_images(&images_dir.join(book));
        files.sort();
        tracing::debug!(book = %book, pages = files.len(), "scanned book");
        pages.extend(files.iter().map(|f| PageImage::new(book, f)));
    }

    Ok(pages)
}

/// ディレクトリ直下の画像ファイル名（順不同）
fn list_images(dir: &Path) -> Vec<String> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)  // 直下のみ
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| is_image_extension(&ext.to_string_lossy()))
                .unwrap_or(false)
        })
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect()
}

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}

/// `book-2/page-014.jpg` → `Book 2 · Page 014`
pub fn page_label(reference: &str) -> String {
    lazy_static::lazy_static! {
        static ref EXTENSION_RE: Regex = Regex::new(r"(?i)\.jpe?g$").unwrap();
    }

    let label = reference
        .replacen("book-", "Book ", 1)
        .replacen('/', " · ", 1);
    let label = EXTENSION_RE.replace(&label, "").to_string();
    label.replacen("page-", "Page ", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("jpeg"));
        assert!(!is_image_extension("png"));
        assert!(!is_image_extension("txt"));
    }

    #[test]
    fn test_page_label() {
        assert_eq!(page_label("book-2/page-014.jpg"), "Book 2 · Page 014");
        assert_eq!(page_label("book-1/cover.JPG"), "Book 1 · cover");
    }

    #[test]
    fn test_scan_public_not_found() {
        let result = scan_public(Path::new("/nonexistent/public"));
        assert!(matches!(result, Err(ArchiveError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_pages_requires_images_dir() {
        let dir = tempdir().unwrap();
        let result = scan_public(dir.path());
        assert!(matches!(result, Err(ArchiveError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_graphics_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        assert!(scan_graphics(&dir.path().join("graphics")).is_empty());
    }

    #[test]
    fn test_scan_public_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let images = dir.path().join("images");
        let graphics = dir.path().join("graphics");
        fs::create_dir_all(images.join("book-2")).unwrap();
        fs::create_dir_all(images.join("book-1")).unwrap();
        fs::create_dir_all(images.join("scratch")).unwrap();
        fs::create_dir_all(&graphics).unwrap();

        File::create(images.join("book-2").join("page-001.jpg")).unwrap();
        File::create(images.join("book-1").join("page-002.jpg")).unwrap();
        File::create(images.join("book-1").join("page-001.jpg")).unwrap();
        File::create(images.join("book-1").join("notes.txt")).unwrap();
        File::create(images.join("scratch").join("page-009.jpg")).unwrap();
        File::create(graphics.join("b.jpg")).unwrap();
        File::create(graphics.join("a.jpg")).unwrap();
        File::create(graphics.join("readme.md")).unwrap();

        let assets = scan_public(dir.path()).unwrap();

        assert_eq!(assets.graphics, vec!["graphics/a.jpg", "graphics/b.jpg"]);
        let refs: Vec<&str> = assets.pages.iter().map(|p| p.reference.as_str()).collect();
        assert_eq!(
            refs,
            vec!["book-1/page-001.jpg", "book-1/page-002.jpg", "book-2/page-001.jpg"]
        );
        assert_eq!(assets.book_counts(), vec![("book-1", 2), ("book-2", 1)]);
        assert_eq!(assets.graphic(1), Some("graphics/b.jpg"));
        assert_eq!(assets.graphic(9), None);
    }
}
