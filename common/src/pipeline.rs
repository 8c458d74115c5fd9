//! メタデータ付与パイプライン
//!
//! ## 処理フロー
//! 1. 空本文の詩を除外し、入力順に1始まりのIDを採番
//! 2. タグ・年・プレビュー・スラッグを付与
//! 3. 年昇順で安定ソート（年なしは末尾）
//! 4. 年・タグの語彙を重複なしで集計

use crate::classifier::Classifier;
use crate::preview::{preview, slug, DEFAULT_PREVIEW_LENGTH};
use crate::types::{ArchiveData, EnrichedPoem, RawCollection, RawPoem};
use crate::year::parse_year;
use std::collections::{BTreeSet, HashMap};

/// タイトル欠損時の表示名
pub const UNTITLED: &str = "Untitled";

/// パイプラインのオプション
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// プレビューの最大文字数
    pub preview_length: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }
}

/// パイプライン全体を実行する
///
/// # Arguments
/// * `collection` - poems.json の内容
/// * `classifier` - トピック分類器
/// * `options` - パイプラインオプション
///
/// # Returns
/// ソート済みの詩一覧と年・タグの語彙
pub fn build_archive(
    collection: &RawCollection,
    classifier: &Classifier,
    options: &PipelineOptions,
) -> ArchiveData {
    let mut poems = enrich_poems(collection, classifier, options);
    sort_by_year(&mut poems);

    let years = collect_years(&poems);
    let all_tags = collect_tags(&poems);

    tracing::debug!(
        poems = poems.len(),
        years = years.len(),
        tags = all_tags.len(),
        "archive built"
    );

    ArchiveData {
        poems,
        years,
        all_tags,
    }
}

/// 空本文を除外してメタデータを付与する（入力順のまま）
pub fn enrich_poems(
    collection: &RawCollection,
    classifier: &Classifier,
    options: &PipelineOptions,
) -> Vec<EnrichedPoem> {
    let mut poems = Vec::with_capacity(collection.poem_count());

    for (source_image, raw) in collection.iter_poems() {
        if !raw.has_content() {
            tracing::debug!(source_image, title = ?raw.title, "skipping poem with empty content");
            continue;
        }

        let id = poems.len() as u32 + 1;
        poems.push(enrich_poem(id, source_image, raw, classifier, options));
    }

    poems
}

/// 1件の詩にメタデータを付与する
///
/// 呼び出し側で本文が空でないことを確認済みであること。
pub fn enrich_poem(
    id: u32,
    source_image: &str,
    raw: &RawPoem,
    classifier: &Classifier,
    options: &PipelineOptions,
) -> EnrichedPoem {
    let content = raw.content.clone().unwrap_or_default();
    let raw_title = raw.title.as_deref().unwrap_or("");

    let tags = classifier.tag(raw_title, &content);
    let title = if raw_title.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        raw_title.to_string()
    };

    EnrichedPoem {
        id,
        title,
        preview: preview(&content, options.preview_length),
        content,
        source_image: source_image.to_string(),
        tags,
        parsed_year: parse_year(raw.year.as_deref()),
        year_raw: raw.year.clone(),
        slug: slug(id),
    }
}

/// 年昇順の安定ソート（年なしは最後、同年内は元の順序）
pub fn sort_by_year(poems: &mut [EnrichedPoem]) {
    poems.sort_by_key(|p| (p.parsed_year.is_none(), p.parsed_year));
}

/// 出現する年を昇順で重複なく集める
pub fn collect_years(poems: &[EnrichedPoem]) -> Vec<u32> {
    poems
        .iter()
        .filter_map(|p| p.parsed_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 出現するタグを辞書順で重複なく集める
pub fn collect_tags(poems: &[EnrichedPoem]) -> Vec<String> {
    poems
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// タグごとの詩の件数（件数降順、同数はタグ名順）
pub fn tag_counts(poems: &[EnrichedPoem]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in poems.iter().flat_map(|p| p.tags.iter()) {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// 年ごとの詩の件数（年昇順）
pub fn year_counts(poems: &[EnrichedPoem]) -> Vec<(u32, usize)> {
    let mut counts: std::collections::BTreeMap<u32, usize> = std::collections::BTreeMap::new();
    for year in poems.iter().filter_map(|p| p.parsed_year) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}
