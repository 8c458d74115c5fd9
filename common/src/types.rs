//! 詩データの型定義
//!
//! CLIとエクスポータで共有される型:
//! - RawPoem: poems.json の1レコード（入力）
//! - RawCollection: 原稿画像キー → 詩リスト（キー順を保持）
//! - EnrichedPoem: タグ・年・プレビューを付与した最終レコード
//! - ArchiveData: ソート済みの詩一覧とタグ/年の語彙

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 入力の詩レコード
///
/// `title`/`year` は欠損・型違いを許容する（数値は文字列化、それ以外は None）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPoem {
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl RawPoem {
    /// 本文が空白のみでないか
    pub fn has_content(&self) -> bool {
        self.content
            .as_deref()
            .map(|c| !c.trim().is_empty())
            .unwrap_or(false)
    }
}

/// 文字列・数値を Option<String> に、それ以外を None にする
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// 1枚の原稿画像から書き起こした詩のグループ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceGroup {
    /// 原稿画像キー（例: `book-1/page-003.jpg`）
    pub source_image: String,
    pub poems: Vec<RawPoem>,
}

/// poems.json 全体
///
/// JSONオブジェクトのキー順がそのままID採番順になるため、
/// HashMap ではなく出現順の Vec として保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCollection {
    pub groups: Vec<SourceGroup>,
}

impl RawCollection {
    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 全グループの詩の総数（空本文を含む）
    pub fn poem_count(&self) -> usize {
        self.groups.iter().map(|g| g.poems.len()).sum()
    }

    /// (原稿画像キー, 詩) を入力順に列挙
    pub fn iter_poems(&self) -> impl Iterator<Item = (&str, &RawPoem)> {
        self.groups
            .iter()
            .flat_map(|g| g.poems.iter().map(move |p| (g.source_image.as_str(), p)))
    }
}

impl<'de> Deserialize<'de> for RawCollection {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = RawCollection;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of source image to a list of poems")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut groups = Vec::new();
                while let Some((source_image, poems)) = map.next_entry::<String, Vec<RawPoem>>()? {
                    groups.push(SourceGroup { source_image, poems });
                }
                Ok(RawCollection { groups })
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}

impl Serialize for RawCollection {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.source_image, &group.poems)?;
        }
        map.end()
    }
}

/// メタデータ付与済みの詩
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPoem {
    /// 1始まりの連番（フィルタ後の入力順、ソート後も不変）
    pub id: u32,

    pub title: String,

    pub content: String,

    /// 書き起こし元の原稿画像キー
    pub source_image: String,

    /// トピック表の宣言順
    pub tags: Vec<String>,

    pub parsed_year: Option<u32>,

    /// 入力の年表記（そのまま）
    #[serde(default)]
    pub year_raw: Option<String>,

    pub preview: String,

    pub slug: String,
}

/// ソート済みアーカイブ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveData {
    /// 年昇順（年なしは末尾）
    pub poems: Vec<EnrichedPoem>,
    /// 重複なし・昇順
    pub years: Vec<u32>,
    /// 重複なし・辞書順
    pub all_tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_collection_preserves_key_order() {
        let json = r#"{
            "page-9.jpg": [{"title": "Z", "content": "last key alphabetically"}],
            "page-1.jpg": [{"title": "A", "content": "first key alphabetically"}]
        }"#;

        let collection = RawCollection::from_json(json).expect("パース失敗");
        assert_eq!(collection.groups.len(), 2);
        assert_eq!(collection.groups[0].source_image, "page-9.jpg");
        assert_eq!(collection.groups[1].source_image, "page-1.jpg");
    }

    #[test]
    fn test_raw_poem_lenient_fields() {
        let json = r#"{
            "a.jpg": [
                {"content": "body", "year": 1978},
                {"content": "body", "title": ["not", "text"], "year": null},
                {"content": "body"}
            ]
        }"#;

        let collection = RawCollection::from_json(json).expect("パース失敗");
        let poems = &collection.groups[0].poems;
        assert_eq!(poems[0].year.as_deref(), Some("1978"));
        assert_eq!(poems[1].title, None);
        assert_eq!(poems[1].year, None);
        assert_eq!(poems[2], RawPoem { content: Some("body".into()), ..Default::default() });
    }

    #[test]
    fn test_raw_poem_has_content() {
        let blank = RawPoem { content: Some(" \n\t ".into()), ..Default::default() };
        let missing = RawPoem::default();
        let present = RawPoem { content: Some("A line".into()), ..Default::default() };

        assert!(!blank.has_content());
        assert!(!missing.has_content());
        assert!(present.has_content());
    }

    #[test]
    fn test_raw_collection_rejects_non_map() {
        assert!(RawCollection::from_json("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_raw_collection_serialize_keeps_order() {
        let collection = RawCollection {
            groups: vec![
                SourceGroup { source_image: "b.jpg".into(), poems: vec![] },
                SourceGroup { source_image: "a.jpg".into(), poems: vec![] },
            ],
        };

        let json = serde_json::to_string(&collection).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"b.jpg":[],"a.jpg":[]}"#);
    }

    #[test]
    fn test_enriched_poem_serialize_camel_case() {
        let poem = EnrichedPoem {
            id: 1,
            title: "Untitled".into(),
            content: "x".into(),
            source_image: "a.jpg".into(),
            tags: vec![],
            parsed_year: Some(1978),
            year_raw: Some("3-78".into()),
            preview: "x".into(),
            slug: "poem-1".into(),
        };

        let json = serde_json::to_string(&poem).expect("シリアライズ失敗");
        assert!(json.contains("\"sourceImage\":\"a.jpg\""));
        assert!(json.contains("\"parsedYear\":1978"));
        assert!(json.contains("\"yearRaw\":\"3-78\""));
    }
}
