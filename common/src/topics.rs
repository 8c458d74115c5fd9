//! トピック表モジュール
//!
//! トピック名 → キーワード一覧の対応表。宣言順がそのまま
//! 詩ごとのタグ順になるため、順序付きのリストとして保持する。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 組み込みトピック表（宣言順を変えないこと）
pub const DEFAULT_TOPICS: &[(&str, &[&str])] = &[
    ("christ", &["jesus", "christ", "saviour", "savior", "calvary", "cross", "crucified", "resurrection"]),
    ("prayer", &["prayer", "praying", "pray to", "kneel", "supplication"]),
    ("salvation", &["salvation", "redeem", "saved", "forgiven", "repent", "repentance", "born again", "souls"]),
    ("heaven", &["heaven", "heavenly", "paradise", "glory land", "eternal home", "eternal life"]),
    ("scripture", &["bible", "scripture", "gospel", "psalm", "the book", "the word"]),
    ("church", &["church", "congregation", "preacher", "sermon", "sunday school", "baptist"]),
    ("mother", &["mother", "mama", "mom", "motherhood"]),
    ("father", &["father", "papa", "dad", "daddy"]),
    ("marriage", &["wedding", "bride", "groom", "anniversary", "married"]),
    ("seasons", &["springtime", "winter snow", "autumn leaves", "summer day"]),
    ("grief", &["grief", "mourn", "sorrow", "weep", "tears", "loss", "funeral", "grave"]),
    ("aging", &["aging", "old age", "elderly", "gray hair", "twilight years", "passing year"]),
    ("gratitude", &["thankful", "grateful", "thanksgiving", "gratitude", "appreciate"]),
    ("missions", &["missionary", "missions", "evangel", "heathen", "lost souls"]),
    ("hymn", &["hymn", "singing", "melody", "song of", "chorus"]),
    ("writing", &["poem", "poet", "verse", "rhyme", "write", "written", "words", "poemize", "poetize"]),
    ("children", &["children", "grandchild", "granddaughter", "grandson", "kids", "child"]),
    ("spouse", &["wife", "husband", "betty", "valentine", "my love", "my dear", "sweetheart"]),
    ("hope", &["hope", "hopeful", "tomorrow", "future", "optimism", "looking forward"]),
    ("memory", &["memory", "memories", "remember", "recall", "past", "yesterday", "long ago"]),
    ("surrender", &["yield", "yielding", "surrender", "commit", "commitment", "consecrate"]),
    ("devotion", &["devotion", "dedication", "dedicate", "loyal", "faithful service"]),
    ("encouragement", &["lift up", "press on", "keep on", "look up", "courage", "victory", "conquer"]),
    ("wisdom", &["wisdom", "wise", "choose", "decision", "double-minded", "discern"]),
    ("presence", &["presence", "abide", "abides", "with me", "beside me", "he is here"]),
    ("seeking", &["quest", "questing", "search", "seeking", "find", "goal", "pursue"]),
    ("nature", &["flower", "flowers", "tree", "trees", "garden", "fruit", "sunset", "sunrise", "sky", "mountain", "river"]),
    ("ministry", &["speaker", "preach", "pulpit", "ministry", "congregation", "serve thee", "good news"]),
    ("rest", &["rest", "relax", "relaxing", "quiet", "stillness", "peaceful", "solitude", "retreat"]),
    ("eternity", &["eternity", "eternal", "everlasting", "forever", "immortal", "hereafter"]),
    ("struggle", &["struggle", "wrestling", "battle", "conflict", "turmoil", "frustrat", "troubled", "despair"]),
    ("service", &["labor", "labors", "laborer", "servant", "serving", "toil", "worker", "harvest field"]),
];

/// 1トピック分の定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    /// 照合順（先頭から）
    pub keywords: Vec<String>,
}

/// トピック表
///
/// JSON形式は `[{"name": "...", "keywords": ["...", ...]}, ...]`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicTable {
    topics: Vec<Topic>,
}

impl Default for TopicTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TopicTable {
    /// 組み込み表
    pub fn builtin() -> Self {
        let topics = DEFAULT_TOPICS
            .iter()
            .map(|(name, keywords)| Topic {
                name: (*name).to_string(),
                keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            })
            .collect();
        Self { topics }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    ///
    /// キーワードは小文字に揃える。空のトピック名・空キーワード・
    /// 重複トピックはエラー。
    pub fn from_json(json: &str) -> Result<Self> {
        let topics: Vec<Topic> = serde_json::from_str(json)?;
        Self::from_topics(topics)
    }

    /// トピック一覧から構築（検証付き）
    pub fn from_topics(topics: Vec<Topic>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(topics.len());

        for topic in topics {
            let name = topic.name.trim().to_string();
            if name.is_empty() {
                return Err(Error::InvalidTopicTable("empty topic name".into()));
            }
            if !seen.insert(name.clone()) {
                return Err(Error::InvalidTopicTable(format!("duplicate topic '{}'", name)));
            }
            if topic.keywords.is_empty() {
                return Err(Error::InvalidTopicTable(format!("topic '{}' has no keywords", name)));
            }

            let mut keywords = Vec::with_capacity(topic.keywords.len());
            for keyword in topic.keywords {
                // 空文字はすべてのテキストに一致してしまう
                if keyword.is_empty() {
                    return Err(Error::InvalidTopicTable(format!(
                        "topic '{}' has an empty keyword",
                        name
                    )));
                }
                keywords.push(keyword.to_lowercase());
            }

            normalized.push(Topic { name, keywords });
        }

        Ok(Self { topics: normalized })
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// トピック名を宣言順に列挙
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.topics.iter().any(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
