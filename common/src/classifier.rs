//! トピック分類モジュール
//!
//! タイトル＋本文を小文字化し、トピック表のキーワードで照合してタグを付ける。
//!
//! ## 照合ルール
//! - 4文字以下のキーワード: 単語境界で囲まれた完全一致のみ
//! - 5文字以上のキーワード: 部分文字列一致
//! - トピックごとに最初に一致したキーワードで確定し、次のトピックへ

use crate::topics::TopicTable;

/// この文字数以下のキーワードは単語境界を要求する
pub const WORD_BOUNDARY_MAX_LEN: usize = 4;

lazy_static::lazy_static! {
    static ref DEFAULT_CLASSIFIER: Classifier = Classifier::new(&TopicTable::builtin());
}

/// 組み込みトピック表でタグ付けする
pub fn tag(title: &str, content: &str) -> Vec<String> {
    DEFAULT_CLASSIFIER.tag(title, content)
}

/// キーワード照合器
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeywordMatcher {
    /// 単語境界付き
    Word(String),
    /// 部分文字列
    Substring(String),
}

impl KeywordMatcher {
    fn new(keyword: &str) -> Self {
        if keyword.chars().count() <= WORD_BOUNDARY_MAX_LEN {
            KeywordMatcher::Word(keyword.to_string())
        } else {
            KeywordMatcher::Substring(keyword.to_string())
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            KeywordMatcher::Word(word) => contains_word(text, word),
            KeywordMatcher::Substring(phrase) => text.contains(phrase.as_str()),
        }
    }
}

/// 分類器（トピック表をコンパイル済みの形で保持）
#[derive(Debug, Clone)]
pub struct Classifier {
    topics: Vec<(String, Vec<KeywordMatcher>)>,
}

impl Default for Classifier {
    fn default() -> Self {
        DEFAULT_CLASSIFIER.clone()
    }
}

impl Classifier {
    pub fn new(table: &TopicTable) -> Self {
        let topics = table
            .topics()
            .iter()
            .map(|topic| {
                let matchers = topic
                    .keywords
                    .iter()
                    .map(|k| KeywordMatcher::new(&k.to_lowercase()))
                    .collect();
                (topic.name.clone(), matchers)
            })
            .collect();
        Self { topics }
    }

    /// タイトルと本文からタグを求める
    ///
    /// # Returns
    /// トピック表の宣言順に並んだ重複なしのトピック名（一致なしなら空）
    pub fn tag(&self, title: &str, content: &str) -> Vec<String> {
        let text = format!("{} {}", title, content).to_lowercase();
        self.tag_lowercased(&text)
    }

    /// 小文字化済みテキストからタグを求める
    pub fn tag_lowercased(&self, text: &str) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();

        for (name, matchers) in &self.topics {
            if matchers.iter().any(|m| m.is_match(text)) && !tags.iter().any(|t| t == name) {
                tags.push(name.clone());
            }
        }

        tags
    }

    /// トピックに一致した最初のキーワード（デバッグ表示用）
    pub fn matched_keyword(&self, topic: &str, title: &str, content: &str) -> Option<&str> {
        let text = format!("{} {}", title, content).to_lowercase();
        let (_, matchers) = self.topics.iter().find(|(name, _)| name == topic)?;

        matchers.iter().find(|m| m.is_match(&text)).map(|m| match m {
            KeywordMatcher::Word(k) | KeywordMatcher::Substring(k) => k.as_str(),
        })
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}

/// 単語構成文字（ASCII英数字とアンダースコア）
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `\bword\b` 相当の照合
///
/// 境界は「前後の文字の単語構成性が異なる位置」。重なり合う出現も順に調べる。
fn contains_word(text: &str, word: &str) -> bool {
    let (first, last) = match (word.chars().next(), word.chars().next_back()) {
        (Some(f), Some(l)) => (f, l),
        _ => return false,
    };

    let mut from = 0;
    while let Some(offset) = text[from..].find(word) {
        let start = from + offset;
        let end = start + word.len();

        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();

        let start_boundary = before.map_or(false, is_word_char) != is_word_char(first);
        let end_boundary = is_word_char(last) != after.map_or(false, is_word_char);

        if start_boundary && end_boundary {
            return true;
        }

        from = start + first.len_utf8();
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::Topic;

    fn table(entries: &[(&str, &[&str])]) -> TopicTable {
        TopicTable::from_topics(
            entries
                .iter()
                .map(|(name, keywords)| Topic {
                    name: name.to_string(),
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
        )
        .expect("トピック表の構築失敗")
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("the cross stands", "cross"));
        assert!(contains_word("mom", "mom"));
        assert!(contains_word("dear mom, hello", "mom"));
        assert!(!contains_word("momentary lapse", "mom"));
        assert!(!contains_word("a momma", "mom"));
        assert!(!contains_word("rest_area", "rest"));
        assert!(!contains_word("", "mom"));
    }

    #[test]
    fn test_contains_word_finds_later_occurrence() {
        // 1回目は単語内、2回目は独立
        assert!(contains_word("restless rest", "rest"));
        assert!(contains_word("dadaist dad", "dad"));
    }

    #[test]
    fn test_short_keyword_requires_word_boundary() {
        let classifier = Classifier::new(&table(&[("rest", &["rest"])]));

        assert!(classifier.tag("", "forests and interest").is_empty());
        assert_eq!(classifier.tag("", "come and rest awhile"), vec!["rest"]);
        assert_eq!(classifier.tag("", "Rest."), vec!["rest"]);
    }

    #[test]
    fn test_long_keyword_matches_substring() {
        assert_eq!(tag("", "my saviour lives"), vec!["christ"]);
        // 5文字以上は単語の一部でも一致する
        let classifier = Classifier::new(&table(&[("struggle", &["frustrat"])]));
        assert_eq!(classifier.tag("", "such frustration"), vec!["struggle"]);
    }

    #[test]
    fn test_builtin_cross_as_word() {
        assert_eq!(tag("", "the cross stands"), vec!["christ"]);
    }

    #[test]
    fn test_title_is_searched() {
        assert_eq!(tag("A Psalm", "nothing else here"), vec!["scripture"]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(tag("", "JESUS, I WEEP"), vec!["christ", "grief"]);
    }

    #[test]
    fn test_tags_follow_table_order() {
        // 本文中の出現順ではなく表の宣言順
        let tags = tag("", "a flower for mother, kneel in prayer");
        assert_eq!(tags, vec!["prayer", "mother", "nature"]);
    }

    #[test]
    fn test_no_duplicate_tags() {
        let tags = tag("", "jesus christ the saviour on the cross at calvary");
        assert_eq!(tags, vec!["christ"]);
    }

    #[test]
    fn test_shared_keyword_assigns_both_topics() {
        // "congregation" は church と ministry の両方にある
        let tags = tag("", "the congregation gathered");
        assert_eq!(tags, vec!["church", "ministry"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(tag("", "xyzzy plugh").is_empty());
        assert!(tag("", "").is_empty());
    }

    #[test]
    fn test_multi_word_keyword() {
        assert_eq!(tag("", "I have been born again"), vec!["salvation"]);
        assert!(tag("", "born, again").is_empty());
    }

    #[test]
    fn test_non_ascii_text_does_not_panic() {
        let tags = tag("Café", "naïve résumé — ünïcödé mom");
        assert_eq!(tags, vec!["mother"]);
    }

    #[test]
    fn test_matched_keyword() {
        let classifier = Classifier::default();
        assert_eq!(classifier.matched_keyword("christ", "", "my savior"), Some("savior"));
        assert_eq!(classifier.matched_keyword("christ", "", "nothing"), None);
        assert_eq!(classifier.matched_keyword("unknown", "", "my savior"), None);
    }

    #[test]
    fn test_custom_table_uppercase_keywords() {
        let custom = TopicTable::from_json(r#"[{"name": "sea", "keywords": ["OCEAN"]}]"#)
            .expect("パース失敗");
        let classifier = Classifier::new(&custom);
        assert_eq!(classifier.tag("", "The Ocean waves"), vec!["sea"]);
        assert_eq!(classifier.topic_count(), 1);
    }
}
