//! プレビュー文字列とスラッグの生成

/// プレビューの既定最大文字数
pub const DEFAULT_PREVIEW_LENGTH: usize = 80;

/// 切り詰め時に付ける記号
pub const TRUNCATION_MARKER: &str = "...";

/// 本文の1行目からプレビューを作る
///
/// 文字数で切るため単語の途中で切れることがある。
pub fn preview(content: &str, max_len: usize) -> String {
    let first_line = content.split('\n').next().unwrap_or("").trim();

    if first_line.chars().count() <= max_len {
        return first_line.to_string();
    }

    let mut truncated: String = first_line.chars().take(max_len).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

/// IDから安定したスラッグを作る
pub fn slug(id: u32) -> String {
    format!("poem-{}", id)
}
