//! 単一ページHTML生成
//!
//! CSS・クライアントスクリプト・詩データを1ファイルに埋め込む。
//! 詩データは `<script type="application/json">` に入れ、スクリプト側で読み込む。

use super::SiteInfo;
use crate::error::{ArchiveError, Result};
use crate::scanner::{ImageAssets, PageImage};
use poetry_archive_common::{ArchiveData, EnrichedPoem};
use serde::Serialize;
use std::path::{Path, PathBuf};

const STYLE: &str = include_str!("assets/style.css");
const SCRIPT: &str = include_str!("assets/app.js");

pub const HTML_FILE_NAME: &str = "index.html";

/// 装飾画像のインデックス（graphics/ のファイル名順）
mod slots {
    pub const COVER: usize = 1;
    pub const WATERMARK_TOP: usize = 3;
    pub const WATERMARK_BOTTOM: usize = 4;
    pub const FOOTER: usize = 6;
    pub const MODAL_FLOURISH: usize = 10;
}

/// クライアントに渡す詩
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientPoem<'a> {
    id: u32,
    slug: &'a str,
    title: &'a str,
    year: Option<u32>,
    year_raw: Option<&'a str>,
    tags: &'a [String],
    content: &'a str,
    preview: &'a str,
    /// モーダルに表示する原稿画像
    image: &'a str,
}

impl<'a> From<&'a EnrichedPoem> for ClientPoem<'a> {
    fn from(poem: &'a EnrichedPoem) -> Self {
        Self {
            id: poem.id,
            slug: &poem.slug,
            title: &poem.title,
            year: poem.parsed_year,
            year_raw: poem.year_raw.as_deref(),
            tags: &poem.tags,
            content: &poem.content,
            preview: &poem.preview,
            image: &poem.source_image,
        }
    }
}

#[derive(Serialize)]
struct ClientPayload<'a> {
    poems: Vec<ClientPoem<'a>>,
    pages: &'a [PageImage],
    graphics: &'a [String],
}

pub(crate) fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// 先頭1文字を大文字にする（タグの表示名）
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `</script>` で埋め込みが途切れないようにしたJSON
fn embedded_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)
        .map_err(|e| ArchiveError::HtmlGeneration(format!("詩データのシリアライズに失敗: {}", e)))?;
    Ok(json.replace("</", "<\\/"))
}

fn img(src: Option<&str>, class: &str) -> String {
    match src {
        Some(src) => format!(r#"<img src="{}" alt="" class="{}">"#, escape_html(src), class),
        None => String::new(),
    }
}

pub fn build_html(data: &ArchiveData, assets: &ImageAssets, site: &SiteInfo) -> Result<String> {
    let payload = ClientPayload {
        poems: data.poems.iter().map(ClientPoem::from).collect(),
        pages: &assets.pages,
        graphics: &assets.graphics,
    };
    let payload_json = embedded_json(&payload)?;

    let total = data.poems.len();
    let title = escape_html(&site.title);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("  <title>{}</title>\n", title));
    html.push_str(&format!("  <style>\n{}\n  </style>\n", STYLE));
    html.push_str("</head>\n<body>\n");

    // 表紙
    html.push_str("  <div class=\"book-landing\" id=\"bookLanding\">\n");
    match assets.graphic(slots::COVER) {
        Some(cover) => html.push_str(&format!(
            "    <img src=\"{}\" alt=\"{}\" class=\"book-cover-image\">\n",
            escape_html(cover),
            title
        )),
        None => html.push_str(&format!("    <h2 class=\"book-title-fallback\">{}</h2>\n", title)),
    }
    html.push_str("    <button class=\"book-read-btn\" id=\"openBookBtn\">Read</button>\n");
    html.push_str("  </div>\n");

    html.push_str(&format!("  {}\n", img(assets.graphic(slots::WATERMARK_TOP), "watermark top-left")));
    html.push_str(&format!("  {}\n", img(assets.graphic(slots::WATERMARK_BOTTOM), "watermark bottom-right")));

    html.push_str("  <header class=\"site-header\">\n");
    html.push_str(&format!("    <h1 class=\"site-title\">{}</h1>\n", title));
    html.push_str(&format!("    <p class=\"author-line\">{}</p>\n", escape_html(&site.author_line)));
    html.push_str("  </header>\n");

    html.push_str("  <nav class=\"main-nav\">\n");
    for (view, label) in [
        ("poems", "Poems"),
        ("themes", "Themes"),
        ("years", "Years"),
        ("gallery", "Gallery"),
        ("about", "About"),
    ] {
        let active = if view == "poems" { " active" } else { "" };
        html.push_str(&format!(
            "    <button class=\"nav-btn{}\" data-view=\"{}\">{}</button>\n",
            active, view, label
        ));
    }
    html.push_str("  </nav>\n");

    // 検索・絞り込み
    html.push_str("  <div class=\"controls\" id=\"controls\">\n");
    html.push_str("    <div class=\"search-box\"><input type=\"text\" id=\"searchInput\" placeholder=\"Search poems...\"></div>\n");
    html.push_str("    <select class=\"filter-select\" id=\"tagFilter\">\n      <option value=\"\">All Themes</option>\n");
    for tag in &data.all_tags {
        html.push_str(&format!(
            "      <option value=\"{}\">{}</option>\n",
            escape_html(tag),
            escape_html(&capitalize(tag))
        ));
    }
    html.push_str("    </select>\n");
    html.push_str("    <select class=\"filter-select\" id=\"yearFilter\">\n      <option value=\"\">All Years</option>\n");
    for year in &data.years {
        html.push_str(&format!("      <option value=\"{0}\">{0}</option>\n", year));
    }
    html.push_str("    </select>\n");
    html.push_str("    <button class=\"discover-btn\" id=\"discoverBtn\">✦ Discover a Poem</button>\n");
    html.push_str("  </div>\n");

    html.push_str(&format!(
        "  <div class=\"stats-bar\" id=\"statsBar\">Showing <span id=\"visibleCount\">{0}</span> of {0} poems</div>\n",
        total
    ));
    html.push_str("  <main class=\"main-content\" id=\"mainContent\"></main>\n");

    // 詩モーダル
    html.push_str("  <div class=\"modal-overlay\" id=\"modalOverlay\">\n    <div class=\"modal\">\n");
    html.push_str("      <button class=\"modal-close\" id=\"modalClose\">×</button>\n");
    html.push_str("      <img class=\"modal-image\" id=\"modalImage\" src=\"\" alt=\"\">\n");
    html.push_str("      <div class=\"modal-content\">\n");
    html.push_str("        <h2 class=\"modal-title\" id=\"modalTitle\"></h2>\n");
    html.push_str("        <p class=\"modal-year\" id=\"modalYear\"></p>\n");
    html.push_str("        <div class=\"modal-poem\" id=\"modalPoem\"></div>\n");
    if let Some(flourish) = assets.graphic(slots::MODAL_FLOURISH) {
        html.push_str(&format!(
            "        <div class=\"modal-flourish\"><img src=\"{}\" alt=\"\"></div>\n",
            escape_html(flourish)
        ));
    }
    html.push_str("        <div class=\"modal-tags\" id=\"modalTags\"></div>\n");
    html.push_str("        <div class=\"modal-nav\">\n");
    html.push_str("          <button class=\"modal-nav-btn\" id=\"prevPoem\">← Previous</button>\n");
    html.push_str("          <button class=\"modal-nav-btn\" id=\"nextPoem\">Next →</button>\n");
    html.push_str("        </div>\n      </div>\n    </div>\n  </div>\n");

    // 画像モーダル
    html.push_str("  <div class=\"image-modal-overlay\" id=\"imageModalOverlay\">\n");
    html.push_str("    <button class=\"modal-close\" id=\"imageModalClose\">×</button>\n");
    html.push_str("    <img class=\"image-modal-img\" id=\"imageModalImg\" src=\"\" alt=\"\">\n");
    html.push_str("  </div>\n");

    // About（スクリプトが複製して表示）
    html.push_str("  <template id=\"aboutTemplate\">\n    <div class=\"about-content\">\n");
    html.push_str(&format!(
        "      <p>This digital archive preserves the poetry collected in <strong>{}</strong>.</p>\n",
        title
    ));
    html.push_str("      <p>The poems were transcribed from scanned manuscript pages; each poem links back to the page it came from.</p>\n");
    html.push_str(&format!(
        "      <p class=\"about-counts\"><strong>{} poems</strong> from <strong>{} original pages</strong></p>\n",
        total,
        assets.pages.len()
    ));
    html.push_str("    </div>\n  </template>\n");

    html.push_str("  <footer class=\"site-footer\">\n");
    if let Some(footer) = assets.graphic(slots::FOOTER) {
        html.push_str(&format!("    <img src=\"{}\" alt=\"\">\n", escape_html(footer)));
    }
    html.push_str(&format!("    <p>{}</p>\n", escape_html(&site.footer_line)));
    html.push_str(&format!("    <p>{} poems preserved for future generations</p>\n", total));
    html.push_str("  </footer>\n");

    html.push_str(&format!(
        "  <script id=\"archiveData\" type=\"application/json\">{}</script>\n",
        payload_json
    ));
    html.push_str(&format!("  <script>\n{}\n  </script>\n", SCRIPT));
    html.push_str("</body>\n</html>\n");

    Ok(html)
}

pub fn html_path(output_dir: &Path) -> PathBuf {
    output_dir.join(HTML_FILE_NAME)
}

pub fn generate_html(
    data: &ArchiveData,
    assets: &ImageAssets,
    site: &SiteInfo,
    output_dir: &Path,
) -> Result<PathBuf> {
    let html = build_html(data, assets, site)?;
    let path = html_path(output_dir);
    std::fs::write(&path, html)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<b>"Tom" & Jerry</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; Jerry&lt;/b&gt;");
        assert_eq!(escape_html("it's"), "it's");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("grief"), "Grief");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_embedded_json_escapes_script_close() {
        let json = embedded_json(&"</script><script>alert(1)").unwrap();
        assert!(!json.contains("</script>"));
        assert!(json.contains("<\\/script>"));

        let decoded: String = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, "</script><script>alert(1)");
    }

    #[test]
    fn test_img_omitted_when_missing() {
        assert_eq!(img(None, "watermark"), "");
        assert_eq!(img(Some("graphics/a.jpg"), "w"), r#"<img src="graphics/a.jpg" alt="" class="w">"#);
    }
}
