//! 年表記の正規化
//!
//! 自由形式の年表記から4桁の西暦を取り出す。
//!
//! ## 判定順
//! 1. 連続する4桁の数字（左から最初のもの）
//! 2. 末尾の `D-DD` / `DD-DD` / `D/DD` / `DD/DD` 形式 → 下2桁を年とみなす
//!    - 50より大きい → 1900年代
//!    - 50以下 → 2000年代

use regex::Regex;

/// 2桁年の世紀判定の境界値
pub const CENTURY_PIVOT: u32 = 50;

lazy_static::lazy_static! {
    static ref FULL_YEAR_RE: Regex = Regex::new(r"[0-9]{4}").unwrap();
    static ref SHORT_DATE_RE: Regex = Regex::new(r"([0-9]{1,2})[-/]([0-9]{2})$").unwrap();
}

/// 年表記を西暦に変換する
///
/// 解釈できない入力は `None`（パニックしない）。
///
/// # Examples
/// ```
/// use poetry_archive_common::parse_year;
///
/// assert_eq!(parse_year(Some("Spring 1978")), Some(1978));
/// assert_eq!(parse_year(Some("3-78")), Some(1978));
/// assert_eq!(parse_year(Some("5/12")), Some(2012));
/// assert_eq!(parse_year(Some("")), None);
/// assert_eq!(parse_year(None), None);
/// ```
pub fn parse_year(raw: Option<&str>) -> Option<u32> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }

    if let Some(m) = FULL_YEAR_RE.find(raw) {
        return m.as_str().parse().ok();
    }

    let caps = SHORT_DATE_RE.captures(raw)?;
    let suffix: u32 = caps.get(2)?.as_str().parse().ok()?;
    Some(resolve_century(suffix))
}

/// 2桁年を4桁に補完する
pub fn resolve_century(two_digit: u32) -> u32 {
    if two_digit > CENTURY_PIVOT {
        1900 + two_digit
    } else {
        2000 + two_digit
    }
}
