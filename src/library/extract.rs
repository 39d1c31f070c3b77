//! Bibliographic metadata extraction from a raw title line.
//!
//! Pattern-based and deliberately narrow: a four-digit run (ASCII or
//! full-width) is taken as the publication year, a bracketed name or a `，<name>编` marker as the author.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::library::model::UNKNOWN_YEAR;

// ── Regex patterns ──────────────────────────────────────────────────────

/// Unicode-aware: also matches full-width digits such as `１９９５`.
static RE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

static RE_BRACKETED_AUTHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").unwrap());

/// `，张三编` / `,张三编著`: comma, name, "edited by" marker.
static RE_EDITED_BY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[，,](.*?)编著?").unwrap());

/// Title and author split out of a title line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookInfo {
    pub title: String,
    /// Empty when no author marker was found.
    pub author: String,
}

/// First run of four decimal digits, or [`UNKNOWN_YEAR`].
///
/// Any four digits qualify; there is no plausibility check on the value.
/// Full-width digits count like their ASCII forms. A run in any other
/// script yields [`UNKNOWN_YEAR`].
pub fn extract_year(text: &str) -> u32 {
    RE_YEAR
        .find(text)
        .and_then(|m| digits_value(m.as_str()))
        .unwrap_or(UNKNOWN_YEAR)
}

/// Value of a run of ASCII or full-width decimal digits.
fn digits_value(digits: &str) -> Option<u32> {
    digits
        .chars()
        .try_fold(0u32, |acc, ch| Some(acc * 10 + digit_value(ch)?))
}

fn digit_value(ch: char) -> Option<u32> {
    match ch {
        '\u{FF10}'..='\u{FF19}' => Some(ch as u32 - 0xFF10),
        _ => ch.to_digit(10),
    }
}

/// Split a title line into title and author.
///
/// A bracketed `[name]` wins and is removed from the title. Otherwise a
/// `，name编` marker supplies the author and the title is left as is.
pub fn format_book_info(text: &str) -> BookInfo {
    let (title, author) = match RE_BRACKETED_AUTHOR.captures(text) {
        Some(caps) => {
            let author = caps[1].to_string();
            (text.replace(&format!("[{author}]"), ""), author)
        }
        None => {
            let author = RE_EDITED_BY
                .captures(text)
                .map(|caps| caps[1].to_string())
                .unwrap_or_default();
            (text.to_string(), author)
        }
    };

    BookInfo {
        title: normalize_whitespace(&title),
        author: author.trim().to_string(),
    }
}

/// Trim and collapse whitespace runs into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
