//! Pattern-based field extraction from raw HTML.
//!
//! Nothing here builds a tree: every extractor scans the raw text with
//! regexes, so unbalanced or truncated markup degrades to defaults instead
//! of failing.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;

lazy_static! {
    static ref TITLE: Regex = Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("valid regex");
    static ref H1: Regex = Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1\s*>").expect("valid regex");
    static ref H2: Regex = Regex::new(r"(?is)<h2\b[^>]*>(.*?)</h2\s*>").expect("valid regex");
    static ref PARAGRAPH: Regex = Regex::new(r"(?is)<p\b[^>]*>(.*?)</p\s*>").expect("valid regex");
    static ref META: Regex = Regex::new(r#"(?is)<meta\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).expect("valid regex");
    static ref ATTR: Regex = Regex::new(
        r#"(?is)([a-z_:][-a-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#
    ).expect("valid regex");
    static ref SCRIPT: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex");
    static ref STYLE: Regex = Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("valid regex");
    // script/style opened but never closed: drop everything after it
    static ref UNCLOSED_BLOCK: Regex = Regex::new(r"(?is)<(?:script|style)\b.*$").expect("valid regex");
    static ref COMMENT: Regex = Regex::new(r"(?s)<!--.*?(?:-->|$)").expect("valid regex");
    static ref TAG: Regex = Regex::new(r"(?s)<[a-zA-Z/!?][^>]*>").expect("valid regex");
    static ref ENTITY: Regex = Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,31});").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref UPDATE_DATE: Regex = Regex::new(concat!(
        r"(?i)(?:fecha\s+de\s+actualizaci(?:ó|o|&oacute;)n|(?:ú|u|&uacute;)ltima\s+actualizaci(?:ó|o|&oacute;)n|update\s+date|last\s+updated?)",
        r"(?:\s|:|&nbsp;|<[^>]*>)*",
        r"(\d{4}-\d{1,2}-\d{1,2}|\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}|\d{1,2}\s+de\s+\p{L}+\s+de\s+\d{4})",
    )).expect("valid regex");
}

fn named_entity(name: &str) -> Option<&'static str> {
    let s = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "aacute" => "á", "Aacute" => "Á",
        "eacute" => "é", "Eacute" => "É",
        "iacute" => "í", "Iacute" => "Í",
        "oacute" => "ó", "Oacute" => "Ó",
        "uacute" => "ú", "Uacute" => "Ú",
        "ntilde" => "ñ", "Ntilde" => "Ñ",
        "uuml" => "ü", "Uuml" => "Ü",
        "iexcl" => "¡",
        "iquest" => "¿",
        "laquo" => "«",
        "raquo" => "»",
        "ndash" => "–",
        "mdash" => "—",
        "hellip" => "…",
        "copy" => "©",
        _ => return None,
    };
    Some(s)
}

/// Decode HTML entities to literal characters. Unknown entities are kept verbatim.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY.replace_all(text, |caps: &Captures| {
        let body = &caps[1];
        let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32).map(String::from)
        } else if let Some(dec) = body.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(char::from_u32).map(String::from)
        } else {
            named_entity(body).map(String::from)
        };
        decoded.unwrap_or_else(|| caps[0].to_string())
    })
}

/// Remove script/style blocks, comments and tags, then decode entities.
/// Tags are replaced by a space so adjacent words never merge.
pub fn strip_markup(html: &str) -> String {
    let text = SCRIPT.replace_all(html, " ");
    let text = STYLE.replace_all(&text, " ");
    let text = UNCLOSED_BLOCK.replace_all(&text, " ");
    let text = COMMENT.replace_all(&text, " ");
    let text = TAG.replace_all(&text, " ");
    decode_entities(&text).into_owned()
}

/// Visible text of an element's inner HTML, whitespace collapsed and trimmed.
pub fn inner_text(fragment: &str) -> String {
    let text = TAG.replace_all(fragment, " ");
    let text = decode_entities(&text);
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Entity-decoded and trimmed, inner whitespace kept as written.
pub fn trimmed_text(raw: &str) -> String {
    decode_entities(raw).trim().to_string()
}

/// Cut to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}

fn first_non_empty(re: &Regex, html: &str) -> Option<String> {
    re.captures_iter(html)
        .map(|caps| inner_text(&caps[1]))
        .find(|text| !text.is_empty())
}

/// Title signal of the document: `<title>`, then the first `<h1>`.
pub fn find_title(html: &str) -> Option<String> {
    TITLE
        .captures(html)
        .map(|caps| trimmed_text(&caps[1]))
        .filter(|t| !t.is_empty())
        .or_else(|| first_non_empty(&H1, html))
}

/// Title chain ending in `file_id`.
pub fn extract_title(html: &str, file_id: &str) -> String {
    find_title(html).unwrap_or_else(|| file_id.to_string())
}

/// `content` of the first `<meta name="description">` with a non-empty value.
pub fn meta_description(html: &str) -> Option<String> {
    for tag in META.find_iter(html) {
        let mut is_description = false;
        let mut content = None;
        for caps in ATTR.captures_iter(tag.as_str()) {
            let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)).map_or("", |m| m.as_str());
            let name = &caps[1];
            if name.eq_ignore_ascii_case("name") && value.trim().eq_ignore_ascii_case("description") {
                is_description = true;
            } else if name.eq_ignore_ascii_case("content") {
                content = Some(value);
            }
        }
        if is_description {
            if let Some(text) = content.map(trimmed_text).filter(|t| !t.is_empty()) {
                return Some(text);
            }
        }
    }
    None
}

/// Description chain: meta description, first non-empty paragraph,
/// first non-empty `<h2>`, else empty. Always truncated to `max_chars`.
pub fn extract_description(html: &str, max_chars: usize) -> String {
    let found = meta_description(html)
        .or_else(|| first_non_empty(&PARAGRAPH, html))
        .or_else(|| first_non_empty(&H2, html))
        .unwrap_or_default();
    truncate_chars(&found, max_chars)
}

/// Date token following an "update date" marker, verbatim.
pub fn extract_update_date(html: &str) -> Option<String> {
    UPDATE_DATE.captures(html).map(|caps| caps[1].to_string())
}
