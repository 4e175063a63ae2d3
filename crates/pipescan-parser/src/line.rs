//! Line classification
//!
//! Both extractors walk the text one line at a time and only need a few
//! facts about each line: its indentation, its trimmed text, whether it is a
//! list item, and whether it reads as `key: value`.

/// A non-blank, non-comment line of pipeline YAML
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    /// Column of the first non-whitespace character (a tab counts as one)
    pub indent: usize,
    /// Line text with surrounding whitespace removed
    pub text: &'a str,
}

impl<'a> Line<'a> {
    /// Classify a raw line, returning `None` for blank and comment lines
    pub fn classify(number: usize, raw: &'a str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            return None;
        }

        let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
        Some(Self {
            number,
            indent,
            text,
        })
    }

    pub fn is_bullet(&self) -> bool {
        self.text.starts_with('-')
    }

    /// Text after the leading `-` of a list item
    pub fn bullet_body(&self) -> Option<&'a str> {
        self.text.strip_prefix('-').map(str::trim)
    }

    /// Column where a list item's content starts
    ///
    /// For `  - stage: Build` this is 4: sibling keys of `stage` line up here.
    pub fn bullet_content_column(&self) -> usize {
        match self.text.strip_prefix('-') {
            Some(rest) => {
                let gap = rest.chars().take_while(|c| c.is_whitespace()).count();
                self.indent + 1 + gap
            }
            None => self.indent,
        }
    }

    /// `key: value` split of the line itself
    pub fn key_value(&self) -> Option<(&'a str, &'a str)> {
        split_key_value(self.text)
    }

    /// `key: value` split of a list item's content (`- key: value`)
    pub fn bullet_key_value(&self) -> Option<(&'a str, &'a str)> {
        self.bullet_body().and_then(split_key_value)
    }

    /// A mapping key line such as `jobs:` or `condition: succeeded()`
    pub fn is_key_line(&self) -> bool {
        if self.is_bullet() {
            return false;
        }
        match self.key_value() {
            Some((key, _)) => key
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.')),
            None => false,
        }
    }
}

/// Iterate the significant lines of `text`
///
/// Only `\n` separates lines; a trailing `\r` is removed by trimming.
pub(crate) fn significant_lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.split('\n')
        .enumerate()
        .filter_map(|(idx, raw)| Line::classify(idx + 1, raw))
}

/// Split `key: value` at the first colon
///
/// The key must be non-empty; the value may be empty (`values:`).
pub(crate) fn split_key_value(text: &str) -> Option<(&str, &str)> {
    let pos = text.find(':')?;
    let key = text[..pos].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, text[pos + 1..].trim()))
}

/// Remove one matching pair of surrounding quotes
///
/// Unbalanced quotes are left untouched.
pub(crate) fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'\'' || first == b'"') && first == last {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Truncate a trailing `# comment`
///
/// A `#` only starts a comment at the beginning of the value or after
/// whitespace, and never inside a leading quoted scalar.
pub(crate) fn strip_trailing_comment(value: &str) -> &str {
    let search_from = match value.chars().next() {
        Some(quote @ ('\'' | '"')) => match value[1..].find(quote) {
            Some(close) => close + 2,
            None => return value,
        },
        _ => 0,
    };

    let bytes = value.as_bytes();
    for (idx, &b) in bytes.iter().enumerate().skip(search_from) {
        if b == b'#' && (idx == 0 || bytes[idx - 1].is_ascii_whitespace()) {
            return value[..idx].trim_end();
        }
    }
    value
}

/// Normalize a scalar value: drop a trailing comment, then the quotes
pub(crate) fn scalar(value: &str) -> &str {
    strip_quotes(strip_trailing_comment(value).trim())
}

/// Parse an inline flow list such as `[Build, 'Test']`
///
/// Items are trimmed and unquoted; empty items are dropped.
pub(crate) fn parse_flow_list(value: &str) -> Vec<String> {
    let inner = value.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    inner
        .split(',')
        .map(|item| strip_quotes(item.trim()))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
