use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Something between braces anywhere on the line.
static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{.*\}").expect("valid attribute block regex"));

static SCALAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)hl_lines="?(\d+)"?"#).expect("valid scalar regex"));

// The body stops at the first closing bracket, so only the first array is seen.
static ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)hl_lines=\[([^\]]*)\]").expect("valid array regex"));

/// What the `hl_lines` key on a fence line holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue<'a> {
    /// `hl_lines=N` or `hl_lines="N"`.
    Scalar(u32),
    /// The raw text between the brackets of `hl_lines=[...]`.
    Array(&'a str),
    Absent,
}

/// One comma-separated array entry after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Line(u32),
    /// Inclusive, with `start < end`.
    Range(u32, u32),
    Rejected(Rejection),
}

/// Why an array entry contributes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    /// A range written without surrounding double quotes, e.g. `3-6`.
    UnquotedRange,
    /// A quoted entry with a hyphen that is not `start-end` over two integers.
    MalformedRange,
    /// `start >= end`.
    NotAscending,
    NotANumber,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Rejection::Empty => "empty entry",
            Rejection::UnquotedRange => "ranges must be double-quoted",
            Rejection::MalformedRange => "range is not start-end",
            Rejection::NotAscending => "range start is not below its end",
            Rejection::NotANumber => "not a line number",
        };
        f.write_str(msg)
    }
}

/// Cheap pre-check: does the line carry a brace-delimited attribute block at all?
pub fn has_attribute_block(line: &str) -> bool {
    BLOCK_RE.is_match(line)
}

/// Locate the `hl_lines` value on a fence line.
///
/// The key is matched case-insensitively and must use an underscore. The scalar
/// form is tried first and wins even when an array form is also present.
pub fn find_attr(line: &str) -> AttrValue<'_> {
    if !has_attribute_block(line) {
        return AttrValue::Absent;
    }

    if let Some(cap) = SCALAR_RE.captures(line) {
        let digits = cap.get(1).map_or("", |m| m.as_str());
        return match digits.parse::<u32>() {
            Ok(n) => AttrValue::Scalar(n),
            Err(_) => {
                log::debug!("hl_lines value {digits:?} is out of range");
                AttrValue::Absent
            }
        };
    }

    match ARRAY_RE.captures(line).and_then(|cap| cap.get(1)) {
        Some(body) => AttrValue::Array(body.as_str()),
        None => {
            log::trace!("no hl_lines attribute in {line:?}");
            AttrValue::Absent
        }
    }
}

/// Classify a single array entry.
///
/// Accepted: `3`, `"3"`, `"3-6"`. Dropped: `3-6`, `'3'`, `"6-3"`, and anything
/// else that does not read as a line number.
pub fn classify_entry(raw: &str) -> Entry {
    let entry = raw.trim();
    if entry.is_empty() {
        return Entry::Rejected(Rejection::Empty);
    }
    let quoted = unquote(entry);

    if entry.contains('-') {
        let Some(inner) = quoted else {
            return Entry::Rejected(Rejection::UnquotedRange);
        };
        return match parse_range(inner) {
            Some((start, end)) if start < end => Entry::Range(start, end),
            Some(_) => Entry::Rejected(Rejection::NotAscending),
            None => Entry::Rejected(Rejection::MalformedRange),
        };
    }

    match parse_line_number(quoted.unwrap_or(entry)) {
        Some(n) => Entry::Line(n),
        None => Entry::Rejected(Rejection::NotANumber),
    }
}

/// Strip one pair of surrounding double quotes, requiring something inside.
fn unquote(s: &str) -> Option<&str> {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .filter(|inner| !inner.is_empty())
}

fn parse_range(s: &str) -> Option<(u32, u32)> {
    let (start, end) = s.split_once('-')?;
    Some((parse_line_number(start)?, parse_line_number(end)?))
}

fn parse_line_number(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
