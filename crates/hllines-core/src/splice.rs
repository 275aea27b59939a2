use std::sync::LazyLock;

use regex::{NoExpand, Regex};

static EXISTING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)hl_lines=\[[^\]]*\]").expect("valid hl_lines regex"));

/// Write `attr` (e.g. `hl_lines=["1","2-3"]`) into a fence line.
///
/// An existing `hl_lines=[...]` segment is replaced in place. Otherwise the
/// attribute is appended inside the line's braces, after a comma when the
/// braces already hold something, or in a new ` {...}` block when there are no
/// usable braces. The rest of the line is left untouched.
pub fn splice_attribute(attr: &str, line: &str) -> String {
    if EXISTING_RE.is_match(line) {
        return EXISTING_RE.replace(line, NoExpand(attr)).into_owned();
    }

    let (open, close) = match (line.find('{'), line.rfind('}')) {
        (Some(open), Some(close)) if open < close => (open, close),
        _ => return format!("{} {{{attr}}}", line.trim_end()),
    };

    let inside = line[open + 1..close].trim();
    let separator = if inside.is_empty() { "" } else { "," };
    format!(
        "{}{separator}{attr}{}",
        line[..close].trim_end(),
        &line[close..]
    )
}
