//! Fenced code block detection.

use std::sync::LazyLock;

use regex::Regex;

// Capture: indent, fence run of 3+ backticks/tildes, and the rest of the line.
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(`{3,}|~{3,})(.*)$").expect("valid fence regex"));

/// A fenced code block located in a document. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// The opening fence line, which carries the attributes.
    pub fence_line: usize,
    /// The closing fence line, or `None` when the block runs to end of document.
    pub close_line: Option<usize>,
    /// The last content line. Equal to `fence_line` when the block is empty.
    pub last_line: usize,
    pub fence_text: String,
}

impl CodeBlock {
    /// Whether `line` is a content line of this block (not either fence).
    pub fn contains(&self, line: usize) -> bool {
        line > self.fence_line && line <= self.last_line
    }

    /// Offset of a document line from the fence line; the first content line is 1.
    pub fn offset(&self, line: usize) -> usize {
        line.saturating_sub(self.fence_line)
    }
}

/// Split a fence line into its marker character, run length and info string.
///
/// ```
/// assert_eq!(hllines::is_fence("```go {.wrap}"), Some(('`', 3, "go {.wrap}")));
/// assert_eq!(hllines::is_fence("  ~~~~"), Some(('~', 4, "")));
/// assert!(hllines::is_fence("``not a fence").is_none());
/// ```
pub fn is_fence(line: &str) -> Option<(char, usize, &str)> {
    let cap = FENCE_RE.captures(line)?;
    let fence = cap.get(2)?.as_str();
    let info = cap.get(3).map_or("", |m| m.as_str());
    let marker = fence.chars().next()?;
    Some((marker, fence.len(), info.trim()))
}

/// Find every fenced code block in `text`.
///
/// A block opens on any fence line and closes on the next fence line using the
/// same marker character, at least as long, with nothing after it. An
/// unterminated block extends to the last line of the document.
pub fn find_code_blocks(text: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<(char, usize, CodeBlock)> = None;
    let mut total = 0;

    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;
        total = lineno;
        let Some((marker, len, info)) = is_fence(line) else {
            continue;
        };
        match open.take() {
            Some((open_marker, open_len, mut block))
                if marker == open_marker && len >= open_len && info.is_empty() =>
            {
                block.close_line = Some(lineno);
                block.last_line = lineno - 1;
                blocks.push(block);
            }
            Some(still_open) => open = Some(still_open),
            None => {
                open = Some((
                    marker,
                    len,
                    CodeBlock {
                        fence_line: lineno,
                        close_line: None,
                        last_line: lineno,
                        fence_text: line.to_string(),
                    },
                ));
            }
        }
    }

    if let Some((_, _, mut block)) = open {
        block.last_line = total;
        log::debug!("code block at line {} is not closed", block.fence_line);
        blocks.push(block);
    }
    blocks
}

/// The block whose content holds every line in `min..=max`.
pub fn enclosing_block(blocks: &[CodeBlock], min: usize, max: usize) -> Option<&CodeBlock> {
    blocks.iter().find(|b| b.contains(min) && b.contains(max))
}
