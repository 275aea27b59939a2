use std::str::FromStr;

use hllines_core::{splice_attribute, LineSet};

use crate::fence::{enclosing_block, find_code_blocks, CodeBlock};
use crate::{Error, Result};

/// A selected span of document lines (1-based). Anchor and head may come in
/// either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn line(line: usize) -> Self {
        Self::new(line, line)
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }
}

impl FromStr for Selection {
    type Err = Error;

    /// `N`, `A-B` or `A:B`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSelection(s.to_string());
        let s = s.trim();
        let (anchor, head) = match s.split_once(['-', ':']) {
            Some((a, b)) => (a, b),
            None => (s, s),
        };
        let anchor: usize = anchor.trim().parse().map_err(|_| invalid())?;
        let head: usize = head.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(anchor, head))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Highlight,
    Unhighlight,
    /// Unhighlight when every selected line is already highlighted, else highlight.
    Toggle,
}

/// Result of applying a highlight edit to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// Full edited content, split into lines (without trailing `\n`).
    pub lines: Vec<String>,
    /// 1-based line number of the rewritten fence line.
    pub fence_line: usize,
    /// `Highlight` or `Unhighlight`; never `Toggle`.
    pub applied: Action,
    /// Block-relative highlighted lines after the edit, ascending.
    pub highlighted: Vec<u32>,
}

/// Apply `action` to the code block that holds every selection, rewriting only
/// its fence line.
///
/// A fence using the scalar form (`hl_lines=5`) keeps that scalar: the new
/// array is appended beside it, and the scalar still wins on the next parse.
pub fn edit_text(text: &str, selections: &[Selection], action: Action) -> Result<EditResult> {
    let blocks = find_code_blocks(text);
    let block = locate(&blocks, selections)?;
    let mut set = LineSet::parse(&block.fence_text);

    let applied = match action {
        Action::Toggle => resolve_toggle(&set, block, selections)?,
        other => other,
    };

    for sel in selections {
        let a = relative(block, sel.anchor)?;
        let b = relative(block, sel.head)?;
        if applied == Action::Unhighlight {
            set.remove_range(a, b);
        } else {
            set.add_range(a, b);
        }
    }

    let attr = set.format_attr();
    let new_fence = splice_attribute(&attr, &block.fence_text);
    log::debug!(
        "fence line {}: {:?} -> {:?}",
        block.fence_line,
        block.fence_text,
        new_fence
    );

    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    lines[block.fence_line - 1] = new_fence;

    Ok(EditResult {
        lines,
        fence_line: block.fence_line,
        applied,
        highlighted: set.sorted(),
    })
}

/// The action a toggle on `selections` would perform.
pub fn suggest_action(text: &str, selections: &[Selection]) -> Result<Action> {
    let blocks = find_code_blocks(text);
    let block = locate(&blocks, selections)?;
    resolve_toggle(&LineSet::parse(&block.fence_text), block, selections)
}

/// 1-based document line numbers of every highlighted code line.
pub fn highlighted_lines(text: &str) -> Vec<usize> {
    let mut out = Vec::new();
    for block in find_code_blocks(text) {
        let set = LineSet::parse(&block.fence_text);
        if set.is_empty() {
            continue;
        }
        for line in block.fence_line + 1..=block.last_line {
            if u32::try_from(block.offset(line)).is_ok_and(|rel| set.contains(rel)) {
                out.push(line);
            }
        }
    }
    out
}

fn locate<'a>(blocks: &'a [CodeBlock], selections: &[Selection]) -> Result<&'a CodeBlock> {
    let start = selections.iter().map(Selection::start).min().ok_or(Error::NoSelection)?;
    let end = selections.iter().map(Selection::end).max().ok_or(Error::NoSelection)?;
    if start == 0 {
        return Err(Error::ZeroLine);
    }
    enclosing_block(blocks, start, end).ok_or(Error::OutsideCodeBlock { start, end })
}

fn resolve_toggle(set: &LineSet, block: &CodeBlock, selections: &[Selection]) -> Result<Action> {
    for sel in selections {
        for line in sel.start()..=sel.end() {
            if !set.contains(relative(block, line)?) {
                return Ok(Action::Highlight);
            }
        }
    }
    Ok(Action::Unhighlight)
}

fn relative(block: &CodeBlock, line: usize) -> Result<u32> {
    u32::try_from(block.offset(line)).map_err(|_| Error::LineTooLarge(line))
}
