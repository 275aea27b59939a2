use std::collections::HashSet;
use std::fmt;

use crate::parse::{classify_entry, find_attr, AttrValue, Entry, Rejection};
use crate::ATTR_KEY;

/// The set of codeblock-relative line numbers marked as highlighted.
///
/// The set does not care whether numbering starts at 0 or 1; it stores whatever
/// offsets the caller hands it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSet {
    lines: HashSet<u32>,
}

impl LineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the set configured by a fence line's `hl_lines` attribute.
    ///
    /// Never fails: a missing attribute yields an empty set, and array entries
    /// that are not a number or a quoted ascending range are dropped.
    pub fn parse(fence_line: &str) -> Self {
        let mut set = Self::new();
        match find_attr(fence_line) {
            AttrValue::Absent => {}
            AttrValue::Scalar(line) => set.add_line(line),
            AttrValue::Array(body) => {
                for raw in body.split(',') {
                    match classify_entry(raw) {
                        Entry::Line(line) => set.add_line(line),
                        Entry::Range(start, end) => set.add_range(start, end),
                        Entry::Rejected(Rejection::Empty) => {}
                        Entry::Rejected(why) => {
                            log::debug!("dropping hl_lines entry {:?}: {}", raw.trim(), why);
                        }
                    }
                }
            }
        }
        set
    }

    pub fn add_line(&mut self, line: u32) {
        self.lines.insert(line);
    }

    /// Add every line between `a` and `b` inclusive, in either order.
    pub fn add_range(&mut self, a: u32, b: u32) {
        let (start, end) = ordered(a, b);
        self.lines.extend(start..=end);
    }

    /// Remove every line between `a` and `b` inclusive, in either order.
    pub fn remove_range(&mut self, a: u32, b: u32) {
        let (start, end) = ordered(a, b);
        if ((end - start) as usize) < self.lines.len() {
            for line in start..=end {
                self.lines.remove(&line);
            }
        } else {
            self.lines.retain(|line| !(start..=end).contains(line));
        }
    }

    pub fn contains(&self, line: u32) -> bool {
        self.lines.contains(&line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Members in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.lines.iter().copied()
    }

    /// Members in ascending order.
    pub fn sorted(&self) -> Vec<u32> {
        let mut lines: Vec<u32> = self.lines.iter().copied().collect();
        lines.sort_unstable();
        lines
    }

    /// Maximal runs of consecutive lines as inclusive `(start, end)` pairs, ascending.
    pub fn runs(&self) -> Vec<(u32, u32)> {
        let mut runs: Vec<(u32, u32)> = Vec::new();
        for line in self.sorted() {
            match runs.last_mut() {
                Some((_, end)) if end.checked_add(1) == Some(line) => *end = line,
                _ => runs.push((line, line)),
            }
        }
        runs
    }

    /// Canonical attribute text: every token double-quoted, consecutive lines
    /// merged into `"start-end"`, no spaces.
    pub fn format_attr(&self) -> String {
        let tokens: Vec<String> = self
            .runs()
            .into_iter()
            .map(|(start, end)| {
                if start == end {
                    format!("\"{start}\"")
                } else {
                    format!("\"{start}-{end}\"")
                }
            })
            .collect();
        format!("{ATTR_KEY}=[{}]", tokens.join(","))
    }
}

impl fmt::Display for LineSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_attr())
    }
}

impl FromIterator<u32> for LineSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl Extend<u32> for LineSet {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        self.lines.extend(iter);
    }
}

fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
