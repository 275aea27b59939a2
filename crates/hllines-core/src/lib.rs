//! hllines — Highlighted Lines for Fenced Code Blocks (core library)
//!
//! This crate holds the line-set model and the three text operations behind it:
//! parsing an `hl_lines` attribute out of a fence line, formatting a set back to
//! its canonical form, and splicing that form into the original fence line.
//!
//! None of these operations fail. Input is human-edited text, so anything that
//! cannot be understood contributes nothing instead of raising an error.

mod line_set;
mod parse;
mod splice;

pub use line_set::LineSet;
pub use parse::{classify_entry, find_attr, has_attribute_block, AttrValue, Entry, Rejection};
pub use splice::splice_attribute;

/// The attribute key, as written by the formatter.
pub const ATTR_KEY: &str = "hl_lines";

/// Parse the highlighted lines configured on a fence line.
pub fn parse_line_set(fence_line: &str) -> LineSet {
    LineSet::parse(fence_line)
}

/// Render a line set as `hl_lines=[...]`.
pub fn format_attr(lines: &LineSet) -> String {
    lines.format_attr()
}
