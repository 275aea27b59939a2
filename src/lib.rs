//! hllines — Highlighted Lines for Fenced Code Blocks
//!
//! This crate drives the `hl_lines` core over whole markdown documents: it finds
//! fenced code blocks, maps selections to block-relative lines, and rewrites the
//! fence line. It backs the `hllines` and `hlview` CLIs.

mod config;
mod engine;
mod fence;

#[cfg(feature = "pyo3")]
mod python;

use std::path::Path;

pub use config::{Config, ConfigError};
pub use engine::{edit_text, highlighted_lines, suggest_action, Action, EditResult, Selection};
pub use fence::{enclosing_block, find_code_blocks, is_fence, CodeBlock};
pub use hllines_core::{
    classify_entry, find_attr, format_attr, has_attribute_block, parse_line_set, splice_attribute,
    AttrValue, Entry, LineSet, Rejection, ATTR_KEY,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no lines selected")]
    NoSelection,

    #[error("line numbers are 1-based (got 0)")]
    ZeroLine,

    #[error("invalid selection {0:?}: expected N, A-B or A:B")]
    InvalidSelection(String),

    #[error("lines {start}..{end} are not inside a single fenced code block")]
    OutsideCodeBlock { start: usize, end: usize },

    #[error("line {0} is too far from its fence line")]
    LineTooLarge(usize),

    #[error("binary file rejected (NUL byte found)")]
    Binary,

    #[error("non-UTF8 file rejected")]
    NotUtf8,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Read a text document, rejecting binary and non-UTF-8 content.
pub fn read_document(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    document_from_bytes(bytes)
}

pub fn document_from_bytes(bytes: Vec<u8>) -> Result<String> {
    if bytes.contains(&0) {
        return Err(Error::Binary);
    }
    String::from_utf8(bytes).map_err(|_| Error::NotUtf8)
}
