//! Header line scanning
//!
//! A header line names each column at the position where the column starts:
//!
//! ```text
//! Name            Id              Version  Source
//! ^0              ^16             ^32      ^41
//! ```
//!
//! Every word plus the whitespace after it is one column. A column ends where
//! the next one begins, and the last column runs to the end of the line.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::traits::HeaderScanner;

/// A word followed by the gap up to the next word
static WORD_WITH_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+\s*").expect("static regex must compile"));

/// One column title and where it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: String,
    /// Char index (not byte index) of the first character of `name`
    pub offset: usize,
}

impl HeaderField {
    pub fn new(name: impl Into<String>, offset: usize) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

/// Columns of one header line, ordered by offset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCollection {
    fields: Vec<HeaderField>,
    max_offset: usize,
}

impl HeaderCollection {
    pub fn new(fields: Vec<HeaderField>) -> Self {
        let max_offset = fields.iter().map(|f| f.offset).max().unwrap_or(0);
        Self { fields, max_offset }
    }

    pub fn fields(&self) -> &[HeaderField] {
        &self.fields
    }

    /// Largest column offset, or 0 when there are no columns
    pub fn max_offset(&self) -> usize {
        self.max_offset
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The column following the one at `index`, if any
    pub fn next(&self, index: usize) -> Option<&HeaderField> {
        self.fields.get(index + 1)
    }

    /// Char range `[start, end)` of the column at `index` in a line of
    /// `line_len` chars
    pub fn span(&self, index: usize, line_len: usize) -> Option<(usize, usize)> {
        let field = self.fields.get(index)?;
        let end = self.next(index).map_or(line_len, |next| next.offset);
        Some((field.offset, end))
    }
}

/// Scans header lines whose columns are separated by whitespace
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceHeaderScanner;

impl WhitespaceHeaderScanner {
    pub fn new() -> Self {
        Self
    }
}

impl HeaderScanner for WhitespaceHeaderScanner {
    fn scan(&self, line: &str) -> HeaderCollection {
        let mut fields = Vec::new();
        let mut chars_before = 0;
        let mut scanned_to = 0;

        for word in WORD_WITH_GAP.find_iter(line) {
            // Regex positions are bytes; columns are counted in chars
            chars_before += line[scanned_to..word.start()].chars().count();
            fields.push(HeaderField::new(word.as_str().trim_end(), chars_before));
            chars_before += word.as_str().chars().count();
            scanned_to = word.end();
        }

        HeaderCollection::new(fields)
    }
}
