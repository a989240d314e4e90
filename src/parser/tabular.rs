//! Fixed-width table decoder
//!
//! Decodes the column-aligned output package managers print, e.g.
//!
//! ```text
//! Name            Id              Version  Source
//! -----------------------------------------------
//! Microsoft Edge  Microsoft.Edge  102.0    winget
//! 1 package found.
//! ```
//!
//! The first line is the header, the line after it is a separator rule, and
//! every later line is a candidate row. A row is only decoded when it still
//! lines up with the header: it must reach past the last column's offset and
//! have a space right before every column after the first. Anything else
//! (summaries, warnings) is skipped.

use std::iter::{Filter, Skip};
use std::str::Split;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::DecoderConfig;
use crate::parser::convert::FieldConverter;
use crate::parser::header::{HeaderCollection, WhitespaceHeaderScanner};
use crate::parser::record::{Schema, SchemaCache};
use crate::parser::traits::{HeaderScanner, Record};

/// Number of lines between the header and the first row
pub const DEFAULT_SEPARATOR_LINES: usize = 1;

type Lines<'a> = Filter<Split<'a, [char; 2]>, fn(&&str) -> bool>;

/// Decodes whitespace-aligned tables into records
#[derive(Debug)]
pub struct TabularDecoder<S = WhitespaceHeaderScanner> {
    scanner: S,
    converter: FieldConverter,
    schemas: SchemaCache,
    separator_lines: usize,
}

impl TabularDecoder {
    pub fn new() -> Self {
        Self::with_scanner(WhitespaceHeaderScanner, FieldConverter::new())
    }

    pub fn from_config(config: &DecoderConfig) -> Self {
        Self::with_scanner(WhitespaceHeaderScanner, FieldConverter::from_config(config))
            .separator_lines(config.separator_lines)
    }
}

impl Default for TabularDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: HeaderScanner> TabularDecoder<S> {
    pub fn with_scanner(scanner: S, converter: FieldConverter) -> Self {
        Self {
            scanner,
            converter,
            schemas: SchemaCache::new(),
            separator_lines: DEFAULT_SEPARATOR_LINES,
        }
    }

    /// Set how many lines after the header are skipped before rows start
    pub fn separator_lines(mut self, separator_lines: usize) -> Self {
        self.separator_lines = separator_lines;
        self
    }

    pub fn converter(&self) -> &FieldConverter {
        &self.converter
    }

    /// Decode `text` into records of type `R`, lazily and in input order.
    ///
    /// Input with fewer than two non-empty lines yields nothing.
    pub fn decode<'a, R: Record>(&'a self, text: &'a str) -> Rows<'a, R> {
        let mut lines = split_lines(text);
        let headers = lines
            .next()
            .map(|line| self.scanner.scan(line))
            .unwrap_or_default();
        debug!(
            "Decoding table with {} columns: {:?}",
            headers.len(),
            headers.fields().iter().map(|f| &f.name).collect::<Vec<_>>()
        );

        let schema = self.schemas.resolve::<R>();
        let bindings = headers
            .fields()
            .iter()
            .map(|field| schema.position(&field.name))
            .collect();

        Rows {
            lines: lines.skip(self.separator_lines),
            headers,
            schema,
            bindings,
            converter: &self.converter,
        }
    }
}

/// Lazily decoded rows of one table
pub struct Rows<'a, R> {
    lines: Skip<Lines<'a>>,
    headers: HeaderCollection,
    schema: Arc<Schema<R>>,
    /// Schema position for each header column, `None` when no field matches
    bindings: Vec<Option<usize>>,
    converter: &'a FieldConverter,
}

impl<R: Record> Rows<'_, R> {
    /// Columns discovered in the header line
    pub fn headers(&self) -> &HeaderCollection {
        &self.headers
    }

    fn decode_line(&self, line: &str) -> Option<R> {
        let bounds = char_bounds(line);
        if !is_aligned(line, &bounds, &self.headers) {
            debug!("Skipping line not aligned with header: {:?}", line);
            return None;
        }

        let line_len = bounds.len() - 1;
        let mut record = R::default();
        for (index, binding) in self.bindings.iter().enumerate() {
            let Some(slot) = binding.and_then(|position| self.schema.slot(position)) else {
                continue;
            };
            let Some((start, end)) = self
                .headers
                .span(index, line_len)
                .filter(|(start, end)| start <= end)
            else {
                continue;
            };

            let cell = line[bounds[start]..bounds[end]].trim();
            if let Err(e) = slot.assign(&mut record, cell, self.converter) {
                trace!("Leaving field '{}' unset: {}", slot.name(), e);
            }
        }

        Some(record)
    }
}

impl<R: Record> Iterator for Rows<'_, R> {
    type Item = R;

    fn next(&mut self) -> Option<R> {
        while let Some(line) = self.lines.next() {
            if let Some(record) = self.decode_line(line) {
                return Some(record);
            }
        }
        None
    }
}

impl<R> std::fmt::Debug for Rows<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rows")
            .field("headers", &self.headers)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

fn is_non_empty(line: &&str) -> bool {
    !line.is_empty()
}

/// Non-empty lines of `text`, split on any mix of `\r` and `\n`
fn split_lines(text: &str) -> Lines<'_> {
    text.split(['\r', '\n']).filter(is_non_empty as fn(&&str) -> bool)
}

/// Byte offset of every char in `line`, followed by `line.len()`
fn char_bounds(line: &str) -> Vec<usize> {
    line.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .collect()
}

/// A row lines up with the header when it extends past the last column's
/// offset and every column after the first is preceded by a space.
fn is_aligned(line: &str, bounds: &[usize], headers: &HeaderCollection) -> bool {
    let line_len = bounds.len() - 1;
    if line_len <= headers.max_offset() {
        return false;
    }

    headers.fields().iter().skip(1).all(|field| {
        field
            .offset
            .checked_sub(1)
            .is_some_and(|before| &line[bounds[before]..bounds[field.offset]] == " ")
    })
}
