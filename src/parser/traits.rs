//! Parser trait definitions

#[cfg(test)]
use mockall::automock;

use crate::parser::header::HeaderCollection;
use crate::parser::record::Schema;

/// Trait for discovering columns in a table header line
#[cfg_attr(test, automock)]
pub trait HeaderScanner: Send + Sync {
    /// Scan one header line into its columns, ordered by offset
    fn scan(&self, line: &str) -> HeaderCollection;
}

/// Trait for types a table row can be decoded into
///
/// Implementors describe which columns they accept and how to store a
/// converted cell, so the decoder never needs to know the record's shape.
pub trait Record: Default + 'static {
    /// Column-to-field table for this record type
    fn schema() -> Schema<Self>;
}
