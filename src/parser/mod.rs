//! Parser layer
//! - traits.rs: HeaderScanner and Record trait definitions
//! - header.rs: header line scanning into column offsets
//! - culture.rs: locale number formats for cultured parsing
//! - convert.rs: cell-to-value conversion strategies
//! - record.rs: column-to-field schemas and their cache
//! - tabular.rs: fixed-width table decoder
//! - types.rs: Common record types (PackageInfo)

pub mod cache;
pub mod convert;
pub mod culture;
pub mod error;
pub mod header;
pub mod record;
pub mod tabular;
pub mod traits;
pub mod types;

pub use convert::{CellType, FieldConverter, Strategies};
pub use culture::Culture;
pub use error::ConversionError;
pub use header::{HeaderCollection, HeaderField, WhitespaceHeaderScanner};
pub use record::{Schema, SchemaBuilder, SchemaCache};
pub use tabular::{Rows, TabularDecoder};
pub use traits::{HeaderScanner, Record};
pub use types::PackageInfo;
