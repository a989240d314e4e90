//! Column-to-field mapping for record types
//!
//! A [`Schema`] is the table a [`Record`] registers to say which column names
//! it accepts and how to store a converted cell. Names are matched without
//! regard to case, so a `Version` column fills a field registered as
//! `"version"`.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::parser::cache::TypeCache;
use crate::parser::convert::{CellType, FieldConverter};
use crate::parser::error::ConversionError;
use crate::parser::traits::Record;

type Assign<R> =
    Box<dyn Fn(&mut R, &str, &FieldConverter) -> Result<(), ConversionError> + Send + Sync>;

/// One settable field of a record
pub struct FieldSlot<R> {
    name: &'static str,
    target: &'static str,
    assign: Assign<R>,
}

impl<R> FieldSlot<R> {
    /// Field name as registered
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rust type name of the field's value
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Convert `raw` and store it in `record`; on error `record` is untouched
    pub fn assign(
        &self,
        record: &mut R,
        raw: &str,
        converter: &FieldConverter,
    ) -> Result<(), ConversionError> {
        (self.assign)(record, raw, converter)
    }
}

impl<R> std::fmt::Debug for FieldSlot<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSlot")
            .field("name", &self.name)
            .field("target", &self.target)
            .finish()
    }
}

/// Fields of a record, keyed by lowercased name
#[derive(Debug)]
pub struct Schema<R> {
    fields: IndexMap<String, FieldSlot<R>>,
}

impl<R: 'static> Schema<R> {
    pub fn builder() -> SchemaBuilder<R> {
        SchemaBuilder {
            fields: IndexMap::new(),
        }
    }

    /// Position of the field matching `column`, ignoring case
    pub fn position(&self, column: &str) -> Option<usize> {
        self.fields.get_index_of(&column.to_lowercase())
    }

    pub fn slot(&self, position: usize) -> Option<&FieldSlot<R>> {
        self.fields.get_index(position).map(|(_, slot)| slot)
    }

    /// Field matching `column`, ignoring case
    pub fn field(&self, column: &str) -> Option<&FieldSlot<R>> {
        self.fields.get(&column.to_lowercase())
    }

    /// Registered field names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.values().map(|slot| slot.name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub struct SchemaBuilder<R> {
    fields: IndexMap<String, FieldSlot<R>>,
}

impl<R: 'static> SchemaBuilder<R> {
    /// Register a field filled from the column called `name`.
    ///
    /// Registering the same name twice (in any case) keeps the last setter.
    pub fn field<T, F>(mut self, name: &'static str, set: F) -> Self
    where
        T: CellType,
        F: Fn(&mut R, T) + Send + Sync + 'static,
    {
        let assign: Assign<R> = Box::new(move |record, raw, converter| {
            let value = converter.convert::<T>(raw)?;
            set(record, value);
            Ok(())
        });

        self.fields.insert(
            name.to_lowercase(),
            FieldSlot {
                name,
                target: std::any::type_name::<T>(),
                assign,
            },
        );
        self
    }

    pub fn build(self) -> Schema<R> {
        Schema {
            fields: self.fields,
        }
    }
}

/// Schemas built so far, one per record type
#[derive(Debug, Default)]
pub struct SchemaCache {
    schemas: TypeCache,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema for `R`, built on first use
    pub fn resolve<R: Record>(&self) -> Arc<Schema<R>> {
        self.schemas.get_or_insert_with::<R, Schema<R>, _>(R::schema)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
