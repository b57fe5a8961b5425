//! SchemaRegistry: the set of record schemas a codec works against.
//!
//! Records are declared first and classified together in
//! [`SchemaRegistryBuilder::build`], so a field may name any record of the
//! same registry, including records declared later and the record itself.
//! The built registry is immutable and shared read-only.

use std::sync::Arc;

use indexmap::IndexMap;

use super::document::SchemaDocument;
use super::schema::{FieldSchema, RecordSchema};
use crate::error::{CodecError, SchemaError};
use crate::type_def::{classify, TypeExpr};
use crate::value::RecordRef;

/// Declaration of one record type: its name and declared field types in
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDecl {
    pub name: String,
    pub fields: Vec<(String, TypeExpr)>,
}

impl RecordDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, type_: TypeExpr) -> Self {
        self.fields.push((name.into(), type_));
        self
    }
}

/// Collects record declarations for a [`SchemaRegistry`].
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistryBuilder {
    decls: Vec<RecordDecl>,
}

impl SchemaRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, decl: RecordDecl) -> &mut Self {
        self.decls.push(decl);
        self
    }

    /// Add every record of a schema document.
    pub fn add_document(&mut self, document: &SchemaDocument) -> Result<&mut Self, SchemaError> {
        for decl in document.to_decls()? {
            self.add(decl);
        }
        Ok(self)
    }

    /// Classify every declared field and freeze the result.
    pub fn build(&self) -> Result<SchemaRegistry, SchemaError> {
        let mut names: IndexMap<&str, &RecordDecl> = IndexMap::new();
        for decl in &self.decls {
            if names.insert(decl.name.as_str(), decl).is_some() {
                return Err(SchemaError::DuplicateRecord(decl.name.clone()));
            }
        }

        let is_record = |name: &str| names.contains_key(name);
        let mut records = IndexMap::with_capacity(names.len());
        for decl in names.values() {
            let fields = decl
                .fields
                .iter()
                .map(|(name, type_)| FieldSchema::new(name.clone(), classify(type_, &is_record)));
            let schema = RecordSchema::new(decl.name.clone(), fields)?;
            records.insert(decl.name.clone(), Arc::new(schema));
        }

        tracing::debug!(records = records.len(), "schema registry built");
        Ok(SchemaRegistry { records })
    }
}

/// Immutable set of record schemas, keyed by record name in declaration
/// order.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    records: IndexMap<String, Arc<RecordSchema>>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::new()
    }

    /// Build a registry from a JSON schema document.
    pub fn from_json_document(text: &str) -> Result<Self, SchemaError> {
        let document = SchemaDocument::from_json(text)?;
        let mut builder = Self::builder();
        builder.add_document(&document)?;
        builder.build()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RecordSchema>> {
        self.records.get(name)
    }

    /// Look up a schema, failing with [`CodecError::UnknownSchema`].
    pub fn resolve(&self, name: &str) -> Result<&Arc<RecordSchema>, CodecError> {
        self.get(name)
            .ok_or_else(|| CodecError::UnknownSchema(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Create an instance of the named record with every field at its
    /// default.
    pub fn new_record(&self, name: &str) -> Result<RecordRef, CodecError> {
        Ok(RecordRef::new(self.resolve(name)?.clone()))
    }
}
