//! Schema model: field shapes, record layouts and the registry that owns them.

pub mod document;
pub mod registry;
#[allow(clippy::module_inception)]
pub mod schema;

pub use document::{FieldDocument, RecordDocument, SchemaDocument};
pub use registry::{RecordDecl, SchemaRegistry, SchemaRegistryBuilder};
pub use schema::*;
