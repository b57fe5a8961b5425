//! `json-record-codec`: schema-driven JSON text codec for records.
//!
//! A [`SchemaRegistry`] describes record types as ordered lists of fields with
//! classified [`Shape`]s. A [`JsonCodec`] walks [`RecordRef`] instances against
//! those schemas to produce compact or indented JSON text, and walks parsed
//! JSON back into fresh instances.
//!
//! ```
//! use std::sync::Arc;
//! use json_record_codec::{JsonCodec, RecordDecl, SchemaRegistry, Style, TypeBuilder};
//!
//! let t = TypeBuilder::new();
//! let mut builder = SchemaRegistry::builder();
//! builder.add(
//!     RecordDecl::new("User")
//!         .field("Id", t.int32())
//!         .field("Name", t.str()),
//! );
//! let registry = Arc::new(builder.build().unwrap());
//! let codec = JsonCodec::new(registry.clone());
//!
//! let user = registry.new_record("User").unwrap();
//! user.set("Id", 7).unwrap();
//! user.set("Name", "Ada").unwrap();
//!
//! let text = codec.encode(&user, Style::Compact).unwrap();
//! assert_eq!(text, r#"{"Id":7,"Name":"Ada"}"#);
//! assert_eq!(codec.decode("User", &text).unwrap(), user);
//! ```

pub mod codec;
pub mod error;
pub mod schema;
pub mod type_def;
pub mod value;

pub use codec::{
    AmbientJson, CodecOptions, CollectionFallback, DecodeOptions, EncodeOptions, EscapePolicy,
    JsonCodec, PassThrough, RecordDecoderFn, RecordEncoderFn, SerdeAmbient, Style,
};
pub use error::{CodecError, ErrorKind, SchemaError};
pub use schema::{
    FieldSchema, NumberKind, Primitive, RecordDecl, RecordSchema, SchemaDocument, SchemaRegistry,
    SchemaRegistryBuilder, Shape,
};
pub use type_def::{TypeBuilder, TypeExpr};
pub use value::{Decimal, FieldValue, ParseDecimalError, RecordId, RecordRef};
