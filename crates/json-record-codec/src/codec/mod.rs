//! JSON text encoding and decoding of records.
//!
//! [`JsonCodec`] is the entry point. It holds the schema registry, the
//! ambient codec and the options, is cheap to clone and is shared across
//! threads without locking. [`JsonCodec::encoder_for`] and
//! [`JsonCodec::decoder_for`] resolve a record type once and hand back a
//! boxed function for it.

pub mod ambient;
pub(crate) mod decoder;
pub(crate) mod encoder;
pub mod format;
pub(crate) mod writer;

pub use ambient::{AmbientJson, PassThrough, SerdeAmbient};
pub use format::{EscapePolicy, Style};

use std::sync::Arc;

use decoder::Decoder;
use encoder::Encoder;

use crate::error::CodecError;
use crate::schema::{RecordSchema, SchemaRegistry};
use crate::value::RecordRef;

pub type RecordEncoderFn = Box<dyn Fn(&RecordRef) -> Result<String, CodecError> + Send + Sync>;
pub type RecordDecoderFn = Box<dyn Fn(&str) -> Result<RecordRef, CodecError> + Send + Sync>;

/// What the decoder does with a non-array value in a collection field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollectionFallback {
    /// Decode it as an empty collection.
    #[default]
    Empty,
    /// Reject it as malformed input.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    /// Style used by [`JsonCodec::to_json`].
    pub style: Style,
    pub escape: EscapePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub collection_fallback: CollectionFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecOptions {
    pub encode: EncodeOptions,
    pub decode: DecodeOptions,
}

#[derive(Clone)]
pub struct JsonCodec {
    registry: Arc<SchemaRegistry>,
    ambient: Arc<dyn AmbientJson>,
    options: CodecOptions,
}

impl JsonCodec {
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            ambient: Arc::new(PassThrough),
            options: CodecOptions::default(),
        }
    }

    pub fn with_ambient(mut self, ambient: impl AmbientJson + 'static) -> Self {
        self.ambient = Arc::new(ambient);
        self
    }

    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Encode a record in the given style.
    ///
    /// Fails with [`CodecError::CircularReference`] when the record reaches
    /// itself through its fields.
    pub fn encode(&self, record: &RecordRef, style: Style) -> Result<String, CodecError> {
        tracing::trace!(record = %record.name(), ?style, "encode");
        Encoder::new(self.ambient.as_ref(), style, self.options.encode.escape).encode(record)
    }

    /// Encode a record in the configured default style.
    pub fn to_json(&self, record: &RecordRef) -> Result<String, CodecError> {
        self.encode(record, self.options.encode.style)
    }

    /// Decode `text` as a record of type `name`.
    pub fn decode(&self, name: &str, text: &str) -> Result<RecordRef, CodecError> {
        let schema = self.registry.resolve(name)?;
        self.decode_with(schema, text)
    }

    /// Like [`JsonCodec::decode`], with absent input reported as
    /// [`CodecError::Argument`].
    pub fn decode_opt(&self, name: &str, text: Option<&str>) -> Result<RecordRef, CodecError> {
        let text = text.ok_or(CodecError::Argument { name: "json" })?;
        self.decode(name, text)
    }

    /// Boxed encode function for records of type `name`.
    pub fn encoder_for(&self, name: &str, style: Style) -> Result<RecordEncoderFn, CodecError> {
        let schema = self.registry.resolve(name)?.clone();
        let codec = self.clone();
        Ok(Box::new(move |record: &RecordRef| {
            if record.name() != schema.name() {
                return Err(CodecError::mismatch(schema.name(), record.name()));
            }
            codec.encode(record, style)
        }))
    }

    /// Boxed decode function for records of type `name`.
    pub fn decoder_for(&self, name: &str) -> Result<RecordDecoderFn, CodecError> {
        let schema = self.registry.resolve(name)?.clone();
        let codec = self.clone();
        Ok(Box::new(move |text: &str| codec.decode_with(&schema, text)))
    }

    fn decode_with(&self, schema: &Arc<RecordSchema>, text: &str) -> Result<RecordRef, CodecError> {
        tracing::trace!(record = %schema.name(), len = text.len(), "decode");
        Decoder::new(&self.registry, self.ambient.as_ref(), &self.options.decode).decode(schema, text)
    }
}
