//! Record decoder.
//!
//! The text is parsed once into a [`serde_json::Value`] tree; records are
//! then rebuilt from the tree by looking up each declared field by its exact
//! key. Keys the schema does not declare are ignored and missing keys leave
//! the field at its default.

use std::sync::Arc;

use serde_json::Value;

use super::ambient::AmbientJson;
use super::format::parse_number;
use super::{CollectionFallback, DecodeOptions};
use crate::error::CodecError;
use crate::schema::{Primitive, RecordSchema, SchemaRegistry, Shape};
use crate::value::field_value::coerce;
use crate::value::{FieldValue, RecordRef};

pub(crate) struct Decoder<'a> {
    registry: &'a SchemaRegistry,
    ambient: &'a dyn AmbientJson,
    options: &'a DecodeOptions,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(
        registry: &'a SchemaRegistry,
        ambient: &'a dyn AmbientJson,
        options: &'a DecodeOptions,
    ) -> Self {
        Self {
            registry,
            ambient,
            options,
        }
    }

    pub(crate) fn decode(&self, schema: &Arc<RecordSchema>, text: &str) -> Result<RecordRef, CodecError> {
        let root: Value =
            serde_json::from_str(text).map_err(|e| CodecError::malformed(e.to_string()))?;
        self.record(schema, &root)
    }

    fn record(&self, schema: &Arc<RecordSchema>, json: &Value) -> Result<RecordRef, CodecError> {
        let object = json.as_object().ok_or_else(|| {
            CodecError::malformed(format!(
                "expected an object for record `{}`, found {}",
                schema.name(),
                json_type(json)
            ))
        })?;
        let values = schema
            .fields()
            .map(|field| match object.get(&field.name) {
                None => Ok(FieldValue::default_for(&field.shape)),
                Some(json) => self
                    .value(&field.shape, json)
                    .map_err(|e| e.within_key(&field.name)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RecordRef::from_values(schema.clone(), values))
    }

    fn value(&self, shape: &Shape, json: &Value) -> Result<FieldValue, CodecError> {
        // Stored the way `set` stores null; primitives fall through and are rejected.
        if json.is_null() && shape.accepts_null() {
            return coerce(FieldValue::Null, shape);
        }
        match shape {
            Shape::Primitive(p) | Shape::PrimitiveNullable(p) => primitive(*p, json),
            Shape::Str | Shape::StrNullable => match json {
                Value::String(s) => Ok(FieldValue::Str(s.clone())),
                other => Err(unexpected("a string", other)),
            },
            Shape::Record(name) | Shape::RecordNullable(name) => {
                let schema = self.registry.resolve(name)?;
                self.record(schema, json).map(FieldValue::Record)
            }
            Shape::Array(element)
            | Shape::ArrayNullable(element)
            | Shape::List(element)
            | Shape::ListNullable(element) => self.seq(element, json),
            Shape::Ambient(name) | Shape::AmbientNullable(name) => {
                tracing::debug!(type_name = %name, "decoding ambient value");
                let value = self.ambient.from_json(name, json)?;
                Ok(match value {
                    Value::Null => FieldValue::Null,
                    value => FieldValue::Json(value),
                })
            }
        }
    }

    fn seq(&self, element: &Shape, json: &Value) -> Result<FieldValue, CodecError> {
        let Value::Array(items) = json else {
            return match self.options.collection_fallback {
                CollectionFallback::Empty => {
                    tracing::debug!(found = json_type(json), "non-array collection decoded as empty");
                    Ok(FieldValue::Seq(Vec::new()))
                }
                CollectionFallback::Strict => Err(unexpected("an array", json)),
            };
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.value(element, item).map_err(|e| e.within_index(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::Seq)
    }
}

fn primitive(p: Primitive, json: &Value) -> Result<FieldValue, CodecError> {
    match (p, json) {
        (Primitive::Bool, Value::Bool(b)) => Ok(FieldValue::Bool(*b)),
        (Primitive::Bool, other) => Err(unexpected("a boolean", other)),
        // Exact token text, not a lossy f64.
        (Primitive::Number(kind), Value::Number(n)) => parse_number(kind, &n.to_string()),
        (Primitive::Number(kind), other) => Err(unexpected(&format!("a {} number", kind), other)),
    }
}

fn unexpected(expected: &str, found: &Value) -> CodecError {
    CodecError::malformed(format!("expected {}, found {}", expected, json_type(found)))
}

fn json_type(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
