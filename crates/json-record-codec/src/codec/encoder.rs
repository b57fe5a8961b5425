//! Record encoder.
//!
//! Walks a record graph field by field in declaration order, driven by each
//! field's [`Shape`]. Record identities on the current path are kept on a
//! stack; reaching an instance that is already on it is a circular
//! reference. Instances shared between siblings (`[x, x]`) are not cycles.

use super::ambient::AmbientJson;
use super::format::{number_text, EscapePolicy, Style};
use super::writer::JsonTextWriter;
use crate::error::CodecError;
use crate::schema::{Primitive, Shape};
use crate::value::{FieldValue, RecordId, RecordRef};

pub(crate) struct Encoder<'a> {
    ambient: &'a dyn AmbientJson,
    writer: JsonTextWriter,
    visiting: Vec<RecordId>,
}

impl<'a> Encoder<'a> {
    pub(crate) fn new(ambient: &'a dyn AmbientJson, style: Style, escape: EscapePolicy) -> Self {
        Self {
            ambient,
            writer: JsonTextWriter::new(style, escape),
            visiting: Vec::new(),
        }
    }

    /// Encode `record` as the root object. Nothing is returned on failure.
    pub(crate) fn encode(mut self, record: &RecordRef) -> Result<String, CodecError> {
        self.record(record)?;
        Ok(self.writer.finish())
    }

    fn record(&mut self, record: &RecordRef) -> Result<(), CodecError> {
        let id = record.id();
        if self.visiting.contains(&id) {
            tracing::debug!(
                record = %record.name(),
                depth = self.visiting.len(),
                "circular reference detected"
            );
            return Err(CodecError::CircularReference {
                record: record.name().to_string(),
                path: String::new(),
            });
        }
        self.visiting.push(id);
        let result = self.fields(record);
        self.visiting.pop();
        result
    }

    fn fields(&mut self, record: &RecordRef) -> Result<(), CodecError> {
        let values = record.read();
        self.writer.begin_object();
        for (field, value) in record.schema().fields().zip(values.iter()) {
            self.writer.key(&field.name)?;
            self.value(&field.shape, value)
                .map_err(|e| e.within_key(&field.name))?;
        }
        self.writer.end_object();
        Ok(())
    }

    fn value(&mut self, shape: &Shape, value: &FieldValue) -> Result<(), CodecError> {
        match (shape, value) {
            (shape, FieldValue::Null) => self.null(shape),
            (Shape::Primitive(Primitive::Bool) | Shape::PrimitiveNullable(Primitive::Bool), FieldValue::Bool(b)) => {
                self.writer.bool(*b);
                Ok(())
            }
            (
                Shape::Primitive(Primitive::Number(kind))
                | Shape::PrimitiveNullable(Primitive::Number(kind)),
                value,
            ) => {
                let text = number_text(*kind, value)?;
                self.writer.raw(&text);
                Ok(())
            }
            (Shape::Str | Shape::StrNullable, FieldValue::Str(s)) => self.writer.string(s),
            (Shape::Record(name) | Shape::RecordNullable(name), FieldValue::Record(record)) => {
                if record.name() != name {
                    return Err(CodecError::mismatch(name, record.name()));
                }
                self.record(record)
            }
            (
                Shape::Array(element)
                | Shape::ArrayNullable(element)
                | Shape::List(element)
                | Shape::ListNullable(element),
                FieldValue::Seq(items),
            ) => self.seq(element, items),
            (Shape::Ambient(name) | Shape::AmbientNullable(name), FieldValue::Json(json)) => {
                tracing::debug!(type_name = %name, "encoding ambient value");
                let json = self.ambient.to_json(name, json)?;
                self.writer.json(&json)
            }
            (shape, value) => Err(CodecError::mismatch(shape, value.type_name())),
        }
    }

    fn null(&mut self, shape: &Shape) -> Result<(), CodecError> {
        if let Shape::Primitive(_) = shape {
            return Err(CodecError::mismatch(shape, "null"));
        }
        self.writer.null();
        Ok(())
    }

    fn seq(&mut self, element: &Shape, items: &[FieldValue]) -> Result<(), CodecError> {
        self.writer.begin_array();
        for (i, item) in items.iter().enumerate() {
            self.writer.element();
            self.value(element, item).map_err(|e| e.within_index(i))?;
        }
        self.writer.end_array();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::codec::ambient::PassThrough;
    use crate::error::ErrorKind;
    use crate::schema::{RecordDecl, SchemaRegistry};
    use crate::type_def::TypeBuilder;

    fn registry() -> Arc<SchemaRegistry> {
        let t = TypeBuilder::new();
        let mut builder = SchemaRegistry::builder();
        builder
            .add(
                RecordDecl::new("Node")
                    .field("Id", t.int32())
                    .field("Next", t.nullable(t.named("Node")))
                    .field("Tags", t.list(t.str())),
            )
            .add(RecordDecl::new("Holder").field("Items", t.list(t.named("Node"))));
        Arc::new(builder.build().unwrap())
    }

    fn encode(record: &RecordRef, style: Style) -> Result<String, CodecError> {
        Encoder::new(&PassThrough, style, EscapePolicy::Minimal).encode(record)
    }

    #[test]
    fn null_collection_in_non_nullable_field_writes_empty_array() {
        let node = registry().new_record("Node").unwrap();
        node.set("Tags", FieldValue::Null).unwrap();
        assert_eq!(node.get("Tags").unwrap(), FieldValue::Seq(vec![]));
        assert_eq!(
            encode(&node, Style::Compact).unwrap(),
            r#"{"Id":0,"Next":null,"Tags":[]}"#
        );
    }

    #[test]
    fn cycle_error_reports_the_path() {
        let registry = registry();
        let (a, b) = (
            registry.new_record("Node").unwrap(),
            registry.new_record("Node").unwrap(),
        );
        a.set("Next", &b).unwrap();
        b.set("Next", &a).unwrap();
        let err = encode(&a, Style::Compact).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CircularReference);
        assert_eq!(err.path(), Some("/Next/Next"));
        b.set("Next", None::<RecordRef>).unwrap();
    }

    #[test]
    fn shared_instances_are_not_cycles() {
        let registry = registry();
        let node = registry.new_record("Node").unwrap();
        node.set("Id", 3).unwrap();
        let holder = registry.new_record("Holder").unwrap();
        holder.set("Items", vec![node.clone(), node]).unwrap();
        assert_eq!(
            encode(&holder, Style::Compact).unwrap(),
            r#"{"Items":[{"Id":3,"Next":null,"Tags":[]},{"Id":3,"Next":null,"Tags":[]}]}"#
        );
    }
}
