#![allow(dead_code)]

use std::sync::Arc;

use json_record_codec::{
    FieldValue, JsonCodec, RecordDecl, RecordRef, SchemaRegistry, TypeBuilder,
};

pub fn t() -> TypeBuilder {
    TypeBuilder::new()
}

pub fn registry() -> Arc<SchemaRegistry> {
    let t = t();
    let mut builder = SchemaRegistry::builder();
    builder
        .add(
            RecordDecl::new("SimpleModel")
                .field("Id", t.int32())
                .field("Name", t.str())
                .field("IsActive", t.bool()),
        )
        .add(
            RecordDecl::new("NumericModel")
                .field("IntValue", t.int32())
                .field("LongValue", t.int64())
                .field("DoubleValue", t.float64())
                .field("DecimalValue", t.decimal())
                .field("FloatValue", t.float32()),
        )
        .add(
            RecordDecl::new("NullableModel")
                .field("NullableString", t.nullable(t.str()))
                .field("NullableInt", t.optional(t.int32()))
                .field("NullableBool", t.optional(t.bool())),
        )
        .add(
            RecordDecl::new("NestedModel")
                .field("Id", t.int32())
                .field("NestedObject", t.nullable(t.named("SimpleModel"))),
        )
        .add(
            RecordDecl::new("ComplexModel")
                .field("Id", t.int32())
                .field("Name", t.str())
                .field("Price", t.float64())
                .field("Available", t.bool())
                .field("Description", t.nullable(t.str())),
        )
        .add(
            RecordDecl::new("ArrayModel")
                .field("Numbers", t.array(t.int32()))
                .field("Names", t.array(t.str())),
        )
        .add(
            RecordDecl::new("ListModel")
                .field("Numbers", t.list(t.int32()))
                .field("Names", t.list(t.str())),
        )
        .add(
            RecordDecl::new("CollectionWithNullsModel")
                .field("NullableArray", t.nullable(t.array(t.int32())))
                .field("NullableList", t.nullable(t.list(t.nullable(t.str())))),
        )
        .add(
            RecordDecl::new("NestedCollectionModel")
                .field("Id", t.int32())
                .field("Items", t.list(t.named("SimpleModel"))),
        )
        .add(
            RecordDecl::new("EmptyCollectionModel")
                .field("EmptyArray", t.array(t.int32()))
                .field("EmptyList", t.list(t.str())),
        )
        .add(
            RecordDecl::new("IntegerKindsModel")
                .field("SByteValue", t.sbyte())
                .field("ByteValue", t.byte())
                .field("Int16Value", t.int16())
                .field("UInt16Value", t.uint16())
                .field("Int32Value", t.int32())
                .field("UInt32Value", t.uint32())
                .field("Int64Value", t.int64())
                .field("UInt64Value", t.uint64()),
        )
        .add(
            RecordDecl::new("SelfReferencingModel")
                .field("Id", t.int32())
                .field("Name", t.str())
                .field("Next", t.nullable(t.named("SelfReferencingModel"))),
        )
        .add(
            RecordDecl::new("TreeNode")
                .field("Id", t.int32())
                .field("Children", t.list(t.named("TreeNode"))),
        )
        .add(
            RecordDecl::new("CircularParent")
                .field("Id", t.int32())
                .field("Child", t.nullable(t.named("CircularChild"))),
        )
        .add(
            RecordDecl::new("CircularChild")
                .field("Id", t.int32())
                .field("Parent", t.nullable(t.named("CircularParent"))),
        )
        .add(
            RecordDecl::new("EventModel")
                .field("Id", t.int32())
                .field("Location", t.named("Point"))
                .field("Extra", t.optional(t.named("Metadata"))),
        );
    Arc::new(builder.build().expect("test registry"))
}

pub fn codec() -> JsonCodec {
    JsonCodec::new(registry())
}

/// New instance of `name` with the given fields set.
pub fn record(codec: &JsonCodec, name: &str, fields: Vec<(&str, FieldValue)>) -> RecordRef {
    let record = codec.registry().new_record(name).expect("known record");
    for (field, value) in fields {
        record.set(field, value).expect("valid field value");
    }
    record
}

pub fn simple(codec: &JsonCodec, id: i32, name: &str, active: bool) -> RecordRef {
    record(
        codec,
        "SimpleModel",
        vec![
            ("Id", id.into()),
            ("Name", name.into()),
            ("IsActive", active.into()),
        ],
    )
}

/// Clear every field of `record` that holds a record, directly or inside a
/// sequence, so reference cycles built by a test are released.
pub fn unlink(record: &RecordRef) {
    let names: Vec<String> = record.schema().fields().map(|f| f.name.clone()).collect();
    for name in names {
        let holds_record = match record.get(&name).expect("declared field") {
            FieldValue::Record(_) => true,
            FieldValue::Seq(items) => items.iter().any(|item| item.as_record().is_some()),
            _ => false,
        };
        if holds_record {
            record.set(&name, FieldValue::Null).expect("reference fields accept null");
        }
    }
}
