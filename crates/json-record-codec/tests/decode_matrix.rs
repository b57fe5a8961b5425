mod support;

use json_record_codec::{
    CodecError, CodecOptions, CollectionFallback, Decimal, DecodeOptions, ErrorKind, FieldValue,
};

use support::codec;

#[test]
fn missing_fields_keep_their_defaults() {
    let codec = codec();
    let model = codec.decode("SimpleModel", r#"{"Id":42}"#).unwrap();
    assert_eq!(model.get("Id").unwrap(), FieldValue::Int(42));
    assert_eq!(model.get("Name").unwrap(), FieldValue::Str(String::new()));
    assert_eq!(model.get("IsActive").unwrap(), FieldValue::Bool(false));

    let empty = codec.decode("ListModel", "{}").unwrap();
    assert_eq!(empty.get("Numbers").unwrap(), FieldValue::Seq(vec![]));
    assert_eq!(
        empty,
        codec.registry().new_record("ListModel").unwrap()
    );
}

#[test]
fn any_whitespace_layout_and_unknown_keys() {
    let codec = codec();
    let text = "\n {\t\"Extra\" : [1, {\"x\": null}],\r\n  \"Name\" :\"A\" , \"Id\": 5 }  ";
    let model = codec.decode("SimpleModel", text).unwrap();
    assert_eq!(model.get("Id").unwrap(), FieldValue::Int(5));
    assert_eq!(model.get("Name").unwrap(), FieldValue::Str("A".into()));
}

#[test]
fn keys_are_case_sensitive() {
    let codec = codec();
    let model = codec.decode("SimpleModel", r#"{"id":1,"NAME":"x"}"#).unwrap();
    assert_eq!(model.get("Id").unwrap(), FieldValue::Int(0));
    assert_eq!(model.get("Name").unwrap(), FieldValue::Str(String::new()));
}

#[test]
fn numbers_decode_per_kind_from_exact_text() {
    let codec = codec();
    let text = r#"{"IntValue":123,"LongValue":9876543210,"DoubleValue":3.14159,"DecimalValue":99.99,"FloatValue":2.5}"#;
    let model = codec.decode("NumericModel", text).unwrap();
    assert_eq!(model.get("IntValue").unwrap(), FieldValue::Int(123));
    assert_eq!(model.get("LongValue").unwrap(), FieldValue::Int(9_876_543_210));
    assert_eq!(model.get("DoubleValue").unwrap(), FieldValue::Float64(3.14159));
    assert_eq!(
        model.get("DecimalValue").unwrap(),
        FieldValue::Decimal(Decimal::new(9999, 2))
    );
    assert_eq!(model.get("FloatValue").unwrap(), FieldValue::Float32(2.5));

    let precise = codec
        .decode("NumericModel", r#"{"DecimalValue":0.1000000000000000000000000001}"#)
        .unwrap();
    assert_eq!(
        precise.get("DecimalValue").unwrap().as_decimal().unwrap().to_string(),
        "0.1000000000000000000000000001"
    );

    let wide = codec
        .decode(
            "IntegerKindsModel",
            r#"{"UInt64Value":18446744073709551615,"Int64Value":-9223372036854775808}"#,
        )
        .unwrap();
    assert_eq!(wide.get("UInt64Value").unwrap(), FieldValue::UInt(u64::MAX));
    assert_eq!(wide.get("Int64Value").unwrap(), FieldValue::Int(i64::MIN));
}

#[test]
fn incompatible_numbers_are_malformed() {
    let codec = codec();
    for (name, text, path) in [
        ("NumericModel", r#"{"IntValue":1.5}"#, "/IntValue"),
        ("NumericModel", r#"{"IntValue":2147483648}"#, "/IntValue"),
        ("NumericModel", r#"{"IntValue":"1"}"#, "/IntValue"),
        ("NumericModel", r#"{"FloatValue":1e39}"#, "/FloatValue"),
        ("IntegerKindsModel", r#"{"ByteValue":-1}"#, "/ByteValue"),
        ("IntegerKindsModel", r#"{"SByteValue":128}"#, "/SByteValue"),
        ("SimpleModel", r#"{"IsActive":"true"}"#, "/IsActive"),
        ("SimpleModel", r#"{"Name":5}"#, "/Name"),
    ] {
        let err = codec.decode(name, text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput, "{text}");
        assert_eq!(err.path(), Some(path), "{text}");
    }
}

#[test]
fn nulls_by_shape() {
    let codec = codec();
    let model = codec
        .decode(
            "NullableModel",
            r#"{"NullableString":null,"NullableInt":null,"NullableBool":null}"#,
        )
        .unwrap();
    for field in ["NullableString", "NullableInt", "NullableBool"] {
        assert!(model.get(field).unwrap().is_null());
    }

    let simple = codec.decode("SimpleModel", r#"{"Id":1,"Name":null}"#).unwrap();
    assert_eq!(simple.get("Name").unwrap(), FieldValue::Null);

    let lists = codec
        .decode("ListModel", r#"{"Numbers":null,"Names":["a",null]}"#)
        .unwrap();
    assert_eq!(lists.get("Numbers").unwrap(), FieldValue::Seq(vec![]));
    assert_eq!(
        lists.get("Names").unwrap(),
        FieldValue::Seq(vec![FieldValue::Str("a".into()), FieldValue::Null])
    );

    let nested = codec
        .decode("NestedModel", r#"{"Id":1,"NestedObject":null}"#)
        .unwrap();
    assert!(nested.get("NestedObject").unwrap().is_null());

    let err = codec.decode("SimpleModel", r#"{"Id":null}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn nested_records_and_collections() {
    let codec = codec();
    let text = r#"{
        "Id": 1,
        "Items": [
            {"Id": 1, "Name": "First", "IsActive": true},
            {"Id": 2, "Name": "Second"}
        ]
    }"#;
    let model = codec.decode("NestedCollectionModel", text).unwrap();
    let items = model.get("Items").unwrap();
    let items = items.as_seq().unwrap();
    assert_eq!(items.len(), 2);
    let second = items[1].as_record().unwrap();
    assert_eq!(second.name(), "SimpleModel");
    assert_eq!(second.get("Name").unwrap(), FieldValue::Str("Second".into()));
    assert_eq!(second.get("IsActive").unwrap(), FieldValue::Bool(false));

    let with_nulls = codec
        .decode(
            "CollectionWithNullsModel",
            r#"{"NullableArray":[1,2],"NullableList":["a",null]}"#,
        )
        .unwrap();
    assert_eq!(
        with_nulls.get("NullableList").unwrap(),
        FieldValue::Seq(vec![FieldValue::Str("a".into()), FieldValue::Null])
    );
}

#[test]
fn non_array_collections_follow_the_fallback_policy() {
    let lenient = codec();
    let model = lenient
        .decode("ArrayModel", r#"{"Numbers":{"0":1},"Names":"abc"}"#)
        .unwrap();
    assert_eq!(model.get("Numbers").unwrap(), FieldValue::Seq(vec![]));
    assert_eq!(model.get("Names").unwrap(), FieldValue::Seq(vec![]));

    let strict = codec().with_options(CodecOptions {
        decode: DecodeOptions {
            collection_fallback: CollectionFallback::Strict,
        },
        ..Default::default()
    });
    let err = strict.decode("ArrayModel", r#"{"Names":"abc"}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert_eq!(err.path(), Some("/Names"));
}

#[test]
fn nested_error_paths() {
    let codec = codec();
    let err = codec
        .decode(
            "NestedCollectionModel",
            r#"{"Items":[{"Id":1},{"Id":2,"IsActive":1}]}"#,
        )
        .unwrap_err();
    assert_eq!(err.path(), Some("/Items/1/IsActive"));
    assert_eq!(
        err.to_string(),
        "malformed input at `/Items/1/IsActive`: expected a boolean, found a number"
    );
}

#[test]
fn absent_empty_and_invalid_input() {
    let codec = codec();
    let err = codec.decode_opt("SimpleModel", None).unwrap_err();
    assert!(matches!(err, CodecError::Argument { name: "json" }));
    assert_eq!(err.kind(), ErrorKind::Argument);

    for text in ["", "   ", "not json", "{\"Id\":", "[1,2]", "\"text\"", "{} {}"] {
        let err = codec.decode_opt("SimpleModel", Some(text)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput, "{text:?}");
    }
}

#[test]
fn unknown_record_name() {
    let err = codec().decode("Missing", "{}").unwrap_err();
    assert!(matches!(err, CodecError::UnknownSchema(ref name) if name == "Missing"));
    assert_eq!(err.kind(), ErrorKind::Other);
}
