use std::io::Cursor;

use bytes::Bytes;

use binschema::codec::types::{FieldValue, Value};
use binschema::codec::{decode_value, encode_value};
use binschema::internal::error::Error;
use binschema::schema::types::{ScalarType, Schema, SchemaField, SchemaVariant};

fn encode_to_vec(schema: &Schema, value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value(schema, value, &mut buf).unwrap();
    buf
}

fn linked_list_schema() -> Schema {
    Schema::Struct(vec![
        SchemaField::new("value", Schema::Scalar(ScalarType::I32)),
        SchemaField::new("next", Schema::option(Schema::Recurse(2))),
    ])
}

fn linked_list(items: &[i32]) -> Value {
    let mut next = Value::none();
    for item in items.iter().rev() {
        next = Value::some(Value::Struct(vec![
            FieldValue::new("value", Value::I32(*item)),
            FieldValue::new("next", next),
        ]));
    }
    match next {
        Value::Option(Some(head)) => *head,
        _ => panic!("empty list"),
    }
}

/// The recurse-through-option list has a fully pinned wire image.
#[test]
fn test_linked_list_exact_bytes() {
    let schema = linked_list_schema();
    let value = linked_list(&[7, 8]);

    let buf = encode_to_vec(&schema, &value);
    assert_eq!(buf, vec![0x07u8, 0x01, 0x08, 0x00]);
    assert_eq!(decode_value(&schema, &mut buf.as_slice()).unwrap(), value);
}

/// A recursive schema unfolds as deep as the payload asks.
#[test]
fn test_linked_list_long_roundtrip() {
    let schema = linked_list_schema();
    let items: Vec<i32> = (0..200).collect();
    let value = linked_list(&items);

    let buf = encode_to_vec(&schema, &value);
    assert_eq!(decode_value(&schema, &mut buf.as_slice()).unwrap(), value);
}

/// One schema exercising every container plus a sampling of leaves.
#[test]
fn test_kitchen_sink_roundtrip() {
    let schema = Schema::Struct(vec![
        SchemaField::new("id", Schema::Scalar(ScalarType::U64)),
        SchemaField::new("label", Schema::Str),
        SchemaField::new("blob", Schema::Bytes),
        SchemaField::new("alias", Schema::option(Schema::Str)),
        SchemaField::new("pos", Schema::fixed_seq(3, Schema::Scalar(ScalarType::F64))),
        SchemaField::new("tags", Schema::seq(Schema::Scalar(ScalarType::Char))),
        SchemaField::new(
            "pair",
            Schema::Tuple(vec![Schema::Scalar(ScalarType::I128), Schema::Unit]),
        ),
        SchemaField::new(
            "state",
            Schema::Enum(vec![
                SchemaVariant::new("Idle", Schema::Unit),
                SchemaVariant::new("Busy", Schema::Scalar(ScalarType::U16)),
            ]),
        ),
    ]);
    let value = Value::Struct(vec![
        FieldValue::new("id", Value::U64(u64::MAX)),
        FieldValue::new("label", Value::Str("héllo".to_string())),
        FieldValue::new("blob", Value::Bytes(Bytes::from_static(&[0x00u8, 0xFF]))),
        FieldValue::new("alias", Value::none()),
        FieldValue::new(
            "pos",
            Value::Seq(vec![Value::F64(0.5), Value::F64(-1.5), Value::F64(f64::MAX)]),
        ),
        FieldValue::new("tags", Value::Seq(vec![Value::Char('中'), Value::Char('x')])),
        FieldValue::new(
            "pair",
            Value::Tuple(vec![Value::I128(i128::MIN), Value::Unit]),
        ),
        FieldValue::new("state", Value::variant(1, "Busy", Value::U16(42))),
    ]);

    let buf = encode_to_vec(&schema, &value);
    assert_eq!(decode_value(&schema, &mut buf.as_slice()).unwrap(), value);
}

/// Decoding consumes exactly the bytes the encoder produced, leaving
/// anything after the message untouched.
#[test]
fn test_decode_consumes_exactly_the_message() {
    let schema = Schema::Tuple(vec![Schema::Scalar(ScalarType::U64), Schema::Str]);
    let value = Value::Tuple(vec![Value::U64(300), Value::Str("ok".to_string())]);

    let mut buf = encode_to_vec(&schema, &value);
    let message_len = buf.len() as u64;
    buf.extend_from_slice(&[0xAAu8, 0xBB]);

    let mut cursor = Cursor::new(buf);
    assert_eq!(decode_value(&schema, &mut cursor).unwrap(), value);
    assert_eq!(cursor.position(), message_len);
}

/// Identical inputs yield byte-identical output.
#[test]
fn test_encoding_is_deterministic() {
    let schema = Schema::seq(Schema::option(Schema::Scalar(ScalarType::I64)));
    let value = Value::Seq(vec![
        Value::some(Value::I64(-65)),
        Value::none(),
        Value::some(Value::I64(64)),
    ]);
    assert_eq!(encode_to_vec(&schema, &value), encode_to_vec(&schema, &value));
}

#[test]
fn test_bool_wire_image() {
    let schema = Schema::Scalar(ScalarType::Bool);
    assert_eq!(encode_to_vec(&schema, &Value::Bool(true)), vec![0x01u8]);
    assert_eq!(encode_to_vec(&schema, &Value::Bool(false)), vec![0x00u8]);

    let result = decode_value(&schema, &mut [0x02u8].as_slice());
    assert!(matches!(result, Err(Error::OutOfRange(_))));
}

#[test]
fn test_option_tag_out_of_range() {
    let schema = Schema::option(Schema::Unit);
    let result = decode_value(&schema, &mut [0x05u8].as_slice());
    assert!(matches!(result, Err(Error::OutOfRange(_))));
}

#[test]
fn test_truncated_stream_fails_cleanly() {
    let schema = Schema::Struct(vec![
        SchemaField::new("a", Schema::Scalar(ScalarType::U16)),
        SchemaField::new("b", Schema::Str),
    ]);
    let value = Value::Struct(vec![
        FieldValue::new("a", Value::U16(1)),
        FieldValue::new("b", Value::Str("truncate me".to_string())),
    ]);
    let buf = encode_to_vec(&schema, &value);

    // Every proper prefix of the message must fail, never hang or panic.
    for cut in 0..buf.len() {
        let result = decode_value(&schema, &mut buf[..cut].as_ref());
        assert!(matches!(result, Err(Error::EndOfStream(_))), "cut at {}", cut);
    }
}

/// Ordinal width tracks the variant count: 0 bytes for one variant, one
/// byte up to 256, two bytes from 257.
#[test]
fn test_enum_ordinal_widths() {
    let unit_variants = |count: usize| -> Schema {
        Schema::Enum(
            (0..count)
                .map(|i| SchemaVariant::new(format!("V{}", i), Schema::Unit))
                .collect(),
        )
    };

    let single = unit_variants(1);
    let buf = encode_to_vec(&single, &Value::variant(0, "V0", Value::Unit));
    assert_eq!(buf, Vec::<u8>::new());
    assert_eq!(
        decode_value(&single, &mut buf.as_slice()).unwrap(),
        Value::variant(0, "V0", Value::Unit)
    );

    let wide = unit_variants(256);
    let buf = encode_to_vec(&wide, &Value::variant(255, "V255", Value::Unit));
    assert_eq!(buf, vec![0xFFu8]);

    let wider = unit_variants(257);
    let buf = encode_to_vec(&wider, &Value::variant(256, "V256", Value::Unit));
    assert_eq!(buf, vec![0x00u8, 0x01]);
    assert_eq!(
        decode_value(&wider, &mut buf.as_slice()).unwrap(),
        Value::variant(256, "V256", Value::Unit)
    );
}

#[test]
fn test_enum_ordinal_out_of_range_on_decode() {
    let schema = Schema::Enum(vec![
        SchemaVariant::new("A", Schema::Unit),
        SchemaVariant::new("B", Schema::Unit),
        SchemaVariant::new("C", Schema::Unit),
    ]);
    let result = decode_value(&schema, &mut [0x03u8].as_slice());
    assert!(matches!(result, Err(Error::OutOfRange(_))));
}

#[test]
fn test_zero_variant_enum_is_uninhabited() {
    let schema = Schema::Enum(Vec::new());

    let mut buf = Vec::new();
    let result = encode_value(
        &schema,
        &Value::variant(0, "ghost", Value::Unit),
        &mut buf,
    );
    assert!(matches!(result, Err(Error::InvalidSchema(_))));

    let result = decode_value(&schema, &mut [0x00u8].as_slice());
    assert!(matches!(result, Err(Error::InvalidSchema(_))));
}

#[test]
fn test_encoder_rejects_non_conforming_values() {
    // Fixed-length seq with the wrong number of elements.
    let schema = Schema::fixed_seq(2, Schema::Scalar(ScalarType::U8));
    let mut buf = Vec::new();
    let result = encode_value(&schema, &Value::Seq(vec![Value::U8(1)]), &mut buf);
    assert!(matches!(result, Err(Error::NonConformingValue(_))));

    // Struct field name out of line with the schema.
    let schema = Schema::Struct(vec![SchemaField::new("a", Schema::Unit)]);
    let value = Value::Struct(vec![FieldValue::new("b", Value::Unit)]);
    let mut buf = Vec::new();
    let result = encode_value(&schema, &value, &mut buf);
    assert!(matches!(result, Err(Error::NonConformingValue(_))));

    // Leaf of the wrong type.
    let schema = Schema::Scalar(ScalarType::U8);
    let mut buf = Vec::new();
    let result = encode_value(&schema, &Value::Str("nope".to_string()), &mut buf);
    assert!(matches!(result, Err(Error::NonConformingValue(_))));
}

#[test]
fn test_unresolvable_recurse_fails_both_directions() {
    let schema = Schema::option(Schema::Recurse(5));
    let value = Value::some(Value::Unit);

    let mut buf = Vec::new();
    let result = encode_value(&schema, &value, &mut buf);
    assert!(matches!(result, Err(Error::InvalidSchema(_))));

    let result = decode_value(&schema, &mut [0x01u8].as_slice());
    assert!(matches!(result, Err(Error::InvalidSchema(_))));
}

/// A variable seq's count prefix does not reserve memory the stream never
/// backs, it just makes decoding fail at the first missing element.
#[test]
fn test_lying_seq_count_fails_with_end_of_stream() {
    let schema = Schema::seq(Schema::Scalar(ScalarType::U8));
    // Count says 2^32 elements, stream carries one byte.
    let mut buf = Vec::new();
    encode_value(
        &Schema::Scalar(ScalarType::U64),
        &Value::U64(1 << 32),
        &mut buf,
    )
    .unwrap();
    buf.push(0x07);
    let result = decode_value(&schema, &mut buf.as_slice());
    assert!(matches!(result, Err(Error::EndOfStream(_))));
}
