// The meta-schema: the fixed schema whose values are schemas
//
// Schema encode/decode is a special case of the value codec: map the
// schema to its meta value and run the ordinary walk with the meta-schema
// in the driver's seat. The meta-schema is self-referential through
// `Recurse` back-references and stable; encoding it under itself yields a
// canonical byte string.

use std::io::{Read, Write};

use crate::codec::{decode_value, encode_value};
use crate::internal::error::Result;
use crate::schema::mapper::SchemaMapper;
use crate::schema::types::{ScalarType, Schema, SchemaField, SchemaVariant};

/// Returns the meta-schema.
///
/// The variant order is canonical and fixes the wire discriminants:
/// Scalar 0, Str 1, Bytes 2, Unit 3, Option 4, Seq 5, Tuple 6, Struct 7,
/// Enum 8, Recurse 9. Ten outer variants and fourteen scalar variants
/// both fit one byte, so every discriminant in a schema message occupies
/// exactly one byte.
pub fn meta_schema() -> Schema {
    let scalar = Schema::Enum(vec![
        SchemaVariant::new("U8", Schema::Unit),
        SchemaVariant::new("U16", Schema::Unit),
        SchemaVariant::new("U32", Schema::Unit),
        SchemaVariant::new("U64", Schema::Unit),
        SchemaVariant::new("U128", Schema::Unit),
        SchemaVariant::new("I8", Schema::Unit),
        SchemaVariant::new("I16", Schema::Unit),
        SchemaVariant::new("I32", Schema::Unit),
        SchemaVariant::new("I64", Schema::Unit),
        SchemaVariant::new("I128", Schema::Unit),
        SchemaVariant::new("F32", Schema::Unit),
        SchemaVariant::new("F64", Schema::Unit),
        SchemaVariant::new("Char", Schema::Unit),
        SchemaVariant::new("Bool", Schema::Unit),
    ]);
    // Recurse(1) inside Option reaches the outer enum; Recurse(2) skips
    // the local struct or seq wrapper; Recurse(3) additionally skips the
    // field-pair struct.
    let field_pair = Schema::Struct(vec![
        SchemaField::new("name", Schema::Str),
        SchemaField::new("inner", Schema::Recurse(3)),
    ]);
    Schema::Enum(vec![
        SchemaVariant::new("Scalar", scalar),
        SchemaVariant::new("Str", Schema::Unit),
        SchemaVariant::new("Bytes", Schema::Unit),
        SchemaVariant::new("Unit", Schema::Unit),
        SchemaVariant::new("Option", Schema::Recurse(1)),
        SchemaVariant::new(
            "Seq",
            Schema::Struct(vec![
                SchemaField::new("len", Schema::option(Schema::Scalar(ScalarType::U64))),
                SchemaField::new("inner", Schema::Recurse(2)),
            ]),
        ),
        SchemaVariant::new("Tuple", Schema::seq(Schema::Recurse(2))),
        SchemaVariant::new("Struct", Schema::seq(field_pair.clone())),
        SchemaVariant::new("Enum", Schema::seq(field_pair)),
        SchemaVariant::new("Recurse", Schema::Scalar(ScalarType::U64)),
    ])
}

/// Encodes a schema as a message under the meta-schema.
pub fn encode_schema<W: Write>(schema: &Schema, writer: &mut W) -> Result<()> {
    let meta = meta_schema();
    let value = SchemaMapper::schema_to_value(schema);
    encode_value(&meta, &value, writer)
}

/// Decodes a schema from a message under the meta-schema.
pub fn decode_schema<R: Read>(reader: &mut R) -> Result<Schema> {
    let meta = meta_schema();
    let value = decode_value(&meta, reader)?;
    SchemaMapper::value_to_schema(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_bytes(schema: &Schema) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_schema(schema, &mut buf).unwrap();
        buf
    }

    #[test]
    fn test_encode_scalar_u8() {
        // Outer ordinal 0 (Scalar), inner ordinal 0 (U8).
        assert_eq!(schema_bytes(&Schema::Scalar(ScalarType::U8)), vec![0x00, 0x00]);
    }

    #[test]
    fn test_encode_recurse() {
        // Outer ordinal 9 (Recurse), then the level as a var-len uint.
        assert_eq!(schema_bytes(&Schema::Recurse(2)), vec![0x09, 0x02]);
    }

    #[test]
    fn test_encode_option_of_str() {
        // Option wraps any schema through Recurse(1) back to the outer enum.
        assert_eq!(
            schema_bytes(&Schema::option(Schema::Str)),
            vec![0x04, 0x01]
        );
    }

    #[test]
    fn test_schema_roundtrip() {
        let schema = Schema::Enum(vec![
            SchemaVariant::new("Leaf", Schema::Scalar(ScalarType::I32)),
            SchemaVariant::new(
                "Branch",
                Schema::Struct(vec![
                    SchemaField::new("n", Schema::Scalar(ScalarType::I32)),
                    SchemaField::new("a", Schema::Recurse(2)),
                    SchemaField::new("b", Schema::Recurse(2)),
                ]),
            ),
        ]);
        let buf = schema_bytes(&schema);
        assert_eq!(decode_schema(&mut buf.as_slice()).unwrap(), schema);
    }

    #[test]
    fn test_meta_schema_encodes_under_itself() {
        let meta = meta_schema();
        let buf = schema_bytes(&meta);
        assert_eq!(decode_schema(&mut buf.as_slice()).unwrap(), meta);
    }
}
