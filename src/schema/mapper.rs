// Schema <-> meta-value mapping
//
// Converts between the schema model and its representation as a value
// under the meta-schema. Encoding a schema is then nothing more than
// running the ordinary value codec over the mapped value.

use crate::codec::types::{FieldValue, Value};
use crate::internal::error::{Error, Result};
use crate::schema::types::{ScalarType, Schema, SchemaField, SchemaVariant, SeqSchema};

/// Scalar types in their canonical meta-schema ordinal order.
const SCALAR_ORDER: [ScalarType; 14] = [
    ScalarType::U8,
    ScalarType::U16,
    ScalarType::U32,
    ScalarType::U64,
    ScalarType::U128,
    ScalarType::I8,
    ScalarType::I16,
    ScalarType::I32,
    ScalarType::I64,
    ScalarType::I128,
    ScalarType::F32,
    ScalarType::F64,
    ScalarType::Char,
    ScalarType::Bool,
];

/// Mapper between `Schema` trees and their meta-schema `Value` form.
#[derive(Debug, Default)]
pub struct SchemaMapper;

impl SchemaMapper {
    /// Maps a schema to the value that represents it under the
    /// meta-schema. Every schema tree has a representation; this cannot
    /// fail.
    pub fn schema_to_value(schema: &Schema) -> Value {
        match schema {
            Schema::Scalar(scalar) => {
                let (ordinal, name) = scalar_ordinal(*scalar);
                Value::variant(0, "Scalar", Value::variant(ordinal, name, Value::Unit))
            }
            Schema::Str => Value::variant(1, "Str", Value::Unit),
            Schema::Bytes => Value::variant(2, "Bytes", Value::Unit),
            Schema::Unit => Value::variant(3, "Unit", Value::Unit),
            Schema::Option(inner) => Value::variant(4, "Option", Self::schema_to_value(inner)),
            Schema::Seq(seq) => Value::variant(
                5,
                "Seq",
                Value::Struct(vec![
                    FieldValue::new(
                        "len",
                        Value::Option(seq.len.map(|len| Box::new(Value::U64(len)))),
                    ),
                    FieldValue::new("inner", Self::schema_to_value(&seq.inner)),
                ]),
            ),
            Schema::Tuple(inners) => Value::variant(
                6,
                "Tuple",
                Value::Seq(inners.iter().map(Self::schema_to_value).collect()),
            ),
            Schema::Struct(fields) => Value::variant(
                7,
                "Struct",
                Value::Seq(
                    fields
                        .iter()
                        .map(|field| named_inner(&field.name, &field.inner))
                        .collect(),
                ),
            ),
            Schema::Enum(variants) => Value::variant(
                8,
                "Enum",
                Value::Seq(
                    variants
                        .iter()
                        .map(|variant| named_inner(&variant.name, &variant.inner))
                        .collect(),
                ),
            ),
            Schema::Recurse(level) => Value::variant(9, "Recurse", Value::U64(*level)),
        }
    }

    /// Maps a meta-schema value back to the schema it represents.
    ///
    /// Values decoded under the meta-schema always map cleanly; arbitrary
    /// host-built values that do not have the meta shape fail with
    /// `NonConformingValue`.
    pub fn value_to_schema(value: &Value) -> Result<Schema> {
        let selected = match value {
            Value::Enum(selected) => selected,
            other => return Err(malformed(other.kind_name())),
        };
        match (selected.ordinal, &selected.value) {
            (0, Value::Enum(scalar)) => SCALAR_ORDER
                .get(scalar.ordinal)
                .copied()
                .map(Schema::Scalar)
                .ok_or_else(|| malformed("scalar ordinal out of range")),
            (1, Value::Unit) => Ok(Schema::Str),
            (2, Value::Unit) => Ok(Schema::Bytes),
            (3, Value::Unit) => Ok(Schema::Unit),
            (4, inner) => Ok(Schema::option(Self::value_to_schema(inner)?)),
            (5, Value::Struct(fields)) => {
                let [len_field, inner_field] = match fields.as_slice() {
                    [len_field, inner_field] => [len_field, inner_field],
                    _ => return Err(malformed("seq body arity")),
                };
                let len = match (&len_field.name[..], &len_field.value) {
                    ("len", Value::Option(None)) => None,
                    ("len", Value::Option(Some(boxed))) => match **boxed {
                        Value::U64(len) => Some(len),
                        _ => return Err(malformed("seq len type")),
                    },
                    _ => return Err(malformed("seq len field")),
                };
                if inner_field.name != "inner" {
                    return Err(malformed("seq inner field"));
                }
                Ok(Schema::Seq(SeqSchema {
                    len,
                    inner: Box::new(Self::value_to_schema(&inner_field.value)?),
                }))
            }
            (6, Value::Seq(elems)) => Ok(Schema::Tuple(
                elems
                    .iter()
                    .map(Self::value_to_schema)
                    .collect::<Result<_>>()?,
            )),
            (7, Value::Seq(elems)) => Ok(Schema::Struct(
                elems
                    .iter()
                    .map(|elem| {
                        let (name, inner) = split_named_inner(elem)?;
                        Ok(SchemaField::new(name, inner))
                    })
                    .collect::<Result<_>>()?,
            )),
            (8, Value::Seq(elems)) => Ok(Schema::Enum(
                elems
                    .iter()
                    .map(|elem| {
                        let (name, inner) = split_named_inner(elem)?;
                        Ok(SchemaVariant::new(name, inner))
                    })
                    .collect::<Result<_>>()?,
            )),
            (9, Value::U64(level)) => Ok(Schema::Recurse(*level)),
            _ => Err(malformed("variant/body combination")),
        }
    }
}

/// The `{ name, inner }` pair used by the struct and enum bodies.
fn named_inner(name: &str, inner: &Schema) -> Value {
    Value::Struct(vec![
        FieldValue::new("name", Value::Str(name.to_string())),
        FieldValue::new("inner", SchemaMapper::schema_to_value(inner)),
    ])
}

fn split_named_inner(value: &Value) -> Result<(String, Schema)> {
    let fields = match value {
        Value::Struct(fields) => fields,
        other => return Err(malformed(other.kind_name())),
    };
    match fields.as_slice() {
        [name_field, inner_field]
            if name_field.name == "name" && inner_field.name == "inner" =>
        {
            let name = match &name_field.value {
                Value::Str(name) => name.clone(),
                _ => return Err(malformed("field name type")),
            };
            Ok((name, SchemaMapper::value_to_schema(&inner_field.value)?))
        }
        _ => Err(malformed("field pair shape")),
    }
}

/// Ordinal and meta variant name of a scalar type, in `SCALAR_ORDER`.
fn scalar_ordinal(scalar: ScalarType) -> (usize, &'static str) {
    match scalar {
        ScalarType::U8 => (0, "U8"),
        ScalarType::U16 => (1, "U16"),
        ScalarType::U32 => (2, "U32"),
        ScalarType::U64 => (3, "U64"),
        ScalarType::U128 => (4, "U128"),
        ScalarType::I8 => (5, "I8"),
        ScalarType::I16 => (6, "I16"),
        ScalarType::I32 => (7, "I32"),
        ScalarType::I64 => (8, "I64"),
        ScalarType::I128 => (9, "I128"),
        ScalarType::F32 => (10, "F32"),
        ScalarType::F64 => (11, "F64"),
        ScalarType::Char => (12, "Char"),
        ScalarType::Bool => (13, "Bool"),
    }
}

fn malformed(what: &str) -> Error {
    Error::NonConformingValue(format!("meta value does not describe a schema: {}", what))
}
