use std::io::Read;

use byteorder::ReadBytesExt;

use crate::codec::ordinal;
use crate::codec::types::{FieldValue, Value, VariantValue};
use crate::codec::varint;
use crate::internal::error::{Error, Result};
use crate::schema::types::{Schema, SchemaField, SchemaVariant, SeqSchema};

use super::decode_node;

/// Decodes an option from its 0/1 tag byte. Any other tag byte is a
/// terminal failure.
pub fn decode_option<'a, R: Read>(
    node: &'a Schema,
    inner: &'a Schema,
    ancestors: &mut Vec<&'a Schema>,
    reader: &mut R,
) -> Result<Value> {
    match reader.read_u8()? {
        0x00 => Ok(Value::Option(None)),
        0x01 => {
            ancestors.push(node);
            let value = decode_node(inner, ancestors, reader)?;
            ancestors.pop();
            Ok(Value::Option(Some(Box::new(value))))
        }
        other => Err(Error::OutOfRange(format!(
            "option tag must be 0 or 1, got {:#04X}",
            other
        ))),
    }
}

/// Decodes a sequence. A fixed-length sequence reads exactly its declared
/// count of elements; a variable one reads its count prefix first. The
/// vector grows element by element as bytes arrive.
pub fn decode_seq<'a, R: Read>(
    node: &'a Schema,
    seq: &'a SeqSchema,
    ancestors: &mut Vec<&'a Schema>,
    reader: &mut R,
) -> Result<Value> {
    let len = match seq.len {
        Some(len) => len,
        None => {
            let count = varint::decode_uvarint(reader)?;
            u64::try_from(count).map_err(|_| {
                Error::OutOfRange(format!("seq count {} does not fit in a u64", count))
            })?
        }
    };
    let mut elems = Vec::new();
    ancestors.push(node);
    for _ in 0..len {
        elems.push(decode_node(&seq.inner, ancestors, reader)?);
    }
    ancestors.pop();
    Ok(Value::Seq(elems))
}

/// Decodes a tuple, element by element in schema order.
pub fn decode_tuple<'a, R: Read>(
    node: &'a Schema,
    inners: &'a [Schema],
    ancestors: &mut Vec<&'a Schema>,
    reader: &mut R,
) -> Result<Value> {
    let mut elems = Vec::new();
    ancestors.push(node);
    for inner in inners {
        elems.push(decode_node(inner, ancestors, reader)?);
    }
    ancestors.pop();
    Ok(Value::Tuple(elems))
}

/// Decodes a struct, field by field in declaration order. Field names come
/// from the schema; the wire carries only the field payloads.
pub fn decode_struct<'a, R: Read>(
    node: &'a Schema,
    fields: &'a [SchemaField],
    ancestors: &mut Vec<&'a Schema>,
    reader: &mut R,
) -> Result<Value> {
    let mut field_values = Vec::new();
    ancestors.push(node);
    for field in fields {
        let value = decode_node(&field.inner, ancestors, reader)?;
        field_values.push(FieldValue::new(field.name.clone(), value));
    }
    ancestors.pop();
    Ok(Value::Struct(field_values))
}

/// Decodes an enum: the ordinal-encoded variant index selects which
/// variant's value follows.
pub fn decode_enum<'a, R: Read>(
    node: &'a Schema,
    variants: &'a [SchemaVariant],
    ancestors: &mut Vec<&'a Schema>,
    reader: &mut R,
) -> Result<Value> {
    if variants.is_empty() {
        return Err(Error::InvalidSchema(
            "zero-variant enum holds no values".to_string(),
        ));
    }
    let ordinal = ordinal::decode_ordinal(reader, variants.len())?;
    let variant = &variants[ordinal];
    ancestors.push(node);
    let value = decode_node(&variant.inner, ancestors, reader)?;
    ancestors.pop();
    Ok(Value::Enum(Box::new(VariantValue {
        ordinal,
        name: variant.name.clone(),
        value,
    })))
}
