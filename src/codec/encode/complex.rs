use std::io::Write;

use crate::codec::ordinal;
use crate::codec::types::Value;
use crate::codec::varint;
use crate::internal::error::{Error, Result};
use crate::schema::types::{Schema, SchemaField, SchemaVariant, SeqSchema};

use super::{encode_node, mismatch};

/// Encodes an option: a 0/1 tag byte, then the inner value iff some.
pub fn encode_option<'a, W: Write>(
    node: &'a Schema,
    inner: &'a Schema,
    value: &Value,
    ancestors: &mut Vec<&'a Schema>,
    writer: &mut W,
) -> Result<()> {
    let body = match value {
        Value::Option(body) => body,
        other => return Err(mismatch(node, other)),
    };
    match body {
        None => {
            writer.write_all(&[0x00])?;
        }
        Some(inner_value) => {
            writer.write_all(&[0x01])?;
            ancestors.push(node);
            encode_node(inner, inner_value, ancestors, writer)?;
            ancestors.pop();
        }
    }
    Ok(())
}

/// Encodes a sequence. A variable-length sequence is prefixed with its
/// element count; a fixed-length one must match its declared length
/// exactly and carries no count.
pub fn encode_seq<'a, W: Write>(
    node: &'a Schema,
    seq: &'a SeqSchema,
    value: &Value,
    ancestors: &mut Vec<&'a Schema>,
    writer: &mut W,
) -> Result<()> {
    let elems = match value {
        Value::Seq(elems) => elems,
        other => return Err(mismatch(node, other)),
    };
    match seq.len {
        Some(len) => {
            if elems.len() as u64 != len {
                return Err(Error::NonConformingValue(format!(
                    "seq of declared len {} given {} elements",
                    len,
                    elems.len()
                )));
            }
        }
        None => varint::encode_uvarint(writer, elems.len() as u128)?,
    }
    ancestors.push(node);
    for elem in elems {
        encode_node(&seq.inner, elem, ancestors, writer)?;
    }
    ancestors.pop();
    Ok(())
}

/// Encodes a tuple as the concatenation of its elements in order.
pub fn encode_tuple<'a, W: Write>(
    node: &'a Schema,
    inners: &'a [Schema],
    value: &Value,
    ancestors: &mut Vec<&'a Schema>,
    writer: &mut W,
) -> Result<()> {
    let elems = match value {
        Value::Tuple(elems) => elems,
        other => return Err(mismatch(node, other)),
    };
    if elems.len() != inners.len() {
        return Err(Error::NonConformingValue(format!(
            "tuple of arity {} given {} elements",
            inners.len(),
            elems.len()
        )));
    }
    ancestors.push(node);
    for (inner, elem) in inners.iter().zip(elems) {
        encode_node(inner, elem, ancestors, writer)?;
    }
    ancestors.pop();
    Ok(())
}

/// Encodes a struct as the concatenation of its fields in declaration
/// order. Field names must line up with the schema; they are not written.
pub fn encode_struct<'a, W: Write>(
    node: &'a Schema,
    fields: &'a [SchemaField],
    value: &Value,
    ancestors: &mut Vec<&'a Schema>,
    writer: &mut W,
) -> Result<()> {
    let field_values = match value {
        Value::Struct(field_values) => field_values,
        other => return Err(mismatch(node, other)),
    };
    if field_values.len() != fields.len() {
        return Err(Error::NonConformingValue(format!(
            "struct of {} fields given {} fields",
            fields.len(),
            field_values.len()
        )));
    }
    ancestors.push(node);
    for (field, field_value) in fields.iter().zip(field_values) {
        if field.name != field_value.name {
            return Err(Error::NonConformingValue(format!(
                "struct field {:?} given field {:?}",
                field.name, field_value.name
            )));
        }
        encode_node(&field.inner, &field_value.value, ancestors, writer)?;
    }
    ancestors.pop();
    Ok(())
}

/// Encodes an enum: the ordinal-encoded variant index, then the selected
/// variant's value. Variant names must line up with the schema.
pub fn encode_enum<'a, W: Write>(
    node: &'a Schema,
    variants: &'a [SchemaVariant],
    value: &Value,
    ancestors: &mut Vec<&'a Schema>,
    writer: &mut W,
) -> Result<()> {
    let selected = match value {
        Value::Enum(selected) => selected,
        other => return Err(mismatch(node, other)),
    };
    if variants.is_empty() {
        return Err(Error::InvalidSchema(
            "zero-variant enum holds no values".to_string(),
        ));
    }
    let variant = variants.get(selected.ordinal).ok_or_else(|| {
        Error::NonConformingValue(format!(
            "variant ordinal {} out of range for {} variants",
            selected.ordinal,
            variants.len()
        ))
    })?;
    if variant.name != selected.name {
        return Err(Error::NonConformingValue(format!(
            "variant at ordinal {} is named {:?}, value says {:?}",
            selected.ordinal, variant.name, selected.name
        )));
    }
    ordinal::encode_ordinal(writer, selected.ordinal, variants.len())?;
    ancestors.push(node);
    encode_node(&variant.inner, &selected.value, ancestors, writer)?;
    ancestors.pop();
    Ok(())
}
