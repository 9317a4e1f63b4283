// Encode half of the Binschema value codec
//
// The encoder is a recursive walk driven by the schema tree. Compound
// schemas are pushed onto an ancestor stack before their children are
// visited and popped after, which is what gives `Recurse` back-references
// something to resolve against. Encoding a conforming value always
// succeeds; a non-conforming value fails without producing a usable
// message.

pub mod basic;
pub mod complex;

use std::io::Write;

use crate::codec::types::Value;
use crate::internal::error::{Error, Result};
use crate::schema::types::Schema;

/// Encodes `value` under `schema`, writing the message bytes to `writer`.
///
/// The byte stream for a given (schema, value) pair is uniquely defined;
/// identical inputs yield byte-identical output.
pub fn encode_value<W: Write>(schema: &Schema, value: &Value, writer: &mut W) -> Result<()> {
    let mut ancestors = Vec::new();
    encode_node(schema, value, &mut ancestors, writer)
}

/// Encodes one node of the value tree under one node of the schema tree.
pub(crate) fn encode_node<'a, W: Write>(
    schema: &'a Schema,
    value: &Value,
    ancestors: &mut Vec<&'a Schema>,
    writer: &mut W,
) -> Result<()> {
    // Recurse nodes redirect resolution without touching the stack.
    let schema = schema.resolve(ancestors)?;
    match schema {
        Schema::Scalar(scalar) => basic::encode_scalar(*scalar, value, writer),
        Schema::Str => match value {
            Value::Str(s) => basic::encode_str(s, writer),
            other => Err(mismatch(schema, other)),
        },
        Schema::Bytes => match value {
            Value::Bytes(b) => basic::encode_bytes(b, writer),
            other => Err(mismatch(schema, other)),
        },
        Schema::Unit => match value {
            Value::Unit => Ok(()),
            other => Err(mismatch(schema, other)),
        },
        Schema::Option(inner) => complex::encode_option(schema, inner, value, ancestors, writer),
        Schema::Seq(seq) => complex::encode_seq(schema, seq, value, ancestors, writer),
        Schema::Tuple(inners) => complex::encode_tuple(schema, inners, value, ancestors, writer),
        Schema::Struct(fields) => complex::encode_struct(schema, fields, value, ancestors, writer),
        Schema::Enum(variants) => complex::encode_enum(schema, variants, value, ancestors, writer),
        Schema::Recurse(_) => unreachable!("resolve() never returns a recurse node"),
    }
}

pub(crate) fn mismatch(schema: &Schema, value: &Value) -> Error {
    Error::NonConformingValue(format!(
        "schema needs {}, value is {}",
        schema.kind_name(),
        value.kind_name()
    ))
}
