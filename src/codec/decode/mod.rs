// Decode half of the Binschema value codec
//
// The decoder mirrors the encoder's walk: the schema tree drives which
// bytes are expected next, with compound schemas pushed onto the ancestor
// stack while their children decode. Any malformed input fails the whole
// call; no partial value escapes. Length prefixes are never trusted for
// allocation, so a hostile stream cannot reserve memory it does not pay
// for in bytes.

pub mod basic;
pub mod complex;

use std::io::Read;

use crate::codec::types::Value;
use crate::internal::error::Result;
use crate::schema::types::Schema;

/// Decodes one value under `schema` from `reader`, consuming exactly the
/// bytes of the message.
pub fn decode_value<R: Read>(schema: &Schema, reader: &mut R) -> Result<Value> {
    let mut ancestors = Vec::new();
    decode_node(schema, &mut ancestors, reader)
}

/// Decodes one node of the value tree under one node of the schema tree.
pub(crate) fn decode_node<'a, R: Read>(
    schema: &'a Schema,
    ancestors: &mut Vec<&'a Schema>,
    reader: &mut R,
) -> Result<Value> {
    // Recurse nodes redirect resolution without touching the stack.
    let schema = schema.resolve(ancestors)?;
    match schema {
        Schema::Scalar(scalar) => basic::decode_scalar(*scalar, reader),
        Schema::Str => basic::decode_str(reader),
        Schema::Bytes => basic::decode_bytes(reader),
        Schema::Unit => Ok(Value::Unit),
        Schema::Option(inner) => complex::decode_option(schema, inner, ancestors, reader),
        Schema::Seq(seq) => complex::decode_seq(schema, seq, ancestors, reader),
        Schema::Tuple(inners) => complex::decode_tuple(schema, inners, ancestors, reader),
        Schema::Struct(fields) => complex::decode_struct(schema, fields, ancestors, reader),
        Schema::Enum(variants) => complex::decode_enum(schema, variants, ancestors, reader),
        Schema::Recurse(_) => unreachable!("resolve() never returns a recurse node"),
    }
}
