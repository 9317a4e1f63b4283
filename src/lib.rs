// Binschema library entry point
//
// A self-describing binary data format in three layers: schemas describe
// sets of values and their byte representation, values are structured trees
// conforming to a schema, and messages are the bytes produced by encoding a
// value under a schema. Schemas are themselves values under a fixed
// meta-schema, so the same codec that moves data also moves schemas.

pub mod codec;
pub mod internal;
pub mod schema;
