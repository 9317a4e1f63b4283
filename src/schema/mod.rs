// Schema module for the Binschema format
//
// This module provides the schema tree model plus the tooling built on it:
//
// 1. Schema type model with recurse back-references
// 2. The fixed meta-schema and schema encode/decode
// 3. Schema <-> meta-value mapping
// 4. JSON schema-text parser
// 5. Conformance and well-formedness validation
// 6. Schema inference from sample values

pub use self::inference::SchemaInference;
pub use self::mapper::SchemaMapper;
pub use self::meta::{decode_schema, encode_schema, meta_schema};
pub use self::parser::SchemaParser;
pub use self::types::{ScalarType, Schema, SchemaField, SchemaVariant, SeqSchema};
pub use self::validator::SchemaValidator;

pub mod inference;
pub mod mapper;
pub mod meta;
pub mod parser;
pub mod types;
pub mod validator;
