// JSON schema-text parser
//
// Parses a human-readable JSON description of a schema into a `Schema`
// tree, giving hosts a wire-independent way to author schemas. Leaves may
// be written as bare strings ("i32") or objects ({"type": "i32"});
// compound types are objects keyed by "type":
//
//   {"type": "option", "inner": ...}
//   {"type": "seq", "inner": ..., "len": 4}        len optional
//   {"type": "tuple", "inners": [...]}
//   {"type": "struct", "fields": [{"name": ..., "inner": ...}]}
//   {"type": "enum", "variants": [{"name": ..., "inner": ...}]}
//   {"type": "recurse", "level": 2}

use serde_json::Value;

use crate::internal::error::{Error, Result};
use crate::schema::types::{ScalarType, Schema, SchemaField, SchemaVariant, SeqSchema};

/// Parser for JSON schema descriptions.
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    /// Creates a new schema parser.
    pub fn new() -> Self {
        SchemaParser
    }

    /// Parses a JSON schema description from text.
    pub fn parse_str(&self, text: &str) -> Result<Schema> {
        let json: Value = serde_json::from_str(text)
            .map_err(|err| Error::InvalidSchema(format!("schema text is not JSON: {}", err)))?;
        self.parse(&json)
    }

    /// Parses a JSON schema description.
    pub fn parse(&self, json: &Value) -> Result<Schema> {
        match json {
            Value::String(name) => self.parse_leaf(name),
            Value::Object(obj) => {
                let type_name = match obj.get("type") {
                    Some(Value::String(type_name)) => type_name,
                    Some(_) => {
                        return Err(Error::InvalidSchema(
                            "schema 'type' must be a string".to_string(),
                        ))
                    }
                    None => {
                        return Err(Error::InvalidSchema(
                            "schema object must carry a 'type'".to_string(),
                        ))
                    }
                };
                match type_name.as_str() {
                    "option" => Ok(Schema::option(self.parse(self.get(obj, "inner")?)?)),
                    "seq" => {
                        let len = match obj.get("len") {
                            None => None,
                            Some(len) => Some(len.as_u64().ok_or_else(|| {
                                Error::InvalidSchema(
                                    "seq 'len' must be an unsigned integer".to_string(),
                                )
                            })?),
                        };
                        Ok(Schema::Seq(SeqSchema {
                            len,
                            inner: Box::new(self.parse(self.get(obj, "inner")?)?),
                        }))
                    }
                    "tuple" => {
                        let inners = self.get_array(obj, "inners")?;
                        Ok(Schema::Tuple(
                            inners
                                .iter()
                                .map(|inner| self.parse(inner))
                                .collect::<Result<_>>()?,
                        ))
                    }
                    "struct" => {
                        let fields = self.get_array(obj, "fields")?;
                        Ok(Schema::Struct(
                            fields
                                .iter()
                                .map(|field| {
                                    let (name, inner) = self.parse_named(field)?;
                                    Ok(SchemaField::new(name, inner))
                                })
                                .collect::<Result<_>>()?,
                        ))
                    }
                    "enum" => {
                        let variants = self.get_array(obj, "variants")?;
                        Ok(Schema::Enum(
                            variants
                                .iter()
                                .map(|variant| {
                                    let (name, inner) = self.parse_named(variant)?;
                                    Ok(SchemaVariant::new(name, inner))
                                })
                                .collect::<Result<_>>()?,
                        ))
                    }
                    "recurse" => {
                        let level = self
                            .get(obj, "level")?
                            .as_u64()
                            .ok_or_else(|| {
                                Error::InvalidSchema(
                                    "recurse 'level' must be an unsigned integer".to_string(),
                                )
                            })?;
                        Ok(Schema::Recurse(level))
                    }
                    leaf => self.parse_leaf(leaf),
                }
            }
            other => Err(Error::InvalidSchema(format!(
                "schema description must be a string or object, got {}",
                other
            ))),
        }
    }

    fn parse_leaf(&self, name: &str) -> Result<Schema> {
        let schema = match name {
            "u8" => Schema::Scalar(ScalarType::U8),
            "u16" => Schema::Scalar(ScalarType::U16),
            "u32" => Schema::Scalar(ScalarType::U32),
            "u64" => Schema::Scalar(ScalarType::U64),
            "u128" => Schema::Scalar(ScalarType::U128),
            "i8" => Schema::Scalar(ScalarType::I8),
            "i16" => Schema::Scalar(ScalarType::I16),
            "i32" => Schema::Scalar(ScalarType::I32),
            "i64" => Schema::Scalar(ScalarType::I64),
            "i128" => Schema::Scalar(ScalarType::I128),
            "f32" => Schema::Scalar(ScalarType::F32),
            "f64" => Schema::Scalar(ScalarType::F64),
            "char" => Schema::Scalar(ScalarType::Char),
            "bool" => Schema::Scalar(ScalarType::Bool),
            "str" => Schema::Str,
            "bytes" => Schema::Bytes,
            "unit" => Schema::Unit,
            unknown => {
                return Err(Error::InvalidSchema(format!(
                    "unknown schema type: {}",
                    unknown
                )))
            }
        };
        Ok(schema)
    }

    /// Parses a `{"name": ..., "inner": ...}` pair.
    fn parse_named(&self, json: &Value) -> Result<(String, Schema)> {
        let obj = match json {
            Value::Object(obj) => obj,
            _ => {
                return Err(Error::InvalidSchema(
                    "field/variant entry must be an object".to_string(),
                ))
            }
        };
        let name = match obj.get("name") {
            Some(Value::String(name)) => name.clone(),
            _ => {
                return Err(Error::InvalidSchema(
                    "field/variant entry must carry a string 'name'".to_string(),
                ))
            }
        };
        let inner = self.parse(self.get(obj, "inner")?)?;
        Ok((name, inner))
    }

    fn get<'j>(
        &self,
        obj: &'j serde_json::Map<String, Value>,
        key: &str,
    ) -> Result<&'j Value> {
        obj.get(key)
            .ok_or_else(|| Error::InvalidSchema(format!("missing required key '{}'", key)))
    }

    fn get_array<'j>(
        &self,
        obj: &'j serde_json::Map<String, Value>,
        key: &str,
    ) -> Result<&'j Vec<Value>> {
        match self.get(obj, key)? {
            Value::Array(items) => Ok(items),
            _ => Err(Error::InvalidSchema(format!("'{}' must be an array", key))),
        }
    }
}
