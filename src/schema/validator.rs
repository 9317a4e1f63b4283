// Schema validation
//
// Two checks live here: `check_schema` establishes that a schema tree is
// well-formed (every recurse back-reference has somewhere to land), and
// `validate` establishes that a value conforms to a schema without
// touching a byte sink. A value that passes `validate` always encodes.

use crate::codec::types::Value;
use crate::internal::error::{Error, Result};
use crate::schema::types::{ScalarType, Schema};

/// Validator for schema well-formedness and value conformance.
#[derive(Debug, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Creates a new schema validator.
    pub fn new() -> Self {
        SchemaValidator
    }

    /// Checks that every `Recurse(level)` in the schema has at least
    /// `level` strict ancestors and a nonzero level.
    pub fn check_schema(&self, schema: &Schema) -> Result<()> {
        let mut ancestors = Vec::new();
        self.check_node(schema, &mut ancestors)
    }

    fn check_node<'a>(&self, schema: &'a Schema, ancestors: &mut Vec<&'a Schema>) -> Result<()> {
        match schema {
            Schema::Scalar(_) | Schema::Str | Schema::Bytes | Schema::Unit => Ok(()),
            Schema::Recurse(level) => {
                if *level == 0 {
                    return Err(Error::InvalidSchema(
                        "recurse level 0 never resolves".to_string(),
                    ));
                }
                if *level > ancestors.len() as u64 {
                    return Err(Error::InvalidSchema(format!(
                        "recurse level {} exceeds ancestor depth {}",
                        level,
                        ancestors.len()
                    )));
                }
                Ok(())
            }
            Schema::Option(inner) => {
                ancestors.push(schema);
                self.check_node(inner, ancestors)?;
                ancestors.pop();
                Ok(())
            }
            Schema::Seq(seq) => {
                ancestors.push(schema);
                self.check_node(&seq.inner, ancestors)?;
                ancestors.pop();
                Ok(())
            }
            Schema::Tuple(inners) => {
                ancestors.push(schema);
                for inner in inners {
                    self.check_node(inner, ancestors)?;
                }
                ancestors.pop();
                Ok(())
            }
            Schema::Struct(fields) => {
                ancestors.push(schema);
                for field in fields {
                    self.check_node(&field.inner, ancestors)?;
                }
                ancestors.pop();
                Ok(())
            }
            Schema::Enum(variants) => {
                ancestors.push(schema);
                for variant in variants {
                    self.check_node(&variant.inner, ancestors)?;
                }
                ancestors.pop();
                Ok(())
            }
        }
    }

    /// Checks that `value` conforms to `schema`: every leaf has the
    /// declared type, fixed-length seqs match their length, structs and
    /// tuples match arity, field and variant names line up, enum ordinals
    /// are in range.
    pub fn validate(&self, schema: &Schema, value: &Value) -> Result<()> {
        let mut ancestors = Vec::new();
        self.validate_node(schema, value, &mut ancestors)
    }

    fn validate_node<'a>(
        &self,
        schema: &'a Schema,
        value: &Value,
        ancestors: &mut Vec<&'a Schema>,
    ) -> Result<()> {
        let schema = schema.resolve(ancestors)?;
        match schema {
            Schema::Scalar(scalar) => {
                if scalar_conforms(*scalar, value) {
                    Ok(())
                } else {
                    Err(mismatch(schema, value))
                }
            }
            Schema::Str => match value {
                Value::Str(_) => Ok(()),
                other => Err(mismatch(schema, other)),
            },
            Schema::Bytes => match value {
                Value::Bytes(_) => Ok(()),
                other => Err(mismatch(schema, other)),
            },
            Schema::Unit => match value {
                Value::Unit => Ok(()),
                other => Err(mismatch(schema, other)),
            },
            Schema::Option(inner) => {
                let body = match value {
                    Value::Option(body) => body,
                    other => return Err(mismatch(schema, other)),
                };
                if let Some(inner_value) = body {
                    ancestors.push(schema);
                    self.validate_node(inner, inner_value, ancestors)?;
                    ancestors.pop();
                }
                Ok(())
            }
            Schema::Seq(seq) => {
                let elems = match value {
                    Value::Seq(elems) => elems,
                    other => return Err(mismatch(schema, other)),
                };
                if let Some(len) = seq.len {
                    if elems.len() as u64 != len {
                        return Err(Error::NonConformingValue(format!(
                            "seq of declared len {} given {} elements",
                            len,
                            elems.len()
                        )));
                    }
                }
                ancestors.push(schema);
                for elem in elems {
                    self.validate_node(&seq.inner, elem, ancestors)?;
                }
                ancestors.pop();
                Ok(())
            }
            Schema::Tuple(inners) => {
                let elems = match value {
                    Value::Tuple(elems) => elems,
                    other => return Err(mismatch(schema, other)),
                };
                if elems.len() != inners.len() {
                    return Err(Error::NonConformingValue(format!(
                        "tuple of arity {} given {} elements",
                        inners.len(),
                        elems.len()
                    )));
                }
                ancestors.push(schema);
                for (inner, elem) in inners.iter().zip(elems) {
                    self.validate_node(inner, elem, ancestors)?;
                }
                ancestors.pop();
                Ok(())
            }
            Schema::Struct(fields) => {
                let field_values = match value {
                    Value::Struct(field_values) => field_values,
                    other => return Err(mismatch(schema, other)),
                };
                if field_values.len() != fields.len() {
                    return Err(Error::NonConformingValue(format!(
                        "struct of {} fields given {} fields",
                        fields.len(),
                        field_values.len()
                    )));
                }
                ancestors.push(schema);
                for (field, field_value) in fields.iter().zip(field_values) {
                    if field.name != field_value.name {
                        return Err(Error::NonConformingValue(format!(
                            "struct field {:?} given field {:?}",
                            field.name, field_value.name
                        )));
                    }
                    self.validate_node(&field.inner, &field_value.value, ancestors)?;
                }
                ancestors.pop();
                Ok(())
            }
            Schema::Enum(variants) => {
                let selected = match value {
                    Value::Enum(selected) => selected,
                    other => return Err(mismatch(schema, other)),
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
                ancestors.push(schema);
                self.validate_node(&variant.inner, &selected.value, ancestors)?;
                ancestors.pop();
                Ok(())
            }
            Schema::Recurse(_) => unreachable!("resolve() never returns a recurse node"),
        }
    }
}

fn scalar_conforms(scalar: ScalarType, value: &Value) -> bool {
    matches!(
        (scalar, value),
        (ScalarType::U8, Value::U8(_))
            | (ScalarType::U16, Value::U16(_))
            | (ScalarType::U32, Value::U32(_))
            | (ScalarType::U64, Value::U64(_))
            | (ScalarType::U128, Value::U128(_))
            | (ScalarType::I8, Value::I8(_))
            | (ScalarType::I16, Value::I16(_))
            | (ScalarType::I32, Value::I32(_))
            | (ScalarType::I64, Value::I64(_))
            | (ScalarType::I128, Value::I128(_))
            | (ScalarType::F32, Value::F32(_))
            | (ScalarType::F64, Value::F64(_))
            | (ScalarType::Char, Value::Char(_))
            | (ScalarType::Bool, Value::Bool(_))
    )
}

fn mismatch(schema: &Schema, value: &Value) -> Error {
    Error::NonConformingValue(format!(
        "schema needs {}, value is {}",
        schema.kind_name(),
        value.kind_name()
    ))
}
