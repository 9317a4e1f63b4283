// Schema inference from sample values
//
// Derives the schema a value already conforms to, where that schema is
// unambiguous. Enums cannot be inferred (a single sample shows one variant
// of an unknowable set), and neither can empty options or empty sequences,
// so those fail rather than guess.

use crate::codec::types::Value;
use crate::internal::error::{Error, Result};
use crate::schema::types::{ScalarType, Schema, SchemaField};

/// Infers schemas from sample values.
#[derive(Debug, Default)]
pub struct SchemaInference;

impl SchemaInference {
    /// Creates a new inference engine.
    pub fn new() -> Self {
        SchemaInference
    }

    /// Infers the schema of a sample value. Sequences come back
    /// variable-length; a fixed length cannot be told apart from a
    /// coincidence in one sample.
    pub fn infer(&self, value: &Value) -> Result<Schema> {
        match value {
            Value::U8(_) => Ok(Schema::Scalar(ScalarType::U8)),
            Value::U16(_) => Ok(Schema::Scalar(ScalarType::U16)),
            Value::U32(_) => Ok(Schema::Scalar(ScalarType::U32)),
            Value::U64(_) => Ok(Schema::Scalar(ScalarType::U64)),
            Value::U128(_) => Ok(Schema::Scalar(ScalarType::U128)),
            Value::I8(_) => Ok(Schema::Scalar(ScalarType::I8)),
            Value::I16(_) => Ok(Schema::Scalar(ScalarType::I16)),
            Value::I32(_) => Ok(Schema::Scalar(ScalarType::I32)),
            Value::I64(_) => Ok(Schema::Scalar(ScalarType::I64)),
            Value::I128(_) => Ok(Schema::Scalar(ScalarType::I128)),
            Value::F32(_) => Ok(Schema::Scalar(ScalarType::F32)),
            Value::F64(_) => Ok(Schema::Scalar(ScalarType::F64)),
            Value::Char(_) => Ok(Schema::Scalar(ScalarType::Char)),
            Value::Bool(_) => Ok(Schema::Scalar(ScalarType::Bool)),
            Value::Str(_) => Ok(Schema::Str),
            Value::Bytes(_) => Ok(Schema::Bytes),
            Value::Unit => Ok(Schema::Unit),
            Value::Option(Some(inner)) => Ok(Schema::option(self.infer(inner)?)),
            Value::Option(None) => Err(Error::InvalidSchema(
                "cannot infer the inner type of an empty option".to_string(),
            )),
            Value::Seq(elems) => {
                let first = match elems.first() {
                    Some(first) => first,
                    None => {
                        return Err(Error::InvalidSchema(
                            "cannot infer the element type of an empty seq".to_string(),
                        ))
                    }
                };
                let inner = self.infer(first)?;
                for elem in &elems[1..] {
                    if self.infer(elem)? != inner {
                        return Err(Error::InvalidSchema(
                            "seq elements infer to different schemas".to_string(),
                        ));
                    }
                }
                Ok(Schema::seq(inner))
            }
            Value::Tuple(elems) => Ok(Schema::Tuple(
                elems
                    .iter()
                    .map(|elem| self.infer(elem))
                    .collect::<Result<_>>()?,
            )),
            Value::Struct(fields) => Ok(Schema::Struct(
                fields
                    .iter()
                    .map(|field| Ok(SchemaField::new(&field.name, self.infer(&field.value)?)))
                    .collect::<Result<_>>()?,
            )),
            Value::Enum(_) => Err(Error::InvalidSchema(
                "cannot infer an enum's variant set from a single sample".to_string(),
            )),
        }
    }
}
