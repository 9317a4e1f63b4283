use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::codec::types::Value;
use crate::codec::varint;
use crate::internal::error::{Error, Result};
use crate::schema::types::ScalarType;

/// Encodes a scalar leaf value.
///
/// U8/I8 are raw bytes, U16/I16 and the floats are little-endian fixed
/// width, the wider integers are var-len, char is its codepoint as a
/// var-len uint, bool is a single 0/1 byte.
pub fn encode_scalar<W: Write>(scalar: ScalarType, value: &Value, writer: &mut W) -> Result<()> {
    match (scalar, value) {
        (ScalarType::U8, Value::U8(n)) => writer.write_u8(*n)?,
        (ScalarType::U16, Value::U16(n)) => writer.write_u16::<LittleEndian>(*n)?,
        (ScalarType::U32, Value::U32(n)) => varint::encode_uvarint(writer, u128::from(*n))?,
        (ScalarType::U64, Value::U64(n)) => varint::encode_uvarint(writer, u128::from(*n))?,
        (ScalarType::U128, Value::U128(n)) => varint::encode_uvarint(writer, *n)?,
        (ScalarType::I8, Value::I8(n)) => writer.write_i8(*n)?,
        (ScalarType::I16, Value::I16(n)) => writer.write_i16::<LittleEndian>(*n)?,
        (ScalarType::I32, Value::I32(n)) => varint::encode_svarint(writer, i128::from(*n))?,
        (ScalarType::I64, Value::I64(n)) => varint::encode_svarint(writer, i128::from(*n))?,
        (ScalarType::I128, Value::I128(n)) => varint::encode_svarint(writer, *n)?,
        (ScalarType::F32, Value::F32(n)) => writer.write_f32::<LittleEndian>(*n)?,
        (ScalarType::F64, Value::F64(n)) => writer.write_f64::<LittleEndian>(*n)?,
        (ScalarType::Char, Value::Char(c)) => varint::encode_uvarint(writer, *c as u128)?,
        (ScalarType::Bool, Value::Bool(b)) => writer.write_u8(*b as u8)?,
        (scalar, other) => {
            return Err(Error::NonConformingValue(format!(
                "schema needs {}, value is {}",
                scalar.name(),
                other.kind_name()
            )))
        }
    }
    Ok(())
}

/// Encodes a UTF-8 string: var-len byte length, then the bytes.
pub fn encode_str<W: Write>(s: &str, writer: &mut W) -> Result<()> {
    varint::encode_uvarint(writer, s.len() as u128)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

/// Encodes a byte string: var-len byte length, then the bytes.
pub fn encode_bytes<W: Write>(bytes: &[u8], writer: &mut W) -> Result<()> {
    varint::encode_uvarint(writer, bytes.len() as u128)?;
    writer.write_all(bytes)?;
    Ok(())
}
