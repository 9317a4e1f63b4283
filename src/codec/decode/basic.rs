use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use bytes::Bytes;

use crate::codec::types::Value;
use crate::codec::varint;
use crate::internal::error::{Error, Result};
use crate::schema::types::ScalarType;

/// Decodes a scalar leaf value.
///
/// Var-len integers narrower than 128 bits share the 128-bit wire format
/// and are range-checked against their declared width here.
pub fn decode_scalar<R: Read>(scalar: ScalarType, reader: &mut R) -> Result<Value> {
    match scalar {
        ScalarType::U8 => Ok(Value::U8(reader.read_u8()?)),
        ScalarType::U16 => Ok(Value::U16(reader.read_u16::<LittleEndian>()?)),
        ScalarType::U32 => {
            let n = varint::decode_uvarint(reader)?;
            u32::try_from(n)
                .map(Value::U32)
                .map_err(|_| out_of_range(scalar, n))
        }
        ScalarType::U64 => {
            let n = varint::decode_uvarint(reader)?;
            u64::try_from(n)
                .map(Value::U64)
                .map_err(|_| out_of_range(scalar, n))
        }
        ScalarType::U128 => Ok(Value::U128(varint::decode_uvarint(reader)?)),
        ScalarType::I8 => Ok(Value::I8(reader.read_i8()?)),
        ScalarType::I16 => Ok(Value::I16(reader.read_i16::<LittleEndian>()?)),
        ScalarType::I32 => {
            let n = varint::decode_svarint(reader)?;
            i32::try_from(n)
                .map(Value::I32)
                .map_err(|_| signed_out_of_range(scalar, n))
        }
        ScalarType::I64 => {
            let n = varint::decode_svarint(reader)?;
            i64::try_from(n)
                .map(Value::I64)
                .map_err(|_| signed_out_of_range(scalar, n))
        }
        ScalarType::I128 => Ok(Value::I128(varint::decode_svarint(reader)?)),
        ScalarType::F32 => Ok(Value::F32(reader.read_f32::<LittleEndian>()?)),
        ScalarType::F64 => Ok(Value::F64(reader.read_f64::<LittleEndian>()?)),
        ScalarType::Char => {
            let n = varint::decode_uvarint(reader)?;
            u32::try_from(n)
                .ok()
                .and_then(char::from_u32)
                .map(Value::Char)
                .ok_or_else(|| {
                    Error::InvalidChar(format!("{} is not a unicode scalar", n))
                })
        }
        ScalarType::Bool => match reader.read_u8()? {
            0x00 => Ok(Value::Bool(false)),
            0x01 => Ok(Value::Bool(true)),
            other => Err(Error::OutOfRange(format!(
                "bool byte must be 0 or 1, got {:#04X}",
                other
            ))),
        },
    }
}

/// Decodes a UTF-8 string: var-len byte length, then the bytes.
pub fn decode_str<R: Read>(reader: &mut R) -> Result<Value> {
    let bytes = read_len_prefixed(reader)?;
    match String::from_utf8(bytes) {
        Ok(s) => Ok(Value::Str(s)),
        Err(err) => Err(Error::InvalidUtf8(format!(
            "str payload is not UTF-8: {}",
            err.utf8_error()
        ))),
    }
}

/// Decodes a byte string: var-len byte length, then the bytes.
pub fn decode_bytes<R: Read>(reader: &mut R) -> Result<Value> {
    let bytes = read_len_prefixed(reader)?;
    Ok(Value::Bytes(Bytes::from(bytes)))
}

/// Reads a length-prefixed payload. The buffer grows with the bytes that
/// actually arrive rather than being reserved up front from the prefix,
/// so a lying length cannot reserve unbounded memory.
fn read_len_prefixed<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let len = varint::decode_uvarint(reader)?;
    let len = usize::try_from(len).map_err(|_| {
        Error::OutOfRange(format!("length prefix {} exceeds platform limits", len))
    })?;
    let mut buf = Vec::new();
    reader.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() < len {
        return Err(Error::EndOfStream(format!(
            "length prefix promised {} bytes, stream ended after {}",
            len,
            buf.len()
        )));
    }
    Ok(buf)
}

fn out_of_range(scalar: ScalarType, n: u128) -> Error {
    Error::OutOfRange(format!("{} does not fit in a {}", n, scalar.name()))
}

fn signed_out_of_range(scalar: ScalarType, n: i128) -> Error {
    Error::OutOfRange(format!("{} does not fit in a {}", n, scalar.name()))
}
