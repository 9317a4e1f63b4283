use bytes::Bytes;

/// Dynamic representation of a datum conforming to some schema.
///
/// The tree mirrors the schema shape: scalar leaves carry their host type
/// inline, containers hold further values. Struct field names and enum
/// variant names are carried for conformance checking only and are never
/// transmitted.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    F32(f32),
    F64(f64),
    Char(char),
    Bool(bool),
    Str(String),
    Bytes(Bytes), // Bytes for zero-copy binary payloads
    Unit,
    Option(Option<Box<Value>>),
    Seq(Vec<Value>),
    Tuple(Vec<Value>),
    Struct(Vec<FieldValue>),
    Enum(Box<VariantValue>),
}

/// A named field inside a `Value::Struct`.
#[derive(Debug, PartialEq, Clone)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

/// The selected variant inside a `Value::Enum`.
#[derive(Debug, PartialEq, Clone)]
pub struct VariantValue {
    pub ordinal: usize,
    pub name: String,
    pub value: Value,
}

impl Value {
    /// A `Value::Option` holding an inner value.
    pub fn some(value: Value) -> Value {
        Value::Option(Some(Box::new(value)))
    }

    /// An empty `Value::Option`.
    pub fn none() -> Value {
        Value::Option(None)
    }

    /// A `Value::Enum` with the given variant selected.
    pub fn variant(ordinal: usize, name: impl Into<String>, value: Value) -> Value {
        Value::Enum(Box::new(VariantValue {
            ordinal,
            name: name.into(),
            value,
        }))
    }

    /// Short name of this value's shape, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::U128(_) => "u128",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::I128(_) => "i128",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Char(_) => "char",
            Value::Bool(_) => "bool",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Unit => "unit",
            Value::Option(_) => "option",
            Value::Seq(_) => "seq",
            Value::Tuple(_) => "tuple",
            Value::Struct(_) => "struct",
            Value::Enum(_) => "enum",
        }
    }
}

impl FieldValue {
    /// Creates a named field value.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        FieldValue {
            name: name.into(),
            value,
        }
    }
}
