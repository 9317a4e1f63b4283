// Schema tree model for the Binschema format
//
// A schema is an immutable tree of type descriptors. Children are owned
// values; the only self-reference mechanism is the `Recurse` back-reference,
// resolved at traversal time against the ancestor stack.

use crate::internal::error::{Error, Result};

/// Tree-shaped descriptor of a set of legal values and their byte
/// representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Schema {
    /// A scalar leaf.
    Scalar(ScalarType),
    /// UTF-8 string: var-len byte length, then the bytes.
    Str,
    /// Binary string: var-len byte length, then the bytes.
    Bytes,
    /// Unit. Encoded as nothing.
    Unit,
    /// Option: one tag byte (0 none, 1 some), then the inner value iff some.
    Option(Box<Schema>),
    /// Homogenous sequence, fixed or variable length. A variable sequence
    /// is prefixed with its var-len element count; a fixed one is not.
    Seq(SeqSchema),
    /// Heterogenous fixed-arity sequence, encoded as the concatenation of
    /// its elements.
    Tuple(Vec<Schema>),
    /// Named fields encoded in declaration order. Names never hit the wire.
    Struct(Vec<SchemaField>),
    /// Tagged union: ordinal-encoded variant index, then the selected
    /// variant's value. A zero-variant enum is a legal schema whose value
    /// set is empty.
    Enum(Vec<SchemaVariant>),
    /// Back-reference to the ancestor `level` steps above this node.
    /// `Recurse(1)` is the immediate parent; level 0 never resolves.
    Recurse(u64),
}

/// The scalar leaf types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// One raw byte.
    U8,
    /// Two bytes, little-endian.
    U16,
    /// Var-len uint, range-checked on decode.
    U32,
    /// Var-len uint, range-checked on decode.
    U64,
    /// Var-len uint.
    U128,
    /// One raw byte.
    I8,
    /// Two bytes, little-endian.
    I16,
    /// Var-len sint, range-checked on decode.
    I32,
    /// Var-len sint, range-checked on decode.
    I64,
    /// Var-len sint.
    I128,
    /// Four bytes, little-endian IEEE-754.
    F32,
    /// Eight bytes, little-endian IEEE-754.
    F64,
    /// Var-len uint holding a unicode scalar.
    Char,
    /// One byte, 0 or 1.
    Bool,
}

/// Body of `Schema::Seq`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeqSchema {
    /// Fixed element count, or `None` for a length-prefixed sequence.
    pub len: Option<u64>,
    pub inner: Box<Schema>,
}

/// Item in `Schema::Struct`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaField {
    pub name: String,
    pub inner: Schema,
}

/// Item in `Schema::Enum`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaVariant {
    pub name: String,
    pub inner: Schema,
}

impl Schema {
    /// An option of `inner`.
    pub fn option(inner: Schema) -> Schema {
        Schema::Option(Box::new(inner))
    }

    /// A variable-length sequence of `inner`.
    pub fn seq(inner: Schema) -> Schema {
        Schema::Seq(SeqSchema {
            len: None,
            inner: Box::new(inner),
        })
    }

    /// A fixed-length sequence of `inner`.
    pub fn fixed_seq(len: u64, inner: Schema) -> Schema {
        Schema::Seq(SeqSchema {
            len: Some(len),
            inner: Box::new(inner),
        })
    }

    /// Short name of this schema's shape, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Schema::Scalar(scalar) => scalar.name(),
            Schema::Str => "str",
            Schema::Bytes => "bytes",
            Schema::Unit => "unit",
            Schema::Option(_) => "option",
            Schema::Seq(_) => "seq",
            Schema::Tuple(_) => "tuple",
            Schema::Struct(_) => "struct",
            Schema::Enum(_) => "enum",
            Schema::Recurse(_) => "recurse",
        }
    }

    /// Follows `Recurse` back-references against the ancestor stack until a
    /// concrete schema is reached.
    ///
    /// `ancestors` is the traversal path from the schema root down to the
    /// parent of this node, root first. A level of 0 or one exceeding the
    /// ancestor depth fails with `InvalidSchema`.
    pub fn resolve<'a>(&'a self, ancestors: &[&'a Schema]) -> Result<&'a Schema> {
        let mut schema = self;
        while let &Schema::Recurse(level) = schema {
            if level == 0 {
                return Err(Error::InvalidSchema(
                    "recurse level 0 never resolves".to_string(),
                ));
            }
            let depth = ancestors.len() as u64;
            if level > depth {
                return Err(Error::InvalidSchema(format!(
                    "recurse level {} exceeds ancestor depth {}",
                    level, depth
                )));
            }
            schema = ancestors[(depth - level) as usize];
        }
        Ok(schema)
    }
}

impl ScalarType {
    /// Short name of this scalar type, for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::U128 => "u128",
            ScalarType::I8 => "i8",
            ScalarType::I16 => "i16",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::I128 => "i128",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
            ScalarType::Char => "char",
            ScalarType::Bool => "bool",
        }
    }
}

impl SchemaField {
    /// Creates a named struct field.
    pub fn new(name: impl Into<String>, inner: Schema) -> Self {
        SchemaField {
            name: name.into(),
            inner,
        }
    }
}

impl SchemaVariant {
    /// Creates a named enum variant.
    pub fn new(name: impl Into<String>, inner: Schema) -> Self {
        SchemaVariant {
            name: name.into(),
            inner,
        }
    }
}
