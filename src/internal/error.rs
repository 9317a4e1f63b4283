use thiserror::Error;
use std::io;

/// Unified error type for the Binschema library.
///
/// Every encode/decode failure is fatal for the current operation; no
/// partial value is ever returned alongside one of these.
#[derive(Error, Debug)]
pub enum Error {
    /// A read ran past the end of the byte source.
    #[error("End Of Stream: {0}")]
    EndOfStream(String),

    /// A var-len integer whose shift overflowed the 128-bit cap.
    #[error("Malformed Varint: {0}")]
    MalformedVarint(String),

    /// A decoded integer exceeds its declared width, an enum ordinal its
    /// variant count, or an option tag / bool byte is not 0 or 1.
    #[error("Out Of Range: {0}")]
    OutOfRange(String),

    /// Str contents that are not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(String),

    /// A char value that is not a unicode scalar.
    #[error("Invalid Char: {0}")]
    InvalidChar(String),

    /// A recurse level that cannot be resolved, or a schema with no
    /// inhabitants asked to carry a value.
    #[error("Invalid Schema: {0}")]
    InvalidSchema(String),

    /// Encoder input that violates a constraint of its schema.
    #[error("Non-Conforming Value: {0}")]
    NonConformingValue(String),

    /// Error from the underlying byte sink/source, surfaced verbatim.
    #[error("IO Error: {0}")]
    Io(io::Error),
}

/// A specialized `Result` type for Binschema operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        // A short read_exact is the end-of-stream condition, not a sink
        // failure; everything else passes through untouched.
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::EndOfStream("source ended mid-read".to_string())
        } else {
            Error::Io(err)
        }
    }
}
