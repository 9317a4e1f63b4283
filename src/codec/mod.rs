// Codec module for the Binschema wire format

pub mod decode;
pub mod encode;
pub mod ordinal;
pub mod types;
pub mod varint;

pub use decode::decode_value;
pub use encode::encode_value;
