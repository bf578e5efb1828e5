//! Error types for string-compress

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("engine has no input loaded; call set_string first")]
    NotLoaded,

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("symbol 0x{0:02x} has no code in the code table")]
    MissingCode(u8),

    #[error("corrupt compressed output: {0}")]
    Corrupt(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Failures while walking an encoded payload back through its tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("bit sequence exhausted after {decoded} of {expected} symbols")]
    Exhausted { decoded: usize, expected: usize },

    #[error("bit {bit_offset} does not lead to a leaf")]
    StrayBit { bit_offset: usize },

    #[error("decoding stopped at bit {consumed} of {bit_len}")]
    TrailingBits { consumed: usize, bit_len: usize },

    #[error("input could not be packed: {0}")]
    Unencodable(String),

    #[error("payload declares symbols but there is no tree to decode with")]
    EmptyTree,

    #[error("decoded output diverges from the input at byte {offset}")]
    Mismatch { offset: usize },

    #[error("decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(String),
}
