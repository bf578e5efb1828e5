//! Bit-level packing of symbol codes
//!
//! Codes are written MSB first and the final byte is zero padded. The payload
//! records how many bits and symbols it holds so the padding is never decoded.

use std::io::{self, Cursor};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use serde::{Deserialize, Serialize};

use crate::codes::CodeTable;
use crate::error::{CompressError, DecodeError};
use crate::tree::{HuffNode, HuffTree};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPayload {
    pub bytes: Vec<u8>,
    /// Meaningful bits in `bytes`, excluding padding.
    pub bit_len: usize,
    pub symbol_count: usize,
}

impl EncodedPayload {
    pub fn is_empty(&self) -> bool {
        self.symbol_count == 0
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

/// Concatenate the code of every input symbol, in input order.
pub fn encode(data: &[u8], codes: &CodeTable) -> Result<EncodedPayload, CompressError> {
    let mut bytes = Vec::new();
    let mut bit_len = 0usize;
    {
        let mut writer = BitWriter::endian(&mut bytes, BigEndian);
        for &b in data {
            let code = codes.get(b).ok_or(CompressError::MissingCode(b))?;
            for &bit in code.bits() {
                writer.write_bit(bit)?;
            }
            bit_len += code.len();
            tracing::trace!(symbol = b, code = %code, "encoded symbol");
        }
        writer.byte_align()?;
    }

    tracing::debug!(
        symbols = data.len(),
        bits = bit_len,
        bytes = bytes.len(),
        "packed payload"
    );
    Ok(EncodedPayload {
        bytes,
        bit_len,
        symbol_count: data.len(),
    })
}

/// Bounded bit source that refuses to read into the padding.
struct BitCursor<R: io::Read> {
    reader: BitReader<R, BigEndian>,
    consumed: usize,
    limit: usize,
}

impl<R: io::Read> BitCursor<R> {
    fn next_bit(&mut self) -> Option<bool> {
        if self.consumed >= self.limit {
            return None;
        }
        let bit = self.reader.read_bit().ok()?;
        self.consumed += 1;
        Some(bit)
    }
}

/// Walk `payload` through `tree` until `payload.symbol_count` symbols are out.
pub fn decode(payload: &EncodedPayload, tree: Option<&HuffTree>) -> Result<Vec<u8>, DecodeError> {
    let expected = payload.symbol_count;
    if expected == 0 {
        return Ok(Vec::new());
    }
    let tree = tree.ok_or(DecodeError::EmptyTree)?;

    let mut cursor = BitCursor {
        reader: BitReader::endian(Cursor::new(payload.bytes.as_slice()), BigEndian),
        consumed: 0,
        limit: payload.bit_len.min(payload.bytes.len().saturating_mul(8)),
    };
    let mut output = Vec::with_capacity(expected.min(payload.bit_len));

    for decoded in 0..expected {
        let exhausted = DecodeError::Exhausted { decoded, expected };
        match tree.root() {
            HuffNode::Leaf { symbol, .. } => {
                let bit_offset = cursor.consumed;
                if cursor.next_bit().ok_or(exhausted)? {
                    return Err(DecodeError::StrayBit { bit_offset });
                }
                output.push(*symbol);
            }
            root => {
                let mut node = root;
                loop {
                    match node {
                        HuffNode::Leaf { symbol, .. } => {
                            tracing::trace!(symbol = *symbol, bit = cursor.consumed, "decoded symbol");
                            output.push(*symbol);
                            break;
                        }
                        HuffNode::Internal { left, right, .. } => {
                            let bit = cursor.next_bit().ok_or_else(|| exhausted.clone())?;
                            node = if bit { right.as_ref() } else { left.as_ref() };
                        }
                    }
                }
            }
        }
    }

    if cursor.consumed != payload.bit_len {
        return Err(DecodeError::TrailingBits {
            consumed: cursor.consumed,
            bit_len: payload.bit_len,
        });
    }
    tracing::debug!(symbols = output.len(), bits = cursor.consumed, "unpacked payload");
    Ok(output)
}
