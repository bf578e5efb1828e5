//! Self-contained compressed value
//!
//! Stores the frequency table instead of the tree: construction is
//! deterministic, so the same tree is rebuilt on the decoding side.

use serde::{Deserialize, Serialize};

use crate::bitpack::{self, EncodedPayload};
use crate::codes::CodeTable;
use crate::error::CompressError;
use crate::frequency::FrequencyTable;
use crate::tree::HuffTree;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedOutput {
    pub original_size: usize,
    pub frequencies: Vec<(u8, u64)>,
    pub payload: EncodedPayload,
}

impl CompressedOutput {
    pub fn new(freq: &FrequencyTable, payload: EncodedPayload) -> Self {
        Self {
            original_size: payload.symbol_count,
            frequencies: freq.iter().collect(),
            payload,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CompressError> {
        bincode::serialize(self).map_err(|e| CompressError::SerializationError(e.to_string()))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, CompressError> {
        bincode::deserialize(data).map_err(|e| CompressError::SerializationError(e.to_string()))
    }
}

/// Compress `data` into a standalone value.
pub fn compress(data: &[u8]) -> Result<CompressedOutput, CompressError> {
    let freq = FrequencyTable::from_bytes(data);
    let codes = HuffTree::build(&freq)
        .map(|tree| CodeTable::assign(&tree))
        .unwrap_or_default();
    let payload = bitpack::encode(data, &codes)?;
    Ok(CompressedOutput::new(&freq, payload))
}

/// Rebuild the tree from the stored frequencies and decode the payload.
pub fn decompress(output: &CompressedOutput) -> Result<Vec<u8>, CompressError> {
    let payload = &output.payload;
    let declared = payload.symbol_count;

    let available = payload.bytes.len().saturating_mul(8);
    if payload.bit_len > available {
        return Err(CompressError::Corrupt(format!(
            "bit length {} exceeds the {} bits stored",
            payload.bit_len, available
        )));
    }
    // every symbol costs at least one bit
    if declared > payload.bit_len {
        return Err(CompressError::Corrupt(format!(
            "symbol count {} exceeds bit length {}",
            declared, payload.bit_len
        )));
    }
    if output.original_size != declared {
        return Err(CompressError::Corrupt(format!(
            "original size {} does not match symbol count {}",
            output.original_size, declared
        )));
    }

    let freq = FrequencyTable::from_counts(output.frequencies.iter().copied())?;
    let total = freq.total();
    if total != declared as u64 {
        return Err(CompressError::Corrupt(format!(
            "frequency total {} does not match symbol count {}",
            total, declared
        )));
    }

    let tree = HuffTree::build(&freq);
    Ok(bitpack::decode(payload, tree.as_ref())?)
}
