//! string-compress: prefix-code compression engine for text.
//!
//! Pipeline, leaves first:
//! - byte frequency analysis
//! - Huffman tree construction with deterministic tie-breaking
//! - code assignment by depth-first walk
//! - bit packing and tree-walk decoding
//!
//! [`CompressionEngine`] holds one input at a time and eagerly computes the
//! tree, payload, round-trip result and metrics on every `set_string`.

pub mod baseline;
pub mod bitpack;
pub mod codes;
pub mod config;
pub mod container;
pub mod error;
pub mod frequency;
pub mod intervals;
pub mod report;
pub mod tree;

use serde::Serialize;

use crate::bitpack::EncodedPayload;
use crate::codes::CodeTable;
use crate::config::EngineConfig;
use crate::error::{CompressError, DecodeError};
use crate::frequency::FrequencyTable;
use crate::intervals::ProbabilityIntervals;
use crate::report::CompressionReport;
use crate::tree::HuffTree;

pub use crate::container::{compress, decompress, CompressedOutput};
pub use crate::tree::TreeDumpStyle;

/// Ratio reported for empty input, where there is nothing to divide by.
pub const EMPTY_RATIO: f64 = 1.0;

/// Size metrics of the currently loaded input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompressionMetrics {
    pub original_bits: u64,
    /// Payload bits, excluding padding of the last byte.
    pub encoded_bits: u64,
    /// `original_bits / encoded_bits`; greater than 1 means the text shrank.
    pub ratio: f64,
    /// Shannon entropy in bits per symbol.
    pub entropy_bits: f64,
    pub deflate_ratio: Option<f64>,
}

struct LoadedState {
    original: String,
    frequencies: FrequencyTable,
    intervals: ProbabilityIntervals,
    tree: Option<HuffTree>,
    codes: CodeTable,
    payload: EncodedPayload,
    tree_dump: String,
    round_trip: Result<String, DecodeError>,
    metrics: CompressionMetrics,
}

enum EngineState {
    Empty,
    Loaded(Box<LoadedState>),
}

/// Stateful façade over the compression pipeline.
///
/// Not synchronized; give each session its own engine or wrap it in a lock.
pub struct CompressionEngine {
    config: EngineConfig,
    state: EngineState,
}

impl Default for CompressionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl CompressionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: EngineState::Empty,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, EngineState::Loaded(_))
    }

    /// Drop the loaded input and return to the empty state.
    pub fn clear(&mut self) {
        self.state = EngineState::Empty;
    }

    /// Replace the current input and recompute everything derived from it.
    pub fn set_string(&mut self, text: &str) {
        let loaded = self.analyze(text);
        if let Err(e) = &loaded.round_trip {
            tracing::error!(error = %e, len = text.len(), "round-trip check failed");
        }
        self.state = EngineState::Loaded(Box::new(loaded));
    }

    pub fn get_string(&self) -> Result<&str, CompressError> {
        Ok(self.loaded()?.original.as_str())
    }

    /// The input as reconstructed from the encoded payload.
    pub fn get_result_string(&self) -> Result<&str, CompressError> {
        match &self.loaded()?.round_trip {
            Ok(text) => Ok(text.as_str()),
            Err(e) => Err(CompressError::Decode(e.clone())),
        }
    }

    /// Encoded payload length in bits.
    pub fn get_result_float(&self) -> Result<f64, CompressError> {
        Ok(self.loaded()?.metrics.encoded_bits as f64)
    }

    /// Original bits over encoded bits, or [`EMPTY_RATIO`] for empty input.
    pub fn get_compression_ratio(&self) -> Result<f64, CompressError> {
        Ok(self.loaded()?.metrics.ratio)
    }

    pub fn get_tree_string(&self) -> Result<&str, CompressError> {
        Ok(self.loaded()?.tree_dump.as_str())
    }

    pub fn metrics(&self) -> Result<&CompressionMetrics, CompressError> {
        Ok(&self.loaded()?.metrics)
    }

    pub fn frequencies(&self) -> Result<&FrequencyTable, CompressError> {
        Ok(&self.loaded()?.frequencies)
    }

    /// Per-symbol cumulative probability intervals of the loaded input.
    pub fn intervals(&self) -> Result<&ProbabilityIntervals, CompressError> {
        Ok(&self.loaded()?.intervals)
    }

    /// `None` when the loaded input is empty.
    pub fn tree(&self) -> Result<Option<&HuffTree>, CompressError> {
        Ok(self.loaded()?.tree.as_ref())
    }

    pub fn codes(&self) -> Result<&CodeTable, CompressError> {
        Ok(&self.loaded()?.codes)
    }

    pub fn payload(&self) -> Result<&EncodedPayload, CompressError> {
        Ok(&self.loaded()?.payload)
    }

    /// Standalone value that can be decoded without this engine.
    pub fn export(&self) -> Result<CompressedOutput, CompressError> {
        let state = self.loaded()?;
        Ok(CompressedOutput::new(&state.frequencies, state.payload.clone()))
    }

    pub fn report(&self) -> Result<CompressionReport, CompressError> {
        let state = self.loaded()?;
        Ok(CompressionReport {
            original: state.original.clone(),
            result: self.get_result_string()?.to_string(),
            result_float: state.metrics.encoded_bits as f64,
            compression_ratio: state.metrics.ratio,
            tree: state.tree_dump.clone(),
            intervals: state.intervals.clone(),
            entropy_bits: state.metrics.entropy_bits,
            deflate_ratio: state.metrics.deflate_ratio,
        })
    }

    fn loaded(&self) -> Result<&LoadedState, CompressError> {
        match &self.state {
            EngineState::Loaded(state) => Ok(&**state),
            EngineState::Empty => Err(CompressError::NotLoaded),
        }
    }

    fn analyze(&self, text: &str) -> LoadedState {
        let data = text.as_bytes();
        let frequencies = FrequencyTable::from_bytes(data);
        let intervals = ProbabilityIntervals::from_frequencies(&frequencies);
        let tree = HuffTree::build(&frequencies);
        let codes = tree.as_ref().map(CodeTable::assign).unwrap_or_default();
        tracing::debug!(
            len = data.len(),
            alphabet = frequencies.len(),
            "analyzed input"
        );

        let (payload, round_trip) = pack(data, &codes, tree.as_ref());

        let metrics = self.measure(data, &frequencies, &payload);
        let tree_dump = crate::tree::dump_tree(tree.as_ref(), self.config.tree_style);

        LoadedState {
            original: text.to_string(),
            frequencies,
            intervals,
            tree,
            codes,
            payload,
            tree_dump,
            round_trip,
            metrics,
        }
    }

    fn measure(
        &self,
        data: &[u8],
        frequencies: &FrequencyTable,
        payload: &EncodedPayload,
    ) -> CompressionMetrics {
        let original_bits = data.len() as u64 * 8;
        let encoded_bits = payload.bit_len as u64;
        let ratio = if encoded_bits == 0 {
            EMPTY_RATIO
        } else {
            original_bits as f64 / encoded_bits as f64
        };

        let deflate_ratio = if self.config.compute_baseline {
            baseline::deflate_ratio(data, self.config.deflate_level).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "deflate baseline unavailable");
                None
            })
        } else {
            None
        };

        CompressionMetrics {
            original_bits,
            encoded_bits,
            ratio,
            entropy_bits: frequencies.entropy_bits(),
            deflate_ratio,
        }
    }
}

/// Encode `data` and verify the result; a packing failure leaves an empty payload.
fn pack(
    data: &[u8],
    codes: &CodeTable,
    tree: Option<&HuffTree>,
) -> (EncodedPayload, Result<String, DecodeError>) {
    match bitpack::encode(data, codes) {
        Ok(payload) => {
            let round_trip = verify_round_trip(data, &payload, tree);
            (payload, round_trip)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to pack payload");
            (
                EncodedPayload::default(),
                Err(DecodeError::Unencodable(e.to_string())),
            )
        }
    }
}

/// Decode `payload` and confirm it reproduces `data` byte for byte.
fn verify_round_trip(
    data: &[u8],
    payload: &EncodedPayload,
    tree: Option<&HuffTree>,
) -> Result<String, DecodeError> {
    let decoded = bitpack::decode(payload, tree)?;
    if let Some(offset) = data
        .iter()
        .zip(&decoded)
        .position(|(a, b)| a != b)
        .or_else(|| (data.len() != decoded.len()).then(|| data.len().min(decoded.len())))
    {
        return Err(DecodeError::Mismatch { offset });
    }
    String::from_utf8(decoded).map_err(|e| DecodeError::InvalidUtf8(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_getters_fail_before_set_string() {
        let engine = CompressionEngine::default();
        assert!(!engine.is_loaded());
        assert!(matches!(engine.get_string(), Err(CompressError::NotLoaded)));
        assert!(matches!(engine.get_result_string(), Err(CompressError::NotLoaded)));
        assert!(matches!(engine.get_result_float(), Err(CompressError::NotLoaded)));
        assert!(matches!(engine.get_compression_ratio(), Err(CompressError::NotLoaded)));
        assert!(matches!(engine.get_tree_string(), Err(CompressError::NotLoaded)));
        assert!(matches!(engine.export(), Err(CompressError::NotLoaded)));
    }

    #[test]
    fn test_abracadabra_scenario() {
        let mut engine = CompressionEngine::default();
        engine.set_string("abracadabra");
        assert_eq!(engine.get_string().unwrap(), "abracadabra");
        assert_eq!(engine.get_result_string().unwrap(), "abracadabra");
        assert_eq!(engine.get_result_float().unwrap(), 23.0);
        assert!((engine.get_compression_ratio().unwrap() - 88.0 / 23.0).abs() < 1e-12);
        assert_eq!(
            engine.get_tree_string().unwrap(),
            "(11 'a':5 (6 (2 'c':1 'd':1) (4 'b':2 'r':2)))"
        );
    }

    #[test]
    fn test_empty_input_sentinels() {
        let mut engine = CompressionEngine::default();
        engine.set_string("");
        assert!(engine.is_loaded());
        assert_eq!(engine.get_result_string().unwrap(), "");
        assert_eq!(engine.get_result_float().unwrap(), 0.0);
        assert_eq!(engine.get_compression_ratio().unwrap(), EMPTY_RATIO);
        assert_eq!(engine.get_tree_string().unwrap(), "()");
        assert!(engine.tree().unwrap().is_none());
        assert_eq!(engine.metrics().unwrap().deflate_ratio, None);
    }

    #[test]
    fn test_set_string_replaces_state() {
        let mut engine = CompressionEngine::default();
        engine.set_string("aaaa");
        assert_eq!(engine.get_tree_string().unwrap(), "'a':4");
        engine.set_string("ab");
        assert_eq!(engine.get_string().unwrap(), "ab");
        assert_eq!(engine.get_tree_string().unwrap(), "(2 'a':1 'b':1)");
        assert_eq!(engine.frequencies().unwrap().get(b'a'), 1);
    }

    #[test]
    fn test_clear_returns_to_empty() {
        let mut engine = CompressionEngine::default();
        engine.set_string("hello");
        engine.clear();
        assert!(matches!(engine.get_string(), Err(CompressError::NotLoaded)));
    }

    #[test]
    fn test_multibyte_text_roundtrips() {
        let mut engine = CompressionEngine::default();
        let text = "héllo wörld ✓ ünïcödé";
        engine.set_string(text);
        assert_eq!(engine.get_result_string().unwrap(), text);
        assert_eq!(
            engine.metrics().unwrap().original_bits,
            text.len() as u64 * 8
        );
    }

    #[test]
    fn test_round_trip_detects_mismatch() {
        let freq = FrequencyTable::from_bytes(b"ab");
        let tree = HuffTree::build(&freq);
        let codes = CodeTable::assign(tree.as_ref().unwrap());
        let payload = bitpack::encode(b"ab", &codes).unwrap();
        assert_eq!(
            verify_round_trip(b"ba", &payload, tree.as_ref()),
            Err(DecodeError::Mismatch { offset: 0 })
        );
    }

    #[test]
    fn test_packing_failure_is_cached_as_unencodable() {
        let freq = FrequencyTable::from_bytes(b"ab");
        let tree = HuffTree::build(&freq);
        let codes = CodeTable::assign(tree.as_ref().unwrap());
        let (payload, round_trip) = pack(b"abc", &codes, tree.as_ref());
        assert!(payload.is_empty());
        assert!(matches!(round_trip, Err(DecodeError::Unencodable(msg)) if msg.contains("0x63")));
    }

    #[test]
    fn test_intervals_follow_loaded_input() {
        let mut engine = CompressionEngine::default();
        assert!(matches!(engine.intervals(), Err(CompressError::NotLoaded)));
        engine.set_string("aab");
        let b = engine.intervals().unwrap().get(b'b').unwrap();
        assert!((b.low - 2.0 / 3.0).abs() < 1e-12);
        engine.set_string("");
        assert!(engine.intervals().unwrap().is_empty());
    }

    #[test]
    fn test_baseline_disabled() {
        let config = EngineConfig {
            compute_baseline: false,
            ..EngineConfig::default()
        };
        let mut engine = CompressionEngine::new(config);
        engine.set_string("some text some text");
        assert_eq!(engine.metrics().unwrap().deflate_ratio, None);
    }

    #[test]
    fn test_indented_tree_style() {
        let config = EngineConfig {
            tree_style: TreeDumpStyle::Indented,
            ..EngineConfig::default()
        };
        let mut engine = CompressionEngine::new(config);
        engine.set_string("aab");
        assert!(engine
            .get_tree_string()
            .unwrap()
            .starts_with("root-> Internal [weight: 3]"));
    }
}
