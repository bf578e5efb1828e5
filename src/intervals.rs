//! Cumulative probability intervals per symbol
//!
//! Each symbol owns `[low, high)` within `[0, 1)`, laid out in ascending
//! symbol order with width equal to its relative frequency.

use std::fmt;

use serde::Serialize;

use crate::frequency::FrequencyTable;
use crate::tree::SymbolDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SymbolInterval {
    pub symbol: u8,
    pub low: f64,
    pub high: f64,
}

impl SymbolInterval {
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value < self.high
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProbabilityIntervals {
    intervals: Vec<SymbolInterval>,
}

impl ProbabilityIntervals {
    pub fn from_frequencies(freq: &FrequencyTable) -> Self {
        let total = freq.total();
        if total == 0 {
            return Self::default();
        }
        let len = total as f64;
        let mut seen = 0u64;
        let mut low = 0.0;
        let mut intervals = Vec::with_capacity(freq.len());
        for (symbol, count) in freq.iter() {
            // cumulative integer counts keep the last bound at exactly 1.0
            seen = seen.saturating_add(count);
            let high = seen as f64 / len;
            tracing::trace!(symbol, low, high, "symbol interval");
            intervals.push(SymbolInterval { symbol, low, high });
            low = high;
        }
        Self { intervals }
    }

    pub fn get(&self, symbol: u8) -> Option<&SymbolInterval> {
        self.intervals.iter().find(|i| i.symbol == symbol)
    }

    /// Symbol whose interval holds `value`.
    pub fn locate(&self, value: f64) -> Option<u8> {
        self.intervals
            .iter()
            .find(|i| i.contains(value))
            .map(|i| i.symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolInterval> + '_ {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

impl fmt::Display for ProbabilityIntervals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(
                f,
                "{}: [{:.4}, {:.4})",
                SymbolDisplay(interval.symbol),
                interval.low,
                interval.high
            )?;
        }
        f.write_str("}")
    }
}
