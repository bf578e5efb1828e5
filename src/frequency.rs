//! Byte frequency analysis

use std::collections::BTreeMap;

use crate::error::CompressError;

/// Occurrence counts per byte. Unseen bytes are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = BTreeMap::new();
        for &b in data {
            *counts.entry(b).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Build from explicit `(symbol, count)` pairs; zero counts are dropped.
    ///
    /// Fails when the counts of one symbol, or all counts together, overflow `u64`.
    pub fn from_counts(
        pairs: impl IntoIterator<Item = (u8, u64)>,
    ) -> Result<Self, CompressError> {
        let mut counts: BTreeMap<u8, u64> = BTreeMap::new();
        for (sym, count) in pairs {
            if count > 0 {
                let slot = counts.entry(sym).or_insert(0);
                *slot = slot.checked_add(count).ok_or_else(|| {
                    CompressError::Corrupt(format!("count of symbol 0x{:02x} overflows", sym))
                })?;
            }
        }
        let table = Self { counts };
        table
            .checked_total()
            .ok_or_else(|| CompressError::Corrupt("frequency total overflows".into()))?;
        Ok(table)
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.checked_total().unwrap_or(u64::MAX)
    }

    pub fn checked_total(&self) -> Option<u64> {
        self.counts
            .values()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))
    }

    /// Iterate in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }

    /// Shannon entropy in bits per symbol.
    pub fn entropy_bits(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let len = total as f64;
        let mut entropy = 0.0;
        for &f in self.counts.values() {
            let p = f as f64 / len;
            entropy -= p * p.log2();
        }
        entropy
    }
}
