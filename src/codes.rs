//! Code assignment from a prefix-code tree

use std::collections::BTreeMap;
use std::fmt;

use crate::frequency::FrequencyTable;
use crate::tree::{HuffNode, HuffTree};

/// Path from the root to a leaf: `false` = left (0), `true` = right (1).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitCode(Vec<bool>);

impl BitCode {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, other: &BitCode) -> bool {
        self.0.starts_with(&other.0)
    }
}

impl From<Vec<bool>> for BitCode {
    fn from(bits: Vec<bool>) -> Self {
        BitCode(bits)
    }
}

impl fmt::Display for BitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitCode>,
}

impl CodeTable {
    /// Walk `tree` depth-first and record each leaf's path.
    ///
    /// A tree that is a single leaf gets the one-bit code `0`.
    pub fn assign(tree: &HuffTree) -> Self {
        let mut codes = BTreeMap::new();
        match tree.root() {
            HuffNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, BitCode(vec![false]));
            }
            root => build_codes(root, &mut Vec::new(), &mut codes),
        }
        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&BitCode> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitCode)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&BitCode> = self.codes.values().collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                if a.starts_with(b) || b.starts_with(a) {
                    return false;
                }
            }
        }
        true
    }

    /// Payload length in bits for input with these frequencies.
    pub fn encoded_bits(&self, freq: &FrequencyTable) -> u64 {
        freq.iter()
            .map(|(sym, count)| count * self.get(sym).map_or(0, |c| c.len() as u64))
            .sum()
    }
}

fn build_codes(node: &HuffNode, prefix: &mut Vec<bool>, codes: &mut BTreeMap<u8, BitCode>) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, BitCode(prefix.clone()));
        }
        HuffNode::Internal { left, right, .. } => {
            prefix.push(false);
            build_codes(left, prefix, codes);
            prefix.pop();

            prefix.push(true);
            build_codes(right, prefix, codes);
            prefix.pop();
        }
    }
}
