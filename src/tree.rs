//! Prefix-code tree construction
//!
//! Classic greedy Huffman merge over a min-priority queue. Ties are broken
//! with a sequence number so identical inputs always yield identical trees:
//! leaves are numbered in ascending symbol order, internal nodes continue the
//! numbering in creation order. The first node popped becomes the left child.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    fn merge(left: HuffNode, right: HuffNode) -> HuffNode {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Queue entry carrying the deterministic ordering key.
struct Pending {
    weight: u64,
    seq: usize,
    node: HuffNode,
}

impl Eq for Pending {}
impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap on (weight, seq)
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

/// A built prefix-code tree. Always holds at least one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffTree {
    root: HuffNode,
}

impl HuffTree {
    /// Build the tree for `freq`, or `None` when there are no symbols.
    pub fn build(freq: &FrequencyTable) -> Option<HuffTree> {
        let mut heap = BinaryHeap::with_capacity(freq.len());
        for (seq, (symbol, weight)) in freq.iter().enumerate() {
            heap.push(Pending {
                weight,
                seq,
                node: HuffNode::Leaf { symbol, weight },
            });
        }

        let mut next_seq = heap.len();
        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let node = HuffNode::merge(left.node, right.node);
            heap.push(Pending {
                weight: node.weight(),
                seq: next_seq,
                node,
            });
            next_seq += 1;
        }

        let root = heap.pop()?.node;
        tracing::debug!(
            leaves = root.leaf_count(),
            weight = root.weight(),
            depth = root.depth(),
            "built prefix-code tree"
        );
        Some(HuffTree { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Total weight, i.e. the number of encoded symbols.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Longest root-to-leaf path; 0 for a single-leaf tree.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn is_single_leaf(&self) -> bool {
        matches!(self.root, HuffNode::Leaf { .. })
    }

    pub fn dump(&self, style: TreeDumpStyle) -> String {
        match style {
            TreeDumpStyle::Compact => self.root.to_string(),
            TreeDumpStyle::Indented => {
                let mut lines = Vec::new();
                indented_lines(&self.root, 0, "root", &mut lines);
                lines.join("\n")
            }
        }
    }
}

/// Layout of the human-readable tree dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeDumpStyle {
    /// `(weight left right)` pre-order on one line.
    #[default]
    Compact,
    /// One node per line, indented by depth.
    Indented,
}

impl TreeDumpStyle {
    /// Representation of the tree of an empty input.
    pub fn empty_tree(self) -> &'static str {
        match self {
            TreeDumpStyle::Compact => "()",
            TreeDumpStyle::Indented => "(empty)",
        }
    }
}

/// Dump an optional tree, using the style's empty marker for `None`.
pub fn dump_tree(tree: Option<&HuffTree>, style: TreeDumpStyle) -> String {
    match tree {
        Some(tree) => tree.dump(style),
        None => style.empty_tree().to_string(),
    }
}

pub(crate) struct SymbolDisplay(pub u8);

impl fmt::Display for SymbolDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0x21..=0x7e => write!(f, "'{}'", self.0 as char),
            b => write!(f, "0x{:02x}", b),
        }
    }
}

impl fmt::Display for HuffNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuffNode::Leaf { symbol, weight } => write!(f, "{}:{}", SymbolDisplay(*symbol), weight),
            HuffNode::Internal {
                weight,
                left,
                right,
            } => write!(f, "({} {} {})", weight, left, right),
        }
    }
}

fn indented_lines(node: &HuffNode, depth: usize, label: &str, out: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match node {
        HuffNode::Leaf { symbol, weight } => {
            out.push(format!(
                "{}{}-> Leaf: {} [weight: {}]",
                indent,
                label,
                SymbolDisplay(*symbol),
                weight
            ));
        }
        HuffNode::Internal {
            weight,
            left,
            right,
        } => {
            out.push(format!("{}{}-> Internal [weight: {}]", indent, label, weight));
            indented_lines(left, depth + 1, "L", out);
            indented_lines(right, depth + 1, "R", out);
        }
    }
}
