//! Huffman tree construction.
//!
//! Nodes live in an arena and refer to their children by index. A node's
//! index is also the order in which it entered the priority queue, which is
//! what breaks ties between equal weights: the earlier node is removed first.
//! Encoder and decoder both build from a canonical-order table, so they
//! always arrive at the same tree.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::frequency::{FrequencyTable, Symbol};

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    /// `right` is only absent on the root of a one-symbol tree.
    Internal {
        weight: u64,
        left: NodeId,
        right: Option<NodeId>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two lightest nodes.
    ///
    /// Returns `None` if the table has no entries.
    pub fn build(table: &FrequencyTable) -> Option<Self> {
        let leaves = table.len();
        let mut nodes: Vec<Node> = Vec::with_capacity(2 * leaves);
        // min-heap keyed on (weight, arena index)
        let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::with_capacity(leaves);

        for (symbol, weight) in table.iter() {
            let id = nodes.len();
            nodes.push(Node::Leaf { symbol, weight });
            heap.push(Reverse((weight, id)));
        }

        while heap.len() > 1 {
            let (Some(Reverse((w1, left))), Some(Reverse((w2, right)))) = (heap.pop(), heap.pop())
            else {
                break;
            };
            let id = nodes.len();
            nodes.push(Node::Internal {
                weight: w1 + w2,
                left,
                right: Some(right),
            });
            heap.push(Reverse((w1 + w2, id)));
        }

        let Reverse((weight, mut root)) = heap.pop()?;
        if let Node::Leaf { .. } = nodes[root] {
            // give a lone symbol a one-bit path instead of an empty one
            let id = nodes.len();
            nodes.push(Node::Internal {
                weight,
                left: root,
                right: None,
            });
            root = id;
        }

        debug!(leaves, nodes = nodes.len(), "huffman tree built");
        Some(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Follow one branch from `id`: `false` goes left, `true` goes right.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    Some(left)
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
