//! Prefix code assignment from a built tree.

use crate::frequency::{Symbol, ALPHABET_SIZE};
use crate::tree::{HuffmanTree, Node, NodeId};

/// Symbol to bit path, `false` = left and `true` = right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Vec<bool>>>,
}

impl CodeTable {
    /// Walk the tree depth-first with an explicit stack, recording the path to every leaf.
    pub fn assign(tree: &HuffmanTree) -> Self {
        let mut codes: Vec<Option<Vec<bool>>> = vec![None; ALPHABET_SIZE];
        let mut stack: Vec<(NodeId, Vec<bool>)> = vec![(tree.root(), Vec::new())];

        while let Some((id, path)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    // a bare leaf root still needs a bit to pack
                    let code = if path.is_empty() { vec![false] } else { path };
                    codes[symbol.index()] = Some(code);
                }
                Node::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        let mut p = path.clone();
                        p.push(true);
                        stack.push((right, p));
                    }
                    let mut p = path;
                    p.push(false);
                    stack.push((left, p));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&[bool]> {
        self.codes[symbol.index()].as_deref()
    }

    pub fn len_of(&self, symbol: Symbol) -> Option<usize> {
        self.get(symbol).map(<[bool]>::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &[bool])> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(i, code)| code.as_deref().map(|c| (Symbol::from_index(i), c)))
    }

    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&[bool]> = self.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j && b.starts_with(a) {
                    return false;
                }
            }
        }
        true
    }
}
