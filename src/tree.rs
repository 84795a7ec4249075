//! Huffman tree construction

use std::hash::Hash;

use tracing::trace;

use crate::error::{CodingError, Result};
use crate::frequency::FrequencyTable;
use crate::queue::{PriorityQueue, Weighted};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node<S>>,
        right: Box<Node<S>>,
    },
}

impl<S> Node<S> {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// Join two subtrees; `left` keeps the 0 branch.
    pub fn merge(left: Self, right: Self) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        count
    }
}

impl<S> Weighted for Node<S> {
    fn weight(&self) -> u64 {
        Node::weight(self)
    }
}

/// Build the Huffman tree for a frequency table and return its root.
pub fn build_tree<S: Eq + Hash + Clone>(freq: &FrequencyTable<S>) -> Result<Node<S>> {
    if freq.is_empty() {
        return Err(CodingError::EmptyInput);
    }

    let mut queue = PriorityQueue::with_capacity(freq.len());
    for (symbol, weight) in freq.iter() {
        queue.push(Node::Leaf {
            symbol: symbol.clone(),
            weight,
        });
    }

    while queue.size() > 1 {
        let left = queue.pop()?;
        let right = queue.pop()?;
        trace!(left = left.weight(), right = right.weight(), "merging nodes");
        queue.push(Node::merge(left, right));
    }

    queue.pop()
}
