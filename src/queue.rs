//! Min-weight priority queue with a stable tie-break
//!
//! Lowest weight pops first. Among equal weights the most recently pushed
//! entry pops first, matching a list kept in descending weight order where
//! new entries go after existing ones of the same weight and pops come off
//! the tail.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{CodingError, Result};

/// Anything that can be ordered in the queue by weight.
pub trait Weighted {
    fn weight(&self) -> u64;
}

#[derive(Debug)]
struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> Eq for Entry<T> {}
impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: lighter first, then newer first
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[derive(Debug)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T: Weighted> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, item: T) {
        let entry = Entry {
            weight: item.weight(),
            seq: self.next_seq,
            item,
        };
        self.next_seq += 1;
        self.heap.push(entry);
    }

    /// Remove the lowest-weight item.
    pub fn pop(&mut self) -> Result<T> {
        self.heap
            .pop()
            .map(|entry| entry.item)
            .ok_or(CodingError::EmptyQueue)
    }

    pub fn peek_weight(&self) -> Option<u64> {
        self.heap.peek().map(|entry| entry.weight)
    }

    /// Number of queued items; same as [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.heap.len()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T: Weighted> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
