//! Symbol occurrence counting

use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counts per distinct symbol, kept in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Eq + Hash> {
    entries: Vec<(S, u64)>,
    index: HashMap<S, usize>,
}

impl<S: Eq + Hash + Clone> FrequencyTable<S> {
    pub fn from_symbols<'a, I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = &'a S>,
        S: 'a,
    {
        let mut entries: Vec<(S, u64)> = Vec::new();
        let mut index: HashMap<S, usize> = HashMap::new();
        for symbol in symbols {
            match index.get(symbol) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(symbol.clone(), entries.len());
                    entries.push((symbol.clone(), 1));
                }
            }
        }
        Self { entries, index }
    }

    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.index.get(symbol).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights, i.e. the length of the counted sequence.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, u64)> + '_ {
        self.entries.iter().map(|(s, w)| (s, *w))
    }
}
