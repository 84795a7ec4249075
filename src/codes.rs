//! Code table derivation and validation
//!
//! A [`CodeTable`] maps every symbol to a non-empty string of `'0'`/`'1'`.
//! Tables derived from a tree are prefix-free by construction; tables coming
//! from outside (deserialized or built from entries) are checked.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{CodingError, Result};
use crate::tree::Node;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<(S, String)>",
    into = "Vec<(S, String)>",
    bound(
        serialize = "S: Serialize + Clone",
        deserialize = "S: Deserialize<'de> + Eq + Hash + Clone + fmt::Debug"
    )
)]
pub struct CodeTable<S: Eq + Hash> {
    entries: Vec<(S, String)>,
    index: HashMap<S, usize>,
}

impl<S: Eq + Hash + Clone> CodeTable<S> {
    /// Walk the tree left-first, appending `0` for left and `1` for right.
    ///
    /// A root that is itself a leaf gets the code `"0"`.
    pub fn from_tree(root: &Node<S>) -> Self {
        let mut entries = Vec::with_capacity(root.leaf_count());
        let mut stack = vec![(root, String::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    let code = if path.is_empty() { "0".to_string() } else { path };
                    entries.push((symbol.clone(), code));
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push('1');
                    stack.push((right, right_path));
                    let mut left_path = path;
                    left_path.push('0');
                    stack.push((left, left_path));
                }
            }
        }
        Self::index_entries(entries)
    }

    /// Build a table from externally supplied entries, rejecting anything
    /// that could not have come out of a Huffman tree walk.
    pub fn from_entries(entries: Vec<(S, String)>) -> Result<Self>
    where
        S: fmt::Debug,
    {
        if entries.is_empty() {
            return Err(CodingError::InvalidCodeTable("no entries".into()));
        }
        for (symbol, code) in &entries {
            if code.is_empty() {
                return Err(CodingError::InvalidCodeTable(format!(
                    "empty code for {:?}",
                    symbol
                )));
            }
            if !code.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(CodingError::InvalidCodeTable(format!(
                    "non-binary code {:?} for {:?}",
                    code, symbol
                )));
            }
        }
        let len = entries.len();
        let table = Self::index_entries(entries);
        if table.index.len() != len {
            return Err(CodingError::InvalidCodeTable("duplicate symbol".into()));
        }
        if !table.is_prefix_free() {
            return Err(CodingError::InvalidCodeTable("codes are not prefix-free".into()));
        }
        Ok(table)
    }

    fn index_entries(entries: Vec<(S, String)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (symbol, _))| (symbol.clone(), i))
            .collect();
        Self { entries, index }
    }

    pub fn get(&self, symbol: &S) -> Option<&str> {
        self.index.get(symbol).map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in tree walk order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &str)> + '_ {
        self.entries.iter().map(|(s, c)| (s, c.as_str()))
    }

    pub fn max_code_len(&self) -> usize {
        self.entries.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&str> = self.entries.iter().map(|(_, c)| c.as_str()).collect();
        codes.sort_unstable();
        // any prefix sorts directly before some code it prefixes
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }
}

impl<S: Eq + Hash + Clone + fmt::Debug> TryFrom<Vec<(S, String)>> for CodeTable<S> {
    type Error = CodingError;

    fn try_from(entries: Vec<(S, String)>) -> Result<Self> {
        Self::from_entries(entries)
    }
}

impl<S: Eq + Hash> From<CodeTable<S>> for Vec<(S, String)> {
    fn from(table: CodeTable<S>) -> Self {
        table.entries
    }
}

impl<S: Eq + Hash + fmt::Display> fmt::Display for CodeTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in &self.entries {
            writeln!(f, "'{}' -> {}", symbol, code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::tree::build_tree;

    fn table_for(text: &str) -> CodeTable<char> {
        let data: Vec<char> = text.chars().collect();
        CodeTable::from_tree(&build_tree(&FrequencyTable::from_symbols(&data)).unwrap())
    }

    #[test]
    fn test_single_symbol_gets_zero() {
        let table = table_for("aaaa");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&'a'), Some("0"));
    }

    #[test]
    fn test_codes_follow_tree() {
        let table = table_for("abcaa");
        assert_eq!(table.get(&'c'), Some("00"));
        assert_eq!(table.get(&'b'), Some("01"));
        assert_eq!(table.get(&'a'), Some("1"));
        let order: Vec<char> = table.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, vec!['c', 'b', 'a']);
        assert_eq!(table.max_code_len(), 2);
    }

    #[test]
    fn test_generated_table_is_prefix_free() {
        let table = table_for("this is an example of a huffman tree");
        assert!(table.is_prefix_free());
        assert_eq!(table.len(), 16);
    }

    #[test]
    fn test_from_entries_rejects_prefix() {
        let err = CodeTable::from_entries(vec![('a', "0".into()), ('b', "01".into())]).unwrap_err();
        assert!(matches!(err, CodingError::InvalidCodeTable(_)));
    }

    #[test]
    fn test_from_entries_rejects_bad_codes() {
        assert!(CodeTable::<char>::from_entries(vec![]).is_err());
        assert!(CodeTable::from_entries(vec![('a', String::new())]).is_err());
        assert!(CodeTable::from_entries(vec![('a', "02".into())]).is_err());
        assert!(CodeTable::from_entries(vec![('a', "0".into()), ('a', "1".into())]).is_err());
        assert!(CodeTable::from_entries(vec![('a', "1".into()), ('b', "1".into())]).is_err());
    }

    #[test]
    fn test_display() {
        let table = table_for("abcaa");
        assert_eq!(table.to_string(), "'c' -> 00\n'b' -> 01\n'a' -> 1\n");
    }

    #[test]
    fn test_json_roundtrip() {
        let table = table_for("mississippi");
        let json = serde_json::to_string(&table).unwrap();
        let parsed: CodeTable<char> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_json_rejects_invalid_table() {
        let parsed: std::result::Result<CodeTable<char>, _> =
            serde_json::from_str(r#"[["a","1"],["b","10"]]"#);
        assert!(parsed.is_err());
    }
}
