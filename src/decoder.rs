//! Bit string decoding against a code table

use std::collections::HashMap;
use std::hash::Hash;

use tracing::{trace, warn};

use crate::bits::check_bits;
use crate::codes::CodeTable;
use crate::config::DecodeStrategy;
use crate::error::{CodingError, Result};

/// Decode `bits` back into symbols.
///
/// Codes are prefix-free, so at most one code matches at any cursor position
/// and both strategies yield the same output.
pub fn decode_bits<S>(bits: &str, table: &CodeTable<S>, strategy: DecodeStrategy) -> Result<Vec<S>>
where
    S: Eq + Hash + Clone,
{
    check_bits(bits)?;
    match strategy {
        DecodeStrategy::LongestFirst => decode_longest_first(bits, table),
        DecodeStrategy::PrefixLookup => decode_prefix_lookup(bits, table),
    }
}

fn decode_longest_first<S>(bits: &str, table: &CodeTable<S>) -> Result<Vec<S>>
where
    S: Eq + Hash + Clone,
{
    let mut codes: Vec<(&S, &str)> = table.iter().collect();
    codes.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let mut output = Vec::new();
    let mut cursor = 0;
    while cursor < bits.len() {
        let rest = &bits[cursor..];
        match codes.iter().find(|(_, code)| rest.starts_with(code)) {
            Some((symbol, code)) => {
                trace!(cursor, code, "matched code");
                output.push((*symbol).clone());
                cursor += code.len();
            }
            None => {
                warn!(position = cursor, "no code matches");
                return Err(CodingError::UndecodableSequence { position: cursor });
            }
        }
    }
    Ok(output)
}

fn decode_prefix_lookup<S>(bits: &str, table: &CodeTable<S>) -> Result<Vec<S>>
where
    S: Eq + Hash + Clone,
{
    let lookup: HashMap<&str, &S> = table.iter().map(|(s, c)| (c, s)).collect();
    let max_len = table.max_code_len();

    let mut output = Vec::new();
    let mut start = 0;
    let mut end = 0;
    while start < bits.len() {
        end += 1;
        if end > bits.len() || end - start > max_len {
            warn!(position = start, "no code matches");
            return Err(CodingError::UndecodableSequence { position: start });
        }
        if let Some(symbol) = lookup.get(&bits[start..end]) {
            output.push((*symbol).clone());
            start = end;
        }
    }
    Ok(output)
}
