//! huffman-coder: Huffman entropy coding with bit-exact packing.
//!
//! Pipeline:
//! - Frequency counting in first-occurrence order
//! - Tree construction from a min-weight queue with a stable tie-break
//! - Code table derivation by tree walk (left `0`, right `1`)
//! - Bit string packing into bytes, and the inverse given the bit length
//!
//! Symbols are any `Eq + Hash + Clone` value. The same input always yields
//! the same tree, code table and bytes.

pub mod bits;
pub mod codes;
pub mod config;
pub mod container;
pub mod decoder;
pub mod error;
pub mod frequency;
pub mod queue;
pub mod tree;

use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

pub use crate::codes::CodeTable;
pub use crate::config::{CoderConfig, DecodeStrategy};
pub use crate::container::{Encoded, SymbolBytes};
pub use crate::error::{CodingError, Result};

use crate::frequency::FrequencyTable;

/// Derive the code table for `sequence`.
pub fn code_table<S>(sequence: &[S]) -> Result<CodeTable<S>>
where
    S: Eq + Hash + Clone,
{
    let freq = FrequencyTable::from_symbols(sequence);
    let root = tree::build_tree(&freq)?;
    Ok(CodeTable::from_tree(&root))
}

/// Encode with the default configuration.
pub fn encode<S>(sequence: &[S]) -> Result<Encoded<S>>
where
    S: Eq + Hash + Clone + Debug,
{
    Coder::default().encode(sequence)
}

/// Decode packed bytes holding `bit_len` bits with the default configuration.
pub fn decode<S>(bytes: &[u8], table: &CodeTable<S>, bit_len: u64) -> Result<Vec<S>>
where
    S: Eq + Hash + Clone,
{
    Coder::default().decode_parts(bytes, table, bit_len)
}

/// The configured encoder/decoder
pub struct Coder {
    config: CoderConfig,
}

impl Coder {
    /// Create a new coder with the given configuration
    pub fn new(config: CoderConfig) -> Self {
        Self { config }
    }

    /// Configuration this coder runs with
    pub fn config(&self) -> &CoderConfig {
        &self.config
    }

    /// Encode a sequence into packed bytes, its code table and bit length
    pub fn encode<S>(&self, sequence: &[S]) -> Result<Encoded<S>>
    where
        S: Eq + Hash + Clone + Debug,
    {
        if sequence.is_empty() {
            return Err(CodingError::EmptyInput);
        }
        if sequence.len() > self.config.max_input_symbols {
            return Err(CodingError::InputTooLarge {
                len: sequence.len(),
                max: self.config.max_input_symbols,
            });
        }

        let table = code_table(sequence)?;
        let bit_string = bits::stringify(sequence, &table)?;
        let bytes = bits::bytify(&bit_string)?;
        let bit_len = bit_string.len() as u64;

        debug!(
            symbols = sequence.len(),
            distinct = table.len(),
            bit_len,
            bytes = bytes.len(),
            "encoded sequence"
        );
        Ok(Encoded {
            bytes,
            table,
            bit_len,
        })
    }

    /// Decode the output of [`Coder::encode`]
    pub fn decode<S>(&self, encoded: &Encoded<S>) -> Result<Vec<S>>
    where
        S: Eq + Hash + Clone,
    {
        self.decode_parts(&encoded.bytes, &encoded.table, encoded.bit_len)
    }

    /// Decode packed bytes holding `bit_len` bits against `table`
    pub fn decode_parts<S>(&self, bytes: &[u8], table: &CodeTable<S>, bit_len: u64) -> Result<Vec<S>>
    where
        S: Eq + Hash + Clone,
    {
        let bit_string = bits::unbytify(bytes, bit_len)?;
        let symbols = decoder::decode_bits(&bit_string, table, self.config.decode_strategy)?;
        debug!(bit_len, symbols = symbols.len(), "decoded sequence");
        Ok(symbols)
    }
}

impl Default for Coder {
    fn default() -> Self {
        Self::new(CoderConfig::default())
    }
}
