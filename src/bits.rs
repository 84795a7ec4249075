//! Bit string construction and byte packing
//!
//! Bits are written as strings of `'0'`/`'1'`. Packing groups them eight at a
//! time from the left and reads each group as a base-2 number, so a short
//! final group lands in the low bits of its byte: `"011"` packs to `3`,
//! the same byte as `"00000011"`. Unpacking therefore needs the bit length.

use std::fmt::Debug;
use std::hash::Hash;

use crate::codes::CodeTable;
use crate::error::{CodingError, Result};

/// Concatenate the codes of every symbol in `sequence`.
pub fn stringify<S>(sequence: &[S], table: &CodeTable<S>) -> Result<String>
where
    S: Eq + Hash + Clone + Debug,
{
    let mut bits = String::new();
    for symbol in sequence {
        let code = table
            .get(symbol)
            .ok_or_else(|| CodingError::UnknownSymbol(format!("{:?}", symbol)))?;
        bits.push_str(code);
    }
    Ok(bits)
}

pub(crate) fn check_bits(bits: &str) -> Result<()> {
    match bits.chars().enumerate().find(|(_, c)| *c != '0' && *c != '1') {
        Some((position, found)) => Err(CodingError::InvalidBit { position, found }),
        None => Ok(()),
    }
}

/// Pack a bit string into bytes, eight bits per byte, final group unpadded.
pub fn bytify(bits: &str) -> Result<Vec<u8>> {
    check_bits(bits)?;
    Ok(bits
        .as_bytes()
        .chunks(8)
        .map(|group| group.iter().fold(0u8, |byte, bit| (byte << 1) | (bit - b'0')))
        .collect())
}

/// Recover exactly `bit_len` bits from bytes produced by [`bytify`].
pub fn unbytify(bytes: &[u8], bit_len: u64) -> Result<String> {
    let mismatch = || CodingError::BitLengthMismatch {
        bit_len,
        byte_len: bytes.len(),
    };
    if bytes.len() as u64 != bit_len.div_ceil(8) {
        return Err(mismatch());
    }

    let tail = (bit_len % 8) as usize;
    let mut bits = String::with_capacity(bit_len as usize);
    for (i, &byte) in bytes.iter().enumerate() {
        let width = if i + 1 == bytes.len() && tail != 0 { tail } else { 8 };
        if width < 8 && byte >> width != 0 {
            return Err(mismatch());
        }
        bits.push_str(&format!("{:0width$b}", byte, width = width));
    }
    Ok(bits)
}
