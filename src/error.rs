//! Error types for huffman-coder

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodingError>;

#[derive(Error, Debug)]
pub enum CodingError {
    #[error("empty input")]
    EmptyInput,

    #[error("pop on empty priority queue")]
    EmptyQueue,

    #[error("symbol {0} has no entry in the code table")]
    UnknownSymbol(String),

    #[error("no code matches the bit string at position {position}")]
    UndecodableSequence { position: usize },

    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit { position: usize, found: char },

    #[error("{byte_len} packed bytes cannot hold exactly {bit_len} bits")]
    BitLengthMismatch { bit_len: u64, byte_len: usize },

    #[error("invalid code table: {0}")]
    InvalidCodeTable(String),

    #[error("input of {len} symbols exceeds the limit of {max}")]
    InputTooLarge { len: usize, max: usize },

    #[error("malformed container: {0}")]
    Container(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}
