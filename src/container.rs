//! Encoded output and its packed byte container
//!
//! Layout (integers little-endian):
//!
//! ```text
//! [u32 entry count]
//! per entry: [u8 symbol length][symbol bytes][u8 code length][code bits, MSB first, zero padded]
//! [u64 bit length][payload: ceil(bit length / 8) bytes]
//! ```

use std::fmt;
use std::hash::Hash;
use std::io::{self, Read, Write};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codes::CodeTable;
use crate::error::{CodingError, Result};

/// Symbols that can be stored in a container.
pub trait SymbolBytes: Sized {
    fn to_symbol_bytes(&self) -> Vec<u8>;
    fn from_symbol_bytes(bytes: &[u8]) -> Result<Self>;
}

impl SymbolBytes for u8 {
    fn to_symbol_bytes(&self) -> Vec<u8> {
        vec![*self]
    }

    fn from_symbol_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes {
            [byte] => Ok(*byte),
            _ => Err(CodingError::Container(format!(
                "byte symbol of length {}",
                bytes.len()
            ))),
        }
    }
}

impl SymbolBytes for char {
    fn to_symbol_bytes(&self) -> Vec<u8> {
        let mut buf = [0u8; 4];
        self.encode_utf8(&mut buf).as_bytes().to_vec()
    }

    fn from_symbol_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| CodingError::Container(e.to_string()))?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(CodingError::Container(format!("{:?} is not a single char", text))),
        }
    }
}

impl SymbolBytes for String {
    fn to_symbol_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn from_symbol_bytes(bytes: &[u8]) -> Result<Self> {
        String::from_utf8(bytes.to_vec()).map_err(|e| CodingError::Container(e.to_string()))
    }
}

/// Packed bytes plus everything needed to decode them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize + Clone",
    deserialize = "S: Deserialize<'de> + Eq + Hash + Clone + fmt::Debug"
))]
pub struct Encoded<S: Eq + Hash> {
    pub bytes: Vec<u8>,
    pub table: CodeTable<S>,
    pub bit_len: u64,
}

impl<S> Encoded<S>
where
    S: Eq + Hash + Clone + fmt::Debug + SymbolBytes,
{
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = BitWriter::endian(writer, BigEndian);
        let count = u32::try_from(self.table.len())
            .map_err(|_| CodingError::Container("too many symbols".into()))?;
        out.write_bytes(&count.to_le_bytes())?;

        for (symbol, code) in self.table.iter() {
            let symbol_bytes = symbol.to_symbol_bytes();
            let symbol_len = u8::try_from(symbol_bytes.len()).map_err(|_| {
                CodingError::Container(format!("symbol {:?} longer than 255 bytes", symbol))
            })?;
            let code_len = u8::try_from(code.len()).map_err(|_| {
                CodingError::Container(format!("code for {:?} longer than 255 bits", symbol))
            })?;
            out.write_bytes(&[symbol_len])?;
            out.write_bytes(&symbol_bytes)?;
            out.write_bytes(&[code_len])?;
            for bit in code.bytes() {
                out.write_bit(bit == b'1')?;
            }
            out.byte_align()?;
        }

        out.write_bytes(&self.bit_len.to_le_bytes())?;
        out.write_bytes(&self.bytes)?;
        out.into_writer().flush()?;
        debug!(
            symbols = self.table.len(),
            bit_len = self.bit_len,
            "wrote container"
        );
        Ok(())
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let mut input = BitReader::endian(reader, BigEndian);
        let count = u32::from_le_bytes(read_array(&mut input)?);

        let mut entries = Vec::new();
        for _ in 0..count {
            let [symbol_len] = read_array::<_, 1>(&mut input)?;
            let mut symbol_bytes = vec![0u8; symbol_len as usize];
            input.read_bytes(&mut symbol_bytes).map_err(truncated)?;
            let symbol = S::from_symbol_bytes(&symbol_bytes)?;

            let [code_len] = read_array::<_, 1>(&mut input)?;
            let mut code = String::with_capacity(code_len as usize);
            for _ in 0..code_len {
                code.push(if input.read_bit().map_err(truncated)? { '1' } else { '0' });
            }
            for _ in 0..(8 - code_len % 8) % 8 {
                if input.read_bit().map_err(truncated)? {
                    return Err(CodingError::Container("nonzero code padding".into()));
                }
            }
            entries.push((symbol, code));
        }
        let table = CodeTable::from_entries(entries)?;

        let bit_len = u64::from_le_bytes(read_array(&mut input)?);
        let payload_len = bit_len.div_ceil(8);
        let mut bytes = Vec::new();
        input
            .into_reader()
            .take(payload_len)
            .read_to_end(&mut bytes)?;
        if bytes.len() as u64 != payload_len {
            return Err(CodingError::Container(format!(
                "payload holds {} of {} bytes",
                bytes.len(),
                payload_len
            )));
        }

        debug!(symbols = table.len(), bit_len, "read container");
        Ok(Self {
            bytes,
            table,
            bit_len,
        })
    }

    pub fn to_container_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    pub fn from_container_bytes(data: &[u8]) -> Result<Self> {
        Self::read_from(data)
    }
}

fn read_array<R: Read, const N: usize>(input: &mut BitReader<R, BigEndian>) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    input.read_bytes(&mut buf).map_err(truncated)?;
    Ok(buf)
}

fn truncated(e: io::Error) -> CodingError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        CodingError::Container("unexpected end of data".into())
    } else {
        CodingError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Encoded<char> {
        let table = CodeTable::from_entries(vec![
            ('a', "0".into()),
            ('é', "10".into()),
            ('c', "11".into()),
        ])
        .unwrap();
        Encoded {
            bytes: vec![0b0101_1010, 0b1],
            table,
            bit_len: 9,
        }
    }

    #[test]
    fn test_layout() {
        let bytes = sample().to_container_bytes().unwrap();
        let mut expected = vec![3, 0, 0, 0];
        expected.extend_from_slice(&[1, b'a', 1, 0b0000_0000]);
        expected.extend_from_slice(&[2, 0xC3, 0xA9, 2, 0b1000_0000]);
        expected.extend_from_slice(&[1, b'c', 2, 0b1100_0000]);
        expected.extend_from_slice(&9u64.to_le_bytes());
        expected.extend_from_slice(&[0b0101_1010, 0b1]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_roundtrip() {
        let encoded = sample();
        let bytes = encoded.to_container_bytes().unwrap();
        assert_eq!(Encoded::<char>::from_container_bytes(&bytes).unwrap(), encoded);
    }

    #[test]
    fn test_truncated() {
        let bytes = sample().to_container_bytes().unwrap();
        for cut in [0, 3, 6, 20, bytes.len() - 1] {
            let err = Encoded::<char>::from_container_bytes(&bytes[..cut]).unwrap_err();
            assert!(matches!(err, CodingError::Container(_)), "cut at {}: {:?}", cut, err);
        }
    }

    #[test]
    fn test_nonzero_padding() {
        let mut bytes = sample().to_container_bytes().unwrap();
        // padding byte of the first code
        bytes[7] = 0b0000_0001;
        assert!(Encoded::<char>::from_container_bytes(&bytes).is_err());
    }

    #[test]
    fn test_string_symbols() {
        let table =
            CodeTable::from_entries(vec![("the".to_string(), "0".into()), ("cat".to_string(), "1".into())])
                .unwrap();
        let encoded = Encoded {
            bytes: vec![0b010],
            table,
            bit_len: 3,
        };
        let bytes = encoded.to_container_bytes().unwrap();
        assert_eq!(Encoded::<String>::from_container_bytes(&bytes).unwrap(), encoded);
    }

    #[test]
    fn test_symbol_bytes() {
        assert!(u8::from_symbol_bytes(&[1, 2]).is_err());
        assert!(char::from_symbol_bytes(b"ab").is_err());
        assert_eq!(char::from_symbol_bytes("é".as_bytes()).unwrap(), 'é');
        assert!(String::from_symbol_bytes(&[0xFF]).is_err());
    }
}
