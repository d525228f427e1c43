use super::{ALPHABET, BLOCK_BYTES, BLOCK_SYMBOLS, PADDING};
use crate::base_common::alphabet;
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    BufferTooSmall,
    InvalidLength { length: usize },
    NonAsciiCharacter { character: u8, index: usize },
    InvalidCharacter { character: char, index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "Output buffer too small"),
            Self::InvalidLength { length } => write!(f, "Invalid length {}", length),
            Self::InvalidCharacter { character, index } => write!(f, "Invalid character '{}' at index {}", character, index),
            Self::NonAsciiCharacter { character, index } => write!(f, "Non-ascii character {:#02x} at index {}", character, index),
        }
    }
}

impl From<alphabet::DecodeError> for Error {
    fn from(error: alphabet::DecodeError) -> Self {
        match error {
            alphabet::DecodeError::InvalidCharacter { character, index } => Error::InvalidCharacter { character, index },
            alphabet::DecodeError::NonAsciiCharacter { character, index } => Error::NonAsciiCharacter { character, index },
        }
    }
}

/// Bytes carried by a final block of `n` symbols, indexed by `n`. Tails the encoder never emits are `None`.
const BYTES: [Option<usize>; BLOCK_SYMBOLS + 1] = [Some(0), None, Some(1), None, Some(2), Some(3), None, Some(4), Some(BLOCK_BYTES)];

/// Number of bytes carried by `symbols` data symbols (padding excluded).
pub const fn decoded_len(symbols: usize) -> usize {
    symbols * 5 / 8
}

/// Strips the trailing padding and checks the remaining symbols form whole blocks plus a valid tail.
fn symbols(input: &[u8]) -> Result<&[u8], Error> {
    let end = input.iter().rposition(|&character| character != PADDING).map_or(0, |index| index + 1);
    let symbols = &input[..end];
    if input.len() % BLOCK_SYMBOLS != 0 || BYTES[symbols.len() % BLOCK_SYMBOLS].is_none() {
        return Err(Error::InvalidLength { length: input.len() });
    }
    Ok(symbols)
}

fn decode_block(block: &[u8], offset: usize, output: &mut [u8]) -> Result<(), Error> {
    // 40-bit accumulator, first symbol in the high bits; bits past the last whole byte are dropped.
    let mut accumulator: u64 = 0;
    for (index, &character) in block.iter().enumerate() {
        let value = ALPHABET.decode(character, offset + index)?;
        accumulator |= (value as u64) << (35 - 5 * index);
    }
    for (index, byte) in output.iter_mut().enumerate() {
        *byte = (accumulator >> (32 - 8 * index)) as u8;
    }
    Ok(())
}

fn decode_blocks(symbols: &[u8], output: &mut [u8]) -> Result<(), Error> {
    let blocks = symbols.chunks(BLOCK_SYMBOLS).zip(output.chunks_mut(BLOCK_BYTES));
    for (index, (block, bytes)) in blocks.enumerate() {
        decode_block(block, index * BLOCK_SYMBOLS, bytes)?;
    }
    Ok(())
}

pub fn decode_into(input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
    let symbols = symbols(input.as_ref())?;
    let len = decoded_len(symbols.len());
    let output = output.as_mut().get_mut(..len).ok_or(Error::BufferTooSmall)?;
    decode_blocks(symbols, output)?;
    Ok(len)
}

pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
    let symbols = symbols(input.as_ref())?;
    let mut output = vec![0u8; decoded_len(symbols.len())];
    decode_blocks(symbols, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn decode() {
        assert_eq!(super::decode(""), Ok(vec![]));
        assert_eq!(super::decode("MY======"), Ok(b"f".to_vec()));
        assert_eq!(super::decode("MZXQ===="), Ok(b"fo".to_vec()));
        assert_eq!(super::decode("MZXW6==="), Ok(b"foo".to_vec()));
        assert_eq!(super::decode("MZXW6YQ="), Ok(b"foob".to_vec()));
        assert_eq!(super::decode("MZXW6YTB"), Ok(b"fooba".to_vec()));
        assert_eq!(super::decode("MZXW6YTBOI======"), Ok(b"foobar".to_vec()));
        assert_eq!(super::decode("77777777"), Ok(vec![0xff, 0xff, 0xff, 0xff, 0xff]));
        assert_eq!(super::decode("74======"), Ok(vec![0xff]));
    }

    #[test]
    fn round_trip() {
        for len in 0..=64 {
            let input: Vec<u8> = (0..len).map(|i| (i * 37 + len * 11) as u8).collect();
            assert_eq!(super::decode(crate::base32::encode(&input)), Ok(input));
        }
        let input: Vec<u8> = (0..=255).collect();
        assert_eq!(super::decode(crate::base32::encode(&input)), Ok(input));
    }

    #[test]
    fn trailing_bits_are_discarded() {
        // 'Z' carries two bits past the end of the byte.
        assert_eq!(super::decode("MZ======"), Ok(b"f".to_vec()));
    }

    #[test]
    fn invalid_length() {
        assert_eq!(super::decode("MY"), Err(Error::InvalidLength { length: 2 }));
        assert_eq!(super::decode("MZXW6YTBO"), Err(Error::InvalidLength { length: 9 }));
        assert_eq!(super::decode("M======="), Err(Error::InvalidLength { length: 8 }));
        assert_eq!(super::decode("MZX====="), Err(Error::InvalidLength { length: 8 }));
        assert_eq!(super::decode("MZXW6Y=="), Err(Error::InvalidLength { length: 8 }));
    }

    #[test]
    fn extra_padding() {
        assert_eq!(super::decode("========"), Ok(vec![]));
        assert_eq!(super::decode("MY=============="), Ok(b"f".to_vec()));
        assert_eq!(super::decode("MZXW6YTB========"), Ok(b"fooba".to_vec()));
    }

    #[test]
    fn invalid_character() {
        assert_eq!(
            super::decode("mzxw6ytb"),
            Err(Error::InvalidCharacter { character: 'm', index: 0 })
        );
        assert_eq!(
            super::decode("MZXW6YTBO1======"),
            Err(Error::InvalidCharacter { character: '1', index: 9 })
        );
        assert_eq!(
            super::decode("MY==MZXQ"),
            Err(Error::InvalidCharacter { character: '=', index: 2 })
        );
        assert_eq!(
            super::decode("MZXW6YT\u{e9}"),
            Err(Error::InvalidLength { length: 9 })
        );
        assert_eq!(
            super::decode([b'M', b'Z', b'X', b'W', b'6', b'Y', b'T', 0xe9]),
            Err(Error::NonAsciiCharacter { character: 0xe9, index: 7 })
        );
    }

    #[test]
    fn decode_into() {
        let mut output = [0u8; 6];
        assert_eq!(super::decode_into("MZXW6YTBOI======", &mut output), Ok(6));
        assert_eq!(&output, b"foobar");

        let mut output = [0u8; 5];
        assert_eq!(super::decode_into("MZXW6YTBOI======", &mut output), Err(Error::BufferTooSmall));
    }

    #[test]
    fn decoded_len() {
        assert_eq!(super::decoded_len(0), 0);
        assert_eq!(super::decoded_len(2), 1);
        assert_eq!(super::decoded_len(4), 2);
        assert_eq!(super::decoded_len(5), 3);
        assert_eq!(super::decoded_len(7), 4);
        assert_eq!(super::decoded_len(8), 5);
        assert_eq!(super::decoded_len(10), 6);
    }
}
