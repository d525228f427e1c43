use super::{ALPHABET, BLOCK_BYTES, BLOCK_SYMBOLS, PADDING};
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The output buffer was too small to contain the encoded input.
    BufferTooSmall,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::BufferTooSmall => write!(f, "Output buffer too small"),
        }
    }
}

/// Data symbols emitted for a block holding `n` bytes, indexed by `n`. The rest of the block is padding.
const SYMBOLS: [usize; BLOCK_BYTES + 1] = [0, 2, 4, 5, 7, 8];

/// Length of the encoding of `len` bytes, padding included.
pub const fn encoded_len(len: usize) -> usize {
    (len + BLOCK_BYTES - 1) / BLOCK_BYTES * BLOCK_SYMBOLS
}

fn encode_block(block: &[u8], output: &mut [u8]) {
    // 40-bit accumulator, first byte in the high bits; absent bytes read as zero.
    let mut accumulator: u64 = 0;
    for (index, &byte) in block.iter().enumerate() {
        accumulator |= (byte as u64) << (32 - 8 * index);
    }
    let symbols = SYMBOLS[block.len()];
    for (index, symbol) in output.iter_mut().enumerate() {
        *symbol = if index < symbols {
            ALPHABET.encode((accumulator >> (35 - 5 * index)) as usize)
        } else {
            PADDING
        };
    }
}

fn encode_blocks(input: &[u8], output: &mut [u8]) {
    for (block, symbols) in input.chunks(BLOCK_BYTES).zip(output.chunks_mut(BLOCK_SYMBOLS)) {
        encode_block(block, symbols);
    }
}

pub fn encode_into(input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
    let input = input.as_ref();
    let len = encoded_len(input.len());
    let output = output.as_mut().get_mut(..len).ok_or(Error::BufferTooSmall)?;
    encode_blocks(input, output);
    Ok(len)
}

pub fn encode(input: impl AsRef<[u8]>) -> String {
    let input = input.as_ref();
    let mut output = vec![0u8; encoded_len(input.len())];
    encode_blocks(input, &mut output);
    output.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn encode() {
        assert_eq!(super::encode(b""), "");
        assert_eq!(super::encode(b"f"), "MY======");
        assert_eq!(super::encode(b"fo"), "MZXQ====");
        assert_eq!(super::encode(b"foo"), "MZXW6===");
        assert_eq!(super::encode(b"foob"), "MZXW6YQ=");
        assert_eq!(super::encode(b"fooba"), "MZXW6YTB");
        assert_eq!(super::encode(b"foobar"), "MZXW6YTBOI======");
        assert_eq!(super::encode([0x00, 0x00, 0x00, 0x00, 0x00]), "AAAAAAAA");
        assert_eq!(super::encode([0xff, 0xff, 0xff, 0xff, 0xff]), "77777777");
        assert_eq!(super::encode([0xff]), "74======");
        assert_eq!(super::encode("Hello!"), "JBSWY3DPEE======");
    }

    #[test]
    fn padding() {
        let expected = [(0, 0), (1, 6), (2, 4), (3, 3), (4, 1)];
        for len in 0..=40 {
            let output = super::encode(vec![0xa5u8; len]);
            assert_eq!(output.len() % 8, 0);
            assert_eq!(output.len(), super::encoded_len(len));
            let padding = output.bytes().rev().take_while(|&c| c == b'=').count();
            assert_eq!((len % 5, padding), expected[len % 5]);
        }
    }

    #[test]
    fn alphabet() {
        let input: Vec<u8> = (0..=255).collect();
        let output = super::encode(&input);
        assert!(output
            .trim_end_matches('=')
            .chars()
            .all(|c| "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567".contains(c)));
    }

    #[test]
    fn encode_into() {
        let mut output = [0u8; 16];
        assert_eq!(super::encode_into(b"foobar", &mut output), Ok(16));
        assert_eq!(&output, b"MZXW6YTBOI======");

        let mut output = [0u8; 10];
        assert_eq!(super::encode_into(b"fooba", &mut output), Ok(8));
        assert_eq!(&output[..8], b"MZXW6YTB");

        let mut output = [0u8; 15];
        assert_eq!(super::encode_into(b"foobar", &mut output), Err(Error::BufferTooSmall));
    }
}
