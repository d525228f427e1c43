use std::{error, fmt};

/// Lowest code point a symbol may have (`'2'`); the reverse table is indexed by `character - OFFSET`.
pub const OFFSET: u8 = b'2';

/// Highest code point a symbol may have (`'Z'`).
pub const LAST: u8 = b'Z';

const SLOTS: usize = (LAST - OFFSET) as usize + 1;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    DuplicateCharacter { character: char, first: usize, second: usize },
    NonAsciiCharacter { character: u8, index: usize },
    OutOfRangeCharacter { character: char, index: usize },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    NonAsciiCharacter { character: u8, index: usize },
    InvalidCharacter { character: char, index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCharacter { character, first, second } => {
                write!(f, "Duplicate character '{}' at indexes {} and {}", character, first, second)
            }
            Self::NonAsciiCharacter { character, index } => write!(f, "Non-ascii character {:#02x} at index {}", character, index),
            Self::OutOfRangeCharacter { character, index } => {
                write!(f, "Character '{}' at index {} is outside the symbol range", character, index)
            }
        }
    }
}

impl error::Error for DecodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { character, index } => write!(f, "Invalid character '{}' at index {}", character, index),
            Self::NonAsciiCharacter { character, index } => write!(f, "Non-ascii character {:#02x} at index {}", character, index),
        }
    }
}

/// Forward and reverse symbol tables for a 32 symbol alphabet.
pub struct Alphabet {
    encode: [u8; 32],
    decode: [Option<u8>; SLOTS],
}

impl Alphabet {
    /// Maps a 5-bit value to its symbol. Only the low 5 bits of `value` are used.
    pub const fn encode(&self, value: usize) -> u8 {
        self.encode[value & 31]
    }

    pub fn decode(&self, character: u8, index: usize) -> Result<u8, DecodeError> {
        if character >= 128 {
            return Err(DecodeError::NonAsciiCharacter { character, index });
        }
        let slot = character.checked_sub(OFFSET).and_then(|slot| self.decode.get(slot as usize)).copied().flatten();
        slot.ok_or(DecodeError::InvalidCharacter {
            character: character as char,
            index,
        })
    }

    pub const fn new(characters: &[u8; 32]) -> Result<Self, Error> {
        let mut encode = [0u8; 32];
        let mut decode: [Option<u8>; SLOTS] = [None; SLOTS];

        let mut index = 0;
        while index < encode.len() {
            let character = characters[index];
            if character >= 128 {
                return Err(Error::NonAsciiCharacter { index, character });
            }
            if character < OFFSET || character > LAST {
                return Err(Error::OutOfRangeCharacter {
                    character: character as char,
                    index,
                });
            }
            let slot = (character - OFFSET) as usize;
            if let Some(first) = decode[slot] {
                return Err(Error::DuplicateCharacter {
                    character: character as char,
                    first: first as usize,
                    second: index,
                });
            }
            encode[index] = character;
            decode[slot] = Some(index as u8);
            index += 1;
        }

        Ok(Self { encode, decode })
    }

    pub const fn len(&self) -> usize {
        self.encode.len()
    }
}
