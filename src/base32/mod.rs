//! RFC 4648 base32 (`A-Z2-7`, `=` padded).
//!
//! Every 5 input bytes (40 bits) become 8 symbols of 5 bits each. A short final
//! block is padded with `=` so the encoded length is always a multiple of 8.

pub mod decode;
pub mod encode;
pub mod text;

use crate::base_common::Alphabet;

pub static ALPHABET: Alphabet = match Alphabet::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567") {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("Could not build alphabet"),
};

pub const PADDING: u8 = b'=';

/// Input bytes per block.
pub const BLOCK_BYTES: usize = 5;

/// Output symbols per block.
pub const BLOCK_SYMBOLS: usize = 8;

pub use decode::{decode, decode_into, decoded_len};
pub use encode::{encode, encode_into, encoded_len};
pub use text::{decode_string, encode_string, to_text};
