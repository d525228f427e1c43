use super::{decode, encode};
pub use super::decode::Error;

/// Encodes the UTF-8 bytes of `text`.
pub fn encode_string(text: &str) -> String {
    encode(text.as_bytes())
}

/// Reads `bytes` as UTF-8. Invalid sequences become U+FFFD.
pub fn to_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

pub fn decode_string(input: impl AsRef<[u8]>) -> Result<String, Error> {
    let bytes = decode(input)?;
    Ok(to_text(&bytes))
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn encode_string() {
        assert_eq!(super::encode_string(""), "");
        assert_eq!(super::encode_string("foobar"), "MZXW6YTBOI======");
        assert_eq!(super::encode_string("\u{e9}"), "YOUQ====");
    }

    #[test]
    fn decode_string() {
        assert_eq!(super::decode_string("MZXW6YTBOI======"), Ok("foobar".to_string()));
        assert_eq!(super::decode_string("YOUQ===="), Ok("\u{e9}".to_string()));
        assert_eq!(super::decode_string("74======"), Ok("\u{fffd}".to_string()));
        assert_eq!(super::decode_string("MZXW6YT"), Err(Error::InvalidLength { length: 7 }));
        assert_eq!(super::decode_string("========"), Ok(String::new()));
    }

    #[test]
    fn round_trip() {
        for text in ["", "a", "Base32 \u{2713}", "h\u{e9}llo w\u{f6}rld", "\u{1f980} crab", "line\nbreak\ttab"] {
            assert_eq!(super::decode_string(super::encode_string(text)), Ok(text.to_string()));
        }
    }
}
