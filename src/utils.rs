use std::{borrow::Cow, str::Utf8Error};

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

// everything except the unreserved set: ALPHA / DIGIT / "-" / "_" / "." / "~"
const RESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed escape sequence at byte {offset}")]
    MalformedEscape { offset: usize },

    #[error("decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
}

// percent-encoding the text, multi-byte characters are escaped per UTF-8 byte
pub fn encode(text: &str) -> String {
    utf8_percent_encode(text, RESERVED).to_string()
}

/// Reverses [`encode`]. Every `%` must start a two-digit hex escape and the
/// decoded bytes must form valid UTF-8; anything else is left untouched.
pub fn decode(text: &str) -> Result<String, DecodeError> {
    check_escapes(text)?;
    let decoded = percent_decode_str(text).decode_utf8()?;
    Ok(Cow::into_owned(decoded))
}

// percent_decode passes stray '%' through, so malformed escapes are caught here
fn check_escapes(text: &str) -> Result<(), DecodeError> {
    let bytes = text.as_bytes();
    let mut offset = 0;
    while offset < bytes.len() {
        if bytes[offset] != b'%' {
            offset += 1;
            continue;
        }
        match bytes.get(offset + 1..offset + 3) {
            Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => offset += 3,
            _ => return Err(DecodeError::MalformedEscape { offset }),
        }
    }
    Ok(())
}
