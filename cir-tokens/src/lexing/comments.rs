//! Comment pre-pass
//!
//! Splits a line at the first `//` that does not sit inside a string literal. String
//! boundaries are found with [string_literal_end], the same routine the scanner's string
//! rule uses, so the two never disagree about where a literal stops.

/// Returns `(code, comment)`; `comment` includes the leading `//`.
pub fn split_comment(line: &str) -> (&str, Option<&str>) {
    let bytes = line.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'"' => idx = string_literal_end(line, idx),
            b'/' if bytes.get(idx + 1) == Some(&b'/') => {
                return (&line[..idx], Some(&line[idx..]));
            }
            _ => idx += 1,
        }
    }
    (line, None)
}

/// Byte offset one past the string literal whose opening quote is at `open`.
///
/// The closing quote is the first `"` preceded by an even number of consecutive backslashes.
/// An unterminated literal runs to the end of the line.
pub fn string_literal_end(line: &str, open: usize) -> usize {
    let bytes = line.as_bytes();
    let mut backslashes = 0usize;
    for (offset, &byte) in bytes[open + 1..].iter().enumerate() {
        match byte {
            b'\\' => backslashes += 1,
            b'"' if backslashes % 2 == 0 => return open + 1 + offset + 1,
            _ => backslashes = 0,
        }
    }
    bytes.len()
}
