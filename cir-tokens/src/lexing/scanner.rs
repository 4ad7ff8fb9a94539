//! Line scanner
//!
//!     A cursor walks the code part of a line. At each position the matchers in [MATCHERS]
//!     are tried in order and the first hit consumes its text:
//!
//!         1. type        `!` with optional `cir.`/`llvm.` prefix, then word chars
//!         2. string      `"` up to the first unescaped `"`, or end of line
//!         3. number      `[0-9]+`
//!         4. operation   `cir.` then word chars, emitted as namespace + function
//!         5. sigil       `@`, `%` or `#`, optional `cir.`, then word chars
//!         6. word        word chars, classified through the [Lexicon]
//!
//!     The order matters: `cir.const` must reach the operation matcher before the word
//!     matcher sees `cir`, and `%0` must not be read as a number.
//!
//!     Word characters are ASCII `[A-Za-z0-9_]`. Prefixed shapes fall back to the unprefixed
//!     reading when nothing follows the dot, so `%cir.` scans as `%cir` and a skipped `.`.

use super::comments::string_literal_end;
use super::lexicon::Lexicon;
use crate::token::{utf16_len, Token, TokenCategory};

const OPERATION_PREFIX: &str = "cir.";
const TYPE_PREFIXES: &[&str] = &["cir.", "llvm."];
const SIGIL_PREFIXES: &[&str] = &["cir."];

/// A successful match at the cursor. Lengths are in bytes of the remaining line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matched {
    Single {
        len: usize,
        category: Option<TokenCategory>,
    },
    /// `cir.<name>`: the `cir` namespace plus the operation name after the dot.
    Operation { len: usize },
}

impl Matched {
    fn len(self) -> usize {
        match self {
            Matched::Single { len, .. } | Matched::Operation { len } => len,
        }
    }
}

type Matcher = fn(&str, &Lexicon) -> Option<Matched>;

pub const MATCHERS: &[Matcher] = &[
    match_type,
    match_string,
    match_number,
    match_operation,
    match_sigil,
    match_word,
];

/// Scans one line (without its comment) and appends the tokens found.
pub fn scan_line<'src>(
    line_no: u32,
    line: &'src str,
    lexicon: &Lexicon,
    out: &mut Vec<Token<'src>>,
) {
    let mut pos = 0;
    let mut column = 0u32;

    while pos < line.len() {
        let rest = &line[pos..];
        let matched = MATCHERS.iter().find_map(|matcher| matcher(rest, lexicon));

        let Some(matched) = matched else {
            // Unrecognized: skip a single character.
            if let Some(ch) = rest.chars().next() {
                pos += ch.len_utf8();
                column += ch.len_utf16() as u32;
            }
            continue;
        };

        let len = matched.len();
        match matched {
            Matched::Single { category, .. } => {
                out.push(Token::new(line_no, column, &rest[..len], category));
            }
            Matched::Operation { .. } => {
                let namespace = &rest[..OPERATION_PREFIX.len() - 1];
                let name = &rest[OPERATION_PREFIX.len()..len];
                out.push(Token::new(
                    line_no,
                    column,
                    namespace,
                    Some(TokenCategory::Namespace),
                ));
                out.push(Token::new(
                    line_no,
                    column + OPERATION_PREFIX.len() as u32,
                    name,
                    Some(TokenCategory::Function),
                ));
            }
        }
        pos += len;
        column += utf16_len(&rest[..len]);
    }
}

fn word_len(s: &str) -> usize {
    s.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count()
}

fn digits_len(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Length of an optional prefix followed by at least one word character. Falls back to the
/// unprefixed reading when no word character follows a prefix.
fn prefixed_word_len(s: &str, prefixes: &[&str]) -> usize {
    for prefix in prefixes {
        if let Some(after) = s.strip_prefix(prefix) {
            let len = word_len(after);
            if len > 0 {
                return prefix.len() + len;
            }
        }
    }
    word_len(s)
}

fn match_type(rest: &str, _: &Lexicon) -> Option<Matched> {
    let after = rest.strip_prefix('!')?;
    let len = prefixed_word_len(after, TYPE_PREFIXES);
    (len > 0).then_some(Matched::Single {
        len: 1 + len,
        category: Some(TokenCategory::Type),
    })
}

fn match_string(rest: &str, _: &Lexicon) -> Option<Matched> {
    rest.starts_with('"').then(|| Matched::Single {
        len: string_literal_end(rest, 0),
        category: Some(TokenCategory::String),
    })
}

fn match_number(rest: &str, _: &Lexicon) -> Option<Matched> {
    let len = digits_len(rest);
    (len > 0).then_some(Matched::Single {
        len,
        category: Some(TokenCategory::Number),
    })
}

fn match_operation(rest: &str, _: &Lexicon) -> Option<Matched> {
    let after = rest.strip_prefix(OPERATION_PREFIX)?;
    let len = word_len(after);
    (len > 0).then_some(Matched::Operation {
        len: OPERATION_PREFIX.len() + len,
    })
}

fn match_sigil(rest: &str, _: &Lexicon) -> Option<Matched> {
    let category = match rest.as_bytes().first()? {
        b'@' => TokenCategory::Function,
        b'%' => TokenCategory::Variable,
        b'#' => TokenCategory::EnumMember,
        _ => return None,
    };
    let len = prefixed_word_len(&rest[1..], SIGIL_PREFIXES);
    (len > 0).then_some(Matched::Single {
        len: 1 + len,
        category: Some(category),
    })
}

fn match_word(rest: &str, lexicon: &Lexicon) -> Option<Matched> {
    let len = word_len(rest);
    (len > 0).then(|| Matched::Single {
        len,
        category: lexicon.classify(&rest[..len]),
    })
}
