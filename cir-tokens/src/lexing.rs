//! Lexer
//!
//!     Purely lexical tokenization of CIR text. There is no grammar here: the lexer only
//!     decides, character by character, which of a handful of token shapes starts at the
//!     cursor. It must cope with whatever is in the editor buffer, including half-typed
//!     operations, so it never fails.
//!
//! The Lexing Pipeline
//!
//!     Lines are processed independently, in order:
//!         1. Comment pre-pass. See [comments]. The line is split at the first `//` that is
//!            not inside a string literal. The code part goes on to the scanner; the comment
//!            part becomes one `comment` token (or is dropped, if comments are disabled).
//!
//!         2. Scanning. See [scanner]. Matchers are tried in a fixed priority order at the
//!            cursor; the first that matches consumes its text. When none matches the cursor
//!            advances one character and nothing is emitted.
//!
//!     Since lines are visited in order and the cursor only moves forward, tokens come out
//!     sorted by `(line, column)` and never overlap.

pub mod comments;
pub mod lexicon;
pub mod scanner;

pub use lexicon::Lexicon;

use crate::token::{utf16_len, Token, TokenCategory};

/// Tokenizer configured with a word lexicon.
#[derive(Debug, Clone)]
pub struct Lexer {
    lexicon: Lexicon,
    comments: bool,
}

impl Lexer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            comments: true,
        }
    }

    /// Whether trailing `//` comments are emitted as `comment` tokens.
    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    pub fn lex<'src>(&self, text: &'src str) -> Vec<Token<'src>> {
        let mut tokens = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            self.lex_line(line_no as u32, line, &mut tokens);
        }
        tokens
    }

    fn lex_line<'src>(&self, line_no: u32, line: &'src str, tokens: &mut Vec<Token<'src>>) {
        let (code, comment) = comments::split_comment(line);
        scanner::scan_line(line_no, code, &self.lexicon, tokens);

        if self.comments {
            if let Some(comment) = comment {
                tokens.push(Token::new(
                    line_no,
                    utf16_len(code),
                    comment,
                    Some(TokenCategory::Comment),
                ));
            }
        }
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}

/// Lex `text` with the built-in lexicon and comment highlighting enabled.
pub fn lex(text: &str) -> Vec<Token<'_>> {
    Lexer::default().lex(text)
}
