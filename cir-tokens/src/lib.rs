//! # cir-tokens
//!
//! Lexical classification of ClangIR (CIR) textual sources and the semantic token wire
//! encoding used by editors.
//!
//! Pipeline
//!
//!     Every highlighting request runs the same three pure stages:
//!
//!         1. Lexing. See [lexing]. Each line is split into a code part and an optional
//!            trailing comment, then the code part is scanned left to right with a fixed
//!            priority list of matchers. Anything unrecognized is skipped, so half-typed
//!            input never fails.
//!
//!         2. Encoding. See [encoding]. Absolute `(line, column)` tokens are flattened into
//!            the 5-tuple delta representation `(deltaLine, deltaStart, length, category,
//!            modifiers)`.
//!
//!         3. Diffing. See [delta]. Two encoded streams are reduced to a single contiguous
//!            replacement region.
//!
//!     [Highlighter] bundles stages 1 and 2. Nothing in this crate holds state between
//!     calls; the per-document "previous stream" lives with the caller (the language server's
//!     session store).
//!
//! Positions
//!
//!     Columns and lengths are UTF-16 code units, the unit editors use on the wire. Lines are
//!     zero based.

pub mod delta;
pub mod encoding;
pub mod highlighter;
pub mod lexing;
pub mod token;

pub use delta::{apply, diff, diff_tokens, TokenEdit};
pub use encoding::{encode, DecodedToken, EncodeError, EncodedTokens, UnclassifiedPolicy};
pub use highlighter::Highlighter;
pub use lexing::{lex, Lexer, Lexicon};
pub use token::{Token, TokenCategory, TokenModifier, TokenModifiers, TOKEN_WIDTH};
