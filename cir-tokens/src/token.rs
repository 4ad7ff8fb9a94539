//! Token types and the category/modifier legends.
//!
//!     The order of [TokenCategory::LEGEND] and [TokenModifier::LEGEND] defines the integers
//!     written on the wire. Reordering either is a breaking change for every client that
//!     cached the legend from `initialize`.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Number of integers per token in an encoded stream.
pub const TOKEN_WIDTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenCategory {
    Keyword,
    Function,
    Variable,
    Number,
    Comment,
    Type,
    Macro,
    Operator,
    Namespace,
    String,
    EnumMember,
}

impl TokenCategory {
    pub const LEGEND: &'static [TokenCategory] = &[
        TokenCategory::Keyword,
        TokenCategory::Function,
        TokenCategory::Variable,
        TokenCategory::Number,
        TokenCategory::Comment,
        TokenCategory::Type,
        TokenCategory::Macro,
        TokenCategory::Operator,
        TokenCategory::Namespace,
        TokenCategory::String,
        TokenCategory::EnumMember,
    ];

    /// Wire index of this category, i.e. its position in [Self::LEGEND].
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::LEGEND.get(index as usize).copied()
    }

    /// Legend name as advertised to the client. These are the standard LSP token type names
    /// so existing editor themes apply without extra configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenCategory::Keyword => "keyword",
            TokenCategory::Function => "function",
            TokenCategory::Variable => "variable",
            TokenCategory::Number => "number",
            TokenCategory::Comment => "comment",
            TokenCategory::Type => "type",
            TokenCategory::Macro => "macro",
            TokenCategory::Operator => "operator",
            TokenCategory::Namespace => "namespace",
            TokenCategory::String => "string",
            TokenCategory::EnumMember => "enumMember",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for TokenCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::LEGEND
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenModifier {
    Declaration,
    Readonly,
    Deprecated,
}

impl TokenModifier {
    pub const LEGEND: &'static [TokenModifier] = &[
        TokenModifier::Declaration,
        TokenModifier::Readonly,
        TokenModifier::Deprecated,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenModifier::Declaration => "declaration",
            TokenModifier::Readonly => "readonly",
            TokenModifier::Deprecated => "deprecated",
        }
    }

    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Bitset over [TokenModifier]. The lexer never sets a modifier today, but the field is part
/// of the wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TokenModifiers(u32);

impl TokenModifiers {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, modifier: TokenModifier) {
        self.0 |= modifier.bit();
    }

    pub fn contains(self, modifier: TokenModifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

/// A classified lexical unit. `text` borrows from the document being lexed and is only used
/// to derive the token length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub line: u32,
    pub column: u32,
    pub text: &'src str,
    /// `None` for bare words found in no lexicon list.
    pub category: Option<TokenCategory>,
    pub modifiers: TokenModifiers,
}

impl<'src> Token<'src> {
    pub fn new(line: u32, column: u32, text: &'src str, category: Option<TokenCategory>) -> Self {
        Self {
            line,
            column,
            text,
            category,
            modifiers: TokenModifiers::empty(),
        }
    }

    pub fn len_utf16(&self) -> u32 {
        utf16_len(self.text)
    }

    /// Column one past the last character of the token.
    pub fn end_column(&self) -> u32 {
        self.column + self.len_utf16()
    }
}

pub(crate) fn utf16_len(text: &str) -> u32 {
    text.chars().map(|ch| ch.len_utf16() as u32).sum()
}
