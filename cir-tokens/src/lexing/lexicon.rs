//! Closed word lists used to classify bare words.

use crate::token::TokenCategory;
use once_cell::sync::Lazy;
use std::collections::HashSet;

const KEYWORDS: &[&str] = &["loc", "module", "nsw", "nuw", "extra", "const"];

const MACROS: &[&str] = &[
    "fused",
    "undefined",
    "async",
    "init",
    "constant",
    "dsolocal",
    "private",
    "cir_private",
    "attributes",
    "struct",
    "incomplete",
    "true",
    "false",
];

const TYPENAMES: &[&str] = &["dense", "vector"];

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| Lexicon {
    keywords: KEYWORDS.iter().map(|w| w.to_string()).collect(),
    macros: MACROS.iter().map(|w| w.to_string()).collect(),
    typenames: TYPENAMES.iter().map(|w| w.to_string()).collect(),
});

/// Keyword, macro and typename lists. A word in several lists resolves in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    keywords: HashSet<String>,
    macros: HashSet<String>,
    typenames: HashSet<String>,
}

impl Lexicon {
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    pub fn with_keywords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_macros<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.macros.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_typenames<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.typenames.extend(words.into_iter().map(Into::into));
        self
    }

    /// `None` means the word is unclassified.
    pub fn classify(&self, word: &str) -> Option<TokenCategory> {
        if self.keywords.contains(word) {
            Some(TokenCategory::Keyword)
        } else if self.macros.contains(word) {
            Some(TokenCategory::Macro)
        } else if self.typenames.contains(word) {
            Some(TokenCategory::Type)
        } else {
            None
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
