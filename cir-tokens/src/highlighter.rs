use crate::encoding::{encode, EncodeError, EncodedTokens, UnclassifiedPolicy};
use crate::lexing::Lexer;

/// Text in, encoded semantic tokens out.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    lexer: Lexer,
    unclassified: UnclassifiedPolicy,
}

impl Highlighter {
    pub fn new(lexer: Lexer, unclassified: UnclassifiedPolicy) -> Self {
        Self {
            lexer,
            unclassified,
        }
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn unclassified(&self) -> UnclassifiedPolicy {
        self.unclassified
    }

    pub fn highlight(&self, text: &str) -> Result<EncodedTokens, EncodeError> {
        encode(&self.lexer.lex(text), self.unclassified)
    }
}
