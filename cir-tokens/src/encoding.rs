//! Semantic token encoding
//!
//!     Flattens absolute tokens into the relative 5-tuple stream editors consume:
//!
//!         (deltaLine, deltaStart, length, categoryIndex, modifierBits)
//!
//!     `deltaLine` is measured from the previous emitted token. `deltaStart` is measured from
//!     the previous token's column when both are on the same line, and from column 0
//!     otherwise.
//!
//! Unclassified Words
//!
//!     Bare words that match no lexicon list carry no category. A negative or out-of-range
//!     index must never reach a client, so [UnclassifiedPolicy] decides what happens to them:
//!     they are dropped by default, or rendered with a fallback category.

use crate::token::{Token, TokenCategory, TOKEN_WIDTH};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnclassifiedPolicy {
    /// Leave unclassified words out of the stream.
    #[default]
    Omit,
    /// Emit unclassified words with the given category.
    Fallback(TokenCategory),
}

impl UnclassifiedPolicy {
    /// Category a token is emitted with, or `None` when it is left out.
    pub fn resolve(self, category: Option<TokenCategory>) -> Option<TokenCategory> {
        match (category, self) {
            (Some(category), _) => Some(category),
            (None, UnclassifiedPolicy::Omit) => None,
            (None, UnclassifiedPolicy::Fallback(fallback)) => Some(fallback),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error(
        "token {index} at {line}:{column} does not start after the previous token \
         ({prev_line}:{prev_column}, ends at column {prev_end})"
    )]
    OutOfOrder {
        index: usize,
        line: u32,
        column: u32,
        prev_line: u32,
        prev_column: u32,
        prev_end: u32,
    },

    #[error("encoded stream has {len} integers, not a whole number of 5-integer tokens")]
    Truncated { len: usize },
}

/// Flat, delta-encoded token stream. Always a multiple of [TOKEN_WIDTH] long.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EncodedTokens(Vec<u32>);

/// One entry of a decoded stream, in absolute positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodedToken {
    pub line: u32,
    pub column: u32,
    pub length: u32,
    pub category: u32,
    pub modifiers: u32,
}

impl EncodedTokens {
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tokens (not integers) in the stream.
    pub fn token_count(&self) -> usize {
        self.0.len() / TOKEN_WIDTH
    }

    pub fn tuples(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.0.chunks_exact(TOKEN_WIDTH)
    }

    /// Re-applies the cumulative deltas, recovering absolute positions. Positions saturate at
    /// `u32::MAX` for streams that were not produced by [encode].
    pub fn decode(&self) -> Vec<DecodedToken> {
        let mut line = 0u32;
        let mut column = 0u32;
        self.tuples()
            .map(|tuple| {
                line = line.saturating_add(tuple[0]);
                column = if tuple[0] == 0 {
                    column.saturating_add(tuple[1])
                } else {
                    tuple[1]
                };
                DecodedToken {
                    line,
                    column,
                    length: tuple[2],
                    category: tuple[3],
                    modifiers: tuple[4],
                }
            })
            .collect()
    }
}

impl TryFrom<Vec<u32>> for EncodedTokens {
    type Error = EncodeError;

    fn try_from(data: Vec<u32>) -> Result<Self, Self::Error> {
        if data.len() % TOKEN_WIDTH != 0 {
            return Err(EncodeError::Truncated { len: data.len() });
        }
        Ok(Self(data))
    }
}

/// Encodes tokens that are sorted by `(line, column)` and do not overlap.
///
/// Ordering is checked across all tokens, including the ones the policy drops; a violation
/// is reported rather than clamped.
pub fn encode(
    tokens: &[Token<'_>],
    policy: UnclassifiedPolicy,
) -> Result<EncodedTokens, EncodeError> {
    let mut data = Vec::with_capacity(tokens.len() * TOKEN_WIDTH);
    let mut prev: Option<(u32, u32, u32)> = None;
    let mut current_line = 0u32;
    let mut current_column = 0u32;

    for (index, token) in tokens.iter().enumerate() {
        if let Some((prev_line, prev_column, prev_end)) = prev {
            let same_line = token.line == prev_line;
            if token.line < prev_line
                || (same_line && (token.column <= prev_column || token.column < prev_end))
            {
                return Err(EncodeError::OutOfOrder {
                    index,
                    line: token.line,
                    column: token.column,
                    prev_line,
                    prev_column,
                    prev_end,
                });
            }
        }
        prev = Some((token.line, token.column, token.end_column()));

        let Some(category) = policy.resolve(token.category) else {
            continue;
        };

        let delta_line = token.line - current_line;
        let delta_start = if delta_line > 0 {
            token.column
        } else {
            token.column - current_column
        };
        current_line = token.line;
        current_column = token.column;

        data.extend_from_slice(&[
            delta_line,
            delta_start,
            token.len_utf16(),
            category.index(),
            token.modifiers.bits(),
        ]);
    }

    Ok(EncodedTokens(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::lex;

    #[test]
    fn encodes_relative_positions() {
        let tokens = lex("%0 = cir.const #true : !cir.bool\n  cir.return %0\n");
        let encoded = encode(&tokens, UnclassifiedPolicy::Omit).unwrap();
        assert_eq!(
            encoded.as_slice(),
            &[
                0, 0, 2, 2, 0, // %0
                0, 5, 3, 8, 0, // cir
                0, 4, 5, 1, 0, // const
                0, 6, 5, 10, 0, // #true
                0, 8, 9, 5, 0, // !cir.bool
                1, 2, 3, 8, 0, // cir
                0, 4, 6, 1, 0, // return
                0, 7, 2, 2, 0, // %0
            ]
        );
        assert_eq!(encoded.token_count(), 8);
    }

    #[test]
    fn first_token_on_new_line_uses_absolute_column() {
        let tokens = lex("    %a\n\n        %b");
        let encoded = encode(&tokens, UnclassifiedPolicy::Omit).unwrap();
        assert_eq!(encoded.as_slice(), &[0, 4, 2, 2, 0, 2, 8, 2, 2, 0]);
    }

    #[test]
    fn omits_unclassified_words_by_default() {
        let tokens = lex("alignment = 4");
        let encoded = encode(&tokens, UnclassifiedPolicy::default()).unwrap();
        assert_eq!(encoded.as_slice(), &[0, 12, 1, 3, 0]);
    }

    #[test]
    fn fallback_category_for_unclassified_words() {
        let tokens = lex("alignment = 4");
        let encoded = encode(
            &tokens,
            UnclassifiedPolicy::Fallback(TokenCategory::Variable),
        )
        .unwrap();
        assert_eq!(encoded.as_slice(), &[0, 0, 9, 2, 0, 0, 12, 1, 3, 0]);
    }

    #[test]
    fn rejects_out_of_order_tokens() {
        let tokens = vec![
            Token::new(1, 0, "a", Some(TokenCategory::Variable)),
            Token::new(0, 0, "b", Some(TokenCategory::Variable)),
        ];
        let err = encode(&tokens, UnclassifiedPolicy::Omit).unwrap_err();
        assert!(matches!(err, EncodeError::OutOfOrder { index: 1, .. }));
    }

    #[test]
    fn rejects_overlapping_tokens() {
        let tokens = vec![
            Token::new(0, 0, "abc", Some(TokenCategory::Variable)),
            Token::new(0, 2, "c", Some(TokenCategory::Variable)),
        ];
        assert!(encode(&tokens, UnclassifiedPolicy::Omit).is_err());
    }

    #[test]
    fn ordering_is_checked_for_omitted_tokens_too() {
        let tokens = vec![
            Token::new(0, 5, "x", None),
            Token::new(0, 1, "y", Some(TokenCategory::Number)),
        ];
        assert!(encode(&tokens, UnclassifiedPolicy::Omit).is_err());
    }

    #[test]
    fn decode_recovers_absolute_positions() {
        let tokens = lex("@main\n  %1 = cir.load %0");
        let encoded = encode(&tokens, UnclassifiedPolicy::Omit).unwrap();
        let decoded: Vec<(u32, u32, u32)> = encoded
            .decode()
            .iter()
            .map(|t| (t.line, t.column, t.length))
            .collect();
        let expected: Vec<(u32, u32, u32)> = tokens
            .iter()
            .map(|t| (t.line, t.column, t.len_utf16()))
            .collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn decode_saturates_on_foreign_streams() {
        let encoded = EncodedTokens::try_from(vec![
            u32::MAX, 0, 1, 0, 0, //
            1, 5, 1, 0, 0, //
            0, u32::MAX, 1, 0, 0,
        ])
        .unwrap();
        let decoded = encoded.decode();
        assert_eq!(decoded[1].line, u32::MAX);
        assert_eq!(decoded[2].column, u32::MAX);
    }

    #[test]
    fn try_from_rejects_partial_tuples() {
        assert!(EncodedTokens::try_from(vec![0, 0, 1, 2]).is_err());
        assert!(EncodedTokens::try_from(vec![0, 0, 1, 2, 0]).is_ok());
        assert!(EncodedTokens::try_from(Vec::new()).is_ok());
    }
}
