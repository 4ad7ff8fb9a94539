//! Conversion between `cir-tokens` streams and lsp-types semantic token structures.

use cir_tokens::{EncodedTokens, TokenCategory, TokenEdit, TokenModifier};
use lsp_types::{
    SemanticToken, SemanticTokenModifier, SemanticTokenType, SemanticTokensEdit,
    SemanticTokensLegend,
};

/// Legend advertised in `initialize`. Its order defines the wire integers.
pub fn semantic_tokens_legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: TokenCategory::LEGEND
            .iter()
            .map(|category| SemanticTokenType::new(category.as_str()))
            .collect(),
        token_modifiers: TokenModifier::LEGEND
            .iter()
            .map(|modifier| SemanticTokenModifier::new(modifier.as_str()))
            .collect(),
    }
}

/// Regroups whole 5-integer chunks into lsp-types tokens. Any trailing partial chunk is
/// dropped; callers only pass whole streams or token-aligned edit data.
fn to_semantic_tokens(data: &[u32]) -> Vec<SemanticToken> {
    data.chunks_exact(cir_tokens::TOKEN_WIDTH)
        .map(|chunk| SemanticToken {
            delta_line: chunk[0],
            delta_start: chunk[1],
            length: chunk[2],
            token_type: chunk[3],
            token_modifiers_bitset: chunk[4],
        })
        .collect()
}

pub fn encode_semantic_tokens(tokens: &EncodedTokens) -> Vec<SemanticToken> {
    to_semantic_tokens(tokens.as_slice())
}

/// Converts token-aligned edits (see [cir_tokens::diff_tokens]) into protocol edits.
pub fn encode_semantic_edits(edits: &[TokenEdit]) -> Vec<SemanticTokensEdit> {
    edits
        .iter()
        .map(|edit| SemanticTokensEdit {
            start: edit.start as u32,
            delete_count: edit.delete_count as u32,
            data: if edit.data.is_empty() {
                None
            } else {
                Some(to_semantic_tokens(&edit.data))
            },
        })
        .collect()
}
