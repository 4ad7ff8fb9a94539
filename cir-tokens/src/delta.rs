//! Token stream diffing
//!
//!     Reduces two encoded streams to a single contiguous replacement: skip the common prefix,
//!     skip the common suffix, replace whatever is left in between. This is not a minimal
//!     multi-hunk diff. When edits land at both ends of a document the region spans nearly
//!     the whole stream, which is still correct and cheap to compute.
//!
//!     [diff] works element by element. [diff_tokens] widens the region to whole
//!     5-integer tokens, which is what the LSP edit type can carry.

use crate::token::TOKEN_WIDTH;
use serde::Serialize;

/// Delete `delete_count` integers at `start`, then insert `data` there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEdit {
    pub start: usize,
    pub delete_count: usize,
    pub data: Vec<u32>,
}

/// Element-granular diff. Returns no edits when the streams are equal.
pub fn diff(before: &[u32], after: &[u32]) -> Vec<TokenEdit> {
    diff_with_stride(before, after, 1)
}

/// Like [diff], but `start`, `delete_count` and `data` always cover whole tokens.
/// Both inputs must be whole token streams.
pub fn diff_tokens(before: &[u32], after: &[u32]) -> Vec<TokenEdit> {
    debug_assert_eq!(before.len() % TOKEN_WIDTH, 0);
    debug_assert_eq!(after.len() % TOKEN_WIDTH, 0);
    diff_with_stride(before, after, TOKEN_WIDTH)
}

fn diff_with_stride(before: &[u32], after: &[u32], stride: usize) -> Vec<TokenEdit> {
    let prefix = before
        .iter()
        .zip(after)
        .take_while(|(b, a)| b == a)
        .count();

    if prefix == before.len() && prefix == after.len() {
        return Vec::new();
    }

    let start = prefix - prefix % stride;

    // The suffix may not reach back past `start` in either stream.
    let suffix = before[start..]
        .iter()
        .rev()
        .zip(after[start..].iter().rev())
        .take_while(|(b, a)| b == a)
        .count();
    let suffix = suffix - suffix % stride;

    let before_end = before.len() - suffix;
    let after_end = after.len() - suffix;

    vec![TokenEdit {
        start,
        delete_count: before_end - start,
        data: after[start..after_end].to_vec(),
    }]
}

/// Applies `edits` to `before` in order.
pub fn apply(before: &[u32], edits: &[TokenEdit]) -> Vec<u32> {
    let mut data = before.to_vec();
    for edit in edits {
        let end = (edit.start + edit.delete_count).min(data.len());
        let start = edit.start.min(end);
        data.splice(start..end, edit.data.iter().copied());
    }
    data
}
