//! Per-document token baselines for delta requests.
//!
//! Each document maps to the last token stream sent to the editor and the result id it was
//! sent under. Entries are replaced wholesale under the write lock, so a delta computation
//! never observes a half-updated baseline. Documents never share state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use cir_tokens::{diff_tokens, EncodedTokens, TokenEdit};
use tokio::sync::RwLock;
use tower_lsp::lsp_types::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullTokens {
    pub result_id: String,
    pub tokens: EncodedTokens,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDelta {
    pub result_id: String,
    /// The result id the edits were computed against, if there was a baseline.
    pub base_result_id: Option<String>,
    pub edits: Vec<TokenEdit>,
    /// The full stream the edits produce, for clients whose copy is not the baseline.
    pub tokens: EncodedTokens,
}

#[derive(Debug)]
struct Session {
    result_id: String,
    tokens: EncodedTokens,
}

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Url, Session>>,
    next_result_id: AtomicU64,
}

impl SessionStore {
    fn allocate_result_id(&self) -> String {
        self.next_result_id.fetch_add(1, Ordering::Relaxed).to_string()
    }

    /// Stores `tokens` as the new baseline for `uri`.
    pub async fn full(&self, uri: Url, tokens: EncodedTokens) -> FullTokens {
        let result_id = self.allocate_result_id();
        let session = Session {
            result_id: result_id.clone(),
            tokens: tokens.clone(),
        };
        self.sessions.write().await.insert(uri, session);
        FullTokens { result_id, tokens }
    }

    /// Diffs `tokens` against the stored baseline (empty if none) and makes them the new
    /// baseline.
    pub async fn delta(&self, uri: Url, tokens: EncodedTokens) -> TokenDelta {
        let result_id = self.allocate_result_id();
        let mut sessions = self.sessions.write().await;

        let previous = sessions.remove(&uri);
        let base_result_id = previous.as_ref().map(|s| s.result_id.clone());
        let before = previous.map(|s| s.tokens).unwrap_or_default();
        let edits = diff_tokens(before.as_slice(), tokens.as_slice());

        sessions.insert(
            uri,
            Session {
                result_id: result_id.clone(),
                tokens: tokens.clone(),
            },
        );

        TokenDelta {
            result_id,
            base_result_id,
            edits,
            tokens,
        }
    }

    pub async fn baseline(&self, uri: &Url) -> Option<FullTokens> {
        self.sessions.read().await.get(uri).map(|session| FullTokens {
            result_id: session.result_id.clone(),
            tokens: session.tokens.clone(),
        })
    }

    pub async fn remove(&self, uri: &Url) {
        self.sessions.write().await.remove(uri);
    }
}
