//! Main language server implementation

use std::sync::Arc;

use crate::documents::DocumentStore;
use crate::features::semantic_tokens::{
    encode_semantic_edits, encode_semantic_tokens, semantic_tokens_legend,
};
use crate::session::{FullTokens, SessionStore, TokenDelta};
use cir_tokens::{EncodeError, EncodedTokens, Highlighter};
use tower_lsp::async_trait;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    InitializeParams, InitializeResult, InitializedParams, SemanticTokens, SemanticTokensDelta,
    SemanticTokensDeltaParams, SemanticTokensFullDeltaResult, SemanticTokensFullOptions,
    SemanticTokensOptions, SemanticTokensParams, SemanticTokensResult,
    SemanticTokensServerCapabilities, ServerCapabilities, ServerInfo, TextDocumentItem,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url, WorkDoneProgressOptions,
};
use tower_lsp::Client;
use tracing::{debug, error, info, warn};

pub trait LspClient: Send + Sync + Clone + 'static {}
impl LspClient for Client {}

pub trait FeatureProvider: Send + Sync + 'static {
    fn semantic_tokens(&self, text: &str) -> std::result::Result<EncodedTokens, EncodeError>;
}

#[derive(Default)]
pub struct DefaultFeatureProvider {
    highlighter: Highlighter,
}

impl DefaultFeatureProvider {
    pub fn new(highlighter: Highlighter) -> Self {
        Self { highlighter }
    }
}

impl FeatureProvider for DefaultFeatureProvider {
    fn semantic_tokens(&self, text: &str) -> std::result::Result<EncodedTokens, EncodeError> {
        self.highlighter.highlight(text)
    }
}

pub struct CirLanguageServer<C = Client, P = DefaultFeatureProvider> {
    _client: C,
    documents: DocumentStore,
    sessions: SessionStore,
    features: Arc<P>,
}

impl CirLanguageServer<Client, DefaultFeatureProvider> {
    pub fn new(client: Client) -> Self {
        Self::with_highlighter(client, Highlighter::default())
    }

    pub fn with_highlighter(client: Client, highlighter: Highlighter) -> Self {
        Self::with_features(client, Arc::new(DefaultFeatureProvider::new(highlighter)))
    }
}

impl<C, P> CirLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    pub fn with_features(client: C, features: Arc<P>) -> Self {
        Self {
            _client: client,
            documents: DocumentStore::default(),
            sessions: SessionStore::default(),
            features,
        }
    }

    /// Tokens for the current text of `uri`, or `None` if the document is not open.
    async fn current_tokens(&self, uri: &Url) -> Result<Option<EncodedTokens>> {
        let Some(text) = self.documents.text(uri).await else {
            debug!(%uri, "semantic tokens requested for a document that is not open");
            return Ok(None);
        };
        match self.features.semantic_tokens(&text) {
            Ok(tokens) => Ok(Some(tokens)),
            Err(err) => {
                error!(%uri, %err, "failed to encode semantic tokens");
                Err(Error::internal_error())
            }
        }
    }

    /// Recomputes the document's tokens and stores them as the delta baseline.
    pub async fn compute_full_tokens(&self, uri: &Url) -> Result<Option<FullTokens>> {
        let Some(tokens) = self.current_tokens(uri).await? else {
            return Ok(None);
        };
        let full = self.sessions.full(uri.clone(), tokens).await;
        debug!(
            %uri,
            result_id = %full.result_id,
            tokens = full.tokens.token_count(),
            "computed full semantic tokens"
        );
        Ok(Some(full))
    }

    /// Recomputes the document's tokens and diffs them against the stored baseline.
    pub async fn compute_token_delta(&self, uri: &Url) -> Result<Option<TokenDelta>> {
        let Some(tokens) = self.current_tokens(uri).await? else {
            return Ok(None);
        };
        let delta = self.sessions.delta(uri.clone(), tokens).await;
        debug!(
            %uri,
            result_id = %delta.result_id,
            edits = delta.edits.len(),
            "computed semantic token delta"
        );
        Ok(Some(delta))
    }
}

fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(
            TextDocumentSyncKind::INCREMENTAL,
        )),
        semantic_tokens_provider: Some(
            SemanticTokensServerCapabilities::SemanticTokensOptions(SemanticTokensOptions {
                work_done_progress_options: WorkDoneProgressOptions::default(),
                legend: semantic_tokens_legend(),
                range: Some(false),
                full: Some(SemanticTokensFullOptions::Delta { delta: Some(true) }),
            }),
        ),
        ..ServerCapabilities::default()
    }
}

#[async_trait]
impl<C, P> tower_lsp::LanguageServer for CirLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let client = params
            .client_info
            .map(|info| info.name)
            .unwrap_or_else(|| "unknown".to_string());
        info!(%client, "initializing cir-lsp");

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name: "cir-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("cir-lsp initialized");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("cir-lsp shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let TextDocumentItem {
            uri, version, text, ..
        } = params.text_document;
        debug!(%uri, version, "document opened");
        self.documents.open(uri, text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        if !self.documents.change(&uri, &params.content_changes).await {
            warn!(%uri, version, "change for a document that is not open; ignoring");
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!(%uri, "document closed");
        self.documents.close(&uri).await;
        self.sessions.remove(&uri).await;
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        let full = self.compute_full_tokens(&params.text_document.uri).await?;
        Ok(full.map(|full| {
            SemanticTokensResult::Tokens(SemanticTokens {
                result_id: Some(full.result_id),
                data: encode_semantic_tokens(&full.tokens),
            })
        }))
    }

    async fn semantic_tokens_full_delta(
        &self,
        params: SemanticTokensDeltaParams,
    ) -> Result<Option<SemanticTokensFullDeltaResult>> {
        let uri = params.text_document.uri;
        let delta = self.compute_token_delta(&uri).await?;
        Ok(delta.map(|delta| match delta.base_result_id.as_deref() {
            // The client's copy is not our baseline, so edits against it would be garbage.
            Some(base) if base != params.previous_result_id => {
                debug!(
                    %uri,
                    previous = %params.previous_result_id,
                    base,
                    "client holds a different result; sending full tokens"
                );
                SemanticTokensFullDeltaResult::Tokens(SemanticTokens {
                    result_id: Some(delta.result_id),
                    data: encode_semantic_tokens(&delta.tokens),
                })
            }
            _ => SemanticTokensFullDeltaResult::TokensDelta(SemanticTokensDelta {
                result_id: Some(delta.result_id),
                edits: encode_semantic_edits(&delta.edits),
            }),
        }))
    }
}
