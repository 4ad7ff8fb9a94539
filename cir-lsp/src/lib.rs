//! Language Server Protocol (LSP) implementation for ClangIR textual sources
//!
//!     This crate gives any LSP-capable editor semantic highlighting for `.cir` files. It does
//!     exactly one thing: classify tokens and keep the editor's copy of them up to date. It
//!     does not parse CIR or report diagnostics.
//!
//! Architecture
//!
//!     LSP Layer (tower-lsp):
//!         - JSON-RPC transport over stdin/stdout
//!         - Capability negotiation: the token legend and `full.delta` support
//!
//!     Server Layer (this crate):
//!         - Implements the LanguageServer trait. See [server].
//!         - [documents::DocumentStore] keeps the current text of every open document,
//!           applying incremental edits as they arrive.
//!         - [session::SessionStore] keeps the last token stream sent for every document so
//!           delta requests can be answered with a single edit.
//!
//!     Feature Layer:
//!         - The pure lexer/encoder from `cir-tokens`, reached through
//!           [server::FeatureProvider] so server tests can substitute a mock.
//!         - Conversion to and from lsp-types. See [features::semantic_tokens].
//!
//! Requests
//!
//!     `textDocument/semanticTokens/full` recomputes the document's tokens, stores them as the
//!     new baseline and returns them.
//!
//!     `textDocument/semanticTokens/full/delta` recomputes the tokens, diffs them against the
//!     stored baseline (an empty stream if there is none), replaces the baseline and returns
//!     the edit list, which is empty when nothing changed.
//!
//!     Each request runs to completion on a snapshot of the document text taken when it
//!     starts; later edits are picked up by the editor's next request.
//!
//! Usage
//!
//!     $ cir-lsp [--config path/to/cir.toml]
//!     Starts the language server on stdin/stdout. Logs go to stderr; set `RUST_LOG` to
//!     override the configured level.

pub mod documents;
pub mod features;
pub mod server;
pub mod session;

pub use server::CirLanguageServer;
