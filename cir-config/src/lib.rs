//! Shared configuration loader for the CIR highlighting tools.
//!
//! `defaults/cir.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files and `CIR_` environment
//! variables on top of those defaults via [`Loader`] before deserializing into [`CirConfig`].

use cir_tokens::{Highlighter, Lexer, Lexicon, TokenCategory, UnclassifiedPolicy};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/cir.default.toml");

/// Top-level configuration consumed by the language server and CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct CirConfig {
    pub lexicon: LexiconConfig,
    pub highlight: HighlightConfig,
    pub logging: LoggingConfig,
}

/// Words appended to the built-in lexicon.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconConfig {
    pub extra_keywords: Vec<String>,
    pub extra_macros: Vec<String>,
    pub extra_typenames: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    pub comments: bool,
    /// `"omit"` or a token category legend name.
    pub unclassified: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl HighlightConfig {
    pub fn unclassified_policy(&self) -> Result<UnclassifiedPolicy, ConfigError> {
        match self.unclassified.as_str() {
            "omit" => Ok(UnclassifiedPolicy::Omit),
            name => name
                .parse::<TokenCategory>()
                .map(UnclassifiedPolicy::Fallback)
                .map_err(|err| {
                    ConfigError::Message(format!("highlight.unclassified: {}", err))
                }),
        }
    }
}

impl CirConfig {
    pub fn lexicon(&self) -> Lexicon {
        Lexicon::default()
            .with_keywords(self.lexicon.extra_keywords.iter().cloned())
            .with_macros(self.lexicon.extra_macros.iter().cloned())
            .with_typenames(self.lexicon.extra_typenames.iter().cloned())
    }

    /// Builds the highlighter described by this configuration.
    pub fn highlighter(&self) -> Result<Highlighter, ConfigError> {
        let lexer = Lexer::new(self.lexicon()).with_comments(self.highlight.comments);
        Ok(Highlighter::new(lexer, self.highlight.unclassified_policy()?))
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `CIR_<SECTION>__<KEY>` environment variables, e.g. `CIR_HIGHLIGHT__UNCLASSIFIED`.
    /// Lexicon lists are comma separated: `CIR_LEXICON__EXTRA_KEYWORDS=alignment,align`.
    pub fn with_environment(mut self) -> Self {
        self.builder = self.builder.add_source(environment());
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CirConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

const LIST_KEYS: &[&str] = &[
    "lexicon.extra_keywords",
    "lexicon.extra_macros",
    "lexicon.extra_typenames",
];

fn environment() -> Environment {
    LIST_KEYS.iter().fold(
        Environment::with_prefix("CIR")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(","),
        |env, key| env.with_list_parse_key(key),
    )
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CirConfig, ConfigError> {
    Loader::new().build()
}
