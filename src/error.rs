//! Error types for rulebook loading and engine construction.
//!
//! Text operations themselves are infallible; only turning a rulebook into a
//! compiled engine can fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`RuleBook`](crate::RuleBook).
#[derive(Debug, Error)]
pub enum RuleBookError {
    /// The rulebook file could not be read.
    #[error("failed to read rulebook {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rulebook file is not valid JSON.
    #[error("invalid JSON rulebook: {0}")]
    Json(#[from] serde_json::Error),

    /// The rulebook file is not valid YAML.
    #[error("invalid YAML rulebook: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is neither `.json`, `.yaml` nor `.yml`.
    #[error("unsupported rulebook format for {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    /// A rule failed validation.
    #[error("{section}[{index}]: {reason}")]
    InvalidRule {
        section: &'static str,
        index: usize,
        reason: String,
    },

    /// The per-violation penalty must be positive.
    #[error("penalty_per_violation must be greater than zero")]
    ZeroPenalty,
}

/// Errors raised while compiling a rulebook into a [`StyleEngine`](crate::StyleEngine).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    RuleBook(#[from] RuleBookError),

    /// A pattern built from a rule did not compile.
    #[error("failed to compile pattern for {rule:?}: {source}")]
    Pattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
}

pub type RuleBookResult<T> = Result<T, RuleBookError>;
pub type EngineResult<T> = Result<T, EngineError>;
