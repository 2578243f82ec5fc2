//! Error types for content discovery and rule loading.

use thiserror::Error;

/// Errors raised while scanning a content directory.
///
/// Unreadable individual entries are skipped with a warning during the
/// scan; these variants cover failures that make the scan itself
/// impossible.
#[derive(Error, Debug)]
pub enum ContentError {
    /// Content directory missing or not a directory
    #[error("Content directory not found: {path}")]
    DirNotFound { path: String },

    /// Invalid discovery pattern
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading a rule override file.
///
/// A malformed rule table is fatal at load time: no meaningful layout
/// selection is possible with a broken table. An unmatched composition at
/// selection time is NOT an error; it falls through to the default layout.
#[derive(Error, Debug)]
pub enum RuleError {
    /// Override file missing
    #[error("Rule file not found: {path}")]
    NotFound { path: String },

    /// Override file is not valid TOML
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Image-count keys must parse as non-negative integers
    #[error("Invalid image count '{key}': expected a non-negative integer")]
    InvalidImageCount { key: String },

    /// Keyword tables only accept their fixed keyword set
    #[error("Unknown key '{key}' in [{table}]")]
    UnknownKey { table: &'static str, key: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
