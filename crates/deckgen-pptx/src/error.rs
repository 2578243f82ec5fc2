//! Error types for template handling and deck generation.

use thiserror::Error;

/// Result type for deck operations
pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors that can occur while loading a template or assembling a deck
#[derive(Error, Debug)]
pub enum DeckError {
    /// Template file not found or inaccessible
    #[error("Template not found: {path}")]
    TemplateNotFound { path: String },

    /// Template is invalid or corrupted
    #[error("Invalid template: {reason}")]
    InvalidTemplate { reason: String },

    /// The template master exposes no layouts; nothing can be rendered
    #[error("Template has no slide layouts")]
    NoLayouts,

    /// Image probing failure
    #[error("Image error: {reason}")]
    Image { reason: String },

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIP archive error
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure while writing the final document
    #[error("Failed to save presentation to {path}: {source}")]
    Persistence {
        path: String,
        source: std::io::Error,
    },
}

impl DeckError {
    /// Create a template not found error
    pub fn template_not_found(path: impl Into<String>) -> Self {
        Self::TemplateNotFound { path: path.into() }
    }

    /// Create an invalid template error
    pub fn invalid_template(reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            reason: reason.into(),
        }
    }

    /// Create an image error
    pub fn image_error(reason: impl Into<String>) -> Self {
        Self::Image {
            reason: reason.into(),
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::TemplateNotFound { .. } => "DECK001",
            Self::InvalidTemplate { .. } => "DECK002",
            Self::NoLayouts => "DECK003",
            Self::Image { .. } => "DECK004",
            Self::Xml(_) => "DECK005",
            Self::Zip(_) => "DECK006",
            Self::Io(_) => "DECK007",
            Self::Persistence { .. } => "DECK008",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DeckError::template_not_found("deck.potx");
        assert_eq!(err.code(), "DECK001");
        assert!(err.to_string().contains("deck.potx"));

        assert_eq!(DeckError::NoLayouts.code(), "DECK003");
    }

    #[test]
    fn test_error_display() {
        let err = DeckError::invalid_template("no slide master found");
        assert!(err.to_string().contains("no slide master found"));

        let err = DeckError::Persistence {
            path: "out/deck.pptx".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("out/deck.pptx"));
        assert_eq!(err.code(), "DECK008");
    }
}
