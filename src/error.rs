//! Error types for token parsing and rendering.

use std::path::PathBuf;

/// Why a resolution token was rejected.
///
/// A rejected token is dropped from every bucket; the rest of its group is
/// still processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Token has no `WIDTHxHEIGHT` part.
    #[error("missing dimensions in '{0}'")]
    MissingDimensions(String),

    /// A numeric field did not parse.
    #[error("invalid number '{field}' in '{token}'")]
    InvalidNumber { token: String, field: String },

    /// Width or height is zero.
    #[error("zero dimension in '{0}'")]
    ZeroDimension(String),

    /// Frame rate fraction has a zero denominator.
    #[error("zero frame rate denominator in '{0}'")]
    ZeroDenominator(String),

    /// Frame rate part is neither `N/D` nor `N1/D1-N2/D2`.
    #[error("unexpected frame rate layout in '{0}'")]
    FieldCount(String),
}

/// Failures that abort a single render pass.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template could not be read.
    #[error("failed to read template '{path}': {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Output file could not be created or written.
    #[error("failed to write output '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Enumeration input could not be read.
    #[error("failed to read input '{path}': {source}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Enumeration input is not valid JSON for the expected layout.
    #[error("failed to decode input '{path}': {source}")]
    InputDecode {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// JSON document could not be serialized.
    #[error("failed to serialize json: {0}")]
    Serialize(#[from] serde_json::Error),
}
