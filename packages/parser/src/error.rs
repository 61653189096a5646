//! Error types for the parser.
//!
//! `ParseError` covers both the fatal extraction failures raised by the
//! scalar normalizers and the document-level failures (I/O, malformed XML,
//! empty documents). Data-quality problems that the field policy treats as
//! silent exclusions never reach the caller as errors.

use thiserror::Error;

/// Main error type for the parser library.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required attribute or element is absent.
    #[error("Missing required value at '{path}'")]
    MissingValue { path: String },

    /// Text is present but is not a base-10 number.
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),

    /// Text is present but is neither YYYY-MM-DD nor DD/MM/YYYY.
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD or DD/MM/YYYY")]
    InvalidDate(String),

    /// A coded value did not resolve against its vocabulary.
    #[error("Unknown {vocabulary} code: '{raw}'")]
    UnknownCode { vocabulary: String, raw: String },

    /// The document contains no admissible activity.
    #[error("Document contains no admissible activity")]
    EmptyDocument,

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// The source exceeds the configured size limit.
    #[error("Document is {size} bytes, limit is {limit} bytes")]
    DocumentTooLarge { size: u64, limit: u64 },

    /// The requested character encoding is not supported.
    #[error("Unsupported character encoding: '{0}'")]
    UnsupportedEncoding(String),

    /// The bytes are not valid in the requested encoding.
    #[error("Document is not valid {encoding}")]
    Decode { encoding: &'static str },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

impl ParseError {
    /// Create a `MissingValue` error for a lookup path.
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingValue { path: path.into() }
    }
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;
