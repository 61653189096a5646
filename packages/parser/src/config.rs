//! Configuration constants and parser settings.

use regex::Regex;
use std::sync::LazyLock;

use crate::document::TextEncoding;

/// Tag name of the document root.
pub const ACTIVITIES_TAG: &str = "iati-activities";

/// Tag name of a single activity.
pub const ACTIVITY_TAG: &str = "iati-activity";

/// Default maximum document size in bytes (256 MB).
///
/// Documents are read in one bounded read; this keeps a stray multi-gigabyte
/// file from exhausting memory. Override with `--max-size` on the CLI.
pub const DEFAULT_MAX_DOCUMENT_SIZE: u64 = 256 * 1024 * 1024;

/// Text wrap width for the CLI summary output.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// ISO date shape: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static ISO_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Day-first date shape: DD/MM/YYYY.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static DAY_FIRST_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("valid regex"));

/// Settings for reading and parsing a document.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Reject sources larger than this many bytes.
    pub max_document_size: u64,

    /// Character encoding override for byte sources.
    ///
    /// `None` sniffs a byte-order mark and otherwise assumes UTF-8.
    pub encoding: Option<TextEncoding>,

    /// Currency used when neither the activity nor the document root
    /// declares a default currency.
    pub default_currency: Option<String>,
}

impl ParserConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            encoding: None,
            default_currency: None,
        }
    }

    /// Set the maximum document size.
    #[must_use]
    pub fn with_max_document_size(mut self, max_document_size: u64) -> Self {
        self.max_document_size = max_document_size;
        self
    }

    /// Set the character encoding override.
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set the fallback default currency.
    #[must_use]
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = Some(currency.into());
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}
