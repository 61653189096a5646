//! Document reading and the lazy activity iterator.
//!
//! A document is read in one bounded read, decoded to text, parsed into a
//! `roxmltree::Document` and then walked one `iati-activity` at a time.
//! The tree borrows the decoded text, so owned inputs are handled through
//! [`Parser::with_document`], which keeps both alive for the duration of a
//! closure. Callers that already hold a parsed tree use
//! [`Parser::activities`] directly.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use roxmltree::{Document, Node};

use crate::activity::{assemble, DocumentContext};
use crate::codelist::Codelists;
use crate::config::{ParserConfig, ACTIVITIES_TAG, ACTIVITY_TAG};
use crate::error::{ParseError, Result};
use crate::types::Activity;
use crate::xml::{get_tag_name, has_tag};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Character encodings accepted for byte input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Latin1,
}

impl TextEncoding {
    /// Canonical name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 => UTF8_BOM,
            Self::Utf16Le => UTF16LE_BOM,
            Self::Utf16Be => UTF16BE_BOM,
            Self::Latin1 => &[],
        }
    }

    /// Encoding announced by a byte-order mark, if any.
    fn sniff(bytes: &[u8]) -> Option<Self> {
        [Self::Utf8, Self::Utf16Le, Self::Utf16Be]
            .into_iter()
            .find(|encoding| bytes.starts_with(encoding.bom()))
    }

    /// Decode `bytes`, skipping a matching byte-order mark.
    ///
    /// # Errors
    /// Returns `ParseError::Decode` when the bytes are not valid in this
    /// encoding.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        let bytes = bytes.strip_prefix(self.bom()).unwrap_or(bytes);
        let invalid = || ParseError::Decode {
            encoding: self.name(),
        };

        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|_| invalid()),
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Utf16Le | Self::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return Err(invalid());
                }
                let units = bytes.chunks_exact(2).map(|pair| {
                    let pair = [pair[0], pair[1]];
                    if self == Self::Utf16Le {
                        u16::from_le_bytes(pair)
                    } else {
                        u16::from_be_bytes(pair)
                    }
                });
                char::decode_utf16(units)
                    .collect::<std::result::Result<String, _>>()
                    .map_err(|_| invalid())
            }
        }
    }
}

impl FromStr for TextEncoding {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-16le" | "utf16le" => Ok(Self::Utf16Le),
            "utf-16be" | "utf16be" => Ok(Self::Utf16Be),
            "iso-8859-1" | "latin1" | "latin-1" => Ok(Self::Latin1),
            _ => Err(ParseError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decode document bytes.
///
/// An explicit encoding wins; otherwise a byte-order mark decides; otherwise
/// the bytes are read as UTF-8, replacing invalid sequences.
///
/// # Errors
/// Returns `ParseError::Decode` when an explicit or sniffed encoding does
/// not match the bytes.
pub fn decode(bytes: &[u8], encoding: Option<TextEncoding>) -> Result<String> {
    if let Some(encoding) = encoding.or_else(|| TextEncoding::sniff(bytes)) {
        return encoding.decode(bytes);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(e) => {
            tracing::warn!(
                offset = e.valid_up_to(),
                "Document is not valid UTF-8, replacing invalid bytes"
            );
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

/// A document source.
#[derive(Debug, Clone, Copy)]
pub enum Input<'s> {
    /// A file on disk.
    Path(&'s Path),
    /// Already-decoded text.
    Text(&'s str),
    /// Raw bytes with an optional encoding override.
    Bytes {
        data: &'s [u8],
        encoding: Option<TextEncoding>,
    },
}

fn check_size(size: u64, limit: u64) -> Result<()> {
    if size > limit {
        return Err(ParseError::DocumentTooLarge { size, limit });
    }
    Ok(())
}

/// Read and decode a source into text, bounded by the configured size.
///
/// # Errors
/// Returns I/O, size-limit or decoding errors.
pub fn read_source<'s>(input: Input<'s>, config: &ParserConfig) -> Result<Cow<'s, str>> {
    let limit = config.max_document_size;
    let text = match input {
        Input::Path(path) => {
            check_size(fs::metadata(path)?.len(), limit)?;
            tracing::debug!(path = %path.display(), "Reading document");
            Cow::Owned(decode(&fs::read(path)?, config.encoding)?)
        }
        Input::Text(text) => {
            check_size(text.len() as u64, limit)?;
            Cow::Borrowed(text)
        }
        Input::Bytes { data, encoding } => {
            check_size(data.len() as u64, limit)?;
            Cow::Owned(decode(data, encoding.or(config.encoding))?)
        }
    };

    Ok(match text {
        Cow::Borrowed(text) => Cow::Borrowed(text.trim_start_matches('\u{feff}')),
        Cow::Owned(text) if text.starts_with('\u{feff}') => {
            Cow::Owned(text.trim_start_matches('\u{feff}').to_string())
        }
        owned => owned,
    })
}

/// Activity counters for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// `iati-activity` elements visited.
    pub seen: usize,
    /// Activities yielded.
    pub admitted: usize,
    /// Activities left out (no identifier or a fatal extraction error).
    pub skipped: usize,
}

/// Lazy, forward-only sequence of the admissible activities of a document.
pub struct Activities<'a, 'input> {
    cursor: Option<Node<'a, 'input>>,
    codelists: &'a Codelists,
    context: DocumentContext,
    report: ParseReport,
}

impl<'a, 'input> Activities<'a, 'input> {
    fn new(document: &'a Document<'input>, codelists: &'a Codelists, config: &ParserConfig) -> Self {
        let root = document.root_element();
        let cursor = if has_tag(root, ACTIVITY_TAG) {
            Some(root)
        } else {
            if !has_tag(root, ACTIVITIES_TAG) {
                tracing::warn!(root = get_tag_name(root), "Unexpected document root");
            }
            root.first_element_child()
        };

        Self {
            cursor,
            codelists,
            context: DocumentContext::from_root(root, config),
            report: ParseReport::default(),
        }
    }

    /// Counters for the activities visited so far.
    #[must_use]
    pub fn report(&self) -> ParseReport {
        self.report
    }

    /// Document-level defaults in effect.
    #[must_use]
    pub fn context(&self) -> &DocumentContext {
        &self.context
    }
}

impl Iterator for Activities<'_, '_> {
    type Item = Activity;

    fn next(&mut self) -> Option<Activity> {
        while let Some(node) = self.cursor {
            self.cursor = node.next_sibling_element();
            if !has_tag(node, ACTIVITY_TAG) {
                continue;
            }

            self.report.seen += 1;
            match assemble(node, self.codelists, &self.context) {
                Some(activity) => {
                    self.report.admitted += 1;
                    return Some(activity);
                }
                None => self.report.skipped += 1,
            }
        }
        None
    }
}

/// Parses documents against a set of codelists.
#[derive(Debug, Clone)]
pub struct Parser<'c> {
    codelists: &'c Codelists,
    config: ParserConfig,
}

impl Parser<'static> {
    /// Parser using the built-in codelists.
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self::with_codelists(Codelists::standard(), config)
    }
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl<'c> Parser<'c> {
    /// Parser using caller-supplied codelists.
    #[must_use]
    pub fn with_codelists(codelists: &'c Codelists, config: ParserConfig) -> Self {
        Self { codelists, config }
    }

    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Iterate the activities of an already-parsed document.
    pub fn activities<'a, 'input>(&'a self, document: &'a Document<'input>) -> Activities<'a, 'input>
    where
        'c: 'a,
    {
        Activities::new(document, self.codelists, &self.config)
    }

    /// Read and parse `input`, then hand its activities to `f`.
    ///
    /// # Errors
    /// Returns read, decoding and XML errors. Problems inside individual
    /// activities are logged and skipped instead.
    ///
    /// # Examples
    /// ```
    /// use iati_parser::{Input, Parser};
    ///
    /// let xml = r#"<iati-activities>
    ///     <iati-activity><iati-identifier>GB-1-1</iati-identifier></iati-activity>
    ///     <iati-activity><title>No identifier</title></iati-activity>
    /// </iati-activities>"#;
    ///
    /// let parser = Parser::default();
    /// let (ids, report) = parser
    ///     .with_document(Input::Text(xml), |mut activities| {
    ///         let ids: Vec<String> = activities.by_ref().map(|a| a.iati_identifier).collect();
    ///         (ids, activities.report())
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(ids, vec!["GB-1-1".to_string()]);
    /// assert_eq!(report.skipped, 1);
    /// ```
    pub fn with_document<T>(
        &self,
        input: Input<'_>,
        f: impl FnOnce(Activities<'_, '_>) -> T,
    ) -> Result<T> {
        let text = read_source(input, &self.config)?;
        let document = Document::parse(&text)?;
        Ok(f(self.activities(&document)))
    }

    /// The first admissible activity of `input`.
    ///
    /// # Errors
    /// Returns `ParseError::EmptyDocument` when there is none, plus any
    /// read or XML error.
    pub fn first_activity(&self, input: Input<'_>) -> Result<Activity> {
        self.with_document(input, |mut activities| activities.next())?
            .ok_or(ParseError::EmptyDocument)
    }

    /// All admissible activities of `input`, in document order.
    ///
    /// # Errors
    /// Returns read, decoding and XML errors.
    pub fn collect_activities(&self, input: Input<'_>) -> Result<Vec<Activity>> {
        self.with_document(input, |mut activities| {
            let collected: Vec<Activity> = activities.by_ref().collect();
            let report = activities.report();
            tracing::info!(
                seen = report.seen,
                admitted = report.admitted,
                skipped = report.skipped,
                "Parsed document"
            );
            collected
        })
    }
}

/// The first admissible activity of `input`, using the built-in codelists.
///
/// # Errors
/// See [`Parser::first_activity`].
pub fn first_activity(input: Input<'_>) -> Result<Activity> {
    Parser::default().first_activity(input)
}

/// All admissible activities of `input`, using the built-in codelists.
///
/// # Errors
/// See [`Parser::collect_activities`].
pub fn collect_activities(input: Input<'_>) -> Result<Vec<Activity>> {
    Parser::default().collect_activities(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TWO_ACTIVITIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<iati-activities version="1.03" default-currency="GBP">
  <iati-activity>
    <iati-identifier>GB-1-1</iati-identifier>
    <title>Café project</title>
  </iati-activity>
  <!-- a comment between activities -->
  <iati-activity>
    <title>No identifier</title>
  </iati-activity>
  <iati-activity>
    <iati-identifier>GB-1-2</iati-identifier>
  </iati-activity>
</iati-activities>"#;

    fn ids(activities: &[Activity]) -> Vec<&str> {
        activities.iter().map(|a| a.iati_identifier.as_str()).collect()
    }

    #[test]
    fn test_text_input() {
        let activities = collect_activities(Input::Text(TWO_ACTIVITIES)).unwrap();
        assert_eq!(ids(&activities), vec!["GB-1-1", "GB-1-2"]);
    }

    #[test]
    fn test_report_counts() {
        let report = Parser::default()
            .with_document(Input::Text(TWO_ACTIVITIES), |mut activities| {
                activities.by_ref().for_each(drop);
                activities.report()
            })
            .unwrap();

        assert_eq!(
            report,
            ParseReport {
                seen: 3,
                admitted: 2,
                skipped: 1
            }
        );
    }

    #[test]
    fn test_iterator_is_lazy() {
        let report = Parser::default()
            .with_document(Input::Text(TWO_ACTIVITIES), |mut activities| {
                activities.next();
                activities.report()
            })
            .unwrap();
        assert_eq!(report.seen, 1);
    }

    #[test]
    fn test_pre_parsed_document() {
        let document = Document::parse(TWO_ACTIVITIES).unwrap();
        let parser = Parser::default();
        let activities: Vec<_> = parser.activities(&document).collect();
        assert_eq!(activities.len(), 2);
        assert_eq!(
            parser.activities(&document).context().default_currency.as_deref(),
            Some("GBP")
        );
    }

    #[test]
    fn test_single_activity_root() {
        let activity = first_activity(Input::Text(
            "<iati-activity><iati-identifier>X</iati-identifier></iati-activity>",
        ))
        .unwrap();
        assert_eq!(activity.iati_identifier, "X");
    }

    #[test]
    fn test_first_activity_empty_document() {
        let result = first_activity(Input::Text("<iati-activities/>"));
        assert!(matches!(result, Err(ParseError::EmptyDocument)));

        let result = first_activity(Input::Text(
            "<iati-activities><iati-activity><title>x</title></iati-activity></iati-activities>",
        ));
        assert!(matches!(result, Err(ParseError::EmptyDocument)));
    }

    #[test]
    fn test_malformed_xml_is_fatal() {
        let result = collect_activities(Input::Text("<iati-activities><iati-activity>"));
        assert!(matches!(result, Err(ParseError::XmlParse(_))));
    }

    #[test]
    fn test_path_input() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TWO_ACTIVITIES.as_bytes()).unwrap();

        let activities = collect_activities(Input::Path(file.path())).unwrap();
        assert_eq!(ids(&activities), vec!["GB-1-1", "GB-1-2"]);
        assert_eq!(activities[0].title.as_deref(), Some("Café project"));
    }

    #[test]
    fn test_missing_path() {
        let result = collect_activities(Input::Path(Path::new("/nonexistent/activities.xml")));
        assert!(matches!(result, Err(ParseError::Io(_))));
    }

    #[test]
    fn test_size_limit() {
        let parser = Parser::new(ParserConfig::new().with_max_document_size(16));
        let result = parser.collect_activities(Input::Text(TWO_ACTIVITIES));
        assert!(matches!(
            result,
            Err(ParseError::DocumentTooLarge { limit: 16, .. })
        ));
    }

    #[test]
    fn test_latin1_override() {
        let bytes: Vec<u8> = TWO_ACTIVITIES
            .chars().map(|c| u8::try_from(u32::from(c)).unwrap()).collect();

        let activities = collect_activities(Input::Bytes {
            data: &bytes,
            encoding: Some(TextEncoding::Latin1),
        })
        .unwrap();
        assert_eq!(activities[0].title.as_deref(), Some("Café project"));
    }

    #[test]
    fn test_utf16_bom_is_sniffed() {
        let mut bytes = UTF16LE_BOM.to_vec();
        bytes.extend(TWO_ACTIVITIES.encode_utf16().flat_map(u16::to_le_bytes));

        let activities = collect_activities(Input::Bytes {
            data: &bytes,
            encoding: None,
        })
        .unwrap();
        assert_eq!(ids(&activities), vec!["GB-1-1", "GB-1-2"]);
    }

    #[test]
    fn test_utf16be_override() {
        let bytes: Vec<u8> = TWO_ACTIVITIES
            .encode_utf16()
            .flat_map(u16::to_be_bytes)
            .collect();
        let text = decode(&bytes, Some(TextEncoding::Utf16Be)).unwrap();
        assert_eq!(text, TWO_ACTIVITIES);
    }

    #[test]
    fn test_utf8_bom_is_skipped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(TWO_ACTIVITIES.as_bytes());
        let activities = collect_activities(Input::Bytes {
            data: &bytes,
            encoding: None,
        })
        .unwrap();
        assert_eq!(activities.len(), 2);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let text = decode(b"<a>caf\xe9</a>", None).unwrap();
        assert_eq!(text, "<a>caf\u{fffd}</a>");
    }

    #[test]
    fn test_explicit_utf8_rejects_invalid_bytes() {
        let result = decode(b"<a>caf\xe9</a>", Some(TextEncoding::Utf8));
        assert!(matches!(result, Err(ParseError::Decode { encoding: "UTF-8" })));
    }

    #[test]
    fn test_odd_length_utf16() {
        assert!(TextEncoding::Utf16Le.decode(b"<a/").is_err());
    }

    #[test]
    fn test_encoding_names() {
        assert_eq!("utf-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("UTF-16LE".parse::<TextEncoding>().unwrap(), TextEncoding::Utf16Le);
        assert_eq!("utf_16be".parse::<TextEncoding>().unwrap(), TextEncoding::Utf16Be);
        assert_eq!("latin1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert_eq!(
            "ISO-8859-1".parse::<TextEncoding>().unwrap(),
            TextEncoding::Latin1
        );
        assert!(matches!(
            "ebcdic".parse::<TextEncoding>(),
            Err(ParseError::UnsupportedEncoding(_))
        ));
        assert_eq!(TextEncoding::Latin1.to_string(), "ISO-8859-1");
    }
}
