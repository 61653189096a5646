//! Scalar normalizers: field lookup plus tolerant number and date parsing.
//!
//! Field paths are slash-separated tag names relative to a node. A final
//! `@name` segment selects an attribute instead of text:
//!
//! | path                      | selects                                  |
//! |---------------------------|------------------------------------------|
//! | `iati-identifier`         | text of the `iati-identifier` child      |
//! | `@ref`                    | `ref` attribute of the node itself       |
//! | `value/@value-date`       | `value-date` attribute of the `value` child |
//!
//! Values are trimmed; an empty value counts as absent.

use chrono::NaiveDate;
use roxmltree::Node;
use rust_decimal::Decimal;

use crate::config::{DAY_FIRST_DATE_PATTERN, ISO_DATE_PATTERN};
use crate::error::{ParseError, Result};
use crate::xml::{find_by_path, get_attribute, get_text};

/// Look up the text or attribute at `path`, returning `None` when absent or
/// empty.
pub fn lookup(node: Node<'_, '_>, path: &str) -> Option<String> {
    let (element_path, attribute) = match path.rsplit_once('/') {
        Some((head, last)) if last.starts_with('@') => (head, Some(&last[1..])),
        None if path.starts_with('@') => ("", Some(&path[1..])),
        _ => (path, None),
    };

    let target = find_by_path(node, element_path)?;
    let value = match attribute {
        Some(name) => get_attribute(target, name)?.trim().to_string(),
        None => get_text(target),
    };

    Some(value).filter(|v| !v.is_empty())
}

/// Extract the value at `path`, failing when it is absent.
///
/// # Errors
/// Returns `ParseError::MissingValue` if nothing (or only whitespace) is found.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use iati_parser::normalize::required_field;
///
/// let doc = Document::parse(r#"<foo bar="baz"/>"#).unwrap();
/// assert_eq!(required_field(doc.root_element(), "@bar").unwrap(), "baz");
/// assert!(required_field(doc.root_element(), "bar").is_err());
/// ```
pub fn required_field(node: Node<'_, '_>, path: &str) -> Result<String> {
    lookup(node, path).ok_or_else(|| ParseError::missing(path))
}

/// Extract the value at `path`, or `default` when it is absent.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use iati_parser::normalize::optional_field;
///
/// let doc = Document::parse("<foo/>").unwrap();
/// assert_eq!(optional_field(doc.root_element(), "bar", None), None);
/// assert_eq!(
///     optional_field(doc.root_element(), "@currency", Some("USD")),
///     Some("USD".to_string())
/// );
/// ```
pub fn optional_field(node: Node<'_, '_>, path: &str, default: Option<&str>) -> Option<String> {
    lookup(node, path).or_else(|| default.map(str::to_string))
}

/// Split off an optional leading sign and drop thousands separators.
///
/// Returns the sign (`""` or `"-"`) and the separator-free body, or `None`
/// if the body is empty.
fn split_number(text: &str) -> Option<(&'static str, String)> {
    let trimmed = text.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let body: String = body.chars().filter(|c| *c != ',').collect();
    if body.is_empty() {
        None
    } else {
        Some((sign, body))
    }
}

fn is_digits(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}

/// Parse a base-10 integer, tolerating commas and a leading sign.
///
/// # Errors
/// Returns `ParseError::InvalidNumber` on any other non-digit content or on
/// overflow.
///
/// # Examples
/// ```
/// use iati_parser::normalize::parse_integer;
///
/// assert_eq!(parse_integer("20,026").unwrap(), 20026);
/// assert_eq!(parse_integer("-20026").unwrap(), -20026);
/// assert!(parse_integer("12.5").is_err());
/// ```
pub fn parse_integer(text: &str) -> Result<i64> {
    let invalid = || ParseError::InvalidNumber(text.to_string());
    let (sign, body) = split_number(text).ok_or_else(invalid)?;
    if !is_digits(&body) {
        return Err(invalid());
    }
    format!("{sign}{body}").parse::<i64>().map_err(|_| invalid())
}

/// Parse an exact decimal, tolerating commas and a leading sign.
///
/// # Errors
/// Returns `ParseError::InvalidNumber` on any other content, or when the
/// value cannot be represented without rounding.
///
/// # Examples
/// ```
/// use std::str::FromStr;
/// use rust_decimal::Decimal;
/// use iati_parser::normalize::parse_decimal;
///
/// assert_eq!(parse_decimal("42479.4").unwrap(), Decimal::from_str("42479.4").unwrap());
/// assert_eq!(parse_decimal("-20,026").unwrap(), Decimal::from(-20026));
/// ```
pub fn parse_decimal(text: &str) -> Result<Decimal> {
    let invalid = || ParseError::InvalidNumber(text.to_string());
    let (sign, body) = split_number(text).ok_or_else(invalid)?;

    // either side of the point may be empty, not both
    let (integral, fraction) = body.split_once('.').unwrap_or((body.as_str(), ""));
    if (integral.is_empty() && fraction.is_empty())
        || !is_digits(integral)
        || !is_digits(fraction)
    {
        return Err(invalid());
    }
    let integral = if integral.is_empty() { "0" } else { integral };

    let normalized = if fraction.is_empty() {
        format!("{sign}{integral}")
    } else {
        format!("{sign}{integral}.{fraction}")
    };
    Decimal::from_str_exact(&normalized).map_err(|_| invalid())
}

/// Parse a date in `YYYY-MM-DD` or, failing that, `DD/MM/YYYY` form.
///
/// # Errors
/// Returns `ParseError::InvalidDate` for any other shape or for impossible
/// calendar dates.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use iati_parser::normalize::parse_date;
///
/// assert_eq!(parse_date("2010-01-02").unwrap(), NaiveDate::from_ymd_opt(2010, 1, 2).unwrap());
/// assert_eq!(parse_date("31/12/2011").unwrap(), NaiveDate::from_ymd_opt(2011, 12, 31).unwrap());
/// assert!(parse_date("12-31-2011").is_err());
/// ```
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    let format = if ISO_DATE_PATTERN.is_match(trimmed) {
        "%Y-%m-%d"
    } else if DAY_FIRST_DATE_PATTERN.is_match(trimmed) {
        "%d/%m/%Y"
    } else {
        return Err(ParseError::InvalidDate(text.to_string()));
    };

    NaiveDate::parse_from_str(trimmed, format)
        .map_err(|_| ParseError::InvalidDate(text.to_string()))
}
