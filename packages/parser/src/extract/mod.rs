//! Element extractors.
//!
//! Each extractor takes the child elements of one kind from an activity
//! and returns the records they describe. Missing and unusable values go
//! through [`crate::policy::apply`]; an extractor only returns `Err` when
//! the policy propagates, which makes the whole activity inadmissible.

mod allocation;
mod budget;
mod organisation;
mod transaction;

pub use allocation::{country_percentages, region_percentages, sector_percentages};
pub use budget::budgets;
pub use organisation::{participating_orgs, reporting_org};
pub use transaction::transactions;

use chrono::NaiveDate;
use roxmltree::Node;
use rust_decimal::Decimal;

use crate::codelist::{resolve, Coded, Vocabulary};
use crate::error::{ParseError, Result};
use crate::normalize::{lookup, parse_date, parse_decimal};

/// Resolve the code at `path` against `vocabulary`.
///
/// `Ok(None)` when absent, `Err(UnknownCode)` when present but unresolved.
pub(crate) fn coded_field<V: Vocabulary>(
    vocabulary: &V,
    node: Node<'_, '_>,
    path: &str,
) -> Result<Option<V::Member>> {
    let Some(raw) = lookup(node, path) else {
        return Ok(None);
    };
    let coded = resolve(vocabulary, &raw);
    match coded.member {
        Some(member) => Ok(Some(member)),
        None => Err(ParseError::UnknownCode {
            vocabulary: vocabulary.name().to_string(),
            raw: coded.raw,
        }),
    }
}

/// Resolve the code at `path`, keeping the raw string even when it does
/// not match the vocabulary.
pub(crate) fn raw_coded_field<V: Vocabulary>(
    vocabulary: &V,
    node: Node<'_, '_>,
    path: &str,
) -> Option<Coded<V::Member>> {
    lookup(node, path).map(|raw| resolve(vocabulary, &raw))
}

pub(crate) fn date_field(node: Node<'_, '_>, path: &str) -> Result<Option<NaiveDate>> {
    lookup(node, path).map(|text| parse_date(&text)).transpose()
}

pub(crate) fn decimal_field(node: Node<'_, '_>, path: &str) -> Result<Option<Decimal>> {
    lookup(node, path).map(|text| parse_decimal(&text)).transpose()
}
