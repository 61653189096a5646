//! Sector, recipient-country and recipient-region allocations.

use roxmltree::Node;
use rust_decimal::Decimal;

use super::{decimal_field, raw_coded_field};
use crate::codelist::{Coded, Codelists, Vocabulary};
use crate::error::Result;
use crate::normalize::lookup;
use crate::policy::{self, Field};
use crate::types::{CountryPercentage, RegionPercentage, SectorPercentage};
use crate::xml::{get_tag_name, narrative_text};

/// Fields shared by every allocation kind.
struct Allocation<M> {
    code: Option<Coded<M>>,
    percentage: Option<Decimal>,
    text: Option<String>,
}

/// Read one allocation element. `None` when it carries nothing usable.
fn allocation<V: Vocabulary>(
    node: Node<'_, '_>,
    vocabulary: &V,
) -> Result<Option<Allocation<V::Member>>> {
    let code = policy::apply(
        Field::AllocationCode,
        Ok(raw_coded_field(vocabulary, node, Field::AllocationCode.path())),
        || None,
    )?
    .into_option();

    let percentage = policy::apply(
        Field::AllocationPercentage,
        decimal_field(node, Field::AllocationPercentage.path()),
        || None,
    )?
    .into_option();

    let text = narrative_text(node);

    if code.is_none() && percentage.is_none() && text.is_none() {
        tracing::debug!(element = get_tag_name(node), "Skipping empty allocation");
        return Ok(None);
    }

    Ok(Some(Allocation {
        code,
        percentage,
        text,
    }))
}

/// Extract `sector` elements.
///
/// # Errors
/// Only if an allocation field's policy propagates.
pub fn sector_percentages<'a, 'input: 'a>(
    nodes: impl IntoIterator<Item = Node<'a, 'input>>,
    codelists: &Codelists,
) -> Result<Vec<SectorPercentage>> {
    let mut result = Vec::new();
    for node in nodes {
        if let Some(a) = allocation(node, &codelists.sector)? {
            result.push(SectorPercentage {
                sector: a.code,
                vocabulary: lookup(node, "@vocabulary"),
                percentage: a.percentage,
                text: a.text,
            });
        }
    }
    Ok(result)
}

/// Extract `recipient-country` elements.
///
/// # Errors
/// Only if an allocation field's policy propagates.
pub fn country_percentages<'a, 'input: 'a>(
    nodes: impl IntoIterator<Item = Node<'a, 'input>>,
    codelists: &Codelists,
) -> Result<Vec<CountryPercentage>> {
    let mut result = Vec::new();
    for node in nodes {
        if let Some(a) = allocation(node, &codelists.country)? {
            result.push(CountryPercentage {
                country: a.code,
                percentage: a.percentage,
                text: a.text,
            });
        }
    }
    Ok(result)
}

/// Extract `recipient-region` elements.
///
/// # Errors
/// Only if an allocation field's policy propagates.
pub fn region_percentages<'a, 'input: 'a>(
    nodes: impl IntoIterator<Item = Node<'a, 'input>>,
    codelists: &Codelists,
) -> Result<Vec<RegionPercentage>> {
    let mut result = Vec::new();
    for node in nodes {
        if let Some(a) = allocation(node, &codelists.region)? {
            result.push(RegionPercentage {
                region: a.code,
                percentage: a.percentage,
                text: a.text,
            });
        }
    }
    Ok(result)
}
