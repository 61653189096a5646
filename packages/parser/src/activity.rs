//! Activity assembly.
//!
//! Runs the element extractors over one `iati-activity` subtree, applies
//! the document-level defaults and decides whether the activity is
//! admissible.

use chrono::NaiveDate;
use roxmltree::Node;

use crate::codelist::{resolve, ActivityDateType, Coded, Codelists, Currency};
use crate::config::ParserConfig;
use crate::error::Result;
use crate::extract::{
    budgets, coded_field, country_percentages, participating_orgs, region_percentages,
    reporting_org, sector_percentages, transactions,
};
use crate::normalize::{lookup, optional_field, parse_date, parse_integer};
use crate::policy::{self, Field, Outcome};
use crate::types::Activity;
use crate::xml::{canonicalize, find_child, find_children, narrative_text};

/// Defaults declared on the `iati-activities` root, applied to every
/// activity that does not declare its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentContext {
    pub default_currency: Option<String>,
    pub default_language: Option<String>,
}

impl DocumentContext {
    /// Read the defaults from the document root, falling back to the
    /// configured currency.
    #[must_use]
    pub fn from_root(root: Node<'_, '_>, config: &ParserConfig) -> Self {
        Self {
            default_currency: optional_field(
                root,
                "@default-currency",
                config.default_currency.as_deref(),
            ),
            default_language: lookup(root, "@xml:lang"),
        }
    }
}

/// Assemble one activity, logging and skipping it when extraction fails.
///
/// Returns `None` for inadmissible activities (no identifier) and for
/// activities whose extraction hit a fatal error.
pub fn assemble(
    node: Node<'_, '_>,
    codelists: &Codelists,
    context: &DocumentContext,
) -> Option<Activity> {
    match try_assemble(node, codelists, context) {
        Ok(activity) => activity,
        Err(e) => {
            let id = lookup(node, Field::ActivityIdentifier.path());
            tracing::warn!(
                activity = id.as_deref().unwrap_or("<unknown>"),
                error = %e,
                "Skipping activity"
            );
            None
        }
    }
}

/// Assemble one activity, returning fatal extraction errors to the caller.
///
/// `Ok(None)` means the activity is inadmissible.
///
/// # Errors
/// Returns the first fatal error raised by an extractor.
pub fn try_assemble(
    node: Node<'_, '_>,
    codelists: &Codelists,
    context: &DocumentContext,
) -> Result<Option<Activity>> {
    let iati_identifier = match policy::apply(
        Field::ActivityIdentifier,
        Ok(lookup(node, Field::ActivityIdentifier.path())),
        || None,
    )? {
        Outcome::Value(id) => id,
        Outcome::Absent | Outcome::DropRecord => {
            tracing::debug!("Skipping activity without iati-identifier");
            return Ok(None);
        }
    };

    let default_currency = default_currency(node, codelists, context);
    let dates = ActivityDates::from_activity(node, codelists)?;

    let activity = Activity {
        title: find_child(node, "title").and_then(narrative_text),
        description: find_child(node, "description").and_then(narrative_text),
        reporting_org: find_child(node, "reporting-org")
            .map(|org| reporting_org(org, codelists))
            .transpose()?,
        participating_orgs: participating_orgs(
            find_children(node, "participating-org"),
            codelists,
        )?,
        transactions: transactions(
            find_children(node, "transaction"),
            codelists,
            default_currency.as_ref(),
        )?,
        budgets: budgets(
            find_children(node, "budget"),
            codelists,
            default_currency.as_ref(),
        )?,
        recipient_country_percentages: country_percentages(
            find_children(node, "recipient-country"),
            codelists,
        )?,
        recipient_region_percentages: region_percentages(
            find_children(node, "recipient-region"),
            codelists,
        )?,
        sector_percentages: sector_percentages(find_children(node, "sector"), codelists)?,
        start_planned: dates.start_planned,
        start_actual: dates.start_actual,
        end_planned: dates.end_planned,
        end_actual: dates.end_actual,
        default_currency,
        default_language: optional_field(
            node,
            "@xml:lang",
            context.default_language.as_deref(),
        ),
        activity_status: policy::apply(
            Field::ActivityStatus,
            coded_field(&codelists.activity_status, node, Field::ActivityStatus.path()),
            || None,
        )?
        .into_option(),
        last_updated: lookup(node, "@last-updated-datetime"),
        hierarchy: policy::apply(
            Field::Hierarchy,
            lookup(node, Field::Hierarchy.path())
                .map(|text| parse_integer(&text))
                .transpose(),
            || None,
        )?
        .into_option(),
        websites: find_children(node, "activity-website")
            .filter_map(|website| lookup(website, ""))
            .collect(),
        raw_xml: canonicalize(node),
        iati_identifier,
    };

    tracing::debug!(
        activity = %activity.iati_identifier,
        transactions = activity.transactions.len(),
        budgets = activity.budgets.len(),
        "Assembled activity"
    );

    Ok(Some(activity))
}

/// The activity's own default currency, else the document's.
fn default_currency(
    node: Node<'_, '_>,
    codelists: &Codelists,
    context: &DocumentContext,
) -> Option<Coded<Currency>> {
    let raw = optional_field(
        node,
        "@default-currency",
        context.default_currency.as_deref(),
    )?;
    Some(resolve(&codelists.currency, &raw))
}

/// The four milestone dates.
#[derive(Debug, Default)]
struct ActivityDates {
    start_planned: Option<NaiveDate>,
    start_actual: Option<NaiveDate>,
    end_planned: Option<NaiveDate>,
    end_actual: Option<NaiveDate>,
}

impl ActivityDates {
    fn from_activity(node: Node<'_, '_>, codelists: &Codelists) -> Result<Self> {
        let mut dates = Self::default();

        for element in find_children(node, "activity-date") {
            let Some(raw_type) = lookup(element, "@type") else {
                continue;
            };
            let Some(date_type) = resolve(&codelists.activity_date_type, &raw_type).member else {
                continue;
            };

            // iso-date wins over the element text
            let input = lookup(element, Field::ActivityDate.path())
                .or_else(|| lookup(element, ""))
                .map(|text| parse_date(&text))
                .transpose();
            let Some(date) = policy::apply(Field::ActivityDate, input, || None)?.into_option()
            else {
                continue;
            };

            let slot = match date_type {
                ActivityDateType::StartPlanned => &mut dates.start_planned,
                ActivityDateType::StartActual => &mut dates.start_actual,
                ActivityDateType::EndPlanned => &mut dates.end_planned,
                ActivityDateType::EndActual => &mut dates.end_actual,
            };
            slot.get_or_insert(date);
        }

        Ok(dates)
    }
}
