//! Transactions.

use roxmltree::Node;

use super::{coded_field, date_field, decimal_field, raw_coded_field};
use crate::codelist::{Coded, Codelists, Currency, Vocabulary};
use crate::error::Result;
use crate::normalize::lookup;
use crate::policy::{self, Field, Outcome};
use crate::types::{MoneyValue, Transaction, TransactionOrganisation};
use crate::xml::{find_child, narrative_text};

/// Extract transactions in document order.
///
/// Transactions without a resolvable type are skipped. `default_currency`
/// applies to values that state none.
///
/// # Errors
/// Returns the first fatal error (missing or invalid amount, invalid date).
pub fn transactions<'a, 'input: 'a>(
    nodes: impl IntoIterator<Item = Node<'a, 'input>>,
    codelists: &Codelists,
    default_currency: Option<&Coded<Currency>>,
) -> Result<Vec<Transaction>> {
    let mut result = Vec::new();
    for node in nodes {
        if let Some(transaction) = transaction(node, codelists, default_currency)? {
            result.push(transaction);
        }
    }
    Ok(result)
}

fn transaction(
    node: Node<'_, '_>,
    codelists: &Codelists,
    default_currency: Option<&Coded<Currency>>,
) -> Result<Option<Transaction>> {
    let transaction_type = match policy::apply(
        Field::TransactionType,
        coded_field(&codelists.transaction_type, node, Field::TransactionType.path()),
        || None,
    )? {
        Outcome::Value(transaction_type) => transaction_type,
        Outcome::Absent | Outcome::DropRecord => {
            tracing::debug!(reference = ?lookup(node, "@ref"), "Skipping transaction without type");
            return Ok(None);
        }
    };

    let Some(amount) = policy::apply(
        Field::TransactionValueAmount,
        decimal_field(node, Field::TransactionValueAmount.path()),
        || None,
    )?
    .into_option() else {
        return Ok(None);
    };

    let value_date = policy::apply(
        Field::TransactionValueDate,
        date_field(node, Field::TransactionValueDate.path()),
        || None,
    )?
    .into_option();

    let date = policy::apply(
        Field::TransactionDate,
        date_field(node, Field::TransactionDate.path()),
        || value_date,
    )?
    .into_option();

    let currency = policy::apply(
        Field::TransactionCurrency,
        Ok(raw_coded_field(
            &codelists.currency,
            node,
            Field::TransactionCurrency.path(),
        )),
        || default_currency.cloned(),
    )?
    .into_option();

    Ok(Some(Transaction {
        transaction_type,
        value: MoneyValue {
            date: value_date,
            amount,
            currency,
        },
        date,
        reference: lookup(node, "@ref"),
        provider_org: transaction_org(node, "provider-org", "provider-activity-id"),
        receiver_org: transaction_org(node, "receiver-org", "receiver-activity-id"),
        description: find_child(node, "description").and_then(narrative_text),
        flow_type: code_field(&codelists.flow_type, node, Field::FlowType)?,
        finance_type: code_field(&codelists.finance_type, node, Field::FinanceType)?,
        aid_type: code_field(&codelists.aid_type, node, Field::AidType)?,
        tied_status: code_field(&codelists.tied_status, node, Field::TiedStatus)?,
        disbursement_channel: code_field(
            &codelists.disbursement_channel,
            node,
            Field::DisbursementChannel,
        )?,
    }))
}

/// Optional coded classification that keeps the raw code when it does not
/// resolve.
fn code_field<V: Vocabulary>(
    vocabulary: &V,
    node: Node<'_, '_>,
    field: Field,
) -> Result<Option<Coded<V::Member>>> {
    let input = Ok(raw_coded_field(vocabulary, node, field.path()));
    Ok(policy::apply(field, input, || None)?.into_option())
}

fn transaction_org(
    node: Node<'_, '_>,
    tag: &str,
    activity_id_attribute: &str,
) -> Option<TransactionOrganisation> {
    let org = find_child(node, tag)?;
    let organisation = TransactionOrganisation {
        reference: lookup(org, "@ref"),
        activity_id: lookup(org, &format!("@{activity_id_attribute}")),
        text: narrative_text(org),
    };

    if organisation.reference.is_none()
        && organisation.activity_id.is_none()
        && organisation.text.is_none()
    {
        None
    } else {
        Some(organisation)
    }
}
