//! Budgets.

use roxmltree::Node;

use super::{coded_field, date_field, decimal_field, raw_coded_field};
use crate::codelist::{BudgetType, Coded, Codelists, Currency};
use crate::error::Result;
use crate::policy::{self, Field};
use crate::types::{Budget, MoneyValue};

/// Extract budgets in document order.
///
/// A missing or unknown `@type` counts as an original budget.
///
/// # Errors
/// Returns the first fatal error (missing or invalid amount, invalid date).
pub fn budgets<'a, 'input: 'a>(
    nodes: impl IntoIterator<Item = Node<'a, 'input>>,
    codelists: &Codelists,
    default_currency: Option<&Coded<Currency>>,
) -> Result<Vec<Budget>> {
    let mut result = Vec::new();
    for node in nodes {
        if let Some(budget) = budget(node, codelists, default_currency)? {
            result.push(budget);
        }
    }
    Ok(result)
}

fn budget(
    node: Node<'_, '_>,
    codelists: &Codelists,
    default_currency: Option<&Coded<Currency>>,
) -> Result<Option<Budget>> {
    let Some(budget_type) = policy::apply(
        Field::BudgetType,
        coded_field(&codelists.budget_type, node, Field::BudgetType.path()),
        || Some(BudgetType::Original),
    )?
    .into_option() else {
        return Ok(None);
    };

    let period_start = policy::apply(
        Field::BudgetPeriodStart,
        date_field(node, Field::BudgetPeriodStart.path()),
        || None,
    )?
    .into_option();

    let period_end = policy::apply(
        Field::BudgetPeriodEnd,
        date_field(node, Field::BudgetPeriodEnd.path()),
        || None,
    )?
    .into_option();

    let Some(amount) = policy::apply(
        Field::BudgetValueAmount,
        decimal_field(node, Field::BudgetValueAmount.path()),
        || None,
    )?
    .into_option() else {
        return Ok(None);
    };

    let date = policy::apply(
        Field::BudgetValueDate,
        date_field(node, Field::BudgetValueDate.path()),
        || None,
    )?
    .into_option();

    let currency = policy::apply(
        Field::BudgetCurrency,
        Ok(raw_coded_field(
            &codelists.currency,
            node,
            Field::BudgetCurrency.path(),
        )),
        || default_currency.cloned(),
    )?
    .into_option();

    Ok(Some(Budget {
        budget_type,
        period_start,
        period_end,
        value: MoneyValue {
            date,
            amount,
            currency,
        },
    }))
}
