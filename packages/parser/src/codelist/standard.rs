//! The set of vocabularies consulted by the extractors.

use std::sync::LazyLock;

use super::table::CodelistTable;
use super::vocabularies::{
    ActivityDateType, ActivityStatus, AidType, BudgetType, Country, Currency, DisbursementChannel,
    FinanceType, FlowType, OrganisationRole, OrganisationType, Region, Sector, TiedStatus,
    TransactionType,
};

static STANDARD: LazyLock<Codelists> = LazyLock::new(Codelists::new);

/// One lookup table per coded field.
///
/// Tables are never mutated after construction. Replace individual fields to
/// inject different vocabularies:
///
/// ```
/// use iati_parser::codelist::{CodelistTable, Codelists, OrganisationRole};
///
/// let codelists = Codelists {
///     organisation_role: CodelistTable::from_entries(
///         "OrganisationRole",
///         [("Funding", "Funder", OrganisationRole::Funding)],
///     ),
///     ..Codelists::new()
/// };
/// assert_eq!(codelists.organisation_role.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Codelists {
    pub organisation_type: CodelistTable<OrganisationType>,
    pub organisation_role: CodelistTable<OrganisationRole>,
    pub transaction_type: CodelistTable<TransactionType>,
    pub budget_type: CodelistTable<BudgetType>,
    pub activity_date_type: CodelistTable<ActivityDateType>,
    pub activity_status: CodelistTable<ActivityStatus>,
    pub currency: CodelistTable<Currency>,
    pub country: CodelistTable<Country>,
    pub region: CodelistTable<Region>,
    pub sector: CodelistTable<Sector>,
    pub flow_type: CodelistTable<FlowType>,
    pub finance_type: CodelistTable<FinanceType>,
    pub aid_type: CodelistTable<AidType>,
    pub tied_status: CodelistTable<TiedStatus>,
    pub disbursement_channel: CodelistTable<DisbursementChannel>,
}

impl Codelists {
    /// Build the built-in tables.
    ///
    /// Transaction types and activity date types also accept the numeric
    /// codes introduced by later versions of the standard.
    #[must_use]
    pub fn new() -> Self {
        Self {
            organisation_type: CodelistTable::standard(),
            organisation_role: CodelistTable::standard(),
            transaction_type: CodelistTable::standard()
                .with_alias("1", TransactionType::IncomingFunds)
                .with_alias("2", TransactionType::Commitment)
                .with_alias("3", TransactionType::Disbursement)
                .with_alias("4", TransactionType::Expenditure)
                .with_alias("5", TransactionType::InterestRepayment)
                .with_alias("6", TransactionType::LoanRepayment)
                .with_alias("7", TransactionType::Reimbursement)
                .with_alias("8", TransactionType::PurchaseOfEquity)
                .with_alias("9", TransactionType::SaleOfEquity)
                .with_alias("10", TransactionType::CreditGuarantee)
                .with_alias("11", TransactionType::IncomingCommitment),
            budget_type: CodelistTable::standard(),
            activity_date_type: CodelistTable::standard()
                .with_alias("1", ActivityDateType::StartPlanned)
                .with_alias("2", ActivityDateType::StartActual)
                .with_alias("3", ActivityDateType::EndPlanned)
                .with_alias("4", ActivityDateType::EndActual),
            activity_status: CodelistTable::standard(),
            currency: CodelistTable::standard(),
            country: CodelistTable::standard(),
            region: CodelistTable::standard(),
            sector: CodelistTable::standard(),
            flow_type: CodelistTable::standard(),
            finance_type: CodelistTable::standard(),
            aid_type: CodelistTable::standard(),
            tied_status: CodelistTable::standard(),
            disbursement_channel: CodelistTable::standard(),
        }
    }

    /// Process-wide built-in tables, constructed on first use.
    #[must_use]
    pub fn standard() -> &'static Codelists {
        &STANDARD
    }
}

impl Default for Codelists {
    fn default() -> Self {
        Self::new()
    }
}
