//! Per-field inclusion policy.
//!
//! Every field the extractors read has one entry here saying what happens
//! when the value is missing and when it is present but unusable (an
//! unparseable number or date, or a code outside its vocabulary). The
//! extractors never decide this in their own control flow; they hand the
//! raw outcome to [`apply`].

use crate::error::{ParseError, Result};

/// A field read by one of the extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ActivityIdentifier,
    ActivityDate,
    ActivityStatus,
    Hierarchy,
    ReportingOrgType,
    ParticipatingOrgRole,
    ParticipatingOrgType,
    TransactionType,
    TransactionValueAmount,
    TransactionValueDate,
    TransactionDate,
    TransactionCurrency,
    FlowType,
    FinanceType,
    AidType,
    TiedStatus,
    DisbursementChannel,
    BudgetType,
    BudgetPeriodStart,
    BudgetPeriodEnd,
    BudgetValueAmount,
    BudgetValueDate,
    BudgetCurrency,
    AllocationCode,
    AllocationPercentage,
}

impl Field {
    /// Every field, in table order.
    pub const ALL: [Field; 25] = [
        Field::ActivityIdentifier,
        Field::ActivityDate,
        Field::ActivityStatus,
        Field::Hierarchy,
        Field::ReportingOrgType,
        Field::ParticipatingOrgRole,
        Field::ParticipatingOrgType,
        Field::TransactionType,
        Field::TransactionValueAmount,
        Field::TransactionValueDate,
        Field::TransactionDate,
        Field::TransactionCurrency,
        Field::FlowType,
        Field::FinanceType,
        Field::AidType,
        Field::TiedStatus,
        Field::DisbursementChannel,
        Field::BudgetType,
        Field::BudgetPeriodStart,
        Field::BudgetPeriodEnd,
        Field::BudgetValueAmount,
        Field::BudgetValueDate,
        Field::BudgetCurrency,
        Field::AllocationCode,
        Field::AllocationPercentage,
    ];

    /// Lookup path of the field, relative to its record's element.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::ActivityIdentifier => "iati-identifier",
            Self::ActivityDate => "@iso-date",
            Self::ActivityStatus => "activity-status/@code",
            Self::Hierarchy => "@hierarchy",
            Self::ReportingOrgType | Self::ParticipatingOrgType => "@type",
            Self::ParticipatingOrgRole => "@role",
            Self::TransactionType => "transaction-type/@code",
            Self::TransactionValueAmount | Self::BudgetValueAmount => "value",
            Self::TransactionValueDate | Self::BudgetValueDate => "value/@value-date",
            Self::TransactionDate => "transaction-date/@iso-date",
            Self::TransactionCurrency | Self::BudgetCurrency => "value/@currency",
            Self::FlowType => "flow-type/@code",
            Self::FinanceType => "finance-type/@code",
            Self::AidType => "aid-type/@code",
            Self::TiedStatus => "tied-status/@code",
            Self::DisbursementChannel => "disbursement-channel/@code",
            Self::BudgetType => "@type",
            Self::BudgetPeriodStart => "period-start/@iso-date",
            Self::BudgetPeriodEnd => "period-end/@iso-date",
            Self::AllocationCode => "@code",
            Self::AllocationPercentage => "@percentage",
        }
    }

    /// Whether the field is resolved through a codelist.
    #[must_use]
    pub fn is_coded(self) -> bool {
        matches!(
            self,
            Self::ActivityStatus
                | Self::ReportingOrgType
                | Self::ParticipatingOrgRole
                | Self::ParticipatingOrgType
                | Self::TransactionType
                | Self::TransactionCurrency
                | Self::FlowType
                | Self::FinanceType
                | Self::AidType
                | Self::TiedStatus
                | Self::DisbursementChannel
                | Self::BudgetType
                | Self::BudgetCurrency
                | Self::AllocationCode
        )
    }
}

/// What to do with a missing or unusable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Omit the whole record (activity, transaction, ...).
    DropRecord,
    /// Substitute the caller's default; absent if there is none.
    UseDefault,
    /// Leave the field empty and keep the record.
    Null,
    /// Return the error to the caller.
    Propagate,
}

/// Policy entry for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    pub field: Field,
    pub on_missing: Action,
    pub on_invalid: Action,
}

/// The policy for a field.
#[must_use]
pub fn policy(field: Field) -> FieldPolicy {
    use Action::{DropRecord, Null, Propagate, UseDefault};

    let (on_missing, on_invalid) = match field {
        Field::ActivityIdentifier => (DropRecord, DropRecord),
        Field::ActivityDate => (Null, Null),
        Field::ActivityStatus => (Null, Null),
        Field::Hierarchy => (Null, Null),
        Field::ReportingOrgType => (Null, Null),
        Field::ParticipatingOrgRole => (DropRecord, DropRecord),
        Field::ParticipatingOrgType => (Null, Null),
        Field::TransactionType => (DropRecord, DropRecord),
        Field::TransactionValueAmount => (Propagate, Propagate),
        Field::TransactionValueDate => (Null, Propagate),
        Field::TransactionDate => (UseDefault, Propagate),
        Field::TransactionCurrency => (UseDefault, Null),
        Field::FlowType
        | Field::FinanceType
        | Field::AidType
        | Field::TiedStatus
        | Field::DisbursementChannel => (Null, Null),
        Field::BudgetType => (UseDefault, UseDefault),
        Field::BudgetPeriodStart => (Null, Propagate),
        Field::BudgetPeriodEnd => (Null, Propagate),
        Field::BudgetValueAmount => (Propagate, Propagate),
        Field::BudgetValueDate => (Null, Propagate),
        Field::BudgetCurrency => (UseDefault, Null),
        Field::AllocationCode => (Null, Null),
        Field::AllocationPercentage => (Null, Null),
    };

    FieldPolicy {
        field,
        on_missing,
        on_invalid,
    }
}

/// The full policy table.
pub fn table() -> impl Iterator<Item = FieldPolicy> {
    Field::ALL.into_iter().map(policy)
}

/// Result of applying a field's policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Use this value.
    Value(T),
    /// Keep the record with the field empty.
    Absent,
    /// Omit the record.
    DropRecord,
}

impl<T> Outcome<T> {
    /// The value, treating `DropRecord` as absent.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::DropRecord => None,
        }
    }
}

/// Apply a field's policy to an extraction result.
///
/// `input` is `Ok(Some(_))` for a usable value, `Ok(None)` for a missing
/// one and `Err(_)` for a present but unusable one. `default` is only
/// called for [`Action::UseDefault`].
///
/// # Errors
/// Returns the input error (or `MissingValue`) when the policy says
/// [`Action::Propagate`].
pub fn apply<T>(
    field: Field,
    input: Result<Option<T>>,
    default: impl FnOnce() -> Option<T>,
) -> Result<Outcome<T>> {
    let policy = policy(field);
    let (action, error) = match input {
        Ok(Some(value)) => return Ok(Outcome::Value(value)),
        Ok(None) => (policy.on_missing, ParseError::missing(field.path())),
        Err(error) => {
            if policy.on_invalid != Action::Propagate {
                tracing::debug!(field = ?field, error = %error, action = ?policy.on_invalid, "Unusable value");
            }
            (policy.on_invalid, error)
        }
    };

    match action {
        Action::DropRecord => Ok(Outcome::DropRecord),
        Action::UseDefault => Ok(default().map_or(Outcome::Absent, Outcome::Value)),
        Action::Null => Ok(Outcome::Absent),
        Action::Propagate => Err(error),
    }
}
