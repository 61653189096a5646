//! Codelist vocabularies and the resolver that maps raw codes or labels onto
//! them.
//!
//! Each vocabulary is a closed enum implementing [`Codelist`]. Lookups go
//! through the [`Vocabulary`] capability, implemented by [`CodelistTable`],
//! so callers can inject their own tables (for instance the full published
//! IATI lists) without touching the extractors. The standard tables are
//! built once and shared through [`Codelists::standard`].

mod standard;
mod table;
mod vocabularies;

use std::fmt::Debug;
use std::hash::Hash;

pub use standard::Codelists;
pub use table::{resolve, Coded, CodelistTable, Vocabulary};
pub use vocabularies::{
    ActivityDateType, ActivityStatus, AidType, BudgetType, Country, Currency, DisbursementChannel,
    FinanceType, FlowType, OrganisationRole, OrganisationType, Region, Sector, TiedStatus,
    TransactionType,
};

/// A closed vocabulary of canonical codes and human-readable labels.
pub trait Codelist: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Vocabulary name used in log messages and errors.
    const NAME: &'static str;

    /// Canonical machine code (e.g. `"40"`, `"C"`, `"USD"`).
    fn code(self) -> &'static str;

    /// Human-readable label (e.g. `"Multilateral"`).
    fn label(self) -> &'static str;

    /// Every member, in codelist order.
    fn all() -> &'static [Self];
}
