//! Typed records produced by the parser.
//!
//! Records are plain values: once assembled they are never mutated, and no
//! record refers back to its parent or to a sibling activity.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::codelist::{
    ActivityStatus, AidType, BudgetType, Coded, Country, Currency, DisbursementChannel,
    FinanceType, FlowType, OrganisationRole, OrganisationType, Region, Sector, TiedStatus,
    TransactionType,
};

/// An organisation reference (e.g. the reporting organisation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organisation {
    /// Organisation identifier (e.g. "GB-1").
    #[serde(rename = "ref")]
    pub reference: Option<String>,

    /// Organisation type, if it resolved.
    #[serde(rename = "type")]
    pub org_type: Option<OrganisationType>,

    /// Display name.
    pub text: Option<String>,
}

/// An organisation taking part in an activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParticipatingOrganisation {
    #[serde(rename = "ref")]
    pub reference: Option<String>,

    pub role: OrganisationRole,

    #[serde(rename = "type")]
    pub org_type: Option<OrganisationType>,

    pub text: Option<String>,
}

/// Provider or receiver of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionOrganisation {
    #[serde(rename = "ref")]
    pub reference: Option<String>,

    /// The counterpart's own activity identifier
    /// (`provider-activity-id` / `receiver-activity-id`).
    pub activity_id: Option<String>,

    pub text: Option<String>,
}

/// A monetary value: amount plus the date and currency it is expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoneyValue {
    /// Value date (`value-date` attribute).
    pub date: Option<NaiveDate>,

    /// Exact amount.
    pub amount: Decimal,

    /// Currency, stated or inherited from the activity default. Codes
    /// outside the currency vocabulary keep their raw text.
    pub currency: Option<Coded<Currency>>,
}

impl MoneyValue {
    /// The currency, if it resolved.
    #[must_use]
    pub fn currency(&self) -> Option<Currency> {
        self.currency.as_ref().and_then(Coded::member)
    }

    /// The currency code as published.
    #[must_use]
    pub fn currency_code(&self) -> Option<&str> {
        self.currency.as_ref().map(Coded::value)
    }
}

/// One financial movement of an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    pub value: MoneyValue,

    /// Transaction date; falls back to the value date.
    pub date: Option<NaiveDate>,

    #[serde(rename = "ref")]
    pub reference: Option<String>,

    pub provider_org: Option<TransactionOrganisation>,
    pub receiver_org: Option<TransactionOrganisation>,
    pub description: Option<String>,

    pub flow_type: Option<Coded<FlowType>>,
    pub finance_type: Option<Coded<FinanceType>>,
    pub aid_type: Option<Coded<AidType>>,
    pub tied_status: Option<Coded<TiedStatus>>,
    pub disbursement_channel: Option<Coded<DisbursementChannel>>,
}

impl Transaction {
    #[must_use]
    pub fn value_amount(&self) -> Decimal {
        self.value.amount
    }

    #[must_use]
    pub fn value_currency(&self) -> Option<Currency> {
        self.value.currency()
    }

    #[must_use]
    pub fn value_date(&self) -> Option<NaiveDate> {
        self.value.date
    }
}

/// A planned spending allocation over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Budget {
    #[serde(rename = "type")]
    pub budget_type: BudgetType,

    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,

    pub value: MoneyValue,
}

impl Budget {
    #[must_use]
    pub fn value_amount(&self) -> Decimal {
        self.value.amount
    }

    #[must_use]
    pub fn value_currency(&self) -> Option<Currency> {
        self.value.currency()
    }
}

/// Share of an activity going to a sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorPercentage {
    pub sector: Option<Coded<Sector>>,

    /// Sector vocabulary as published (e.g. "DAC").
    pub vocabulary: Option<String>,

    pub percentage: Option<Decimal>,
    pub text: Option<String>,
}

impl SectorPercentage {
    /// The sector, if the code resolved.
    #[must_use]
    pub fn sector(&self) -> Option<Sector> {
        self.sector.as_ref().and_then(Coded::member)
    }
}

/// Share of an activity going to a recipient country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryPercentage {
    pub country: Option<Coded<Country>>,
    pub percentage: Option<Decimal>,
    pub text: Option<String>,
}

impl CountryPercentage {
    #[must_use]
    pub fn country(&self) -> Option<Country> {
        self.country.as_ref().and_then(Coded::member)
    }
}

/// Share of an activity going to a recipient region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionPercentage {
    pub region: Option<Coded<Region>>,
    pub percentage: Option<Decimal>,
    pub text: Option<String>,
}

impl RegionPercentage {
    #[must_use]
    pub fn region(&self) -> Option<Region> {
        self.region.as_ref().and_then(Coded::member)
    }
}

/// One aid activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    /// Globally unique activity identifier.
    pub iati_identifier: String,

    pub title: Option<String>,
    pub description: Option<String>,

    pub reporting_org: Option<Organisation>,
    pub participating_orgs: Vec<ParticipatingOrganisation>,

    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,

    pub recipient_country_percentages: Vec<CountryPercentage>,
    pub recipient_region_percentages: Vec<RegionPercentage>,
    pub sector_percentages: Vec<SectorPercentage>,

    pub start_planned: Option<NaiveDate>,
    pub start_actual: Option<NaiveDate>,
    pub end_planned: Option<NaiveDate>,
    pub end_actual: Option<NaiveDate>,

    pub default_currency: Option<Coded<Currency>>,
    pub default_language: Option<String>,
    pub activity_status: Option<ActivityStatus>,

    /// `last-updated-datetime` as published.
    pub last_updated: Option<String>,

    pub hierarchy: Option<i64>,

    pub websites: Vec<String>,

    /// Canonical XML of the source `iati-activity` element.
    #[serde(skip)]
    pub raw_xml: Vec<u8>,
}

impl Activity {
    /// The default currency, if it resolved.
    #[must_use]
    pub fn default_currency(&self) -> Option<Currency> {
        self.default_currency.as_ref().and_then(Coded::member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(amount: i64) -> MoneyValue {
        MoneyValue {
            date: NaiveDate::from_ymd_opt(2009, 10, 1),
            amount: Decimal::from(amount),
            currency: Some(Currency::UsDollar.into()),
        }
    }

    #[test]
    fn test_transaction_accessors() {
        let transaction = Transaction {
            transaction_type: TransactionType::Commitment,
            value: money(3_991_675),
            date: None,
            reference: None,
            provider_org: None,
            receiver_org: None,
            description: None,
            flow_type: None,
            finance_type: None,
            aid_type: None,
            tied_status: None,
            disbursement_channel: None,
        };

        assert_eq!(transaction.value_amount(), Decimal::from(3_991_675));
        assert_eq!(transaction.value_currency(), Some(Currency::UsDollar));
        assert_eq!(transaction.value_date(), NaiveDate::from_ymd_opt(2009, 10, 1));
    }

    #[test]
    fn test_organisation_serialization() {
        let org = Organisation {
            reference: Some("47045".to_string()),
            org_type: Some(OrganisationType::Multilateral),
            text: None,
        };
        assert_eq!(
            serde_json::to_string(&org).unwrap(),
            r#"{"ref":"47045","type":"40","text":null}"#
        );
    }

    #[test]
    fn test_budget_serializes_amount_as_string() {
        let budget = Budget {
            budget_type: BudgetType::Original,
            period_start: None,
            period_end: NaiveDate::from_ymd_opt(2010, 3, 31),
            value: money(1_840_852),
        };
        let json = serde_json::to_value(&budget).unwrap();
        assert_eq!(json["type"], "1");
        assert_eq!(json["value"]["amount"], "1840852");
        assert_eq!(json["period_end"], "2010-03-31");
        assert_eq!(json["value"]["currency"]["raw"], "USD");
    }

    #[test]
    fn test_unresolved_currency_keeps_code() {
        let value = MoneyValue {
            date: None,
            amount: Decimal::from(50),
            currency: Some(Coded {
                raw: "PHP".to_string(),
                member: None,
            }),
        };

        assert_eq!(value.currency(), None);
        assert_eq!(value.currency_code(), Some("PHP"));
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["currency"]["raw"], "PHP");
        assert!(json["currency"]["member"].is_null());
    }
}
