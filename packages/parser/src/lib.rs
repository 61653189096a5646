//! IATI Parser - Tolerant extraction of typed activities from IATI XML.
//!
//! Publishers of IATI activity files conform to the standard to varying
//! degrees. This crate turns their documents into typed records, deciding
//! per field whether a missing or malformed value is defaulted, left empty,
//! excludes its record, or fails the activity.
//!
//! # Example
//!
//! ```
//! use iati_parser::{first_activity, Input};
//! use iati_parser::codelist::TransactionType;
//!
//! let xml = r#"<iati-activities>
//!   <iati-activity default-currency="USD">
//!     <iati-identifier>47045-ARM-202-G05-H-00</iati-identifier>
//!     <transaction>
//!       <transaction-type code="C"/>
//!       <value value-date="2009-10-01">3,991,675</value>
//!     </transaction>
//!   </iati-activity>
//! </iati-activities>"#;
//!
//! let activity = first_activity(Input::Text(xml)).unwrap();
//! assert_eq!(activity.iati_identifier, "47045-ARM-202-G05-H-00");
//! assert_eq!(activity.transactions[0].transaction_type, TransactionType::Commitment);
//! ```
//!
//! # Architecture
//!
//! The parser is organized into several modules:
//!
//! - [`config`]: Constants and parser settings
//! - [`error`]: Error types and Result alias
//! - [`types`]: Typed records (Activity, Transaction, Budget, etc.)
//! - [`normalize`]: Field lookup and tolerant number/date parsing
//! - [`codelist`]: Vocabularies and the code/label resolver
//! - [`policy`]: Per-field inclusion policy
//! - [`extract`]: Extractors for organisations, transactions, budgets and allocations
//! - [`activity`]: Assembly of one activity
//! - [`document`]: Input decoding and the lazy activity iterator
//! - [`xml`]: XML navigation and canonical serialization
//! - [`cli`]: Command-line interface

pub mod activity;
pub mod cli;
pub mod codelist;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod policy;
pub mod types;
pub mod xml;

// Re-export the document entry points
pub use document::{collect_activities, first_activity, Activities, Input, ParseReport, Parser};

// Re-export commonly used items
pub use codelist::{Codelists, Coded};
pub use config::ParserConfig;
pub use document::TextEncoding;
pub use error::{ParseError, Result};
pub use types::{
    Activity, Budget, CountryPercentage, MoneyValue, Organisation, ParticipatingOrganisation,
    RegionPercentage, SectorPercentage, Transaction, TransactionOrganisation,
};
