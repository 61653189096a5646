//! Lookup tables and the codelist resolver.

use std::collections::HashMap;

use serde::Serialize;

use super::Codelist;

/// Capability to resolve a raw code or label to a vocabulary member.
pub trait Vocabulary {
    /// Member type produced by a successful lookup.
    type Member;

    /// Vocabulary name used in log messages.
    fn name(&self) -> &str;

    /// Resolve trimmed, non-empty input; `None` when nothing matches.
    fn resolve(&self, raw: &str) -> Option<Self::Member>;
}

/// Immutable code/label lookup table for one vocabulary.
///
/// Codes match exactly; labels match case-insensitively.
#[derive(Debug, Clone)]
pub struct CodelistTable<M> {
    name: &'static str,
    by_code: HashMap<String, M>,
    by_label: HashMap<String, M>,
}

impl<M: Copy> CodelistTable<M> {
    /// Create an empty table.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            by_code: HashMap::new(),
            by_label: HashMap::new(),
        }
    }

    /// Build a table from `(code, label, member)` entries.
    #[must_use]
    pub fn from_entries<'e>(
        name: &'static str,
        entries: impl IntoIterator<Item = (&'e str, &'e str, M)>,
    ) -> Self {
        entries
            .into_iter()
            .fold(Self::new(name), |table, (code, label, member)| {
                table.with_entry(code, label, member)
            })
    }

    /// Add an entry.
    ///
    /// The first entry registered for a code or label wins.
    #[must_use]
    pub fn with_entry(mut self, code: &str, label: &str, member: M) -> Self {
        self.by_code.entry(code.to_string()).or_insert(member);
        self.by_label
            .entry(label.to_lowercase())
            .or_insert(member);
        self
    }

    /// Add an extra machine code for an existing member.
    ///
    /// Used for publishers mixing codelist versions (e.g. numeric and
    /// lettered transaction types).
    #[must_use]
    pub fn with_alias(mut self, code: &str, member: M) -> Self {
        self.by_code.entry(code.to_string()).or_insert(member);
        self
    }

    /// Number of distinct codes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl<M: Codelist> CodelistTable<M> {
    /// Table holding every member of a built-in vocabulary.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_entries(
            M::NAME,
            M::all().iter().map(|m| (m.code(), m.label(), *m)),
        )
    }
}

impl<M: Copy> Vocabulary for CodelistTable<M> {
    type Member = M;

    fn name(&self) -> &str {
        self.name
    }

    fn resolve(&self, raw: &str) -> Option<M> {
        self.by_code
            .get(raw)
            .or_else(|| self.by_label.get(&raw.to_lowercase()))
            .copied()
    }
}

/// A coded value that keeps the raw input next to the resolved member.
///
/// Out-of-vocabulary input is not an error: `member` is `None` and `raw`
/// still carries what the publisher wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coded<M> {
    /// The code or label as found in the document, trimmed.
    pub raw: String,

    /// The resolved member, if any.
    pub member: Option<M>,
}

impl<M: Copy> Coded<M> {
    /// The raw code string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.raw
    }

    /// The resolved member, if any.
    #[must_use]
    pub fn member(&self) -> Option<M> {
        self.member
    }

    /// Whether the raw input matched the vocabulary.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.member.is_some()
    }
}

impl<M: Codelist> From<M> for Coded<M> {
    fn from(member: M) -> Self {
        Self {
            raw: member.code().to_string(),
            member: Some(member),
        }
    }
}

/// Resolve a raw code or label against a vocabulary.
///
/// Exact code match first, then case-insensitive label match. Empty input
/// and unmatched input both yield an unresolved [`Coded`].
///
/// # Examples
/// ```
/// use iati_parser::codelist::{resolve, CodelistTable, OrganisationRole};
///
/// let roles = CodelistTable::<OrganisationRole>::standard();
/// assert_eq!(resolve(&roles, "4").member, Some(OrganisationRole::Implementing));
/// assert_eq!(resolve(&roles, "implementing").member, Some(OrganisationRole::Implementing));
/// assert_eq!(resolve(&roles, "Sponsor").member, None);
/// ```
pub fn resolve<V: Vocabulary>(vocabulary: &V, raw: &str) -> Coded<V::Member> {
    let raw = raw.trim();
    let member = if raw.is_empty() {
        None
    } else {
        vocabulary.resolve(raw)
    };

    if member.is_none() && !raw.is_empty() {
        tracing::debug!(vocabulary = vocabulary.name(), raw, "Unresolved code");
    }

    Coded {
        raw: raw.to_string(),
        member,
    }
}
