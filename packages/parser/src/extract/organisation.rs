//! Reporting and participating organisations.

use roxmltree::Node;

use super::coded_field;
use crate::codelist::Codelists;
use crate::error::Result;
use crate::normalize::lookup;
use crate::policy::{self, Field, Outcome};
use crate::types::{Organisation, ParticipatingOrganisation};
use crate::xml::narrative_text;

/// Extract the reporting organisation. Never excluded.
///
/// # Errors
/// Only if the policy for `ReportingOrgType` propagates.
pub fn reporting_org(node: Node<'_, '_>, codelists: &Codelists) -> Result<Organisation> {
    let org_type = policy::apply(
        Field::ReportingOrgType,
        coded_field(&codelists.organisation_type, node, Field::ReportingOrgType.path()),
        || None,
    )?
    .into_option();

    Ok(Organisation {
        reference: lookup(node, "@ref"),
        org_type,
        text: narrative_text(node),
    })
}

/// Extract participating organisations, dropping entries without a usable
/// role and removing duplicates while keeping first-seen order.
///
/// # Errors
/// Only if the policy for a participating-org field propagates.
pub fn participating_orgs<'a, 'input: 'a>(
    nodes: impl IntoIterator<Item = Node<'a, 'input>>,
    codelists: &Codelists,
) -> Result<Vec<ParticipatingOrganisation>> {
    let mut orgs: Vec<ParticipatingOrganisation> = Vec::new();

    for node in nodes {
        let Some(org) = participating_org(node, codelists)? else {
            continue;
        };
        if orgs.contains(&org) {
            tracing::debug!(reference = ?org.reference, role = %org.role, "Duplicate participating org");
        } else {
            orgs.push(org);
        }
    }

    Ok(orgs)
}

fn participating_org(
    node: Node<'_, '_>,
    codelists: &Codelists,
) -> Result<Option<ParticipatingOrganisation>> {
    let role = match policy::apply(
        Field::ParticipatingOrgRole,
        coded_field(&codelists.organisation_role, node, Field::ParticipatingOrgRole.path()),
        || None,
    )? {
        Outcome::Value(role) => role,
        Outcome::Absent | Outcome::DropRecord => return Ok(None),
    };

    let org_type = policy::apply(
        Field::ParticipatingOrgType,
        coded_field(&codelists.organisation_type, node, Field::ParticipatingOrgType.path()),
        || None,
    )?
    .into_option();

    Ok(Some(ParticipatingOrganisation {
        reference: lookup(node, "@ref"),
        role,
        org_type,
        text: narrative_text(node),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codelist::{OrganisationRole, OrganisationType};
    use crate::xml::find_children;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    fn parse_orgs(xml: &str) -> Vec<ParticipatingOrganisation> {
        let doc = Document::parse(xml).unwrap();
        participating_orgs(
            find_children(doc.root_element(), "participating-org"),
            Codelists::standard(),
        )
        .unwrap()
    }

    #[test]
    fn test_reporting_org() {
        let doc = Document::parse(
            r#"<reporting-org ref="47045" type="40">The Global Fund</reporting-org>"#,
        )
        .unwrap();
        let org = reporting_org(doc.root_element(), Codelists::standard()).unwrap();

        assert_eq!(org.reference.as_deref(), Some("47045"));
        assert_eq!(org.org_type, Some(OrganisationType::Multilateral));
        assert_eq!(org.text.as_deref(), Some("The Global Fund"));
    }

    #[test]
    fn test_reporting_org_unknown_type_is_null() {
        let doc = Document::parse(r#"<reporting-org ref="GB-1" type="999"/>"#).unwrap();
        let org = reporting_org(doc.root_element(), Codelists::standard()).unwrap();

        assert_eq!(org.reference.as_deref(), Some("GB-1"));
        assert_eq!(org.org_type, None);
        assert_eq!(org.text, None);
    }

    #[test]
    fn test_role_label_case_insensitive() {
        let orgs = parse_orgs(
            r#"<iati-activity>
                <participating-org role="implementing" ref="A">Agency</participating-org>
                <participating-org role="Implementing" ref="B">Agency</participating-org>
                <participating-org role="4" ref="C">Agency</participating-org>
            </iati-activity>"#,
        );

        assert_eq!(orgs.len(), 3);
        assert!(orgs.iter().all(|o| o.role == OrganisationRole::Implementing));
    }

    #[test]
    fn test_unresolvable_role_is_dropped() {
        let orgs = parse_orgs(
            r#"<iati-activity>
                <participating-org role="Funding" ref="47045" type="40">Global Fund</participating-org>
                <participating-org role="Sponsor" ref="X">Unknown</participating-org>
                <participating-org ref="Y">No role</participating-org>
            </iati-activity>"#,
        );

        assert_eq!(
            orgs,
            vec![ParticipatingOrganisation {
                reference: Some("47045".to_string()),
                role: OrganisationRole::Funding,
                org_type: Some(OrganisationType::Multilateral),
                text: Some("Global Fund".to_string()),
            }]
        );
    }

    #[test]
    fn test_duplicates_removed_in_order() {
        let orgs = parse_orgs(
            r#"<iati-activity>
                <participating-org role="Funding" ref="GB-1">DFID</participating-org>
                <participating-org role="Extending" ref="GB-1">DFID</participating-org>
                <participating-org role="Funding" ref="GB-1">DFID</participating-org>
            </iati-activity>"#,
        );

        let roles: Vec<_> = orgs.iter().map(|o| o.role).collect();
        assert_eq!(roles, vec![OrganisationRole::Funding, OrganisationRole::Extending]);
    }

    #[test]
    fn test_narrative_text() {
        let orgs = parse_orgs(
            r#"<iati-activity>
                <participating-org role="1"><narrative>Department for International Development</narrative></participating-org>
            </iati-activity>"#,
        );
        assert_eq!(
            orgs[0].text.as_deref(),
            Some("Department for International Development")
        );
    }
}
