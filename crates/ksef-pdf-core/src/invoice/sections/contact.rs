//! Party contact details.

use crate::models::content::ContentNode;
use crate::models::document::SchemaVariant;
use crate::xml::XmlElement;

/// Build the "Dane kontaktowe" group of a party.
///
/// FA(1) keeps `Email` and `Telefon` directly on the party, both repeatable.
/// Later revisions group them in repeated `DaneKontaktowe` records.
pub fn build_contacts(party: &XmlElement, variant: SchemaVariant) -> Option<ContentNode> {
    let lines = match variant {
        SchemaVariant::Fa1 => contact_lines(party),
        SchemaVariant::Fa2 | SchemaVariant::Fa3 => party
            .children("DaneKontaktowe")
            .into_iter()
            .flat_map(contact_lines)
            .collect(),
    };
    ContentNode::section("Dane kontaktowe", lines)
}

fn contact_lines(record: &XmlElement) -> Vec<ContentNode> {
    let emails = record
        .texts("Email")
        .into_iter()
        .filter_map(|email| ContentNode::label_text("Email: ", Some(email)));
    let phones = record
        .texts("Telefon")
        .into_iter()
        .filter_map(|phone| ContentNode::label_text("Tel.: ", Some(phone)));
    emails.chain(phones).collect()
}
