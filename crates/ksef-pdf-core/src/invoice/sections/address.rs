//! Postal addresses.
//!
//! FA(1) splits an address into a domestic (`AdresPol`) or foreign
//! (`AdresZagr`) block with one field per component; it is printed as a
//! caption/value table. FA(2) and FA(3) carry a country code and up to two
//! free-form lines, printed as plain lines.

use crate::invoice::rules::labels::country_name;
use crate::models::content::{ContentNode, Table, TextStyle};
use crate::models::document::SchemaVariant;
use crate::xml::XmlElement;

use super::rows;

/// Components of an FA(1) address, in print order.
const STRUCTURED_FIELDS: &[(&str, &str)] = &[
    ("Ulica", "Ulica"),
    ("NrDomu", "Numer domu"),
    ("NrLokalu", "Numer lokalu"),
    ("KodPocztowy", "Kod pocztowy"),
    ("Miejscowosc", "Miejscowość"),
    ("Poczta", "Poczta"),
    ("Gmina", "Gmina"),
    ("Powiat", "Powiat"),
    ("Wojewodztwo", "Województwo"),
];

/// Build an address group titled `title`, or nothing for an empty address.
pub fn build_address(
    title: &str,
    address: &XmlElement,
    variant: SchemaVariant,
) -> Option<ContentNode> {
    let children = match variant {
        SchemaVariant::Fa1 => structured_address(address).into_iter().collect(),
        SchemaVariant::Fa2 | SchemaVariant::Fa3 => line_address(address),
    };
    ContentNode::section(title, children)
}

fn structured_address(address: &XmlElement) -> Option<ContentNode> {
    let block = address
        .child("AdresPol")
        .or_else(|| address.child("AdresZagr"))
        .unwrap_or(address);

    let mut pairs = vec![("Kraj", block.text("KodKraju").map(country_name))];
    pairs.extend(
        STRUCTURED_FIELDS
            .iter()
            .map(|(field, label)| (*label, block.text(field).map(str::to_string))),
    );
    pairs.push(("GLN", block.text("GLN").map(str::to_string)));

    let entries = rows(pairs);
    (!entries.is_empty()).then(|| ContentNode::Table(Table::key_value(entries)))
}

fn line_address(address: &XmlElement) -> Vec<ContentNode> {
    let mut lines: Vec<ContentNode> = ["AdresL1", "AdresL2"]
        .iter()
        .filter_map(|field| address.text(field))
        .map(|line| ContentNode::formatted(line, &[TextStyle::Default]))
        .collect();

    if let Some(code) = address.text("KodKraju") {
        lines.push(ContentNode::formatted(country_name(code), &[TextStyle::Default]));
    }
    lines.extend(ContentNode::label_text("GLN: ", address.text("GLN")));
    lines
}
