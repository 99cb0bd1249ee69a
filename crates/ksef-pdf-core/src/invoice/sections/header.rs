//! Document title and invoice identification.

use crate::models::content::{ContentNode, TextStyle};
use crate::models::document::{AdditionalData, InvoiceKind};
use crate::xml::XmlElement;

use super::present;

/// Title, numbers and dates at the top of the invoice.
pub fn build_header(
    fa: &XmlElement,
    kind: Option<InvoiceKind>,
    additional: &AdditionalData,
) -> Vec<ContentNode> {
    let title = kind.map(|kind| kind.label()).unwrap_or("Faktura");

    let period = fa.child("OkresFa").and_then(|period| {
        match (period.text("P_6_Od"), period.text("P_6_Do")) {
            (Some(from), Some(to)) => Some(format!("od {} do {}", from, to)),
            (Some(from), None) => Some(format!("od {}", from)),
            (None, Some(to)) => Some(format!("do {}", to)),
            (None, None) => None,
        }
    });

    let mut nodes = vec![ContentNode::formatted(title, &[TextStyle::Title])];
    nodes.extend(present([
        ContentNode::label_text("Numer faktury: ", fa.text("P_2")),
        ContentNode::label_text("Numer KSeF: ", additional.nr_ksef.as_deref()),
        ContentNode::label_text("Data wystawienia: ", fa.text("P_1")),
        ContentNode::label_text("Miejsce wystawienia: ", fa.text("P_1M")),
        ContentNode::label_text("Data dokonania lub zakończenia dostawy: ", fa.text("P_6")),
        ContentNode::label_text("Okres, którego dotyczy faktura: ", period.as_deref()),
        ContentNode::label_text("Kod waluty: ", fa.text("KodWaluty")),
    ]));
    nodes
}
