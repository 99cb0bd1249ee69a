//! Margin scheme (procedura marży) rate marker.
//!
//! Under the margin procedure a row may omit its VAT rate. The printout then
//! shows the literal marker in the rate column instead of an empty cell.

use crate::models::document::{InvoiceKind, SchemaVariant};
use crate::xml::{XmlElement, XmlValue};

/// Marker printed in place of the rate.
pub const MARGIN_MARKER: &str = "marża";

/// A field value to merge into a row before it is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarginOverride {
    /// Rate field receiving the marker, `P_12` or `P_12Z`.
    pub field: &'static str,
    /// Value to store.
    pub value: &'static str,
}

impl MarginOverride {
    /// Copy of `row` with the override merged in; `row` is untouched.
    pub fn apply(&self, row: &XmlElement) -> XmlElement {
        let mut merged = row.clone();
        merged.set(self.field, XmlValue::Element(XmlElement::leaf(self.value)));
        merged
    }
}

/// Decide whether a row needs the margin marker.
///
/// Only VAT-type kinds (target `P_12`) and advance kinds (target `P_12Z`)
/// qualify, only under the margin procedure, and only when both the target
/// field and its `_XII` counterpart are empty.
pub fn should_add_marza(
    kind: Option<InvoiceKind>,
    is_margin_scheme: bool,
    row: &XmlElement,
) -> Option<MarginOverride> {
    let kind = kind?;
    if !is_margin_scheme {
        return None;
    }

    let field = if kind.is_vat_type() {
        "P_12"
    } else if kind.is_advance_type() {
        "P_12Z"
    } else {
        return None;
    };

    let alternate = format!("{}_XII", field);
    if row.has(field) || row.has(&alternate) {
        return None;
    }

    Some(MarginOverride {
        field,
        value: MARGIN_MARKER,
    })
}

/// Read the margin procedure flag from `Fa/Adnotacje`.
///
/// FA(1) keeps `P_PMarzy` directly in the annotations; later revisions nest
/// it in a `PMarzy` group.
pub fn is_margin_scheme(fa: &XmlElement, variant: SchemaVariant) -> bool {
    let Some(annotations) = fa.child("Adnotacje") else {
        return false;
    };
    match variant {
        SchemaVariant::Fa1 => annotations.is_set("P_PMarzy"),
        SchemaVariant::Fa2 | SchemaVariant::Fa3 => annotations
            .child("PMarzy")
            .is_some_and(|group| group.is_set("P_PMarzy")),
    }
}
