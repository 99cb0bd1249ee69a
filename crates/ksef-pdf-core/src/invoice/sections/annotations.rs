//! Invoice annotations (`Fa/Adnotacje`).

use crate::models::content::{ContentNode, TextStyle};
use crate::models::document::SchemaVariant;
use crate::xml::XmlElement;

use super::present;

/// Flags printed whenever they are set to `1`, identical in every revision.
const FLAGS: &[(&str, &str)] = &[
    ("P_16", "Metoda kasowa"),
    ("P_17", "Samofakturowanie"),
    ("P_18", "Odwrotne obciążenie"),
    ("P_18A", "Mechanizm podzielonej płatności"),
    ("P_23", "Procedura trójstronna uproszczona"),
];

/// Margin procedure sub-types.
const MARGIN_TYPES: &[(&str, &str)] = &[
    ("P_PMarzy_2", "Procedura marży dla biur podróży"),
    ("P_PMarzy_3_1", "Procedura marży - towary używane"),
    ("P_PMarzy_3_2", "Procedura marży - dzieła sztuki"),
    ("P_PMarzy_3_3", "Procedura marży - przedmioty kolekcjonerskie i antyki"),
];

/// Build the "Adnotacje" section from the set flags only.
pub fn build_annotations(fa: &XmlElement, variant: SchemaVariant) -> Option<ContentNode> {
    let annotations = fa.child("Adnotacje")?;

    let mut lines: Vec<ContentNode> = FLAGS
        .iter()
        .filter(|(field, _)| annotations.is_set(field))
        .map(|(_, label)| line(label))
        .collect();

    // FA(1) keeps the exemption and margin fields flat; later revisions
    // group them under `Zwolnienie` and `PMarzy`.
    let (exemption, margin) = match variant {
        SchemaVariant::Fa1 => (Some(annotations), Some(annotations)),
        SchemaVariant::Fa2 | SchemaVariant::Fa3 => {
            (annotations.child("Zwolnienie"), annotations.child("PMarzy"))
        }
    };

    if let Some(exemption) = exemption.filter(|group| group.is_set("P_19")) {
        lines.push(line("Dostawa towarów lub świadczenie usług zwolnionych od podatku"));
        let basis = ["P_19A", "P_19B", "P_19C"]
            .iter()
            .find_map(|field| exemption.text(field));
        lines.extend(present([ContentNode::label_text(
            "Podstawa zwolnienia: ",
            basis,
        )]));
    }

    if let Some(margin) = margin.filter(|group| group.is_set("P_PMarzy")) {
        let specific: Vec<ContentNode> = MARGIN_TYPES
            .iter()
            .filter(|(field, _)| margin.is_set(field))
            .map(|(_, label)| line(label))
            .collect();
        if specific.is_empty() {
            lines.push(line("Procedura marży"));
        } else {
            lines.extend(specific);
        }
    }

    ContentNode::section("Adnotacje", lines)
}

fn line(text: &str) -> ContentNode {
    ContentNode::formatted(text, &[TextStyle::Default])
}
