//! Footer (`Stopka`): free text and company registry numbers.

use crate::models::content::{ContentNode, Table, TextStyle};
use crate::xml::XmlElement;

use super::rows;

/// Build the "Stopka" section.
pub fn build_footer(faktura: &XmlElement) -> Option<ContentNode> {
    let footer = faktura.child("Stopka")?;

    let mut children: Vec<ContentNode> = footer
        .children("Informacje")
        .into_iter()
        .flat_map(|info| info.texts("StopkaFaktury"))
        .map(|text| ContentNode::formatted(text, &[TextStyle::Small]))
        .collect();

    for registry in footer.children("Rejestry") {
        let entries = rows([
            ("Pełna nazwa", registry.text("PelnaNazwa").map(str::to_string)),
            ("KRS", registry.text("KRS").map(str::to_string)),
            ("REGON", registry.text("REGON").map(str::to_string)),
            ("BDO", registry.text("BDO").map(str::to_string)),
        ]);
        if !entries.is_empty() {
            children.push(ContentNode::Table(Table::key_value(entries)));
        }
    }

    ContentNode::section("Stopka", children)
}
