//! Data of the invoice being corrected.

use crate::models::content::{BorderStyle, Cell, ColumnWidth, ContentNode, Table};
use crate::xml::XmlElement;

use super::present;

/// `TypKorekty` label.
fn correction_type(code: &str) -> Option<&'static str> {
    match code.trim() {
        "1" => Some("Korekta skutkująca w dacie ujęcia faktury pierwotnej"),
        "2" => Some("Korekta skutkująca w dacie wystawienia faktury korygującej"),
        "3" => Some("Korekta skutkująca w dacie innej"),
        _ => None,
    }
}

/// Build the "Dane faktury korygowanej" section of a correction invoice.
pub fn build_correction(fa: &XmlElement) -> Option<ContentNode> {
    let mut children = present([
        ContentNode::label_text("Przyczyna korekty: ", fa.text("PrzyczynaKorekty")),
        ContentNode::label_text(
            "Typ skutku korekty: ",
            fa.text("TypKorekty").and_then(correction_type),
        ),
        ContentNode::label_text("Okres korekty: ", fa.text("OkresFaKorygowanej")),
    ]);

    let corrected = fa.children("DaneFaKorygowanej");
    if !corrected.is_empty() {
        let header: Vec<Cell> = ["Data wystawienia", "Numer faktury", "Numer KSeF"]
            .into_iter()
            .map(Cell::caption)
            .collect();
        let body = corrected.iter().map(|invoice| {
            ["DataWystFaKorygowanej", "NrFaKorygowanej", "NrKSeFFaKorygowanej"]
                .iter()
                .map(|field| Cell::text(invoice.text(field).unwrap_or_default()))
                .collect::<Vec<_>>()
        });
        children.push(ContentNode::Table(Table {
            rows: std::iter::once(header).chain(body).collect(),
            widths: vec![ColumnWidth::Auto, ColumnWidth::Star, ColumnWidth::Star],
            border: BorderStyle::Grid,
        }));
    }

    ContentNode::section("Dane faktury korygowanej", children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correction_section() {
        let corrected = |number: &str| {
            XmlElement::new()
                .with("DataWystFaKorygowanej", XmlElement::leaf("2025-01-02"))
                .with("NrFaKorygowanej", XmlElement::leaf(number))
        };
        let fa = XmlElement::new()
            .with("PrzyczynaKorekty", XmlElement::leaf("Błędna cena"))
            .with("TypKorekty", XmlElement::leaf("2"))
            .with("DaneFaKorygowanej", corrected("FV/1/2025"))
            .with("DaneFaKorygowanej", corrected("FV/2/2025"));

        let node = build_correction(&fa).unwrap();
        assert_eq!(node.find_value("Przyczyna korekty: "), Some("Błędna cena"));
        assert_eq!(
            node.find_value("Typ skutku korekty: "),
            Some("Korekta skutkująca w dacie wystawienia faktury korygującej")
        );
        let text = node.plain_text();
        assert!(text.contains(&"FV/2/2025".to_string()));
    }

    #[test]
    fn test_nothing_to_correct() {
        assert_eq!(build_correction(&XmlElement::new()), None);
    }
}
