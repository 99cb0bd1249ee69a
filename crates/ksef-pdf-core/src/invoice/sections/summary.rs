//! Totals per tax rate and the amount due.

use rust_decimal::Decimal;

use crate::invoice::rules::amounts::{
    display_amount, display_amount_with_currency, format_polish_amount, parse_amount,
};
use crate::models::content::{BorderStyle, Cell, ColumnWidth, ContentNode, Table};
use crate::models::document::SchemaVariant;
use crate::xml::XmlElement;

use super::present;

/// A rate bucket: net field, tax field (if the bucket carries tax) and label.
type Bucket = (&'static str, Option<&'static str>, &'static str);

const TAXED: &[Bucket] = &[
    ("P_13_1", Some("P_14_1"), "23% lub 22%"),
    ("P_13_2", Some("P_14_2"), "8% lub 7%"),
    ("P_13_3", Some("P_14_3"), "5%"),
    ("P_13_4", Some("P_14_4"), "Ryczałt dla taksówek"),
    ("P_13_5", Some("P_14_5"), "Procedura OSS"),
];

const ZERO_FA1: &[Bucket] = &[("P_13_6", None, "0%")];

const ZERO_FA2: &[Bucket] = &[
    ("P_13_6_1", None, "0% (krajowe)"),
    ("P_13_6_2", None, "0% WDT"),
    ("P_13_6_3", None, "0% eksport"),
];

const UNTAXED: &[Bucket] = &[
    ("P_13_7", None, "Zwolnione z podatku"),
    ("P_13_8", None, "Poza terytorium kraju"),
    ("P_13_9", None, "Usługi z art. 100 ust. 1 pkt 4"),
    ("P_13_10", None, "Odwrotne obciążenie"),
    ("P_13_11", None, "Procedura marży"),
];

/// Build the "Podsumowanie" section.
pub fn build_summary(fa: &XmlElement, variant: SchemaVariant) -> Option<ContentNode> {
    let zero = match variant {
        SchemaVariant::Fa1 => ZERO_FA1,
        SchemaVariant::Fa2 | SchemaVariant::Fa3 => ZERO_FA2,
    };
    let currency = fa.text("KodWaluty");

    let rows: Vec<Vec<Cell>> = TAXED
        .iter()
        .chain(zero)
        .chain(UNTAXED)
        .filter_map(|bucket| bucket_row(fa, bucket))
        .collect();

    let table = (!rows.is_empty()).then(|| {
        let header: Vec<Cell> = ["Stawka", "Kwota netto", "Kwota podatku", "Kwota brutto"]
            .into_iter()
            .map(Cell::caption)
            .collect();
        ContentNode::Table(Table {
            rows: std::iter::once(header).chain(rows).collect(),
            widths: vec![
                ColumnWidth::Star,
                ColumnWidth::Auto,
                ColumnWidth::Auto,
                ColumnWidth::Auto,
            ],
            border: BorderStyle::Grid,
        })
    });

    let total = fa
        .text("P_15")
        .map(|raw| display_amount_with_currency(raw, currency));

    ContentNode::section(
        "Podsumowanie",
        present([
            table,
            ContentNode::label_text("Kwota należności ogółem: ", total.as_deref()),
        ]),
    )
}

fn bucket_row(fa: &XmlElement, (net_field, tax_field, label): &Bucket) -> Option<Vec<Cell>> {
    let net = fa.text(net_field);
    let tax = tax_field.and_then(|field| fa.text(field));
    if net.is_none() && tax.is_none() {
        return None;
    }

    let gross = [net, tax]
        .into_iter()
        .flatten()
        .map(parse_amount)
        .try_fold(Decimal::ZERO, |sum, amount| amount.map(|amount| sum + amount))
        .map(format_polish_amount)
        .unwrap_or_default();

    Some(vec![
        Cell::text(*label),
        Cell::text(net.map(display_amount).unwrap_or_default()),
        Cell::text(tax.map(display_amount).unwrap_or_default()),
        Cell::text(gross),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(row: &[Cell]) -> Vec<&str> {
        row.iter().map(|cell| cell.text.as_str()).collect()
    }

    fn table(node: &ContentNode) -> &Table {
        match &node.children()[0] {
            ContentNode::Table(table) => table,
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_rows_and_total() {
        let fa = XmlElement::new()
            .with("KodWaluty", XmlElement::leaf("PLN"))
            .with("P_13_1", XmlElement::leaf("1000"))
            .with("P_14_1", XmlElement::leaf("230"))
            .with("P_13_7", XmlElement::leaf("50"))
            .with("P_15", XmlElement::leaf("1280"));

        let node = build_summary(&fa, SchemaVariant::Fa2).unwrap();
        let table = table(&node);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(
            texts(&table.rows[1]),
            vec!["23% lub 22%", "1 000,00", "230,00", "1 230,00"]
        );
        assert_eq!(texts(&table.rows[2]), vec!["Zwolnione z podatku", "50,00", "", "50,00"]);
        assert_eq!(node.find_value("Kwota należności ogółem: "), Some("1 280,00 PLN"));
    }

    #[test]
    fn test_zero_rate_fields_differ_per_variant() {
        let fa = XmlElement::new()
            .with("P_13_6", XmlElement::leaf("10"))
            .with("P_13_6_2", XmlElement::leaf("20"));

        let fa1 = build_summary(&fa, SchemaVariant::Fa1).unwrap();
        assert_eq!(texts(&table(&fa1).rows[1])[0], "0%");
        assert_eq!(table(&fa1).rows.len(), 2);

        let fa3 = build_summary(&fa, SchemaVariant::Fa3).unwrap();
        assert_eq!(texts(&table(&fa3).rows[1])[0], "0% WDT");
        assert_eq!(table(&fa3).rows.len(), 2);
    }

    #[test]
    fn test_total_only() {
        let fa = XmlElement::new().with("P_15", XmlElement::leaf("99.5"));
        let node = build_summary(&fa, SchemaVariant::Fa1).unwrap();
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.find_value("Kwota należności ogółem: "), Some("99,50"));
    }

    #[test]
    fn test_nothing_to_sum() {
        assert_eq!(build_summary(&XmlElement::new(), SchemaVariant::Fa2), None);
    }
}
