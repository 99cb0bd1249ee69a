//! Invoice rows table.

use std::borrow::Cow;

use tracing::debug;

use crate::invoice::rules::amounts::display_amount;
use crate::invoice::rules::margin::should_add_marza;
use crate::invoice::rules::rates::display_rate;
use crate::models::content::{BorderStyle, Cell, ColumnWidth, ContentNode, Table};
use crate::models::document::{InvoiceKind, SchemaVariant};
use crate::xml::XmlElement;

use super::present;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Plain,
    Amount,
    Rate,
}

#[derive(Debug, Clone, Copy)]
struct Column {
    field: &'static str,
    header: &'static str,
    format: Format,
}

const fn column(field: &'static str, header: &'static str, format: Format) -> Column {
    Column {
        field,
        header,
        format,
    }
}

/// `FaWiersz` columns, in print order.
const INVOICE_COLUMNS: &[Column] = &[
    column("NrWierszaFa", "Lp.", Format::Plain),
    column("P_6A", "Data dostawy", Format::Plain),
    column("P_7", "Nazwa towaru lub usługi", Format::Plain),
    column("Indeks", "Indeks", Format::Plain),
    column("GTIN", "GTIN", Format::Plain),
    column("PKWiU", "PKWiU", Format::Plain),
    column("CN", "CN", Format::Plain),
    column("PKOB", "PKOB", Format::Plain),
    column("P_8A", "Miara", Format::Plain),
    column("P_8B", "Ilość", Format::Plain),
    column("P_9A", "Cena jedn. netto", Format::Amount),
    column("P_9B", "Cena jedn. brutto", Format::Amount),
    column("P_10", "Rabat", Format::Amount),
    column("P_11", "Wartość sprzedaży netto", Format::Amount),
    column("P_11A", "Wartość sprzedaży brutto", Format::Amount),
    column("P_11Vat", "Kwota VAT", Format::Amount),
    column("P_12", "Stawka podatku", Format::Rate),
    column("P_12_XII", "Stawka podatku OSS", Format::Rate),
    column("GTU", "GTU", Format::Plain),
    column("Procedura", "Procedura", Format::Plain),
    column("KursWaluty", "Kurs waluty", Format::Plain),
];

/// `ZamowienieWiersz` columns of advance invoices.
const ORDER_COLUMNS: &[Column] = &[
    column("NrWierszaZam", "Lp.", Format::Plain),
    column("P_7Z", "Nazwa towaru lub usługi", Format::Plain),
    column("IndeksZ", "Indeks", Format::Plain),
    column("GTINZ", "GTIN", Format::Plain),
    column("PKWiUZ", "PKWiU", Format::Plain),
    column("CNZ", "CN", Format::Plain),
    column("PKOBZ", "PKOB", Format::Plain),
    column("P_8AZ", "Miara", Format::Plain),
    column("P_8BZ", "Ilość", Format::Plain),
    column("P_9AZ", "Cena jedn. netto", Format::Amount),
    column("P_11NettoZ", "Wartość netto", Format::Amount),
    column("P_11VatZ", "Kwota VAT", Format::Amount),
    column("P_12Z", "Stawka podatku", Format::Rate),
    column("P_12Z_XII", "Stawka podatku OSS", Format::Rate),
    column("GTUZ", "GTU", Format::Plain),
    column("ProceduraZ", "Procedura", Format::Plain),
];

/// Build the "Pozycje" section.
///
/// Advance invoices list ordered goods (`Zamowienie`) instead of regular
/// rows. The margin marker is merged into each row before it is printed,
/// and a column is printed only when at least one row fills it.
pub fn build_line_items(
    fa: &XmlElement,
    kind: Option<InvoiceKind>,
    variant: SchemaVariant,
    is_margin_scheme: bool,
) -> Option<ContentNode> {
    let advance = kind.is_some_and(|kind| kind.is_advance_type());
    let (source, columns) = if advance {
        (order_rows(fa), ORDER_COLUMNS)
    } else {
        (invoice_rows(fa, variant), INVOICE_COLUMNS)
    };

    let rows: Vec<Cow<'_, XmlElement>> = source
        .into_iter()
        .map(|row| match should_add_marza(kind, is_margin_scheme, row) {
            Some(marker) => Cow::Owned(marker.apply(row)),
            None => Cow::Borrowed(row),
        })
        .collect();
    debug!("Building {} invoice rows", rows.len());

    let order_value = advance
        .then(|| fa.path_text(&["Zamowienie", "WartoscZamowienia"]))
        .flatten()
        .map(display_amount);

    ContentNode::section(
        "Pozycje",
        present([
            rows_table(&rows, columns).map(ContentNode::Table),
            ContentNode::label_text("Wartość zamówienia lub umowy: ", order_value.as_deref()),
        ]),
    )
}

fn invoice_rows(fa: &XmlElement, variant: SchemaVariant) -> Vec<&XmlElement> {
    match variant {
        SchemaVariant::Fa1 => fa
            .child("FaWiersze")
            .map(|rows| rows.children("FaWiersz"))
            .unwrap_or_default(),
        SchemaVariant::Fa2 | SchemaVariant::Fa3 => fa.children("FaWiersz"),
    }
}

fn order_rows(fa: &XmlElement) -> Vec<&XmlElement> {
    fa.child("Zamowienie")
        .map(|order| order.children("ZamowienieWiersz"))
        .unwrap_or_default()
}

fn rows_table(rows: &[Cow<'_, XmlElement>], columns: &[Column]) -> Option<Table> {
    if rows.is_empty() {
        return None;
    }

    let visible: Vec<&Column> = columns
        .iter()
        .filter(|column| rows.iter().any(|row| row.has(column.field)))
        .collect();

    let header: Vec<Cell> = visible
        .iter()
        .map(|column| Cell::caption(column.header))
        .collect();
    let body = rows.iter().map(|row| {
        visible
            .iter()
            .map(|column| Cell::text(cell_value(row, column)))
            .collect::<Vec<_>>()
    });

    Some(Table {
        rows: std::iter::once(header).chain(body).collect(),
        widths: visible
            .iter()
            .map(|column| match column.field {
                "P_7" | "P_7Z" => ColumnWidth::Star,
                _ => ColumnWidth::Auto,
            })
            .collect(),
        border: BorderStyle::Grid,
    })
}

fn cell_value(row: &XmlElement, column: &Column) -> String {
    let Some(raw) = row.text(column.field) else {
        return String::new();
    };
    match column.format {
        Format::Plain => raw.to_string(),
        Format::Amount => display_amount(raw),
        Format::Rate => display_rate(raw),
    }
}
