//! UPO (Urzędowe Poświadczenie Odbioru) document assembly.
//!
//! The acknowledgement has a single schema, so nothing here branches on a
//! variant: a flat header table followed by one table per acknowledged
//! document.

use tracing::{debug, info};

use crate::error::{DocumentError, Result};
use crate::invoice::rules::dates::display_date_time;
use crate::invoice::rules::titles::numbered;
use crate::models::content::{ContentNode, Table, TextStyle};
use crate::models::document::{DocumentMeta, GeneratedDocument};
use crate::xml::XmlElement;

/// Root element of an acknowledgement.
pub const UPO_ROOT: &str = "Potwierdzenie";

const TITLE: &str = "Urzędowe Poświadczenie Odbioru dokumentu elektronicznego KSeF";

/// Fields of one acknowledged document, with a flag for timestamps.
const DOCUMENT_FIELDS: &[(&str, &str, bool)] = &[
    ("NipSprzedawcy", "NIP sprzedawcy", false),
    ("NumerKSeFDokumentu", "Numer KSeF dokumentu", false),
    ("NumerFaktury", "Numer faktury", false),
    ("DataWystawieniaFaktury", "Data wystawienia faktury", false),
    ("DataPrzeslaniaDokumentu", "Data przesłania do KSeF", true),
    ("DataNadaniaNumeruKSeF", "Data nadania numeru KSeF", true),
    ("SkrotDokumentu", "Wartość funkcji skrótu dokumentu", false),
    ("TrybWysylki", "Tryb wysyłki", false),
];

/// Build the content tree of an acknowledgement.
pub fn generate_upo(document: &XmlElement) -> Result<GeneratedDocument> {
    let upo = document
        .child(UPO_ROOT)
        .ok_or_else(|| DocumentError::RootElementMissing(UPO_ROOT.to_string()))?;

    let mut children = vec![ContentNode::formatted(TITLE, &[TextStyle::Title])];
    children.extend(header_table(upo));

    let documents = upo.children("Dokument");
    debug!("UPO acknowledges {} document(s)", documents.len());
    // Numbering counts only the documents that print something.
    let printable: Vec<&XmlElement> = documents
        .iter()
        .copied()
        .filter(|doc| has_fields(doc))
        .collect();
    children.extend(
        numbered("Dokument", &printable)
            .into_iter()
            .map(|(title, doc)| ContentNode::Section {
                title,
                children: vec![ContentNode::Table(Table::key_value(document_rows(doc)))],
            }),
    );

    let meta = DocumentMeta {
        issuer_nip: documents
            .first()
            .and_then(|doc| doc.text("NipSprzedawcy"))
            .map(str::to_string),
        document_count: Some(documents.len()),
        ..DocumentMeta::default()
    };

    info!(
        "Generated UPO for session {}",
        upo.text("NumerReferencyjnySesji").unwrap_or("without reference")
    );

    Ok(GeneratedDocument {
        content: ContentNode::Section {
            title: UPO_ROOT.to_string(),
            children,
        },
        meta,
    })
}

fn header_table(upo: &XmlElement) -> Option<ContentNode> {
    let auth = upo.child("Uwierzytelnienie");
    let context = auth
        .and_then(|auth| auth.child("IdKontekstu"))
        .and_then(context_identifier);

    let pairs = [
        ("Nazwa podmiotu przyjmującego", upo.text("NazwaPodmiotuPrzyjmujacego").map(str::to_string)),
        ("Numer referencyjny sesji", upo.text("NumerReferencyjnySesji").map(str::to_string)),
        ("Identyfikator kontekstu", context),
        (
            "Skrót dokumentu uwierzytelniającego",
            auth.and_then(|auth| auth.text("SkrotDokumentuUwierzytelniajacego"))
                .map(str::to_string),
        ),
        ("Nazwa struktury logicznej", upo.text("NazwaStrukturyLogicznej").map(str::to_string)),
        ("Kod formularza", upo.text("KodFormularza").map(str::to_string)),
    ];

    let rows: Vec<(String, String)> = pairs
        .into_iter()
        .filter_map(|(label, value)| value.map(|value| (label.to_string(), value)))
        .collect();
    (!rows.is_empty()).then(|| ContentNode::Table(Table::key_value(rows)))
}

/// `IdKontekstu` holds exactly one typed identifier, e.g. `<Nip>`.
fn context_identifier(context: &XmlElement) -> Option<String> {
    context
        .children
        .iter()
        .find_map(|(kind, _)| context.text(kind).map(|value| format!("{}: {}", kind, value)))
}

fn has_fields(doc: &XmlElement) -> bool {
    DOCUMENT_FIELDS
        .iter()
        .any(|(field, _, _)| doc.text(field).is_some())
}

fn document_rows(doc: &XmlElement) -> Vec<(String, String)> {
    DOCUMENT_FIELDS
        .iter()
        .filter_map(|(field, label, timestamp)| {
            let raw = doc.text(field)?;
            let value = if *timestamp {
                display_date_time(raw)
            } else {
                raw.to_string()
            };
            Some((label.to_string(), value))
        })
        .collect()
}
