//! Document-level models: schema variants, invoice kinds and metadata.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::content::ContentNode;

/// Invoice schema revision.
///
/// Chosen once from the document header and passed explicitly to every
/// builder; nothing below the assembler inspects field shapes to guess it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaVariant {
    /// FA(1).
    #[serde(rename = "FA (1)")]
    Fa1,
    /// FA(2).
    #[serde(rename = "FA (2)")]
    Fa2,
    /// FA(3).
    #[serde(rename = "FA (3)")]
    Fa3,
}

impl SchemaVariant {
    /// Parse the `kodSystemowy` attribute, e.g. `FA (2)`.
    pub fn from_system_code(code: &str) -> Option<Self> {
        let compact: String = code.chars().filter(|c| !c.is_whitespace()).collect();
        match compact.to_uppercase().as_str() {
            "FA(1)" => Some(SchemaVariant::Fa1),
            "FA(2)" => Some(SchemaVariant::Fa2),
            "FA(3)" => Some(SchemaVariant::Fa3),
            _ => None,
        }
    }

    /// Parse the `WariantFormularza` value.
    pub fn from_form_variant(value: &str) -> Option<Self> {
        match value.trim() {
            "1" => Some(SchemaVariant::Fa1),
            "2" => Some(SchemaVariant::Fa2),
            "3" => Some(SchemaVariant::Fa3),
            _ => None,
        }
    }

    /// Canonical system code.
    pub fn system_code(&self) -> &'static str {
        match self {
            SchemaVariant::Fa1 => "FA (1)",
            SchemaVariant::Fa2 => "FA (2)",
            SchemaVariant::Fa3 => "FA (3)",
        }
    }
}

/// Kind of input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Structured invoice (Faktura).
    Invoice,
    /// Official acknowledgement of receipt (UPO).
    Upo,
}

/// Invoice kind (`RodzajFaktury`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceKind {
    /// Basic invoice.
    Vat,
    /// Correction invoice.
    Kor,
    /// Advance payment invoice.
    Zal,
    /// Settlement invoice.
    Roz,
    /// Simplified invoice.
    Upr,
    /// Correction of an advance payment invoice.
    KorZal,
    /// Correction of a settlement invoice.
    KorRoz,
}

impl InvoiceKind {
    /// Parse a `RodzajFaktury` code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "VAT" => Some(InvoiceKind::Vat),
            "KOR" => Some(InvoiceKind::Kor),
            "ZAL" => Some(InvoiceKind::Zal),
            "ROZ" => Some(InvoiceKind::Roz),
            "UPR" => Some(InvoiceKind::Upr),
            "KOR_ZAL" => Some(InvoiceKind::KorZal),
            "KOR_ROZ" => Some(InvoiceKind::KorRoz),
            _ => None,
        }
    }

    /// Schema code.
    pub fn code(&self) -> &'static str {
        match self {
            InvoiceKind::Vat => "VAT",
            InvoiceKind::Kor => "KOR",
            InvoiceKind::Zal => "ZAL",
            InvoiceKind::Roz => "ROZ",
            InvoiceKind::Upr => "UPR",
            InvoiceKind::KorZal => "KOR_ZAL",
            InvoiceKind::KorRoz => "KOR_ROZ",
        }
    }

    /// Printed document title.
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceKind::Vat => "Faktura podstawowa",
            InvoiceKind::Kor => "Faktura korygująca",
            InvoiceKind::Zal => "Faktura zaliczkowa",
            InvoiceKind::Roz => "Faktura rozliczeniowa",
            InvoiceKind::Upr => "Faktura uproszczona",
            InvoiceKind::KorZal => "Faktura korygująca fakturę zaliczkową",
            InvoiceKind::KorRoz => "Faktura korygująca fakturę rozliczeniową",
        }
    }

    /// Kinds whose rows live in `FaWiersz` and carry the rate in `P_12`.
    pub fn is_vat_type(&self) -> bool {
        matches!(self, InvoiceKind::Vat | InvoiceKind::Kor | InvoiceKind::Roz)
    }

    /// Kinds whose rows live in `ZamowienieWiersz` and carry the rate in `P_12Z`.
    pub fn is_advance_type(&self) -> bool {
        matches!(self, InvoiceKind::Zal | InvoiceKind::KorZal)
    }

    /// Correction kinds.
    pub fn is_correction(&self) -> bool {
        matches!(
            self,
            InvoiceKind::Kor | InvoiceKind::KorZal | InvoiceKind::KorRoz
        )
    }
}

/// Values supplied by the caller rather than read from the XML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdditionalData {
    /// KSeF number assigned to the invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nr_ksef: Option<String>,

    /// Finalized verification URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

/// Summary facts extracted while assembling a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Schema revision (invoices only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<SchemaVariant>,

    /// Invoice kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<InvoiceKind>,

    /// Invoice number (`P_2`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Issue date (`P_1`), when it is a valid calendar date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,

    /// Issuer NIP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_nip: Option<String>,

    /// Buyer NIP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_nip: Option<String>,

    /// Currency code (`KodWaluty`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Amount due (`P_15`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,

    /// Number of documents acknowledged (UPO only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_count: Option<usize>,
}

/// Assembled content tree plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    /// Root section.
    pub content: ContentNode,
    /// Extracted facts.
    pub meta: DocumentMeta,
}
