//! Invoice document assembly.
//!
//! The schema variant is detected once from the header and threaded through
//! every section builder.

pub mod rules;
pub mod sections;

use tracing::{debug, info, warn};

use crate::error::{DocumentError, Result};
use crate::models::config::GenerationConfig;
use crate::models::content::ContentNode;
use crate::models::document::{
    AdditionalData, DocumentMeta, GeneratedDocument, InvoiceKind, SchemaVariant,
};
use crate::xml::XmlElement;

use rules::amounts::parse_amount;
use rules::dates::parse_date;
use rules::margin::is_margin_scheme;
use rules::nip::validate_nip;
use sections::annotations::build_annotations;
use sections::correction::build_correction;
use sections::footer::build_footer;
use sections::header::build_header;
use sections::line_items::build_line_items;
use sections::party::{PartyRole, build_party};
use sections::payment::build_payment;
use sections::summary::build_summary;
use sections::verification::build_verification;

/// Root element of every invoice revision.
pub const INVOICE_ROOT: &str = "Faktura";

/// Build the content tree of an invoice.
///
/// `document` is the parsed document node (the parent of `Faktura`).
pub fn generate_invoice(
    document: &XmlElement,
    additional: &AdditionalData,
    config: &GenerationConfig,
) -> Result<GeneratedDocument> {
    let faktura = document
        .child(INVOICE_ROOT)
        .ok_or_else(|| DocumentError::RootElementMissing(INVOICE_ROOT.to_string()))?;

    let variant = detect_variant(faktura)?;
    debug!("Detected invoice schema {}", variant.system_code());

    let empty = XmlElement::new();
    let fa = faktura.child("Fa").unwrap_or(&empty);

    let kind = match fa.text("RodzajFaktury") {
        Some(code) => {
            let kind = InvoiceKind::from_code(code);
            if kind.is_none() {
                warn!("Unknown invoice kind '{}'", code);
            }
            kind
        }
        None => None,
    };
    let margin = is_margin_scheme(fa, variant);

    let mut children = build_header(fa, kind, additional);
    children.extend(
        [
            faktura
                .child("Podmiot1")
                .and_then(|party| build_party(party, PartyRole::Issuer, variant)),
            faktura
                .child("Podmiot2")
                .and_then(|party| build_party(party, PartyRole::Buyer, variant)),
            kind.filter(InvoiceKind::is_correction)
                .and_then(|_| build_correction(fa)),
            build_line_items(fa, kind, variant, margin),
            build_annotations(fa, variant),
            build_payment(fa, variant, config),
            build_summary(fa, variant),
            build_footer(faktura),
            build_verification(additional),
        ]
        .into_iter()
        .flatten(),
    );
    debug!("Invoice content has {} top-level nodes", children.len());

    let meta = invoice_meta(faktura, fa, variant, kind);
    if config.validate_nip {
        if let Some(nip) = meta.issuer_nip.as_deref() {
            if let Err(err) = validate_nip(nip) {
                warn!("Issuer NIP {} is not valid: {}", nip, err);
            }
        }
    }

    info!(
        "Generated invoice {} ({})",
        meta.invoice_number.as_deref().unwrap_or("without number"),
        variant.system_code()
    );

    Ok(GeneratedDocument {
        content: ContentNode::Section {
            title: INVOICE_ROOT.to_string(),
            children,
        },
        meta,
    })
}

/// Determine the schema revision from `Naglowek`.
///
/// `KodFormularza@kodSystemowy` wins; `WariantFormularza` is the fallback.
pub fn detect_variant(faktura: &XmlElement) -> Result<SchemaVariant> {
    let header = faktura.child("Naglowek");
    let system_code = header
        .and_then(|header| header.child("KodFormularza"))
        .and_then(|code| code.attr("kodSystemowy"));
    let form_variant = header.and_then(|header| header.text("WariantFormularza"));

    system_code
        .and_then(SchemaVariant::from_system_code)
        .or_else(|| form_variant.and_then(SchemaVariant::from_form_variant))
        .ok_or_else(|| {
            let found = system_code
                .or(form_variant)
                .unwrap_or("no KodFormularza or WariantFormularza");
            DocumentError::UnsupportedSchema(found.to_string()).into()
        })
}

fn invoice_meta(
    faktura: &XmlElement,
    fa: &XmlElement,
    variant: SchemaVariant,
    kind: Option<InvoiceKind>,
) -> DocumentMeta {
    let nip = |party: &str| {
        faktura
            .path_text(&[party, "DaneIdentyfikacyjne", "NIP"])
            .map(str::to_string)
    };

    DocumentMeta {
        variant: Some(variant),
        kind,
        invoice_number: fa.text("P_2").map(str::to_string),
        issue_date: fa.text("P_1").and_then(parse_date),
        issuer_nip: nip("Podmiot1"),
        buyer_nip: nip("Podmiot2"),
        currency: fa.text("KodWaluty").map(str::to_string),
        total: fa.text("P_15").and_then(parse_amount),
        document_count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KsefError;
    use crate::xml::parse;
    use pretty_assertions::assert_eq;

    const FA2_INVOICE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Faktura xmlns="http://crd.gov.pl/wzor/2023/06/29/12648/">
  <Naglowek>
    <KodFormularza kodSystemowy="FA (2)" wersjaSchemy="1-0E">FA</KodFormularza>
    <WariantFormularza>2</WariantFormularza>
    <DataWytworzeniaFa>2025-03-07T10:00:00Z</DataWytworzeniaFa>
  </Naglowek>
  <Podmiot1>
    <DaneIdentyfikacyjne>
      <NIP>1234563218</NIP>
      <Nazwa>ABC sp. z o.o.</Nazwa>
    </DaneIdentyfikacyjne>
    <Adres>
      <KodKraju>PL</KodKraju>
      <AdresL1>ul. Prosta 51</AdresL1>
    </Adres>
  </Podmiot1>
  <Podmiot2>
    <DaneIdentyfikacyjne>
      <NIP>5261040828</NIP>
      <Nazwa>XYZ S.A.</Nazwa>
    </DaneIdentyfikacyjne>
  </Podmiot2>
  <Fa>
    <KodWaluty>PLN</KodWaluty>
    <P_1>2025-03-07</P_1>
    <P_2>FV/7/2025</P_2>
    <P_13_1>100</P_13_1>
    <P_14_1>23</P_14_1>
    <P_15>123</P_15>
    <Adnotacje>
      <P_16>2</P_16>
      <P_17>2</P_17>
      <P_18>2</P_18>
      <P_18A>2</P_18A>
      <PMarzy><P_PMarzyN>1</P_PMarzyN></PMarzy>
    </Adnotacje>
    <RodzajFaktury>VAT</RodzajFaktury>
    <FaWiersz>
      <NrWierszaFa>1</NrWierszaFa>
      <P_7>Usługa</P_7>
      <P_11>100</P_11>
      <P_12>23</P_12>
    </FaWiersz>
    <Platnosc>
      <FormaPlatnosci>6</FormaPlatnosci>
      <RachunekBankowy><NrRB>61109010140000071219812874</NrRB></RachunekBankowy>
    </Platnosc>
  </Fa>
</Faktura>"#;

    #[test]
    fn test_fa2_invoice_sections_in_order() {
        let document = parse(FA2_INVOICE).unwrap();
        let generated = generate_invoice(
            &document,
            &AdditionalData::default(),
            &GenerationConfig::default(),
        )
        .unwrap();

        let titles: Vec<_> = generated
            .content
            .children()
            .iter()
            .filter_map(ContentNode::title)
            .collect();
        assert_eq!(
            titles,
            vec!["Sprzedawca", "Nabywca", "Pozycje", "Płatność", "Podsumowanie"]
        );
        assert_eq!(
            generated.content.find_value("Kwota należności ogółem: "),
            Some("123,00 PLN")
        );
    }

    #[test]
    fn test_fa2_invoice_meta() {
        let document = parse(FA2_INVOICE).unwrap();
        let generated = generate_invoice(
            &document,
            &AdditionalData::default(),
            &GenerationConfig::default(),
        )
        .unwrap();

        let meta = generated.meta;
        assert_eq!(meta.variant, Some(SchemaVariant::Fa2));
        assert_eq!(meta.kind, Some(InvoiceKind::Vat));
        assert_eq!(meta.invoice_number.as_deref(), Some("FV/7/2025"));
        assert_eq!(meta.issue_date, chrono::NaiveDate::from_ymd_opt(2025, 3, 7));
        assert_eq!(meta.issuer_nip.as_deref(), Some("1234563218"));
        assert_eq!(meta.buyer_nip.as_deref(), Some("5261040828"));
        assert_eq!(meta.total, Some(rust_decimal::Decimal::from(123)));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let document = parse("<Potwierdzenie/>").unwrap();
        let err = generate_invoice(
            &document,
            &AdditionalData::default(),
            &GenerationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            KsefError::Document(DocumentError::RootElementMissing(ref root)) if root == "Faktura"
        ));
    }

    #[test]
    fn test_variant_detection() {
        let by_code = parse(
            r#"<Faktura><Naglowek><KodFormularza kodSystemowy="FA (3)">FA</KodFormularza></Naglowek></Faktura>"#,
        )
        .unwrap();
        let by_variant = parse(
            "<Faktura><Naglowek><WariantFormularza>1</WariantFormularza></Naglowek></Faktura>",
        )
        .unwrap();
        let unknown = parse(
            r#"<Faktura><Naglowek><KodFormularza kodSystemowy="FA_RR (1)">FA_RR</KodFormularza></Naglowek></Faktura>"#,
        )
        .unwrap();

        let faktura = |doc: &XmlElement| doc.child("Faktura").cloned().unwrap();
        assert_eq!(detect_variant(&faktura(&by_code)).unwrap(), SchemaVariant::Fa3);
        assert_eq!(detect_variant(&faktura(&by_variant)).unwrap(), SchemaVariant::Fa1);
        assert!(matches!(
            detect_variant(&faktura(&unknown)),
            Err(KsefError::Document(DocumentError::UnsupportedSchema(ref code))) if code == "FA_RR (1)"
        ));
    }

    #[test]
    fn test_correction_section_only_for_corrections() {
        let xml = |kind: &str| {
            format!(
                r#"<Faktura><Naglowek><WariantFormularza>3</WariantFormularza></Naglowek>
                <Fa><RodzajFaktury>{}</RodzajFaktury><PrzyczynaKorekty>Zwrot</PrzyczynaKorekty></Fa></Faktura>"#,
                kind
            )
        };

        for (kind, expected) in [("KOR", true), ("VAT", false)] {
            let document = parse(&xml(kind)).unwrap();
            let generated = generate_invoice(
                &document,
                &AdditionalData::default(),
                &GenerationConfig::default(),
            )
            .unwrap();
            assert_eq!(
                generated.content.find_section("Dane faktury korygowanej").is_some(),
                expected
            );
        }
    }
}
