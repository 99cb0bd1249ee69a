//! Full pipeline: raw XML to finalized link, content tree and PDF.

use ksef_pdf_core::models::content::ContentNode;
use ksef_pdf_core::{
    AdditionalData, DocumentRenderer, KsefConfig, PdfRenderer, generate_invoice, generate_upo,
    parse, process_qr_template,
};
use pretty_assertions::assert_eq;

const INVOICE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Faktura xmlns="http://crd.gov.pl/wzor/2023/06/29/12648/">
  <Naglowek>
    <KodFormularza kodSystemowy="FA (2)" wersjaSchemy="1-0E">FA</KodFormularza>
    <WariantFormularza>2</WariantFormularza>
  </Naglowek>
  <Podmiot1>
    <DaneIdentyfikacyjne>
      <NIP>1234563218</NIP>
      <Nazwa>Sprzedawca Sp. z o.o.</Nazwa>
    </DaneIdentyfikacyjne>
  </Podmiot1>
  <Fa>
    <KodWaluty>PLN</KodWaluty>
    <P_1>2025-03-07</P_1>
    <P_2>FV/7/2025</P_2>
    <P_15>123.00</P_15>
    <RodzajFaktury>VAT</RodzajFaktury>
  </Fa>
</Faktura>"#;

const TEMPLATE: &str = "https://ksef-test.mf.gov.pl/client-app/invoice/{nip}/{p1}/{hash}";

#[test]
fn test_invoice_pipeline() {
    let document = parse(INVOICE).unwrap();
    let link = process_qr_template(TEMPLATE, INVOICE, &document).unwrap();

    assert!(!link.contains('{'));
    assert!(link.starts_with(
        "https://ksef-test.mf.gov.pl/client-app/invoice/1234563218/07-03-2025/"
    ));

    let additional = AdditionalData {
        nr_ksef: Some("1234563218-20250307-0100A0B0C0D0-1F".to_string()),
        qr_code: Some(link.clone()),
    };
    let config = KsefConfig::default();
    let generated = generate_invoice(&document, &additional, &config.generation).unwrap();

    assert_eq!(generated.meta.invoice_number.as_deref(), Some("FV/7/2025"));
    assert!(generated.content.plain_text().contains(&link));

    let bytes = PdfRenderer::new(config.render).render(&generated.content).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_minimal_invoice_fills_every_placeholder() {
    let raw = "<Faktura><Podmiot1><DaneIdentyfikacyjne><NIP>5260250274</NIP>\
        </DaneIdentyfikacyjne></Podmiot1><Fa><P_1>2025-03-07T10:00:00</P_1></Fa></Faktura>";
    let document = parse(raw).unwrap();

    let link = process_qr_template("{hash}/{nip}/{p1}", raw, &document).unwrap();
    let parts: Vec<&str> = link.split('/').collect();

    assert!(!link.contains('{') && !link.contains('}'));
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[1], "5260250274");
    assert_eq!(parts[2], "07-03-2025");
    assert_eq!(parts[0].len(), 43);
}

#[test]
fn test_upo_pipeline() {
    let raw = r#"<Potwierdzenie>
  <NazwaPodmiotuPrzyjmujacego>Ministerstwo Finansów</NazwaPodmiotuPrzyjmujacego>
  <Dokument><NumerFaktury>FV/7/2025</NumerFaktury></Dokument>
</Potwierdzenie>"#;

    let generated = generate_upo(&parse(raw).unwrap()).unwrap();
    assert!(matches!(generated.content, ContentNode::Section { .. }));
    assert_eq!(generated.meta.document_count, Some(1));

    let bytes = PdfRenderer::default().render(&generated.content).unwrap();
    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(pdf.get_pages().len(), 1);
}

#[test]
fn test_upo_root_is_not_an_invoice() {
    let document = parse("<Potwierdzenie/>").unwrap();
    let result = generate_invoice(&document, &AdditionalData::default(), &Default::default());
    assert!(result.is_err());
}
