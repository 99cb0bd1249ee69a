//! Issuer (`Podmiot1`) and buyer (`Podmiot2`) blocks.

use crate::invoice::rules::labels::{country_name, or_code, taxpayer_status};
use crate::models::content::{ContentNode, TextStyle};
use crate::models::document::SchemaVariant;
use crate::xml::XmlElement;

use super::address::build_address;
use super::contact::build_contacts;
use super::{present, yes_no};

/// Which side of the transaction a party block describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    /// `Podmiot1`.
    Issuer,
    /// `Podmiot2`.
    Buyer,
}

impl PartyRole {
    /// Section title.
    pub fn title(&self) -> &'static str {
        match self {
            PartyRole::Issuer => "Sprzedawca",
            PartyRole::Buyer => "Nabywca",
        }
    }

    fn prefix_field(&self) -> &'static str {
        match self {
            PartyRole::Issuer => "PrefiksPodatnika",
            PartyRole::Buyer => "PrefiksNabywcy",
        }
    }
}

/// Build a party section. Returns `None` when the party carries nothing
/// printable.
pub fn build_party(
    party: &XmlElement,
    role: PartyRole,
    variant: SchemaVariant,
) -> Option<ContentNode> {
    let mut children = present([
        ContentNode::label_text("NrEORI: ", party.text("NrEORI")),
        ContentNode::label_text("Prefiks VAT: ", party.text(role.prefix_field())),
    ]);

    if let Some(identification) = party.child("DaneIdentyfikacyjne") {
        children.extend(identification_lines(identification, variant));
    }

    children.extend(present([
        party
            .child("Adres")
            .and_then(|address| build_address("Adres", address, variant)),
        party
            .child("AdresKoresp")
            .and_then(|address| build_address("Adres do korespondencji", address, variant)),
        build_contacts(party, variant),
    ]));

    if let Some(code) = party.text("StatusInfoPodatnika") {
        let status = or_code(taxpayer_status(code), code);
        children.extend(ContentNode::label_text("Status podatnika: ", Some(status.as_str())));
    }

    if role == PartyRole::Buyer {
        children.extend(buyer_extras(party, variant));
    }

    ContentNode::section(role.title(), children)
}

fn identification_lines(id: &XmlElement, variant: SchemaVariant) -> Vec<ContentNode> {
    let mut lines = present([ContentNode::label_text("NIP: ", id.text("NIP"))]);

    // Buyers without a Polish NIP are identified by an EU VAT number or a
    // foreign tax id, or explicitly not at all.
    if let Some(vat_ue) = id.text("NrVatUE") {
        let number = format!("{}{}", id.text("KodUE").unwrap_or_default(), vat_ue);
        lines.extend(ContentNode::label_text("Numer VAT-UE: ", Some(number.as_str())));
    }
    if let Some(foreign_id) = id.text("NrID") {
        lines.extend(present([
            ContentNode::label_text(
                "Kraj identyfikatora: ",
                id.text("KodKraju").map(country_name).as_deref(),
            ),
            ContentNode::label_text("Identyfikator podatkowy: ", Some(foreign_id)),
        ]));
    }
    if id.is_set("BrakID") {
        lines.push(ContentNode::formatted(
            "Brak identyfikatora podatkowego",
            &[TextStyle::Default],
        ));
    }

    match variant {
        SchemaVariant::Fa1 => lines.extend(present([
            ContentNode::label_text("Nazwa: ", id.text("PelnaNazwa")),
            ContentNode::label_text("Imię i nazwisko: ", id.text("ImieNazwisko")),
            ContentNode::label_text("Nazwa handlowa: ", id.text("NazwaHandlowa")),
        ])),
        SchemaVariant::Fa2 | SchemaVariant::Fa3 => {
            lines.extend(ContentNode::label_text("Nazwa: ", id.text("Nazwa")))
        }
    }
    lines
}

fn buyer_extras(party: &XmlElement, variant: SchemaVariant) -> Vec<ContentNode> {
    let mut lines = present([ContentNode::label_text(
        "Numer klienta: ",
        party.text("NrKlienta"),
    )]);

    if variant != SchemaVariant::Fa1 {
        lines.extend(ContentNode::label_text("ID nabywcy: ", party.text("IDNabywcy")));
    }
    if variant == SchemaVariant::Fa3 {
        lines.extend(present([
            ContentNode::label_text("Jednostka podrzędna JST: ", yes_no(party.text("JST"))),
            ContentNode::label_text("Członek grupy VAT: ", yes_no(party.text("GV"))),
        ]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(text: &str) -> XmlElement {
        XmlElement::leaf(text)
    }

    #[test]
    fn test_party_with_only_identification() {
        for variant in [SchemaVariant::Fa1, SchemaVariant::Fa2, SchemaVariant::Fa3] {
            let party = XmlElement::new().with(
                "DaneIdentyfikacyjne",
                XmlElement::new().with("NIP", leaf("1234563218")),
            );

            let node = build_party(&party, PartyRole::Issuer, variant).unwrap();
            assert_eq!(node.title(), Some("Sprzedawca"));
            // No empty group headers anywhere below the party.
            assert_eq!(node.sections().len(), 1);
            assert_eq!(node.find_value("NIP: "), Some("1234563218"));
        }
    }

    #[test]
    fn test_empty_party_is_dropped() {
        let party = XmlElement::new()
            .with("Adres", XmlElement::new())
            .with("DaneKontaktowe", XmlElement::new());
        for variant in [SchemaVariant::Fa1, SchemaVariant::Fa2, SchemaVariant::Fa3] {
            assert_eq!(build_party(&party, PartyRole::Buyer, variant), None);
        }
    }

    #[test]
    fn test_fa2_issuer_full() {
        let party = XmlElement::new()
            .with("PrefiksPodatnika", leaf("PL"))
            .with(
                "DaneIdentyfikacyjne",
                XmlElement::new()
                    .with("NIP", leaf("1234563218"))
                    .with("Nazwa", leaf("ABC sp. z o.o.")),
            )
            .with(
                "Adres",
                XmlElement::new()
                    .with("KodKraju", leaf("PL"))
                    .with("AdresL1", leaf("ul. Kwiatowa 1")),
            )
            .with(
                "DaneKontaktowe",
                XmlElement::new().with("Email", leaf("abc@example.pl")),
            )
            .with("StatusInfoPodatnika", leaf("1"));

        let node = build_party(&party, PartyRole::Issuer, SchemaVariant::Fa2).unwrap();
        let titles: Vec<_> = node.sections().into_iter().filter_map(ContentNode::title).collect();
        assert_eq!(titles, vec!["Sprzedawca", "Adres", "Dane kontaktowe"]);
        assert_eq!(node.find_value("Prefiks VAT: "), Some("PL"));
        assert_eq!(node.find_value("Nazwa: "), Some("ABC sp. z o.o."));
        assert_eq!(node.find_value("Status podatnika: "), Some("Stan likwidacji"));
    }

    #[test]
    fn test_fa1_names() {
        let party = XmlElement::new().with(
            "DaneIdentyfikacyjne",
            XmlElement::new()
                .with("NIP", leaf("1234563218"))
                .with("PelnaNazwa", leaf("Jan Kowalski Usługi"))
                .with("NazwaHandlowa", leaf("JK")),
        );

        let node = build_party(&party, PartyRole::Issuer, SchemaVariant::Fa1).unwrap();
        assert_eq!(node.find_value("Nazwa: "), Some("Jan Kowalski Usługi"));
        assert_eq!(node.find_value("Nazwa handlowa: "), Some("JK"));
    }

    #[test]
    fn test_buyer_identification_alternatives() {
        let party = XmlElement::new()
            .with(
                "DaneIdentyfikacyjne",
                XmlElement::new()
                    .with("KodUE", leaf("DE"))
                    .with("NrVatUE", leaf("123456789"))
                    .with("Nazwa", leaf("Muster GmbH")),
            )
            .with("NrKlienta", leaf("K-7"))
            .with("JST", leaf("2"))
            .with("GV", leaf("1"));

        let node = build_party(&party, PartyRole::Buyer, SchemaVariant::Fa3).unwrap();
        assert_eq!(node.title(), Some("Nabywca"));
        assert_eq!(node.find_value("Numer VAT-UE: "), Some("DE123456789"));
        assert_eq!(node.find_value("Numer klienta: "), Some("K-7"));
        assert_eq!(node.find_value("Jednostka podrzędna JST: "), Some("Nie"));
        assert_eq!(node.find_value("Członek grupy VAT: "), Some("Tak"));
    }

    #[test]
    fn test_jst_only_printed_for_fa3() {
        let party = XmlElement::new()
            .with("DaneIdentyfikacyjne", XmlElement::new().with("BrakID", leaf("1")))
            .with("JST", leaf("1"));

        let node = build_party(&party, PartyRole::Buyer, SchemaVariant::Fa2).unwrap();
        assert_eq!(node.find_value("Jednostka podrzędna JST: "), None);
        assert!(
            node.plain_text()
                .contains(&"Brak identyfikatora podatkowego".to_string())
        );
    }
}
