//! Payment details (`Fa/Platnosc`).

use crate::invoice::rules::amounts::display_amount;
use crate::invoice::rules::labels::{or_code, payment_form};
use crate::models::config::GenerationConfig;
use crate::models::content::{ContentNode, TextStyle};
use crate::models::document::SchemaVariant;
use crate::xml::XmlElement;

use super::bank_account::build_bank_accounts;
use super::present;

/// Build the "Płatność" section.
pub fn build_payment(
    fa: &XmlElement,
    variant: SchemaVariant,
    config: &GenerationConfig,
) -> Option<ContentNode> {
    let payment = fa.child("Platnosc")?;
    let mut children = Vec::new();

    if payment.is_set("Zaplacono") {
        children.push(ContentNode::formatted("Zapłacono", &[TextStyle::Bold]));
        children.extend(ContentNode::label_text("Data zapłaty: ", payment.text("DataZaplaty")));
    }

    for partial in payment.children("ZaplataCzesciowa") {
        let amount = partial.text("KwotaZaplatyCzesciowej").map(display_amount);
        let value = match (amount, partial.text("DataZaplatyCzesciowej")) {
            (Some(amount), Some(date)) => Some(format!("{} ({})", amount, date)),
            (amount, date) => amount.or(date.map(str::to_string)),
        };
        children.extend(ContentNode::label_text("Zapłata częściowa: ", value.as_deref()));
    }

    for term in payment.children("TerminPlatnosci") {
        children.extend(payment_term(term, variant));
    }

    let form = match payment.text("FormaPlatnosci") {
        Some(code) => Some(or_code(payment_form(code), code)),
        None if payment.is_set("PlatnoscInna") => {
            payment.text("OpisPlatnosci").map(str::to_string)
        }
        None => None,
    };
    children.extend(ContentNode::label_text("Forma płatności: ", form.as_deref()));

    children.extend(build_bank_accounts(
        &payment.children("RachunekBankowy"),
        "Numer rachunku bankowego",
        variant,
        config,
    ));
    children.extend(build_bank_accounts(
        &payment.children("RachunekBankowyFaktora"),
        "Rachunek bankowy faktora",
        variant,
        config,
    ));

    if let Some(discount) = payment.child("Skonto") {
        children.extend(present([
            ContentNode::label_text("Warunki skonta: ", discount.text("WarunkiSkonta")),
            ContentNode::label_text("Wysokość skonta: ", discount.text("WysokoscSkonta")),
        ]));
    }

    ContentNode::section("Płatność", children)
}

/// One payment term. The shape changed with every revision:
/// FA(1) nests the date in another `TerminPlatnosci` and describes it in
/// `TerminPlatnosciOpis`, FA(2) uses `Termin` with a free-text `TerminOpis`,
/// and FA(3) makes `TerminOpis` a structured amount of time.
fn payment_term(term: &XmlElement, variant: SchemaVariant) -> Vec<ContentNode> {
    let (date, description) = match variant {
        SchemaVariant::Fa1 => (
            term.text("TerminPlatnosci"),
            term.text("TerminPlatnosciOpis").map(str::to_string),
        ),
        SchemaVariant::Fa2 => (
            term.text("Termin"),
            term.text("TerminOpis").map(str::to_string),
        ),
        SchemaVariant::Fa3 => (
            term.text("Termin"),
            term.child("TerminOpis").and_then(structured_term),
        ),
    };

    present([
        ContentNode::label_text("Termin płatności: ", date),
        ContentNode::label_text("Opis terminu płatności: ", description.as_deref()),
    ])
}

fn structured_term(description: &XmlElement) -> Option<String> {
    let parts: Vec<&str> = ["Ilosc", "Jednostka", "ZdarzeniePoczatkowe"]
        .iter()
        .filter_map(|field| description.text(field))
        .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(text: &str) -> XmlElement {
        XmlElement::leaf(text)
    }

    #[test]
    fn test_payment_terms_per_variant() {
        let fa1 = XmlElement::new().with(
            "Platnosc",
            XmlElement::new().with(
                "TerminPlatnosci",
                XmlElement::new()
                    .with("TerminPlatnosci", leaf("2024-02-15"))
                    .with("TerminPlatnosciOpis", leaf("14 dni")),
            ),
        );
        let fa3 = XmlElement::new().with(
            "Platnosc",
            XmlElement::new().with(
                "TerminPlatnosci",
                XmlElement::new().with("Termin", leaf("2025-05-01")).with(
                    "TerminOpis",
                    XmlElement::new()
                        .with("Ilosc", leaf("30"))
                        .with("Jednostka", leaf("dni"))
                        .with("ZdarzeniePoczatkowe", leaf("od dostawy")),
                ),
            ),
        );

        let node = build_payment(&fa1, SchemaVariant::Fa1, &GenerationConfig::default()).unwrap();
        assert_eq!(node.find_value("Termin płatności: "), Some("2024-02-15"));
        assert_eq!(node.find_value("Opis terminu płatności: "), Some("14 dni"));

        let node = build_payment(&fa3, SchemaVariant::Fa3, &GenerationConfig::default()).unwrap();
        assert_eq!(node.find_value("Termin płatności: "), Some("2025-05-01"));
        assert_eq!(
            node.find_value("Opis terminu płatności: "),
            Some("30 dni od dostawy")
        );
    }

    #[test]
    fn test_form_and_accounts() {
        let fa = XmlElement::new().with(
            "Platnosc",
            XmlElement::new()
                .with("FormaPlatnosci", leaf("6"))
                .with("RachunekBankowy", XmlElement::new().with("NrRB", leaf("111")))
                .with("RachunekBankowyFaktora", XmlElement::new().with("NrRB", leaf("222"))),
        );

        let node = build_payment(&fa, SchemaVariant::Fa2, &GenerationConfig::default()).unwrap();
        assert_eq!(node.find_value("Forma płatności: "), Some("Przelew"));

        let titles: Vec<_> = node.sections().into_iter().filter_map(ContentNode::title).collect();
        assert_eq!(
            titles,
            vec!["Płatność", "Numer rachunku bankowego", "Rachunek bankowy faktora"]
        );
    }

    #[test]
    fn test_paid_with_partials() {
        let fa = XmlElement::new().with(
            "Platnosc",
            XmlElement::new()
                .with("Zaplacono", leaf("1"))
                .with("DataZaplaty", leaf("2025-01-10"))
                .with(
                    "ZaplataCzesciowa",
                    XmlElement::new()
                        .with("KwotaZaplatyCzesciowej", leaf("500"))
                        .with("DataZaplatyCzesciowej", leaf("2025-01-05")),
                ),
        );

        let node = build_payment(&fa, SchemaVariant::Fa3, &GenerationConfig::default()).unwrap();
        assert_eq!(node.find_value("Data zapłaty: "), Some("2025-01-10"));
        assert_eq!(node.find_value("Zapłata częściowa: "), Some("500,00 (2025-01-05)"));
    }

    #[test]
    fn test_empty_payment_is_dropped() {
        let fa = XmlElement::new().with("Platnosc", XmlElement::new());
        assert_eq!(build_payment(&fa, SchemaVariant::Fa2, &GenerationConfig::default()), None);
    }
}
