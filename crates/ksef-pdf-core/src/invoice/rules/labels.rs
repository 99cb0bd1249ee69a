//! Code-to-label dictionaries used on the printout.

/// `StatusInfoPodatnika`.
pub fn taxpayer_status(code: &str) -> Option<&'static str> {
    match code.trim() {
        "1" => Some("Stan likwidacji"),
        "2" => Some("Postępowanie restrukturyzacyjne"),
        "3" => Some("Stan upadłości"),
        "4" => Some("Przedsiębiorstwo w spadku"),
        _ => None,
    }
}

/// `FormaPlatnosci`.
pub fn payment_form(code: &str) -> Option<&'static str> {
    match code.trim() {
        "1" => Some("Gotówka"),
        "2" => Some("Karta"),
        "3" => Some("Bon"),
        "4" => Some("Czek"),
        "5" => Some("Kredyt"),
        "6" => Some("Przelew"),
        "7" => Some("Mobilna"),
        _ => None,
    }
}

/// Country name for an ISO 3166 code; unknown codes print as they are.
pub fn country_name(code: &str) -> String {
    let name = match code.trim().to_uppercase().as_str() {
        "PL" => "Polska",
        "DE" => "Niemcy",
        "CZ" => "Czechy",
        "SK" => "Słowacja",
        "LT" => "Litwa",
        "UA" => "Ukraina",
        "FR" => "Francja",
        "NL" => "Holandia",
        "IT" => "Włochy",
        "ES" => "Hiszpania",
        "AT" => "Austria",
        "GB" => "Wielka Brytania",
        "US" => "Stany Zjednoczone",
        _ => return code.trim().to_string(),
    };
    name.to_string()
}

/// Lookup that falls back to the raw code when it is unknown.
pub fn or_code(label: Option<&'static str>, code: &str) -> String {
    label.map(str::to_string).unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_codes() {
        assert_eq!(taxpayer_status("3"), Some("Stan upadłości"));
        assert_eq!(payment_form("6"), Some("Przelew"));
        assert_eq!(or_code(payment_form("9"), "9"), "9");
        assert_eq!(country_name("pl"), "Polska");
        assert_eq!(country_name("JP"), "JP");
    }
}
