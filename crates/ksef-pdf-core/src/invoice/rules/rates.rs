//! Polish VAT rate codes as they appear in `P_12` and friends.

use super::amounts::parse_amount;

/// Polish VAT rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VatRate {
    /// Standard rate: 23%
    Standard23,
    /// Standard rate before 2011: 22%
    Standard22,
    /// Reduced rate: 8%
    Reduced8,
    /// Reduced rate before 2011: 7%
    Reduced7,
    /// Reduced rate: 5%
    Reduced5,
    /// Flat-rate taxi: 4%
    Taxi4,
    /// Zero rate, domestic supply.
    ZeroDomestic,
    /// Zero rate, intra-community supply.
    ZeroIntraCommunity,
    /// Zero rate, export.
    ZeroExport,
    /// Exempt (zwolniony).
    Exempt,
    /// Reverse charge (odwrotne obciążenie).
    ReverseCharge,
    /// Not subject to VAT, outside the country.
    NotApplicableAbroad,
    /// Not subject to VAT, art. 100.
    NotApplicableArt100,
}

impl VatRate {
    /// Parse a schema rate code.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim() {
            "23" => Some(VatRate::Standard23),
            "22" => Some(VatRate::Standard22),
            "8" => Some(VatRate::Reduced8),
            "7" => Some(VatRate::Reduced7),
            "5" => Some(VatRate::Reduced5),
            "4" => Some(VatRate::Taxi4),
            "0" | "0 KR" => Some(VatRate::ZeroDomestic),
            "0 WDT" => Some(VatRate::ZeroIntraCommunity),
            "0 EX" => Some(VatRate::ZeroExport),
            "zw" => Some(VatRate::Exempt),
            "oo" => Some(VatRate::ReverseCharge),
            "np" | "np I" => Some(VatRate::NotApplicableAbroad),
            "np II" => Some(VatRate::NotApplicableArt100),
            _ => None,
        }
    }

    /// Format for display.
    pub fn display(&self) -> &'static str {
        match self {
            VatRate::Standard23 => "23%",
            VatRate::Standard22 => "22%",
            VatRate::Reduced8 => "8%",
            VatRate::Reduced7 => "7%",
            VatRate::Reduced5 => "5%",
            VatRate::Taxi4 => "4%",
            VatRate::ZeroDomestic => "0%",
            VatRate::ZeroIntraCommunity => "0% WDT",
            VatRate::ZeroExport => "0% EX",
            VatRate::Exempt => "zw",
            VatRate::ReverseCharge => "oo",
            VatRate::NotApplicableAbroad => "np I",
            VatRate::NotApplicableArt100 => "np II",
        }
    }
}

/// Printable rate: known codes by name, other numbers with a percent sign,
/// anything else (such as the margin marker) verbatim.
pub fn display_rate(raw: &str) -> String {
    if let Some(rate) = VatRate::from_code(raw) {
        return rate.display().to_string();
    }
    match parse_amount(raw) {
        Some(value) => format!("{}%", value.normalize()),
        None => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rate() {
        assert_eq!(display_rate("23"), "23%");
        assert_eq!(display_rate("0 WDT"), "0% WDT");
        assert_eq!(display_rate("19.50"), "19.5%");
        assert_eq!(display_rate("zw"), "zw");
        assert_eq!(display_rate("marża"), "marża");
    }
}
