//! Bank account rules: own-account type labels and account number display.

use tracing::warn;

/// Whether an account is the bank's own account (`RachunekWlasnyBanku`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnAccount {
    /// Code `1`.
    Owned,
    /// Code `0`.
    NotOwned,
    /// Field absent or carrying an unknown code.
    Unspecified,
}

impl OwnAccount {
    /// Map the raw field value.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("1") => OwnAccount::Owned,
            Some("0") => OwnAccount::NotOwned,
            None => OwnAccount::Unspecified,
            Some(other) => {
                warn!("Unknown own bank account code '{}'", other);
                OwnAccount::Unspecified
            }
        }
    }

    /// Printed label. Unspecified prints as an empty cell.
    pub fn label(&self) -> &'static str {
        match self {
            OwnAccount::Owned => "Tak",
            OwnAccount::NotOwned => "Nie",
            OwnAccount::Unspecified => "",
        }
    }
}

/// Validate a domestic NRB (26 digits) through its IBAN checksum.
pub fn validate_nrb(nrb: &str) -> bool {
    let digits: String = nrb.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() != 26 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    // Move "PL" + check digits to the end; P=25, L=21
    let rearranged = format!("{}2521{}", &digits[2..], &digits[..2]);
    mod97(&rearranged) == 1
}

fn mod97(number_str: &str) -> u32 {
    let mut remainder: u32 = 0;

    for c in number_str.chars() {
        let digit = c.to_digit(10).unwrap_or(0);
        remainder = (remainder * 10 + digit) % 97;
    }

    remainder
}

/// Format an account number the way NRB numbers are printed:
/// two check digits, then groups of four.
pub fn format_account_number(account: &str) -> String {
    let cleaned: String = account.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.len() != 26 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return account.trim().to_string();
    }

    let (check, rest) = cleaned.split_at(2);
    let groups: Vec<String> = rest
        .chars()
        .collect::<Vec<char>>()
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect();

    format!("{} {}", check, groups.join(" "))
}
