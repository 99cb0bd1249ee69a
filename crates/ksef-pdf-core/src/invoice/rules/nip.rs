//! NIP (Polish tax identification number) checks.

use thiserror::Error;

/// Weights of the first nine digits; the tenth digit is the check digit.
const WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];

/// Why a NIP is not valid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NipError {
    #[error("unexpected character '{0}'")]
    InvalidCharacter(char),

    #[error("expected 10 digits, found {0}")]
    Length(usize),

    /// A weighted sum of 10 mod 11 is never issued.
    #[error("no check digit exists for the first nine digits")]
    NoCheckDigit,

    #[error("check digit is {found}, expected {expected}")]
    CheckDigit { expected: u32, found: u32 },
}

/// Check a NIP, printed plain (`1234563218`) or with separators
/// (`123-456-32-18`, `123 456 32 18`).
pub fn validate_nip(nip: &str) -> Result<(), NipError> {
    let mut digits = Vec::with_capacity(10);
    for c in nip.trim().chars() {
        match c {
            '-' | ' ' => {}
            '0'..='9' => digits.push(c as u32 - '0' as u32),
            _ => return Err(NipError::InvalidCharacter(c)),
        }
    }

    let [body @ .., found] = digits.as_slice() else {
        return Err(NipError::Length(0));
    };
    if body.len() != WEIGHTS.len() {
        return Err(NipError::Length(digits.len()));
    }

    let expected = body.iter().zip(WEIGHTS).map(|(d, w)| d * w).sum::<u32>() % 11;
    match expected {
        10 => Err(NipError::NoCheckDigit),
        expected if expected == *found => Ok(()),
        expected => Err(NipError::CheckDigit {
            expected,
            found: *found,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_nip() {
        assert_eq!(validate_nip("5261040828"), Ok(()));
        assert_eq!(validate_nip("123-456-32-18"), Ok(()));
        assert_eq!(validate_nip(" 123 456 32 18 "), Ok(()));
    }

    #[test]
    fn test_wrong_check_digit() {
        assert_eq!(
            validate_nip("1234563219"),
            Err(NipError::CheckDigit {
                expected: 8,
                found: 9
            })
        );
    }

    #[test]
    fn test_wrong_length_and_characters() {
        assert_eq!(validate_nip("123456321"), Err(NipError::Length(9)));
        assert_eq!(validate_nip(""), Err(NipError::Length(0)));
        assert_eq!(validate_nip("PL1234563218"), Err(NipError::InvalidCharacter('P')));
    }

    #[test]
    fn test_sum_without_check_digit() {
        // 2 * 5 = 10
        assert_eq!(validate_nip("0200000000"), Err(NipError::NoCheckDigit));
    }
}
