//! Common regex patterns for KSeF field values.
//!
//! Digit classes are spelled `[0-9]`: in the regex crate `\d` matches every
//! Unicode decimal digit, and schema values only ever use ASCII digits.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // yyyy-mm-dd at the start of a date or timestamp
    pub static ref DATE_PREFIX: Regex = Regex::new(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})"
    ).unwrap();

    // yyyy-mm-ddThh:mm:ss with optional fraction and zone
    pub static ref DATE_TIME: Regex = Regex::new(
        r"^([0-9]{4}-[0-9]{2}-[0-9]{2})T([0-9]{2}:[0-9]{2}:[0-9]{2})(?:\.[0-9]+)?(?:Z|[+-][0-9]{2}:[0-9]{2})?$"
    ).unwrap();

    // Plain XML decimal, optionally signed
    pub static ref XML_DECIMAL: Regex = Regex::new(
        r"^-?[0-9]+(?:\.[0-9]+)?$"
    ).unwrap();
}
