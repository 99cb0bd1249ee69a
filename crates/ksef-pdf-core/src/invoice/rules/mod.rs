//! Business rules and value formatting for invoice printouts.

pub mod accounts;
pub mod amounts;
pub mod dates;
pub mod labels;
pub mod margin;
pub mod nip;
pub mod patterns;
pub mod rates;
pub mod titles;

pub use accounts::{OwnAccount, format_account_number, validate_nrb};
pub use amounts::{display_amount, display_amount_with_currency, format_polish_amount, parse_amount};
pub use dates::{display_date_time, parse_date, reformat_date};
pub use margin::{MARGIN_MARKER, MarginOverride, is_margin_scheme, should_add_marza};
pub use nip::{NipError, validate_nip};
pub use rates::{VatRate, display_rate};
pub use titles::{numbered, numbered_title};
