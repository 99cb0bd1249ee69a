//! Verification link templating.
//!
//! A template such as
//! `https://ksef.mf.gov.pl/client-app/invoice/{nip}/{p1}/{hash}` is filled
//! from the raw invoice text and its parsed tree. Placeholders that do not
//! appear in the template are never computed, so a missing field only fails
//! when it is actually requested.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::TemplateError;
use crate::invoice::rules::dates::reformat_date;
use crate::xml::XmlElement;

/// SHA-256 of the document bytes.
pub const HASH_PLACEHOLDER: &str = "{hash}";
/// Issuer NIP.
pub const NIP_PLACEHOLDER: &str = "{nip}";
/// Issue date as `dd-mm-yyyy`.
pub const P1_PLACEHOLDER: &str = "{p1}";

const NIP_PATH: &[&str] = &["Faktura", "Podmiot1", "DaneIdentyfikacyjne", "NIP"];
const P1_PATH: &[&str] = &["Faktura", "Fa", "P_1"];

/// SHA-256 of `raw`, base64url encoded without padding.
pub fn content_hash(raw: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(raw))
}

/// Issuer NIP (`Faktura.Podmiot1.DaneIdentyfikacyjne.NIP`).
pub fn extract_nip(document: &XmlElement) -> Option<&str> {
    document.path_text(NIP_PATH)
}

/// Issue date (`Faktura.Fa.P_1`) as `dd-mm-yyyy`, or verbatim when it is not
/// an ISO date.
pub fn extract_p1_formatted(document: &XmlElement) -> Option<String> {
    document.path_text(P1_PATH).map(reformat_date)
}

/// Substitute every placeholder in `template`.
///
/// `raw` must be the exact text the tree was parsed from.
pub fn process_qr_template(
    template: &str,
    raw: &str,
    document: &XmlElement,
) -> Result<String, TemplateError> {
    let mut result = template.to_string();

    if result.contains(HASH_PLACEHOLDER) {
        result = result.replace(HASH_PLACEHOLDER, &content_hash(raw.as_bytes()));
    }

    if result.contains(NIP_PLACEHOLDER) {
        let nip = extract_nip(document).ok_or(TemplateError::MissingField {
            placeholder: NIP_PLACEHOLDER,
            path: "Faktura.Podmiot1.DaneIdentyfikacyjne.NIP",
        })?;
        result = result.replace(NIP_PLACEHOLDER, nip);
    }

    if result.contains(P1_PLACEHOLDER) {
        let p1 = extract_p1_formatted(document).ok_or(TemplateError::MissingField {
            placeholder: P1_PLACEHOLDER,
            path: "Faktura.Fa.P_1",
        })?;
        result = result.replace(P1_PLACEHOLDER, &p1);
    }

    debug!("Verification link: {}", result);
    Ok(result)
}
