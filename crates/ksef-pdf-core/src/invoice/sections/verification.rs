//! Verification block pointing the reader to the invoice in KSeF.

use crate::models::content::{ContentNode, TextStyle};
use crate::models::document::AdditionalData;

/// Build the verification section from the caller-supplied values.
///
/// The link is printed as text; encoding it as a QR raster is up to the
/// renderer.
pub fn build_verification(additional: &AdditionalData) -> Option<ContentNode> {
    let mut children = Vec::new();

    if let Some(url) = additional.qr_code.as_deref() {
        children.push(ContentNode::formatted(
            "Odnośnik do weryfikacji faktury w KSeF:",
            &[TextStyle::Label],
        ));
        children.push(ContentNode::formatted(url, &[TextStyle::Link]));
    }
    children.extend(ContentNode::label_text(
        "Numer KSeF: ",
        additional.nr_ksef.as_deref(),
    ));

    ContentNode::section("Sprawdź, czy Twoja faktura znajduje się w KSeF", children)
}
