//! Section builders for invoice printouts.
//!
//! Every builder is a pure function of one sub-tree and the schema variant.
//! Builders return `Option` or an empty `Vec` when they have nothing to show,
//! so no caller ever emits a header without content.

pub mod address;
pub mod annotations;
pub mod bank_account;
pub mod contact;
pub mod correction;
pub mod footer;
pub mod header;
pub mod line_items;
pub mod party;
pub mod payment;
pub mod summary;
pub mod verification;

use crate::models::content::ContentNode;

/// Keep the nodes that exist, in order.
pub(crate) fn present<I>(nodes: I) -> Vec<ContentNode>
where
    I: IntoIterator<Item = Option<ContentNode>>,
{
    nodes.into_iter().flatten().collect()
}

/// Schema "yes/no" code (`1`/`2`) as a label.
pub(crate) fn yes_no(code: Option<&str>) -> Option<&'static str> {
    match code? {
        "1" => Some("Tak"),
        "2" => Some("Nie"),
        _ => None,
    }
}

/// Collect `(label, value)` rows, skipping absent values.
pub(crate) fn rows<'a, I>(pairs: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a str, Option<String>)>,
{
    pairs
        .into_iter()
        .filter_map(|(label, value)| value.map(|value| (label.to_string(), value)))
        .collect()
}
