//! Bank account tables.

use tracing::warn;

use crate::invoice::rules::accounts::{OwnAccount, format_account_number, validate_nrb};
use crate::invoice::rules::titles::numbered;
use crate::models::config::GenerationConfig;
use crate::models::content::{ContentNode, Table};
use crate::models::document::SchemaVariant;
use crate::xml::XmlElement;

/// Build one titled table per account, in source order.
///
/// Titles get a 1-based suffix only when there is more than one account.
pub fn build_bank_accounts(
    accounts: &[&XmlElement],
    title: &str,
    variant: SchemaVariant,
    config: &GenerationConfig,
) -> Vec<ContentNode> {
    numbered(title, accounts)
        .into_iter()
        .map(|(title, account)| ContentNode::Section {
            title,
            children: vec![ContentNode::Table(Table::key_value(account_rows(
                account, variant, config,
            )))],
        })
        .collect()
}

fn account_rows(
    account: &XmlElement,
    variant: SchemaVariant,
    config: &GenerationConfig,
) -> Vec<(String, String)> {
    let number = |raw: &str| {
        if config.group_account_numbers {
            format_account_number(raw)
        } else {
            raw.to_string()
        }
    };

    let mut rows = Vec::new();
    match variant {
        SchemaVariant::Fa1 => {
            let domestic = account.text("NrRBPL");
            let foreign = account.text("NrRBZagr");

            if foreign.is_some() {
                rows.push(row("Format rachunku", "Zagraniczny"));
            } else if domestic.is_some() {
                rows.push(row("Format rachunku", "Polski"));
            }
            if let Some(domestic) = domestic {
                if !validate_nrb(domestic) {
                    warn!("Account number {} fails the NRB checksum", domestic);
                }
                rows.push(row("Pełny numer rachunku w standardzie NRB", &number(domestic)));
            }
            if let Some(foreign) = foreign {
                rows.push(row("Pełny numer rachunku zagranicznego", foreign));
            }
        }
        SchemaVariant::Fa2 | SchemaVariant::Fa3 => {
            let full = account.text("NrRB").map(number).unwrap_or_default();
            rows.push(row("Pełny numer rachunku", &full));
        }
    }

    rows.push(row("Kod SWIFT", account.text("SWIFT").unwrap_or_default()));
    let own = OwnAccount::from_code(account.text("RachunekWlasnyBanku"));
    rows.push(row("Rachunek własny banku", own.label()));
    rows.push(row("Nazwa banku", account.text("NazwaBanku").unwrap_or_default()));

    if variant != SchemaVariant::Fa1 {
        rows.push(row(
            "Opis rachunku",
            account.text("OpisRachunku").unwrap_or_default(),
        ));
    }
    rows
}

fn row(label: &str, value: &str) -> (String, String) {
    (label.to_string(), value.to_string())
}
