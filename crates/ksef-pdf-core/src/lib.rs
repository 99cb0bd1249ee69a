//! Core library for KSeF invoice and UPO printouts.
//!
//! This crate provides:
//! - XML normalization into a generic element tree
//! - Content tree assembly for FA(1), FA(2) and FA(3) invoices and UPO acknowledgements
//! - Verification link templating (`{nip}`, `{p1}`, `{hash}`)
//! - PDF rendering of content trees

pub mod error;
pub mod finalize;
pub mod invoice;
pub mod models;
pub mod pdf;
pub mod upo;
pub mod xml;

pub use error::{KsefError, Result};
pub use finalize::process_qr_template;
pub use invoice::generate_invoice;
pub use models::config::KsefConfig;
pub use models::content::ContentNode;
pub use models::document::{AdditionalData, DocumentMeta, GeneratedDocument, SchemaVariant};
pub use pdf::{DocumentRenderer, PdfRenderer};
pub use upo::generate_upo;
pub use xml::{XmlElement, parse};
