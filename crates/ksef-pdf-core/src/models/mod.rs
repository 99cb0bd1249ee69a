//! Data models shared by builders, renderers and the CLI.

pub mod config;
pub mod content;
pub mod document;
