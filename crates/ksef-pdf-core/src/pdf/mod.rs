//! Rendering of content trees to PDF.

mod fonts;
mod renderer;

pub use fonts::{Font, encode_win_ansi, text_width, wrap_text};
pub use renderer::PdfRenderer;

use crate::error::RenderError;
use crate::models::content::ContentNode;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Turns a content tree into a binary document.
///
/// Implementations must accept every node variant and produce the same bytes
/// for the same tree.
pub trait DocumentRenderer {
    /// Render the tree rooted at `content`.
    fn render(&self, content: &ContentNode) -> Result<Vec<u8>>;
}
