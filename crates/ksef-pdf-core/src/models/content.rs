//! Renderer-agnostic document content tree.
//!
//! This is the only contract between the builders and a renderer. It knows
//! about named styles and relative column widths but nothing about pixels,
//! fonts or pagination.

use serde::{Deserialize, Serialize};

/// A unit of document content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentNode {
    /// A titled group of nodes.
    Section {
        title: String,
        children: Vec<ContentNode>,
    },
    /// A grid of styled cells.
    Table(Table),
    /// A single `label value` line.
    LabelText { label: String, value: String },
    /// Free text with a set of named styles.
    FormattedText { text: String, styles: Vec<TextStyle> },
}

/// Named text styles understood by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    /// Body text.
    Default,
    /// Document title.
    Title,
    /// Group label inside a section.
    Label,
    /// Extra spacing above a label.
    LabelMargin,
    /// Bold grey table caption.
    GrayBoldTitle,
    /// Bold body text.
    Bold,
    /// Small print.
    Small,
    /// Hyperlink text.
    Link,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub styles: Vec<TextStyle>,
}

/// Relative column width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnWidth {
    /// Share the remaining space.
    Star,
    /// As wide as the widest cell.
    Auto,
    /// Fixed width in points.
    Fixed(f32),
}

/// Table border drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    /// No lines.
    None,
    /// Thin grey lines around every cell.
    #[default]
    Grid,
    /// A single line under the first row.
    HeaderLine,
}

/// Table content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
    pub widths: Vec<ColumnWidth>,
    pub border: BorderStyle,
}

impl Cell {
    /// A cell in the default style.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: vec![TextStyle::Default],
        }
    }

    /// A caption cell.
    pub fn caption(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: vec![TextStyle::GrayBoldTitle],
        }
    }
}

impl Table {
    /// Two-column caption/value table.
    pub fn key_value(rows: Vec<(String, String)>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|(label, value)| vec![Cell::caption(label), Cell::text(value)])
                .collect(),
            widths: vec![ColumnWidth::Star, ColumnWidth::Auto],
            border: BorderStyle::Grid,
        }
    }

    /// Number of columns of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl ContentNode {
    /// Section that exists only when it has something to show.
    pub fn section(title: impl Into<String>, children: Vec<ContentNode>) -> Option<Self> {
        if children.is_empty() {
            return None;
        }
        Some(ContentNode::Section {
            title: title.into(),
            children,
        })
    }

    /// Label line that exists only when the value does.
    pub fn label_text(label: impl Into<String>, value: Option<&str>) -> Option<Self> {
        value.map(|value| ContentNode::LabelText {
            label: label.into(),
            value: value.to_string(),
        })
    }

    /// Styled text.
    pub fn formatted(text: impl Into<String>, styles: &[TextStyle]) -> Self {
        ContentNode::FormattedText {
            text: text.into(),
            styles: styles.to_vec(),
        }
    }

    /// Title of a section node.
    pub fn title(&self) -> Option<&str> {
        match self {
            ContentNode::Section { title, .. } => Some(title),
            _ => None,
        }
    }

    /// Direct children of a section node.
    pub fn children(&self) -> &[ContentNode] {
        match self {
            ContentNode::Section { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first search for a section by title.
    pub fn find_section(&self, title: &str) -> Option<&ContentNode> {
        if self.title() == Some(title) {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_section(title))
    }

    /// Every section in the tree, depth first, self included.
    pub fn sections(&self) -> Vec<&ContentNode> {
        let mut found = Vec::new();
        self.collect_sections(&mut found);
        found
    }

    fn collect_sections<'a>(&'a self, found: &mut Vec<&'a ContentNode>) {
        if let ContentNode::Section { children, .. } = self {
            found.push(self);
            for child in children {
                child.collect_sections(found);
            }
        }
    }

    /// Value of the first label line (or two-column table row) with `label`.
    pub fn find_value(&self, label: &str) -> Option<&str> {
        match self {
            ContentNode::LabelText { label: l, value } if l == label => Some(value.as_str()),
            ContentNode::Table(table) => table.rows.iter().find_map(|row| match row.as_slice() {
                [caption, value] if caption.text == label => Some(value.text.as_str()),
                _ => None,
            }),
            ContentNode::Section { children, .. } => {
                children.iter().find_map(|child| child.find_value(label))
            }
            _ => None,
        }
    }

    /// All text in the tree, one entry per leaf, depth first.
    pub fn plain_text(&self) -> Vec<String> {
        match self {
            ContentNode::Section { title, children } => std::iter::once(title.clone())
                .chain(children.iter().flat_map(ContentNode::plain_text))
                .collect(),
            ContentNode::Table(table) => table
                .rows
                .iter()
                .flat_map(|row| row.iter().map(|cell| cell.text.clone()))
                .collect(),
            ContentNode::LabelText { label, value } => vec![format!("{}{}", label, value)],
            ContentNode::FormattedText { text, .. } => vec![text.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section_is_dropped() {
        assert_eq!(ContentNode::section("Adres", Vec::new()), None);
        assert!(ContentNode::section("Adres", vec![ContentNode::formatted("x", &[])]).is_some());
    }

    #[test]
    fn test_absent_label_is_dropped() {
        assert_eq!(ContentNode::label_text("NIP: ", None), None);
        assert_eq!(
            ContentNode::label_text("NIP: ", Some("1")),
            Some(ContentNode::LabelText {
                label: "NIP: ".to_string(),
                value: "1".to_string()
            })
        );
    }

    #[test]
    fn test_find_value_in_key_value_table() {
        let node = ContentNode::Section {
            title: "Rachunek".to_string(),
            children: vec![ContentNode::Table(Table::key_value(vec![(
                "Kod SWIFT".to_string(),
                "BPKOPLPW".to_string(),
            )]))],
        };
        assert_eq!(node.find_value("Kod SWIFT"), Some("BPKOPLPW"));
        assert_eq!(node.find_value("Nazwa banku"), None);
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let node = ContentNode::label_text("Tel.: ", Some("123")).unwrap();
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "label_text");
        assert_eq!(json["value"], "123");
    }
}
