//! Generic parsed-XML tree and uniform field access.
//!
//! The tree mirrors the compact shape most XML-to-object converters produce:
//! every element is a mapping from child tag name to a value, leaf text sits
//! next to the children, and repeated siblings collapse into a list. A value
//! may also be a bare string when a tree is assembled by hand.
//!
//! All wrapper unwrapping happens here. Builders call [`XmlElement::text`],
//! [`XmlElement::child`] and [`XmlElement::children`] and never look at the
//! [`XmlValue`] variants themselves.

mod parser;

pub use parser::parse;

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// A value stored under a tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlValue {
    /// Bare scalar text.
    Text(String),
    /// A single element.
    Element(XmlElement),
    /// Repeated sibling elements in source order.
    List(Vec<XmlValue>),
}

/// A parsed element: attributes, own text and named children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Attributes by local name.
    pub attributes: BTreeMap<String, String>,
    /// Text content of the element itself.
    pub text: Option<String>,
    /// Child values by local tag name.
    pub children: BTreeMap<String, XmlValue>,
}

impl XmlValue {
    /// The element behind this value, if it is one.
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlValue::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<&str> for XmlValue {
    fn from(text: &str) -> Self {
        XmlValue::Text(text.to_string())
    }
}

impl From<String> for XmlValue {
    fn from(text: String) -> Self {
        XmlValue::Text(text)
    }
}

impl From<XmlElement> for XmlValue {
    fn from(element: XmlElement) -> Self {
        XmlValue::Element(element)
    }
}

impl XmlElement {
    /// Create an empty element.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a leaf element wrapping `text`.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Add a child, turning the entry into a list on repetition.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<XmlValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a child value. A second value under the same name turns the
    /// entry into a [`XmlValue::List`].
    pub fn insert(&mut self, name: impl Into<String>, value: XmlValue) {
        match self.children.entry(name.into()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if let XmlValue::List(items) = existing {
                    items.push(value);
                } else {
                    let first = std::mem::replace(existing, XmlValue::List(Vec::new()));
                    *existing = XmlValue::List(vec![first, value]);
                }
            }
        }
    }

    /// Replace whatever is stored under `name`.
    pub fn set(&mut self, name: impl Into<String>, value: XmlValue) {
        self.children.insert(name.into(), value);
    }

    /// Raw value stored under `name`.
    pub fn field(&self, name: &str) -> Option<&XmlValue> {
        self.children.get(name)
    }

    /// Normalized text of the child `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        text(self.field(name))
    }

    /// Text of every repetition of the child `name`.
    pub fn texts(&self, name: &str) -> Vec<&str> {
        texts(self.field(name))
    }

    /// First child element called `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        list(self.field(name))
            .into_iter()
            .find_map(XmlValue::as_element)
    }

    /// Every child element called `name`, in source order.
    pub fn children(&self, name: &str) -> Vec<&XmlElement> {
        elements(self.field(name))
    }

    /// Follow a chain of first children.
    pub fn path(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter()
            .try_fold(self, |element, name| element.child(name))
    }

    /// Text at the end of a chain of children.
    pub fn path_text(&self, path: &[&str]) -> Option<&str> {
        let (last, parents) = path.split_last()?;
        self.path(parents)?.text(last)
    }

    /// Attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str).and_then(non_empty)
    }

    /// Whether the child `name` carries a value.
    pub fn has(&self, name: &str) -> bool {
        self.text(name).is_some()
    }

    /// Whether the child `name` is the schema's "yes" marker (`1`).
    pub fn is_set(&self, name: &str) -> bool {
        self.text(name) == Some("1")
    }

    /// Whether the element carries neither text nor children.
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().and_then(non_empty).is_none() && self.children.is_empty()
    }
}

/// Normalize a possibly absent, possibly wrapped value to plain text.
///
/// Whitespace-only text counts as absent. For a list the first entry wins.
pub fn text(value: Option<&XmlValue>) -> Option<&str> {
    match value? {
        XmlValue::Text(text) => non_empty(text),
        XmlValue::Element(element) => element.text.as_deref().and_then(non_empty),
        XmlValue::List(items) => items.iter().find_map(|item| text(Some(item))),
    }
}

/// Turn a value that may be absent, single or repeated into a sequence.
pub fn list(value: Option<&XmlValue>) -> Vec<&XmlValue> {
    match value {
        None => Vec::new(),
        Some(XmlValue::List(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// Like [`list`], keeping only elements.
pub fn elements(value: Option<&XmlValue>) -> Vec<&XmlElement> {
    list(value).into_iter().filter_map(XmlValue::as_element).collect()
}

/// Like [`list`], keeping only entries that carry text.
pub fn texts(value: Option<&XmlValue>) -> Vec<&str> {
    list(value)
        .into_iter()
        .filter_map(|item| text(Some(item)))
        .collect()
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
