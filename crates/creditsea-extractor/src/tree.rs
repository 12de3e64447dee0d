//! Generic document tree produced by the parser
//!
//! A parsed document is a tree of [`XmlElement`]s. Children are keyed by tag
//! name; a tag that occurs once may be held as [`XmlNode::One`] and a tag
//! that repeats as [`XmlNode::Many`]. Readers never branch on that
//! distinction: [`XmlNode::as_slice`] coerces either form to a sequence.

use indexmap::IndexMap;

/// One element: attributes, character data and named children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Attributes in document order
    pub attributes: IndexMap<String, String>,

    /// Character data directly inside this element
    pub text: String,

    /// Child elements keyed by tag, in order of first appearance
    pub children: IndexMap<String, XmlNode>,
}

/// All occurrences of one tag under a parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// A single occurrence
    One(XmlElement),

    /// Zero or more occurrences in document order
    Many(Vec<XmlElement>),
}

impl XmlNode {
    /// Coerce to a sequence: a single occurrence becomes a one-element slice
    pub fn as_slice(&self) -> &[XmlElement] {
        match self {
            XmlNode::One(element) => std::slice::from_ref(element),
            XmlNode::Many(elements) => elements,
        }
    }

    /// First occurrence, if any
    pub fn first(&self) -> Option<&XmlElement> {
        self.as_slice().first()
    }

    /// Number of occurrences
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether there are no occurrences
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Append another occurrence, promoting a single node to a sequence
    pub(crate) fn push(&mut self, element: XmlElement) {
        match self {
            XmlNode::Many(elements) => elements.push(element),
            XmlNode::One(_) => {
                if let XmlNode::One(first) = std::mem::replace(self, XmlNode::Many(Vec::new())) {
                    *self = XmlNode::Many(vec![first, element]);
                }
            }
        }
    }
}

impl XmlElement {
    /// Create an element holding only text
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Builder-style child insertion, for constructing trees in code
    pub fn with_child(mut self, tag: impl Into<String>, node: XmlNode) -> Self {
        self.children.insert(tag.into(), node);
        self
    }

    /// All occurrences of a tag, as stored
    pub fn node(&self, tag: &str) -> Option<&XmlNode> {
        self.children.get(tag)
    }

    /// First occurrence of a child tag
    pub fn child(&self, tag: &str) -> Option<&XmlElement> {
        self.node(tag).and_then(XmlNode::first)
    }

    /// All occurrences of a child tag; empty when absent
    pub fn children(&self, tag: &str) -> &[XmlElement] {
        self.node(tag).map(XmlNode::as_slice).unwrap_or(&[])
    }

    /// Follow a path of tags, taking the first occurrence at each step
    ///
    /// An empty path returns `self`.
    pub fn path(&self, tags: &[&str]) -> Option<&XmlElement> {
        tags.iter().try_fold(self, |element, tag| element.child(tag))
    }

    /// Text of the element at `tags`, or `None` when the path is absent
    pub fn text_at(&self, tags: &[&str]) -> Option<&str> {
        self.path(tags).map(|element| element.text.as_str())
    }

    /// Every occurrence of the last tag in `tags`, below the first occurrence
    /// of each preceding tag; empty when any step is absent
    pub fn all_at(&self, tags: &[&str]) -> &[XmlElement] {
        match tags.split_last() {
            Some((last, parents)) => self
                .path(parents)
                .map(|parent| parent.children(last))
                .unwrap_or(&[]),
            None => std::slice::from_ref(self),
        }
    }

    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
