//! Parse raw XML into a generic document tree

use crate::config::ParserConfig;
use crate::error::DocumentError;
use crate::tree::{XmlElement, XmlNode};
use indexmap::map::Entry;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Display;

/// Converts XML text into an [`XmlElement`] tree
///
/// The returned element is a synthetic document node whose only child is
/// the document's root element, so callers locate the root by tag like any
/// other child.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    config: ParserConfig,
}

impl DocumentParser {
    /// Create a parser with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a document
    pub fn parse(&self, xml: &str) -> Result<XmlElement, DocumentError> {
        parse_document(xml, &self.config)
    }
}

/// Parse a document with an explicit configuration
pub fn parse_document(xml: &str, config: &ParserConfig) -> Result<XmlElement, DocumentError> {
    if xml.len() > config.max_document_bytes {
        return Err(DocumentError::TooLarge {
            size: xml.len(),
            max: config.max_document_bytes,
        });
    }

    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    if xml.trim().is_empty() {
        return Err(DocumentError::Empty);
    }

    let mut reader = Reader::from_str(xml);
    reader.check_end_names(true);

    let mut builder = TreeBuilder::new(config);

    loop {
        let position = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let frame = builder.open(&start, position)?;
                builder.stack.push(frame);
            }
            Ok(Event::Empty(start)) => {
                let frame = builder.open(&start, position)?;
                builder.close(frame);
            }
            Ok(Event::End(_)) => {
                let frame = builder.stack.pop().ok_or_else(|| {
                    malformed(position, "closing tag without matching opening tag")
                })?;
                builder.close(frame);
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(|e| malformed(position, e))?;
                builder.append_text(&text)?;
            }
            Ok(Event::CData(data)) => {
                let data = data.into_inner();
                builder.append_text(&String::from_utf8_lossy(&data))?;
            }
            Ok(Event::Eof) => break,
            // Declaration, comments, processing instructions, DOCTYPE
            Ok(_) => {}
            Err(e) => return Err(malformed(position, e)),
        }
    }

    if let Some(open) = builder.stack.last() {
        return Err(malformed(
            xml.len(),
            format!("unclosed element <{}>", open.name),
        ));
    }

    let (name, root) = builder.root.ok_or(DocumentError::NoRootElement)?;
    Ok(XmlElement::default().with_child(name, XmlNode::One(root)))
}

/// An element whose closing tag has not been seen yet
struct Frame {
    name: String,
    element: XmlElement,
}

struct TreeBuilder<'c> {
    config: &'c ParserConfig,
    stack: Vec<Frame>,
    root: Option<(String, XmlElement)>,
}

impl<'c> TreeBuilder<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            stack: Vec::new(),
            root: None,
        }
    }

    fn open(&self, start: &BytesStart<'_>, position: usize) -> Result<Frame, DocumentError> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(DocumentError::MultipleRootElements);
        }
        if self.stack.len() >= self.config.max_depth {
            return Err(DocumentError::TooDeep {
                max: self.config.max_depth,
            });
        }

        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut element = XmlElement::default();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| malformed(position, e))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| malformed(position, e))?
                .into_owned();
            element.attributes.insert(key, value);
        }

        Ok(Frame { name, element })
    }

    fn close(&mut self, frame: Frame) {
        let Frame { name, mut element } = frame;
        element.text = finish_text(&element.text, self.config);

        let Some(parent) = self.stack.last_mut() else {
            self.root = Some((name, element));
            return;
        };

        match parent.element.children.entry(name) {
            Entry::Occupied(mut occupied) => occupied.get_mut().push(element),
            Entry::Vacant(vacant) => {
                let node = if self.config.explicit_sequences {
                    XmlNode::Many(vec![element])
                } else {
                    XmlNode::One(element)
                };
                vacant.insert(node);
            }
        }
    }

    fn append_text(&mut self, text: &str) -> Result<(), DocumentError> {
        match self.stack.last_mut() {
            Some(frame) => {
                frame.element.text.push_str(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(DocumentError::TextOutsideRoot),
        }
    }
}

fn finish_text(raw: &str, config: &ParserConfig) -> String {
    let text = if config.normalize_whitespace {
        collapse_whitespace(raw)
    } else {
        raw.to_string()
    };

    if config.trim_text {
        text.trim().to_string()
    } else {
        text
    }
}

/// Replace every run of whitespace with a single space
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_whitespace = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}

fn malformed(position: usize, reason: impl Display) -> DocumentError {
    DocumentError::Malformed {
        position,
        reason: reason.to_string(),
    }
}
