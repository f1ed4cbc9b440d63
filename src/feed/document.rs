//! Minimal owned XML document model with selector-style queries.
//!
//! The feed pipeline only needs two queries: every element with a given tag
//! name (`item`), and the text of the first descendant with a given tag name
//! (`title`, `link`, ...). Tag names are compared on their local part, so
//! `dc:title` and `title` both answer to `title`.

use tracing::warn;

/// Media type the feed document is parsed as
pub const XML_MIME_TYPE: &str = "text/xml";

const XML_MIME_TYPES: &[&str] = &[
    "text/xml",
    "application/xml",
    "application/xhtml+xml",
    "image/svg+xml",
];

const PARSER_ERROR_TAG: &str = "parsererror";

/// A node the feed normalizer can read named fields from
pub trait ItemNode {
    /// Text content of the first descendant named `selector`, or `None` when
    /// no such element exists
    fn query_selector(&self, selector: &str) -> Option<String>;
}

impl<T: ItemNode + ?Sized> ItemNode for &T {
    fn query_selector(&self, selector: &str) -> Option<String> {
        (**self).query_selector(selector)
    }
}

/// Turns raw text into a queryable document.
///
/// Parsing never fails outright: like a browser DOM parser, malformed input
/// produces a document whose root is a `parsererror` element.
pub trait DomParser: Send + Sync {
    fn parse_from_str(&self, text: &str, mime_type: &str) -> XmlDocument;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    tag: String,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Direct element children, in document order
    pub fn child_elements(&self) -> impl DoubleEndedIterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// All descendant elements in document order, excluding `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.child_elements().rev().collect(),
        }
    }

    /// Concatenated text of this element and all its descendants
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }
}

impl ItemNode for XmlElement {
    fn query_selector(&self, selector: &str) -> Option<String> {
        self.descendants()
            .find(|element| element.tag == selector)
            .map(XmlElement::text_content)
    }
}

/// Pre-order walk over an element subtree
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.child_elements().rev());
        Some(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// Document standing in for input that could not be parsed
    pub fn parser_error(message: impl Into<String>) -> Self {
        Self::new(XmlElement::new(PARSER_ERROR_TAG).with_text(message))
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn is_parser_error(&self) -> bool {
        self.root.tag == PARSER_ERROR_TAG
    }

    /// Every element named `selector`, root included, in document order
    pub fn query_selector_all(&self, selector: &str) -> Vec<&XmlElement> {
        std::iter::once(&self.root)
            .chain(self.root.descendants())
            .filter(|element| element.tag == selector)
            .collect()
    }
}

/// roxmltree-backed [`DomParser`]
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDomParser;

impl DomParser for XmlDomParser {
    fn parse_from_str(&self, text: &str, mime_type: &str) -> XmlDocument {
        if !XML_MIME_TYPES.contains(&mime_type) {
            warn!("Unsupported document media type: {}", mime_type);
            return XmlDocument::parser_error(format!("Unsupported media type: {mime_type}"));
        }

        // Old RSS 0.91 feeds still ship a DOCTYPE
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };

        match roxmltree::Document::parse_with_options(text, options) {
            Ok(document) => XmlDocument::new(convert_element(document.root_element())),
            Err(e) => {
                warn!("Failed to parse XML document: {}", e);
                XmlDocument::parser_error(e.to_string())
            }
        }
    }
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> XmlElement {
    let children = node
        .children()
        .filter_map(|child| {
            if child.is_element() {
                Some(XmlNode::Element(convert_element(child)))
            } else if child.is_text() {
                child.text().map(|text| XmlNode::Text(text.to_string()))
            } else {
                None
            }
        })
        .collect();

    XmlElement {
        tag: node.tag_name().name().to_string(),
        children,
    }
}
