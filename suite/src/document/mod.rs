//! A small owned XML tree with DOM-style lookups.
//!
//! Allure 1 reports are queried the way a browser DOM would query them:
//! descendant lookup by qualified tag name, attribute lookup and ordered
//! access to child and text nodes. [`XmlDocument`] supplies exactly that on
//! top of `quick-xml`.

use std::io::BufRead;

mod reader;

pub use reader::DocumentError;

/// Deepest element nesting a document may have. Lookups, cloning and
/// dropping walk the tree recursively, so the cap bounds their stack use.
pub const MAX_DEPTH: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlDocument {
    children: Vec<Node>,
}

impl XmlDocument {
    pub fn parse<R: BufRead>(xml: R) -> Result<Self, DocumentError> {
        reader::DocumentBuilder::new().build(xml)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str<T: AsRef<str>>(xml: T) -> Result<Self, DocumentError> {
        Self::parse(xml.as_ref().as_bytes())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Every element in the document named `tag`, in document order.
    pub fn elements_by_tag_name(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_by_tag_name(&self.children, tag, &mut found);
        found
    }

    pub fn first_element_by_tag_name(&self, tag: &str) -> Option<&Element> {
        find_first_by_tag_name(&self.children, tag)
    }

    pub(crate) fn push_child(&mut self, node: Node) {
        self.children.push(node);
    }
}

impl Element {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Descendants (not including `self`) named `tag`, in document order.
    pub fn elements_by_tag_name(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_by_tag_name(&self.children, tag, &mut found);
        found
    }

    pub fn first_element_by_tag_name(&self, tag: &str) -> Option<&Element> {
        find_first_by_tag_name(&self.children, tag)
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        append_text(&self.children, &mut text);
        text
    }

    /// The value of the first child node when that node is text.
    pub fn first_child_text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Node::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub(crate) fn push_attribute(&mut self, name: String, value: String) {
        self.attributes.push((name, value));
    }

    pub(crate) fn push_child(&mut self, node: Node) {
        self.children.push(node);
    }
}

fn collect_by_tag_name<'a>(nodes: &'a [Node], tag: &str, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(element) = node {
            if element.name == tag {
                found.push(element);
            }
            collect_by_tag_name(&element.children, tag, found);
        }
    }
}

fn find_first_by_tag_name<'a>(nodes: &'a [Node], tag: &str) -> Option<&'a Element> {
    nodes.iter().find_map(|node| match node {
        Node::Element(element) if element.name == tag => Some(element),
        Node::Element(element) => find_first_by_tag_name(&element.children, tag),
        Node::Text(..) => None,
    })
}

fn append_text(nodes: &[Node], text: &mut String) {
    for node in nodes {
        match node {
            Node::Text(value) => text.push_str(value),
            Node::Element(element) => append_text(&element.children, text),
        }
    }
}
