use std::{borrow::Cow, io::BufRead};

use quick_xml::{
    events::{BytesStart, BytesText, Event},
    Reader,
};
use thiserror::Error;

use super::{Element, Node, XmlDocument, MAX_DEPTH};

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("XML elements nested deeper than {max_depth} levels")]
    TooDeep { max_depth: usize },
}

/// Assembles an [`XmlDocument`] from the `quick-xml` event stream.
#[derive(Debug, Default)]
pub(super) struct DocumentBuilder {
    document: XmlDocument,
    open_elements: Vec<Element>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn build<R: BufRead>(mut self, xml: R) -> Result<XmlDocument, DocumentError> {
        let mut reader = Reader::from_reader(xml);

        let mut buf = Vec::new();
        loop {
            if self
                .match_event(reader.read_event_into(&mut buf)?)?
                .is_none()
            {
                break;
            }
            buf.clear();
        }

        // Anything left open at EOF is closed in place.
        while !self.open_elements.is_empty() {
            self.close_element();
        }

        Ok(self.document)
    }

    fn match_event(&mut self, event: Event) -> Result<Option<()>, DocumentError> {
        match event {
            Event::Eof => return Ok(None),
            Event::Start(e) => self.open_element(&e)?,
            Event::End(..) => self.close_element(),
            Event::Empty(e) => {
                self.open_element(&e)?;
                self.close_element();
            }
            Event::Text(e) => self.push_text(&e),
            Event::CData(e) => {
                if let Ok(e) = e.minimal_escape() {
                    self.push_text(&e);
                }
            }
            _ => (),
        };
        Ok(Some(()))
    }

    fn open_element(&mut self, e: &BytesStart) -> Result<(), DocumentError> {
        if self.open_elements.len() >= MAX_DEPTH {
            return Err(DocumentError::TooDeep {
                max_depth: MAX_DEPTH,
            });
        }
        let mut element = Element::new(String::from_utf8_lossy(e.name().as_ref()));
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map(Cow::into_owned)
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            element.push_attribute(key, value);
        }
        self.open_elements.push(element);
        Ok(())
    }

    fn close_element(&mut self) {
        if let Some(element) = self.open_elements.pop() {
            self.push_node(Node::Element(element));
        }
    }

    fn push_text(&mut self, e: &BytesText) {
        let text = match e.unescape() {
            Ok(text) => text.into_owned(),
            Err(..) => String::from_utf8_lossy(e).into_owned(),
        };
        if !text.is_empty() {
            self.push_node(Node::Text(text));
        }
    }

    fn push_node(&mut self, node: Node) {
        match self.open_elements.last_mut() {
            Some(parent) => parent.push_child(node),
            None => self.document.push_child(node),
        }
    }
}
