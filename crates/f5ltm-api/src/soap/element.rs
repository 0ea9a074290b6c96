// Response tree for decoded SOAP envelopes.
//
// Tags are stored by local name; namespace prefixes are dropped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::Error;

/// One decoded XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Local tag name (`item`, `address`, `get_listResponse`, ...).
    pub name: String,
    /// Concatenated text content, if any.
    pub text: Option<String>,
    /// `xsi:nil="true"` was present.
    pub nil: bool,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// First child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Array members (`<item>` children) in document order.
    pub fn items(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter(|c| c.name == "item")
    }

    /// Text content, empty when the element carries none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Text of a named child field.
    pub fn field_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Element::text)
    }
}

/// Parse an XML document into an [`Element`] tree rooted at the document element.
pub fn parse(xml: &str) -> Result<Element, Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(start_element(&e)?),
            Event::Empty(e) => {
                let node = start_element(&e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::Xml(e.to_string()))?
                        .into_owned();
                    append_text(current, &text);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    let text = std::str::from_utf8(e.as_ref())
                        .map_err(|e| Error::Xml(e.to_string()))?
                        .to_owned();
                    append_text(current, &text);
                }
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| Error::Xml("closing tag without open tag".into()))?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::Xml("unclosed element(s) at end of document".into()));
    }

    root.ok_or_else(|| Error::Xml("no root element found".into()))
}

fn start_element(e: &BytesStart<'_>) -> Result<Element, Error> {
    let name = std::str::from_utf8(e.local_name().as_ref())
        .map_err(|e| Error::Xml(e.to_string()))?
        .to_owned();
    let mut element = Element::new(name);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        if attr.key.local_name().as_ref() == b"nil" && attr.value.as_ref() == b"true" {
            element.nil = true;
        }
    }

    Ok(element)
}

fn append_text(element: &mut Element, text: &str) {
    // Leading all-blank runs are indentation between child elements.
    if text.trim().is_empty() && element.text.is_none() {
        return;
    }
    match &mut element.text {
        Some(existing) => existing.push_str(text),
        None => element.text = Some(text.to_owned()),
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    node: Element,
) -> Result<(), Error> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        Ok(())
    } else if root.is_none() {
        *root = Some(node);
        Ok(())
    } else {
        Err(Error::Xml("multiple top-level elements found".into()))
    }
}
