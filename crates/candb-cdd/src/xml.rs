//! Minimal owned XML element tree built on quick-xml
//!
//! Only what the CDD loader navigates is kept: element names, attributes,
//! leading text and children. As with ElementTree's `.text`, an element's
//! text is the untrimmed content before its first child; text after a child
//! is dropped. Comments, processing instructions and the XML
//! declaration are dropped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("xml: {0}")]
    Xml(String),
    #[error("invalid document: {0}")]
    Invalid(String),
}

impl From<quick_xml::Error> for XmlError {
    fn from(err: quick_xml::Error) -> Self {
        XmlError::Xml(err.to_string())
    }
}

/// An XML element with its attributes, text and child elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attribute value, unescaped
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Text before the first child, `None` when there is none
    pub fn text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    /// First direct child with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First element matching a slash-separated path of child names
    pub fn find(&self, path: &str) -> Option<&Element> {
        let segments: Vec<&str> = path.split('/').collect();
        find_first(self, &segments)
    }

    /// Every element matching a slash-separated path, in document order
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        let segments: Vec<&str> = path.split('/').collect();
        let mut found = Vec::new();
        collect_all(self, &segments, &mut found);
        found
    }
}

fn find_first<'a>(element: &'a Element, segments: &[&str]) -> Option<&'a Element> {
    let (head, rest) = segments.split_first()?;
    for child in element.children.iter().filter(|c| c.name == *head) {
        if rest.is_empty() {
            return Some(child);
        }
        if let Some(found) = find_first(child, rest) {
            return Some(found);
        }
    }
    None
}

fn collect_all<'a>(element: &'a Element, segments: &[&str], found: &mut Vec<&'a Element>) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    for child in element.children.iter().filter(|c| c.name == *head) {
        if rest.is_empty() {
            found.push(child);
        } else {
            collect_all(child, rest, found);
        }
    }
}

/// Parse a document and return its root element
pub fn parse(xml: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if root.is_some() {
                    return Err(XmlError::Invalid("content after root element".into()));
                }
                stack.push(element_from_start(&e)?);
            }
            Event::Empty(e) => {
                let element = element_from_start(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(e) => {
                let element = stack.pop().ok_or_else(|| {
                    XmlError::Invalid(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(e) => {
                let text = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|err| XmlError::Xml(err.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Invalid(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| XmlError::Invalid("document has no root element".into()))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|err| XmlError::Xml(err.to_string()))?
        .to_string();
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|err| XmlError::Xml(err.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| XmlError::Xml(err.to_string()))?
            .to_string();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(XmlError::Invalid("content after root element".into()));
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(element) if element.children.is_empty() => element.text.push_str(text),
        Some(_) => {}
        None if text.trim().is_empty() => {}
        None => return Err(XmlError::Invalid("text outside root element".into())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!-- header -->
<A>
  <B id="1"><C>first</C></B>
  <B id="2"><C>second</C><C>third</C></B>
  <D note="a &amp; b"><![CDATA[<raw>]]></D>
  <E/>
</A>"#;

    #[test]
    fn test_parse_structure() {
        let root = parse(DOC).unwrap();

        assert_eq!(root.name, "A");
        assert_eq!(root.children().count(), 4);
        assert_eq!(root.child("B").and_then(|b| b.attr("id")), Some("1"));
        assert_eq!(root.children_named("B").count(), 2);
        assert!(root.child("Z").is_none());
    }

    #[test]
    fn test_find_paths() {
        let root = parse(DOC).unwrap();

        assert_eq!(root.find("B/C").and_then(Element::text), Some("first"));
        let all: Vec<_> = root
            .find_all("B/C")
            .into_iter()
            .filter_map(Element::text)
            .collect();
        assert_eq!(all, vec!["first", "second", "third"]);
        assert!(root.find("B/X").is_none());
        assert!(root.find_all("X/C").is_empty());
    }

    #[test]
    fn test_text_and_attributes_are_unescaped() {
        let root = parse(DOC).unwrap();
        let d = root.child("D").unwrap();

        assert_eq!(d.attr("note"), Some("a & b"));
        assert_eq!(d.text(), Some("<raw>"));
        assert_eq!(root.child("E").unwrap().text(), None);
    }

    #[test]
    fn test_text_is_leading_and_untrimmed() {
        let root = parse("<A><Q> M x </Q><U> </U><T>a<X/>b</T></A>").unwrap();

        assert_eq!(root.child("Q").and_then(Element::text), Some(" M x "));
        assert_eq!(root.child("U").and_then(Element::text), Some(" "));
        assert_eq!(root.child("T").and_then(Element::text), Some("a"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse("").is_err());
        assert!(parse("<A><B></A>").is_err());
        assert!(parse("<A>").is_err());
        assert!(parse("<A/><B/>").is_err());
        assert!(parse("plain text").is_err());
    }
}
