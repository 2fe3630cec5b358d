//! Decoding of the XML schedule feed.
//!
//! The input is first read into a small generic element tree with
//! `quick-xml`, then each `event` child of the root is turned into an
//! [`EventRecord`] by name lookups with explicit defaults. Missing fields are
//! never an error; only malformed markup and unparseable datetimes are.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::error::{ConvertError, ConvertResult};
use crate::event::{EventRecord, PLACEHOLDER_ID};
use crate::recurrence::RecurrenceSpec;
use crate::time::parse_feed_datetime;

/// A node in the parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its attributes and children, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builds an element from a start tag, unescaping attribute values.
    fn from_start(start: &BytesStart<'_>) -> ConvertResult<Self> {
        let mut element = Self::new(String::from_utf8_lossy(start.name().as_ref()));
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ConvertError::xml(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| ConvertError::xml(e.to_string()))?;
            element.attributes.push((key, value.into_owned()));
        }
        Ok(element)
    }

    /// Returns the element's qualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of the named attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Returns the child elements with the given name.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |el| el.name == name)
    }

    /// Returns the first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|el| el.name == name)
    }

    /// Returns the text content of the first child with the given name.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(Element::text_content)
    }

    /// Returns all descendant text, concatenated in document order.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    fn push_text(&mut self, text: String) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(&text);
        } else {
            self.children.push(Node::Text(text));
        }
    }
}

/// Parses an XML document into its root element.
///
/// # Errors
///
/// Returns [`ConvertError::XmlStructure`] for malformed markup, a missing
/// root element, or content after the root element.
pub fn parse_document(xml: &str) -> ConvertResult<Element> {
    let xml = xml.strip_prefix('\u{FEFF}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            ConvertError::xml(format!("{} at position {}", e, reader.buffer_position()))
        })?;

        match event {
            Event::Start(start) => {
                ensure_single_root(&stack, &root)?;
                stack.push(Element::from_start(&start)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&stack, &root)?;
                let element = Element::from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(end) => {
                let element = stack.pop().ok_or_else(|| {
                    ConvertError::xml(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    ))
                })?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| ConvertError::xml(e.to_string()))?;
                push_text(&mut stack, text.into_owned())?;
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                push_text(&mut stack, text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ConvertError::xml(format!(
            "unclosed element <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| ConvertError::xml("no root element found"))
}

fn ensure_single_root(stack: &[Element], root: &Option<Element>) -> ConvertResult<()> {
    if stack.is_empty() && root.is_some() {
        return Err(ConvertError::xml("content after the root element"));
    }
    Ok(())
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

fn push_text(stack: &mut [Element], text: String) -> ConvertResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.push_text(text),
        None if text.trim().is_empty() => {}
        None => return Err(ConvertError::xml("text outside the root element")),
    }
    Ok(())
}

/// Decodes a `recurrence` element.
pub fn decode_recurrence(element: &Element) -> RecurrenceSpec {
    let attr = |name: &str| element.attribute(name).map(str::to_string);
    RecurrenceSpec {
        frequency: attr("type"),
        interval: attr("repeat_every"),
        until: attr("until_date"),
        until_misspelled: attr("unitil_date"),
        active_days: attr("repeat_on"),
    }
}

/// Decodes an `event` element.
///
/// # Errors
///
/// Returns an error if `start_date` or `end_date` is present but unparseable.
pub fn decode_event(element: &Element) -> ConvertResult<EventRecord> {
    let start = parse_feed_datetime(element.child_text("start_date").as_deref())?;
    let end = parse_feed_datetime(element.child_text("end_date").as_deref())?;

    let is_all_day = element
        .attribute("is_allday_event")
        .is_some_and(|v| v.eq_ignore_ascii_case("true"));

    let record = EventRecord {
        id: element
            .attribute("id")
            .unwrap_or(PLACEHOLDER_ID)
            .to_string(),
        title: element
            .child_text("title")
            .map(|t| t.trim().to_string())
            .unwrap_or_default(),
        description: None,
        location: None,
        start,
        end,
        is_all_day,
        recurrence: element.child("recurrence").map(decode_recurrence),
    }
    .with_description(element.child_text("description").unwrap_or_default())
    .with_location(element.child_text("location").unwrap_or_default());

    debug!(
        id = %record.id,
        title = %record.title,
        start = ?record.start,
        all_day = record.is_all_day,
        "Decoded event from feed"
    );

    Ok(record)
}

/// Parses a feed document and decodes every `event` child of the root.
///
/// Events are returned in document order.
///
/// # Errors
///
/// Returns the first structural or datetime error encountered.
pub fn decode_feed(xml: &str) -> ConvertResult<Vec<EventRecord>> {
    let root = parse_document(xml)?;
    root.elements_named("event").map(decode_event).collect()
}
