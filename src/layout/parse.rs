//! Layout parsing.
//!
//! Text, CDATA and entity references before an element's first child fold
//! into its text value; runs after a child become [`Content::Text`] tails so
//! `<pos>10<!-- x -->20</pos>` keeps `10` and `20` apart. Text is kept as
//! written, only whitespace-only runs are dropped. Comments inside the root
//! element are kept, everything outside it (declaration, doctype, processing
//! instructions, comments) is skipped.

use std::borrow::Cow;

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use super::{Attribute, Content, Document, Node};
use crate::scale::ScaleError;

/// An element being built.
struct Frame {
    node: Node,
    /// Text before the first child.
    text: String,
    /// Text since the last child.
    tail: String,
    seen_child: bool,
}

impl Frame {
    fn new(node: Node) -> Self {
        Self {
            node,
            text: String::new(),
            tail: String::new(),
            seen_child: false,
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.seen_child {
            self.tail.push_str(text);
        } else {
            self.text.push_str(text);
        }
    }

    fn push_child(&mut self, child: Content) {
        self.flush_tail();
        self.node.children.push(child);
        self.seen_child = true;
    }

    fn flush_tail(&mut self) {
        let tail = std::mem::take(&mut self.tail);
        if !tail.trim().is_empty() {
            self.node.children.push(Content::Text(tail));
        }
    }

    fn finish(mut self) -> Node {
        self.flush_tail();
        if !self.text.trim().is_empty() {
            self.node.text = Some(self.text);
        }
        self.node
    }
}

/// Parse a layout document.
pub fn parse_document(source: &str) -> Result<Document, ScaleError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(elem)) => {
                let node = start_node(&reader, &elem)?;
                stack.push(Frame::new(node));
            }
            Ok(Event::Empty(elem)) => {
                let node = start_node(&reader, &elem)?;
                attach(&mut stack, &mut root, node, position)?;
            }
            Ok(Event::End(_)) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| ScaleError::malformed(position, "unexpected end tag"))?;
                attach(&mut stack, &mut root, frame.finish(), position)?;
            }
            Ok(Event::Text(text)) => {
                let text = text.decode().map_err(|e| malformed(&reader, e))?;
                push_text(&mut stack, &text, position)?;
            }
            Ok(Event::CData(cdata)) => {
                let text = reader
                    .decoder()
                    .decode(&cdata)
                    .map_err(|e| malformed(&reader, e))?;
                push_text(&mut stack, &text, position)?;
            }
            Ok(Event::GeneralRef(entity)) => {
                let name = entity.decode().map_err(|e| malformed(&reader, e))?;
                let escaped = format!("&{name};");
                let resolved =
                    quick_xml::escape::unescape(&escaped).map_err(|e| malformed(&reader, e))?;
                push_text(&mut stack, &resolved, position)?;
            }
            Ok(Event::Comment(comment)) => {
                if let Some(frame) = stack.last_mut() {
                    let body = comment.decode().map_err(|e| malformed(&reader, e))?;
                    frame.push_child(Content::Comment(body.into_owned()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ScaleError::malformed(
                    reader.error_position(),
                    e.to_string(),
                ));
            }
        }
    }

    if let Some(frame) = stack.last() {
        return Err(ScaleError::malformed(
            reader.buffer_position(),
            format!("unclosed element <{}>", frame.node.name),
        ));
    }

    root.map(Document::new)
        .ok_or_else(|| ScaleError::malformed(0, "no root element"))
}

fn malformed(reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> ScaleError {
    ScaleError::malformed(reader.buffer_position(), err.to_string())
}

/// Build a node from a start tag: name plus attributes in document order.
fn start_node(reader: &Reader<&[u8]>, elem: &BytesStart<'_>) -> Result<Node, ScaleError> {
    let decoder = reader.decoder();
    let qname = elem.name();
    let name = decoder
        .decode(qname.as_ref())
        .map_err(|e| malformed(reader, e))?;

    let mut node = Node::new(name);
    for attr in elem.attributes() {
        let attr = attr.map_err(|e| malformed(reader, e))?;
        let key = decoder
            .decode(attr.key.as_ref())
            .map_err(|e| malformed(reader, e))?;
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(|e| malformed(reader, e))?;
        node.attributes.push(Attribute {
            name: key.into_owned(),
            value: value.into_owned(),
        });
    }
    Ok(node)
}

/// Hang a finished element under its parent, or make it the root.
fn attach(
    stack: &mut [Frame],
    root: &mut Option<Node>,
    node: Node,
    position: u64,
) -> Result<(), ScaleError> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(Content::Element(node)),
        None if root.is_some() => {
            return Err(ScaleError::malformed(
                position,
                format!("multiple root elements (second is <{}>)", node.name),
            ));
        }
        None => *root = Some(node),
    }
    Ok(())
}

fn push_text(stack: &mut [Frame], text: &Cow<'_, str>, position: u64) -> Result<(), ScaleError> {
    match stack.last_mut() {
        Some(frame) => frame.push_text(text),
        None if text.trim().is_empty() => {}
        None => {
            return Err(ScaleError::malformed(
                position,
                "text outside the root element",
            ));
        }
    }
    Ok(())
}
