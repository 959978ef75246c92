//! Layout serialization: two-space indent, one tag per line, element text
//! kept inline (`<pos>0.5 0.4</pos>`).

use anyhow::Result;
use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

use super::{Content, Document, Node};

const INDENT_SIZE: usize = 2;

/// Serialize a document to text.
pub fn write_document(doc: &Document) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    write_node(&mut writer, &doc.root)?;

    let mut out = String::from_utf8(writer.into_inner())?;
    out.push('\n');
    Ok(out)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
    let mut start = BytesStart::new(node.name.as_str());
    for attr in &node.attributes {
        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
    }

    if node.text.is_none() && node.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &node.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &node.children {
        match child {
            Content::Element(child) => write_node(writer, child)?,
            Content::Comment(body) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(body.as_str())))?;
            }
            Content::Text(text) => {
                writer.write_event(Event::Text(BytesText::new(text)))?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::parse_document;

    #[test]
    fn test_one_tag_per_line() {
        let root = Node::new("theme").with_child(
            Node::new("view")
                .with_attr("name", "system")
                .with_child(Node::new("pos").with_text("0.5 0.4"))
                .with_child(Node::new("spacer")),
        );
        let out = write_document(&Document::new(root)).unwrap();
        let lines: Vec<_> = out
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        assert_eq!(
            lines,
            [
                "<theme>",
                "<view name=\"system\">",
                "<pos>0.5 0.4</pos>",
                "<spacer/>",
                "</view>",
                "</theme>",
            ]
        );
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let root = Node::new("t")
            .with_attr("a", "x & \"y\"")
            .with_text("1 < 2");
        let out = write_document(&Document::new(root)).unwrap();

        assert!(out.contains("&amp;"));
        assert!(out.contains("1 &lt; 2"));
    }

    #[test]
    fn test_trailing_text_is_written_in_place() {
        let doc = parse_document("<theme><pos>10<!-- x -->20</pos></theme>").unwrap();
        let out = write_document(&doc).unwrap();

        assert!(out.contains("<pos>10<!-- x -->20</pos>"));
        assert_eq!(parse_document(&out).unwrap(), doc);
    }

    #[test]
    fn test_reparse_yields_same_tree() {
        let source = r#"<theme><view name="a &amp; b"><!-- note --><pos>1 2</pos><size>3</size></view></theme>"#;
        let doc = parse_document(source).unwrap();
        let out = write_document(&doc).unwrap();
        assert_eq!(parse_document(&out).unwrap(), doc);
    }
}
