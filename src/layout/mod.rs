//! Layout document tree.
//!
//! A minimal owned XML tree: elements with ordered unique attributes,
//! optional text, and ordered children (elements, comments, trailing text).
//!
//! | Module  | Purpose                                  |
//! |---------|------------------------------------------|
//! | `parse` | `quick-xml` reader into [`Document`]     |
//! | `write` | indented serialization, one tag per line |

mod parse;
mod write;

pub use parse::parse_document;
pub use write::write_document;

/// A rooted layout document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Number of elements, root included.
    pub fn element_count(&self) -> usize {
        self.root.element_count()
    }
}

/// An element child: nested element, comment, or text following a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Element(Node),
    Comment(String),
    /// Text after a child element or comment. Never scaled.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub text: Option<String>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Content>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Child elements, skipping comments and trailing text.
    pub fn elements(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(|child| match child {
            Content::Element(node) => Some(node),
            Content::Comment(_) | Content::Text(_) => None,
        })
    }

    /// First descendant element called `name`, in document order.
    pub fn find(&self, name: &str) -> Option<&Node> {
        self.elements().find_map(|node| {
            if node.name == name {
                Some(node)
            } else {
                node.find(name)
            }
        })
    }

    fn element_count(&self) -> usize {
        1 + self.elements().map(Node::element_count).sum::<usize>()
    }
}

#[cfg(test)]
impl Node {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_keeps_keys_unique() {
        let mut node = Node::new("image").with_attr("name", "logo");
        node.set_attr("extra", "true");
        node.set_attr("name", "background");

        assert_eq!(node.attributes.len(), 2);
        assert_eq!(node.attributes[0].name, "name");
        assert_eq!(node.get_attr("name"), Some("background"));
        assert_eq!(node.get_attr("missing"), None);
    }

    #[test]
    fn test_elements_skip_comments() {
        let mut view = Node::new("view").with_child(Node::new("image"));
        view.children.push(Content::Comment("note".into()));
        view = view.with_child(Node::new("text"));

        let names: Vec<_> = view.elements().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["image", "text"]);
        assert_eq!(view.find("text").map(|n| n.name.as_str()), Some("text"));
        assert_eq!(Document::new(view).element_count(), 3);
    }
}
