//! Element tree construction and serialization
//!
//! [`TreeBuilder`] accumulates start/end/data events into an in-memory
//! [`Element`] tree. The stack of currently-open elements is owned by the
//! builder instance; `end` must match the innermost unmatched `start` in
//! strict LIFO order and any violation fails loudly.
//!
//! Serialization (escaping, the XML declaration, indentation) is delegated
//! to `quick_xml`.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::BuildError;

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

/// An XML element: tag, ordered attributes, child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over child elements, skipping text and comment nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(elem) => Some(elem),
            _ => None,
        })
    }

    /// Serialize this element (and its subtree) to `dest`.
    pub fn serialize_to<W: Write>(
        &self,
        dest: W,
        options: &WriteOptions,
    ) -> Result<(), BuildError> {
        let mut writer = if options.pretty {
            Writer::new_with_indent(dest, b' ', 2)
        } else {
            Writer::new(dest)
        };
        if options.declaration {
            writer.write_event(Event::Decl(BytesDecl::new(
                "1.0",
                Some(options.encoding.as_str()),
                None,
            )))?;
        }
        write_element(&mut writer, self)?;
        Ok(())
    }
}

/// Serialization options for [`Element::serialize_to`].
///
/// `encoding` only names the charset in the XML declaration; the emitted
/// bytes are always UTF-8.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    pub declaration: bool,
    pub encoding: String,
    pub pretty: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            declaration: true,
            encoding: "UTF-8".to_string(),
            pretty: false,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether an `<?xml ...?>` declaration is emitted.
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    /// Set the charset named in the declaration.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Set whether output is indented.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    elem: &Element,
) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(elem.tag.as_str());
    for (key, value) in &elem.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if elem.children.is_empty() {
        return writer.write_event(Event::Empty(start));
    }
    writer.write_event(Event::Start(start))?;
    for child in &elem.children {
        match child {
            Node::Element(inner) => write_element(writer, inner)?,
            Node::Text(text) => {
                writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            Node::Comment(text) => {
                // Comment content is written verbatim, not entity-escaped.
                writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(elem.tag.as_str())))
}

/// Accumulates start/end/data events into an [`Element`] tree.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<Element>,
    root: Option<Element>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an element with the given tag and attribute pairs.
    pub fn start(&mut self, tag: impl Into<String>, attrs: Vec<(String, String)>) {
        self.stack.push(Element {
            tag: tag.into(),
            attrs,
            children: Vec::new(),
        });
    }

    /// Close the most recently opened element.
    ///
    /// `tag` must name the innermost open element; anything else is a
    /// protocol violation and leaves the tree untouched.
    pub fn end(&mut self, tag: &str) -> Result<(), BuildError> {
        match self.stack.pop() {
            None => Err(BuildError::NoOpenElement {
                tag: tag.to_string(),
            }),
            Some(elem) if elem.tag != tag => {
                let expected = elem.tag.clone();
                self.stack.push(elem);
                Err(BuildError::MismatchedEnd {
                    expected,
                    found: tag.to_string(),
                })
            }
            Some(elem) => match self.stack.last_mut() {
                Some(parent) => {
                    parent.children.push(Node::Element(elem));
                    Ok(())
                }
                None if self.root.is_none() => {
                    self.root = Some(elem);
                    Ok(())
                }
                None => {
                    self.stack.push(elem);
                    Err(BuildError::DocumentClosed)
                }
            },
        }
    }

    /// Append character data to the currently open element.
    ///
    /// Consecutive `data` calls concatenate into a single text node.
    pub fn data(&mut self, text: &str) -> Result<(), BuildError> {
        let current = self.stack.last_mut().ok_or(BuildError::NoCurrentElement)?;
        if let Some(Node::Text(existing)) = current.children.last_mut() {
            existing.push_str(text);
        } else {
            current.children.push(Node::Text(text.to_string()));
        }
        Ok(())
    }

    /// Append a comment node to the currently open element.
    pub fn comment(&mut self, text: &str) -> Result<(), BuildError> {
        let current = self.stack.last_mut().ok_or(BuildError::NoCurrentElement)?;
        current.children.push(Node::Comment(text.to_string()));
        Ok(())
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consume the builder and return the completed root element.
    pub fn close(self) -> Result<Element, BuildError> {
        if !self.stack.is_empty() {
            return Err(BuildError::UnclosedElements(self.stack.len()));
        }
        self.root.ok_or(BuildError::NoRoot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_nested_elements() {
        let mut builder = TreeBuilder::new();
        builder.start("svg", pairs(&[("version", "1.1")]));
        builder.start("g", Vec::new());
        builder.start("circle", pairs(&[("r", "5")]));
        builder.end("circle").unwrap();
        builder.end("g").unwrap();
        builder.end("svg").unwrap();

        let root = builder.close().unwrap();
        assert_eq!(root.tag, "svg");
        assert_eq!(root.attr("version"), Some("1.1"));
        let g = root.child_elements().next().unwrap();
        assert_eq!(g.tag, "g");
        assert_eq!(g.child_elements().next().unwrap().attr("r"), Some("5"));
    }

    #[test]
    fn test_mismatched_end_is_rejected() {
        let mut builder = TreeBuilder::new();
        builder.start("svg", Vec::new());
        builder.start("g", Vec::new());
        let err = builder.end("svg").unwrap_err();
        assert!(matches!(
            err,
            BuildError::MismatchedEnd { ref expected, ref found }
                if expected == "g" && found == "svg"
        ));
        // The failed end must not have consumed the open element.
        assert_eq!(builder.depth(), 2);
        builder.end("g").unwrap();
        builder.end("svg").unwrap();
    }

    #[test]
    fn test_end_with_nothing_open() {
        let mut builder = TreeBuilder::new();
        let err = builder.end("svg").unwrap_err();
        assert!(matches!(err, BuildError::NoOpenElement { .. }));
    }

    #[test]
    fn test_second_root_is_rejected() {
        let mut builder = TreeBuilder::new();
        builder.start("svg", Vec::new());
        builder.end("svg").unwrap();
        builder.start("g", Vec::new());
        let err = builder.end("g").unwrap_err();
        assert!(matches!(err, BuildError::DocumentClosed));
    }

    #[test]
    fn test_data_concatenates() {
        let mut builder = TreeBuilder::new();
        builder.start("text", Vec::new());
        builder.data("hello ").unwrap();
        builder.data("world").unwrap();
        builder.end("text").unwrap();
        let root = builder.close().unwrap();
        assert_eq!(root.children, vec![Node::Text("hello world".to_string())]);
    }

    #[test]
    fn test_data_without_open_element() {
        let mut builder = TreeBuilder::new();
        assert!(matches!(
            builder.data("orphan"),
            Err(BuildError::NoCurrentElement)
        ));
    }

    #[test]
    fn test_close_with_open_elements() {
        let mut builder = TreeBuilder::new();
        builder.start("svg", Vec::new());
        builder.start("g", Vec::new());
        let err = builder.close().unwrap_err();
        assert!(matches!(err, BuildError::UnclosedElements(2)));
    }

    #[test]
    fn test_serialize_empty_element_self_closes() {
        let elem = Element {
            tag: "circle".to_string(),
            attrs: pairs(&[("cx", "1"), ("cy", "2")]),
            children: Vec::new(),
        };
        let mut out = Vec::new();
        elem.serialize_to(&mut out, &WriteOptions::new().with_declaration(false))
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"<circle cx="1" cy="2"/>"#
        );
    }

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let elem = Element {
            tag: "text".to_string(),
            attrs: pairs(&[("data-note", "a<b")]),
            children: vec![Node::Text("x & y".to_string())],
        };
        let mut out = Vec::new();
        elem.serialize_to(&mut out, &WriteOptions::new().with_declaration(false))
            .unwrap();
        let doc = String::from_utf8(out).unwrap();
        assert!(doc.contains("a&lt;b"));
        assert!(doc.contains("x &amp; y"));
    }

    #[test]
    fn test_serialize_declaration_and_comment() {
        let elem = Element {
            tag: "svg".to_string(),
            attrs: Vec::new(),
            children: vec![Node::Comment("generated".to_string())],
        };
        let mut out = Vec::new();
        elem.serialize_to(&mut out, &WriteOptions::default()).unwrap();
        let doc = String::from_utf8(out).unwrap();
        assert_eq!(
            doc,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><svg><!--generated--></svg>"
        );
    }
}
