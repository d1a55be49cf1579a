//! Minimal element tree over quick-xml events.
//!
//! Only element names, text and children are kept. Attributes, comments and
//! processing instructions are dropped; namespace prefixes are ignored.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::XmlError;

/// One XML element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlNode {
    /// Local element name
    pub name: String,
    /// Concatenated direct text content, trimmed
    pub text: String,
    /// Child elements in document order
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// First direct child called `name`
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first direct child called `name`
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    /// All elements called `name` below this one, depth-first in document order.
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlNode> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    /// First element called `name` below this one
    pub fn first_descendant<'a>(&'a self, name: &str) -> Option<&'a XmlNode> {
        self.children.iter().find_map(|c| {
            if c.name == name {
                Some(c)
            } else {
                c.first_descendant(name)
            }
        })
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }
}

fn element_name(raw: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| XmlError::malformed(format!("element name is not UTF-8: {}", e)))
}

fn attach(stack: &mut [XmlNode], node: XmlNode) -> Result<(), XmlError> {
    stack
        .last_mut()
        .map(|parent| parent.children.push(node))
        .ok_or_else(|| XmlError::malformed("unbalanced end tag"))
}

/// Parse a document into a synthetic root node whose children are the
/// top-level elements.
///
/// # Examples
///
/// ```
/// use adapter_xml::tree::parse_document;
///
/// let doc = parse_document("<a><b>1</b><c><b>2</b></c></a>").unwrap();
/// let texts: Vec<_> = doc.descendants("b").iter().map(|n| n.text.as_str()).collect();
/// assert_eq!(texts, vec!["1", "2"]);
/// ```
pub fn parse_document(xml: &str) -> Result<XmlNode, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack = vec![XmlNode::new("#document")];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                stack.push(XmlNode::new(element_name(e.local_name().as_ref())?));
            }
            Event::Empty(e) => {
                let node = XmlNode::new(element_name(e.local_name().as_ref())?);
                attach(&mut stack, node)?;
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(XmlError::malformed(format!(
                        "unexpected end tag at byte {}",
                        reader.buffer_position()
                    )));
                }
                if let Some(node) = stack.pop() {
                    attach(&mut stack, node)?;
                }
            }
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| XmlError::malformed(format!("bad text content: {}", e)))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(text.trim());
                }
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                let text = std::str::from_utf8(&raw)
                    .map_err(|e| XmlError::malformed(format!("CDATA is not UTF-8: {}", e)))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(text.trim());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        let open = stack.last().map(|n| n.name.clone()).unwrap_or_default();
        return Err(XmlError::malformed(format!("unclosed element <{}>", open)));
    }

    stack
        .pop()
        .ok_or_else(|| XmlError::malformed("empty document"))
}
