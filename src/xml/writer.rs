//! XML output for [`Node`] trees.
//!
//! Two formats are produced:
//!
//! - **Compact** via [`to_xml()`] - the exact text sent to the query service
//! - **Pretty** via [`to_xml_pretty()`] - two-space indentation, for
//!   diagnostics only
//!
//! # Examples
//!
//! ```
//! use lime_query::xml::{Node, to_xml, to_xml_pretty};
//!
//! let tables = Node::with_child("tables", Node::with_text("table", "person"));
//!
//! assert_eq!(to_xml(&tables), "<tables><table>person</table></tables>");
//! assert_eq!(
//!     to_xml_pretty(&tables).unwrap(),
//!     "<tables>\n  <table>person</table>\n</tables>"
//! );
//! ```

use super::node::{Content, Node};
use super::reader::{XmlError, load_xml};

pub struct XmlPrinter {
    pretty: bool,
}

impl XmlPrinter {
    pub fn new(pretty: bool) -> Self {
        XmlPrinter { pretty }
    }

    pub fn print(&self, node: &Node) -> String {
        self.print_node(node, 0)
    }

    fn print_node(&self, node: &Node, indent: usize) -> String {
        let mut result = self.indent(indent);
        result.push('<');
        result.push_str(node.name());
        for (key, value) in node.attributes().iter() {
            result.push_str(&format!(" {}=\"{}\"", key, escape_attribute(value)));
        }

        match node.content() {
            Content::Empty => {
                result.push_str("/>");
                return result;
            }
            Content::Text(text) => {
                result.push('>');
                result.push_str(&escape_text(text));
            }
            Content::Children(children) => {
                result.push('>');
                if self.pretty {
                    for child in children {
                        result.push('\n');
                        result.push_str(&self.print_node(child, indent + 1));
                    }
                    result.push('\n');
                    result.push_str(&self.indent(indent));
                } else {
                    for child in children {
                        result.push_str(&self.print_node(child, indent));
                    }
                }
            }
        }

        result.push_str(&format!("</{}>", node.name()));
        result
    }

    fn indent(&self, level: usize) -> String {
        if self.pretty {
            "  ".repeat(level)
        } else {
            String::new()
        }
    }
}

/// Escapes character data. Only `&`, `<` and `>` are replaced.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes an attribute value, quotes included.
pub fn escape_attribute(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Serializes a node to compact XML, the wire format.
pub fn to_xml(node: &Node) -> String {
    XmlPrinter::new(false).print(node)
}

/// Serializes, reparses and re-emits a node with indentation.
///
/// Reparsing normalizes the tree the way a response would be read, so text
/// comes out trimmed.
pub fn to_xml_pretty(node: &Node) -> Result<String, XmlError> {
    let reparsed = load_xml(&to_xml(node))?;
    Ok(XmlPrinter::new(true).print(&reparsed))
}
