//! Helpers for the elements of a Lime `query` document.
//!
//! These are what the SQL parser emits, and can be used directly to build
//! queries the SQL subset cannot express.
//!
//! ```
//! use lime_query::xml::{Attributes, build};
//!
//! let q = build::query(
//!     vec![
//!         build::table("person"),
//!         build::conditions(vec![build::condition(
//!             Attributes::from([("operator", "=")]),
//!             vec![build::exp("field", "active"), build::exp("numeric", "1")],
//!         )]),
//!         build::fields(["name", "email"]),
//!     ],
//!     None,
//! );
//! assert_eq!(q.attribute("distinct"), Some("1"));
//! ```

use super::node::{Attributes, Node};
use crate::ast::SortOrder;

/// `<query>` root. Without attributes the query is `distinct="1"`.
pub fn query(children: Vec<Node>, attributes: Option<Attributes>) -> Node {
    let attributes = attributes.unwrap_or_else(|| Attributes::from([("distinct", "1")]));
    Node::with_attributes_and_children("query", attributes, children)
}

/// `<tables><table>name</table></tables>`
pub fn table(name: &str) -> Node {
    Node::with_child("tables", Node::with_text("table", name))
}

/// `<field>name</field>`
pub fn field(name: &str) -> Node {
    Node::with_text("field", name)
}

/// `<field sortorder=".." sortindex="..">name</field>`
pub fn sorted_field(name: &str, order: SortOrder, index: usize) -> Node {
    field(name)
        .attr("sortorder", order.as_str())
        .attr("sortindex", index.to_string())
}

/// `<fields>` holding one plain `<field>` per name.
pub fn fields<I, S>(names: I) -> Node
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Node::with_children("fields", names.into_iter().map(|n| field(n.as_ref())).collect())
}

/// `<exp type="..">value</exp>`
pub fn exp(kind: &str, value: &str) -> Node {
    Node::with_attributes_and_text("exp", Attributes::from([("type", kind)]), value)
}

/// `<exp type=".."/>`, used for group markers.
pub fn marker(kind: &str) -> Node {
    Node::with_attributes("exp", Attributes::from([("type", kind)]))
}

/// `<condition ..>` around its expressions.
pub fn condition(attributes: Attributes, expressions: Vec<Node>) -> Node {
    Node::with_attributes_and_children("condition", attributes, expressions)
}

/// `<conditions>` around a condition list.
pub fn conditions(conditions: Vec<Node>) -> Node {
    Node::with_children("conditions", conditions)
}
