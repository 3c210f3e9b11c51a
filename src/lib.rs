pub mod ast;
pub mod classifier;
pub mod cli;
pub mod lexer;
pub mod parser;
pub mod xml;

pub use ast::{Category, Datatype, SortOrder, Token};
pub use classifier::{ClassifyError, classify, resolve_category};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, Parser};
pub use xml::{Attributes, Content, Node, ReaderOptions, XmlError, load_xml, to_xml, to_xml_pretty};

/// Translates a SQL query into a Lime `query` node.
///
/// ```
/// let q = lime_query::sql_to_node("SELECT name FROM person WHERE id = 7").unwrap();
/// assert_eq!(
///     q.to_xml(),
///     "<query distinct=\"0\"><tables><table>person</table></tables>\
///      <conditions><condition operator=\"=\"><exp type=\"field\">id</exp>\
///      <exp type=\"numeric\">7</exp></condition></conditions>\
///      <fields><field>name</field></fields></query>"
/// );
/// ```
pub fn sql_to_node(sql: &str) -> Result<Node, ParseError> {
    Parser::new(Lexer::new(sql))?.parse()
}
