//! Generic XML element tree.
//!
//! [`Node`] is used in both directions: the SQL parser emits a `query` tree
//! that is serialized with [`to_xml`], and response documents are read back
//! with [`load_xml`].
//!
//! A node holds exactly one of nothing, text, or child elements (see
//! [`Content`]). Text found next to child elements is dropped when reading,
//! unless [`ReaderOptions::legacy_text_overwrite`] asks for the historic
//! behaviour.

pub mod build;
pub mod node;
pub mod reader;
pub mod writer;

pub use node::{Attributes, Content, Node};
pub use reader::{MAX_DEPTH, ReaderOptions, XmlError, XmlReader, load_xml, parse_xml};
pub use writer::{XmlPrinter, escape_attribute, escape_text, to_xml, to_xml_pretty};
