//! Read XML responses

use super::{CliError, node_to_json};
use crate::xml::{ReaderOptions, XmlPrinter, parse_xml};

/// Options for the read command
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// XML input string
    pub input: Option<String>,
    /// Indent the output
    pub pretty: bool,
    /// Print the tree as JSON instead of XML
    pub json: bool,
    /// Let text next to child elements overwrite them
    pub legacy_text_overwrite: bool,
}

/// Parse the input document and render it back as XML or JSON
pub fn execute_read(options: &ReadOptions) -> Result<String, CliError> {
    let xml = options.input.as_ref().ok_or(CliError::NoInput)?;

    let reader_options = ReaderOptions {
        legacy_text_overwrite: options.legacy_text_overwrite,
    };
    let node = parse_xml(xml, reader_options)?;

    if options.json {
        let value = node_to_json(&node);
        let json = if options.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        return Ok(json);
    }

    Ok(XmlPrinter::new(options.pretty).print(&node))
}
