//! Translate SQL queries into Lime XML

use super::CliError;
use crate::{Lexer, Parser, to_xml_pretty};

/// Options for the translate command
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// The SQL query to translate
    pub query: String,
    /// Pretty-print the XML
    pub pretty: bool,
    /// Only validate syntax, don't print the XML
    pub syntax_only: bool,
}

/// Result of a translate operation
#[derive(Debug)]
pub enum TranslateResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query translated to XML
    Success(String),
}

/// Execute a translate operation
pub fn execute_translate(options: &TranslateOptions) -> Result<TranslateResult, CliError> {
    let mut parser = Parser::new(Lexer::new(&options.query))?;
    let node = parser.parse()?;

    if options.syntax_only {
        return Ok(TranslateResult::SyntaxValid);
    }

    let xml = if options.pretty {
        to_xml_pretty(&node)?
    } else {
        node.to_xml()
    };
    Ok(TranslateResult::Success(xml))
}
