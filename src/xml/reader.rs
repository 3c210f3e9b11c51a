use std::fmt;

use tracing::debug;

use super::node::{Attributes, Content, Node};

/// Deepest element nesting the reader accepts.
pub const MAX_DEPTH: usize = 256;

/// Errors raised while reading an XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// The document is not well-formed. `position` is a character offset.
    MalformedXml { position: usize, reason: String },
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlError::MalformedXml { position, reason } => {
                write!(f, "Malformed XML at [{}]: {}", position, reason)
            }
        }
    }
}

impl std::error::Error for XmlError {}

/// Reader settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderOptions {
    /// Reproduce the historic handling of mixed content: a non-empty text
    /// sibling of element children replaces the element's value with its
    /// untrimmed text, and element children after it are dropped.
    pub legacy_text_overwrite: bool,
}

/// A piece of element content, before it is folded into [`Content`].
enum Item {
    Element(Node),
    Text(String),
}

/// Reads an XML document into a [`Node`] tree.
///
/// Comments, processing instructions and a DOCTYPE are skipped. CDATA
/// sections are read as text.
pub struct XmlReader {
    input: Vec<char>,
    position: usize,
    options: ReaderOptions,
}

impl XmlReader {
    pub fn new(input: &str, options: ReaderOptions) -> Self {
        XmlReader {
            input: input.chars().collect(),
            position: 0,
            options,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn starts_with(&self, s: &str) -> bool {
        let mut pos = self.position;
        for c in s.chars() {
            if self.input.get(pos) != Some(&c) {
                return false;
            }
            pos += 1;
        }
        true
    }

    fn error<T>(&self, reason: impl Into<String>) -> Result<T, XmlError> {
        Err(XmlError::MalformedXml {
            position: self.position,
            reason: reason.into(),
        })
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), XmlError> {
        match self.current_char() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => self.error(format!("expected '{}', found '{}'", expected, ch)),
            None => self.error(format!("expected '{}', found end of input", expected)),
        }
    }

    /// Consumes everything up to and including `terminator`.
    fn skip_past(&mut self, terminator: &str, what: &str) -> Result<String, XmlError> {
        let start = self.position;
        while self.current_char().is_some() {
            if self.starts_with(terminator) {
                let skipped = self.input[start..self.position].iter().collect();
                self.position += terminator.chars().count();
                return Ok(skipped);
            }
            self.advance();
        }
        self.error(format!("unterminated {}", what))
    }

    fn skip_doctype(&mut self) -> Result<(), XmlError> {
        let mut depth = 0usize;
        while let Some(ch) = self.current_char() {
            self.advance();
            match ch {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => return Ok(()),
                _ => {}
            }
        }
        self.error("unterminated DOCTYPE")
    }

    /// Skips whitespace, comments and processing instructions.
    fn skip_misc(&mut self) -> Result<(), XmlError> {
        loop {
            self.skip_whitespace();
            if self.starts_with("<?") {
                self.skip_past("?>", "processing instruction")?;
            } else if self.starts_with("<!--") {
                self.skip_past("-->", "comment")?;
            } else {
                return Ok(());
            }
        }
    }

    fn is_name_start(ch: char) -> bool {
        ch.is_alphabetic() || ch == '_' || ch == ':'
    }

    fn is_name_char(ch: char) -> bool {
        Self::is_name_start(ch) || ch.is_numeric() || matches!(ch, '-' | '.')
    }

    fn read_name(&mut self) -> Result<String, XmlError> {
        match self.current_char() {
            Some(ch) if Self::is_name_start(ch) => {}
            Some(ch) => return self.error(format!("invalid name start '{}'", ch)),
            None => return self.error("expected a name, found end of input"),
        }

        let start = self.position;
        while let Some(ch) = self.current_char() {
            if Self::is_name_char(ch) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(self.input[start..self.position].iter().collect())
    }

    /// Decodes the entity starting at the current `&`.
    fn read_entity(&mut self) -> Result<char, XmlError> {
        let start = self.position;
        self.advance(); // Consume '&'

        let mut name = String::new();
        loop {
            match self.current_char() {
                Some(';') => {
                    self.advance();
                    break;
                }
                Some(ch) if ch.is_alphanumeric() || ch == '#' => {
                    name.push(ch);
                    self.advance();
                }
                _ => {
                    self.position = start;
                    return self.error("unterminated entity reference");
                }
            }
        }

        let decoded = match name.as_str() {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => {
                if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
                } else if let Some(dec) = name.strip_prefix('#') {
                    dec.parse::<u32>().ok().and_then(char::from_u32)
                } else {
                    None
                }
            }
        };

        match decoded {
            Some(ch) => Ok(ch),
            None => {
                self.position = start;
                self.error(format!("unknown entity '&{};'", name))
            }
        }
    }

    fn read_attribute_value(&mut self) -> Result<String, XmlError> {
        let quote = match self.current_char() {
            Some(q @ ('"' | '\'')) => q,
            _ => return self.error("expected quoted attribute value"),
        };
        self.advance();

        let mut value = String::new();
        loop {
            match self.current_char() {
                None => return self.error("unterminated attribute value"),
                Some(ch) if ch == quote => {
                    self.advance();
                    return Ok(value);
                }
                Some('<') => return self.error("'<' in attribute value"),
                Some('&') => value.push(self.read_entity()?),
                Some(ch) => {
                    value.push(ch);
                    self.advance();
                }
            }
        }
    }

    fn read_text(&mut self) -> Result<String, XmlError> {
        let mut text = String::new();
        while let Some(ch) = self.current_char() {
            match ch {
                '<' => break,
                '&' => text.push(self.read_entity()?),
                ch => {
                    text.push(ch);
                    self.advance();
                }
            }
        }
        Ok(text)
    }

    /// Reads one element. `depth` is 1 for the root.
    fn parse_element(&mut self, depth: usize) -> Result<Node, XmlError> {
        if depth > MAX_DEPTH {
            return self.error("nesting too deep");
        }
        self.expect('<')?;
        let name = self.read_name()?;
        let mut attributes = Attributes::new();

        loop {
            self.skip_whitespace();
            match self.current_char() {
                Some('/') => {
                    self.advance();
                    self.expect('>')?;
                    return Ok(Node::from_parts(name, attributes, Content::Empty));
                }
                Some('>') => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    let key = self.read_name()?;
                    self.skip_whitespace();
                    self.expect('=')?;
                    self.skip_whitespace();
                    let value = self.read_attribute_value()?;
                    if attributes.contains_key(&key) {
                        return self.error(format!("duplicate attribute '{}'", key));
                    }
                    attributes.insert(key, value);
                }
                None => return self.error(format!("unterminated start tag <{}>", name)),
            }
        }

        let items = self.parse_items(&name, depth)?;
        let content = self.fold_items(items);
        Ok(Node::from_parts(name, attributes, content))
    }

    /// Reads element content up to and including the matching end tag.
    fn parse_items(&mut self, name: &str, depth: usize) -> Result<Vec<Item>, XmlError> {
        let mut items = vec![];

        loop {
            if self.current_char().is_none() {
                return self.error(format!("unclosed element <{}>", name));
            } else if self.starts_with("</") {
                self.position += 2;
                let end = self.read_name()?;
                if end != name {
                    return self.error(format!(
                        "mismatched end tag: expected </{}>, found </{}>",
                        name, end
                    ));
                }
                self.skip_whitespace();
                self.expect('>')?;
                return Ok(items);
            } else if self.starts_with("<!--") {
                self.skip_past("-->", "comment")?;
            } else if self.starts_with("<![CDATA[") {
                self.position += "<![CDATA[".len();
                let data = self.skip_past("]]>", "CDATA section")?;
                items.push(Item::Text(data));
            } else if self.starts_with("<?") {
                self.skip_past("?>", "processing instruction")?;
            } else if self.current_char() == Some('<') {
                items.push(Item::Element(self.parse_element(depth + 1)?));
            } else {
                items.push(Item::Text(self.read_text()?));
            }
        }
    }

    fn fold_items(&self, items: Vec<Item>) -> Content {
        let has_elements = items.iter().any(|i| matches!(i, Item::Element(_)));

        if !has_elements {
            let text: String = items
                .into_iter()
                .filter_map(|i| match i {
                    Item::Text(t) => Some(t),
                    Item::Element(_) => None,
                })
                .collect();
            let trimmed = text.trim();
            return if trimmed.is_empty() {
                Content::Empty
            } else {
                Content::Text(trimmed.to_string())
            };
        }

        if !self.options.legacy_text_overwrite {
            let children = items
                .into_iter()
                .filter_map(|i| match i {
                    Item::Element(n) => Some(n),
                    Item::Text(_) => None,
                })
                .collect();
            return Content::Children(children);
        }

        let mut content = Content::Children(vec![]);
        for item in items {
            match item {
                Item::Element(n) => {
                    if let Content::Children(children) = &mut content {
                        children.push(n);
                    }
                }
                Item::Text(t) if !t.trim().is_empty() => content = Content::Text(t),
                Item::Text(_) => {}
            }
        }
        match content {
            Content::Children(children) if children.is_empty() => Content::Empty,
            other => other,
        }
    }

    /// Reads the whole document and returns its root element.
    pub fn parse(mut self) -> Result<Node, XmlError> {
        if self.current_char() == Some('\u{feff}') {
            self.advance();
        }

        self.skip_misc()?;
        if self.starts_with("<!DOCTYPE") {
            self.skip_doctype()?;
            self.skip_misc()?;
        }

        if self.current_char() != Some('<') {
            return self.error("no root element");
        }
        let root = self.parse_element(1)?;

        self.skip_misc()?;
        if self.current_char().is_some() {
            return self.error("unexpected content after root element");
        }

        debug!(root = root.name(), "parsed XML document");
        Ok(root)
    }
}

/// Parses XML text with the given options.
pub fn parse_xml(xml: &str, options: ReaderOptions) -> Result<Node, XmlError> {
    XmlReader::new(xml, options).parse()
}

/// Parses XML text with default options.
pub fn load_xml(xml: &str) -> Result<Node, XmlError> {
    parse_xml(xml, ReaderOptions::default())
}
