use std::fmt;

use tracing::debug;

use crate::{
    ast::{
        Category, Datatype, SortOrder, Token,
        query::{QuerySpec, SortSpec},
    },
    classifier::{ClassifyError, classify},
    lexer::{LexError, Lexer},
    xml::{Attributes, Node, build},
};

/// Errors that abort a parse. No partial tree is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The query could not be split into words
    Lex(LexError),

    /// A word could not be given a category
    Classify(ClassifyError),

    /// `ASC`/`DESC` appeared before any `ORDER BY` key
    NoSortBase { order: String },

    /// The operand after a predicate operator is not a value.
    /// `found` is `None` when the query ended first.
    ExpectedValue {
        field: String,
        found: Option<String>,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::Classify(e) => write!(f, "{}", e),
            ParseError::NoSortBase { order } => {
                write!(f, "Found sort order '{}' but no fields to sort on", order)
            }
            ParseError::ExpectedValue { field, found } => match found {
                Some(token) => write!(
                    f,
                    "Expected a value in the condition on '{}', got '{}'",
                    field, token
                ),
                None => write!(
                    f,
                    "Expected a value in the condition on '{}', got end of query",
                    field
                ),
            },
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            ParseError::Classify(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

impl From<ClassifyError> for ParseError {
    fn from(e: ClassifyError) -> Self {
        ParseError::Classify(e)
    }
}

/// Turns classified tokens into a Lime `query` tree in one forward pass.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Lexes and classifies the whole query up front.
    pub fn new(lexer: Lexer) -> Result<Self, ParseError> {
        let words = lexer.words()?;
        let tokens = classify(&words)?;
        Ok(Parser::from_tokens(tokens))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Parse the token stream into a `query` node
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        self.position = 0;

        let mut spec = QuerySpec::default();
        // `and`/`or` seen right before the current token
        let mut modifier: Option<String> = None;

        while let Some(token) = self.current().cloned() {
            if token.is(Category::COLUMN) {
                while let Some(column) = self.current() {
                    if !column.is(Category::COLUMN) {
                        break;
                    }
                    spec.fields.push(column.value.clone());
                    self.advance();
                }
                modifier = None;
                continue;
            } else if token.is(Category::LIMIT_TO) {
                spec.limits.top = Some(token.value);
            } else if token.is(Category::LIMIT_FROM) {
                spec.limits.first = Some(token.value);
            } else if token.is_keyword("distinct") {
                spec.distinct = true;
            } else if token.is(Category::COUNT) {
                spec.count = true;
            } else if token.is(Category::TABLE) {
                spec.table = Some(token.value);
            } else if token.is(Category::SORT_ORDER) {
                let sort = spec
                    .sort
                    .as_mut()
                    .ok_or_else(|| ParseError::NoSortBase {
                        order: token.raw.clone(),
                    })?;
                sort.order = Some(if token.is(Category::ORDER_ASC) {
                    SortOrder::Asc
                } else {
                    SortOrder::Desc
                });
            } else if token.is(Category::SORT_KEY) {
                spec.sort
                    .get_or_insert_with(SortSpec::default)
                    .push_key(&token.value);
            } else if token.is_operator("and") || token.is_operator("or") {
                modifier = Some(token.lowercase);
                self.advance();
                continue;
            } else if token.is(Category::PREDICATE) {
                let condition = self.parse_predicate(&token, is_or(&modifier))?;
                spec.conditions.push(condition);
            } else if token.is(Category::GROUP_START) || token.is(Category::GROUP_END) {
                let mut attributes = Attributes::new();
                if is_or(&modifier) {
                    attributes.insert("or", "1");
                }
                spec.conditions
                    .push(build::condition(attributes, vec![build::marker(&token.value)]));
            }

            modifier = None;
            self.advance();
        }

        debug!(
            table = spec.table.as_deref().unwrap_or(""),
            fields = spec.fields.len(),
            conditions = spec.conditions.len(),
            "parsed query"
        );

        Ok(emit(spec))
    }

    /// Parses `field op [op] value [:hint]`, starting at the field.
    ///
    /// Leaves the position on the last consumed token.
    fn parse_predicate(&mut self, field: &Token, or: bool) -> Result<Node, ParseError> {
        let expected_value = |found: Option<&Token>| ParseError::ExpectedValue {
            field: field.value.clone(),
            found: found.map(|t| t.raw.clone()),
        };

        self.advance();
        let mut operator = match self.current() {
            Some(op) => op.lowercase.clone(),
            None => return Err(expected_value(None)),
        };

        if let Some(next) = self.peek(1).filter(|t| t.is(Category::OPERATOR)) {
            operator = format!("{} {}", operator, next.lowercase);
            self.advance();
        }

        self.advance();
        let value_token = match self.current() {
            Some(t) if t.is(Category::VALUE) => t.clone(),
            other => return Err(expected_value(other)),
        };

        let mut value = value_token.value;
        if operator == "like" && !value.is_empty() {
            if let Some(rest) = value.strip_prefix('%') {
                operator = format!("%{}", operator);
                value = rest.to_string();
            }
            if let Some(rest) = value.strip_suffix('%') {
                operator.push('%');
                value = rest.to_string();
            }
        }

        let mut datatype = value_token.datatype.unwrap_or(Datatype::Numeric);
        if let Some(hint) = self.peek(1).filter(|t| t.is(Category::TYPEHINT)) {
            datatype = Datatype::Hint(hint.value.clone());
            self.advance();
        }

        let mut attributes = Attributes::from([("operator", operator)]);
        if or {
            attributes.insert("or", "1");
        }

        Ok(build::condition(
            attributes,
            vec![
                build::exp("field", &field.value),
                build::exp(datatype.as_str(), &value),
            ],
        ))
    }
}

fn is_or(modifier: &Option<String>) -> bool {
    modifier.as_deref() == Some("or")
}

/// Assembles the `query` node from the collected state.
fn emit(spec: QuerySpec) -> Node {
    let mut attributes = Attributes::from([("distinct", if spec.distinct { "1" } else { "0" })]);
    if spec.count {
        attributes.insert("count", "1");
    }

    let (top, first) = spec.limits.resolve();
    if let Some(top) = top {
        attributes.insert("top", top);
    }
    if let Some(first) = first {
        attributes.insert("first", first);
    }

    let mut children = vec![build::table(spec.table.as_deref().unwrap_or(""))];

    if !spec.conditions.is_empty() {
        children.push(build::conditions(spec.conditions));
    }

    if !spec.fields.is_empty() {
        let fields = spec
            .fields
            .iter()
            .map(|name| {
                match spec.sort.as_ref().and_then(|s| Some((s.rank_of(name)?, s.order()))) {
                    Some((rank, order)) => build::sorted_field(name, order, rank),
                    None => build::field(name),
                }
            })
            .collect();
        children.push(Node::with_children("fields", fields));
    }

    build::query(children, Some(attributes))
}
