//! Word classification.
//!
//! Keywords, operators, quoted literals, type hints and parentheses are
//! recognised on their own. Every other word takes its meaning from the token
//! right before it, see [`resolve_category`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::ast::{Category, Datatype, Token, operators};

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}").expect("date pattern is valid")
});

/// Errors raised while classifying words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// No static rule matched the word and the preceding token gives it no
    /// meaning. `previous` is `None` for the first word of the query.
    UnresolvedToken {
        token: String,
        previous: Option<String>,
    },
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::UnresolvedToken { token, previous } => match previous {
                Some(prev) => write!(
                    f,
                    "Unresolved token type: '{}' (previous token: '{}')",
                    token, prev
                ),
                None => write!(f, "Unresolved token type: '{}' at start of query", token),
            },
        }
    }
}

impl std::error::Error for ClassifyError {}

/// True when `text` contains a `YYYY-MM-DD` date.
pub fn contains_date(text: &str) -> bool {
    DATE.is_match(text)
}

fn strip_quotes(word: &str) -> String {
    let mut chars = word.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

/// Applies the context-free rules to a single word.
///
/// The returned token has an empty category when the word needs lookbehind.
pub fn classify_word(word: &str) -> Token {
    let mut token = Token::new(word);
    let lc = token.lowercase.as_str();

    if operators::is_keyword(lc) {
        token.category = Category::KEYWORD
            | match lc {
                "limit" => Category::LIMIT,
                "select" => Category::SELECT,
                "count" => Category::COUNT,
                "order" => Category::ORDER,
                "by" => Category::BY,
                "asc" => Category::ORDER_ASC | Category::SORT_ORDER,
                "desc" => Category::ORDER_DESC | Category::SORT_ORDER,
                _ => Category::empty(),
            };
    } else if operators::is_operator(lc) {
        token.category = Category::OPERATOR;
    } else if let Some(hint) = word.strip_prefix(':') {
        token.category = Category::TYPEHINT;
        token.value = hint.to_string();
    }

    if word.starts_with('\'') || word.starts_with('"') {
        token.category = Category::VALUE;
        token.value = strip_quotes(word);
        token.datatype = Some(if contains_date(&token.value) {
            Datatype::Date
        } else {
            Datatype::String
        });
    } else if word == "(" {
        token.category = Category::GROUP_START;
    } else if word == ")" {
        token.category = Category::GROUP_END;
    }

    if word.starts_with('`') {
        token.value = strip_quotes(word);
    }

    token
}

/// Infers the category of an unclassified word from the token before it.
///
/// `value` is the word with any backticks already removed. Returns `None` when
/// no rule applies. Value categories come with their resolved datatype.
pub fn resolve_category(
    previous: Option<&Token>,
    value: &str,
) -> Option<(Category, Option<Datatype>)> {
    let prev = previous?;

    if prev.is(Category::COLUMN)
        || prev.is_keyword("select")
        || prev.is_keyword("distinct")
        || prev.is_keyword("count")
    {
        Some((Category::COLUMN, None))
    } else if prev.is_keyword("from") {
        Some((Category::TABLE, None))
    } else if prev.is_keyword("where")
        || prev.is_operator("and")
        || prev.is_operator("or")
        || prev.is(Category::GROUP_START)
    {
        Some((Category::PREDICATE, None))
    } else if prev.is(Category::OPERATOR) {
        let datatype = if contains_date(value) {
            Datatype::Date
        } else {
            Datatype::Numeric
        };
        Some((Category::VALUE, Some(datatype)))
    } else if prev.is(Category::LIMIT) {
        Some((Category::LIMIT_FROM, None))
    } else if prev.is(Category::LIMIT_FROM) {
        Some((Category::LIMIT_TO, None))
    } else if prev.is(Category::BY) || prev.is(Category::SORT_KEY) {
        Some((Category::SORT_KEY, None))
    } else {
        None
    }
}

/// Classifies every word of a lexed query.
pub fn classify<S: AsRef<str>>(words: &[S]) -> Result<Vec<Token>, ClassifyError> {
    let mut tokens: Vec<Token> = Vec::with_capacity(words.len());

    for word in words {
        let mut token = classify_word(word.as_ref());

        if token.category.is_empty() {
            let previous = tokens.last();
            let (category, datatype) =
                resolve_category(previous, &token.value).ok_or_else(|| {
                    ClassifyError::UnresolvedToken {
                        token: token.raw.clone(),
                        previous: previous.map(|p| p.raw.clone()),
                    }
                })?;
            token.category = category;
            token.datatype = datatype;
        }

        trace!(word = %token.raw, category = ?token.category, "classified word");
        tokens.push(token);
    }

    Ok(tokens)
}
