use std::fmt;

bitflags::bitflags! {
    /// Semantic category of a classified word.
    ///
    /// Categories combine: the keyword `desc` is
    /// `KEYWORD | SORT_ORDER | ORDER_DESC`, while a bare word following `FROM`
    /// carries only `TABLE`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Category: u32 {
        /// One of the reserved words (`select`, `from`, `where`, ...)
        const KEYWORD     = 1 << 0;
        /// Comparison or logical operator (`=`, `like`, `and`, ...)
        const OPERATOR    = 1 << 1;
        /// Right-hand side of a comparison
        const VALUE       = 1 << 2;
        /// Selected field name
        const COLUMN      = 1 << 3;
        /// Left-hand side of a comparison (the field being tested)
        const PREDICATE   = 1 << 4;
        /// Table name following `FROM`
        const TABLE       = 1 << 5;
        /// `(`
        const GROUP_START = 1 << 6;
        /// `)`
        const GROUP_END   = 1 << 7;
        /// The `limit` keyword
        const LIMIT       = 1 << 8;
        /// First number after `LIMIT`
        const LIMIT_FROM  = 1 << 9;
        /// Second number after `LIMIT`
        const LIMIT_TO    = 1 << 10;
        /// The `count` keyword
        const COUNT       = 1 << 11;
        /// The `select` keyword
        const SELECT      = 1 << 12;
        /// The `order` keyword
        const ORDER       = 1 << 13;
        /// The `by` keyword
        const BY          = 1 << 14;
        /// `asc` or `desc`
        const SORT_ORDER  = 1 << 15;
        /// `asc`
        const ORDER_ASC   = 1 << 16;
        /// `desc`
        const ORDER_DESC  = 1 << 17;
        /// Field name in an `ORDER BY` list
        const SORT_KEY    = 1 << 18;
        /// Explicit `:type` suffix on a value
        const TYPEHINT    = 1 << 19;
    }
}

/// Datatype of a comparison value, written to the `type` attribute of the
/// value `exp` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datatype {
    /// Quoted literal
    ///
    /// # Examples
    /// ```text
    /// 'Alice'
    /// "item #1"
    /// ```
    String,

    /// Literal containing a `YYYY-MM-DD` date
    ///
    /// # Examples
    /// ```text
    /// '2014-03-01'
    /// '2014-03-01 12:00'
    /// ```
    Date,

    /// Any other bare value
    Numeric,

    /// Type named explicitly by a `:type` suffix
    ///
    /// # Examples
    /// ```text
    /// active = '1':numeric
    /// ```
    Hint(String),
}

impl Datatype {
    pub fn as_str(&self) -> &str {
        match self {
            Datatype::String => "string",
            Datatype::Date => "date",
            Datatype::Numeric => "numeric",
            Datatype::Hint(name) => name,
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified word.
///
/// Tokens only live between classification and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Word as it appeared in the query
    pub raw: String,
    /// Value used by the parser, with quotes or `:` prefix removed
    pub value: String,
    /// Lowercase form of `raw`, used for keyword and operator comparison
    pub lowercase: String,
    pub category: Category,
    pub datatype: Option<Datatype>,
}

impl Token {
    pub fn new(raw: &str) -> Self {
        Token {
            raw: raw.to_string(),
            value: raw.to_string(),
            lowercase: raw.to_lowercase(),
            category: Category::empty(),
            datatype: None,
        }
    }

    /// True when every flag in `category` is set on this token.
    pub fn is(&self, category: Category) -> bool {
        self.category.contains(category)
    }

    /// True when this token is a keyword spelled `word`.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.is(Category::KEYWORD) && self.lowercase == word
    }

    /// True when this token is an operator spelled `word`.
    pub fn is_operator(&self, word: &str) -> bool {
        self.is(Category::OPERATOR) && self.lowercase == word
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
