/// Reserved words, compared against the lowercase form of a word.
pub const KEYWORDS: &[&str] = &[
    "select", "distinct", "from", "where", "limit", "count", "order", "by", "asc", "desc",
];

/// Comparison and logical operators.
///
/// `and` and `or` live here rather than in [`KEYWORDS`] so that a word
/// following them is read as the next predicate.
pub const OPERATORS: &[&str] = &[
    "!", "=", "!=", "<", ">", ">=", "<=", "is", "like", "and", "or", "in", "not", "any", "all",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

pub fn is_operator(word: &str) -> bool {
    OPERATORS.contains(&word)
}
