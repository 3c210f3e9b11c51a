use std::fmt;

use tracing::debug;

/// Longest excerpt quoted in an unterminated literal error.
const EXCERPT_LEN: usize = 50;

/// Errors raised while splitting a query into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A quoted literal reached end of input before its closing quote.
    ///
    /// `offset` is the character offset of the opening quote.
    UnterminatedLiteral { offset: usize, excerpt: String },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedLiteral { offset, excerpt } => {
                write!(f, "Unterminated string literal at [{}]: {}", offset, excerpt)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Splits a query into raw words.
///
/// Separators (whitespace, commas, line breaks) are dropped. Quoted literals
/// keep their quotes so the classifier can tell `'1'` from `1`.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_word_char(ch: char) -> bool {
        ch.is_alphanumeric() || matches!(ch, '%' | '.' | ':')
    }

    fn skip_separators(&mut self) {
        while let Some(ch) = self.current_char() {
            match ch {
                ' ' | '\t' | '\x0c' | ',' => self.advance(),
                '\r' => {
                    self.advance();
                    if self.current_char() == Some('\n') {
                        self.advance();
                    }
                }
                '\n' => {
                    self.advance();
                    if self.current_char() == Some('\r') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_literal(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        self.advance(); // Consume opening quote

        loop {
            match self.current_char() {
                None => {
                    let rest: String = self.input[start..].iter().collect();
                    let excerpt = if rest.chars().count() > EXCERPT_LEN {
                        let head: String = rest.chars().take(EXCERPT_LEN).collect();
                        format!("{}...", head)
                    } else {
                        rest
                    };
                    return Err(LexError::UnterminatedLiteral {
                        offset: start,
                        excerpt,
                    });
                }
                // Only the character right before the quote is checked
                Some(ch) if ch == quote && self.input[self.position - 1] != '\\' => {
                    self.advance();
                    return Ok(self.input[start..self.position].iter().collect());
                }
                Some(_) => self.advance(),
            }
        }
    }

    fn read_word(&mut self) -> String {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if Self::is_word_char(ch) {
                self.advance();
            } else {
                break;
            }
        }
        self.input[start..self.position].iter().collect()
    }

    /// Returns the next word, or `None` at end of input.
    pub fn next_word(&mut self) -> Result<Option<String>, LexError> {
        self.skip_separators();

        let word = match self.current_char() {
            None => return Ok(None),
            Some(quote @ ('`' | '\'' | '"')) => self.read_literal(quote)?,
            Some(op @ ('!' | '<' | '>')) => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    format!("{}=", op)
                } else {
                    self.advance();
                    op.to_string()
                }
            }
            Some(ch) if Self::is_word_char(ch) => self.read_word(),
            Some(ch) => {
                self.advance();
                ch.to_string()
            }
        };

        Ok(Some(word))
    }

    /// Splits the whole input into words.
    pub fn words(mut self) -> Result<Vec<String>, LexError> {
        let mut words = vec![];
        while let Some(word) = self.next_word()? {
            words.push(word);
        }
        debug!(count = words.len(), "lexed query");
        Ok(words)
    }
}

#[test]
fn test_separators() {
    let mut lexer = Lexer::new("a,b \t\x0c c\r\nd\n\re");
    for expected in ["a", "b", "c", "d", "e"] {
        assert_eq!(lexer.next_word().unwrap().as_deref(), Some(expected));
    }
    assert_eq!(lexer.next_word().unwrap(), None);
}

#[test]
fn test_comparison_operators() {
    let words = Lexer::new("a!=1 b<=2 c>=3 d<4 e>5 f=6").words().unwrap();
    assert_eq!(
        words,
        vec![
            "a", "!=", "1", "b", "<=", "2", "c", ">=", "3", "d", "<", "4", "e", ">", "5", "f",
            "=", "6"
        ]
    );
}
