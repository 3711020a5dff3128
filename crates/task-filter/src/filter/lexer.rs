//! Lexer (tokenizer) for filter expressions.

use std::iter::Peekable;
use std::str::Chars;

/// A lexeme in a filter expression.
///
/// Tokens carry no source offsets; the parser reports errors by the index of
/// the token in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text, with surrounding quotes removed.
    pub text: String,
    /// Whether the text came from a quoted literal.
    pub quoted: bool,
}

impl Token {
    /// Creates a bare (unquoted) token.
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    /// Creates a token from a quoted literal.
    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: true,
        }
    }

    /// Returns true if this is the unquoted token `symbol`.
    ///
    /// Quoted tokens never match, so `"&&"` or `")"` in quotes stay literals.
    pub fn is(&self, symbol: &str) -> bool {
        !self.quoted && self.text == symbol
    }
}

/// Lexer for tokenizing filter expressions.
///
/// Tokenizing never fails: malformed input simply produces tokens that the
/// parser rejects later.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Text collected for the token being built.
    current: String,
    /// The open quote character, if inside a quoted literal.
    quote: Option<char>,
    /// Set when `current` holds text that began with a quote.
    current_quoted: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            current: String::new(),
            quote: None,
            current_quoted: false,
            tokens: Vec::new(),
        }
    }

    /// Emits the pending buffer as a token. Empty buffers are dropped.
    fn flush(&mut self) {
        if !self.current.is_empty() {
            let text = std::mem::take(&mut self.current);
            self.tokens.push(Token {
                text,
                quoted: self.current_quoted,
            });
        }
        self.current_quoted = false;
    }

    /// Emits a structural token (parenthesis or connective).
    fn push_symbol(&mut self, symbol: &str) {
        self.flush();
        self.tokens.push(Token::bare(symbol));
    }

    /// Consumes the input and returns the token stream.
    pub fn tokenize(mut self) -> Vec<Token> {
        while let Some(c) = self.chars.next() {
            if let Some(open) = self.quote {
                if c == open {
                    self.quote = None;
                    self.current_quoted = true;
                    self.flush();
                } else {
                    self.current.push(c);
                }
                continue;
            }

            match c {
                '"' | '\'' => {
                    self.quote = Some(c);
                }
                '(' | ')' => {
                    let mut buf = [0u8; 4];
                    self.push_symbol(c.encode_utf8(&mut buf));
                }
                '&' | '|' if self.chars.peek() == Some(&c) => {
                    self.chars.next();
                    self.push_symbol(if c == '&' { "&&" } else { "||" });
                }
                _ if c.is_whitespace() => self.flush(),
                _ => self.current.push(c),
            }
        }

        // An unterminated quote keeps whatever it collected
        if self.quote.take().is_some() {
            self.current_quoted = true;
        }
        self.flush();

        tracing::trace!(count = self.tokens.len(), "tokenized filter expression");
        self.tokens
    }
}

/// Splits a filter expression into tokens.
///
/// # Example
///
/// ```
/// use task_filter_rs::filter::tokenize;
///
/// let texts: Vec<String> = tokenize("done = false && (priority > low)")
///     .into_iter()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(
///     texts,
///     ["done", "=", "false", "&&", "(", "priority", ">", "low", ")"]
/// );
/// ```
pub fn tokenize(query: &str) -> Vec<Token> {
    Lexer::new(query).tokenize()
}
