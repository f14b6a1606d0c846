use logos::Logos;

use crate::{
    error::{ErrorKind, ExpressionError},
    interpreter::source::SourceText,
};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(error = LexFault)]
pub enum Token {
    /// Real literal tokens, such as `3.14` or `2.0`.
    #[regex(r"[0-9]+\.[0-9]+", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Names of parameters and definitions, such as `n` or `is_prime`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Name(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `**`
    #[token("**")]
    StarStar,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `=`
    #[token("=")]
    Equal,
    /// `!=` or `<>`
    #[token("!=")]
    #[token("<>")]
    NotEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `?`
    #[token("?")]
    Question,
    /// `:`
    #[token(":")]
    Colon,
    /// `=>`
    #[token("=>")]
    Arrow,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// End of input. Never produced by logos itself; [`Lexer`] yields it
    /// once the text is exhausted.
    End,
}

impl Token {
    /// Describes the token for use in error messages.
    ///
    /// # Example
    /// ```
    /// use numeval::interpreter::lexer::Token;
    ///
    /// assert_eq!(Token::StarStar.describe(), "'**'");
    /// assert_eq!(Token::Name("x".to_string()).describe(), "name 'x'");
    /// assert_eq!(Token::End.describe(), "end of input");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        let symbol = match self {
            Self::Real(value) => return format!("number {value}"),
            Self::Integer(value) => return format!("number {value}"),
            Self::Name(name) => return format!("name '{name}'"),
            Self::End => return "end of input".to_string(),
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::StarStar => "**",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Question => "?",
            Self::Colon => ":",
            Self::Arrow => "=>",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Comma => ",",
        };
        format!("'{symbol}'")
    }
}

/// Why logos rejected a slice of input.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LexFault {
    /// No token starts with this character.
    #[default]
    UnrecognizedCharacter,
    /// An integer literal that does not fit in an `i64`, or a real literal
    /// beyond the finite range of an `f64`.
    LiteralTooLarge,
}

/// Parses a real literal from the current token slice.
///
/// # Errors
/// [`LexFault::LiteralTooLarge`] if the value rounds to infinity.
fn parse_real(lex: &logos::Lexer<Token>) -> Result<f64, LexFault> {
    lex.slice()
       .parse::<f64>()
       .ok()
       .filter(|real| real.is_finite())
       .ok_or(LexFault::LiteralTooLarge)
}

/// Parses an integer literal from the current token slice.
///
/// # Errors
/// [`LexFault::LiteralTooLarge`] if the digits overflow an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexFault> {
    lex.slice().parse().map_err(|_| LexFault::LiteralTooLarge)
}

/// A cursor over the tokens of one [`SourceText`].
///
/// The lexer always holds a current token together with its byte offset.
/// [`Lexer::advance`] moves to the next token; once the input is exhausted
/// the current token stays [`Token::End`].
#[derive(Clone)]
pub struct Lexer<'s> {
    source:  &'s SourceText,
    tokens:  logos::Lexer<'s, Token>,
    current: Token,
    offset:  usize,
}

impl<'s> Lexer<'s> {
    /// Creates a lexer positioned at the first token of `source`.
    ///
    /// # Errors
    /// Returns an [`ErrorKind::Lex`] error if the first token is invalid.
    ///
    /// # Example
    /// ```
    /// use numeval::interpreter::{
    ///     lexer::{Lexer, Token},
    ///     source::SourceText,
    /// };
    ///
    /// let source = SourceText::new("  f(2)").unwrap();
    /// let mut lexer = Lexer::new(&source).unwrap();
    /// assert_eq!(lexer.current(), &Token::Name("f".to_string()));
    /// assert_eq!(lexer.offset(), 2);
    ///
    /// lexer.advance().unwrap();
    /// assert_eq!(lexer.current(), &Token::LParen);
    /// ```
    pub fn new(source: &'s SourceText) -> Result<Self, ExpressionError> {
        let mut lexer = Self { source,
                               tokens: Token::lexer(source.as_str()),
                               current: Token::End,
                               offset: 0 };
        lexer.advance()?;
        Ok(lexer)
    }

    #[must_use]
    pub const fn current(&self) -> &Token {
        &self.current
    }

    /// Byte offset of the current token.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn source(&self) -> &'s SourceText {
        self.source
    }

    /// Returns `true` if the current token equals `token`.
    #[must_use]
    pub fn at(&self, token: &Token) -> bool {
        self.current == *token
    }

    /// Moves to the next token, skipping whitespace.
    ///
    /// # Errors
    /// Returns an [`ErrorKind::Lex`] error pointing at an unrecognized
    /// character or an out-of-range integer literal.
    pub fn advance(&mut self) -> Result<(), ExpressionError> {
        match self.tokens.next() {
            Some(Ok(token)) => {
                self.offset = self.tokens.span().start;
                self.current = token;
                Ok(())
            },
            Some(Err(fault)) => {
                self.offset = self.tokens.span().start;
                let message = match fault {
                    LexFault::UnrecognizedCharacter => {
                        format!("Unrecognized character '{}'.", self.tokens.slice())
                    },
                    LexFault::LiteralTooLarge => {
                        format!("Literal '{}' is too large.", self.tokens.slice())
                    },
                };
                Err(self.fail(ErrorKind::Lex, message))
            },
            None => {
                self.offset = self.source.len();
                self.current = Token::End;
                Ok(())
            },
        }
    }

    /// Consumes the current token if it equals `expected`, otherwise fails
    /// with a syntax error carrying `message`.
    ///
    /// # Errors
    /// [`ErrorKind::Syntax`] on mismatch, or any error from [`Lexer::advance`].
    pub fn expect(&mut self, expected: &Token, message: &str) -> Result<(), ExpressionError> {
        if !self.at(expected) {
            return Err(self.fail(ErrorKind::Syntax, message));
        }
        self.advance()
    }

    /// Builds an error pointing at the current token.
    #[must_use]
    pub fn fail(&self, kind: ErrorKind, message: impl Into<String>) -> ExpressionError {
        self.fail_at(kind, message, self.offset)
    }

    /// Builds an error pointing at an earlier offset of the same source.
    #[must_use]
    pub fn fail_at(&self, kind: ErrorKind, message: impl Into<String>, offset: usize) -> ExpressionError {
        ExpressionError::new(kind, message, self.source, offset)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tokenize(input: &str) -> Vec<(Token, usize)> {
        let source = SourceText::new(input).unwrap();
        let mut lexer = Lexer::new(&source).unwrap();
        let mut tokens = vec![(lexer.current().clone(), lexer.offset())];
        while !lexer.at(&Token::End) {
            lexer.advance().unwrap();
            tokens.push((lexer.current().clone(), lexer.offset()));
        }
        tokens
    }

    fn lex_error(input: &str) -> ExpressionError {
        let source = SourceText::new(input).unwrap();
        let mut lexer = match Lexer::new(&source) {
            Ok(lexer) => lexer,
            Err(err) => return err,
        };
        loop {
            if let Err(err) = lexer.advance() {
                return err;
            }
            assert!(!lexer.at(&Token::End), "expected a lex error for {input:?}");
        }
    }

    #[test]
    fn tokenize_empty() {
        assert_eq!(tokenize(""), vec![(Token::End, 0)]);
        assert_eq!(tokenize(" \t\r\n"), vec![(Token::End, 4)]);
    }

    #[test]
    fn tokenize_numbers() {
        assert_eq!(tokenize("3 3.25"),
                   vec![(Token::Integer(3), 0), (Token::Real(3.25), 2), (Token::End, 6)]);
    }

    #[test]
    fn tokenize_names() {
        assert_eq!(tokenize("a_b _x9"),
                   vec![(Token::Name("a_b".to_string()), 0),
                        (Token::Name("_x9".to_string()), 4),
                        (Token::End, 7)]);
    }

    #[test]
    fn tokenize_operators_prefer_longest_match() {
        let kinds = tokenize("** * => = <= < <> >= > != & | ? : , ( )").into_iter()
                                                                    .map(|(token, _)| token)
                                                                    .collect::<Vec<_>>();
        assert_eq!(kinds,
                   vec![Token::StarStar,
                        Token::Star,
                        Token::Arrow,
                        Token::Equal,
                        Token::LessEqual,
                        Token::Less,
                        Token::NotEqual,
                        Token::GreaterEqual,
                        Token::Greater,
                        Token::NotEqual,
                        Token::Ampersand,
                        Token::Pipe,
                        Token::Question,
                        Token::Colon,
                        Token::Comma,
                        Token::LParen,
                        Token::RParen,
                        Token::End]);
    }

    #[test]
    fn tokenize_definition_offsets() {
        assert_eq!(tokenize("sq(n)=>n**2"),
                   vec![(Token::Name("sq".to_string()), 0),
                        (Token::LParen, 2),
                        (Token::Name("n".to_string()), 3),
                        (Token::RParen, 4),
                        (Token::Arrow, 5),
                        (Token::Name("n".to_string()), 7),
                        (Token::StarStar, 8),
                        (Token::Integer(2), 10),
                        (Token::End, 11)]);
    }

    #[test]
    fn unrecognized_character() {
        let err = lex_error("1 + $");
        assert_eq!(err.kind(), ErrorKind::Lex);
        assert_eq!(err.offset(), 4);
        assert_eq!(err.message(), "Unrecognized character '$'.");

        let err = lex_error("#");
        assert_eq!(err.kind(), ErrorKind::Lex);
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn integer_literal_too_large() {
        let err = lex_error("1 + 99999999999999999999");
        assert_eq!(err.kind(), ErrorKind::Lex);
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn real_literal_too_large() {
        let input = format!("2 * 1{}.0", "0".repeat(400));
        let err = lex_error(&input);
        assert_eq!(err.kind(), ErrorKind::Lex);
        assert_eq!(err.offset(), 4);
        assert!(err.message().ends_with("is too large."));

        assert_eq!(tokenize("179769313486231570000000.5")[0].0,
                   Token::Real(179_769_313_486_231_570_000_000.5));
    }
}
