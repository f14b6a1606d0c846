use crate::interpreter::source::SourceText;

/// Distinguishes the ways an expression can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A character that does not start any token, or an integer literal that
    /// does not fit in 64 bits.
    Lex,
    /// An unexpected token or missing punctuation.
    Syntax,
    /// A name that is neither a parameter nor a definition.
    Name,
    /// A function called with the wrong number of arguments.
    Arity,
    /// An integer-only operator applied to a real operand.
    Domain,
    /// Division or remainder by zero.
    DivideByZero,
    /// The input is too large to be held as a [`SourceText`].
    Allocation,
    /// Nested calls went deeper than the evaluation context allows.
    RecursionLimit,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Lex => "lex error",
            Self::Syntax => "syntax error",
            Self::Name => "name error",
            Self::Arity => "arity error",
            Self::Domain => "domain error",
            Self::DivideByZero => "division by zero",
            Self::Allocation => "allocation error",
            Self::RecursionLimit => "recursion limit",
        };
        f.write_str(name)
    }
}

/// An error raised by the lexer, the parser or the evaluator.
///
/// Carries the full text being processed and a byte offset into it, so the
/// caller can render a caret under the offending character with
/// [`ExpressionError::caret`].
#[derive(Debug, Clone)]
pub struct ExpressionError {
    kind:    ErrorKind,
    message: String,
    source:  SourceText,
    offset:  usize,
}

impl ExpressionError {
    #[must_use]
    pub fn new(kind: ErrorKind,
               message: impl Into<String>,
               source: &SourceText,
               offset: usize)
               -> Self {
        Self { kind,
               message: message.into(),
               source: source.clone(),
               offset }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The text the offset points into.
    ///
    /// For failures inside a function body this is the text the definition
    /// was parsed from, not the expression that called it.
    #[must_use]
    pub const fn source(&self) -> &SourceText {
        &self.source
    }

    /// Byte offset of the offending token.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Renders the message, the source line and a caret under the offset.
    ///
    /// # Example
    /// ```
    /// use numeval::{DefinitionTable, parse};
    ///
    /// let table = DefinitionTable::new();
    /// let err = parse("1 + $", &table).unwrap_err();
    ///
    /// assert_eq!(err.caret(),
    ///            "Error: Unrecognized character '$'.\n       1 + $\n           ^");
    /// ```
    #[must_use]
    pub fn caret(&self) -> String {
        let text = self.source.as_str();
        let column = text.get(..self.offset)
                         .map_or(self.offset, |prefix| prefix.chars().count());

        format!("Error: {}\n       {}\n       {}^",
                self.message,
                text,
                " ".repeat(column))
    }
}

impl std::fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExpressionError {}
