//! # numeval
//!
//! numeval is an integer and real expression evaluator written in Rust.
//! It parses and evaluates arithmetic, bitwise and comparison expressions,
//! conditionals, and calls to user-defined constants and functions,
//! including recursive ones.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{lexer::Lexer, parser::core::Parser};
pub use crate::{
    ast::Expression,
    error::{ErrorKind, ExpressionError},
    interpreter::{
        definition::{Definition, DefinitionId, DefinitionTable},
        evaluator::core::EvaluationContext,
        source::SourceText,
        value::core::Number,
    },
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator types that represent
/// an expression as a tree. The tree is built by the parser and traversed by
/// the evaluator.
///
/// # Responsibilities
/// - Defines node types for literals, parameters, operators, conditionals and
///   calls.
/// - Attaches byte offsets to nodes for error reporting.
/// - Renders trees back to text that parses to the same tree.
pub mod ast;
/// Provides the error type shared by lexing, parsing and evaluation.
///
/// Every failure is an `ExpressionError` carrying its kind, a message, the
/// text it occurred in and the byte offset of the offending token.
pub mod error;
/// Orchestrates lexing, parsing and evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: source text, lexer, parser, evaluator,
///   values and the definition table.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Parses a bare expression against `table`.
///
/// Names are resolved immediately, so the expression keeps referring to the
/// definitions it saw even if they are redefined later.
///
/// # Errors
/// Returns `Lex`, `Syntax`, `Name` or `Arity` errors, each pointing at the
/// offending token.
///
/// # Examples
/// ```
/// use numeval::{DefinitionTable, ErrorKind, parse};
///
/// let table = DefinitionTable::new();
/// let expression = parse("1 + 2 * 3", &table).unwrap();
/// assert_eq!(expression.to_string(), "(1 + (2 * 3))");
///
/// let err = parse("1 + x", &table).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Name);
/// assert_eq!(err.offset(), 4);
/// ```
pub fn parse(text: &str, table: &DefinitionTable) -> Result<Expression, ExpressionError> {
    let source = SourceText::new(text)?;
    tracing::trace!(%source, "parsing expression");

    let mut lexer = Lexer::new(&source)?;
    let root = Parser::new(&mut lexer, table, None).parse_full_expression()?;
    Ok(Expression::new(root, source))
}

/// Parses `name [(params)] => body` and adds it to `table`.
///
/// Redefining an existing name adds a new definition; the name now refers to
/// it, while previously parsed expressions keep the old one.
///
/// # Errors
/// Returns the same errors as [`parse`]. On error the table is unchanged.
///
/// # Examples
/// ```
/// use numeval::{DefinitionTable, Number, evaluate, parse_definition};
///
/// let mut table = DefinitionTable::new();
/// parse_definition("fib(n) => n < 2 ? n : fib(n - 1) + fib(n - 2)", &mut table).unwrap();
///
/// assert_eq!(evaluate("fib(20)", &table).unwrap(), Number::Integer(6765));
/// ```
pub fn parse_definition(text: &str,
                        table: &mut DefinitionTable)
                        -> Result<DefinitionId, ExpressionError> {
    let source = SourceText::new(text)?;
    let mut lexer = Lexer::new(&source)?;
    interpreter::parser::definition::parse_definition(&mut lexer, table)
}

/// Parses and evaluates `text` in one step.
///
/// # Errors
/// Returns any parse or evaluation error.
///
/// # Examples
/// ```
/// use numeval::{DefinitionTable, ErrorKind, Number, evaluate};
///
/// let table = DefinitionTable::new();
/// assert_eq!(evaluate("2 ** 10", &table).unwrap(), Number::Integer(1024));
/// assert_eq!(evaluate("7 / 2", &table).unwrap(), Number::Integer(3));
/// assert_eq!(evaluate("7 / 2.0", &table).unwrap(), Number::Real(3.5));
///
/// let err = evaluate("1 % 0", &table).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::DivideByZero);
/// ```
pub fn evaluate(text: &str, table: &DefinitionTable) -> Result<Number, ExpressionError> {
    parse(text, table)?.evaluate(table)
}
