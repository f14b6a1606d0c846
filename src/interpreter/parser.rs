/// Core parsing logic.
///
/// Defines the [`core::Parser`] state (lexer, definition table and the
/// definition being built, if any), the entry point for full expressions and
/// the conditional operator at the bottom of the precedence ladder.
pub mod core;

/// Binary operator parsing.
///
/// One function per precedence level, from comparison up to power.
pub mod binary;

/// Unary operator and primary expression parsing.
///
/// Handles negation, literals, groups, name resolution and calls.
pub mod unary;

/// Definition headers.
///
/// Parses `name [(params)] =>` and hands the body to the parser with the
/// pending definition in scope.
pub mod definition;

/// Utility functions for the parser.
///
/// Comma-separated argument and parameter lists.
pub mod utils;
