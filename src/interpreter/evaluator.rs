/// Binary operator evaluation logic.
///
/// Applies the numeric rules for arithmetic, bitwise and comparison
/// operators, including integer wrapping and promotion to real.
pub mod binary;

/// Unary operator evaluation logic.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the evaluation context, its frame stack and the dispatch over
/// expression nodes.
pub mod core;

/// Evaluation of calls and constant references.
///
/// Pushes argument frames, enforces the call depth limit and evaluates the
/// referenced definition's body against its own source text.
pub mod function;
