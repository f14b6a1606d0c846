/// Shared, immutable input text.
///
/// Every parsed expression, definition and error keeps a handle to the text
/// it came from so that diagnostics can point into it.
pub mod source;
/// The lexer module tokenizes input text for further parsing.
///
/// The lexer reads the raw text and produces a stream of tokens, each
/// corresponding to a number, a name, an operator or a delimiter, together
/// with its byte offset.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source offsets.
/// - Parses integer and real literals.
/// - Reports lexical errors for unrecognized characters and oversized
///   literals.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST for expressions and definitions. Names are resolved during parsing,
/// so every reference in the tree points at a specific definition.
///
/// # Responsibilities
/// - Converts tokens into expression nodes following operator precedence.
/// - Resolves names to parameters or definitions and checks call arity.
/// - Reports syntax errors with the offset of the offending token.
pub mod parser;
/// The evaluator module executes AST nodes and computes results.
///
/// # Responsibilities
/// - Evaluates expression nodes, applying the numeric rules of each operator.
/// - Binds call arguments to parameters in per-call frames.
/// - Reports runtime errors such as division by zero or runaway recursion.
pub mod evaluator;
/// The value module defines the runtime number type.
///
/// Values are either 64-bit integers or double precision reals, with
/// promotion from integer to real whenever the two are mixed.
pub mod value;
/// Named constants and functions.
///
/// The definition table owns every parsed definition. Redefining a name adds
/// a new entry; expressions parsed earlier keep referring to the old one.
pub mod definition;
