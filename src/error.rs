/// The engine's diagnostic type.
///
/// Every failure raised while lexing, parsing or evaluating an expression is
/// an [`ExpressionError`]. The [`ErrorKind`] tag tells the failures apart, and
/// the attached source text and byte offset let a caller point at the
/// offending character.
pub mod expression_error;

pub use expression_error::{ErrorKind, ExpressionError};
