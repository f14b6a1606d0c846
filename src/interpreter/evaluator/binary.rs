/// Dispatch of binary operators to their handlers.
pub mod core;

/// Addition, subtraction, multiplication and division.
pub mod scalar;

/// Exponentiation.
pub mod power;

/// Relational and equality operators.
pub mod comparison;

/// Operators defined only on integers: `%`, `&` and `|`.
pub mod integer;
