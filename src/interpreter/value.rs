/// The numeric tower.
///
/// Defines [`core::Number`], the two-variant value every expression
/// evaluates to, together with the promotion rule that turns an integer
/// into a real when it meets one.
pub mod core;
