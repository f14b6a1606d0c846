use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for tokens that are not binary operators.
///
/// # Example
/// ```
/// use numeval::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::StarStar),
///            Some(BinaryOperator::Pow));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::StarStar => Some(BinaryOperator::Pow),
        Token::Ampersand => Some(BinaryOperator::BitAnd),
        Token::Pipe => Some(BinaryOperator::BitOr),
        Token::Equal => Some(BinaryOperator::Equal),
        Token::NotEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}

impl Parser<'_, '_> {
    /// Parses one left-associative precedence level.
    ///
    /// `operand` parses the next-higher level; `accepts` selects the
    /// operators that belong to this level. Each operator in the chain adds
    /// a level to the tree, so each one counts toward the nesting limit.
    fn parse_left_associative(&mut self,
                              operand: fn(&mut Self) -> ParseResult<Expr>,
                              accepts: fn(BinaryOperator) -> bool)
                              -> ParseResult<Expr> {
        let mut left = operand(self)?;
        let mut levels = 0;
        loop {
            if let Some(op) = token_to_binary_operator(self.lexer.current())
               && accepts(op)
            {
                let offset = self.lexer.offset();
                self.descend()?;
                levels += 1;
                self.lexer.advance()?;
                let right = operand(self)?;
                left = Expr::BinaryOp { left: Box::new(left),
                                        op,
                                        right: Box::new(right),
                                        offset };
                continue;
            }
            break;
        }
        self.ascend(levels);
        Ok(left)
    }

    /// Parses relational and equality operators.
    ///
    /// The rule is: `comparison := bit_or (("=" | "!=" | "<" | ">" | "<=" |
    /// ">=") bit_or)*`
    pub(crate) fn parse_comparison(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(Self::parse_bit_or, BinaryOperator::is_comparison)
    }

    /// Parses bitwise or.
    ///
    /// The rule is: `bit_or := bit_and ("|" bit_and)*`
    fn parse_bit_or(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(Self::parse_bit_and, |op| op == BinaryOperator::BitOr)
    }

    /// Parses bitwise and.
    ///
    /// The rule is: `bit_and := additive ("&" additive)*`
    fn parse_bit_and(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(Self::parse_additive, |op| op == BinaryOperator::BitAnd)
    }

    /// Parses addition and subtraction expressions.
    ///
    /// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
    fn parse_additive(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(Self::parse_multiplicative, |op| {
                matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
            })
    }

    /// Parses multiplication-level expressions.
    ///
    /// The rule is: `multiplicative := power (("*" | "/" | "%") power)*`
    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(Self::parse_power, |op| {
                matches!(op, BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
            })
    }

    /// Parses exponentiation expressions.
    ///
    /// Right-associative: `a ** b ** c` parses as `a ** (b ** c)`. Both sides
    /// are unary expressions, so `-2 ** 2` is `(-2) ** 2`.
    ///
    /// The rule is: `power := unary ("**" power)?`
    fn parse_power(&mut self) -> ParseResult<Expr> {
        let base = self.parse_unary()?;
        if !self.lexer.at(&Token::StarStar) {
            return Ok(base);
        }
        let offset = self.lexer.offset();
        self.descend()?;
        self.lexer.advance()?;
        let exponent = self.parse_power()?;
        self.ascend(1);

        Ok(Expr::BinaryOp { left: Box::new(base),
                            op: BinaryOperator::Pow,
                            right: Box::new(exponent),
                            offset })
    }
}
