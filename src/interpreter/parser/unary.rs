use crate::{
    ast::{Expr, UnaryOperator},
    error::ErrorKind,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser, Target},
        value::core::Number,
    },
};

impl Parser<'_, '_> {
    /// Parses a unary expression.
    ///
    /// Unary minus is right-associative, so `--x` is parsed as `-(-x)`.
    ///
    /// Grammar:
    /// ```text
    ///     unary := "-" unary
    ///            | primary
    /// ```
    pub(crate) fn parse_unary(&mut self) -> ParseResult<Expr> {
        if self.lexer.at(&Token::Minus) {
            let offset = self.lexer.offset();
            self.descend()?;
            self.lexer.advance()?;
            let operand = self.parse_unary()?;
            self.ascend(1);
            return Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                                      operand: Box::new(operand),
                                      offset });
        }
        self.parse_primary()
    }

    /// Parses a primary (atomic) expression.
    ///
    /// Grammar:
    /// ```text
    ///     primary := integer | real
    ///              | "(" expression ")"
    ///              | name
    ///              | name "(" arguments ")"
    /// ```
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.lexer.current() {
            Token::Integer(value) => {
                let value = Number::Integer(*value);
                self.lexer.advance()?;
                Ok(Expr::Literal { value })
            },
            Token::Real(value) => {
                let value = Number::Real(*value);
                self.lexer.advance()?;
                Ok(Expr::Literal { value })
            },
            Token::LParen => {
                self.lexer.advance()?;
                let expr = self.parse_expression()?;
                self.lexer.expect(&Token::RParen, "')' expected.")?;
                Ok(expr)
            },
            Token::Name(name) => {
                let name = name.clone();
                self.parse_name(name)
            },
            Token::End => Err(self.lexer.fail(ErrorKind::Syntax, "Unexpected end of input.")),
            token => {
                let message = format!("Expected expression, found {}.", token.describe());
                Err(self.lexer.fail(ErrorKind::Syntax, message))
            },
        }
    }

    /// Resolves a name at the current token.
    ///
    /// Parameters of the pending definition win over definitions. A constant
    /// becomes [`Expr::Global`]; a function must be followed by an argument
    /// list and becomes [`Expr::Call`].
    ///
    /// # Errors
    /// - `Name` if the name is unknown.
    /// - `Syntax` if a function is not called or a constant is called.
    /// - `Arity` if the argument count does not match the parameter count.
    fn parse_name(&mut self, name: String) -> ParseResult<Expr> {
        let offset = self.lexer.offset();

        if let Some(index) = self.pending.and_then(|pending| pending.parameter_index(&name)) {
            self.lexer.advance()?;
            return Ok(Expr::Parameter { index, name, offset });
        }

        let target = self.resolve(&name).ok_or_else(|| {
                                           self.lexer.fail(ErrorKind::Name,
                                                           format!("Undefined name '{name}'."))
                                       })?;
        self.lexer.advance()?;

        if target.is_function {
            return self.parse_call(target, name, offset);
        }

        if self.lexer.at(&Token::LParen) {
            return Err(self.lexer.fail(ErrorKind::Syntax, format!("'{name}' is not a function.")));
        }

        Ok(Expr::Global { definition: target.id,
                          name,
                          offset })
    }

    /// Parses the argument list of a call and checks its length.
    fn parse_call(&mut self, target: Target, name: String, offset: usize) -> ParseResult<Expr> {
        if !self.lexer.at(&Token::LParen) {
            return Err(self.lexer
                           .fail(ErrorKind::Syntax, format!("'(' expected after '{name}'.")));
        }
        self.lexer.advance()?;

        let arguments = self.parse_arguments()?;
        if arguments.len() != target.arity {
            return Err(self.lexer.fail_at(ErrorKind::Arity,
                                          format!("'{name}' takes {} argument{} but {} {} given.",
                                                  target.arity,
                                                  if target.arity == 1 { "" } else { "s" },
                                                  arguments.len(),
                                                  if arguments.len() == 1 { "was" } else { "were" }),
                                          offset));
        }

        Ok(Expr::Call { definition: target.id,
                        name,
                        arguments,
                        offset })
    }
}
