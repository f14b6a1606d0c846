use crate::{
    ast::Expr,
    error::ErrorKind,
    interpreter::{
        lexer::{Lexer, Token},
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_, '_> {
    /// Parses a comma-separated argument list after the opening `(`.
    ///
    /// An immediately encountered `)` produces an empty list. The closing
    /// parenthesis is consumed.
    ///
    /// Grammar: `arguments := (expression ("," expression)*)? ")"`
    pub(in crate::interpreter::parser) fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let mut arguments = Vec::new();
        if self.lexer.at(&Token::RParen) {
            self.lexer.advance()?;
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_expression()?);
            match self.lexer.current() {
                Token::Comma => self.lexer.advance()?,
                Token::RParen => {
                    self.lexer.advance()?;
                    break;
                },
                _ => {
                    return Err(self.lexer
                                   .fail(ErrorKind::Syntax, "Expected ',' or ')' in argument list."));
                },
            }
        }
        Ok(arguments)
    }
}

/// Parses a parameter list of the form `(a, b, c)` or `()`.
///
/// The lexer must be positioned at the opening `(`; the closing `)` is
/// consumed.
///
/// # Errors
/// Returns a `Syntax` error if a name is missing, a separator is wrong or a
/// parameter name repeats.
pub(in crate::interpreter::parser) fn parse_parameter_list(lexer: &mut Lexer<'_>)
                                                           -> ParseResult<Vec<String>> {
    lexer.expect(&Token::LParen, "'(' expected.")?;

    let mut names = Vec::new();
    if lexer.at(&Token::RParen) {
        lexer.advance()?;
        return Ok(names);
    }

    let Token::Name(first) = lexer.current() else {
        return Err(lexer.fail(ErrorKind::Syntax, "Expected name or ')' after '('."));
    };
    let mut name = first.clone();

    loop {
        if names.contains(&name) {
            return Err(lexer.fail(ErrorKind::Syntax, format!("Duplicate parameter '{name}'.")));
        }
        names.push(name);
        lexer.advance()?;

        match lexer.current() {
            Token::RParen => {
                lexer.advance()?;
                break;
            },
            Token::Comma => lexer.advance()?,
            _ => return Err(lexer.fail(ErrorKind::Syntax, "Expected ',' or ')' after name.")),
        }

        let Token::Name(next) = lexer.current() else {
            return Err(lexer.fail(ErrorKind::Syntax, "Expected name after ','."));
        };
        name = next.clone();
    }

    Ok(names)
}
