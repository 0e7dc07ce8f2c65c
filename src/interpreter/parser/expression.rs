use crate::{
    ast::{BinaryOperator, Call, Expr, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{Parser, core::ParseResult},
    },
};

impl Parser<'_> {
    /// Parses a full expression.
    ///
    /// `expr : term (("+" | "-") term)*`
    ///
    /// Note the unusual precedence of the language: comparisons live one
    /// level below, inside [`Parser::term`], so they bind tighter than
    /// addition.
    pub(in crate::interpreter::parser) fn expr(&mut self) -> ParseResult<Expr> {
        let mut node = self.term()?;

        while let Some(op) = self.additive_operator() {
            let line = self.current_line();
            self.advance()?;
            let right = self.term()?;

            node = Expr::BinaryOp { left: Box::new(node),
                                    op,
                                    right: Box::new(right),
                                    line };
        }

        Ok(node)
    }

    /// `term : factor (("*" | "/" | mod | comparison) factor)*`
    fn term(&mut self) -> ParseResult<Expr> {
        let mut node = self.factor()?;

        while let Some(op) = self.term_operator() {
            let line = self.current_line();
            self.advance()?;
            let right = self.factor()?;

            node = Expr::BinaryOp { left: Box::new(node),
                                    op,
                                    right: Box::new(right),
                                    line };
        }

        Ok(node)
    }

    /// Parses a factor: a literal, a unary operation, a parenthesized
    /// expression, a variable, or a function call when the identifier is
    /// immediately followed by `(`.
    ///
    /// Line breaks are allowed before a factor, so an expression can
    /// continue on the next line after an operator or an opening
    /// parenthesis.
    fn factor(&mut self) -> ParseResult<Expr> {
        self.skip_newlines()?;

        match &self.current {
            Some((Token::Plus, position)) => {
                let line = position.line;
                self.advance()?;
                Ok(Expr::UnaryOp { op: UnaryOperator::Plus,
                                   expr: Box::new(self.factor()?),
                                   line })
            },
            Some((Token::Minus, position)) => {
                let line = position.line;
                self.advance()?;
                Ok(Expr::UnaryOp { op: UnaryOperator::Minus,
                                   expr: Box::new(self.factor()?),
                                   line })
            },
            Some((Token::Not, position)) => {
                let line = position.line;
                self.advance()?;
                Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                                   expr: Box::new(self.factor()?),
                                   line })
            },
            Some((Token::IntegerConst(value), position)) => {
                let (value, line) = (*value, position.line);
                self.advance()?;
                Ok(Expr::IntegerLiteral { value, line })
            },
            Some((Token::RealConst(value), position)) => {
                let (value, line) = (*value, position.line);
                self.advance()?;
                Ok(Expr::RealLiteral { value, line })
            },
            Some((Token::StringConst(value), position)) => {
                let (value, line) = (value.clone(), position.line);
                self.advance()?;
                Ok(Expr::StringLiteral { value, line })
            },
            Some((Token::CharConst(value), position)) => {
                let (value, line) = (*value, position.line);
                self.advance()?;
                Ok(Expr::CharLiteral { value, line })
            },
            Some((Token::BooleanConst(value), position)) => {
                let (value, line) = (*value, position.line);
                self.advance()?;
                Ok(Expr::BooleanLiteral { value, line })
            },
            Some((Token::LParen, _)) => {
                self.advance()?;
                let node = self.expr()?;

                // The closing parenthesis may sit on its own line.
                self.skip_newlines()?;
                self.eat(&Token::RParen)?;

                Ok(node)
            },
            Some((Token::Identifier(_), _)) => {
                let variable = self.variable_node()?;

                // A trailing `(` turns the identifier into a function
                // call.
                if self.check(&Token::LParen) {
                    self.advance()?;
                    let args = self.call_arguments(Some(&Token::RParen))?;
                    self.eat(&Token::RParen)?;

                    return Ok(Expr::FunctionCall(Call { name:   variable.name,
                                                        args,
                                                        line:   variable.line,
                                                        symbol: None, }));
                }

                Ok(Expr::Variable(variable))
            },
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn additive_operator(&self) -> Option<BinaryOperator> {
        match &self.current {
            Some((Token::Plus, _)) => Some(BinaryOperator::Add),
            Some((Token::Minus, _)) => Some(BinaryOperator::Sub),
            _ => None,
        }
    }

    fn term_operator(&self) -> Option<BinaryOperator> {
        match &self.current {
            Some((Token::Mul, _)) => Some(BinaryOperator::Mul),
            Some((Token::Div, _)) => Some(BinaryOperator::Div),
            Some((Token::Mod, _)) => Some(BinaryOperator::Mod),
            Some((Token::Equal, _)) => Some(BinaryOperator::Equal),
            Some((Token::NotEqual, _)) => Some(BinaryOperator::NotEqual),
            Some((Token::Less, _)) => Some(BinaryOperator::Less),
            Some((Token::Greater, _)) => Some(BinaryOperator::Greater),
            Some((Token::LessEqual, _)) => Some(BinaryOperator::LessEqual),
            Some((Token::GreaterEqual, _)) => Some(BinaryOperator::GreaterEqual),
            _ => None,
        }
    }
}
