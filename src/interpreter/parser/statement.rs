use crate::{
    ast::{Call, Expr, Statement},
    error::SyntaxError,
    interpreter::{
        builtins,
        lexer::Token,
        parser::{Parser, core::ParseResult},
    },
};

impl Parser<'_> {
    /// Parses statements until one of the `end` tokens or the end of
    /// input.
    ///
    /// Line breaks between statements are consumed here; the `end` tokens
    /// themselves are left for the caller (`fin`, `sinon`, or the
    /// `tant que` closing a `répéter`).
    pub(in crate::interpreter::parser) fn statement_list(&mut self,
                                                         end: &[Token])
                                                         -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();

        loop {
            self.skip_newlines()?;
            match &self.current {
                None => break,
                Some((token, _)) if end.contains(token) => break,
                _ => statements.push(self.statement()?),
            }
        }

        Ok(statements)
    }

    /// Parses a single statement.
    ///
    /// An identifier starts an assignment when the next token is `<-`; it
    /// starts a procedure call when it is followed by `(` or when it is
    /// one of the two parenthesis-optional intrinsics. A bare identifier
    /// that is neither collapses to an empty statement.
    fn statement(&mut self) -> ParseResult<Statement> {
        match &self.current {
            Some((Token::Identifier(name), _)) => {
                let name = name.clone();
                let next = self.peek_token()?;

                if next == Some(Token::Assign) {
                    self.assignment_statement()
                } else if builtins::is_builtin_procedure(&name) || next == Some(Token::LParen) {
                    self.procedure_call_statement()
                } else {
                    self.advance()?;
                    Ok(Statement::Empty)
                }
            },
            Some((Token::If, _)) => self.if_statement(),
            Some((Token::While, _)) => self.while_statement(),
            Some((Token::For, _)) => self.for_statement(),
            Some((Token::Repeat, _)) => self.do_while_statement(),
            Some((Token::Returns, _)) => self.return_statement(),
            _ => Err(self.unexpected("a statement")),
        }
    }

    /// `assignment : ID "<-" expr`
    fn assignment_statement(&mut self) -> ParseResult<Statement> {
        let target = self.variable_node()?;
        let line = self.current_line();
        self.eat(&Token::Assign)?;
        let value = self.expr()?;

        Ok(Statement::Assign { target, value, line })
    }

    /// `procedure_call : ID "(" call_args ")" | intrinsic call_args`
    ///
    /// `afficher` and `saisir` are the only procedures that may omit the
    /// parentheses; with them, the argument list runs to the end of the
    /// line.
    fn procedure_call_statement(&mut self) -> ParseResult<Statement> {
        let (name, line) = self.identifier()?;

        let optional_parens = builtins::is_builtin_procedure(&name);
        let parenthesized = !optional_parens || self.check(&Token::LParen);

        let args = if parenthesized {
            self.eat(&Token::LParen)?;
            let args = self.call_arguments(Some(&Token::RParen))?;
            self.eat(&Token::RParen)?;
            args
        } else {
            self.call_arguments(None)?
        };

        Ok(Statement::ProcedureCall(Call { name,
                                           args,
                                           line,
                                           symbol: None }))
    }

    /// Parses a call argument list, without consuming the closing token.
    ///
    /// The call site may mirror the declaration's `;` between the copy and
    /// reference sections:
    ///
    /// `call_args : (expr ("," expr)*)? (";" (expr ("," expr)*)?)?`
    pub(in crate::interpreter::parser) fn call_arguments(&mut self,
                                                         closing: Option<&Token>)
                                                         -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();

        if !self.at_arguments_end(closing) && !self.check(&Token::SemiColon) {
            args.push(self.expr()?);
            while self.check(&Token::Comma) {
                self.advance()?;
                args.push(self.expr()?);
            }
        }

        if self.check(&Token::SemiColon) {
            self.advance()?;
            if !self.at_arguments_end(closing) {
                args.push(self.expr()?);
                while self.check(&Token::Comma) {
                    self.advance()?;
                    args.push(self.expr()?);
                }
            }
        }

        Ok(args)
    }

    fn at_arguments_end(&self, closing: Option<&Token>) -> bool {
        match closing {
            Some(token) => self.check(token),
            None => matches!(&self.current, None | Some((Token::NewLine, _))),
        }
    }

    /// `if : si expr alors stmts (sinon stmts)? fin si`
    fn if_statement(&mut self) -> ParseResult<Statement> {
        let line = self.current_line();
        self.eat(&Token::If)?;
        let condition = self.expr()?;

        // The `alors` may sit on the next line.
        self.skip_newlines()?;
        self.eat(&Token::Then)?;

        let main = self.statement_list(&[Token::End, Token::Else])?;

        let alternative = if self.check(&Token::Else) {
            self.advance()?;
            self.statement_list(&[Token::End])?
        } else {
            Vec::new()
        };

        self.eat(&Token::End)?;
        self.eat(&Token::If)?;

        Ok(Statement::If { condition,
                           main,
                           alternative,
                           line })
    }

    /// `while : tant que expr faire stmts fin faire`
    fn while_statement(&mut self) -> ParseResult<Statement> {
        let line = self.current_line();
        self.eat(&Token::While)?;
        let condition = self.expr()?;

        self.skip_newlines()?;
        self.eat(&Token::Do)?;

        let body = self.statement_list(&[Token::End])?;
        self.eat(&Token::End)?;
        self.eat(&Token::Do)?;

        Ok(Statement::While { condition, body, line })
    }

    /// `do_while : répéter stmts tant que expr`
    ///
    /// No closing keyword: the `tant que` both ends the body and carries
    /// the condition.
    fn do_while_statement(&mut self) -> ParseResult<Statement> {
        let line = self.current_line();
        self.eat(&Token::Repeat)?;

        let body = self.statement_list(&[Token::While])?;

        self.eat(&Token::While)?;
        let condition = self.expr()?;

        Ok(Statement::DoWhile { body, condition, line })
    }

    /// `for : pour ID de expr à expr (pas expr)? faire stmts fin faire`
    ///
    /// Boolean and string literal bounds are rejected here, at parse time.
    fn for_statement(&mut self) -> ParseResult<Statement> {
        let line = self.current_line();
        self.eat(&Token::For)?;
        let counter = self.variable_node()?;

        self.eat(&Token::From)?;
        let start = self.expr()?;
        self.eat(&Token::To)?;
        let end = self.expr()?;

        let step = if self.check(&Token::Step) {
            self.advance()?;
            Some(self.expr()?)
        } else {
            None
        };

        self.eat(&Token::Do)?;
        let body = self.statement_list(&[Token::End])?;
        self.eat(&Token::End)?;
        self.eat(&Token::Do)?;

        Self::reject_literal_bound(&start)?;
        Self::reject_literal_bound(&end)?;

        Ok(Statement::For { counter,
                            start,
                            end,
                            step,
                            body,
                            line })
    }

    fn reject_literal_bound(bound: &Expr) -> ParseResult<()> {
        match bound {
            Expr::BooleanLiteral { line, .. } => {
                Err(SyntaxError::BooleanLoopBound { line: *line }.into())
            },
            Expr::StringLiteral { line, .. } => {
                Err(SyntaxError::StringLoopBound { line: *line }.into())
            },
            _ => Ok(()),
        }
    }

    /// `return : retourne expr`
    fn return_statement(&mut self) -> ParseResult<Statement> {
        let line = self.current_line();
        self.eat(&Token::Returns)?;
        let expr = self.expr()?;

        Ok(Statement::Return { expr, line })
    }
}
