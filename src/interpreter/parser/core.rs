use crate::{
    ast::{
        Compound, FormalArgument, Function, GlobalScope, PassingMode, Procedure, Program,
        TypeSpec, Variable, VariableDeclaration,
    },
    error::{Error, SyntaxError},
    interpreter::lexer::{self, Lexer, Position, Token},
};

/// Result type used by the parser.
///
/// Lexical errors surface through the same type because the parser pulls
/// tokens lazily while it descends.
pub type ParseResult<T> = Result<T, Error>;

/// A saved parser state: the lexer cursor plus the current token.
///
/// Restoring one rewinds the parser exactly to where the checkpoint was
/// taken; this is the mechanism behind the speculative declaration-block
/// pass.
pub struct ParserCheckpoint<'src> {
    lexer:   lexer::Checkpoint<'src>,
    current: Option<(Token, Position)>,
}

/// Recursive-descent parser over one token of lookahead.
///
/// Consumes tokens lazily from the [`Lexer`]; `current` is `None` once the
/// end of input is reached. Backtracking is available through
/// [`Parser::checkpoint`]/[`Parser::restore`] but is only exercised by the
/// declaration-block grammar and the one-token statement lookahead.
pub struct Parser<'src> {
    pub(in crate::interpreter::parser) lexer:   Lexer<'src>,
    pub(in crate::interpreter::parser) current: Option<(Token, Position)>,
}

impl<'src> Parser<'src> {
    /// Creates a parser and pulls the first token.
    ///
    /// # Errors
    /// Returns an error when the very first token is already invalid.
    pub fn new(mut lexer: Lexer<'src>) -> ParseResult<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parses a whole file into its global scope.
    ///
    /// The file may contain any number of procedures and functions, in any
    /// order, but exactly one `programme`.
    ///
    /// # Errors
    /// Returns the first [`SyntaxError`] or lexical error encountered; the
    /// parser never recovers past an error.
    pub fn parse(&mut self) -> ParseResult<GlobalScope> {
        self.skip_newlines()?;

        let mut program = None;
        let mut procedures = Vec::new();
        let mut functions = Vec::new();

        loop {
            match &self.current {
                Some((Token::Program, position)) => {
                    if program.is_some() {
                        return Err(SyntaxError::DuplicateProgram { line: position.line }.into());
                    }
                    program = Some(self.program()?);
                },
                Some((Token::Function, _)) => functions.push(self.function()?),
                Some((Token::Procedure, _)) => procedures.push(self.procedure()?),
                _ => break,
            }

            self.skip_newlines()?;
        }

        let Some(program) = program else {
            return Err(SyntaxError::MissingProgram.into());
        };

        if self.current.is_some() {
            return Err(self.unexpected("'programme', 'fonction' or 'procédure'"));
        }

        Ok(GlobalScope { program,
                         procedures,
                         functions })
    }

    /// `program : programme ID NEWLINE compound ID`
    ///
    /// The identifier after the compound's closing `fin` must repeat the
    /// program name verbatim.
    fn program(&mut self) -> ParseResult<Program> {
        let line = self.current_line();
        self.eat(&Token::Program)?;
        let (name, _) = self.identifier()?;
        self.eat(&Token::NewLine)?;

        let body = self.compound()?;

        let (closing, closing_line) = self.identifier()?;
        if closing != name {
            return Err(SyntaxError::ClosingLabelMismatch { kind: "programme",
                                                           expected: name,
                                                           found: closing,
                                                           line: closing_line }.into());
        }

        Ok(Program { name, body, line })
    }

    /// `function : fonction ID ( args ) retourne type compound ID`
    fn function(&mut self) -> ParseResult<Function> {
        let line = self.current_line();
        self.eat(&Token::Function)?;
        let (name, _) = self.identifier()?;

        self.eat(&Token::LParen)?;
        let args = self.formal_arguments()?;
        self.eat(&Token::RParen)?;

        self.eat(&Token::Returns)?;
        let return_type = self.type_spec()?;

        self.skip_newlines()?;
        let body = self.compound()?;

        let (closing, closing_line) = self.identifier()?;
        if closing != name {
            return Err(SyntaxError::ClosingLabelMismatch { kind: "fonction",
                                                           expected: name,
                                                           found: closing,
                                                           line: closing_line }.into());
        }

        Ok(Function { name,
                      args,
                      return_type,
                      body,
                      line })
    }

    /// `procedure : procédure ID ( args ) compound ID`
    fn procedure(&mut self) -> ParseResult<Procedure> {
        let line = self.current_line();
        self.eat(&Token::Procedure)?;
        let (name, _) = self.identifier()?;

        self.eat(&Token::LParen)?;
        let args = self.formal_arguments()?;
        self.eat(&Token::RParen)?;

        self.skip_newlines()?;
        let body = self.compound()?;

        let (closing, closing_line) = self.identifier()?;
        if closing != name {
            return Err(SyntaxError::ClosingLabelMismatch { kind: "procédure",
                                                           expected: name,
                                                           found: closing,
                                                           line: closing_line }.into());
        }

        Ok(Procedure { name, args, body, line })
    }

    /// Parses a formal argument list.
    ///
    /// Everything before the optional `;` separator is copy-mode,
    /// everything after it is reference-mode:
    ///
    /// `args : (copy ("," copy)*)? (";" (ref ("," ref)*)?)?`
    fn formal_arguments(&mut self) -> ParseResult<Vec<FormalArgument>> {
        let mut arguments = Vec::new();

        // The `;` can open the list directly when there are no copy
        // arguments.
        if !self.check(&Token::RParen) && !self.check(&Token::SemiColon) {
            arguments.push(self.formal_argument(PassingMode::Copy)?);
            while self.check(&Token::Comma) {
                self.advance()?;
                arguments.push(self.formal_argument(PassingMode::Copy)?);
            }
        }

        if self.check(&Token::SemiColon) {
            self.advance()?;
            if !self.check(&Token::RParen) {
                arguments.push(self.formal_argument(PassingMode::Reference)?);
                while self.check(&Token::Comma) {
                    self.advance()?;
                    arguments.push(self.formal_argument(PassingMode::Reference)?);
                }
            }
        }

        Ok(arguments)
    }

    /// `formal_argument : ID ":" type`
    fn formal_argument(&mut self, mode: PassingMode) -> ParseResult<FormalArgument> {
        let variable = self.variable_node()?;
        self.eat(&Token::Colon)?;
        let type_spec = self.type_spec()?;

        Ok(FormalArgument { variable,
                            type_spec,
                            mode })
    }

    /// `type : entier | réel | chaîne | caractère | booléen`
    pub(in crate::interpreter::parser) fn type_spec(&mut self) -> ParseResult<TypeSpec> {
        let (name, line) = match &self.current {
            Some((Token::TypeInteger, position)) => ("entier", position.line),
            Some((Token::TypeReal, position)) => ("réel", position.line),
            Some((Token::TypeString, position)) => ("chaîne", position.line),
            Some((Token::TypeChar, position)) => ("caractère", position.line),
            Some((Token::TypeBoolean, position)) => ("booléen", position.line),
            Some((token, position)) => {
                return Err(SyntaxError::ExpectedType { found: format!("{token:?}"),
                                                       line:  position.line, }.into());
            },
            None => {
                return Err(SyntaxError::UnexpectedEndOfInput { line: self.lexer
                                                                         .current_line() }.into());
            },
        };

        self.advance()?;
        Ok(TypeSpec { name: name.to_string(),
                      line })
    }

    /// `compound : début NEWLINE [declarations] statement_list fin`
    pub(in crate::interpreter::parser) fn compound(&mut self) -> ParseResult<Compound> {
        self.eat(&Token::Begin)?;
        self.eat(&Token::NewLine)?;
        self.skip_newlines()?;

        let declarations = if self.check(&Token::Declare) {
            self.declarations()?
        } else {
            Vec::new()
        };

        let statements = self.statement_list(&[Token::End])?;
        self.eat(&Token::End)?;

        Ok(Compound { declarations,
                      statements })
    }

    /// Parses an `avec` declaration block.
    ///
    /// The block has no closing keyword, so the parser reads it
    /// speculatively: after each declaration line it checkpoints, attempts
    /// one more line, and rewinds to the checkpoint when the attempt fails
    /// to parse. This is the only recovery-by-backtracking in the grammar;
    /// the failed attempt is re-parsed as a statement and any genuine error
    /// in it resurfaces there.
    fn declarations(&mut self) -> ParseResult<Vec<VariableDeclaration>> {
        self.eat(&Token::Declare)?;
        // The first declaration can share the `avec` line or start on the
        // next one.
        self.skip_newlines()?;

        let mut declarations = self.declaration_line()?;

        loop {
            let checkpoint = self.checkpoint();
            match self.speculative_declaration_line() {
                Ok(more) => declarations.extend(more),
                Err(_) => {
                    self.restore(checkpoint);
                    break;
                },
            }
        }

        Ok(declarations)
    }

    fn speculative_declaration_line(&mut self) -> ParseResult<Vec<VariableDeclaration>> {
        self.skip_newlines()?;
        self.declaration_line()
    }

    /// `declaration_line : ID ("," ID)* ":" type NEWLINE`
    ///
    /// Every name of the line receives the same declared type.
    fn declaration_line(&mut self) -> ParseResult<Vec<VariableDeclaration>> {
        let mut variables = vec![self.variable_node()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            variables.push(self.variable_node()?);
        }

        self.eat(&Token::Colon)?;
        let type_spec = self.type_spec()?;
        self.eat(&Token::NewLine)?;

        Ok(variables.into_iter()
                    .map(|variable| VariableDeclaration { variable,
                                                          type_spec: type_spec.clone() })
                    .collect())
    }

    /// Moves to the next token.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> ParseResult<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Consumes the expected token or fails.
    pub(in crate::interpreter::parser) fn eat(&mut self, expected: &Token) -> ParseResult<()> {
        match &self.current {
            Some((token, _)) if token == expected => self.advance(),
            _ => Err(self.unexpected(&format!("{expected:?}"))),
        }
    }

    /// Whether the current token equals `expected`.
    pub(in crate::interpreter::parser) fn check(&self, expected: &Token) -> bool {
        matches!(&self.current, Some((token, _)) if token == expected)
    }

    /// Consumes every line break until a token that is not one.
    pub(in crate::interpreter::parser) fn skip_newlines(&mut self) -> ParseResult<()> {
        while self.check(&Token::NewLine) {
            self.advance()?;
        }
        Ok(())
    }

    /// The line of the current token, or of the scan position at the end
    /// of input.
    pub(in crate::interpreter::parser) fn current_line(&self) -> usize {
        match &self.current {
            Some((_, position)) => position.line,
            None => self.lexer.current_line(),
        }
    }

    /// Consumes an identifier and returns its name and line.
    pub(in crate::interpreter::parser) fn identifier(&mut self) -> ParseResult<(String, usize)> {
        match &self.current {
            Some((Token::Identifier(name), position)) => {
                let result = (name.clone(), position.line);
                self.advance()?;
                Ok(result)
            },
            _ => Err(self.unexpected("an identifier")),
        }
    }

    /// Consumes an identifier into an unresolved [`Variable`] node.
    pub(in crate::interpreter::parser) fn variable_node(&mut self) -> ParseResult<Variable> {
        let (name, line) = self.identifier()?;
        Ok(Variable::new(name, line))
    }

    /// Looks one token past the current one without consuming anything.
    pub(in crate::interpreter::parser) fn peek_token(&mut self) -> ParseResult<Option<Token>> {
        let checkpoint = self.lexer.checkpoint();
        let next = self.lexer.next_token();
        self.lexer.restore(checkpoint);
        Ok(next?.map(|(token, _)| token))
    }

    /// Builds the error for a token that does not fit the grammar.
    pub(in crate::interpreter::parser) fn unexpected(&self, expected: &str) -> Error {
        match &self.current {
            Some((token, position)) => SyntaxError::UnexpectedToken { expected:
                                                                          expected.to_string(),
                                                                      found:
                                                                          format!("{token:?}"),
                                                                      line: position.line, }.into(),
            None => {
                SyntaxError::UnexpectedEndOfInput { line: self.lexer.current_line() }.into()
            },
        }
    }

    /// Saves the parser state as an opaque checkpoint.
    pub(in crate::interpreter::parser) fn checkpoint(&self) -> ParserCheckpoint<'src> {
        ParserCheckpoint { lexer:   self.lexer.checkpoint(),
                           current: self.current.clone(), }
    }

    /// Rewinds the parser to a previously saved checkpoint, restoring both
    /// the lexer cursor and the current token.
    pub(in crate::interpreter::parser) fn restore(&mut self, checkpoint: ParserCheckpoint<'src>) {
        self.lexer.restore(checkpoint.lexer);
        self.current = checkpoint.current;
    }
}
