use logos::Logos;

use crate::error::LexicalError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens of the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Real literal tokens, such as `3.14` or `2.`.
    #[regex(r"[0-9]+\.[0-9]*", parse_real)]
    RealConst(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    IntegerConst(i64),
    /// Boolean literal tokens: `vrai` or `faux`.
    #[token("vrai", |_| true)]
    #[token("faux", |_| false)]
    BooleanConst(bool),
    /// String literal tokens; `\n` and `\"` escapes are already processed,
    /// any other backslash passes through literally.
    #[regex(r#""([^"\\]|\\.)*""#, unescape_string)]
    StringConst(String),
    /// Character literal tokens: exactly one, possibly escaped, character
    /// between single quotes.
    #[regex(r"'(\\.|[^'\\])'", unescape_char)]
    CharConst(char),

    /// `programme`
    #[token("programme")]
    Program,
    /// `procédure`
    #[token("procédure")]
    Procedure,
    /// `fonction`
    #[token("fonction")]
    Function,
    /// `début`
    #[token("début")]
    Begin,
    /// `fin`
    #[token("fin")]
    End,
    /// `avec`, opening a variable declaration block.
    #[token("avec")]
    Declare,
    /// `si`
    #[token("si")]
    If,
    /// `sinon`
    #[token("sinon")]
    Else,
    /// `alors`
    #[token("alors")]
    Then,
    /// `faire`
    #[token("faire")]
    Do,
    /// The two-word keyword `tant que`, spaces between the words.
    #[regex(r"tant[ \t]+que")]
    While,
    /// `répéter`
    #[token("répéter")]
    Repeat,
    /// `pour`
    #[token("pour")]
    For,
    /// `de`
    #[token("de")]
    From,
    /// `à`
    #[token("à")]
    To,
    /// `pas`
    #[token("pas")]
    Step,
    /// `retourne`
    #[token("retourne")]
    Returns,

    /// `entier`
    #[token("entier")]
    TypeInteger,
    /// `réel`
    #[token("réel")]
    TypeReal,
    /// `chaîne`
    #[token("chaîne")]
    TypeString,
    /// `caractère`, with `car` accepted as an alias.
    #[token("caractère")]
    #[token("car")]
    TypeChar,
    /// `booléen`
    #[token("booléen")]
    TypeBoolean,

    /// `mod` or `%`
    #[token("mod")]
    #[token("%")]
    Mod,
    /// `non` or `!`
    #[token("non")]
    #[token("!")]
    Not,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Mul,
    /// `/`
    #[token("/")]
    Div,
    /// `=`
    #[token("=")]
    Equal,
    /// `!=`
    #[token("!=")]
    NotEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<-`
    #[token("<-")]
    Assign,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`, the copy/reference separator in argument lists.
    #[token(";")]
    SemiColon,

    /// Identifier tokens; variable or callable names such as `x` or
    /// `factorielle`. Accented letters are allowed.
    #[regex(r"[A-Za-zÀ-ÖØ-öø-ÿ_][A-Za-zÀ-ÖØ-öø-ÿ0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// Statement separation is newline-significant, so line breaks are
    /// explicit tokens.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
    })]
    NewLine,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset of its first
/// character, so every token can report `(line, column)` coordinates.
#[derive(Debug, Clone)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset where the current line starts.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1, line_start: 0 }
    }
}

/// Source coordinates of a token, used only for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number.
    pub line:   usize,
    /// 1-based column number.
    pub column: usize,
}

/// Parses a floating-point literal from the current token slice.
fn parse_real(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Processes the escape sequences of a string literal.
///
/// `\n` becomes a newline and `\"` a double quote; any other backslash
/// sequence keeps the backslash. Raw newlines are legal inside a literal
/// and are counted so later tokens report correct lines.
fn unescape_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('"') => result.push('"'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                },
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    for (index, byte) in slice.bytes().enumerate() {
        if byte == b'\n' {
            lex.extras.line += 1;
            lex.extras.line_start = lex.span().start + index + 1;
        }
    }

    result
}

/// Processes a character literal, resolving its escape sequence if any.
fn unescape_char(lex: &logos::Lexer<Token>) -> Option<char> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut chars = inner.chars();
    match chars.next()? {
        '\\' => match chars.next()? {
            'n' => Some('\n'),
            '"' => Some('"'),
            other => Some(other),
        },
        c => Some(c),
    }
}

/// An opaque cursor into the token stream.
///
/// Returned by [`Lexer::checkpoint`] and consumed by [`Lexer::restore`];
/// restoring rewinds the scanner to the saved offset and line accounting.
#[derive(Clone)]
pub struct Checkpoint<'src> {
    inner: logos::Lexer<'src, Token>,
}

/// Scans source text into a lazy sequence of tokens.
///
/// Wraps the `logos` lexer to pair every token with its source coordinates
/// and to expose the checkpoint/restore operation the parser relies on for
/// its speculative declaration-block pass. Tokens are produced one at a
/// time and never retained.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, Token>,
}

impl<'src> Lexer<'src> {
    /// Creates a scanner over the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { inner: Token::lexer_with_extras(source, LexerExtras::default()) }
    }

    /// The line the scanner is currently on, for end-of-input reporting.
    #[must_use]
    pub const fn current_line(&self) -> usize {
        self.inner.extras.line
    }

    /// Coordinates of the token that was just scanned.
    fn position(&self) -> Position {
        let span_start = self.inner.span().start;
        let extras = &self.inner.extras;

        Position { line:   extras.line,
                   column: span_start.saturating_sub(extras.line_start) + 1, }
    }

    /// Returns the next token with its coordinates, or `None` at the end of
    /// input.
    ///
    /// # Errors
    /// Returns a [`LexicalError`] when the scanner hits a character sequence
    /// that belongs to no token.
    pub fn next_token(&mut self) -> Result<Option<(Token, Position)>, LexicalError> {
        let Some(result) = self.inner.next() else {
            return Ok(None);
        };

        match result {
            Ok(token) => Ok(Some((token, self.position()))),
            Err(()) => {
                let position = self.position();
                Err(LexicalError::InvalidCharacter { slice:  self.inner.slice().to_string(),
                                                     line:   position.line,
                                                     column: position.column, })
            },
        }
    }

    /// Saves the current scan position as an opaque cursor.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint<'src> {
        Checkpoint { inner: self.inner.clone() }
    }

    /// Rewinds the scanner to a previously saved cursor.
    pub fn restore(&mut self, checkpoint: Checkpoint<'src>) {
        self.inner = checkpoint.inner;
    }
}

#[cfg(test)]
mod tests {
    use super::{Lexer, Token};

    fn collect(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        while let Some((token, _)) = lexer.next_token().expect("lexes") {
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(collect("programme essai"),
                   vec![Token::Program, Token::Identifier("essai".into())]);
        assert_eq!(collect("entier réel chaîne caractère car booléen"),
                   vec![Token::TypeInteger,
                        Token::TypeReal,
                        Token::TypeString,
                        Token::TypeChar,
                        Token::TypeChar,
                        Token::TypeBoolean]);
    }

    #[test]
    fn two_word_while_keyword() {
        assert_eq!(collect("tant que"), vec![Token::While]);
        assert_eq!(collect("tant   \tque"), vec![Token::While]);
        // On its own, `tant` stays an identifier.
        assert_eq!(collect("tant x"),
                   vec![Token::Identifier("tant".into()), Token::Identifier("x".into())]);
        // A newline between the words does not fuse them.
        assert_eq!(collect("tant\nque"),
                   vec![Token::Identifier("tant".into()),
                        Token::NewLine,
                        Token::Identifier("que".into())]);
    }

    #[test]
    fn numbers() {
        assert_eq!(collect("42"), vec![Token::IntegerConst(42)]);
        assert_eq!(collect("4.5"), vec![Token::RealConst(4.5)]);
        assert_eq!(collect("2."), vec![Token::RealConst(2.0)]);
    }

    #[test]
    fn string_escapes() {
        assert_eq!(collect(r#""a\nb""#), vec![Token::StringConst("a\nb".into())]);
        assert_eq!(collect(r#""dit \"oui\"""#), vec![Token::StringConst("dit \"oui\"".into())]);
        // Unknown escapes keep their backslash.
        assert_eq!(collect(r#""a\qb""#), vec![Token::StringConst("a\\qb".into())]);
    }

    #[test]
    fn character_literals() {
        assert_eq!(collect("'a'"), vec![Token::CharConst('a')]);
        assert_eq!(collect(r"'\n'"), vec![Token::CharConst('\n')]);
    }

    #[test]
    fn comments_are_skipped_but_newlines_kept() {
        assert_eq!(collect("x # un commentaire\ny"),
                   vec![Token::Identifier("x".into()),
                        Token::NewLine,
                        Token::Identifier("y".into())]);
    }

    #[test]
    fn assignment_and_comparisons() {
        assert_eq!(collect("x <- 1 <= 2"),
                   vec![Token::Identifier("x".into()),
                        Token::Assign,
                        Token::IntegerConst(1),
                        Token::LessEqual,
                        Token::IntegerConst(2)]);
    }

    #[test]
    fn invalid_character_reports_position() {
        let mut lexer = Lexer::new("x\n  @");
        lexer.next_token().expect("x");
        lexer.next_token().expect("newline");
        let error = lexer.next_token().expect_err("@ is invalid");
        let message = error.to_string();
        assert!(message.contains("line 2"), "{message}");
    }

    #[test]
    fn checkpoint_rewinds_the_stream() {
        let mut lexer = Lexer::new("a b c");
        assert_eq!(lexer.next_token().unwrap().unwrap().0, Token::Identifier("a".into()));

        let checkpoint = lexer.checkpoint();
        assert_eq!(lexer.next_token().unwrap().unwrap().0, Token::Identifier("b".into()));
        assert_eq!(lexer.next_token().unwrap().unwrap().0, Token::Identifier("c".into()));

        lexer.restore(checkpoint);
        assert_eq!(lexer.next_token().unwrap().unwrap().0, Token::Identifier("b".into()));
    }
}
