use std::io::{self, BufRead, Write};

use crate::{ast::Expr, interpreter::value::Value};

/// The `afficher` output intrinsic.
pub mod afficher;
/// The `saisir` input intrinsic.
pub mod saisir;

/// Name of the output intrinsic.
pub const OUTPUT: &str = "afficher";
/// Name of the input intrinsic.
pub const INPUT: &str = "saisir";

/// The two intrinsic procedures, callable without parentheses.
pub const BUILTIN_PROCEDURES: &[&str] = &[OUTPUT, INPUT];

/// Whether a name designates one of the two intrinsic procedures.
///
/// Intrinsics are dispatched by name and never enter normal callable
/// resolution.
#[must_use]
pub fn is_builtin_procedure(name: &str) -> bool {
    BUILTIN_PROCEDURES.contains(&name)
}

/// One evaluated intrinsic argument: the expression node together with its
/// value.
///
/// `afficher` needs the node to know the *static* type of the argument,
/// which decides the `.0` rendering of real-typed values.
pub struct EvaluatedArgument<'a> {
    /// The argument expression as written.
    pub node:  &'a Expr,
    /// Its evaluated value.
    pub value: Value,
}

/// The console the intrinsics talk to.
///
/// This is the only side-effect boundary of the whole pipeline. The
/// process console lives in [`StdConsole`]; tests inject an
/// implementation with captured output and scripted input.
pub trait Console {
    /// Writes text as-is, with no added line break.
    fn write(&mut self, text: &str);

    /// Blocks until one line of input is available and returns it without
    /// its trailing line break.
    ///
    /// # Errors
    /// Returns an error when the input source is exhausted or unreadable.
    fn read_line(&mut self) -> io::Result<String>;
}

/// The process console: standard output plus a standard-input handle
/// acquired on first read.
///
/// The handle is owned by this value, so it is released when the console
/// goes out of scope on every exit path of a run.
#[derive(Default)]
pub struct StdConsole {
    stdin: Option<io::Stdin>,
}

impl StdConsole {
    /// A console with no input handle open yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Console for StdConsole {
    fn write(&mut self, text: &str) {
        // `afficher` emits no line break, so the buffer must be flushed
        // for output to appear before a blocking `saisir`.
        print!("{text}");
        let _ = io::stdout().flush();
    }

    fn read_line(&mut self) -> io::Result<String> {
        let stdin = self.stdin.get_or_insert_with(io::stdin);

        let mut line = String::new();
        let read = stdin.lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        Ok(line)
    }
}
