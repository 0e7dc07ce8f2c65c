use std::{cell::OnceCell, rc::Rc};

use crate::ast::{Compound, PassingMode};

/// One of the five builtin value types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinType {
    /// `entier`
    Integer,
    /// `réel`
    Real,
    /// `chaîne`
    Text,
    /// `caractère` (alias `car`)
    Char,
    /// `booléen`
    Boolean,
}

impl BuiltinType {
    /// Resolves a French type spelling to its builtin type.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "entier" => Some(Self::Integer),
            "réel" => Some(Self::Real),
            "chaîne" => Some(Self::Text),
            "caractère" | "car" => Some(Self::Char),
            "booléen" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// The canonical French spelling of the type.
    #[must_use]
    pub const fn french_name(&self) -> &'static str {
        match self {
            Self::Integer => "entier",
            Self::Real => "réel",
            Self::Text => "chaîne",
            Self::Char => "caractère",
            Self::Boolean => "booléen",
        }
    }
}

impl std::fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.french_name())
    }
}

/// A declared variable, bound to its builtin type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSymbol {
    /// The declared name.
    pub name: String,
    /// The declared type.
    pub ty:   BuiltinType,
}

/// A formal argument of a callable: a variable plus its passing mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSymbol {
    /// The underlying variable symbol.
    pub variable: VariableSymbol,
    /// Copy or reference.
    pub mode:     PassingMode,
}

/// Whether a callable is a `procédure` or a `fonction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableKind {
    /// Declared with `procédure`; has no return value.
    Procedure,
    /// Declared with `fonction`; must produce a value with `retourne`.
    Function,
}

/// A procedure or function registered in the global table.
///
/// The body is attached once, after the body itself has been analyzed, so
/// recursive self-calls can resolve the symbol while it is still
/// body-less. Call nodes share this symbol through `Rc`.
pub struct CallableSymbol {
    /// The declared name.
    pub name: String,
    /// Procedure or function.
    pub kind: CallableKind,
    /// The formal arguments, in declaration order.
    pub args: Vec<ArgumentSymbol>,
    body:     OnceCell<Rc<Compound>>,
}

impl CallableSymbol {
    /// A symbol with no body attached yet.
    #[must_use]
    pub fn new(name: String, kind: CallableKind, args: Vec<ArgumentSymbol>) -> Self {
        Self { name, kind, args, body: OnceCell::new() }
    }

    /// Attaches the analyzed body. Only the first attachment is kept.
    pub fn attach_body(&self, body: Rc<Compound>) {
        let _ = self.body.set(body);
    }

    /// The analyzed body, if it has been attached.
    #[must_use]
    pub fn body(&self) -> Option<&Rc<Compound>> {
        self.body.get()
    }
}

// The body can contain call nodes pointing back at this symbol, so the
// derived `Debug` would recurse forever on recursive callables.
impl std::fmt::Debug for CallableSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallableSymbol")
         .field("name", &self.name)
         .field("kind", &self.kind)
         .field("args", &self.args)
         .field("body_attached", &self.body.get().is_some())
         .finish()
    }
}
