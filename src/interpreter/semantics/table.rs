use std::{collections::HashMap, rc::Rc};

use crate::interpreter::semantics::symbol::{BuiltinType, CallableSymbol, VariableSymbol};

/// The flat symbol table of one program, procedure or function body.
///
/// The language has no nested block scoping: every variable declared in a
/// body lives in this single mapping, and lookups never reach an enclosing
/// body.
#[derive(Debug)]
pub struct ScopedSymbolTable {
    /// The name of the body this scope belongs to.
    pub scope_name: String,
    symbols:        HashMap<String, VariableSymbol>,
}

impl ScopedSymbolTable {
    /// An empty scope for the named body.
    #[must_use]
    pub fn new(scope_name: String) -> Self {
        Self { scope_name, symbols: HashMap::new() }
    }

    /// Registers a variable symbol, replacing any previous one.
    pub fn define(&mut self, symbol: VariableSymbol) {
        self.symbols.insert(symbol.name.clone(), symbol);
    }

    /// Looks a name up in this scope only.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&VariableSymbol> {
        self.symbols.get(name)
    }
}

/// The persistent global table.
///
/// Holds every procedure and function symbol of the file, plus the builtin
/// type names, and stays queryable from anywhere for the whole run.
#[derive(Debug, Default)]
pub struct GlobalTable {
    callables: HashMap<String, Rc<CallableSymbol>>,
}

impl GlobalTable {
    /// An empty global table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a type name against the builtin type table.
    #[must_use]
    pub fn resolve_type(&self, name: &str) -> Option<BuiltinType> {
        BuiltinType::parse(name)
    }

    /// Registers a callable symbol, returning the previous holder of the
    /// name if there was one.
    pub fn define_callable(&mut self, symbol: Rc<CallableSymbol>) -> Option<Rc<CallableSymbol>> {
        self.callables.insert(symbol.name.clone(), symbol)
    }

    /// Looks up a procedure or function by name.
    #[must_use]
    pub fn lookup_callable(&self, name: &str) -> Option<&Rc<CallableSymbol>> {
        self.callables.get(name)
    }
}
