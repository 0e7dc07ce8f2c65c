use std::collections::HashMap;

use crate::interpreter::value::Value;

/// What pushed an activation record onto the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// The main program frame, pushed once at program entry.
    Program,
    /// A procedure or function invocation frame.
    Call,
}

/// An explicit handle to a variable slot in another activation record.
///
/// Reference-mode arguments install one of these on the callee's record;
/// reads and writes of the argument name are forwarded to the owning
/// frame's variable instead of a local slot. Storing the frame index and
/// name keeps the indirection a plain value, with no captured state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Index of the owning record on the call stack.
    pub frame: usize,
    /// Name of the variable inside the owning record.
    pub name:  String,
}

/// The runtime binding environment of one program or call invocation.
///
/// Holds the current value of every assigned variable, plus the reference
/// table that overrides direct bindings for reference-mode arguments.
/// Declared-but-unassigned variables simply have no slot yet.
#[derive(Debug)]
pub struct ActivationRecord {
    /// The program or callable name this record belongs to.
    pub name:   String,
    /// Program frame or call frame.
    pub kind:   RecordKind,
    members:    HashMap<String, Value>,
    references: HashMap<String, Reference>,
}

impl ActivationRecord {
    /// An empty record for the named program or callable.
    #[must_use]
    pub fn new(name: String, kind: RecordKind) -> Self {
        Self { name,
               kind,
               members: HashMap::new(),
               references: HashMap::new() }
    }

    /// Binds a value directly into this record.
    pub fn insert(&mut self, name: String, value: Value) {
        self.members.insert(name, value);
    }

    /// Installs a reference handle so reads and writes of `name` reach a
    /// caller's variable.
    pub fn define_reference(&mut self, name: String, reference: Reference) {
        self.references.insert(name, reference);
    }
}

/// The ordered stack of activation records.
///
/// Only the top record is ever read or written by in-flight statement
/// execution; the deeper frames are reachable only through installed
/// reference handles.
#[derive(Debug, Default)]
pub struct CallStack {
    records: Vec<ActivationRecord>,
}

impl CallStack {
    /// An empty call stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a record; it becomes the active scope.
    pub fn push(&mut self, record: ActivationRecord) {
        self.records.push(record);
    }

    /// Pops the active record, discarding its bindings and references.
    pub fn pop(&mut self) {
        self.records.pop();
    }

    /// Index of the active record, used when installing references.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.records.len().saturating_sub(1)
    }

    /// The active record's kind, if any record is on the stack.
    #[must_use]
    pub fn current_kind(&self) -> Option<RecordKind> {
        self.records.last().map(|record| record.kind)
    }

    /// Reads a variable from the active record, following reference
    /// handles to the owning frame.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        if self.records.is_empty() {
            return None;
        }
        self.get_at(self.current_index(), name)
    }

    fn get_at(&self, frame: usize, name: &str) -> Option<&Value> {
        match self.records.get(frame)?.references.get(name) {
            Some(reference) => self.get_at(reference.frame, &reference.name),
            None => self.records.get(frame)?.members.get(name),
        }
    }

    /// Writes a variable into the active record, following reference
    /// handles to the owning frame.
    pub fn set(&mut self, name: &str, value: Value) {
        if self.records.is_empty() {
            return;
        }
        self.set_at(self.current_index(), name, value);
    }

    fn set_at(&mut self, frame: usize, name: &str, value: Value) {
        let Some(record) = self.records.get(frame) else {
            return;
        };

        if let Some(reference) = record.references.get(name) {
            let (target_frame, target_name) = (reference.frame, reference.name.clone());
            self.set_at(target_frame, &target_name, value);
        } else if let Some(record) = self.records.get_mut(frame) {
            record.members.insert(name.to_string(), value);
        }
    }

    /// Resolves where a variable of the given frame actually lives,
    /// following any chain of reference handles.
    ///
    /// Used when installing a reference-mode binding: the new handle points
    /// straight at the owning frame, so chains of reference arguments stay
    /// one hop deep.
    #[must_use]
    pub fn resolve_reference(&self, frame: usize, name: &str) -> Reference {
        match self.records.get(frame).and_then(|record| record.references.get(name)) {
            Some(reference) => self.resolve_reference(reference.frame, &reference.name),
            None => Reference { frame,
                                name: name.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivationRecord, CallStack, RecordKind, Reference};
    use crate::interpreter::value::Value;

    #[test]
    fn direct_bindings_live_in_the_top_record() {
        let mut stack = CallStack::new();
        stack.push(ActivationRecord::new("principal".into(), RecordKind::Program));

        stack.set("x", Value::Integer(3));
        assert_eq!(stack.get("x"), Some(&Value::Integer(3)));
        assert_eq!(stack.get("y"), None);
    }

    #[test]
    fn reference_handles_forward_to_the_owning_frame() {
        let mut stack = CallStack::new();
        stack.push(ActivationRecord::new("principal".into(), RecordKind::Program));
        stack.set("x", Value::Integer(1));

        let mut callee = ActivationRecord::new("incremente".into(), RecordKind::Call);
        callee.define_reference("n".into(), Reference { frame: 0, name: "x".into() });
        stack.push(callee);

        assert_eq!(stack.get("n"), Some(&Value::Integer(1)));
        stack.set("n", Value::Integer(2));
        stack.pop();

        assert_eq!(stack.get("x"), Some(&Value::Integer(2)));
    }

    #[test]
    fn chained_references_resolve_to_the_owner() {
        let mut stack = CallStack::new();
        stack.push(ActivationRecord::new("principal".into(), RecordKind::Program));
        stack.set("x", Value::Integer(5));

        let mut first = ActivationRecord::new("a".into(), RecordKind::Call);
        first.define_reference("p".into(), Reference { frame: 0, name: "x".into() });
        stack.push(first);

        // Installing a reference to `p` should land on frame 0 directly.
        let resolved = stack.resolve_reference(1, "p");
        assert_eq!(resolved, Reference { frame: 0, name: "x".into() });

        let mut second = ActivationRecord::new("b".into(), RecordKind::Call);
        second.define_reference("q".into(), resolved);
        stack.push(second);

        stack.set("q", Value::Integer(9));
        stack.pop();
        stack.pop();

        assert_eq!(stack.get("x"), Some(&Value::Integer(9)));
    }

    #[test]
    fn records_are_discarded_on_pop() {
        let mut stack = CallStack::new();
        stack.push(ActivationRecord::new("principal".into(), RecordKind::Program));
        stack.push(ActivationRecord::new("appel".into(), RecordKind::Call));
        assert_eq!(stack.current_kind(), Some(RecordKind::Call));

        stack.set("local", Value::Integer(1));
        stack.pop();

        assert_eq!(stack.current_kind(), Some(RecordKind::Program));
        assert_eq!(stack.get("local"), None);
    }
}
