//! Variable scoping for the evaluator.
//!
//! A plain scope stack: blocks push a scope, declarations land in the
//! innermost one, reads and assignments resolve to the nearest declaration.

use rustc_hash::FxHashMap;

use case_ir::Name;

use crate::value::Value;

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    Mutable,
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Why an assignment failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    Immutable,
    Undefined,
}

#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

/// Scope stack. The bottom scope is the global one and is never popped.
#[derive(Clone, Debug)]
pub struct Environment {
    scopes: Vec<FxHashMap<Name, Binding>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![FxHashMap::default()],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Declare `name` in the innermost scope, replacing an earlier
    /// declaration of the same scope.
    pub fn define(&mut self, name: Name, value: Value, mutability: Mutability) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, Binding { value, mutability });
        }
    }

    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&name))
            .map(|binding| binding.value.clone())
    }

    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        let binding = self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(&name))
            .ok_or(AssignError::Undefined)?;
        if !binding.mutability.is_mutable() {
            return Err(AssignError::Immutable);
        }
        binding.value = value;
        Ok(())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
