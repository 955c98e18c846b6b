//! Builtin registry for fuselisp
//!
//! Each builtin name maps to a [`BuiltinSpec`] holding one or more
//! overloads. Overloads are kept side by side and resolved by an exact
//! match on argument kinds, in declaration order.

pub mod stdlib;

use std::collections::HashMap;
use std::fmt;

use crate::error::{ArityError, RegistryError, Result, TypeError};
use crate::runtime::{Value, ValueKind};

/// Implementation of one overload
///
/// Called only with arguments whose kinds match the overload's parameters.
pub type BuiltinFn = fn(&[Value]) -> Result<Value>;

/// A single type-checked signature of a builtin
#[derive(Clone)]
pub struct Overload {
    /// Parameter kinds, in order
    pub params: Vec<ValueKind>,
    /// Implementation
    pub func: BuiltinFn,
}

impl Overload {
    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Checks if the overload accepts exactly these argument kinds
    pub fn accepts(&self, kinds: &[ValueKind]) -> bool {
        self.params == kinds
    }
}

impl fmt::Debug for Overload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overload")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A named builtin with its overloads
#[derive(Debug, Clone)]
pub struct BuiltinSpec {
    /// Name used at call sites
    pub name: String,
    /// Overloads in declaration order
    pub overloads: Vec<Overload>,
}

impl BuiltinSpec {
    /// Creates a builtin with no overloads
    pub fn new(name: impl Into<String>) -> Self {
        BuiltinSpec {
            name: name.into(),
            overloads: Vec::new(),
        }
    }

    /// Adds an overload (builder style)
    pub fn overload(mut self, params: &[ValueKind], func: BuiltinFn) -> Self {
        self.overloads.push(Overload {
            params: params.to_vec(),
            func,
        });
        self
    }

    /// Smallest and largest arity across overloads
    pub fn arity_range(&self) -> Option<(usize, usize)> {
        let min = self.overloads.iter().map(Overload::arity).min()?;
        let max = self.overloads.iter().map(Overload::arity).max()?;
        Some((min, max))
    }

    /// Picks the first overload whose parameters match the argument kinds
    pub fn resolve(&self, args: &[Value]) -> Result<&Overload> {
        let kinds = Value::kinds(args);
        if let Some(overload) = self.overloads.iter().find(|o| o.accepts(&kinds)) {
            return Ok(overload);
        }

        let got = args.len();
        if !self.overloads.iter().any(|o| o.arity() == got) {
            if let Some((min, max)) = self.arity_range() {
                if got < min {
                    return Err(ArityError::TooFewArguments(self.name.clone(), min, got).into());
                }
                if got > max {
                    return Err(ArityError::TooManyArguments(self.name.clone(), max, got).into());
                }
            }
        }

        Err(TypeError::NoMatchingOverload {
            name: self.name.clone(),
            got: kinds,
        }
        .into())
    }

    /// Resolves an overload and runs it
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        let overload = self.resolve(args)?;
        (overload.func)(args)
    }
}

/// Immutable table of builtins, built once and shared read-only
#[derive(Debug, Clone)]
pub struct BuiltinRegistry {
    builtins: HashMap<String, BuiltinSpec>,
}

impl BuiltinRegistry {
    /// Create new registry with the standard builtins
    pub fn standard() -> Result<Self> {
        let mut registry = BuiltinRegistry::empty();
        stdlib::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Create empty registry
    pub fn empty() -> Self {
        BuiltinRegistry {
            builtins: HashMap::new(),
        }
    }

    /// Register a builtin
    ///
    /// Overloads for a name that is already present are appended after the
    /// existing ones. A second overload with parameter kinds that are already
    /// registered for the name is rejected instead of shadowing the first.
    pub fn register(&mut self, spec: BuiltinSpec) -> Result<()> {
        let entry = self
            .builtins
            .entry(spec.name.clone())
            .or_insert_with(|| BuiltinSpec::new(spec.name.clone()));

        for overload in spec.overloads {
            if entry.overloads.iter().any(|o| o.params == overload.params) {
                return Err(RegistryError::DuplicateOverload {
                    name: spec.name,
                    params: overload.params,
                }
                .into());
            }
            entry.overloads.push(overload);
        }
        Ok(())
    }

    /// Get builtin by name
    pub fn lookup(&self, name: &str) -> Option<&BuiltinSpec> {
        self.builtins.get(name)
    }

    /// Check if builtin exists
    pub fn contains(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    /// List all builtin names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.builtins.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get builtin count
    pub fn len(&self) -> usize {
        self.builtins.len()
    }

    /// Check if the registry holds no builtins
    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty()
    }
}
