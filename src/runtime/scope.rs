use std::collections::HashMap;
use std::rc::Rc;

use crate::runtime::Value;

/// Single binding frame in a scope chain
#[derive(Debug)]
struct ScopeNode {
    /// Names bound by this frame
    bindings: HashMap<String, Value>,
    /// Enclosing frame (None for the outermost)
    parent: Option<Rc<ScopeNode>>,
}

impl Drop for ScopeNode {
    // Unlink parents iteratively
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            match Rc::try_unwrap(node) {
                Ok(mut node) => parent = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Linked chain of immutable binding frames
///
/// Cloning a chain is cheap: it shares every node. Pushing never mutates an
/// existing node, so a cloned head stays valid as a snapshot after the
/// chain it came from grows or shrinks.
#[derive(Debug, Clone, Default)]
pub struct ScopeChain {
    head: Option<Rc<ScopeNode>>,
}

impl ScopeChain {
    /// Creates a chain with no bindings
    pub fn new() -> Self {
        ScopeChain { head: None }
    }

    /// Looks a name up, innermost frame first
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let mut node = self.head.as_deref();
        while let Some(scope) = node {
            if let Some(value) = scope.bindings.get(name) {
                return Some(value);
            }
            node = scope.parent.as_deref();
        }
        None
    }

    /// Returns a new chain with a child frame binding `name` to `value`
    pub fn push(&self, name: impl Into<String>, value: Value) -> ScopeChain {
        let mut bindings = HashMap::with_capacity(1);
        bindings.insert(name.into(), value);
        ScopeChain {
            head: Some(Rc::new(ScopeNode {
                bindings,
                parent: self.head.clone(),
            })),
        }
    }

    /// Returns the enclosing chain (empty stays empty)
    pub fn pop(&self) -> ScopeChain {
        ScopeChain {
            head: self.head.as_ref().and_then(|node| node.parent.clone()),
        }
    }

    /// Number of frames in the chain
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.head.as_deref();
        while let Some(scope) = node {
            depth += 1;
            node = scope.parent.as_deref();
        }
        depth
    }

    /// Checks if the chain has no frames
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}
