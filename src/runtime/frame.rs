use crate::builtins::BuiltinSpec;
use crate::runtime::{ScopeChain, Value};

/// Call-like forms whose arguments are not all evaluated in the caller's scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    /// `(if cond then else)`
    If,
    /// `(def name value body)`
    Def,
}

impl SpecialForm {
    /// Recognizes a special form by the name after `(`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "if" => Some(SpecialForm::If),
            "def" => Some(SpecialForm::Def),
            _ => None,
        }
    }

    /// Name as written in source
    pub fn name(&self) -> &'static str {
        match self {
            SpecialForm::If => "if",
            SpecialForm::Def => "def",
        }
    }

    /// Fixed argument count, including a binding name
    pub fn arity(&self) -> usize {
        3
    }

    /// Whether the first argument is a name to bind rather than an expression
    pub fn takes_binder(&self) -> bool {
        matches!(self, SpecialForm::Def)
    }

    /// Argument count after which the remaining arguments see a new scope
    pub fn scope_shift_after(&self) -> Option<usize> {
        match self {
            SpecialForm::If => None,
            SpecialForm::Def => Some(2),
        }
    }
}

/// What an open frame will do when its `)` arrives
#[derive(Debug, Clone, Copy)]
pub enum FrameKind<'r> {
    /// Builtin call, resolved when the frame opened
    Call(&'r BuiltinSpec),
    /// Special form
    Special(SpecialForm),
}

impl FrameKind<'_> {
    /// Name of the callee
    pub fn name(&self) -> &str {
        match self {
            FrameKind::Call(spec) => &spec.name,
            FrameKind::Special(form) => form.name(),
        }
    }
}

/// Bookkeeping for one open parenthesis
#[derive(Debug)]
pub struct CallFrame<'r> {
    /// Callee
    pub kind: FrameKind<'r>,
    /// Evaluated arguments, in arrival order
    pub args: Vec<Value>,
    /// Name captured by a binding form
    pub binder: Option<String>,
    /// Scope that was active when the frame opened, restored on close
    pub saved_scope: ScopeChain,
    /// Argument count that triggers this frame's scope shift
    pub args_before_scope_shift: Option<usize>,
}

impl<'r> CallFrame<'r> {
    /// Opens a frame for `kind` under `scope`
    pub fn new(kind: FrameKind<'r>, scope: ScopeChain) -> Self {
        let args_before_scope_shift = match kind {
            FrameKind::Special(form) => form.scope_shift_after(),
            FrameKind::Call(_) => None,
        };
        CallFrame {
            kind,
            args: Vec::new(),
            binder: None,
            saved_scope: scope,
            args_before_scope_shift,
        }
    }

    /// Arguments collected so far, a captured binding name included
    pub fn collected(&self) -> usize {
        self.args.len() + usize::from(self.binder.is_some())
    }

    /// Whether the next token must be a name to bind
    pub fn expects_binder(&self) -> bool {
        matches!(self.kind, FrameKind::Special(form) if form.takes_binder())
            && self.binder.is_none()
            && self.args.is_empty()
    }

    /// Whether the argument just collected is the one that shifts scope
    pub fn shifts_scope_now(&self) -> bool {
        self.args_before_scope_shift == Some(self.collected())
    }
}
