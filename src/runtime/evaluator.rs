use std::sync::Arc;

use crate::builtins::BuiltinRegistry;
use crate::config::EvalConfig;
use crate::error::{ArityError, EvalError, ParseError, Result, TypeError};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::runtime::frame::{CallFrame, FrameKind, SpecialForm};
use crate::runtime::{ScopeChain, Value};

/// Single-pass evaluator
///
/// Scans tokens left to right and evaluates as it goes, with no syntax tree
/// in between:
/// - `(name` opens a [`CallFrame`] remembering the active scope
/// - literals, arrays and name references are pushed onto the innermost frame
/// - `)` closes the frame, restores its scope and pushes the result outward
///
/// `(def name value body)` binds `name` as soon as `value` is collected, so
/// `body` is scanned under the new binding; the binding disappears when the
/// frame closes.
///
/// An `Evaluator` holds only immutable state. Every call to
/// [`evaluate`](Evaluator::evaluate) builds its own stacks and scope chain,
/// so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Evaluator {
    /// Token rules
    lexer: Lexer,
    /// Builtin table shared read-only
    registry: Arc<BuiltinRegistry>,
    /// Limits
    config: EvalConfig,
}

impl Evaluator {
    /// Creates an evaluator with the standard builtins
    pub fn new() -> Result<Self> {
        Self::with_registry(Arc::new(BuiltinRegistry::standard()?))
    }

    /// Creates an evaluator over a shared builtin registry
    pub fn with_registry(registry: Arc<BuiltinRegistry>) -> Result<Self> {
        Ok(Evaluator {
            lexer: Lexer::new()?,
            registry,
            config: EvalConfig::default(),
        })
    }

    /// Replaces the configuration (builder style)
    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// The builtin registry in use
    pub fn registry(&self) -> &Arc<BuiltinRegistry> {
        &self.registry
    }

    /// The active configuration
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Tokenizes and evaluates one expression
    pub fn evaluate(&self, source: &str) -> Result<Value> {
        let tokens = self.lexer.tokenize(source)?;
        tracing::debug!(
            source_len = source.len(),
            tokens = tokens.len(),
            "evaluating"
        );
        self.evaluate_tokens(&tokens)
    }

    /// Evaluates an already tokenized expression
    ///
    /// Whitespace tokens are skipped, so the lexer's output can be passed
    /// as is.
    pub fn evaluate_tokens(&self, tokens: &[Token]) -> Result<Value> {
        let mut machine = Machine::new(&self.registry, &self.config);
        let mut stream = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Whitespace);

        while let Some(token) = stream.next() {
            machine.step(token, &mut stream)?;
        }

        let value = machine.finish()?;
        tracing::debug!(result = %value, "evaluated");
        Ok(value)
    }
}

/// Per-evaluation state
struct Machine<'r> {
    registry: &'r BuiltinRegistry,
    config: &'r EvalConfig,
    /// Completed top-level values
    values: Vec<Value>,
    /// Open frames, innermost last
    frames: Vec<CallFrame<'r>>,
    /// Active scope chain head
    scope: ScopeChain,
    /// Offset of a `(` still waiting for its callee name
    pending_open: Option<usize>,
}

impl<'r> Machine<'r> {
    fn new(registry: &'r BuiltinRegistry, config: &'r EvalConfig) -> Self {
        Machine {
            registry,
            config,
            values: Vec::new(),
            frames: Vec::new(),
            scope: ScopeChain::new(),
            pending_open: None,
        }
    }

    /// Number of open parentheses
    fn depth(&self) -> usize {
        self.frames.len() + usize::from(self.pending_open.is_some())
    }

    fn step<'t>(
        &mut self,
        token: &'t Token,
        rest: &mut impl Iterator<Item = &'t Token>,
    ) -> Result<()> {
        if self.pending_open.take().is_some() {
            return self.open_frame(token);
        }

        if token.kind != TokenKind::CloseParen
            && self.frames.last().is_some_and(CallFrame::expects_binder)
        {
            return self.bind_name(token);
        }

        match token.kind {
            TokenKind::OpenParen => {
                check_depth(self.depth(), self.config.max_depth)?;
                self.pending_open = Some(token.offset);
                Ok(())
            }
            TokenKind::CloseParen => self.close_frame(),
            TokenKind::OpenBracket => {
                let array = read_array(rest, self.depth(), self.config.max_depth)?;
                self.collect(array)
            }
            TokenKind::CloseBracket => Err(ParseError::UnmatchedCloseBracket {
                offset: token.offset,
            }
            .into()),
            TokenKind::Identifier => {
                let value = self
                    .scope
                    .lookup(&token.text)
                    .cloned()
                    .ok_or_else(|| EvalError::UnboundName(token.text.clone()))?;
                self.collect(value)
            }
            TokenKind::Whitespace => Ok(()),
            TokenKind::String | TokenKind::Int | TokenKind::Float | TokenKind::Bool => {
                match token.literal_value() {
                    Some(value) => self.collect(value?),
                    None => Ok(()),
                }
            }
        }
    }

    /// Handles the token right after `(`
    fn open_frame(&mut self, token: &Token) -> Result<()> {
        if token.kind != TokenKind::Identifier {
            return Err(ParseError::MissingCallee {
                offset: token.offset,
            }
            .into());
        }

        let kind = match SpecialForm::from_name(&token.text) {
            Some(form) => FrameKind::Special(form),
            None => match self.registry.lookup(&token.text) {
                Some(spec) => FrameKind::Call(spec),
                None => return Err(EvalError::UnknownFunction(token.text.clone()).into()),
            },
        };

        tracing::trace!(depth = self.frames.len() + 1, callee = kind.name(), "open frame");
        self.frames.push(CallFrame::new(kind, self.scope.clone()));
        Ok(())
    }

    /// Captures the name a binding form introduces
    fn bind_name(&mut self, token: &Token) -> Result<()> {
        if token.kind != TokenKind::Identifier {
            return Err(ParseError::InvalidBindingName {
                offset: token.offset,
            }
            .into());
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.binder = Some(token.text.clone());
        }
        Ok(())
    }

    /// Pushes a finished value into the innermost frame, or the top level
    fn collect(&mut self, value: Value) -> Result<()> {
        let Some(frame) = self.frames.last_mut() else {
            self.values.push(value);
            return Ok(());
        };

        frame.args.push(value);
        if frame.shifts_scope_now() {
            if let (Some(name), Some(bound)) = (frame.binder.as_deref(), frame.args.last()) {
                self.scope = self.scope.push(name, bound.clone());
                tracing::trace!(binding = name, "bind");
            }
        }
        Ok(())
    }

    /// Handles `)`
    fn close_frame(&mut self) -> Result<()> {
        let Some(frame) = self.frames.pop() else {
            return Err(ParseError::ParenMismatch { depth: -1 }.into());
        };

        tracing::trace!(
            depth = self.frames.len() + 1,
            callee = frame.kind.name(),
            args = frame.collected(),
            "close frame"
        );

        let collected = frame.collected();
        self.scope = frame.saved_scope;

        let result = match frame.kind {
            FrameKind::Call(spec) => spec.call(&frame.args)?,
            FrameKind::Special(form) => {
                check_arity(form.name(), form.arity(), collected)?;
                apply_special(form, frame.args)?
            }
        };

        self.collect(result)
    }

    /// Checks the end-of-input invariants and yields the single result
    fn finish(mut self) -> Result<Value> {
        let depth = self.depth();
        if depth != 0 {
            return Err(ParseError::ParenMismatch {
                depth: isize::try_from(depth).unwrap_or(isize::MAX),
            }
            .into());
        }

        match self.values.len() {
            0 => Err(ParseError::EmptyExpression.into()),
            1 => Ok(self.values.remove(0)),
            n => Err(ParseError::MultipleExpressions(n).into()),
        }
    }
}

/// Fails if opening one more paren or bracket would pass the limit
fn check_depth(open: usize, limit: usize) -> Result<()> {
    if open >= limit {
        return Err(EvalError::DepthLimitExceeded { limit }.into());
    }
    Ok(())
}

fn check_arity(name: &str, expected: usize, got: usize) -> Result<()> {
    if got < expected {
        return Err(ArityError::TooFewArguments(name.to_string(), expected, got).into());
    }
    if got > expected {
        return Err(ArityError::TooManyArguments(name.to_string(), expected, got).into());
    }
    Ok(())
}

/// Produces a special form's result from its collected arguments
///
/// Both branches of `if` have already been evaluated by the scan; only the
/// result is selected here.
fn apply_special(form: SpecialForm, args: Vec<Value>) -> Result<Value> {
    let mut args = args.into_iter();
    match form {
        SpecialForm::If => {
            let (Some(cond), Some(then), Some(otherwise)) = (args.next(), args.next(), args.next())
            else {
                return Err(ArityError::TooFewArguments("if".to_string(), 3, 0).into());
            };
            match cond.as_bool() {
                Some(true) => Ok(then),
                Some(false) => Ok(otherwise),
                None => Err(TypeError::NonBooleanCondition { got: cond.kind() }.into()),
            }
        }
        // Binding name is held by the frame; args are [value, body]
        SpecialForm::Def => args
            .nth(1)
            .ok_or_else(|| ArityError::TooFewArguments("def".to_string(), 3, 0).into()),
    }
}

/// Reads an array literal whose `[` was just consumed
///
/// Only literal tokens and nested brackets are legal inside. `open` is the
/// number of parentheses enclosing the array; brackets count toward the
/// same depth limit.
fn read_array<'t>(
    tokens: &mut impl Iterator<Item = &'t Token>,
    open: usize,
    limit: usize,
) -> Result<Value> {
    check_depth(open, limit)?;
    let mut stack: Vec<Vec<Value>> = vec![Vec::new()];

    for token in tokens {
        match token.kind {
            TokenKind::OpenBracket => {
                check_depth(open + stack.len(), limit)?;
                stack.push(Vec::new());
            }
            TokenKind::CloseBracket => {
                let done = Value::Array(stack.pop().unwrap_or_default());
                match stack.last_mut() {
                    Some(parent) => parent.push(done),
                    None => return Ok(done),
                }
            }
            TokenKind::OpenParen => return Err(ParseError::NestedCallInArray.into()),
            TokenKind::CloseParen => return Err(ParseError::UnclosedBracket.into()),
            TokenKind::Identifier => {
                return Err(ParseError::NonLiteralInArray {
                    offset: token.offset,
                }
                .into())
            }
            TokenKind::Whitespace => {}
            TokenKind::String | TokenKind::Int | TokenKind::Float | TokenKind::Bool => {
                if let (Some(items), Some(value)) = (stack.last_mut(), token.literal_value()) {
                    items.push(value?);
                }
            }
        }
    }

    Err(ParseError::UnclosedBracket.into())
}
