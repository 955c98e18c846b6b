use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LexError, Result};
use crate::runtime::Value;

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub text: String,
    /// Byte offset where the token starts
    pub offset: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// Byte offset one past the end of the token
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    /// Converts a literal token into the value it denotes
    ///
    /// Returns `None` for delimiters, identifiers and whitespace.
    pub fn literal_value(&self) -> Option<Result<Value>> {
        let invalid = || LexError::InvalidNumber {
            offset: self.offset,
            text: self.text.clone(),
        };

        let value: Result<Value> = match self.kind {
            TokenKind::Int => self
                .text
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| invalid().into()),
            TokenKind::Float => match self.text.parse::<f64>() {
                Ok(x) if x.is_finite() => Ok(Value::Float(x)),
                _ => Err(invalid().into()),
            },
            TokenKind::Bool => Ok(Value::Bool(self.text == "true")),
            TokenKind::String => {
                let inner = self
                    .text
                    .strip_prefix('"')
                    .and_then(|t| t.strip_suffix('"'))
                    .unwrap_or(&self.text);
                Ok(Value::Str(inner.to_string()))
            }
            _ => return None,
        };

        Some(value)
    }
}

/// All possible token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Double-quoted string literal, no escapes
    String,
    /// Integer literal
    Int,
    /// Floating-point literal (`1.5`, `.5` or `1.`)
    Float,
    /// `true` or `false`
    Bool,
    /// Left parenthesis (
    OpenParen,
    /// Right parenthesis )
    CloseParen,
    /// Left bracket [
    OpenBracket,
    /// Right bracket ]
    CloseBracket,
    /// Alphabetic name
    Identifier,
    /// Run of whitespace
    Whitespace,
}

impl TokenKind {
    /// Check if token is a literal atom
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::Int | TokenKind::Float | TokenKind::Bool
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::String => "string",
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::Bool => "bool",
            TokenKind::OpenParen => "openParen",
            TokenKind::CloseParen => "closeParen",
            TokenKind::OpenBracket => "openBracket",
            TokenKind::CloseBracket => "closeBracket",
            TokenKind::Identifier => "identifier",
            TokenKind::Whitespace => "whitespace",
        };
        write!(f, "{}", name)
    }
}
