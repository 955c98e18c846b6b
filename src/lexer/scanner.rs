use regex::Regex;

use super::token::{Token, TokenKind};
use crate::error::{LexError, Result};

/// A token kind paired with the pattern that recognizes it
#[derive(Debug, Clone)]
pub struct TokenRule {
    /// Kind assigned to every match
    pub kind: TokenKind,
    /// Pattern matched over the whole source
    pub pattern: Regex,
}

impl TokenRule {
    /// Compiles a rule for `kind`
    pub fn new(kind: TokenKind, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| LexError::InvalidRule {
            kind,
            reason: e.to_string(),
        })?;
        Ok(TokenRule { kind, pattern })
    }
}

/// Rule-priority lexer
///
/// Every rule is matched against the whole source. Rules are applied in
/// priority order and a match is kept only if none of its bytes were already
/// claimed by a higher-priority match. Surviving tokens are sorted by offset.
/// Any byte left unclaimed is an error: input is never silently dropped.
#[derive(Debug, Clone)]
pub struct Lexer {
    rules: Vec<TokenRule>,
}

impl Lexer {
    /// Creates a lexer with the standard rule table
    pub fn new() -> Result<Self> {
        Ok(Lexer {
            rules: vec![
                TokenRule::new(TokenKind::String, r#""[^"]*""#)?,
                TokenRule::new(TokenKind::Float, r"[0-9]+\.[0-9]*|\.[0-9]+")?,
                TokenRule::new(TokenKind::Int, r"[0-9]+")?,
                // Word boundaries: `5true` and `true5` leave `true` to the identifier rule
                TokenRule::new(TokenKind::Bool, r"\b(?:true|false)\b")?,
                TokenRule::new(TokenKind::Identifier, r"[a-zA-Z]+")?,
                TokenRule::new(TokenKind::OpenParen, r"\(")?,
                TokenRule::new(TokenKind::CloseParen, r"\)")?,
                TokenRule::new(TokenKind::OpenBracket, r"\[")?,
                TokenRule::new(TokenKind::CloseBracket, r"\]")?,
                TokenRule::new(TokenKind::Whitespace, r"\s+")?,
            ],
        })
    }

    /// Creates a lexer from an explicit rule table, highest priority first
    pub fn with_rules(rules: Vec<TokenRule>) -> Self {
        Lexer { rules }
    }

    /// The rule table in priority order
    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    /// Tokenizes source text, whitespace included
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>> {
        let mut claimed = vec![false; source.len()];
        let mut tokens = Vec::new();

        for rule in &self.rules {
            for m in rule.pattern.find_iter(source) {
                if m.is_empty() || claimed[m.range()].iter().any(|&c| c) {
                    continue;
                }
                claimed[m.range()].iter_mut().for_each(|c| *c = true);
                tokens.push(Token::new(rule.kind, m.as_str(), m.start()));
            }
        }

        if let Some((offset, character)) = source
            .char_indices()
            .find(|(offset, _)| !claimed[*offset])
        {
            return Err(LexError::UnrecognizedCharacter { offset, character }.into());
        }

        tokens.sort_by_key(|t| t.offset);
        Ok(tokens)
    }
}

/// Drops whitespace tokens, keeping everything else in order
pub fn significant(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Whitespace)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let tokens = Lexer::new().unwrap().tokenize(source).unwrap();
        significant(&tokens).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_call() {
        let tokens = Lexer::new().unwrap().tokenize("(plus 1 2)").unwrap();

        assert_eq!(tokens.len(), 7); // ( plus _ 1 _ 2 )
        assert_eq!(tokens[0].kind, TokenKind::OpenParen);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "plus");
        assert_eq!(tokens[2].kind, TokenKind::Whitespace);
        assert_eq!(tokens[3].kind, TokenKind::Int);
        assert_eq!(tokens[6].kind, TokenKind::CloseParen);
    }

    #[test]
    fn test_tokens_cover_source_in_order() {
        let source = "(def a \"x y\" [1 .5 2.])";
        let tokens = Lexer::new().unwrap().tokenize(source).unwrap();

        let mut expected_offset = 0;
        for token in &tokens {
            assert_eq!(token.offset, expected_offset);
            expected_offset = token.end();
        }
        assert_eq!(expected_offset, source.len());
    }

    #[test]
    fn test_float_forms() {
        assert_eq!(kinds("1.5"), vec![TokenKind::Float]);
        assert_eq!(kinds(".5"), vec![TokenKind::Float]);
        assert_eq!(kinds("1."), vec![TokenKind::Float]);
        assert_eq!(kinds("15"), vec![TokenKind::Int]);
    }

    #[test]
    fn test_string_claims_its_contents() {
        let tokens = Lexer::new().unwrap().tokenize("\"12 true (x)\"").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::String);
    }

    #[test]
    fn test_bool_needs_word_boundary() {
        assert_eq!(kinds("true"), vec![TokenKind::Bool]);
        assert_eq!(kinds("trueish"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn test_bool_glued_to_digits_is_identifier() {
        assert_eq!(kinds("5true"), vec![TokenKind::Int, TokenKind::Identifier]);
        assert_eq!(kinds("false5"), vec![TokenKind::Identifier, TokenKind::Int]);
        assert_eq!(kinds("5 true"), vec![TokenKind::Int, TokenKind::Bool]);
    }

    #[test]
    fn test_brackets() {
        assert_eq!(
            kinds("[1 \"a\"]"),
            vec![
                TokenKind::OpenBracket,
                TokenKind::Int,
                TokenKind::String,
                TokenKind::CloseBracket
            ]
        );
    }

    #[test]
    fn test_unrecognized_character() {
        let err = Lexer::new().unwrap().tokenize("(plus 1 #)").unwrap_err();
        assert_eq!(
            err,
            Error::Lex(LexError::UnrecognizedCharacter {
                offset: 8,
                character: '#'
            })
        );
    }

    #[test]
    fn test_unterminated_string_is_rejected() {
        let err = Lexer::new().unwrap().tokenize("\"abc").unwrap_err();
        assert!(matches!(
            err,
            Error::Lex(LexError::UnrecognizedCharacter { offset: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_rule_pattern() {
        let err = TokenRule::new(TokenKind::Int, "[0-9").unwrap_err();
        assert!(matches!(err, Error::Lex(LexError::InvalidRule { .. })));
    }

    #[test]
    fn test_custom_rules() {
        let lexer = Lexer::with_rules(vec![
            TokenRule::new(TokenKind::Int, r"[0-9]+").unwrap(),
            TokenRule::new(TokenKind::Whitespace, r"\s+").unwrap(),
        ]);
        assert_eq!(lexer.rules().len(), 2);
        assert!(lexer.tokenize("1 2").is_ok());
        assert!(lexer.tokenize("a").is_err());
    }
}
