//! Property-based fuzzing tests for the lexer and evaluator
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. The lexer and evaluator never panic on arbitrary input
//! 2. Well-formed programs produce the results plain Rust arithmetic predicts
//! 3. Evaluation is deterministic and keeps no state between calls

use fuselisp::{Error, Evaluator, Lexer, ParseError, TokenKind, Value};
use proptest::prelude::*;

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Generate random strings that might break the lexer
fn arbitrary_source_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[\x00-\x7F]{0,200}").unwrap()
}

/// Generate token soup that looks like the language
fn sexp_like_string() -> impl Strategy<Value = String> {
    prop::collection::vec(sexp_token(), 0..40).prop_map(|tokens| tokens.join(" "))
}

fn sexp_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("plus".to_string()),
        Just("minus".to_string()),
        Just("concat".to_string()),
        Just("length".to_string()),
        Just("equals".to_string()),
        Just("if".to_string()),
        Just("def".to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        (0i64..1000i64).prop_map(|n| n.to_string()),
        (0.0f64..100.0f64).prop_map(|f| format!("{:.2}", f)),
        r#""[a-zA-Z0-9 ]{0,10}""#.prop_map(|s| s),
        "[a-z]{1,6}".prop_map(|s| s),
    ]
}

/// Generate nested int arithmetic together with its expected value
fn int_expr() -> impl Strategy<Value = (String, i64)> {
    let leaf = (0i64..1000).prop_map(|n| (n.to_string(), n));
    leaf.prop_recursive(4, 32, 2, |inner| {
        (prop::bool::ANY, inner.clone(), inner).prop_map(|(add, (ls, lv), (rs, rv))| {
            if add {
                (format!("(plus {} {})", ls, rs), lv + rv)
            } else {
                (format!("(minus {} {})", ls, rs), lv - rv)
            }
        })
    })
}

// =============================================================================
// LEXER FUZZ TESTS
// =============================================================================

proptest! {
    /// The lexer should never panic on arbitrary input
    #[test]
    fn lexer_never_panics(source in arbitrary_source_string()) {
        let lexer = Lexer::new().unwrap();
        let _ = lexer.tokenize(&source);
    }

    /// Tokens never overlap and always come out in source order
    #[test]
    fn lexer_tokens_are_disjoint_and_sorted(source in sexp_like_string()) {
        let lexer = Lexer::new().unwrap();
        if let Ok(tokens) = lexer.tokenize(&source) {
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].end() <= pair[1].offset);
            }
            let covered: usize = tokens.iter().map(|t| t.text.len()).sum();
            prop_assert_eq!(covered, source.len());
        }
    }

    /// Whitespace is kept in the token stream
    #[test]
    fn lexer_keeps_whitespace(a in 0i64..100, b in 0i64..100) {
        let lexer = Lexer::new().unwrap();
        let tokens = lexer.tokenize(&format!("{} {}", a, b)).unwrap();
        prop_assert_eq!(tokens.len(), 3);
        prop_assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    }
}

// =============================================================================
// EVALUATOR FUZZ TESTS
// =============================================================================

proptest! {
    /// The evaluator should never panic on arbitrary input
    #[test]
    fn evaluator_never_panics(source in arbitrary_source_string()) {
        let evaluator = Evaluator::new().unwrap();
        let _ = evaluator.evaluate(&source);
    }

    /// The evaluator handles language-like token soup without panic
    #[test]
    fn evaluator_handles_sexp_like(source in sexp_like_string()) {
        let evaluator = Evaluator::new().unwrap();
        let _ = evaluator.evaluate(&source);
    }

    /// Integer arithmetic agrees with i64 arithmetic
    #[test]
    fn int_arithmetic_matches_rust((source, expected) in int_expr()) {
        let evaluator = Evaluator::new().unwrap();
        prop_assert_eq!(evaluator.evaluate(&source).unwrap(), Value::Int(expected));
    }

    /// Evaluating the same source twice gives the same outcome
    #[test]
    fn evaluation_is_idempotent(source in sexp_like_string()) {
        let evaluator = Evaluator::new().unwrap();
        prop_assert_eq!(evaluator.evaluate(&source), evaluator.evaluate(&source));
    }

    /// Unbalanced parentheses always yield a parse error
    #[test]
    fn unbalanced_parens_are_rejected(extra_open in 1usize..20) {
        let source = format!("{}(plus 1 2)", "(plus 1 ".repeat(extra_open));
        let evaluator = Evaluator::new().unwrap();
        let err = evaluator.evaluate(&source).unwrap_err();
        prop_assert_eq!(
            err,
            Error::Parse(ParseError::ParenMismatch { depth: extra_open as isize })
        );
    }

    /// if selects by condition, whatever the branches hold
    #[test]
    fn if_selects_branch(cond in prop::bool::ANY, a in 0i64..1000, b in 0i64..1000) {
        let evaluator = Evaluator::new().unwrap();
        let result = evaluator.evaluate(&format!("(if {} {} {})", cond, a, b)).unwrap();
        prop_assert_eq!(result, Value::Int(if cond { a } else { b }));
    }

    /// def binds the value for its body
    #[test]
    fn def_binds_value(name in "[a-z]{1,6}", value in 0i64..1000) {
        prop_assume!(name != "true" && name != "false");
        let evaluator = Evaluator::new().unwrap();
        let result = evaluator
            .evaluate(&format!("(def {0} {1} (plus {0} {0}))", name, value))
            .unwrap();
        prop_assert_eq!(result, Value::Int(value * 2));
    }
}
