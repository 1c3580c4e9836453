//! Tree builder tests.
//!
//! Covers: single-token commands, literal coercion of parameters, nested
//! sub-expressions, the multi-token `name,arg,...` form, spans, canonical
//! rendering, and determinism.

use brex_lexer::tokenize;
use brex_parser::{build, build_tokens};
use brex_types::{Literal, Span, SyntaxNode};
use pretty_assertions::assert_eq;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Build source and return the tree, panicking on errors.
fn parse_ok(source: &str) -> SyntaxNode {
    match build(source) {
        Ok(node) => node,
        Err(e) => panic!("unexpected build error for {source:?}: {e}"),
    }
}

fn lit(node: &SyntaxNode) -> &Literal {
    node.as_literal()
        .unwrap_or_else(|| panic!("expected literal, got {node}"))
}

// ─────────────────────────────────────────────────────────────────────
// Structure
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_nested_structure_round_trip() {
    let node = parse_ok("name[a,b[c,d],e]");
    assert_eq!(node.name(), Some("name"));
    assert_eq!(node.args().len(), 3);

    let second = &node.args()[1];
    assert_eq!(second.name(), Some("b"));
    assert_eq!(second.args().len(), 2);
    assert_eq!(lit(&second.args()[0]), &Literal::Str("c".into()));
    assert_eq!(lit(&second.args()[1]), &Literal::Str("d".into()));

    assert_eq!(lit(&node.args()[0]), &Literal::Str("a".into()));
    assert_eq!(lit(&node.args()[2]), &Literal::Str("e".into()));
}

#[test]
fn test_deep_nesting() {
    let node = parse_ok("OR[AND[equals[1,1],greater_than[10,5]],NOT[less_than[2,3]]]");
    assert_eq!(node.name(), Some("OR"));
    assert_eq!(node.depth(), 3);

    let and = &node.args()[0];
    assert_eq!(and.name(), Some("AND"));
    assert_eq!(and.args()[0].name(), Some("equals"));
    assert_eq!(and.args()[1].name(), Some("greater_than"));
    assert_eq!(lit(&and.args()[1].args()[0]), &Literal::Int(10));

    let not = &node.args()[1];
    assert_eq!(not.name(), Some("NOT"));
    assert_eq!(not.args()[0].name(), Some("less_than"));
}

#[test]
fn test_empty_param_list() {
    let node = parse_ok("AND[]");
    assert_eq!(node.name(), Some("AND"));
    assert!(node.args().is_empty());
}

#[test]
fn test_bare_command_has_no_args() {
    let node = parse_ok("always_true");
    assert_eq!(node.name(), Some("always_true"));
    assert!(node.args().is_empty());
}

#[test]
fn test_whitespace_around_params() {
    let node = parse_ok("  equals[ 1 , 1 ]  ");
    assert_eq!(node.name(), Some("equals"));
    assert_eq!(lit(&node.args()[0]), &Literal::Int(1));
    assert_eq!(lit(&node.args()[1]), &Literal::Int(1));
}

#[test]
fn test_space_between_name_and_bracket() {
    let node = parse_ok("NOT [true]");
    assert_eq!(node.name(), Some("NOT"));
    assert_eq!(node.args().len(), 1);
}

// ─────────────────────────────────────────────────────────────────────
// Literal coercion
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_param_literals() {
    let node = parse_ok("f[TRUE,false,-3,2.7,\"1\",hello world]");
    let args = node.args();
    assert_eq!(lit(&args[0]), &Literal::Bool(true));
    assert_eq!(lit(&args[1]), &Literal::Bool(false));
    assert_eq!(lit(&args[2]), &Literal::Int(-3));
    assert_eq!(lit(&args[3]), &Literal::Int(2));
    assert_eq!(lit(&args[4]), &Literal::Str("\"1\"".into()));
    assert_eq!(lit(&args[5]), &Literal::Str("hello world".into()));
}

#[test]
fn test_empty_param_is_empty_string() {
    let node = parse_ok("f[a,,b]");
    assert_eq!(node.args().len(), 3);
    assert_eq!(lit(&node.args()[1]), &Literal::Str(String::new()));
}

// ─────────────────────────────────────────────────────────────────────
// Multi-token form
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_multi_token_scalars_become_literals() {
    let node = parse_ok("AND,true,1");
    assert_eq!(node.name(), Some("AND"));
    assert_eq!(lit(&node.args()[0]), &Literal::Bool(true));
    assert_eq!(lit(&node.args()[1]), &Literal::Int(1));
}

#[test]
fn test_multi_token_words_become_commands() {
    let node = parse_ok("OR,equals[1,2],ready");
    let args = node.args();
    assert_eq!(args[0].name(), Some("equals"));
    assert_eq!(args[0].args().len(), 2);
    assert_eq!(args[1].name(), Some("ready"));
    assert!(args[1].args().is_empty());
}

#[test]
fn test_build_tokens_directly() {
    let tokens = tokenize("name[a,b[c,d],e]");
    let node = build_tokens(&tokens).unwrap();
    assert_eq!(node.args().len(), 3);
    assert_eq!(node.args()[1].name(), Some("b"));
}

// ─────────────────────────────────────────────────────────────────────
// Spans and rendering
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_spans_point_into_source() {
    let src = "AND[equals[1, 1], x]";
    let node = parse_ok(src);
    assert_eq!(node.span(), Span::new(0, 20));

    let equals = &node.args()[0];
    assert_eq!(equals.span().slice(src), Some("equals[1, 1]"));
    assert_eq!(equals.args()[1].span().slice(src), Some("1"));
    assert_eq!(equals.args()[1].span(), Span::new(14, 15));
    assert_eq!(node.args()[1].span().slice(src), Some("x"));
}

#[test]
fn test_multi_token_span_covers_all_tokens() {
    let src = "AND, true ,x";
    let node = parse_ok(src);
    assert_eq!(node.span(), Span::new(0, 12));
}

#[test]
fn test_canonical_display() {
    let node = parse_ok(" OR[ AND[ equals[1,1] , x ], NOT[y] ] ");
    assert_eq!(node.to_string(), "OR[AND[equals[1,1],x],NOT[y]]");
}

#[test]
fn test_display_reparses_to_same_tree_shape() {
    let src = "OR[AND[equals[1,1],greater_than[10,5]],NOT[less_than[2,3]]]";
    let once = parse_ok(src);
    let twice = parse_ok(&once.to_string());
    assert_eq!(once.to_string(), twice.to_string());
    assert_eq!(once.depth(), twice.depth());
}

// ─────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_build_determinism_100_iterations() {
    let src = "OR[AND[equals[1,1],greater_than[10,5]],NOT[less_than[2,3]],x[y,z]]";
    let first = parse_ok(src);
    for i in 0..100 {
        let node = parse_ok(src);
        assert_eq!(first, node, "Determinism failure at iteration {i}");
    }
}
