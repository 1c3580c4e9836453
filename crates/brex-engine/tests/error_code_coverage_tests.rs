//! Error code coverage: every diagnostic code (E100–E202) is reachable
//! through `Engine::evaluate` and serializes to a stable JSON shape.

use brex_engine::{BrexError, CommandSchema, Engine, EngineConfig, ErrorCode, ErrorKind, Value};
use serde_json::json;

fn first_error(engine: &Engine, rule: &str) -> BrexError {
    engine
        .try_parse(Some(rule), None)
        .expect_err("rule should fail")
}

fn assert_code(rule: &str, expected: ErrorCode) {
    let err = first_error(&Engine::new(), rule);
    assert_eq!(
        err.code, expected,
        "expected {expected} for {rule}, got {}: {}",
        err.code, err.message
    );
    assert_eq!(err.kind.code(), err.code);
    assert_eq!(err.code.category(), err.category);
}

// ══════════════════════════════════════════════════════════════════════════════
// E1xx: syntax
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn e100_malformed_expression() {
    assert_code("AND[equals[1,1]", ErrorCode::MALFORMED_EXPRESSION);
    assert_code("AND[true]]", ErrorCode::MALFORMED_EXPRESSION);
}

#[test]
fn e101_depth_exceeded() {
    let engine = Engine::with_config(EngineConfig::default().with_max_depth(2)).unwrap();
    let err = first_error(&engine, "NOT[NOT[NOT[true]]]");
    assert_eq!(err.code, ErrorCode::DEPTH_EXCEEDED);
    assert_eq!(err.kind, ErrorKind::DepthExceeded);
}

// ══════════════════════════════════════════════════════════════════════════════
// E2xx: evaluation
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn e200_unknown_command() {
    assert_code("nope[1]", ErrorCode::UNKNOWN_COMMAND);
    let err = first_error(&Engine::new(), "nope[1]");
    assert_eq!(err.command.as_deref(), Some("nope"));
}

#[test]
fn e201_invalid_parameters() {
    assert_code("equals[1]", ErrorCode::INVALID_PARAMETERS);
    assert_code("NOT[1]", ErrorCode::INVALID_PARAMETERS);
}

#[test]
fn e202_handler_error() {
    assert_code("greater_than[1,abc]", ErrorCode::HANDLER_ERROR);

    let mut engine = Engine::new();
    engine.register_fn("boom", CommandSchema::default(), |_, _| {
        panic!("kaboom");
    });
    let err = first_error(&engine, "boom[]");
    assert_eq!(err.code, ErrorCode::HANDLER_ERROR);
    assert!(err.message.contains("kaboom"), "message: {}", err.message);
    assert_eq!(engine.parse(Some("boom[]"), None), Value::Bool(false));
}

// ══════════════════════════════════════════════════════════════════════════════
// Display & JSON
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn display_shows_span_and_code() {
    let err = first_error(&Engine::new(), "nope[1]");
    assert_eq!(
        err.to_string(),
        "0..7: E200 [unknown command] no command registered as 'nope'"
    );
}

#[test]
fn diagnostic_json_shape() {
    let err = first_error(&Engine::new(), "nope[1]");
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value["code"], json!(200));
    assert_eq!(value["kind"], json!("UnknownCommand"));
    assert_eq!(value["category"], json!("evaluation"));
    assert_eq!(value["command"], json!("nope"));
    assert_eq!(value["span"], json!({"start": 0, "end": 7}));

    let back: BrexError = serde_json::from_value(value).unwrap();
    assert_eq!(back, err);
}

#[test]
fn syntax_diagnostic_has_no_command() {
    let err = first_error(&Engine::new(), "AND[true");
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value["category"], json!("syntax"));
    assert!(value.get("command").is_none());
}
