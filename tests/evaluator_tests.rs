// tests/evaluator_tests.rs

use logix::ast::{Condition, Group, LogicalOp, Operator, Statement};
use logix::convert::json_to_value;
use logix::evaluator::{EvalError, Evaluator, evaluate_parsed};
use logix::value::{Literal, Value};
use logix::{Error, check_syntax, evaluate_rules};
use serde_json::json;

fn context() -> Value {
    json_to_value(json!({
        "age": 25,
        "score": 15.5,
        "name": "Jane",
        "title": "Hello World",
        "code": "A10",
        "active": true,
        "nothing": null,
        "role": "editor",
        "tags": ["new", "sale"],
        "products": [
            {"name": "Laptop", "category": {"name": "electronics"}, "price": 999},
            {"name": "Pen", "category": {"name": "office"}, "price": 2}
        ]
    }))
}

fn eval(rules: &str) -> logix::Result<bool> {
    evaluate_rules(rules, &context())
}

#[track_caller]
fn assert_true(rules: &str) {
    assert_eq!(eval(rules), Ok(true), "expected true: {}", rules);
}

#[track_caller]
fn assert_false(rules: &str) {
    assert_eq!(eval(rules), Ok(false), "expected false: {}", rules);
}

#[track_caller]
fn assert_eval_error(rules: &str) -> EvalError {
    match eval(rules) {
        Err(Error::Eval(e)) => e,
        other => panic!("expected evaluation error for {:?}, got {:?}", rules, other),
    }
}

// ============================================================================
// Equality
// ============================================================================

#[test]
fn test_eq_and_neq() {
    assert_true("age eq 25");
    assert_true(r#"name eq "Jane""#);
    assert_true("active eq true");
    assert_false("active eq false");
    assert_true(r#"name neq "John""#);
    assert_false("age neq 25");
}

#[test]
fn test_eq_is_kind_sensitive() {
    assert_false(r#"age eq "25""#);
    assert_true(r#"age neq "25""#);
    assert_false("active eq 1");
}

#[test]
fn test_nil_matches_null_and_missing_fields() {
    assert_true("nothing eq nil");
    assert_true("missing eq nil");
    assert_true("products[0].missing eq nil");
    assert_false("age eq nil");
    assert_true("age neq nil");
}

#[test]
fn test_eq_never_matches_collections() {
    assert_false("tags eq nil");
    assert_true("products neq 0");
}

// ============================================================================
// Numeric Comparisons
// ============================================================================

#[test]
fn test_ordering_operators() {
    assert_true("age gt 24");
    assert_false("age gt 25");
    assert_true("age gte 25");
    assert_false("age gte 26");
    assert_true("age lt 26");
    assert_false("age lt 25");
    assert_true("age lte 25");
    assert_false("age lte 24");
    assert_true("score gt 15");
    assert_true("score lt 16");
}

#[test]
fn test_ordering_requires_numbers() {
    let err = assert_eval_error(r#"age lt "twenty""#);
    assert_eq!(
        err.to_string(),
        "invalid types for numeric comparison: float and string"
    );

    let err = assert_eval_error("name gt 1");
    assert_eq!(
        err,
        EvalError::NumericTypes {
            left: "string",
            right: "float",
        }
    );

    let err = assert_eval_error("missing gte 1");
    assert_eq!(
        err,
        EvalError::NumericTypes {
            left: "null",
            right: "float",
        }
    );

    assert!(matches!(
        assert_eval_error("active lte true"),
        EvalError::NumericTypes { left: "boolean", right: "boolean" }
    ));
}

#[test]
fn test_between_is_inclusive() {
    assert_true("age between 25 and 30");
    assert_true("age between 20 and 25");
    assert_true("age between 20 and 30");
    assert_false("age between 26 and 30");
    assert_false("age between 10 and 24");
    // reversed bounds select nothing
    assert_false("age between 30 and 20");
}

#[test]
fn test_between_matches_gte_and_lte() {
    for (low, high) in [(10, 20), (25, 25), (26, 30), (0, 24), (20, 30)] {
        let range = eval(&format!("age between {} and {}", low, high)).unwrap();
        let pair = eval(&format!("age gte {}\nage lte {}", low, high)).unwrap();
        assert_eq!(range, pair, "between {} and {}", low, high);
    }
}

#[test]
fn test_between_requires_numbers() {
    let err = assert_eval_error("name between 1 and 2");
    assert_eq!(
        err.to_string(),
        "invalid types for 'between' operator: string between float and float"
    );

    assert!(matches!(
        assert_eval_error(r#"age between "a" and 30"#),
        EvalError::BetweenTypes { low: "string", .. }
    ));
}

// ============================================================================
// String Operators
// ============================================================================

#[test]
fn test_string_operators() {
    assert_true(r#"title contains "World""#);
    assert_false(r#"title contains "world""#);
    assert_true(r#"title startsWith "Hello""#);
    assert_false(r#"title startsWith "World""#);
    assert_true(r#"title endsWith "World""#);
    assert_false(r#"title endsWith "Hello""#);
    assert_true(r#"title contains """#);
}

#[test]
fn test_string_operand_rendering() {
    // non-string operands are matched by their written form
    assert_true("code contains 10");
    assert_true("code endsWith 10");
    assert_false("code startsWith 10");
}

#[test]
fn test_string_operators_require_string_field() {
    let err = assert_eval_error(r#"age contains "2""#);
    assert_eq!(
        err.to_string(),
        "the field value is float, not a string, for 'contains' operator"
    );

    assert!(matches!(
        assert_eval_error(r#"tags startsWith "n""#),
        EvalError::NotAString { found: "array", .. }
    ));
    assert!(matches!(
        assert_eval_error(r#"missing endsWith "x""#),
        EvalError::NotAString { found: "null", .. }
    ));
}

// ============================================================================
// Membership
// ============================================================================

#[test]
fn test_in() {
    assert_true(r#"role in ["admin", "editor"]"#);
    assert_false(r#"role in ["admin", "owner"]"#);
    assert_true(r#"role in "editor""#);
    assert_true("age in [1, 25, 100]");
    assert_true("nothing in [nil]");
}

#[test]
fn test_in_with_mixed_kinds() {
    assert_true(r#"age in ["25", 25]"#);
    assert_false(r#"age in ["25", true, nil]"#);
    assert_true(r#"active in [1, "true", true]"#);
}

// ============================================================================
// Negation
// ============================================================================

#[test]
fn test_not_is_complement() {
    let conditions = [
        r#"title contains "World""#,
        r#"title contains "nope""#,
        r#"title startsWith "Hello""#,
        r#"title endsWith "Hello""#,
        "age between 20 and 30",
        "age between 30 and 40",
        r#"role in ["admin", "editor"]"#,
        r#"role in ["admin"]"#,
    ];

    for condition in conditions {
        let (field, rest) = condition.split_once(' ').unwrap();
        let negated = format!("{} not {}", field, rest);

        let plain = eval(condition).unwrap();
        assert_eq!(eval(&negated), Ok(!plain), "{}", negated);
    }
}

#[test]
fn test_negation_does_not_hide_errors() {
    assert!(matches!(
        assert_eval_error(r#"age not contains "2""#),
        EvalError::NotAString { .. }
    ));
    assert!(matches!(
        assert_eval_error("name not between 1 and 2"),
        EvalError::BetweenTypes { .. }
    ));
}

#[test]
fn test_unknown_operator() {
    let err = assert_eval_error("age xyz 30");
    assert_eq!(err, EvalError::UnknownOperator("xyz".to_string()));
    assert_eq!(err.to_string(), "unknown operator 'xyz'");
}

// ============================================================================
// Groups
// ============================================================================

#[test]
fn test_group_and_or() {
    assert_true("group and\n    age gt 18\n    active eq true");
    assert_false("group and\n    age gt 18\n    active eq false");
    assert_true("group or\n    age gt 100\n    active eq true");
    assert_false("group or\n    age gt 100\n    active eq false");
}

#[test]
fn test_nested_groups() {
    let rules = r#"
group or
    role eq "admin"
    group and
        role eq "editor"
        age gte 18
"#;
    assert_true(rules);

    let rules = r#"
group and
    group or
        role eq "admin"
        role eq "owner"
    age gte 18
"#;
    assert_false(rules);
}

#[test]
fn test_group_evaluates_every_child() {
    // the outcome is decided by the first child, the error still surfaces
    let err = assert_eval_error("group or\n    age eq 25\n    name gt 1");
    assert!(matches!(err, EvalError::NumericTypes { .. }));

    let err = assert_eval_error("group and\n    age eq 0\n    name gt 1");
    assert!(matches!(err, EvalError::NumericTypes { .. }));
}

#[test]
fn test_empty_group() {
    // only reachable through a hand-built tree
    let context = context();
    let evaluator = Evaluator::new(&context);

    let and = Group {
        logical_op: LogicalOp::And,
        children: vec![],
    };
    let or = Group {
        logical_op: LogicalOp::Or,
        children: vec![],
    };
    assert_eq!(evaluator.eval_group(&and), Ok(true));
    assert_eq!(evaluator.eval_group(&or), Ok(false));
}

// ============================================================================
// Programs
// ============================================================================

#[test]
fn test_top_level_statements_are_anded() {
    assert_true("age gt 18\nactive eq true\nrole eq \"editor\"");
    assert_false("age gt 18\nactive eq false\nrole eq \"editor\"");
}

#[test]
fn test_empty_program_is_true() {
    assert_true("");
    assert_true("# only a comment\n\n");
}

#[test]
fn test_first_false_statement_stops_evaluation() {
    // the second statement would fail if it were evaluated
    assert_false("age eq 0\nname gt 1");
}

#[test]
fn test_syntax_error_after_false_statement_is_never_reached() {
    assert_false("age eq 0\nage eq eq");
    assert_false("age eq 0\nage between 1 2");
}

#[test]
fn test_over_indented_lines_are_evaluated() {
    assert_true("age gt 18\n    title contains \"Hello\"");
    assert_false("age gt 18\n    title contains \"Bye\"");
    assert_true("group and\n    age gt 18\n        title contains \"Hello\"");
    assert_false("group or\n    age gt 30\n        title contains \"Bye\"\nage eq 25");
}

#[test]
fn test_syntax_error_before_evaluation_is_reported() {
    assert!(matches!(eval("age eq eq\nage eq 25"), Err(Error::Parse(_))));
    assert!(matches!(eval("age eq 25\nage eq eq"), Err(Error::Parse(_))));
}

// ============================================================================
// Field Paths
// ============================================================================

#[test]
fn test_nested_paths() {
    assert_true(r#"products[0].name eq "Laptop""#);
    assert_true(r#"products[1].category.name eq "office""#);
    assert_true("products[1].price lt 10");
    assert_true(r#"tags[1] eq "sale""#);
}

#[test]
fn test_path_errors() {
    let err = assert_eval_error(r#"products[100].name eq "Laptop""#);
    assert_eq!(err.to_string(), "array index out of range: 100");

    assert!(matches!(
        assert_eval_error("age.value eq 1"),
        EvalError::InvalidPath { found: "float", .. }
    ));
    assert!(matches!(
        assert_eval_error("products.name eq 1"),
        EvalError::InvalidPath { found: "array", .. }
    ));
}

// ============================================================================
// Direct Evaluator Use
// ============================================================================

#[test]
fn test_evaluate_parsed() {
    let context = context();

    let statements = check_syntax("age gt 18\nrole eq \"editor\"").unwrap();
    assert_eq!(evaluate_parsed(&statements, &context), Ok(true));

    let statements = check_syntax("age gt 30\nname gt 1").unwrap();
    assert_eq!(evaluate_parsed(&statements, &context), Ok(false));
}

#[test]
fn test_operand_count_is_checked() {
    let context = context();
    let evaluator = Evaluator::new(&context);

    let condition = Condition {
        field: "age".to_string(),
        operator: Operator::Between,
        operands: vec![Literal::Number(1.0)],
        negate: false,
    };
    assert_eq!(
        evaluator.eval_condition(&condition),
        Err(EvalError::OperandCount {
            operator: "between".to_string(),
            expected: "2",
            found: 1,
        })
    );

    let condition = Condition {
        field: "age".to_string(),
        operator: Operator::In,
        operands: vec![],
        negate: false,
    };
    let statement = Statement::Condition(condition);
    assert!(matches!(
        evaluator.eval_statement(&statement),
        Err(EvalError::OperandCount { found: 0, .. })
    ));
}
