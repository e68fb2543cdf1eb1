use rowsift::{parse, FieldDescriptors, ParseError, ValueType};

// ==============================================================================

fn fields() -> FieldDescriptors {
    FieldDescriptors::new()
        .with("amount", ValueType::Number)
        .with("status", ValueType::String)
        .with("id", ValueType::Number)
        .with("a", ValueType::Number)
        .with("name", ValueType::String)
        .with("created_at", ValueType::Date)
}

#[test]
fn extra_closing_bracket_fails_at_its_position() {
    let err = parse("a = 1))", &fields()).unwrap_err();
    assert!(
        matches!(err, ParseError::ExtraClosingBracket { .. }),
        "got {err:?}"
    );
}

#[test]
fn unclosed_bracket_fails_at_end_of_lexing() {
    let err = parse("(a = 1", &fields()).unwrap_err();
    assert!(matches!(err, ParseError::UnclosedBracket { .. }), "got {err:?}");
}

#[test]
fn missing_right_operand_is_malformed() {
    let err = parse("name like", &fields()).unwrap_err();
    assert!(
        matches!(err, ParseError::MalformedOperator { ref op } if op == "like"),
        "got {err:?}"
    );
}

#[test]
fn missing_left_operand_is_malformed() {
    let err = parse("(is null)", &fields()).unwrap_err();
    assert!(
        matches!(err, ParseError::MalformedOperator { ref op } if op == "is null"),
        "got {err:?}"
    );
}

#[test]
fn lone_operator_token_does_not_resolve() {
    // a single-token sequence is already at the fixpoint; no pass ever sees it
    let err = parse("is null", &fields()).unwrap_err();
    assert!(matches!(err, ParseError::UnresolvableRule), "got {err:?}");
}

#[test]
fn bare_arithmetic_does_not_resolve_to_a_condition() {
    let err = parse("1 + 1", &fields()).unwrap_err();
    assert!(matches!(err, ParseError::UnresolvableRule), "got {err:?}");
}

#[test]
fn two_conditions_without_a_combiner_do_not_resolve() {
    let err = parse("a = 1 a = 2", &fields()).unwrap_err();
    assert!(matches!(err, ParseError::UnresolvableRule), "got {err:?}");
}

#[test]
fn empty_rule_does_not_resolve() {
    let err = parse("", &fields()).unwrap_err();
    assert!(matches!(err, ParseError::UnresolvableRule), "got {err:?}");

    let err = parse("   ", &fields()).unwrap_err();
    assert!(matches!(err, ParseError::UnresolvableRule), "got {err:?}");
}

#[test]
fn undeclared_field_is_invalid_data() {
    let err = parse("mystery = 1", &fields()).unwrap_err();
    assert!(
        matches!(err, ParseError::UnrecognizedToken { pos: 0, .. }),
        "got {err:?}"
    );
}

#[test]
fn stray_symbol_is_invalid_data_at_its_position() {
    let err = parse("a = $", &fields()).unwrap_err();
    assert!(
        matches!(err, ParseError::UnrecognizedToken { pos: 4, .. }),
        "got {err:?}"
    );
}

#[test]
fn one_argument_function_rejects_two_arguments() {
    let err = parse("upper(status, name) = 'x'", &fields()).unwrap_err();
    assert!(
        matches!(err, ParseError::MalformedFunction { ref op } if op == "upper"),
        "got {err:?}"
    );
}

#[test]
fn two_argument_function_rejects_one_argument() {
    let err = parse("to_date('2024-01-31') = created_at", &fields()).unwrap_err();
    assert!(
        matches!(err, ParseError::MalformedFunction { ref op } if op == "to_date"),
        "got {err:?}"
    );
}

#[test]
fn list_operator_without_brackets_is_malformed() {
    let err = parse("id in 1", &fields()).unwrap_err();
    assert!(
        matches!(err, ParseError::MalformedOperator { ref op } if op == "in"),
        "got {err:?}"
    );
}

#[test]
fn list_without_separators_is_malformed() {
    let err = parse("id in (1 2)", &fields()).unwrap_err();
    assert!(
        matches!(err, ParseError::MalformedList { ref op } if op == "in"),
        "got {err:?}"
    );
}

#[test]
fn doubled_separator_is_malformed() {
    let err = parse("id in (1,,2)", &fields()).unwrap_err();
    assert!(matches!(err, ParseError::MalformedList { .. }), "got {err:?}");
}

#[test]
fn trailing_separator_is_malformed() {
    let err = parse("id in (1,)", &fields()).unwrap_err();
    assert!(matches!(err, ParseError::MalformedList { .. }), "got {err:?}");
}

#[test]
fn brackets_cannot_group_comparison_operands() {
    // brackets group boolean terms, function arguments and lists only
    let err = parse("a = (1 + 2)", &fields()).unwrap_err();
    assert!(
        matches!(err, ParseError::MalformedOperator { ref op } if op == "="),
        "got {err:?}"
    );
}

#[test]
fn unary_minus_is_not_supported() {
    let err = parse("amount > -5", &fields()).unwrap_err();
    assert!(
        matches!(err, ParseError::MalformedOperator { ref op } if op == "-"),
        "got {err:?}"
    );
}

#[test]
fn sub_select_outside_a_list_is_invalid_data() {
    let err = parse("select = 1", &fields()).unwrap_err();
    assert!(matches!(err, ParseError::UnrecognizedToken { .. }), "got {err:?}");
}

#[test]
fn unterminated_sub_select_is_invalid_data() {
    // the capture never finds the closing bracket, so the position that
    // started it is reported as unmatched input
    let err = parse("id in (select id from t", &fields()).unwrap_err();
    assert!(matches!(err, ParseError::UnrecognizedToken { .. }), "got {err:?}");
}
