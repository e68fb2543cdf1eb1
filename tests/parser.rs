use rowsift::{parse, FieldDescriptors, Node, ValueType};

// ==============================================================================

fn fields() -> FieldDescriptors {
    FieldDescriptors::new()
        .with("amount", ValueType::Number)
        .with("status", ValueType::String)
        .with("id", ValueType::Number)
        .with("a", ValueType::Number)
        .with("b", ValueType::Number)
        .with("c", ValueType::Number)
        .with("name", ValueType::String)
        .with("created_at", ValueType::Date)
        .with("order_id", ValueType::Number)
}

fn num(n: f64) -> Node {
    Node::number(n)
}

#[test]
fn number_equality_needs_no_descriptors() {
    let tree = parse("1 = 1", &FieldDescriptors::new()).unwrap();
    assert_eq!(tree, Node::binary("=", num(1.0), num(1.0), ValueType::Bool));
}

#[test]
fn and_of_two_comparisons() {
    let tree = parse("amount > 10 and status = 'X'", &fields()).unwrap();
    let expected = Node::binary(
        "and",
        Node::binary(
            ">",
            Node::field("amount", ValueType::Number),
            num(10.0),
            ValueType::Bool,
        ),
        Node::binary(
            "=",
            Node::field("status", ValueType::String),
            Node::string("X"),
            ValueType::Bool,
        ),
        ValueType::Bool,
    );
    assert_eq!(tree, expected);
}

#[test]
fn in_list_of_numbers() {
    let tree = parse("id in (1,2,3)", &fields()).unwrap();
    let expected = Node::list(
        Node::field("id", ValueType::Number),
        false,
        vec![num(1.0), num(2.0), num(3.0)],
    );
    assert_eq!(tree, expected);
}

#[test]
fn not_in_list_is_negated() {
    let tree = parse("status not in ('a', 'b')", &fields()).unwrap();
    let expected = Node::list(
        Node::field("status", ValueType::String),
        true,
        vec![Node::string("a"), Node::string("b")],
    );
    assert_eq!(tree, expected);
}

#[test]
fn empty_in_list_is_structurally_fine() {
    let tree = parse("id in ()", &fields()).unwrap();
    assert_eq!(
        tree,
        Node::list(Node::field("id", ValueType::Number), false, vec![])
    );
}

#[test]
fn brackets_beat_operator_precedence() {
    // `or` sits deeper than `and`, so it combines first despite binding looser
    let tree = parse("(a = 1 or b = 2) and c = 3", &fields()).unwrap();
    let cmp = |name: &str, n: f64| {
        Node::binary(
            "=",
            Node::field(name, ValueType::Number),
            num(n),
            ValueType::Bool,
        )
    };
    let expected = Node::binary(
        "and",
        Node::binary("or", cmp("a", 1.0), cmp("b", 2.0), ValueType::Bool),
        cmp("c", 3.0),
        ValueType::Bool,
    );
    assert_eq!(tree, expected);
}

#[test]
fn and_combines_before_or_at_the_same_level() {
    let tree = parse("a = 1 or b = 2 and c = 3", &fields()).unwrap();
    let cmp = |name: &str, n: f64| {
        Node::binary(
            "=",
            Node::field(name, ValueType::Number),
            num(n),
            ValueType::Bool,
        )
    };
    let expected = Node::binary(
        "or",
        cmp("a", 1.0),
        Node::binary("and", cmp("b", 2.0), cmp("c", 3.0), ValueType::Bool),
        ValueType::Bool,
    );
    assert_eq!(tree, expected);
}

#[test]
fn equal_operators_chain_right_nested() {
    // rightmost occurrence combines first at equal depth and precedence
    let tree = parse("a = 1 and b = 2 and c = 3", &fields()).unwrap();
    let cmp = |name: &str, n: f64| {
        Node::binary(
            "=",
            Node::field(name, ValueType::Number),
            num(n),
            ValueType::Bool,
        )
    };
    let expected = Node::binary(
        "and",
        cmp("a", 1.0),
        Node::binary("and", cmp("b", 2.0), cmp("c", 3.0), ValueType::Bool),
        ValueType::Bool,
    );
    assert_eq!(tree, expected);
}

#[test]
fn like_is_a_boolean_comparison() {
    let tree = parse("name like 'A%'", &fields()).unwrap();
    assert_eq!(
        tree,
        Node::binary(
            "like",
            Node::field("name", ValueType::String),
            Node::string("A%"),
            ValueType::Bool,
        )
    );
}

#[test]
fn null_checks_are_postfix() {
    let tree = parse("name is null", &fields()).unwrap();
    assert_eq!(
        tree,
        Node::unary("is null", Node::field("name", ValueType::String), ValueType::Bool)
    );

    let tree = parse("name is not null", &fields()).unwrap();
    assert_eq!(
        tree,
        Node::unary(
            "is not null",
            Node::field("name", ValueType::String),
            ValueType::Bool,
        )
    );
}

#[test]
fn date_function_call() {
    let tree = parse("to_date('2024-01-31', 'YYYY-MM-DD') > created_at", &fields()).unwrap();
    let expected = Node::binary(
        ">",
        Node::binary(
            "to_date",
            Node::string("2024-01-31"),
            Node::string("YYYY-MM-DD"),
            ValueType::Date,
        ),
        Node::field("created_at", ValueType::Date),
        ValueType::Bool,
    );
    assert_eq!(tree, expected);
}

#[test]
fn char_function_call() {
    let tree = parse("to_char(created_at, 'YYYY') = '2024'", &fields()).unwrap();
    let expected = Node::binary(
        "=",
        Node::binary(
            "to_char",
            Node::field("created_at", ValueType::Date),
            Node::string("YYYY"),
            ValueType::String,
        ),
        Node::string("2024"),
        ValueType::Bool,
    );
    assert_eq!(tree, expected);
}

#[test]
fn string_function_call() {
    let tree = parse("upper(status) = 'OPEN'", &fields()).unwrap();
    let expected = Node::binary(
        "=",
        Node::unary(
            "upper",
            Node::field("status", ValueType::String),
            ValueType::String,
        ),
        Node::string("OPEN"),
        ValueType::Bool,
    );
    assert_eq!(tree, expected);
}

#[test]
fn modulo_infix_and_function_parse_alike() {
    let as_function = parse("mod(id, 2) = 0", &fields()).unwrap();
    let as_infix = parse("id % 2 = 0", &fields()).unwrap();
    assert_eq!(as_function, as_infix);
    let expected = Node::binary(
        "=",
        Node::binary(
            "mod",
            Node::field("id", ValueType::Number),
            num(2.0),
            ValueType::Number,
        ),
        num(0.0),
        ValueType::Bool,
    );
    assert_eq!(as_function, expected);
}

#[test]
fn arithmetic_binds_before_comparison() {
    let tree = parse("amount + 5 > 10", &fields()).unwrap();
    let expected = Node::binary(
        ">",
        Node::binary(
            "+",
            Node::field("amount", ValueType::Number),
            num(5.0),
            ValueType::Number,
        ),
        num(10.0),
        ValueType::Bool,
    );
    assert_eq!(tree, expected);
}

#[test]
fn sub_select_becomes_an_opaque_list_value() {
    let tree = parse("id not in (select id from archived)", &fields()).unwrap();
    let expected = Node::list(
        Node::field("id", ValueType::Number),
        true,
        vec![Node::SubSelect("select id from archived".to_string())],
    );
    assert_eq!(tree, expected);
}

#[test]
fn sub_select_swallows_nested_brackets() {
    let tree = parse("id in (select id from t where x in (1, 2))", &fields()).unwrap();
    let expected = Node::list(
        Node::field("id", ValueType::Number),
        false,
        vec![Node::SubSelect(
            "select id from t where x in (1, 2)".to_string(),
        )],
    );
    assert_eq!(tree, expected);
}

#[test]
fn current_time_fields_are_date_typed() {
    let tree = parse("created_at < sysdate", &fields()).unwrap();
    assert_eq!(
        tree,
        Node::binary(
            "<",
            Node::field("created_at", ValueType::Date),
            Node::field("sysdate", ValueType::Date),
            ValueType::Bool,
        )
    );
}

#[test]
fn operators_match_case_insensitively() {
    let tree = parse("amount > 10 AND status LIKE 'x%'", &fields()).unwrap();
    let Node::Expr { op, .. } = &tree else {
        panic!("expected an expression, got {tree:?}");
    };
    assert_eq!(op, "and");
}

#[test]
fn field_references_keep_their_written_case() {
    let tree = parse("STATUS = 'x'", &fields()).unwrap();
    let expected = Node::binary(
        "=",
        Node::field("STATUS", ValueType::String),
        Node::string("x"),
        ValueType::Bool,
    );
    assert_eq!(tree, expected);
}

#[test]
fn root_is_always_bool_typed() {
    for rule in [
        "1 = 1",
        "id in (1)",
        "name is null",
        "(a = 1 or b = 2) and c = 3",
    ] {
        let tree = parse(rule, &fields()).unwrap();
        assert_eq!(tree.value_type(), Some(ValueType::Bool), "rule: {rule}");
    }
}
