//! Unit tests for the parser module.
//!
//! This module contains tests for parsing language constructs including:
//! - Operator precedence and associativity
//! - Assignment targets
//! - Calls, attribute access, `this` and `super`
//! - Control flow, dangling else and `for` desugaring
//! - Function and class declarations
//! - Syntax errors

use crate::{
    ast::{
        ast::{Declaration, Expr, Program, Stmt},
        expressions::{GetAttrExpr, SetAttrExpr},
        statements::{BlockStmt, ClassDecl, MethodDecl, VarDecl},
    },
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

use super::{
    expr::parse_logical_expr,
    lookups::{create_token_lookups, BindingPower},
    parser::{parse, Parser, MAX_NESTING_DEPTH},
};

fn parse_str(source: &str) -> Program {
    let tokens = tokenize(source.to_string(), Some("test.lox".to_string())).unwrap();
    parse(tokens).unwrap()
}

fn parse_err(source: &str) -> Error {
    let tokens = tokenize(source.to_string(), Some("test.lox".to_string())).unwrap();
    parse(tokens).unwrap_err()
}

/// Parses `source;` and returns the expression of that statement.
fn parse_expr_str(source: &str) -> Expr {
    let program = parse_str(&format!("{};", source));
    match program.declarations.into_iter().next() {
        Some(Declaration::Stmt(Stmt::Expression(stmt))) => stmt.expression,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn expr_tree(source: &str) -> String {
    parse_expr_str(source).to_string()
}

#[test]
fn test_parse_empty_program() {
    assert!(parse_str("").declarations.is_empty());
    assert!(parse(vec![]).unwrap().declarations.is_empty());
}

#[test]
fn test_parse_literals() {
    assert_eq!(parse_expr_str("42"), Expr::Number(42.0));
    assert_eq!(parse_expr_str("3.5"), Expr::Number(3.5));
    assert_eq!(parse_expr_str("\"text\""), Expr::String("text".to_string()));
    assert_eq!(parse_expr_str("true"), Expr::Bool(true));
    assert_eq!(parse_expr_str("false"), Expr::Bool(false));
    assert_eq!(parse_expr_str("nil"), Expr::Nil);
    assert_eq!(parse_expr_str("this"), Expr::This);
    assert_eq!(parse_expr_str("name"), Expr::Var("name".to_string()));
}

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    assert_eq!(expr_tree("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(expr_tree("1 * 2 + 3"), "(+ (* 1 2) 3)");
    assert_eq!(expr_tree("1 - 2 / 4 * 3"), "(- 1 (* (/ 2 4) 3))");
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(expr_tree("1 - 2 - 3"), "(- (- 1 2) 3)");
    assert_eq!(expr_tree("8 / 4 / 2"), "(/ (/ 8 4) 2)");
    assert_eq!(expr_tree("a == b == c"), "(== (== a b) c)");
    assert_eq!(expr_tree("a < b < c"), "(< (< a b) c)");
}

#[test]
fn test_comparison_and_equality_tiers() {
    assert_eq!(expr_tree("a < b == c >= d"), "(== (< a b) (>= c d))");
    assert_eq!(expr_tree("a + 1 > b != c <= 2"), "(!= (> (+ a 1) b) (<= c 2))");
}

#[test]
fn test_logical_operators() {
    assert_eq!(expr_tree("a or b and c"), "(or a (and b c))");
    assert_eq!(expr_tree("a and b or c and d"), "(or (and a b) (and c d))");
    assert_eq!(expr_tree("a or b or c"), "(or (or a b) c)");
    assert_eq!(expr_tree("a == 1 and b"), "(and (== a 1) b)");
    assert!(matches!(parse_expr_str("a and b"), Expr::And(_)));
    assert!(matches!(parse_expr_str("a or b"), Expr::Or(_)));
}

#[test]
fn test_unary_operators_stack() {
    assert_eq!(expr_tree("!!true"), "(! (! true))");
    assert_eq!(expr_tree("--1"), "(- (- 1))");
    assert_eq!(expr_tree("-a * b"), "(* (- a) b)");
    assert_eq!(expr_tree("!a == b"), "(== (! a) b)");
    assert_eq!(expr_tree("-a.b()"), "(- (call (. a b)))");
}

#[test]
fn test_grouping_is_transparent() {
    assert_eq!(expr_tree("(1 + 2) * 3"), "(* (+ 1 2) 3)");
    assert_eq!(parse_expr_str("((a))"), Expr::Var("a".to_string()));
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(expr_tree("a = b = c"), "(= a (= b c))");
    assert_eq!(expr_tree("a = b or c"), "(= a (or b c))");
    assert_eq!(expr_tree("a = 1 + 2"), "(= a (+ 1 2))");
}

#[test]
fn test_assignment_targets() {
    assert!(matches!(parse_expr_str("a = 2"), Expr::Assign(assign) if assign.target == "a"));

    match parse_expr_str("obj.field = 2") {
        Expr::SetAttr(SetAttrExpr { object, name, value }) => {
            assert_eq!(*object, Expr::Var("obj".to_string()));
            assert_eq!(name, "field");
            assert_eq!(*value, Expr::Number(2.0));
        }
        other => panic!("expected SetAttr, got {:?}", other),
    }

    assert_eq!(expr_tree("a.b.c = d"), "(= (. (. a b) c) d)");
    assert_eq!(expr_tree("f().x = 1"), "(= (. (call f) x) 1)");
    assert_eq!(expr_tree("this.x = 1"), "(= (. this x) 1)");
    assert_eq!(expr_tree("(a).b = 1"), "(= (. a b) 1)");
}

#[test]
fn test_invalid_assignment_targets() {
    for source in ["1 = 2;", "f() = 2;", "a + b = c;", "-a = 1;", "(a) = 1;", "a or b = c;", "this = 1;", "super.x = 1;"] {
        let error = parse_err(source);

        assert_eq!(error.get_kind(), ErrorKind::SyntaxError, "{}", source);
        assert_eq!(error.get_error_name(), "InvalidAssignmentTarget", "{}", source);
    }
}

#[test]
fn test_invalid_assignment_target_details() {
    let error = parse_err("f() = 2;");

    assert_eq!(error.get_position().0, 4);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::InvalidAssignmentTarget { target: "(call f)".to_string() }
    );
}

#[test]
fn test_calls_and_attributes_chain_left() {
    assert_eq!(expr_tree("a.b.c()"), "(call (. (. a b) c))");
    assert_eq!(expr_tree("f(1, 2)(3)"), "(call (call f 1 2) 3)");
    assert_eq!(expr_tree("f()"), "(call f)");
    assert_eq!(expr_tree("a.b(c).d"), "(. (call (. a b) c) d)");
    assert_eq!(expr_tree("f(a = 1, b or c)"), "(call f (= a 1) (or b c))");

    match parse_expr_str("a.b") {
        Expr::GetAttr(GetAttrExpr { object, name }) => {
            assert_eq!(*object, Expr::Var("a".to_string()));
            assert_eq!(name, "b");
        }
        other => panic!("expected GetAttr, got {:?}", other),
    }
}

#[test]
fn test_super_attribute() {
    assert_eq!(expr_tree("super.method(1)"), "(call (. super method) 1)");
    assert!(matches!(parse_expr_str("super.x"), Expr::SuperGetAttr(get) if get.name == "x"));
}

#[test]
fn test_bare_super_is_rejected() {
    let error = parse_err("super;");

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UnexpectedToken { kind: TokenKind::Semicolon, expected, .. } if expected == &vec![TokenKind::Dot]
    ));
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_str("var x = 42; var y;");

    assert_eq!(
        program.declarations,
        vec![
            Declaration::Var(VarDecl {
                name: "x".to_string(),
                initializer: Some(Expr::Number(42.0)),
            }),
            Declaration::Var(VarDecl {
                name: "y".to_string(),
                initializer: None,
            }),
        ]
    );
}

#[test]
fn test_reserved_word_as_variable_name() {
    let error = parse_err("var class = 1;");

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert!(error.get_tip().to_string().contains("reserved word"));
}

#[test]
fn test_parse_print_and_block() {
    let program = parse_str("{ var a = 1; { print a; } }");

    assert_eq!(program.to_string(), "(block (var a 1) (block (print a)))");
}

#[test]
fn test_if_without_else_gets_empty_block() {
    let program = parse_str("if (true) print 1;");

    match &program.declarations[0] {
        Declaration::Stmt(Stmt::If(stmt)) => {
            assert_eq!(*stmt.else_branch, Stmt::Block(BlockStmt::default()));
        }
        other => panic!("expected if statement, got {:?}", other),
    }
    assert_eq!(program.to_string(), "(if true (print 1) (block))");
}

#[test]
fn test_if_else() {
    let program = parse_str("if (a > 0) print \"positive\"; else { print \"other\"; }");

    assert_eq!(
        program.to_string(),
        "(if (> a 0) (print \"positive\") (block (print \"other\")))"
    );
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    let program = parse_str("if (a) if (b) print 1; else print 2;");

    assert_eq!(program.to_string(), "(if a (if b (print 1) (print 2)) (block))");
}

#[test]
fn test_parse_while_loop() {
    let program = parse_str("while (x < 10) x = x + 1;");

    assert_eq!(program.to_string(), "(while (< x 10) (expr (= x (+ x 1))))");
}

#[test]
fn test_for_loop_matches_hand_written_while() {
    let desugared = parse_str("for (var i = 0; i < 3; i = i + 1) print i;");
    let manual = parse_str("{ var i = 0; while (i < 3) { print i; i = i + 1; } }");

    assert_eq!(desugared, manual);
    assert_eq!(
        desugared.to_string(),
        "(block (var i 0) (while (< i 3) (block (print i) (expr (= i (+ i 1))))))"
    );
}

#[test]
fn test_for_loop_without_clauses() {
    let program = parse_str("for (;;) print 1;");

    assert_eq!(program.to_string(), "(block (while true (block (print 1))))");
}

#[test]
fn test_for_loop_with_expression_initializer() {
    let program = parse_str("for (i = 0; i < 3;) { print i; }");

    assert_eq!(
        program.to_string(),
        "(block (expr (= i 0)) (while (< i 3) (block (block (print i)))))"
    );
}

#[test]
fn test_for_loop_requires_parentheses() {
    let error = parse_err("for var i = 0; i < 3; i = i + 1) print i;");

    assert_eq!(error.get_kind(), ErrorKind::SyntaxError);
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_str("fun add(a, b) { return a + b; }");

    assert_eq!(program.to_string(), "(fun add (a b) (block (return (+ a b))))");
}

#[test]
fn test_bare_return() {
    let program = parse_str("fun f() { return; }");

    assert_eq!(program.to_string(), "(fun f () (block (return)))");
}

#[test]
fn test_duplicate_parameters() {
    let error = parse_err("fun f(a, b, a) {}");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::DuplicateParameter { parameter: "a".to_string() }
    );
    assert_eq!(error.get_position().0, 12);
}

#[test]
fn test_trailing_comma_in_parameters() {
    let error = parse_err("fun f(a,) {}");

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_class_with_superclass() {
    let program = parse_str("class B < A { m() {} }");

    assert_eq!(
        program.declarations,
        vec![Declaration::Class(ClassDecl {
            name: "B".to_string(),
            superclass: Some("A".to_string()),
            methods: vec![MethodDecl {
                name: "m".to_string(),
                params: vec![],
                body: BlockStmt::default(),
            }],
        })]
    );
}

#[test]
fn test_parse_class_methods() {
    let program = parse_str("class Point { init(x, y) { this.x = x; } sum() { return this.x + this.y; } }");

    assert_eq!(
        program.to_string(),
        "(class Point (method init (x y) (block (expr (= (. this x) x)))) (method sum () (block (return (+ (. this x) (. this y))))))"
    );
}

#[test]
fn test_method_with_fun_keyword_is_rejected() {
    let error = parse_err("class A { fun m() {} }");

    assert_eq!(error.get_kind(), ErrorKind::SyntaxError);
}

#[test]
fn test_unclosed_class_body() {
    let error = parse_err("class A { m() {}");

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UnexpectedToken { kind: TokenKind::EOF, expected, .. } if expected == &vec![TokenKind::CloseCurly]
    ));
}

#[test]
fn test_declaration_is_not_a_statement() {
    let error = parse_err("if (x) var y = 1;");

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::ExpectedExpression { kind: TokenKind::Var, .. }
    ));
}

#[test]
fn test_missing_semicolon() {
    let error = parse_err("print 1");

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UnexpectedToken { kind: TokenKind::EOF, expected, .. } if expected == &vec![TokenKind::Semicolon]
    ));
    assert_eq!(error.get_position().0, 7);
}

#[test]
fn test_unclosed_block() {
    let error = parse_err("{ print 1;");

    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_trailing_comma_in_arguments() {
    let error = parse_err("f(1,);");

    assert_eq!(error.get_error_name(), "ExpectedExpression");
}

#[test]
fn test_adjacent_operands() {
    let error = parse_err("print 1 2;");

    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_logical_handler_rejects_other_operators() {
    let tokens = tokenize("+ b".to_string(), None).unwrap();
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let error = parse_logical_expr(&mut parser, Expr::Var("a".to_string()), BindingPower::LogicalOr)
        .unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            kind: TokenKind::Plus,
            token: "+".to_string(),
            expected: vec![TokenKind::And, TokenKind::Or],
        }
    );
}

#[test]
fn test_deeply_nested_grouping_is_rejected() {
    let source = format!("print {}1{};", "(".repeat(10_000), ")".repeat(10_000));
    let error = parse_err(&source);

    assert_eq!(error.get_kind(), ErrorKind::SyntaxError);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::NestingTooDeep {
            limit: MAX_NESTING_DEPTH
        }
    );
}

#[test]
fn test_deeply_nested_statements_are_rejected() {
    let blocks = format!("{}{}", "{".repeat(10_000), "}".repeat(10_000));
    assert_eq!(parse_err(&blocks).get_error_name(), "NestingTooDeep");

    let ifs = format!("{}print 1;", "if (a) ".repeat(10_000));
    assert_eq!(parse_err(&ifs).get_error_name(), "NestingTooDeep");

    let functions = format!("{}{}", "fun f() { ".repeat(10_000), "}".repeat(10_000));
    assert_eq!(parse_err(&functions).get_error_name(), "NestingTooDeep");

    let negations = format!("{}1;", "-".repeat(10_000));
    assert_eq!(parse_err(&negations).get_error_name(), "NestingTooDeep");
}

#[test]
fn test_moderate_nesting_still_parses() {
    let depth = MAX_NESTING_DEPTH / 2;
    let source = format!("print {}1{};", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(parse_str(&source).to_string(), "(print 1)");

    let blocks = format!("{}{}", "{".repeat(depth / 2), "}".repeat(depth / 2));
    assert!(matches!(
        parse_str(&blocks).declarations[0],
        Declaration::Stmt(Stmt::Block(_))
    ));
}
