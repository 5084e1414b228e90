//! End-to-end tests for the reader
//! Demonstrates: Scanner → Parser → AtomTree → Printer working together
use atomreader::{parse, AtomKind, AtomTree, Form, ParserConfig, SExprParser, Severity};

fn sym(name: &str) -> Form {
    Form::Symbol(name.to_string())
}

#[test]
fn test_reader_e2e_simple_list() {
    let tree = parse("(+ 1 2)");
    assert_eq!(
        tree.to_forms(),
        vec![Form::List(vec![sym("+"), Form::Int(1), Form::Int(2)])]
    );
    assert_eq!(tree.to_string(), "(+ 1 2)");
}

#[test]
fn test_reader_e2e_nested_lists() {
    let tree = parse("(a (b c) d)");
    assert_eq!(
        tree.to_forms(),
        vec![Form::List(vec![
            sym("a"),
            Form::List(vec![sym("b"), sym("c")]),
            sym("d"),
        ])]
    );
}

#[test]
fn test_reader_e2e_multiple_top_level_forms() {
    let source = r#"
        (define x 10)
        (define name "atom")
        'x
        -3.5e2
    "#;

    let tree = parse(source);
    assert_eq!(
        tree.to_forms(),
        vec![
            Form::List(vec![sym("define"), sym("x"), Form::Int(10)]),
            Form::List(vec![
                sym("define"),
                sym("name"),
                Form::String("atom".to_string())
            ]),
            Form::Quote,
            sym("x"),
            Form::Float(-350.0),
        ]
    );
    assert_eq!(
        tree.to_string(),
        "(define x 10) (define name \"atom\") 'x -350.0"
    );
}

#[test]
fn test_reader_e2e_comments_everywhere() {
    let source = r#"
; leading comment
(list 1 ; trailing comment
      2) ; after the form
"#;
    assert!(parse(source).structurally_eq(&parse("(list 1 2)")));
}

#[test]
fn test_reader_e2e_quote_before_list() {
    let tree = parse("'(1 2)");
    let kinds: Vec<_> = tree.top_level().map(|n| n.kind().clone()).collect();
    assert_eq!(kinds, vec![AtomKind::Quote, AtomKind::Branch]);
    assert_eq!(tree.to_string(), "'(1 2)");
}

#[test]
fn test_reader_e2e_string_escapes() {
    let tree = parse(r#"(say "a \"quoted\" word")"#);
    assert_eq!(
        tree.to_forms(),
        vec![Form::List(vec![
            sym("say"),
            Form::String("a \"quoted\" word".to_string())
        ])]
    );
    // Printing escapes the embedded quotes again
    assert!(parse(&tree.to_string()).structurally_eq(&tree));
}

#[test]
fn test_reader_e2e_malformed_tokens_become_errors() {
    let tree = parse("(f 12a 1.2.3 ok)");
    let errors: Vec<_> = tree.errors().into_iter().map(|(_, m)| m.to_string()).collect();
    assert_eq!(errors, vec!["Can't parse: 12a", "Can't parse: 1.2.3"]);
    assert_eq!(
        tree.to_string(),
        "(f #<error: Can't parse: 12a> #<error: Can't parse: 1.2.3> ok)"
    );
}

#[test]
fn test_reader_e2e_quote_inside_token_is_an_error() {
    let tree = parse("don't");
    assert_eq!(
        tree.to_forms(),
        vec![Form::Error("Can't parse: don't".to_string())]
    );
}

#[test]
fn test_reader_e2e_unterminated_default_policy() {
    let mut parser = SExprParser::new("(a (b \"never closed");
    let tree = parser.parse();
    assert!(!tree.has_errors());
    assert!(parser.diagnostics().is_empty());
    assert_eq!(tree.to_string(), "(a (b))");
}

#[test]
fn test_reader_e2e_unterminated_strict_policy() {
    let config = ParserConfig::default().with_report_unterminated(true);
    let mut parser = SExprParser::with_config("(a (b", config);
    let tree = parser.parse();

    assert_eq!(tree.to_string(), "(a (b #<error: Unterminated list>))");
    let diagnostics = parser.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity(), Severity::Error);
}

#[test]
fn test_reader_e2e_empty_inputs() {
    for source in ["", "   \n\t", "; only a comment", ";"] {
        let tree = parse(source);
        assert_eq!(tree.len(), 1, "source {:?}", source);
        assert_eq!(tree.to_string(), "nil");
    }
}

#[test]
fn test_reader_e2e_json_output() {
    let json = parse("(f 'x)").to_json().unwrap();
    assert_eq!(
        json,
        r#"[{"kind":"list","value":[{"kind":"symbol","value":"f"},{"kind":"quote"},{"kind":"symbol","value":"x"}]}]"#
    );
}

#[test]
fn test_reader_e2e_arena_holds_one_sentinel_per_sequence() {
    // Two top-level forms, one of them a list with two items:
    // (a b) c  →  Branch, a, b, Nil(list), c, Nil(top)
    let tree: AtomTree = parse("(a b) c");
    assert_eq!(tree.len(), 6);
}
