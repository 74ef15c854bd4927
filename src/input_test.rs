use super::*;

const GRAMMAR: &str = r#"{
    "rules": [
        { "name": "Foo", "element": { "kind": "literal", "text": "a" } },
        { "name": "Bar", "element": { "kind": "rule", "name": "Foo" } },
        { "name": "Odd", "element": { "kind": "spiral" } },
        { "name": "Empty", "element": { "kind": "alternation", "branches": [] } }
    ]
}"#;

fn names(rules: &[JsonRule]) -> Vec<&str> {
    rules.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn parses_document_without_decoding_elements() {
    let grammar = parse_grammar(GRAMMAR).expect("grammar");
    assert_eq!(names(&grammar.rules), vec!["Foo", "Bar", "Odd", "Empty"]);
}

#[test]
fn rejects_malformed_document() {
    assert!(matches!(parse_grammar("{ \"rules\": 3 }"), Err(CliError::Json(_))));
    assert!(matches!(parse_grammar("not json"), Err(CliError::Json(_))));
}

#[test]
fn converts_each_rule_on_its_own() {
    let grammar = parse_grammar(GRAMMAR).expect("grammar");
    let [foo, bar, odd, empty] = grammar.rules.as_slice() else {
        panic!("expected four rules");
    };

    assert_eq!(foo.to_element(), Ok(Element::literal("a")));
    assert_eq!(bar.to_element(), Ok(Element::rule("Foo")));
    assert!(matches!(odd.to_element(), Err(GrammarError::Convert(_))));
    assert_eq!(empty.to_element(), Err(GrammarError::EmptyAlternation));
}

#[test]
fn selects_named_rules_in_document_order() {
    let grammar = parse_grammar(GRAMMAR).expect("grammar");
    let picked = select_rules(grammar.rules, &["Bar".to_owned(), "Foo".to_owned()]).expect("select");
    assert_eq!(names(&picked), vec!["Foo", "Bar"]);
}

#[test]
fn no_filter_keeps_everything() {
    let grammar = parse_grammar(GRAMMAR).expect("grammar");
    assert_eq!(select_rules(grammar.rules, &[]).expect("select").len(), 4);
}

#[test]
fn unknown_rule_filter_is_an_error() {
    let grammar = parse_grammar(GRAMMAR).expect("grammar");
    let err = select_rules(grammar.rules, &["Nope".to_owned()]).expect_err("unknown");
    assert!(matches!(err, CliError::UnknownRule(ref name) if name == "Nope"));
}
