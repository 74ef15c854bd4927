use super::*;

// =============================================================================
// END TO END
// =============================================================================

fn draw(element: &Element) -> Vec<String> {
    diagram(element, &RenderConfig::default(), &AsciiSizing).expect("diagram")
}

#[test]
fn number_rule() {
    // number = [ "-" ], digit, { digit } ;
    let number = Element::sequence(vec![
        Element::optional(Element::literal("-")),
        Element::rule("digit"),
        Element::zero_or_more(Element::rule("digit")),
    ]);
    assert_eq!(
        draw(&number),
        vec![
            "    ^---------v",
            "    |         |",
            "||----- \"-\" ----- digit -->-----------v--||",
            "                          |           |",
            "                          ^-- digit --<",
        ]
    );
}

#[test]
fn geometry_matches_output_size() {
    let element = Element::sequence(vec![
        Element::alternation(vec![Element::rule("a"), Element::rule("bb"), Element::Skip]).expect("alt"),
        Element::repeat(Element::literal_ci("x"), Element::literal(","), 2, 4).expect("loop"),
    ]);
    let node = layout(&element, &AsciiSizing, Direction::Ltr).expect("layout");
    let lines = render(&node, Direction::Ltr).expect("render");

    assert_eq!(lines.len(), node.height());
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or_default();
    assert_eq!(widest, node.width() + 8);
}

#[test]
fn json_grammar_round_trip() {
    let json = r#"{ "name": "Foo", "element": {
        "kind": "sequence",
        "items": [ { "kind": "literal", "text": "a" },
                   { "kind": "loop", "forward": { "kind": "skip" }, "backward": { "kind": "literal", "text": "b" } } ]
    } }"#;
    let rule: Rule = serde_json::from_str(json).expect("rule");
    let mut out = Vec::new();
    let summary = write_rules(&mut out, [&rule], &RenderConfig::default(), &AsciiSizing, None).expect("write");
    assert_eq!(summary.rendered, 1);
    assert!(String::from_utf8(out).expect("utf8").starts_with("Foo:\n    ||-- \"a\" -->"));
}
