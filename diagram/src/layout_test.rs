use super::*;
use crate::sizing::AsciiSizing;
use crate::typeset::Kind;

fn lay(element: &Element) -> Typeset {
    layout(element, &AsciiSizing, Direction::Ltr).expect("layout")
}

fn rows_of(node: &Typeset) -> (&[Row], usize, &[usize]) {
    match node.kind() {
        Kind::VList { rows, above, baselines } => (rows.as_slice(), *above, baselines.as_slice()),
        other => panic!("expected vlist, got {other:?}"),
    }
}

// =============================================================================
// LEAVES AND SEQUENCES
// =============================================================================

#[test]
fn literal_width_is_text_plus_quotes() {
    for text in ["", "a", "while", "文字"] {
        let cs = lay(&Element::literal(text));
        let ci = lay(&Element::literal_ci(text));
        let w = crate::sizing::display_width(text);
        assert_eq!(cs.width(), w + 4, "{text}");
        assert_eq!(ci.width(), w + 5, "{text}");
    }
}

#[test]
fn rule_and_ellipsis_leaves() {
    assert_eq!(lay(&Element::rule("expr")).width(), 6);
    assert_eq!(lay(&Element::Ellipsis).kind(), &Kind::Ellipsis);
    assert!(lay(&Element::Skip).is_skip());
}

#[test]
fn sequence_collapses_small_cases() {
    assert!(lay(&Element::sequence(vec![])).is_skip());
    assert!(lay(&Element::sequence(vec![Element::Skip, Element::Skip])).is_skip());

    let single = lay(&Element::sequence(vec![Element::Skip, Element::literal("a")]));
    assert_eq!(single, lay(&Element::literal("a")));
}

#[test]
fn sequence_drops_skips() {
    let with_skip = Element::sequence(vec![Element::literal("a"), Element::Skip, Element::rule("b")]);
    let without = Element::sequence(vec![Element::literal("a"), Element::rule("b")]);
    assert_eq!(lay(&with_skip), lay(&without));
    assert_eq!(lay(&without).width(), 5 + 2 + 3);
}

#[test]
fn sequence_carries_direction() {
    let seq = Element::sequence(vec![Element::literal("a"), Element::literal("b")]);
    let node = layout(&seq, &AsciiSizing, Direction::Rtl).expect("layout");
    assert!(matches!(node.kind(), Kind::HList { direction: Direction::Rtl, .. }));
}

// =============================================================================
// ALTERNATIONS
// =============================================================================

#[test]
fn alternation_first_branch_is_flush() {
    let alt = Element::alternation(vec![Element::literal("x"), Element::literal("yyy"), Element::literal("z")])
        .expect("alternation");
    let node = lay(&alt);
    let (rows, above, baselines) = rows_of(&node);

    assert_eq!(above, 0);
    assert_eq!(baselines, &[0, 2, 4]);
    assert_eq!(node.width(), 7 + 6);
    assert_eq!(node.ascent(), 0);
    assert_eq!(node.height(), 5);
    let styles: Vec<_> = rows.iter().map(Row::entry).collect();
    assert_eq!(styles, vec![LineStyle::Flush, LineStyle::Below, LineStyle::Below]);
}

#[test]
fn optional_puts_bypass_above() {
    let node = lay(&Element::optional(Element::rule("x")));
    let (rows, above, baselines) = rows_of(&node);

    assert_eq!(above, 1);
    assert_eq!(baselines, &[0, 2]);
    assert_eq!(node.ascent(), 2);
    assert_eq!(node.descent(), 1);
    assert_eq!(rows[0].entry(), LineStyle::Above);
    assert!(rows[0].node().is_skip());
    assert_eq!(rows[1].entry(), LineStyle::Flush);
}

#[test]
fn leading_skip_with_more_branches_stays_flush() {
    let alt = Element::alternation(vec![Element::Skip, Element::literal("a"), Element::literal("b")])
        .expect("alternation");
    let (_, above, _) = rows_of(&lay(&alt));
    assert_eq!(above, 0);
}

#[test]
fn empty_alternation_is_rejected() {
    let err = layout(&Element::Alternation { branches: vec![] }, &AsciiSizing, Direction::Ltr)
        .expect_err("empty alternation");
    assert_eq!(err, LayoutError::Grammar(GrammarError::EmptyAlternation));
    assert_eq!(err.error_code(), "E_EMPTY_ALTERNATION");
}

// =============================================================================
// LOOPS
// =============================================================================

#[test]
fn loop_label_table() {
    assert_eq!(loop_label(1, 1).as_deref(), Some("(exactly once)"));
    assert_eq!(loop_label(0, 3).as_deref(), Some("(up to 3 times)"));
    assert_eq!(loop_label(2, 0).as_deref(), Some("(at least 2 times)"));
    assert_eq!(loop_label(4, 4).as_deref(), Some("(4 times)"));
    assert_eq!(loop_label(2, 5).as_deref(), Some("(2-5 times)"));
    assert_eq!(loop_label(0, 0), None);
    assert_eq!(loop_label(1, 3), None);
}

#[test]
fn zero_or_more_has_no_label() {
    let node = lay(&Element::zero_or_more(Element::literal("b")));
    let (rows, above, baselines) = rows_of(&node);

    assert_eq!(above, 0);
    assert_eq!(baselines, &[0, 2]);
    assert_eq!(node.width(), 5 + 6);
    assert!(rows[0].node().is_skip());
    assert_eq!(rows[0].entry(), LineStyle::Loop);
    assert_eq!(rows[0].flow(), Direction::Ltr);
    assert_eq!(rows[1].entry(), LineStyle::Return);
    assert_eq!(rows[1].flow(), Direction::Rtl);
    assert!(rows[1].label().is_none());
}

#[test]
fn bare_return_track_gets_an_arrow() {
    let node = lay(&Element::Loop {
        forward: Box::new(Element::literal("a")),
        backward: Box::new(Element::Skip),
        min: 0,
        max: 0,
    });
    let (rows, _, _) = rows_of(&node);
    assert_eq!(rows[1].node().kind(), &Kind::Arrow(Direction::Rtl));
}

#[test]
fn label_over_skip_return_keeps_height() {
    let node = lay(&Element::one_or_more(Element::literal("a")));
    let (rows, _, _) = rows_of(&node);
    assert!(rows[1].node().is_skip());
    assert_eq!(node.height(), 3);
    assert_eq!(node.width(), "(at least 1 times)".len() + 6);
}

#[test]
fn label_under_visible_return_adds_two_rows() {
    let repeat = Element::repeat(Element::Skip, Element::literal("b"), 0, 3).expect("loop");
    let node = lay(&repeat);
    assert_eq!(node.height(), 1 + 1 + 1 + 2);
    assert_eq!(node.width(), "(up to 3 times)".len() + 6);
}

#[test]
fn return_track_is_laid_out_reversed() {
    let back = Element::sequence(vec![Element::literal("b"), Element::literal("c")]);
    let node = lay(&Element::zero_or_more(back));
    let (rows, _, _) = rows_of(&node);
    assert!(matches!(rows[1].node().kind(), Kind::HList { direction: Direction::Rtl, .. }));
}

#[test]
fn loop_bounds_are_checked() {
    let bad = Element::Loop {
        forward: Box::new(Element::literal("a")),
        backward: Box::new(Element::Skip),
        min: 3,
        max: 2,
    };
    let err = layout(&bad, &AsciiSizing, Direction::Ltr).expect_err("bad loop");
    assert_eq!(err, LayoutError::Grammar(GrammarError::LoopBounds { min: 3, max: 2 }));
}

// =============================================================================
// WHOLE RULES
// =============================================================================

#[test]
fn sequence_then_loop_width() {
    let foo = Element::sequence(vec![Element::literal("a"), Element::zero_or_more(Element::literal("b"))]);
    let node = lay(&foo);
    assert_eq!(node.width(), 5 + 2 + (5 + 6));
    assert_eq!(node.ascent(), 0);
    assert_eq!(node.height(), 3);
}

#[test]
fn layout_is_idempotent() {
    let rule = Element::sequence(vec![
        Element::optional(Element::rule("sign")),
        Element::one_or_more(Element::rule("digit")),
        Element::repeat(Element::literal("x"), Element::literal(","), 2, 5).expect("loop"),
    ]);
    assert_eq!(lay(&rule), lay(&rule));
}
