use super::*;

#[test]
fn ascii_sizing_counts_printable_columns() {
    assert_eq!(AsciiSizing.measure("expr"), Extent::new(4, 0, 1));
    assert_eq!(AsciiSizing.measure(""), Extent::new(0, 0, 1));
}

#[test]
fn control_characters_take_no_columns() {
    assert_eq!(display_width("a\tb\n"), 2);
    assert_eq!(char_columns('\u{7}'), 0);
}

#[test]
fn wide_characters_take_two_columns() {
    assert_eq!(display_width("文字"), 4);
    assert_eq!(char_columns('x'), 1);
}

#[test]
fn extent_helpers() {
    let e = Extent::new(3, 1, 2);
    assert_eq!(e.height(), 3);
    assert_eq!(e.widen(4), Extent::new(7, 1, 2));
}
