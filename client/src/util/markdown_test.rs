use super::*;

#[test]
fn renders_emphasis_and_lists() {
    let html = to_html("**Hot** match\n\n- one\n- two");
    assert!(html.contains("<strong>Hot</strong>"));
    assert!(html.contains("<li>one</li>"));
}

#[test]
fn strikethrough_is_enabled() {
    assert!(to_html("~~old~~").contains("<del>old</del>"));
}

#[test]
fn empty_source_renders_nothing() {
    assert_eq!(to_html(""), "");
}
