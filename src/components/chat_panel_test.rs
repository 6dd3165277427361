use super::*;

// =============================================================
// render_markdown_html
// =============================================================

#[test]
fn markdown_renders_emphasis_and_lists() {
    let html = render_markdown_html("**bold**\n\n- one\n- two");
    assert!(html.contains("<strong>bold</strong>"));
    assert!(html.contains("<li>one</li>"));
}

#[test]
fn raw_html_is_dropped() {
    let html = render_markdown_html("hi <script>alert(1)</script> there\n\n<div>block</div>");
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<div>"));
    assert!(html.contains("hi"));
}

#[test]
fn tables_are_enabled() {
    let html = render_markdown_html("| a | b |\n|---|---|\n| 1 | 2 |");
    assert!(html.contains("<table>"));
}
