use dom::{Viewport, Window};
use style_singleton::{StyleSingleton, StyleSink, Submission};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn style_texts(window: &Window) -> Vec<String> {
    let doc = window.document();
    doc.elements_by_tag("style")
        .into_iter()
        .map(|style| doc.text_content(style))
        .collect()
}

#[test]
fn only_the_first_stylesheet_reaches_the_document() {
    init_logging();
    let window = Window::new(Viewport::new(1024, 15));
    let sink = StyleSingleton::new(window.clone());

    assert_eq!(sink.submit(".a { right: 1px; }"), Submission::Applied);
    assert_eq!(sink.submit(".b { right: 2px; }"), Submission::Superseded);
    assert_eq!(sink.submit(".c { right: 3px; }"), Submission::Superseded);

    assert_eq!(style_texts(&window), [".a { right: 1px; }"]);
    assert_eq!(sink.superseded(), 2);
    let sheets = window.document().author_stylesheets();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].rules[0].prelude, ".a");
}

#[test]
fn injected_element_lives_in_head_with_nonce() {
    init_logging();
    let window = Window::new(Viewport::new(1024, 15));
    let sink = StyleSingleton::new(window.clone()).with_nonce("r4nd0m");
    sink.submit("body { overflow: hidden; }");

    let element = sink.element().unwrap();
    let doc = window.document();
    assert_eq!(doc.parent(element), Some(doc.head()));
    assert_eq!(doc.attribute(element, "nonce"), Some("r4nd0m"));
    assert_eq!(doc.attribute(element, "type"), Some("text/css"));
    assert!(css_syntax::validate_stylesheet(&doc.text_content(element)).is_ok());
}

#[test]
fn reset_clears_document_and_reopens_the_sink() {
    init_logging();
    let window = Window::new(Viewport::new(1024, 15));
    let sink = StyleSingleton::new(window.clone());
    sink.submit(".a { right: 1px; }");
    sink.reset();

    assert!(style_texts(&window).is_empty());
    assert_eq!(sink.applied(), None);
    assert_eq!(sink.superseded(), 0);

    assert_eq!(sink.submit(".b { right: 2px; }"), Submission::Applied);
    assert_eq!(style_texts(&window), [".b { right: 2px; }"]);
}

#[test]
fn failed_render_leaves_the_sink_open() {
    init_logging();
    let window = Window::new(Viewport::new(1024, 15));
    let head = window.document().head();
    window.document_mut().remove_node(head);
    let sink = StyleSingleton::new(window.clone());

    assert_eq!(sink.submit(".a { right: 1px; }"), Submission::Failed);
    assert_eq!(sink.applied(), None);
    assert_eq!(sink.element(), None);
    assert!(style_texts(&window).is_empty());
    assert_eq!(sink.submit(".b { right: 2px; }"), Submission::Failed);
    assert_eq!(sink.superseded(), 0);
}
