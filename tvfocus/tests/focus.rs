use std::cell::RefCell;
use std::rc::Rc;

use tvfocus::element::InputKind;
use tvfocus::{
    AutoFocus, Direction, Element, Event, FocusDriver, FocusError, LayoutResult, Navigator, Rect,
    Reveal,
};

fn create_layout(elements: &[(&str, Rect)]) -> LayoutResult {
    let mut layout = LayoutResult::new();
    for (id, rect) in elements {
        layout.insert(id.to_string(), *rect);
    }
    layout
}

/// A main view with one explicit autofocus target and a modal on top.
fn modal_tree() -> (Element, LayoutResult) {
    let root = Element::box_().id("root").children([
        Element::box_().id("main").children([
            Element::button("Home").id("home"),
            Element::button("Play").id("play").autofocus(true),
        ]),
        Element::dialog().id("modal").children([
            Element::button("Ok").id("ok"),
            Element::button("Cancel").id("cancel"),
        ]),
    ]);

    let layout = create_layout(&[
        ("home", Rect::new(0.0, 0.0, 100.0, 50.0)),
        ("play", Rect::new(120.0, 0.0, 100.0, 50.0)),
        ("ok", Rect::new(300.0, 300.0, 100.0, 50.0)),
        ("cancel", Rect::new(420.0, 300.0, 100.0, 50.0)),
    ]);

    (root, layout)
}

fn ids(elements: Vec<&Element>) -> Vec<&str> {
    elements.into_iter().map(|el| el.id.as_str()).collect()
}

// ============================================================================
// Auto Focus
// ============================================================================

#[test]
fn test_auto_focus_prefers_explicit_target() {
    let (root, layout) = modal_tree();
    let mut nav = Navigator::new();

    assert_eq!(
        nav.auto_focus(&root, None, &layout, AutoFocus::default()),
        Some("play".to_string())
    );
    assert_eq!(nav.focused(), Some("play"));
}

#[test]
fn test_auto_focus_default_skips_noautofocus() {
    let root = Element::box_().id("root").children([
        Element::button("Skip").id("skip").tag("noautofocus"),
        Element::button("First").id("first"),
    ]);
    let layout = create_layout(&[
        ("skip", Rect::new(0.0, 0.0, 10.0, 10.0)),
        ("first", Rect::new(20.0, 0.0, 10.0, 10.0)),
    ]);

    let mut nav = Navigator::new();
    assert_eq!(
        nav.auto_focus(&root, None, &layout, AutoFocus::default()),
        Some("first".to_string())
    );
}

#[test]
fn test_auto_focus_without_default_is_noop() {
    let root = Element::box_()
        .id("root")
        .child(Element::button("Only").id("only"));
    let layout = create_layout(&[("only", Rect::new(0.0, 0.0, 10.0, 10.0))]);

    let mut nav = Navigator::new();
    let options = AutoFocus {
        prefer_explicit: true,
        allow_default: false,
    };
    assert_eq!(nav.auto_focus(&root, None, &layout, options), None);
    assert_eq!(nav.focused(), None);
}

struct Refuses(&'static str);

impl FocusDriver for Refuses {
    fn focus(&mut self, id: &str) -> Result<(), FocusError> {
        if id == self.0 {
            Err(FocusError::Rejected(id.to_string()))
        } else {
            Ok(())
        }
    }
}

#[test]
fn test_auto_focus_falls_back_when_explicit_target_refused() {
    let (root, layout) = modal_tree();
    let mut nav = Navigator::with_driver(Refuses("play"));

    assert_eq!(
        nav.auto_focus(&root, Some("main"), &layout, AutoFocus::default()),
        Some("home".to_string())
    );
    assert_eq!(nav.focused(), Some("home"));
}

#[test]
fn test_auto_focus_in_subtree() {
    let (root, layout) = modal_tree();
    let mut nav = Navigator::new();

    assert_eq!(
        nav.auto_focus(&root, Some("modal"), &layout, AutoFocus::default()),
        Some("ok".to_string())
    );
    assert_eq!(nav.auto_focus(&root, Some("missing"), &layout, AutoFocus::default()), None);
}

// ============================================================================
// Scopes
// ============================================================================

#[test]
fn test_modal_scope_confines_auto_focus() {
    let (root, layout) = modal_tree();
    let mut nav = Navigator::new();

    nav.push_scope("modal");
    assert_eq!(nav.scope(), Some("modal"));
    assert_eq!(
        nav.auto_focus(&root, None, &layout, AutoFocus::default()),
        Some("ok".to_string())
    );

    nav.pop_scope();
    assert_eq!(nav.scope(), None);
    assert_eq!(
        nav.auto_focus(&root, None, &layout, AutoFocus::default()),
        Some("play".to_string())
    );
}

#[test]
fn test_nested_scopes_pop_in_order() {
    let (root, _) = modal_tree();
    let mut nav = Navigator::new();

    nav.push_scope("main");
    nav.push_scope("modal");
    assert_eq!(nav.scope_depth(), 2);
    assert_eq!(nav.default_scope(&root).id, "modal");

    nav.pop_scope();
    assert_eq!(nav.default_scope(&root).id, "main");

    nav.pop_scope();
    assert_eq!(nav.default_scope(&root).id, "root");
}

#[test]
fn test_pop_empty_scope_stack_is_noop() {
    let mut nav = Navigator::new();
    nav.pop_scope();
    nav.pop_scope();
    assert_eq!(nav.scope_depth(), 0);
    assert_eq!(nav.scope(), None);
}

#[test]
fn test_stale_scope_falls_back_to_root() {
    let (root, _) = modal_tree();
    let mut nav = Navigator::new();

    nav.push_scope("closed-dialog");
    assert_eq!(nav.default_scope(&root).id, "root");
}

// ============================================================================
// Enumeration
// ============================================================================

#[test]
fn test_focusable_elements_in_tree_order() {
    let root = Element::box_().id("root").children([
        Element::button("One").id("one"),
        Element::box_()
            .id("group")
            .children([Element::link("Two").id("two"), Element::text("label").id("label")]),
        Element::button("Off").id("off").disabled(true),
        Element::input(InputKind::File).id("file"),
        Element::input(InputKind::Text).id("three").tag("noautofocus"),
        Element::box_().id("four").focusable(true),
    ]);
    let layout = create_layout(&[
        ("one", Rect::new(0.0, 0.0, 10.0, 10.0)),
        ("two", Rect::new(0.0, 20.0, 10.0, 10.0)),
        ("label", Rect::new(0.0, 40.0, 10.0, 10.0)),
        ("off", Rect::new(0.0, 60.0, 10.0, 10.0)),
        ("file", Rect::new(0.0, 80.0, 10.0, 10.0)),
        ("three", Rect::new(0.0, 100.0, 10.0, 10.0)),
        ("four", Rect::new(0.0, 120.0, 10.0, 10.0)),
    ]);
    let nav = Navigator::new();

    let all: Vec<_> = nav.focusable_elements(&root, None, &layout, None).collect();
    assert_eq!(ids(all), vec!["one", "two", "three", "four"]);

    let limited: Vec<_> = nav
        .focusable_elements(&root, None, &layout, None)
        .take(2)
        .collect();
    assert_eq!(ids(limited), vec!["one", "two"]);

    let excluded: Vec<_> = nav
        .focusable_elements(&root, None, &layout, Some("noautofocus"))
        .collect();
    assert_eq!(ids(excluded), vec!["one", "two", "four"]);

    let within: Vec<_> = nav
        .focusable_elements(&root, Some("group"), &layout, None)
        .collect();
    assert_eq!(ids(within), vec!["two"]);
}

#[test]
fn test_focusable_elements_follow_layout_changes() {
    let root = Element::box_()
        .id("root")
        .children([Element::button("A").id("a"), Element::button("B").id("b")]);
    let nav = Navigator::new();

    let layout = create_layout(&[
        ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
        ("b", Rect::new(20.0, 0.0, 10.0, 10.0)),
    ]);
    assert_eq!(nav.focusable_elements(&root, None, &layout, None).count(), 2);

    // "b" collapsed out of layout
    let layout = create_layout(&[("a", Rect::new(0.0, 0.0, 10.0, 10.0))]);
    assert_eq!(nav.focusable_elements(&root, None, &layout, None).count(), 1);
}

#[test]
fn test_is_currently_focusable() {
    let layout = create_layout(&[("x", Rect::new(0.0, 0.0, 10.0, 10.0))]);

    assert!(Navigator::is_currently_focusable(&Element::button("x").id("x"), &layout));
    assert!(!Navigator::is_currently_focusable(
        &Element::button("x").id("x").disabled(true),
        &layout
    ));
    assert!(!Navigator::is_currently_focusable(
        &Element::button("x").id("x").tab_stop(false),
        &layout
    ));
    assert!(!Navigator::is_currently_focusable(
        &Element::input(InputKind::Range).id("x"),
        &layout
    ));
    assert!(!Navigator::is_currently_focusable(&Element::button("y").id("y"), &layout));
}

// ============================================================================
// Ancestors
// ============================================================================

#[test]
fn test_focusable_ancestor() {
    let root = Element::box_().id("root").focusable(true).children([
        Element::box_()
            .id("card")
            .focusable(true)
            .child(Element::box_().id("poster").child(Element::text("title").id("title"))),
        Element::box_().id("plain").child(Element::text("note").id("note")),
    ]);

    let card = Navigator::focusable_ancestor(&root, "title").map(|el| el.id.as_str());
    assert_eq!(card, Some("card"));

    // Reaching the root without a match yields the element itself
    let note = Navigator::focusable_ancestor(&root, "note").map(|el| el.id.as_str());
    assert_eq!(note, Some("note"));

    assert!(Navigator::focusable_ancestor(&root, "missing").is_none());
}

// ============================================================================
// Linear Navigation
// ============================================================================

fn row() -> (Element, LayoutResult) {
    let root = Element::box_().id("root").children([
        Element::button("A").id("a"),
        Element::button("B").id("b").child(Element::text("inner").id("inner")),
        Element::button("C").id("c"),
    ]);
    let layout = create_layout(&[
        ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
        ("b", Rect::new(20.0, 0.0, 10.0, 10.0)),
        ("inner", Rect::new(21.0, 1.0, 5.0, 5.0)),
        ("c", Rect::new(40.0, 0.0, 10.0, 10.0)),
    ]);
    (root, layout)
}

#[test]
fn test_move_by_clamps_at_ends() {
    let (root, layout) = row();
    let mut nav = Navigator::new();
    nav.focus("b");

    assert_eq!(nav.move_by(1, &root, None, &layout), Some("c".to_string()));
    assert_eq!(nav.move_by(1, &root, None, &layout), None);
    assert_eq!(nav.focused(), Some("c"));
    assert_eq!(nav.move_by(-5, &root, None, &layout), Some("a".to_string()));
}

#[test]
fn test_move_by_from_nested_element() {
    let (root, layout) = row();
    let mut nav = Navigator::new();
    nav.focus("inner");

    assert_eq!(nav.move_by(-1, &root, None, &layout), Some("a".to_string()));
}

#[test]
fn test_move_by_without_focus() {
    let (root, layout) = row();
    let mut nav = Navigator::new();
    assert_eq!(nav.move_by(1, &root, None, &layout), None);
}

#[test]
fn test_focus_first_and_last() {
    let (root, layout) = row();
    let mut nav = Navigator::new();

    assert_eq!(nav.focus_first(&root, None, &layout), Some("a".to_string()));
    assert_eq!(nav.focus_last(&root, None, &layout), Some("c".to_string()));
    assert_eq!(nav.focused(), Some("c"));
}

// ============================================================================
// Focus State
// ============================================================================

#[test]
fn test_focus_and_blur() {
    let mut nav = Navigator::new();
    assert!(!nav.blur());

    assert!(nav.focus("a"));
    assert_eq!(nav.focused(), Some("a"));

    assert!(nav.blur());
    assert_eq!(nav.focused(), None);
}

#[test]
fn test_focus_from_click() {
    let root = Element::box_().id("root").children([
        Element::button("Play").id("play").child(Element::text("icon").id("icon")),
        Element::text("caption").id("caption"),
    ]);
    let mut nav = Navigator::new();

    assert_eq!(nav.focus_from_click(&root, "icon"), Some("play".to_string()));
    // Already focused
    assert_eq!(nav.focus_from_click(&root, "play"), None);
    // Nothing focusable around the target
    assert_eq!(nav.focus_from_click(&root, "caption"), None);
    assert_eq!(nav.focused(), Some("play"));
}

#[derive(Default)]
struct Recorder {
    revealed: Vec<String>,
}

impl Reveal for Recorder {
    fn reveal(&mut self, id: &str) -> bool {
        self.revealed.push(id.to_string());
        true
    }
}

#[test]
fn test_reveal_targets_see_every_focus_change() {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let mut nav = Navigator::new();
    nav.add_revealer(recorder.clone());

    nav.focus("a");
    nav.focus("a");
    nav.focus("b");

    assert_eq!(recorder.borrow().revealed, vec!["a", "b"]);
}

#[test]
fn test_busy_reveal_target_is_skipped() {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let mut nav = Navigator::new();
    nav.add_revealer(recorder.clone());

    {
        let _busy = recorder.borrow_mut();
        assert!(nav.focus("a"));
    }
    assert!(recorder.borrow().revealed.is_empty());
    assert_eq!(nav.focused(), Some("a"));
}

// ============================================================================
// Event Processing
// ============================================================================

#[test]
fn test_process_events_reports_focus_changes() {
    let (root, layout) = row();
    let mut nav = Navigator::new();

    let changes = nav.process_events(
        &[
            Event::Navigate(Direction::Right),
            Event::Navigate(Direction::Right),
            Event::Navigate(Direction::Up),
        ],
        &root,
        &layout,
    );

    // First move lands on the first element; the second moves on; Up finds nothing
    assert_eq!(
        changes,
        vec![
            Event::Focus {
                target: "a".to_string()
            },
            Event::Blur {
                target: "a".to_string(),
                new_target: Some("b".to_string()),
            },
            Event::Focus {
                target: "b".to_string()
            },
        ]
    );
}
