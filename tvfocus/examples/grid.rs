//! Drives a navigator and a horizontal poster rail with a scripted remote.
//!
//! Run with `cargo run --example grid`; decisions are logged to `grid.log`.

use std::cell::RefCell;
use std::fs::File;
use std::rc::Rc;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use simplelog::{Config, LevelFilter, WriteLogger};
use tvfocus::{
    translate, Element, FocusContainer, HeadlessSurface, LayoutResult, Navigator,
    PlatformProfile, Rect, ScrollResponse, ScrollSurface, Scroller, ScrollerOptions, Size,
};

const POSTERS: usize = 12;
const POSTER_WIDTH: f32 = 12.0;
const POSTER_GAP: f32 = 2.0;
const RAIL_Y: f32 = 6.0;

fn poster_id(index: usize) -> String {
    format!("poster-{index}")
}

fn ui() -> Element {
    Element::box_().id("root").children([
        Element::box_().id("menu").container(FocusContainer::X).children([
            Element::button("Home").id("home"),
            Element::button("Movies").id("movies").autofocus(true),
            Element::button("Shows").id("shows"),
        ]),
        Element::box_()
            .id("rail")
            .container(FocusContainer::X)
            .children((0..POSTERS).map(|i| {
                Element::box_()
                    .id(poster_id(i))
                    .focusable(true)
                    .child(Element::text(format!("Poster {i}")))
            })),
    ])
}

fn static_layout() -> LayoutResult {
    let mut layout = LayoutResult::new();
    layout.insert("root".into(), Rect::new(0.0, 0.0, 60.0, 20.0));
    layout.insert("menu".into(), Rect::new(0.0, 0.0, 60.0, 3.0));
    layout.insert("home".into(), Rect::new(2.0, 1.0, 10.0, 1.0));
    layout.insert("movies".into(), Rect::new(14.0, 1.0, 10.0, 1.0));
    layout.insert("shows".into(), Rect::new(26.0, 1.0, 10.0, 1.0));
    layout.insert("rail".into(), Rect::new(0.0, RAIL_Y, 60.0, 8.0));
    layout
}

fn rail_surface() -> HeadlessSurface {
    let content = POSTERS as f32 * (POSTER_WIDTH + POSTER_GAP);
    let mut surface = HeadlessSurface::new(Rect::new(0.0, RAIL_Y, 60.0, 8.0), Size::new(content, 8.0));
    for i in 0..POSTERS {
        let x = i as f32 * (POSTER_WIDTH + POSTER_GAP);
        surface.set_item(poster_id(i), Rect::new(x, 0.0, POSTER_WIDTH, 8.0));
    }
    surface
}

/// Static layout plus the rail's posters at their current scroll offset.
fn snapshot(layout: &LayoutResult, rail: &HeadlessSurface) -> LayoutResult {
    let mut geometry = layout.clone();
    for i in 0..POSTERS {
        let id = poster_id(i);
        if let Some(rect) = rail.item_rect(&id) {
            // Posters scrolled out of the frame are not rendered
            let frame = rail.viewport_rect();
            if rect.right() > frame.left() && rect.left() < frame.right() {
                geometry.insert(id, rect);
            }
        }
    }
    geometry
}

fn key(code: KeyCode) -> CrosstermEvent {
    CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermEvent {
    CrosstermEvent::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn script() -> Vec<Vec<CrosstermEvent>> {
    let mut turns = vec![vec![key(KeyCode::Down)]];
    turns.extend((0..6).map(|_| vec![key(KeyCode::Right)]));
    turns.push(vec![key(KeyCode::Up)]);
    turns.push(vec![mouse(MouseEventKind::ScrollDown, 30, 9)]);
    turns.push(vec![
        mouse(MouseEventKind::Down(MouseButton::Left), 40, 9),
        mouse(MouseEventKind::Drag(MouseButton::Left), 30, 9),
        mouse(MouseEventKind::Drag(MouseButton::Left), 10, 9),
        mouse(MouseEventKind::Up(MouseButton::Left), 10, 9),
    ]);
    turns.push(vec![
        mouse(MouseEventKind::Down(MouseButton::Left), 20, 9),
        mouse(MouseEventKind::Up(MouseButton::Left), 20, 9),
    ]);
    turns
}

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("grid.log")?;
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let root = ui();
    let layout = static_layout();

    let options = ScrollerOptions::new()
        .horizontal(true)
        .speed(270)
        .scroll_by(POSTER_WIDTH + POSTER_GAP)
        .require_animation(true);
    let profile = PlatformProfile::new().tv(true).animations(true);
    let rail = Rc::new(RefCell::new(Scroller::new("rail", rail_surface(), options, profile)));
    rail.borrow_mut().init();

    let mut nav = Navigator::new();
    nav.add_revealer(rail.clone());

    let geometry = snapshot(&layout, rail.borrow().surface());
    let first = nav.auto_focus(&root, None, &geometry, Default::default());
    println!("start: focus={first:?}");

    for (turn, raw) in script().into_iter().enumerate() {
        let geometry = snapshot(&layout, rail.borrow().surface());
        let events = translate(&raw, &root, &geometry);

        let mut passthrough = Vec::new();
        for event in events {
            let response = rail.borrow_mut().handle(&event, &root);
            match response {
                ScrollResponse::RequestFocus(target) => {
                    nav.focus_from_click(&root, &target);
                }
                ScrollResponse::ClickSuppressed => println!("  click after drag suppressed"),
                ScrollResponse::Consumed => {}
                ScrollResponse::Ignored => passthrough.push(event),
            }
        }

        let changes = nav.process_events(&passthrough, &root, &geometry);
        rail.borrow_mut().tick();

        let offset = rail.borrow().scroll_position();
        println!(
            "turn {turn}: focus={:?} rail offset={offset} changes={}",
            nav.focused(),
            changes.len()
        );
    }

    Ok(())
}
