use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::element::Element;
use crate::hit::hit_test;
use crate::layout::Geometry;
use crate::types::{DeltaMode, Direction, MouseButton, PointerDevice};

/// High-level input and notification events.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Directional move request (d-pad, arrow key).
    Navigate(Direction),
    /// Pointer pressed on `target`.
    PointerDown {
        target: Option<String>,
        x: f32,
        y: f32,
        device: PointerDevice,
        button: MouseButton,
    },
    /// Pointer moved while pressed.
    PointerMove { x: f32, y: f32 },
    /// Pointer released.
    PointerUp { x: f32, y: f32 },
    /// The platform aborted the pointer interaction.
    PointerCancel,
    /// Wheel rotation.
    Wheel {
        delta_x: f32,
        delta_y: f32,
        mode: DeltaMode,
    },
    /// Click delivered after a press/release pair.
    Click {
        target: Option<String>,
        button: MouseButton,
    },
    /// Size observation of a scroll viewport's content box.
    Resize { width: f32, height: f32 },
    /// The viewport element itself was scrolled natively.
    FrameScroll,
    /// Element gained focus
    Focus { target: String },
    /// Element lost focus
    Blur {
        target: String,
        new_target: Option<String>,
    },
}

/// Convert raw terminal events into high-level events.
///
/// Arrow keys without modifiers become navigation requests, mouse buttons
/// become pointer events targeted by hit testing, wheel notches become
/// line-mode wheel deltas and terminal resizes become size observations.
pub fn translate(raw: &[CrosstermEvent], root: &Element, geometry: &dyn Geometry) -> Vec<Event> {
    let mut events = Vec::new();

    for raw_event in raw {
        match raw_event {
            CrosstermEvent::Key(key_event) => {
                // Only process key press events (not release/repeat on some terminals)
                if key_event.kind != KeyEventKind::Press || key_event.modifiers != KeyModifiers::NONE {
                    continue;
                }
                let direction = match key_event.code {
                    KeyCode::Left => Direction::Left,
                    KeyCode::Right => Direction::Right,
                    KeyCode::Up => Direction::Up,
                    KeyCode::Down => Direction::Down,
                    _ => continue,
                };
                events.push(Event::Navigate(direction));
            }

            CrosstermEvent::Mouse(mouse_event) => {
                let x = mouse_event.column as f32;
                let y = mouse_event.row as f32;

                match mouse_event.kind {
                    MouseEventKind::Down(button) => {
                        events.push(Event::PointerDown {
                            target: hit_test(geometry, root, x, y),
                            x,
                            y,
                            device: PointerDevice::Mouse,
                            button: button.into(),
                        });
                    }
                    MouseEventKind::Drag(_) => {
                        events.push(Event::PointerMove { x, y });
                    }
                    MouseEventKind::Up(button) => {
                        events.push(Event::PointerUp { x, y });
                        events.push(Event::Click {
                            target: hit_test(geometry, root, x, y),
                            button: button.into(),
                        });
                    }
                    MouseEventKind::ScrollUp => events.push(wheel(0.0, -1.0)),
                    MouseEventKind::ScrollDown => events.push(wheel(0.0, 1.0)),
                    MouseEventKind::ScrollLeft => events.push(wheel(-1.0, 0.0)),
                    MouseEventKind::ScrollRight => events.push(wheel(1.0, 0.0)),
                    MouseEventKind::Moved => {}
                }
            }

            CrosstermEvent::Resize(width, height) => {
                events.push(Event::Resize {
                    width: *width as f32,
                    height: *height as f32,
                });
            }

            _ => {}
        }
    }

    events
}

fn wheel(delta_x: f32, delta_y: f32) -> Event {
    Event::Wheel {
        delta_x,
        delta_y,
        mode: DeltaMode::Line,
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
