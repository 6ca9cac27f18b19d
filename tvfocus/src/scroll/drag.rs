use crate::types::{Axis, PointerDevice};

/// Pointer travel after which a drag swallows the click that ends it.
const MOUSE_LOCK_DISTANCE: f32 = 10.0;
const TOUCH_LOCK_DISTANCE: f32 = 30.0;

/// State of one press-to-release pointer interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub device: PointerDevice,
    /// Element the press landed on.
    pub source: String,
    pub origin: (f32, f32),
    /// Scroll offset when the press happened.
    pub init_pos: f32,
    /// Straight-line distance from the origin.
    pub path: f32,
    /// Travel along the scroller's axis.
    pub delta: f32,
    pub path_x: f32,
    pub path_y: f32,
    pub path_to_lock: f32,
    /// Travel passed the threshold along the scroller's axis.
    pub committed: bool,
    /// Travel passed the lock distance; the ending click is suppressed.
    pub locked: bool,
}

impl DragSession {
    pub fn new(device: PointerDevice, source: impl Into<String>, x: f32, y: f32, init_pos: f32) -> Self {
        let path_to_lock = match device {
            PointerDevice::Touch => TOUCH_LOCK_DISTANCE,
            PointerDevice::Mouse => MOUSE_LOCK_DISTANCE,
        };
        Self {
            device,
            source: source.into(),
            origin: (x, y),
            init_pos,
            path: 0.0,
            delta: 0.0,
            path_x: 0.0,
            path_y: 0.0,
            path_to_lock,
            committed: false,
            locked: false,
        }
    }

    /// Record the pointer at (x, y).
    pub fn track(&mut self, x: f32, y: f32, axis: Axis) {
        self.path_x = x - self.origin.0;
        self.path_y = y - self.origin.1;
        self.path = self.path_x.hypot(self.path_y);
        self.delta = match axis {
            Axis::X => self.path_x,
            Axis::Y => self.path_y,
        };
    }

    /// Whether the travel so far is mostly along `axis`.
    pub fn follows(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.path_x.abs() > self.path_y.abs(),
            Axis::Y => self.path_x.abs() < self.path_y.abs(),
        }
    }

    /// Offset the content should sit at for the current travel.
    pub fn target(&self) -> f32 {
        (self.init_pos - self.delta).round()
    }
}
