//! Viewport scrolling.
//!
//! A [`Scroller`] keeps one axis of a frame's content in view. It either
//! translates the content itself ([`ScrollMode::Transform`]) or drives the
//! platform's scroll region ([`ScrollMode::Native`]). Positions are committed
//! synchronously; animations are handed to the [`ScrollSurface`] and never
//! awaited.

mod drag;
mod options;
mod surface;

use std::time::{Duration, Instant};

pub use drag::DragSession;
pub use options::{PlatformProfile, ScrollMode, ScrollerOptions};
pub use surface::{HeadlessSurface, Presentation, ScrollBehavior, ScrollSurface};

use crate::element::{ancestors, is_within, Element};
use crate::event::Event;
use crate::focus::Reveal;
use crate::layout::Size;
use crate::transitions::{Transition, TransitionConfig};
use crate::types::{Axis, DeltaMode, MouseButton, PointerDevice};

/// Moves closer together than this are made immediate under `auto_immediate`.
const AUTO_IMMEDIATE_WINDOW: Duration = Duration::from_millis(50);

/// Scroll bounds and offsets along the scroller's axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub start: f32,
    pub center: f32,
    pub end: f32,
    /// Last committed offset.
    pub cur: f32,
    /// Target of the latest move.
    pub dest: f32,
}

impl Position {
    pub fn at(&self, location: Location) -> f32 {
        match location {
            Location::Start => self.start,
            Location::Center => self.center,
            Location::End => self.end,
        }
    }
}

/// Where an item is, expressed as the scroll offsets that would align it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPosition {
    /// Offset aligning the item with the frame's leading edge.
    pub start: f32,
    pub center: f32,
    /// Offset aligning the item with the frame's trailing edge.
    pub end: f32,
    pub size: f32,
    /// The item lies fully inside the visible range.
    pub is_visible: bool,
}

impl ItemPosition {
    pub fn at(&self, location: Location) -> f32 {
        match location {
            Location::Start => self.start,
            Location::Center => self.center,
            Location::End => self.end,
        }
    }
}

/// Alignment target for [`Scroller::to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Start,
    Center,
    End,
}

/// What a scroller did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollResponse {
    /// Not for this scroller; keep propagating.
    Ignored,
    Consumed,
    /// A click ending a drag; the host must drop it.
    ClickSuppressed,
    /// A click inside the frame; the host should move focus to the clicked
    /// element (see `Navigator::focus_from_click`).
    RequestFocus(String),
}

/// Input adapters currently bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Bindings {
    mouse_drag: bool,
    touch_drag: bool,
    wheel: bool,
    frame_scroll: bool,
    click: bool,
    resize: bool,
}

/// Scrolls the content of one frame along one axis.
#[derive(Debug)]
pub struct Scroller<S: ScrollSurface> {
    id: String,
    options: ScrollerOptions,
    profile: PlatformProfile,
    mode: ScrollMode,
    axis: Axis,
    surface: S,

    pos: Position,
    requires_reflow: bool,
    frame_size: f32,
    content_size: f32,
    observed: Option<Size>,

    bindings: Bindings,
    initialized: bool,
    drag: Option<DragSession>,
    /// Element whose next click is swallowed after a drag.
    click_guard: Option<String>,
    last_animate: Option<Instant>,
}

impl<S: ScrollSurface> Scroller<S> {
    /// Create a scroller for the frame element `id`. The mode is fixed here.
    pub fn new(
        id: impl Into<String>,
        surface: S,
        options: ScrollerOptions,
        profile: PlatformProfile,
    ) -> Self {
        let mode = ScrollMode::select(&options, &profile);
        let axis = options.axis();
        Self {
            id: id.into(),
            options,
            profile,
            mode,
            axis,
            surface,
            pos: Position::default(),
            requires_reflow: true,
            frame_size: 0.0,
            content_size: 0.0,
            observed: None,
            bindings: Bindings::default(),
            initialized: false,
            drag: None,
            click_guard: None,
            last_animate: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn options(&self) -> &ScrollerOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface. Call [`Scroller::reload`] after
    /// changing its geometry.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Whether the next click on the last drag's source will be swallowed.
    pub fn is_click_guarded(&self) -> bool {
        self.click_guard.is_some()
    }

    /// Current bounds and offsets, with `cur` read from the platform in
    /// native mode.
    pub fn position(&mut self) -> Position {
        self.ensure_size_info();
        let mut pos = self.pos;
        if self.mode == ScrollMode::Native {
            pos.cur = self.surface.native_offset(self.axis);
        }
        pos
    }

    pub fn scroll_event_name(&self) -> &'static str {
        self.mode.scroll_event_name()
    }

    /// Committed offset in transform mode, the platform's offset in native mode.
    pub fn scroll_position(&self) -> f32 {
        match self.mode {
            ScrollMode::Transform => self.pos.cur,
            ScrollMode::Native => self.surface.native_offset(self.axis),
        }
    }

    /// Scrollable extent of the content along the axis.
    pub fn scroll_size(&mut self) -> f32 {
        match self.mode {
            ScrollMode::Transform => {
                self.ensure_size_info();
                self.content_size
            }
            ScrollMode::Native => self.surface.content_size().along(self.axis),
        }
    }

    // Lifecycle

    /// Apply presentation, bind input adapters and measure. Idempotent.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }

        let presentation = Presentation::new(self.mode, &self.options, &self.profile);
        self.surface.configure(&presentation);

        let transform = self.mode == ScrollMode::Transform;
        let horizontal = self.options.horizontal;
        self.bindings = Bindings {
            mouse_drag: transform || self.profile.tv,
            touch_drag: transform,
            wheel: (transform || horizontal) && self.options.mouse_wheel,
            frame_scroll: transform && !horizontal,
            click: true,
            resize: true,
        };

        self.initialized = true;
        log::debug!(
            "[scroller] init {} mode={:?} axis={:?} bindings={:?}",
            self.id,
            self.mode,
            self.axis,
            self.bindings
        );

        self.load(true);
    }

    /// Unbind everything. Safe to call without `init`.
    pub fn destroy(&mut self) {
        self.bindings = Bindings::default();
        self.observed = None;
        self.drag = None;
        self.click_guard = None;
        self.initialized = false;
        log::debug!("[scroller] destroy {}", self.id);
    }

    /// Mark sizes stale. Unless this is the initial load, re-measure and pull
    /// an out-of-range destination back into bounds.
    pub fn load(&mut self, is_init: bool) {
        self.requires_reflow = true;

        if !is_init {
            self.ensure_size_info();
            let Position { start, end, dest, .. } = self.pos;
            if dest < start || dest > end {
                self.slide_to(dest, false);
            }
        }
    }

    pub fn reload(&mut self) {
        self.load(false);
    }

    /// Clear the post-drag click guard once the drag is over. Call once per
    /// event loop turn.
    pub fn tick(&mut self) {
        if self.drag.is_none() {
            if let Some(source) = self.click_guard.take() {
                log::trace!("[scroller] click guard on {source} cleared");
            }
        }
    }

    fn ensure_size_info(&mut self) {
        if !self.requires_reflow {
            return;
        }
        self.requires_reflow = false;

        self.frame_size = self.surface.viewport_rect().extent(self.axis);
        self.content_size = self
            .options
            .scroll_width
            .unwrap_or_else(|| self.surface.content_size().along(self.axis));

        self.pos.start = 0.0;
        self.pos.end = (self.content_size - self.frame_size).max(0.0);
        self.pos.center = (self.pos.start + self.pos.end) / 2.0;
    }

    // Movement

    /// Move to `target`, clamped into bounds.
    pub fn slide_to(&mut self, target: f32, immediate: bool) {
        self.slide(target, immediate, false);
    }

    /// Move by `delta` from the current destination.
    pub fn slide_by(&mut self, delta: f32, immediate: bool) {
        if delta == 0.0 {
            return;
        }
        self.ensure_size_info();
        self.slide_to(self.pos.dest + delta, immediate);
    }

    fn slide(&mut self, target: f32, immediate: bool, item_visible: bool) {
        if !target.is_finite() {
            log::warn!("[scroller] {} ignoring non-finite target {target}", self.id);
            return;
        }
        self.ensure_size_info();
        let to = within(target, self.pos.start, self.pos.end);

        if self.mode == ScrollMode::Native {
            let behavior = if immediate {
                ScrollBehavior::Instant
            } else {
                ScrollBehavior::Smooth
            };
            self.surface.scroll_native(self.axis, to, behavior);
            self.pos.dest = to;
            return;
        }

        let from = self.pos.cur;
        let dragging = self.drag.as_ref().is_some_and(|drag| drag.committed);
        let mut immediate = immediate || dragging || self.options.speed == 0;

        let now = Instant::now();
        if self.options.auto_immediate && !immediate {
            if let Some(last) = self.last_animate {
                if now.duration_since(last) <= AUTO_IMMEDIATE_WINDOW {
                    immediate = true;
                }
            }
        }

        if !immediate && self.options.skip_slide_to_when_visible && item_visible {
            return;
        }

        self.pos.dest = to;

        let duration = if immediate {
            self.options.immediate_speed
        } else {
            self.options.speed
        };
        self.surface.apply_transition(Transition {
            axis: self.axis,
            from,
            translate: 0.0 - to.round(),
            config: TransitionConfig::ease_out(duration),
        });
        self.pos.cur = to;

        if self.options.dispatch_scroll_event {
            self.surface.dispatch_scroll_event(self.mode.scroll_event_name());
        }
        self.last_animate = Some(now);

        log::trace!("[scroller] {} {from} -> {to} ({duration}ms)", self.id);
    }

    /// Align the frame (no item) or an item with `location`.
    pub fn to(&mut self, location: Location, item: Option<&str>, immediate: bool) {
        match item {
            None => {
                self.ensure_size_info();
                self.slide_to(self.pos.at(location), immediate);
            }
            Some(id) => {
                let Some(item_pos) = self.item_position(id) else {
                    log::debug!("[scroller] {id} is not rendered in {}", self.id);
                    return;
                };
                self.slide(item_pos.at(location), immediate, item_pos.is_visible);
            }
        }
    }

    pub fn to_start(&mut self, item: Option<&str>, immediate: bool) {
        self.to(Location::Start, item, immediate);
    }

    pub fn to_center(&mut self, item: Option<&str>, immediate: bool) {
        self.to(Location::Center, item, immediate);
    }

    pub fn to_end(&mut self, item: Option<&str>, immediate: bool) {
        self.to(Location::End, item, immediate);
    }

    // Measurement

    /// Offsets that would align the item, relative to the content origin.
    /// Returns None if the item is not rendered.
    pub fn item_position(&mut self, id: &str) -> Option<ItemPosition> {
        let item = self.surface.item_rect(id)?;
        self.ensure_size_info();

        let axis = self.axis;
        let (mut offset, center_offset) = match self.mode {
            ScrollMode::Transform => (
                item.start(axis) - self.surface.content_rect().start(axis),
                self.options.center_offset,
            ),
            ScrollMode::Native => (
                item.start(axis) - self.surface.viewport_rect().start(axis),
                0.0,
            ),
        };
        if self.mode == ScrollMode::Native {
            offset += self.surface.native_offset(axis);
        }

        let size = item.extent(axis);
        let frame = self.frame_size;
        let current = self.scroll_position();

        Some(ItemPosition {
            start: offset,
            center: offset + center_offset - frame / 2.0 + size / 2.0,
            end: offset - frame + size,
            size,
            is_visible: offset >= current && offset + size <= current + frame,
        })
    }

    /// The item's center offset, kept between its start and end offsets.
    pub fn center_position(&mut self, id: &str) -> Option<f32> {
        let pos = self.item_position(id)?;
        Some(within(pos.center, pos.start, pos.end))
    }

    /// Whether `target` is, or sits inside, a form control that owns
    /// pointer input.
    pub fn is_interactive(root: &Element, target: &str) -> bool {
        ancestors(root, target)
            .map(|chain| chain.iter().any(|el| el.role.is_interactive()))
            .unwrap_or(false)
    }

    // Input

    /// Feed one event to the scroller. `root` is the tree containing the
    /// frame, used to scope pointer targets.
    ///
    /// `Resize` carries the frame's new content box; update the surface
    /// before sending it.
    pub fn handle(&mut self, event: &Event, root: &Element) -> ScrollResponse {
        match event {
            Event::PointerDown {
                target: Some(target),
                x,
                y,
                device,
                button,
            } => self.pointer_down(root, target, *x, *y, *device, *button),
            Event::PointerMove { x, y } => self.pointer_track(*x, *y, false),
            Event::PointerUp { x, y } => self.pointer_track(*x, *y, true),
            Event::PointerCancel => match self.drag.take() {
                Some(_) => ScrollResponse::Consumed,
                None => ScrollResponse::Ignored,
            },
            Event::Wheel {
                delta_x,
                delta_y,
                mode,
            } => self.wheel(*delta_x, *delta_y, *mode),
            Event::Click {
                target: Some(target),
                button,
            } => self.click(root, target, *button),
            Event::Resize { width, height } => self.resize(Size::new(*width, *height)),
            Event::FrameScroll if self.bindings.frame_scroll => {
                self.surface
                    .scroll_native(self.axis, 0.0, ScrollBehavior::Instant);
                ScrollResponse::Consumed
            }
            _ => ScrollResponse::Ignored,
        }
    }

    /// Feed a batch of events, returning one response per event.
    pub fn process_events(&mut self, events: &[Event], root: &Element) -> Vec<ScrollResponse> {
        events.iter().map(|event| self.handle(event, root)).collect()
    }

    fn pointer_down(
        &mut self,
        root: &Element,
        target: &str,
        x: f32,
        y: f32,
        device: PointerDevice,
        button: MouseButton,
    ) -> ScrollResponse {
        // A committed drag owns the pointer; a provisional one is replaced
        let dragging = self.drag.as_ref().is_some_and(|drag| drag.committed);
        if dragging || !is_within(root, &self.id, target) {
            return ScrollResponse::Ignored;
        }

        let allowed = match device {
            PointerDevice::Touch => self.bindings.touch_drag && self.options.touch_dragging,
            PointerDevice::Mouse => {
                self.bindings.mouse_drag
                    && self.options.mouse_dragging
                    && button == MouseButton::Left
                    && !Self::is_interactive(root, target)
            }
        };
        if !allowed || self.mode != ScrollMode::Transform {
            return ScrollResponse::Ignored;
        }

        self.ensure_size_info();
        log::trace!("[scroller] drag start on {target} at ({x}, {y})");
        self.drag = Some(DragSession::new(device, target, x, y, self.pos.cur));
        ScrollResponse::Consumed
    }

    fn pointer_track(&mut self, x: f32, y: f32, released: bool) -> ScrollResponse {
        let axis = self.axis;
        let threshold = self.options.drag_threshold;
        let Some(session) = self.drag.as_mut() else {
            return ScrollResponse::Ignored;
        };

        session.track(x, y, axis);
        if !released && session.path < 1.0 {
            return ScrollResponse::Consumed;
        }

        if !session.committed {
            if session.path < threshold {
                if released {
                    self.drag = None;
                }
                return ScrollResponse::Consumed;
            }
            if !session.follows(axis) {
                log::trace!("[scroller] cross-axis gesture abandoned");
                self.drag = None;
                return ScrollResponse::Ignored;
            }
            session.committed = true;
        }

        if !session.locked && session.path > session.path_to_lock {
            session.locked = true;
            self.click_guard = Some(session.source.clone());
        }

        let target = session.target();
        if released {
            self.drag = None;
        }
        self.slide_to(target, false);
        ScrollResponse::Consumed
    }

    fn click(&mut self, root: &Element, target: &str, button: MouseButton) -> ScrollResponse {
        if let Some(source) = &self.click_guard {
            if is_within(root, source, target) {
                self.click_guard = None;
                return ScrollResponse::ClickSuppressed;
            }
        }

        if !self.bindings.click || button != MouseButton::Left || !is_within(root, &self.id, target) {
            return ScrollResponse::Ignored;
        }
        ScrollResponse::RequestFocus(target.to_string())
    }

    fn wheel(&mut self, delta_x: f32, delta_y: f32, mode: DeltaMode) -> ScrollResponse {
        if !self.bindings.wheel {
            return ScrollResponse::Ignored;
        }
        self.ensure_size_info();
        if self.options.scroll_by == 0.0 || self.pos.start == self.pos.end {
            return ScrollResponse::Ignored;
        }

        let mut delta = match self.axis {
            Axis::X => delta_x,
            Axis::Y => delta_y,
        };

        match self.mode {
            ScrollMode::Transform => {
                delta /= match mode {
                    DeltaMode::Line => self.options.wheel_line_divisor,
                    DeltaMode::Pixel | DeltaMode::Page => self.options.wheel_pixel_divisor,
                };
                self.slide_by(self.options.scroll_by * delta, false);
            }
            ScrollMode::Native => {
                if self.profile.smooth_scroll {
                    delta *= self.options.native_wheel_multiplier;
                }
                let offset = self.surface.native_offset(self.axis) + delta;
                self.surface
                    .scroll_native(self.axis, offset, ScrollBehavior::Instant);
            }
        }
        ScrollResponse::Consumed
    }

    fn resize(&mut self, size: Size) -> ScrollResponse {
        // Hidden frames report a zero box
        if !self.bindings.resize || size.is_degenerate() {
            return ScrollResponse::Ignored;
        }
        if self.observed != Some(size) {
            self.observed = Some(size);
            self.load(false);
        }
        ScrollResponse::Consumed
    }
}

impl<S: ScrollSurface> Reveal for Scroller<S> {
    fn reveal(&mut self, id: &str) -> bool {
        if self.surface.item_rect(id).is_none() {
            return false;
        }
        self.to_center(Some(id), false);
        true
    }
}

fn within(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
