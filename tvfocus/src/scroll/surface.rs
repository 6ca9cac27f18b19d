use std::collections::HashMap;

use super::options::{PlatformProfile, ScrollMode, ScrollerOptions};
use crate::layout::{Geometry, Rect, Size};
use crate::transitions::{Transition, TransitionConfig};
use crate::types::Axis;

/// How a native scroll request should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// Styling a scroller asks its surface to apply once, at init.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Presentation {
    pub classes: Vec<&'static str>,
    /// Frame clips its content (transform mode).
    pub clip_overflow: bool,
    /// Default transition for content transforms (transform mode).
    pub transition: Option<TransitionConfig>,
}

impl Presentation {
    pub fn new(
        mode: ScrollMode,
        options: &ScrollerOptions,
        profile: &PlatformProfile,
    ) -> Self {
        let horizontal = options.horizontal;
        let pick = |x: &'static str, y: &'static str| if horizontal { x } else { y };

        match mode {
            ScrollMode::Native => {
                let mut classes = vec![pick("scroll-x", "scroll-y")];
                if !(profile.desktop && !options.hide_scrollbar) {
                    classes.push(pick("hidden-scroll-x", "hidden-scroll-y"));
                    if profile.tv && options.allow_native_smooth_scroll != Some(false) {
                        classes.push(pick("smooth-scroll-x", "smooth-scroll-y"));
                    }
                }
                if options.force_hide_scrollbars {
                    classes.push(pick("hidden-scroll-x-forced", "hidden-scroll-y-forced"));
                }
                Self {
                    classes,
                    clip_overflow: false,
                    transition: None,
                }
            }
            ScrollMode::Transform => Self {
                classes: vec![pick("animated-scroll-x", "animated-scroll-y")],
                clip_overflow: true,
                transition: Some(TransitionConfig::ease_out(options.speed)),
            },
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

/// Rendering side of a scroller: the frame (viewport), the content box it
/// moves, and the platform's native scroll region.
///
/// All rects are in surface coordinates. Transform and native offsets are
/// reflected in `content_rect` and `item_rect`.
pub trait ScrollSurface {
    fn viewport_rect(&self) -> Rect;
    fn content_rect(&self) -> Rect;
    /// Scrollable extent of the content.
    fn content_size(&self) -> Size;
    /// Box of a scrollable item, or None when it is not rendered.
    fn item_rect(&self, id: &str) -> Option<Rect>;

    fn native_offset(&self, axis: Axis) -> f32;
    fn scroll_native(&mut self, axis: Axis, offset: f32, behavior: ScrollBehavior);

    /// Start moving the content. Supersedes any transition in flight.
    fn apply_transition(&mut self, transition: Transition);
    fn configure(&mut self, presentation: &Presentation);
    fn dispatch_scroll_event(&mut self, name: &str);
}

/// In-memory surface. Items are placed in content coordinates; transitions
/// land instantly and every request is recorded for inspection.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    viewport: Rect,
    content: Size,
    items: HashMap<String, Rect>,
    translate: (f32, f32),
    native: (f32, f32),
    presentation: Option<Presentation>,
    transitions: Vec<Transition>,
    native_scrolls: Vec<(Axis, f32, ScrollBehavior)>,
    events: Vec<String>,
}

impl HeadlessSurface {
    pub fn new(viewport: Rect, content: Size) -> Self {
        Self {
            viewport,
            content,
            ..Default::default()
        }
    }

    pub fn with_item(mut self, id: impl Into<String>, rect: Rect) -> Self {
        self.items.insert(id.into(), rect);
        self
    }

    pub fn set_item(&mut self, id: impl Into<String>, rect: Rect) {
        self.items.insert(id.into(), rect);
    }

    pub fn remove_item(&mut self, id: &str) {
        self.items.remove(id);
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn set_content_size(&mut self, content: Size) {
        self.content = content;
    }

    /// Current transform translation along `axis`.
    pub fn translation(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.translate.0,
            Axis::Y => self.translate.1,
        }
    }

    pub fn presentation(&self) -> Option<&Presentation> {
        self.presentation.as_ref()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn native_scrolls(&self) -> &[(Axis, f32, ScrollBehavior)] {
        &self.native_scrolls
    }

    pub fn scroll_events(&self) -> &[String] {
        &self.events
    }

    /// Scroll the native region as the user would (scrollbar, touch), bypassing
    /// the scroller.
    pub fn user_scroll(&mut self, axis: Axis, offset: f32) {
        let max = (self.content.along(axis) - self.viewport.extent(axis)).max(0.0);
        let offset = offset.clamp(0.0, max);
        match axis {
            Axis::X => self.native.0 = offset,
            Axis::Y => self.native.1 = offset,
        }
    }
}

impl ScrollSurface for HeadlessSurface {
    fn viewport_rect(&self) -> Rect {
        self.viewport
    }

    fn content_rect(&self) -> Rect {
        Rect::new(
            self.viewport.x + self.translate.0 - self.native.0,
            self.viewport.y + self.translate.1 - self.native.1,
            self.content.width,
            self.content.height,
        )
    }

    fn content_size(&self) -> Size {
        self.content
    }

    fn item_rect(&self, id: &str) -> Option<Rect> {
        let origin = self.content_rect();
        self.items
            .get(id)
            .map(|rect| rect.translate(origin.x, origin.y))
    }

    fn native_offset(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.native.0,
            Axis::Y => self.native.1,
        }
    }

    fn scroll_native(&mut self, axis: Axis, offset: f32, behavior: ScrollBehavior) {
        self.native_scrolls.push((axis, offset, behavior));
        self.user_scroll(axis, offset);
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition.axis {
            Axis::X => self.translate.0 = transition.translate,
            Axis::Y => self.translate.1 = transition.translate,
        }
        self.transitions.push(transition);
    }

    fn configure(&mut self, presentation: &Presentation) {
        self.presentation = Some(presentation.clone());
    }

    fn dispatch_scroll_event(&mut self, name: &str) {
        self.events.push(name.to_string());
    }
}

impl Geometry for HeadlessSurface {
    fn bounds(&self, id: &str) -> Option<Rect> {
        self.item_rect(id)
    }
}
