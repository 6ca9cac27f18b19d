use crate::types::Axis;

/// Capability signals of the platform a scroller runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformProfile {
    /// The native scroll primitive supports smooth behaviour.
    pub smooth_scroll: bool,
    /// Native smooth scrolling is good enough to prefer it outside TV layouts.
    pub smooth_scroll_trusted: bool,
    /// Ten-foot layout driven by a remote.
    pub tv: bool,
    pub desktop: bool,
    /// Transform animations are available.
    pub animations: bool,
    /// Pointer-remote platforms where transform scrolling runs off screen.
    pub forces_native_scroll: bool,
}

impl PlatformProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn smooth_scroll(mut self, smooth_scroll: bool) -> Self {
        self.smooth_scroll = smooth_scroll;
        self
    }

    pub fn smooth_scroll_trusted(mut self, trusted: bool) -> Self {
        self.smooth_scroll_trusted = trusted;
        self
    }

    pub fn tv(mut self, tv: bool) -> Self {
        self.tv = tv;
        self
    }

    pub fn desktop(mut self, desktop: bool) -> Self {
        self.desktop = desktop;
        self
    }

    pub fn animations(mut self, animations: bool) -> Self {
        self.animations = animations;
        self
    }

    pub fn forces_native_scroll(mut self, forces: bool) -> Self {
        self.forces_native_scroll = forces;
        self
    }
}

/// How a scroller moves its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollMode {
    /// The scroller translates the content itself.
    Transform,
    /// The platform's scrollable region moves the content.
    Native,
}

impl ScrollMode {
    /// Pick the mode for a scroller. Decided once, at construction.
    pub fn select(options: &ScrollerOptions, profile: &PlatformProfile) -> Self {
        if profile.forces_native_scroll {
            return ScrollMode::Native;
        }

        if options.allow_native_scroll == Some(false) {
            ScrollMode::Transform
        } else if profile.smooth_scroll
            && ((profile.smooth_scroll_trusted && !profile.tv)
                || options.allow_native_smooth_scroll == Some(true))
        {
            ScrollMode::Native
        } else if options.require_animation && profile.animations {
            ScrollMode::Transform
        } else if !profile.tv || !profile.animations {
            ScrollMode::Native
        } else {
            ScrollMode::Transform
        }
    }

    /// Name of the notification fired after the scroll position changes.
    pub fn scroll_event_name(self) -> &'static str {
        match self {
            ScrollMode::Transform => "scrollanimate",
            ScrollMode::Native => "scroll",
        }
    }
}

/// Scroller configuration.
///
/// Build with chained setters:
///
/// ```
/// use tvfocus::scroll::ScrollerOptions;
///
/// let options = ScrollerOptions::new().horizontal(true).speed(300).scroll_by(200.0);
/// assert_eq!(options.speed, 300);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollerOptions {
    pub horizontal: bool,
    /// Pixels moved per normalized wheel step. Zero disables the wheel.
    pub scroll_by: f32,
    pub mouse_wheel: bool,
    pub mouse_dragging: bool,
    pub touch_dragging: bool,
    /// Distance in pixels before a press becomes a drag.
    pub drag_threshold: f32,
    /// Transform animation duration in milliseconds. Zero disables animation.
    pub speed: u64,
    /// Duration used for immediate transform moves.
    pub immediate_speed: u64,
    pub allow_native_scroll: Option<bool>,
    pub allow_native_smooth_scroll: Option<bool>,
    pub require_animation: bool,
    /// Jump immediately when a move follows the previous one within 50 ms.
    pub auto_immediate: bool,
    /// Skip animated moves to items that are already fully visible.
    pub skip_slide_to_when_visible: bool,
    /// Added to item centers in transform mode.
    pub center_offset: f32,
    /// Overrides the measured content extent.
    pub scroll_width: Option<f32>,
    pub hide_scrollbar: bool,
    pub force_hide_scrollbars: bool,
    /// Fire the scroll notification after every transform move.
    pub dispatch_scroll_event: bool,
    pub wheel_line_divisor: f32,
    pub wheel_pixel_divisor: f32,
    pub native_wheel_multiplier: f32,
}

impl Default for ScrollerOptions {
    fn default() -> Self {
        Self {
            horizontal: false,
            scroll_by: 0.0,
            mouse_wheel: true,
            mouse_dragging: true,
            touch_dragging: true,
            drag_threshold: 3.0,
            speed: 0,
            immediate_speed: 50,
            allow_native_scroll: None,
            allow_native_smooth_scroll: None,
            require_animation: false,
            auto_immediate: false,
            skip_slide_to_when_visible: false,
            center_offset: 0.0,
            scroll_width: None,
            hide_scrollbar: false,
            force_hide_scrollbars: false,
            dispatch_scroll_event: false,
            wheel_line_divisor: 3.0,
            wheel_pixel_divisor: 100.0,
            native_wheel_multiplier: 12.0,
        }
    }
}

impl ScrollerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(&self) -> Axis {
        Axis::from_horizontal(self.horizontal)
    }

    pub fn horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn scroll_by(mut self, scroll_by: f32) -> Self {
        self.scroll_by = scroll_by;
        self
    }

    pub fn mouse_wheel(mut self, enabled: bool) -> Self {
        self.mouse_wheel = enabled;
        self
    }

    pub fn mouse_dragging(mut self, enabled: bool) -> Self {
        self.mouse_dragging = enabled;
        self
    }

    pub fn touch_dragging(mut self, enabled: bool) -> Self {
        self.touch_dragging = enabled;
        self
    }

    pub fn drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub fn speed(mut self, millis: u64) -> Self {
        self.speed = millis;
        self
    }

    pub fn immediate_speed(mut self, millis: u64) -> Self {
        self.immediate_speed = millis;
        self
    }

    pub fn allow_native_scroll(mut self, allow: bool) -> Self {
        self.allow_native_scroll = Some(allow);
        self
    }

    pub fn allow_native_smooth_scroll(mut self, allow: bool) -> Self {
        self.allow_native_smooth_scroll = Some(allow);
        self
    }

    pub fn require_animation(mut self, require: bool) -> Self {
        self.require_animation = require;
        self
    }

    pub fn auto_immediate(mut self, enabled: bool) -> Self {
        self.auto_immediate = enabled;
        self
    }

    pub fn skip_slide_to_when_visible(mut self, enabled: bool) -> Self {
        self.skip_slide_to_when_visible = enabled;
        self
    }

    pub fn center_offset(mut self, offset: f32) -> Self {
        self.center_offset = offset;
        self
    }

    pub fn scroll_width(mut self, width: f32) -> Self {
        self.scroll_width = Some(width);
        self
    }

    pub fn hide_scrollbar(mut self, hide: bool) -> Self {
        self.hide_scrollbar = hide;
        self
    }

    pub fn force_hide_scrollbars(mut self, hide: bool) -> Self {
        self.force_hide_scrollbars = hide;
        self
    }

    pub fn dispatch_scroll_event(mut self, enabled: bool) -> Self {
        self.dispatch_scroll_event = enabled;
        self
    }

    pub fn wheel_line_divisor(mut self, divisor: f32) -> Self {
        self.wheel_line_divisor = divisor;
        self
    }

    pub fn wheel_pixel_divisor(mut self, divisor: f32) -> Self {
        self.wheel_pixel_divisor = divisor;
        self
    }

    pub fn native_wheel_multiplier(mut self, multiplier: f32) -> Self {
        self.native_wheel_multiplier = multiplier;
        self
    }
}
