pub mod element;
pub mod error;
pub mod event;
pub mod focus;
pub mod hit;
pub mod layout;
pub mod scroll;
pub mod transitions;
pub mod types;

pub use element::Element;
pub use error::FocusError;
pub use event::{translate, Event};
pub use focus::{AutoFocus, FocusDriver, Headless, Navigator, Reveal};
pub use hit::{hit_test, hit_test_focusable};
pub use layout::{Geometry, LayoutResult, Rect, Size};
pub use scroll::{
    HeadlessSurface, ItemPosition, Location, PlatformProfile, Position, ScrollMode,
    ScrollResponse, ScrollSurface, Scroller, ScrollerOptions,
};
pub use transitions::{Easing, Transition, TransitionConfig};
pub use types::*;
