mod container;
mod enums;

pub use container::FocusContainer;
pub use enums::{Axis, DeltaMode, Direction, MouseButton, PointerDevice};
