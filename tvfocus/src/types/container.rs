use super::{Axis, Direction};

/// Grouping tag that bounds directional navigation.
///
/// When focus moves in a direction, the search for candidates is limited to
/// the nearest ancestor of the focused element carrying a container tag that
/// applies to that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusContainer {
    /// Bounds navigation in every direction.
    All,
    /// Bounds navigation along one axis (both signs).
    Axis(Axis),
    /// Bounds navigation in a single direction only.
    Edge(Direction),
}

impl FocusContainer {
    pub const X: FocusContainer = FocusContainer::Axis(Axis::X);
    pub const Y: FocusContainer = FocusContainer::Axis(Axis::Y);

    /// Whether this container stops a search moving in `direction`.
    pub fn bounds(self, direction: Direction) -> bool {
        match self {
            FocusContainer::All => true,
            FocusContainer::Axis(axis) => direction.axis() == axis,
            FocusContainer::Edge(edge) => edge == direction,
        }
    }
}
