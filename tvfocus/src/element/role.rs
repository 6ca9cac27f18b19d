/// What kind of control an element is.
///
/// Roles decide native focusability and whether a pointer press on the
/// element may start a scroll drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Generic,
    Button,
    Link,
    Input(InputKind),
    TextArea,
    Select,
    /// Modal surface. Acts as a focus container in every direction.
    Dialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputKind {
    #[default]
    Text,
    Search,
    Password,
    Number,
    Checkbox,
    Radio,
    Range,
    File,
}

impl Role {
    /// Roles that take focus without an explicit `focusable` flag.
    pub fn is_natively_focusable(self) -> bool {
        matches!(
            self,
            Role::Button | Role::Link | Role::Input(_) | Role::TextArea | Role::Select
        )
    }

    /// Form controls that own pointer input (text selection, sliders, pickers).
    pub fn is_interactive(self) -> bool {
        matches!(self, Role::Input(_) | Role::TextArea | Role::Select)
    }

    /// Range sliders and file pickers are never d-pad targets.
    pub fn rejects_focus(self) -> bool {
        matches!(self, Role::Input(InputKind::Range | InputKind::File))
    }
}
